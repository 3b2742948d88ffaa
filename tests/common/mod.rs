#![allow(dead_code)]

use std::{collections::HashMap, path::Path, sync::Mutex};

use async_trait::async_trait;
use template_sync::{
    clients::sendgrid::TemplateRepository,
    error::SyncError,
    models::{
        manifest::TemplateDescriptor,
        sendgrid::{CreateVersionRequest, Editor, TemplateVersion},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Fetch(String),
    Activate(String, String),
    Create(String, CreateVersionRequest),
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Call::Fetch(_))
    }
}

/// In-memory provider that records every call and applies mutations to its
/// own state, so a second run sees the first run's effects.
#[derive(Default)]
pub struct RecordingRepository {
    versions: Mutex<HashMap<String, Vec<TemplateVersion>>>,
    calls: Mutex<Vec<Call>>,
    failing: Vec<String>,
}

impl RecordingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_versions(self, template_id: &str, versions: Vec<TemplateVersion>) -> Self {
        self.versions
            .lock()
            .unwrap()
            .insert(template_id.to_string(), versions);
        self
    }

    pub fn failing_on(mut self, template_id: &str) -> Self {
        self.failing.push(template_id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

#[async_trait]
impl TemplateRepository for RecordingRepository {
    async fn fetch_versions(&self, template_id: &str) -> Result<Vec<TemplateVersion>, SyncError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Fetch(template_id.to_string()));

        if self.failing.iter().any(|id| id == template_id) {
            return Err(SyncError::RemoteService {
                operation: "fetch versions",
                template_id: template_id.to_string(),
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                body: "boom".to_string(),
            });
        }

        Ok(self
            .versions
            .lock()
            .unwrap()
            .get(template_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn activate_version(
        &self,
        template_id: &str,
        version_id: &str,
    ) -> Result<TemplateVersion, SyncError> {
        self.calls.lock().unwrap().push(Call::Activate(
            template_id.to_string(),
            version_id.to_string(),
        ));

        let mut versions = self.versions.lock().unwrap();
        let version = versions
            .get_mut(template_id)
            .and_then(|versions| versions.iter_mut().find(|v| v.id == version_id))
            .ok_or_else(|| SyncError::RemoteService {
                operation: "activate version",
                template_id: template_id.to_string(),
                status: reqwest::StatusCode::NOT_FOUND,
                body: String::new(),
            })?;

        version.active = 1;
        Ok(version.clone())
    }

    async fn create_version(
        &self,
        template_id: &str,
        request: &CreateVersionRequest,
    ) -> Result<(), SyncError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Create(template_id.to_string(), request.clone()));

        let mut versions = self.versions.lock().unwrap();
        let entry = versions.entry(template_id.to_string()).or_default();
        let id = format!("v{}", entry.len() + 1);
        entry.push(TemplateVersion {
            id,
            template_id: template_id.to_string(),
            name: request.name.clone(),
            active: request.active,
            subject: request.subject.clone(),
            html_content: request.html_content.clone(),
            updated_at: None,
            generate_plain_content: None,
            editor: Some(request.editor),
            thumbnail_url: None,
        });

        Ok(())
    }
}

pub fn descriptor(template_id: &str, name: &str, html: &str) -> TemplateDescriptor {
    TemplateDescriptor {
        template_id: template_id.to_string(),
        name: name.to_string(),
        subject: "Hi".to_string(),
        html_content: html.to_string(),
        test_data: Some(serde_json::json!({ "x": 1 })),
    }
}

pub fn version(id: &str, descriptor: &TemplateDescriptor, active: u8) -> TemplateVersion {
    TemplateVersion {
        id: id.to_string(),
        template_id: descriptor.template_id.clone(),
        name: descriptor.name.clone(),
        active,
        subject: descriptor.subject.clone(),
        html_content: descriptor.html_content.clone(),
        updated_at: Some("2024-01-01 00:00:00".to_string()),
        generate_plain_content: Some(true),
        editor: Some(Editor::Design),
        thumbnail_url: None,
    }
}

pub fn write_file(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

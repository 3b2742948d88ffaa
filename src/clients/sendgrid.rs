use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, error, info};

use crate::{
    config::Config,
    error::SyncError,
    models::sendgrid::{CreateVersionRequest, Template, TemplateVersion},
};

/// Remote access to a provider's dynamic template versions.
#[async_trait]
pub trait TemplateRepository {
    async fn fetch_versions(&self, template_id: &str) -> Result<Vec<TemplateVersion>, SyncError>;

    async fn activate_version(
        &self,
        template_id: &str,
        version_id: &str,
    ) -> Result<TemplateVersion, SyncError>;

    async fn create_version(
        &self,
        template_id: &str,
        request: &CreateVersionRequest,
    ) -> Result<(), SyncError>;
}

pub struct SendGridClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl SendGridClient {
    pub fn new(config: &Config) -> Result<Self, SyncError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.sendgrid_timeout_seconds))
            .build()
            .map_err(|e| SyncError::configuration(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = config.sendgrid_api_url.trim_end_matches('/').to_string();

        info!(base_url = %base_url, "SendGrid client initialized");

        Ok(Self {
            http_client,
            base_url,
            api_key: config.sendgrid_api_key.clone(),
        })
    }

    fn template_url(&self, template_id: &str) -> String {
        format!("{}/v3/templates/{}", self.base_url, template_id)
    }

    /// Logs the whole response and turns it into a `RemoteService` error.
    async fn unexpected_response(
        operation: &'static str,
        template_id: &str,
        response: Response,
    ) -> SyncError {
        let status = response.status();
        let headers = format!("{:?}", response.headers());
        let body = response.text().await.unwrap_or_default();

        error!(
            operation,
            template_id,
            status = %status,
            headers = %headers,
            body = %body,
            "SendGrid returned an unexpected response"
        );

        SyncError::RemoteService {
            operation,
            template_id: template_id.to_string(),
            status,
            body,
        }
    }

    fn transport(operation: &'static str, template_id: &str, source: reqwest::Error) -> SyncError {
        SyncError::Transport {
            operation,
            template_id: template_id.to_string(),
            source,
        }
    }
}

#[async_trait]
impl TemplateRepository for SendGridClient {
    async fn fetch_versions(&self, template_id: &str) -> Result<Vec<TemplateVersion>, SyncError> {
        const OPERATION: &str = "fetch versions";

        debug!(template_id, "Fetching template versions");

        let response = self
            .http_client
            .get(self.template_url(template_id))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| Self::transport(OPERATION, template_id, e))?;

        if !response.status().is_success() {
            return Err(Self::unexpected_response(OPERATION, template_id, response).await);
        }

        let template: Template = response
            .json()
            .await
            .map_err(|e| Self::transport(OPERATION, template_id, e))?;

        debug!(
            template_id,
            versions = template.versions.len(),
            "Template versions fetched"
        );

        Ok(template.versions)
    }

    async fn activate_version(
        &self,
        template_id: &str,
        version_id: &str,
    ) -> Result<TemplateVersion, SyncError> {
        const OPERATION: &str = "activate version";

        let url = format!(
            "{}/versions/{}/activate",
            self.template_url(template_id),
            version_id
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| Self::transport(OPERATION, template_id, e))?;

        if !response.status().is_success() {
            return Err(Self::unexpected_response(OPERATION, template_id, response).await);
        }

        let version: TemplateVersion = response
            .json()
            .await
            .map_err(|e| Self::transport(OPERATION, template_id, e))?;

        info!(template_id, version_id = %version.id, "Template version activated");

        Ok(version)
    }

    async fn create_version(
        &self,
        template_id: &str,
        request: &CreateVersionRequest,
    ) -> Result<(), SyncError> {
        const OPERATION: &str = "create version";

        let url = format!("{}/versions", self.template_url(template_id));

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| Self::transport(OPERATION, template_id, e))?;

        if response.status() != StatusCode::CREATED {
            return Err(Self::unexpected_response(OPERATION, template_id, response).await);
        }

        info!(template_id, name = %request.name, "Template version created");

        Ok(())
    }
}

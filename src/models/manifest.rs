use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One template as authored in the manifest file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub env_template_id: HashMap<String, String>,
    pub name: String,
    pub subject: String,
    pub html: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_data: Option<Value>,
}

impl ManifestEntry {
    pub fn template_id_for(&self, environment: &str) -> Option<&str> {
        self.env_template_id.get(environment).map(String::as_str)
    }
}

/// A manifest entry narrowed to a single environment, with its HTML body loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDescriptor {
    pub template_id: String,
    pub name: String,
    pub subject: String,
    pub html_content: String,
    pub test_data: Option<Value>,
}

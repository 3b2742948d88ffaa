use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub generation: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,

    #[serde(default)]
    pub versions: Vec<TemplateVersion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateVersion {
    pub id: String,
    pub template_id: String,
    pub name: String,
    pub active: u8,

    #[serde(default)]
    pub subject: String,

    #[serde(default)]
    pub html_content: String,

    #[serde(default)]
    pub updated_at: Option<String>,

    #[serde(default)]
    pub generate_plain_content: Option<bool>,

    #[serde(default)]
    pub editor: Option<Editor>,

    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl TemplateVersion {
    pub fn is_active(&self) -> bool {
        self.active == 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Editor {
    Code,
    Design,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateVersionRequest {
    pub name: String,
    pub active: u8,
    pub subject: String,
    pub html_content: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_data: Option<String>,

    pub editor: Editor,
}

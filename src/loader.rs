use std::path::Path;

use tokio::fs;
use tracing::{debug, info};

use crate::{
    error::SyncError,
    models::manifest::{ManifestEntry, TemplateDescriptor},
};

/// Reads the manifest at `manifest` (relative to `root`) and resolves every
/// entry that has a template id for `environment`, in manifest order.
pub async fn load_templates(
    root: &Path,
    manifest: &str,
    environment: &str,
) -> Result<Vec<TemplateDescriptor>, SyncError> {
    if root.as_os_str().is_empty() {
        return Err(SyncError::configuration("Workspace root is not set"));
    }

    if manifest.trim().is_empty() {
        return Err(SyncError::configuration("Manifest path is not set"));
    }

    let manifest_path = root.join(relative(manifest, "Manifest path")?);
    let entries = read_manifest(&manifest_path).await?;
    let manifest_dir = manifest_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());

    info!(
        manifest = %manifest_path.display(),
        entries = entries.len(),
        environment,
        "Manifest loaded"
    );

    let mut descriptors = Vec::new();

    for entry in entries {
        let Some(template_id) = entry.template_id_for(environment).map(str::to_string) else {
            debug!(name = %entry.name, environment, "No template id for environment, skipping");
            continue;
        };

        let html_path = manifest_dir.join(relative(&entry.html, &entry.name)?);
        let html_content = read_html(&html_path).await?;

        descriptors.push(TemplateDescriptor {
            template_id,
            name: entry.name,
            subject: entry.subject,
            html_content,
            test_data: entry.test_data,
        });
    }

    Ok(descriptors)
}

pub async fn read_manifest(path: &Path) -> Result<Vec<ManifestEntry>, SyncError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| SyncError::io(path, e))?;

    serde_json::from_str::<Vec<ManifestEntry>>(&content).map_err(|e| {
        SyncError::configuration(format!("Invalid manifest {}: {}", path.display(), e))
    })
}

/// Paths in the manifest and inputs must stay under their base directory.
fn relative<'a>(value: &'a str, owner: &str) -> Result<&'a Path, SyncError> {
    let path = Path::new(value);

    if path.has_root() || path.is_absolute() {
        return Err(SyncError::configuration(format!(
            "{}: path must be relative, got {}",
            owner, value
        )));
    }

    Ok(path)
}

async fn read_html(path: &Path) -> Result<String, SyncError> {
    fs::read_to_string(path)
        .await
        .map_err(|e| SyncError::io(path, e))
}

use futures_util::future::join_all;
use tracing::{info, warn};

use crate::{
    clients::sendgrid::TemplateRepository,
    error::SyncError,
    models::{
        manifest::TemplateDescriptor,
        outcome::{SyncAction, SyncFailure, SyncOutcome, SyncReport},
        sendgrid::{CreateVersionRequest, Editor, TemplateVersion},
    },
};

/// Versions whose name, subject and HTML are byte-for-byte equal to the
/// descriptor's, in provider order.
pub fn matching_versions<'a>(
    descriptor: &TemplateDescriptor,
    versions: &'a [TemplateVersion],
) -> Vec<&'a TemplateVersion> {
    versions
        .iter()
        .filter(|version| {
            version.name == descriptor.name
                && version.subject == descriptor.subject
                && version.html_content == descriptor.html_content
        })
        .collect()
}

pub fn plan(descriptor: &TemplateDescriptor, versions: &[TemplateVersion]) -> SyncAction {
    let matches = matching_versions(descriptor, versions);

    if let Some(active) = matches.iter().find(|version| version.is_active()) {
        return SyncAction::AlreadyActive {
            version_id: active.id.clone(),
        };
    }

    // First match in provider order wins; there is no secondary ordering.
    match matches.first() {
        Some(version) => SyncAction::Activate {
            version_id: version.id.clone(),
        },
        None => SyncAction::Create,
    }
}

pub fn create_request(descriptor: &TemplateDescriptor) -> Result<CreateVersionRequest, SyncError> {
    let test_data = descriptor
        .test_data
        .as_ref()
        .map(serde_json::to_string_pretty)
        .transpose()
        .map_err(|e| {
            SyncError::configuration(format!(
                "Test data for {} is not serializable: {}",
                descriptor.name, e
            ))
        })?;

    Ok(CreateVersionRequest {
        name: descriptor.name.clone(),
        active: 1,
        subject: descriptor.subject.clone(),
        html_content: descriptor.html_content.clone(),
        test_data,
        editor: Editor::Design,
    })
}

pub async fn reconcile_template<R>(
    repository: &R,
    descriptor: &TemplateDescriptor,
    dry_run: bool,
) -> Result<SyncOutcome, SyncError>
where
    R: TemplateRepository + ?Sized,
{
    let versions = repository.fetch_versions(&descriptor.template_id).await?;
    let action = plan(descriptor, &versions);

    let applied = if dry_run || !action.is_mutation() {
        false
    } else {
        match &action {
            SyncAction::Create => {
                let request = create_request(descriptor)?;
                repository
                    .create_version(&descriptor.template_id, &request)
                    .await?;
            }
            SyncAction::Activate { version_id } => {
                repository
                    .activate_version(&descriptor.template_id, version_id)
                    .await?;
            }
            SyncAction::AlreadyActive { .. } => {}
        }
        true
    };

    info!(
        template_id = %descriptor.template_id,
        name = %descriptor.name,
        action = %action,
        dry_run,
        "Template reconciled"
    );

    Ok(SyncOutcome {
        template_id: descriptor.template_id.clone(),
        name: descriptor.name.clone(),
        action,
        applied,
    })
}

/// Reconciles every descriptor concurrently on the current task and waits
/// for all of them, so no failure goes unreported.
pub async fn sync_templates<R>(
    repository: &R,
    descriptors: &[TemplateDescriptor],
    dry_run: bool,
) -> SyncReport
where
    R: TemplateRepository + ?Sized,
{
    let results = join_all(
        descriptors
            .iter()
            .map(|descriptor| reconcile_template(repository, descriptor, dry_run)),
    )
    .await;

    let mut report = SyncReport::default();

    for (descriptor, result) in descriptors.iter().zip(results) {
        match result {
            Ok(outcome) => report.outcomes.push(outcome),
            Err(error) => {
                warn!(
                    template_id = %descriptor.template_id,
                    name = %descriptor.name,
                    error = %error,
                    "Template reconciliation failed"
                );
                report.failures.push(SyncFailure {
                    template_id: descriptor.template_id.clone(),
                    name: descriptor.name.clone(),
                    error,
                });
            }
        }
    }

    info!(
        total = report.total(),
        created = report.created(),
        activated = report.activated(),
        unchanged = report.unchanged(),
        failed = report.failures.len(),
        dry_run,
        "Template sync finished"
    );

    report
}

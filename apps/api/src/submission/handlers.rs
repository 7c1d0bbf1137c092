use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::submission::Submission;
use crate::state::AppState;
use crate::submission::form::{SubmissionForm, SubmissionPayload};

pub const SUBMIT_OK: &str = "Form submitted successfully!";

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub message: &'static str,
    pub data: Submission,
}

/// POST /submit
///
/// Validates before touching disk, so a rejected request stores nothing.
/// A stored file is left in place if the insert later fails.
pub async fn handle_submit(
    State(state): State<AppState>,
    payload: SubmissionPayload,
) -> Result<Json<SubmitResponse>, AppError> {
    let form = SubmissionForm::validate(&payload.fields)?;

    let resume = match payload.attachment {
        Some(attachment) => {
            let stored = state
                .uploads
                .save(&attachment.field, &attachment.file_name, &attachment.bytes)
                .await?;
            debug!(
                "Saved {} ({} bytes) as {}",
                attachment.file_name,
                attachment.bytes.len(),
                stored.file_name
            );
            stored.public_path
        }
        None => String::new(),
    };

    let record = state.store.insert(form.into_new_submission(resume)).await?;
    info!(
        "Stored submission {} (resume: {})",
        record.id,
        if record.resume.is_empty() { "none" } else { record.resume.as_str() }
    );

    Ok(Json(SubmitResponse {
        message: SUBMIT_OK,
        data: record,
    }))
}

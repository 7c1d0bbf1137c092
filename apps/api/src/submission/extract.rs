use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::submission::form::{Attachment, SubmissionPayload, RESUME_FIELD};

const UNEXPECTED_FIELD: &str = "Unexpected field";

/// Decodes `/submit` bodies by content type.
///
/// Multipart carries the optional attachment; urlencoded and JSON bodies
/// carry fields only. Any other content type decodes to an empty payload,
/// which then fails required-field validation.
#[async_trait]
impl<S> FromRequest<S> for SubmissionPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            read_multipart(multipart).await
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            Ok(SubmissionPayload {
                fields,
                attachment: None,
            })
        } else if content_type.starts_with("application/json") {
            let Json(object) = Json::<Map<String, Value>>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            Ok(SubmissionPayload {
                fields: scalar_fields(object),
                attachment: None,
            })
        } else {
            Ok(SubmissionPayload::default())
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<SubmissionPayload, AppError> {
    let mut payload = SubmissionPayload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to parse multipart data: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match field.file_name().map(str::to_string) {
            // Browsers send an empty filename when no file was chosen.
            Some(file_name) if file_name.is_empty() => continue,
            Some(file_name) => {
                if name != RESUME_FIELD || payload.attachment.is_some() {
                    return Err(AppError::Validation(UNEXPECTED_FIELD.to_string()));
                }
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read uploaded file: {e}"))
                })?;
                payload.attachment = Some(Attachment {
                    field: name,
                    file_name,
                    bytes,
                });
            }
            None => {
                let value = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read field '{name}': {e}"))
                })?;
                payload.fields.insert(name, value);
            }
        }
    }

    Ok(payload)
}

/// Keeps string and number values; everything else counts as absent.
fn scalar_fields(object: Map<String, Value>) -> HashMap<String, String> {
    object
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            Value::Number(n) => Some((key, n.to_string())),
            _ => None,
        })
        .collect()
}

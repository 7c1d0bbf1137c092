use std::collections::HashMap;

use bytes::Bytes;

use crate::errors::AppError;
use crate::models::submission::NewSubmission;

pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";
pub const AGE_NOT_A_NUMBER: &str = "Age must be a number";

/// Multipart field name carrying the optional attachment.
pub const RESUME_FIELD: &str = "resume";

/// Form field names, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "firstName",
    "lastName",
    "email",
    "phoneNumber",
    "age",
    "gender",
];

/// An uploaded file buffered from the request.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub field: String,
    pub file_name: String,
    pub bytes: Bytes,
}

/// Decoded request body: raw text fields plus an optional file.
#[derive(Debug, Default)]
pub struct SubmissionPayload {
    pub fields: HashMap<String, String>,
    pub attachment: Option<Attachment>,
}

/// A form whose six required fields are present and whose age parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionForm {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub gender: String,
    pub phone_number: String,
    pub email: String,
}

impl SubmissionForm {
    /// Presence is checked on the raw value: whitespace counts as present.
    pub fn validate(fields: &HashMap<String, String>) -> Result<Self, AppError> {
        let missing = REQUIRED_FIELDS
            .iter()
            .any(|name| fields.get(*name).map_or(true, String::is_empty));
        if missing {
            return Err(AppError::Validation(ALL_FIELDS_REQUIRED.to_string()));
        }

        let take = |name: &str| fields.get(name).cloned().unwrap_or_default();
        let first_name = take("firstName");
        let last_name = take("lastName");
        let email = take("email");
        let phone_number = take("phoneNumber");
        let gender = take("gender");

        let age = take("age")
            .trim()
            .parse::<i32>()
            .map_err(|_| AppError::Validation(AGE_NOT_A_NUMBER.to_string()))?;

        Ok(SubmissionForm {
            first_name,
            last_name,
            age,
            gender,
            phone_number,
            email,
        })
    }

    pub fn into_new_submission(self, resume: String) -> NewSubmission {
        NewSubmission {
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
            gender: self.gender,
            phone_number: self.phone_number,
            email: self.email,
            resume,
        }
    }
}

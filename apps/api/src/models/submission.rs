use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One persisted form record. Immutable once inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub gender: String,
    pub phone_number: String,
    pub email: String,
    /// Public path of the stored attachment, or empty when none was sent.
    pub resume: String,
    pub created_at: DateTime<Utc>,
}

/// A validated submission that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub gender: String,
    pub phone_number: String,
    pub email: String,
    pub resume: String,
}

#[cfg(test)]
impl NewSubmission {
    /// Materializes the row a store would return for this submission.
    pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> Submission {
        Submission {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
            gender: self.gender,
            phone_number: self.phone_number,
            email: self.email,
            resume: self.resume,
            created_at,
        }
    }
}

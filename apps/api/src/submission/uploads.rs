use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

/// URL prefix under which stored attachments are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Result of persisting one attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    pub file_name: String,
    /// `/uploads/<file_name>`, the value recorded on the submission.
    pub public_path: String,
}

/// Writes attachments into a local directory under generated names.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the upload directory (and parents) if absent.
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Stores `bytes` as `<field>-<millis>-<token><.ext>`.
    ///
    /// The random token keeps names unique when uploads share a millisecond.
    pub async fn save(
        &self,
        field: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> std::io::Result<StoredUpload> {
        let file_name = generate_file_name(field, original_name);
        let target = self.dir.join(&file_name);
        tokio::fs::write(&target, bytes).await?;

        Ok(StoredUpload {
            public_path: format!("{PUBLIC_PREFIX}/{file_name}"),
            file_name,
        })
    }
}

fn generate_file_name(field: &str, original_name: &str) -> String {
    let tag: String = field
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    let tag = if tag.is_empty() { "file".to_string() } else { tag };
    let token = Uuid::new_v4().simple().to_string();

    format!(
        "{tag}-{}-{}{}",
        Utc::now().timestamp_millis(),
        &token[..8],
        extension_of(original_name)
    )
}

/// Extension of the base name including its dot, or empty.
///
/// Follows `path.extname` rules: a lone leading dot is not an extension.
/// Only ASCII alphanumerics survive so the name cannot escape the directory.
fn extension_of(original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);

    match base.rfind('.') {
        Some(0) | None => String::new(),
        Some(idx) => {
            let ext: String = base[idx + 1..]
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect();
            if ext.is_empty() {
                String::new()
            } else {
                format!(".{ext}")
            }
        }
    }
}

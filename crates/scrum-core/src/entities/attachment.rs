use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A file attached to a task, stored as an embedded component row.
///
/// Has no identity of its own: two attachments with the same fields are the
/// same attachment. Ordered by file name so sets iterate predictably.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

impl Attachment {
    #[must_use]
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            size_bytes,
        }
    }
}

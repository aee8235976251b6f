use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{NoteError, Result};

/// What the user sees when a clipboard write is rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipboardFailurePolicy {
    /// Log only.
    #[default]
    Silent,
    /// Log and flash a failure label on the control.
    Surface,
}

/// Page tunables. Every field has a default so partial JSON is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub feedback_ms: u32,
    pub banner_ms: u32,
    pub max_share_len: usize,
    pub image_size: u32,
    pub file_prefix: String,
    pub file_extension: String,
    pub clipboard_failure: ClipboardFailurePolicy,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            feedback_ms: 2000,
            banner_ms: 5000,
            max_share_len: 2000,
            image_size: 256,
            file_prefix: "note".to_string(),
            file_extension: "txt".to_string(),
            clipboard_failure: ClipboardFailurePolicy::Silent,
        }
    }
}

impl PageConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| NoteError::Config(e.to_string()))
    }

    pub fn feedback_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.feedback_ms))
    }

    pub fn banner_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.banner_ms))
    }
}

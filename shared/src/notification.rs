use serde::{Deserialize, Serialize};

use crate::api::ApiResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// A transient message shown to the user after an action settles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }

    /// One notification for a settled mutation: `success` on Ok, the error
    /// prefixed with `failure` otherwise.
    pub fn for_result<T>(result: &ApiResult<T>, success: &str, failure: &str) -> Self {
        match result {
            Ok(_) => Self::success(success),
            Err(e) => Self::error(format!("{}: {}", failure, e)),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

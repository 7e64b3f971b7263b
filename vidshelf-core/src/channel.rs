//! Caller-facing boundary for the application's cross-platform layer.
//!
//! The application sends named method calls with a JSON argument bundle and
//! expects one of three answers: a success string, a structured error with a
//! short code, or "not implemented". Everything below the boundary is typed;
//! this module is where untyped input is checked and where every internal
//! failure is flattened into a single error code.

use crate::clock::Clock;
use crate::registry::MediaRegistry;
use crate::saver::{GallerySaver, SaveRequest};

use log::{error, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Channel name the application registers the gallery handler under.
pub const GALLERY_CHANNEL: &str = "com.example.camera_app/gallery";

/// The only method this handler implements.
pub const SAVE_VIDEO_METHOD: &str = "saveVideoToGallery";

/// Error code for an argument bundle with absent or mistyped fields.
pub const INVALID_ARGUMENTS: &str = "INVALID_ARGUMENTS";

/// Error code for any failure raised while saving.
pub const SAVE_ERROR: &str = "SAVE_ERROR";

/// An incoming call from the cross-platform layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// The answer sent back across the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodResponse {
    Success {
        value: String,
    },
    Error {
        code: String,
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<Value>,
    },
    NotImplemented,
}

impl MethodResponse {
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The error code, if this is an error response.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Error { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Dispatches method calls to a [`GallerySaver`].
#[derive(Debug, Clone)]
pub struct GalleryChannel<R, C> {
    saver: GallerySaver<R, C>,
}

impl<R: MediaRegistry, C: Clock> GalleryChannel<R, C> {
    pub fn new(saver: GallerySaver<R, C>) -> Self {
        Self { saver }
    }

    pub fn saver(&self) -> &GallerySaver<R, C> {
        &self.saver
    }

    /// Handles one call to completion on the current thread.
    pub fn handle(&self, call: &MethodCall) -> MethodResponse {
        match call.method.as_str() {
            SAVE_VIDEO_METHOD => self.save_video(&call.arguments),
            other => {
                warn!("Unsupported method '{}' on {}", other, GALLERY_CHANNEL);
                MethodResponse::NotImplemented
            }
        }
    }

    fn save_video(&self, arguments: &Value) -> MethodResponse {
        let request = match SaveRequest::from_arguments(arguments) {
            Ok(request) => request,
            Err(e) => return MethodResponse::error(INVALID_ARGUMENTS, e.to_string()),
        };

        match self.saver.save_video_to_gallery(&request) {
            Ok(saved) => MethodResponse::Success {
                value: format!("Video saved successfully: {}", saved.handle),
            },
            Err(e) => {
                error!("Failed to save {}: {}", request.source_path.display(), e);
                MethodResponse::error(SAVE_ERROR, format!("Failed to save video: {e}"))
            }
        }
    }
}

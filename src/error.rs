//! Structured error types for grid-overlay.

/// All errors that can occur while composing, hit-testing or replaying overlays.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    /// An overlay renderer reported a fault while painting one region.
    #[error("Renderer for '{region_type}' failed on region '{region_id}': {message}")]
    Renderer {
        region_type: String,
        region_id: String,
        message: String,
    },

    /// Invalid configuration JSON.
    #[error("Config: {0}")]
    Config(#[from] serde_json::Error),

    /// Malformed replay scene (CLI / headless host).
    #[error("Scene: {0}")]
    Scene(String),

    /// Canvas 2D context failure.
    #[error("Canvas error: {0}")]
    Canvas(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors raised by feature code.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OverlayError>;

impl From<String> for OverlayError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for OverlayError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<OverlayError> for wasm_bindgen::JsValue {
    fn from(e: OverlayError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

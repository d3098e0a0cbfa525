//! Connection settings loaded from environment variables.

/// Connection settings for [`RagClient`](crate::RagClient).
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the backend API, e.g. `http://127.0.0.1:8000/api`.
    pub base_url: String,
    /// Optional whole-request timeout in seconds. `None` keeps the transport
    /// defaults so a long-running vectorize call is not cut off mid-index.
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Build from environment variables with sensible defaults.
    ///
    /// - `PDF_RAG_API_URL`      (default `http://127.0.0.1:8000/api`)
    /// - `PDF_RAG_TIMEOUT_SECS` (default: unset, no request timeout)
    pub fn from_env() -> Self {
        Self {
            base_url: env("PDF_RAG_API_URL", "http://127.0.0.1:8000/api"),
            timeout_secs: std::env::var("PDF_RAG_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".into(),
            timeout_secs: None,
        }
    }
}

fn env(k: &str, dflt: &str) -> String {
    std::env::var(k).unwrap_or_else(|_| dflt.to_string())
}

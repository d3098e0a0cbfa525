//! Thin reqwest wrapper over the backend contract.

use std::time::Duration;

use reqwest::multipart;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::errors::{ClientError, Result};
use crate::types::{Answer, PdfFile};

const STATUS_SUCCESS: &str = "success";

/// Typed client for the PDF RAG backend.
///
/// Reuses one HTTP connection pool for all calls. The base URL is validated
/// at construction; individual operations map every failure shape (transport,
/// non-2xx status, error envelope, malformed payload) into [`ClientError`].
pub struct RagClient {
    http: reqwest::Client,
    base: String,
}

impl RagClient {
    /// Creates a new client from the given config.
    ///
    /// # Errors
    /// - [`ClientError::InvalidEndpoint`] if `cfg.base_url` is empty or not http(s)
    /// - [`ClientError::Transport`] if the HTTP client cannot be built
    pub fn new(cfg: ClientConfig) -> Result<Self> {
        let endpoint = cfg.base_url.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ClientError::InvalidEndpoint(cfg.base_url));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    /// Lists all uploaded PDFs together with their vectorization state.
    ///
    /// # Errors
    /// [`ClientError::Backend`] when the envelope reports an error, with the
    /// backend message when present.
    #[instrument(skip(self))]
    pub async fn list_files(&self) -> Result<Vec<PdfFile>> {
        let url = self.url("get-pdf-files");
        debug!("GET {url}");
        let resp = ok_status(self.http.get(&url).send().await?).await?;
        let out: FilesEnvelope = decode(resp).await?;

        if out.status != STATUS_SUCCESS {
            return Err(backend_error(out.message, "failed to fetch the PDF file list"));
        }
        Ok(out.files)
    }

    /// Uploads a PDF as a multipart form under the `file` field.
    ///
    /// The content type is negotiated by the multipart encoder; it must not
    /// be forced to JSON or the backend rejects the body.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_pdf(&self, filename: &str, bytes: Vec<u8>) -> Result<()> {
        let url = self.url("upload-pdf");
        let part = multipart::Part::bytes(bytes)
            .file_name(filename.to_owned())
            .mime_str("application/pdf")?;
        let form = multipart::Form::new().part("file", part);

        debug!("POST {url}");
        let resp = ok_status(self.http.post(&url).multipart(form).send().await?).await?;
        let out: StatusEnvelope = decode(resp).await?;

        if out.status != STATUS_SUCCESS {
            return Err(backend_error(out.message, "PDF upload failed"));
        }
        Ok(())
    }

    /// Triggers index construction for one document.
    ///
    /// The backend holds the request open until indexing finishes or fails,
    /// so callers typically poll [`Self::vectorize_progress`] concurrently.
    #[instrument(skip(self))]
    pub async fn vectorize_pdf(&self, filename: &str) -> Result<()> {
        let url = self.url("vectorize-pdf");
        debug!("POST {url}");
        let resp = ok_status(
            self.http
                .post(&url)
                .json(&VectorizeRequest { filename })
                .send()
                .await?,
        )
        .await?;
        let out: StatusEnvelope = decode(resp).await?;

        if out.status != STATUS_SUCCESS {
            return Err(backend_error(out.message, "PDF vectorization failed"));
        }
        Ok(())
    }

    /// Reads current indexing progress for one document, as a percentage.
    ///
    /// Best-effort: an error envelope yields `Ok(0)` rather than an error.
    /// Transport failures still propagate so the caller decides whether to
    /// swallow them.
    pub async fn vectorize_progress(&self, filename: &str) -> Result<u8> {
        let url = self.url(&format!(
            "vectorize-progress/{}",
            urlencoding::encode(filename)
        ));
        let resp = ok_status(self.http.get(&url).send().await?).await?;
        let out: ProgressEnvelope = decode(resp).await?;

        if out.status != STATUS_SUCCESS {
            return Ok(0);
        }
        Ok(out.progress.min(100))
    }

    /// Deletes one uploaded PDF and its index.
    #[instrument(skip(self))]
    pub async fn delete_file(&self, filename: &str) -> Result<()> {
        let url = self.url(&format!("delete-file/{}", urlencoding::encode(filename)));
        debug!("DELETE {url}");
        let resp = ok_status(self.http.delete(&url).send().await?).await?;
        let out: StatusEnvelope = decode(resp).await?;

        if out.status != STATUS_SUCCESS {
            return Err(backend_error(out.message, "failed to delete the file"));
        }
        Ok(())
    }

    /// Asks a question against the corpus (`filename = None`) or one
    /// vectorized document (`filename = Some(..)`).
    ///
    /// # Errors
    /// - [`ClientError::Backend`] when the backend reports a failure message
    /// - [`ClientError::Decode`] when the response lacks an answer payload
    #[instrument(skip(self, question), fields(single = filename.is_some()))]
    pub async fn ask(&self, question: &str, filename: Option<&str>) -> Result<Answer> {
        let url = self.url("ask-question");
        debug!("POST {url}");
        let resp = ok_status(
            self.http
                .post(&url)
                .json(&AskRequest { question, filename })
                .send()
                .await?,
        )
        .await?;
        let out: AskEnvelope = decode(resp).await?;

        if let Some(answer) = out.answer {
            return Ok(answer);
        }
        if let Some(message) = out.message {
            return Err(ClientError::Backend(message));
        }
        Err(ClientError::Decode(
            "response is missing the answer payload".into(),
        ))
    }
}

/// Maps non-2xx responses to [`ClientError::HttpStatus`] with a body snippet.
async fn ok_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let url = resp.url().to_string();
    let text = resp.text().await.unwrap_or_default();
    let snippet = text.chars().take(240).collect::<String>();
    Err(ClientError::HttpStatus {
        status,
        url,
        snippet,
    })
}

async fn decode<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    resp.json()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

fn backend_error(message: Option<String>, fallback: &str) -> ClientError {
    ClientError::Backend(message.unwrap_or_else(|| fallback.to_string()))
}

/* ==========================
HTTP payloads
========================== */

#[derive(Debug, Serialize)]
struct VectorizeRequest<'a> {
    filename: &'a str,
}

#[derive(Debug, Serialize)]
struct AskRequest<'a> {
    question: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    filename: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FilesEnvelope {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    files: Vec<PdfFile>,
}

#[derive(Debug, Deserialize)]
struct ProgressEnvelope {
    status: String,
    #[serde(default)]
    progress: u8,
}

#[derive(Debug, Deserialize)]
struct AskEnvelope {
    #[serde(default)]
    answer: Option<Answer>,
    #[serde(default)]
    message: Option<String>,
}

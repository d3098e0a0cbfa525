//! Typed HTTP client for the PDF RAG backend.
//!
//! The backend owns PDF storage, vector indexing and LLM question answering;
//! this crate only speaks its HTTP contract:
//! - `GET  {base}/get-pdf-files`                 — list uploaded PDFs
//! - `POST {base}/upload-pdf`                    — multipart upload
//! - `POST {base}/vectorize-pdf`                 — build the vector index
//! - `GET  {base}/vectorize-progress/{filename}` — indexing progress
//! - `DELETE {base}/delete-file/{filename}`      — remove a PDF
//! - `POST {base}/ask-question`                  — RAG question answering
//!
//! Every response carries a `status: "success" | "error"` envelope with an
//! optional `message`; anything other than success is normalized into
//! [`ClientError`].

mod client;
mod config;
mod errors;
mod types;

pub use client::RagClient;
pub use config::ClientConfig;
pub use errors::{ClientError, Result};
pub use types::{Answer, AnswerTiming, PdfFile};

//! Client-side workflow state for the PDF RAG chat.
//!
//! [`SessionController`] owns all mutable state of one chat session (the
//! transcript, the cached file list, the retrieval scope and the in-flight
//! flags) and exposes the workflow operations (fetch files, upload,
//! vectorize with progress polling, delete, ask). Presentation layers stay
//! stateless: they render [`SessionState`] and forward user intents back into
//! the controller, receiving user-facing feedback through the [`Notices`]
//! seam so the controller can be exercised without a terminal.

mod controller;
mod notices;
mod state;

pub use controller::{SessionController, SessionOptions};
pub use notices::{NoopNotices, Notices};
pub use state::{Message, MessageContent, RetrievalMode, Role, SessionState};

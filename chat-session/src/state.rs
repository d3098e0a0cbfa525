//! Session state container and transcript types.

use rag_client::{Answer, PdfFile};
use uuid::Uuid;

/// Scope selector for question answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetrievalMode {
    /// Search the whole corpus.
    #[default]
    Global,
    /// Search one designated, vectorized document.
    Single,
}

/// Who produced a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// Payload of a transcript turn: plain text for users, a structured
/// [`Answer`] for the assistant.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text(String),
    Answer(Answer),
}

/// One turn of the conversation transcript. Never mutated after append.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Opaque unique token.
    pub id: String,
    pub role: Role,
    pub content: MessageContent,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn assistant(answer: Answer) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: MessageContent::Answer(answer),
        }
    }
}

/// All client-side state of one chat session.
///
/// Mutated only through [`SessionController`](crate::SessionController)
/// operations; presentation layers read it to render. Nothing here is
/// persisted; dropping the state resets the session.
#[derive(Debug, Default)]
pub struct SessionState {
    /// Current input buffer.
    pub question: String,
    /// Append-only conversation transcript.
    pub messages: Vec<Message>,
    /// A question is in flight.
    pub loading: bool,
    /// Cached file list; replaced wholesale by a successful fetch.
    pub files: Vec<PdfFile>,
    /// Filename of the selected document, empty when none.
    pub selected_file: String,
    /// The file list is being refreshed.
    pub loading_files: bool,
    /// A vectorization is running.
    pub vectorizing: bool,
    /// Last observed vectorization progress, `0..=100`.
    pub progress: u8,
    pub retrieval_mode: RetrievalMode,
}

impl SessionState {
    /// Switches the retrieval scope. Global scope cannot carry a selection,
    /// so switching to it clears `selected_file` unconditionally.
    pub fn set_retrieval_mode(&mut self, mode: RetrievalMode) {
        self.retrieval_mode = mode;
        if mode == RetrievalMode::Global {
            self.selected_file.clear();
        }
    }

    /// Looks up the currently selected file in the cached list.
    pub fn selected(&self) -> Option<&PdfFile> {
        if self.selected_file.is_empty() {
            return None;
        }
        self.files.iter().find(|f| f.filename == self.selected_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, vectorized: bool) -> PdfFile {
        PdfFile {
            filename: name.into(),
            size: 0,
            mtime: 0.0,
            vectorized,
        }
    }

    #[test]
    fn switching_to_global_clears_selection() {
        let mut state = SessionState::default();
        state.set_retrieval_mode(RetrievalMode::Single);
        state.selected_file = "a.pdf".into();

        state.set_retrieval_mode(RetrievalMode::Global);
        assert_eq!(state.selected_file, "");

        // Switching to single leaves any selection alone.
        state.selected_file = "b.pdf".into();
        state.set_retrieval_mode(RetrievalMode::Single);
        assert_eq!(state.selected_file, "b.pdf");
    }

    #[test]
    fn selected_requires_presence_in_file_list() {
        let mut state = SessionState {
            files: vec![file("a.pdf", true)],
            ..Default::default()
        };
        assert!(state.selected().is_none());

        state.selected_file = "missing.pdf".into();
        assert!(state.selected().is_none());

        state.selected_file = "a.pdf".into();
        assert_eq!(state.selected().unwrap().filename, "a.pdf");
    }

    #[test]
    fn message_ids_are_unique() {
        let a = Message::user("hi");
        let b = Message::user("hi");
        assert_ne!(a.id, b.id);
    }
}

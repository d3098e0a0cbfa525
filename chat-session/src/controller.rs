//! Workflow operations over [`SessionState`].

use std::sync::Arc;
use std::time::Duration;

use rag_client::{Answer, RagClient};
use tokio::time::MissedTickBehavior;
use tracing::{debug, instrument};

use crate::notices::Notices;
use crate::state::{Message, RetrievalMode, SessionState};

/// Tunables for one session.
#[derive(Clone, Debug)]
pub struct SessionOptions {
    /// Period of the vectorization progress poll.
    pub poll_interval: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
        }
    }
}

/// Owns the session state and runs the workflow operations against the
/// backend.
///
/// All operations take `&mut self`, so state is only ever mutated from one
/// logical task; the progress poll during vectorization runs inside the
/// operation itself and cannot outlive it. Every failure is terminal for its
/// invocation and surfaced through [`Notices`]; there are no retries, and
/// nothing here aborts the session.
pub struct SessionController {
    state: SessionState,
    client: RagClient,
    notices: Arc<dyn Notices>,
    opts: SessionOptions,
}

impl SessionController {
    pub fn new(client: RagClient, notices: Arc<dyn Notices>) -> Self {
        Self::with_options(client, notices, SessionOptions::default())
    }

    pub fn with_options(
        client: RagClient,
        notices: Arc<dyn Notices>,
        opts: SessionOptions,
    ) -> Self {
        Self {
            state: SessionState::default(),
            client,
            notices,
            opts,
        }
    }

    /// Read access for presentation layers.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Replaces the input buffer.
    pub fn set_question(&mut self, text: impl Into<String>) {
        self.state.question = text.into();
    }

    /// Marks a file as the target for single-document retrieval and
    /// vectorization.
    pub fn select_file(&mut self, filename: impl Into<String>) {
        self.state.selected_file = filename.into();
    }

    /// Switches the retrieval scope; global scope drops any selection.
    pub fn set_retrieval_mode(&mut self, mode: RetrievalMode) {
        self.state.set_retrieval_mode(mode);
    }

    /// Refreshes the cached file list from the backend.
    ///
    /// A failed fetch surfaces an error notice and leaves the previous list
    /// untouched; `loading_files` is cleared on every exit path.
    #[instrument(skip(self))]
    pub async fn fetch_files(&mut self) {
        self.state.loading_files = true;
        let outcome = self.client.list_files().await;
        self.state.loading_files = false;

        match outcome {
            Ok(files) => self.state.files = files,
            Err(e) => self.notices.error(&e.to_string()),
        }
    }

    /// Uploads a PDF and refreshes the file list so the new entry shows up.
    #[instrument(skip(self, bytes))]
    pub async fn upload(&mut self, filename: &str, bytes: Vec<u8>) {
        match self.client.upload_pdf(filename, bytes).await {
            Ok(()) => {
                self.notices.success("PDF uploaded");
                self.fetch_files().await;
            }
            Err(e) => self.notices.error(&e.to_string()),
        }
    }

    /// Vectorizes the selected file while polling its progress.
    ///
    /// The primary vectorize call and a periodic progress poll run
    /// concurrently in one `select!` loop; each successful poll updates
    /// `progress`, each failed poll is logged and swallowed. When the primary
    /// call settles the loop breaks and the poll stops, exactly once, even
    /// when the follow-up list refresh fails.
    ///
    /// A second invocation while one is running is rejected with a warning
    /// rather than spawning an overlapping poll.
    #[instrument(skip(self), fields(filename = %self.state.selected_file))]
    pub async fn vectorize_selected(&mut self) {
        if self.state.selected_file.is_empty() {
            self.notices.warning("select a PDF file to vectorize first");
            return;
        }
        if self.state.vectorizing {
            self.notices.warning("a vectorization is already in progress");
            return;
        }

        let filename = self.state.selected_file.clone();
        self.state.vectorizing = true;
        self.state.progress = 0;
        self.notices.progress(0);

        // Ticker and primary call live in this block, so both stop as soon
        // as the primary call settles, on every outcome.
        let outcome = {
            let mut ticker = tokio::time::interval(self.opts.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of an interval resolves immediately; consume it
            // so polling starts one period after the request goes out.
            ticker.tick().await;

            let vectorize = self.client.vectorize_pdf(&filename);
            tokio::pin!(vectorize);

            loop {
                tokio::select! {
                    res = &mut vectorize => break res,
                    _ = ticker.tick() => {
                        match self.client.vectorize_progress(&filename).await {
                            Ok(p) => {
                                self.state.progress = p;
                                self.notices.progress(p);
                            }
                            // Best-effort poll: never aborts the vectorization.
                            Err(e) => debug!("progress poll failed: {e}"),
                        }
                    }
                }
            }
        };

        match outcome {
            Ok(()) => {
                self.notices.success("PDF vectorized successfully");
                self.state.progress = 100;
                self.notices.progress(100);
                // Refresh so the `vectorized` flag flips in the cached list.
                self.fetch_files().await;
            }
            // Progress stays at the last polled value.
            Err(e) => self.notices.error(&e.to_string()),
        }

        self.state.vectorizing = false;
    }

    /// Deletes a file; a deleted selection is cleared and the list refreshed.
    /// On failure both selection and list are left unchanged.
    #[instrument(skip(self))]
    pub async fn delete_file(&mut self, filename: &str) {
        match self.client.delete_file(filename).await {
            Ok(()) => {
                self.notices.success("file deleted");
                if self.state.selected_file == filename {
                    self.state.selected_file.clear();
                }
                self.fetch_files().await;
            }
            Err(e) => self.notices.error(&e.to_string()),
        }
    }

    /// Submits the current input buffer as a question.
    ///
    /// Blocked with a warning (and no other state change) when the question
    /// is blank, or in single mode when no selected, listed, vectorized file
    /// backs the query. Otherwise the user turn is appended optimistically
    /// and the input cleared before the request resolves; the assistant turn
    /// is appended on both success and failure, so the transcript always
    /// shows a response for every question.
    #[instrument(skip(self))]
    pub async fn ask_question(&mut self) {
        if self.state.question.trim().is_empty() {
            self.notices.warning("enter a question first");
            return;
        }

        let filename = match self.state.retrieval_mode {
            RetrievalMode::Global => None,
            RetrievalMode::Single => {
                if self.state.selected_file.is_empty() {
                    self.notices.warning("select a file to search first");
                    return;
                }
                match self.state.selected() {
                    Some(file) if file.vectorized => Some(file.filename.clone()),
                    _ => {
                        self.notices
                            .warning("select a file that has already been vectorized");
                        return;
                    }
                }
            }
        };

        let question = std::mem::take(&mut self.state.question);
        self.state.messages.push(Message::user(question.clone()));
        self.state.loading = true;

        let outcome = self.client.ask(&question, filename.as_deref()).await;
        self.state.loading = false;

        match outcome {
            Ok(answer) => {
                self.state.messages.push(Message::assistant(answer));
                self.notices.success("answer received");
            }
            Err(e) => {
                // Keep the transcript whole: the failure becomes the reply.
                let answer = Answer {
                    final_answer: format!("Request failed: {e}"),
                    ..Answer::default()
                };
                self.state.messages.push(Message::assistant(answer));
                self.notices.error(&format!("failed to process the question: {e}"));
            }
        }
    }
}

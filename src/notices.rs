//! Terminal notice sink: colored one-liners plus a vectorization bar.

use std::sync::Mutex;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use chat_session::Notices;

/// Renders notices to the terminal. Progress updates drive an indicatif bar
/// that is torn down when the operation settles.
#[derive(Default)]
pub struct TermNotices {
    bar: Mutex<Option<ProgressBar>>,
}

impl TermNotices {
    /// Clears any leftover progress bar, e.g. after a failed vectorization.
    pub fn finish_progress(&self) {
        if let Some(bar) = self.bar.lock().unwrap().take() {
            bar.finish_and_clear();
        }
    }
}

impl Notices for TermNotices {
    fn success(&self, msg: &str) {
        self.finish_progress();
        println!("{}", msg.green());
    }

    fn warning(&self, msg: &str) {
        println!("{}", msg.yellow());
    }

    fn error(&self, msg: &str) {
        self.finish_progress();
        println!("{}", msg.red());
    }

    fn progress(&self, percent: u8) {
        let mut guard = self.bar.lock().unwrap();
        if percent >= 100 {
            if let Some(bar) = guard.take() {
                bar.finish_and_clear();
            }
            return;
        }
        let bar = guard.get_or_insert_with(|| {
            let bar = ProgressBar::new(100);
            bar.set_style(
                ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>3}% {msg}").unwrap(),
            );
            bar.set_message("vectorizing");
            bar
        });
        bar.set_position(u64::from(percent));
    }
}

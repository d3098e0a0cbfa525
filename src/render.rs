//! Read-only rendering of session state to the terminal.

use chrono::DateTime;
use colored::Colorize;

use chat_session::{MessageContent, Role, SessionState};
use rag_client::{Answer, PdfFile};

pub fn file_table(files: &[PdfFile], selected: &str) {
    if files.is_empty() {
        println!("no PDFs uploaded yet");
        return;
    }
    for file in files {
        let marker = if file.filename == selected { "*" } else { " " };
        let indexed = if file.vectorized {
            "vectorized".green()
        } else {
            "not vectorized".dimmed()
        };
        println!(
            "{marker} {:<40} {:>9}  {}  {indexed}",
            file.filename,
            human_size(file.size),
            mtime(file.mtime),
        );
    }
}

pub fn answer(answer: &Answer) {
    if !answer.reasoning_summary.is_empty() {
        println!("{}", "summary".bold());
        println!("{}\n", answer.reasoning_summary);
    }
    if !answer.step_by_step_reasoning.is_empty() {
        println!("{}", "reasoning".bold());
        println!("{}\n", answer.step_by_step_reasoning);
    }
    println!("{}", "answer".bold());
    println!("{}", answer.final_answer);
    if !answer.related_pages.is_empty() {
        let pages = answer
            .related_pages
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!("{} {pages}", "pages:".dimmed());
    }
    if let Some(timing) = &answer.timing {
        let mut parts = Vec::new();
        if let Some(s) = timing.index_build {
            parts.push(format!("index {s:.2}s"));
        }
        if let Some(s) = timing.retrieval {
            parts.push(format!("retrieval {s:.2}s"));
        }
        if let Some(s) = timing.llm_generation {
            parts.push(format!("llm {s:.2}s"));
        }
        if let Some(s) = timing.total {
            parts.push(format!("total {s:.2}s"));
        }
        if !parts.is_empty() {
            println!("{} {}", "timing:".dimmed(), parts.join(" | "));
        }
    }
}

pub fn transcript(state: &SessionState) {
    if state.messages.is_empty() {
        println!("no questions asked yet");
        return;
    }
    for message in &state.messages {
        match (&message.role, &message.content) {
            (Role::User, MessageContent::Text(text)) => {
                println!("{} {text}", "you:".cyan().bold());
            }
            (Role::Assistant, MessageContent::Answer(ans)) => {
                println!("{}", "assistant:".magenta().bold());
                answer(ans);
            }
            // A user turn always carries text and an assistant turn an
            // answer; anything else would be a bug in the controller.
            _ => {}
        }
        println!();
    }
}

fn human_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;
    let b = bytes as f64;
    if b >= MIB {
        format!("{:.1} MiB", b / MIB)
    } else if b >= KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{bytes} B")
    }
}

fn mtime(ts: f64) -> String {
    DateTime::from_timestamp(ts as i64, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".into())
}

//! Line-oriented command loop: parses user intents, forwards them to the
//! controller and re-renders the relevant slice of state afterwards.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use chat_session::{MessageContent, RetrievalMode, Role, SessionController};

use crate::notices::TermNotices;
use crate::render;

pub async fn run(
    mut ctl: SessionController,
    notices: Arc<TermNotices>,
) -> std::io::Result<()> {
    ctl.fetch_files().await;

    println!(
        "{}",
        "pdf-chat — ask questions about your PDFs (type `help`)".bold()
    );
    render::file_table(&ctl.state().files, &ctl.state().selected_file);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (cmd, rest) = line
            .split_once(' ')
            .map(|(c, r)| (c, r.trim()))
            .unwrap_or((line, ""));

        match cmd {
            "quit" | "exit" => break,
            "help" => help(),
            "files" => {
                ctl.fetch_files().await;
                render::file_table(&ctl.state().files, &ctl.state().selected_file);
            }
            "mode" => match rest {
                "global" => {
                    ctl.set_retrieval_mode(RetrievalMode::Global);
                    println!("retrieval mode: global corpus");
                }
                "single" => {
                    ctl.set_retrieval_mode(RetrievalMode::Single);
                    println!("retrieval mode: single file");
                }
                _ => println!("usage: mode global|single"),
            },
            "use" => {
                if rest.is_empty() {
                    println!("usage: use <filename>");
                } else {
                    ctl.select_file(rest);
                    println!("selected {rest}");
                }
            }
            "upload" => upload(&mut ctl, rest).await,
            "vectorize" => {
                ctl.vectorize_selected().await;
                notices.finish_progress();
            }
            "delete" => {
                if rest.is_empty() {
                    println!("usage: delete <filename>");
                } else {
                    ctl.delete_file(rest).await;
                }
            }
            "history" => render::transcript(ctl.state()),
            "ask" => ask(&mut ctl, rest).await,
            // Bare text is the common case: treat it as a question.
            _ => ask(&mut ctl, line).await,
        }
    }

    Ok(())
}

async fn ask(ctl: &mut SessionController, text: &str) {
    ctl.set_question(text);
    ctl.ask_question().await;

    if let Some(message) = ctl.state().messages.last() {
        if message.role == Role::Assistant {
            if let MessageContent::Answer(answer) = &message.content {
                render::answer(answer);
            }
        }
    }
}

async fn upload(ctl: &mut SessionController, path_str: &str) {
    if path_str.is_empty() {
        println!("usage: upload <path-to-pdf>");
        return;
    }
    let path = Path::new(path_str);
    let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
        println!("{}", format!("not a file path: {path_str}").red());
        return;
    };

    match tokio::fs::read(path).await {
        Ok(bytes) => ctl.upload(filename, bytes).await,
        Err(e) => println!("{}", format!("cannot read {path_str}: {e}").red()),
    }
}

fn help() {
    println!("commands:");
    println!("  files                list uploaded PDFs (* marks the selection)");
    println!("  upload <path>        upload a PDF");
    println!("  use <filename>       select a file for vectorize / single mode");
    println!("  vectorize            build the vector index for the selection");
    println!("  mode global|single   set the retrieval scope");
    println!("  delete <filename>    remove a PDF and its index");
    println!("  ask <question>       ask a question (bare text also works)");
    println!("  history              show the whole transcript");
    println!("  quit                 exit");
}

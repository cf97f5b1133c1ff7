use std::sync::Arc;

use nb_board::{ArticleBoard, EventLoop, UiEvent};
use nb_core::messages::TOPIC_PROMPT;
use nb_core::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::warn;

pub const HELP: &str = "\
Skriv för att söka. Kommandon:
  :theme              växla mörkt/ljust tema
  :generate [ämne]    generera nya nyheter
  :reload             ladda om nyheterna
  :help               visa denna hjälp
  :quit               avsluta";

#[derive(Debug, PartialEq)]
pub enum Command {
    Event(UiEvent),
    Help,
    Unknown(String),
}

/// One input line to a board event. Anything not starting with `:` is a search.
pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return Command::Event(UiEvent::SearchInput(line.to_string()));
    };
    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };
    match name {
        "theme" | "t" => Command::Event(UiEvent::ThemeSwitch),
        "generate" | "g" => Command::Event(UiEvent::GenerateClick(
            Some(rest.to_string()).filter(|topic| !topic.is_empty()),
        )),
        "reload" | "r" => Command::Event(UiEvent::Reload),
        "quit" | "q" => Command::Event(UiEvent::Close),
        "help" | "h" | "?" => Command::Help,
        other => Command::Unknown(other.to_string()),
    }
}

/// Feed stdin lines into the board's event loop until `:quit` or EOF.
pub async fn browse(board: Arc<ArticleBoard>) -> Result<()> {
    let (tx, rx) = mpsc::channel(32);
    let events = tokio::spawn(EventLoop::new(board).run(rx));

    println!("{}", HELP);
    println!("({})", TOPIC_PROMPT);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Command::Event(event) => {
                let closing = event == UiEvent::Close;
                if tx.send(event).await.is_err() || closing {
                    break;
                }
            }
            Command::Help => println!("{}", HELP),
            Command::Unknown(name) => warn!("⚠️ Unknown command :{} (try :help)", name),
        }
    }

    // Dropping the sender ends the loop once queued events are handled.
    drop(tx);
    if let Err(e) = events.await {
        warn!("⚠️ Event loop ended abnormally: {}", e);
    }
    Ok(())
}

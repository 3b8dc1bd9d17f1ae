//! Interactive chat session.
//!
//! Each stdin line is either a chat message or a slash command. Replies are
//! printed as they arrive from the panel's event stream, so a slow request
//! never blocks the next line.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use sidekick_activity::ActivityRelay;
use sidekick_panel::{PanelController, PanelEvent};

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Input {
    Empty,
    Message(String),
    /// `/activity <url>`: the user switched tabs.
    Activity(String),
    History,
    Clear,
    Quit,
    Unknown(String),
}

impl Input {
    pub(crate) fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Input::Empty;
        }
        let Some(command) = line.strip_prefix('/') else {
            return Input::Message(line.to_string());
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };
        match (name, arg) {
            ("activity", url) if !url.is_empty() => Input::Activity(url.to_string()),
            ("history", "") => Input::History,
            ("clear", "") => Input::Clear,
            ("quit" | "exit", "") => Input::Quit,
            _ => Input::Unknown(line.to_string()),
        }
    }
}

const HELP: &str = "commands: /activity <url>, /history, /clear, /quit";

pub(crate) async fn run(panel: Arc<PanelController>, relay: ActivityRelay) -> anyhow::Result<()> {
    let printer = tokio::spawn(print_replies(panel.subscribe()));
    println!("sidekick ready. {}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Input::parse(&line) {
            Input::Empty => {}
            Input::Message(text) => {
                let panel = Arc::clone(&panel);
                tokio::spawn(async move {
                    panel.send_user_message(&text).await;
                });
            }
            Input::Activity(url) => relay.notify(url)?,
            Input::History => {
                for message in panel.history() {
                    println!("[{}] {}", message.role, message.content);
                }
            }
            Input::Clear => panel.clear(),
            Input::Quit => break,
            Input::Unknown(line) => eprintln!("unknown command: {} ({})", line, HELP),
        }
    }

    relay.shutdown().await?;
    printer.abort();
    Ok(())
}

async fn print_replies(mut events: tokio::sync::broadcast::Receiver<PanelEvent>) {
    loop {
        match events.recv().await {
            Ok(PanelEvent::Message(message)) if !message.is_user() => {
                println!("sidekick> {}", message.content);
            }
            Ok(PanelEvent::Message(_)) => {}
            Ok(PanelEvent::Cleared) => println!("(conversation cleared)"),
            Err(RecvError::Lagged(skipped)) => warn!("Reply printer lagged, skipped {} events", skipped),
            Err(RecvError::Closed) => break,
        }
    }
}

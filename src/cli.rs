use crate::types::{Message, Role};
use anyhow::{Context, Result, bail};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Toggle,
    History,
    Suggest(usize),
    Quit,
    Say(String),
}

pub fn parse_input(line: &str) -> Result<ReplCommand> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        bail!("empty input");
    }

    if let Some(rest) = trimmed.strip_prefix('/') {
        let mut parts = rest.splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).unwrap_or_default();
        return match command {
            "open" | "close" | "toggle" => Ok(ReplCommand::Toggle),
            "history" => Ok(ReplCommand::History),
            "quit" | "exit" => Ok(ReplCommand::Quit),
            "suggest" => {
                if arg.is_empty() {
                    bail!("a question number is required after /suggest");
                }
                let index: usize = arg.parse().context("invalid question number")?;
                Ok(ReplCommand::Suggest(index))
            }
            other => bail!("unknown command: /{other}"),
        };
    }

    Ok(ReplCommand::Say(trimmed.to_string()))
}

pub fn render_message(message: &Message) -> String {
    let speaker = match message.role {
        Role::User => "you",
        Role::Assistant => "assistant",
    };
    format!(
        "[{}] {speaker}: {}",
        message.created_at.format("%H:%M:%S"),
        message.text
    )
}

pub fn pretty_message(message: &Message) -> Result<String> {
    let json = serde_json::to_string_pretty(message)?;
    Ok(json)
}

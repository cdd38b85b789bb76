use anyhow::{Context, Result};
use frontdesk::cli::{self, ReplCommand};
use frontdesk::config::{ChatConfig, Config};
use frontdesk::matcher::{Responder, SUGGESTED_QUESTIONS};
use frontdesk::types::Message;
use frontdesk::widget::ChatWidget;
use std::env;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};

const DEFAULT_CONFIG_PATH: &str = "frontdesk.toml";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args: Vec<String> = env::args().collect();
    let _bin = args.remove(0);
    if args.is_empty() {
        print_usage();
        return Ok(());
    }

    match args[0].as_str() {
        "chat" => run_chat(&args[1..]).await,
        "ask" => run_ask(&args[1..]),
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        _ => {
            print_usage();
            Ok(())
        }
    }
}

async fn run_chat(args: &[String]) -> Result<()> {
    let mut config_path: Option<PathBuf> = None;
    let mut instant = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                let value = args.get(i + 1).context("--config requires a value")?;
                config_path = Some(PathBuf::from(value));
                i += 2;
            }
            "--instant" => {
                instant = true;
                i += 1;
            }
            "--help" | "-h" => {
                print_chat_usage();
                return Ok(());
            }
            other => {
                return Err(anyhow::anyhow!("unknown chat argument: {other}"));
            }
        }
    }

    let mut config = load_config(config_path.as_deref())?;
    if instant {
        config.chat = ChatConfig::instant();
    }

    let (widget, mut replies) = ChatWidget::spawn(&config);
    widget.toggle()?;

    println!("frontdesk chat — type a question, or /open /suggest <n> /history /quit");
    println!("quick questions:");
    for (index, question) in SUGGESTED_QUESTIONS.iter().enumerate() {
        println!("  {index}. {question}");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            maybe_reply = replies.recv() => {
                match maybe_reply {
                    Some(reply) => println!("{}", cli::render_message(&reply)),
                    None => break,
                }
            }
            maybe_line = lines.next_line() => {
                let line = match maybe_line? {
                    Some(line) => line,
                    None => break,
                };
                if line.trim().is_empty() {
                    continue;
                }
                let command = match cli::parse_input(&line) {
                    Ok(command) => command,
                    Err(err) => {
                        eprintln!("{err}");
                        continue;
                    }
                };
                match command {
                    ReplCommand::Quit => break,
                    ReplCommand::Toggle => widget.toggle()?,
                    ReplCommand::Say(text) => widget.send(text)?,
                    ReplCommand::Suggest(index) => match SUGGESTED_QUESTIONS.get(index) {
                        Some(question) => widget.suggest(*question)?,
                        None => eprintln!("no suggested question {index}"),
                    },
                    ReplCommand::History => {
                        let state = widget.state().await?;
                        for message in &state.messages {
                            println!("{}", cli::render_message(message));
                        }
                        if state.typing {
                            println!("assistant is typing...");
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

fn run_ask(args: &[String]) -> Result<()> {
    let mut message: Option<String> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--message" => {
                let value = args.get(i + 1).context("--message requires a value")?;
                message = Some(value.to_string());
                i += 2;
            }
            "--config" => {
                let value = args.get(i + 1).context("--config requires a value")?;
                config_path = Some(PathBuf::from(value));
                i += 2;
            }
            "--json" => {
                json = true;
                i += 1;
            }
            "--help" | "-h" => {
                print_ask_usage();
                return Ok(());
            }
            other => {
                return Err(anyhow::anyhow!("unknown ask argument: {other}"));
            }
        }
    }

    let message = message.context("--message is required")?;
    let config = load_config(config_path.as_deref())?;
    let responder = Responder::new(&config.practice, &config.contact);
    let reply = responder.respond(&message);

    if json {
        println!("{}", cli::pretty_message(&Message::assistant(reply))?);
    } else {
        println!("{reply}");
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                Config::load(default)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn print_usage() {
    eprintln!("frontdesk usage:\n  frontdesk chat [options]\n  frontdesk ask --message <text>");
}

fn print_chat_usage() {
    eprintln!("frontdesk chat options:\n  --config <path>\n  --instant");
}

fn print_ask_usage() {
    eprintln!("frontdesk ask options:\n  --message <text>\n  --config <path>\n  --json");
}

use std::io::{self, Write};

use clap::Parser;
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use spinners::{Spinner, Spinners};

use chat_relay::client::{ChatSession, RelayClient};
use chat_relay::transcript::Turn;

/// Command line arguments for the chat front-end
#[derive(Parser)]
#[clap(
    name = "chat-cli",
    about = "Interactive terminal front-end for a chat-relay server"
)]
struct CliArgs {
    /// Base URL of the relay
    #[arg(long, env = "RELAY_URL", default_value = "http://localhost:3001")]
    relay_url: String,
}

fn separator() -> ColoredString {
    "-".repeat(50).bright_black()
}

/// Prints one transcript entry the way the chat panel renders it
fn print_turn(turn: &Turn) {
    match turn {
        Turn::User(text) => println!("{} {}", "You:".bright_blue(), text),
        Turn::Assistant(text) => println!("{} {}", "AI:".bright_green(), text),
        Turn::AssistantError(err) => println!("{} {}", "AI:".bright_green(), err.bright_red()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    chat_relay::init_logging();

    let args = CliArgs::parse();
    let mut session = ChatSession::new(RelayClient::new(&args.relay_url)?);
    session.load_config().await;

    println!("{}", "Chat AI".bright_cyan());
    println!("{}", session.tagline());
    println!(
        "{}",
        "Type a message to get started. '/history' replays the conversation, 'exit' quits."
            .bright_black()
    );
    println!("{}", separator());

    let mut rl = DefaultEditor::new()?;

    loop {
        io::stdout().flush()?;
        match rl.readline("> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed.eq_ignore_ascii_case("exit") {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }
                if trimmed == "/history" {
                    if session.transcript().is_empty() {
                        println!("{}", "No messages yet.".bright_black());
                    }
                    for turn in session.transcript().iter() {
                        print_turn(turn);
                    }
                    println!("{}", separator());
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let mut sp =
                    Spinner::new(Spinners::Dots12, "Thinking...".bright_magenta().to_string());
                let result = session.send(trimmed).await;
                sp.stop();
                print!("\r\x1B[K");

                match result {
                    Ok(turn) => print_turn(turn),
                    Err(e) => eprintln!("{} {}", "Error:".bright_red(), e),
                }
                if let Some(banner) = session.last_error() {
                    eprintln!("{} {}", "!".bright_yellow(), banner.bright_red());
                }
                println!("{}", separator());
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("\n{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} {:?}", "Error:".bright_red(), err);
                break;
            }
        }
    }

    Ok(())
}

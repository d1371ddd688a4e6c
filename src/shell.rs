/// Line-oriented terminal shell over the swap session
///
/// Thin I/O only: plain text becomes an intent, slash commands drive the
/// wallet and signing flow, and agent messages render as they are appended.
/// Everything stateful lives in the injected session components.
use colored::*;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use crate::arguments::print_help;
use crate::chains::short_address;
use crate::conversation::{ConversationStore, Message, MessageKind, MessageRole};
use crate::errors::WalletError;
use crate::logger::{self, LogTag};
use crate::session::SwapSessionController;
use crate::wallet::{TransactionOutcome, WalletSession};

/// Wallet provider error messages are truncated to this many characters in
/// the shell
const ERROR_DISPLAY_LIMIT: usize = 50;

pub async fn run(
    controller: Arc<SwapSessionController>,
    store: Arc<ConversationStore>,
    wallet: Arc<WalletSession>,
) -> anyhow::Result<()> {
    // Subscribe before printing history so nothing lands in between
    let mut feed = store.subscribe();
    for message in store.messages() {
        print_message(&message);
    }

    tokio::spawn(async move {
        while let Ok(message) = feed.recv().await {
            if message.role == MessageRole::Agent {
                print_message(&message);
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt();
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim().to_string();

        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('/') {
            let mut parts = command.split_whitespace();
            match parts.next() {
                Some("help") => print_help(),
                Some("connect") => {
                    let index = parts.next().and_then(|n| n.parse::<usize>().ok());
                    match wallet.connect(index).await {
                        Ok(address) => {
                            println!("Connected: {}", short_address(&address).bright_cyan())
                        }
                        Err(e) => println!("{} {}", "!".red().bold(), e),
                    }
                }
                Some("disconnect") => {
                    wallet.disconnect();
                    println!("Disconnected");
                }
                Some("sign") => {
                    let id = parts
                        .next()
                        .and_then(|n| n.parse::<u64>().ok())
                        .or_else(|| controller.latest_proposal_id());
                    match id {
                        Some(id) => match controller.confirm_proposal(id) {
                            Ok(outcome) => watch_and_print(outcome),
                            Err(WalletError::NotConnected) => {
                                println!(
                                    "{} Please connect your wallet first",
                                    "!".red().bold()
                                );
                            }
                            Err(e) => println!("{} {}", "!".red().bold(), e),
                        },
                        None => println!("No proposal to sign yet"),
                    }
                }
                Some("intents") => {
                    for intent in controller.intents() {
                        println!(
                            "  #{} [{}] {}",
                            intent.id,
                            intent.state.label().bold(),
                            intent.text
                        );
                    }
                }
                Some("quit") | Some("exit") => break,
                _ => println!("Unknown command, try /help"),
            }
            continue;
        }

        if Arc::clone(&controller).submit_intent(&line).is_none() {
            logger::debug(LogTag::Chat, "Ignored empty intent input");
        }
    }

    Ok(())
}

fn prompt() {
    print!("{} ", "you>".bright_white().bold());
    let _ = std::io::stdout().flush();
}

fn print_message(message: &Message) {
    let prefix = match message.role {
        MessageRole::User => "you>".bright_white().bold(),
        MessageRole::Agent => "orbit>".bright_blue().bold(),
    };
    println!("{} {}", prefix, message.content);

    if message.kind == MessageKind::TransactionProposal {
        if let Some(route) = &message.route {
            println!(
                "       {} {} -> {}",
                "route:".dimmed(),
                short_address(&route.token_in).green(),
                short_address(&route.token_out).blue()
            );
            println!(
                "       {} {}",
                "gas estimate:".dimmed(),
                route.estimated_gas
            );
            println!("       {}", "/sign to execute".dimmed());
        }
    }
}

/// Print outcome transitions for a confirmed proposal
fn watch_and_print(mut outcome: watch::Receiver<TransactionOutcome>) {
    tokio::spawn(async move {
        loop {
            let current = outcome.borrow().clone();
            match current {
                TransactionOutcome::Pending => {
                    if outcome.changed().await.is_err() {
                        println!("{}", "No confirmation yet; check your wallet".yellow());
                        return;
                    }
                }
                TransactionOutcome::Success { tx_hash } => {
                    println!("{} {}", "Transaction Sent!".green().bold(), tx_hash);
                    return;
                }
                TransactionOutcome::Failed { reason } => {
                    let short: String = reason.chars().take(ERROR_DISPLAY_LIMIT).collect();
                    println!("{} {}...", "Error:".red().bold(), short);
                    return;
                }
            }
        }
    });
}

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Interactive chat session for fitbot-cli
// ABOUTME: Reads stdin lines, applies slash commands to the context, and submits messages

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use fitbot_server::client::{Conversation, HttpChatClient, SubmitOutcome};
use fitbot_server::models::{Lifestyle, Personality};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::helpers::display::{print_help, print_message, print_stats, TerminalView};

/// A line typed at the prompt
#[derive(Debug, Clone, PartialEq)]
enum Input {
    Send(String),
    SetPersonality(Personality),
    SetDays(i64),
    SetLifestyle(Lifestyle),
    Stats,
    Help,
    Quit,
    Invalid(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        let Some(command) = line.trim().strip_prefix('/') else {
            return Self::Send(line.to_owned());
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        match (name, arg) {
            ("personality" | "p", Some(code)) => Personality::from_code(code).map_or_else(
                || Self::Invalid(format!("Unknown personality '{code}'")),
                Self::SetPersonality,
            ),
            ("days", Some(days)) => days.parse().map_or_else(
                |_| Self::Invalid(format!("Not a number: '{days}'")),
                Self::SetDays,
            ),
            ("healthy", None) => Self::SetLifestyle(Lifestyle::healthy_day()),
            ("lazy", None) => Self::SetLifestyle(Lifestyle::lazy_day()),
            ("stats", None) => Self::Stats,
            ("help", None) => Self::Help,
            ("quit" | "exit", None) => Self::Quit,
            _ => Self::Invalid(format!("Unknown command '/{command}'")),
        }
    }
}

/// Run the session until `/quit` or end of input
pub async fn run(server: &str, timeout_secs: u64) -> Result<()> {
    let transport = HttpChatClient::new(server, Duration::from_secs(timeout_secs))?;
    println!("Connected to {}", transport.endpoint());

    let conversation =
        Conversation::new(Arc::new(transport)).with_observer(Arc::new(TerminalView));

    for message in &conversation.state().await.messages {
        print_message(message);
    }
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Input::parse(&line) {
            Input::Send(text) => {
                if conversation.submit(&text).await == SubmitOutcome::Busy {
                    println!("   Still waiting for the last reply");
                }
            }
            Input::SetPersonality(personality) => {
                conversation.set_personality(personality).await;
                println!("   Coach set to {}", personality.label());
            }
            Input::SetDays(days) => {
                conversation.set_usage_days(days).await;
                println!("   Usage days set to {days}");
            }
            Input::SetLifestyle(lifestyle) => {
                conversation.set_lifestyle(lifestyle).await;
                print_stats(&conversation.context().await);
            }
            Input::Stats => print_stats(&conversation.context().await),
            Input::Help => print_help(),
            Input::Quit => break,
            Input::Invalid(reason) => println!("   {reason}"),
        }
    }

    Ok(())
}

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Terminal rendering for fitbot-cli chat sessions
// ABOUTME: Prints messages, the loading indicator, and the track-record stats

use fitbot_server::client::{ConversationObserver, Message, Role};
use fitbot_server::models::{ContextSnapshot, Personality};

/// Prints each appended message and the loading indicator
pub struct TerminalView;

impl ConversationObserver for TerminalView {
    fn scroll_to_latest(&self, latest: &Message) {
        // The terminal echoes user input already
        if latest.role != Role::User {
            print_message(latest);
        }
    }

    fn loading_changed(&self, loading: bool) {
        if loading {
            println!("   FitBot is typing...");
        }
    }
}

/// Print one message with its author tag
pub fn print_message(message: &Message) {
    let tag = match message.role {
        Role::User => "you",
        Role::Ai => "FitBot",
        Role::System => "system",
    };
    println!("[{tag}] {}", message.content);
}

/// Print the context snapshot as the track-record card
pub fn print_stats(context: &ContextSnapshot) {
    let lifestyle = &context.lifestyle;
    println!("{}", "=".repeat(48));
    println!("YOUR TRACK RECORD (Day {})", context.usage_days);
    println!(
        "   Steps: {} ({:.0}% of goal)",
        lifestyle.steps,
        lifestyle.step_progress() * 100.0
    );
    println!(
        "   Sleep: {}h ({})",
        lifestyle.sleep_hours,
        lifestyle.sleep_quality().status()
    );
    println!(
        "   Coach: {} ({})",
        context.personality.label(),
        context.personality.style()
    );
    println!("{}", "=".repeat(48));
}

/// Print the slash command reference
pub fn print_help() {
    println!("Commands:");
    let codes: Vec<&str> = Personality::ALL.iter().map(Personality::as_str).collect();
    println!("   /personality {}   switch coach", codes.join("|"));
    println!("   /days N              set usage days (1 = new, 10 = pro)");
    println!("   /healthy             load a healthy day (8500 steps, 7.5h)");
    println!("   /lazy                load a lazy day (500 steps, 4.5h)");
    println!("   /stats               show the track record");
    println!("   /help                show this list");
    println!("   /quit                leave");
}

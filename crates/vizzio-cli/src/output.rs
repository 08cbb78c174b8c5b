//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use vizzio_core::model::{ChatEntry, EntryKind, Sender};

/// Print chat entries, oldest first.
pub fn print_entries(entries: &[ChatEntry]) {
    if entries.is_empty() {
        println!("{}", "No messages yet.".dimmed());
        return;
    }

    for entry in entries {
        let who = match entry.sender {
            Sender::User => "you".cyan().bold(),
            Sender::Bot => "bot".magenta().bold(),
        };
        println!(
            "{} {} {}",
            entry.timestamp.format("%H:%M:%S").to_string().dimmed(),
            who,
            kind_badge(entry.kind)
        );
        for line in entry.content.lines() {
            println!("    {}", line);
        }
    }
}

/// Print the unread counter.
pub fn print_unread(unread: usize) {
    if unread == 0 {
        println!("{}", "No unread notifications.".dimmed());
    } else {
        println!("{} {}", unread.to_string().yellow().bold(), "unread notifications".bold());
    }
}

fn kind_badge(kind: EntryKind) -> ColoredString {
    let label = format!("[{}]", kind.as_str());
    match kind {
        EntryKind::Text => label.normal(),
        EntryKind::Notification => label.blue(),
        EntryKind::Alert => label.red(),
        EntryKind::Success => label.green(),
    }
}

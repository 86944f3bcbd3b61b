//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use threadline_entity::message::ThreadNode;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Print a single item in the selected format
pub fn print_item<T: Serialize + Tabled>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            println!("{}", Table::new(std::slice::from_ref(item)));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string());
            println!("{json}");
        }
    }
}

/// Print a reply tree, one indented line per message in table mode.
pub fn print_thread(tree: &ThreadNode, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            let mut stack = vec![(tree, 0usize)];
            while let Some((node, depth)) = stack.pop() {
                let marker = if node.edited { " (edited)" } else { "" };
                println!(
                    "{}{} {}{}  [{}]",
                    "  ".repeat(depth),
                    short_id(&node.id.to_string()),
                    node.content,
                    marker,
                    node.created_at.format("%Y-%m-%d %H:%M")
                );
                stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(tree).unwrap_or_else(|_| "{}".to_string());
            println!("{json}");
        }
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{key}:"), value);
}

/// First eight characters of an id, for compact listings.
fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

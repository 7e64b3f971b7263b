// vidshelf-cli/src/output.rs
//
// Console output helpers. Human-readable output is styled with owo-colors;
// machine-readable JSON output is printed plain.

use owo_colors::OwoColorize;
use std::fmt::Display;
use vidshelf_core::{MediaEntry, format_bytes, format_epoch_seconds};

/// Print a section heading with colored styling
pub fn print_section(text: &str) {
    let line = "-".repeat(40);
    println!("{}", line.blue());
    println!("{}", format!(" {text} ").bold());
    println!("{}", line.blue());
}

/// Print an info line with label and value, with the label colored
pub fn print_info<T: Display>(label: &str, value: T) {
    println!("{}: {}", label.bright_cyan(), value);
}

/// Print a success line
pub fn print_success(message: &str) {
    println!("{} {}", "✓".bright_green().bold(), message);
}

/// Print an error line to stderr
pub fn print_error<T: Display>(message: T) {
    eprintln!("{} {}", "Error:".bright_red().bold(), message);
}

/// Print gallery entries as an aligned table
pub fn print_entries(entries: &[MediaEntry]) {
    if entries.is_empty() {
        println!("{}", "No entries in gallery".dimmed());
        return;
    }

    print_section(&format!("{} gallery entries", entries.len()));
    for entry in entries {
        let location = entry
            .descriptor
            .location()
            .map(|loc| format!("{:.5}, {:.5}", loc.latitude, loc.longitude))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  {:<28} {:>12}  {}  {}",
            entry.descriptor.display_name.bold(),
            format_bytes(entry.size),
            format_epoch_seconds(entry.descriptor.date_added),
            location
        );
        println!("    {}", entry.handle.dimmed());
    }
}

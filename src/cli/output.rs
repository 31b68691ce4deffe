//! CLI output formatting utilities

use chrono::Utc;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::auth::{Role, SessionInfo};

/// Print a success message
pub fn success(message: &str) {
    eprintln!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message);
}

/// Format a role as a colored string
pub fn format_role(role: Role) -> String {
    match role {
        Role::Librarian => role.to_string().magenta().to_string(),
        Role::User => role.to_string().blue().to_string(),
    }
}

/// Human friendly time left until expiry
pub fn format_remaining(info: &SessionInfo) -> String {
    let remaining = info.expires_at - Utc::now();
    if remaining.num_seconds() <= 0 {
        "expired".to_string()
    } else if remaining.num_hours() > 0 {
        format!("{}h {}m", remaining.num_hours(), remaining.num_minutes() % 60)
    } else {
        format!("{}m {}s", remaining.num_minutes(), remaining.num_seconds() % 60)
    }
}

/// Print the current session as a table
pub fn print_session_table(info: &SessionInfo) {
    let role_color = match info.role {
        Role::Librarian => Color::Magenta,
        Role::User => Color::Blue,
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Subject").fg(Color::Cyan),
            Cell::new("Role").fg(Color::Cyan),
            Cell::new("Expires").fg(Color::Cyan),
            Cell::new("Remaining").fg(Color::Cyan),
        ]);

    table.add_row(vec![
        Cell::new(&info.subject),
        Cell::new(info.role).fg(role_color),
        Cell::new(info.expires_at.format("%Y-%m-%d %H:%M:%S UTC")),
        Cell::new(format_remaining(info)),
    ]);

    println!("{table}");
}

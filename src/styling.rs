//! Minimal terminal styling: color constants and `NO_COLOR`-aware formatting.
//!
//! Mirrors the `anstyle` + `NO_COLOR` convention used throughout this tool's
//! output layer, trimmed down to what the executor and synchronizer need:
//! a red error bullet, a green success marker, and a dimmed hint.

use anstyle::{AnsiColor, Color, Style};
use std::io::IsTerminal;

pub const ERROR: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));
pub const GREEN: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));

const ERROR_EMOJI: &str = "❌";

fn use_color() -> bool {
    if std::env::var("CLICOLOR_FORCE").is_ok() || std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    std::io::stdout().is_terminal()
}

/// Render `text` styled, or plain when colors are disabled.
pub fn styled(style: Style, text: &str) -> String {
    if use_color() {
        format!("{style}{text}{style:#}")
    } else {
        text.to_string()
    }
}

/// Format a single `"* <item> : <message>"` error bullet line (§6 progress format).
pub fn error_bullet(item: &str, message: &str) -> String {
    if use_color() {
        format!("{GREEN}*{GREEN:#} {item} : {ERROR}{message}{ERROR:#}")
    } else {
        format!("* {item} : {message}")
    }
}

/// Format a top-level fatal error for the CLI boundary: a red, emoji-prefixed
/// line, the way this tool's error-reporting convention renders one-off
/// failures that aren't part of a per-item report.
pub fn error(message: &str) -> String {
    if use_color() {
        format!("{ERROR}{ERROR_EMOJI} {message}{ERROR:#}")
    } else {
        format!("{ERROR_EMOJI} {message}")
    }
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the resto-search CLI.
//!
//! OneDark colors for dark terminals, One Light for light ones. The theme
//! comes from `RESTO_SEARCH_THEME` if set, then the `COLORFGBG` hint some
//! terminals export, then defaults to dark. `NO_COLOR` and non-TTY stdout turn
//! color off entirely, so piped output stays plain text.

use std::sync::OnceLock;

use resto_search::scoring::Tier;
use resto_search::search::highlight_pattern;
use resto_search::RecordType;

/// Width between the `│` borders.
pub const BOX_WIDTH: usize = 72;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("RESTO_SEARCH_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg": background 7 or 9..=15 is a light terminal.
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(Ok(bg)) = colorfgbg.split(';').next_back().map(str::parse::<u8>) {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

/// A themed foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
    BrightGreen,
}

impl Color {
    fn dark(self) -> (u8, u8, u8) {
        match self {
            Color::Red => (224, 108, 117),
            Color::Green => (152, 195, 121),
            Color::Yellow => (229, 192, 123),
            Color::Blue => (97, 175, 239),
            Color::Magenta => (198, 120, 221),
            Color::Cyan => (86, 182, 194),
            Color::Gray => (92, 99, 112),
            Color::BrightGreen => (166, 226, 46),
        }
    }

    fn light(self) -> (u8, u8, u8) {
        match self {
            Color::Red => (228, 86, 73),
            Color::Green => (80, 161, 79),
            Color::Yellow => (193, 132, 1),
            Color::Blue => (64, 120, 242),
            Color::Magenta => (166, 38, 164),
            Color::Cyan => (1, 132, 188),
            Color::Gray => (160, 161, 167),
            Color::BrightGreen => (68, 140, 39),
        }
    }

    pub fn code(self) -> String {
        match theme() {
            Theme::Dark => rgb(self.dark()),
            Theme::Light => rgb(self.light()),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Colors on stdout unless `NO_COLOR` is set or stdout is not a terminal.
pub fn use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// `text` in `color` plus any extra modifiers, or plain when colors are off.
pub fn paint(color: Color, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color.code(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length, skipping ANSI escape sequences.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

pub fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

fn border(s: &str) -> String {
    paint(Color::Gray, &[], s)
}

/// │ content          │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content) + 1);
    println!("{} {}{}{}", border("│"), content, " ".repeat(pad), border("│"));
}

fn labelled_rule(left: &str, label: &str, right: &str) {
    let label = format!("─ {} ", paint(Color::Cyan, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label));
    println!(
        "{}{}{}",
        border(left),
        label,
        border(&format!("{}{}", "─".repeat(remaining), right))
    );
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    labelled_rule("┌", label, "┐");
}

/// ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    labelled_rule("├", label, "┤");
}

/// └──────────────────┘
pub fn section_bot() {
    println!("{}", border(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// `[issue]`, `[torque]`, ... colored per collection.
pub fn type_badge(record_type: RecordType) -> String {
    let color = match record_type {
        RecordType::Issue => Color::Red,
        RecordType::Torque => Color::Blue,
        RecordType::Guide => Color::Green,
        RecordType::Supplier => Color::Magenta,
    };
    paint(color, &[], &format!("[{}]", record_type))
}

pub fn tier_label(tier: Tier) -> String {
    let color = match tier {
        Tier::Model | Tier::Primary => Color::BrightGreen,
        Tier::Secondary | Tier::Keywords => Color::Green,
        Tier::Category | Tier::Description => Color::Yellow,
        Tier::Brand | Tier::Anywhere => Color::Gray,
    };
    paint(color, &[], tier.as_str())
}

/// Score, right-aligned, greener for stronger matches.
pub fn score_value(score: f64) -> String {
    let text = format!("{:>6.1}", score);
    let color = if score >= 15.0 {
        Color::BrightGreen
    } else if score >= 8.0 {
        Color::Green
    } else if score >= 4.0 {
        Color::Yellow
    } else {
        Color::Gray
    };
    paint(color, &[], &text)
}

/// Query terms in bold yellow, for terminal output.
pub fn highlight_terms(text: &str, query: &str) -> String {
    if !use_colors() {
        return text.to_string();
    }
    match highlight_pattern(query) {
        Some(re) => re
            .replace_all(text, |caps: &regex::Captures<'_>| {
                paint(Color::Yellow, &[BOLD], &caps[0])
            })
            .into_owned(),
        None => text.to_string(),
    }
}

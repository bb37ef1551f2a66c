use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use sous_core::models::{HistoryRecord, MAX_RATING};

/// Ask a yes/no question on stderr. Anything but "y"/"yes" is a no.
pub(crate) fn prompt_confirm(question: &str) -> Result<bool> {
    eprint!("{question} [y/N]: ");
    io::stderr().flush()?;
    let stdin = io::stdin();
    let line = stdin.lock().lines().next().context("No input")??;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

pub(crate) fn print_history_table(records: &[HistoryRecord]) {
    #[derive(Tabled)]
    struct HistoryRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Ingredients")]
        title: String,
        #[tabled(rename = "Diet")]
        diet: String,
        #[tabled(rename = "Cuisine")]
        cuisine: String,
        #[tabled(rename = "Rating")]
        rating: String,
        #[tabled(rename = "Fav")]
        favorite: String,
    }

    let rows: Vec<HistoryRow> = records
        .iter()
        .map(|r| HistoryRow {
            id: short_id(&r.id).to_string(),
            date: r
                .created_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            title: truncate(&r.title(), 35),
            diet: if r.dietary_preferences.is_empty() {
                "-".to_string()
            } else {
                truncate(
                    &r.dietary_preferences
                        .iter()
                        .map(|p| p.label())
                        .collect::<Vec<_>>()
                        .join(", "),
                    25,
                )
            },
            cuisine: r.cuisine_type.to_string(),
            rating: stars(r.rating),
            favorite: if r.is_favorite { "*" } else { "" }.to_string(),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(5..7)).with(Alignment::center()))
        .to_string();
    println!("{table}");
}

/// "★★★☆☆" for 3 of 5, or "-" when unrated.
pub(crate) fn stars(rating: u8) -> String {
    if rating == 0 {
        return "-".to_string();
    }
    let filled = rating.min(MAX_RATING);
    let mut s = "★".repeat(filled as usize);
    s.push_str(&"☆".repeat((MAX_RATING - filled) as usize));
    s
}

/// First 8 characters of an id, enough to pick a record on the command line.
pub(crate) fn short_id(id: &str) -> &str {
    id.char_indices().nth(8).map_or(id, |(i, _)| &id[..i])
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars() {
        assert_eq!(stars(0), "-");
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(5), "★★★★★");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0b5c1e2a-77f1-4f0e-9d1b-6a8c0e4d2f11"), "0b5c1e2a");
        assert_eq!(short_id("rec-1"), "rec-1");
    }

    #[test]
    fn test_json_error_escapes() {
        let out = json_error("bad \"quote\"");
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["error"], "bad \"quote\"");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world this is long", 10), "hello w...");
    }

    #[test]
    fn test_truncate_utf8() {
        // Should not panic on multi-byte characters
        assert_eq!(truncate("Crème fraîche", 10), "Crème f...");
        assert_eq!(truncate("Müsli", 10), "Müsli");
        assert_eq!(truncate("日清カップヌードル", 8), "日清カップ...");
    }
}

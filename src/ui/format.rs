//! Text helpers for rendering search results. Everything here is pure so the
//! widgets stay thin.

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, TimeZone};
use eframe::egui::Color32;
use regex::Regex;

/// Words shown before a passage collapses behind "Mostrar N palabras más".
pub const TRUNCATE_WORDS: usize = 100;

static PAGE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"--- Página (\d+) ---").expect("page marker pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    Excelente,
    Buena,
    Aceptable,
}

impl Quality {
    pub fn label(self) -> &'static str {
        match self {
            Quality::Excelente => "Excelente",
            Quality::Buena => "Buena",
            Quality::Aceptable => "Aceptable",
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            Quality::Excelente => Color32::from_rgb(22, 163, 74),
            Quality::Buena => Color32::from_rgb(202, 138, 4),
            Quality::Aceptable => Color32::from_rgb(37, 99, 235),
        }
    }
}

/// Bucket a backend percentage. Both bounds are exclusive: 80 is `Buena`,
/// 60 is `Aceptable`.
pub fn quality(similarity_percent: f64) -> Quality {
    if similarity_percent > 80.0 {
        Quality::Excelente
    } else if similarity_percent > 60.0 {
        Quality::Buena
    } else {
        Quality::Aceptable
    }
}

/// `73` for whole numbers, `73.45` otherwise.
pub fn format_percent(percent: f64) -> String {
    format!("{percent}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub page: Option<u32>,
    pub text: String,
}

/// Pull the page number out of the `--- Página N ---` markers the ingester
/// inserts, and strip every marker from the passage.
pub fn extract_page_info(text: &str) -> PageInfo {
    let Some(captures) = PAGE_MARKER.captures(text) else {
        return PageInfo {
            page: None,
            text: text.to_string(),
        };
    };
    let page = captures.get(1).and_then(|m| m.as_str().parse().ok());
    PageInfo {
        page,
        text: PAGE_MARKER.replace_all(text, "").trim().to_string(),
    }
}

/// Lowercased, deduplicated query words longer than two characters.
pub fn query_terms(query: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|term| term.chars().count() > 2)
        .filter(|term| seen.insert(term.to_string()))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

/// Split `text` into plain and highlighted runs. Matching is case-insensitive
/// and keeps the original casing; joining the segments gives back `text`.
pub fn highlight<'a>(text: &'a str, terms: &[String]) -> Vec<Segment<'a>> {
    let plain = || {
        vec![Segment {
            text,
            highlighted: false,
        }]
    };
    if text.is_empty() || terms.is_empty() {
        return plain();
    }

    let mut escaped: Vec<String> = terms.iter().map(|term| regex::escape(term)).collect();
    // Prefer the longest alternative when terms overlap.
    escaped.sort_by_key(|term| std::cmp::Reverse(term.len()));
    let Ok(pattern) = Regex::new(&format!("(?i){}", escaped.join("|"))) else {
        return plain();
    };

    let mut segments = Vec::new();
    let mut cursor = 0;
    for found in pattern.find_iter(text) {
        if found.start() > cursor {
            segments.push(Segment {
                text: &text[cursor..found.start()],
                highlighted: false,
            });
        }
        segments.push(Segment {
            text: found.as_str(),
            highlighted: true,
        });
        cursor = found.end();
    }
    if cursor < text.len() {
        segments.push(Segment {
            text: &text[cursor..],
            highlighted: false,
        });
    }
    segments
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncated<'a> {
    pub text: Cow<'a, str>,
    /// Words left out of `text`; zero when nothing was cut.
    pub hidden_words: usize,
}

impl Truncated<'_> {
    pub fn is_truncated(&self) -> bool {
        self.hidden_words > 0
    }
}

/// Keep the first `limit` words and append `...` when the passage is longer
/// than `limit` and the card is collapsed.
pub fn truncate_words(text: &str, limit: usize, expanded: bool) -> Truncated<'_> {
    let total = word_count(text);
    if expanded || total <= limit {
        return Truncated {
            text: Cow::Borrowed(text),
            hidden_words: 0,
        };
    }

    let mut shortened = text.split_whitespace().take(limit).collect::<Vec<_>>().join(" ");
    shortened.push_str("...");
    Truncated {
        text: Cow::Owned(shortened),
        hidden_words: total - limit,
    }
}

pub fn format_time<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.format("%H:%M").to_string()
}

//! Summary and detail views of a single record.

use crate::Record;

/// Number of body characters shown on a card.
pub const EXCERPT_CHARS: usize = 180;
/// Always appended to the excerpt, even when the body is shorter than the budget.
pub const EXCERPT_SUFFIX: &str = "...";
pub const MISSING_TITLE: &str = "Brak tytułu";
/// Shown in the detail view in place of any missing field.
pub const MISSING_FIELD: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub title: String,
    pub date: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub rows: Vec<DetailRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: DetailValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailValue {
    Text(String),
    /// Opened in a new browsing context when activated.
    Link { href: String },
    /// Body text split on blank lines; drawn with a line break between paragraphs.
    Paragraphs(Vec<String>),
}

impl DetailView {
    /// True when any row shows `needle`, either as text, link or paragraph.
    pub fn contains(&self, needle: &str) -> bool {
        self.rows.iter().any(|row| match &row.value {
            DetailValue::Text(text) => text.contains(needle),
            DetailValue::Link { href } => href.contains(needle),
            DetailValue::Paragraphs(paragraphs) => paragraphs.iter().any(|p| p.contains(needle)),
        })
    }
}

pub fn render_card(record: &Record) -> CardView {
    let title = non_empty(record.original_title()).unwrap_or(MISSING_TITLE);
    let body = non_empty(record.ai_body())
        .or(non_empty(record.original_body()))
        .unwrap_or("");

    let mut excerpt: String = body.chars().take(EXCERPT_CHARS).collect();
    excerpt.push_str(EXCERPT_SUFFIX);

    CardView {
        title: title.to_string(),
        date: record.date().to_string(),
        excerpt,
    }
}

pub fn render_detail(record: &Record) -> DetailView {
    let rows = vec![
        DetailRow {
            label: "Tytuł",
            value: text_or_missing(record.original_title()),
        },
        DetailRow {
            label: "Data",
            value: text_or_missing(record.date()),
        },
        DetailRow {
            label: "Link",
            value: match non_empty(record.link()) {
                Some(href) => DetailValue::Link {
                    href: href.to_string(),
                },
                None => DetailValue::Text(MISSING_FIELD.to_string()),
            },
        },
        DetailRow {
            label: "Treść (AI)",
            value: paragraphs_or_missing(record.ai_body()),
        },
        DetailRow {
            label: "Treść (oryg.)",
            value: paragraphs_or_missing(record.original_body()),
        },
    ];
    DetailView { rows }
}

fn non_empty(field: &str) -> Option<&str> {
    Some(field).filter(|value| !value.is_empty())
}

fn text_or_missing(field: &str) -> DetailValue {
    DetailValue::Text(non_empty(field).unwrap_or(MISSING_FIELD).to_string())
}

fn paragraphs_or_missing(field: &str) -> DetailValue {
    match non_empty(field) {
        Some(body) => DetailValue::Paragraphs(body.split("\n\n").map(ToOwned::to_owned).collect()),
        None => DetailValue::Text(MISSING_FIELD.to_string()),
    }
}

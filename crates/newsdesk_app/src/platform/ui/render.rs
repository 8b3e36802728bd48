use std::borrow::Cow;
use std::fmt::Write;

use newsdesk_core::{AppViewModel, CardView, DetailValue, DetailView};

const RULE: &str = "────────────────────────────────────────";

/// Draws the whole page as plain text. `notice` is a transient line from the
/// input layer (help text, typo feedback).
pub fn render(view: &AppViewModel, notice: Option<&str>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Aktualności");
    let _ = writeln!(
        out,
        "[run: {}] [export: {}]{}",
        enabled_label(view.controls.run_enabled),
        enabled_label(view.controls.export_enabled),
        if view.controls.busy {
            "  ⏳ Generowanie..."
        } else {
            ""
        }
    );
    let _ = writeln!(out, "Klucz API: {}", mask(&view.credential));
    let _ = writeln!(out, "{RULE}");

    if view.cards.is_empty() {
        let _ = writeln!(out, "(brak kart)");
    }
    for (position, card) in view.cards.iter().enumerate() {
        push_card(&mut out, position + 1, card);
    }

    if let Some(detail) = &view.detail {
        let _ = writeln!(out, "{RULE}");
        push_detail(&mut out, detail);
        let _ = writeln!(out, "[close] zamknij");
    }

    if let Some(alert) = &view.alert {
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "!! {}", printable(&alert.message));
        let _ = writeln!(out, "[ok] zamknij komunikat");
    }

    if let Some(status) = &view.status {
        let _ = writeln!(out, "{}", printable(status));
    }
    if let Some(notice) = notice {
        let _ = writeln!(out, "{notice}");
    }

    let _ = writeln!(
        out,
        "{RULE}\nLogi serwera ({} linii)",
        view.log.line_count
    );
    for line in &view.log.visible_lines {
        let _ = writeln!(out, "  {}", printable(line));
    }
    out.push_str("> ");
    out
}

fn push_card(out: &mut String, number: usize, card: &CardView) {
    let _ = writeln!(out, "[{number}] {}", printable(&card.title));
    if !card.date.is_empty() {
        let _ = writeln!(out, "    {}", printable(&card.date));
    }
    let _ = writeln!(out, "    {}", printable(&card.excerpt));
}

fn push_detail(out: &mut String, detail: &DetailView) {
    for row in &detail.rows {
        match &row.value {
            DetailValue::Text(text) => {
                let _ = writeln!(out, "{}: {}", row.label, printable(text));
            }
            DetailValue::Link { href } => {
                // OSC 8 hyperlink; terminals without support show the plain URL.
                let href = printable(href);
                let _ = writeln!(out, "{}: \x1b]8;;{href}\x1b\\{href}\x1b]8;;\x1b\\", row.label);
            }
            DetailValue::Paragraphs(paragraphs) => {
                let _ = writeln!(out, "{}:", row.label);
                for (i, paragraph) in paragraphs.iter().enumerate() {
                    if i > 0 {
                        out.push('\n');
                    }
                    let _ = writeln!(out, "  {}", printable(paragraph));
                }
            }
        }
    }
}

/// Server text with control characters other than newline and tab replaced,
/// so it cannot move the cursor or open terminal escape sequences.
fn printable(text: &str) -> Cow<'_, str> {
    let unsafe_char = |c: char| c.is_control() && c != '\n' && c != '\t';
    if !text.chars().any(unsafe_char) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| if unsafe_char(c) { '\u{fffd}' } else { c })
            .collect(),
    )
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "aktywny"
    } else {
        "zablokowany"
    }
}

fn mask(credential: &str) -> String {
    let len = credential.trim().chars().count();
    if len == 0 {
        "(brak)".to_string()
    } else {
        "*".repeat(len)
    }
}

use newsdesk_core::{
    parse_records, render_card, render_detail, DetailValue, Record, EXCERPT_CHARS,
    EXCERPT_SUFFIX, MISSING_FIELD, MISSING_TITLE,
};
use pretty_assertions::assert_eq;

#[test]
fn missing_fields_fall_back_on_card() {
    let card = render_card(&Record::default());

    assert_eq!(card.title, MISSING_TITLE);
    assert_eq!(card.date, "");
    assert_eq!(card.excerpt, EXCERPT_SUFFIX);
}

#[test]
fn short_body_still_gets_ellipsis() {
    let record = Record {
        original_body: Some("Krótko".into()),
        ..Record::default()
    };

    assert_eq!(render_card(&record).excerpt, "Krótko...");
}

#[test]
fn long_body_is_cut_at_character_budget() {
    let body = "ż".repeat(EXCERPT_CHARS + 40);
    let record = Record {
        ai_body: Some(body.into()),
        ..Record::default()
    };

    let excerpt = render_card(&record).excerpt;
    let stripped = excerpt.strip_suffix(EXCERPT_SUFFIX).expect("suffix present");
    assert_eq!(stripped.chars().count(), EXCERPT_CHARS);
}

#[test]
fn ai_body_preferred_for_excerpt() {
    let record = Record {
        ai_body: Some("AI".into()),
        original_body: Some("Original".into()),
        ..Record::default()
    };

    assert_eq!(render_card(&record).excerpt, "AI...");
}

#[test]
fn detail_uses_placeholder_for_every_missing_field() {
    let detail = render_detail(&Record::default());

    let labels: Vec<_> = detail.rows.iter().map(|r| r.label).collect();
    assert_eq!(
        labels,
        vec!["Tytuł", "Data", "Link", "Treść (AI)", "Treść (oryg.)"]
    );
    for row in &detail.rows {
        assert_eq!(row.value, DetailValue::Text(MISSING_FIELD.to_string()));
    }
}

#[test]
fn empty_strings_count_as_missing_in_detail() {
    let record = Record {
        date: Some("".into()),
        link: Some("".into()),
        ..Record::default()
    };
    let detail = render_detail(&record);

    assert_eq!(detail.rows[1].value, DetailValue::Text(MISSING_FIELD.to_string()));
    assert_eq!(detail.rows[2].value, DetailValue::Text(MISSING_FIELD.to_string()));
}

#[test]
fn detail_splits_paragraphs_and_exposes_link() {
    let record = Record {
        link: Some("https://example.com/a".into()),
        ai_body: Some("Pierwszy.\n\nDrugi.".into()),
        ..Record::default()
    };
    let detail = render_detail(&record);

    assert_eq!(
        detail.rows[2].value,
        DetailValue::Link {
            href: "https://example.com/a".to_string()
        }
    );
    assert_eq!(
        detail.rows[3].value,
        DetailValue::Paragraphs(vec!["Pierwszy.".to_string(), "Drugi.".to_string()])
    );
}

#[test]
fn wire_names_nulls_and_unknown_keys_survive_reserialisation() {
    let body = r#"[{"link":"http://x","data":null,"tytuł":"T","źródło":"rss"}]"#;
    let records = parse_records(body.as_bytes()).expect("parse");

    assert_eq!(records[0].date, Some(serde_json::Value::Null));
    assert_eq!(records[0].date(), "");
    assert_eq!(records[0].original_title(), "T");
    assert_eq!(records[0].ai_body(), "");

    let echoed = serde_json::to_value(&records).expect("serialise");
    assert_eq!(
        echoed,
        serde_json::json!([{"link": "http://x", "data": null, "tytuł": "T", "źródło": "rss"}])
    );
}

#[test]
fn non_string_values_are_accepted_and_read_as_missing() {
    let body = r#"[{"tytuł":"A","treść":"ok"},{"tytuł":"B","gemini_tresc":["p1","p2"],"data":20240101}]"#;
    let records = parse_records(body.as_bytes()).expect("mixed value types still parse");

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].original_title(), "B");
    assert_eq!(records[1].ai_body(), "");
    assert_eq!(records[1].date(), "");

    let card = render_card(&records[1]);
    assert_eq!(card.title, "B");
    assert_eq!(card.excerpt, EXCERPT_SUFFIX);
    let detail = render_detail(&records[1]);
    assert_eq!(detail.rows[3].value, DetailValue::Text(MISSING_FIELD.to_string()));

    let echoed = serde_json::to_value(&records[1]).expect("serialise");
    assert_eq!(
        echoed,
        serde_json::json!({"tytuł": "B", "gemini_tresc": ["p1", "p2"], "data": 20240101})
    );
}

#[test]
fn non_array_payload_is_rejected() {
    assert!(parse_records(br#"{"error":"nope"}"#).is_err());
    assert!(parse_records(b"<html>").is_err());
}

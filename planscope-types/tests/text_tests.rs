use planscope_types::{LocalizedText, lenient};
use serde::Deserialize;
use serde_json::json;

// ── LocalizedText ────────────────────────────────────────────────

#[test]
fn translated_text_exposes_english() {
    let text: LocalizedText = serde_json::from_value(json!({"en": "Cluster"})).unwrap();
    assert_eq!(text.en(), Some("Cluster"));
}

#[test]
fn plain_text_is_treated_as_english() {
    let text: LocalizedText = serde_json::from_value(json!("People in need")).unwrap();
    assert_eq!(text.en(), Some("People in need"));
}

#[test]
fn missing_english_falls_back_to_empty() {
    let text: LocalizedText = serde_json::from_value(json!({"fr": "Groupe"})).unwrap();
    assert_eq!(text.en(), None);
    assert_eq!(text.en_or_empty(), "");
}

#[test]
fn translated_text_roundtrips() {
    let text = LocalizedText::from("Target");
    let value = serde_json::to_value(&text).unwrap();
    assert_eq!(value, json!({"en": "Target"}));
}

// ── lenient numbers ──────────────────────────────────────────────

#[derive(Deserialize)]
struct Probe {
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    value: Option<f64>,
    #[serde(default, deserialize_with = "lenient::truthy")]
    flag: bool,
}

fn probe(v: serde_json::Value) -> Probe {
    serde_json::from_value(v).unwrap()
}

#[test]
fn opt_f64_accepts_numbers_and_numeric_strings() {
    assert_eq!(probe(json!({"value": 12})).value, Some(12.0));
    assert_eq!(probe(json!({"value": 2.5})).value, Some(2.5));
    assert_eq!(probe(json!({"value": "4648210"})).value, Some(4_648_210.0));
}

#[test]
fn opt_f64_maps_blank_and_null_to_none() {
    assert_eq!(probe(json!({"value": null})).value, None);
    assert_eq!(probe(json!({"value": ""})).value, None);
    assert_eq!(probe(json!({"value": "n/a"})).value, None);
    assert_eq!(probe(json!({})).value, None);
}

#[test]
fn truthy_follows_loose_semantics() {
    assert!(probe(json!({"flag": true})).flag);
    assert!(probe(json!({"flag": 1})).flag);
    assert!(probe(json!({"flag": "1"})).flag);
    assert!(!probe(json!({"flag": 0})).flag);
    assert!(!probe(json!({"flag": "0"})).flag);
    assert!(!probe(json!({"flag": ""})).flag);
    assert!(!probe(json!({"flag": null})).flag);
    assert!(!probe(json!({})).flag);
}

#[test]
fn as_f64_reads_json_values() {
    assert_eq!(lenient::as_f64(&json!(3)), Some(3.0));
    assert_eq!(lenient::as_f64(&json!(" 8 ")), Some(8.0));
    assert_eq!(lenient::as_f64(&json!([1])), None);
}

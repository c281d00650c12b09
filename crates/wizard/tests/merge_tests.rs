use indexmap::IndexMap;
use serde_json::json;
use wizard::dates::normalize_date_str;
use wizard::domain::FieldMap;
use wizard::draft::{Draft, DraftEvent};
use wizard::merge::Merger;
use wizard::schema::FieldType;
use wizard::WizardError;

fn values(pairs: &[(&str, serde_json::Value)]) -> FieldMap {
  let mut m = FieldMap::new();
  for (k, v) in pairs {
    m.insert(k.to_string(), v.clone());
  }
  m
}

fn merger(types: &[(&str, FieldType)]) -> Merger {
  let mut map = IndexMap::new();
  for (k, t) in types {
    map.insert(k.to_string(), *t);
  }
  Merger::new(map)
}

#[test]
fn later_step_wins_over_subform_on_collision() {
  let mut draft = Draft::new("name", "date_debut");
  draft.apply(DraftEvent::SubFormFieldsChanged(values(&[("name", json!("X")),
                                                        ("date_debut", json!("2024-01-01"))])));
  draft.apply(DraftEvent::BaseFieldsCaptured { step: 1,
                                               values: values(&[("name", json!("Y"))]) });
  let m = merger(&[("name", FieldType::Text), ("date_debut", FieldType::Date)]);
  let payload = m.merge(&draft).expect("merge");
  assert_eq!(payload.get("name"), Some(&json!("Y")));
  assert_eq!(payload.get("date_debut"), Some(&json!("2024-01-01")));
}

#[test]
fn base_name_is_authoritative_over_subform_and_steps() {
  let mut draft = Draft::new("name", "date_debut");
  draft.apply(DraftEvent::BaseFieldsCaptured { step: 0,
                                               values: values(&[("name", json!("Official")),
                                                                ("date_debut", json!("2024-02-02"))]) });
  // the subform independently set a `name` key afterwards
  draft.apply(DraftEvent::SubFormFieldsChanged(values(&[("name", json!("Intruso"))])));
  let m = merger(&[("name", FieldType::Text), ("date_debut", FieldType::Date)]);
  let payload = m.merge(&draft).expect("merge");
  assert_eq!(payload.get("name"), Some(&json!("Official")));
}

#[test]
fn date_normalization_is_idempotent() {
  assert_eq!(normalize_date_str("2024-03-05").as_deref(), Some("2024-03-05"));
  let once = normalize_date_str("2024-03-05T10:00:00Z").expect("iso datetime");
  assert_eq!(once, "2024-03-05");
  let twice = normalize_date_str(&once).expect("renormalize");
  assert_eq!(twice, once);
  assert!(normalize_date_str("no es fecha").is_none());
}

#[test]
fn declared_booleans_become_explicit_zero_or_one() {
  let mut draft = Draft::new("name", "date_debut");
  draft.apply(DraftEvent::BaseFieldsCaptured { step: 0,
                                               values: values(&[("name", json!("Feria")),
                                                                ("date_debut", json!("2024-06-01")),
                                                                ("confirme", json!(true))]) });
  let m = merger(&[("name", FieldType::Text),
                   ("date_debut", FieldType::Date),
                   ("confirme", FieldType::Boolean),
                   ("annule", FieldType::Boolean)]);
  let payload = m.merge(&draft).expect("merge");
  assert_eq!(payload.get("confirme"), Some(&json!(1)));
  // absent declared boolean is transmitted as explicit 0, never undefined
  assert_eq!(payload.get("annule"), Some(&json!(0)));
}

#[test]
fn optional_reference_is_omitted_when_absent() {
  let mut draft = Draft::new("name", "date_debut");
  draft.apply(DraftEvent::BaseFieldsCaptured { step: 0,
                                               values: values(&[("name", json!("Feria")),
                                                                ("date_debut", json!("2024-06-01"))]) });
  draft.apply(DraftEvent::SubFormFieldsChanged(values(&[("pays_id", json!("12")),
                                                        ("binome_id", json!(null))])));
  let m = merger(&[("name", FieldType::Text),
                   ("date_debut", FieldType::Date),
                   ("pays_id", FieldType::Reference),
                   ("binome_id", FieldType::Reference),
                   ("responsable_id", FieldType::Reference)]);
  let payload = m.merge(&draft).expect("merge");
  assert_eq!(payload.get("pays_id"), Some(&json!(12)));
  assert!(!payload.contains_key("binome_id"), "null reference must be omitted");
  assert!(!payload.contains_key("responsable_id"), "absent reference must be omitted");
}

#[test]
fn anchor_falls_back_to_subform_date() {
  let mut draft = Draft::new("name", "date_debut");
  draft.apply(DraftEvent::BaseFieldsCaptured { step: 0,
                                               values: values(&[("name", json!("Feria"))]) });
  draft.apply(DraftEvent::SubFormFieldsChanged(values(&[("date_debut", json!("2024-09-15"))])));
  // a later snapshot blanks the date; the last-resort rule recovers the
  // subform value instead of failing the merge
  draft.apply(DraftEvent::BaseFieldsCaptured { step: 1,
                                               values: values(&[("date_debut", json!(""))]) });
  let m = merger(&[("name", FieldType::Text), ("date_debut", FieldType::Date)]);
  let payload = m.merge(&draft).expect("merge recovers the subform date");
  assert_eq!(payload.get("date_debut"), Some(&json!("2024-09-15")));
}

#[test]
fn merge_gate_reports_name_first_then_anchor() {
  let draft = Draft::new("name", "date_debut");
  let m = merger(&[("name", FieldType::Text), ("date_debut", FieldType::Date)]);
  match m.merge(&draft) {
    Err(WizardError::Merge { field }) => assert_eq!(field, "name"),
    other => panic!("expected merge error, got {:?}", other.map(|_| ())),
  }

  let mut draft = Draft::new("name", "date_debut");
  draft.apply(DraftEvent::BaseFieldsCaptured { step: 0,
                                               values: values(&[("name", json!("Feria"))]) });
  match m.merge(&draft) {
    Err(WizardError::Merge { field }) => assert_eq!(field, "date_debut"),
    other => panic!("expected merge error, got {:?}", other.map(|_| ())),
  }
}

#[test]
fn iso_datetime_in_payload_is_truncated_to_date() {
  let mut draft = Draft::new("name", "date_debut");
  draft.apply(DraftEvent::BaseFieldsCaptured { step: 0,
                                               values: values(&[("name", json!("Feria"))]) });
  draft.apply(DraftEvent::SubFormFieldsChanged(values(&[("date_debut", json!("2024-03-05T10:00:00Z"))])));
  let m = merger(&[("name", FieldType::Text), ("date_debut", FieldType::Date)]);
  let payload = m.merge(&draft).expect("merge");
  assert_eq!(payload.get("date_debut"), Some(&json!("2024-03-05")));
}

#[test]
fn discriminant_switch_clears_subform_snapshot() {
  let mut draft = Draft::new("name", "date_debut");
  draft.apply(DraftEvent::DiscriminantChanged("salon".to_string()));
  draft.apply(DraftEvent::SubFormFieldsChanged(values(&[("foo", json!(1))])));
  draft.apply(DraftEvent::DiscriminantChanged("seminaire".to_string()));
  assert!(draft.subform().is_empty(), "no leakage across discriminants");
  // re-selecting the same discriminant keeps the snapshot
  draft.apply(DraftEvent::SubFormFieldsChanged(values(&[("theme", json!("agro"))])));
  draft.apply(DraftEvent::DiscriminantChanged("seminaire".to_string()));
  assert_eq!(draft.subform().get("theme"), Some(&json!("agro")));
}

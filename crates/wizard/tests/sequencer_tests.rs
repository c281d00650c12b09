use serde_json::json;
use wizard::domain::FieldMap;
use wizard::draft::Draft;
use wizard::schema::{CrossRule, FieldDecl, FieldType, StepSchema, MSG_DATE_ORDER, MSG_REQUIRED};
use wizard::sequencer::StepSequencer;
use wizard::WizardError;

fn steps() -> Vec<StepSchema> {
  vec![StepSchema::new("identificacion",
                       vec![FieldDecl::required("name", FieldType::Text),
                            FieldDecl::required("type", FieldType::Enum),
                            FieldDecl::optional("description", FieldType::Text)],
                       vec![]),
       StepSchema::new("planificacion",
                       vec![FieldDecl::optional("date_debut", FieldType::Date),
                            FieldDecl::optional("date_fin", FieldType::Date),
                            FieldDecl::optional("responsable_id", FieldType::Reference)],
                       vec![CrossRule::DateOrder { start: "date_debut".into(),
                                                   end: "date_fin".into() }]),
       StepSchema::new("suivi",
                       vec![FieldDecl::optional("statut", FieldType::Text),
                            FieldDecl::optional("confirme", FieldType::Boolean)],
                       vec![])]
}

fn values(pairs: &[(&str, serde_json::Value)]) -> FieldMap {
  let mut m = FieldMap::new();
  for (k, v) in pairs {
    m.insert(k.to_string(), v.clone());
  }
  m
}

#[test]
fn next_blocks_when_required_field_missing() {
  let mut seq = StepSequencer::new(steps());
  let mut draft = Draft::new("name", "date_debut");
  // name present but type missing: the transition must not happen
  let res = seq.next(&mut draft, &values(&[("name", json!("Feria"))]));
  match res {
    Err(WizardError::Validation(errors)) => {
      let fields: Vec<&str> = errors.fields().collect();
      assert_eq!(fields, vec!["type"]);
      assert_eq!(errors.messages("type").unwrap(), &[MSG_REQUIRED.to_string()]);
    }
    other => panic!("expected validation failure, got {:?}", other.map(|_| ())),
  }
  assert_eq!(seq.current(), 0, "step index must be unchanged on failure");
  assert!(draft.step_snapshots().is_empty());
}

#[test]
fn next_captures_validated_values_and_advances() {
  let mut seq = StepSequencer::new(steps());
  let mut draft = Draft::new("name", "date_debut");
  seq.next(&mut draft, &values(&[("name", json!("Feria")), ("type", json!("salon"))]))
     .expect("step 0 valid");
  assert_eq!(seq.current(), 1);
  let snap = draft.step_snapshots().get(&0).expect("snapshot 0");
  assert_eq!(snap.get("name"), Some(&json!("Feria")));
  // base accumulates the validated step values
  assert_eq!(draft.base().get("name"), Some(&json!("Feria")));
}

#[test]
fn equal_dates_pass_and_earlier_end_fails() {
  let mut seq = StepSequencer::new(steps());
  let mut draft = Draft::new("name", "date_debut");
  seq.next(&mut draft, &values(&[("name", json!("Feria")), ("type", json!("salon"))]))
     .expect("step 0");

  // end == start: inclusive rule, must pass
  let same = values(&[("date_debut", json!("2024-06-01")), ("date_fin", json!("2024-06-01"))]);
  assert!(seq.validate_step(&same).is_ok(), "same-day end date must pass");

  // end one day before start: must fail with the documented message
  let inverted = values(&[("date_debut", json!("2024-06-01")), ("date_fin", json!("2024-05-31"))]);
  let errors = seq.validate_step(&inverted).expect_err("inverted dates must fail");
  assert_eq!(errors.messages("date_fin").unwrap(), &[MSG_DATE_ORDER.to_string()]);
}

#[test]
fn back_keeps_captured_snapshots() {
  let mut seq = StepSequencer::new(steps());
  let mut draft = Draft::new("name", "date_debut");
  seq.next(&mut draft, &values(&[("name", json!("Feria")), ("type", json!("salon"))]))
     .expect("step 0");
  seq.back();
  assert_eq!(seq.current(), 0);
  assert!(draft.step_snapshots().contains_key(&0), "back must not discard snapshots");
  // back at step 0 saturates
  seq.back();
  assert_eq!(seq.current(), 0);
}

#[test]
fn final_step_refuses_next() {
  let mut seq = StepSequencer::new(steps());
  let mut draft = Draft::new("name", "date_debut");
  seq.next(&mut draft, &values(&[("name", json!("Feria")), ("type", json!("salon"))]))
     .expect("step 0");
  seq.next(&mut draft, &values(&[("date_debut", json!("2024-06-01"))])).expect("step 1");
  assert!(seq.is_final());
  let res = seq.next(&mut draft, &FieldMap::new());
  assert!(res.is_err(), "next from the terminal step must be refused");
  assert_eq!(seq.current(), 2);
}

#[test]
fn capturing_anchor_field_updates_anchor_date() {
  let mut seq = StepSequencer::new(steps());
  let mut draft = Draft::new("name", "date_debut");
  seq.next(&mut draft, &values(&[("name", json!("Feria")), ("type", json!("salon"))]))
     .expect("step 0");
  seq.next(&mut draft, &values(&[("date_debut", json!("2024-06-01"))])).expect("step 1");
  let anchor = draft.anchor_date().expect("anchor set from captured step");
  assert_eq!(anchor.to_string(), "2024-06-01");
}

#[test]
fn reference_values_are_coerced_to_integers() {
  let mut seq = StepSequencer::new(steps());
  let mut draft = Draft::new("name", "date_debut");
  seq.next(&mut draft, &values(&[("name", json!("Feria")), ("type", json!("salon"))]))
     .expect("step 0");
  let validated = seq.validate_step(&values(&[("responsable_id", json!("7"))]))
                     .expect("reference as numeric string is valid");
  assert_eq!(validated.get("responsable_id"), Some(&json!(7)));
}

use crm_forms::{ActionForm, FormError, FormEvent, FormFactory, FormMode, InviteForm, SubForm};
use crm_domain::ActionType;
use crm_gateway::{GatewayConfig, MemoryBackend};
use crm_lookups::{LookupKind, LookupState, StaticLookupProvider};
use serde_json::json;
use wizard::domain::FieldMap;
use wizard::gateway::PersistenceGateway;
use wizard::stubs::InMemoryGateway;
use wizard::{GatewayError, ValidationErrors, WizardError};

fn values(pairs: &[(&str, serde_json::Value)]) -> FieldMap {
  let mut m = FieldMap::new();
  for (k, v) in pairs {
    m.insert(k.to_string(), v.clone());
  }
  m
}

/// Builds a salon form with its four required subform fields filled.
fn salon_form() -> ActionForm {
  let mut form = FormFactory::create(ActionType::Salon).expect("create form");
  for (key, value) in [("intitule", json!("Stand collectif")),
                       ("pays_id", json!("1")),
                       ("initiateur_id", json!(2)),
                       ("binome_id", json!(1))] {
    form.apply(FormEvent::SubFormFieldChanged { key: key.to_string(),
                                                value })
        .expect("set subform field");
  }
  form
}

#[test]
fn salon_end_to_end_create() {
  let gateway = InMemoryGateway::new();
  let mut form = salon_form();

  form.next(&values(&[("name", json!("Trade Fair")), ("type", json!("salon"))]))
      .expect("step identification");
  form.next(&values(&[("date_debut", json!("2024-06-01"))])).expect("step planification");
  assert!(form.is_final_step());

  let record = form.submit(&gateway, &FieldMap::new()).expect("submit");
  assert_eq!(gateway.record_count(), 1, "exactly one create call");

  assert_eq!(record.get("name"), Some(&json!("Trade Fair")));
  assert_eq!(record.get("type"), Some(&json!("salon")));
  assert_eq!(record.get("date_debut"), Some(&json!("2024-06-01")));
  assert_eq!(record.get("intitule"), Some(&json!("Stand collectif")));
  assert_eq!(record.get("pays_id"), Some(&json!(1)));
  assert_eq!(record.get("initiateur_id"), Some(&json!(2)));
  assert_eq!(record.get("binome_id"), Some(&json!(1)));
  // every declared boolean flag defaults to explicit 0
  assert_eq!(record.get("stand_reserve"), Some(&json!(0)));
  assert_eq!(record.get("confirme"), Some(&json!(0)));
  assert_eq!(record.get("annule"), Some(&json!(0)));
}

#[test]
fn missing_date_debut_blocks_submit_before_network() {
  let gateway = InMemoryGateway::new();
  let mut form = salon_form();

  form.next(&values(&[("name", json!("Trade Fair")), ("type", json!("salon"))]))
      .expect("step identification");
  form.next(&FieldMap::new()).expect("step planification without date");

  match form.submit(&gateway, &FieldMap::new()) {
    Err(FormError::Wizard(WizardError::Merge { field })) => assert_eq!(field, "date_debut"),
    other => panic!("expected merge failure on date_debut, got {:?}", other.map(|_| ())),
  }
  assert_eq!(gateway.record_count(), 0, "no create call may happen");
}

#[test]
fn discriminant_switch_clears_subform_state() {
  let mut form = FormFactory::create(ActionType::Salon).expect("create");
  form.apply(FormEvent::SubFormFieldChanged { key: "intitule".to_string(),
                                              value: json!("Feria") })
      .expect("set field");
  assert_eq!(form.draft().subform().get("intitule"), Some(&json!("Feria")));

  form.apply(FormEvent::DiscriminantChanged(ActionType::Seminaire)).expect("switch type");
  assert_eq!(form.subform().action_type(), ActionType::Seminaire);
  assert!(!form.draft().subform().contains_key("intitule"), "no leakage from the previous type");

  // switching back does not resurrect the old snapshot either
  form.apply(FormEvent::DiscriminantChanged(ActionType::Salon)).expect("switch back");
  assert!(!form.draft().subform().contains_key("intitule"));
}

#[test]
fn anchor_date_overwrites_bound_subform_field() {
  let mut form = FormFactory::create(ActionType::Salon).expect("create");
  let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).expect("date");
  form.apply(FormEvent::AnchorDateChanged(Some(date))).expect("anchor event");
  assert_eq!(form.draft().subform().get("date_debut"), Some(&json!("2024-06-01")));

  // capturing a different date at the planning step re-propagates it
  form.next(&values(&[("name", json!("Feria")), ("type", json!("salon"))])).expect("step 0");
  form.next(&values(&[("date_debut", json!("2024-07-15"))])).expect("step 1");
  assert_eq!(form.draft().subform().get("date_debut"), Some(&json!("2024-07-15")));
}

#[test]
fn subform_required_fields_gate_the_submit() {
  let gateway = InMemoryGateway::new();
  let mut form = FormFactory::create(ActionType::Salon).expect("create");
  form.next(&values(&[("name", json!("Feria")), ("type", json!("salon"))])).expect("step 0");
  form.next(&values(&[("date_debut", json!("2024-06-01"))])).expect("step 1");

  match form.submit(&gateway, &FieldMap::new()) {
    Err(FormError::Wizard(WizardError::Validation(errors))) => {
      let fields: Vec<&str> = errors.fields().collect();
      assert!(fields.contains(&"intitule"));
      assert!(fields.contains(&"pays_id"));
    }
    other => panic!("expected subform validation failure, got {:?}", other.map(|_| ())),
  }
  assert_eq!(gateway.record_count(), 0);
}

#[test]
fn server_validation_preserves_draft_for_retry() {
  let gateway = InMemoryGateway::new();
  let mut form = salon_form();
  form.next(&values(&[("name", json!("Feria")), ("type", json!("salon"))])).expect("step 0");
  form.next(&values(&[("date_debut", json!("2024-06-01"))])).expect("step 1");

  gateway.reject_next(GatewayError::Validation(ValidationErrors::single("name", "ce nom est déjà utilisé")));
  match form.submit(&gateway, &FieldMap::new()) {
    Err(FormError::Gateway(GatewayError::Validation(errors))) => {
      assert_eq!(format!("{}", errors), "name: ce nom est déjà utilisé");
    }
    other => panic!("expected server validation, got {:?}", other.map(|_| ())),
  }
  // draft and step survive: the retry succeeds without re-entering steps
  assert!(form.is_final_step());
  assert!(!form.is_submitting());
  assert_eq!(form.draft().base().get("name"), Some(&json!("Feria")));
  form.submit(&gateway, &FieldMap::new()).expect("retry succeeds");
  assert_eq!(gateway.record_count(), 1);
}

#[test]
fn transport_failure_is_retryable() {
  let gateway = InMemoryGateway::new();
  let mut form = salon_form();
  form.next(&values(&[("name", json!("Feria")), ("type", json!("salon"))])).expect("step 0");
  form.next(&values(&[("date_debut", json!("2024-06-01"))])).expect("step 1");

  gateway.reject_next(GatewayError::Transport("connexion interrompue".to_string()));
  match form.submit(&gateway, &FieldMap::new()) {
    Err(FormError::Gateway(GatewayError::Transport(_))) => {}
    other => panic!("expected transport failure, got {:?}", other.map(|_| ())),
  }
  assert!(!form.is_submitting());
  form.submit(&gateway, &FieldMap::new()).expect("manual retry");
}

#[test]
fn edit_mode_seeds_base_and_subform_from_record() {
  let gateway = MemoryBackend::new(GatewayConfig { base_url: "memory://test".to_string(),
                                                   bearer_token: None });
  let stored = gateway.create(&values(&[("name", json!("Salon du textile")),
                                        ("type", json!("salon")),
                                        ("date_debut", json!("2024-06-01")),
                                        ("intitule", json!("Stand collectif")),
                                        ("pays_id", json!("3")),
                                        ("initiateur_id", json!(1)),
                                        ("binome_id", json!(2)),
                                        ("stand_reserve", json!(1))]))
                      .expect("seed record");

  let form = FormFactory::load(&gateway, stored.id).expect("load for edit");
  assert_eq!(form.mode(), FormMode::Edit { id: stored.id });
  assert_eq!(form.current_step(), 0);
  assert_eq!(form.draft().base().get("name"), Some(&json!("Salon du textile")));
  assert_eq!(form.draft().anchor_date().map(|d| d.to_string()), Some("2024-06-01".to_string()));
  // the sub-record was copied verbatim into the snapshot
  assert_eq!(form.draft().subform().get("pays_id"), Some(&json!("3")));
  assert_eq!(form.draft().subform().get("stand_reserve"), Some(&json!(1)));
  // and interpreted into the typed subform
  let typed = form.subform().snapshot().expect("typed snapshot");
  assert_eq!(typed.get("pays_id"), Some(&json!(3)));
  assert_eq!(typed.get("stand_reserve"), Some(&json!(true)));

  // walking the steps again and submitting issues an update on the same id
  let mut form = form;
  form.next(&values(&[("name", json!("Salon du textile 2024")), ("type", json!("salon"))]))
      .expect("step 0");
  form.next(&values(&[("date_debut", json!("2024-07-01"))])).expect("step 1");
  let updated = form.submit(&gateway, &FieldMap::new()).expect("update");
  assert_eq!(updated.id, stored.id);
  assert_eq!(updated.get("name"), Some(&json!("Salon du textile 2024")));
  assert_eq!(updated.get("date_debut"), Some(&json!("2024-07-01")));
  assert_eq!(updated.get("intitule"), Some(&json!("Stand collectif")));
  assert_eq!(updated.get("pays_id"), Some(&json!(3)));
}

#[test]
fn participation_mode_is_normalized_to_wire_casing() {
  let mut form = FormFactory::create(ActionType::Salon).expect("create");
  form.apply(FormEvent::SubFormFieldChanged { key: "mode_participation".to_string(),
                                              value: json!("exposant") })
      .expect("set mode");
  assert_eq!(form.draft().subform().get("mode_participation"), Some(&json!("Exposant")));
}

#[test]
fn unknown_subform_field_is_rejected() {
  let mut form = FormFactory::create(ActionType::Salon).expect("create");
  match form.apply(FormEvent::SubFormFieldChanged { key: "foo".to_string(),
                                                    value: json!(1) }) {
    Err(FormError::Validation(msg)) => assert!(msg.contains("foo")),
    other => panic!("expected validation, got {:?}", other),
  }
}

#[test]
fn mounted_lookups_follow_the_active_subform() {
  let provider = StaticLookupProvider::new();
  let salon = FormFactory::create(ActionType::Salon).expect("salon");
  let states = FormFactory::mount_lookups(&provider, &salon);
  match states.get(&LookupKind::Countries) {
    Some(LookupState::Ready(items)) => assert!(!items.is_empty()),
    other => panic!("expected countries ready, got {:?}", other),
  }

  let conference = FormFactory::create(ActionType::Conference).expect("conference");
  assert!(FormFactory::mount_lookups(&provider, &conference).is_empty());
}

#[test]
fn invite_form_mirrors_the_protocol() {
  let gateway = InMemoryGateway::new();
  let mut form = InviteForm::new();

  // email is required at the identity step
  let res = form.next(&values(&[("nom", json!("Durand"))]));
  assert!(res.is_err());
  assert_eq!(form.current_step(), 0);

  form.next(&values(&[("nom", json!("Durand")), ("email", json!("durand@example.com"))]))
      .expect("identity step");
  assert!(form.is_final_step());

  let record = form.submit(&gateway,
                           &values(&[("date_invitation", json!("2024-05-01")),
                                     ("action_id", json!("4"))]))
                   .expect("submit invite");
  assert_eq!(record.get("nom"), Some(&json!("Durand")));
  assert_eq!(record.get("date_invitation"), Some(&json!("2024-05-01")));
  assert_eq!(record.get("action_id"), Some(&json!(4)));
}

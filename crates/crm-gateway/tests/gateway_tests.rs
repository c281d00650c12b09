use crm_gateway::{new_from_env, stamped_filename, GatewayConfig, MemoryBackend};
use serde_json::json;
use wizard::domain::FieldMap;
use wizard::gateway::{AttachmentStore, PersistenceGateway};
use wizard::GatewayError;

fn backend() -> MemoryBackend {
  MemoryBackend::new(GatewayConfig { base_url: "memory://test".to_string(),
                                     bearer_token: None })
}

fn payload(name: &str, date: &str) -> FieldMap {
  let mut m = FieldMap::new();
  m.insert("name".to_string(), json!(name));
  m.insert("date_debut".to_string(), json!(date));
  m
}

#[test]
fn contract_rejects_missing_required_fields() {
  let gw = backend();
  let mut p = FieldMap::new();
  p.insert("name".to_string(), json!(""));
  match gw.create(&p) {
    Err(GatewayError::Validation(errors)) => {
      let fields: Vec<&str> = errors.fields().collect();
      assert_eq!(fields, vec!["name", "date_debut"]);
      assert_eq!(errors.messages("name").unwrap(), &["le champ name est obligatoire".to_string()]);
    }
    other => panic!("expected server validation, got {:?}", other.map(|_| ())),
  }
  // nothing was stored
  assert!(gw.fetch(1).is_err());
}

#[test]
fn create_fetch_update_roundtrip() {
  let gw = backend();
  let created = gw.create(&payload("Salon du textile", "2024-06-01")).expect("create");
  assert_eq!(created.id, 1);
  assert_eq!(created.get("id"), Some(&json!(1)));

  let fetched = gw.fetch(created.id).expect("fetch");
  assert_eq!(fetched.get("name"), Some(&json!("Salon du textile")));

  let updated = gw.update(created.id, &payload("Salon du textile 2024", "2024-06-02"))
                  .expect("update");
  assert_eq!(updated.get("name"), Some(&json!("Salon du textile 2024")));
  assert_eq!(updated.get("date_debut"), Some(&json!("2024-06-02")));
}

#[test]
fn update_unknown_record_is_not_found() {
  let gw = backend();
  match gw.update(99, &payload("X", "2024-01-01")) {
    Err(GatewayError::NotFound(_)) => {}
    other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
  }
}

#[test]
fn stamped_filename_embeds_timestamp() {
  let at = chrono::DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z").expect("ts").with_timezone(&chrono::Utc);
  assert_eq!(stamped_filename("programme.pdf", at), "programme_20240601120000.pdf");
  assert_eq!(stamped_filename("rapport", at), "rapport_20240601120000");
}

#[test]
fn attachment_must_be_pdf_and_survives_update() {
  let gw = backend();
  let record = gw.create(&payload("Délégation Maroc", "2024-09-10")).expect("create");

  match gw.put(record.id, "photo.png", b"...") {
    Err(GatewayError::Validation(errors)) => {
      assert!(errors.messages("document").is_some());
    }
    other => panic!("expected validation, got {:?}", other.map(|_| ())),
  }

  let key = gw.put(record.id, "programme.pdf", b"%PDF-1.4").expect("put pdf");
  assert!(key.starts_with(&format!("{}/programme_", record.id)));
  assert!(key.ends_with(".pdf"));
  assert_eq!(gw.get(&key).expect("get"), b"%PDF-1.4".to_vec());

  // the document reference survives an update that does not carry one
  let updated = gw.update(record.id, &payload("Délégation Maroc", "2024-09-10")).expect("update");
  let doc = updated.get("document").expect("document kept");
  assert!(doc.get("fichier").and_then(|v| v.as_str()).unwrap().starts_with("programme_"));
}

#[test]
fn env_construction_falls_back_to_memory() {
  let gw = new_from_env().expect("gateway from env");
  let created = gw.create(&payload("Mission", "2025-01-15")).expect("create");
  assert_eq!(created.id, 1);
}

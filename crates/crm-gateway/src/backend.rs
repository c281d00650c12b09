// backend.rs
//
// Implementación en memoria de la pasarela. Reproduce el contrato del
// backend REST del CRM: asigna ids, re-valida los campos obligatorios
// del payload (los mensajes de rechazo llegan en el idioma del backend),
// y guarda los adjuntos con el nombre ya estampado. No es durable; las
// builds de producción sustituyen esta pieza por el cliente HTTP del
// shell de la aplicación.
use crate::attachments::{ensure_pdf, stamped_filename};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use wizard::domain::{is_empty_value, FieldMap, StoredRecord};
use wizard::errors::{GatewayError, ValidationErrors};
use wizard::gateway::{AttachmentStore, PersistenceGateway};

/// Configuración de la pasarela, inyectada por el entorno.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
  pub base_url: String,
  pub bearer_token: Option<String>,
}

/// Pasarela en memoria con el contrato de validación del backend.
pub struct MemoryBackend {
  config: GatewayConfig,
  records: Mutex<HashMap<i64, FieldMap>>,
  attachments: Mutex<HashMap<String, Vec<u8>>>,
  next_id: Mutex<i64>,
}

impl MemoryBackend {
  pub fn new(config: GatewayConfig) -> Self {
    log::info!("pasarela inicializada contra {}", config.base_url);
    Self { config,
           records: Mutex::new(HashMap::new()),
           attachments: Mutex::new(HashMap::new()),
           next_id: Mutex::new(1) }
  }

  pub fn config(&self) -> &GatewayConfig {
    &self.config
  }

  /// Helper para mapear `Mutex::lock()` en un `Result` con
  /// `GatewayError::Other`.
  fn lock<'a, T>(&'a self, m: &'a Mutex<T>) -> Result<MutexGuard<'a, T>, GatewayError> {
    m.lock().map_err(|e| GatewayError::Other(format!("mutex poisoned: {:?}", e)))
  }

  /// Vuelca todos los registros, ordenados por id. Pensado para el menú
  /// de demostración y depuración.
  pub fn list(&self) -> Result<Vec<StoredRecord>, GatewayError> {
    let records = self.lock(&self.records)?;
    let mut out: Vec<StoredRecord> = records.iter()
                                            .map(|(id, fields)| StoredRecord { id: *id,
                                                                               fields: fields.clone() })
                                            .collect();
    out.sort_by_key(|r| r.id);
    Ok(out)
  }

  /// Contrato del backend: re-valida los obligatorios aunque el cliente
  /// ya lo haya hecho. Los mensajes son los literales del servidor.
  fn contract_check(payload: &FieldMap) -> Result<(), GatewayError> {
    let mut errors = ValidationErrors::new();
    if is_empty_value(payload.get("name")) {
      errors.add("name", "le champ name est obligatoire");
    }
    if is_empty_value(payload.get("date_debut")) {
      errors.add("date_debut", "le champ date_debut est obligatoire");
    }
    if errors.is_empty() {
      Ok(())
    } else {
      Err(GatewayError::Validation(errors))
    }
  }
}

impl PersistenceGateway for MemoryBackend {
  /// `POST /actions`: valida el contrato, asigna id y persiste.
  fn create(&self, payload: &FieldMap) -> Result<StoredRecord, GatewayError> {
    Self::contract_check(payload)?;
    let mut next = self.lock(&self.next_id)?;
    let id = *next;
    *next += 1;
    drop(next);

    let mut fields = payload.clone();
    fields.insert("id".to_string(), JsonValue::Number(id.into()));
    self.lock(&self.records)?.insert(id, fields.clone());
    log::info!("acción {} creada en {}", id, self.config.base_url);
    Ok(StoredRecord { id, fields })
  }

  /// `PUT /actions/{id}`: reemplaza el registro. El adjunto existente
  /// sobrevive si el payload no trae uno nuevo.
  fn update(&self, id: i64, payload: &FieldMap) -> Result<StoredRecord, GatewayError> {
    Self::contract_check(payload)?;
    let mut records = self.lock(&self.records)?;
    let previous = records.get(&id)
                          .cloned()
                          .ok_or(GatewayError::NotFound(format!("action {}", id)))?;

    let mut fields = payload.clone();
    fields.insert("id".to_string(), JsonValue::Number(id.into()));
    if !fields.contains_key("document") {
      if let Some(doc) = previous.get("document") {
        fields.insert("document".to_string(), doc.clone());
      }
    }
    records.insert(id, fields.clone());
    log::info!("acción {} actualizada", id);
    Ok(StoredRecord { id, fields })
  }

  fn fetch(&self, id: i64) -> Result<StoredRecord, GatewayError> {
    let records = self.lock(&self.records)?;
    records.get(&id)
           .map(|fields| StoredRecord { id, fields: fields.clone() })
           .ok_or(GatewayError::NotFound(format!("action {}", id)))
  }
}

impl AttachmentStore for MemoryBackend {
  /// Sube el único PDF del registro. El nombre almacenado incrusta la
  /// marca temporal y queda referenciado en el campo `document` del
  /// registro, con el contenido embebido en base64 como en el envío
  /// multipart original.
  fn put(&self, record_id: i64, filename: &str, blob: &[u8]) -> Result<String, GatewayError> {
    ensure_pdf(filename)?;
    let stamped = stamped_filename(filename, Utc::now());
    let key = format!("{}/{}", record_id, stamped);

    let mut records = self.lock(&self.records)?;
    let record = records.get_mut(&record_id)
                        .ok_or(GatewayError::NotFound(format!("action {}", record_id)))?;
    record.insert("document".to_string(),
                  json!({ "fichier": stamped, "contenu": BASE64.encode(blob) }));
    drop(records);

    self.lock(&self.attachments)?.insert(key.clone(), blob.to_vec());
    log::info!("adjunto {} almacenado", key);
    Ok(key)
  }

  fn get(&self, key: &str) -> Result<Vec<u8>, GatewayError> {
    self.lock(&self.attachments)?
        .get(key)
        .cloned()
        .ok_or(GatewayError::NotFound(format!("adjunto {}", key)))
  }
}

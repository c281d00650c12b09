// Archivo: stubs.rs
// Propósito: implementaciones en memoria para pruebas y wiring rápido.
//
// Incluye una pasarela en memoria (`InMemoryGateway`) que asigna ids,
// guarda los payloads tal cual y permite inyectar el próximo fallo para
// ejercitar los caminos de error de validación del servidor y de
// transporte. No es durable.
use crate::domain::{FieldMap, StoredRecord};
use crate::errors::GatewayError;
use crate::gateway::{AttachmentStore, PersistenceGateway};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Pasarela en memoria para pruebas locales y ejemplos.
pub struct InMemoryGateway {
    records: Mutex<HashMap<i64, FieldMap>>,
    attachments: Mutex<HashMap<String, Vec<u8>>>,
    next_id: Mutex<i64>,
    /// Fallo inyectado que consumirá la próxima operación de escritura.
    reject_next: Mutex<Option<GatewayError>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self { records: Mutex::new(HashMap::new()),
               attachments: Mutex::new(HashMap::new()),
               next_id: Mutex::new(1),
               reject_next: Mutex::new(None) }
    }

    /// Helper para mapear `Mutex::lock()` en un `Result` con
    /// `GatewayError::Other`.
    fn lock<'a, T>(&'a self, m: &'a Mutex<T>) -> Result<MutexGuard<'a, T>, GatewayError> {
        m.lock().map_err(|e| GatewayError::Other(format!("mutex poisoned: {:?}", e)))
    }

    /// Programa el fallo que devolverá la próxima llamada a `create` o
    /// `update` (y se consume al devolverse).
    pub fn reject_next(&self, error: GatewayError) {
        if let Ok(mut slot) = self.reject_next.lock() {
            *slot = Some(error);
        }
    }

    /// Número de registros almacenados.
    pub fn record_count(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    fn take_rejection(&self) -> Result<(), GatewayError> {
        let mut slot = self.lock(&self.reject_next)?;
        match slot.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl PersistenceGateway for InMemoryGateway {
    /// Asigna un id creciente y guarda el payload tal cual.
    fn create(&self, payload: &FieldMap) -> Result<StoredRecord, GatewayError> {
        self.take_rejection()?;
        let mut next = self.lock(&self.next_id)?;
        let id = *next;
        *next += 1;
        self.lock(&self.records)?.insert(id, payload.clone());
        Ok(StoredRecord { id, fields: payload.clone() })
    }

    /// Reemplaza el registro existente. `NotFound` si el id no existe.
    fn update(&self, id: i64, payload: &FieldMap) -> Result<StoredRecord, GatewayError> {
        self.take_rejection()?;
        let mut records = self.lock(&self.records)?;
        if !records.contains_key(&id) {
            return Err(GatewayError::NotFound(format!("registro {}", id)));
        }
        records.insert(id, payload.clone());
        Ok(StoredRecord { id, fields: payload.clone() })
    }

    fn fetch(&self, id: i64) -> Result<StoredRecord, GatewayError> {
        let records = self.lock(&self.records)?;
        records.get(&id)
               .map(|fields| StoredRecord { id, fields: fields.clone() })
               .ok_or(GatewayError::NotFound(format!("registro {}", id)))
    }
}

impl AttachmentStore for InMemoryGateway {
    /// Guarda el blob bajo `{record_id}/{filename}` sin estampado; el
    /// estampado temporal es responsabilidad de la pasarela concreta.
    fn put(&self, record_id: i64, filename: &str, blob: &[u8]) -> Result<String, GatewayError> {
        let key = format!("{}/{}", record_id, filename);
        self.lock(&self.attachments)?.insert(key.clone(), blob.to_vec());
        Ok(key)
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, GatewayError> {
        self.lock(&self.attachments)?
            .get(key)
            .cloned()
            .ok_or(GatewayError::NotFound(format!("adjunto {}", key)))
    }
}

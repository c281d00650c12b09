// Archivo: gateway.rs
// Propósito: definir el trait `PersistenceGateway` y el trait auxiliar
// `AttachmentStore`. Describe el contrato que deben implementar las
// pasarelas concretas (backend REST, in-memory, etc.).
use crate::domain::{FieldMap, StoredRecord};
use crate::errors::GatewayError;

/// Contrato mínimo de la pasarela de persistencia.
///
/// El caller entrega un payload plano ya fusionado y normalizado; la
/// pasarela devuelve el registro creado/actualizado o un error
/// estructurado. Ambas operaciones son idempotentes desde la perspectiva
/// del caller sólo en éxito; los reintentos en fallo son responsabilidad
/// del caller y nunca automáticos.
pub trait PersistenceGateway: Send + Sync {
    /// `POST /actions` — crea un registro y devuelve su forma persistida.
    fn create(&self, payload: &FieldMap) -> Result<StoredRecord, GatewayError>;

    /// `PUT /actions/{id}` — reemplaza el registro identificado.
    fn update(&self, id: i64, payload: &FieldMap) -> Result<StoredRecord, GatewayError>;

    /// `GET /actions/{id}` — recupera el registro para siembra en modo
    /// edición.
    fn fetch(&self, id: i64) -> Result<StoredRecord, GatewayError>;
}

/// Almacén de adjuntos (un PDF por registro en los tipos que lo admiten).
pub trait AttachmentStore: Send + Sync {
    /// Almacena el blob asociado a un registro y devuelve la clave de
    /// recuperación (el nombre ya estampado con marca temporal).
    fn put(&self, record_id: i64, filename: &str, blob: &[u8]) -> Result<String, GatewayError>;

    /// Recupera el blob por clave.
    fn get(&self, key: &str) -> Result<Vec<u8>, GatewayError>;
}

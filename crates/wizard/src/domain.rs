// Archivo: domain.rs
// Propósito: tipos de datos compartidos por el asistente: el mapa plano de
// campos que viaja hacia el backend y el registro persistido que éste
// devuelve.
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Mapa plano `clave -> valor` usado para snapshots de paso, snapshot del
/// sub-formulario y el payload saliente. Las claves son los nombres de
/// campo del contrato wire del backend.
pub type FieldMap = serde_json::Map<String, JsonValue>;

/// Registro ya persistido por el backend.
///
/// El backend asigna el identificador numérico; `fields` es la forma
/// plana del registro tal como la devuelve `GET /actions/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: i64,
    pub fields: FieldMap,
}

impl StoredRecord {
    /// Lectura ergonómica de un campo del registro.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.fields.get(key)
    }
}

/// Determina si un valor cuenta como "vacío" para reglas de requerido y
/// para la precedencia de fusión (ausente, null o cadena vacía).
pub fn is_empty_value(value: Option<&JsonValue>) -> bool {
    match value {
        None | Some(JsonValue::Null) => true,
        Some(JsonValue::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

// Archivo: errors.rs
// Propósito: definir los errores del asistente multi-paso y el alias
// Result<T> usado por las APIs del crate. Los comentarios y variantes
// están en español.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Mapa ordenado de campo -> mensajes de validación.
///
/// Se usa tanto para fallos de validación del lado cliente (gate de paso)
/// como para los errores estructurados que devuelve el backend. El orden
/// de inserción se preserva para que el primer campo reportado sea
/// estable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrors(IndexMap<String, Vec<String>>);

impl ValidationErrors {
    /// Crea un mapa vacío.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Crea un mapa con un único campo y mensaje.
    pub fn single(field: &str, message: &str) -> Self {
        let mut e = Self::new();
        e.add(field, message);
        e
    }

    /// Añade un mensaje para un campo (acumula si ya existe).
    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Campos reportados, en orden de inserción.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    /// Mensajes de un campo concreto, si los hay.
    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(|v| v.as_slice())
    }
}

impl fmt::Display for ValidationErrors {
    /// Une todos los mensajes en una sola línea para notificación al
    /// usuario: `campo: mensaje; campo: mensaje`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.0
                         .iter()
                         .map(|(k, msgs)| format!("{}: {}", k, msgs.join(", ")))
                         .collect::<Vec<_>>()
                         .join("; ");
        write!(f, "{}", joined)
    }
}

/// Errores de la pasarela de persistencia (backend REST).
///
/// - `Validation`: el backend rechazó el payload con errores por campo.
/// - `NotFound`: el registro no existe.
/// - `Transport`: fallo de red o 5xx; reintentable por el usuario.
/// - `Other`: cualquier otro error.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Errores de validación por campo devueltos por el backend.
    #[error("Validación del servidor: {0}")]
    Validation(ValidationErrors),
    /// Registro no encontrado.
    #[error("No encontrado: {0}")]
    NotFound(String),
    /// Fallo de transporte (red, 5xx). No se reintenta automáticamente.
    #[error("Error de transporte: {0}")]
    Transport(String),
    /// Otro tipo de error.
    #[error("Otro: {0}")]
    Other(String),
}

/// Errores del asistente multi-paso.
#[derive(Error, Debug)]
pub enum WizardError {
    /// El paso actual no pasó la validación; la transición se bloquea.
    #[error("Validación de paso: {0}")]
    Validation(ValidationErrors),
    /// Invariante de fusión violado: falta el primer campo requerido.
    #[error("Campo requerido ausente en el payload: {field}")]
    Merge { field: String },
    /// Errores propagados desde la pasarela de persistencia.
    #[error("Error de pasarela: {0}")]
    Gateway(#[from] GatewayError),
    /// Otro tipo de error.
    #[error("Otro: {0}")]
    Other(String),
}

/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, WizardError>;

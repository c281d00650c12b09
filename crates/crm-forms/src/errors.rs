use thiserror::Error;

// Errores comunes de la capa de formularios.
//
// Este enum centraliza los errores que pueden ocurrir durante la
// composición de un formulario: errores del asistente genérico
// (`WizardError`), errores del dominio (`DomainError`), errores de la
// pasarela y errores de serialización.
#[derive(Error, Debug)]
pub enum FormError {
  /// Errores originados por la maquinaria genérica del asistente.
  #[error("Error del asistente: {0}")]
  Wizard(#[from] wizard::WizardError),

  /// Errores originados por los tipos del dominio CRM.
  #[error("Error de dominio: {0}")]
  Domain(#[from] crm_domain::DomainError),

  /// Errores devueltos por la pasarela de persistencia.
  #[error("Error de pasarela: {0}")]
  Gateway(#[from] wizard::GatewayError),

  /// Errores de serialización/deserialización JSON.
  #[error("Error de serialización: {0}")]
  Serialization(#[from] serde_json::Error),

  /// Ya hay un envío del borrador en vuelo; el disparador debe
  /// permanecer deshabilitado hasta que se resuelva.
  #[error("Hay un envío en curso para este borrador")]
  SubmissionInFlight,

  /// Errores de validación locales del formulario (clave desconocida,
  /// valor no coercible, envío fuera del paso final).
  #[error("Error de validación: {0}")]
  Validation(String),
}

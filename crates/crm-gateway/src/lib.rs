//! Pasarela de persistencia del CRM para los traits de `wizard`.
//! Este archivo expone la construcción desde el entorno y reexporta la
//! implementación en memoria que cumple el contrato del backend. La
//! implementación detallada está en `backend.rs`.

mod attachments;
mod backend;

pub use attachments::{ensure_pdf, stamped_filename};
pub use backend::{GatewayConfig, MemoryBackend};

use wizard::errors::GatewayError;

/// Construye la pasarela con la configuración del entorno.
///
/// Lee `CRM_API_BASE_URL` y `CRM_API_TOKEN` (vía `.env` si existe); en
/// ausencia de configuración se usa el backend en memoria local, útil
/// para demos y pruebas.
pub fn new_from_env() -> Result<MemoryBackend, GatewayError> {
  dotenvy::dotenv().ok();
  let base_url = std::env::var("CRM_API_BASE_URL").unwrap_or_else(|_| "memory://local".to_string());
  let bearer_token = std::env::var("CRM_API_TOKEN").ok();
  Ok(MemoryBackend::new(GatewayConfig { base_url, bearer_token }))
}

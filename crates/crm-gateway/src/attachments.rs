use chrono::{DateTime, Utc};
use wizard::errors::{GatewayError, ValidationErrors};

/// Nombre almacenado de un adjunto: al subir, el nombre original se
/// renombra incrustando una marca temporal UTC para derrotar el caché en
/// la recuperación (`programme.pdf` -> `programme_20240601120000.pdf`).
pub fn stamped_filename(original: &str, at: DateTime<Utc>) -> String {
  let stamp = at.format("%Y%m%d%H%M%S");
  match original.rsplit_once('.') {
    Some((stem, ext)) => format!("{}_{}.{}", stem, stamp, ext),
    None => format!("{}_{}", original, stamp),
  }
}

/// El contrato de adjuntos admite un único PDF por registro.
pub fn ensure_pdf(filename: &str) -> Result<(), GatewayError> {
  let is_pdf = filename.rsplit_once('.')
                       .map(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
                       .unwrap_or(false);
  if is_pdf {
    Ok(())
  } else {
    Err(GatewayError::Validation(ValidationErrors::single("document", "seul le format PDF est accepté")))
  }
}

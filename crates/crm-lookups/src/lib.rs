//! crm-lookups: listas de referencia consumidas por los sub-formularios
//!
//! Cada sub-formulario declara, por identificador estable, las listas que
//! necesita al montarse (países, sectores, iniciadores, binomios,
//! responsables). Los resultados son pares `{id, display_name}` y llegan
//! de forma asíncrona respecto a la UI, por lo que el estado de carga se
//! representa explícitamente con [`LookupState`].
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identificador estable de una lista de referencia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupKind {
  Countries,
  Sectors,
  Initiators,
  Binomes,
  Responsables,
}

impl LookupKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      LookupKind::Countries => "countries",
      LookupKind::Sectors => "sectors",
      LookupKind::Initiators => "initiators",
      LookupKind::Binomes => "binomes",
      LookupKind::Responsables => "responsables",
    }
  }
}

impl fmt::Display for LookupKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Entrada de una lista de referencia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupItem {
  pub id: i64,
  pub display_name: String,
}

impl LookupItem {
  pub fn new(id: i64, display_name: &str) -> Self {
    Self { id,
           display_name: display_name.to_string() }
  }
}

#[derive(Debug, Error, Clone)]
pub enum LookupError {
  #[error("Lista no disponible: {0}")]
  Unavailable(String),
  #[error("Lista desconocida: {0}")]
  Unknown(String),
}

/// Estado de carga de una lista pendiente de red.
///
/// La UI debe representar `Loading` mientras la petición está en vuelo;
/// los datos son eventualmente consistentes.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupState {
  Loading,
  Ready(Vec<LookupItem>),
  Failed(String),
}

/// Proveedor de listas de referencia.
pub trait LookupProvider: Send + Sync {
  /// Recupera la lista identificada por `kind`.
  fn fetch(&self, kind: LookupKind) -> Result<Vec<LookupItem>, LookupError>;
}

static COUNTRIES: Lazy<Vec<LookupItem>> = Lazy::new(|| {
  vec![LookupItem::new(1, "France"),
       LookupItem::new(2, "Allemagne"),
       LookupItem::new(3, "Espagne"),
       LookupItem::new(4, "Italie"),
       LookupItem::new(5, "Maroc")]
});

static SECTORS: Lazy<Vec<LookupItem>> = Lazy::new(|| {
  vec![LookupItem::new(1, "Agroalimentaire"),
       LookupItem::new(2, "Textile"),
       LookupItem::new(3, "Mécanique"),
       LookupItem::new(4, "Numérique")]
});

static INITIATORS: Lazy<Vec<LookupItem>> =
  Lazy::new(|| vec![LookupItem::new(1, "Chambre de commerce"), LookupItem::new(2, "Partenaire régional")]);

static BINOMES: Lazy<Vec<LookupItem>> =
  Lazy::new(|| vec![LookupItem::new(1, "Binôme export"), LookupItem::new(2, "Binôme sectoriel")]);

static RESPONSABLES: Lazy<Vec<LookupItem>> =
  Lazy::new(|| vec![LookupItem::new(1, "A. Martin"), LookupItem::new(2, "S. Bernard"), LookupItem::new(3, "K. Alaoui")]);

/// Proveedor estático en memoria, pensado para pruebas y para el binario
/// de demostración. No es durable ni configurable por entorno.
pub struct StaticLookupProvider;

impl StaticLookupProvider {
  pub fn new() -> Self {
    Self
  }
}

impl Default for StaticLookupProvider {
  fn default() -> Self {
    Self::new()
  }
}

impl LookupProvider for StaticLookupProvider {
  fn fetch(&self, kind: LookupKind) -> Result<Vec<LookupItem>, LookupError> {
    let items = match kind {
      LookupKind::Countries => COUNTRIES.clone(),
      LookupKind::Sectors => SECTORS.clone(),
      LookupKind::Initiators => INITIATORS.clone(),
      LookupKind::Binomes => BINOMES.clone(),
      LookupKind::Responsables => RESPONSABLES.clone(),
    };
    Ok(items)
  }
}

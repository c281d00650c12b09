use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discriminante cerrado de los tipos de acción comercial.
///
/// Cada variante selecciona exactamente un sub-formulario tipado; el
/// despacho es un `match` exhaustivo, de modo que añadir una variante
/// obliga en compilación a registrar su esquema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
  Salon,
  Seminaire,
  SeminaireSectoriel,
  Delegation,
  Visite,
  Mission,
  Formation,
  Conference,
  Autre,
}

impl ActionType {
  /// Las nueve variantes, en el orden del contrato.
  pub const ALL: [ActionType; 9] = [ActionType::Salon,
                                    ActionType::Seminaire,
                                    ActionType::SeminaireSectoriel,
                                    ActionType::Delegation,
                                    ActionType::Visite,
                                    ActionType::Mission,
                                    ActionType::Formation,
                                    ActionType::Conference,
                                    ActionType::Autre];

  /// Valor wire del discriminante.
  pub fn as_str(&self) -> &'static str {
    match self {
      ActionType::Salon => "salon",
      ActionType::Seminaire => "seminaire",
      ActionType::SeminaireSectoriel => "seminaire_sectoriel",
      ActionType::Delegation => "delegation",
      ActionType::Visite => "visite",
      ActionType::Mission => "mission",
      ActionType::Formation => "formation",
      ActionType::Conference => "conference",
      ActionType::Autre => "autre",
    }
  }
}

impl fmt::Display for ActionType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for ActionType {
  type Err = DomainError;

  /// El conjunto es cerrado: una cadena desconocida es un error de
  /// validación, no un valor comodín.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "salon" => Ok(ActionType::Salon),
      "seminaire" => Ok(ActionType::Seminaire),
      "seminaire_sectoriel" => Ok(ActionType::SeminaireSectoriel),
      "delegation" => Ok(ActionType::Delegation),
      "visite" => Ok(ActionType::Visite),
      "mission" => Ok(ActionType::Mission),
      "formation" => Ok(ActionType::Formation),
      "conference" => Ok(ActionType::Conference),
      "autre" => Ok(ActionType::Autre),
      other => Err(DomainError::ValidationError(format!("tipo de acción desconocido: {}", other))),
    }
  }
}

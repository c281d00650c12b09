use crate::DomainError;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Modalidad de participación en un salón.
///
/// El backend acepta exactamente las formas con mayúscula inicial
/// (`Exposant`, `Visiteur`, `Partenaire`); ese contrato de casing está
/// fijado aquí en `wire_value`, no repartido en transformaciones ad hoc.
/// La entrada admite cualquier casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeParticipation {
  Exposant,
  Visiteur,
  Partenaire,
}

impl ModeParticipation {
  /// Forma exacta que espera el backend.
  pub fn wire_value(&self) -> &'static str {
    match self {
      ModeParticipation::Exposant => "Exposant",
      ModeParticipation::Visiteur => "Visiteur",
      ModeParticipation::Partenaire => "Partenaire",
    }
  }
}

impl fmt::Display for ModeParticipation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.wire_value())
  }
}

impl FromStr for ModeParticipation {
  type Err = DomainError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "exposant" => Ok(ModeParticipation::Exposant),
      "visiteur" => Ok(ModeParticipation::Visiteur),
      "partenaire" => Ok(ModeParticipation::Partenaire),
      other => Err(DomainError::ValidationError(format!("modalidad de participación desconocida: {}", other))),
    }
  }
}

impl Serialize for ModeParticipation {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.wire_value())
  }
}

impl<'de> Deserialize<'de> for ModeParticipation {
  /// Tolerante en la entrada (cualquier casing), estricto en la salida.
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    ModeParticipation::from_str(&s).map_err(|e| D::Error::custom(e.to_string()))
  }
}

// action.rs
use crate::{ActionType, DomainError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::str::FromStr;

/// Claves wire de los campos base de una acción. Todo lo que no figure
/// aquí pertenece al sub-registro del tipo concreto.
pub const BASE_KEYS: [&str; 13] = ["id", "name", "type", "description", "statut", "responsable_id",
                                   "date_debut", "date_fin", "ville", "pays", "remarques", "confirme",
                                   "annule"];

/// Campos base (comunes a los nueve tipos) de un registro de acción.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionBase {
  pub name: String,
  #[serde(rename = "type")]
  pub action_type: ActionType,
  pub description: Option<String>,
  pub statut: Option<String>,
  pub responsable_id: Option<i64>,
  pub date_debut: Option<NaiveDate>,
  pub date_fin: Option<NaiveDate>,
  pub ville: Option<String>,
  pub pays: Option<String>,
  pub remarques: Option<String>,
  pub confirme: bool,
  pub annule: bool,
}

impl ActionBase {
  pub fn new(name: &str, action_type: ActionType) -> Result<Self, DomainError> {
    if name.trim().is_empty() {
      return Err(DomainError::ValidationError("el nombre de la acción no puede estar vacío".to_string()));
    }
    Ok(Self { name: name.trim().to_string(),
              action_type,
              description: None,
              statut: None,
              responsable_id: None,
              date_debut: None,
              date_fin: None,
              ville: None,
              pays: None,
              remarques: None,
              confirme: false,
              annule: false })
  }

  /// Reconstruye los campos base desde el registro plano que devuelve el
  /// backend (siembra en modo edición). Las fechas llegan como cadenas y
  /// se interpretan aquí; los flags llegan como 0/1.
  pub fn from_record_fields(fields: &Map<String, JsonValue>) -> Result<Self, DomainError> {
    let name = string_field(fields, "name")
      .ok_or_else(|| DomainError::ValidationError("el registro no contiene nombre".to_string()))?;
    let type_str = string_field(fields, "type")
      .ok_or_else(|| DomainError::ValidationError("el registro no contiene tipo".to_string()))?;
    let action_type = ActionType::from_str(&type_str)?;

    Ok(Self { name,
              action_type,
              description: string_field(fields, "description"),
              statut: string_field(fields, "statut"),
              responsable_id: reference_field(fields, "responsable_id"),
              date_debut: date_field(fields, "date_debut")?,
              date_fin: date_field(fields, "date_fin")?,
              ville: string_field(fields, "ville"),
              pays: string_field(fields, "pays"),
              remarques: string_field(fields, "remarques"),
              confirme: flag_field(fields, "confirme"),
              annule: flag_field(fields, "annule") })
  }

  /// Forma plana de los campos base para sembrar el borrador. Las claves
  /// opcionales ausentes se omiten (no se emite null).
  pub fn to_field_map(&self) -> Map<String, JsonValue> {
    let mut m = Map::new();
    m.insert("name".to_string(), JsonValue::String(self.name.clone()));
    m.insert("type".to_string(), JsonValue::String(self.action_type.as_str().to_string()));
    if let Some(d) = &self.description {
      m.insert("description".to_string(), JsonValue::String(d.clone()));
    }
    if let Some(s) = &self.statut {
      m.insert("statut".to_string(), JsonValue::String(s.clone()));
    }
    if let Some(r) = self.responsable_id {
      m.insert("responsable_id".to_string(), JsonValue::Number(r.into()));
    }
    if let Some(d) = self.date_debut {
      m.insert("date_debut".to_string(), JsonValue::String(d.format("%Y-%m-%d").to_string()));
    }
    if let Some(d) = self.date_fin {
      m.insert("date_fin".to_string(), JsonValue::String(d.format("%Y-%m-%d").to_string()));
    }
    if let Some(v) = &self.ville {
      m.insert("ville".to_string(), JsonValue::String(v.clone()));
    }
    if let Some(p) = &self.pays {
      m.insert("pays".to_string(), JsonValue::String(p.clone()));
    }
    if let Some(r) = &self.remarques {
      m.insert("remarques".to_string(), JsonValue::String(r.clone()));
    }
    m.insert("confirme".to_string(), JsonValue::Bool(self.confirme));
    m.insert("annule".to_string(), JsonValue::Bool(self.annule));
    m
  }
}

fn string_field(fields: &Map<String, JsonValue>, key: &str) -> Option<String> {
  match fields.get(key) {
    Some(JsonValue::String(s)) if !s.trim().is_empty() => Some(s.clone()),
    _ => None,
  }
}

fn reference_field(fields: &Map<String, JsonValue>, key: &str) -> Option<i64> {
  match fields.get(key) {
    Some(JsonValue::Number(n)) => n.as_i64(),
    Some(JsonValue::String(s)) => s.trim().parse::<i64>().ok(),
    _ => None,
  }
}

fn flag_field(fields: &Map<String, JsonValue>, key: &str) -> bool {
  match fields.get(key) {
    Some(JsonValue::Bool(b)) => *b,
    Some(JsonValue::Number(n)) => n.as_i64() == Some(1),
    _ => false,
  }
}

fn date_field(fields: &Map<String, JsonValue>, key: &str) -> Result<Option<NaiveDate>, DomainError> {
  match fields.get(key) {
    None | Some(JsonValue::Null) => Ok(None),
    Some(JsonValue::String(s)) if s.trim().is_empty() => Ok(None),
    Some(JsonValue::String(s)) => {
      // El backend emite la forma canónica; se tolera un datetime
      // truncando a la porción de fecha.
      let candidate = s.get(..10).unwrap_or(s.as_str());
      NaiveDate::parse_from_str(candidate, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| DomainError::ValidationError(format!("fecha inválida en {}: {}", key, s)))
    }
    Some(other) => Err(DomainError::ValidationError(format!("fecha inválida en {}: {}", key, other))),
  }
}

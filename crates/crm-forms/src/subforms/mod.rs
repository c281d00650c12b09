use crate::errors::FormError;
use chrono::NaiveDate;
use crm_domain::ActionType;
use crm_lookups::LookupKind;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use wizard::domain::FieldMap;
use wizard::schema::{coerce_value, StepSchema};

pub mod autre;
pub mod conference;
pub mod delegation;
pub mod formation;
pub mod mission;
pub mod salon;
pub mod seminaire;
pub mod seminaire_sectoriel;
pub mod visite;

pub use autre::AutreFields;
pub use conference::ConferenceFields;
pub use delegation::DelegationFields;
pub use formation::FormationFields;
pub use mission::MissionFields;
pub use salon::SalonFields;
pub use seminaire::SeminaireFields;
pub use seminaire_sectoriel::SeminaireSectorielFields;
pub use visite::VisiteFields;

/// Contrato que implementa cada uno de los nueve sub-formularios.
///
/// El padre nunca reconstruye estado parcial: toda mutación de campo
/// devuelve el snapshot completo del conjunto de campos, ya
/// auto-normalizado (fechas canónicas, booleanos explícitos, casing de
/// enumeraciones según el contrato wire).
pub trait SubForm: Send + Sync {
  /// Discriminante al que pertenece este sub-formulario.
  fn action_type(&self) -> ActionType;

  /// Declaración tipada de los campos y reglas cruzadas del esquema.
  fn schema(&self) -> StepSchema;

  /// Listas de referencia que el esquema solicita al montarse.
  fn lookups(&self) -> &'static [LookupKind];

  /// Clave del campo de fecha ligado al ancla, si el esquema lo
  /// declara. El campo ligado se presenta bloqueado en la UI: su valor
  /// deriva siempre del ancla (política uniforme para los nueve
  /// esquemas).
  fn anchor_field(&self) -> Option<&'static str> {
    None
  }

  /// `true` si el tipo admite un PDF adjunto por registro.
  fn supports_attachment(&self) -> bool {
    false
  }

  /// Snapshot completo del conjunto de campos actual.
  fn snapshot(&self) -> Result<FieldMap, FormError>;

  /// Muta un campo y devuelve el snapshot completo resultante (la
  /// notificación de cambio nunca es un delta).
  fn set_field(&mut self, key: &str, value: JsonValue) -> Result<FieldMap, FormError>;

  /// Sobrescribe el campo ligado al ancla. Devuelve `Some(snapshot)` si
  /// el valor cambió (la notificación debe dispararse de inmediato) o
  /// `None` si no había nada que propagar.
  fn apply_anchor_date(&mut self, date: Option<NaiveDate>) -> Result<Option<FieldMap>, FormError>;
}

/// Serializa el struct de campos a su forma de snapshot plano.
pub(crate) fn snapshot_of<T: Serialize>(form: &T) -> Result<FieldMap, FormError> {
  match serde_json::to_value(form)? {
    JsonValue::Object(map) => Ok(map),
    other => Err(FormError::Validation(format!("el snapshot no es un objeto: {}", other))),
  }
}

/// Mutación tipada de un campo vía round-trip serde: la clave debe estar
/// declarada en el esquema y el valor se coerciona a su tipo declarado
/// antes de reinterpretar el struct.
pub(crate) fn set_typed_field<T>(form: &mut T,
                                 schema: &StepSchema,
                                 key: &str,
                                 value: JsonValue)
                                 -> Result<FieldMap, FormError>
  where T: Serialize + DeserializeOwned
{
  let decl = schema.decl(key)
                   .ok_or_else(|| FormError::Validation(format!("campo desconocido: {}", key)))?;
  let coerced = if value.is_null() {
    JsonValue::Null
  } else {
    coerce_value(decl.field_type, value).map_err(|msg| FormError::Validation(format!("{}: {}", key, msg)))?
  };
  let mut map = snapshot_of(form)?;
  if coerced.is_null() {
    map.remove(key);
  } else {
    map.insert(key.to_string(), coerced);
  }
  *form = serde_json::from_value(JsonValue::Object(map))?;
  snapshot_of(form)
}

/// Siembra tipada desde el sub-registro plano devuelto por el backend:
/// sólo las claves declaradas se interpretan, coercionadas a su tipo
/// (el backend transmite flags como 0/1 y referencias a veces como
/// cadenas numéricas).
pub(crate) fn seed_typed<T>(schema: &StepSchema, raw: &FieldMap) -> Result<T, FormError>
  where T: DeserializeOwned
{
  let mut clean = FieldMap::new();
  for decl in &schema.fields {
    if let Some(v) = raw.get(&decl.key) {
      if v.is_null() {
        continue;
      }
      let coerced = coerce_value(decl.field_type, v.clone())
        .map_err(|msg| FormError::Validation(format!("{}: {}", decl.key, msg)))?;
      clean.insert(decl.key.clone(), coerced);
    }
  }
  Ok(serde_json::from_value(JsonValue::Object(clean))?)
}

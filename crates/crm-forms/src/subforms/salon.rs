use crate::errors::FormError;
use crate::subforms::{self, SubForm};
use chrono::NaiveDate;
use crm_domain::{ActionType, ModeParticipation};
use crm_lookups::LookupKind;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use wizard::domain::FieldMap;
use wizard::schema::{FieldDecl, FieldType, StepSchema};

/// Sub-formulario del tipo `salon` (feria comercial).
///
/// Los cuatro campos de identificación del salón son obligatorios; la
/// modalidad de participación viaja con el casing exacto del contrato
/// wire (`ModeParticipation::wire_value`) y el campo de fecha está
/// ligado al ancla del asistente.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SalonFields {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub intitule: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pays_id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub initiateur_id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub binome_id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub mode_participation: Option<ModeParticipation>,
  /// Checkbox: siempre explícito, nunca indefinido.
  pub stand_reserve: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date_debut: Option<NaiveDate>,
}

impl SubForm for SalonFields {
  fn action_type(&self) -> ActionType {
    ActionType::Salon
  }

  fn schema(&self) -> StepSchema {
    StepSchema::new("salon",
                    vec![FieldDecl::required("intitule", FieldType::Text),
                         FieldDecl::required("pays_id", FieldType::Reference),
                         FieldDecl::required("initiateur_id", FieldType::Reference),
                         FieldDecl::required("binome_id", FieldType::Reference),
                         FieldDecl::optional("mode_participation", FieldType::Enum),
                         FieldDecl::optional("stand_reserve", FieldType::Boolean),
                         FieldDecl::optional("date_debut", FieldType::Date)],
                    vec![])
  }

  fn lookups(&self) -> &'static [LookupKind] {
    &[LookupKind::Countries, LookupKind::Initiators, LookupKind::Binomes]
  }

  fn anchor_field(&self) -> Option<&'static str> {
    Some("date_debut")
  }

  fn snapshot(&self) -> Result<FieldMap, FormError> {
    subforms::snapshot_of(self)
  }

  fn set_field(&mut self, key: &str, value: JsonValue) -> Result<FieldMap, FormError> {
    let schema = self.schema();
    subforms::set_typed_field(self, &schema, key, value)
  }

  fn apply_anchor_date(&mut self, date: Option<NaiveDate>) -> Result<Option<FieldMap>, FormError> {
    if self.date_debut == date {
      return Ok(None);
    }
    self.date_debut = date;
    Ok(Some(subforms::snapshot_of(self)?))
  }
}

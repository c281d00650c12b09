use crate::errors::FormError;
use crate::subforms::{self, SubForm};
use chrono::NaiveDate;
use crm_domain::ActionType;
use crm_lookups::LookupKind;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use wizard::domain::FieldMap;
use wizard::schema::{FieldDecl, FieldType, StepSchema};

/// Sub-formulario del tipo `formation`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormationFields {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub intitule: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub formateur_id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub nb_places: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub lieu: Option<String>,
  /// Checkbox: siempre explícito, nunca indefinido.
  pub certifiante: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date_debut: Option<NaiveDate>,
}

impl SubForm for FormationFields {
  fn action_type(&self) -> ActionType {
    ActionType::Formation
  }

  fn schema(&self) -> StepSchema {
    StepSchema::new("formation",
                    vec![FieldDecl::required("intitule", FieldType::Text),
                         FieldDecl::optional("formateur_id", FieldType::Reference),
                         FieldDecl::optional("nb_places", FieldType::Numeric),
                         FieldDecl::optional("lieu", FieldType::Text),
                         FieldDecl::optional("certifiante", FieldType::Boolean),
                         FieldDecl::optional("date_debut", FieldType::Date)],
                    vec![])
  }

  fn lookups(&self) -> &'static [LookupKind] {
    &[LookupKind::Responsables]
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

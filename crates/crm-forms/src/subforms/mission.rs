use crate::errors::FormError;
use crate::subforms::{self, SubForm};
use chrono::NaiveDate;
use crm_domain::ActionType;
use crm_lookups::LookupKind;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use wizard::domain::FieldMap;
use wizard::schema::{FieldDecl, FieldType, StepSchema};

/// Sub-formulario del tipo `mission`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionFields {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub intitule: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pays_id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub objectif: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub budget: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub binome_id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date_debut: Option<NaiveDate>,
}

impl SubForm for MissionFields {
  fn action_type(&self) -> ActionType {
    ActionType::Mission
  }

  fn schema(&self) -> StepSchema {
    StepSchema::new("mission",
                    vec![FieldDecl::required("intitule", FieldType::Text),
                         FieldDecl::required("pays_id", FieldType::Reference),
                         FieldDecl::optional("objectif", FieldType::Text),
                         FieldDecl::optional("budget", FieldType::Numeric),
                         FieldDecl::optional("binome_id", FieldType::Reference),
                         FieldDecl::optional("date_debut", FieldType::Date)],
                    vec![])
  }

  fn lookups(&self) -> &'static [LookupKind] {
    &[LookupKind::Countries, LookupKind::Binomes]
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

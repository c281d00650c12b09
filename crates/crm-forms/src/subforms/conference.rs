use crate::errors::FormError;
use crate::subforms::{self, SubForm};
use chrono::NaiveDate;
use crm_domain::ActionType;
use crm_lookups::LookupKind;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use wizard::domain::FieldMap;
use wizard::schema::{FieldDecl, FieldType, StepSchema};

/// Sub-formulario del tipo `conference`. No solicita listas de
/// referencia.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConferenceFields {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub theme: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub lieu: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub intervenant: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub nb_participants: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date_debut: Option<NaiveDate>,
}

impl SubForm for ConferenceFields {
  fn action_type(&self) -> ActionType {
    ActionType::Conference
  }

  fn schema(&self) -> StepSchema {
    StepSchema::new("conference",
                    vec![FieldDecl::required("theme", FieldType::Text),
                         FieldDecl::optional("lieu", FieldType::Text),
                         FieldDecl::optional("intervenant", FieldType::Text),
                         FieldDecl::optional("nb_participants", FieldType::Numeric),
                         FieldDecl::optional("date_debut", FieldType::Date)],
                    vec![])
  }

  fn lookups(&self) -> &'static [LookupKind] {
    &[]
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

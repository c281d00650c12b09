use crate::errors::FormError;
use crate::subforms::{self, SubForm};
use chrono::NaiveDate;
use crm_domain::ActionType;
use crm_lookups::LookupKind;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use wizard::domain::FieldMap;
use wizard::schema::{FieldDecl, FieldType, StepSchema};

/// Sub-formulario del tipo `seminaire_sectoriel`. Admite un PDF de
/// soporte por registro.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeminaireSectorielFields {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub theme: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub secteur_id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pays_id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub binome_id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date_debut: Option<NaiveDate>,
}

impl SubForm for SeminaireSectorielFields {
  fn action_type(&self) -> ActionType {
    ActionType::SeminaireSectoriel
  }

  fn schema(&self) -> StepSchema {
    StepSchema::new("seminaire_sectoriel",
                    vec![FieldDecl::required("theme", FieldType::Text),
                         FieldDecl::required("secteur_id", FieldType::Reference),
                         FieldDecl::optional("pays_id", FieldType::Reference),
                         FieldDecl::optional("binome_id", FieldType::Reference),
                         FieldDecl::optional("date_debut", FieldType::Date)],
                    vec![])
  }

  fn lookups(&self) -> &'static [LookupKind] {
    &[LookupKind::Sectors, LookupKind::Countries, LookupKind::Binomes]
  }

  fn anchor_field(&self) -> Option<&'static str> {
    Some("date_debut")
  }

  fn supports_attachment(&self) -> bool {
    true
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

use crate::errors::FormError;
use crate::subforms::{self, SubForm};
use chrono::NaiveDate;
use crm_domain::ActionType;
use crm_lookups::LookupKind;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use wizard::domain::FieldMap;
use wizard::schema::{FieldDecl, FieldType, StepSchema};

/// Sub-formulario del tipo `autre`: el esquema mínimo. No declara campo
/// ligado al ancla, por lo que la fecha del registro proviene sólo del
/// asistente.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AutreFields {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub objet: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub precisions: Option<String>,
}

impl SubForm for AutreFields {
  fn action_type(&self) -> ActionType {
    ActionType::Autre
  }

  fn schema(&self) -> StepSchema {
    StepSchema::new("autre",
                    vec![FieldDecl::optional("objet", FieldType::Text),
                         FieldDecl::optional("precisions", FieldType::Text)],
                    vec![])
  }

  fn lookups(&self) -> &'static [LookupKind] {
    &[]
  }

  fn snapshot(&self) -> Result<FieldMap, FormError> {
    subforms::snapshot_of(self)
  }

  fn set_field(&mut self, key: &str, value: JsonValue) -> Result<FieldMap, FormError> {
    let schema = self.schema();
    subforms::set_typed_field(self, &schema, key, value)
  }

  fn apply_anchor_date(&mut self, _date: Option<NaiveDate>) -> Result<Option<FieldMap>, FormError> {
    // Sin campo ligado: nada que propagar.
    Ok(None)
  }
}

use crate::errors::FormError;
use crate::subforms::{self, SubForm};
use chrono::NaiveDate;
use crm_domain::ActionType;
use crm_lookups::LookupKind;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use wizard::domain::FieldMap;
use wizard::schema::{CrossRule, FieldDecl, FieldType, StepSchema};

/// Sub-formulario del tipo `delegation`.
///
/// La fecha de retorno se valida contra la fecha ancla con la misma
/// regla inclusiva que el asistente usa para `date_fin`. Admite un PDF
/// de programa por registro.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DelegationFields {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pays_id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub chef_delegation_id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub nb_participants: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date_retour: Option<NaiveDate>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date_debut: Option<NaiveDate>,
}

impl SubForm for DelegationFields {
  fn action_type(&self) -> ActionType {
    ActionType::Delegation
  }

  fn schema(&self) -> StepSchema {
    StepSchema::new("delegation",
                    vec![FieldDecl::required("pays_id", FieldType::Reference),
                         FieldDecl::optional("chef_delegation_id", FieldType::Reference),
                         FieldDecl::optional("nb_participants", FieldType::Numeric),
                         FieldDecl::optional("date_retour", FieldType::Date),
                         FieldDecl::optional("date_debut", FieldType::Date)],
                    vec![CrossRule::DateOrder { start: "date_debut".to_string(),
                                                end: "date_retour".to_string() }])
  }

  fn lookups(&self) -> &'static [LookupKind] {
    &[LookupKind::Countries, LookupKind::Responsables]
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

// registry.rs
//
// Registro de sub-formularios como unión etiquetada cerrada: una
// variante por discriminante, cada una con su conjunto de campos tipado.
// La resolución es un `match` exhaustivo; no existe el camino "sin
// sub-formulario": añadir una variante a `ActionType` sin registrar su
// esquema aquí es un error de compilación.
use crate::errors::FormError;
use crate::subforms::{self, AutreFields, ConferenceFields, DelegationFields, FormationFields, MissionFields,
                      SalonFields, SeminaireFields, SeminaireSectorielFields, SubForm, VisiteFields};
use chrono::NaiveDate;
use crm_domain::ActionType;
use crm_lookups::LookupKind;
use serde_json::Value as JsonValue;
use wizard::domain::FieldMap;
use wizard::schema::StepSchema;

/// Sub-formulario activo, tipado por discriminante.
#[derive(Debug, Clone)]
pub enum ActionSubForm {
  Salon(SalonFields),
  Seminaire(SeminaireFields),
  SeminaireSectoriel(SeminaireSectorielFields),
  Delegation(DelegationFields),
  Visite(VisiteFields),
  Mission(MissionFields),
  Formation(FormationFields),
  Conference(ConferenceFields),
  Autre(AutreFields),
}

/// Despacho exhaustivo sobre la variante activa.
macro_rules! each_subform {
  ($value:expr, $f:ident => $body:expr) => {
    match $value {
      ActionSubForm::Salon($f) => $body,
      ActionSubForm::Seminaire($f) => $body,
      ActionSubForm::SeminaireSectoriel($f) => $body,
      ActionSubForm::Delegation($f) => $body,
      ActionSubForm::Visite($f) => $body,
      ActionSubForm::Mission($f) => $body,
      ActionSubForm::Formation($f) => $body,
      ActionSubForm::Conference($f) => $body,
      ActionSubForm::Autre($f) => $body,
    }
  };
}

impl ActionSubForm {
  /// Monta el sub-formulario por defecto del discriminante dado.
  pub fn for_type(action_type: ActionType) -> Self {
    match action_type {
      ActionType::Salon => ActionSubForm::Salon(SalonFields::default()),
      ActionType::Seminaire => ActionSubForm::Seminaire(SeminaireFields::default()),
      ActionType::SeminaireSectoriel => ActionSubForm::SeminaireSectoriel(SeminaireSectorielFields::default()),
      ActionType::Delegation => ActionSubForm::Delegation(DelegationFields::default()),
      ActionType::Visite => ActionSubForm::Visite(VisiteFields::default()),
      ActionType::Mission => ActionSubForm::Mission(MissionFields::default()),
      ActionType::Formation => ActionSubForm::Formation(FormationFields::default()),
      ActionType::Conference => ActionSubForm::Conference(ConferenceFields::default()),
      ActionType::Autre => ActionSubForm::Autre(AutreFields::default()),
    }
  }

  /// Siembra tipada desde el sub-registro plano del backend (modo
  /// edición). Sólo se interpretan las claves declaradas por el esquema
  /// del discriminante, coercionadas a su tipo.
  pub fn seed(action_type: ActionType, raw: &FieldMap) -> Result<Self, FormError> {
    let schema = Self::for_type(action_type).schema();
    Ok(match action_type {
      ActionType::Salon => ActionSubForm::Salon(subforms::seed_typed(&schema, raw)?),
      ActionType::Seminaire => ActionSubForm::Seminaire(subforms::seed_typed(&schema, raw)?),
      ActionType::SeminaireSectoriel => {
        ActionSubForm::SeminaireSectoriel(subforms::seed_typed(&schema, raw)?)
      }
      ActionType::Delegation => ActionSubForm::Delegation(subforms::seed_typed(&schema, raw)?),
      ActionType::Visite => ActionSubForm::Visite(subforms::seed_typed(&schema, raw)?),
      ActionType::Mission => ActionSubForm::Mission(subforms::seed_typed(&schema, raw)?),
      ActionType::Formation => ActionSubForm::Formation(subforms::seed_typed(&schema, raw)?),
      ActionType::Conference => ActionSubForm::Conference(subforms::seed_typed(&schema, raw)?),
      ActionType::Autre => ActionSubForm::Autre(subforms::seed_typed(&schema, raw)?),
    })
  }
}

impl SubForm for ActionSubForm {
  fn action_type(&self) -> ActionType {
    each_subform!(self, f => f.action_type())
  }

  fn schema(&self) -> StepSchema {
    each_subform!(self, f => f.schema())
  }

  fn lookups(&self) -> &'static [LookupKind] {
    each_subform!(self, f => f.lookups())
  }

  fn anchor_field(&self) -> Option<&'static str> {
    each_subform!(self, f => f.anchor_field())
  }

  fn supports_attachment(&self) -> bool {
    each_subform!(self, f => f.supports_attachment())
  }

  fn snapshot(&self) -> Result<FieldMap, FormError> {
    each_subform!(self, f => f.snapshot())
  }

  fn set_field(&mut self, key: &str, value: JsonValue) -> Result<FieldMap, FormError> {
    each_subform!(self, f => f.set_field(key, value))
  }

  fn apply_anchor_date(&mut self, date: Option<NaiveDate>) -> Result<Option<FieldMap>, FormError> {
    each_subform!(self, f => f.apply_anchor_date(date))
  }
}

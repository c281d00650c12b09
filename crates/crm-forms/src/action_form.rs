// action_form.rs
//
// Implementación concreta del asistente de acciones: tres pasos base,
// un sub-formulario tipado por discriminante y el envío a la pasarela.
// Todos los cambios de estado entran por `apply` con un evento
// explícito; la fecha ancla del asistente es autoritativa y se propaga
// hacia el sub-formulario activo tras cada captura de paso.
use crate::errors::FormError;
use crate::registry::ActionSubForm;
use crate::subforms::SubForm;
use chrono::NaiveDate;
use crm_domain::ActionType;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use wizard::domain::{FieldMap, StoredRecord};
use wizard::draft::{Draft, DraftEvent};
use wizard::gateway::PersistenceGateway;
use wizard::merge::Merger;
use wizard::schema::{CrossRule, FieldDecl, FieldType, StepSchema};
use wizard::sequencer::StepSequencer;
use wizard::WizardError;

/// Modo del formulario: creación o edición de un registro existente.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
  Create,
  Edit { id: i64 },
}

/// Eventos discretos que mutan el formulario por encima del borrador.
#[derive(Debug, Clone)]
pub enum FormEvent {
  /// La fecha de inicio autoritativa cambió desde el asistente.
  AnchorDateChanged(Option<NaiveDate>),
  /// El usuario seleccionó otro discriminante: el sub-formulario
  /// anterior se descarta y el nuevo se monta limpio.
  DiscriminantChanged(ActionType),
  /// Mutación de un campo del sub-formulario activo.
  SubFormFieldChanged { key: String, value: JsonValue },
}

/// Asistente de creación/edición de una acción.
pub struct ActionForm {
  mode: FormMode,
  draft: Draft,
  sequencer: StepSequencer,
  subform: ActionSubForm,
  submitting: bool,
}

impl ActionForm {
  /// Esquemas de los tres pasos base del asistente.
  ///
  /// `date_debut` no es obligatorio a nivel de paso: su presencia la
  /// impone el invariante de fusión en el envío, de modo que el gate
  /// del paso no bloquea a quien aún no conoce la fecha.
  pub fn base_steps() -> Vec<StepSchema> {
    vec![StepSchema::new("identification",
                         vec![FieldDecl::required("name", FieldType::Text),
                              FieldDecl::required("type", FieldType::Enum),
                              FieldDecl::optional("description", FieldType::Text)],
                         vec![]),
         StepSchema::new("planification",
                         vec![FieldDecl::optional("date_debut", FieldType::Date),
                              FieldDecl::optional("date_fin", FieldType::Date),
                              FieldDecl::optional("ville", FieldType::Text),
                              FieldDecl::optional("pays", FieldType::Text),
                              FieldDecl::optional("responsable_id", FieldType::Reference)],
                         vec![CrossRule::DateOrder { start: "date_debut".to_string(),
                                                     end: "date_fin".to_string() }]),
         StepSchema::new("suivi",
                         vec![FieldDecl::optional("statut", FieldType::Text),
                              FieldDecl::optional("confirme", FieldType::Boolean),
                              FieldDecl::optional("annule", FieldType::Boolean),
                              FieldDecl::optional("remarques", FieldType::Text)],
                         vec![])]
  }

  /// Formulario vacío para crear una acción del tipo dado.
  pub fn new(action_type: ActionType) -> Result<Self, FormError> {
    let mut draft = Draft::new("name", "date_debut");
    draft.apply(DraftEvent::DiscriminantChanged(action_type.as_str().to_string()));
    let subform = ActionSubForm::for_type(action_type);
    draft.apply(DraftEvent::SubFormFieldsChanged(subform.snapshot()?));
    Ok(Self { mode: FormMode::Create,
              draft,
              sequencer: StepSequencer::new(Self::base_steps()),
              subform,
              submitting: false })
  }

  /// Formulario sembrado desde un registro persistido (modo edición).
  ///
  /// Las fechas del registro se interpretan a su representación de
  /// fecha y las claves del sub-registro se copian tal cual al snapshot
  /// del sub-formulario; esta siembra es el único punto que fija el
  /// discriminante sin descartar el snapshot.
  pub fn from_record(record: &StoredRecord) -> Result<Self, FormError> {
    let base = crm_domain::ActionBase::from_record_fields(&record.fields)?;
    let mut sub = FieldMap::new();
    for (k, v) in &record.fields {
      if !crm_domain::BASE_KEYS.contains(&k.as_str()) {
        sub.insert(k.clone(), v.clone());
      }
    }
    let subform = ActionSubForm::seed(base.action_type, &sub)?;
    let draft = Draft::seeded("name",
                              "date_debut",
                              base.action_type.as_str(),
                              base.to_field_map(),
                              sub);
    Ok(Self { mode: FormMode::Edit { id: record.id },
              draft,
              sequencer: StepSequencer::new(Self::base_steps()),
              subform,
              submitting: false })
  }

  pub fn mode(&self) -> FormMode {
    self.mode
  }

  pub fn draft(&self) -> &Draft {
    &self.draft
  }

  pub fn subform(&self) -> &ActionSubForm {
    &self.subform
  }

  pub fn current_step(&self) -> usize {
    self.sequencer.current()
  }

  pub fn is_final_step(&self) -> bool {
    self.sequencer.is_final()
  }

  /// `true` mientras un envío está sin resolver; el disparador de envío
  /// debe permanecer deshabilitado.
  pub fn is_submitting(&self) -> bool {
    self.submitting
  }

  /// Esquema del paso actual (para que la UI pinte sus campos).
  pub fn current_schema(&self) -> &StepSchema {
    self.sequencer.current_schema()
  }

  /// Función de transición del formulario.
  pub fn apply(&mut self, event: FormEvent) -> Result<(), FormError> {
    match event {
      FormEvent::AnchorDateChanged(date) => {
        self.draft.apply(DraftEvent::AnchorDateChanged(date));
        self.sync_anchor()
      }
      FormEvent::DiscriminantChanged(action_type) => {
        if self.subform.action_type() == action_type {
          return Ok(());
        }
        self.subform = ActionSubForm::for_type(action_type);
        self.draft
            .apply(DraftEvent::DiscriminantChanged(action_type.as_str().to_string()));
        // remonta limpio y re-propaga el ancla vigente
        self.draft
            .apply(DraftEvent::SubFormFieldsChanged(self.subform.snapshot()?));
        self.sync_anchor()
      }
      FormEvent::SubFormFieldChanged { key, value } => {
        let snapshot = self.subform.set_field(&key, value)?;
        self.draft.apply(DraftEvent::SubFormFieldsChanged(snapshot));
        Ok(())
      }
    }
  }

  /// Valida los valores del paso actual sin avanzar.
  pub fn validate_current(&self, values: &FieldMap) -> Result<FieldMap, FormError> {
    self.sequencer
        .validate_step(values)
        .map_err(|e| FormError::Wizard(WizardError::Validation(e)))
  }

  /// Avanza el asistente capturando los valores validados del paso.
  pub fn next(&mut self, values: &FieldMap) -> Result<(), FormError> {
    self.sequencer.next(&mut self.draft, values)?;
    self.sync_anchor()
  }

  /// Retrocede un paso sin validar ni descartar capturas.
  pub fn back(&mut self) {
    self.sequencer.back();
  }

  /// Sobrescribe el campo ligado del sub-formulario con el ancla del
  /// borrador; si el valor cambió, la notificación de snapshot se
  /// dispara de inmediato para que el estado superior quede coherente.
  fn sync_anchor(&mut self) -> Result<(), FormError> {
    if let Some(snapshot) = self.subform.apply_anchor_date(self.draft.anchor_date())? {
      self.draft.apply(DraftEvent::SubFormFieldsChanged(snapshot));
    }
    Ok(())
  }

  /// Tabla `clave -> tipo declarado` para la pasada de normalización de
  /// la fusión: pasos base más el sub-formulario activo.
  fn merger(&self) -> Merger {
    let mut types: IndexMap<String, FieldType> = IndexMap::new();
    for schema in self.sequencer.schemas() {
      for decl in &schema.fields {
        types.insert(decl.key.clone(), decl.field_type);
      }
    }
    for decl in &self.subform.schema().fields {
      types.entry(decl.key.clone()).or_insert(decl.field_type);
    }
    Merger::new(types)
  }

  /// Envío desde el paso terminal.
  ///
  /// Captura y valida los valores del paso final, valida los campos
  /// requeridos del sub-formulario activo, fusiona el borrador y llama
  /// a la pasarela. Cualquier fallo de validación aborta antes de la
  /// red; los fallos del servidor o de transporte dejan intactos el
  /// borrador y el paso para que el usuario corrija y reenvíe.
  pub fn submit(&mut self,
                gateway: &dyn PersistenceGateway,
                final_values: &FieldMap)
                -> Result<StoredRecord, FormError> {
    if self.submitting {
      return Err(FormError::SubmissionInFlight);
    }
    if !self.sequencer.is_final() {
      return Err(FormError::Validation("el envío sólo es posible desde el paso final".to_string()));
    }
    self.sequencer.capture_final(&mut self.draft, final_values)?;
    self.sync_anchor()?;
    self.subform
        .schema()
        .validate(self.draft.subform())
        .map_err(|e| FormError::Wizard(WizardError::Validation(e)))?;
    let payload = self.merger().merge(&self.draft)?;

    self.submitting = true;
    let result = match self.mode {
      FormMode::Create => gateway.create(&payload),
      FormMode::Edit { id } => gateway.update(id, &payload),
    };
    self.submitting = false;
    Ok(result?)
  }
}

// invite_form.rs
//
// Espejo del protocolo del asistente para los invitados: dos pasos, sin
// sub-formulario. Las claves autoritativas son `nom` (identidad) y
// `date_invitation` (planificación).
use crate::errors::FormError;
use indexmap::IndexMap;
use wizard::domain::{FieldMap, StoredRecord};
use wizard::draft::Draft;
use wizard::gateway::PersistenceGateway;
use wizard::merge::Merger;
use wizard::schema::{FieldDecl, FieldType, StepSchema};
use wizard::sequencer::StepSequencer;

/// Asistente de creación/edición de un invitado.
pub struct InviteForm {
  draft: Draft,
  sequencer: StepSequencer,
  edit_id: Option<i64>,
  submitting: bool,
}

impl InviteForm {
  pub fn steps() -> Vec<StepSchema> {
    vec![StepSchema::new("identite",
                         vec![FieldDecl::required("nom", FieldType::Text),
                              FieldDecl::optional("prenom", FieldType::Text),
                              FieldDecl::required("email", FieldType::Text),
                              FieldDecl::optional("societe", FieldType::Text)],
                         vec![]),
         StepSchema::new("participation",
                         vec![FieldDecl::optional("date_invitation", FieldType::Date),
                              FieldDecl::optional("action_id", FieldType::Reference),
                              FieldDecl::optional("statut_invitation", FieldType::Text),
                              FieldDecl::optional("remarques", FieldType::Text)],
                         vec![])]
  }

  pub fn new() -> Self {
    Self { draft: Draft::new("nom", "date_invitation"),
           sequencer: StepSequencer::new(Self::steps()),
           edit_id: None,
           submitting: false }
  }

  /// Formulario sembrado desde un registro de invitado persistido.
  pub fn from_record(record: &StoredRecord) -> Self {
    Self { draft: Draft::seeded("nom", "date_invitation", "invite", record.fields.clone(), FieldMap::new()),
           sequencer: StepSequencer::new(Self::steps()),
           edit_id: Some(record.id),
           submitting: false }
  }

  pub fn draft(&self) -> &Draft {
    &self.draft
  }

  pub fn current_step(&self) -> usize {
    self.sequencer.current()
  }

  pub fn is_final_step(&self) -> bool {
    self.sequencer.is_final()
  }

  pub fn is_submitting(&self) -> bool {
    self.submitting
  }

  pub fn next(&mut self, values: &FieldMap) -> Result<(), FormError> {
    self.sequencer.next(&mut self.draft, values)?;
    Ok(())
  }

  pub fn back(&mut self) {
    self.sequencer.back();
  }

  fn merger(&self) -> Merger {
    let mut types: IndexMap<String, FieldType> = IndexMap::new();
    for schema in self.sequencer.schemas() {
      for decl in &schema.fields {
        types.insert(decl.key.clone(), decl.field_type);
      }
    }
    Merger::new(types)
  }

  /// Envío desde el paso terminal: misma disciplina que el asistente de
  /// acciones (captura final, fusión, invariantes, guardia de reenvío).
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
    let payload = self.merger().merge(&self.draft)?;

    self.submitting = true;
    let result = match self.edit_id {
      None => gateway.create(&payload),
      Some(id) => gateway.update(id, &payload),
    };
    self.submitting = false;
    Ok(result?)
  }
}

impl Default for InviteForm {
  fn default() -> Self {
    Self::new()
  }
}

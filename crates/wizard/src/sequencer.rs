// Archivo: sequencer.rs
// Propósito: la máquina de estados del asistente multi-paso. Los estados
// son índices de paso `0..N-1`; `next` sólo avanza si el paso actual
// supera su validación y deja los valores capturados en el borrador;
// `back` retrocede sin validar y sin descartar snapshots ya capturados.
use crate::draft::{Draft, DraftEvent};
use crate::domain::FieldMap;
use crate::errors::{Result, ValidationErrors, WizardError};
use crate::schema::StepSchema;

/// Secuenciador de pasos del asistente.
pub struct StepSequencer {
    steps: Vec<StepSchema>,
    current: usize,
}

impl StepSequencer {
    /// Crea el secuenciador en el paso inicial (0). `steps` no debe estar
    /// vacío; los esquemas se definen estáticamente por el formulario
    /// concreto.
    pub fn new(steps: Vec<StepSchema>) -> Self {
        Self { steps, current: 0 }
    }

    /// Índice del paso actual.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Esquema del paso actual.
    pub fn current_schema(&self) -> &StepSchema {
        &self.steps[self.current]
    }

    /// Esquemas de todos los pasos, en orden.
    pub fn schemas(&self) -> &[StepSchema] {
        &self.steps
    }

    /// `true` si el paso actual es el terminal (desde él, la única
    /// acción hacia adelante es el envío).
    pub fn is_final(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    /// Valida los valores contra el esquema del paso actual sin avanzar.
    pub fn validate_step(&self, values: &FieldMap) -> std::result::Result<FieldMap, ValidationErrors> {
        self.current_schema().validate(values)
    }

    /// Transición `next`: valida el paso actual, captura los valores
    /// validados en el borrador y avanza. En fallo de validación el
    /// índice no cambia y los campos en falta se reportan; nunca se
    /// silencia el error.
    pub fn next(&mut self, draft: &mut Draft, values: &FieldMap) -> Result<()> {
        if self.is_final() {
            return Err(WizardError::Other("el paso final sólo admite el envío".to_string()));
        }
        let validated = self.validate_step(values).map_err(WizardError::Validation)?;
        draft.apply(DraftEvent::BaseFieldsCaptured { step: self.current,
                                                     values: validated });
        self.current += 1;
        Ok(())
    }

    /// Captura los valores del paso terminal sin avanzar (antesala del
    /// envío). Misma validación que `next`.
    pub fn capture_final(&self, draft: &mut Draft, values: &FieldMap) -> Result<()> {
        let validated = self.validate_step(values).map_err(WizardError::Validation)?;
        draft.apply(DraftEvent::BaseFieldsCaptured { step: self.current,
                                                     values: validated });
        Ok(())
    }

    /// Transición `back`: retrocede sin validar. Los snapshots del paso
    /// que se abandona se conservan.
    pub fn back(&mut self) {
        self.current = self.current.saturating_sub(1);
    }
}

// Archivo: draft.rs
// Propósito: el borrador en curso (campos base, snapshots de paso,
// snapshot del sub-formulario, fecha ancla) y su función de transición
// única. Todo cambio de estado pasa por `apply` con un evento explícito;
// no hay callbacks independientes mutando estado ambiente.
use crate::dates;
use crate::domain::FieldMap;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Eventos discretos que mutan el borrador.
#[derive(Debug, Clone)]
pub enum DraftEvent {
    /// La fecha ancla (fecha de inicio autoritativa) cambió.
    AnchorDateChanged(Option<NaiveDate>),
    /// El discriminante de tipo cambió: descarta el snapshot del
    /// sub-formulario anterior.
    DiscriminantChanged(String),
    /// El sub-formulario notificó su snapshot completo (se reemplaza
    /// por entero, último-escribe-gana).
    SubFormFieldsChanged(FieldMap),
    /// Un paso superó su validación: sus valores quedan capturados en
    /// `step_snapshots[step]` y acumulados en los campos base.
    BaseFieldsCaptured { step: usize, values: FieldMap },
    /// Descarta todo el borrador (navegación fuera del flujo).
    Reset,
}

/// Borrador en memoria de un registro en composición.
///
/// `name_key` y `anchor_key` son las claves wire de los dos campos
/// autoritativos del asistente (identidad y planificación); la fusión
/// los re-aplica al final con precedencia máxima.
#[derive(Debug, Clone)]
pub struct Draft {
    /// Identidad de sesión del borrador (nunca viaja al backend).
    pub id: Uuid,
    name_key: String,
    anchor_key: String,
    discriminant: Option<String>,
    base: FieldMap,
    anchor_date: Option<NaiveDate>,
    step_snapshots: IndexMap<usize, FieldMap>,
    subform: FieldMap,
}

impl Draft {
    /// Borrador vacío (modo creación).
    pub fn new(name_key: &str, anchor_key: &str) -> Self {
        Self { id: Uuid::new_v4(),
               name_key: name_key.to_string(),
               anchor_key: anchor_key.to_string(),
               discriminant: None,
               base: FieldMap::new(),
               anchor_date: None,
               step_snapshots: IndexMap::new(),
               subform: FieldMap::new() }
    }

    /// Borrador sembrado desde un registro ya persistido (modo edición).
    ///
    /// La siembra fija discriminante y snapshot del sub-formulario de una
    /// vez, sin pasar por el descarte que impone `DiscriminantChanged`:
    /// es el único punto del ciclo de vida donde ese descarte se omite.
    pub fn seeded(name_key: &str,
                  anchor_key: &str,
                  discriminant: &str,
                  base: FieldMap,
                  subform: FieldMap)
                  -> Self {
        let anchor_date = base.get(anchor_key).and_then(dates::parse_date);
        Self { id: Uuid::new_v4(),
               name_key: name_key.to_string(),
               anchor_key: anchor_key.to_string(),
               discriminant: Some(discriminant.to_string()),
               base,
               anchor_date,
               step_snapshots: IndexMap::new(),
               subform }
    }

    /// Función de transición única del borrador.
    pub fn apply(&mut self, event: DraftEvent) {
        match event {
            DraftEvent::AnchorDateChanged(date) => {
                self.anchor_date = date;
                match date {
                    Some(d) => {
                        self.base.insert(self.anchor_key.clone(),
                                         JsonValue::String(d.format(dates::CANONICAL_DATE).to_string()));
                    }
                    None => {
                        self.base.remove(&self.anchor_key);
                    }
                }
            }
            DraftEvent::DiscriminantChanged(next) => {
                if self.discriminant.as_deref() != Some(next.as_str()) {
                    // Sin campos heredados del tipo anterior.
                    self.subform.clear();
                }
                self.discriminant = Some(next);
            }
            DraftEvent::SubFormFieldsChanged(snapshot) => {
                self.subform = snapshot;
            }
            DraftEvent::BaseFieldsCaptured { step, values } => {
                for (k, v) in &values {
                    self.base.insert(k.clone(), v.clone());
                }
                if let Some(v) = values.get(&self.anchor_key) {
                    self.anchor_date = dates::parse_date(v);
                }
                self.step_snapshots.insert(step, values);
            }
            DraftEvent::Reset => {
                self.discriminant = None;
                self.base.clear();
                self.anchor_date = None;
                self.step_snapshots.clear();
                self.subform.clear();
            }
        }
    }

    pub fn name_key(&self) -> &str {
        &self.name_key
    }

    pub fn anchor_key(&self) -> &str {
        &self.anchor_key
    }

    pub fn discriminant(&self) -> Option<&str> {
        self.discriminant.as_deref()
    }

    /// Valores base acumulados (autoritativos para identidad y ancla).
    pub fn base(&self) -> &FieldMap {
        &self.base
    }

    pub fn anchor_date(&self) -> Option<NaiveDate> {
        self.anchor_date
    }

    /// Snapshots de paso capturados, indexados por número de paso.
    pub fn step_snapshots(&self) -> &IndexMap<usize, FieldMap> {
        &self.step_snapshots
    }

    /// Último snapshot completo del sub-formulario activo.
    pub fn subform(&self) -> &FieldMap {
        &self.subform
    }
}

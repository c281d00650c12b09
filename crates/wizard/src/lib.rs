//! Crate `wizard` — maquinaria genérica del asistente multi-paso
//!
//! Este crate define los tipos compartidos (`FieldMap`, `StoredRecord`),
//! los esquemas tipados de paso (`StepSchema`, `FieldType`), el borrador
//! con su función de transición única (`Draft`, `DraftEvent`), la máquina
//! de estados de pasos (`StepSequencer`), el fusionador de borradores
//! (`Merger`) y el contrato de la pasarela de persistencia
//! (`PersistenceGateway`, `AttachmentStore`) junto a una implementación en
//! memoria útil para pruebas (`InMemoryGateway`).
//!
//! Diseño resumido:
//! - Validación por gate: un paso sólo se abandona hacia adelante si sus
//!   campos declarados validan; los fallos se reportan por campo.
//! - Fusión con precedencia fija: sub-formulario, luego pasos en orden
//!   ascendente, luego los campos autoritativos del nivel superior.
//! - Normalización dirigida por tabla: fechas, booleanos y referencias se
//!   normalizan según el tipo declarado de cada clave, nunca por
//!   convención de nombre.
//!
//! Ejemplo rápido:
//! ```rust
//! use wizard::schema::{FieldDecl, FieldType, StepSchema};
//! use wizard::sequencer::StepSequencer;
//! let paso = StepSchema::new("identificacion",
//!                            vec![FieldDecl::required("name", FieldType::Text)],
//!                            vec![]);
//! let seq = StepSequencer::new(vec![paso]);
//! assert!(seq.is_final());
//! ```
pub mod dates;
pub mod domain;
pub mod draft;
pub mod errors;
pub mod gateway;
pub mod merge;
pub mod schema;
pub mod sequencer;
pub mod stubs;

pub use domain::*;
pub use draft::*;
pub use errors::*;
pub use gateway::*;
pub use merge::*;
pub use schema::*;
pub use sequencer::*;
pub use stubs::*;

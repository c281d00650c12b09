//! crm-forms: composición de los formularios de acción del CRM
//!
//! Crate que define el contrato `SubForm`, los nueve sub-formularios
//! tipados con su registro exhaustivo (`ActionSubForm`), el asistente de
//! acciones (`ActionForm`), su espejo para invitados (`InviteForm`) y la
//! fábrica de formularios. Usa `wizard` para la maquinaria de pasos y
//! fusión, `crm_domain` para los tipos validados y `crm_gateway` para la
//! pasarela configurada por entorno.

pub mod action_form;
pub mod errors;
pub mod factory;
pub mod invite_form;
pub mod registry;
pub mod subforms;

pub use action_form::{ActionForm, FormEvent, FormMode};
pub use errors::FormError;
pub use factory::FormFactory;
pub use invite_form::InviteForm;
pub use registry::ActionSubForm;
pub use subforms::SubForm;

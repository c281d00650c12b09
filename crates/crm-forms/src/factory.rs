// factory.rs
//
// Fábrica para crear o cargar formularios de acción. Los métodos `_from_env`
// usan la pasarela configurada por entorno (`crm-gateway`) para que los
// formularios devueltos sean utilizables de inmediato en ejemplos y
// pruebas.
use crate::action_form::ActionForm;
use crate::errors::FormError;
use crate::subforms::SubForm;
use crm_domain::ActionType;
use crm_lookups::{LookupKind, LookupProvider, LookupState};
use std::collections::HashMap;
use wizard::gateway::PersistenceGateway;

pub struct FormFactory;

impl FormFactory {
  /// Formulario vacío para el discriminante dado.
  pub fn create(action_type: ActionType) -> Result<ActionForm, FormError> {
    ActionForm::new(action_type)
  }

  /// Carga un registro existente a través de la pasarela y siembra el
  /// formulario en modo edición.
  pub fn load(gateway: &dyn PersistenceGateway, id: i64) -> Result<ActionForm, FormError> {
    let record = gateway.fetch(id)?;
    ActionForm::from_record(&record)
  }

  /// Variante de `load` con la pasarela construida desde el entorno.
  pub fn load_from_env(id: i64) -> Result<ActionForm, FormError> {
    let gateway = crm_gateway::new_from_env()?;
    Self::load(&gateway, id)
  }

  /// Resuelve las listas de referencia que el sub-formulario activo
  /// declara al montarse. Cada lista falla de forma independiente: un
  /// proveedor caído no bloquea las demás.
  pub fn mount_lookups(provider: &dyn LookupProvider,
                       form: &ActionForm)
                       -> HashMap<LookupKind, LookupState> {
    let mut out = HashMap::new();
    for kind in form.subform().lookups() {
      let state = match provider.fetch(*kind) {
        Ok(items) => LookupState::Ready(items),
        Err(e) => LookupState::Failed(e.to_string()),
      };
      out.insert(*kind, state);
    }
    out
  }
}

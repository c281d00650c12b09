// Archivo: merge.rs
// Propósito: fusionar las tres fuentes del borrador (snapshot del
// sub-formulario, snapshots de paso, campos base) en un único payload
// plano para la pasarela, respetando el orden de precedencia fijo y la
// normalización final dirigida por los tipos declarados.
use crate::dates;
use crate::domain::{is_empty_value, FieldMap};
use crate::draft::Draft;
use crate::errors::{Result, WizardError};
use crate::schema::FieldType;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// Fusionador de borradores.
///
/// Se construye con la tabla `clave -> tipo declarado` (unión de los
/// esquemas de paso y del sub-formulario activo). La normalización de
/// fechas, booleanos y referencias recorre esa tabla; ninguna clave se
/// trata por convención de nombre.
pub struct Merger {
    field_types: IndexMap<String, FieldType>,
}

impl Merger {
    pub fn new(field_types: IndexMap<String, FieldType>) -> Self {
        Self { field_types }
    }

    /// Tipo declarado de una clave, si existe.
    pub fn field_type(&self, key: &str) -> Option<FieldType> {
        self.field_types.get(key).copied()
    }

    /// Produce el payload saliente completo, o el error sincrónico que
    /// nombra el primer campo requerido ausente (`name` primero, luego
    /// la fecha ancla). Nunca se envía un payload parcial.
    pub fn merge(&self, draft: &Draft) -> Result<FieldMap> {
        // 1. Base: el snapshot del sub-formulario.
        let mut out = draft.subform().clone();

        // 2. Superponer los snapshots de paso en orden ascendente de
        // paso; en colisión de clave gana el paso posterior.
        let mut indices: Vec<usize> = draft.step_snapshots().keys().copied().collect();
        indices.sort_unstable();
        for idx in indices {
            if let Some(snapshot) = draft.step_snapshots().get(&idx) {
                for (k, v) in snapshot {
                    out.insert(k.clone(), v.clone());
                }
            }
        }

        // 3. Re-aplicar nombre y fecha ancla desde los campos base si y
        // sólo si no están vacíos: el registro de nivel superior es
        // autoritativo para identidad y planificación.
        let name_key = draft.name_key().to_string();
        let anchor_key = draft.anchor_key().to_string();
        if !is_empty_value(draft.base().get(&name_key)) {
            out.insert(name_key.clone(), draft.base()[&name_key].clone());
        }
        if !is_empty_value(draft.base().get(&anchor_key)) {
            out.insert(anchor_key.clone(), draft.base()[&anchor_key].clone());
        }

        // 4. Último recurso para la fecha ancla: el valor que tenga el
        // snapshot del sub-formulario. Condición recuperable, no error.
        if is_empty_value(out.get(&anchor_key)) {
            if let Some(v) = draft.subform().get(&anchor_key) {
                if !is_empty_value(Some(v)) {
                    log::warn!("borrador {}: fecha ancla ausente, recuperada del sub-formulario", draft.id);
                    out.insert(anchor_key.clone(), v.clone());
                }
            }
        }

        // 5-7. Normalización final dirigida por los tipos declarados.
        for (key, ty) in &self.field_types {
            match ty {
                FieldType::Date => {
                    if let Some(v) = out.get(key.as_str()) {
                        if let Some(normalized) = dates::normalize_date_value(v) {
                            out.insert(key.clone(), normalized);
                        }
                    }
                }
                FieldType::Boolean => {
                    // Booleano explícito 0/1 en el wire; ausente o null
                    // se transmite como 0, nunca indefinido.
                    let bit = match out.get(key.as_str()) {
                        Some(JsonValue::Bool(true)) => 1,
                        Some(JsonValue::Number(n)) if n.as_i64() == Some(1) => 1,
                        _ => 0,
                    };
                    out.insert(key.clone(), JsonValue::Number(bit.into()));
                }
                FieldType::Reference => {
                    // Identificador numérico, u omitir la clave: nunca un
                    // placeholder null para una relación opcional.
                    let coerced = match out.get(key.as_str()) {
                        Some(JsonValue::Number(n)) => n.as_i64(),
                        Some(JsonValue::String(s)) => s.trim().parse::<i64>().ok(),
                        _ => None,
                    };
                    match coerced {
                        Some(id) => {
                            out.insert(key.clone(), JsonValue::Number(id.into()));
                        }
                        None => {
                            out.remove(key.as_str());
                        }
                    }
                }
                FieldType::Enum | FieldType::Text | FieldType::Numeric => {}
            }
        }

        // Invariante de salida: nombre no vacío y fecha ancla presente,
        // comprobados en ese orden.
        if is_empty_value(out.get(&name_key)) {
            return Err(WizardError::Merge { field: name_key });
        }
        if is_empty_value(out.get(&anchor_key)) {
            return Err(WizardError::Merge { field: anchor_key });
        }

        Ok(out)
    }
}

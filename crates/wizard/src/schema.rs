// Archivo: schema.rs
// Propósito: declaración tipada de los campos de un paso (o de un
// sub-formulario) y la validación/coerción que gobierna el gate de
// transición. La normalización posterior de la fusión se apoya en estos
// mismos tipos declarados, nunca en convenciones de nombre de clave.
use crate::dates;
use crate::domain::{is_empty_value, FieldMap};
use crate::errors::ValidationErrors;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Mensaje estándar para campo requerido ausente.
pub const MSG_REQUIRED: &str = "campo requerido";
/// Mensaje estándar de la regla cruzada de orden de fechas.
pub const MSG_DATE_ORDER: &str = "la fecha de fin debe ser igual o posterior a la fecha de inicio";

/// Tipo declarado de un campo. Toda normalización (fechas, booleanos,
/// referencias) es una pasada dirigida por tabla sobre estos tipos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Date,
    Boolean,
    Enum,
    Text,
    Numeric,
    Reference,
}

/// Declaración de un campo de paso o de sub-formulario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDecl {
    pub key: String,
    pub field_type: FieldType,
    pub required: bool,
}

impl FieldDecl {
    /// Campo obligatorio: vacío bloquea la transición del paso.
    pub fn required(key: &str, field_type: FieldType) -> Self {
        Self { key: key.to_string(),
               field_type,
               required: true }
    }

    /// Campo opcional.
    pub fn optional(key: &str, field_type: FieldType) -> Self {
        Self { key: key.to_string(),
               field_type,
               required: false }
    }
}

/// Regla cruzada entre campos de un mismo paso. Se evalúa en el gate de
/// validación, no en cada pulsación.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CrossRule {
    /// La fecha en `end` debe ser el mismo día o posterior a la fecha en
    /// `start` (inclusiva: fechas iguales pasan). El error se reporta
    /// sobre el campo `end`.
    DateOrder { start: String, end: String },
}

/// Esquema de un paso del asistente (o del sub-formulario activo).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepSchema {
    pub name: String,
    pub fields: Vec<FieldDecl>,
    pub rules: Vec<CrossRule>,
}

impl StepSchema {
    pub fn new(name: &str, fields: Vec<FieldDecl>, rules: Vec<CrossRule>) -> Self {
        Self { name: name.to_string(),
               fields,
               rules }
    }

    /// Busca la declaración de una clave.
    pub fn decl(&self, key: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|d| d.key == key)
    }

    /// Valida y coerciona los valores de este paso.
    ///
    /// Devuelve el conjunto de valores declarados, ya coercionados a su
    /// tipo (fechas canónicas, numéricos como números, referencias como
    /// enteros), o el mapa de errores por campo que bloquea la
    /// transición. Las claves no declaradas se descartan.
    pub fn validate(&self, values: &FieldMap) -> std::result::Result<FieldMap, ValidationErrors> {
        let mut out = FieldMap::new();
        let mut errors = ValidationErrors::new();

        for decl in &self.fields {
            let raw = values.get(&decl.key);
            if is_empty_value(raw) {
                if decl.required {
                    errors.add(&decl.key, MSG_REQUIRED);
                }
                continue;
            }
            // raw presente y no vacío
            let raw = raw.cloned().unwrap_or(JsonValue::Null);
            match coerce_value(decl.field_type, raw) {
                Ok(v) => {
                    out.insert(decl.key.clone(), v);
                }
                Err(msg) => errors.add(&decl.key, &msg),
            }
        }

        for rule in &self.rules {
            match rule {
                CrossRule::DateOrder { start, end } => {
                    let s = out.get(start.as_str()).and_then(dates::parse_date);
                    let e = out.get(end.as_str()).and_then(dates::parse_date);
                    if let (Some(s), Some(e)) = (s, e) {
                        if !dates::same_or_after(e, s) {
                            errors.add(end, MSG_DATE_ORDER);
                        }
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(out)
        } else {
            Err(errors)
        }
    }
}

/// Coerciona un valor no vacío al tipo declarado.
///
/// Input: tipo declarado y valor crudo proveniente de la UI.
/// Output: valor normalizado, o el mensaje de error a reportar sobre el
/// campo.
pub fn coerce_value(field_type: FieldType, value: JsonValue) -> std::result::Result<JsonValue, String> {
    match field_type {
        FieldType::Date => match dates::normalize_date_value(&value) {
            Some(v) => Ok(v),
            None => Err("fecha inválida".to_string()),
        },
        FieldType::Boolean => match value {
            JsonValue::Bool(b) => Ok(JsonValue::Bool(b)),
            JsonValue::Number(ref n) => match n.as_i64() {
                Some(0) => Ok(JsonValue::Bool(false)),
                Some(1) => Ok(JsonValue::Bool(true)),
                _ => Err("booleano inválido".to_string()),
            },
            _ => Err("booleano inválido".to_string()),
        },
        FieldType::Numeric => match value {
            JsonValue::Number(n) => Ok(JsonValue::Number(n)),
            JsonValue::String(s) => {
                let t = s.trim();
                if let Ok(i) = t.parse::<i64>() {
                    return Ok(JsonValue::Number(i.into()));
                }
                t.parse::<f64>()
                 .ok()
                 .and_then(serde_json::Number::from_f64)
                 .map(JsonValue::Number)
                 .ok_or_else(|| "número inválido".to_string())
            }
            _ => Err("número inválido".to_string()),
        },
        FieldType::Reference => match value {
            JsonValue::Number(ref n) if n.as_i64().is_some() => Ok(value),
            JsonValue::String(s) => s.trim()
                                     .parse::<i64>()
                                     .map(|i| JsonValue::Number(i.into()))
                                     .map_err(|_| "referencia inválida".to_string()),
            _ => Err("referencia inválida".to_string()),
        },
        FieldType::Enum | FieldType::Text => match value {
            JsonValue::String(s) => Ok(JsonValue::String(s)),
            other => Err(format!("se esperaba texto, se recibió {}", other)),
        },
    }
}

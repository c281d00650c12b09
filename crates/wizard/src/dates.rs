// Archivo: dates.rs
// Propósito: normalización de fechas a la forma canónica `YYYY-MM-DD`
// que espera el backend, y la comparación inclusiva usada por las reglas
// cruzadas de los pasos.
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value as JsonValue;

/// Formato canónico de fecha en el contrato wire.
pub const CANONICAL_DATE: &str = "%Y-%m-%d";

/// Normaliza una cadena de fecha a `YYYY-MM-DD`.
///
/// Acepta la forma canónica (no-op, idempotente), datetimes RFC 3339 y
/// datetimes naive (`YYYY-MM-DDTHH:MM:SS` o con espacio); de un datetime
/// se toma sólo la porción de fecha. Devuelve `None` si la cadena no es
/// interpretable como fecha.
pub fn normalize_date_str(s: &str) -> Option<String> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, CANONICAL_DATE) {
        return Some(d.format(CANONICAL_DATE).to_string());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive().format(CANONICAL_DATE).to_string());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date().format(CANONICAL_DATE).to_string());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date().format(CANONICAL_DATE).to_string());
    }
    None
}

/// Normaliza un valor JSON de fecha. Sólo las cadenas se transforman;
/// `null` se conserva y cualquier otro tipo se devuelve sin tocar.
pub fn normalize_date_value(value: &JsonValue) -> Option<JsonValue> {
    match value {
        JsonValue::String(s) => normalize_date_str(s).map(JsonValue::String),
        _ => None,
    }
}

/// Interpreta un valor JSON como `NaiveDate` si es posible.
pub fn parse_date(value: &JsonValue) -> Option<NaiveDate> {
    match value {
        JsonValue::String(s) => {
            normalize_date_str(s).and_then(|c| NaiveDate::parse_from_str(&c, CANONICAL_DATE).ok())
        }
        _ => None,
    }
}

/// Comparación inclusiva: `end` es el mismo día o posterior a `start`.
/// Fechas iguales pasan.
pub fn same_or_after(end: NaiveDate, start: NaiveDate) -> bool {
    end >= start
}

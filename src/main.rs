use std::error::Error;
use std::io::{self, Write};

use crm_domain::ActionType;
use crm_forms::{FormEvent, FormFactory, SubForm};
use crm_gateway::MemoryBackend;
use serde_json::{json, Value as JsonValue};
use wizard::domain::FieldMap;
use wizard::gateway::{AttachmentStore, PersistenceGateway};
use wizard::schema::{FieldDecl, FieldType};

/// Pequeño menú interactivo para administrar acciones comerciales usando
/// la pasarela proporcionada por `crm-gateway`.
///
/// Opciones soportadas:
/// 1) Ver acciones
/// 2) Crear acción (asistente de tres pasos + sub-formulario)
/// 3) Ver detalle de una acción
/// 4) Adjuntar PDF a una acción
/// 5) Salir
fn main() -> Result<(), Box<dyn Error>> {
    // Inicializar la pasarela desde el entorno (.env si existe)
    let gateway = crm_gateway::new_from_env().map_err(|e| Box::new(e) as Box<dyn Error>)?;

    loop {
        println!("\n== CRM acciones ==");
        println!("1) Ver acciones");
        println!("2) Crear acción (asistente)");
        println!("3) Ver detalle de una acción");
        println!("4) Adjuntar PDF a una acción");
        println!("5) Salir");
        print!("Elige una opción: ");
        io::stdout().flush().ok();

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;
        match choice.trim() {
            "1" => match gateway.list() {
                Ok(records) => {
                    println!("\nID   | TYPE                | NAME");
                    println!("-------------------------------------------------");
                    for r in records {
                        let t = r.get("type").and_then(|v| v.as_str()).unwrap_or("-");
                        let name = r.get("name").and_then(|v| v.as_str()).unwrap_or("<sin nombre>");
                        println!("{:<4} | {:<19} | {}", r.id, t, name);
                    }
                }
                Err(e) => eprintln!("Error listando acciones: {}", e),
            },
            "2" => {
                if let Err(e) = create_action(&gateway) {
                    eprintln!("Creación abortada: {}", e);
                }
            }
            "3" => {
                let id = prompt("Id de la acción: ")?;
                match id.trim().parse::<i64>() {
                    Ok(id) => match gateway.fetch(id) {
                        Ok(record) => println!("{}", serde_json::to_string_pretty(&record.fields)?),
                        Err(e) => eprintln!("Error: {}", e),
                    },
                    Err(_) => eprintln!("Id inválido"),
                }
            }
            "4" => {
                if let Err(e) = attach_document(&gateway) {
                    eprintln!("Adjunto fallido: {}", e);
                }
            }
            "5" => break,
            _ => println!("Opción no reconocida"),
        }
    }
    Ok(())
}

/// Asistente de creación: tres pasos base y los campos del
/// sub-formulario del tipo elegido.
fn create_action(gateway: &MemoryBackend) -> Result<(), Box<dyn Error>> {
    let types = ActionType::ALL.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ");
    println!("Tipos disponibles: {}", types);
    let type_input = prompt("Tipo: ")?;
    let action_type: ActionType = type_input.trim().parse()?;
    let mut form = FormFactory::create(action_type)?;

    // Paso 0: identificación
    let name = prompt("Nombre: ")?;
    let description = prompt("Descripción (enter para vacío): ")?;
    let mut step0 = FieldMap::new();
    step0.insert("name".to_string(), json!(name.trim()));
    step0.insert("type".to_string(), json!(action_type.as_str()));
    if !description.trim().is_empty() {
        step0.insert("description".to_string(), json!(description.trim()));
    }
    form.next(&step0)?;

    // Paso 1: planificación (la fecha de inicio es el ancla)
    let mut step1 = FieldMap::new();
    for key in ["date_debut", "date_fin"] {
        let v = prompt(&format!("{} (YYYY-MM-DD, enter para vacío): ", key))?;
        if !v.trim().is_empty() {
            step1.insert(key.to_string(), json!(v.trim()));
        }
    }
    let ville = prompt("Ciudad (enter para vacío): ")?;
    if !ville.trim().is_empty() {
        step1.insert("ville".to_string(), json!(ville.trim()));
    }
    form.next(&step1)?;

    // Sub-formulario del tipo elegido (el campo ancla no se pregunta:
    // está bloqueado y deriva del asistente)
    let schema = form.subform().schema();
    let anchor = form.subform().anchor_field();
    for decl in &schema.fields {
        if Some(decl.key.as_str()) == anchor {
            continue;
        }
        if let Some(value) = prompt_field(decl)? {
            form.apply(FormEvent::SubFormFieldChanged { key: decl.key.clone(),
                                                        value })?;
        }
    }

    // Paso final: seguimiento y envío
    let mut step2 = FieldMap::new();
    let statut = prompt("Estado (enter para vacío): ")?;
    if !statut.trim().is_empty() {
        step2.insert("statut".to_string(), json!(statut.trim()));
    }
    match form.submit(gateway, &step2) {
        Ok(record) => println!("Acción creada: {}", record.id),
        Err(e) => eprintln!("Envío rechazado: {}", e),
    }
    Ok(())
}

/// Pregunta el valor de un campo del sub-formulario según su tipo
/// declarado. Devuelve `None` si el usuario lo deja vacío.
fn prompt_field(decl: &FieldDecl) -> Result<Option<JsonValue>, Box<dyn Error>> {
    let hint = match decl.field_type {
        FieldType::Date => "YYYY-MM-DD",
        FieldType::Boolean => "0/1",
        FieldType::Numeric => "número",
        FieldType::Reference => "id",
        FieldType::Enum | FieldType::Text => "texto",
    };
    let suffix = if decl.required { "obligatorio" } else { "enter para vacío" };
    let input = prompt(&format!("{} ({}, {}): ", decl.key, hint, suffix))?;
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let value = match decl.field_type {
        FieldType::Boolean => json!(input == "1"),
        _ => JsonValue::String(input.to_string()),
    };
    Ok(Some(value))
}

fn attach_document(gateway: &MemoryBackend) -> Result<(), Box<dyn Error>> {
    let id = prompt("Id de la acción: ")?.trim().parse::<i64>()?;
    let path = prompt("Ruta del PDF: ")?;
    let bytes = std::fs::read(path.trim())?;
    let filename = path.trim().rsplit('/').next().unwrap_or("document.pdf").to_string();
    let key = gateway.put(id, &filename, &bytes)?;
    println!("Adjunto almacenado como {}", key);
    Ok(())
}

fn prompt(message: &str) -> Result<String, Box<dyn Error>> {
    print!("{}", message);
    io::stdout().flush().ok();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

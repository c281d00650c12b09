use indexmap::IndexMap;
use serde_json::json;
use wizard::domain::FieldMap;
use wizard::draft::{Draft, DraftEvent};
use wizard::errors::WizardError;
use wizard::gateway::PersistenceGateway;
use wizard::merge::Merger;
use wizard::schema::{CrossRule, FieldDecl, FieldType, StepSchema};
use wizard::sequencer::StepSequencer;
use wizard::stubs::InMemoryGateway;

fn main() -> Result<(), WizardError> {
    // Dos pasos: identificación y planificación
    let steps = vec![StepSchema::new("identificacion",
                                     vec![FieldDecl::required("name", FieldType::Text)],
                                     vec![]),
                     StepSchema::new("planificacion",
                                     vec![FieldDecl::optional("date_debut", FieldType::Date),
                                          FieldDecl::optional("date_fin", FieldType::Date)],
                                     vec![CrossRule::DateOrder { start: "date_debut".into(),
                                                                 end: "date_fin".into() }])];
    let mut sequencer = StepSequencer::new(steps);
    let mut draft = Draft::new("name", "date_debut");

    // El sub-formulario notifica su snapshot completo
    let mut subform = FieldMap::new();
    subform.insert("pays_id".to_string(), json!("3"));
    draft.apply(DraftEvent::SubFormFieldsChanged(subform));

    // Avanzar el primer paso con valores válidos
    let mut step0 = FieldMap::new();
    step0.insert("name".to_string(), json!("Mission export"));
    sequencer.next(&mut draft, &step0)?;
    println!("paso actual: {}", sequencer.current());

    // Capturar el paso final y fusionar
    let mut step1 = FieldMap::new();
    step1.insert("date_debut".to_string(), json!("2025-03-10T09:00:00Z"));
    sequencer.capture_final(&mut draft, &step1)?;

    let mut types = IndexMap::new();
    types.insert("name".to_string(), FieldType::Text);
    types.insert("date_debut".to_string(), FieldType::Date);
    types.insert("pays_id".to_string(), FieldType::Reference);
    let payload = Merger::new(types).merge(&draft)?;
    println!("payload: {}", serde_json::to_string_pretty(&payload).unwrap_or_default());

    // Enviar a la pasarela en memoria
    let gateway = InMemoryGateway::new();
    let record = gateway.create(&payload)?;
    println!("registro creado: {}", record.id);
    Ok(())
}

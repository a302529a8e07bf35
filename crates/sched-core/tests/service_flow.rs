//! Servicio de sumisión sobre stores en memoria: traducción de
//! not-found, resolución, fingerprint y persistencia.

use sched_core::{run_fingerprint, CoreError, SubmissionService};
use sched_domain::{Model, ModelParameter, Parameter, ParameterKind, ParameterValue, ResolveError, Run, Template,
                   TemplateParameter, ValidationError};

fn schema() -> Model {
    Model::new("Surgical unit schedule").unwrap()
                                        .with_parameters(vec![ModelParameter::new("sessions", ParameterKind::Int).unwrap()
                                                                                                                 .bounded(0, 40)
                                                                                                                 .unwrap()
                                                                                                                 .valued(20)
                                                                                                                 .unwrap(),
                                                              ModelParameter::new("weight", ParameterKind::Double).unwrap()
                                                                                                                  .bounded(0.0, 1.0)
                                                                                                                  .unwrap()
                                                                                                                  .valued(0.5)
                                                                                                                  .unwrap()])
                                        .unwrap()
}

/// Servicio con modelo y template ya registrados; devuelve también los
/// ids asignados.
fn seeded_service() -> (SubmissionService<sched_core::InMemoryStore<Model>,
                                          sched_core::InMemoryStore<Template>,
                                          sched_core::InMemoryStore<Run>>,
                        String,
                        String) {
    let mut service = SubmissionService::in_memory();
    let model = service.register_model(schema());
    let model_id = model.id().unwrap().to_string();

    let mut template = Template::for_model(model_id.clone());
    template.set_parameters(vec![TemplateParameter::with_value("sessions", 28).unwrap(),
                                 TemplateParameter::with_value("weight", 0.9).unwrap().fixed(true)]);
    let template = service.register_template(template).unwrap();
    let template_id = template.id().unwrap().to_string();

    (service, model_id, template_id)
}

#[test]
fn submit_resolves_stamps_and_persists() {
    let (mut service, model_id, template_id) = seeded_service();

    let mut run = Run::new();
    run.set_model_id(Some(model_id));
    run.set_template_id(Some(template_id));
    run.set_parameters(vec![Parameter::with_value("sessions", 32).unwrap()]);

    let stored = service.submit(run).unwrap();

    // resuelta con la forma del modelo y persistida con id propio
    assert_eq!(stored.parameters().len(), 2);
    assert_eq!(stored.parameter("sessions").unwrap().unwrap().value(),
               Some(&ParameterValue::Int(32)));
    assert_eq!(stored.parameter("weight").unwrap().unwrap().value(),
               Some(&ParameterValue::Float(0.9)));
    assert!(stored.submitted_at().is_some());

    let id = stored.id().expect("id asignado por el store");
    let reloaded = service.run(id).unwrap();
    assert_eq!(reloaded.fingerprint(), stored.fingerprint());
}

#[test]
fn fingerprint_depends_only_on_the_resolved_set() {
    let (mut service, model_id, template_id) = seeded_service();

    let mut run = Run::new();
    run.set_model_id(Some(model_id));
    run.set_template_id(Some(template_id));
    run.set_parameters(vec![Parameter::with_value("sessions", 32).unwrap()]);

    let first = service.submit(run.clone()).unwrap();
    let second = service.submit(run).unwrap();

    // dos sumisiones distintas con el mismo conjunto resuelto
    assert_ne!(first.id(), second.id());
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert_eq!(first.fingerprint().unwrap(), run_fingerprint(&second));
}

#[test]
fn missing_model_reference_is_reported_first() {
    let (mut service, _model_id, template_id) = seeded_service();

    let mut run = Run::new();
    run.set_template_id(Some(template_id));

    assert!(matches!(service.submit(run), Err(CoreError::MissingReference("model"))));
}

#[test]
fn store_misses_translate_to_not_found() {
    let (mut service, model_id, _template_id) = seeded_service();

    // modelo inexistente
    let mut run = Run::new();
    run.set_model_id(Some("ghost".into()));
    run.set_template_id(Some("t".into()));
    match service.submit(run) {
        Err(CoreError::NotFound { entity, id }) => {
            assert_eq!(entity, "model");
            assert_eq!(id, "ghost");
        }
        other => panic!("expected model not found, got {other:?}"),
    }

    // template inexistente, con modelo válido
    let mut run = Run::new();
    run.set_model_id(Some(model_id));
    run.set_template_id(Some("ghost".into()));
    assert!(matches!(service.submit(run),
                     Err(CoreError::NotFound { entity: "template", .. })));
}

#[test]
fn resolution_errors_surface_through_the_service() {
    let (mut service, model_id, template_id) = seeded_service();

    let mut run = Run::new();
    run.set_model_id(Some(model_id));
    run.set_template_id(Some(template_id));
    // weight es fijo en el template
    run.set_parameters(vec![Parameter::with_value("weight", 0.1).unwrap()]);

    assert!(matches!(service.submit(run),
                     Err(CoreError::Resolve(ResolveError::Validation(ValidationError::Fixed { .. })))));
}

#[test]
fn register_template_validates_against_its_model() {
    let mut service = SubmissionService::in_memory();
    let model = service.register_model(schema());

    let mut template = Template::for_model(model.id().unwrap());
    template.set_parameters(vec![TemplateParameter::with_value("sessions", 99).unwrap()]);

    // fuera de rango: el template no se registra
    assert!(matches!(service.register_template(template),
                     Err(CoreError::Resolve(ResolveError::Validation(ValidationError::OutOfRange { .. })))));
}

#[test]
fn resolve_template_returns_the_model_shaped_template() {
    let (service, _model_id, template_id) = seeded_service();

    let resolved = service.resolve_template(&template_id).unwrap();
    let names: Vec<&str> = resolved.parameters().iter().map(|tp| tp.name()).collect();
    assert_eq!(names, vec!["sessions", "weight"]);

    assert!(matches!(service.resolve_template("ghost"),
                     Err(CoreError::NotFound { entity: "template", .. })));
}

//! Cascada de tres niveles: corrida contra template y esquema, con
//! precedencia Run > Template > Model.

use sched_domain::{Model, ModelParameter, Parameter, ParameterKind, ParameterValue, ResolveError, Run, Template,
                   TemplateParameter, ValidationError};

/// Esquema p1..p5 con los cuatro kinds; p5 sin default.
fn schema() -> Model {
    let mut model = Model::new("Surgical unit schedule").unwrap();
    model.set_id(Some("m-1".into()));
    model.set_parameters(vec![ModelParameter::new("p1", ParameterKind::Int).unwrap()
                                                                           .bounded(0, 100)
                                                                           .unwrap()
                                                                           .valued(50)
                                                                           .unwrap(),
                              ModelParameter::new("p2", ParameterKind::String).unwrap().valued("standard").unwrap(),
                              ModelParameter::new("p3", ParameterKind::Double).unwrap()
                                                                              .bounded(0.0, 1.0)
                                                                              .unwrap()
                                                                              .valued(0.5)
                                                                              .unwrap(),
                              ModelParameter::new("p4", ParameterKind::Boolean).unwrap().valued(false).unwrap(),
                              ModelParameter::new("p5", ParameterKind::Int).unwrap()])
         .unwrap();
    model
}

/// Template que declara p1..p4: p1 abierto en 10, p2 abierto, p3 fijo,
/// p4 abierto.
fn template() -> Template {
    let mut template = Template::for_model("m-1");
    template.set_id(Some("t-1".into()));
    template.set_parameters(vec![TemplateParameter::with_value("p1", 10).unwrap(),
                                 TemplateParameter::with_value("p2", "fast").unwrap(),
                                 TemplateParameter::with_value("p3", 0.9).unwrap().fixed(true),
                                 TemplateParameter::with_value("p4", true).unwrap()]);
    template
}

fn run_for(template: &Template) -> Run {
    Run::from_template(template)
}

#[test]
fn template_tier_is_revalidated_first() {
    let model = schema();
    // template inválido (valor fuera de rango) y run con modelo ajeno:
    // gana el error del template
    let mut template = template();
    template.set_parameters(vec![TemplateParameter::with_value("p1", 999).unwrap()]);
    let mut run = run_for(&template);
    run.set_model_id(Some("otro".into()));

    assert!(matches!(model.resolve_run(&template, &run),
                     Err(ResolveError::Validation(ValidationError::OutOfRange { .. }))));
}

#[test]
fn illegal_state_when_template_has_no_identifier() {
    let model = schema();
    let mut template = template();
    template.set_id(None);
    let mut run = Run::new();
    run.set_model_id(Some("m-1".into()));

    assert!(matches!(model.resolve_run(&template, &run), Err(ResolveError::IllegalState(_))));
}

#[test]
fn mismatch_when_run_references_another_template() {
    let model = schema();
    let template = template();
    let mut run = run_for(&template);
    run.set_template_id(Some("t-9".into()));

    match model.resolve_run(&template, &run) {
        Err(ResolveError::Mismatch { entity, expected, found }) => {
            assert_eq!(entity, "template");
            assert_eq!(expected, "t-1");
            assert_eq!(found.as_deref(), Some("t-9"));
        }
        other => panic!("expected template mismatch, got {other:?}"),
    }
}

#[test]
fn mismatch_when_run_template_id_is_unset() {
    let model = schema();
    let template = template();
    let mut run = run_for(&template);
    run.set_template_id(None);

    assert!(matches!(model.resolve_run(&template, &run),
                     Err(ResolveError::Mismatch { entity, .. }) if entity == "template"));
}

#[test]
fn mismatch_when_run_references_another_model() {
    let model = schema();
    let template = template();
    let mut run = run_for(&template);
    run.set_model_id(Some("m-9".into()));

    match model.resolve_run(&template, &run) {
        Err(ResolveError::Mismatch { entity, expected, found }) => {
            assert_eq!(entity, "model");
            assert_eq!(expected, "m-1");
            assert_eq!(found.as_deref(), Some("m-9"));
        }
        other => panic!("expected model mismatch, got {other:?}"),
    }
}

#[test]
fn template_identity_is_checked_before_model_identity() {
    let model = schema();
    let template = template();
    let mut run = run_for(&template);
    run.set_template_id(Some("t-9".into()));
    run.set_model_id(Some("m-9".into()));

    assert!(matches!(model.resolve_run(&template, &run),
                     Err(ResolveError::Mismatch { entity, .. }) if entity == "template"));
}

#[test]
fn duplicate_run_parameter_is_rejected() {
    let model = schema();
    let template = template();
    let mut run = run_for(&template);
    run.set_parameters(vec![Parameter::with_value("p1", 11).unwrap(),
                            Parameter::with_value("p1", 12).unwrap()]);

    match model.resolve_run(&template, &run) {
        Err(ResolveError::Validation(ValidationError::Duplicate { name })) => assert_eq!(name, "p1"),
        other => panic!("expected duplicate parameter, got {other:?}"),
    }
}

#[test]
fn run_parameter_must_be_declared_by_the_template() {
    let model = schema();
    let template = template();
    let mut run = run_for(&template);
    // p5 existe en el modelo pero el template no lo declara
    run.set_parameters(vec![Parameter::with_value("p5", 1).unwrap()]);

    match model.resolve_run(&template, &run) {
        Err(ResolveError::Validation(ValidationError::Undeclared { name })) => assert_eq!(name, "p5"),
        other => panic!("expected undeclared parameter, got {other:?}"),
    }

    // y un nombre que no existe en ninguna capa reporta lo mismo
    let mut run = run_for(&template);
    run.set_parameters(vec![Parameter::with_value("ghost", 1).unwrap()]);
    assert!(matches!(model.resolve_run(&template, &run),
                     Err(ResolveError::Validation(ValidationError::Undeclared { .. }))));
}

#[test]
fn fixed_template_parameter_cannot_be_overridden() {
    let model = schema();
    let template = template();
    let mut run = run_for(&template);
    run.set_parameters(vec![Parameter::with_value("p3", 0.4).unwrap()]);

    match model.resolve_run(&template, &run) {
        Err(ResolveError::Validation(ValidationError::Fixed { name })) => assert_eq!(name, "p3"),
        other => panic!("expected fixed parameter, got {other:?}"),
    }
}

#[test]
fn untouched_fixed_parameter_keeps_the_template_value() {
    let model = schema();
    let template = template();
    let run = run_for(&template);

    let resolved = model.resolve_run(&template, &run).unwrap();
    assert_eq!(resolved.parameter("p3").unwrap().unwrap().value(),
               Some(&ParameterValue::Float(0.9)));
}

#[test]
fn run_values_are_type_checked_against_the_model() {
    let model = schema();
    let template = template();
    let mut run = run_for(&template);
    run.set_parameters(vec![Parameter::with_value("p1", "once").unwrap()]);

    assert!(matches!(model.resolve_run(&template, &run),
                     Err(ResolveError::Validation(ValidationError::TypeMismatch { .. }))));

    // un flotante donde se declara int tampoco entra
    let mut run = run_for(&template);
    run.set_parameters(vec![Parameter::with_value("p1", 11.5).unwrap()]);
    assert!(matches!(model.resolve_run(&template, &run),
                     Err(ResolveError::Validation(ValidationError::TypeMismatch { .. }))));
}

#[test]
fn run_values_are_range_checked_against_the_model() {
    let model = schema();
    let template = template();
    let mut run = run_for(&template);
    run.set_parameters(vec![Parameter::with_value("p1", 101).unwrap()]);

    match model.resolve_run(&template, &run) {
        Err(ResolveError::Validation(ValidationError::OutOfRange { name, value, .. })) => {
            assert_eq!(name, "p1");
            assert_eq!(value, ParameterValue::Int(101));
        }
        other => panic!("expected out of range, got {other:?}"),
    }
}

#[test]
fn precedence_is_run_then_template_then_model() {
    let model = schema();
    let template = template();
    let mut run = run_for(&template);
    // la corrida sólo pisa p1 (el template lo tenía en 10)
    run.set_parameters(vec![Parameter::with_value("p1", 11).unwrap()]);

    let resolved = model.resolve_run(&template, &run).unwrap();

    // cinco parámetros, forma del modelo
    let names: Vec<&str> = resolved.parameters().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["p1", "p2", "p3", "p4", "p5"]);

    // p1 del run, p2..p4 del template, p5 del modelo (sin default)
    assert_eq!(resolved.parameter("p1").unwrap().unwrap().value(), Some(&ParameterValue::Int(11)));
    assert_eq!(resolved.parameter("p2").unwrap().unwrap().value(),
               Some(&ParameterValue::Text("fast".into())));
    assert_eq!(resolved.parameter("p3").unwrap().unwrap().value(), Some(&ParameterValue::Float(0.9)));
    assert_eq!(resolved.parameter("p4").unwrap().unwrap().value(), Some(&ParameterValue::Bool(true)));
    assert_eq!(resolved.parameter("p5").unwrap().unwrap().value(), None);
}

#[test]
fn model_default_fills_parameters_missing_from_both_layers() {
    let model = schema();
    // template que sólo declara p1: p2..p4 vienen del default del modelo
    let mut template = Template::for_model("m-1");
    template.set_id(Some("t-2".into()));
    template.set_parameters(vec![TemplateParameter::with_value("p1", 10).unwrap()]);
    let run = run_for(&template);

    let resolved = model.resolve_run(&template, &run).unwrap();
    assert_eq!(resolved.parameters().len(), 5);
    assert_eq!(resolved.parameter("p2").unwrap().unwrap().value(),
               Some(&ParameterValue::Text("standard".into())));
    assert_eq!(resolved.parameter("p3").unwrap().unwrap().value(), Some(&ParameterValue::Float(0.5)));
    assert_eq!(resolved.parameter("p4").unwrap().unwrap().value(), Some(&ParameterValue::Bool(false)));
}

#[test]
fn run_override_is_widened_to_the_declared_kind() {
    let model = schema();
    // abrir p3 para poder pisarlo desde el run
    let mut template = Template::for_model("m-1");
    template.set_id(Some("t-3".into()));
    template.set_parameters(vec![TemplateParameter::with_value("p3", 0.9).unwrap()]);
    let mut run = run_for(&template);
    run.set_parameters(vec![Parameter::with_value("p3", 1).unwrap()]);

    let resolved = model.resolve_run(&template, &run).unwrap();
    assert_eq!(resolved.parameter("p3").unwrap().unwrap().value(), Some(&ParameterValue::Float(1.0)));
}

#[test]
fn run_override_without_value_resolves_to_unset() {
    let model = schema();
    let template = template();
    let mut run = run_for(&template);
    // declarar p1 sin valor: el override gana igual y deja p1 sin asignar
    run.set_parameters(vec![Parameter::new("p1").unwrap()]);

    let resolved = model.resolve_run(&template, &run).unwrap();
    assert_eq!(resolved.parameter("p1").unwrap().unwrap().value(), None);
}

#[test]
fn resolve_run_is_idempotent() {
    let model = schema();
    // template totalmente abierto sobre los cinco parámetros, para que
    // una corrida resuelta siga siendo una corrida válida
    let mut template = Template::for_model("m-1");
    template.set_id(Some("t-4".into()));
    template.set_parameters(vec![TemplateParameter::with_value("p1", 10).unwrap(),
                                 TemplateParameter::with_value("p2", "fast").unwrap(),
                                 TemplateParameter::with_value("p3", 0.9).unwrap(),
                                 TemplateParameter::with_value("p4", true).unwrap(),
                                 TemplateParameter::new("p5").unwrap()]);
    let mut run = run_for(&template);
    run.set_parameters(vec![Parameter::with_value("p1", 11).unwrap()]);

    let once = model.resolve_run(&template, &run).unwrap();
    let twice = model.resolve_run(&template, &once).unwrap();

    assert_eq!(once.parameters().len(), twice.parameters().len());
    for (a, b) in once.parameters().iter().zip(twice.parameters()) {
        assert_eq!(a.name(), b.name());
        assert_eq!(a.value(), b.value(), "valor de {}", a.name());
    }
}

#[test]
fn resolution_preserves_run_metadata_and_inputs() {
    let model = schema();
    let template = template();
    let mut run = run_for(&template);
    run.set_label(Some("January catch-up".into()));
    run.set_parameters(vec![Parameter::with_value("p1", 11).unwrap()]);
    let before = run.clone();

    let resolved = model.resolve_run(&template, &run).unwrap();

    // la corrida resuelta conserva identidad y metadatos
    assert_eq!(resolved.label(), Some("January catch-up"));
    assert_eq!(resolved.model_id(), Some("m-1"));
    assert_eq!(resolved.template_id(), Some("t-1"));

    // y la de entrada no fue tocada
    assert_eq!(run.parameters().len(), before.parameters().len());
    assert_eq!(run.parameter("p1").unwrap().unwrap().value(), Some(&ParameterValue::Int(11)));
}

#[test]
fn validate_run_runs_the_same_checks_without_building() {
    let model = schema();
    let template = template();

    let mut run = run_for(&template);
    run.set_parameters(vec![Parameter::with_value("p1", 11).unwrap()]);
    assert!(model.validate_run(&template, &run).is_ok());

    run.set_parameters(vec![Parameter::with_value("p3", 0.4).unwrap()]);
    assert!(matches!(model.validate_run(&template, &run),
                     Err(ResolveError::Validation(ValidationError::Fixed { .. }))));
}

#[test]
fn first_violation_of_the_run_scan_wins() {
    let model = schema();
    let template = template();
    let mut run = run_for(&template);
    // el fixed de p3 aparece antes que el p1 fuera de rango
    run.set_parameters(vec![Parameter::with_value("p3", 0.4).unwrap(),
                            Parameter::with_value("p1", 999).unwrap()]);

    match model.resolve_run(&template, &run) {
        Err(ResolveError::Validation(err)) => assert_eq!(err.parameter_name(), "p3"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

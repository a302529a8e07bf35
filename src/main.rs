//! Demo de la cascada de resolución sobre stores en memoria.
//!
//! Arma un esquema de planificación quirúrgica, un template preparado
//! por alguien que conoce el modelo, y una sumisión que pisa uno de los
//! parámetros abiertos. Imprime el conjunto resuelto y su fingerprint.

use schedflow_rust::{Model, ModelParameter, Objective, Parameter, ParameterKind, Run, SubmissionService, Template,
                     TemplateParameter};

fn build_schema() -> Model {
    let objectives = vec![Objective::with_label("waitlist", "Waiting list reduction")
                              .expect("objective name")
                              .described("Patients taken off the waiting list within the horizon"),
                          Objective::with_label("overtime", "Theatre overtime").expect("objective name")];

    let parameters = vec![ModelParameter::new("maxSessionsPerWeek", ParameterKind::Int).expect("schema parameter")
                                                                                       .bounded(0, 40)
                                                                                       .expect("range")
                                                                                       .valued(20)
                                                                                       .expect("default")
                                                                                       .labeled("Theatre sessions per week"),
                          ModelParameter::new("waitlistWeight", ParameterKind::Double).expect("schema parameter")
                                                                                      .bounded(0.0, 1.0)
                                                                                      .expect("range")
                                                                                      .valued(0.7)
                                                                                      .expect("default")
                                                                                      .for_objective("waitlist"),
                          ModelParameter::new("overtimeWeight", ParameterKind::Double).expect("schema parameter")
                                                                                      .bounded(0.0, 1.0)
                                                                                      .expect("range")
                                                                                      .valued(0.3)
                                                                                      .expect("default")
                                                                                      .for_objective("overtime"),
                          ModelParameter::new("allowWeekendSessions", ParameterKind::Boolean).expect("schema parameter")
                                                                                             .valued(false)
                                                                                             .expect("default"),
                          ModelParameter::new("horizonLabel", ParameterKind::String).expect("schema parameter")
                                                                                    .valued("4-weeks")
                                                                                    .expect("default")];

    Model::new("Surgical unit schedule").expect("model label")
                                        .with_objectives(objectives)
                                        .with_parameters(parameters)
                                        .expect("schema uniqueness")
}

fn main() {
    let mut service = SubmissionService::in_memory();

    // Esquema y template quedan persistidos con id asignado por el store.
    let model = service.register_model(build_schema());
    let model_id = model.id().expect("stored model id").to_string();

    let mut template = Template::for_model(model_id.clone());
    template.set_label(Some("Waitlist recovery plan".into()));
    template.set_parameters(vec![TemplateParameter::with_value("maxSessionsPerWeek", 28).expect("override"),
                                 TemplateParameter::with_value("waitlistWeight", 0.9).expect("override").fixed(true)]);
    let template = service.register_template(template).expect("template valid against the model");

    // La sumisión pisa el único parámetro que el template dejó abierto.
    let mut run = Run::from_template(&template);
    run.set_label(Some("January catch-up".into()));
    run.set_parameters(vec![Parameter::with_value("maxSessionsPerWeek", 32).expect("override")]);

    match service.submit(run) {
        Ok(resolved) => {
            println!("run {} resolved against model {model_id}", resolved.id().unwrap_or("?"));
            for (name, value) in resolved.parameter_values() {
                match value {
                    Some(value) => println!("  {name} = {value}"),
                    None => println!("  {name} = <unset>"),
                }
            }
            println!("fingerprint: {}", resolved.fingerprint().unwrap_or("?"));
        }
        Err(err) => eprintln!("submission rejected: {err}"),
    }
}

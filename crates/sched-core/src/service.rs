//! Servicio de sumisión: carga entidades por id, resuelve y persiste.

use chrono::Utc;
use log::{debug, warn};

use sched_domain::{Model, Run, Template};

use crate::errors::CoreError;
use crate::hashing::run_fingerprint;
use crate::store::{EntityStore, InMemoryStore};

/// Orquesta una sumisión completa: resuelve los identificadores que
/// trae la corrida contra los stores (model primero, template después;
/// un `None` del store se traduce acá en not-found, el motor nunca ve
/// entidades ausentes), delega la cascada en el modelo, estampa fecha y
/// fingerprint del resultado y lo persiste como registro de lo enviado.
#[derive(Debug)]
pub struct SubmissionService<MS, TS, RS>
    where MS: EntityStore<Model>,
          TS: EntityStore<Template>,
          RS: EntityStore<Run>
{
    models: MS,
    templates: TS,
    runs: RS,
}

impl SubmissionService<InMemoryStore<Model>, InMemoryStore<Template>, InMemoryStore<Run>> {
    /// Servicio con stores en memoria.
    pub fn in_memory() -> Self {
        Self::with_stores(InMemoryStore::new(), InMemoryStore::new(), InMemoryStore::new())
    }
}

impl<MS, TS, RS> SubmissionService<MS, TS, RS>
    where MS: EntityStore<Model>,
          TS: EntityStore<Template>,
          RS: EntityStore<Run>
{
    pub fn with_stores(models: MS, templates: TS, runs: RS) -> Self {
        Self { models,
               templates,
               runs }
    }

    pub fn models(&mut self) -> &mut MS {
        &mut self.models
    }

    pub fn templates(&mut self) -> &mut TS {
        &mut self.templates
    }

    pub fn runs(&mut self) -> &mut RS {
        &mut self.runs
    }

    /// Registra un modelo y devuelve la copia guardada (con id).
    pub fn register_model(&mut self, model: Model) -> Model {
        self.models.save(model)
    }

    /// Registra un template validándolo antes contra su modelo.
    pub fn register_template(&mut self, template: Template) -> Result<Template, CoreError> {
        let model = self.model_for(template.model_id())?;
        model.validate_template(&template)?;
        Ok(self.templates.save(template))
    }

    /// Resuelve el template identificado contra su modelo y devuelve el
    /// template completo con la forma del modelo. No persiste nada.
    pub fn resolve_template(&self, template_id: &str) -> Result<Template, CoreError> {
        let template = self.templates
                           .get(template_id)
                           .ok_or_else(|| CoreError::NotFound { entity: "template",
                                                                id: template_id.to_string() })?;
        let model = self.model_for(template.model_id())?;
        Ok(model.resolve_template(&template)?)
    }

    /// Sumisión completa de una corrida.
    pub fn submit(&mut self, run: Run) -> Result<Run, CoreError> {
        let model = self.model_for(run.model_id())?;

        let template_id = run.template_id().ok_or(CoreError::MissingReference("template"))?;
        let template = self.templates
                           .get(template_id)
                           .ok_or_else(|| CoreError::NotFound { entity: "template",
                                                                id: template_id.to_string() })?;

        let mut resolved = match model.resolve_run(&template, &run) {
            Ok(resolved) => resolved,
            Err(err) => {
                warn!("submission rejected: {err}");
                return Err(err.into());
            }
        };
        resolved.set_submitted_at(Some(Utc::now()));
        resolved.set_fingerprint(Some(run_fingerprint(&resolved)));

        let stored = self.runs.save(resolved);
        debug!("submit run id={:?} fingerprint={:?}", stored.id(), stored.fingerprint());
        Ok(stored)
    }

    /// Recupera una corrida persistida.
    pub fn run(&self, id: &str) -> Option<Run> {
        self.runs.get(id)
    }

    fn model_for(&self, model_id: Option<&str>) -> Result<Model, CoreError> {
        let model_id = model_id.ok_or(CoreError::MissingReference("model"))?;
        self.models.get(model_id).ok_or_else(|| CoreError::NotFound { entity: "model",
                                                                      id: model_id.to_string() })
    }
}

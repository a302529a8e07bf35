//! Template: subconjunto con nombre de overrides sobre un modelo.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::errors::{ResolveError, ValidationError};
use crate::parameter::Parameter;
use crate::run::Run;
use crate::template_parameter::TemplateParameter;

/// Paquete de configuración preparado para un modelo concreto: un
/// subconjunto disperso de sus parámetros con defaults sensatos, cada
/// uno fijo (inmutable aguas abajo) o abierto a override por el run.
///
/// El template no almacena información de tipos; los chequeos de
/// tipo/rango sólo ocurren cuando el modelo participa de la cascada.
/// Las operaciones de acá abajo son los chequeos locales al template:
/// pertenencia, duplicados y la marca `fixed`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Template {
    id: Option<String>,
    model_id: Option<String>,
    label: Option<String>,
    description: Option<String>,
    parameters: Vec<TemplateParameter>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Crea un template preparado para el modelo con el id dado.
    pub fn for_model(model_id: impl Into<String>) -> Self {
        Self { model_id: Some(model_id.into()),
               ..Self::default() }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    pub fn model_id(&self) -> Option<&str> {
        self.model_id.as_deref()
    }

    pub fn set_model_id(&mut self, model_id: Option<String>) {
        self.model_id = model_id;
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn parameters(&self) -> &[TemplateParameter] {
        &self.parameters
    }

    /// La lista es dispersa y no deduplica: los duplicados se detectan
    /// recién al validar/resolver.
    pub fn set_parameters(&mut self, parameters: Vec<TemplateParameter>) {
        self.parameters = parameters;
    }

    pub fn add_parameter(&mut self, parameter: TemplateParameter) {
        self.parameters.push(parameter);
    }

    /// Busca un parámetro declarado por nombre. El nombre no puede ser
    /// vacío.
    pub fn parameter(&self, name: &str) -> Result<Option<&TemplateParameter>, ResolveError> {
        if name.is_empty() {
            return Err(ResolveError::InvalidInput("parameter 'name' cannot be empty".to_string()));
        }
        Ok(self.find(name))
    }

    pub(crate) fn find(&self, name: &str) -> Option<&TemplateParameter> {
        self.parameters.iter().find(|tp| tp.name() == name)
    }

    /// Chequeos locales al template sobre una corrida: identidad de
    /// template y modelo, duplicados, pertenencia y marca `fixed`. No
    /// hay chequeo de tipo ni rango acá.
    pub fn validate(&self, run: &Run) -> Result<(), ResolveError> {
        self.checked_run_scan(run)?;
        Ok(())
    }

    /// Rebuild de la corrida con los parámetros del template que el run
    /// no declaró. Los inputs no se mutan; se devuelve una corrida
    /// nueva con los parámetros del run primero y los restantes del
    /// template a continuación, en el orden en que el template los
    /// declara.
    pub fn populate(&self, run: &Run) -> Result<Run, ResolveError> {
        self.checked_run_scan(run)?;

        let mut parameters: Vec<Parameter> = run.parameters().to_vec();
        for tp in &self.parameters {
            if run.find(tp.name()).is_none() {
                parameters.push(Parameter::from_parts(tp.name().to_string(), tp.value().cloned()));
            }
        }

        let mut populated = run.clone();
        populated.set_parameters(parameters);
        Ok(populated)
    }

    /// Pasada única izquierda→derecha sobre los parámetros del run,
    /// precedida por los cross-checks de identidad.
    fn checked_run_scan(&self, run: &Run) -> Result<(), ResolveError> {
        let id = self.id.as_deref().ok_or_else(|| {
                     ResolveError::IllegalState("cannot validate a run against a template without identifier".to_string())
                 })?;
        if run.template_id() != Some(id) {
            return Err(ResolveError::Mismatch { entity: "template".to_string(),
                                                expected: id.to_string(),
                                                found: run.template_id().map(str::to_string) });
        }

        let model_id = self.model_id.as_deref().ok_or_else(|| {
                           ResolveError::IllegalState("cannot validate a run against a template without model identifier".to_string())
                       })?;
        if run.model_id() != Some(model_id) {
            return Err(ResolveError::Mismatch { entity: "model".to_string(),
                                                expected: model_id.to_string(),
                                                found: run.model_id().map(str::to_string) });
        }

        let mut seen: IndexSet<&str> = IndexSet::with_capacity(run.parameters().len());
        for rp in run.parameters() {
            if !seen.insert(rp.name()) {
                return Err(ValidationError::Duplicate { name: rp.name().to_string() }.into());
            }
            let tp = self.find(rp.name())
                         .ok_or_else(|| ValidationError::Undeclared { name: rp.name().to_string() })?;
            if tp.is_fixed() {
                return Err(ValidationError::Fixed { name: rp.name().to_string() }.into());
            }
        }
        Ok(())
    }
}

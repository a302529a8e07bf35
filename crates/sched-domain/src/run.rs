//! Una sumisión de trabajo: los valores finales de una corrida.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ResolveError;
use crate::parameter::Parameter;
use crate::template::Template;
use crate::value::ParameterValue;

/// Corrida de optimización. Antes de resolver contiene los overrides
/// dispersos que aportó el caller; después de resolver contiene la
/// lista completa con la forma del modelo, y es lo que se persiste como
/// registro de lo efectivamente enviado al solver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Run {
    id: Option<String>,
    model_id: Option<String>,
    template_id: Option<String>,
    label: Option<String>,
    description: Option<String>,
    parameters: Vec<Parameter>,
    submitted_at: Option<DateTime<Utc>>,
    fingerprint: Option<String>,
}

impl Run {
    pub fn new() -> Self {
        Self::default()
    }

    /// Crea una corrida que referencia al template dado (y a su modelo).
    pub fn from_template(template: &Template) -> Self {
        Self { model_id: template.model_id().map(str::to_string),
               template_id: template.id().map(str::to_string),
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

    pub fn template_id(&self) -> Option<&str> {
        self.template_id.as_deref()
    }

    pub fn set_template_id(&mut self, template_id: Option<String>) {
        self.template_id = template_id;
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

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn set_parameters(&mut self, parameters: Vec<Parameter>) {
        self.parameters = parameters;
    }

    pub fn add_parameter(&mut self, parameter: Parameter) {
        self.parameters.push(parameter);
    }

    /// Busca un parámetro por nombre. El nombre no puede ser vacío.
    pub fn parameter(&self, name: &str) -> Result<Option<&Parameter>, ResolveError> {
        if name.is_empty() {
            return Err(ResolveError::InvalidInput("parameter 'name' cannot be empty".to_string()));
        }
        Ok(self.find(name))
    }

    pub(crate) fn find(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    /// Secuencia ordenada nombre→valor que consume el colaborador que
    /// serializa la entrada nativa del solver.
    pub fn parameter_values(&self) -> impl Iterator<Item = (&str, Option<&ParameterValue>)> {
        self.parameters.iter().map(|p| (p.name(), p.value()))
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    pub fn set_submitted_at(&mut self, submitted_at: Option<DateTime<Utc>>) {
        self.submitted_at = submitted_at;
    }

    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    pub fn set_fingerprint(&mut self, fingerprint: Option<String>) {
        self.fingerprint = fingerprint;
    }
}

//! Override de template: un parámetro más la marca `fixed`.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::parameter::check_name;
use crate::value::ParameterValue;

/// Parámetro declarado por un template. No almacena kind propio: el
/// kind con que se valida su valor es el que declare el parámetro del
/// modelo con el mismo nombre, resuelto dinámicamente durante la
/// cascada. `fixed` indica que el valor no puede ser pisado por un run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateParameter {
    name: String,
    value: Option<ParameterValue>,
    #[serde(default)]
    fixed: bool,
}

impl TemplateParameter {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        Self::with_optional_value(name, None)
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<ParameterValue>) -> Result<Self, DomainError> {
        Self::with_optional_value(name, Some(value.into()))
    }

    pub fn with_optional_value(name: impl Into<String>, value: Option<ParameterValue>) -> Result<Self, DomainError> {
        let name = name.into();
        check_name(&name)?;
        Ok(Self { name,
                  value,
                  fixed: false })
    }

    // Rebuild interno de la resolución: el nombre proviene de una
    // entidad ya validada.
    pub(crate) fn from_parts(name: String, value: Option<ParameterValue>, fixed: bool) -> Self {
        Self { name, value, fixed }
    }

    /// Marca (o desmarca) el parámetro como fijo, consumiendo `self`
    /// para poder encadenar en la construcción de templates.
    pub fn fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&ParameterValue> {
        self.value.as_ref()
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    pub fn set_value(&mut self, value: Option<ParameterValue>) {
        self.value = value;
    }

    pub fn set_fixed(&mut self, fixed: bool) {
        self.fixed = fixed;
    }
}

impl PartialEq for TemplateParameter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TemplateParameter {}

impl Hash for TemplateParameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for TemplateParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "[name: {}, value: {}, fixed: {}]", self.name, v, self.fixed),
            None => write!(f, "[name: {}, value: <unset>, fixed: {}]", self.name, self.fixed),
        }
    }
}

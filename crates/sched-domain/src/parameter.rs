//! Unidad nombre→valor compartida por todas las capas.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value::ParameterValue;

/// Mapeo simple entre un nombre y un valor opcional. La identidad de un
/// parámetro es su nombre: dos parámetros con el mismo nombre son "el
/// mismo parámetro" independientemente del valor. Las listas no
/// deduplican por sí solas; la detección de duplicados es explícita en
/// la cascada de resolución.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    name: String,
    value: Option<ParameterValue>,
}

impl Parameter {
    /// Crea un parámetro sin valor.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        Self::with_optional_value(name, None)
    }

    /// Crea un parámetro con el valor dado.
    pub fn with_value(name: impl Into<String>, value: impl Into<ParameterValue>) -> Result<Self, DomainError> {
        Self::with_optional_value(name, Some(value.into()))
    }

    pub fn with_optional_value(name: impl Into<String>, value: Option<ParameterValue>) -> Result<Self, DomainError> {
        let name = name.into();
        check_name(&name)?;
        Ok(Self { name, value })
    }

    // Rebuild interno de la resolución: el nombre proviene de una
    // entidad ya validada.
    pub(crate) fn from_parts(name: String, value: Option<ParameterValue>) -> Self {
        Self { name, value }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&ParameterValue> {
        self.value.as_ref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();
        check_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// El valor siempre puede quedar vacío; "vacío" significa sin
    /// asignar y sólo se controla donde un valor es requerido.
    pub fn set_value(&mut self, value: Option<ParameterValue>) {
        self.value = value;
    }
}

pub(crate) fn check_name(name: &str) -> Result<(), DomainError> {
    if name.is_empty() {
        return Err(DomainError::Validation("parameter 'name' cannot be empty".to_string()));
    }
    Ok(())
}

// Igualdad y hashing sólo por nombre, como exige la identidad de los
// parámetros en la cascada.
impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Parameter {}

impl Hash for Parameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "[name: {}, value: {}]", self.name, v),
            None => write!(f, "[name: {}, value: <unset>]", self.name),
        }
    }
}

//! Objetivo de optimización declarado por el modelo.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Una de las cantidades que la función de optimización minimiza o
/// maximiza. Su peso relativo se controla con los parámetros del modelo
/// que declaren `objective == name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Objective {
    name: String,
    label: String,
    description: Option<String>,
}

impl Objective {
    /// Crea un objetivo usando el mismo texto como nombre y etiqueta.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let label = name.clone();
        Self::with_label(name, label)
    }

    pub fn with_label(name: impl Into<String>, label: impl Into<String>) -> Result<Self, DomainError> {
        let name = check_trimmed("name", name.into())?;
        let label = check_trimmed("label", label.into())?;
        Ok(Self { name,
                  label,
                  description: None })
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_label(&mut self, label: impl Into<String>) -> Result<(), DomainError> {
        self.label = check_trimmed("label", label.into())?;
        Ok(())
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }
}

fn check_trimmed(field: &str, text: String) -> Result<String, DomainError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(format!("objective '{field}' cannot be empty or blank")));
    }
    Ok(trimmed.to_string())
}

// Los objetivos se identifican por nombre, igual que los parámetros.
impl PartialEq for Objective {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Objective {}

impl Hash for Objective {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[label: {}, name: {}]", self.label, self.name)
    }
}

//! Parámetro del esquema: kind declarado, rango opcional y metadatos.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, ValidationError};
use crate::parameter::check_name;
use crate::value::{ParameterKind, ParameterValue, ValueRange};

/// Parámetro declarado por el modelo. Forma parte del esquema
/// autoritativo: el valor (si existe) es el default del esquema y debe
/// ser compatible con el kind; el rango sólo tiene sentido para kinds
/// numéricos y, si está presente, contiene al valor.
///
/// Los mutadores revalidan el invariante en cada llamada: el caller
/// debe fijar primero el kind, después el rango y por último el valor,
/// o proveer un rango cuyos extremos ya admitan el valor vigente.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelParameter {
    name: String,
    value: Option<ParameterValue>,
    kind: ParameterKind,
    range: Option<ValueRange>,
    objective: Option<String>,
    label: Option<String>,
    description: Option<String>,
}

impl ModelParameter {
    /// Crea un parámetro del esquema sin default ni rango.
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Result<Self, DomainError> {
        let name = name.into();
        check_name(&name)?;
        Ok(Self { name,
                  value: None,
                  kind,
                  range: None,
                  objective: None,
                  label: None,
                  description: None })
    }

    // --- builders encadenables para armar esquemas de forma compacta ---

    /// Asigna el default del esquema (falla si no es compatible con el
    /// kind o se sale del rango vigente).
    pub fn valued(mut self, value: impl Into<ParameterValue>) -> Result<Self, DomainError> {
        self.set_value(Some(value.into()))?;
        Ok(self)
    }

    /// Asigna un rango cerrado [lower, upper].
    pub fn bounded(mut self, lower: impl Into<ParameterValue>, upper: impl Into<ParameterValue>) -> Result<Self, DomainError> {
        self.set_range(Some(ValueRange::between(lower, upper)))?;
        Ok(self)
    }

    /// Asigna un rango arbitrario (posiblemente abierto por un lado).
    pub fn ranged(mut self, range: ValueRange) -> Result<Self, DomainError> {
        self.set_range(Some(range))?;
        Ok(self)
    }

    /// Marca el parámetro como peso del objetivo indicado.
    pub fn for_objective(mut self, objective: impl Into<String>) -> Self {
        self.objective = Some(objective.into());
        self
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    // --- getters ---

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    pub fn value(&self) -> Option<&ParameterValue> {
        self.value.as_ref()
    }

    pub fn range(&self) -> Option<&ValueRange> {
        self.range.as_ref()
    }

    pub fn lower_bound(&self) -> Option<&ParameterValue> {
        self.range.as_ref().and_then(|r| r.lower())
    }

    pub fn upper_bound(&self) -> Option<&ParameterValue> {
        self.range.as_ref().and_then(|r| r.upper())
    }

    pub fn objective(&self) -> Option<&str> {
        self.objective.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    // --- mutadores con revalidación ---

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();
        check_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// Cambia el kind declarado. Es destructivo en vez de fallar: si el
    /// valor vigente no es compatible con el nuevo kind, valor y rango
    /// se descartan; si es compatible se materializa el widening. El
    /// rango sigue al nuevo kind sólo si sus extremos lo admiten, en
    /// caso contrario también se descarta.
    pub fn set_kind(&mut self, kind: ParameterKind) {
        match self.value.as_ref().map(|v| v.coerce(kind)) {
            Some(None) => {
                // valor incompatible: se descarta junto con el rango
                self.value = None;
                self.range = None;
            }
            Some(Some(widened)) => self.value = Some(widened),
            None => {}
        }
        self.range = match self.range.take() {
            Some(range) if kind.is_numeric() => range.coerced_to(kind),
            _ => None,
        };
        self.kind = kind;
    }

    /// Asigna (o limpia) el rango de valores admitidos. Los extremos se
    /// almacenan ya convertidos al kind del parámetro.
    pub fn set_range(&mut self, range: Option<ValueRange>) -> Result<(), DomainError> {
        let range = match range {
            None => {
                self.range = None;
                return Ok(());
            }
            Some(range) => range,
        };
        if !self.kind.is_numeric() {
            return Err(DomainError::Validation(format!(
                "parameter '{}' of kind {} does not admit a range",
                self.name, self.kind
            )));
        }
        let coerced = range.coerced_to(self.kind).ok_or_else(|| {
                          DomainError::Validation(format!(
                              "range bounds are not compatible with kind {} of parameter '{}'",
                              self.kind, self.name
                          ))
                      })?;
        if !coerced.is_ordered() {
            return Err(DomainError::Validation(format!(
                "range for parameter '{}' has lower bound above its upper bound",
                self.name
            )));
        }
        if let Some(value) = &self.value {
            if !coerced.admits(value) {
                return Err(DomainError::Validation(format!(
                    "range for parameter '{}' does not admit its current value {}",
                    self.name, value
                )));
            }
        }
        self.range = Some(coerced);
        Ok(())
    }

    /// Asigna (o limpia) el default del esquema. El valor se almacena
    /// ya convertido al kind declarado.
    pub fn set_value(&mut self, value: Option<ParameterValue>) -> Result<(), DomainError> {
        let value = match value {
            None => {
                self.value = None;
                return Ok(());
            }
            Some(value) => value,
        };
        let coerced = value.coerce(self.kind).ok_or_else(|| {
                          DomainError::Validation(format!(
                              "value {} is not compatible with kind {} of parameter '{}'",
                              value, self.kind, self.name
                          ))
                      })?;
        if let Some(range) = &self.range {
            if !range.admits(&coerced) {
                return Err(DomainError::Validation(format!(
                    "value {} for parameter '{}' is not in the declared range",
                    coerced, self.name
                )));
            }
        }
        self.value = Some(coerced);
        Ok(())
    }

    pub fn set_objective(&mut self, objective: Option<String>) {
        self.objective = objective;
    }

    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Chequea un valor candidato contra kind y rango, y devuelve el
    /// valor ya convertido al kind declarado. Es el chequeo que usan
    /// las cascadas de resolución; un valor ausente siempre pasa.
    pub fn conform(&self, value: Option<&ParameterValue>) -> Result<Option<ParameterValue>, ValidationError> {
        let value = match value {
            None => return Ok(None),
            Some(value) => value,
        };
        let coerced = value.coerce(self.kind).ok_or_else(|| ValidationError::TypeMismatch { name: self.name.clone(),
                                                                                            expected: self.kind,
                                                                                            found: value.kind() })?;
        if let Some(range) = &self.range {
            if !range.admits(&coerced) {
                return Err(ValidationError::OutOfRange { name: self.name.clone(),
                                                         value: coerced,
                                                         lower: range.lower().cloned(),
                                                         upper: range.upper().cloned() });
            }
        }
        Ok(Some(coerced))
    }
}

impl PartialEq for ModelParameter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ModelParameter {}

impl Hash for ModelParameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for ModelParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[name: {}, kind: {}", self.name, self.kind)?;
        if let Some(v) = &self.value {
            write!(f, ", value: {v}")?;
        }
        if let Some(r) = &self.range {
            write!(f, ", range: [{:?}, {:?}]", r.lower(), r.upper())?;
        }
        write!(f, "]")
    }
}

//! Errores del dominio de planificación.
//!
//! Hay dos familias separadas: `DomainError` cubre violaciones de
//! invariantes al construir o mutar entidades (bug del caller, no
//! recuperable), y `ResolveError` cubre los fallos de la cascada de
//! resolución Model → Template → Run. Los call sites de la resolución
//! deben distinguir cada variante, por eso son enums cerrados.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value::{ParameterKind, ParameterValue};

/// Violación de invariantes al construir o mutar una entidad.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(String),
}

/// Fallo de la cascada de resolución. Una sola pasada izquierda→derecha
/// sobre la lista de parámetros de entrada; se reporta la primera
/// violación encontrada, nunca un agregado.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResolveError {
    /// Un argumento requerido está vacío en el borde del API.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// El receptor no tiene el identificador necesario para el
    /// cross-check contra la entidad dependiente.
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// Dos entidades no coinciden sobre el Model/Template al que
    /// pertenecen. `found: None` cubre el caso de identificador ausente
    /// en la dependiente.
    #[error("{entity} identifier mismatch (expected: {expected}, found: {found:?})")]
    Mismatch { entity: String,
               expected: String,
               found: Option<String> },

    /// Violación estructural encontrada durante el escaneo de una lista
    /// de parámetros. Aborta la resolución completa, sin resultado
    /// parcial.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Detalle de las violaciones de datos (§ escaneo de parámetros).
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("parameter '{name}' is duplicated")]
    Duplicate { name: String },

    #[error("parameter '{name}' does not exist in the model")]
    Unknown { name: String },

    #[error("parameter '{name}' is not declared by the template")]
    Undeclared { name: String },

    #[error("parameter '{name}' is fixed by the template and cannot be overridden")]
    Fixed { name: String },

    #[error("parameter '{name}' has a {found} value, incompatible with the declared {expected}")]
    TypeMismatch { name: String,
                   expected: ParameterKind,
                   found: ParameterKind },

    #[error("parameter '{name}' has value {value} outside the declared range [{lower:?}, {upper:?}]")]
    OutOfRange { name: String,
                 value: ParameterValue,
                 lower: Option<ParameterValue>,
                 upper: Option<ParameterValue> },
}

impl ValidationError {
    /// Nombre del parámetro que disparó la violación.
    pub fn parameter_name(&self) -> &str {
        match self {
            ValidationError::Duplicate { name }
            | ValidationError::Unknown { name }
            | ValidationError::Undeclared { name }
            | ValidationError::Fixed { name }
            | ValidationError::TypeMismatch { name, .. }
            | ValidationError::OutOfRange { name, .. } => name,
        }
    }
}

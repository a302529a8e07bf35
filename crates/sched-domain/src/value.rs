//! Dominio de valores y tipos de los parámetros.
//!
//! Conjunto cerrado de kinds escalares y las reglas de compatibilidad
//! entre ellos. La única conversión implícita permitida es el widening
//! entero → flotante cuando el kind declarado es `Double`; no existe la
//! dirección contraria.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind declarado de un parámetro del modelo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
    Boolean,
    Int,
    Double,
    String,
}

impl ParameterKind {
    /// Sólo los kinds numéricos admiten orden, y por lo tanto rangos.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ParameterKind::Int | ParameterKind::Double)
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ParameterKind::Boolean => "boolean",
            ParameterKind::Int => "int",
            ParameterKind::Double => "double",
            ParameterKind::String => "string",
        };
        write!(f, "{label}")
    }
}

/// Valor escalar ligado a un parámetro.
///
/// `untagged` para que el JSON de la capa web mapee 1:1 con los
/// escalares (true, 23, 45.1, "texto") sin discriminante artificial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParameterValue {
    /// Kind intrínseco del valor, antes de cualquier widening.
    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterValue::Bool(_) => ParameterKind::Boolean,
            ParameterValue::Int(_) => ParameterKind::Int,
            ParameterValue::Float(_) => ParameterKind::Double,
            ParameterValue::Text(_) => ParameterKind::String,
        }
    }

    /// `true` si el valor puede ocupar una declaración de `kind`.
    /// Un entero es asignable a `Double` (widening); un flotante nunca
    /// es asignable a `Int`.
    pub fn is_assignable_to(&self, kind: ParameterKind) -> bool {
        self.kind() == kind || (kind == ParameterKind::Double && self.kind() == ParameterKind::Int)
    }

    /// Convierte el valor al kind declarado. La única conversión que
    /// materializa un valor nuevo es `Int → Float`; el resto devuelve
    /// el valor intacto. `None` si no hay asignabilidad.
    pub fn coerce(&self, kind: ParameterKind) -> Option<ParameterValue> {
        if !self.is_assignable_to(kind) {
            return None;
        }
        match (self, kind) {
            (ParameterValue::Int(i), ParameterKind::Double) => Some(ParameterValue::Float(*i as f64)),
            _ => Some(self.clone()),
        }
    }

    /// Orden total entre dos valores del mismo kind numérico. `None`
    /// para kinds no numéricos o kinds distintos; los flotantes usan
    /// `total_cmp` para que la comparación sea determinista en todo el
    /// rango representable.
    pub fn cmp_numeric(&self, other: &ParameterValue) -> Option<Ordering> {
        match (self, other) {
            (ParameterValue::Int(a), ParameterValue::Int(b)) => Some(a.cmp(b)),
            (ParameterValue::Float(a), ParameterValue::Float(b)) => Some(a.total_cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Bool(b) => write!(f, "{b}"),
            ParameterValue::Int(i) => write!(f, "{i}"),
            ParameterValue::Float(x) => write!(f, "{x}"),
            ParameterValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for ParameterValue {
    fn from(b: bool) -> Self {
        ParameterValue::Bool(b)
    }
}

impl From<i64> for ParameterValue {
    fn from(i: i64) -> Self {
        ParameterValue::Int(i)
    }
}

impl From<i32> for ParameterValue {
    fn from(i: i32) -> Self {
        ParameterValue::Int(i64::from(i))
    }
}

impl From<f64> for ParameterValue {
    fn from(x: f64) -> Self {
        ParameterValue::Float(x)
    }
}

impl From<&str> for ParameterValue {
    fn from(s: &str) -> Self {
        ParameterValue::Text(s.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(s: String) -> Self {
        ParameterValue::Text(s)
    }
}

/// Rango inclusivo de valores admitidos, con cada extremo opcional
/// (rango abierto por ese lado).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    lower: Option<ParameterValue>,
    upper: Option<ParameterValue>,
}

impl ValueRange {
    pub fn new(lower: Option<ParameterValue>, upper: Option<ParameterValue>) -> Self {
        Self { lower, upper }
    }

    pub fn between(lower: impl Into<ParameterValue>, upper: impl Into<ParameterValue>) -> Self {
        Self { lower: Some(lower.into()),
               upper: Some(upper.into()) }
    }

    pub fn at_least(lower: impl Into<ParameterValue>) -> Self {
        Self { lower: Some(lower.into()),
               upper: None }
    }

    pub fn at_most(upper: impl Into<ParameterValue>) -> Self {
        Self { lower: None,
               upper: Some(upper.into()) }
    }

    pub fn lower(&self) -> Option<&ParameterValue> {
        self.lower.as_ref()
    }

    pub fn upper(&self) -> Option<&ParameterValue> {
        self.upper.as_ref()
    }

    /// Rebuild del rango con ambos extremos convertidos a `kind`.
    /// `None` si algún extremo no es asignable.
    pub(crate) fn coerced_to(&self, kind: ParameterKind) -> Option<ValueRange> {
        let lower = match &self.lower {
            Some(v) => Some(v.coerce(kind)?),
            None => None,
        };
        let upper = match &self.upper {
            Some(v) => Some(v.coerce(kind)?),
            None => None,
        };
        Some(ValueRange { lower, upper })
    }

    /// `true` si los extremos presentes están ordenados (lower ≤ upper).
    /// Asume extremos ya convertidos al mismo kind.
    pub(crate) fn is_ordered(&self) -> bool {
        match (&self.lower, &self.upper) {
            (Some(lo), Some(up)) => !matches!(lo.cmp_numeric(up), Some(Ordering::Greater)),
            _ => true,
        }
    }

    /// Chequeo inclusivo de pertenencia. Asume `value` ya convertido al
    /// mismo kind que los extremos.
    pub(crate) fn admits(&self, value: &ParameterValue) -> bool {
        if let Some(lo) = &self.lower {
            if matches!(lo.cmp_numeric(value), Some(Ordering::Greater)) {
                return false;
            }
        }
        if let Some(up) = &self.upper {
            if matches!(up.cmp_numeric(value), Some(Ordering::Less)) {
                return false;
            }
        }
        true
    }
}

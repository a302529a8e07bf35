//! Hashing canónico y fingerprint de corridas resueltas.

pub mod canonical_json;

use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use sched_domain::Run;

pub use canonical_json::to_canonical_json;

/// Hashea un string y devuelve hex.
pub fn hash_str(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Hashea un JSON en su forma canónica.
pub fn hash_value(value: &Value) -> String {
    hash_str(&to_canonical_json(value))
}

/// Fingerprint de una corrida resuelta: sha256 sobre la secuencia
/// ordenada nombre→valor de sus parámetros. Dos corridas con el mismo
/// conjunto resuelto comparten fingerprint, sin importar id ni
/// metadatos de la sumisión.
pub fn run_fingerprint(run: &Run) -> String {
    let entries: Vec<Value> = run.parameter_values()
                                 .map(|(name, value)| {
                                     json!({
                                         "name": name,
                                         "value": value,
                                     })
                                 })
                                 .collect();
    hash_value(&Value::Array(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sched_domain::Parameter;

    #[test]
    fn fingerprint_ignores_submission_metadata() {
        let mut a = Run::new();
        a.set_parameters(vec![Parameter::with_value("p1", 11).unwrap(),
                              Parameter::with_value("p2", "on").unwrap()]);
        let mut b = a.clone();
        b.set_id(Some("otra".into()));
        b.set_label(Some("etiqueta".into()));
        assert_eq!(run_fingerprint(&a), run_fingerprint(&b));
    }

    #[test]
    fn fingerprint_tracks_values_and_order() {
        let mut a = Run::new();
        a.set_parameters(vec![Parameter::with_value("p1", 11).unwrap()]);
        let mut b = Run::new();
        b.set_parameters(vec![Parameter::with_value("p1", 12).unwrap()]);
        assert_ne!(run_fingerprint(&a), run_fingerprint(&b));
    }
}

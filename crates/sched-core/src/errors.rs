//! Errores del anillo de colaboradores (stores + servicio de sumisión).

use thiserror::Error;

use sched_domain::ResolveError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// La corrida no referencia a la entidad indicada; no hay nada que
    /// cargar del store.
    #[error("run does not reference a {0}")]
    MissingReference(&'static str),

    /// El store no tiene una entidad con ese identificador. Traducción
    /// local del `None` de los colaboradores get-by-id, previa a
    /// invocar el motor.
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

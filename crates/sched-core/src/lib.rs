//! sched-core: anillo de colaboradores del motor de resolución.
//!
//! - `store`: colaboradores get-by-id (traits + implementación en
//!   memoria) que la capa web usa para cargar Model/Template/Run.
//! - `service`: orquestación de una sumisión (cargar, resolver,
//!   estampar, persistir).
//! - `hashing`: JSON canónico y fingerprint del conjunto resuelto.

pub mod errors;
pub mod hashing;
pub mod service;
pub mod store;

pub use errors::CoreError;
pub use hashing::{hash_str, hash_value, run_fingerprint, to_canonical_json};
pub use service::SubmissionService;
pub use store::{EntityStore, Identified, InMemoryStore};

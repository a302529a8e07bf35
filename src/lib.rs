//! SchedFlow Rust Library
//!
//! Este crate actúa como la fachada de SchedFlow:
//! - Re-exporta el dominio (`sched-domain`): entidades y cascada de
//!   resolución de parámetros.
//! - Re-exporta el anillo de colaboradores (`sched-core`): stores,
//!   servicio de sumisión y fingerprints.
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

pub use sched_core::{CoreError, EntityStore, InMemoryStore, SubmissionService};
pub use sched_core::{hash_str, hash_value, run_fingerprint, to_canonical_json};
pub use sched_domain::{DomainError, ResolveError, ValidationError};
pub use sched_domain::{Model, ModelParameter, Objective, Parameter, Run, Template, TemplateParameter};
pub use sched_domain::{ParameterKind, ParameterValue, ValueRange};

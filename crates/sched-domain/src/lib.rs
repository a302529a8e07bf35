// sched-domain library entry point
pub mod errors;
pub mod model;
pub mod model_parameter;
pub mod objective;
pub mod parameter;
pub mod run;
pub mod template;
pub mod template_parameter;
pub mod value;

pub use errors::{DomainError, ResolveError, ValidationError};
pub use model::Model;
pub use model_parameter::ModelParameter;
pub use objective::Objective;
pub use parameter::Parameter;
pub use run::Run;
pub use template::Template;
pub use template_parameter::TemplateParameter;
pub use value::{ParameterKind, ParameterValue, ValueRange};

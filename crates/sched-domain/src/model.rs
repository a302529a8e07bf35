//! Modelo de optimización: esquema autoritativo y puntos de entrada de
//! la cascada de resolución.
//!
//! El modelo es dueño del esquema completo de parámetros (con tipos,
//! rangos y defaults) y de los objetivos. Resolver un template contra
//! el modelo produce un template completo con la forma del modelo;
//! resolver una corrida encadena las tres capas con precedencia
//! Run > Template > Model. La resolución nunca muta sus entradas:
//! siempre construye y devuelve entidades nuevas.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, ResolveError, ValidationError};
use crate::model_parameter::ModelParameter;
use crate::objective::Objective;
use crate::parameter::Parameter;
use crate::run::Run;
use crate::template::Template;
use crate::template_parameter::TemplateParameter;
use crate::value::ParameterValue;

/// Override de template aceptado durante el escaneo, ya convertido al
/// kind que declara el esquema.
#[derive(Debug, Clone)]
struct AcceptedOverride {
    value: Option<ParameterValue>,
    fixed: bool,
}

/// Esquema autoritativo de un problema de optimización: parámetros
/// tipados/acotados con sus defaults, y objetivos. Se crea una vez y es
/// de vida larga; los templates y las corridas lo referencian por `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    id: Option<String>,
    label: String,
    description: Option<String>,
    objectives: Vec<Objective>,
    parameters: Vec<ModelParameter>,
}

impl Model {
    pub fn new(label: impl Into<String>) -> Result<Self, DomainError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(DomainError::Validation("model 'label' cannot be empty or blank".to_string()));
        }
        Ok(Self { id: None,
                  label,
                  description: None,
                  objectives: Vec::new(),
                  parameters: Vec::new() })
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) -> Result<(), DomainError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(DomainError::Validation("model 'label' cannot be empty or blank".to_string()));
        }
        self.label = label;
        Ok(())
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn set_objectives(&mut self, objectives: Vec<Objective>) {
        self.objectives = objectives;
    }

    pub fn with_objectives(mut self, objectives: Vec<Objective>) -> Self {
        self.objectives = objectives;
        self
    }

    pub fn parameters(&self) -> &[ModelParameter] {
        &self.parameters
    }

    /// El esquema es responsable de la unicidad: nombres repetidos se
    /// rechazan al construir la lista, así la resolución puede asumir
    /// un esquema indexable por nombre.
    pub fn set_parameters(&mut self, parameters: Vec<ModelParameter>) -> Result<(), DomainError> {
        let mut names: IndexSet<&str> = IndexSet::with_capacity(parameters.len());
        for mp in &parameters {
            if !names.insert(mp.name()) {
                return Err(DomainError::Validation(format!(
                    "duplicate parameter '{}' in the model schema",
                    mp.name()
                )));
            }
        }
        self.parameters = parameters;
        Ok(())
    }

    pub fn with_parameters(mut self, parameters: Vec<ModelParameter>) -> Result<Self, DomainError> {
        self.set_parameters(parameters)?;
        Ok(self)
    }

    /// Busca un parámetro del esquema por nombre. El nombre no puede
    /// ser vacío; la ausencia de entrada no es un error.
    pub fn parameter(&self, name: &str) -> Result<Option<&ModelParameter>, ResolveError> {
        if name.is_empty() {
            return Err(ResolveError::InvalidInput("parameter 'name' cannot be empty".to_string()));
        }
        Ok(self.find_parameter(name))
    }

    /// Busca un objetivo por nombre, con el mismo contrato que
    /// [`Model::parameter`].
    pub fn objective(&self, name: &str) -> Result<Option<&Objective>, ResolveError> {
        if name.is_empty() {
            return Err(ResolveError::InvalidInput("objective 'name' cannot be empty".to_string()));
        }
        Ok(self.objectives.iter().find(|o| o.name() == name))
    }

    fn find_parameter(&self, name: &str) -> Option<&ModelParameter> {
        self.parameters.iter().find(|mp| mp.name() == name)
    }

    /// Valida un parámetro suelto contra la declaración del esquema con
    /// el mismo nombre: existencia, compatibilidad de kind y rango.
    pub fn validate_parameter(&self, parameter: &Parameter) -> Result<(), ResolveError> {
        let mp = self.find_parameter(parameter.name())
                     .ok_or_else(|| ValidationError::Unknown { name: parameter.name().to_string() })?;
        mp.conform(parameter.value())?;
        Ok(())
    }

    /// Variante sin construcción de resultado de
    /// [`Model::resolve_template`]: corre los mismos chequeos y
    /// descarta los overrides aceptados.
    pub fn validate_template(&self, template: &Template) -> Result<(), ResolveError> {
        self.checked_template_overrides(template)?;
        Ok(())
    }

    /// Cascada de dos niveles. Valida el template contra el esquema y
    /// devuelve un template nuevo con exactamente un parámetro por cada
    /// parámetro del modelo: el override declarado (ya convertido al
    /// kind del esquema) cuando existe, o el default del modelo en caso
    /// contrario. Las entradas subsumidas del modelo quedan marcadas
    /// `fixed`, porque el autor del template no las abrió a override.
    pub fn resolve_template(&self, template: &Template) -> Result<Template, ResolveError> {
        let overrides = self.checked_template_overrides(template)?;

        let mut parameters = Vec::with_capacity(self.parameters.len());
        for mp in &self.parameters {
            let tp = match overrides.get(mp.name()) {
                Some(accepted) => {
                    TemplateParameter::from_parts(mp.name().to_string(), accepted.value.clone(), accepted.fixed)
                }
                None => TemplateParameter::from_parts(mp.name().to_string(), mp.value().cloned(), true),
            };
            parameters.push(tp);
        }

        let mut resolved = template.clone();
        resolved.set_parameters(parameters);
        Ok(resolved)
    }

    /// Variante sin construcción de resultado de
    /// [`Model::resolve_run`].
    pub fn validate_run(&self, template: &Template, run: &Run) -> Result<(), ResolveError> {
        self.checked_run_overrides(template, run)?;
        Ok(())
    }

    /// Cascada de tres niveles. Revalida el template contra el esquema,
    /// cruza identidades con la corrida y escanea sus overrides
    /// (duplicados, pertenencia al template, marca `fixed`, kind y
    /// rango contra la declaración del esquema). Devuelve una corrida
    /// nueva con exactamente un parámetro por cada parámetro del
    /// modelo, eligiendo por precedencia Run > Template > Model y con
    /// cada valor convertido al kind declarado.
    pub fn resolve_run(&self, template: &Template, run: &Run) -> Result<Run, ResolveError> {
        let (template_overrides, run_overrides) = self.checked_run_overrides(template, run)?;

        let mut parameters = Vec::with_capacity(self.parameters.len());
        for mp in &self.parameters {
            let value = if let Some(value) = run_overrides.get(mp.name()) {
                value.clone()
            } else if let Some(accepted) = template_overrides.get(mp.name()) {
                accepted.value.clone()
            } else {
                mp.value().cloned()
            };
            parameters.push(Parameter::from_parts(mp.name().to_string(), value));
        }

        let mut resolved = run.clone();
        resolved.set_parameters(parameters);
        Ok(resolved)
    }

    /// Escaneo del template contra el esquema: identidad del modelo y
    /// una pasada izquierda→derecha por los parámetros declarados.
    /// Devuelve los overrides aceptados, indexados por nombre y en el
    /// orden de declaración.
    fn checked_template_overrides(&self, template: &Template) -> Result<IndexMap<String, AcceptedOverride>, ResolveError> {
        let id = self.id.as_deref().ok_or_else(|| {
                     ResolveError::IllegalState("cannot validate a template against a model without identifier".to_string())
                 })?;
        if template.model_id() != Some(id) {
            return Err(ResolveError::Mismatch { entity: "model".to_string(),
                                                expected: id.to_string(),
                                                found: template.model_id().map(str::to_string) });
        }

        let mut accepted: IndexMap<String, AcceptedOverride> = IndexMap::with_capacity(template.parameters().len());
        for tp in template.parameters() {
            if accepted.contains_key(tp.name()) {
                return Err(ValidationError::Duplicate { name: tp.name().to_string() }.into());
            }
            let mp = self.find_parameter(tp.name())
                         .ok_or_else(|| ValidationError::Unknown { name: tp.name().to_string() })?;
            let value = mp.conform(tp.value())?;
            accepted.insert(tp.name().to_string(),
                            AcceptedOverride { value,
                                               fixed: tp.is_fixed() });
        }
        Ok(accepted)
    }

    /// Escaneo de la corrida: reusa el escaneo del template, cruza los
    /// identificadores de template y modelo de la corrida, y una pasada
    /// por sus parámetros. Devuelve ambos mapas de overrides aceptados.
    #[allow(clippy::type_complexity)]
    fn checked_run_overrides(&self,
                             template: &Template,
                             run: &Run)
                             -> Result<(IndexMap<String, AcceptedOverride>, IndexMap<String, Option<ParameterValue>>), ResolveError> {
        let template_overrides = self.checked_template_overrides(template)?;

        let template_id = template.id().ok_or_else(|| {
                              ResolveError::IllegalState("cannot resolve a run against a template without identifier".to_string())
                          })?;
        if run.template_id() != Some(template_id) {
            return Err(ResolveError::Mismatch { entity: "template".to_string(),
                                                expected: template_id.to_string(),
                                                found: run.template_id().map(str::to_string) });
        }

        let id = self.id.as_deref().ok_or_else(|| {
                     ResolveError::IllegalState("cannot resolve a run against a model without identifier".to_string())
                 })?;
        if run.model_id() != Some(id) {
            return Err(ResolveError::Mismatch { entity: "model".to_string(),
                                                expected: id.to_string(),
                                                found: run.model_id().map(str::to_string) });
        }

        let mut accepted: IndexMap<String, Option<ParameterValue>> = IndexMap::with_capacity(run.parameters().len());
        for rp in run.parameters() {
            if accepted.contains_key(rp.name()) {
                return Err(ValidationError::Duplicate { name: rp.name().to_string() }.into());
            }
            let tp = template.find(rp.name())
                             .ok_or_else(|| ValidationError::Undeclared { name: rp.name().to_string() })?;
            if tp.is_fixed() {
                return Err(ValidationError::Fixed { name: rp.name().to_string() }.into());
            }
            let mp = self.find_parameter(rp.name())
                         .ok_or_else(|| ValidationError::Unknown { name: rp.name().to_string() })?;
            let value = mp.conform(rp.value())?;
            accepted.insert(rp.name().to_string(), value);
        }
        Ok((template_overrides, accepted))
    }
}

use crate::compiler::{self, CompiledPath};
use crate::error::RegistrationError;
use crate::route::{RouteDefinition, DEFAULT_PARAM_REGEX};
use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

/// Upper bound on the compiled size of any route or constraint regex.
pub(crate) const MAX_REGEX_SIZE: usize = 1 << 20;

pub(crate) fn build_regex(source: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(source).size_limit(MAX_REGEX_SIZE).build()
}

/// A route definition together with everything derived from it at registration:
/// the segment template, the anchored whole-path regex (dynamic routes only) and
/// one anchored validator per declared constraint.
#[derive(Debug)]
pub struct CompiledRoute {
    definition: RouteDefinition,
    template: CompiledPath,
    /// Placeholder names shared into every `RouteMatch`
    param_names: Vec<Arc<str>>,
    matcher: Option<Regex>,
    validators: BTreeMap<String, Regex>,
}

impl CompiledRoute {
    /// Compile a definition. Runs the path compiler and every regex build.
    pub(crate) fn compile(definition: RouteDefinition) -> Result<Self, RegistrationError> {
        let template =
            compiler::compile(&definition.path).map_err(|source| RegistrationError::Compile {
                route: definition.name.clone(),
                source,
            })?;

        let mut validators = BTreeMap::new();
        for (name, constraint) in &definition.parameters {
            if !template.param_names.iter().any(|p| p == name) {
                warn!(
                    route_name = %definition.name,
                    path = %definition.path,
                    parameter = %name,
                    "Constraint declared for a placeholder the path does not contain"
                );
            }
            let validator = build_regex(&format!("^(?:{})$", constraint.regex)).map_err(|e| {
                RegistrationError::InvalidRegexConstraint {
                    route: definition.name.clone(),
                    parameter: name.clone(),
                    pattern: constraint.regex.clone(),
                    reason: e.to_string(),
                }
            })?;
            validators.insert(name.clone(), validator);
        }

        let matcher = if template.is_dynamic() {
            let source = template.regex_source(|name| {
                definition
                    .parameters
                    .get(name)
                    .map(|c| c.regex.as_str())
                    .unwrap_or(DEFAULT_PARAM_REGEX)
            });
            let regex =
                build_regex(&source).map_err(|e| RegistrationError::InvalidRegexConstraint {
                    route: definition.name.clone(),
                    parameter: template.param_names.join(", "),
                    pattern: source.clone(),
                    reason: e.to_string(),
                })?;
            Some(regex)
        } else {
            None
        };

        Ok(Self::assemble(definition, template, matcher, validators))
    }

    /// Rebuild from precompiled parts without running the path compiler.
    pub(crate) fn from_parts(
        definition: RouteDefinition,
        template: CompiledPath,
        matcher_source: Option<&str>,
        validator_sources: &BTreeMap<String, String>,
    ) -> Result<Self, regex::Error> {
        let matcher = matcher_source.map(build_regex).transpose()?;
        let validators = validator_sources
            .iter()
            .map(|(name, source)| Ok((name.clone(), build_regex(source)?)))
            .collect::<Result<BTreeMap<_, _>, regex::Error>>()?;
        Ok(Self::assemble(definition, template, matcher, validators))
    }

    fn assemble(
        definition: RouteDefinition,
        template: CompiledPath,
        matcher: Option<Regex>,
        validators: BTreeMap<String, Regex>,
    ) -> Self {
        let param_names = template
            .param_names
            .iter()
            .map(|n| Arc::<str>::from(n.as_str()))
            .collect();
        Self {
            definition,
            template,
            param_names,
            matcher,
            validators,
        }
    }

    #[must_use]
    pub fn definition(&self) -> &RouteDefinition {
        &self.definition
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    pub fn template(&self) -> &CompiledPath {
        &self.template
    }

    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        self.matcher.is_some()
    }

    #[must_use]
    pub fn param_names(&self) -> &[Arc<str>] {
        &self.param_names
    }

    #[must_use]
    pub fn matcher(&self) -> Option<&Regex> {
        self.matcher.as_ref()
    }

    /// Anchored validator for a declared constraint.
    #[must_use]
    pub fn validator(&self, name: &str) -> Option<&Regex> {
        self.validators.get(name)
    }

    pub(crate) fn validators(&self) -> &BTreeMap<String, Regex> {
        &self.validators
    }
}

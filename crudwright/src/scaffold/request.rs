//! Generation request aggregate
//!
//! A [`GenerationRequest`] is built once from parsed input (CLI flags or a
//! bulk document) and is read-only afterwards.

use super::field::{parse_fields, unique_fields, Field};
use super::naming::NameHelpers;
use super::relation::{parse_relations, Relation};
use crate::config::CrudConfig;
use crate::error::{CrudError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Kind of generated artifact
///
/// Variant order is the generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Schema migration
    Migration,
    /// Eloquent model
    Model,
    /// Model factory
    Factory,
    /// Database seeder
    Seeder,
    /// Store and update form requests
    Request,
    /// API resource
    Resource,
    /// HTTP controller
    Controller,
    /// Blade view set
    Views,
    /// Route registration
    Routes,
}

impl ArtifactKind {
    /// Every kind, in generation order
    pub const ALL: [Self; 9] = [
        Self::Migration,
        Self::Model,
        Self::Factory,
        Self::Seeder,
        Self::Request,
        Self::Resource,
        Self::Controller,
        Self::Views,
        Self::Routes,
    ];

    /// Kind name as used in configuration and on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Migration => "migration",
            Self::Model => "model",
            Self::Factory => "factory",
            Self::Seeder => "seeder",
            Self::Request => "request",
            Self::Resource => "resource",
            Self::Controller => "controller",
            Self::Views => "views",
            Self::Routes => "routes",
        }
    }

    /// Human-readable label for progress output
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Migration => "Migration",
            Self::Model => "Model",
            Self::Factory => "Factory",
            Self::Seeder => "Seeder",
            Self::Request => "Form Requests",
            Self::Resource => "API Resource",
            Self::Controller => "Controller",
            Self::Views => "Views",
            Self::Routes => "Routes",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = CrudError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        let kind = match normalized.as_str() {
            "migration" | "migrations" | "schema" => Self::Migration,
            "model" => Self::Model,
            "factory" => Self::Factory,
            "seeder" | "seed" => Self::Seeder,
            "request" | "requests" => Self::Request,
            "resource" => Self::Resource,
            "controller" => Self::Controller,
            "views" | "view" => Self::Views,
            "routes" | "route" => Self::Routes,
            _ => return Err(CrudError::UnknownArtifactKind(s.to_string())),
        };
        Ok(kind)
    }
}

/// Everything needed to generate one model's CRUD layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Model class name (`Post`)
    pub model_name: String,
    /// Full model namespace (`App\Models\Blog`)
    pub model_namespace: String,
    /// Namespace segments below the models namespace (`["Blog"]`)
    pub sub_namespace: Vec<String>,
    /// Declared fields, in order
    pub fields: Vec<Field>,
    /// Declared relations, in order
    pub relations: Vec<Relation>,
    /// Overwrite existing files
    pub force_overwrite: bool,
    /// Generate API artifacts only
    pub api_only: bool,
    /// Per-kind switches overriding the configuration defaults
    pub generate_flags: BTreeMap<ArtifactKind, bool>,
}

impl GenerationRequest {
    /// Start building a request for a model name (`Post` or `Blog/Post`)
    #[must_use]
    pub fn builder(name: impl Into<String>) -> GenerationRequestBuilder {
        GenerationRequestBuilder::new(name)
    }

    /// Fully qualified model class (`App\Models\Blog\Post`)
    #[must_use]
    pub fn model_class(&self) -> String {
        format!("{}\\{}", self.model_namespace, self.model_name)
    }

    /// Whether a kind should be generated
    ///
    /// Request flags win over configuration defaults. Views are never
    /// generated for API-only requests.
    #[must_use]
    pub fn should_generate(&self, kind: ArtifactKind, config: &CrudConfig) -> bool {
        if kind == ArtifactKind::Views && self.api_only {
            return false;
        }
        self.generate_flags
            .get(&kind)
            .copied()
            .unwrap_or_else(|| config.generate.enabled(kind))
    }
}

/// Builder for [`GenerationRequest`]
#[derive(Debug, Clone, Default)]
pub struct GenerationRequestBuilder {
    name: String,
    fields: Vec<Field>,
    relations: Vec<Relation>,
    force_overwrite: bool,
    api_only: Option<bool>,
    generate_flags: BTreeMap<ArtifactKind, bool>,
}

impl GenerationRequestBuilder {
    /// New builder for a model name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse and set fields from the compact grammar
    #[must_use]
    pub fn fields_spec(mut self, spec: &str) -> Self {
        self.fields = parse_fields(spec);
        self
    }

    /// Set already normalized fields; a repeated name keeps its first field
    #[must_use]
    pub fn fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = unique_fields(fields);
        self
    }

    /// Parse and set relations from the compact grammar
    #[must_use]
    pub fn relations_spec(mut self, spec: &str) -> Self {
        self.relations = parse_relations(spec);
        self
    }

    /// Set already normalized relations
    #[must_use]
    pub fn relations(mut self, relations: Vec<Relation>) -> Self {
        self.relations = relations;
        self
    }

    /// Overwrite existing files
    #[must_use]
    pub const fn force_overwrite(mut self, force: bool) -> Self {
        self.force_overwrite = force;
        self
    }

    /// Generate API artifacts only; unset means the configuration default
    #[must_use]
    pub const fn api_only(mut self, api_only: bool) -> Self {
        self.api_only = Some(api_only);
        self
    }

    /// Switch one kind on or off
    #[must_use]
    pub fn flag(mut self, kind: ArtifactKind, enabled: bool) -> Self {
        self.generate_flags.insert(kind, enabled);
        self
    }

    /// Generate only the listed kinds
    #[must_use]
    pub fn only(mut self, kinds: &[ArtifactKind]) -> Self {
        for kind in ArtifactKind::ALL {
            self.generate_flags.insert(kind, kinds.contains(&kind));
        }
        self
    }

    /// Finish the request
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::InvalidModelName`] when the last path segment of
    /// the name does not start with a letter.
    pub fn build(self, config: &CrudConfig) -> Result<GenerationRequest> {
        let (model_name, sub_namespace) = parse_model_path(&self.name)?;

        let mut model_namespace = format!("{}\\Models", config.namespace);
        for segment in &sub_namespace {
            model_namespace.push('\\');
            model_namespace.push_str(segment);
        }

        Ok(GenerationRequest {
            model_name,
            model_namespace,
            sub_namespace,
            fields: self.fields,
            relations: self.relations,
            force_overwrite: self.force_overwrite,
            api_only: self.api_only.unwrap_or(config.api_only),
            generate_flags: self.generate_flags,
        })
    }
}

/// Split `Blog/Post` (or `Blog\Post`) into the class name and namespace segments
fn parse_model_path(name: &str) -> Result<(String, Vec<String>)> {
    let mut segments: Vec<String> = name
        .split(['/', '\\'])
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(NameHelpers::pascal)
        .collect();

    let model = segments
        .pop()
        .filter(|model| model.chars().next().is_some_and(char::is_alphabetic))
        .ok_or_else(|| CrudError::InvalidModelName(name.to_string()))?;

    Ok((model, segments))
}

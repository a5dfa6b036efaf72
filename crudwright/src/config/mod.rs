//! Configuration management for crudwright
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `CRUDWRIGHT_` prefix, `__` for nesting)
//! 2. `./crudwright.toml` in the project root
//! 3. `~/.config/crudwright/config.toml` (user config, XDG)
//! 4. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # crudwright.toml
//! namespace = "App"
//! css_framework = "bootstrap"
//! soft_deletes = false
//!
//! [generate]
//! seeder = false
//!
//! [routes]
//! middleware = ["web", "auth"]
//!
//! [pagination]
//! per_page = 25
//!
//! [field_types]
//! json = "textarea"
//! ```

use crate::error::Result;
use crate::scaffold::mapping::InputKind;
use crate::scaffold::request::ArtifactKind;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Project-local configuration file name
pub const CONFIG_FILE: &str = "crudwright.toml";

/// Output directories, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Eloquent models
    pub model: PathBuf,
    /// HTTP controllers
    pub controller: PathBuf,
    /// Form requests
    pub request: PathBuf,
    /// API resources
    pub resource: PathBuf,
    /// Database migrations
    pub migration: PathBuf,
    /// Database seeders
    pub seeder: PathBuf,
    /// Model factories
    pub factory: PathBuf,
    /// Blade views
    pub view: PathBuf,
    /// Route files
    pub route: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            model: PathBuf::from("app/Models"),
            controller: PathBuf::from("app/Http/Controllers"),
            request: PathBuf::from("app/Http/Requests"),
            resource: PathBuf::from("app/Http/Resources"),
            migration: PathBuf::from("database/migrations"),
            seeder: PathBuf::from("database/seeders"),
            factory: PathBuf::from("database/factories"),
            view: PathBuf::from("resources/views"),
            route: PathBuf::from("routes"),
        }
    }
}

/// CSS framework the generated views are styled for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CssFramework {
    /// Tailwind component classes (`crud-*`)
    #[default]
    Tailwind,
    /// Bootstrap 5 classes
    Bootstrap,
}

/// Default on/off switch per artifact kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct GenerateSettings {
    /// Generate the migration
    pub migration: bool,
    /// Generate the model
    pub model: bool,
    /// Generate the factory
    pub factory: bool,
    /// Generate the seeder
    pub seeder: bool,
    /// Generate the form requests
    pub request: bool,
    /// Generate the API resource
    pub resource: bool,
    /// Generate the controller
    pub controller: bool,
    /// Generate the Blade views
    pub views: bool,
    /// Register routes
    pub routes: bool,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            migration: true,
            model: true,
            factory: true,
            seeder: true,
            request: true,
            resource: true,
            controller: true,
            views: true,
            routes: true,
        }
    }
}

impl GenerateSettings {
    /// Whether a kind is enabled by default
    #[must_use]
    pub const fn enabled(&self, kind: ArtifactKind) -> bool {
        match kind {
            ArtifactKind::Migration => self.migration,
            ArtifactKind::Model => self.model,
            ArtifactKind::Factory => self.factory,
            ArtifactKind::Seeder => self.seeder,
            ArtifactKind::Request => self.request,
            ArtifactKind::Resource => self.resource,
            ArtifactKind::Controller => self.controller,
            ArtifactKind::Views => self.views,
            ArtifactKind::Routes => self.routes,
        }
    }
}

/// Route registration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteSettings {
    /// URL prefix applied to the web route group (empty for none)
    pub prefix: String,
    /// Middleware for web routes
    pub middleware: Vec<String>,
    /// Middleware for API routes
    pub api_middleware: Vec<String>,
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            middleware: vec!["web".to_string()],
            api_middleware: vec!["api".to_string()],
        }
    }
}

/// Pagination settings for generated listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationSettings {
    /// Records per page; seeders create twice as many
    pub per_page: u32,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self { per_page: 15 }
    }
}

/// Complete crudwright configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrudConfig {
    /// Root application namespace
    pub namespace: String,

    /// CSS framework for views
    pub css_framework: CssFramework,

    /// Generate API artifacts only (no views, API routes)
    pub api_only: bool,

    /// Add soft deletes to migrations and models
    pub soft_deletes: bool,

    /// Add timestamps to migrations
    pub timestamps: bool,

    /// Project-local stub override directory, relative to the project root
    pub stubs_path: PathBuf,

    /// Output directories
    pub paths: PathSettings,

    /// Default generation switches
    pub generate: GenerateSettings,

    /// Route registration
    pub routes: RouteSettings,

    /// Pagination
    pub pagination: PaginationSettings,

    /// Field type to form widget overrides (e.g. `json = "textarea"`)
    pub field_types: BTreeMap<String, InputKind>,
}

impl Default for CrudConfig {
    fn default() -> Self {
        Self {
            namespace: "App".to_string(),
            paths: PathSettings::default(),
            css_framework: CssFramework::default(),
            api_only: false,
            soft_deletes: true,
            timestamps: true,
            generate: GenerateSettings::default(),
            routes: RouteSettings::default(),
            pagination: PaginationSettings::default(),
            field_types: BTreeMap::new(),
            stubs_path: PathBuf::from("resources/stubs/vendor/crudwright"),
        }
    }
}

impl CrudConfig {
    /// Load configuration for a project
    ///
    /// Merges defaults, the user config, `<project_root>/crudwright.toml` and
    /// `CRUDWRIGHT_*` environment variables, in increasing priority.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - A configuration file contains invalid TOML syntax
    /// - Configuration values fail type conversion
    pub fn load(project_root: &Path) -> Result<Self> {
        let mut figment = Self::defaults()?;

        let user_config = Self::user_config_path();
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        let local_config = project_root.join(CONFIG_FILE);
        if local_config.exists() {
            tracing::debug!(path = %local_config.display(), "Loading project configuration");
            figment = figment.merge(Toml::file(&local_config));
        }

        Self::extract(figment)
    }

    /// Load configuration from a specific file, skipping the user config
    ///
    /// # Errors
    ///
    /// Returns an error if the file contains invalid TOML or values of the
    /// wrong type.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::extract(Self::defaults()?.merge(Toml::file(path)))
    }

    fn defaults() -> Result<Figment> {
        let defaults = toml::to_string(&Self::default())
            .map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(Figment::new().merge(Toml::string(&defaults)))
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config = figment
            .merge(Env::prefixed("CRUDWRIGHT_").split("__").lowercase(true))
            .extract()?;
        Ok(config)
    }

    /// User-level configuration path (`~/.config/crudwright/config.toml`)
    #[must_use]
    pub fn user_config_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from(CONFIG_FILE),
            |config_dir| config_dir.join("crudwright").join("config.toml"),
        )
    }

    /// Output directory for an artifact kind
    #[must_use]
    pub fn path_for(&self, kind: ArtifactKind) -> &Path {
        match kind {
            ArtifactKind::Migration => &self.paths.migration,
            ArtifactKind::Model => &self.paths.model,
            ArtifactKind::Factory => &self.paths.factory,
            ArtifactKind::Seeder => &self.paths.seeder,
            ArtifactKind::Request => &self.paths.request,
            ArtifactKind::Resource => &self.paths.resource,
            ArtifactKind::Controller => &self.paths.controller,
            ArtifactKind::Views => &self.paths.view,
            ArtifactKind::Routes => &self.paths.route,
        }
    }

    /// Number of records a generated seeder creates
    #[must_use]
    pub const fn seed_count(&self) -> u32 {
        self.pagination.per_page.saturating_mul(2)
    }
}

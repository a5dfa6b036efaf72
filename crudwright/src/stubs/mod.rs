//! Stub templates for generated artifacts
//!
//! Each artifact is rendered from a named stub. A stub placed in the project's
//! override directory (`<stubs_path>/<name>.stub`) wins over the bundled
//! default. Stubs are handlebars templates filled from a flat map of
//! pre-rendered strings; HTML escaping is disabled since the output is code.
//!
//! Blade echo tags in a stub must be written as `\{{ ... }}` so handlebars
//! leaves them alone.

use crate::error::{CrudError, Result};
use handlebars::Handlebars;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Flat placeholder map handed to a stub
pub type Placeholders = BTreeMap<&'static str, String>;

/// Bundled default stubs, by name
const BUNDLED: &[(&str, &str)] = &[
    ("migration", include_str!("../../stubs/migration.stub")),
    ("migration.pivot", include_str!("../../stubs/migration.pivot.stub")),
    ("model", include_str!("../../stubs/model.stub")),
    ("factory", include_str!("../../stubs/factory.stub")),
    ("seeder", include_str!("../../stubs/seeder.stub")),
    ("request", include_str!("../../stubs/request.stub")),
    ("resource", include_str!("../../stubs/resource.stub")),
    ("controller", include_str!("../../stubs/controller.stub")),
    ("controller.api", include_str!("../../stubs/controller.api.stub")),
    ("views/index", include_str!("../../stubs/views/index.stub")),
    ("views/create", include_str!("../../stubs/views/create.stub")),
    ("views/edit", include_str!("../../stubs/views/edit.stub")),
    ("views/show", include_str!("../../stubs/views/show.stub")),
    ("views/form", include_str!("../../stubs/views/form.stub")),
    ("routes.web", include_str!("../../stubs/routes.web.stub")),
    ("routes.api", include_str!("../../stubs/routes.api.stub")),
];

/// Layered stub lookup and rendering
pub struct StubRegistry {
    override_dir: Option<PathBuf>,
    handlebars: Handlebars<'static>,
}

impl std::fmt::Debug for StubRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StubRegistry")
            .field("override_dir", &self.override_dir)
            .finish_non_exhaustive()
    }
}

impl Default for StubRegistry {
    fn default() -> Self {
        Self::bundled()
    }
}

impl StubRegistry {
    /// Registry using only the bundled stubs
    #[must_use]
    pub fn bundled() -> Self {
        let mut handlebars = Handlebars::new();

        // Generated code, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        Self {
            override_dir: None,
            handlebars,
        }
    }

    /// Registry that prefers stubs from `dir`
    #[must_use]
    pub fn with_overrides(dir: impl Into<PathBuf>) -> Self {
        Self {
            override_dir: Some(dir.into()),
            ..Self::bundled()
        }
    }

    /// Override directory, if any
    #[must_use]
    pub fn override_dir(&self) -> Option<&Path> {
        self.override_dir.as_deref()
    }

    /// Names of all bundled stubs
    pub fn names() -> impl Iterator<Item = &'static str> {
        BUNDLED.iter().map(|(name, _)| *name)
    }

    /// Bundled text of a stub
    #[must_use]
    pub fn bundled_text(name: &str) -> Option<&'static str> {
        BUNDLED
            .iter()
            .find(|(stub, _)| *stub == name)
            .map(|(_, text)| *text)
    }

    /// Stub text, preferring the override directory
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::StubNotFound`] when neither layer has the stub and
    /// [`CrudError::Io`] when an existing override cannot be read.
    pub fn load(&self, name: &str) -> Result<Cow<'static, str>> {
        if let Some(dir) = &self.override_dir {
            let path = dir.join(format!("{name}.stub"));
            if path.is_file() {
                tracing::debug!(stub = name, path = %path.display(), "Using project stub");
                let text = fs::read_to_string(&path).map_err(|e| CrudError::io(&path, e))?;
                return Ok(Cow::Owned(text));
            }
        }

        Self::bundled_text(name)
            .map(Cow::Borrowed)
            .ok_or_else(|| CrudError::StubNotFound(name.to_string()))
    }

    /// Render a stub with a placeholder map
    ///
    /// Placeholders missing from the map render as empty strings.
    ///
    /// # Errors
    ///
    /// Returns an error when the stub cannot be found or is not a valid template.
    pub fn render(&self, name: &str, placeholders: &Placeholders) -> Result<String> {
        let template = self.load(name)?;
        self.handlebars
            .render_template(&template, placeholders)
            .map_err(|e| CrudError::Render {
                name: name.to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_every_bundled_stub_renders() {
        let registry = StubRegistry::bundled();
        for name in StubRegistry::names() {
            assert!(
                registry.render(name, &Placeholders::new()).is_ok(),
                "stub {name} failed to render"
            );
        }
    }

    #[test]
    fn test_render_does_not_escape() {
        let registry = StubRegistry::bundled();
        let placeholders = Placeholders::from([
            ("namespace", "App\\Models".to_string()),
            ("class_name", "Post".to_string()),
            ("imports", "use Illuminate\\Database\\Eloquent\\Model;".to_string()),
            ("fillable", "'title' => \"<b>\"".to_string()),
        ]);
        let rendered = registry.render("model", &placeholders).unwrap();
        assert!(rendered.contains("namespace App\\Models;"));
        assert!(rendered.contains("class Post extends Model"));
        assert!(rendered.contains("'title' => \"<b>\""));
    }

    #[test]
    fn test_blade_echo_survives() {
        let registry = StubRegistry::bundled();
        let placeholders = Placeholders::from([("route_prefix", "posts".to_string())]);
        let rendered = registry.render("views/create", &placeholders).unwrap();
        assert!(rendered.contains("{{ route('posts.store') }}"));
    }

    #[test]
    fn test_project_override_wins() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("seeder.stub"), "custom {{count}}").unwrap();

        let registry = StubRegistry::with_overrides(dir.path());
        let placeholders = Placeholders::from([("count", "30".to_string())]);
        assert_eq!(registry.render("seeder", &placeholders).unwrap(), "custom 30");

        // Stubs without an override still come from the bundle
        assert!(registry.load("model").unwrap().contains("extends Model"));
    }

    #[test]
    fn test_missing_stub() {
        let registry = StubRegistry::bundled();
        assert!(matches!(
            registry.load("policy"),
            Err(CrudError::StubNotFound(name)) if name == "policy"
        ));
    }
}

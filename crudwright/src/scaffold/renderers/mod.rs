//! Artifact renderers
//!
//! One [`Renderer`] per [`ArtifactKind`]. Renderers are pure: they read the
//! [`RenderContext`] and return artifacts without touching the filesystem.
//! The [`RendererRegistry`] maps every kind to its renderer and can be
//! modified to swap one out.

mod controller;
mod factory;
mod migration;
mod model;
mod request;
mod resource;
mod routes;
mod seeder;
mod views;

pub use controller::ControllerRenderer;
pub use factory::FactoryRenderer;
pub use migration::MigrationRenderer;
pub use model::ModelRenderer;
pub use request::RequestRenderer;
pub use resource::ResourceRenderer;
pub use routes::RoutesRenderer;
pub use seeder::SeederRenderer;
pub use views::ViewsRenderer;

use super::naming::NameSet;
use super::request::{ArtifactKind, GenerationRequest};
use crate::config::CrudConfig;
use crate::error::Result;
use crate::stubs::StubRegistry;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// How an artifact reaches the disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteMode {
    /// Whole file, subject to the overwrite policy
    Create,
    /// Appended to a shared file unless `marker` is already present
    AppendUnlessPresent {
        /// Text whose presence means the content is already registered
        marker: String,
        /// Initial content when the target file does not exist
        preamble: Option<String>,
    },
}

/// One generated file (or file fragment)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Path relative to the project root
    pub path: PathBuf,
    /// Generated text
    pub content: String,
    /// Short human description
    pub description: String,
    /// Write mode
    pub mode: WriteMode,
}

impl Artifact {
    /// Whole-file artifact
    #[must_use]
    pub fn create(path: PathBuf, content: String, description: impl Into<String>) -> Self {
        Self {
            path,
            content,
            description: description.into(),
            mode: WriteMode::Create,
        }
    }
}

/// Everything a renderer may read
#[derive(Debug)]
pub struct RenderContext<'a> {
    /// The request being generated
    pub request: &'a GenerationRequest,
    /// Names derived from the model name
    pub names: NameSet,
    /// Effective configuration
    pub config: &'a CrudConfig,
    /// Stub source
    pub stubs: &'a StubRegistry,
    /// Generation clock, used for timestamped filenames
    pub now: NaiveDateTime,
}

impl<'a> RenderContext<'a> {
    /// Build a context for a request
    #[must_use]
    pub fn new(
        request: &'a GenerationRequest,
        config: &'a CrudConfig,
        stubs: &'a StubRegistry,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            names: NameSet::new(&request.model_name),
            request,
            config,
            stubs,
            now,
        }
    }

    /// Output directory for a kind, extended by the model's sub-namespace
    #[must_use]
    pub fn namespaced_dir(&self, kind: ArtifactKind) -> PathBuf {
        self.request
            .sub_namespace
            .iter()
            .fold(self.config.path_for(kind).to_path_buf(), |dir, segment| dir.join(segment))
    }

    /// PHP namespace under a base, extended by the model's sub-namespace
    #[must_use]
    pub fn namespace_under(&self, base: &str) -> String {
        let mut namespace = base.to_string();
        for segment in &self.request.sub_namespace {
            namespace.push('\\');
            namespace.push_str(segment);
        }
        namespace
    }

    /// Application namespace joined with a suffix (`App\Http\Controllers`)
    #[must_use]
    pub fn app_namespace(&self, suffix: &str) -> String {
        format!("{}\\{}", self.config.namespace, suffix)
    }

    /// Fully qualified class of a related model
    #[must_use]
    pub fn related_model_class(&self, model: &str) -> String {
        format!("{}\\Models\\{}", self.config.namespace, model)
    }
}

/// Produces the artifacts of one kind
pub trait Renderer {
    /// Kind this renderer produces
    fn kind(&self) -> ArtifactKind;

    /// Render the artifacts for a request
    ///
    /// # Errors
    ///
    /// Returns an error when a stub cannot be loaded or rendered.
    fn render(&self, ctx: &RenderContext<'_>) -> Result<Vec<Artifact>>;
}

/// Mapping from every artifact kind to its renderer
pub struct RendererRegistry {
    renderers: BTreeMap<ArtifactKind, Box<dyn Renderer>>,
}

impl std::fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.renderers.keys()).finish()
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        let mut registry = Self {
            renderers: BTreeMap::new(),
        };
        registry.register(Box::new(MigrationRenderer));
        registry.register(Box::new(ModelRenderer));
        registry.register(Box::new(FactoryRenderer));
        registry.register(Box::new(SeederRenderer));
        registry.register(Box::new(RequestRenderer));
        registry.register(Box::new(ResourceRenderer));
        registry.register(Box::new(ControllerRenderer));
        registry.register(Box::new(ViewsRenderer));
        registry.register(Box::new(RoutesRenderer));
        registry
    }
}

impl RendererRegistry {
    /// Register a renderer, replacing any previous one for its kind
    pub fn register(&mut self, renderer: Box<dyn Renderer>) {
        self.renderers.insert(renderer.kind(), renderer);
    }

    /// Renderer for a kind
    #[must_use]
    pub fn get(&self, kind: ArtifactKind) -> Option<&dyn Renderer> {
        self.renderers.get(&kind).map(AsRef::as_ref)
    }

    /// Registered kinds in generation order
    pub fn kinds(&self) -> impl Iterator<Item = ArtifactKind> + '_ {
        self.renderers.keys().copied()
    }
}

/// Join entries with a newline and the given indentation
pub(crate) fn join_indented<I, S>(items: I, indent: usize, separator: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let glue = format!("{separator}\n{}", " ".repeat(indent));
    items
        .into_iter()
        .map(|item| item.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(&glue)
}

/// `path/file` helper
pub(crate) fn file_in(dir: &Path, file: impl AsRef<Path>) -> PathBuf {
    dir.join(file)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_every_kind() {
        let registry = RendererRegistry::default();
        assert_eq!(registry.kinds().collect::<Vec<_>>(), ArtifactKind::ALL);
        for kind in ArtifactKind::ALL {
            assert_eq!(registry.get(kind).map(Renderer::kind), Some(kind));
        }
    }

    #[test]
    fn test_join_indented() {
        assert_eq!(join_indented(["'a'", "'b'"], 4, ","), "'a',\n    'b'");
        assert_eq!(join_indented(Vec::<String>::new(), 4, ","), "");
    }

    #[test]
    fn test_namespaced_dir() {
        let config = CrudConfig::default();
        let request = GenerationRequest::builder("Blog/Post").build(&config).unwrap();
        let stubs = StubRegistry::bundled();
        let ctx = RenderContext::new(&request, &config, &stubs, test_support::clock());
        assert_eq!(
            ctx.namespaced_dir(ArtifactKind::Model),
            PathBuf::from("app/Models/Blog")
        );
        assert_eq!(ctx.namespace_under("App\\Http\\Controllers"), "App\\Http\\Controllers\\Blog");
    }
}

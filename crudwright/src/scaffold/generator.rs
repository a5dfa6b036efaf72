//! CRUD generation orchestrator
//!
//! The [`Generator`] runs every enabled renderer for a request in the fixed
//! artifact order and writes the results through a [`Filesystem`]:
//! - Migration (plus pivot migrations)
//! - Model
//! - Factory
//! - Seeder
//! - Store / update form requests
//! - API resource
//! - Controller
//! - Blade views
//! - Route registration
//!
//! A failing renderer is recorded in the [`GenerationReport`] and the
//! remaining kinds still run.

use super::renderers::{Artifact, RenderContext, RendererRegistry, WriteMode};
use super::request::{ArtifactKind, GenerationRequest};
use crate::config::CrudConfig;
use crate::error::Result;
use crate::fs::{FileOutcome, Filesystem};
use crate::stubs::StubRegistry;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Length of the `2024_01_15_103000_` migration filename prefix
const MIGRATION_PREFIX_LEN: usize = 18;

/// One file the generator handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the project root
    pub path: PathBuf,
    /// What happened on disk
    pub outcome: FileOutcome,
    /// File description for user feedback
    pub description: String,
}

/// Result of one artifact kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindOutcome {
    /// Renderer ran; every file has its own outcome
    Succeeded(Vec<GeneratedFile>),
    /// Kind disabled for this request
    Skipped,
    /// Renderer or write failed
    Failed {
        /// Underlying error message
        message: String,
        /// Files handled before the failure
        files: Vec<GeneratedFile>,
    },
}

/// Per-kind outcomes of one generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Model class name
    pub model: String,
    /// Outcomes in generation order
    pub outcomes: Vec<(ArtifactKind, KindOutcome)>,
}

impl GenerationReport {
    /// Outcome of one kind, if it was considered
    #[must_use]
    pub fn outcome(&self, kind: ArtifactKind) -> Option<&KindOutcome> {
        self.outcomes
            .iter()
            .find(|(candidate, _)| *candidate == kind)
            .map(|(_, outcome)| outcome)
    }

    /// Every file handled, in generation order
    ///
    /// Includes files a failed kind wrote before its error.
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.outcomes.iter().flat_map(|(_, outcome)| match outcome {
            KindOutcome::Succeeded(files) | KindOutcome::Failed { files, .. } => files.as_slice(),
            KindOutcome::Skipped => &[],
        })
    }

    /// Kinds that failed, with their messages
    pub fn failures(&self) -> impl Iterator<Item = (ArtifactKind, &str)> {
        self.outcomes.iter().filter_map(|(kind, outcome)| match outcome {
            KindOutcome::Failed { message, .. } => Some((*kind, message.as_str())),
            _ => None,
        })
    }

    /// Whether any kind failed
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Number of files actually written
    #[must_use]
    pub fn written_count(&self) -> usize {
        self.files().filter(|file| file.outcome.is_write()).count()
    }
}

/// CRUD generator
pub struct Generator<F: Filesystem> {
    config: CrudConfig,
    stubs: StubRegistry,
    fs: F,
    renderers: RendererRegistry,
    clock: Option<NaiveDateTime>,
}

impl<F: Filesystem> std::fmt::Debug for Generator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("stubs", &self.stubs)
            .field("renderers", &self.renderers)
            .finish_non_exhaustive()
    }
}

impl<F: Filesystem> Generator<F> {
    /// Create a generator with the default renderers
    #[must_use]
    pub fn new(config: CrudConfig, stubs: StubRegistry, fs: F) -> Self {
        Self {
            config,
            stubs,
            fs,
            renderers: RendererRegistry::default(),
            clock: None,
        }
    }

    /// Replace the renderer registry
    #[must_use]
    pub fn with_renderers(mut self, renderers: RendererRegistry) -> Self {
        self.renderers = renderers;
        self
    }

    /// Fix the generation clock (migration timestamps)
    #[must_use]
    pub const fn with_clock(mut self, now: NaiveDateTime) -> Self {
        self.clock = Some(now);
        self
    }

    /// Effective configuration
    #[must_use]
    pub const fn config(&self) -> &CrudConfig {
        &self.config
    }

    /// Filesystem the generator writes through
    #[must_use]
    pub const fn fs(&self) -> &F {
        &self.fs
    }

    fn now(&self) -> NaiveDateTime {
        self.clock
            .unwrap_or_else(|| chrono::Local::now().naive_local())
    }

    /// Generate every enabled artifact kind for a request
    ///
    /// Never fails as a whole; per-kind failures are in the report.
    pub fn generate(&self, request: &GenerationRequest) -> GenerationReport {
        tracing::info!(
            model = %request.model_name,
            fields = request.fields.len(),
            relations = request.relations.len(),
            api_only = request.api_only,
            "Generating CRUD"
        );

        let now = self.now();
        let outcomes = self
            .renderers
            .kinds()
            .map(|kind| {
                let outcome = if request.should_generate(kind, &self.config) {
                    self.run_kind(kind, request, now)
                } else {
                    tracing::debug!(%kind, "Skipping disabled artifact kind");
                    KindOutcome::Skipped
                };
                (kind, outcome)
            })
            .collect();

        GenerationReport {
            model: request.model_name.clone(),
            outcomes,
        }
    }

    /// Generate one artifact kind regardless of the request's switches
    ///
    /// Views are still skipped for API-only requests.
    pub fn generate_single(&self, kind: ArtifactKind, request: &GenerationRequest) -> KindOutcome {
        if kind == ArtifactKind::Views && request.api_only {
            return KindOutcome::Skipped;
        }
        self.run_kind(kind, request, self.now())
    }

    fn run_kind(&self, kind: ArtifactKind, request: &GenerationRequest, now: NaiveDateTime) -> KindOutcome {
        let mut files = Vec::new();
        match self.try_kind(kind, request, now, &mut files) {
            Ok(()) => KindOutcome::Succeeded(files),
            Err(e) => {
                tracing::error!(
                    %kind,
                    model = %request.model_name,
                    written = files.len(),
                    error = %e,
                    "Artifact generation failed"
                );
                KindOutcome::Failed {
                    message: e.to_string(),
                    files,
                }
            }
        }
    }

    /// Render one kind and write its artifacts in order, recording each into `files`
    fn try_kind(
        &self,
        kind: ArtifactKind,
        request: &GenerationRequest,
        now: NaiveDateTime,
        files: &mut Vec<GeneratedFile>,
    ) -> Result<()> {
        let Some(renderer) = self.renderers.get(kind) else {
            return Ok(());
        };

        let ctx = RenderContext::new(request, &self.config, &self.stubs, now);
        for artifact in renderer.render(&ctx)? {
            files.push(self.write(kind, artifact, request.force_overwrite)?);
        }
        Ok(())
    }

    fn write(&self, kind: ArtifactKind, artifact: Artifact, force: bool) -> Result<GeneratedFile> {
        let Artifact {
            path,
            content,
            description,
            mode,
        } = artifact;

        let (path, outcome) = match mode {
            WriteMode::Create => {
                // A migration for the same table under an older timestamp counts as existing
                let path = if kind == ArtifactKind::Migration {
                    self.existing_migration(&path)?.unwrap_or(path)
                } else {
                    path
                };
                let outcome = self.fs.write_if_absent_or_forced(&path, &content, force)?;
                (path, outcome)
            }
            WriteMode::AppendUnlessPresent { marker, preamble } => {
                let outcome =
                    self.fs
                        .append_unless_present(&path, &marker, &content, preamble.as_deref())?;
                (path, outcome)
            }
        };

        tracing::debug!(%kind, path = %path.display(), %outcome, "Artifact handled");
        Ok(GeneratedFile {
            path,
            outcome,
            description,
        })
    }

    /// Earlier migration creating the same table, if any
    fn existing_migration(&self, path: &Path) -> Result<Option<PathBuf>> {
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            return Ok(None);
        };
        let Some(suffix) = name.get(MIGRATION_PREFIX_LEN..) else {
            return Ok(None);
        };

        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        let pattern = Path::new(&glob::Pattern::escape(&dir.to_string_lossy())).join(format!(
            "????_??_??_??????_{}",
            glob::Pattern::escape(suffix)
        ));
        let mut matches = self.fs.glob(&pattern.to_string_lossy())?;
        matches.sort();
        Ok(matches.into_iter().next())
    }
}

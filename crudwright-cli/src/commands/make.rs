//! Single-model generation
//!
//! ```bash
//! crudwright make Post \
//!   --fields "title:string:unique,body:text,status:enum:draft:published" \
//!   --relations "belongsTo:User,hasMany:Comment"
//! ```

use super::{generator_for, print_next_steps, print_report};
use anyhow::{Context, Result};
use console::style;
use crudwright::scaffold::{ArtifactKind, GenerationRequest};
use std::path::Path;

/// `crudwright make`
#[derive(Debug, Clone, Default)]
pub struct MakeCommand {
    /// Model name, optionally namespaced (`Blog/Post`)
    pub name: String,
    /// Compact field spec
    pub fields: String,
    /// Compact relation spec
    pub relations: String,
    /// API-only generation
    pub api: bool,
    /// Overwrite existing files
    pub force: bool,
    /// Restrict generation to these kinds; empty means configuration defaults
    pub only: Vec<ArtifactKind>,
}

impl MakeCommand {
    /// Generate into `project`; returns whether every artifact kind succeeded
    ///
    /// # Errors
    ///
    /// Returns an error when configuration cannot be loaded or the model
    /// name is invalid.
    pub fn execute(&self, project: &Path) -> Result<bool> {
        let generator = generator_for(project)?;

        let mut builder = GenerationRequest::builder(self.name.as_str())
            .fields_spec(&self.fields)
            .relations_spec(&self.relations)
            .force_overwrite(self.force);
        if self.api {
            builder = builder.api_only(true);
        }
        if !self.only.is_empty() {
            builder = builder.only(&self.only);
        }
        let request = builder
            .build(generator.config())
            .with_context(|| format!("Cannot generate CRUD for '{}'", self.name))?;

        println!(
            "\n{} {}",
            style("Generating CRUD for").cyan().bold(),
            style(&request.model_name).green().bold()
        );

        let report = generator.generate(&request);
        let succeeded = print_report(&report);

        if succeeded {
            println!(
                "\n{} CRUD for {} is ready ({} files written)",
                style("✨").green().bold(),
                style(&request.model_name).green().bold(),
                report.written_count()
            );
            print_next_steps(&request);
        } else {
            println!(
                "\n{} Some artifacts for {} failed; fix the cause and re-run with {}",
                style("!").red().bold(),
                style(&request.model_name).bold(),
                style("--force").yellow()
            );
        }

        Ok(succeeded)
    }
}

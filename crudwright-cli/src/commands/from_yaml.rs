//! Bulk generation from a YAML document
//!
//! ```bash
//! crudwright from-yaml crud.yaml --force
//! ```

use super::{generator_for, print_report};
use anyhow::{Context, Result};
use console::style;
use crudwright::scaffold::BulkDocument;
use std::path::{Path, PathBuf};

/// `crudwright from-yaml`
#[derive(Debug, Clone)]
pub struct FromYamlCommand {
    /// Document path, relative to the working directory
    pub file: PathBuf,
    /// Overwrite existing files
    pub force: bool,
}

impl FromYamlCommand {
    /// Generate every model of the document into `project`
    ///
    /// Returns whether every model generated cleanly.
    ///
    /// # Errors
    ///
    /// Returns an error when the document is missing or unparsable, or the
    /// project configuration cannot be loaded.
    pub fn execute(&self, project: &Path) -> Result<bool> {
        let document = BulkDocument::load(&self.file).context("Cannot read bulk document")?;
        let generator = generator_for(project)?;

        println!(
            "\n{} {} {}",
            style("Generating").cyan().bold(),
            document.models.len(),
            style("models from YAML").cyan().bold()
        );

        let mut succeeded = true;
        for (name, request) in document.models.keys().zip(document.requests(generator.config(), self.force)) {
            println!("\n{} {}", style("▸").cyan(), style(name).green().bold());
            match request {
                Ok(request) => {
                    let report = generator.generate(&request);
                    succeeded &= print_report(&report);
                }
                Err(e) => {
                    println!("  {} {e}", style("✗").red());
                    succeeded = false;
                }
            }
        }

        if succeeded {
            println!("\n{} All models generated", style("✨").green().bold());
        }
        Ok(succeeded)
    }
}

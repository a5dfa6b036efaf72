//! CLI command implementations

pub mod from_yaml;
pub mod make;

pub use from_yaml::FromYamlCommand;
pub use make::MakeCommand;

use anyhow::{Context, Result};
use console::style;
use crudwright::prelude::*;
use crudwright::scaffold::NameSet;
use std::path::Path;

/// Load configuration and build a generator for a project root
///
/// # Errors
///
/// Returns an error when the project configuration cannot be loaded.
pub fn generator_for(project: &Path) -> Result<Generator<LocalFilesystem>> {
    let config = CrudConfig::load(project)
        .with_context(|| format!("Failed to load configuration for {}", project.display()))?;
    let stubs = StubRegistry::with_overrides(project.join(&config.stubs_path));
    Ok(Generator::new(config, stubs, LocalFilesystem::new(project)))
}

fn print_files(files: &[GeneratedFile]) {
    for file in files {
        let mark = if file.outcome.is_write() {
            style("✓").green()
        } else {
            style("•").yellow()
        };
        println!(
            "  {mark} {} {}",
            style(file.path.display()).dim(),
            style(format!("({}, {})", file.description, file.outcome)).dim()
        );
    }
}

/// Print per-artifact outcomes; returns whether every kind succeeded
pub fn print_report(report: &GenerationReport) -> bool {
    for (kind, outcome) in &report.outcomes {
        match outcome {
            KindOutcome::Succeeded(files) => print_files(files),
            KindOutcome::Skipped => {}
            KindOutcome::Failed { message, files } => {
                print_files(files);
                println!("  {} {}: {message}", style("✗").red(), kind.label());
            }
        }
    }
    !report.has_failures()
}

/// Print follow-up commands for a generated model
pub fn print_next_steps(request: &GenerationRequest) {
    let names = NameSet::new(&request.model_name);

    println!("\n{}", style("Next steps:").cyan().bold());
    println!("  1. Review the migration in {}", style("database/migrations/").yellow());
    println!(
        "  2. Adjust the model in {}",
        style(format!("app/Models/{}.php", request.model_name)).yellow()
    );
    println!("  3. Run: {}", style("php artisan migrate").yellow());
    println!(
        "  4. Run: {}",
        style(format!("php artisan db:seed --class={}Seeder", request.model_name)).yellow()
    );
    if !request.api_only {
        println!("\n  Routes available at: {}", style(format!("/{}", names.route_prefix)).yellow());
    }
}

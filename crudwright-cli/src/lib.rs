//! crudwright CLI library
//!
//! Argument parsing and command implementations behind the `crudwright`
//! binary, kept in a library so they can be driven from tests.

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod commands;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commands::{FromYamlCommand, MakeCommand};
use crudwright::scaffold::ArtifactKind;
use std::path::PathBuf;
use std::process::ExitCode;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "crudwright")]
#[command(version)]
#[command(about = "Generate complete CRUD layers for Laravel projects", long_about = None)]
pub struct Cli {
    /// Project root to generate into
    #[arg(long, short = 'p', global = true, default_value = ".")]
    pub project: PathBuf,

    /// Increase log verbosity (-v, -vv)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the CRUD layer for one model
    Make {
        /// Model name (e.g. `Post` or `Blog/Post`)
        name: String,
        /// Fields as `name:type:modifiers` (e.g. `title:string:unique,body:text`)
        #[arg(long, default_value = "")]
        fields: String,
        /// Relations as `type:Model:foreign_key` (e.g. `belongsTo:User`)
        #[arg(long, default_value = "")]
        relations: String,
        /// Generate an API controller and routes, no views
        #[arg(long)]
        api: bool,
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
        /// Generate only these artifact kinds
        #[arg(long, value_delimiter = ',', value_parser = parse_kind)]
        only: Vec<ArtifactKind>,
    },
    /// Generate CRUD layers for every model in a YAML document
    FromYaml {
        /// Path to the YAML document
        file: PathBuf,
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

/// Parse an artifact kind argument
///
/// # Errors
///
/// Returns the list of valid kinds when the name is unknown.
pub fn parse_kind(value: &str) -> Result<ArtifactKind, String> {
    value.parse().map_err(|_| {
        let valid: Vec<_> = ArtifactKind::ALL.iter().map(|kind| kind.as_str()).collect();
        format!("unknown artifact kind '{value}' (expected one of: {})", valid.join(", "))
    })
}

impl Cli {
    /// Run the selected command
    ///
    /// # Errors
    ///
    /// Returns an error when configuration or the bulk document cannot be
    /// loaded.
    pub fn run(self) -> Result<ExitCode> {
        let succeeded = match self.command {
            Commands::Make {
                name,
                fields,
                relations,
                api,
                force,
                only,
            } => MakeCommand {
                name,
                fields,
                relations,
                api,
                force,
                only,
            }
            .execute(&self.project)?,
            Commands::FromYaml { file, force } => FromYamlCommand { file, force }.execute(&self.project)?,
        };

        Ok(if succeeded { ExitCode::SUCCESS } else { ExitCode::FAILURE })
    }
}

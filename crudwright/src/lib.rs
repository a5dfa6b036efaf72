//! crudwright: CRUD scaffolding for Laravel-style applications
//!
//! Give it a model name plus compact field and relation specs and it writes
//! the whole resource layer of a Laravel project.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use crudwright::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> crudwright::error::Result<()> {
//! let root = Path::new(".");
//! let config = CrudConfig::load(root)?;
//! let request = GenerationRequest::builder("Post")
//!     .fields_spec("title:string:unique,body:text,published:boolean")
//!     .relations_spec("belongsTo:User,hasMany:Comment")
//!     .build(&config)?;
//!
//! let stubs = StubRegistry::with_overrides(root.join(&config.stubs_path));
//! let generator = Generator::new(config, stubs, LocalFilesystem::new(root));
//! let report = generator.generate(&request);
//! for file in report.files() {
//!     println!("{} ({})", file.path.display(), file.outcome);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Field Grammar
//!
//! `name:type[:modifier...]`, comma separated. Enum fields take their values
//! as trailing segments: `status:enum:draft:published`.
//!
//! # Relation Grammar
//!
//! `type:Model[:foreign_key]`, comma separated. A lone model name is a
//! `belongsTo`.

pub mod config;
pub mod error;
pub mod fs;
pub mod observability;
pub mod scaffold;
pub mod stubs;

/// Commonly used types
pub mod prelude {
    pub use crate::config::{CrudConfig, CssFramework};
    pub use crate::error::{CrudError, Result};
    pub use crate::fs::{FileOutcome, Filesystem, LocalFilesystem};
    pub use crate::scaffold::{
        ArtifactKind, BulkDocument, GeneratedFile, GenerationReport, GenerationRequest, Generator,
        KindOutcome,
    };
    pub use crate::stubs::StubRegistry;
}

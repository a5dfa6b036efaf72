//! CRUD scaffold implementation
//!
//! Turns compact field and relation specs (or a bulk document) into a
//! [`GenerationRequest`], then renders and writes the Laravel artifacts for
//! it: migration, model, factory, seeder, form requests, API resource,
//! controller, Blade views and route registration.

pub mod bulk;
pub mod field;
pub mod generator;
pub mod mapping;
pub mod naming;
pub mod relation;
pub mod renderers;
pub mod request;

pub use bulk::BulkDocument;
pub use field::{Field, FieldType, Modifier};
pub use generator::{GeneratedFile, GenerationReport, Generator, KindOutcome};
pub use naming::{NameHelpers, NameSet};
pub use relation::{Relation, RelationKind};
pub use request::{ArtifactKind, GenerationRequest};

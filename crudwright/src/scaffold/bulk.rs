//! Bulk declarative input
//!
//! A YAML document describes several models at once:
//!
//! ```yaml
//! models:
//!   Post:
//!     fields:
//!       title: string:unique
//!       status: enum:draft:published
//!       body:
//!         type: text
//!         modifiers: [nullable]
//!     relations:
//!       - type: belongsTo
//!         model: User
//!       - type: hasMany
//!         model: Comment
//!   Tag:
//!     fields: "name:string:unique"
//! ```
//!
//! Field entries accept the compact form (`string:unique`) or a
//! `{type, modifiers}` record; the whole `fields` value may also be a compact
//! spec string. Relations accept records or a compact spec string.

use super::field::{parse_fields, Field};
use super::relation::{from_records, parse_relations, Relation, RelationRecord};
use super::request::GenerationRequest;
use crate::config::CrudConfig;
use crate::error::{CrudError, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Parsed bulk document
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BulkDocument {
    /// Models in document order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub models: IndexMap<String, Option<ModelEntry>>,
}

/// `models:` with nothing below it reads as no models
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<IndexMap<String, Option<ModelEntry>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// One model of a bulk document
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ModelEntry {
    /// Field declarations
    #[serde(default)]
    pub fields: Option<FieldsInput>,
    /// Relation declarations
    #[serde(default)]
    pub relations: Option<RelationsInput>,
    /// Per-model API-only override
    #[serde(default)]
    pub api: Option<bool>,
}

/// Fields as a compact spec string or a name-keyed mapping
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldsInput {
    /// `title:string,body:text`
    Compact(String),
    /// `title: string` / `title: {type: string, modifiers: [unique]}`
    Map(IndexMap<String, FieldInput>),
}

/// One field of a name-keyed mapping
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldInput {
    /// Type plus modifiers in compact form (`enum:active:inactive`)
    Compact(String),
    /// Structured record
    Record {
        /// Type name; missing means `string`
        #[serde(rename = "type", default)]
        field_type: Option<String>,
        /// Modifiers (enum values for `enum` fields)
        #[serde(default)]
        modifiers: Vec<Scalar>,
    },
}

/// Relations as a compact spec string or a list of records
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RelationsInput {
    /// `belongsTo:User,hasMany:Comment`
    Compact(String),
    /// Structured records
    Records(Vec<RelationRecord>),
}

/// YAML scalar used as a modifier (`nullable`, `default:0`, `0`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Text
    Text(String),
    /// Integer
    Integer(i64),
    /// Float
    Float(f64),
    /// Boolean
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl FieldsInput {
    /// Normalized fields, in declaration order
    #[must_use]
    pub fn to_fields(&self) -> Vec<Field> {
        match self {
            Self::Compact(spec) => parse_fields(spec),
            Self::Map(entries) => entries
                .iter()
                .filter_map(|(name, input)| input.to_field(name))
                .collect(),
        }
    }
}

impl FieldInput {
    fn to_field(&self, name: &str) -> Option<Field> {
        match self {
            Self::Compact(spec) => Field::parse(&format!("{name}:{spec}")),
            Self::Record {
                field_type,
                modifiers,
            } => {
                // Same reading as the compact form so `[default, 0]` pairs up
                let mut spec = format!("{name}:{}", field_type.as_deref().unwrap_or("string"));
                for modifier in modifiers {
                    spec.push(':');
                    spec.push_str(&modifier.to_string());
                }
                Field::parse(&spec)
            }
        }
    }
}

impl RelationsInput {
    /// Normalized relations, in declaration order
    #[must_use]
    pub fn to_relations(&self) -> Vec<Relation> {
        match self {
            Self::Compact(spec) => parse_relations(spec),
            Self::Records(records) => from_records(records),
        }
    }
}

impl BulkDocument {
    /// Load a bulk document from disk
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::BulkNotFound`] when the file does not exist and
    /// [`CrudError::BulkParse`] when it is not a valid document.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CrudError::BulkNotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|e| CrudError::io(path, e))?;
        let document = Self::parse(&text).map_err(|source| CrudError::BulkParse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), models = document.models.len(), "Loaded bulk document");
        Ok(document)
    }

    /// Parse a bulk document from YAML text
    ///
    /// An empty document has no models.
    ///
    /// # Errors
    ///
    /// Returns the YAML error when the text does not match the document shape.
    pub fn parse(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let document: Option<Self> = serde_yaml::from_str(text)?;
        Ok(document.unwrap_or_default())
    }

    /// One generation request per model, in document order
    ///
    /// A model whose name is not a valid class name yields an error entry;
    /// the other models are unaffected.
    #[must_use]
    pub fn requests(&self, config: &CrudConfig, force: bool) -> Vec<Result<GenerationRequest>> {
        self.models
            .iter()
            .map(|(name, entry)| {
                let entry = entry.clone().unwrap_or_default();
                let mut builder = GenerationRequest::builder(name.as_str())
                    .fields(entry.fields.as_ref().map(FieldsInput::to_fields).unwrap_or_default())
                    .relations(
                        entry
                            .relations
                            .as_ref()
                            .map(RelationsInput::to_relations)
                            .unwrap_or_default(),
                    )
                    .force_overwrite(force);
                if let Some(api) = entry.api {
                    builder = builder.api_only(api);
                }
                builder.build(config)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::field::{FieldType, Modifier};
    use crate::scaffold::relation::RelationKind;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::tempdir;

    const DOCUMENT: &str = r"
models:
  Post:
    fields:
      title: string:unique
      status: enum:draft:published
      body:
        type: text
        modifiers: [nullable]
      views:
        type: integer
        modifiers: [default, 0]
    relations:
      - type: belongsTo
        model: User
      - model: Category
        foreign_key: topic_id
      - type: hasMany
        model: Comment
  Tag:
    fields: name:string:unique
  Setting:
";

    #[test]
    fn test_parse_document() {
        let document = BulkDocument::parse(DOCUMENT).unwrap();
        let names: Vec<_> = document.models.keys().map(String::as_str).collect();
        assert_eq!(names, ["Post", "Tag", "Setting"]);

        let requests: Vec<_> = document
            .requests(&CrudConfig::default(), true)
            .into_iter()
            .map(Result::unwrap)
            .collect();
        assert_eq!(requests.len(), 3);

        let post = &requests[0];
        assert!(post.force_overwrite);
        let fields: Vec<_> = post.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(fields, ["title", "status", "body", "views"]);
        assert_eq!(post.fields[0].modifiers, vec![Modifier::Unique]);
        assert_eq!(post.fields[1].enum_values, ["draft", "published"]);
        assert_eq!(post.fields[2].field_type, FieldType::Text);
        assert!(post.fields[2].is_nullable());
        assert_eq!(post.fields[3].modifiers, vec![Modifier::Default("0".to_string())]);

        assert_eq!(post.relations.len(), 3);
        assert_eq!(post.relations[1].kind, RelationKind::BelongsTo);
        assert_eq!(post.relations[1].foreign_key(), "topic_id");
        assert_eq!(post.relations[2].kind, RelationKind::HasMany);

        assert_eq!(requests[1].fields.len(), 1);
        assert!(requests[2].fields.is_empty());
    }

    #[test]
    fn test_record_enum_values() {
        let document = BulkDocument::parse(
            "models:\n  Order:\n    fields:\n      state:\n        type: enum\n        modifiers: [open, closed]\n",
        )
        .unwrap();
        let request = document.requests(&CrudConfig::default(), false).remove(0).unwrap();
        assert_eq!(request.fields[0].enum_values, ["open", "closed"]);
        assert!(request.fields[0].modifiers.is_empty());
    }

    #[test]
    fn test_compact_relations_and_api_flag() {
        let document = BulkDocument::parse(
            "models:\n  Comment:\n    api: true\n    relations: belongsTo:Post,morphTo:Commentable\n",
        )
        .unwrap();
        let request = document.requests(&CrudConfig::default(), false).remove(0).unwrap();
        assert!(request.api_only);
        assert_eq!(request.relations[1].kind, RelationKind::MorphTo);
    }

    #[test]
    fn test_empty_document() {
        assert!(BulkDocument::parse("").unwrap().models.is_empty());
        assert!(BulkDocument::parse("models:\n").unwrap().models.is_empty());
    }

    #[test]
    fn test_invalid_model_name_is_per_entry() {
        let document = BulkDocument::parse("models:\n  '1Bad':\n  Good:\n").unwrap();
        let requests = document.requests(&CrudConfig::default(), false);
        assert!(matches!(requests[0], Err(CrudError::InvalidModelName(_))));
        assert!(requests[1].is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = BulkDocument::load(Path::new("/nonexistent/crud.yaml")).unwrap_err();
        assert!(matches!(err, CrudError::BulkNotFound(path) if path == PathBuf::from("/nonexistent/crud.yaml")));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crud.yaml");
        fs::write(&path, "models: [unclosed").unwrap();

        let err = BulkDocument::load(&path).unwrap_err();
        assert!(matches!(err, CrudError::BulkParse { .. }));
    }
}

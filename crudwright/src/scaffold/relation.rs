//! Relation definitions
//!
//! Relations use the compact grammar `type:Model[:foreign_key]`, comma
//! separated, or structured records from a bulk document.

use super::naming::NameHelpers;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relation kind between the generated model and another model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    /// Inverse one-to-one / one-to-many; owns the foreign key column
    #[default]
    BelongsTo,
    /// One-to-many
    HasMany,
    /// One-to-one
    HasOne,
    /// Many-to-many through a pivot table
    BelongsToMany,
    /// Polymorphic inverse
    MorphTo,
    /// Polymorphic one-to-many
    MorphMany,
}

impl RelationKind {
    /// Parse a relation type word
    ///
    /// Returns `None` for unrecognized words.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "belongsto" => Some(Self::BelongsTo),
            "hasmany" => Some(Self::HasMany),
            "hasone" => Some(Self::HasOne),
            "belongstomany" => Some(Self::BelongsToMany),
            "morphto" => Some(Self::MorphTo),
            "morphmany" => Some(Self::MorphMany),
            _ => None,
        }
    }

    /// Method name used in the model (`belongsTo`, `hasMany`, ...)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BelongsTo => "belongsTo",
            Self::HasMany => "hasMany",
            Self::HasOne => "hasOne",
            Self::BelongsToMany => "belongsToMany",
            Self::MorphTo => "morphTo",
            Self::MorphMany => "morphMany",
        }
    }

    /// Whether the relation yields a collection
    #[must_use]
    pub const fn is_to_many(self) -> bool {
        matches!(self, Self::HasMany | Self::BelongsToMany | Self::MorphMany)
    }

    /// Whether the relation accepts an explicit foreign key argument
    #[must_use]
    pub const fn takes_foreign_key(self) -> bool {
        matches!(self, Self::BelongsTo | Self::HasMany | Self::HasOne)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed reference from the generated model to another model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    /// Relation kind
    pub kind: RelationKind,
    /// Related model, any casing
    pub target_model: String,
    /// Explicit foreign key; never `Some("")`
    pub foreign_key: Option<String>,
}

/// Relation as written in a bulk document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRecord {
    /// Relation type word; missing means `belongsTo`
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Related model name
    #[serde(default)]
    pub model: String,
    /// Optional foreign key override
    #[serde(default)]
    pub foreign_key: Option<String>,
}

impl Relation {
    /// Create a relation, normalizing an empty foreign key to `None`
    #[must_use]
    pub fn new(kind: RelationKind, target_model: impl Into<String>, foreign_key: Option<String>) -> Self {
        Self {
            kind,
            target_model: target_model.into(),
            foreign_key: foreign_key
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
        }
    }

    /// Parse one compact `type:Model[:foreign_key]` segment
    ///
    /// A lone segment is taken as the related model of a `belongsTo`.
    /// Returns `None` when no model name is present.
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudwright::scaffold::relation::{Relation, RelationKind};
    /// let relation = Relation::parse("belongsTo:User:author_id").unwrap();
    /// assert_eq!(relation.kind, RelationKind::BelongsTo);
    /// assert_eq!(relation.foreign_key(), "author_id");
    ///
    /// let relation = Relation::parse("hasMany:Comment").unwrap();
    /// assert_eq!(relation.foreign_key, None);
    /// ```
    #[must_use]
    pub fn parse(segment: &str) -> Option<Self> {
        let parts: Vec<&str> = segment.trim().split(':').map(str::trim).collect();
        let (kind, model, foreign_key) = match parts.as_slice() {
            [model] => (None, *model, None),
            [kind, model] => (Some(*kind), *model, None),
            [kind, model, key, ..] => (Some(*kind), *model, Some(*key)),
            [] => return None,
        };
        Self::from_parts(kind, model, foreign_key.map(ToString::to_string))
    }

    /// Build a relation from a bulk document record
    #[must_use]
    pub fn from_record(record: &RelationRecord) -> Option<Self> {
        Self::from_parts(
            record.kind.as_deref(),
            &record.model,
            record.foreign_key.clone(),
        )
    }

    fn from_parts(kind: Option<&str>, model: &str, foreign_key: Option<String>) -> Option<Self> {
        let model = model.trim();
        if model.is_empty() {
            tracing::debug!("Skipping relation without a related model");
            return None;
        }

        let kind = match kind.map(str::trim).filter(|k| !k.is_empty()) {
            None => RelationKind::BelongsTo,
            Some(word) => RelationKind::parse(word).unwrap_or_else(|| {
                tracing::warn!(relation = word, model, "Unknown relation type, using belongsTo");
                RelationKind::BelongsTo
            }),
        };

        Some(Self::new(kind, model, foreign_key))
    }

    /// Foreign key column: the explicit key, or `snake(target_model) + "_id"`
    #[must_use]
    pub fn foreign_key(&self) -> String {
        self.foreign_key
            .clone()
            .unwrap_or_else(|| NameHelpers::foreign_key_for(&self.target_model))
    }

    /// Related model class name
    #[must_use]
    pub fn model_class(&self) -> String {
        NameHelpers::pascal(&self.target_model)
    }

    /// Accessor method name on the generated model
    #[must_use]
    pub fn method_name(&self) -> String {
        NameHelpers::relation_method_name(self.kind, &self.target_model)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.target_model)?;
        if let Some(key) = &self.foreign_key {
            write!(f, ":{key}")?;
        }
        Ok(())
    }
}

/// Parse a comma-separated relation spec, preserving order
#[must_use]
pub fn parse_relations(spec: &str) -> Vec<Relation> {
    spec.split(',')
        .filter(|segment| !segment.trim().is_empty())
        .filter_map(Relation::parse)
        .collect()
}

/// Normalize structured relation records, preserving order
#[must_use]
pub fn from_records(records: &[RelationRecord]) -> Vec<Relation> {
    records.iter().filter_map(Relation::from_record).collect()
}

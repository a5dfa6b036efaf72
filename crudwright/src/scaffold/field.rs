//! Field definitions and the compact field grammar
//!
//! Fields are written as a comma-separated list of colon-separated segments:
//!
//! ```text
//! title:string:unique,body:text:nullable,status:enum:draft:published
//! ```
//!
//! # Supported Field Types
//!
//! `string`, `text`, `integer`, `bigInteger`, `float`, `decimal`, `boolean`,
//! `date`, `datetime`, `timestamp`, `time`, `json`, `enum`, `foreignId`,
//! `unsignedBigInteger`. Any other type name is kept verbatim and handled like
//! `string` by the type mapping tables.
//!
//! # Modifiers
//!
//! - `nullable` (alias `optional`)
//! - `unique`
//! - `index` (alias `indexed`)
//! - `unsigned`
//! - `default:<value>` (or `default=<value>`)
//!
//! # Leniency
//!
//! The parser is purely syntactic. A segment without a type (`title`) is
//! dropped without an error, and unknown types or modifiers are preserved
//! rather than rejected.

use std::fmt;

/// Values used for an enum field declared without any values
pub const FALLBACK_ENUM_VALUES: [&str; 3] = ["pending", "active", "inactive"];

/// One attribute of a generated entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Column / attribute name (e.g. `title`, `published_at`)
    pub name: String,
    /// Abstract field type
    pub field_type: FieldType,
    /// Column modifiers, in declaration order without duplicates
    pub modifiers: Vec<Modifier>,
    /// Allowed values for `enum` fields
    pub enum_values: Vec<String>,
}

/// Abstract field type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Short string (VARCHAR 255)
    String,
    /// Long text
    Text,
    /// 32-bit integer
    Integer,
    /// 64-bit integer
    BigInteger,
    /// Floating point number
    Float,
    /// Fixed precision decimal
    Decimal,
    /// Boolean flag
    Boolean,
    /// Calendar date
    Date,
    /// Date and time
    DateTime,
    /// Timestamp
    Timestamp,
    /// Time of day
    Time,
    /// JSON document
    Json,
    /// Enumeration of string values
    Enum,
    /// Foreign key id column
    ForeignId,
    /// Unsigned 64-bit integer
    UnsignedBigInteger,
    /// Type name the parser did not recognize, kept verbatim
    Unknown(String),
}

/// Column modifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Column accepts NULL
    Nullable,
    /// Unique constraint
    Unique,
    /// Plain index
    Index,
    /// Unsigned numeric column
    Unsigned,
    /// Default value literal
    Default(String),
    /// Modifier word the parser did not recognize, kept verbatim
    Other(String),
}

impl FieldType {
    /// Parse a type name
    ///
    /// Matching is case-insensitive and accepts a few common aliases. Unknown
    /// names never fail; they become [`FieldType::Unknown`].
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.to_lowercase().as_str() {
            "string" => Self::String,
            "text" => Self::Text,
            "integer" | "int" => Self::Integer,
            "biginteger" | "bigint" => Self::BigInteger,
            "float" | "double" => Self::Float,
            "decimal" => Self::Decimal,
            "boolean" | "bool" => Self::Boolean,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "timestamp" => Self::Timestamp,
            "time" => Self::Time,
            "json" | "jsonb" => Self::Json,
            "enum" => Self::Enum,
            "foreignid" => Self::ForeignId,
            "unsignedbiginteger" => Self::UnsignedBigInteger,
            _ => Self::Unknown(trimmed.to_string()),
        }
    }

    /// Canonical type name as written in field specs
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::BigInteger => "bigInteger",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Timestamp => "timestamp",
            Self::Time => "time",
            Self::Json => "json",
            Self::Enum => "enum",
            Self::ForeignId => "foreignId",
            Self::UnsignedBigInteger => "unsignedBigInteger",
            Self::Unknown(name) => name,
        }
    }

    /// Whether this is one of the free-text types a listing can search
    #[must_use]
    pub const fn is_searchable(&self) -> bool {
        matches!(self, Self::String | Self::Text | Self::Enum)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Modifier {
    /// Parse a single modifier word
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if let Some(value) = trimmed
            .strip_prefix("default:")
            .or_else(|| trimmed.strip_prefix("default="))
        {
            return Self::Default(value.to_string());
        }
        match trimmed.to_lowercase().as_str() {
            "nullable" | "optional" => Self::Nullable,
            "unique" => Self::Unique,
            "index" | "indexed" => Self::Index,
            "unsigned" => Self::Unsigned,
            _ => Self::Other(trimmed.to_string()),
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nullable => f.write_str("nullable"),
            Self::Unique => f.write_str("unique"),
            Self::Index => f.write_str("index"),
            Self::Unsigned => f.write_str("unsigned"),
            Self::Default(value) => write!(f, "default:{value}"),
            Self::Other(word) => f.write_str(word),
        }
    }
}

impl Field {
    /// Create a field with no modifiers
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            modifiers: Vec::new(),
            enum_values: Vec::new(),
        }
    }

    /// Add a modifier, ignoring duplicates
    #[must_use]
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        if !self.modifiers.contains(&modifier) {
            self.modifiers.push(modifier);
        }
        self
    }

    /// Set the enum values
    #[must_use]
    pub fn with_enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Parse one `name:type[:modifier]*` segment
    ///
    /// Returns `None` when the segment has no type part or an empty name.
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudwright::scaffold::field::{Field, FieldType, Modifier};
    /// let field = Field::parse("email:string:unique:nullable").unwrap();
    /// assert_eq!(field.name, "email");
    /// assert_eq!(field.field_type, FieldType::String);
    /// assert_eq!(field.modifiers, vec![Modifier::Unique, Modifier::Nullable]);
    ///
    /// assert!(Field::parse("title").is_none());
    /// ```
    #[must_use]
    pub fn parse(segment: &str) -> Option<Self> {
        let parts: Vec<&str> = segment.trim().split(':').collect();
        if parts.len() < 2 {
            return None;
        }

        let name = parts[0].trim();
        if name.is_empty() {
            return None;
        }

        let field_type = FieldType::parse(parts[1]);
        let rest = &parts[2..];

        // Enum values take every trailing part; nothing is left for modifiers.
        if field_type == FieldType::Enum {
            let values = rest
                .iter()
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string);
            return Some(Self::new(name, field_type).with_enum_values(values));
        }

        Some(Self::from_record(name, field_type, Self::join_default_values(rest)))
    }

    /// Build a field from a structured record (bulk input)
    ///
    /// Reads entries the same way [`Field::parse`] reads trailing segments:
    /// for `enum` every entry is an enum value (so `[nullable, open]` gives
    /// the values `nullable` and `open` and no modifiers); for other types
    /// every entry is a modifier.
    #[must_use]
    pub fn from_record<I, S>(name: &str, field_type: FieldType, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut field = Self::new(name.trim(), field_type);
        for raw in modifiers {
            let raw = raw.as_ref().trim();
            if raw.is_empty() {
                continue;
            }
            if field.field_type == FieldType::Enum {
                field.enum_values.push(raw.to_string());
            } else {
                field = field.with_modifier(Modifier::parse(raw));
            }
        }
        field
    }

    /// Rejoin `default` with the part that follows it (`default`, `0` -> `default:0`)
    fn join_default_values(parts: &[&str]) -> Vec<String> {
        let mut joined = Vec::with_capacity(parts.len());
        let mut iter = parts.iter().map(|p| p.trim());
        while let Some(part) = iter.next() {
            if part.eq_ignore_ascii_case("default") {
                if let Some(value) = iter.next() {
                    joined.push(format!("default:{value}"));
                }
                continue;
            }
            joined.push(part.to_string());
        }
        joined
    }

    /// Whether the field carries a modifier
    #[must_use]
    pub fn has_modifier(&self, modifier: &Modifier) -> bool {
        self.modifiers.contains(modifier)
    }

    /// Whether the column accepts NULL
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.has_modifier(&Modifier::Nullable)
    }

    /// Whether the column is unique
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.has_modifier(&Modifier::Unique)
    }

    /// Enum values, or the fallback list when none were declared
    #[must_use]
    pub fn effective_enum_values(&self) -> Vec<String> {
        if self.enum_values.is_empty() {
            FALLBACK_ENUM_VALUES.iter().map(ToString::to_string).collect()
        } else {
            self.enum_values.clone()
        }
    }

    /// Whether the field name contains a keyword
    #[must_use]
    pub fn name_contains(&self, keyword: &str) -> bool {
        self.name.contains(keyword)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.field_type)?;
        if self.field_type == FieldType::Enum {
            for value in &self.enum_values {
                write!(f, ":{value}")?;
            }
            return Ok(());
        }
        for modifier in &self.modifiers {
            write!(f, ":{modifier}")?;
        }
        Ok(())
    }
}

/// Parse a comma-separated field spec
///
/// Segments that lack a type are skipped silently.
///
/// # Examples
///
/// ```
/// # use crudwright::scaffold::field::parse_fields;
/// let fields = parse_fields("title:string, body:text, broken");
/// assert_eq!(fields.len(), 2);
/// assert_eq!(fields[1].name, "body");
/// ```
///
/// Field names are unique: a repeated name keeps its first declaration.
#[must_use]
pub fn parse_fields(spec: &str) -> Vec<Field> {
    unique_fields(spec.split(',').filter_map(Field::parse))
}

/// Drop fields whose name was already declared, keeping the first
#[must_use]
pub fn unique_fields<I>(fields: I) -> Vec<Field>
where
    I: IntoIterator<Item = Field>,
{
    let mut unique: Vec<Field> = Vec::new();
    for field in fields {
        if unique.iter().any(|seen| seen.name == field.name) {
            tracing::debug!(field = %field.name, "Skipping repeated field name");
            continue;
        }
        unique.push(field);
    }
    unique
}

/// Serialize fields back into the compact grammar
#[must_use]
pub fn to_spec(fields: &[Field]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_simple_string() {
        let fields = parse_fields("title:string");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "title");
        assert_eq!(fields[0].field_type, FieldType::String);
        assert!(fields[0].modifiers.is_empty());
        assert!(fields[0].enum_values.is_empty());
    }

    #[test]
    fn test_parse_multiple_fields() {
        let fields = parse_fields("title:string,body:text,views:integer");
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["title", "body", "views"]);
    }

    #[test]
    fn test_parse_trims_segments() {
        let fields = parse_fields("  title:string ,\n body:text  ");
        assert_eq!(fields[0].name, "title");
        assert_eq!(fields[1].name, "body");
        assert_eq!(fields[1].field_type, FieldType::Text);
    }

    #[test]
    fn test_parse_modifiers_in_order() {
        let field = Field::parse("email:string:unique:nullable").unwrap();
        assert_eq!(field.modifiers, vec![Modifier::Unique, Modifier::Nullable]);
    }

    #[test]
    fn test_duplicate_modifiers_collapse() {
        let field = Field::parse("slug:string:unique:index:unique").unwrap();
        assert_eq!(field.modifiers, vec![Modifier::Unique, Modifier::Index]);
    }

    #[test]
    fn test_modifier_aliases() {
        let field = Field::parse("age:integer:optional:indexed").unwrap();
        assert_eq!(field.modifiers, vec![Modifier::Nullable, Modifier::Index]);
    }

    #[test]
    fn test_default_modifier_takes_next_part() {
        let field = Field::parse("status:string:default:draft:nullable").unwrap();
        assert_eq!(
            field.modifiers,
            vec![Modifier::Default("draft".to_string()), Modifier::Nullable]
        );

        let field = Field::parse("views:integer:default=0").unwrap();
        assert_eq!(field.modifiers, vec![Modifier::Default("0".to_string())]);
    }

    #[test]
    fn test_parse_enum_values() {
        let field = Field::parse("status:enum:draft:published:archived").unwrap();
        assert_eq!(field.field_type, FieldType::Enum);
        assert_eq!(field.enum_values, ["draft", "published", "archived"]);
        assert!(field.modifiers.is_empty());
    }

    #[test]
    fn test_enum_without_values_falls_back() {
        let field = Field::parse("status:enum").unwrap();
        assert!(field.enum_values.is_empty());
        assert_eq!(field.effective_enum_values(), ["pending", "active", "inactive"]);
    }

    #[test]
    fn test_segments_without_type_are_skipped() {
        let fields = parse_fields("title,body:text,,:string");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "body");
    }

    #[test]
    fn test_repeated_field_name_keeps_first() {
        let fields = parse_fields("title:string,body:text,title:text:nullable");
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["title", "body"]);
        assert_eq!(fields[0].field_type, FieldType::String);
        assert!(fields[0].modifiers.is_empty());
    }

    #[test]
    fn test_unknown_type_is_preserved() {
        let field = Field::parse("location:point").unwrap();
        assert_eq!(field.field_type, FieldType::Unknown("point".to_string()));
        assert_eq!(field.to_string(), "location:point");
    }

    #[test]
    fn test_type_names_are_case_insensitive() {
        assert_eq!(FieldType::parse("bigInteger"), FieldType::BigInteger);
        assert_eq!(FieldType::parse("BIGINTEGER"), FieldType::BigInteger);
        assert_eq!(FieldType::parse("foreignId"), FieldType::ForeignId);
        assert_eq!(FieldType::parse("unsignedBigInteger"), FieldType::UnsignedBigInteger);
    }

    #[test]
    fn test_from_record_enum_values() {
        let field = Field::from_record("status", FieldType::Enum, ["draft", "published"]);
        assert_eq!(field.enum_values, ["draft", "published"]);
        assert!(field.modifiers.is_empty());

        // Same reading as the compact form: every enum entry is a value
        let field = Field::from_record("state", FieldType::Enum, ["nullable", "open"]);
        assert_eq!(field.enum_values, ["nullable", "open"]);
        assert!(field.modifiers.is_empty());
        assert_eq!(
            Some(field),
            Field::parse("state:enum:nullable:open")
        );

        let field = Field::from_record("bio", FieldType::Text, ["nullable", "default:none"]);
        assert_eq!(
            field.modifiers,
            vec![Modifier::Nullable, Modifier::Default("none".to_string())]
        );
    }

    #[test]
    fn test_display() {
        let field = Field::parse("price:decimal:nullable:default:0").unwrap();
        assert_eq!(field.to_string(), "price:decimal:nullable:default:0");

        let field = Field::parse("status:enum:a:b").unwrap();
        assert_eq!(field.to_string(), "status:enum:a:b");
    }

    fn arb_name() -> impl Strategy<Value = String> {
        "[a-z][a-z_]{0,12}"
    }

    fn arb_type() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("string".to_string()),
            Just("text".to_string()),
            Just("integer".to_string()),
            Just("bigInteger".to_string()),
            Just("decimal".to_string()),
            Just("boolean".to_string()),
            Just("datetime".to_string()),
            Just("json".to_string()),
            "[a-z]{3,8}",
        ]
    }

    fn arb_modifier() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("nullable".to_string()),
            Just("unique".to_string()),
            Just("index".to_string()),
            Just("unsigned".to_string()),
        ]
    }

    proptest! {
        #[test]
        fn parse_yields_one_field(
            name in arb_name(),
            ty in arb_type(),
            mods in prop::collection::vec(arb_modifier(), 0..5),
        ) {
            let mut spec = format!("{name}:{ty}");
            for m in &mods {
                spec.push(':');
                spec.push_str(m);
            }
            let fields = parse_fields(&spec);
            prop_assert_eq!(fields.len(), 1);
            prop_assert_eq!(&fields[0].name, &name);
            prop_assert_eq!(fields[0].field_type.clone(), FieldType::parse(&ty));

            if fields[0].field_type == FieldType::Enum {
                prop_assert!(fields[0].modifiers.is_empty());
                prop_assert_eq!(&fields[0].enum_values, &mods);
            } else {
                let mut expected: Vec<Modifier> = Vec::new();
                for m in &mods {
                    let parsed = Modifier::parse(m);
                    if !expected.contains(&parsed) {
                        expected.push(parsed);
                    }
                }
                prop_assert_eq!(&fields[0].modifiers, &expected);
            }
        }

        #[test]
        fn reparse_is_stable(
            specs in prop::collection::vec(
                (arb_name(), arb_type(), prop::collection::vec(arb_modifier(), 0..4)),
                1..6,
            ),
        ) {
            let spec = specs
                .iter()
                .map(|(n, t, m)| {
                    let mut s = format!("{n}:{t}");
                    for modifier in m {
                        s.push(':');
                        s.push_str(modifier);
                    }
                    s
                })
                .collect::<Vec<_>>()
                .join(",");
            let first = parse_fields(&spec);
            let second = parse_fields(&to_spec(&first));
            prop_assert_eq!(first, second);
        }
    }
}

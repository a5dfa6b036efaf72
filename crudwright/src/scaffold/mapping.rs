//! Type mapping tables
//!
//! Pure lookups from a [`Field`] to the storage column, synthetic value
//! strategy, validation rules, UI input widget and model cast used by the
//! renderers. Every table is total: unknown types take the `string` branch.

use super::field::{Field, FieldType, Modifier};
use super::relation::{Relation, RelationKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Decimal columns are always `(10, 2)`
pub const DECIMAL_PRECISION: (u8, u8) = (10, 2);

/// Maximum length validated for `string` fields
pub const STRING_MAX_LENGTH: u32 = 255;

// ---------------------------------------------------------------------------
// Storage column
// ---------------------------------------------------------------------------

/// Chained column operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnModifier {
    /// `->nullable()`
    Nullable,
    /// `->unique()`
    Unique,
    /// `->index()`
    Index,
    /// `->unsigned()`
    Unsigned,
    /// `->default('value')`
    Default(String),
}

impl fmt::Display for ColumnModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nullable => f.write_str("->nullable()"),
            Self::Unique => f.write_str("->unique()"),
            Self::Index => f.write_str("->index()"),
            Self::Unsigned => f.write_str("->unsigned()"),
            Self::Default(value) => write!(f, "->default('{value}')"),
        }
    }
}

/// Schema column descriptor for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Blueprint method (`string`, `dateTime`, `enum`, ...)
    pub kind: &'static str,
    /// Column name
    pub name: String,
    /// Precision and scale, decimal only
    pub precision: Option<(u8, u8)>,
    /// Allowed values, enum only
    pub enum_values: Vec<String>,
    /// Chained modifiers in declaration order
    pub modifiers: Vec<ColumnModifier>,
}

impl fmt::Display for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$table->{}('{}'", self.kind, self.name)?;
        if let Some((precision, scale)) = self.precision {
            write!(f, ", {precision}, {scale}")?;
        }
        if self.kind == "enum" {
            write!(f, ", [{}]", quoted_list(&self.enum_values))?;
        }
        f.write_str(")")?;
        for modifier in &self.modifiers {
            write!(f, "{modifier}")?;
        }
        f.write_str(";")
    }
}

/// Map a field to its schema column
///
/// Unrecognized modifiers are dropped.
///
/// # Examples
///
/// ```
/// # use crudwright::scaffold::field::Field;
/// # use crudwright::scaffold::mapping::storage_column;
/// let field = Field::parse("price:decimal:nullable").unwrap();
/// assert_eq!(
///     storage_column(&field).to_string(),
///     "$table->decimal('price', 10, 2)->nullable();"
/// );
/// ```
#[must_use]
pub fn storage_column(field: &Field) -> ColumnSpec {
    let kind = match field.field_type {
        FieldType::Text => "text",
        FieldType::Integer => "integer",
        FieldType::BigInteger => "bigInteger",
        FieldType::UnsignedBigInteger => "unsignedBigInteger",
        FieldType::Float => "float",
        FieldType::Decimal => "decimal",
        FieldType::Boolean => "boolean",
        FieldType::Date => "date",
        FieldType::DateTime => "dateTime",
        FieldType::Timestamp => "timestamp",
        FieldType::Time => "time",
        FieldType::Json => "json",
        FieldType::Enum => "enum",
        FieldType::ForeignId => "foreignId",
        FieldType::String | FieldType::Unknown(_) => "string",
    };

    let modifiers = field
        .modifiers
        .iter()
        .filter_map(|modifier| match modifier {
            Modifier::Nullable => Some(ColumnModifier::Nullable),
            Modifier::Unique => Some(ColumnModifier::Unique),
            Modifier::Index => Some(ColumnModifier::Index),
            Modifier::Unsigned => Some(ColumnModifier::Unsigned),
            Modifier::Default(value) => Some(ColumnModifier::Default(value.clone())),
            Modifier::Other(_) => None,
        })
        .collect();

    ColumnSpec {
        kind,
        name: field.name.clone(),
        precision: (field.field_type == FieldType::Decimal).then_some(DECIMAL_PRECISION),
        enum_values: if field.field_type == FieldType::Enum {
            field.effective_enum_values()
        } else {
            Vec::new()
        },
        modifiers,
    }
}

// ---------------------------------------------------------------------------
// Synthetic values
// ---------------------------------------------------------------------------

/// Strategy a factory uses to produce a value for a field
#[derive(Debug, Clone, PartialEq)]
pub enum SyntheticStrategy {
    /// Unique safe email address
    SafeEmail,
    /// Full person name
    FullName,
    /// Given name
    FirstName,
    /// Family name
    LastName,
    /// Phone number
    PhoneNumber,
    /// Street address
    Address,
    /// City name
    City,
    /// Country name
    Country,
    /// Postal code
    Postcode,
    /// URL
    Url,
    /// Image URL
    ImageUrl,
    /// Sentence of the given word count
    Sentence(u8),
    /// URL slug
    Slug,
    /// Single paragraph
    Paragraph,
    /// Several paragraphs joined as text
    Paragraphs(u8),
    /// Integer in an inclusive range
    IntegerBetween(i64, i64),
    /// Decimal in a range with fixed precision
    DecimalBetween {
        /// Decimal places
        places: u8,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },
    /// Random boolean
    Boolean,
    /// Calendar date
    Date,
    /// Date and time
    DateTime,
    /// Time of day
    Time,
    /// JSON object with one word-valued key
    JsonObject,
    /// Uniform choice among the values
    Choice(Vec<String>),
    /// Hex color
    HexColor,
    /// UUID
    Uuid,
    /// IPv4 address
    Ipv4,
    /// Generic short phrase
    ShortPhrase,
}

impl SyntheticStrategy {
    /// Factory expression producing the value
    #[must_use]
    pub fn expression(&self) -> String {
        match self {
            Self::SafeEmail => "fake()->unique()->safeEmail()".to_string(),
            Self::FullName => "fake()->name()".to_string(),
            Self::FirstName => "fake()->firstName()".to_string(),
            Self::LastName => "fake()->lastName()".to_string(),
            Self::PhoneNumber => "fake()->phoneNumber()".to_string(),
            Self::Address => "fake()->address()".to_string(),
            Self::City => "fake()->city()".to_string(),
            Self::Country => "fake()->country()".to_string(),
            Self::Postcode => "fake()->postcode()".to_string(),
            Self::Url => "fake()->url()".to_string(),
            Self::ImageUrl => "fake()->imageUrl()".to_string(),
            Self::Sentence(words) => format!("fake()->sentence({words})"),
            Self::Slug => "fake()->slug()".to_string(),
            Self::Paragraph => "fake()->paragraph()".to_string(),
            Self::Paragraphs(count) => format!("fake()->paragraphs({count}, true)"),
            Self::IntegerBetween(min, max) => format!("fake()->numberBetween({min}, {max})"),
            Self::DecimalBetween { places, min, max } => {
                format!("fake()->randomFloat({places}, {min}, {max})")
            }
            Self::Boolean => "fake()->boolean()".to_string(),
            Self::Date => "fake()->date()".to_string(),
            Self::DateTime => "fake()->dateTime()".to_string(),
            Self::Time => "fake()->time()".to_string(),
            Self::JsonObject => "json_encode(['key' => fake()->word()])".to_string(),
            Self::Choice(values) => format!("fake()->randomElement([{}])", quoted_list(values)),
            Self::HexColor => "fake()->hexColor()".to_string(),
            Self::Uuid => "fake()->uuid()".to_string(),
            Self::Ipv4 => "fake()->ipv4()".to_string(),
            Self::ShortPhrase => "fake()->sentence()".to_string(),
        }
    }
}

/// Keyword groups, checked in this order against the field name
const NAME_KEYWORDS: [&[&str]; 19] = [
    &["email"],
    &["name"],
    &["first_name"],
    &["last_name"],
    &["phone"],
    &["address"],
    &["city"],
    &["country"],
    &["zip", "postal"],
    &["url", "website"],
    &["image", "avatar"],
    &["title"],
    &["slug"],
    &["description", "summary"],
    &["price", "amount", "cost"],
    &["quantity", "stock"],
    &["color"],
    &["uuid"],
    &["ip"],
];

fn keyword_strategy(group: usize) -> SyntheticStrategy {
    match group {
        0 => SyntheticStrategy::SafeEmail,
        1 => SyntheticStrategy::FullName,
        2 => SyntheticStrategy::FirstName,
        3 => SyntheticStrategy::LastName,
        4 => SyntheticStrategy::PhoneNumber,
        5 => SyntheticStrategy::Address,
        6 => SyntheticStrategy::City,
        7 => SyntheticStrategy::Country,
        8 => SyntheticStrategy::Postcode,
        9 => SyntheticStrategy::Url,
        10 => SyntheticStrategy::ImageUrl,
        11 => SyntheticStrategy::Sentence(4),
        12 => SyntheticStrategy::Slug,
        13 => SyntheticStrategy::Paragraph,
        14 => SyntheticStrategy::DecimalBetween {
            places: 2,
            min: 10.0,
            max: 1000.0,
        },
        15 => SyntheticStrategy::IntegerBetween(0, 100),
        16 => SyntheticStrategy::HexColor,
        17 => SyntheticStrategy::Uuid,
        _ => SyntheticStrategy::Ipv4,
    }
}

/// Choose the synthetic value strategy for a field
///
/// Name keywords are matched first, by substring and in a fixed order, so
/// `first_name` resolves to a full name because `name` is checked earlier.
/// The field type decides when no keyword matches.
///
/// # Examples
///
/// ```
/// # use crudwright::scaffold::field::Field;
/// # use crudwright::scaffold::mapping::{synthetic_strategy, SyntheticStrategy};
/// let field = Field::parse("contact_email:string").unwrap();
/// assert_eq!(synthetic_strategy(&field), SyntheticStrategy::SafeEmail);
///
/// let field = Field::parse("views:integer").unwrap();
/// assert_eq!(synthetic_strategy(&field), SyntheticStrategy::IntegerBetween(1, 100));
/// ```
#[must_use]
pub fn synthetic_strategy(field: &Field) -> SyntheticStrategy {
    if let Some(group) = NAME_KEYWORDS
        .iter()
        .position(|keywords| keywords.iter().any(|keyword| field.name_contains(keyword)))
    {
        return keyword_strategy(group);
    }

    match field.field_type {
        FieldType::Text => SyntheticStrategy::Paragraphs(3),
        FieldType::Integer => SyntheticStrategy::IntegerBetween(1, 100),
        FieldType::BigInteger => SyntheticStrategy::IntegerBetween(1, 1_000_000),
        FieldType::Float | FieldType::Decimal => SyntheticStrategy::DecimalBetween {
            places: 2,
            min: 0.0,
            max: 1000.0,
        },
        FieldType::Boolean => SyntheticStrategy::Boolean,
        FieldType::Date => SyntheticStrategy::Date,
        FieldType::DateTime | FieldType::Timestamp => SyntheticStrategy::DateTime,
        FieldType::Time => SyntheticStrategy::Time,
        FieldType::Json => SyntheticStrategy::JsonObject,
        FieldType::Enum => SyntheticStrategy::Choice(field.effective_enum_values()),
        _ => SyntheticStrategy::ShortPhrase,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// One validation rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationRule {
    /// Value may be null
    Nullable,
    /// Validated only when present (updates)
    Sometimes,
    /// Value must be present
    Required,
    /// String value
    String,
    /// Maximum length
    Max(u32),
    /// Integer value
    Integer,
    /// Numeric value
    Numeric,
    /// Boolean value
    Boolean,
    /// Parseable date
    Date,
    /// Date in the given format
    DateFormat(&'static str),
    /// JSON string
    Json,
    /// Membership in a value list
    In(Vec<String>),
    /// Unique in the model's table, supplied when rendering
    Unique,
    /// Email address
    Email,
    /// URL
    Url,
}

impl ValidationRule {
    /// Render the rule with the table a `unique` rule is scoped to
    #[must_use]
    pub fn render(&self, table: &str) -> String {
        match self {
            Self::Unique => format!("unique:{table}"),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nullable => f.write_str("nullable"),
            Self::Sometimes => f.write_str("sometimes"),
            Self::Required => f.write_str("required"),
            Self::String => f.write_str("string"),
            Self::Max(length) => write!(f, "max:{length}"),
            Self::Integer => f.write_str("integer"),
            Self::Numeric => f.write_str("numeric"),
            Self::Boolean => f.write_str("boolean"),
            Self::Date => f.write_str("date"),
            Self::DateFormat(format) => write!(f, "date_format:{format}"),
            Self::Json => f.write_str("json"),
            Self::In(values) => write!(f, "in:{}", values.join(",")),
            Self::Unique => f.write_str("unique"),
            Self::Email => f.write_str("email"),
            Self::Url => f.write_str("url"),
        }
    }
}

/// Ordered validation rules for a field
///
/// Presence rule first, then the type rules, then `unique`, `email` and `url`.
///
/// # Examples
///
/// ```
/// # use crudwright::scaffold::field::Field;
/// # use crudwright::scaffold::mapping::{validation_rules, ValidationRule};
/// let bio = Field::parse("bio:text:nullable").unwrap();
/// assert_eq!(
///     validation_rules(&bio, false),
///     vec![ValidationRule::Nullable, ValidationRule::String]
/// );
/// ```
#[must_use]
pub fn validation_rules(field: &Field, is_update: bool) -> Vec<ValidationRule> {
    let mut rules = Vec::with_capacity(4);

    rules.push(if field.is_nullable() {
        ValidationRule::Nullable
    } else if is_update {
        ValidationRule::Sometimes
    } else {
        ValidationRule::Required
    });

    match field.field_type {
        FieldType::Text => rules.push(ValidationRule::String),
        FieldType::Integer
        | FieldType::BigInteger
        | FieldType::ForeignId
        | FieldType::UnsignedBigInteger => rules.push(ValidationRule::Integer),
        FieldType::Float | FieldType::Decimal => rules.push(ValidationRule::Numeric),
        FieldType::Boolean => rules.push(ValidationRule::Boolean),
        FieldType::Date | FieldType::DateTime | FieldType::Timestamp => {
            rules.push(ValidationRule::Date);
        }
        FieldType::Time => rules.push(ValidationRule::DateFormat("H:i:s")),
        FieldType::Json => rules.push(ValidationRule::Json),
        FieldType::Enum => rules.push(ValidationRule::In(field.effective_enum_values())),
        FieldType::String | FieldType::Unknown(_) => {
            rules.push(ValidationRule::String);
            rules.push(ValidationRule::Max(STRING_MAX_LENGTH));
        }
    }

    if field.is_unique() {
        rules.push(ValidationRule::Unique);
    }
    if field.name_contains("email") {
        rules.push(ValidationRule::Email);
    }
    if field.name_contains("url") || field.name_contains("website") {
        rules.push(ValidationRule::Url);
    }

    rules
}

/// Join rendered rules into a pipe-separated rule string
#[must_use]
pub fn rule_string(rules: &[ValidationRule], table: &str) -> String {
    rules
        .iter()
        .map(|rule| rule.render(table))
        .collect::<Vec<_>>()
        .join("|")
}

// ---------------------------------------------------------------------------
// UI input kind
// ---------------------------------------------------------------------------

/// Form widget used for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputKind {
    /// Single-line text
    Text,
    /// Email input
    Email,
    /// Password input
    Password,
    /// URL input
    Url,
    /// Telephone input
    Tel,
    /// Color picker
    Color,
    /// Multi-line text
    Textarea,
    /// Boolean toggle
    Checkbox,
    /// Numeric input
    Number,
    /// Date picker
    Date,
    /// Date and time picker
    DatetimeLocal,
    /// Time picker
    Time,
    /// Choice among values
    Select,
}

impl InputKind {
    /// HTML input type (or element name for textarea/select/checkbox)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Url => "url",
            Self::Tel => "tel",
            Self::Color => "color",
            Self::Textarea => "textarea",
            Self::Checkbox => "checkbox",
            Self::Number => "number",
            Self::Date => "date",
            Self::DatetimeLocal => "datetime-local",
            Self::Time => "time",
            Self::Select => "select",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn input_kind_by_name(field: &Field) -> Option<InputKind> {
    if field.name_contains("email") {
        Some(InputKind::Email)
    } else if field.name_contains("password") {
        Some(InputKind::Password)
    } else if field.name_contains("url") || field.name_contains("website") {
        Some(InputKind::Url)
    } else if field.name_contains("phone") {
        Some(InputKind::Tel)
    } else if field.name_contains("color") {
        Some(InputKind::Color)
    } else {
        None
    }
}

fn input_kind_by_type(field_type: &FieldType) -> InputKind {
    match field_type {
        FieldType::Text => InputKind::Textarea,
        FieldType::Boolean => InputKind::Checkbox,
        FieldType::Integer | FieldType::BigInteger | FieldType::Float | FieldType::Decimal => {
            InputKind::Number
        }
        FieldType::Date => InputKind::Date,
        FieldType::DateTime | FieldType::Timestamp => InputKind::DatetimeLocal,
        FieldType::Time => InputKind::Time,
        FieldType::Enum => InputKind::Select,
        _ => InputKind::Text,
    }
}

/// Form widget for a field using the built-in table
#[must_use]
pub fn ui_input_kind(field: &Field) -> InputKind {
    input_kind_by_name(field).unwrap_or_else(|| input_kind_by_type(&field.field_type))
}

/// Form widget for a field, consulting a type-to-widget override table
///
/// Name overrides still win; the table replaces only the type-based choice.
#[must_use]
pub fn ui_input_kind_with(field: &Field, overrides: &BTreeMap<String, InputKind>) -> InputKind {
    input_kind_by_name(field)
        .or_else(|| overrides.get(field.field_type.as_str()).copied())
        .unwrap_or_else(|| input_kind_by_type(&field.field_type))
}

// ---------------------------------------------------------------------------
// Model casts and foreign keys
// ---------------------------------------------------------------------------

/// Attribute cast for a field, if its type has one
#[must_use]
pub const fn model_cast(field: &Field) -> Option<&'static str> {
    match field.field_type {
        FieldType::Boolean => Some("boolean"),
        FieldType::Integer | FieldType::BigInteger => Some("integer"),
        FieldType::Float => Some("float"),
        FieldType::Decimal => Some("decimal:2"),
        FieldType::Date => Some("date"),
        FieldType::DateTime | FieldType::Timestamp => Some("datetime"),
        FieldType::Json => Some("array"),
        FieldType::Enum => Some("string"),
        _ => None,
    }
}

/// `belongsTo` relations whose foreign key still needs a column
///
/// A key is skipped when a field has exactly that name or when an earlier
/// relation already yielded it.
///
/// # Examples
///
/// ```
/// # use crudwright::scaffold::field::parse_fields;
/// # use crudwright::scaffold::relation::parse_relations;
/// # use crudwright::scaffold::mapping::belongs_to_foreign_keys;
/// let fields = parse_fields("user_id:foreignId,title:string");
/// let relations = parse_relations("belongsTo:User,belongsTo:Category");
/// let keys: Vec<_> = belongs_to_foreign_keys(&fields, &relations)
///     .into_iter()
///     .map(|(_, key)| key)
///     .collect();
/// assert_eq!(keys, ["category_id"]);
/// ```
#[must_use]
pub fn belongs_to_foreign_keys<'a>(
    fields: &[Field],
    relations: &'a [Relation],
) -> Vec<(&'a Relation, String)> {
    let mut seen: HashSet<String> = fields.iter().map(|f| f.name.clone()).collect();
    relations
        .iter()
        .filter(|relation| relation.kind == RelationKind::BelongsTo)
        .filter_map(|relation| {
            let key = relation.foreign_key();
            seen.insert(key.clone()).then_some((relation, key))
        })
        .collect()
}

/// `'a', 'b', 'c'`
#[must_use]
pub fn quoted_list(values: &[String]) -> String {
    values
        .iter()
        .map(|value| format!("'{value}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

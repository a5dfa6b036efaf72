//! Name derivation for code generation
//!
//! Every generated artifact refers to the model through names derived here:
//! casing variants, plurals, table names, route prefixes and relation accessors.
//! All functions are pure, so one model name always yields the same set of
//! names within a request.

use super::relation::RelationKind;
use inflector::Inflector;

/// Naming helpers shared by every renderer
pub struct NameHelpers;

impl NameHelpers {
    /// Convert string to `snake_case`
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudwright::scaffold::naming::NameHelpers;
    /// assert_eq!(NameHelpers::snake("UserProfile"), "user_profile");
    /// assert_eq!(NameHelpers::snake("HTTPRequest"), "http_request");
    /// ```
    #[must_use]
    pub fn snake(input: &str) -> String {
        input.to_snake_case()
    }

    /// Convert string to `PascalCase`
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudwright::scaffold::naming::NameHelpers;
    /// assert_eq!(NameHelpers::pascal("user_profile"), "UserProfile");
    /// assert_eq!(NameHelpers::pascal("blog-post"), "BlogPost");
    /// ```
    #[must_use]
    pub fn pascal(input: &str) -> String {
        input.to_pascal_case()
    }

    /// Convert string to camelCase
    #[must_use]
    pub fn camel(input: &str) -> String {
        input.to_camel_case()
    }

    /// Convert string to kebab-case
    #[must_use]
    pub fn kebab(input: &str) -> String {
        input.to_kebab_case()
    }

    /// Pluralize a word
    ///
    /// The word is pluralized in its `snake_case` form so the result does not
    /// depend on the casing of the input; re-case the result as needed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudwright::scaffold::naming::NameHelpers;
    /// assert_eq!(NameHelpers::pluralize("post"), "posts");
    /// assert_eq!(NameHelpers::pluralize("Category"), "categories");
    /// assert_eq!(NameHelpers::pluralize("UserProfile"), "user_profiles");
    /// ```
    #[must_use]
    pub fn pluralize(input: &str) -> String {
        Self::snake(input).to_plural()
    }

    /// Singularize a word (in `snake_case`)
    #[must_use]
    pub fn singularize(input: &str) -> String {
        Self::snake(input).to_singular()
    }

    /// Plural form in `PascalCase` (`Category` -> `Categories`)
    #[must_use]
    pub fn plural_pascal(model: &str) -> String {
        Self::pascal(&Self::pluralize(model))
    }

    /// Table name: `snake(plural(model))`
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudwright::scaffold::naming::NameHelpers;
    /// assert_eq!(NameHelpers::table_name("Post"), "posts");
    /// assert_eq!(NameHelpers::table_name("UserProfile"), "user_profiles");
    /// ```
    #[must_use]
    pub fn table_name(model: &str) -> String {
        Self::pluralize(model)
    }

    /// Route prefix: `kebab(plural(model))`
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudwright::scaffold::naming::NameHelpers;
    /// assert_eq!(NameHelpers::route_prefix("UserProfile"), "user-profiles");
    /// ```
    #[must_use]
    pub fn route_prefix(model: &str) -> String {
        Self::kebab(&Self::pluralize(model))
    }

    /// View folder, same derivation as the route prefix
    #[must_use]
    pub fn view_folder(model: &str) -> String {
        Self::route_prefix(model)
    }

    /// Plural variable name: `camel(plural(model))`
    #[must_use]
    pub fn plural_variable(model: &str) -> String {
        Self::camel(&Self::pluralize(model))
    }

    /// Controller class name
    #[must_use]
    pub fn controller_name(model: &str) -> String {
        format!("{}Controller", Self::pascal(model))
    }

    /// Foreign key column for a related model: `snake(model) + "_id"`
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudwright::scaffold::naming::NameHelpers;
    /// assert_eq!(NameHelpers::foreign_key_for("User"), "user_id");
    /// assert_eq!(NameHelpers::foreign_key_for("blogPost"), "blog_post_id");
    /// ```
    #[must_use]
    pub fn foreign_key_for(model: &str) -> String {
        format!("{}_id", Self::snake(model))
    }

    /// Accessor method name for a relation
    ///
    /// To-many relations use the plural camel form of the related model,
    /// everything else the singular camel form.
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudwright::scaffold::naming::NameHelpers;
    /// # use crudwright::scaffold::relation::RelationKind;
    /// assert_eq!(NameHelpers::relation_method_name(RelationKind::HasMany, "Comment"), "comments");
    /// assert_eq!(NameHelpers::relation_method_name(RelationKind::BelongsTo, "BlogPost"), "blogPost");
    /// ```
    #[must_use]
    pub fn relation_method_name(kind: RelationKind, related_model: &str) -> String {
        if kind.is_to_many() {
            Self::plural_variable(related_model)
        } else {
            Self::camel(related_model)
        }
    }

    /// Polymorphic relation name: `snake(model) + "able"`
    #[must_use]
    pub fn morph_name(model: &str) -> String {
        format!("{}able", Self::snake(model))
    }

    /// Pivot table name for a many-to-many pair, alphabetical so both sides agree
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudwright::scaffold::naming::NameHelpers;
    /// assert_eq!(NameHelpers::pivot_table_name("Tag", "Post"), "post_tag");
    /// ```
    #[must_use]
    pub fn pivot_table_name(first: &str, second: &str) -> String {
        let (a, b) = Self::pivot_pair(first, second);
        format!("{a}_{b}")
    }

    /// Both pivot sides in `snake_case`, ordered alphabetically
    #[must_use]
    pub fn pivot_pair(first: &str, second: &str) -> (String, String) {
        let mut pair = [Self::snake(first), Self::snake(second)];
        pair.sort();
        let [a, b] = pair;
        (a, b)
    }

    /// Human-readable label for a field name (`first_name` -> `First name`)
    #[must_use]
    pub fn label(field_name: &str) -> String {
        field_name.to_sentence_case()
    }
}

/// All names derived from one model name
///
/// Computed once per generation request and shared by every renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSet {
    /// Class name (`BlogPost`)
    pub model: String,
    /// Singular variable (`blogPost`)
    pub variable: String,
    /// Singular snake form (`blog_post`)
    pub snake: String,
    /// Singular kebab form (`blog-post`)
    pub kebab: String,
    /// Plural class form (`BlogPosts`)
    pub plural: String,
    /// Plural variable (`blogPosts`)
    pub plural_variable: String,
    /// Table name (`blog_posts`)
    pub table: String,
    /// Route prefix (`blog-posts`)
    pub route_prefix: String,
    /// View folder (`blog-posts`)
    pub view_folder: String,
    /// Controller class (`BlogPostController`)
    pub controller: String,
}

impl NameSet {
    /// Derive every name from a model name
    #[must_use]
    pub fn new(model_name: &str) -> Self {
        let model = NameHelpers::pascal(model_name);
        Self {
            variable: NameHelpers::camel(&model),
            snake: NameHelpers::snake(&model),
            kebab: NameHelpers::kebab(&model),
            plural: NameHelpers::plural_pascal(&model),
            plural_variable: NameHelpers::plural_variable(&model),
            table: NameHelpers::table_name(&model),
            route_prefix: NameHelpers::route_prefix(&model),
            view_folder: NameHelpers::view_folder(&model),
            controller: NameHelpers::controller_name(&model),
            model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(NameHelpers::snake("UserProfile"), "user_profile");
        assert_eq!(NameHelpers::snake("simple"), "simple");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(NameHelpers::pascal("user_profile"), "UserProfile");
        assert_eq!(NameHelpers::pascal("Simple"), "Simple");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(NameHelpers::camel("user_profile"), "userProfile");
        assert_eq!(NameHelpers::camel("User"), "user");
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(NameHelpers::kebab("UserProfile"), "user-profile");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(NameHelpers::pluralize("post"), "posts");
        assert_eq!(NameHelpers::pluralize("category"), "categories");
        assert_eq!(NameHelpers::pluralize("Comment"), "comments");
    }

    #[test]
    fn test_singularize() {
        assert_eq!(NameHelpers::singularize("posts"), "post");
        assert_eq!(NameHelpers::singularize("categories"), "category");
    }

    #[test]
    fn test_relation_method_names() {
        assert_eq!(NameHelpers::relation_method_name(RelationKind::HasMany, "Comment"), "comments");
        assert_eq!(NameHelpers::relation_method_name(RelationKind::BelongsToMany, "Tag"), "tags");
        assert_eq!(NameHelpers::relation_method_name(RelationKind::MorphMany, "Image"), "images");
        assert_eq!(NameHelpers::relation_method_name(RelationKind::BelongsTo, "User"), "user");
        assert_eq!(NameHelpers::relation_method_name(RelationKind::HasOne, "Profile"), "profile");
        assert_eq!(NameHelpers::relation_method_name(RelationKind::MorphTo, "Commentable"), "commentable");
    }

    #[test]
    fn test_morph_and_pivot_names() {
        assert_eq!(NameHelpers::morph_name("Post"), "postable");
        assert_eq!(NameHelpers::pivot_table_name("Post", "Tag"), "post_tag");
        assert_eq!(NameHelpers::pivot_table_name("Tag", "Post"), "post_tag");
    }

    #[test]
    fn test_label() {
        assert_eq!(NameHelpers::label("first_name"), "First name");
        assert_eq!(NameHelpers::label("title"), "Title");
    }

    #[test]
    fn test_name_set() {
        let names = NameSet::new("BlogPost");
        assert_eq!(names.model, "BlogPost");
        assert_eq!(names.variable, "blogPost");
        assert_eq!(names.snake, "blog_post");
        assert_eq!(names.plural, "BlogPosts");
        assert_eq!(names.plural_variable, "blogPosts");
        assert_eq!(names.table, "blog_posts");
        assert_eq!(names.route_prefix, "blog-posts");
        assert_eq!(names.view_folder, "blog-posts");
        assert_eq!(names.controller, "BlogPostController");
    }

    #[test]
    fn test_name_set_is_deterministic() {
        assert_eq!(NameSet::new("Category"), NameSet::new("Category"));
        assert_eq!(NameSet::new("category").table, "categories");
    }
}

//! Model factory renderer

use super::{file_in, join_indented, Artifact, RenderContext, Renderer};
use crate::error::Result;
use crate::scaffold::field::{Field, FieldType};
use crate::scaffold::mapping::{belongs_to_foreign_keys, synthetic_strategy};
use crate::scaffold::naming::NameHelpers;
use crate::scaffold::relation::{Relation, RelationKind};
use crate::scaffold::request::ArtifactKind;
use crate::stubs::Placeholders;
use std::collections::HashSet;

/// Renders the factory with one definition per field and named states
#[derive(Debug, Clone, Copy, Default)]
pub struct FactoryRenderer;

/// One named factory state
struct State {
    name: String,
    field: String,
    value: String,
}

impl FactoryRenderer {
    /// `\App\Models\User::factory()`
    fn related_factory(ctx: &RenderContext<'_>, relation: &Relation) -> String {
        format!("\\{}::factory()", ctx.related_model_class(&relation.model_class()))
    }

    fn definitions(ctx: &RenderContext<'_>) -> Vec<String> {
        let request = ctx.request;
        let mut definitions: Vec<String> = request
            .fields
            .iter()
            .map(|field| {
                // A declared key column still points at its related factory
                let owner = request.relations.iter().find(|relation| {
                    relation.kind == RelationKind::BelongsTo && relation.foreign_key() == field.name
                });
                let expression = owner.map_or_else(
                    || synthetic_strategy(field).expression(),
                    |relation| Self::related_factory(ctx, relation),
                );
                format!("'{}' => {expression}", field.name)
            })
            .collect();

        for (relation, key) in belongs_to_foreign_keys(&request.fields, &request.relations) {
            definitions.push(format!("'{key}' => {}", Self::related_factory(ctx, relation)));
        }

        definitions
    }

    fn states(fields: &[Field]) -> Vec<State> {
        let enum_states = fields
            .iter()
            .filter(|field| field.field_type == FieldType::Enum)
            .flat_map(|field| {
                field.effective_enum_values().into_iter().map(move |value| State {
                    name: NameHelpers::camel(&value),
                    field: field.name.clone(),
                    value: format!("'{value}'"),
                })
            });

        let boolean_states = fields
            .iter()
            .filter(|field| field.field_type == FieldType::Boolean)
            .flat_map(|field| {
                [
                    State {
                        name: NameHelpers::camel(&field.name),
                        field: field.name.clone(),
                        value: "true".to_string(),
                    },
                    State {
                        name: NameHelpers::camel(&format!("not_{}", field.name)),
                        field: field.name.clone(),
                        value: "false".to_string(),
                    },
                ]
            });

        let mut seen = HashSet::new();
        enum_states
            .chain(boolean_states)
            .filter(|state| {
                let fresh = !state.name.is_empty() && seen.insert(state.name.clone());
                if !fresh {
                    tracing::debug!(state = %state.name, "Skipping duplicate factory state");
                }
                fresh
            })
            .collect()
    }

    fn state_method(state: &State) -> String {
        format!(
            "\n\n    /**\n     * Indicate that the model is {name}.\n     */\n    public function {name}(): static\n    {{\n        return $this->state(fn (array $attributes) => [\n            '{field}' => {value},\n        ]);\n    }}",
            name = state.name,
            field = state.field,
            value = state.value,
        )
    }
}

impl Renderer for FactoryRenderer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Factory
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<Vec<Artifact>> {
        let names = &ctx.names;
        let class_name = format!("{}Factory", names.model);
        let states: String = Self::states(&ctx.request.fields)
            .iter()
            .map(Self::state_method)
            .collect();

        let placeholders = Placeholders::from([
            ("namespace", ctx.namespace_under("Database\\Factories")),
            ("model_class", ctx.request.model_class()),
            ("model_name", names.model.clone()),
            ("class_name", class_name.clone()),
            ("definitions", join_indented(Self::definitions(ctx), 12, ",")),
            ("states", states),
        ]);
        let content = ctx.stubs.render("factory", &placeholders)?;

        let path = file_in(&ctx.namespaced_dir(ArtifactKind::Factory), format!("{class_name}.php"));
        Ok(vec![Artifact::create(path, content, format!("Factory for {}", names.model))])
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{render_one, request};
    use super::*;
    use crate::config::CrudConfig;
    use std::path::PathBuf;

    fn render(fields: &str, relations: &str) -> String {
        let req = request("Post", fields, relations);
        render_one(&FactoryRenderer, &req, &CrudConfig::default())
            .remove(0)
            .content
    }

    #[test]
    fn test_definitions_follow_strategies() {
        let content = render("title:string,contact_email:string,views:integer", "");
        assert!(content.contains("'title' => fake()->sentence(4),"));
        assert!(content.contains("'contact_email' => fake()->unique()->safeEmail(),"));
        assert!(content.contains("'views' => fake()->numberBetween(1, 100)"));
        assert!(content.contains("protected $model = Post::class;"));
        assert!(content.contains("use App\\Models\\Post;"));
    }

    #[test]
    fn test_enum_choice_and_states() {
        let content = render("status:enum:pending:processing:completed", "");
        assert!(content.contains(
            "'status' => fake()->randomElement(['pending', 'processing', 'completed'])"
        ));
        for state in ["pending", "processing", "completed"] {
            assert!(content.contains(&format!("public function {state}(): static")));
            assert!(content.contains(&format!("'status' => '{state}',")));
        }
    }

    #[test]
    fn test_enum_without_values_uses_fallback() {
        let content = render("status:enum", "");
        assert!(content.contains("fake()->randomElement(['pending', 'active', 'inactive'])"));
        assert!(content.contains("public function inactive(): static"));
    }

    #[test]
    fn test_boolean_states() {
        let content = render("is_published:boolean", "");
        assert!(content.contains("public function isPublished(): static"));
        assert!(content.contains("public function notIsPublished(): static"));
        assert!(content.contains("'is_published' => true,"));
        assert!(content.contains("'is_published' => false,"));
    }

    #[test]
    fn test_explicit_foreign_key_factory_once() {
        let content = render("title:string", "belongsTo:User:author_id");
        assert_eq!(content.matches("'author_id' =>").count(), 1);
        assert!(content.contains("'author_id' => \\App\\Models\\User::factory()"));
    }

    #[test]
    fn test_declared_foreign_key_uses_related_factory() {
        let content = render("user_id:foreignId,title:string", "belongsTo:User");
        assert_eq!(content.matches("'user_id' =>").count(), 1);
        assert!(content.contains("'user_id' => \\App\\Models\\User::factory(),"));
    }

    #[test]
    fn test_duplicate_state_names_skipped() {
        let content = render("status:enum:active:closed,phase:enum:active:done", "");
        assert_eq!(content.matches("public function active(): static").count(), 1);
        assert!(content.contains("public function done(): static"));
    }

    #[test]
    fn test_namespaced_factory() {
        let req = request("Blog/Post", "title:string", "");
        let artifact = render_one(&FactoryRenderer, &req, &CrudConfig::default()).remove(0);
        assert_eq!(artifact.path, PathBuf::from("database/factories/Blog/PostFactory.php"));
        assert!(artifact.content.contains("namespace Database\\Factories\\Blog;"));
        assert!(artifact.content.contains("use App\\Models\\Blog\\Post;"));
    }
}

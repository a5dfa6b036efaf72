//! Schema migration renderer

use super::{file_in, Artifact, RenderContext, Renderer};
use crate::error::Result;
use crate::scaffold::mapping::{belongs_to_foreign_keys, storage_column};
use crate::scaffold::naming::NameHelpers;
use crate::scaffold::relation::RelationKind;
use crate::scaffold::request::ArtifactKind;
use crate::stubs::Placeholders;
use chrono::{Duration, NaiveDateTime};

/// Column lines sit inside `Schema::create(...)`
const COLUMN_INDENT: &str = "            ";

/// Migration filename timestamp format (`2024_01_15_103000`)
const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H%M%S";

/// Renders the create-table migration plus one pivot migration per
/// `belongsToMany` relation
#[derive(Debug, Clone, Copy, Default)]
pub struct MigrationRenderer;

impl MigrationRenderer {
    fn columns(ctx: &RenderContext<'_>) -> String {
        let request = ctx.request;
        let mut lines: Vec<String> = request
            .fields
            .iter()
            .map(|field| storage_column(field).to_string())
            .collect();

        for (relation, key) in belongs_to_foreign_keys(&request.fields, &request.relations) {
            lines.push(format!(
                "$table->foreignId('{key}')->constrained('{}')->cascadeOnDelete();",
                NameHelpers::table_name(&relation.target_model)
            ));
        }

        let mut markers = Vec::new();
        if ctx.config.timestamps {
            markers.push("$table->timestamps();".to_string());
        }
        if ctx.config.soft_deletes {
            markers.push("$table->softDeletes();".to_string());
        }
        if !markers.is_empty() && !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(markers);

        lines
            .iter()
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("{COLUMN_INDENT}{line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn filename(at: NaiveDateTime, table: &str) -> String {
        format!("{}_create_{table}_table.php", at.format(TIMESTAMP_FORMAT))
    }
}

impl Renderer for MigrationRenderer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Migration
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<Vec<Artifact>> {
        let dir = ctx.config.path_for(ArtifactKind::Migration);
        let table = &ctx.names.table;

        let placeholders = Placeholders::from([
            ("table_name", table.clone()),
            ("columns", Self::columns(ctx)),
        ]);
        let content = ctx.stubs.render("migration", &placeholders)?;

        let mut artifacts = vec![Artifact::create(
            file_in(dir, Self::filename(ctx.now, table)),
            content,
            format!("Migration for {table} table"),
        )];

        // Each pivot sorts after the migration before it
        let mut at = ctx.now;
        for relation in ctx
            .request
            .relations
            .iter()
            .filter(|relation| relation.kind == RelationKind::BelongsToMany)
        {
            at += Duration::seconds(1);
            let (first, second) = NameHelpers::pivot_pair(&ctx.names.model, &relation.target_model);
            let pivot = format!("{first}_{second}");

            let placeholders = Placeholders::from([
                ("table_name", pivot.clone()),
                ("foreign_key_1", format!("{first}_id")),
                ("foreign_key_2", format!("{second}_id")),
                ("table_1", NameHelpers::pluralize(&first)),
                ("table_2", NameHelpers::pluralize(&second)),
            ]);
            let content = ctx.stubs.render("migration.pivot", &placeholders)?;

            artifacts.push(Artifact::create(
                file_in(dir, Self::filename(at, &pivot)),
                content,
                format!("Pivot migration for {pivot} table"),
            ));
        }

        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{render_one, request};
    use super::*;
    use crate::config::CrudConfig;
    use std::path::PathBuf;

    #[test]
    fn test_columns_and_markers() {
        let req = request("Post", "title:string,body:text", "");
        let artifacts = render_one(&MigrationRenderer, &req, &CrudConfig::default());
        assert_eq!(artifacts.len(), 1);

        let migration = &artifacts[0];
        assert_eq!(
            migration.path,
            PathBuf::from("database/migrations/2024_01_15_103000_create_posts_table.php")
        );
        assert!(migration.content.contains("Schema::create('posts'"));
        assert!(migration.content.contains("            $table->string('title');\n            $table->text('body');"));

        let body = migration.content.find("$table->text('body')").unwrap();
        let timestamps = migration.content.find("$table->timestamps();").unwrap();
        let soft_deletes = migration.content.find("$table->softDeletes();").unwrap();
        assert!(body < timestamps && timestamps < soft_deletes);
    }

    #[test]
    fn test_repeated_field_gives_one_column() {
        let req = request("Post", "title:string,title:text", "");
        let content = &render_one(&MigrationRenderer, &req, &CrudConfig::default())[0].content;
        assert_eq!(content.matches("('title')").count(), 1);
        assert!(content.contains("$table->string('title');"));
    }

    #[test]
    fn test_markers_follow_config() {
        let config = CrudConfig {
            timestamps: false,
            soft_deletes: false,
            ..CrudConfig::default()
        };
        let req = request("Post", "title:string", "");
        let content = &render_one(&MigrationRenderer, &req, &config)[0].content;
        assert!(!content.contains("timestamps()"));
        assert!(!content.contains("softDeletes()"));
    }

    #[test]
    fn test_foreign_key_added_once() {
        let req = request("Post", "user_id:foreignId,title:string", "belongsTo:User");
        let content = &render_one(&MigrationRenderer, &req, &CrudConfig::default())[0].content;
        assert_eq!(content.matches("'user_id'").count(), 1);
        assert!(!content.contains("constrained('users')"));

        let req = request("Post", "title:string", "belongsTo:User:author_id,belongsTo:User:author_id");
        let content = &render_one(&MigrationRenderer, &req, &CrudConfig::default())[0].content;
        assert_eq!(
            content
                .matches("$table->foreignId('author_id')->constrained('users')->cascadeOnDelete();")
                .count(),
            1
        );
    }

    #[test]
    fn test_enum_column_values() {
        let req = request("Order", "status:enum:pending:processing:completed", "");
        let content = &render_one(&MigrationRenderer, &req, &CrudConfig::default())[0].content;
        assert!(content.contains("$table->enum('status', ['pending', 'processing', 'completed']);"));
    }

    #[test]
    fn test_pivot_migrations_follow_main_one() {
        let req = request("Post", "title:string", "belongsToMany:Tag,belongsToMany:Category");
        let artifacts = render_one(&MigrationRenderer, &req, &CrudConfig::default());
        assert_eq!(artifacts.len(), 3);

        assert_eq!(
            artifacts[1].path,
            PathBuf::from("database/migrations/2024_01_15_103001_create_post_tag_table.php")
        );
        assert_eq!(
            artifacts[2].path,
            PathBuf::from("database/migrations/2024_01_15_103002_create_category_post_table.php")
        );

        let pivot = &artifacts[1].content;
        assert!(pivot.contains("Schema::create('post_tag'"));
        assert!(pivot.contains("$table->foreignId('post_id')->constrained('posts')"));
        assert!(pivot.contains("$table->foreignId('tag_id')->constrained('tags')"));
        assert!(pivot.contains("$table->unique(['post_id', 'tag_id']);"));

        let mut names: Vec<_> = artifacts.iter().map(|a| a.path.clone()).collect();
        let original = names.clone();
        names.sort();
        assert_eq!(names, original);
    }
}

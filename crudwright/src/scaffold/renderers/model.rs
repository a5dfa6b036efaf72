//! Eloquent model renderer

use super::{file_in, join_indented, Artifact, RenderContext, Renderer};
use crate::error::Result;
use crate::scaffold::mapping::{belongs_to_foreign_keys, model_cast};
use crate::scaffold::naming::NameHelpers;
use crate::scaffold::relation::{Relation, RelationKind};
use crate::scaffold::request::ArtifactKind;
use crate::stubs::Placeholders;
use std::collections::BTreeSet;

/// Renders the model class
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelRenderer;

impl ModelRenderer {
    /// Fields followed by foreign keys no field already declares
    fn fillable(ctx: &RenderContext<'_>) -> Vec<String> {
        let request = ctx.request;
        request
            .fields
            .iter()
            .map(|field| field.name.clone())
            .chain(
                belongs_to_foreign_keys(&request.fields, &request.relations)
                    .into_iter()
                    .map(|(_, key)| key),
            )
            .collect()
    }

    fn casts(ctx: &RenderContext<'_>) -> Vec<String> {
        ctx.request
            .fields
            .iter()
            .filter_map(|field| model_cast(field).map(|cast| format!("'{}' => '{cast}'", field.name)))
            .collect()
    }

    fn imports(ctx: &RenderContext<'_>) -> String {
        let mut imports = BTreeSet::from([
            "Illuminate\\Database\\Eloquent\\Factories\\HasFactory".to_string(),
            "Illuminate\\Database\\Eloquent\\Model".to_string(),
        ]);
        if ctx.config.soft_deletes {
            imports.insert("Illuminate\\Database\\Eloquent\\SoftDeletes".to_string());
        }

        for relation in &ctx.request.relations {
            imports.insert(format!(
                "Illuminate\\Database\\Eloquent\\Relations\\{}",
                Self::relation_class(relation.kind)
            ));

            let related = relation.model_class();
            if relation.kind != RelationKind::MorphTo && related != ctx.names.model {
                imports.insert(ctx.related_model_class(&related));
            }
        }

        imports
            .iter()
            .map(|import| format!("use {import};"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn traits(ctx: &RenderContext<'_>) -> String {
        if ctx.config.soft_deletes {
            "use HasFactory, SoftDeletes;".to_string()
        } else {
            "use HasFactory;".to_string()
        }
    }

    fn relation_class(kind: RelationKind) -> String {
        NameHelpers::pascal(kind.as_str())
    }

    /// Builder call inside a relation accessor
    fn relation_call(ctx: &RenderContext<'_>, relation: &Relation) -> String {
        let related = relation.model_class();
        let explicit_key = relation
            .foreign_key
            .as_ref()
            .filter(|_| relation.kind.takes_foreign_key())
            .map(|key| format!(", '{key}'"))
            .unwrap_or_default();

        match relation.kind {
            RelationKind::BelongsTo | RelationKind::HasMany | RelationKind::HasOne => {
                format!("$this->{}({related}::class{explicit_key})", relation.kind)
            }
            RelationKind::BelongsToMany => format!("$this->belongsToMany({related}::class)"),
            RelationKind::MorphTo => "$this->morphTo()".to_string(),
            RelationKind::MorphMany => format!(
                "$this->morphMany({related}::class, '{}')",
                NameHelpers::morph_name(&ctx.names.model)
            ),
        }
    }

    fn relations(ctx: &RenderContext<'_>) -> String {
        ctx.request
            .relations
            .iter()
            .map(|relation| {
                let method = relation.method_name();
                format!(
                    "\n\n    /**\n     * Get the {method} relationship.\n     */\n    public function {method}(): {}\n    {{\n        return {};\n    }}",
                    Self::relation_class(relation.kind),
                    Self::relation_call(ctx, relation),
                )
            })
            .collect()
    }
}

impl Renderer for ModelRenderer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Model
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<Vec<Artifact>> {
        let names = &ctx.names;
        let fillable: Vec<String> = Self::fillable(ctx)
            .iter()
            .map(|name| format!("'{name}'"))
            .collect();

        let placeholders = Placeholders::from([
            ("namespace", ctx.request.model_namespace.clone()),
            ("imports", Self::imports(ctx)),
            ("class_name", names.model.clone()),
            ("traits", Self::traits(ctx)),
            ("table_name", names.table.clone()),
            ("fillable", join_indented(&fillable, 8, ",")),
            ("casts", join_indented(Self::casts(ctx), 12, ",")),
            ("relations", Self::relations(ctx)),
        ]);
        let content = ctx.stubs.render("model", &placeholders)?;

        let path = file_in(&ctx.namespaced_dir(ArtifactKind::Model), format!("{}.php", names.model));
        Ok(vec![Artifact::create(path, content, format!("Model {}", names.model))])
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
        render_one(&ModelRenderer, &req, &CrudConfig::default())
            .remove(0)
            .content
    }

    #[test]
    fn test_fillable_is_exactly_the_fields() {
        let content = render("title:string,body:text", "");
        assert!(content.contains("protected $fillable = [\n        'title',\n        'body'\n    ];"));
        assert!(content.contains("protected $table = 'posts';"));
    }

    #[test]
    fn test_repeated_field_fillable_once() {
        let content = render("title:string,body:text,title:text", "");
        assert_eq!(content.matches("'title'").count(), 1);
        assert!(content.contains("protected $fillable = [\n        'title',\n        'body'\n    ];"));
    }

    #[test]
    fn test_explicit_foreign_key_fillable_once() {
        let content = render("title:string", "belongsTo:User:author_id");
        assert_eq!(content.matches("'author_id'").count(), 2); // fillable and accessor
        assert!(content.contains("        'title',\n        'author_id'\n"));
        assert!(content.contains("return $this->belongsTo(User::class, 'author_id');"));
    }

    #[test]
    fn test_derived_foreign_key_not_duplicated() {
        let content = render("user_id:foreignId,title:string", "belongsTo:User");
        assert_eq!(content.matches("'user_id'").count(), 1);
        assert!(content.contains("return $this->belongsTo(User::class);"));
    }

    #[test]
    fn test_casts() {
        let content = render(
            "price:decimal,active:boolean,meta:json,status:enum:a:b,title:string",
            "",
        );
        assert!(content.contains("'price' => 'decimal:2',\n            'active' => 'boolean'"));
        assert!(content.contains("'meta' => 'array'"));
        assert!(content.contains("'status' => 'string'"));
        assert!(!content.contains("'title' => '"));
    }

    #[test]
    fn test_relation_accessors() {
        let content = render(
            "title:string",
            "hasMany:Comment,belongsToMany:Tag,morphTo:Imageable,morphMany:Image,hasOne:Profile:owner_id",
        );
        assert!(content.contains("public function comments(): HasMany"));
        assert!(content.contains("return $this->hasMany(Comment::class);"));
        assert!(content.contains("public function tags(): BelongsToMany"));
        assert!(content.contains("return $this->belongsToMany(Tag::class);"));
        assert!(content.contains("public function imageable(): MorphTo"));
        assert!(content.contains("return $this->morphTo();"));
        assert!(content.contains("public function images(): MorphMany"));
        assert!(content.contains("return $this->morphMany(Image::class, 'postable');"));
        assert!(content.contains("return $this->hasOne(Profile::class, 'owner_id');"));

        assert!(content.contains("use App\\Models\\Comment;"));
        assert!(content.contains("use Illuminate\\Database\\Eloquent\\Relations\\MorphTo;"));
        assert!(!content.contains("use App\\Models\\Imageable;"));
    }

    #[test]
    fn test_soft_deletes_toggle() {
        let content = render("title:string", "");
        assert!(content.contains("use HasFactory, SoftDeletes;"));
        assert!(content.contains("use Illuminate\\Database\\Eloquent\\SoftDeletes;"));

        let config = CrudConfig {
            soft_deletes: false,
            ..CrudConfig::default()
        };
        let req = request("Post", "title:string", "");
        let content = render_one(&ModelRenderer, &req, &config).remove(0).content;
        assert!(content.contains("    use HasFactory;\n"));
        assert!(!content.contains("SoftDeletes"));
    }

    #[test]
    fn test_namespaced_model_path() {
        let req = request("Blog/Post", "title:string", "belongsTo:User");
        let artifact = render_one(&ModelRenderer, &req, &CrudConfig::default()).remove(0);
        assert_eq!(artifact.path, PathBuf::from("app/Models/Blog/Post.php"));
        assert!(artifact.content.contains("namespace App\\Models\\Blog;"));
        assert!(artifact.content.contains("use App\\Models\\User;"));
    }
}

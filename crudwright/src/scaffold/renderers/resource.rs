//! API resource renderer

use super::{file_in, join_indented, Artifact, RenderContext, Renderer};
use crate::error::Result;
use crate::scaffold::relation::{Relation, RelationKind};
use crate::scaffold::request::ArtifactKind;
use crate::stubs::Placeholders;

/// Renders `{Model}Resource`
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceRenderer;

impl ResourceRenderer {
    fn relation_entry(relation: &Relation) -> String {
        let method = relation.method_name();
        let loaded = format!("$this->whenLoaded('{method}')");
        let resource = format!("{}Resource", relation.model_class());

        if relation.kind == RelationKind::MorphTo {
            // The related type is only known at runtime
            format!("'{method}' => {loaded}")
        } else if relation.kind.is_to_many() {
            format!("'{method}' => {resource}::collection({loaded})")
        } else {
            format!("'{method}' => new {resource}({loaded})")
        }
    }

    fn entries(ctx: &RenderContext<'_>) -> Vec<String> {
        let mut entries = vec!["'id' => $this->id".to_string()];
        entries.extend(
            ctx.request
                .fields
                .iter()
                .map(|field| format!("'{0}' => $this->{0}", field.name)),
        );
        entries.push("'created_at' => $this->created_at?->toISOString()".to_string());
        entries.push("'updated_at' => $this->updated_at?->toISOString()".to_string());
        entries.extend(ctx.request.relations.iter().map(Self::relation_entry));
        entries
    }

    /// Fully qualified resource class
    pub(crate) fn class_name(ctx: &RenderContext<'_>) -> String {
        format!(
            "{}\\{}Resource",
            ctx.namespace_under(&ctx.app_namespace("Http\\Resources")),
            ctx.names.model
        )
    }
}

impl Renderer for ResourceRenderer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Resource
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<Vec<Artifact>> {
        let class_name = format!("{}Resource", ctx.names.model);

        let placeholders = Placeholders::from([
            ("namespace", ctx.namespace_under(&ctx.app_namespace("Http\\Resources"))),
            ("class_name", class_name.clone()),
            ("fields", join_indented(Self::entries(ctx), 12, ",")),
        ]);
        let content = ctx.stubs.render("resource", &placeholders)?;

        let path = file_in(&ctx.namespaced_dir(ArtifactKind::Resource), format!("{class_name}.php"));
        Ok(vec![Artifact::create(
            path,
            content,
            format!("API resource for {}", ctx.names.model),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{render_one, request};
    use super::*;
    use crate::config::CrudConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_entry_order() {
        let req = request("Post", "title:string,body:text", "belongsTo:User,hasMany:Comment,morphTo:Imageable");
        let artifact = render_one(&ResourceRenderer, &req, &CrudConfig::default()).remove(0);
        assert_eq!(artifact.path.to_string_lossy(), "app/Http/Resources/PostResource.php");

        let expected = "        return [
            'id' => $this->id,
            'title' => $this->title,
            'body' => $this->body,
            'created_at' => $this->created_at?->toISOString(),
            'updated_at' => $this->updated_at?->toISOString(),
            'user' => new UserResource($this->whenLoaded('user')),
            'comments' => CommentResource::collection($this->whenLoaded('comments')),
            'imageable' => $this->whenLoaded('imageable')
        ];";
        assert!(artifact.content.contains(expected), "{}", artifact.content);
    }

    #[test]
    fn test_to_many_relations_are_collections() {
        let req = request("Post", "title:string", "belongsToMany:Tag,morphMany:Image,hasOne:Profile");
        let content = render_one(&ResourceRenderer, &req, &CrudConfig::default()).remove(0).content;
        assert!(content.contains("'tags' => TagResource::collection($this->whenLoaded('tags'))"));
        assert!(content.contains("'images' => ImageResource::collection($this->whenLoaded('images'))"));
        assert!(content.contains("'profile' => new ProfileResource($this->whenLoaded('profile'))"));
    }
}

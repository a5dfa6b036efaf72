//! HTTP controller renderer

use super::request::RequestRenderer;
use super::resource::ResourceRenderer;
use super::{file_in, Artifact, RenderContext, Renderer};
use crate::error::Result;
use crate::scaffold::naming::NameHelpers;
use crate::scaffold::request::ArtifactKind;
use crate::stubs::Placeholders;

/// Renders the resource controller, web or API flavored
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerRenderer;

impl ControllerRenderer {
    /// Relation accessors to eager load, in declaration order
    fn eager_loads(ctx: &RenderContext<'_>) -> Vec<String> {
        ctx.request
            .relations
            .iter()
            .map(|relation| format!("'{}'", relation.method_name()))
            .collect()
    }

    /// `['title', 'body']`, or `['id']` when nothing is searchable
    fn search_fields(ctx: &RenderContext<'_>) -> String {
        let searchable: Vec<String> = ctx
            .request
            .fields
            .iter()
            .filter(|field| field.field_type.is_searchable())
            .map(|field| format!("'{}'", field.name))
            .collect();

        if searchable.is_empty() {
            "['id']".to_string()
        } else {
            format!("[{}]", searchable.join(", "))
        }
    }

    fn sortable_fields(ctx: &RenderContext<'_>) -> String {
        let mut sortable = vec!["'id'".to_string()];
        sortable.extend(ctx.request.fields.iter().map(|field| format!("'{}'", field.name)));
        if ctx.config.timestamps {
            sortable.push("'created_at'".to_string());
        }
        format!("[{}]", sortable.join(", "))
    }

    fn base_controller(ctx: &RenderContext<'_>) -> String {
        if ctx.request.sub_namespace.is_empty() {
            "Controller".to_string()
        } else {
            format!("\\{}\\Controller", ctx.app_namespace("Http\\Controllers"))
        }
    }
}

impl Renderer for ControllerRenderer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Controller
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<Vec<Artifact>> {
        let names = &ctx.names;
        let (store_request_class, update_request_class) = RequestRenderer::class_names(ctx);

        let eager_loads = Self::eager_loads(ctx);
        let (with_relations, load_relations) = if eager_loads.is_empty() {
            (String::new(), String::new())
        } else {
            let list = eager_loads.join(", ");
            (format!("->with([{list}])"), format!("->load([{list}])"))
        };

        let mut placeholders = Placeholders::from([
            ("namespace", ctx.namespace_under(&ctx.app_namespace("Http\\Controllers"))),
            ("base_controller", Self::base_controller(ctx)),
            ("model_class", ctx.request.model_class()),
            ("store_request_class", store_request_class),
            ("update_request_class", update_request_class),
            ("class_name", names.controller.clone()),
            ("model_name", names.model.clone()),
            ("model_variable", names.variable.clone()),
            ("model_variable_plural", names.plural_variable.clone()),
            ("store_request", format!("Store{}Request", names.model)),
            ("update_request", format!("Update{}Request", names.model)),
            ("with_relations", with_relations),
            ("load_relations", load_relations),
            ("search_fields", Self::search_fields(ctx)),
            ("sortable_fields", Self::sortable_fields(ctx)),
            ("per_page", ctx.config.pagination.per_page.to_string()),
            ("view_folder", names.view_folder.clone()),
            ("route_prefix", names.route_prefix.clone()),
            ("label", NameHelpers::label(&names.snake)),
        ]);

        let stub = if ctx.request.api_only {
            placeholders.insert("resource_class", ResourceRenderer::class_name(ctx));
            placeholders.insert("resource_name", format!("{}Resource", names.model));
            "controller.api"
        } else {
            "controller"
        };
        let content = ctx.stubs.render(stub, &placeholders)?;

        let path = file_in(
            &ctx.namespaced_dir(ArtifactKind::Controller),
            format!("{}.php", names.controller),
        );
        let flavor = if ctx.request.api_only { "API controller" } else { "Controller" };
        Ok(vec![Artifact::create(path, content, format!("{flavor} for {}", names.model))])
    }
}

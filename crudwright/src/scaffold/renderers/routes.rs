//! Route registration renderer

use super::{file_in, Artifact, RenderContext, Renderer, WriteMode};
use crate::error::Result;
use crate::scaffold::request::ArtifactKind;
use crate::stubs::Placeholders;

/// Content of a route file that does not exist yet
pub const ROUTE_FILE_PREAMBLE: &str = "<?php\n\nuse Illuminate\\Support\\Facades\\Route;\n";

/// Appends a resource route block to `web.php` or `api.php`
#[derive(Debug, Clone, Copy, Default)]
pub struct RoutesRenderer;

impl RoutesRenderer {
    /// `'web'` for a single middleware, `['web', 'auth']` otherwise
    fn middleware(middleware: &[String]) -> String {
        match middleware {
            [single] => format!("'{single}'"),
            many => format!(
                "[{}]",
                many.iter()
                    .map(|name| format!("'{name}'"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    /// Text whose presence in the route file means the model is registered
    #[must_use]
    pub fn marker(api: bool, route_prefix: &str) -> String {
        if api {
            format!("Route::apiResource('{route_prefix}'")
        } else {
            format!("Route::resource('{route_prefix}'")
        }
    }
}

impl Renderer for RoutesRenderer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Routes
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<Vec<Artifact>> {
        let names = &ctx.names;
        let routes = &ctx.config.routes;
        let api = ctx.request.api_only;

        let (stub, file, middleware, route_name) = if api {
            (
                "routes.api",
                "api.php",
                &routes.api_middleware,
                format!("api.{}", names.route_prefix),
            )
        } else {
            ("routes.web", "web.php", &routes.middleware, names.route_prefix.clone())
        };

        let prefix_call = if routes.prefix.is_empty() || api {
            String::new()
        } else {
            format!("->prefix('{}')", routes.prefix)
        };

        let placeholders = Placeholders::from([
            ("model_name", names.model.clone()),
            ("middleware", Self::middleware(middleware)),
            ("prefix_call", prefix_call),
            ("route_prefix", names.route_prefix.clone()),
            (
                "controller_class",
                format!(
                    "\\{}\\{}",
                    ctx.namespace_under(&ctx.app_namespace("Http\\Controllers")),
                    names.controller
                ),
            ),
            ("route_name", route_name),
        ]);
        let content = ctx.stubs.render(stub, &placeholders)?;

        Ok(vec![Artifact {
            path: file_in(ctx.config.path_for(ArtifactKind::Routes), file),
            content,
            description: format!("{} routes for {}", if api { "API" } else { "Web" }, names.model),
            mode: WriteMode::AppendUnlessPresent {
                marker: Self::marker(api, &names.route_prefix),
                preamble: Some(ROUTE_FILE_PREAMBLE.to_string()),
            },
        }])
    }
}

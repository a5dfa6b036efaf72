//! Database seeder renderer

use super::{file_in, Artifact, RenderContext, Renderer};
use crate::error::Result;
use crate::scaffold::request::ArtifactKind;
use crate::stubs::Placeholders;

/// Renders a seeder creating `per_page * 2` records through the factory
#[derive(Debug, Clone, Copy, Default)]
pub struct SeederRenderer;

impl Renderer for SeederRenderer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Seeder
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<Vec<Artifact>> {
        let model = &ctx.names.model;
        let class_name = format!("{model}Seeder");

        let placeholders = Placeholders::from([
            ("model_class", ctx.request.model_class()),
            ("class_name", class_name.clone()),
            ("model_name", model.clone()),
            ("count", ctx.config.seed_count().to_string()),
        ]);
        let content = ctx.stubs.render("seeder", &placeholders)?;

        let path = file_in(ctx.config.path_for(ArtifactKind::Seeder), format!("{class_name}.php"));
        Ok(vec![Artifact::create(path, content, format!("Seeder for {model}"))])
    }
}

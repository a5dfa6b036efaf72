//! Form request renderer (store and update validators)

use super::{file_in, join_indented, Artifact, RenderContext, Renderer};
use crate::error::Result;
use crate::scaffold::field::{Field, FieldType};
use crate::scaffold::mapping::{rule_string, validation_rules};
use crate::scaffold::naming::NameHelpers;
use crate::scaffold::request::ArtifactKind;
use crate::stubs::Placeholders;

/// Renders `Store{Model}Request` and `Update{Model}Request`
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestRenderer;

impl RequestRenderer {
    fn rules(ctx: &RenderContext<'_>, is_update: bool) -> Vec<String> {
        ctx.request
            .fields
            .iter()
            .map(|field| {
                let rules = validation_rules(field, is_update);
                format!("'{}' => '{}'", field.name, rule_string(&rules, &ctx.names.table))
            })
            .collect()
    }

    /// Message for the type rule of a field, if its type has one
    fn type_message(field: &Field, label: &str) -> Option<String> {
        let (rule, text) = match field.field_type {
            FieldType::Integer | FieldType::BigInteger => ("integer", "must be an integer"),
            FieldType::Float | FieldType::Decimal => ("numeric", "must be a number"),
            FieldType::Boolean => ("boolean", "must be true or false"),
            FieldType::Date | FieldType::DateTime => ("date", "must be a valid date"),
            FieldType::Json => ("json", "must be valid JSON"),
            _ => return None,
        };
        Some(format!("'{}.{rule}' => '{label} {text}.'", field.name))
    }

    fn messages(fields: &[Field]) -> Vec<String> {
        let mut messages = Vec::new();
        for field in fields {
            let label = NameHelpers::label(&field.name);
            if !field.is_nullable() {
                messages.push(format!("'{}.required' => '{label} is required.'", field.name));
            }
            messages.extend(Self::type_message(field, &label));
        }
        messages
    }

    fn variant(ctx: &RenderContext<'_>, prefix: &str, is_update: bool) -> Result<Artifact> {
        let class_name = format!("{prefix}{}Request", ctx.names.model);

        let placeholders = Placeholders::from([
            ("namespace", ctx.namespace_under(&ctx.app_namespace("Http\\Requests"))),
            ("class_name", class_name.clone()),
            ("rules", join_indented(Self::rules(ctx, is_update), 12, ",")),
            ("messages", join_indented(Self::messages(&ctx.request.fields), 12, ",")),
        ]);
        let content = ctx.stubs.render("request", &placeholders)?;

        Ok(Artifact::create(
            file_in(&ctx.namespaced_dir(ArtifactKind::Request), format!("{class_name}.php")),
            content,
            format!("{prefix} request for {}", ctx.names.model),
        ))
    }

    /// Fully qualified store and update request classes
    pub(crate) fn class_names(ctx: &RenderContext<'_>) -> (String, String) {
        let namespace = ctx.namespace_under(&ctx.app_namespace("Http\\Requests"));
        (
            format!("{namespace}\\Store{}Request", ctx.names.model),
            format!("{namespace}\\Update{}Request", ctx.names.model),
        )
    }
}

impl Renderer for RequestRenderer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Request
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<Vec<Artifact>> {
        Ok(vec![
            Self::variant(ctx, "Store", false)?,
            Self::variant(ctx, "Update", true)?,
        ])
    }
}

//! Blade view renderer
//!
//! Emits `index`, `create`, `edit`, `show` and the shared `_form` partial.
//! Class names come from a per-framework [`CssClasses`] set so the same
//! markup works for Tailwind component classes and for Bootstrap.

use super::{file_in, Artifact, RenderContext, Renderer};
use crate::config::CssFramework;
use crate::error::Result;
use crate::scaffold::field::{Field, FieldType};
use crate::scaffold::mapping::{ui_input_kind_with, InputKind};
use crate::scaffold::naming::NameHelpers;
use crate::scaffold::request::ArtifactKind;
use crate::stubs::Placeholders;

/// Class names used by the generated markup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CssClasses {
    container: &'static str,
    header: &'static str,
    title: &'static str,
    button_primary: &'static str,
    button_secondary: &'static str,
    alert_success: &'static str,
    search_form: &'static str,
    input: &'static str,
    input_error: &'static str,
    textarea: &'static str,
    select: &'static str,
    checkbox: &'static str,
    checkbox_group: &'static str,
    label: &'static str,
    error: &'static str,
    card: &'static str,
    table: &'static str,
    th: &'static str,
    td: &'static str,
    td_actions: &'static str,
    td_empty: &'static str,
    link: &'static str,
    link_danger: &'static str,
    inline_form: &'static str,
    badge_success: &'static str,
    badge_danger: &'static str,
    badge_primary: &'static str,
    pagination: &'static str,
    form: &'static str,
    form_fields: &'static str,
    form_actions: &'static str,
    detail_list: &'static str,
    dt: &'static str,
    dd: &'static str,
}

const TAILWIND: CssClasses = CssClasses {
    container: "crud-container",
    header: "crud-header",
    title: "crud-title",
    button_primary: "crud-btn-primary",
    button_secondary: "crud-btn-secondary",
    alert_success: "crud-alert-success",
    search_form: "crud-search",
    input: "crud-input",
    input_error: "crud-input-error",
    textarea: "crud-textarea",
    select: "crud-select",
    checkbox: "crud-checkbox",
    checkbox_group: "crud-checkbox-group",
    label: "crud-label",
    error: "crud-label-error",
    card: "crud-card",
    table: "crud-table",
    th: "crud-table-th",
    td: "crud-table-td",
    td_actions: "crud-table-td crud-table-actions",
    td_empty: "crud-table-td crud-table-empty",
    link: "crud-link",
    link_danger: "crud-link-danger",
    inline_form: "crud-inline-form",
    badge_success: "crud-badge-success",
    badge_danger: "crud-badge-danger",
    badge_primary: "crud-badge-primary",
    pagination: "crud-pagination",
    form: "crud-form",
    form_fields: "crud-form-fields",
    form_actions: "crud-form-actions",
    detail_list: "crud-detail-list",
    dt: "crud-detail-term",
    dd: "crud-detail-value",
};

const BOOTSTRAP: CssClasses = CssClasses {
    container: "container py-4",
    header: "d-flex justify-content-between align-items-center mb-4",
    title: "h3 mb-0",
    button_primary: "btn btn-primary",
    button_secondary: "btn btn-outline-secondary",
    alert_success: "alert alert-success",
    search_form: "d-flex gap-2 mb-3",
    input: "form-control",
    input_error: "is-invalid",
    textarea: "form-control",
    select: "form-select",
    checkbox: "form-check-input",
    checkbox_group: "form-check",
    label: "form-label",
    error: "invalid-feedback d-block",
    card: "card",
    table: "table table-striped mb-0",
    th: "",
    td: "",
    td_actions: "text-end",
    td_empty: "text-center text-muted",
    link: "btn btn-link btn-sm",
    link_danger: "btn btn-link btn-sm text-danger",
    inline_form: "d-inline",
    badge_success: "badge bg-success",
    badge_danger: "badge bg-danger",
    badge_primary: "badge bg-primary",
    pagination: "mt-3",
    form: "card-body",
    form_fields: "vstack gap-3",
    form_actions: "d-flex justify-content-end gap-2 mt-3",
    detail_list: "row card-body mb-0",
    dt: "col-sm-3",
    dd: "col-sm-9",
};

impl CssClasses {
    /// Class set for a framework
    #[must_use]
    pub const fn for_framework(framework: CssFramework) -> Self {
        match framework {
            CssFramework::Tailwind => TAILWIND,
            CssFramework::Bootstrap => BOOTSTRAP,
        }
    }

    fn insert_into(&self, placeholders: &mut Placeholders) {
        let entries = [
            ("css_container", self.container),
            ("css_header", self.header),
            ("css_title", self.title),
            ("css_button_primary", self.button_primary),
            ("css_button_secondary", self.button_secondary),
            ("css_alert_success", self.alert_success),
            ("css_search_form", self.search_form),
            ("css_input", self.input),
            ("css_card", self.card),
            ("css_table", self.table),
            ("css_td_actions", self.td_actions),
            ("css_td_empty", self.td_empty),
            ("css_link", self.link),
            ("css_link_danger", self.link_danger),
            ("css_inline_form", self.inline_form),
            ("css_pagination", self.pagination),
            ("css_form", self.form),
            ("css_form_fields", self.form_fields),
            ("css_form_actions", self.form_actions),
            ("css_detail_list", self.detail_list),
        ];
        for (key, value) in entries {
            placeholders.insert(key, value.to_string());
        }
    }
}

/// Renders the Blade view set; never used for API-only requests
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewsRenderer;

/// Field markup builder bound to one model variable and class set
struct Markup<'a> {
    variable: &'a str,
    css: CssClasses,
}

impl Markup<'_> {
    /// Column header with a sort toggle
    fn header(&self, column: &str, label: &str) -> String {
        format!(
            "<th class=\"{th}\"><a href=\"{{{{ request()->fullUrlWithQuery(['sort' => '{column}', 'direction' => request('direction') === 'asc' ? 'desc' : 'asc']) }}}}\" class=\"{link}\">{label}</a></th>",
            th = self.css.th,
            link = self.css.link,
        )
    }

    /// Read-only value shared by table cells and the detail listing
    fn display_value(&self, field: &Field, detailed: bool) -> String {
        let var = self.variable;
        let name = &field.name;
        match field.field_type {
            FieldType::Boolean => format!(
                "@if (${var}->{name})<span class=\"{}\">Yes</span>@else<span class=\"{}\">No</span>@endif",
                self.css.badge_success, self.css.badge_danger
            ),
            FieldType::Date => format!("{{{{ ${var}->{name}?->format('Y-m-d') }}}}"),
            FieldType::DateTime | FieldType::Timestamp => {
                format!("{{{{ ${var}->{name}?->format('Y-m-d H:i') }}}}")
            }
            FieldType::Text if !detailed => {
                format!("{{{{ \\Illuminate\\Support\\Str::limit(${var}->{name}, 50) }}}}")
            }
            FieldType::Text => format!("{{!! nl2br(e(${var}->{name})) !!}}"),
            FieldType::Json if !detailed => format!(
                "<code>{{{{ \\Illuminate\\Support\\Str::limit(json_encode(${var}->{name}), 30) }}}}</code>"
            ),
            FieldType::Json => format!("<pre>{{{{ json_encode(${var}->{name}, JSON_PRETTY_PRINT) }}}}</pre>"),
            FieldType::Enum => format!(
                "<span class=\"{}\">{{{{ ucfirst(${var}->{name}) }}}}</span>",
                self.css.badge_primary
            ),
            _ => format!("{{{{ ${var}->{name} }}}}"),
        }
    }

    fn cell(&self, field: &Field) -> String {
        format!("<td class=\"{}\">{}</td>", self.css.td, self.display_value(field, false))
    }

    fn detail(&self, field: &Field) -> String {
        format!(
            "<dt class=\"{}\">{}</dt>\n            <dd class=\"{}\">{}</dd>",
            self.css.dt,
            NameHelpers::label(&field.name),
            self.css.dd,
            self.display_value(field, true)
        )
    }

    /// Current value for repopulating an input, before `old()` is applied
    fn current_value(&self, field: &Field) -> String {
        let var = self.variable;
        let name = &field.name;
        match field.field_type {
            FieldType::Date => format!("${var}?->{name}?->format('Y-m-d')"),
            FieldType::DateTime | FieldType::Timestamp => {
                format!("${var}?->{name}?->format('Y-m-d\\TH:i')")
            }
            FieldType::Json => format!("${var} ? json_encode(${var}->{name}) : ''"),
            _ => format!("${var}?->{name}"),
        }
    }

    fn error_block(&self, name: &str) -> String {
        format!(
            "    @error('{name}')\n        <p class=\"{}\">{{{{ $message }}}}</p>\n    @enderror",
            self.css.error
        )
    }

    fn control_class(&self, base: &str, name: &str) -> String {
        format!("{base} @error('{name}') {} @enderror", self.css.input_error)
    }

    /// One labelled input block for the form partial
    fn input(&self, field: &Field, kind: InputKind) -> String {
        let name = &field.name;
        let label = NameHelpers::label(name);
        let required = if field.is_nullable() { "" } else { " required" };
        let old = format!("old('{name}', {})", self.current_value(field));

        let control = match kind {
            InputKind::Textarea => format!(
                "<textarea name=\"{name}\" id=\"{name}\" rows=\"4\" class=\"{}\"{required}>{{{{ {old} }}}}</textarea>",
                self.control_class(self.css.textarea, name)
            ),
            InputKind::Checkbox => {
                return format!(
                    "<div class=\"{group}\">\n    <input type=\"hidden\" name=\"{name}\" value=\"0\">\n    <input type=\"checkbox\" name=\"{name}\" id=\"{name}\" value=\"1\" class=\"{checkbox}\" {{{{ {old} ? 'checked' : '' }}}}>\n    <label for=\"{name}\" class=\"{label_class}\">{label}</label>\n{error}\n</div>",
                    group = self.css.checkbox_group,
                    checkbox = self.css.checkbox,
                    label_class = self.css.label,
                    error = self.error_block(name),
                );
            }
            InputKind::Select => {
                let values = if field.field_type == FieldType::Enum {
                    field.effective_enum_values()
                } else {
                    Vec::new()
                };
                let mut options = vec!["        <option value=\"\">Select...</option>".to_string()];
                options.extend(values.iter().map(|value| {
                    format!(
                        "        <option value=\"{value}\" {{{{ {old} === '{value}' ? 'selected' : '' }}}}>{}</option>",
                        NameHelpers::label(value)
                    )
                }));
                format!(
                    "<select name=\"{name}\" id=\"{name}\" class=\"{}\"{required}>\n{}\n    </select>",
                    self.control_class(self.css.select, name),
                    options.join("\n")
                )
            }
            InputKind::Password => format!(
                "<input type=\"password\" name=\"{name}\" id=\"{name}\" class=\"{}\"{required}>",
                self.control_class(self.css.input, name)
            ),
            other => {
                let step = if other == InputKind::Number { " step=\"any\"" } else { "" };
                format!(
                    "<input type=\"{other}\" name=\"{name}\" id=\"{name}\" value=\"{{{{ {old} }}}}\" class=\"{}\"{required}{step}>",
                    self.control_class(self.css.input, name)
                )
            }
        };

        format!(
            "<div>\n    <label for=\"{name}\" class=\"{}\">{label}</label>\n    {control}\n{}\n</div>",
            self.css.label,
            self.error_block(name)
        )
    }
}

impl ViewsRenderer {
    fn placeholders(ctx: &RenderContext<'_>, css: &CssClasses) -> Placeholders {
        let names = &ctx.names;
        let title = NameHelpers::label(&names.snake);
        let title_plural = NameHelpers::label(&NameHelpers::pluralize(&names.snake));

        let mut placeholders = Placeholders::from([
            ("title", title),
            ("title_plural_lower", title_plural.to_lowercase()),
            ("title_plural", title_plural),
            ("route_prefix", names.route_prefix.clone()),
            ("view_folder", names.view_folder.clone()),
            ("model_variable", names.variable.clone()),
            ("model_variable_plural", names.plural_variable.clone()),
        ]);
        css.insert_into(&mut placeholders);
        placeholders
    }

    /// Indent every line after the first
    fn indent_block(block: &str, indent: &str) -> String {
        block.replace('\n', &format!("\n{indent}"))
    }
}

impl Renderer for ViewsRenderer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Views
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<Vec<Artifact>> {
        let css = CssClasses::for_framework(ctx.config.css_framework);
        let markup = Markup {
            variable: &ctx.names.variable,
            css,
        };
        let fields = &ctx.request.fields;
        let mut placeholders = Self::placeholders(ctx, &css);

        let mut headers = vec![markup.header("id", "ID")];
        headers.extend(
            fields
                .iter()
                .map(|field| markup.header(&field.name, &NameHelpers::label(&field.name))),
        );
        headers.push(format!("<th class=\"{}\">Actions</th>", css.th));

        let mut cells = vec![format!(
            "<td class=\"{}\">{{{{ ${}->id }}}}</td>",
            css.td, ctx.names.variable
        )];
        cells.extend(fields.iter().map(|field| markup.cell(field)));

        let form_fields: Vec<String> = fields
            .iter()
            .map(|field| {
                let kind = ui_input_kind_with(field, &ctx.config.field_types);
                Self::indent_block(&markup.input(field, kind), "    ")
            })
            .collect();

        placeholders.insert("table_headers", headers.join("\n                    "));
        placeholders.insert("table_body", cells.join("\n                    "));
        placeholders.insert("column_count", (fields.len() + 2).to_string());
        placeholders.insert(
            "detail_fields",
            fields
                .iter()
                .map(|field| markup.detail(field))
                .collect::<Vec<_>>()
                .join("\n            "),
        );
        placeholders.insert("form_fields", form_fields.join("\n\n    "));

        let dir = ctx.config.path_for(ArtifactKind::Views).join(&ctx.names.view_folder);
        let model = &ctx.names.model;
        [
            ("views/index", "index", "Index view"),
            ("views/create", "create", "Create view"),
            ("views/edit", "edit", "Edit view"),
            ("views/show", "show", "Show view"),
            ("views/form", "_form", "Form partial"),
        ]
        .into_iter()
        .map(|(stub, file, description)| -> Result<Artifact> {
            let content = ctx.stubs.render(stub, &placeholders)?;
            Ok(Artifact::create(
                file_in(&dir, format!("{file}.blade.php")),
                content,
                format!("{description} for {model}"),
            ))
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{render_one, request};
    use super::*;
    use crate::config::CrudConfig;
    use std::path::PathBuf;

    fn render(fields: &str, config: &CrudConfig) -> Vec<Artifact> {
        let req = request("Post", fields, "");
        render_one(&ViewsRenderer, &req, config)
    }

    fn find<'a>(artifacts: &'a [Artifact], file: &str) -> &'a str {
        &artifacts
            .iter()
            .find(|artifact| artifact.path.ends_with(file))
            .unwrap()
            .content
    }

    #[test]
    fn test_view_set() {
        let artifacts = render("title:string", &CrudConfig::default());
        let paths: Vec<_> = artifacts.iter().map(|a| a.path.clone()).collect();
        assert_eq!(
            paths,
            [
                "resources/views/posts/index.blade.php",
                "resources/views/posts/create.blade.php",
                "resources/views/posts/edit.blade.php",
                "resources/views/posts/show.blade.php",
                "resources/views/posts/_form.blade.php",
            ]
            .map(PathBuf::from)
        );
    }

    #[test]
    fn test_index_columns() {
        let artifacts = render("title:string,active:boolean,body:text", &CrudConfig::default());
        let index = find(&artifacts, "index.blade.php");
        assert!(index.contains("@forelse ($posts as $post)"));
        assert!(index.contains("'sort' => 'title'"));
        assert!(index.contains(">Title</a></th>"));
        assert!(index.contains("<td class=\"crud-table-td\">{{ $post->title }}</td>"));
        assert!(index.contains("@if ($post->active)<span class=\"crud-badge-success\">Yes</span>"));
        assert!(index.contains("Str::limit($post->body, 50)"));
        assert!(index.contains("colspan=\"5\""));
        assert!(index.contains("{{ $posts->links() }}"));
        assert!(index.contains("No posts found."));
    }

    #[test]
    fn test_enum_select_options() {
        let artifacts = render("status:enum:pending:processing:completed", &CrudConfig::default());
        let form = find(&artifacts, "_form.blade.php");
        assert!(form.contains("<select name=\"status\" id=\"status\""));
        assert_eq!(form.matches("<option value=\"").count(), 4);
        assert!(form.contains("<option value=\"\">Select...</option>"));
        for value in ["pending", "processing", "completed"] {
            assert!(form.contains(&format!("<option value=\"{value}\"")));
        }
        let empty = form.find("<option value=\"\">").unwrap();
        let first = form.find("<option value=\"pending\"").unwrap();
        assert!(empty < first);
    }

    #[test]
    fn test_form_inputs() {
        let artifacts = render(
            "title:string,body:text:nullable,price:decimal,is_active:boolean,contact_email:string,published_at:datetime",
            &CrudConfig::default(),
        );
        let form = find(&artifacts, "_form.blade.php");
        assert!(form.contains("<input type=\"text\" name=\"title\" id=\"title\" value=\"{{ old('title', $post?->title) }}\""));
        assert!(form.contains("@error('title')"));
        assert!(form.contains("<textarea name=\"body\""));
        assert!(!form.contains("name=\"body\" id=\"body\" rows=\"4\" class=\"crud-textarea @error('body') crud-input-error @enderror\" required"));
        assert!(form.contains("type=\"number\" name=\"price\""));
        assert!(form.contains("step=\"any\""));
        assert!(form.contains("<input type=\"hidden\" name=\"is_active\" value=\"0\">"));
        assert!(form.contains("{{ old('is_active', $post?->is_active) ? 'checked' : '' }}"));
        assert!(form.contains("type=\"email\" name=\"contact_email\""));
        assert!(form.contains("type=\"datetime-local\" name=\"published_at\""));
        assert!(form.contains("$post?->published_at?->format('Y-m-d\\TH:i')"));
    }

    #[test]
    fn test_field_type_overrides() {
        let mut config = CrudConfig::default();
        config.field_types.insert("json".to_string(), InputKind::Textarea);
        let artifacts = render("meta:json", &config);
        assert!(find(&artifacts, "_form.blade.php").contains("<textarea name=\"meta\""));
    }

    #[test]
    fn test_show_and_create_views() {
        let artifacts = render("title:string,published_on:date", &CrudConfig::default());
        let show = find(&artifacts, "show.blade.php");
        assert!(show.contains("Post #{{ $post->id }}"));
        assert!(show.contains("<dt class=\"crud-detail-term\">Published on</dt>"));
        assert!(show.contains("{{ $post->published_on?->format('Y-m-d') }}"));

        let create = find(&artifacts, "create.blade.php");
        assert!(create.contains("action=\"{{ route('posts.store') }}\""));
        assert!(create.contains("@include('posts._form', ['post' => null])"));

        let edit = find(&artifacts, "edit.blade.php");
        assert!(edit.contains("@method('PUT')"));
        assert!(edit.contains("route('posts.update', $post)"));
    }

    #[test]
    fn test_bootstrap_classes() {
        let config = CrudConfig {
            css_framework: CssFramework::Bootstrap,
            ..CrudConfig::default()
        };
        let artifacts = render("title:string", &config);
        let index = find(&artifacts, "index.blade.php");
        assert!(index.contains("class=\"btn btn-primary\""));
        assert!(!index.contains("crud-"));
        assert!(find(&artifacts, "_form.blade.php").contains("form-control"));
    }
}

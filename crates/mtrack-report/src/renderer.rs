//! Report rendering.
//!
//! Uses Handlebars with a few report helpers:
//! - eq: block equality for conditionals
//! - default: fallback for null or missing values
//! - status_label: shop-floor label for a row status
//!
//! HTML templates are escaped, text templates are written raw.

use handlebars::{
    no_escape, Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
    Renderable,
};
use mtrack_core::MtrackError;
use serde::Serialize;

use crate::printable::PrintableReport;
use crate::templates::TemplatesFile;

/// Templates shipped with the crate
pub const BUILTIN_TEMPLATES: &str = include_str!("../../../templates/report-templates.yaml");

pub const HTML_TEMPLATE: &str = "report_html";
pub const TEXT_TEMPLATE: &str = "report_text";

/// Compiled renderer with registered helpers
pub struct ReportRenderer {
    html: Handlebars<'static>,
    text: Handlebars<'static>,
    templates: TemplatesFile,
}

fn registry(escape: bool) -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(false);
    if !escape {
        handlebars.register_escape_fn(no_escape);
    }
    handlebars.register_helper("eq", Box::new(EqHelper));
    handlebars.register_helper("default", Box::new(DefaultHelper));
    handlebars.register_helper("status_label", Box::new(StatusLabelHelper));
    handlebars
}

impl ReportRenderer {
    pub fn new(templates: TemplatesFile) -> Result<Self, MtrackError> {
        let mut html = registry(true);
        let mut text = registry(false);

        for (name, template) in &templates.templates {
            let target = if template.format == "html" { &mut html } else { &mut text };
            target
                .register_template_string(name, &template.template)
                .map_err(|e| MtrackError::TemplateError(format!("{}: {}", name, e)))?;
        }

        Ok(Self { html, text, templates })
    }

    pub fn load(path: &str) -> Result<Self, MtrackError> {
        Self::new(TemplatesFile::load(path)?)
    }

    pub fn builtin() -> Result<Self, MtrackError> {
        Self::new(TemplatesFile::from_yaml(BUILTIN_TEMPLATES)?)
    }

    /// Render a named template with any serialisable data.
    pub fn render<T: Serialize>(&self, template_name: &str, data: &T) -> Result<String, MtrackError> {
        let template = self
            .templates
            .get(template_name)
            .ok_or_else(|| MtrackError::NotFound(format!("template '{}'", template_name)))?;
        let registry = if template.format == "html" { &self.html } else { &self.text };

        registry
            .render(template_name, data)
            .map_err(|e| MtrackError::TemplateError(format!("{}: {}", template_name, e)))
    }

    pub fn render_html(&self, report: &PrintableReport) -> Result<String, MtrackError> {
        self.render(HTML_TEMPLATE, report)
    }

    pub fn render_text(&self, report: &PrintableReport) -> Result<String, MtrackError> {
        self.render(TEXT_TEMPLATE, report)
    }

    pub fn list_templates(&self) -> Vec<&str> {
        self.templates.list_templates()
    }
}

// ============================================================================
// Custom Helpers
// ============================================================================

/// Equality block helper: `{{#eq a b}}..{{else}}..{{/eq}}`
struct EqHelper;

impl HelperDef for EqHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let equal = match (h.param(0), h.param(1)) {
            (Some(left), Some(right)) => left.value() == right.value(),
            _ => false,
        };

        let branch = if equal { h.template() } else { h.inverse() };
        if let Some(template) = branch {
            template.render(r, ctx, rc, out)?;
        }
        Ok(())
    }
}

/// Default value helper
struct DefaultHelper;

impl HelperDef for DefaultHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let value = h.param(0).map(|v| v.value());
        let default = h.param(1).and_then(|v| v.value().as_str()).unwrap_or("");

        match value {
            Some(serde_json::Value::String(s)) if !s.is_empty() => out.write(s)?,
            Some(v) if !v.is_null() && !v.is_string() => out.write(&v.to_string())?,
            _ => out.write(default)?,
        }
        Ok(())
    }
}

/// pass → OK, fail → NG, idle → IDLE
struct StatusLabelHelper;

impl HelperDef for StatusLabelHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let status = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
        let label = match status {
            "pass" => "OK",
            "fail" => "NG",
            "idle" => "IDLE",
            other => other,
        };
        out.write(label)?;
        Ok(())
    }
}

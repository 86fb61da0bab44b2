//! Handlebars template rendering for invoice markup.
//!
//! Registers two arithmetic helpers used by invoice templates:
//!
//! | Helper | Arguments | Result |
//! |--------|-----------|--------|
//! | `row` | `base index amount` | `base + index * amount` |
//! | `sum` | `a b` | `a + b` |
//!
//! ```text
//! {{#each items}}<td>{{row 1 @index 1}}</td>{{/each}}
//! ```

use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderErrorReason,
};
use serde_json::Value;

use crate::core::{InvoicePdfError, Result};
use crate::document::TemplateRenderer;

/// [`TemplateRenderer`] backed by handlebars.
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlebarsRenderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_helper("row", Box::new(row_helper));
        registry.register_helper("sum", Box::new(sum_helper));
        Self { registry }
    }

    /// Access the registry to add partials or further helpers.
    pub fn registry_mut(&mut self) -> &mut Handlebars<'static> {
        &mut self.registry
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, template: &str, context: &Value) -> Result<String> {
        self.registry
            .render_template(template, context)
            .map_err(|e| InvoicePdfError::Template(e.to_string()))
    }
}

/// Row value: `base + index * amount`.
pub fn row_total(base: f64, index: f64, amount: f64) -> f64 {
    base + index * amount
}

pub fn sum(a: f64, b: f64) -> f64 {
    a + b
}

/// Integral values print without a fractional part.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn numeric_param(h: &Helper, index: usize) -> std::result::Result<f64, RenderErrorReason> {
    let param = h
        .param(index)
        .ok_or(RenderErrorReason::ParamNotFoundForIndex("numeric helper", index))?;
    match param.value() {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| {
        RenderErrorReason::Other(format!(
            "helper `{}` expects a number at position {index}, got {}",
            h.name(),
            param.value()
        ))
    })
}

fn row_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let base = numeric_param(h, 0)?;
    let index = numeric_param(h, 1)?;
    let amount = numeric_param(h, 2)?;
    out.write(&format_number(row_total(base, index, amount)))?;
    Ok(())
}

fn sum_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let a = numeric_param(h, 0)?;
    let b = numeric_param(h, 1)?;
    out.write(&format_number(sum(a, b)))?;
    Ok(())
}

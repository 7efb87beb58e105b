//! Writers for the JavaScript object literals emitted by the HTML plugin.
//!
//! Every object is written as a single `var name=...;` statement followed by
//! the plugin's newline sequence.

use std::borrow::Cow;
use std::io::Write;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::analysis::{ChartPluginInfo, Label};
use crate::error::RenderResult;

use super::plugin::PROPERTY_CHART_RENDER;
use super::{HtmlChart, HtmlChartPlugin};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PluginObject<'a> {
    id: &'a str,
    name_label: &'a Label,
}

/// Serializes `value` as JSON safe to embed inside a `<script>` element.
pub(crate) fn to_script_json<T: Serialize + ?Sized>(value: &T) -> RenderResult<String> {
    let json = serde_json::to_string(value)?;
    Ok(json.replace("</", "<\\/"))
}

/// Escapes `value` for a double-quoted HTML attribute.
pub(crate) fn escape_html_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '"', '\'', '<', '>']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 16);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

pub(crate) fn write_plugin_object<W: Write + ?Sized>(
    out: &mut W,
    plugin: &HtmlChartPlugin,
    var_name: &str,
    new_line: &str,
) -> RenderResult<()> {
    let object = to_script_json(&PluginObject {
        id: plugin.id(),
        name_label: plugin.name_label(),
    })?;
    write!(out, "var {var_name}={object};{new_line}")?;
    write!(
        out,
        "{var_name}.{PROPERTY_CHART_RENDER}={};{new_line}",
        plugin.chart_renderer().code()
    )?;
    Ok(())
}

pub(crate) fn write_render_context_object<W: Write + ?Sized>(
    out: &mut W,
    attributes_json: &str,
    var_name: &str,
    new_line: &str,
) -> RenderResult<()> {
    write!(
        out,
        "var {var_name}={{\"attributes\":{attributes_json}}};{new_line}"
    )?;
    Ok(())
}

/// Serializes render-context attributes ahead of writing, since the writer
/// and the attributes are borrowed from the same context.
pub(crate) fn render_context_attributes_json(
    attributes: &IndexMap<String, Value>,
) -> RenderResult<String> {
    to_script_json(attributes)
}

pub(crate) fn write_chart_object<W: Write + ?Sized>(
    out: &mut W,
    chart: &HtmlChart,
    render_context_var_name: &str,
    plugin_var_name: &str,
    new_line: &str,
) -> RenderResult<()> {
    write!(
        out,
        concat!(
            "var {var}={{\"id\":{id},\"elementId\":{element_id},\"varName\":{var_name},",
            "\"plugin\":{plugin_var_name},\"renderContext\":{render_context_var_name},",
            "\"propertyValues\":{property_values},\"chartDataSets\":{data_sets}}};{new_line}",
        ),
        var = chart.var_name(),
        id = to_script_json(chart.id())?,
        element_id = to_script_json(chart.element_id())?,
        var_name = to_script_json(chart.var_name())?,
        property_values = to_script_json(chart.property_values())?,
        data_sets = to_script_json(chart.chart_data_sets())?,
        plugin_var_name = plugin_var_name,
        render_context_var_name = render_context_var_name,
        new_line = new_line,
    )?;
    Ok(())
}

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::analysis::{
    ChartDataSet, ChartPlugin, ChartPluginInfo, Label, PropertyValues, RenderContext,
};
use crate::error::{RenderError, RenderResult};

use super::render_option::ResolvedRenderOption;
use super::script_writer;
use super::{HtmlChart, HtmlRenderContext};

/// Plugin-object property holding the [`JsChartRenderer`].
pub const PROPERTY_CHART_RENDER: &str = "chartRender";

/// Function the browser runtime calls on the chart renderer.
pub const RENDER_FUNCTION_NAME: &str = "render";

pub const HTML_NEW_LINE: &str = "\n";

/// Placeholder in a chart script replaced by the chart variable name.
pub const DEFAULT_SCRIPT_CHART_REF_PLACEHOLDER: &str = "$CHART";

/// JavaScript expression evaluating to the object that draws a chart, e.g.
/// `{ render: function(chart){ ... }, update: function(chart, results){ ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsChartRenderer {
    code: String,
}

impl JsChartRenderer {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Output formatting knobs of an [`HtmlChartPlugin`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlChartPluginConfig {
    #[serde(default = "default_element_tag_name")]
    pub element_tag_name: String,
    #[serde(default = "default_new_line")]
    pub new_line: String,
    #[serde(default = "default_chart_ref_placeholder")]
    pub chart_ref_placeholder: String,
}

impl Default for HtmlChartPluginConfig {
    fn default() -> Self {
        Self {
            element_tag_name: default_element_tag_name(),
            new_line: default_new_line(),
            chart_ref_placeholder: default_chart_ref_placeholder(),
        }
    }
}

impl HtmlChartPluginConfig {
    #[must_use]
    pub fn with_element_tag_name(mut self, element_tag_name: impl Into<String>) -> Self {
        self.element_tag_name = element_tag_name.into();
        self
    }

    #[must_use]
    pub fn with_new_line(mut self, new_line: impl Into<String>) -> Self {
        self.new_line = new_line.into();
        self
    }
}

fn default_element_tag_name() -> String {
    "div".to_owned()
}

fn default_new_line() -> String {
    HTML_NEW_LINE.to_owned()
}

fn default_chart_ref_placeholder() -> String {
    DEFAULT_SCRIPT_CHART_REF_PLACEHOLDER.to_owned()
}

/// Chart plugin writing an HTML element and an inline script.
///
/// Output, with every fragment enabled:
///
/// ```text
/// <div id="[element id]"></div>
/// <script type="text/javascript">
/// var [plugin var]={"id":"...","nameLabel":{...}};
/// [plugin var].chartRender=[chart renderer code];
/// var [context var]={"attributes":{...}};
/// var [chart var]={"id":"...","elementId":"...","varName":"...","plugin":[plugin var],"renderContext":[context var],"propertyValues":{...},"chartDataSets":[...]};
/// [chart script, $CHART replaced by chart var]
/// [plugin var].chartRender.render([chart var]);
/// </script>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlChartPlugin {
    id: String,
    name_label: Label,
    chart_renderer: JsChartRenderer,
    #[serde(default)]
    chart_script: Option<String>,
    #[serde(default)]
    config: HtmlChartPluginConfig,
}

impl HtmlChartPlugin {
    #[must_use]
    pub fn new(id: impl Into<String>, name_label: Label, chart_renderer: JsChartRenderer) -> Self {
        Self {
            id: id.into(),
            name_label,
            chart_renderer,
            chart_script: None,
            config: HtmlChartPluginConfig::default(),
        }
    }

    /// Attaches a per-chart script, e.g. `$CHART.update = function(results){ ... };`.
    #[must_use]
    pub fn with_chart_script(mut self, chart_script: impl Into<String>) -> Self {
        self.chart_script = Some(chart_script.into());
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: HtmlChartPluginConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn chart_renderer(&self) -> &JsChartRenderer {
        &self.chart_renderer
    }

    #[must_use]
    pub fn chart_script(&self) -> Option<&str> {
        self.chart_script.as_deref()
    }

    #[must_use]
    pub fn config(&self) -> &HtmlChartPluginConfig {
        &self.config
    }

    /// Completes the context's render option, generating missing identifiers
    /// and storing them back so later renders reuse them.
    fn resolve_option<W: Write>(
        &self,
        render_context: &mut HtmlRenderContext<W>,
    ) -> RenderResult<ResolvedRenderOption> {
        let mut option = render_context
            .render_option()
            .cloned()
            .unwrap_or_default();

        let has_element_id = option
            .chart_element_id
            .as_deref()
            .is_some_and(|id| !id.is_empty());
        if option.not_write_chart_element && !has_element_id {
            return Err(RenderError::MissingChartElementId);
        }

        let chart_element_id = non_empty_or_else(option.chart_element_id.take(), || {
            render_context.generate_chart_element_id()
        });
        let plugin_var_name = non_empty_or_else(option.plugin_var_name.take(), || {
            render_context.generate_chart_plugin_var_name()
        });
        let render_context_var_name =
            non_empty_or_else(option.render_context_var_name.take(), || {
                render_context.generate_render_context_var_name()
            });
        let chart_var_name = non_empty_or_else(option.chart_var_name.take(), || {
            render_context.generate_chart_var_name()
        });

        option.chart_element_id = Some(chart_element_id.clone());
        option.plugin_var_name = Some(plugin_var_name.clone());
        option.render_context_var_name = Some(render_context_var_name.clone());
        option.chart_var_name = Some(chart_var_name.clone());

        let resolved = ResolvedRenderOption {
            chart_element_id,
            plugin_var_name,
            render_context_var_name,
            chart_var_name,
            not_write_chart_element: option.not_write_chart_element,
            not_write_plugin_object: option.not_write_plugin_object,
            not_write_render_context_object: option.not_write_render_context_object,
            not_write_chart_object: option.not_write_chart_object,
            not_write_script_tag: option.not_write_script_tag,
            not_write_invoke: option.not_write_invoke,
        };
        debug!(
            chart_plugin_id = %self.id,
            chart_element_id = %resolved.chart_element_id,
            chart_var_name = %resolved.chart_var_name,
            "resolved html chart render option"
        );
        render_context.set_render_option(option);
        Ok(resolved)
    }

    fn write_chart_element<W: Write>(
        &self,
        out: &mut W,
        option: &ResolvedRenderOption,
    ) -> RenderResult<()> {
        if option.not_write_chart_element {
            return Ok(());
        }
        let tag = &self.config.element_tag_name;
        write!(
            out,
            "<{tag} id=\"{}\"></{tag}>{}",
            script_writer::escape_html_attribute(&option.chart_element_id),
            self.config.new_line
        )?;
        Ok(())
    }

    fn write_script<W: Write>(
        &self,
        render_context: &mut HtmlRenderContext<W>,
        chart: &HtmlChart,
        option: &ResolvedRenderOption,
    ) -> RenderResult<()> {
        let new_line = self.config.new_line.as_str();
        let attributes_json = if option.not_write_render_context_object {
            None
        } else {
            Some(script_writer::render_context_attributes_json(
                render_context.attributes(),
            )?)
        };
        let out = render_context.writer_mut();

        if !option.not_write_script_tag {
            write!(out, "<script type=\"text/javascript\">{new_line}")?;
        }

        if !option.not_write_plugin_object {
            trace!(plugin_var_name = %option.plugin_var_name, "write plugin object");
            script_writer::write_plugin_object(out, self, &option.plugin_var_name, new_line)?;
        }

        if let Some(attributes_json) = attributes_json {
            trace!(
                render_context_var_name = %option.render_context_var_name,
                "write render context object"
            );
            script_writer::write_render_context_object(
                out,
                &attributes_json,
                &option.render_context_var_name,
                new_line,
            )?;
        }

        if !option.not_write_chart_object {
            trace!(chart_var_name = %chart.var_name(), "write chart object");
            script_writer::write_chart_object(
                out,
                chart,
                &option.render_context_var_name,
                &option.plugin_var_name,
                new_line,
            )?;
            if let Some(chart_script) = &self.chart_script {
                let script =
                    chart_script.replace(&self.config.chart_ref_placeholder, chart.var_name());
                write!(out, "{script}{new_line}")?;
            }
        }

        if !option.not_write_invoke {
            write!(
                out,
                "{}.{PROPERTY_CHART_RENDER}.{RENDER_FUNCTION_NAME}({});{new_line}",
                option.plugin_var_name,
                chart.var_name()
            )?;
        }

        if !option.not_write_script_tag {
            write!(out, "</script>{new_line}")?;
        }
        Ok(())
    }
}

fn non_empty_or_else(value: Option<String>, generate: impl FnOnce() -> String) -> String {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => generate(),
    }
}

impl ChartPluginInfo for HtmlChartPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn name_label(&self) -> &Label {
        &self.name_label
    }
}

impl<W: Write> ChartPlugin<HtmlRenderContext<W>> for HtmlChartPlugin {
    type Chart = HtmlChart;

    fn render_chart(
        &self,
        render_context: &mut HtmlRenderContext<W>,
        property_values: PropertyValues,
        data_sets: &[ChartDataSet],
    ) -> RenderResult<HtmlChart> {
        let option = self.resolve_option(render_context)?;
        let chart = HtmlChart::new(
            self.id.clone(),
            property_values,
            data_sets.to_vec(),
            option.chart_element_id.clone(),
            option.chart_var_name.clone(),
        );

        self.write_chart_element(render_context.writer_mut(), &option)?;
        self.write_script(render_context, &chart, &option)?;
        Ok(chart)
    }
}

use serde::{Deserialize, Serialize};

/// Controls which fragments an [`super::HtmlChartPlugin`] writes and which
/// identifiers it uses.
///
/// The option lives on the render context. Identifiers left unset are
/// generated on the first render and written back, so later renders in the
/// same context reuse them. Install a fresh option (or call
/// [`super::HtmlRenderContext::clear_render_option`]) before rendering a
/// different chart into the same page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlChartPluginRenderOption {
    #[serde(default)]
    pub chart_element_id: Option<String>,
    #[serde(default)]
    pub plugin_var_name: Option<String>,
    #[serde(default)]
    pub render_context_var_name: Option<String>,
    #[serde(default)]
    pub chart_var_name: Option<String>,
    #[serde(default)]
    pub not_write_chart_element: bool,
    #[serde(default)]
    pub not_write_plugin_object: bool,
    #[serde(default)]
    pub not_write_render_context_object: bool,
    #[serde(default)]
    pub not_write_chart_object: bool,
    #[serde(default)]
    pub not_write_script_tag: bool,
    #[serde(default)]
    pub not_write_invoke: bool,
}

impl HtmlChartPluginRenderOption {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_chart_element_id(mut self, chart_element_id: impl Into<String>) -> Self {
        self.chart_element_id = Some(chart_element_id.into());
        self
    }

    #[must_use]
    pub fn with_plugin_var_name(mut self, plugin_var_name: impl Into<String>) -> Self {
        self.plugin_var_name = Some(plugin_var_name.into());
        self
    }

    #[must_use]
    pub fn with_render_context_var_name(
        mut self,
        render_context_var_name: impl Into<String>,
    ) -> Self {
        self.render_context_var_name = Some(render_context_var_name.into());
        self
    }

    #[must_use]
    pub fn with_chart_var_name(mut self, chart_var_name: impl Into<String>) -> Self {
        self.chart_var_name = Some(chart_var_name.into());
        self
    }

    #[must_use]
    pub fn with_not_write_chart_element(mut self, value: bool) -> Self {
        self.not_write_chart_element = value;
        self
    }

    #[must_use]
    pub fn with_not_write_plugin_object(mut self, value: bool) -> Self {
        self.not_write_plugin_object = value;
        self
    }

    #[must_use]
    pub fn with_not_write_render_context_object(mut self, value: bool) -> Self {
        self.not_write_render_context_object = value;
        self
    }

    #[must_use]
    pub fn with_not_write_chart_object(mut self, value: bool) -> Self {
        self.not_write_chart_object = value;
        self
    }

    #[must_use]
    pub fn with_not_write_script_tag(mut self, value: bool) -> Self {
        self.not_write_script_tag = value;
        self
    }

    #[must_use]
    pub fn with_not_write_invoke(mut self, value: bool) -> Self {
        self.not_write_invoke = value;
        self
    }

    /// Option that writes nothing; useful when only the chart handle is wanted.
    #[must_use]
    pub fn write_nothing(chart_element_id: impl Into<String>) -> Self {
        Self {
            chart_element_id: Some(chart_element_id.into()),
            not_write_chart_element: true,
            not_write_plugin_object: true,
            not_write_render_context_object: true,
            not_write_chart_object: true,
            not_write_script_tag: true,
            not_write_invoke: true,
            ..Self::default()
        }
    }
}

/// Option whose identifiers are all resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedRenderOption {
    pub chart_element_id: String,
    pub plugin_var_name: String,
    pub render_context_var_name: String,
    pub chart_var_name: String,
    pub not_write_chart_element: bool,
    pub not_write_plugin_object: bool,
    pub not_write_render_context_object: bool,
    pub not_write_chart_object: bool,
    pub not_write_script_tag: bool,
    pub not_write_invoke: bool,
}

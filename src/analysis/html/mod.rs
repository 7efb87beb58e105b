//! HTML/JavaScript render target.

mod chart;
mod plugin;
mod render_context;
mod render_option;
mod script_writer;

pub use chart::HtmlChart;
pub use plugin::{
    DEFAULT_SCRIPT_CHART_REF_PLACEHOLDER, HTML_NEW_LINE, HtmlChartPlugin, HtmlChartPluginConfig,
    JsChartRenderer, PROPERTY_CHART_RENDER, RENDER_FUNCTION_NAME,
};
pub use render_context::HtmlRenderContext;
pub use render_option::HtmlChartPluginRenderOption;

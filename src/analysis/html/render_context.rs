use std::io::Write;

use indexmap::IndexMap;
use serde_json::Value;
use uuid::Uuid;

use crate::analysis::RenderContext;

use super::HtmlChartPluginRenderOption;

const CHART_ELEMENT_ID_PREFIX: &str = "dataGearChartElement";
const CHART_PLUGIN_VAR_NAME_PREFIX: &str = "dataGearChartPlugin";
const RENDER_CONTEXT_VAR_NAME_PREFIX: &str = "dataGearRenderContext";
const CHART_VAR_NAME_PREFIX: &str = "dataGearChart";

const PAGE_ID_LEN: usize = 8;

/// Render context writing HTML/JavaScript to `W`.
///
/// Generated identifiers combine a per-context page id with a per-context
/// sequence, so charts from different contexts can share one page.
#[derive(Debug)]
pub struct HtmlRenderContext<W> {
    writer: W,
    attributes: IndexMap<String, Value>,
    render_option: Option<HtmlChartPluginRenderOption>,
    page_id: String,
    sequence: u64,
}

impl<W: Write> HtmlRenderContext<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        let page_id = Uuid::new_v4().simple().to_string()[..PAGE_ID_LEN].to_owned();
        Self::with_page_id(writer, page_id)
    }

    /// Uses a fixed page id, making generated identifiers deterministic.
    #[must_use]
    pub fn with_page_id(writer: W, page_id: impl Into<String>) -> Self {
        Self {
            writer,
            attributes: IndexMap::new(),
            render_option: None,
            page_id: page_id.into(),
            sequence: 0,
        }
    }

    #[must_use]
    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    #[must_use]
    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    #[must_use]
    pub fn render_option(&self) -> Option<&HtmlChartPluginRenderOption> {
        self.render_option.as_ref()
    }

    pub fn set_render_option(&mut self, option: HtmlChartPluginRenderOption) {
        self.render_option = Some(option);
    }

    pub fn clear_render_option(&mut self) -> Option<HtmlChartPluginRenderOption> {
        self.render_option.take()
    }

    pub fn generate_chart_element_id(&mut self) -> String {
        self.next_name(CHART_ELEMENT_ID_PREFIX)
    }

    pub fn generate_chart_plugin_var_name(&mut self) -> String {
        self.next_name(CHART_PLUGIN_VAR_NAME_PREFIX)
    }

    pub fn generate_render_context_var_name(&mut self) -> String {
        self.next_name(RENDER_CONTEXT_VAR_NAME_PREFIX)
    }

    pub fn generate_chart_var_name(&mut self) -> String {
        self.next_name(CHART_VAR_NAME_PREFIX)
    }

    fn next_name(&mut self, prefix: &str) -> String {
        let name = format!("{prefix}{}{}", self.page_id, self.sequence);
        self.sequence += 1;
        name
    }
}

impl<W> RenderContext for HtmlRenderContext<W> {
    fn attributes(&self) -> &IndexMap<String, Value> {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut IndexMap<String, Value> {
        &mut self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_are_unique_within_a_context() {
        let mut context = HtmlRenderContext::with_page_id(Vec::new(), "p1");
        let element_id = context.generate_chart_element_id();
        let chart_var = context.generate_chart_var_name();
        let other_chart_var = context.generate_chart_var_name();

        assert_eq!(element_id, "dataGearChartElementp10");
        assert_eq!(chart_var, "dataGearChartp11");
        assert_ne!(chart_var, other_chart_var);
    }

    #[test]
    fn page_ids_differ_between_contexts() {
        let first = HtmlRenderContext::new(Vec::new());
        let second = HtmlRenderContext::new(Vec::new());
        assert_eq!(first.page_id().len(), PAGE_ID_LEN);
        assert_ne!(first.page_id(), second.page_id());
    }
}

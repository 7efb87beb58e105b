use uuid::Uuid;

use crate::analysis::{ChartDataSet, PropertyValues};

/// One rendered chart instance, as produced by [`super::HtmlChartPlugin`].
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlChart {
    id: String,
    plugin_id: String,
    property_values: PropertyValues,
    chart_data_sets: Vec<ChartDataSet>,
    element_id: String,
    var_name: String,
}

impl HtmlChart {
    pub(crate) fn new(
        plugin_id: impl Into<String>,
        property_values: PropertyValues,
        chart_data_sets: Vec<ChartDataSet>,
        element_id: impl Into<String>,
        var_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            plugin_id: plugin_id.into(),
            property_values,
            chart_data_sets,
            element_id: element_id.into(),
            var_name: var_name.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    #[must_use]
    pub fn property_values(&self) -> &PropertyValues {
        &self.property_values
    }

    #[must_use]
    pub fn chart_data_sets(&self) -> &[ChartDataSet] {
        &self.chart_data_sets
    }

    #[must_use]
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    #[must_use]
    pub fn var_name(&self) -> &str {
        &self.var_name
    }
}

//! Chart definitions and the plugin contract used to render them.
//!
//! A [`ChartWidget`] owns what a chart *is* (name, refresh interval, property
//! values, data sets). A [`ChartPlugin`] owns how it is *drawn* into a given
//! [`RenderContext`]. The HTML target lives in [`html`].

mod chart_widget;
pub mod html;
mod plugin_manager;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RenderResult;

pub use chart_widget::{
    CHART_PROPERTY_VALUE_NAME, CHART_PROPERTY_VALUE_UPDATE_INTERVAL, ChartWidget, UpdateMode,
};
pub use plugin_manager::ChartPluginManager;

/// Free-form chart property values, kept in insertion order.
pub type PropertyValues = IndexMap<String, Value>;

/// Display text with optional per-locale variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub value: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub locale_values: IndexMap<String, String>,
}

impl Label {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            locale_values: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_locale_value(
        mut self,
        locale: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.locale_values.insert(locale.into(), value.into());
        self
    }

    /// Returns the text for `locale`, falling back to the default value.
    #[must_use]
    pub fn value_for(&self, locale: &str) -> &str {
        self.locale_values
            .get(locale)
            .map_or(self.value.as_str(), String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    String,
    Number,
    Integer,
    Decimal,
    Boolean,
    Date,
    Time,
    Timestamp,
    Unknown,
}

/// A column declared by a chart data set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSetProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: DataType,
}

impl DataSetProperty {
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// How temporal result values are handed to the chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TemporalValueType {
    /// Formatted text using the paired pattern.
    #[default]
    String,
    /// Milliseconds since the Unix epoch.
    Number,
    /// Passed through as queried.
    #[serde(rename = "NONE")]
    Keep,
}

fn default_date_format() -> String {
    "yyyy-MM-dd".to_owned()
}

fn default_time_format() -> String {
    "HH:mm:ss".to_owned()
}

fn default_timestamp_format() -> String {
    "yyyy-MM-dd HH:mm:ss".to_owned()
}

/// Formatting hint for the date, time and timestamp columns of a data set
/// result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDataFormat {
    #[serde(default)]
    pub date_type: TemporalValueType,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub time_type: TemporalValueType,
    #[serde(default = "default_time_format")]
    pub time_format: String,
    #[serde(default)]
    pub timestamp_type: TemporalValueType,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

impl Default for ResultDataFormat {
    fn default() -> Self {
        Self {
            date_type: TemporalValueType::default(),
            date_format: default_date_format(),
            time_type: TemporalValueType::default(),
            time_format: default_time_format(),
            timestamp_type: TemporalValueType::default(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

impl ResultDataFormat {
    #[must_use]
    pub fn with_date(mut self, value_type: TemporalValueType, format: impl Into<String>) -> Self {
        self.date_type = value_type;
        self.date_format = format.into();
        self
    }

    #[must_use]
    pub fn with_time(mut self, value_type: TemporalValueType, format: impl Into<String>) -> Self {
        self.time_type = value_type;
        self.time_format = format.into();
        self
    }

    #[must_use]
    pub fn with_timestamp(
        mut self,
        value_type: TemporalValueType,
        format: impl Into<String>,
    ) -> Self {
        self.timestamp_type = value_type;
        self.timestamp_format = format.into();
        self
    }
}

/// A data set bound to a chart, plus the parameter values used to query it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub properties: Vec<DataSetProperty>,
    #[serde(default)]
    pub param_values: PropertyValues,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_data_format: Option<ResultDataFormat>,
}

impl ChartDataSet {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            properties: Vec::new(),
            param_values: PropertyValues::new(),
            result_data_format: None,
        }
    }

    #[must_use]
    pub fn with_property(mut self, property: DataSetProperty) -> Self {
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn with_param_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.param_values.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_result_data_format(mut self, result_data_format: ResultDataFormat) -> Self {
        self.result_data_format = Some(result_data_format);
        self
    }
}

/// Target a chart is rendered into.
///
/// Attributes are exposed to the rendered chart; implementations decide how
/// (the HTML context serializes them into the render-context script object).
pub trait RenderContext {
    fn attributes(&self) -> &IndexMap<String, Value>;

    fn attributes_mut(&mut self) -> &mut IndexMap<String, Value>;

    fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes().get(name)
    }

    fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value>
    where
        Self: Sized,
    {
        self.attributes_mut().insert(name.into(), value.into())
    }

    fn remove_attribute(&mut self, name: &str) -> Option<Value> {
        self.attributes_mut().shift_remove(name)
    }
}

/// Identity shared by every chart plugin regardless of render target.
pub trait ChartPluginInfo {
    fn id(&self) -> &str;

    fn name_label(&self) -> &Label;
}

/// Renders chart state into one kind of [`RenderContext`].
pub trait ChartPlugin<C: RenderContext + ?Sized>: ChartPluginInfo {
    /// Handle describing the rendered chart instance.
    type Chart;

    fn render_chart(
        &self,
        render_context: &mut C,
        property_values: PropertyValues,
        data_sets: &[ChartDataSet],
    ) -> RenderResult<Self::Chart>;
}

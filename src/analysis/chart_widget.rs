use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{RenderError, RenderResult};

use super::{
    ChartDataSet, ChartPlugin, ChartPluginInfo, ChartPluginManager, PropertyValues, RenderContext,
};

/// Property key carrying the widget name.
pub const CHART_PROPERTY_VALUE_NAME: &str = "name";

/// Property key carrying the widget update interval.
pub const CHART_PROPERTY_VALUE_UPDATE_INTERVAL: &str = "updateInterval";

const NO_UPDATE_INTERVAL: i32 = -1;

/// Typed view of a widget update interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Rendered once, never refreshed.
    Never,
    Realtime,
    Every(Duration),
}

impl UpdateMode {
    #[must_use]
    pub fn from_interval(update_interval: i32) -> Self {
        match update_interval {
            i32::MIN..=-1 => Self::Never,
            0 => Self::Realtime,
            millis => Self::Every(Duration::from_millis(u64::from(millis.unsigned_abs()))),
        }
    }
}

/// A named chart definition bound to the plugin that draws it.
///
/// Rendering never touches the stored property values: every call builds a
/// fresh snapshot with the built-in `name`/`updateInterval` entries merged in,
/// so one widget can be rendered for many requests at once.
pub struct ChartWidget<P: ?Sized> {
    id: String,
    name: String,
    chart_plugin: Option<Arc<P>>,
    chart_property_values: PropertyValues,
    chart_data_sets: Vec<ChartDataSet>,
    update_interval: i32,
}

impl<P: ?Sized> ChartWidget<P> {
    /// Creates an unbound widget; set a plugin before rendering.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            chart_plugin: None,
            chart_property_values: PropertyValues::new(),
            chart_data_sets: Vec::new(),
            update_interval: NO_UPDATE_INTERVAL,
        }
    }

    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        chart_plugin: Arc<P>,
        chart_data_sets: Vec<ChartDataSet>,
    ) -> Self {
        Self {
            name: name.into(),
            chart_plugin: Some(chart_plugin),
            chart_data_sets,
            ..Self::with_id(id)
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub fn chart_plugin(&self) -> Option<&Arc<P>> {
        self.chart_plugin.as_ref()
    }

    pub fn set_chart_plugin(&mut self, chart_plugin: Option<Arc<P>>) {
        self.chart_plugin = chart_plugin;
    }

    /// Binds the plugin registered under `chart_plugin_id`.
    ///
    /// Returns `false` and leaves the widget unbound when no such plugin exists.
    pub fn set_chart_plugin_from(
        &mut self,
        manager: &ChartPluginManager<P>,
        chart_plugin_id: &str,
    ) -> bool
    where
        P: ChartPluginInfo,
    {
        self.chart_plugin = manager.get(chart_plugin_id);
        if self.chart_plugin.is_none() {
            warn!(
                widget_id = %self.id,
                chart_plugin_id,
                "chart plugin not registered; widget left unbound"
            );
        }
        self.chart_plugin.is_some()
    }

    #[must_use]
    pub fn chart_property_values(&self) -> &PropertyValues {
        &self.chart_property_values
    }

    pub fn set_chart_property_values(&mut self, chart_property_values: PropertyValues) {
        self.chart_property_values = chart_property_values;
    }

    pub fn add_chart_property_value(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.chart_property_values.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn chart_data_sets(&self) -> &[ChartDataSet] {
        &self.chart_data_sets
    }

    pub fn set_chart_data_sets(&mut self, chart_data_sets: Vec<ChartDataSet>) {
        self.chart_data_sets = chart_data_sets;
    }

    /// Update interval in milliseconds: `<0` never, `0` realtime, `>0` period.
    #[must_use]
    pub fn update_interval(&self) -> i32 {
        self.update_interval
    }

    pub fn set_update_interval(&mut self, update_interval: i32) {
        self.update_interval = update_interval;
    }

    #[must_use]
    pub fn update_mode(&self) -> UpdateMode {
        UpdateMode::from_interval(self.update_interval)
    }

    /// Property values as the plugin will see them on the next render.
    #[must_use]
    pub fn effective_property_values(&self) -> PropertyValues {
        let mut values = self.chart_property_values.clone();
        values.insert(
            CHART_PROPERTY_VALUE_NAME.to_owned(),
            Value::from(self.name.as_str()),
        );
        values.insert(
            CHART_PROPERTY_VALUE_UPDATE_INTERVAL.to_owned(),
            Value::from(self.update_interval),
        );
        values
    }

    pub fn render<C>(&self, render_context: &mut C) -> RenderResult<P::Chart>
    where
        C: RenderContext + ?Sized,
        P: ChartPlugin<C>,
    {
        let plugin = self
            .chart_plugin
            .as_ref()
            .ok_or_else(|| RenderError::PluginNotSet {
                widget_id: self.id.clone(),
            })?;

        debug!(
            widget_id = %self.id,
            chart_plugin_id = plugin.id(),
            data_sets = self.chart_data_sets.len(),
            "render chart widget"
        );
        plugin.render_chart(
            render_context,
            self.effective_property_values(),
            &self.chart_data_sets,
        )
    }
}

impl<P: ?Sized> Clone for ChartWidget<P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            chart_plugin: self.chart_plugin.clone(),
            chart_property_values: self.chart_property_values.clone(),
            chart_data_sets: self.chart_data_sets.clone(),
            update_interval: self.update_interval,
        }
    }
}

impl<P: ?Sized> fmt::Debug for ChartWidget<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartWidget")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("has_chart_plugin", &self.chart_plugin.is_some())
            .field("chart_property_values", &self.chart_property_values)
            .field("chart_data_sets", &self.chart_data_sets)
            .field("update_interval", &self.update_interval)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_mode_follows_interval_sign() {
        assert_eq!(UpdateMode::from_interval(-1), UpdateMode::Never);
        assert_eq!(UpdateMode::from_interval(i32::MIN), UpdateMode::Never);
        assert_eq!(UpdateMode::from_interval(0), UpdateMode::Realtime);
        assert_eq!(
            UpdateMode::from_interval(5000),
            UpdateMode::Every(Duration::from_millis(5000))
        );
    }

    #[test]
    fn new_widget_never_updates() {
        let widget = ChartWidget::<dyn ChartPluginInfo>::with_id("w1");
        assert_eq!(widget.update_interval(), -1);
        assert_eq!(widget.name(), "");
        assert!(widget.chart_plugin().is_none());
    }
}

use std::sync::Arc;

use datagear::analysis::html::{
    HtmlChartPlugin, HtmlChartPluginRenderOption, HtmlRenderContext, JsChartRenderer,
};
use datagear::analysis::{ChartWidget, Label, PropertyValues};
use proptest::prelude::*;
use serde_json::Value;

fn widget(
    name: &str,
    update_interval: i32,
    values: PropertyValues,
) -> ChartWidget<HtmlChartPlugin> {
    let plugin = HtmlChartPlugin::new("bar", Label::new("Bar"), JsChartRenderer::new("{}"));
    let mut widget = ChartWidget::new("w1", name, Arc::new(plugin), Vec::new());
    widget.set_update_interval(update_interval);
    widget.set_chart_property_values(values);
    widget
}

fn property_values() -> impl Strategy<Value = PropertyValues> {
    prop::collection::vec(
        (
            prop_oneof![
                Just("name".to_owned()),
                Just("updateInterval".to_owned()),
                "[a-z]{1,8}",
            ],
            prop_oneof![
                any::<i64>().prop_map(Value::from),
                "[ -~]{0,12}".prop_map(Value::from),
                any::<bool>().prop_map(Value::from),
            ],
        ),
        0..8,
    )
    .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    #[test]
    fn rendered_values_always_carry_builtins(
        name in "[a-zA-Z ]{0,16}",
        update_interval in any::<i32>(),
        values in property_values()
    ) {
        let widget = widget(&name, update_interval, values.clone());
        let mut context = HtmlRenderContext::new(Vec::new());

        let chart = widget.render(&mut context).expect("render");

        prop_assert_eq!(&chart.property_values()["name"], &Value::from(name.as_str()));
        prop_assert_eq!(&chart.property_values()["updateInterval"], &Value::from(update_interval));
        for (key, value) in &values {
            if key != "name" && key != "updateInterval" {
                prop_assert_eq!(&chart.property_values()[key.as_str()], value);
            }
        }
        prop_assert_eq!(widget.chart_property_values(), &values);
    }

    #[test]
    fn renders_in_one_context_share_identifiers(renders in 2usize..6) {
        let widget = widget("sales", 1000, PropertyValues::new());
        let mut context = HtmlRenderContext::new(Vec::new());

        let first = widget.render(&mut context).expect("first render");
        for _ in 1..renders {
            let next = widget.render(&mut context).expect("render");
            prop_assert_eq!(next.element_id(), first.element_id());
            prop_assert_eq!(next.var_name(), first.var_name());
        }
    }

    #[test]
    fn suppressing_every_fragment_writes_nothing(element_id in "[a-z][a-z0-9]{0,10}") {
        let widget = widget("sales", -1, PropertyValues::new());
        let mut context = HtmlRenderContext::new(Vec::new());
        context.set_render_option(HtmlChartPluginRenderOption::write_nothing(element_id.clone()));

        let chart = widget.render(&mut context).expect("render");

        prop_assert_eq!(chart.element_id(), element_id.as_str());
        prop_assert!(context.into_writer().is_empty());
    }
}

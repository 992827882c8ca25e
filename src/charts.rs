//! The pie chart of expenses per category.
//!
//! The chart is generated as JSON configuration for the ECharts library and
//! rendered with an HTML container, a legend and JavaScript initialization code.

use charming::{
    Chart,
    datatype::DataPointItem,
    element::{Color, JsFunction, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};

use crate::{aggregation::CategoryTotal, html::HeadElement};

/// The URL of the ECharts library.
pub const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The HTML element ID of the chart container.
pub const CATEGORY_CHART_ID: &str = "category-chart";

const PALETTE: [&str; 20] = [
    "#3498db", "#e74c3c", "#f1c40f", "#9b59b6", "#16a085", "#e67e22", "#2ecc71", "#1abc9c",
    "#34495e", "#8e44ad", "#d35400", "#c0392b", "#27ae60", "#2980b9", "#7f8c8d", "#95a5a6",
    "#f39c12", "#8e44ad", "#2c3e50", "#bdc3c7",
];

/// The colour of the `index`-th category.
///
/// The first twenty come from a fixed palette, after that the hue is rotated
/// around the colour wheel.
pub fn category_color(index: usize) -> String {
    match PALETTE.get(index) {
        Some(color) => (*color).to_owned(),
        None => format!("hsl({}, 70%, 55%)", (index * 37) % 360),
    }
}

/// A legend entry: the category, its colour and its share of the total.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub name: String,
    pub color: String,
    pub percent: i64,
}

/// The legend entries for `category_totals`, in the same order.
pub fn legend_items(category_totals: &[CategoryTotal], total: f64) -> Vec<LegendItem> {
    category_totals
        .iter()
        .enumerate()
        .map(|(index, category)| LegendItem {
            name: category.name.clone(),
            color: category_color(index),
            percent: category.percent_of(total),
        })
        .collect()
}

/// The ECharts configuration for a pie chart of `category_totals`.
pub fn category_chart(category_totals: &[CategoryTotal]) -> Chart {
    let colors = (0..category_totals.len())
        .map(|index| Color::from(category_color(index).as_str()))
        .collect();

    let data: Vec<DataPointItem> = category_totals
        .iter()
        .map(|category| DataPointItem::new(category.value).name(category.name.clone()))
        .collect();

    Chart::new()
        .color(colors)
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .series(
            Pie::new()
                .name("Expenses by category")
                .radius("70%")
                .data(data),
        )
}

fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "return Number(number).toLocaleString() + ' ₪';",
    )
}

/// Renders the chart container next to its legend.
pub fn category_chart_view(legend: &[LegendItem]) -> Markup {
    html!(
        div class="flex flex-col md:flex-row gap-4"
        {
            div
                id=(CATEGORY_CHART_ID)
                class="flex-1 min-h-[350px] rounded dark:bg-gray-100"
            {}

            ul class="md:w-60 flex flex-col gap-1.5 text-sm font-semibold"
            {
                @for item in legend {
                    li class="flex items-center gap-2"
                    {
                        span
                            class="inline-block w-3.5 h-3.5 rounded-sm"
                            style=(format!("background-color: {}", item.color))
                        {}

                        span { (item.name) " - " (item.percent) "%" }
                    }
                }
            }
        }
    )
}

/// Generates the JavaScript that initializes the chart.
///
/// The chart follows the system dark mode setting and resizes with the window.
pub fn category_chart_script(chart: &Chart) -> HeadElement {
    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chartDom = document.getElementById("{CATEGORY_CHART_ID}");
            if (!chartDom) {{
                return;
            }}
            const chart = echarts.init(chartDom);
            const option = {};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
            }};
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }});"#,
        chart
    );

    HeadElement::ScriptSource(PreEscaped(script))
}

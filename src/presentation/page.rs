// Server-side page rendering: dashboard view -> HTML with an inline SVG chart
use crate::application::view_renderer::DashboardRenderer;
use crate::domain::chart::{ChartView, LegendEntry};
use crate::domain::dashboard::{Dashboard, FetchState};
use serde::Serialize;
use tera::{Context, Tera};

const PAGE_TEMPLATE: &str = "dashboard.html";
const BODY_TEMPLATE: &str = "dashboard_body.html";

const CHART_WIDTH: f64 = 800.0;
const CHART_HEIGHT: f64 = 400.0;
const PLOT_TOP: f64 = 20.0;
const PLOT_LEFT: f64 = 30.0;
/// Share of each bar slot taken by the bar itself.
const BAR_FILL: f64 = 0.7;

#[derive(Debug, Serialize)]
struct SvgBar {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: &'static str,
    count: u64,
    label: String,
    tooltip: String,
    label_x: f64,
    label_y: f64,
}

#[derive(Debug, Serialize)]
struct SvgChart {
    width: f64,
    height: f64,
    plot_top: f64,
    baseline: f64,
    label_angle: i32,
    text_anchor: &'static str,
    max_count: u64,
    bars: Vec<SvgBar>,
    legend: Vec<LegendEntry>,
}

impl SvgChart {
    fn layout(chart: &ChartView) -> Self {
        let baseline = CHART_HEIGHT - chart.axis.height as f64;
        let plot_height = baseline - PLOT_TOP;
        let max_count = chart.max_count();
        let slot = (CHART_WIDTH - PLOT_LEFT) / chart.bars.len().max(1) as f64;
        let bar_width = slot * BAR_FILL;

        let bars = chart
            .bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let height = plot_height * bar.count as f64 / max_count as f64;
                let center = PLOT_LEFT + slot * (i as f64 + 0.5);
                SvgBar {
                    x: center - bar_width / 2.0,
                    y: baseline - height,
                    width: bar_width,
                    height,
                    color: bar.color,
                    count: bar.count,
                    label: bar.label.clone(),
                    tooltip: bar.tooltip.clone(),
                    label_x: center,
                    label_y: baseline + chart.axis.dy as f64 + 4.0,
                }
            })
            .collect();

        Self {
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
            plot_top: PLOT_TOP,
            baseline,
            label_angle: chart.axis.angle,
            text_anchor: chart.axis.text_anchor.as_str(),
            max_count,
            bars,
            legend: chart.legend.clone(),
        }
    }
}

pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (BODY_TEMPLATE, include_str!("../../templates/dashboard_body.html")),
            (PAGE_TEMPLATE, include_str!("../../templates/dashboard.html")),
        ])?;
        Ok(Self { tera })
    }

    fn context(dashboard: &Dashboard) -> Context {
        let state = match &dashboard.state {
            FetchState::Loading => "loading",
            FetchState::Loaded { .. } => "loaded",
            FetchState::Empty => "empty",
        };

        let mut context = Context::new();
        context.insert("state", state);
        context.insert("snapshot", &dashboard.state.snapshot());
        context.insert("last_update", &dashboard.last_update);
        context.insert("chart", &dashboard.chart.as_ref().map(SvgChart::layout));
        context
    }

    /// Full page: branding, the body for `dashboard`, and the client script
    /// that replaces the body from the stream.
    pub fn render(&self, dashboard: &Dashboard) -> Result<String, tera::Error> {
        self.tera.render(PAGE_TEMPLATE, &Self::context(dashboard))
    }

    pub fn render_fragment(&self, dashboard: &Dashboard) -> Result<String, tera::Error> {
        self.tera.render(BODY_TEMPLATE, &Self::context(dashboard))
    }
}

impl DashboardRenderer for PageRenderer {
    fn render_body(&self, dashboard: &Dashboard) -> anyhow::Result<String> {
        Ok(self.render_fragment(dashboard)?)
    }
}

// Port for turning a dashboard view into the HTML the page swaps in
use crate::domain::dashboard::Dashboard;

pub trait DashboardRenderer: Send + Sync {
    /// Markup for the state-dependent part of the page (count, date, chart).
    fn render_body(&self, dashboard: &Dashboard) -> anyhow::Result<String>;
}

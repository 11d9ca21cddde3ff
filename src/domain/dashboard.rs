// Dashboard domain model
use super::cancellation::CancellationRecord;
use super::chart::ChartView;
use super::flight::{FlightData, FlightSnapshot};
use super::layout::AxisLayout;
use serde::Serialize;

/// Which view the page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum FetchState {
    Loading,
    Loaded {
        snapshot: FlightSnapshot,
        history: Vec<CancellationRecord>,
    },
    Empty,
}

impl FetchState {
    /// Settle a pending fetch. Only `Loading` moves; a settled state is final.
    pub fn complete(self, outcome: Option<FlightData>) -> Self {
        match self {
            FetchState::Loading => match outcome {
                Some(data) => FetchState::Loaded {
                    snapshot: data.current,
                    history: data.history,
                },
                None => FetchState::Empty,
            },
            settled => settled,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn snapshot(&self) -> Option<&FlightSnapshot> {
        match self {
            FetchState::Loaded { snapshot, .. } => Some(snapshot),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    #[serde(flatten)]
    pub state: FetchState,
    pub last_update: Option<String>,
    pub chart: Option<ChartView>,
}

impl Dashboard {
    pub fn new(state: FetchState, axis: AxisLayout) -> Self {
        let (last_update, chart) = match &state {
            FetchState::Loaded { snapshot, history } => {
                (snapshot.updated_time(), Some(ChartView::new(history, axis)))
            }
            _ => (None, None),
        };

        Self {
            state,
            last_update,
            chart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FlightData {
        FlightData::new(
            FlightSnapshot::new(42, "2024-01-01", Some(1_700_000_000_000)),
            vec![CancellationRecord::recent("Dec 1", 90)],
        )
    }

    #[test]
    fn test_loading_to_loaded() {
        let state = FetchState::Loading.complete(Some(sample()));
        assert_eq!(state.snapshot().map(|s| s.count), Some(42));
    }

    #[test]
    fn test_loading_to_empty() {
        assert_eq!(FetchState::Loading.complete(None), FetchState::Empty);
    }

    #[test]
    fn test_settled_state_does_not_move() {
        assert_eq!(FetchState::Empty.complete(Some(sample())), FetchState::Empty);
        let loaded = FetchState::Loading.complete(Some(sample()));
        assert_eq!(loaded.clone().complete(None), loaded);
    }

    #[test]
    fn test_dashboard_json_shape() {
        let dashboard = Dashboard::new(FetchState::Loading.complete(Some(sample())), AxisLayout::VERTICAL);
        let json = serde_json::to_value(&dashboard).unwrap();

        assert_eq!(json["state"], "loaded");
        assert_eq!(json["snapshot"]["count"], 42);
        assert_eq!(json["last_update"], "22:13");
        assert_eq!(json["chart"]["axis"]["angle"], -90);
        assert_eq!(json["chart"]["bars"].as_array().unwrap().len(), 6);

        let empty = serde_json::to_value(Dashboard::new(FetchState::Empty, AxisLayout::HORIZONTAL)).unwrap();
        assert_eq!(empty["state"], "empty");
        assert!(empty["chart"].is_null());
    }
}

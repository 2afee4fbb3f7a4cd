//! Dashboard analytics: filter a payload's rows by selection, aggregate the
//! view, and derive the KPI set.

pub mod aggregate;
pub mod filter;
pub mod kpi;
pub mod utility;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analytics::aggregate::{
    Aggregates, OverviewStats, aggregate_for_selection, overview_stats,
};
use crate::analytics::filter::{FilteredView, Selection, select};
use crate::analytics::kpi::{DerivedKpis, derive_kpis};
use crate::model::Payload;

/// Everything a presentation consumer needs to render one selection.
#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub generated_at: DateTime<Utc>,
    pub state: String,
    pub district: String,
    pub row_count: usize,
    pub overview: OverviewStats,
    pub aggregates: Aggregates,
    pub kpis: DerivedKpis,
}

/// Runs the full pipeline for one selection: filter, aggregate, derive.
/// Returns the data record plus the view itself for previews and exports.
pub fn build_dashboard<'a>(
    payload: &'a Payload,
    selection: &Selection,
) -> (DashboardData, FilteredView<'a>) {
    let view = select(&payload.mgnrega_data, selection);

    let state_has_backend_rollup = selection.has_state()
        && payload
            .kpis
            .by_state
            .iter()
            .any(|s| s.state_name.as_deref() == Some(selection.state.as_str()));

    let aggregates = aggregate_for_selection(selection, &view, state_has_backend_rollup);
    let overview = overview_stats(selection, &payload.kpis.by_state, &aggregates);
    let kpis = derive_kpis(&payload.kpis.overall, &aggregates);

    let data = DashboardData {
        generated_at: Utc::now(),
        state: selection.state.clone(),
        district: selection.district.clone(),
        row_count: view.len(),
        overview,
        aggregates,
        kpis,
    };

    (data, view)
}

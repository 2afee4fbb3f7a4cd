//! Aggregation over a filtered view of district records.
//!
//! Sums skip absent values; means average only the present values and fall
//! back to 0 when none are present. An empty view aggregates to the
//! documented zero defaults, never an error.

use serde::Serialize;

use crate::analytics::filter::Selection;
use crate::analytics::utility::{mean, ratio_pct};
use crate::model::{DistrictRecord, StateKpis};

/// How an [`Aggregates`] record was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateSource {
    /// Sums/means across every row in the view.
    SummedView,
    /// Raw values of the single most-recent record for a selected district.
    LatestDistrictRecord,
}

/// Fixed-field aggregate over a filtered view.
#[derive(Debug, Clone, Serialize)]
pub struct Aggregates {
    pub row_count: usize,
    pub source: AggregateSource,
    pub approved_labour_budget: i64,
    pub total_expenditure: f64,
    pub avg_wage_rate: f64,
    pub avg_days_of_employment_per_household: f64,
    pub total_households_worked: i64,
    pub total_persondays: i64,
    pub sc_persondays: i64,
    pub st_persondays: i64,
    pub women_persondays: i64,
    pub other_persondays: i64,
    pub other_for_women: i64,
    pub active_workers: i64,
    pub households_worked: i64,
    pub completed_works: i64,
    pub ongoing_works: i64,
    pub pct_category_b: f64,
    pub pct_agri_allied: f64,
    pub pct_nrm: f64,
    pub wages: f64,
    pub material_wages: f64,
    pub pct_payments_within_15_days: f64,
    pub nil_expenditure_gp_count: i64,
    /// Divides by `max(completed + ongoing, 1)` unconditionally, so zero
    /// works yields a defined 0 rather than an undefined value. Intentional
    /// carry-over of existing behavior.
    pub avg_cost_per_work: f64,
    /// `total_expenditure / approved_labour_budget * 100`; `None` when the
    /// budget is zero or missing.
    pub percent_utilization: Option<f64>,
}

fn sum_i(view: &[&DistrictRecord], field: impl Fn(&DistrictRecord) -> Option<i64>) -> i64 {
    view.iter().filter_map(|r| field(r)).sum()
}

fn sum_f(view: &[&DistrictRecord], field: impl Fn(&DistrictRecord) -> Option<f64>) -> f64 {
    view.iter().filter_map(|r| field(r)).sum()
}

fn mean_f(view: &[&DistrictRecord], field: impl Fn(&DistrictRecord) -> Option<f64>) -> f64 {
    let present: Vec<f64> = view.iter().filter_map(|r| field(r)).collect();
    mean(&present)
}

/// Reduces a view to the fixed aggregate table.
pub fn aggregate(view: &[&DistrictRecord]) -> Aggregates {
    let approved_labour_budget = sum_i(view, |r| r.approved_labour_budget);
    let total_expenditure = sum_f(view, |r| r.total_exp);
    let total_persondays = sum_i(view, |r| r.persondays_of_central_liability_so_far);
    let sc_persondays = sum_i(view, |r| r.sc_persondays);
    let st_persondays = sum_i(view, |r| r.st_persondays);
    let women_persondays = sum_i(view, |r| r.women_persondays);
    let completed_works = sum_i(view, |r| r.number_of_completed_works);
    let ongoing_works = sum_i(view, |r| r.number_of_ongoing_works);
    let households_worked = sum_i(view, |r| r.total_households_worked);

    Aggregates {
        row_count: view.len(),
        source: AggregateSource::SummedView,
        approved_labour_budget,
        total_expenditure,
        avg_wage_rate: mean_f(view, |r| r.average_wage_rate_per_day_per_person),
        avg_days_of_employment_per_household: mean_f(view, |r| {
            r.average_days_of_employment_per_household
        }),
        total_households_worked: households_worked,
        total_persondays,
        sc_persondays,
        st_persondays,
        women_persondays,
        other_persondays: (total_persondays - sc_persondays - st_persondays).max(0),
        other_for_women: (total_persondays - women_persondays).max(0),
        active_workers: sum_i(view, |r| r.total_num_of_active_workers),
        households_worked,
        completed_works,
        ongoing_works,
        pct_category_b: mean_f(view, |r| r.percent_of_category_b_works),
        pct_agri_allied: mean_f(view, |r| {
            r.percentage_of_expenditure_on_agriculture_allied_works
        }),
        pct_nrm: mean_f(view, |r| r.percent_of_nrm_expenditure),
        wages: sum_f(view, |r| r.wages),
        material_wages: sum_f(view, |r| r.material_and_skilled_wages),
        pct_payments_within_15_days: mean_f(view, |r| {
            r.percentage_payments_generated_within_15_days
        }),
        nil_expenditure_gp_count: sum_i(view, |r| r.number_of_gp_with_nil_exp),
        avg_cost_per_work: total_expenditure / (completed_works + ongoing_works).max(1) as f64,
        percent_utilization: ratio_pct(total_expenditure, approved_labour_budget as f64),
    }
}

/// Picks the most recent record by `data_fetched_on` (descending).
/// First-in-view wins exact ties; records without a timestamp lose to any
/// record that has one.
fn latest_record<'a>(view: &[&'a DistrictRecord]) -> Option<&'a DistrictRecord> {
    let mut best: Option<&DistrictRecord> = None;
    for candidate in view.iter().copied() {
        match best {
            None => best = Some(candidate),
            Some(current) => {
                let newer = match (
                    candidate.data_fetched_on.as_deref(),
                    current.data_fetched_on.as_deref(),
                ) {
                    (Some(c), Some(b)) => c > b,
                    (Some(_), None) => true,
                    _ => false,
                };
                if newer {
                    best = Some(candidate);
                }
            }
        }
    }
    best
}

/// Aggregates a view for a selection.
///
/// When a district is selected and the backend has no per-state rollup for
/// its state, the engine must not reduce across period rows: it exposes the
/// raw values of the single most-recent record instead.
pub fn aggregate_for_selection(
    selection: &Selection,
    view: &[&DistrictRecord],
    state_has_backend_rollup: bool,
) -> Aggregates {
    if selection.has_district() && !state_has_backend_rollup {
        if let Some(latest) = latest_record(view) {
            let mut aggregates = aggregate(&[latest]);
            aggregates.source = AggregateSource::LatestDistrictRecord;
            return aggregates;
        }
    }
    aggregate(view)
}

/// Where the overview card values came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverviewSource {
    BackendState,
    ViewAggregates,
}

/// The overview card values: backend per-state aggregate when the selected
/// state has one, otherwise taken from the computed [`Aggregates`].
#[derive(Debug, Clone, Serialize)]
pub struct OverviewStats {
    pub source: OverviewSource,
    pub approved_labour_budget: Option<f64>,
    pub total_expenditure: Option<f64>,
    pub avg_wage_rate: Option<f64>,
    pub avg_days_of_employment_per_household: Option<f64>,
    pub total_households_worked: Option<f64>,
    pub percent_utilization: Option<f64>,
}

/// Resolves the overview fields. On duplicate `state_name` entries in
/// `by_state`, the last one wins.
pub fn overview_stats(
    selection: &Selection,
    by_state: &[StateKpis],
    aggregates: &Aggregates,
) -> OverviewStats {
    if selection.has_state() {
        let backend = by_state
            .iter()
            .rev()
            .find(|s| s.state_name.as_deref() == Some(selection.state.as_str()));
        if let Some(stats) = backend {
            return OverviewStats {
                source: OverviewSource::BackendState,
                approved_labour_budget: stats.approved_labour_budget,
                total_expenditure: stats.total_expenditure,
                avg_wage_rate: stats.avg_wage_rate,
                avg_days_of_employment_per_household: stats.avg_days_of_employment_per_household,
                total_households_worked: stats.total_households_worked,
                percent_utilization: stats.percent_utilization,
            };
        }
    }

    OverviewStats {
        source: OverviewSource::ViewAggregates,
        approved_labour_budget: Some(aggregates.approved_labour_budget as f64),
        total_expenditure: Some(aggregates.total_expenditure),
        avg_wage_rate: Some(aggregates.avg_wage_rate),
        avg_days_of_employment_per_household: Some(
            aggregates.avg_days_of_employment_per_household,
        ),
        total_households_worked: Some(aggregates.total_households_worked as f64),
        percent_utilization: aggregates.percent_utilization,
    }
}

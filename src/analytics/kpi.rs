//! KPI derivation with backend-preferred fallback.
//!
//! Each percentage KPI resolves through one combinator: a backend-supplied
//! number wins verbatim, a malformed backend value is surfaced, and a missing
//! one runs the derivation fallback. A zero or missing denominator is
//! `Undefined`, distinct from a computed zero.

use serde::{Serialize, Serializer};

use crate::analytics::aggregate::Aggregates;
use crate::analytics::utility::ratio_pct;
use crate::model::{BackendValue, OverallKpis};

/// Outcome of a single KPI resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kpi {
    Computed(f64),
    /// Denominator was zero or missing; there is no meaningful value.
    Undefined,
    /// The backend sent something that is not a number. Surfaced as-is.
    Malformed,
}

impl Kpi {
    pub fn value(&self) -> Option<f64> {
        match self {
            Kpi::Computed(v) => Some(*v),
            _ => None,
        }
    }

    /// Clamped integer in [0, 100] for progress-indicator rendering only.
    /// The underlying value keeps full precision and may exceed 100.
    pub fn progress(&self) -> u8 {
        match self {
            Kpi::Computed(v) => v.round().clamp(0.0, 100.0) as u8,
            _ => 0,
        }
    }
}

impl Serialize for Kpi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Kpi::Computed(v) => serializer.serialize_f64(*v),
            Kpi::Undefined => serializer.serialize_none(),
            Kpi::Malformed => serializer.serialize_str("malformed"),
        }
    }
}

/// Resolves one KPI: backend value first, derivation fallback second.
///
/// A malformed backend value never falls through to the derivation; hiding
/// backend corruption behind a locally computed number would misreport the
/// data source.
pub fn resolve<F>(primary: &BackendValue, fallback: F) -> Kpi
where
    F: FnOnce() -> Option<f64>,
{
    match primary {
        BackendValue::Number(v) => Kpi::Computed(*v),
        BackendValue::Malformed => Kpi::Malformed,
        BackendValue::Missing => fallback().map_or(Kpi::Undefined, Kpi::Computed),
    }
}

/// The five percentage indicators shown on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedKpis {
    pub percent_utilization: Kpi,
    pub female_participation_rate: Kpi,
    pub sc_st_participation_rate: Kpi,
    pub average_percentage_payments_within_15_days: Kpi,
    pub work_completion_ratio: Kpi,
}

/// Derives the KPI set from the backend overall values and the view
/// aggregates. Each KPI is resolved independently; no failure in one blocks
/// the others.
pub fn derive_kpis(overall: &OverallKpis, aggregates: &Aggregates) -> DerivedKpis {
    let total_persondays = aggregates.total_persondays as f64;

    DerivedKpis {
        // Utilization comes from the backend rollup or the aggregate record;
        // it is never recomputed here.
        percent_utilization: resolve(&overall.percent_utilization, || {
            aggregates.percent_utilization
        }),
        female_participation_rate: resolve(&overall.female_participation_rate, || {
            ratio_pct(aggregates.women_persondays as f64, total_persondays)
        }),
        sc_st_participation_rate: resolve(&overall.sc_st_participation_rate, || {
            ratio_pct(
                (aggregates.sc_persondays + aggregates.st_persondays) as f64,
                total_persondays,
            )
        }),
        average_percentage_payments_within_15_days: resolve(
            &overall.average_percentage_payments_within_15_days,
            || {
                if aggregates.row_count == 0 {
                    None
                } else {
                    Some(aggregates.pct_payments_within_15_days)
                }
            },
        ),
        // Derived only; the backend never supplies this one.
        work_completion_ratio: ratio_pct(
            aggregates.completed_works as f64,
            (aggregates.completed_works + aggregates.ongoing_works) as f64,
        )
        .map_or(Kpi::Undefined, Kpi::Computed),
    }
}

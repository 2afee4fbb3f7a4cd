//! Data types for the backend payload.
//!
//! The backend is lenient about its own output: numeric fields arrive as
//! numbers, numeric strings (sometimes with thousands separators), null, or
//! not at all. Every field here is optional and coerced on deserialization so
//! a partial payload degrades to empty containers instead of a parse failure.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Full response of the backend data endpoint. Any key may be missing or
/// JSON null; both degrade to the empty container.
#[derive(Debug, Default, Deserialize)]
pub struct Payload {
    #[serde(default, deserialize_with = "null_to_default")]
    pub states: Vec<StateRef>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub districts: Vec<DistrictRef>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub mgnrega_data: Vec<DistrictRecord>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub kpis: KpiBundle,
}

/// Catalog entry for a state, used for listings and the state → district join.
#[derive(Debug, Clone, Deserialize)]
pub struct StateRef {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: Option<i64>,
    pub state_name: Option<String>,
    pub state_code: Option<String>,
}

/// Catalog entry for a district, joined to its state via `state_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct DistrictRef {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: Option<i64>,
    pub district_name: Option<String>,
    pub district_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub state_id: Option<i64>,
}

/// One district-period record. Immutable after parse; views borrow rows,
/// never clone them.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DistrictRecord {
    pub state_name: Option<String>,
    pub district_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub state_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub approved_labour_budget: Option<i64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_exp: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub average_wage_rate_per_day_per_person: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub average_days_of_employment_per_household: Option<f64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_households_worked: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub persondays_of_central_liability_so_far: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub sc_persondays: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub st_persondays: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub women_persondays: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_num_of_active_workers: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub number_of_completed_works: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub number_of_ongoing_works: Option<i64>,
    #[serde(
        rename = "percent_of_category_B_works",
        default,
        deserialize_with = "lenient_f64"
    )]
    pub percent_of_category_b_works: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub percentage_of_expenditure_on_agriculture_allied_works: Option<f64>,
    #[serde(
        rename = "percent_of_NRM_expenditure",
        default,
        deserialize_with = "lenient_f64"
    )]
    pub percent_of_nrm_expenditure: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub wages: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub material_and_skilled_wages: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub percentage_payments_generated_within_15_days: Option<f64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub number_of_gp_with_nil_exp: Option<i64>,
    /// ISO-8601-ish timestamp string, used only for latest-record tie-breaks.
    /// Kept opaque: lexicographic order matches chronological order for the
    /// backend's format, and parsing would turn bad timestamps into failures.
    pub data_fetched_on: Option<String>,
}

/// Backend-computed KPIs: one overall set plus per-state aggregates.
#[derive(Debug, Default, Deserialize)]
pub struct KpiBundle {
    #[serde(default, deserialize_with = "null_to_default")]
    pub overall: OverallKpis,
    #[serde(default, deserialize_with = "null_to_default")]
    pub by_state: Vec<StateKpis>,
}

/// A backend-supplied KPI field as it arrived on the wire.
///
/// `Missing` (absent or null) triggers the derivation fallback downstream;
/// `Malformed` (present but not a number) is surfaced, never corrected.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum BackendValue {
    #[default]
    Missing,
    Number(f64),
    Malformed,
}

impl<'de> Deserialize<'de> for BackendValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Null => BackendValue::Missing,
            other => match coerce_f64(&other) {
                Some(n) => BackendValue::Number(n),
                None => BackendValue::Malformed,
            },
        })
    }
}

/// Overall KPI set; any field may be absent.
#[derive(Debug, Default, Deserialize)]
pub struct OverallKpis {
    #[serde(default)]
    pub percent_utilization: BackendValue,
    #[serde(default)]
    pub female_participation_rate: BackendValue,
    #[serde(default)]
    pub sc_st_participation_rate: BackendValue,
    #[serde(default)]
    pub average_percentage_payments_within_15_days: BackendValue,
}

/// Backend per-state aggregate, keyed by `state_name`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateKpis {
    pub state_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub approved_labour_budget: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_expenditure: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_wage_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_days_of_employment_per_household: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_households_worked: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub percent_utilization: Option<f64>,
}

/// Treats JSON null as the container's default (missing keys already are,
/// via `#[serde(default)]`).
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s.chars().any(|c| c.is_ascii_alphabetic()) {
                return None;
            }
            s.replace(',', "").parse::<f64>().ok()
        }
        _ => None,
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_f64))
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_f64).map(|n| n as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_coerces_numeric_strings() {
        let record: DistrictRecord = serde_json::from_str(
            r#"{
                "district_name": "Pune",
                "approved_labour_budget": "1,200,000",
                "total_exp": "250000.5",
                "women_persondays": 4100
            }"#,
        )
        .unwrap();

        assert_eq!(record.approved_labour_budget, Some(1_200_000));
        assert_eq!(record.total_exp, Some(250_000.5));
        assert_eq!(record.women_persondays, Some(4100));
    }

    #[test]
    fn test_record_garbage_numeric_becomes_none() {
        let record: DistrictRecord = serde_json::from_str(
            r#"{"approved_labour_budget": "N/A", "total_exp": null, "wages": {}}"#,
        )
        .unwrap();

        assert_eq!(record.approved_labour_budget, None);
        assert_eq!(record.total_exp, None);
        assert_eq!(record.wages, None);
    }

    #[test]
    fn test_backend_value_three_way() {
        #[derive(Deserialize)]
        struct Probe {
            #[serde(default)]
            v: BackendValue,
        }

        let number: Probe = serde_json::from_str(r#"{"v": 42.5}"#).unwrap();
        assert_eq!(number.v, BackendValue::Number(42.5));

        let string_number: Probe = serde_json::from_str(r#"{"v": "42.5"}"#).unwrap();
        assert_eq!(string_number.v, BackendValue::Number(42.5));

        let null: Probe = serde_json::from_str(r#"{"v": null}"#).unwrap();
        assert_eq!(null.v, BackendValue::Missing);

        let absent: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.v, BackendValue::Missing);

        let malformed: Probe = serde_json::from_str(r#"{"v": "n/a"}"#).unwrap();
        assert_eq!(malformed.v, BackendValue::Malformed);
    }

    #[test]
    fn test_payload_null_keys_degrade_to_empty() {
        let payload: Payload = serde_json::from_str(
            r#"{"states": null, "districts": null, "mgnrega_data": null, "kpis": null}"#,
        )
        .unwrap();

        assert!(payload.states.is_empty());
        assert!(payload.districts.is_empty());
        assert!(payload.mgnrega_data.is_empty());
        assert!(payload.kpis.by_state.is_empty());
        assert_eq!(payload.kpis.overall.percent_utilization, BackendValue::Missing);
    }
}

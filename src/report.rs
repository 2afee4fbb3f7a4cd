//! Terminal rendering of a dashboard.
//!
//! The core never depends on how values are displayed; this module is the
//! one presentation consumer shipped with the binary. Unknown values render
//! as `—`, progress bars clamp to [0, 100] for display only, and captions
//! keep the full-precision number next to each bar.

use std::fmt::Write;

use num_format::{Locale, ToFormattedString};
use tabled::{Table, Tabled, settings::Style};

use crate::analytics::DashboardData;
use crate::analytics::aggregate::{AggregateSource, OverviewSource};
use crate::analytics::kpi::Kpi;
use crate::model::DistrictRecord;

const BAR_WIDTH: usize = 20;

/// Formats a float with comma-grouped thousands. Integer-valued floats drop
/// the decimals (`1,250,000`), everything else keeps two (`1,250.75`).
pub fn format_num(value: Option<f64>) -> String {
    let Some(v) = value else {
        return "—".to_string();
    };
    if !v.is_finite() {
        return "—".to_string();
    }
    if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        return (v as i64).to_formatted_string(&Locale::en);
    }
    let neg = v.is_sign_negative();
    let s = format!("{:.2}", v.abs());
    let (int_part, frac_part) = s.split_once('.').unwrap_or((&s, "00"));
    let grouped = int_part
        .parse::<i64>()
        .unwrap_or(0)
        .to_formatted_string(&Locale::en);
    format!("{}{}.{}", if neg { "-" } else { "" }, grouped, frac_part)
}

pub fn format_int(value: i64) -> String {
    value.to_formatted_string(&Locale::en)
}

fn format_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}%"),
        None => "—".to_string(),
    }
}

fn format_kpi(kpi: &Kpi) -> String {
    match kpi {
        Kpi::Computed(v) => format!("{v:.2}%"),
        Kpi::Undefined => "—".to_string(),
        Kpi::Malformed => "malformed".to_string(),
    }
}

/// Text progress bar over a clamped 0–100 value.
fn bar(progress: u8) -> String {
    let filled = (progress as usize * BAR_WIDTH) / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn kpi_line(label: &str, kpi: &Kpi) -> String {
    format!("  {:<24} {} {}", label, bar(kpi.progress()), format_kpi(kpi))
}

/// Share of `part` in `total`, as text; `—` when the total is zero.
fn share(part: i64, total: i64) -> String {
    if total == 0 {
        return "—".to_string();
    }
    format!("{:.1}%", part as f64 / total as f64 * 100.0)
}

#[derive(Tabled)]
struct PreviewRow {
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "District")]
    district: String,
    #[tabled(rename = "Persondays")]
    persondays: String,
    #[tabled(rename = "Total Exp")]
    total_exp: String,
    #[tabled(rename = "Households")]
    households: String,
    #[tabled(rename = "Fetched On")]
    fetched_on: String,
}

impl PreviewRow {
    fn from_record(record: &DistrictRecord) -> Self {
        Self {
            state: record.state_name.clone().unwrap_or_default(),
            district: record.district_name.clone().unwrap_or_default(),
            persondays: record
                .persondays_of_central_liability_so_far
                .map(format_int)
                .unwrap_or_else(|| "—".to_string()),
            total_exp: format_num(record.total_exp),
            households: record
                .total_households_worked
                .map(format_int)
                .unwrap_or_else(|| "—".to_string()),
            fetched_on: record.data_fetched_on.clone().unwrap_or_default(),
        }
    }
}

/// Renders the full dashboard report as plain text.
pub fn render(data: &DashboardData, view: &[&DistrictRecord], preview_limit: usize) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "MGNREGA Dashboard — state: {}, district: {}", data.state, data.district);
    let _ = writeln!(out, "Generated at {}", data.generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    let source_note = match data.aggregates.source {
        AggregateSource::SummedView => "summed across view rows",
        AggregateSource::LatestDistrictRecord => "latest record for the selected district",
    };
    let _ = writeln!(out, "Rows in view: {} ({})", format_int(data.row_count as i64), source_note);

    let ov = &data.overview;
    let _ = writeln!(out, "\nOverview");
    let _ = writeln!(out, "  Approved labour budget     : {}", format_num(ov.approved_labour_budget));
    let _ = writeln!(out, "  Total expenditure          : {}", format_num(ov.total_expenditure));
    let _ = writeln!(out, "  Avg wage rate (per day)    : {}", format_num(ov.avg_wage_rate));
    let _ = writeln!(out, "  Avg days of employment/HH  : {}", format_num(ov.avg_days_of_employment_per_household));
    let _ = writeln!(out, "  Total households worked    : {}", format_num(ov.total_households_worked));
    let utilization = ov
        .percent_utilization
        .map_or(0, |v| v.round().clamp(0.0, 100.0) as u8);
    let _ = writeln!(out, "  % Utilization              : {} {}", bar(utilization), format_pct(ov.percent_utilization));
    let overview_source = match ov.source {
        OverviewSource::BackendState => "backend per-state aggregate",
        OverviewSource::ViewAggregates => "computed from view rows",
    };
    let _ = writeln!(out, "  (overview source: {overview_source})");

    let agg = &data.aggregates;
    let _ = writeln!(out, "\nEmployment composition");
    let _ = writeln!(
        out,
        "  Persondays {}: SC {} ({}), ST {} ({}), Other {} ({})",
        format_int(agg.total_persondays),
        format_int(agg.sc_persondays),
        share(agg.sc_persondays, agg.total_persondays),
        format_int(agg.st_persondays),
        share(agg.st_persondays, agg.total_persondays),
        format_int(agg.other_persondays),
        share(agg.other_persondays, agg.total_persondays),
    );
    let _ = writeln!(
        out,
        "  Women {} ({}) vs Other {}",
        format_int(agg.women_persondays),
        share(agg.women_persondays, agg.total_persondays),
        format_int(agg.other_for_women),
    );
    let _ = writeln!(
        out,
        "  Active workers {} vs households worked {}",
        format_int(agg.active_workers),
        format_int(agg.households_worked),
    );

    let _ = writeln!(out, "\nWork progress");
    let _ = writeln!(
        out,
        "  Completed {} vs ongoing {}",
        format_int(agg.completed_works),
        format_int(agg.ongoing_works),
    );
    let _ = writeln!(
        out,
        "  Category B {} | Agri allied {} | NRM {}",
        format_pct(Some(agg.pct_category_b)),
        format_pct(Some(agg.pct_agri_allied)),
        format_pct(Some(agg.pct_nrm)),
    );

    let _ = writeln!(out, "\nFinancial performance");
    let _ = writeln!(
        out,
        "  Wages {} | Material & skilled {}",
        format_num(Some(agg.wages)),
        format_num(Some(agg.material_wages)),
    );
    let timely = agg.pct_payments_within_15_days.round().clamp(0.0, 100.0) as u8;
    let _ = writeln!(
        out,
        "  Payments within 15 days    : {} {}",
        bar(timely),
        format_pct(Some(agg.pct_payments_within_15_days)),
    );
    let _ = writeln!(out, "  GPs with NIL expenditure   : {}", format_int(agg.nil_expenditure_gp_count));
    let _ = writeln!(out, "  Avg cost per work          : {}", format_num(Some(agg.avg_cost_per_work)));

    let kpis = &data.kpis;
    let _ = writeln!(out, "\nKey performance indicators");
    let _ = writeln!(out, "{}", kpi_line("Budget utilization", &kpis.percent_utilization));
    let _ = writeln!(out, "{}", kpi_line("Female participation", &kpis.female_participation_rate));
    let _ = writeln!(out, "{}", kpi_line("SC/ST participation", &kpis.sc_st_participation_rate));
    let _ = writeln!(
        out,
        "{}",
        kpi_line("Timely payment rate", &kpis.average_percentage_payments_within_15_days)
    );
    let _ = writeln!(out, "{}", kpi_line("Work completion ratio", &kpis.work_completion_ratio));
    let _ = writeln!(
        out,
        "  (backend-calculated KPIs used when available; otherwise derived from the view)"
    );

    let _ = writeln!(out, "\nRaw data preview (first {} rows)", preview_limit);
    if view.is_empty() {
        let _ = writeln!(out, "(no rows)");
    } else {
        let rows: Vec<PreviewRow> = view
            .iter()
            .take(preview_limit)
            .map(|r| PreviewRow::from_record(r))
            .collect();
        let table = Table::new(rows).with(Style::markdown()).to_string();
        let _ = writeln!(out, "{table}");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::build_dashboard;
    use crate::analytics::filter::Selection;
    use crate::model::{DistrictRecord, Payload};

    #[test]
    fn test_format_num() {
        assert_eq!(format_num(None), "—");
        assert_eq!(format_num(Some(1_250_000.0)), "1,250,000");
        assert_eq!(format_num(Some(1250.75)), "1,250.75");
        assert_eq!(format_num(Some(-1250.75)), "-1,250.75");
        assert_eq!(format_num(Some(f64::NAN)), "—");
    }

    #[test]
    fn test_bar_bounds() {
        assert_eq!(bar(0), "[....................]");
        assert_eq!(bar(100), "[####################]");
        assert_eq!(bar(50), "[##########..........]");
    }

    #[test]
    fn test_share_zero_total() {
        assert_eq!(share(5, 0), "—");
        assert_eq!(share(1, 4), "25.0%");
    }

    #[test]
    fn test_render_smoke() {
        let payload = Payload {
            mgnrega_data: vec![DistrictRecord {
                state_name: Some("StateX".to_string()),
                district_name: Some("Alpha".to_string()),
                approved_labour_budget: Some(1_000_000),
                total_exp: Some(250_000.0),
                persondays_of_central_liability_so_far: Some(1000),
                women_persondays: Some(400),
                data_fetched_on: Some("2024-01-01".to_string()),
                ..DistrictRecord::default()
            }],
            ..Payload::default()
        };

        let (data, view) = build_dashboard(&payload, &Selection::new("All", "Alpha"));
        let report = render(&data, &view, 10);

        assert!(report.contains("district: Alpha"));
        assert!(report.contains("25.00%"));
        assert!(report.contains("Female participation"));
        assert!(report.contains("| Alpha"));
    }

    #[test]
    fn test_render_empty_view() {
        let payload = Payload::default();
        let (data, view) = build_dashboard(&payload, &Selection::new("All", "All"));
        let report = render(&data, &view, 10);
        assert!(report.contains("(no rows)"));
        // No denominator anywhere: KPIs show as unknown, not zero.
        assert!(report.contains("Work completion ratio"));
    }
}

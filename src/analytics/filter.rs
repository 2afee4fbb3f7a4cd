//! Row filtering by state/district selection.

use crate::model::DistrictRecord;

/// Sentinel meaning "no filter" for either selector.
pub const ALL: &str = "All";

#[derive(Debug, Clone)]
pub struct Selection {
    pub state: String,
    pub district: String,
}

impl Selection {
    /// Empty input is treated the same as the "All" sentinel.
    pub fn new(state: &str, district: &str) -> Self {
        let normalize = |s: &str| {
            let s = s.trim();
            if s.is_empty() { ALL.to_string() } else { s.to_string() }
        };
        Self {
            state: normalize(state),
            district: normalize(district),
        }
    }

    pub fn has_district(&self) -> bool {
        self.district != ALL
    }

    pub fn has_state(&self) -> bool {
        self.state != ALL
    }
}

/// Rows matching a selection, in original relative order.
pub type FilteredView<'a> = Vec<&'a DistrictRecord>;

/// Narrows `rows` to the selection. District takes precedence over state:
/// when a district is chosen, state filtering is not reapplied. Unknown names
/// simply yield an empty view.
pub fn select<'a>(rows: &'a [DistrictRecord], selection: &Selection) -> FilteredView<'a> {
    if selection.has_district() {
        rows.iter()
            .filter(|r| r.district_name.as_deref() == Some(selection.district.as_str()))
            .collect()
    } else if selection.has_state() {
        rows.iter()
            .filter(|r| r.state_name.as_deref() == Some(selection.state.as_str()))
            .collect()
    } else {
        rows.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(state: &str, district: &str) -> DistrictRecord {
        DistrictRecord {
            state_name: Some(state.to_string()),
            district_name: Some(district.to_string()),
            ..DistrictRecord::default()
        }
    }

    #[test]
    fn test_state_filter_preserves_order() {
        let rows: Vec<DistrictRecord> = (0..10)
            .map(|i| {
                if i % 3 == 0 {
                    row("StateX", &format!("D{i}"))
                } else {
                    row("StateY", &format!("D{i}"))
                }
            })
            .collect();

        let view = select(&rows, &Selection::new("StateX", "All"));
        assert_eq!(view.len(), 4);
        let names: Vec<_> = view
            .iter()
            .map(|r| r.district_name.as_deref().unwrap())
            .collect();
        assert_eq!(names, vec!["D0", "D3", "D6", "D9"]);
    }

    #[test]
    fn test_district_beats_state() {
        let rows = vec![row("StateX", "Alpha"), row("StateY", "Beta")];
        // The state says X, the district lives in Y; district wins.
        let view = select(&rows, &Selection::new("StateX", "Beta"));
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].state_name.as_deref(), Some("StateY"));
    }

    #[test]
    fn test_all_all_returns_everything() {
        let rows = vec![row("A", "a"), row("B", "b")];
        assert_eq!(select(&rows, &Selection::new("All", "All")).len(), 2);
    }

    #[test]
    fn test_unknown_name_yields_empty_view() {
        let rows = vec![row("A", "a")];
        assert!(select(&rows, &Selection::new("All", "Nowhere")).is_empty());
    }

    #[test]
    fn test_empty_input_means_all() {
        let selection = Selection::new("", "  ");
        assert!(!selection.has_state());
        assert!(!selection.has_district());
    }
}

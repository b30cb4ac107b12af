//! One full recomputation pass over the working rows

use crate::aggregate::{gender_counts, role_counts, scorecard, GenderCount, RoleCount, Scorecard};
use crate::error::Warning;
use crate::filter::{apply_filters, apply_name_search, filter_options, FilterOptions};
use crate::input::derive_join_month;
use crate::export::spreadsheet_export_available;
use crate::model::{FilterSelection, RecordSet, GENDER_COLUMN, ROLE_COLUMN};
use crate::schema::{sniff_name_column, Schema};
use crate::session::{SessionId, SessionStore};
use crate::worksheet::Worksheet;

/// Everything the presentation layer shows for one pass
#[derive(Debug, Clone)]
pub struct DashboardView {
    /// Candidate values for each filter control
    pub options: FilterOptions,
    /// Rows left after the name search and filters
    pub records: RecordSet,
    pub schema: Schema,
    pub scorecard: Scorecard,
    pub role_counts: Vec<RoleCount>,
    pub gender_counts: Vec<GenderCount>,
    pub warnings: Vec<Warning>,
}

/// Derive the join month, search, filter, sniff and aggregate
pub fn render_view(records: &RecordSet, selection: &FilterSelection) -> DashboardView {
    let mut warnings = Vec::new();

    let mut working = records.clone();
    warnings.extend(derive_join_month(&mut working));

    let name_column = sniff_name_column(&working);
    let searched = apply_name_search(
        &working,
        selection.name_query.as_deref(),
        name_column.as_ref(),
    );
    warnings.extend(searched.warnings);

    let options = filter_options(&searched.records, selection);
    let filtered = apply_filters(&searched.records, selection);
    warnings.extend(filtered.warnings);

    let records = filtered.records;
    let schema = Schema::sniff(&records);

    if !schema.has_role {
        log::warn!("No 'ROLE' column, role chart will be empty");
        warnings.push(Warning::MissingColumn(ROLE_COLUMN));
    }
    if !schema.has_gender {
        log::warn!("No 'Gender' column, gender ratio unavailable");
        warnings.push(Warning::MissingColumn(GENDER_COLUMN));
    }
    if !spreadsheet_export_available() {
        warnings.push(Warning::SpreadsheetExportDisabled);
    }

    let view = DashboardView {
        options,
        scorecard: scorecard(&records, &schema),
        role_counts: role_counts(&records, &schema),
        gender_counts: gender_counts(&records),
        schema,
        records,
        warnings,
    };

    log::info!(
        "Rendered {} rows, pipeline {}",
        view.records.len(),
        view.scorecard.total_pipeline
    );
    view
}

/// Loaded rows plus the edited snapshots of each session
#[derive(Debug)]
pub struct Dashboard {
    loaded: RecordSet,
    sessions: SessionStore,
}

impl Dashboard {
    pub fn new(loaded: RecordSet) -> Self {
        Self {
            loaded,
            sessions: SessionStore::new(),
        }
    }

    pub fn render(&self, session: &SessionId, selection: &FilterSelection) -> DashboardView {
        render_view(self.sessions.working_set(session, &self.loaded), selection)
    }

    /// Editable copy of the rows this session currently sees
    pub fn worksheet(&self, session: &SessionId, selection: &FilterSelection) -> Worksheet {
        Worksheet::new(self.render(session, selection).records)
    }

    /// Commit a worksheet as the session's working rows for later passes
    pub fn apply_worksheet(&mut self, session: &SessionId, worksheet: Worksheet) {
        self.sessions.commit(session, worksheet.into_records());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellValue, JOIN_MONTH_COLUMN};

    fn loaded() -> RecordSet {
        RecordSet::from_rows(
            &["Name", "Gender", "ROLE", "Level", "DOJ", "Will to Join"],
            &[
                vec!["Asha", "Female", "Frontend", "Experienced", "2025-03-06", "Yes"],
                vec!["Ravi", "Male", "Backend", "Fresher", "2024-01-10", "No"],
                vec!["Kiran", "Female", "Backend", "Fresher", "2024-12-02", "Yes"],
            ],
        )
    }

    #[test]
    fn test_render_full_view() {
        let view = render_view(&loaded(), &FilterSelection::new());

        assert_eq!(view.records.len(), 3);
        assert!(view.records.has_column(JOIN_MONTH_COLUMN));
        assert_eq!(
            view.options.join_month,
            vec!["January 2024", "December 2024", "March 2025"]
        );
        assert_eq!(view.scorecard.total_pipeline, 3);
        assert_eq!(view.scorecard.will_to_join, 2);
        assert_eq!(view.scorecard.will_to_join_pct, Some(66.7));
        assert_eq!(view.role_counts.len(), 2);
    }

    #[test]
    fn test_render_filters_by_join_month() {
        let selection = FilterSelection::new().with_join_month(["March 2025"]);
        let view = render_view(&loaded(), &selection);
        assert_eq!(view.records.len(), 1);
        assert_eq!(view.scorecard.experienced, 1);
        assert_eq!(view.scorecard.experienced_pct, Some(100.0));
    }

    #[test]
    fn test_render_degrades_without_optional_columns() {
        let records = RecordSet::from_rows(&["Email"], &[vec!["a@x.com"]]);
        let selection = FilterSelection::new().with_name_query("asha");
        let view = render_view(&records, &selection);

        assert_eq!(view.records.len(), 1);
        assert!(view.warnings.contains(&Warning::NoNameColumn));
        assert!(view.warnings.contains(&Warning::MissingColumn("DOJ")));
        assert!(view.warnings.contains(&Warning::MissingColumn("ROLE")));
        assert!(view.warnings.contains(&Warning::MissingColumn("Gender")));
        assert!(view.role_counts.is_empty());
        assert!(view.gender_counts.is_empty());
    }

    #[test]
    fn test_applied_worksheet_drives_later_passes() {
        let mut dashboard = Dashboard::new(loaded());
        let session = SessionId::new("s1");
        let other = SessionId::new("s2");
        let selection = FilterSelection::new().with_gender(["Female"]);

        let mut sheet = dashboard.worksheet(&session, &selection);
        assert_eq!(sheet.records().len(), 2);
        sheet.set_cell(1, "Level", "Experienced").unwrap();
        sheet.set_cell(1, "DOJ", "2025-03-20").unwrap();
        dashboard.apply_worksheet(&session, sheet);

        let view = dashboard.render(&session, &FilterSelection::new());
        assert_eq!(view.records.len(), 2);
        assert_eq!(view.scorecard.experienced, 2);
        assert_eq!(view.options.join_month, vec!["March 2025"]);

        let month = view.records.column_index(JOIN_MONTH_COLUMN).unwrap();
        assert_eq!(view.records.cell(1, month), Some(&CellValue::text("March 2025")));

        // Another session still sees the loaded file
        assert_eq!(dashboard.render(&other, &FilterSelection::new()).records.len(), 3);
    }
}

//! Row filtering by name search and the four category selections.
//!
//! The active selections combine as a single conjunction: every dimension
//! with a non-empty selection contributes a membership predicate and the
//! rest contribute nothing.

use crate::error::Warning;
use crate::input::parse_month_year;
use crate::model::{
    CellValue, FilterSelection, RecordSet, GENDER_COLUMN, JOIN_MONTH_COLUMN, LEVEL_COLUMN,
    ROLE_COLUMN,
};
use crate::schema::ColumnGuess;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Gender,
    Role,
    Level,
    JoinMonth,
}

impl Dimension {
    /// In cascade order: each dimension's options depend on the ones before
    pub const ALL: [Dimension; 4] = [
        Dimension::Gender,
        Dimension::Role,
        Dimension::Level,
        Dimension::JoinMonth,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            Dimension::Gender => GENDER_COLUMN,
            Dimension::Role => ROLE_COLUMN,
            Dimension::Level => LEVEL_COLUMN,
            Dimension::JoinMonth => JOIN_MONTH_COLUMN,
        }
    }

    pub fn selected<'a>(&self, selection: &'a FilterSelection) -> &'a BTreeSet<String> {
        match self {
            Dimension::Gender => &selection.gender,
            Dimension::Role => &selection.role,
            Dimension::Level => &selection.level,
            Dimension::JoinMonth => &selection.join_month,
        }
    }
}

/// Rows left after filtering, plus any degradations hit on the way
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    pub records: RecordSet,
    pub warnings: Vec<Warning>,
}

/// Keep rows whose name contains the query, ignoring case.
///
/// Missing names never match. Without a name column the query is ignored
/// and a warning is returned.
pub fn apply_name_search(
    records: &RecordSet,
    query: Option<&str>,
    name_column: Option<&ColumnGuess>,
) -> FilterOutcome {
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return FilterOutcome {
            records: records.clone(),
            warnings: Vec::new(),
        };
    };

    let Some(col) = name_column.and_then(|g| records.column_index(&g.column)) else {
        log::warn!("Name search '{}' ignored: no name-like column", query);
        return FilterOutcome {
            records: records.clone(),
            warnings: vec![Warning::NoNameColumn],
        };
    };

    let needle = query.to_lowercase();
    let matched = records.filtered(|row| {
        row[col]
            .as_text()
            .map_or(false, |name| name.to_lowercase().contains(&needle))
    });
    log::debug!("Name search '{}' kept {} of {} rows", query, matched.len(), records.len());

    FilterOutcome {
        records: matched,
        warnings: Vec::new(),
    }
}

/// Apply the category selections of the given dimensions as one conjunction
pub fn apply_dimensions(
    records: &RecordSet,
    selection: &FilterSelection,
    dimensions: &[Dimension],
) -> FilterOutcome {
    let mut warnings = Vec::new();
    let mut active: Vec<(usize, &BTreeSet<String>)> = Vec::new();

    for dim in dimensions {
        let selected = dim.selected(selection);
        if selected.is_empty() {
            continue;
        }
        match records.column_index(dim.column()) {
            Some(col) => active.push((col, selected)),
            None => {
                log::warn!("Filter on '{}' ignored: column missing", dim.column());
                warnings.push(Warning::IgnoredFilter(dim.column()));
            }
        }
    }

    let filtered = records.filtered(|row| {
        active
            .iter()
            .all(|(col, selected)| is_member(&row[*col], selected))
    });

    FilterOutcome {
        records: filtered,
        warnings,
    }
}

fn is_member(cell: &CellValue, selected: &BTreeSet<String>) -> bool {
    cell.as_text().map_or(false, |v| selected.contains(&v))
}

/// Apply all four category selections
pub fn apply_filters(records: &RecordSet, selection: &FilterSelection) -> FilterOutcome {
    apply_dimensions(records, selection, &Dimension::ALL)
}

/// Candidate values offered for each selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub gender: Vec<String>,
    pub role: Vec<String>,
    pub level: Vec<String>,
    pub join_month: Vec<String>,
}

/// Cascading candidates: genders come from `records`, roles from the rows
/// left after the gender filter, levels after the role filter, and join
/// months (chronological) after the level filter.
pub fn filter_options(records: &RecordSet, selection: &FilterSelection) -> FilterOptions {
    let gender = records.distinct_values(GENDER_COLUMN);

    let after_gender = apply_dimensions(records, selection, &[Dimension::Gender]).records;
    let role = after_gender.distinct_values(ROLE_COLUMN);

    let after_role = apply_dimensions(&after_gender, selection, &[Dimension::Role]).records;
    let level = after_role.distinct_values(LEVEL_COLUMN);

    let after_level = apply_dimensions(&after_role, selection, &[Dimension::Level]).records;
    let join_month = sort_join_months(after_level.distinct_values(JOIN_MONTH_COLUMN));

    FilterOptions {
        gender,
        role,
        level,
        join_month,
    }
}

/// Sort "Month Year" labels by date; labels that do not parse go last
pub fn sort_join_months(mut months: Vec<String>) -> Vec<String> {
    months.sort_by_key(|m| {
        let date = parse_month_year(m);
        (date.is_none(), date)
    });
    months
}

//! Scorecards and grouped counts over the filtered rows

use crate::labels::{normalize_gender, short_role_label, GenderCategory};
use crate::model::{RecordSet, GENDER_COLUMN, LEVEL_COLUMN, ROLE_COLUMN};
use crate::schema::Schema;
use serde::Serialize;
use std::collections::BTreeMap;

/// Headline numbers for the current view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scorecard {
    pub total_pipeline: usize,
    pub will_to_join: usize,
    /// `None` when the pipeline is empty
    pub will_to_join_pct: Option<f64>,
    pub experienced: usize,
    pub experienced_pct: Option<f64>,
    pub distinct_roles: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleCount {
    #[serde(rename = "RoleShort")]
    pub label: String,
    #[serde(rename = "Count")]
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenderCount {
    #[serde(rename = "Gender")]
    pub category: GenderCategory,
    #[serde(rename = "Count")]
    pub count: usize,
}

/// Yes-like answers: YES, Y, TRUE, 1, or anything starting with YES
pub fn is_yes(value: &str) -> bool {
    let s = value.trim().to_uppercase();
    matches!(s.as_str(), "YES" | "Y" | "TRUE" | "1") || s.starts_with("YES")
}

/// Percentage of `part` in `total`, one decimal place, halves to even
pub fn percentage(part: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    let pct = part as f64 / total as f64 * 100.0;
    Some((pct * 10.0).round_ties_even() / 10.0)
}

/// Distinct names when a name-like column exists, otherwise the row count
pub fn total_pipeline(records: &RecordSet, schema: &Schema) -> usize {
    match &schema.headcount {
        Some(guess) => records.distinct_count(&guess.column),
        None => records.len(),
    }
}

pub fn will_to_join_count(records: &RecordSet, schema: &Schema) -> usize {
    let Some(col) = schema
        .will_to_join
        .as_ref()
        .and_then(|g| records.column_index(&g.column))
    else {
        return 0;
    };

    records
        .column_values(col)
        .filter_map(|v| v.as_text())
        .filter(|v| is_yes(v))
        .count()
}

/// Rows whose `Level` contains "exper", ignoring case
pub fn experienced_count(records: &RecordSet) -> usize {
    let Some(col) = records.column_index(LEVEL_COLUMN) else {
        return 0;
    };

    records
        .column_values(col)
        .filter_map(|v| v.as_text())
        .filter(|v| v.to_uppercase().contains("EXPER"))
        .count()
}

pub fn scorecard(records: &RecordSet, schema: &Schema) -> Scorecard {
    let total = total_pipeline(records, schema);
    let will = will_to_join_count(records, schema);
    let experienced = experienced_count(records);

    Scorecard {
        total_pipeline: total,
        will_to_join: will,
        will_to_join_pct: percentage(will, total),
        experienced,
        experienced_pct: percentage(experienced, total),
        distinct_roles: records.distinct_count(ROLE_COLUMN),
    }
}

/// Count per short role label, ascending by count (ties by label).
///
/// With a role-count column only its non-empty values are counted;
/// otherwise every row counts. Without a `ROLE` column the result is empty.
pub fn role_counts(records: &RecordSet, schema: &Schema) -> Vec<RoleCount> {
    let Some(role_col) = records.column_index(ROLE_COLUMN) else {
        return Vec::new();
    };
    let count_col = schema
        .role_count
        .as_ref()
        .and_then(|g| records.column_index(&g.column));

    let mut groups: BTreeMap<String, usize> = BTreeMap::new();
    for row in records.rows() {
        let label = short_role_label(row[role_col].as_text().as_deref());
        let counted = match count_col {
            Some(col) => usize::from(!row[col].is_empty()),
            None => 1,
        };
        *groups.entry(label).or_insert(0) += counted;
    }

    let mut counts: Vec<RoleCount> = groups
        .into_iter()
        .map(|(label, count)| RoleCount { label, count })
        .collect();
    counts.sort_by_key(|c| c.count);
    counts
}

/// Rows per gender category, largest first
pub fn gender_counts(records: &RecordSet) -> Vec<GenderCount> {
    let Some(col) = records.column_index(GENDER_COLUMN) else {
        return Vec::new();
    };

    let mut groups: BTreeMap<GenderCategory, usize> = BTreeMap::new();
    for value in records.column_values(col) {
        let category = normalize_gender(value.as_text().as_deref());
        *groups.entry(category).or_insert(0) += 1;
    }

    let mut counts: Vec<GenderCount> = groups
        .into_iter()
        .map(|(category, count)| GenderCount { category, count })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::MatchReason;

    fn applicants() -> RecordSet {
        RecordSet::from_rows(
            &["Name", "Gender", "ROLE", "Level", "Will to Join"],
            &[
                vec!["Asha", "F", "Frontend, backend", "Experienced", "yes please"],
                vec!["Ravi", "Male", "Backend", "Fresher", "No"],
                vec!["Kiran", "female", "Backend developer", "experienced (2y)", "Y"],
                vec!["Asha", "F", "Frontend, backend", "Experienced", ""],
                vec!["", "NonBinary", "WordPress", "Fresher", "TRUE"],
            ],
        )
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("yes please"));
        assert!(is_yes(" y "));
        assert!(is_yes("1"));
        assert!(is_yes("True"));
        assert!(!is_yes("No"));
        assert!(!is_yes("maybe yes"));
    }

    #[test]
    fn test_percentage_rounds_halves_to_even() {
        assert_eq!(percentage(1, 80), Some(1.2));
        assert_eq!(percentage(1, 400), Some(0.2));
        assert_eq!(percentage(1, 3), Some(33.3));
        assert_eq!(percentage(0, 0), None);
    }

    #[test]
    fn test_scorecard() {
        let records = applicants();
        let schema = Schema::sniff(&records);
        let card = scorecard(&records, &schema);

        // Asha appears twice and the blank name is not counted
        assert_eq!(card.total_pipeline, 3);
        assert_eq!(card.will_to_join, 3);
        assert_eq!(card.will_to_join_pct, Some(100.0));
        assert_eq!(card.experienced, 3);
        assert_eq!(card.experienced_pct, Some(100.0));
        assert_eq!(card.distinct_roles, 4);
    }

    #[test]
    fn test_scorecard_without_name_column_counts_rows() {
        let records = RecordSet::from_rows(
            &["ROLE", "Level"],
            &[vec!["Frontend", "Experienced"], vec!["Backend", "Fresher"], vec!["Backend", ""]],
        );
        let schema = Schema::sniff(&records);
        let card = scorecard(&records, &schema);
        assert_eq!(card.total_pipeline, 3);
        assert_eq!(card.will_to_join, 0);
        assert_eq!(card.will_to_join_pct, Some(0.0));
        assert_eq!(card.experienced_pct, Some(33.3));
    }

    #[test]
    fn test_empty_pipeline_has_no_percentages() {
        let records = RecordSet::new(vec!["Name".into(), "Level".into(), "Will to Join".into()]);
        let schema = Schema::sniff(&records);
        let card = scorecard(&records, &schema);
        assert_eq!(card.total_pipeline, 0);
        assert_eq!(card.will_to_join_pct, None);
        assert_eq!(card.experienced_pct, None);
    }

    #[test]
    fn test_role_counts_ascending() {
        let records = applicants();
        let schema = Schema::sniff(&records);
        let counts = role_counts(&records, &schema);

        // The blank-name WordPress row is not counted against "Name"
        assert_eq!(
            counts,
            vec![
                RoleCount { label: "WordPress".into(), count: 0 },
                RoleCount { label: "Backend".into(), count: 2 },
                RoleCount { label: "Frontend / Backend".into(), count: 2 },
            ]
        );
    }

    #[test]
    fn test_role_counts_use_first_non_email_column() {
        let records = RecordSet::from_rows(
            &["Email", "ROLE", "Phone"],
            &[
                vec!["a@x.com", "Frontend", "555-0101"],
                vec!["b@x.com", "Frontend", ""],
                vec!["c@x.com", "Backend", "555-0103"],
                vec!["d@x.com", "Backend", "555-0104"],
                vec!["e@x.com", "Software Testing", ""],
            ],
        );
        let schema = Schema::sniff(&records);
        let guess = schema.role_count.as_ref().unwrap();
        assert_eq!(guess.column, "Phone");
        assert_eq!(guess.reason, MatchReason::NonEmailText);

        // Only non-empty Phone values count
        assert_eq!(
            role_counts(&records, &schema),
            vec![
                RoleCount { label: "Testing".into(), count: 0 },
                RoleCount { label: "Frontend".into(), count: 1 },
                RoleCount { label: "Backend".into(), count: 2 },
            ]
        );
    }

    #[test]
    fn test_role_counts_without_role_column() {
        let records = RecordSet::from_rows(&["Name"], &[vec!["Asha"]]);
        let schema = Schema::sniff(&records);
        assert!(role_counts(&records, &schema).is_empty());
    }

    #[test]
    fn test_gender_counts() {
        let counts = gender_counts(&applicants());
        assert_eq!(
            counts,
            vec![
                GenderCount { category: GenderCategory::Female, count: 3 },
                GenderCount { category: GenderCategory::Male, count: 1 },
                GenderCount { category: GenderCategory::Other, count: 1 },
            ]
        );
    }

    #[test]
    fn test_blank_gender_groups_as_unknown() {
        let records = RecordSet::from_rows(
            &["Name", "Gender"],
            &[
                vec!["Asha", "F"],
                vec!["Ravi", ""],
                vec!["Kiran", "NaN"],
                vec!["Meena", "female"],
                vec!["Arun", ""],
                vec!["Divya", "Female"],
            ],
        );
        assert_eq!(
            gender_counts(&records),
            vec![
                GenderCount { category: GenderCategory::Female, count: 3 },
                GenderCount { category: GenderCategory::Unknown, count: 3 },
            ]
        );
    }
}

//! Column-role detection from header names.
//!
//! Each sniffer is a pure function over the record set that returns the
//! guessed column together with the rule that matched, so callers can
//! report why a column was chosen. No match is never an error.

use crate::model::{RecordSet, GENDER_COLUMN, JOIN_DATE_COLUMN, LEVEL_COLUMN, ROLE_COLUMN};
use std::fmt;

/// Exact headers tried first when looking for the name column
pub const NAME_CANDIDATES: [&str; 5] = ["Name", "Full Name", "Employee", "Employee Name", "Emp Name"];

/// Columns never used as the role-count column (compared upper-cased)
const RESERVED_COLUMNS: [&str; 4] = ["ROLE", "DOJ", "LEVEL", "GENDER"];

/// Why a column was picked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchReason {
    /// Exact match against the preferred header list
    PreferredHeader,
    /// Header contains "NAME"
    ContainsName,
    /// Header contains both "WILL" and "JOIN"
    ContainsWillAndJoin,
    /// Header contains "WILL", "JOIN" or "JOINING"
    ContainsWillOrJoin,
    /// First non-reserved column whose values are mostly not emails
    NonEmailText,
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchReason::PreferredHeader => write!(f, "preferred header"),
            MatchReason::ContainsName => write!(f, "header contains NAME"),
            MatchReason::ContainsWillAndJoin => write!(f, "header contains WILL and JOIN"),
            MatchReason::ContainsWillOrJoin => write!(f, "header contains WILL or JOIN"),
            MatchReason::NonEmailText => write!(f, "first non-email column"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnGuess {
    pub column: String,
    pub reason: MatchReason,
}

impl ColumnGuess {
    fn new(column: &str, reason: MatchReason) -> Self {
        Self {
            column: column.to_string(),
            reason,
        }
    }
}

/// Column used by the name search
pub fn sniff_name_column(records: &RecordSet) -> Option<ColumnGuess> {
    for candidate in NAME_CANDIDATES {
        if records.has_column(candidate) {
            return Some(ColumnGuess::new(candidate, MatchReason::PreferredHeader));
        }
    }
    sniff_headcount_column(records)
}

/// First column whose header contains "NAME"; distinct values of this
/// column are the applicant headcount
pub fn sniff_headcount_column(records: &RecordSet) -> Option<ColumnGuess> {
    records
        .columns()
        .iter()
        .find(|c| c.to_uppercase().contains("NAME"))
        .map(|c| ColumnGuess::new(c, MatchReason::ContainsName))
}

pub fn sniff_will_to_join_column(records: &RecordSet) -> Option<ColumnGuess> {
    let upper: Vec<(String, &String)> = records
        .columns()
        .iter()
        .map(|c| (c.to_uppercase(), c))
        .collect();

    if let Some((_, c)) = upper
        .iter()
        .find(|(u, _)| u.contains("WILL") && u.contains("JOIN"))
    {
        return Some(ColumnGuess::new(c, MatchReason::ContainsWillAndJoin));
    }

    upper
        .iter()
        .find(|(u, _)| u.contains("JOIN") || u.contains("WILL") || u.contains("JOINING"))
        .map(|(_, c)| ColumnGuess::new(c, MatchReason::ContainsWillOrJoin))
}

/// Column whose non-empty values are counted per role group
pub fn sniff_role_count_column(records: &RecordSet) -> Option<ColumnGuess> {
    if let Some(guess) = sniff_headcount_column(records) {
        return Some(guess);
    }

    // An empty table has no email ratio, so nothing qualifies
    if records.is_empty() {
        return None;
    }

    records
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, c)| !RESERVED_COLUMNS.contains(&c.to_uppercase().as_str()))
        .find(|(idx, _)| email_ratio(records, *idx) < 0.5)
        .map(|(_, c)| ColumnGuess::new(c, MatchReason::NonEmailText))
}

/// Share of rows whose value contains '@'; missing values count as not
fn email_ratio(records: &RecordSet, col: usize) -> f64 {
    let emails = records
        .column_values(col)
        .filter(|v| v.to_string().contains('@'))
        .count();
    emails as f64 / records.len() as f64
}

/// All column guesses for one pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub name: Option<ColumnGuess>,
    pub headcount: Option<ColumnGuess>,
    pub will_to_join: Option<ColumnGuess>,
    pub role_count: Option<ColumnGuess>,
    pub has_gender: bool,
    pub has_role: bool,
    pub has_level: bool,
    pub has_join_date: bool,
}

impl Schema {
    pub fn sniff(records: &RecordSet) -> Self {
        let schema = Self {
            name: sniff_name_column(records),
            headcount: sniff_headcount_column(records),
            will_to_join: sniff_will_to_join_column(records),
            role_count: sniff_role_count_column(records),
            has_gender: records.has_column(GENDER_COLUMN),
            has_role: records.has_column(ROLE_COLUMN),
            has_level: records.has_column(LEVEL_COLUMN),
            has_join_date: records.has_column(JOIN_DATE_COLUMN),
        };
        log::debug!("Sniffed schema: {:?}", schema);
        schema
    }
}

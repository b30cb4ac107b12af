//! Plain-text rendering of a dashboard view for the terminal

use crate::aggregate::{GenderCount, RoleCount, Scorecard};
use crate::dashboard::DashboardView;

const BAR_WIDTH: usize = 40;

/// "(42.5%)" or nothing when there is no percentage
fn pct_suffix(pct: Option<f64>) -> String {
    match pct {
        Some(p) => format!(" ({:.1}%)", p),
        None => String::new(),
    }
}

pub fn render_scorecards(card: &Scorecard) -> String {
    let mut out = String::new();
    let cards = [
        ("Total Pipeline", card.total_pipeline.to_string(), "Total Applied"),
        (
            "Will to Join",
            format!("{}{}", card.will_to_join, pct_suffix(card.will_to_join_pct)),
            "Applicant Who Answered Yes",
        ),
        (
            "Experienced",
            format!("{}{}", card.experienced, pct_suffix(card.experienced_pct)),
            "Level contains 'Experienced'",
        ),
        ("Total Roles", card.distinct_roles.to_string(), "Count ROLE"),
    ];

    for (title, value, sub) in cards {
        out.push_str(&format!("{:<16} {:>12}   {}\n", title, value, sub));
    }
    out
}

/// Horizontal bars in the order given (ascending counts put the largest last)
pub fn render_role_chart(counts: &[RoleCount]) -> String {
    let mut out = String::new();
    if counts.is_empty() {
        out.push_str("  (no roles)\n");
        return out;
    }

    let max = counts.iter().map(|c| c.count).max().unwrap_or(0);
    let label_width = counts.iter().map(|c| c.label.chars().count()).max().unwrap_or(0);

    for count in counts {
        let len = if max == 0 {
            0
        } else {
            (count.count * BAR_WIDTH + max - 1) / max
        };
        out.push_str(&format!(
            "  {:<width$} | {} {}\n",
            count.label,
            "#".repeat(len),
            count.count,
            width = label_width
        ));
    }
    out
}

/// Gender ratio as value and share of the total
pub fn render_gender_ratio(counts: &[GenderCount]) -> String {
    let mut out = String::new();
    let total: usize = counts.iter().map(|c| c.count).sum();
    if total == 0 {
        out.push_str("  (no gender data)\n");
        return out;
    }

    for count in counts {
        let share = count.count as f64 / total as f64 * 100.0;
        out.push_str(&format!(
            "  {:<8} {:>6}  {:>5.1}%\n",
            count.category.as_str(),
            count.count,
            share
        ));
    }
    out
}

/// Full text dashboard: warnings, scorecards and both charts
pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = String::new();

    for warning in &view.warnings {
        out.push_str(&format!("Warning: {}\n", warning));
    }
    if !view.warnings.is_empty() {
        out.push('\n');
    }

    out.push_str("HR Dashboard report\n\n");
    out.push_str(&render_scorecards(&view.scorecard));

    out.push_str("\nEmployees by Role\n");
    out.push_str(&render_role_chart(&view.role_counts));

    out.push_str("\nGender Ratio\n");
    out.push_str(&render_gender_ratio(&view.gender_counts));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::GenderCategory;

    #[test]
    fn test_scorecards_blank_percentages_for_empty_pipeline() {
        let text = render_scorecards(&Scorecard::default());
        assert!(text.contains("Will to Join"));
        assert!(!text.contains('%'));
    }

    #[test]
    fn test_scorecards_show_percentages() {
        let card = Scorecard {
            total_pipeline: 4,
            will_to_join: 1,
            will_to_join_pct: Some(25.0),
            experienced: 3,
            experienced_pct: Some(75.0),
            distinct_roles: 2,
        };
        let text = render_scorecards(&card);
        assert!(text.contains("1 (25.0%)"));
        assert!(text.contains("3 (75.0%)"));
    }

    #[test]
    fn test_role_chart_scales_bars() {
        let counts = vec![
            RoleCount { label: "Testing".into(), count: 1 },
            RoleCount { label: "Frontend".into(), count: 4 },
        ];
        let text = render_role_chart(&counts);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(&"#".repeat(10)));
        assert!(lines[1].contains(&"#".repeat(BAR_WIDTH)));
        assert!(lines[1].ends_with(" 4"));
    }

    #[test]
    fn test_gender_ratio_percentages() {
        let counts = vec![
            GenderCount { category: GenderCategory::Female, count: 3 },
            GenderCount { category: GenderCategory::Male, count: 1 },
        ];
        let text = render_gender_ratio(&counts);
        assert!(text.contains("75.0%"));
        assert!(text.contains("25.0%"));
    }
}

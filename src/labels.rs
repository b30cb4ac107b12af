//! Free-text role and gender values collapsed to a small vocabulary

use serde::{Serialize, Serializer};
use std::fmt;

/// Ordered substring rules for role parts; the first key found wins
const ROLE_RULES: [(&str, &str); 9] = [
    ("frontend", "Frontend"),
    ("backend", "Backend"),
    ("software testing", "Testing"),
    ("software test", "Testing"),
    ("wordpress", "WordPress"),
    ("webdesign", "Design"),
    ("web designing", "Design"),
    ("digital marketing", "Marketing"),
    ("digital", "Marketing"),
];

pub const UNKNOWN_LABEL: &str = "Unknown";

/// Short label for a role string such as "Frontend, backend".
///
/// Each comma-separated part maps through `ROLE_RULES`; parts with no rule
/// keep their first two words, title-cased. Parts are joined with " / ".
pub fn short_role_label(role: Option<&str>) -> String {
    let Some(role) = role else {
        return UNKNOWN_LABEL.to_string();
    };

    let labels: Vec<String> = role
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(short_part_label)
        .collect();

    if labels.is_empty() {
        UNKNOWN_LABEL.to_string()
    } else {
        labels.join(" / ")
    }
}

fn short_part_label(part: &str) -> String {
    let key = part.to_lowercase();
    ROLE_RULES
        .iter()
        .find(|(needle, _)| key.contains(needle))
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| {
            title_case(part)
                .split_whitespace()
                .take(2)
                .collect::<Vec<_>>()
                .join(" ")
        })
}

/// Capitalise the first letter of every run of letters and lower-case the
/// rest ("o'neil 3d" becomes "O'Neil 3D")
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(c);
            prev_cased = false;
        }
    }

    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GenderCategory {
    Male,
    Female,
    Other,
    Unknown,
}

impl GenderCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenderCategory::Male => "Male",
            GenderCategory::Female => "Female",
            GenderCategory::Other => "Other",
            GenderCategory::Unknown => "Unknown",
        }
    }

    /// Chart colour for the category
    pub fn color(&self) -> &'static str {
        match self {
            GenderCategory::Male => "#1F77B4",
            GenderCategory::Female => "#FF69B4",
            GenderCategory::Other => "#8C8C8C",
            GenderCategory::Unknown => "#6C6C6C",
        }
    }
}

impl fmt::Display for GenderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for GenderCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Exact, case-insensitive gender mapping; missing values are `Unknown`
pub fn normalize_gender(value: Option<&str>) -> GenderCategory {
    let Some(value) = value else {
        return GenderCategory::Unknown;
    };

    match value.trim().to_lowercase().as_str() {
        "male" | "m" | "man" => GenderCategory::Male,
        "female" | "f" | "woman" | "fem" => GenderCategory::Female,
        "unknown" | "nan" | "" => GenderCategory::Unknown,
        _ => GenderCategory::Other,
    }
}

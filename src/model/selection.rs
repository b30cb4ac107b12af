use std::collections::BTreeSet;

/// User filter choices for one render pass.
///
/// An empty set places no constraint on its dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub name_query: Option<String>,
    pub gender: BTreeSet<String>,
    pub role: BTreeSet<String>,
    pub level: BTreeSet<String>,
    pub join_month: BTreeSet<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.name_query = if query.is_empty() { None } else { Some(query) };
        self
    }

    pub fn with_gender<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gender = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_role<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.role = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_level<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.level = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_join_month<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.join_month = values.into_iter().map(Into::into).collect();
        self
    }
}

use serde::{Deserialize, Serialize};

use crate::params::Params;
use crate::sort::Sort;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupFormat {
    Grouped,
    Simple,
}

/// `group.*` request parameters.
///
/// Field clauses produce one group per distinct value of the field; query
/// clauses produce exactly one group per query. Both kinds may be mixed in a
/// single request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupingParameters {
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub queries: Vec<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    #[serde(default)]
    pub sort: Vec<Sort>,
    /// Ask the server for the distinct group count of each field clause.
    pub ngroups: Option<bool>,
    pub main: Option<bool>,
    pub facet: Option<bool>,
    pub truncate: Option<bool>,
    pub format: Option<GroupFormat>,
}

impl GroupingParameters {
    pub fn by_field(field: impl Into<String>) -> Self {
        Self {
            fields: vec![field.into()],
            ..Self::default()
        }
    }

    pub fn by_query(query: impl Into<String>) -> Self {
        Self {
            queries: vec![query.into()],
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.queries.is_empty()
    }

    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        if self.is_empty() {
            return params;
        }
        params.push("group", true);
        for field in &self.fields {
            params.push("group.field", field);
        }
        for query in &self.queries {
            params.push("group.query", query);
        }
        params.push_opt("group.limit", self.limit);
        params.push_opt("group.offset", self.offset);
        if !self.sort.is_empty() {
            params.push("group.sort", Sort::join(&self.sort));
        }
        params.push_opt("group.ngroups", self.ngroups);
        params.push_opt("group.main", self.main);
        params.push_opt("group.facet", self.facet);
        params.push_opt("group.truncate", self.truncate);
        params.push_opt(
            "group.format",
            self.format.map(|f| match f {
                GroupFormat::Grouped => "grouped",
                GroupFormat::Simple => "simple",
            }),
        );
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grouping_emits_nothing() {
        assert!(GroupingParameters::default().to_params().is_empty());
    }

    #[test]
    fn field_and_query_clauses() {
        let grouping = GroupingParameters {
            fields: vec!["category".into(), "brand".into()],
            queries: vec!["price:[0 TO 10]".into()],
            limit: Some(3),
            ngroups: Some(true),
            ..GroupingParameters::default()
        };
        let params = grouping.to_params();

        assert_eq!(params.get("group"), Some("true"));
        assert_eq!(
            params.get_all("group.field").collect::<Vec<_>>(),
            vec!["category", "brand"]
        );
        assert_eq!(params.get("group.query"), Some("price:[0 TO 10]"));
        assert_eq!(params.get("group.limit"), Some("3"));
        assert_eq!(params.get("group.ngroups"), Some("true"));
        assert_eq!(params.get("group.offset"), None);
    }

    #[test]
    fn group_sort_and_format() {
        let grouping = GroupingParameters {
            sort: vec![Sort::desc("popularity")],
            format: Some(GroupFormat::Simple),
            ..GroupingParameters::by_field("category")
        };
        let params = grouping.to_params();
        assert_eq!(params.get("group.sort"), Some("popularity desc"));
        assert_eq!(params.get("group.format"), Some("simple"));
    }
}

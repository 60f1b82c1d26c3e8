use serde::{Deserialize, Serialize};

use crate::grouping::GroupingParameters;
use crate::params::Params;
use crate::sort::Sort;

pub(crate) const MATCH_ALL: &str = "*:*";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryOptions {
    pub query: Option<String>,
    #[serde(default)]
    pub filter_queries: Vec<String>,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub sort: Vec<Sort>,
    pub start: Option<usize>,
    pub rows: Option<usize>,
    #[serde(default)]
    pub grouping: GroupingParameters,
}

impl QueryOptions {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.push("q", self.query.as_deref().unwrap_or(MATCH_ALL));
        for fq in &self.filter_queries {
            params.push("fq", fq);
        }
        if !self.fields.is_empty() {
            params.push("fl", self.fields.join(","));
        }
        if !self.sort.is_empty() {
            params.push("sort", Sort::join(&self.sort));
        }
        params.push_opt("start", self.start);
        params.push_opt("rows", self.rows);
        params.extend(self.grouping.to_params());
        params.push("wt", "xml");
        params
    }
}

use serde::{Deserialize, Serialize};

use crate::params::Params;
use crate::query::MATCH_ALL;

/// Options for the "more like this" handler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoreLikeThisOptions {
    pub query: Option<String>,
    #[serde(default)]
    pub fields: Vec<String>,
    pub min_term_freq: Option<u32>,
    pub min_doc_freq: Option<u32>,
    pub rows: Option<usize>,
    pub match_include: Option<bool>,
}

impl MoreLikeThisOptions {
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.push("q", self.query.as_deref().unwrap_or(MATCH_ALL));
        if !self.fields.is_empty() {
            params.push("mlt.fl", self.fields.join(","));
        }
        params.push_opt("mlt.mintf", self.min_term_freq);
        params.push_opt("mlt.mindf", self.min_doc_freq);
        params.push_opt("mlt.match.include", self.match_include);
        params.push_opt("rows", self.rows);
        params.push("wt", "xml");
        params
    }
}

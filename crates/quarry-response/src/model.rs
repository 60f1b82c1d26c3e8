use serde::Serialize;
use serde::ser::Serializer;

/// Which kind of response the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    Query,
    MoreLikeThis,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponseHeader {
    pub status: i32,
    pub qtime: u64,
    /// Echoed request parameters in document order. Multi-valued parameters
    /// appear once per value.
    pub params: Vec<(String, String)>,
}

impl ResponseHeader {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// One bucket of a grouping clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group<T> {
    /// Field value of the bucket, the clause name for query grouping, or the
    /// configured null value when the field is empty.
    pub group_value: String,
    /// Documents matching within the group. May exceed `documents.len()`
    /// when the group limit truncates the list.
    pub num_found: u64,
    pub documents: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedResults<T> {
    pub groups: Vec<Group<T>>,
    pub matches: u64,
    /// Distinct group count as reported by the server. Only field grouping
    /// carries it, and only when the request set `group.ngroups=true`.
    pub ngroups: Option<u64>,
}

/// Grouping clauses by name, in the order the response declared them.
#[derive(Debug, Clone, PartialEq)]
pub struct Grouping<T> {
    clauses: Vec<(String, GroupedResults<T>)>,
}

impl<T> Grouping<T> {
    pub fn new() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    /// Appends a clause. Names are not checked here; `get` returns the
    /// first clause with a given name.
    pub fn insert(&mut self, name: impl Into<String>, results: GroupedResults<T>) {
        self.clauses.push((name.into(), results));
    }

    pub fn get(&self, name: &str) -> Option<&GroupedResults<T>> {
        self.clauses
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, results)| results)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.clauses.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GroupedResults<T>)> {
        self.clauses.iter().map(|(n, r)| (n.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl<T> Default for Grouping<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize> Serialize for Grouping<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.clauses.iter().map(|(n, r)| (n, r)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResults<T> {
    pub header: ResponseHeader,
    pub num_found: u64,
    pub start: u64,
    pub max_score: Option<f64>,
    pub documents: Vec<T>,
    pub grouping: Grouping<T>,
}

impl<T> Default for QueryResults<T> {
    fn default() -> Self {
        Self {
            header: ResponseHeader::default(),
            num_found: 0,
            start: 0,
            max_score: None,
            documents: Vec::new(),
            grouping: Grouping::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoreLikeThisResults<T> {
    pub header: ResponseHeader,
    pub num_found: u64,
    pub start: u64,
    pub max_score: Option<f64>,
    pub documents: Vec<T>,
    /// The document similar documents were found for, when the handler
    /// was asked to include it.
    pub matched: Option<T>,
}

impl<T> Default for MoreLikeThisResults<T> {
    fn default() -> Self {
        Self {
            header: ResponseHeader::default(),
            num_found: 0,
            start: 0,
            max_score: None,
            documents: Vec::new(),
            matched: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchResponse<T> {
    Query(QueryResults<T>),
    MoreLikeThis(MoreLikeThisResults<T>),
}

impl<T> SearchResponse<T> {
    pub fn empty(kind: ResponseKind) -> Self {
        match kind {
            ResponseKind::Query => SearchResponse::Query(QueryResults::default()),
            ResponseKind::MoreLikeThis => {
                SearchResponse::MoreLikeThis(MoreLikeThisResults::default())
            }
        }
    }

    pub fn kind(&self) -> ResponseKind {
        match self {
            SearchResponse::Query(_) => ResponseKind::Query,
            SearchResponse::MoreLikeThis(_) => ResponseKind::MoreLikeThis,
        }
    }

    pub fn header(&self) -> &ResponseHeader {
        match self {
            SearchResponse::Query(r) => &r.header,
            SearchResponse::MoreLikeThis(r) => &r.header,
        }
    }

    pub fn into_query(self) -> Option<QueryResults<T>> {
        match self {
            SearchResponse::Query(r) => Some(r),
            SearchResponse::MoreLikeThis(_) => None,
        }
    }

    pub fn into_more_like_this(self) -> Option<MoreLikeThisResults<T>> {
        match self {
            SearchResponse::Query(_) => None,
            SearchResponse::MoreLikeThis(r) => Some(r),
        }
    }
}

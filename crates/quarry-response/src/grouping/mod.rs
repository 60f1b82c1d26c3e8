//! Decoding of the `grouped` response section.
//!
//! Field grouping yields a `<lst>` per clause holding `matches`, an optional
//! `ngroups` and an `<arr name="groups">` of value buckets. Query grouping
//! yields a `<lst>` per clause holding `matches` and the clause's document
//! list. Responses without a recognizable layout decode to an empty
//! [`Grouping`].

mod field;
mod query;
mod shape;

use roxmltree::Node;
use tracing::debug;

use crate::decoder::ResponseParser;
use crate::document::DocumentParser;
use crate::error::StructuralError;
use crate::model::{Grouping, SearchResponse};
use crate::node::{elements, require_attr, require_tagged_child, required_int_attr};

pub use shape::{GroupingShape, detect, detect_clause, grouped_container};

/// Group value reported for documents whose grouping field has no value.
///
/// A real field value equal to this string cannot be told apart from an
/// empty field. Use [`GroupingParser::with_null_value`] to pick a value that
/// cannot occur in the indexed data.
pub const UNMATCHED_GROUP_VALUE: &str = "UNMATCHED";

#[derive(Debug, Clone)]
pub struct GroupingParser {
    null_value: String,
}

impl Default for GroupingParser {
    fn default() -> Self {
        Self {
            null_value: UNMATCHED_GROUP_VALUE.to_string(),
        }
    }
}

impl GroupingParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_null_value(null_value: impl Into<String>) -> Self {
        Self {
            null_value: null_value.into(),
        }
    }

    pub fn null_value(&self) -> &str {
        &self.null_value
    }

    /// Decodes every clause of the `grouped` section under `root`.
    ///
    /// The mapping is only returned once all clauses decoded; a failing
    /// clause fails the whole call. Clause names must be unique.
    pub fn parse_grouping<P: DocumentParser>(
        &self,
        root: Node<'_, '_>,
        documents: &P,
    ) -> Result<Grouping<P::Record>, P::Error> {
        let mut grouping = Grouping::new();

        let shape = detect(root);
        let grouped = match (shape, grouped_container(root)) {
            (GroupingShape::NotGrouped, _) | (_, None) => {
                debug!("response carries no recognizable grouping");
                return Ok(grouping);
            }
            (_, Some(grouped)) => grouped,
        };
        debug!(?shape, "decoding grouped response");

        for clause in elements(grouped) {
            let name = require_attr(clause, "name")?;
            if grouping.get(name).is_some() {
                return Err(StructuralError::DuplicateClause(name.to_string()).into());
            }
            // A clause keeps its own layout when it has one, so mixed field
            // and query clauses each decode correctly.
            let clause_shape = match detect_clause(clause) {
                GroupingShape::NotGrouped => shape,
                own => own,
            };
            let results = match clause_shape {
                GroupingShape::FieldGrouping => field::decode(clause, documents, &self.null_value)?,
                GroupingShape::QueryGrouping => query::decode(name, clause, documents)?,
                // The response-wide shape is known to be recognized here.
                GroupingShape::NotGrouped => continue,
            };
            debug!(
                clause = name,
                shape = ?clause_shape,
                groups = results.groups.len(),
                matches = results.matches,
                "decoded grouping clause"
            );
            grouping.insert(name, results);
        }

        Ok(grouping)
    }
}

impl<P: DocumentParser> ResponseParser<P> for GroupingParser {
    fn parse(
        &self,
        root: Node<'_, '_>,
        documents: &P,
        response: &mut SearchResponse<P::Record>,
    ) -> Result<(), P::Error> {
        match response {
            SearchResponse::Query(results) => {
                results.grouping = self.parse_grouping(root, documents)?;
            }
            SearchResponse::MoreLikeThis(_) => {}
        }
        Ok(())
    }
}

/// Reads the `<result name="doclist">` child of a group: its declared
/// `numFound` and the parsed documents.
fn doclist<P: DocumentParser>(
    node: Node<'_, '_>,
    documents: &P,
) -> Result<(u64, Vec<P::Record>), P::Error> {
    let result = require_tagged_child(node, "result", "doclist")?;
    let num_found = required_int_attr(result, "numFound")?;
    let docs = documents.parse_documents(result)?;
    Ok((num_found, docs))
}

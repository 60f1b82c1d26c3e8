use roxmltree::Node;
use tracing::trace;

use crate::document::DocumentParser;
use crate::model::{Group, GroupedResults};
use crate::node::required_int_child;

use super::doclist;

/// A query clause always yields a single group named after the clause.
pub(crate) fn decode<P: DocumentParser>(
    name: &str,
    clause: Node<'_, '_>,
    documents: &P,
) -> Result<GroupedResults<P::Record>, P::Error> {
    let matches = required_int_child(clause, "matches")?;
    let (num_found, docs) = doclist(clause, documents)?;
    trace!(clause = name, num_found, "decoded query group");

    Ok(GroupedResults {
        groups: vec![Group {
            group_value: name.to_string(),
            num_found,
            documents: docs,
        }],
        matches,
        ngroups: None,
    })
}

use roxmltree::Node;

use crate::node::{elements, named_child, tagged_child};

/// How the `grouped` section of a response is laid out.
///
/// The response does not say which grouping mode produced a clause, so the
/// shape is recognized from the nodes present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingShape {
    /// `<arr name="groups">` of `<lst>` entries, one per field value.
    FieldGrouping,
    /// A `matches` count directly followed by the clause's document list.
    QueryGrouping,
    /// No grouping section, or one that matches no known layout.
    NotGrouped,
}

type Predicate = fn(Node<'_, '_>) -> bool;

/// Evaluated in order; the first predicate matching wins.
const PREDICATES: &[(GroupingShape, Predicate)] = &[
    (GroupingShape::FieldGrouping, has_group_array),
    (GroupingShape::QueryGrouping, has_matches_then_doclist),
];

/// The `<lst name="grouped">` container under the response root.
pub fn grouped_container<'a, 'input>(root: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    tagged_child(root, "lst", "grouped")
}

/// Classifies a whole response. A predicate matches if any clause satisfies it.
pub fn detect(root: Node<'_, '_>) -> GroupingShape {
    let Some(grouped) = grouped_container(root) else {
        return GroupingShape::NotGrouped;
    };
    PREDICATES
        .iter()
        .find(|(_, predicate)| elements(grouped).any(|clause| predicate(clause)))
        .map_or(GroupingShape::NotGrouped, |(shape, _)| *shape)
}

/// Classifies a single clause node.
pub fn detect_clause(clause: Node<'_, '_>) -> GroupingShape {
    PREDICATES
        .iter()
        .find(|(_, predicate)| predicate(clause))
        .map_or(GroupingShape::NotGrouped, |(shape, _)| *shape)
}

fn has_group_array(clause: Node<'_, '_>) -> bool {
    tagged_child(clause, "arr", "groups").is_some()
}

fn has_matches_then_doclist(clause: Node<'_, '_>) -> bool {
    named_child(clause, "matches")
        .and_then(|matches| matches.next_sibling_element())
        .is_some_and(|next| next.has_tag_name("result"))
}

//! Helpers over response nodes.
//!
//! Response sections are `<lst>`, `<arr>`, `<result>` and scalar elements
//! identified by their `name` attribute, e.g. `<int name="matches">12</int>`.
//! Counts are read either from such a named child or from an XML attribute
//! (`numFound` on `<result>`).

use std::str::FromStr;

use roxmltree::Node;

use crate::error::StructuralError;

pub fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

/// First child element whose `name` attribute equals `name`, whatever its tag.
pub fn named_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    elements(node).find(|n| n.attribute("name") == Some(name))
}

/// First child `<tag name="name">`.
pub fn tagged_child<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
    name: &str,
) -> Option<Node<'a, 'input>> {
    elements(node).find(|n| n.has_tag_name(tag) && n.attribute("name") == Some(name))
}

pub fn require_tagged_child<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
    name: &str,
) -> Result<Node<'a, 'input>, StructuralError> {
    tagged_child(node, tag, name).ok_or_else(|| StructuralError::MissingElement {
        parent: describe(node),
        element: tag.to_string(),
        name: name.to_string(),
    })
}

pub fn require_attr<'a>(node: Node<'a, '_>, attr: &str) -> Result<&'a str, StructuralError> {
    node.attribute(attr)
        .ok_or_else(|| StructuralError::MissingAttribute {
            element: describe(node),
            attribute: attr.to_string(),
        })
}

/// Integer XML attribute, e.g. `numFound` on a document list.
pub fn required_int_attr(node: Node<'_, '_>, attr: &str) -> Result<u64, StructuralError> {
    parse_int(attr, require_attr(node, attr)?)
}

/// Integer held by the child element named `name`.
pub fn required_int_child(node: Node<'_, '_>, name: &str) -> Result<u64, StructuralError> {
    let child = named_child(node, name).ok_or_else(|| StructuralError::MissingElement {
        parent: describe(node),
        element: "int".to_string(),
        name: name.to_string(),
    })?;
    parse_int(name, child.text().unwrap_or_default())
}

/// Like [`required_int_child`], but a missing child is `Ok(None)`. A child
/// that is present but not numeric is still an error.
pub fn optional_int_child(node: Node<'_, '_>, name: &str) -> Result<Option<u64>, StructuralError> {
    named_child(node, name)
        .map(|child| parse_int(name, child.text().unwrap_or_default()))
        .transpose()
}

pub fn parse_int<T: FromStr>(name: &str, text: &str) -> Result<T, StructuralError> {
    text.trim()
        .parse()
        .map_err(|_| StructuralError::InvalidInteger {
            name: name.to_string(),
            value: text.to_string(),
        })
}

pub fn parse_float(name: &str, text: &str) -> Result<f64, StructuralError> {
    text.trim()
        .parse()
        .map_err(|_| StructuralError::InvalidFloat {
            name: name.to_string(),
            value: text.to_string(),
        })
}

fn describe(node: Node<'_, '_>) -> String {
    match node.attribute("name") {
        Some(name) => format!("{} name=\"{name}\"", node.tag_name().name()),
        None => node.tag_name().name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLAUSE: &str = r#"<lst name="category">
        <int name="matches">12</int>
        <int name="ngroups"> 4 </int>
        <str name="bad">twelve</str>
        <result name="doclist" numFound="3" start="0"/>
        <result name="broken" numFound="-1"/>
    </lst>"#;

    fn with_clause<R>(f: impl FnOnce(Node<'_, '_>) -> R) -> R {
        let doc = roxmltree::Document::parse(CLAUSE).unwrap();
        f(doc.root_element())
    }

    #[test]
    fn reads_required_child() {
        with_clause(|clause| assert_eq!(required_int_child(clause, "matches").unwrap(), 12));
    }

    #[test]
    fn trims_whitespace() {
        with_clause(|clause| assert_eq!(optional_int_child(clause, "ngroups").unwrap(), Some(4)));
    }

    #[test]
    fn missing_optional_child_is_none() {
        with_clause(|clause| assert_eq!(optional_int_child(clause, "absent").unwrap(), None));
    }

    #[test]
    fn malformed_optional_child_is_an_error() {
        with_clause(|clause| {
            let err = optional_int_child(clause, "bad").unwrap_err();
            assert_eq!(
                err,
                StructuralError::InvalidInteger {
                    name: "bad".into(),
                    value: "twelve".into(),
                }
            );
        });
    }

    #[test]
    fn missing_required_child() {
        with_clause(|clause| {
            let err = required_int_child(clause, "absent").unwrap_err();
            assert!(matches!(err, StructuralError::MissingElement { .. }));
            assert!(err.to_string().contains("lst name=\"category\""));
        });
    }

    #[test]
    fn reads_attribute() {
        with_clause(|clause| {
            let doclist = require_tagged_child(clause, "result", "doclist").unwrap();
            assert_eq!(required_int_attr(doclist, "numFound").unwrap(), 3);
            assert!(matches!(
                required_int_attr(doclist, "maxScore"),
                Err(StructuralError::MissingAttribute { .. })
            ));
        });
    }

    #[test]
    fn negative_count_is_rejected() {
        with_clause(|clause| {
            let broken = require_tagged_child(clause, "result", "broken").unwrap();
            assert!(matches!(
                required_int_attr(broken, "numFound"),
                Err(StructuralError::InvalidInteger { .. })
            ));
        });
    }
}

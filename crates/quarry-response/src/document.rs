use bson::{Bson, Document};
use roxmltree::Node;

use crate::error::{ResponseError, StructuralError};
use crate::node::{elements, parse_float, parse_int};

/// Turns a document list (`<result>` element) into typed records.
///
/// Decoders are generic over the parser and hand every document list they
/// find to it. Errors from the parser reach the caller unchanged, so the
/// error type must also be able to carry the decoders' own failures.
pub trait DocumentParser {
    type Record;
    type Error: From<StructuralError> + From<roxmltree::Error>;

    fn parse_documents(&self, result: Node<'_, '_>) -> Result<Vec<Self::Record>, Self::Error>;
}

/// Maps each `<doc>` into a [`bson::Document`], keyed by field name.
#[derive(Debug, Clone, Copy, Default)]
pub struct BsonDocumentParser;

impl DocumentParser for BsonDocumentParser {
    type Record = Document;
    type Error = ResponseError;

    fn parse_documents(&self, result: Node<'_, '_>) -> Result<Vec<Document>, ResponseError> {
        elements(result)
            .filter(|n| n.has_tag_name("doc"))
            .map(parse_fields)
            .collect()
    }
}

fn parse_fields(node: Node<'_, '_>) -> Result<Document, ResponseError> {
    let mut doc = Document::new();
    for field in elements(node) {
        // Unnamed values only occur inside arrays.
        let Some(name) = field.attribute("name") else {
            continue;
        };
        doc.insert(name, parse_value(field, name)?);
    }
    Ok(doc)
}

fn parse_value(node: Node<'_, '_>, field: &str) -> Result<Bson, ResponseError> {
    let text = node.text().unwrap_or_default();
    let value = match node.tag_name().name() {
        "str" => Bson::String(text.to_string()),
        "int" => Bson::Int32(parse_int(field, text).map_err(|_| invalid(field, "int", text))?),
        "long" => Bson::Int64(parse_int(field, text).map_err(|_| invalid(field, "long", text))?),
        "float" | "double" => {
            Bson::Double(parse_float(field, text).map_err(|_| invalid(field, "float", text))?)
        }
        "bool" => match text.trim() {
            "true" => Bson::Boolean(true),
            "false" => Bson::Boolean(false),
            _ => return Err(invalid(field, "bool", text)),
        },
        "date" => match bson::DateTime::parse_rfc3339_str(text.trim()) {
            Ok(dt) => Bson::DateTime(dt),
            Err(_) => Bson::String(text.to_string()),
        },
        "arr" => Bson::Array(
            elements(node)
                .map(|item| parse_value(item, field))
                .collect::<Result<_, _>>()?,
        ),
        "lst" | "doc" => Bson::Document(parse_fields(node)?),
        "null" => Bson::Null,
        _ => Bson::String(text.to_string()),
    };
    Ok(value)
}

fn invalid(field: &str, kind: &str, value: &str) -> ResponseError {
    ResponseError::Field {
        field: field.to_string(),
        kind: kind.to_string(),
        value: value.to_string(),
    }
}

use roxmltree::Node;

use crate::decoder::ResponseParser;
use crate::document::DocumentParser;
use crate::error::StructuralError;
use crate::model::{ResponseHeader, SearchResponse};
use crate::node::{elements, named_child, parse_int, required_int_child, tagged_child};

/// Reads `<lst name="responseHeader">`. A response without one keeps the
/// default header.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderParser;

impl HeaderParser {
    pub fn parse_header(root: Node<'_, '_>) -> Result<Option<ResponseHeader>, StructuralError> {
        let Some(node) = tagged_child(root, "lst", "responseHeader") else {
            return Ok(None);
        };

        let status = match named_child(node, "status") {
            Some(status) => parse_int("status", status.text().unwrap_or_default())?,
            None => 0,
        };
        let qtime = required_int_child(node, "QTime")?;

        let mut params = Vec::new();
        if let Some(list) = tagged_child(node, "lst", "params") {
            for param in elements(list) {
                let Some(key) = param.attribute("name") else {
                    continue;
                };
                if param.has_tag_name("arr") {
                    for value in elements(param) {
                        params.push((key.to_string(), value.text().unwrap_or_default().to_string()));
                    }
                } else {
                    params.push((key.to_string(), param.text().unwrap_or_default().to_string()));
                }
            }
        }

        Ok(Some(ResponseHeader {
            status,
            qtime,
            params,
        }))
    }
}

impl<P: DocumentParser> ResponseParser<P> for HeaderParser {
    fn parse(
        &self,
        root: Node<'_, '_>,
        _documents: &P,
        response: &mut SearchResponse<P::Record>,
    ) -> Result<(), P::Error> {
        let Some(header) = Self::parse_header(root)? else {
            return Ok(());
        };
        match response {
            SearchResponse::Query(r) => r.header = header,
            SearchResponse::MoreLikeThis(r) => r.header = header,
        }
        Ok(())
    }
}

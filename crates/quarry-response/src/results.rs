use roxmltree::Node;

use crate::decoder::ResponseParser;
use crate::document::DocumentParser;
use crate::model::SearchResponse;
use crate::node::{parse_float, required_int_attr, tagged_child};

/// Reads the main `<result name="response">` document list, and for
/// more-like-this responses the `<result name="match">` seed document.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultsParser;

struct ResultSection<T> {
    num_found: u64,
    start: u64,
    max_score: Option<f64>,
    documents: Vec<T>,
}

fn parse_section<P: DocumentParser>(
    root: Node<'_, '_>,
    name: &str,
    documents: &P,
) -> Result<Option<ResultSection<P::Record>>, P::Error> {
    // Grouped-only responses leave the main result out.
    let Some(result) = tagged_child(root, "result", name) else {
        return Ok(None);
    };
    let num_found = required_int_attr(result, "numFound")?;
    let start = match result.attribute("start") {
        Some(_) => required_int_attr(result, "start")?,
        None => 0,
    };
    let max_score = result
        .attribute("maxScore")
        .map(|s| parse_float("maxScore", s))
        .transpose()?;
    Ok(Some(ResultSection {
        num_found,
        start,
        max_score,
        documents: documents.parse_documents(result)?,
    }))
}

impl<P: DocumentParser> ResponseParser<P> for ResultsParser {
    fn parse(
        &self,
        root: Node<'_, '_>,
        documents: &P,
        response: &mut SearchResponse<P::Record>,
    ) -> Result<(), P::Error> {
        let main = parse_section(root, "response", documents)?;
        match response {
            SearchResponse::Query(r) => {
                if let Some(section) = main {
                    r.num_found = section.num_found;
                    r.start = section.start;
                    r.max_score = section.max_score;
                    r.documents = section.documents;
                }
            }
            SearchResponse::MoreLikeThis(r) => {
                if let Some(section) = main {
                    r.num_found = section.num_found;
                    r.start = section.start;
                    r.max_score = section.max_score;
                    r.documents = section.documents;
                }
                r.matched = parse_section(root, "match", documents)?
                    .and_then(|m| m.documents.into_iter().next());
            }
        }
        Ok(())
    }
}

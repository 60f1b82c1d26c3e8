use roxmltree::{Document, Node};

use crate::document::DocumentParser;
use crate::error::StructuralError;
use crate::grouping::GroupingParser;
use crate::header::HeaderParser;
use crate::model::{MoreLikeThisResults, QueryResults, ResponseKind, SearchResponse};
use crate::results::ResultsParser;

/// Decodes one section of a response into the matching fields of a
/// [`SearchResponse`]. Parsers ignore variants they have nothing to add to.
pub trait ResponseParser<P: DocumentParser> {
    fn parse(
        &self,
        root: Node<'_, '_>,
        documents: &P,
        response: &mut SearchResponse<P::Record>,
    ) -> Result<(), P::Error>;
}

pub struct ResponseDecoder<P: DocumentParser> {
    documents: P,
    parsers: Vec<Box<dyn ResponseParser<P> + Send + Sync>>,
}

impl<P: DocumentParser> ResponseDecoder<P> {
    pub fn new(documents: P) -> Self {
        Self::with_grouping(documents, GroupingParser::default())
    }

    pub fn with_grouping(documents: P, grouping: GroupingParser) -> Self {
        let mut decoder = Self {
            documents,
            parsers: Vec::new(),
        };
        decoder.push_parser(HeaderParser);
        decoder.push_parser(ResultsParser);
        decoder.push_parser(grouping);
        decoder
    }

    /// Appends a parser for a section the default set does not cover.
    pub fn push_parser(&mut self, parser: impl ResponseParser<P> + Send + Sync + 'static) {
        self.parsers.push(Box::new(parser));
    }

    pub fn documents(&self) -> &P {
        &self.documents
    }

    pub fn decode(&self, xml: &str, kind: ResponseKind) -> Result<SearchResponse<P::Record>, P::Error> {
        let doc = Document::parse(xml)?;
        self.decode_document(&doc, kind)
    }

    /// Runs every section parser against an already parsed document. Nothing
    /// is returned unless all of them succeed.
    pub fn decode_document(
        &self,
        doc: &Document<'_>,
        kind: ResponseKind,
    ) -> Result<SearchResponse<P::Record>, P::Error> {
        let root = doc.root_element();
        let mut response = SearchResponse::empty(kind);
        for parser in &self.parsers {
            parser.parse(root, &self.documents, &mut response)?;
        }
        Ok(response)
    }

    pub fn decode_query(&self, xml: &str) -> Result<QueryResults<P::Record>, P::Error> {
        match self.decode(xml, ResponseKind::Query)? {
            SearchResponse::Query(results) => Ok(results),
            other => Err(kind_mismatch(ResponseKind::Query, &other).into()),
        }
    }

    pub fn decode_more_like_this(
        &self,
        xml: &str,
    ) -> Result<MoreLikeThisResults<P::Record>, P::Error> {
        match self.decode(xml, ResponseKind::MoreLikeThis)? {
            SearchResponse::MoreLikeThis(results) => Ok(results),
            other => Err(kind_mismatch(ResponseKind::MoreLikeThis, &other).into()),
        }
    }
}

/// A pushed parser may replace the response variant it was handed.
fn kind_mismatch<T>(expected: ResponseKind, response: &SearchResponse<T>) -> StructuralError {
    StructuralError::KindMismatch {
        expected,
        found: response.kind(),
    }
}

impl<P: DocumentParser + Default> Default for ResponseDecoder<P> {
    fn default() -> Self {
        Self::new(P::default())
    }
}

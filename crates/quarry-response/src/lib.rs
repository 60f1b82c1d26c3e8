//! Decoding of XML search responses into typed results.
//!
//! A response is decoded by a [`ResponseDecoder`], which runs one
//! [`ResponseParser`] per response section (header, main result, grouping)
//! against a caller-selected [`SearchResponse`] variant. Document records are
//! produced by a pluggable [`DocumentParser`]; [`BsonDocumentParser`] is the
//! default and yields `bson::Document`s.

mod decoder;
mod document;
mod error;
pub mod grouping;
mod header;
mod model;
pub mod node;
mod results;

pub use decoder::{ResponseDecoder, ResponseParser};
pub use document::{BsonDocumentParser, DocumentParser};
pub use error::{ResponseError, StructuralError};
pub use grouping::{GroupingParser, GroupingShape, UNMATCHED_GROUP_VALUE};
pub use header::HeaderParser;
pub use model::{
    Group, GroupedResults, Grouping, MoreLikeThisResults, QueryResults, ResponseHeader,
    ResponseKind, SearchResponse,
};
pub use results::ResultsParser;

pub use roxmltree;

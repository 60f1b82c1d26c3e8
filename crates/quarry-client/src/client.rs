use quarry_query::{MoreLikeThisOptions, QueryOptions};
use quarry_response::{
    BsonDocumentParser, DocumentParser, MoreLikeThisResults, QueryResults, ResponseDecoder,
    ResponseKind, SearchResponse,
};
use tracing::info;

use crate::config::ClientConfig;
use crate::connection::Connection;
use crate::error::ClientError;

const SELECT_HANDLER: &str = "select";
const MORE_LIKE_THIS_HANDLER: &str = "mlt";

pub struct Client<P: DocumentParser = BsonDocumentParser> {
    connection: Connection,
    decoder: ResponseDecoder<P>,
}

impl Client<BsonDocumentParser> {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_decoder(Connection::new(config), ResponseDecoder::new(BsonDocumentParser))
    }
}

impl<P> Client<P>
where
    P: DocumentParser,
    ClientError: From<P::Error>,
{
    pub fn with_decoder(connection: Connection, decoder: ResponseDecoder<P>) -> Self {
        Self {
            connection,
            decoder,
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn query(&self, options: &QueryOptions) -> Result<QueryResults<P::Record>, ClientError> {
        let body = self.connection.get(SELECT_HANDLER, &options.to_params())?;
        let results = self.decoder.decode_query(&body)?;
        info!(
            num_found = results.num_found,
            clauses = results.grouping.len(),
            qtime = results.header.qtime,
            "query complete"
        );
        Ok(results)
    }

    pub fn more_like_this(
        &self,
        options: &MoreLikeThisOptions,
    ) -> Result<MoreLikeThisResults<P::Record>, ClientError> {
        let body = self
            .connection
            .get(MORE_LIKE_THIS_HANDLER, &options.to_params())?;
        let results = self.decoder.decode_more_like_this(&body)?;
        info!(num_found = results.num_found, "more like this complete");
        Ok(results)
    }

    /// Decodes a response body fetched elsewhere.
    pub fn decode(
        &self,
        xml: &str,
        kind: ResponseKind,
    ) -> Result<SearchResponse<P::Record>, ClientError> {
        Ok(self.decoder.decode(xml, kind)?)
    }
}

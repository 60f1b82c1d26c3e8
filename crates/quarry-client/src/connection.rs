use quarry_query::Params;
use tracing::{debug, warn};
use ureq::Agent;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Blocking HTTP access to one core of the search server.
pub struct Connection {
    base: String,
    agent: Agent,
}

impl Connection {
    pub fn new(config: &ClientConfig) -> Self {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(config.timeout()))
            .http_status_as_error(false)
            .build();
        Self {
            base: config.core_url(),
            agent: Agent::new_with_config(agent_config),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// GETs `<core url>/<handler>` and returns the response body.
    pub fn get(&self, handler: &str, params: &Params) -> Result<String, ClientError> {
        let url = format!("{}/{}", self.base, handler.trim_start_matches('/'));
        debug!(%url, params = params.len(), "sending request");

        let mut response = self.agent.get(url.as_str()).query_pairs(params.iter()).call()?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "request failed");
            return Err(ClientError::Status(status.as_u16()));
        }
        Ok(response.body_mut().read_to_string()?)
    }
}

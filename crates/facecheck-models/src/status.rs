//! Connection status reporting.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Last known reachability of the recognition endpoint.
///
/// One instance lives inside each client rather than in process-wide
/// state. Health checks and failed requests overwrite it wholesale, so a
/// reader never observes a half-updated value; readers still only get
/// eventual consistency with respect to in-flight requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConnectionStatus {
    pub connected: bool,
    pub endpoint: String,
}

impl ConnectionStatus {
    pub fn new(connected: bool, endpoint: impl Into<String>) -> Self {
        Self {
            connected,
            endpoint: endpoint.into(),
        }
    }
}

//! Error types for quirk application and cluster dispatch

use thiserror::Error;

/// Errors raised while building or driving a quirked device
#[derive(Error, Debug)]
pub enum QuirkError {
    /// Replacement graph names a custom cluster the quirk cannot build
    #[error("Quirk {quirk} has no custom cluster named {name}")]
    UnknownCustomCluster { quirk: &'static str, name: String },

    /// Message addressed to an endpoint the device does not expose
    #[error("Endpoint not found: {0}")]
    EndpointNotFound(u8),

    /// Message addressed to a cluster the endpoint does not expose
    #[error("Cluster {cluster_id:#06x} not found on endpoint {endpoint}")]
    ClusterNotFound { endpoint: u8, cluster_id: u16 },

    /// A bus listener rejected an event
    #[error("Listener failed: {0}")]
    Listener(String),
}

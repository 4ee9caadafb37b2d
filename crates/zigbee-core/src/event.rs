//! Events propagated by the host after cluster state changes

use zcl_protocol::AttributeValue;

/// Network events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkEvent {
    /// A quirk replaced the device's cluster graph
    QuirkApplied {
        ieee_address: [u8; 8],
        quirk: &'static str,
    },
    /// A cluster attribute was stored
    AttributeUpdated {
        ieee_address: [u8; 8],
        endpoint: u8,
        cluster_id: u16,
        attribute_id: u16,
        attribute_name: Option<&'static str>,
        value: AttributeValue,
    },
    /// A decoded cluster-specific command arrived from the device
    ClusterCommand {
        ieee_address: [u8; 8],
        endpoint: u8,
        cluster_id: u16,
        command: &'static str,
        args: Vec<i64>,
    },
}

impl NetworkEvent {
    /// IEEE address of the device the event belongs to
    #[must_use] pub fn ieee_address(&self) -> &[u8; 8] {
        match self {
            NetworkEvent::QuirkApplied { ieee_address, .. }
            | NetworkEvent::AttributeUpdated { ieee_address, .. }
            | NetworkEvent::ClusterCommand { ieee_address, .. } => ieee_address,
        }
    }
}

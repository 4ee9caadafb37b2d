//! Device quirks: signatures, replacement graphs and quirked devices
//!
//! A quirk recognizes a physical device by its [`DeviceSignature`] and swaps
//! in a [`Replacement`] cluster graph where some slots are served by custom
//! cluster implementations. The registry instantiates that graph into a
//! [`QuirkedDevice`], which owns the device-scoped resources and dispatches
//! inbound ZCL frames to the cluster instances.

use crate::cluster::{self, profile};
use crate::device::{Endpoint, ZigbeeDevice};
use crate::error::QuirkError;
use crate::event::NetworkEvent;
use crate::handler::{ClusterContext, StandardCluster, ZclCluster};
use crate::trigger::{TriggerKey, TriggerTable};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::broadcast;
use zcl_protocol::{AttributeValue, GeneralCommand, ZclFrame};

/// Matching criteria for one endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointSignature {
    pub profile_id: u16,
    pub device_type: u16,
    pub input_clusters: Vec<u16>,
    pub output_clusters: Vec<u16>,
}

impl EndpointSignature {
    /// Profile, device type and both cluster sets must be equal
    #[must_use] pub fn matches(&self, endpoint: &Endpoint) -> bool {
        self.profile_id == endpoint.profile_id
            && self.device_type == endpoint.device_id
            && same_set(&self.input_clusters, &endpoint.in_clusters)
            && same_set(&self.output_clusters, &endpoint.out_clusters)
    }
}

fn same_set(expected: &[u16], actual: &[u16]) -> bool {
    let expected: BTreeSet<u16> = expected.iter().copied().collect();
    let actual: BTreeSet<u16> = actual.iter().copied().collect();
    expected == actual
}

/// How a physical device is recognized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceSignature {
    /// Accepted (manufacturer, model) pairs
    pub models_info: Vec<(String, String)>,
    pub endpoints: BTreeMap<u8, EndpointSignature>,
}

impl DeviceSignature {
    #[must_use] pub fn matches(&self, device: &ZigbeeDevice) -> bool {
        let (Some(manufacturer), Some(model)) = (&device.manufacturer, &device.model) else {
            return false;
        };
        if !self
            .models_info
            .iter()
            .any(|(m, n)| m == manufacturer && n == model)
        {
            return false;
        }

        // The ZDO endpoint is never part of a signature
        let device_endpoints: BTreeSet<u8> = device
            .endpoints
            .iter()
            .map(|e| e.id)
            .filter(|id| *id != 0)
            .collect();
        if device_endpoints != self.endpoints.keys().copied().collect::<BTreeSet<u8>>() {
            return false;
        }

        self.endpoints.iter().all(|(id, sig)| {
            device
                .endpoint(*id)
                .is_some_and(|endpoint| sig.matches(endpoint))
        })
    }
}

/// A cluster slot of a replacement endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClusterSlot {
    /// Served by the host's standard implementation
    Standard { cluster_id: u16 },
    /// Served by a custom cluster the quirk builds by name
    Custom {
        cluster_id: u16,
        name: &'static str,
    },
}

impl ClusterSlot {
    #[must_use] pub fn cluster_id(&self) -> u16 {
        match self {
            ClusterSlot::Standard { cluster_id } | ClusterSlot::Custom { cluster_id, .. } => {
                *cluster_id
            }
        }
    }
}

impl From<u16> for ClusterSlot {
    fn from(cluster_id: u16) -> Self {
        ClusterSlot::Standard { cluster_id }
    }
}

/// Corrected cluster graph of one endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointReplacement {
    pub profile_id: u16,
    pub device_type: u16,
    pub input_clusters: Vec<ClusterSlot>,
    pub output_clusters: Vec<ClusterSlot>,
}

/// Corrected cluster graph of a device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    pub endpoints: BTreeMap<u8, EndpointReplacement>,
}

/// A device-specific correction
pub trait Quirk: Send + Sync {
    fn name(&self) -> &'static str;

    fn signature(&self) -> &DeviceSignature;

    fn replacement(&self) -> &Replacement;

    fn device_automation_triggers(&self) -> &TriggerTable;

    /// Create the device-scoped state for one matched device
    fn create_device(&self) -> Box<dyn CustomDevice>;
}

/// Device-scoped state of a quirk, alive as long as the quirked device
pub trait CustomDevice: Send + Sync {
    /// Build the custom cluster for a [`ClusterSlot::Custom`] slot
    fn custom_cluster(
        &self,
        name: &str,
        ctx: ClusterContext,
    ) -> Result<Arc<dyn ZclCluster>, QuirkError>;
}

/// Cluster instances of one endpoint
pub struct EndpointClusters {
    pub id: u8,
    pub profile_id: u16,
    pub device_type: u16,
    pub input: BTreeMap<u16, Arc<dyn ZclCluster>>,
    pub output: BTreeMap<u16, Arc<dyn ZclCluster>>,
}

impl EndpointClusters {
    /// Input clusters take precedence over output clusters with the same id
    #[must_use] pub fn cluster(&self, cluster_id: u16) -> Option<&Arc<dyn ZclCluster>> {
        self.input
            .get(&cluster_id)
            .or_else(|| self.output.get(&cluster_id))
    }
}

/// A device whose cluster graph was replaced by a quirk
pub struct QuirkedDevice {
    device: ZigbeeDevice,
    quirk: Arc<dyn Quirk>,
    endpoints: BTreeMap<u8, EndpointClusters>,
    // Dropped last: clusters only hold weak references into it
    _custom: Box<dyn CustomDevice>,
}

impl QuirkedDevice {
    fn build(
        device: &ZigbeeDevice,
        quirk: Arc<dyn Quirk>,
        events: &broadcast::Sender<NetworkEvent>,
    ) -> Result<Self, QuirkError> {
        let custom = quirk.create_device();
        let mut endpoints = BTreeMap::new();
        let mut replaced = device.clone();
        replaced.endpoints.clear();

        for (id, ep) in &quirk.replacement().endpoints {
            let make = |slot: &ClusterSlot| -> Result<Arc<dyn ZclCluster>, QuirkError> {
                let ctx = ClusterContext {
                    ieee_address: device.ieee_address,
                    endpoint: *id,
                    cluster_id: slot.cluster_id(),
                    events: events.clone(),
                };
                match slot {
                    ClusterSlot::Standard { .. } => Ok(Arc::new(StandardCluster::new(ctx))),
                    ClusterSlot::Custom { name, .. } => custom.custom_cluster(name, ctx),
                }
            };

            let mut input = BTreeMap::new();
            for slot in &ep.input_clusters {
                input.insert(slot.cluster_id(), make(slot)?);
            }
            let mut output = BTreeMap::new();
            for slot in &ep.output_clusters {
                output.insert(slot.cluster_id(), make(slot)?);
            }

            replaced.endpoints.push(Endpoint {
                id: *id,
                profile_id: ep.profile_id,
                device_id: ep.device_type,
                in_clusters: ep.input_clusters.iter().map(ClusterSlot::cluster_id).collect(),
                out_clusters: ep.output_clusters.iter().map(ClusterSlot::cluster_id).collect(),
            });
            endpoints.insert(
                *id,
                EndpointClusters {
                    id: *id,
                    profile_id: ep.profile_id,
                    device_type: ep.device_type,
                    input,
                    output,
                },
            );
        }

        Ok(Self {
            device: replaced,
            quirk,
            endpoints,
            _custom: custom,
        })
    }

    /// The device with its replaced endpoint descriptions
    #[must_use] pub fn device(&self) -> &ZigbeeDevice {
        &self.device
    }

    #[must_use] pub fn quirk(&self) -> &Arc<dyn Quirk> {
        &self.quirk
    }

    #[must_use] pub fn endpoint(&self, id: u8) -> Option<&EndpointClusters> {
        self.endpoints.get(&id)
    }

    /// Cluster instance serving `cluster_id` on an endpoint
    #[must_use] pub fn cluster(
        &self,
        endpoint: u8,
        cluster_id: u16,
    ) -> Option<&Arc<dyn ZclCluster>> {
        self.endpoints.get(&endpoint)?.cluster(cluster_id)
    }

    fn require_cluster(
        &self,
        endpoint: u8,
        cluster_id: u16,
    ) -> Result<&Arc<dyn ZclCluster>, QuirkError> {
        self.endpoints
            .get(&endpoint)
            .ok_or(QuirkError::EndpointNotFound(endpoint))?
            .cluster(cluster_id)
            .ok_or(QuirkError::ClusterNotFound {
                endpoint,
                cluster_id,
            })
    }

    /// Read an attribute through the cluster's read path
    pub fn read_attribute(
        &self,
        endpoint: u8,
        cluster_id: u16,
        attribute_id: u16,
    ) -> Result<Option<AttributeValue>, QuirkError> {
        Ok(self
            .require_cluster(endpoint, cluster_id)?
            .read_attribute(attribute_id))
    }

    /// Dispatch an inbound ZCL frame (the APS ASDU) to its cluster
    ///
    /// Frames that fail to decode are logged and dropped; only addressing
    /// errors and cluster handler failures are returned.
    pub fn handle_message(
        &self,
        endpoint: u8,
        cluster_id: u16,
        asdu: &[u8],
    ) -> Result<(), QuirkError> {
        let cluster = self.require_cluster(endpoint, cluster_id)?;

        let frame = match ZclFrame::parse(asdu) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(
                    "Dropping malformed frame from {} EP{} cluster {:#06x}: {}",
                    self.device.ieee_address_string(),
                    endpoint,
                    cluster_id,
                    e
                );
                return Ok(());
            }
        };

        if frame.is_cluster_specific() {
            if let Some((name, args)) =
                cluster::decode_command(cluster_id, frame.command_id(), frame.payload())
            {
                cluster.state().emit_command(name, args);
            }
            return cluster.handle_cluster_request(&frame);
        }

        let command = match GeneralCommand::parse(frame.command_id(), frame.payload()) {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!(
                    "Dropping undecodable global command {:#04x} from {} EP{} cluster {:#06x}: {}",
                    frame.command_id(),
                    self.device.ieee_address_string(),
                    endpoint,
                    cluster_id,
                    e
                );
                return Ok(());
            }
        };

        if let GeneralCommand::ReportAttributes(records) = &command {
            for record in records {
                cluster.attribute_reported(record.attribute_id, record.value.clone());
            }
        }

        cluster.handle_cluster_general_request(&frame, &command)
    }

    /// Gesture behind an event from this device, if the quirk declares one
    #[must_use] pub fn resolve_trigger(&self, event: &NetworkEvent) -> Option<&TriggerKey> {
        if *event.ieee_address() != self.device.ieee_address {
            return None;
        }
        self.quirk.device_automation_triggers().resolve(event)
    }
}

/// Known quirks, matched in registration order
#[derive(Default)]
pub struct QuirkRegistry {
    quirks: Vec<Arc<dyn Quirk>>,
}

impl QuirkRegistry {
    #[must_use] pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, quirk: Arc<dyn Quirk>) {
        tracing::debug!("Registered quirk {}", quirk.name());
        self.quirks.push(quirk);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Quirk>> {
        self.quirks.iter()
    }

    /// First quirk whose signature matches the device
    #[must_use] pub fn find(&self, device: &ZigbeeDevice) -> Option<&Arc<dyn Quirk>> {
        self.quirks.iter().find(|q| q.signature().matches(device))
    }

    /// Replace the device's cluster graph if a quirk matches
    pub fn apply(
        &self,
        device: &ZigbeeDevice,
        events: &broadcast::Sender<NetworkEvent>,
    ) -> Result<Option<QuirkedDevice>, QuirkError> {
        let Some(quirk) = self.find(device) else {
            return Ok(None);
        };

        let quirked = QuirkedDevice::build(device, Arc::clone(quirk), events)?;
        tracing::info!(
            "Applied quirk {} to {}",
            quirk.name(),
            device.display_name()
        );
        let _ = events.send(NetworkEvent::QuirkApplied {
            ieee_address: device.ieee_address,
            quirk: quirk.name(),
        });
        Ok(Some(quirked))
    }
}

/// Signature helper for a Home Automation endpoint
#[must_use] pub fn ha_endpoint(
    device_type: u16,
    input: &[u16],
    output: &[u16],
) -> EndpointSignature {
    EndpointSignature {
        profile_id: profile::HOME_AUTOMATION,
        device_type,
        input_clusters: input.to_vec(),
        output_clusters: output.to_vec(),
    }
}

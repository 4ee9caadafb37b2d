//! Cluster handlers: attribute storage and inbound command hooks
//!
//! Every cluster of a quirked device is backed by a [`ClusterState`], the
//! attribute cache plus the "update and notify" primitive that stores a value
//! and broadcasts it as a [`NetworkEvent::AttributeUpdated`].

use crate::cluster;
use crate::error::QuirkError;
use crate::event::NetworkEvent;
use dashmap::DashMap;
use tokio::sync::broadcast;
use zcl_protocol::{AttributeValue, GeneralCommand, ZclFrame};

/// Where a cluster instance lives and where its events go
#[derive(Debug, Clone)]
pub struct ClusterContext {
    pub ieee_address: [u8; 8],
    pub endpoint: u8,
    pub cluster_id: u16,
    pub events: broadcast::Sender<NetworkEvent>,
}

/// Attribute cache of one cluster instance
#[derive(Debug)]
pub struct ClusterState {
    ctx: ClusterContext,
    attributes: DashMap<u16, AttributeValue>,
}

impl ClusterState {
    #[must_use] pub fn new(ctx: ClusterContext) -> Self {
        Self {
            ctx,
            attributes: DashMap::new(),
        }
    }

    #[must_use] pub fn context(&self) -> &ClusterContext {
        &self.ctx
    }

    /// Cached value of an attribute
    #[must_use] pub fn get(&self, attribute_id: u16) -> Option<AttributeValue> {
        self.attributes.get(&attribute_id).map(|r| r.value().clone())
    }

    /// Store a value and notify subscribers, even if the value is unchanged
    pub fn update_attribute(&self, attribute_id: u16, value: AttributeValue) {
        tracing::debug!(
            "Attribute {:#06x} on cluster {:#06x} EP{} = {:?}",
            attribute_id,
            self.ctx.cluster_id,
            self.ctx.endpoint,
            value
        );
        self.attributes.insert(attribute_id, value.clone());

        let _ = self.ctx.events.send(NetworkEvent::AttributeUpdated {
            ieee_address: self.ctx.ieee_address,
            endpoint: self.ctx.endpoint,
            cluster_id: self.ctx.cluster_id,
            attribute_id,
            attribute_name: cluster::attribute_name(self.ctx.cluster_id, attribute_id),
            value,
        });
    }

    /// Broadcast a decoded cluster-specific command
    pub fn emit_command(&self, command: &'static str, args: Vec<i64>) {
        tracing::debug!(
            "Command {} {:?} on cluster {:#06x} EP{}",
            command,
            args,
            self.ctx.cluster_id,
            self.ctx.endpoint
        );
        let _ = self.ctx.events.send(NetworkEvent::ClusterCommand {
            ieee_address: self.ctx.ieee_address,
            endpoint: self.ctx.endpoint,
            cluster_id: self.ctx.cluster_id,
            command,
            args,
        });
    }
}

/// A cluster instance on a quirked device
pub trait ZclCluster: Send + Sync {
    /// Backing attribute cache
    fn state(&self) -> &ClusterState;

    fn cluster_id(&self) -> u16 {
        self.state().context().cluster_id
    }

    /// Value served to attribute reads
    fn read_attribute(&self, attribute_id: u16) -> Option<AttributeValue> {
        self.state().get(attribute_id)
    }

    /// Called for every attribute value the device reports
    fn attribute_reported(&self, attribute_id: u16, value: AttributeValue) {
        self.state().update_attribute(attribute_id, value);
    }

    /// Hook for inbound global commands, after the host's default handling
    fn handle_cluster_general_request(
        &self,
        _frame: &ZclFrame,
        _command: &GeneralCommand,
    ) -> Result<(), QuirkError> {
        Ok(())
    }

    /// Hook for inbound cluster-specific commands
    fn handle_cluster_request(&self, _frame: &ZclFrame) -> Result<(), QuirkError> {
        Ok(())
    }
}

/// A cluster slot served with no custom behavior
#[derive(Debug)]
pub struct StandardCluster {
    state: ClusterState,
}

impl StandardCluster {
    #[must_use] pub fn new(ctx: ClusterContext) -> Self {
        Self {
            state: ClusterState::new(ctx),
        }
    }
}

impl ZclCluster for StandardCluster {
    fn state(&self) -> &ClusterState {
        &self.state
    }
}

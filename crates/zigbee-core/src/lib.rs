//! Zigbee abstraction layer
//!
//! This crate provides the device model and the host side of device quirks:
//! signature matching, replacement cluster graphs, cluster handlers with
//! attribute storage, and automation trigger tables.

pub mod cluster;
pub mod device;
pub mod error;
pub mod event;
pub mod handler;
pub mod quirk;
pub mod trigger;

pub use device::{DeviceType, Endpoint, ZigbeeDevice};
pub use error::QuirkError;
pub use event::NetworkEvent;
pub use handler::{ClusterContext, ClusterState, StandardCluster, ZclCluster};
pub use quirk::{
    ClusterSlot, CustomDevice, DeviceSignature, EndpointReplacement, EndpointSignature, Quirk,
    QuirkRegistry, QuirkedDevice, Replacement,
};
pub use trigger::{DeviceTrigger, PressKind, TriggerArg, TriggerKey, TriggerTable};

//! ZCL (Zigbee Cluster Library) wire surface
//!
//! This crate implements the frame header and the global attribute
//! commands exchanged with Zigbee end devices.

pub mod attributes;
pub mod types;

pub use attributes::{AttributeRecord, GeneralCommand};
pub use types::*;

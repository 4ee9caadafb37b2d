//! Müller Licht International devices

pub mod tint;

use crate::power::PowerConfigurationCluster;
use std::collections::BTreeMap;
use zcl_protocol::AttributeValue;
use zigbee_core::cluster::power_attrs;
use zigbee_core::ClusterContext;

pub use tint::{
    TintRemote, TintRemoteBasicCluster, TintRemoteDevice, TintRemoteScenesCluster, TintScene,
};

/// Manufacturer string reported in the Basic cluster
pub const MANUFACTURER: &str = "MLI";

/// Battery size class for AAA cells
pub const BATTERY_SIZE_AAA: u8 = 4;

/// Power configuration for devices running on two AAA cells
///
/// These devices omit battery size, quantity and rated voltage (in 100 mV).
#[must_use] pub fn power_configuration_2aaa(ctx: ClusterContext) -> PowerConfigurationCluster {
    PowerConfigurationCluster::with_constants(
        ctx,
        BTreeMap::from([
            (
                power_attrs::BATTERY_SIZE,
                AttributeValue::Enum8(BATTERY_SIZE_AAA),
            ),
            (power_attrs::BATTERY_QUANTITY, AttributeValue::Uint8(2)),
            (power_attrs::BATTERY_RATED_VOLTAGE, AttributeValue::Uint8(15)),
        ]),
    )
}

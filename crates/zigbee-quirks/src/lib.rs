//! Device quirks
//!
//! Vendor-specific corrections for devices whose descriptors or messages
//! deviate from the Zigbee Cluster Library. [`registry`] returns every quirk
//! this crate ships, ready to be applied to discovered devices.

pub mod bus;
pub mod mli;
pub mod power;

use std::sync::Arc;
use zigbee_core::QuirkRegistry;

pub use bus::{Bus, Listener, SceneBus, SceneEvent};
pub use power::PowerConfigurationCluster;

/// Registry with all shipped quirks
#[must_use] pub fn registry() -> QuirkRegistry {
    let mut registry = QuirkRegistry::new();
    registry.register(Arc::new(mli::TintRemote::new()));
    registry
}

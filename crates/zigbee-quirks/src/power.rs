//! Power Configuration cluster with battery percentage derivation

use std::collections::BTreeMap;
use zcl_protocol::AttributeValue;
use zigbee_core::cluster::power_attrs;
use zigbee_core::{ClusterContext, ClusterState, ZclCluster};

/// Lowest battery voltage, reported as 0 %
pub const MIN_VOLTS: f64 = 2.1;
/// Highest battery voltage, reported as 100 %
pub const MAX_VOLTS: f64 = 3.2;

/// Battery voltage reports also update the remaining percentage
///
/// Attributes listed in the constant overlay are served from the overlay on
/// every read, whatever the device reported for them.
#[derive(Debug)]
pub struct PowerConfigurationCluster {
    state: ClusterState,
    constants: BTreeMap<u16, AttributeValue>,
}

impl PowerConfigurationCluster {
    #[must_use] pub fn new(ctx: ClusterContext) -> Self {
        Self::with_constants(ctx, BTreeMap::new())
    }

    #[must_use] pub fn with_constants(
        ctx: ClusterContext,
        constants: BTreeMap<u16, AttributeValue>,
    ) -> Self {
        Self {
            state: ClusterState::new(ctx),
            constants,
        }
    }

    /// Attributes pinned by the overlay
    #[must_use] pub fn constant_attributes(&self) -> &BTreeMap<u16, AttributeValue> {
        &self.constants
    }
}

/// Remaining battery in half-percent units (0-200) for a 100 mV reading
#[must_use] pub fn battery_percentage(raw_decivolts: u8) -> u8 {
    let volts = (f64::from(raw_decivolts) / 10.0).clamp(MIN_VOLTS, MAX_VOLTS);
    let percent = ((volts - MIN_VOLTS) / (MAX_VOLTS - MIN_VOLTS) * 200.0).round();
    percent as u8
}

impl ZclCluster for PowerConfigurationCluster {
    fn state(&self) -> &ClusterState {
        &self.state
    }

    fn read_attribute(&self, attribute_id: u16) -> Option<AttributeValue> {
        self.constants
            .get(&attribute_id)
            .cloned()
            .or_else(|| self.state.get(attribute_id))
    }

    fn attribute_reported(&self, attribute_id: u16, value: AttributeValue) {
        let voltage = match (&value, attribute_id) {
            (AttributeValue::Uint8(raw), power_attrs::BATTERY_VOLTAGE) => Some(*raw),
            _ => None,
        };
        self.state.update_attribute(attribute_id, value);

        // 0 and 0xFF mean "unknown"
        if let Some(raw) = voltage.filter(|raw| *raw != 0 && *raw != 0xFF) {
            self.state.update_attribute(
                power_attrs::BATTERY_PERCENTAGE_REMAINING,
                AttributeValue::Uint8(battery_percentage(raw)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast;
    use zigbee_core::cluster::id;

    fn cluster() -> (PowerConfigurationCluster, broadcast::Receiver<zigbee_core::NetworkEvent>) {
        let (tx, rx) = broadcast::channel(8);
        let ctx = ClusterContext {
            ieee_address: [2; 8],
            endpoint: 1,
            cluster_id: id::POWER_CONFIG,
            events: tx,
        };
        (PowerConfigurationCluster::new(ctx), rx)
    }

    #[test]
    fn test_battery_percentage_bounds() {
        assert_eq!(battery_percentage(32), 200);
        assert_eq!(battery_percentage(40), 200);
        assert_eq!(battery_percentage(21), 0);
        assert_eq!(battery_percentage(10), 0);
        assert_eq!(battery_percentage(27), 109);
    }

    #[test]
    fn test_voltage_report_updates_percentage() {
        let (cluster, mut rx) = cluster();
        cluster.attribute_reported(power_attrs::BATTERY_VOLTAGE, AttributeValue::Uint8(32));

        assert_eq!(
            cluster.read_attribute(power_attrs::BATTERY_PERCENTAGE_REMAINING),
            Some(AttributeValue::Uint8(200))
        );
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_unknown_voltage_ignored() {
        let (cluster, _rx) = cluster();
        cluster.attribute_reported(power_attrs::BATTERY_VOLTAGE, AttributeValue::Uint8(0xFF));
        assert_eq!(
            cluster.read_attribute(power_attrs::BATTERY_PERCENTAGE_REMAINING),
            None
        );
        assert_eq!(
            cluster.read_attribute(power_attrs::BATTERY_VOLTAGE),
            Some(AttributeValue::Uint8(0xFF))
        );
    }
}

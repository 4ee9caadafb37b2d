//! Zigbee device representation

use serde::{Deserialize, Serialize};

/// Zigbee device types (network role)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Coordinator,
    Router,
    EndDevice,
}

impl Default for DeviceType {
    fn default() -> Self {
        Self::EndDevice
    }
}

/// A Zigbee device as discovered on the network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZigbeeDevice {
    /// IEEE address (EUI-64)
    pub ieee_address: [u8; 8],
    /// Network short address
    pub nwk_address: u16,
    /// Device type (network role)
    #[serde(default)]
    pub device_type: DeviceType,
    /// Manufacturer name (from Basic cluster)
    pub manufacturer: Option<String>,
    /// Model identifier (from Basic cluster)
    pub model: Option<String>,
    /// User-assigned friendly name
    #[serde(default)]
    pub friendly_name: Option<String>,
    /// Device endpoints
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

impl ZigbeeDevice {
    /// Create a new device with just address info
    #[must_use] pub fn new(ieee_address: [u8; 8], nwk_address: u16) -> Self {
        Self {
            ieee_address,
            nwk_address,
            device_type: DeviceType::EndDevice,
            manufacturer: None,
            model: None,
            friendly_name: None,
            endpoints: Vec::new(),
        }
    }

    /// Set manufacturer and model strings
    #[must_use] pub fn with_identity(mut self, manufacturer: &str, model: &str) -> Self {
        self.manufacturer = Some(manufacturer.to_string());
        self.model = Some(model.to_string());
        self
    }

    /// Add an endpoint
    #[must_use] pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Look up an endpoint by id
    #[must_use] pub fn endpoint(&self, id: u8) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.id == id)
    }

    /// Get IEEE address as hex string
    #[must_use] pub fn ieee_address_string(&self) -> String {
        format_ieee(&self.ieee_address)
    }

    /// Get a display name (friendly name, model, or IEEE address)
    #[must_use] pub fn display_name(&self) -> String {
        self.friendly_name
            .clone()
            .or_else(|| self.model.clone())
            .unwrap_or_else(|| self.ieee_address_string())
    }
}

/// A device endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Endpoint ID (1-240)
    pub id: u8,
    /// Profile ID (e.g., 0x0104 for Home Automation)
    pub profile_id: u16,
    /// Device ID within the profile
    pub device_id: u16,
    /// Input (server) clusters
    pub in_clusters: Vec<u16>,
    /// Output (client) clusters
    pub out_clusters: Vec<u16>,
}

impl Endpoint {
    /// Check if endpoint has a specific cluster
    #[must_use] pub fn has_cluster(&self, cluster_id: u16) -> bool {
        self.in_clusters.contains(&cluster_id) || self.out_clusters.contains(&cluster_id)
    }
}

/// Format IEEE address as string (e.g., "00:11:22:33:44:55:66:77")
#[must_use] pub fn format_ieee(ieee: &[u8; 8]) -> String {
    // IEEE addresses are stored little-endian and displayed big-endian
    ieee.iter()
        .rev()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallbacks() {
        let device = ZigbeeDevice::new([0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11, 0x00], 0x1234);
        assert_eq!(device.display_name(), "00:11:22:33:44:55:66:77");

        let device = device.with_identity("MLI", "ZBT-Remote-ALL-RGBW");
        assert_eq!(device.display_name(), "ZBT-Remote-ALL-RGBW");
    }

    #[test]
    fn test_deserialize_inventory_entry() {
        let json = r#"{
            "ieee_address": [1, 2, 3, 4, 5, 6, 7, 8],
            "nwk_address": 4660,
            "manufacturer": "MLI",
            "model": "ZBT-Remote-ALL-RGBW",
            "endpoints": [
                {"id": 1, "profile_id": 260, "device_id": 2048,
                 "in_clusters": [0, 3, 4096], "out_clusters": [0, 3]}
            ]
        }"#;
        let device: ZigbeeDevice = serde_json::from_str(json).unwrap();
        assert_eq!(device.device_type, DeviceType::EndDevice);
        assert!(device.endpoint(1).unwrap().has_cluster(4096));
        assert!(device.endpoint(2).is_none());
    }
}

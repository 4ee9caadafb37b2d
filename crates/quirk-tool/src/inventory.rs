//! Device inventory stored as a JSON array of devices

use anyhow::Context;
use std::path::{Path, PathBuf};
use tokio::fs;
use zigbee_core::ZigbeeDevice;

/// Inventory location from the environment
///
/// `DEVICES_FILE` wins over `$DATA_DIR/devices.json`; `DATA_DIR` defaults to
/// `./data`.
pub fn default_path() -> PathBuf {
    if let Ok(file) = std::env::var("DEVICES_FILE") {
        return PathBuf::from(file);
    }
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string());
    PathBuf::from(data_dir).join("devices.json")
}

/// Load devices from a JSON file
///
/// A missing file is an empty inventory; an unreadable or invalid one is an
/// error.
pub async fn load_devices(path: &Path) -> anyhow::Result<Vec<ZigbeeDevice>> {
    let contents = match fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("No devices file found at {:?}", path);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };

    let devices: Vec<ZigbeeDevice> = serde_json::from_str(&contents)
        .with_context(|| format!("parsing {}", path.display()))?;
    tracing::info!("Loaded {} devices from {:?}", devices.len(), path);
    Ok(devices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("quirk-tool-{}-{}", std::process::id(), name))
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let devices = load_devices(&scratch("absent.json")).await.unwrap();
        assert!(devices.is_empty());
    }

    #[tokio::test]
    async fn test_load_devices() {
        let path = scratch("devices.json");
        let json = r#"[{
            "ieee_address": [0, 23, 136, 1, 11, 92, 58, 33],
            "nwk_address": 20257,
            "manufacturer": "MLI",
            "model": "ZBT-Remote-ALL-RGBW",
            "endpoints": [{
                "id": 1,
                "profile_id": 260,
                "device_id": 2048,
                "in_clusters": [0, 3, 4096],
                "out_clusters": [0, 3, 4, 6, 8, 25, 768, 4096]
            }]
        }]"#;
        fs::write(&path, json).await.unwrap();

        let devices = load_devices(&path).await.unwrap();
        fs::remove_file(&path).await.unwrap();

        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].model.as_deref(), Some("ZBT-Remote-ALL-RGBW"));
        assert_eq!(devices[0].endpoints[0].out_clusters.len(), 8);
    }

    #[tokio::test]
    async fn test_invalid_file_is_error() {
        let path = scratch("broken.json");
        fs::write(&path, "{ not json").await.unwrap();
        let result = load_devices(&path).await;
        fs::remove_file(&path).await.unwrap();
        assert!(result.is_err());
    }
}

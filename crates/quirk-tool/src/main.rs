//! Quirk Tool - match a device inventory against the shipped quirks
//!
//! Usage: `quirk-tool [DEVICES_FILE]` or `quirk-tool --list`

use serde::Serialize;
use std::path::PathBuf;
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zigbee_core::{
    DeviceSignature, Endpoint, NetworkEvent, Quirk, QuirkRegistry, Replacement, TriggerTable,
    ZigbeeDevice,
};

mod inventory;

/// Registry entry as dumped by `--list`
#[derive(Serialize)]
struct QuirkInfo<'a> {
    name: &'static str,
    signature: &'a DeviceSignature,
    replacement: &'a Replacement,
    device_automation_triggers: &'a TriggerTable,
}

impl<'a> QuirkInfo<'a> {
    fn new(quirk: &'a dyn Quirk) -> Self {
        Self {
            name: quirk.name(),
            signature: quirk.signature(),
            replacement: quirk.replacement(),
            device_automation_triggers: quirk.device_automation_triggers(),
        }
    }
}

/// Outcome for one inventory device
#[derive(Serialize)]
struct DeviceReport {
    ieee_address: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    quirk: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    endpoints: Vec<Endpoint>,
}

fn list(registry: &QuirkRegistry) -> anyhow::Result<String> {
    let quirks: Vec<QuirkInfo<'_>> = registry.iter().map(|q| QuirkInfo::new(q.as_ref())).collect();
    Ok(serde_json::to_string_pretty(&quirks)?)
}

fn match_devices(
    registry: &QuirkRegistry,
    devices: &[ZigbeeDevice],
) -> anyhow::Result<Vec<DeviceReport>> {
    let (event_tx, mut event_rx) = broadcast::channel(64);
    let mut reports = Vec::with_capacity(devices.len());

    for device in devices {
        let report = match registry.apply(device, &event_tx)? {
            Some(quirked) => DeviceReport {
                ieee_address: device.ieee_address_string(),
                name: device.display_name(),
                quirk: Some(quirked.quirk().name()),
                endpoints: quirked.device().endpoints.clone(),
            },
            None => {
                tracing::debug!("No quirk for {}", device.display_name());
                DeviceReport {
                    ieee_address: device.ieee_address_string(),
                    name: device.display_name(),
                    quirk: None,
                    endpoints: Vec::new(),
                }
            }
        };
        reports.push(report);
    }

    while let Ok(event) = event_rx.try_recv() {
        if let NetworkEvent::QuirkApplied { quirk, .. } = event {
            tracing::debug!("Event: quirk {} applied", quirk);
        }
    }
    Ok(reports)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quirk_tool=debug,zigbee_quirks=debug,info".into()),
        )
        .init();

    let registry = zigbee_quirks::registry();
    let arg = std::env::args().nth(1);

    if arg.as_deref() == Some("--list") {
        println!("{}", list(&registry)?);
        return Ok(());
    }

    let path = arg.map_or_else(inventory::default_path, PathBuf::from);
    tracing::info!("Matching devices from {:?}", path);

    let devices = inventory::load_devices(&path).await?;
    let reports = match_devices(&registry, &devices)?;

    let matched = reports.iter().filter(|r| r.quirk.is_some()).count();
    tracing::info!("{} of {} devices matched a quirk", matched, reports.len());

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

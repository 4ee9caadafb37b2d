//! Tint remote (ZBT-Remote-ALL-RGBW)
//!
//! The remote announces a scene selection by writing a vendor attribute on
//! its Basic cluster. The quirk relays that write over the device's scene bus
//! to a local Scenes cluster, which exposes it as `current_scene`.

use crate::bus::{Listener, SceneBus, SceneEvent};
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};
use zcl_protocol::{AttributeValue, GeneralCommand, ZclFrame};
use zigbee_core::cluster::{device_type, id, profile, scenes_attrs};
use zigbee_core::quirk::ha_endpoint;
use zigbee_core::trigger::{command, DIM_DOWN, DIM_UP};
use zigbee_core::{
    ClusterContext, ClusterSlot, ClusterState, CustomDevice, DeviceSignature, DeviceTrigger,
    EndpointReplacement, PressKind, Quirk, QuirkError, Replacement, TriggerTable, ZclCluster,
};

/// Model string reported in the Basic cluster
pub const MODEL: &str = "ZBT-Remote-ALL-RGBW";

/// Vendor attribute on the Basic cluster carrying the selected scene
pub const TINT_SCENE_ATTR: u16 = 0x4005;

/// Subtype of the release after a long dim press; the remote sends the same
/// stop command for both dim buttons
pub const DIM_RELEASE: &str = "dim";

/// Scene buttons of the remote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TintScene {
    Sunset = 1,
    Party = 2,
    Worklight = 3,
    Campfire = 4,
    Romance = 5,
    Nightlight = 6,
}

impl TintScene {
    pub const ALL: [TintScene; 6] = [
        TintScene::Sunset,
        TintScene::Party,
        TintScene::Worklight,
        TintScene::Campfire,
        TintScene::Romance,
        TintScene::Nightlight,
    ];

    #[must_use] pub fn code(self) -> u8 {
        self as u8
    }

    /// Button label used as trigger subtype
    #[must_use] pub fn label(self) -> &'static str {
        match self {
            TintScene::Sunset => "sunset",
            TintScene::Party => "party",
            TintScene::Worklight => "worklight",
            TintScene::Campfire => "campfire",
            TintScene::Romance => "romance",
            TintScene::Nightlight => "nightlight",
        }
    }
}

impl TryFrom<u8> for TintScene {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        TintScene::ALL
            .into_iter()
            .find(|s| s.code() == value)
            .ok_or(value)
    }
}

/// Basic cluster that relays scene writes onto the scene bus
pub struct TintRemoteBasicCluster {
    state: ClusterState,
    scene_bus: Weak<SceneBus>,
}

impl TintRemoteBasicCluster {
    pub const NAME: &'static str = "tint_remote_basic";

    #[must_use] pub fn new(ctx: ClusterContext, scene_bus: &Arc<SceneBus>) -> Self {
        Self {
            state: ClusterState::new(ctx),
            scene_bus: Arc::downgrade(scene_bus),
        }
    }
}

impl ZclCluster for TintRemoteBasicCluster {
    fn state(&self) -> &ClusterState {
        &self.state
    }

    fn handle_cluster_general_request(
        &self,
        frame: &ZclFrame,
        command: &GeneralCommand,
    ) -> Result<(), QuirkError> {
        let GeneralCommand::WriteAttributes(records) = command else {
            return Ok(());
        };

        // Only the first record is inspected
        let Some(record) = records.first() else {
            tracing::debug!(
                "Empty write attributes request (tsn {})",
                frame.transaction_seq()
            );
            return Ok(());
        };
        if record.attribute_id != TINT_SCENE_ATTR {
            return Ok(());
        }
        if records.len() > 1 {
            tracing::debug!(
                "Ignoring {} trailing records after scene write",
                records.len() - 1
            );
        }

        let Some(scene) = record.value.as_i64().and_then(|v| u8::try_from(v).ok()) else {
            tracing::warn!("Scene write with unusable value {:?}", record.value);
            return Ok(());
        };

        let Some(bus) = self.scene_bus.upgrade() else {
            tracing::debug!("Scene bus gone, dropping scene {}", scene);
            return Ok(());
        };
        match TintScene::try_from(scene) {
            Ok(known) => tracing::debug!("Relaying scene {} ({})", scene, known.label()),
            Err(_) => tracing::debug!("Relaying unlabelled scene {}", scene),
        }
        bus.publish(&SceneEvent::ChangeScene(scene))
    }
}

/// Scenes cluster holding the locally maintained current scene
pub struct TintRemoteScenesCluster {
    state: ClusterState,
}

impl TintRemoteScenesCluster {
    pub const NAME: &'static str = "tint_remote_scenes";

    /// Build the cluster and register it on the scene bus
    #[must_use] pub fn new(ctx: ClusterContext, scene_bus: &SceneBus) -> Arc<Self> {
        let cluster = Arc::new(Self {
            state: ClusterState::new(ctx),
        });
        let listener: Arc<dyn Listener<SceneEvent>> = cluster.clone();
        scene_bus.add_listener(Arc::downgrade(&listener));
        cluster
    }

    #[must_use] pub fn current_scene(&self) -> Option<u8> {
        match self.state.get(scenes_attrs::CURRENT_SCENE) {
            Some(AttributeValue::Uint8(scene)) => Some(scene),
            _ => None,
        }
    }
}

impl ZclCluster for TintRemoteScenesCluster {
    fn state(&self) -> &ClusterState {
        &self.state
    }

    // current_scene is written by the scene bus only
    fn attribute_reported(&self, attribute_id: u16, value: AttributeValue) {
        if attribute_id == scenes_attrs::CURRENT_SCENE {
            tracing::debug!("Ignoring reported current scene {:?}", value);
            return;
        }
        self.state.update_attribute(attribute_id, value);
    }
}

impl Listener<SceneEvent> for TintRemoteScenesCluster {
    fn on_event(&self, event: &SceneEvent) -> Result<(), QuirkError> {
        match *event {
            SceneEvent::ChangeScene(scene) => {
                self.state
                    .update_attribute(scenes_attrs::CURRENT_SCENE, AttributeValue::Uint8(scene));
            }
        }
        Ok(())
    }
}

/// Per-device state of a Tint remote
pub struct TintRemoteDevice {
    scene_bus: Arc<SceneBus>,
}

impl TintRemoteDevice {
    #[must_use] pub fn new() -> Self {
        Self {
            scene_bus: Arc::new(SceneBus::new()),
        }
    }

    #[must_use] pub fn scene_bus(&self) -> &Arc<SceneBus> {
        &self.scene_bus
    }
}

impl Default for TintRemoteDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomDevice for TintRemoteDevice {
    fn custom_cluster(
        &self,
        name: &str,
        ctx: ClusterContext,
    ) -> Result<Arc<dyn ZclCluster>, QuirkError> {
        match name {
            TintRemoteBasicCluster::NAME => {
                Ok(Arc::new(TintRemoteBasicCluster::new(ctx, &self.scene_bus)))
            }
            TintRemoteScenesCluster::NAME => {
                let cluster: Arc<dyn ZclCluster> =
                    TintRemoteScenesCluster::new(ctx, &self.scene_bus);
                Ok(cluster)
            }
            _ => Err(QuirkError::UnknownCustomCluster {
                quirk: TintRemote::NAME,
                name: name.to_string(),
            }),
        }
    }
}

/// Quirk for the Tint remote
pub struct TintRemote {
    signature: DeviceSignature,
    replacement: Replacement,
    triggers: TriggerTable,
}

impl TintRemote {
    pub const NAME: &'static str = "mli.tint.TintRemote";

    #[must_use] pub fn new() -> Self {
        let signature = DeviceSignature {
            models_info: vec![(super::MANUFACTURER.to_string(), MODEL.to_string())],
            endpoints: BTreeMap::from([(
                1,
                ha_endpoint(
                    device_type::COLOR_CONTROLLER,
                    &[id::BASIC, id::IDENTIFY, id::LIGHT_LINK],
                    &[
                        id::BASIC,
                        id::IDENTIFY,
                        id::GROUPS,
                        id::ON_OFF,
                        id::LEVEL_CONTROL,
                        id::OTA,
                        id::COLOR_CONTROL,
                        id::LIGHT_LINK,
                    ],
                ),
            )]),
        };

        let replacement = Replacement {
            endpoints: BTreeMap::from([(
                1,
                EndpointReplacement {
                    profile_id: profile::HOME_AUTOMATION,
                    device_type: device_type::COLOR_CONTROLLER,
                    input_clusters: vec![
                        ClusterSlot::Custom {
                            cluster_id: id::BASIC,
                            name: TintRemoteBasicCluster::NAME,
                        },
                        id::IDENTIFY.into(),
                        id::LIGHT_LINK.into(),
                    ],
                    output_clusters: vec![
                        id::BASIC.into(),
                        id::IDENTIFY.into(),
                        id::GROUPS.into(),
                        ClusterSlot::Custom {
                            cluster_id: id::SCENES,
                            name: TintRemoteScenesCluster::NAME,
                        },
                        id::ON_OFF.into(),
                        id::LEVEL_CONTROL.into(),
                        id::OTA.into(),
                        id::COLOR_CONTROL.into(),
                        id::LIGHT_LINK.into(),
                    ],
                },
            )]),
        };

        Self {
            signature,
            replacement,
            triggers: device_automation_triggers(),
        }
    }
}

impl Default for TintRemote {
    fn default() -> Self {
        Self::new()
    }
}

impl Quirk for TintRemote {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn signature(&self) -> &DeviceSignature {
        &self.signature
    }

    fn replacement(&self) -> &Replacement {
        &self.replacement
    }

    fn device_automation_triggers(&self) -> &TriggerTable {
        &self.triggers
    }

    fn create_device(&self) -> Box<dyn CustomDevice> {
        Box::new(TintRemoteDevice::new())
    }
}

fn device_automation_triggers() -> TriggerTable {
    let level = |cmd: &str, args: &[i64]| DeviceTrigger::command(cmd, id::LEVEL_CONTROL, 1, args);
    let color_temp = |mireds: i64| {
        DeviceTrigger::command(command::MOVE_TO_COLOR_TEMP, id::COLOR_CONTROL, 1, &[mireds, 10])
    };

    let mut table = TriggerTable::new()
        .with(PressKind::ShortPress, "COLOR_TEMP_WARM", color_temp(370))
        .with(PressKind::ShortPress, "COLOR_TEMP_COLD", color_temp(153))
        .with(PressKind::ShortPress, DIM_DOWN, level(command::STEP, &[1, 43, 10]))
        .with(PressKind::LongPress, DIM_DOWN, level(command::MOVE, &[1, 100]))
        .with(PressKind::ShortPress, DIM_UP, level(command::STEP, &[0, 43, 10]))
        .with(PressKind::LongPress, DIM_UP, level(command::MOVE, &[0, 100]))
        .with(PressKind::LongRelease, DIM_RELEASE, level(command::STOP, &[]));

    for scene in TintScene::ALL {
        table = table.with(
            PressKind::ShortPress,
            scene.label(),
            DeviceTrigger::attribute_updated(
                id::SCENES,
                1,
                scenes_attrs::CURRENT_SCENE,
                "current_scene",
                i64::from(scene.code()),
            ),
        );
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast;
    use zcl_protocol::{AttributeRecord, GlobalCommand};
    use zigbee_core::trigger::TriggerArg;
    use zigbee_core::NetworkEvent;

    fn context(cluster_id: u16, events: &broadcast::Sender<NetworkEvent>) -> ClusterContext {
        ClusterContext {
            ieee_address: [5; 8],
            endpoint: 1,
            cluster_id,
            events: events.clone(),
        }
    }

    fn pair() -> (
        Arc<SceneBus>,
        TintRemoteBasicCluster,
        Arc<TintRemoteScenesCluster>,
        broadcast::Receiver<NetworkEvent>,
    ) {
        let (tx, rx) = broadcast::channel(16);
        let bus = Arc::new(SceneBus::new());
        let basic = TintRemoteBasicCluster::new(context(id::BASIC, &tx), &bus);
        let scenes = TintRemoteScenesCluster::new(context(id::SCENES, &tx), &bus);
        (bus, basic, scenes, rx)
    }

    fn write(records: Vec<AttributeRecord>) -> (ZclFrame, GeneralCommand) {
        let command = GeneralCommand::WriteAttributes(records);
        let frame = ZclFrame::global_command(1, GlobalCommand::WriteAttributes)
            .with_payload(command.encode());
        (frame, command)
    }

    #[test]
    fn test_scene_write_updates_current_scene() {
        let (_bus, basic, scenes, mut rx) = pair();
        let (frame, cmd) = write(vec![AttributeRecord::new(
            TINT_SCENE_ATTR,
            AttributeValue::Uint8(3),
        )]);

        basic.handle_cluster_general_request(&frame, &cmd).unwrap();

        assert_eq!(scenes.current_scene(), Some(3));
        assert!(matches!(
            rx.try_recv().unwrap(),
            NetworkEvent::AttributeUpdated {
                cluster_id: id::SCENES,
                attribute_id: scenes_attrs::CURRENT_SCENE,
                ..
            }
        ));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_only_first_record_is_inspected() {
        let (_bus, basic, scenes, mut rx) = pair();
        let (frame, cmd) = write(vec![
            AttributeRecord::new(0x4000, AttributeValue::String("1.0".to_string())),
            AttributeRecord::new(TINT_SCENE_ATTR, AttributeValue::Uint8(2)),
        ]);

        basic.handle_cluster_general_request(&frame, &cmd).unwrap();

        assert_eq!(scenes.current_scene(), None);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_other_commands_pass_through() {
        let (_bus, basic, scenes, _rx) = pair();
        let cmd = GeneralCommand::WriteAttributesNoResponse(vec![AttributeRecord::new(
            TINT_SCENE_ATTR,
            AttributeValue::Uint8(2),
        )]);
        let frame = ZclFrame::global_command(1, GlobalCommand::WriteAttributesNoResponse);
        basic.handle_cluster_general_request(&frame, &cmd).unwrap();

        let (frame, empty) = write(Vec::new());
        basic.handle_cluster_general_request(&frame, &empty).unwrap();

        assert_eq!(scenes.current_scene(), None);
    }

    #[test]
    fn test_unlabelled_scene_still_relayed() {
        let (_bus, basic, scenes, _rx) = pair();
        let (frame, cmd) = write(vec![AttributeRecord::new(
            TINT_SCENE_ATTR,
            AttributeValue::Uint8(9),
        )]);
        basic.handle_cluster_general_request(&frame, &cmd).unwrap();
        assert_eq!(scenes.current_scene(), Some(9));
        assert_eq!(TintScene::try_from(9), Err(9));
    }

    #[test]
    fn test_out_of_range_value_dropped() {
        let (_bus, basic, scenes, _rx) = pair();
        let (frame, cmd) = write(vec![AttributeRecord::new(
            TINT_SCENE_ATTR,
            AttributeValue::Uint16(0x0104),
        )]);
        basic.handle_cluster_general_request(&frame, &cmd).unwrap();
        assert_eq!(scenes.current_scene(), None);
    }

    #[test]
    fn test_repeated_scene_notifies_twice() {
        let (bus, _basic, scenes, mut rx) = pair();
        bus.publish(&SceneEvent::ChangeScene(5)).unwrap();
        bus.publish(&SceneEvent::ChangeScene(5)).unwrap();

        assert_eq!(scenes.current_scene(), Some(5));
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_reported_scene_is_ignored() {
        let (_bus, _basic, scenes, mut rx) = pair();
        scenes.attribute_reported(scenes_attrs::CURRENT_SCENE, AttributeValue::Uint8(2));
        scenes.attribute_reported(scenes_attrs::COUNT, AttributeValue::Uint8(6));

        assert_eq!(scenes.current_scene(), None);
        assert_eq!(
            scenes.read_attribute(scenes_attrs::COUNT),
            Some(AttributeValue::Uint8(6))
        );
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_unknown_custom_cluster() {
        let (tx, _rx) = broadcast::channel(1);
        let device = TintRemoteDevice::new();
        let err = device
            .custom_cluster("tint_remote_power", context(id::POWER_CONFIG, &tx))
            .err()
            .unwrap();
        assert!(matches!(err, QuirkError::UnknownCustomCluster { .. }));
        assert_eq!(device.scene_bus().listener_count(), 0);
    }

    #[test]
    fn test_trigger_table_entries() {
        let quirk = TintRemote::new();
        let triggers = quirk.device_automation_triggers();
        assert_eq!(triggers.len(), 13);

        let worklight = triggers.get(PressKind::ShortPress, "worklight").unwrap();
        assert_eq!(worklight.command, "attribute_updated");
        assert_eq!(worklight.cluster_id, 5);
        assert_eq!(worklight.endpoint_id, 1);
        assert_eq!(
            worklight.args,
            vec![TriggerArg::Attribute {
                attribute_id: 1,
                attribute_name: "current_scene".to_string(),
                value: 3
            }]
        );

        let sunset = triggers.get(PressKind::ShortPress, "sunset").unwrap();
        assert!(matches!(sunset.args[0], TriggerArg::Attribute { value: 1, .. }));

        let stop = triggers.get(PressKind::LongRelease, DIM_RELEASE).unwrap();
        assert_eq!(stop.command, "stop");
        assert!(stop.args.is_empty());
    }

    #[test]
    fn test_scene_codes() {
        assert_eq!(TintScene::try_from(4), Ok(TintScene::Campfire));
        assert_eq!(TintScene::try_from(7), Err(7));
        assert_eq!(TintScene::Nightlight.code(), 6);
    }
}

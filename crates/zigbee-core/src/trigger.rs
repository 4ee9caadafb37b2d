//! Device automation trigger tables
//!
//! A quirk maps physical gestures (press kind + button label) to the decoded
//! cluster command or attribute update the device produces for them. The
//! automation layer uses the table in reverse: given an event, which gesture
//! caused it.

use crate::event::NetworkEvent;
use serde::{Deserialize, Serialize};

/// Subtype label for the brightness-up button
pub const DIM_UP: &str = "dim_up";
/// Subtype label for the brightness-down button
pub const DIM_DOWN: &str = "dim_down";

/// Command names used in trigger descriptors
pub mod command {
    pub const ATTRIBUTE_UPDATED: &str = "attribute_updated";
    pub const MOVE: &str = "move";
    pub const STEP: &str = "step";
    pub const STOP: &str = "stop";
    pub const MOVE_TO_COLOR_TEMP: &str = "move_to_color_temp";
}

/// Kind of physical gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PressKind {
    #[serde(rename = "remote_button_short_press")]
    ShortPress,
    #[serde(rename = "remote_button_double_press")]
    DoublePress,
    #[serde(rename = "remote_button_long_press")]
    LongPress,
    #[serde(rename = "remote_button_long_release")]
    LongRelease,
}

/// Lookup key of a trigger
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerKey {
    #[serde(rename = "type")]
    pub press: PressKind,
    pub subtype: String,
}

impl TriggerKey {
    #[must_use] pub fn new(press: PressKind, subtype: &str) -> Self {
        Self {
            press,
            subtype: subtype.to_string(),
        }
    }
}

/// Positional argument of a trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TriggerArg {
    Int(i64),
    Attribute {
        attribute_id: u16,
        attribute_name: String,
        value: i64,
    },
}

/// What the device emits for a gesture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceTrigger {
    pub command: String,
    pub cluster_id: u16,
    pub endpoint_id: u8,
    pub args: Vec<TriggerArg>,
}

impl DeviceTrigger {
    /// Trigger on a cluster-specific command with integer arguments
    #[must_use] pub fn command(
        command: &str,
        cluster_id: u16,
        endpoint_id: u8,
        args: &[i64],
    ) -> Self {
        Self {
            command: command.to_string(),
            cluster_id,
            endpoint_id,
            args: args.iter().copied().map(TriggerArg::Int).collect(),
        }
    }

    /// Trigger on an attribute taking a given value
    #[must_use] pub fn attribute_updated(
        cluster_id: u16,
        endpoint_id: u8,
        attribute_id: u16,
        attribute_name: &str,
        value: i64,
    ) -> Self {
        Self {
            command: command::ATTRIBUTE_UPDATED.to_string(),
            cluster_id,
            endpoint_id,
            args: vec![TriggerArg::Attribute {
                attribute_id,
                attribute_name: attribute_name.to_string(),
                value,
            }],
        }
    }

    /// Whether an event is the one this trigger describes
    #[must_use] pub fn matches(&self, event: &NetworkEvent) -> bool {
        match event {
            NetworkEvent::ClusterCommand {
                endpoint,
                cluster_id,
                command,
                args,
                ..
            } => {
                self.command == *command
                    && self.cluster_id == *cluster_id
                    && self.endpoint_id == *endpoint
                    && self.args.len() == args.len()
                    && self
                        .args
                        .iter()
                        .zip(args)
                        .all(|(expected, actual)| *expected == TriggerArg::Int(*actual))
            }
            NetworkEvent::AttributeUpdated {
                endpoint,
                cluster_id,
                attribute_id,
                value,
                ..
            } => {
                if self.command != command::ATTRIBUTE_UPDATED
                    || self.cluster_id != *cluster_id
                    || self.endpoint_id != *endpoint
                {
                    return false;
                }
                match self.args.as_slice() {
                    [TriggerArg::Attribute {
                        attribute_id: expected_id,
                        value: expected_value,
                        ..
                    }] => expected_id == attribute_id && value.as_i64() == Some(*expected_value),
                    _ => false,
                }
            }
            NetworkEvent::QuirkApplied { .. } => false,
        }
    }
}

/// One row of a trigger table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerEntry {
    #[serde(flatten)]
    pub key: TriggerKey,
    #[serde(flatten)]
    pub trigger: DeviceTrigger,
}

/// Gesture to event mapping of one quirk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TriggerTable {
    entries: Vec<TriggerEntry>,
}

impl TriggerTable {
    #[must_use] pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, replacing any entry with the same key
    #[must_use] pub fn with(
        mut self,
        press: PressKind,
        subtype: &str,
        trigger: DeviceTrigger,
    ) -> Self {
        self.insert(TriggerKey::new(press, subtype), trigger);
        self
    }

    /// Add an entry, replacing any entry with the same key
    pub fn insert(&mut self, key: TriggerKey, trigger: DeviceTrigger) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.key == key) {
            existing.trigger = trigger;
        } else {
            self.entries.push(TriggerEntry { key, trigger });
        }
    }

    /// Look up the trigger for a gesture
    #[must_use] pub fn get(&self, press: PressKind, subtype: &str) -> Option<&DeviceTrigger> {
        self.entries
            .iter()
            .find(|e| e.key.press == press && e.key.subtype == subtype)
            .map(|e| &e.trigger)
    }

    /// Gesture that produced an event, if any
    #[must_use] pub fn resolve(&self, event: &NetworkEvent) -> Option<&TriggerKey> {
        self.entries
            .iter()
            .find(|e| e.trigger.matches(event))
            .map(|e| &e.key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TriggerEntry> {
        self.entries.iter()
    }

    #[must_use] pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use] pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zcl_protocol::AttributeValue;

    fn table() -> TriggerTable {
        TriggerTable::new()
            .with(
                PressKind::ShortPress,
                DIM_UP,
                DeviceTrigger::command(command::STEP, 8, 1, &[0, 43, 10]),
            )
            .with(
                PressKind::ShortPress,
                "party",
                DeviceTrigger::attribute_updated(5, 1, 1, "current_scene", 2),
            )
    }

    #[test]
    fn test_insert_replaces_same_key() {
        let table = table().with(
            PressKind::ShortPress,
            DIM_UP,
            DeviceTrigger::command(command::STEP, 8, 1, &[0, 20, 10]),
        );
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get(PressKind::ShortPress, DIM_UP).unwrap().args,
            vec![TriggerArg::Int(0), TriggerArg::Int(20), TriggerArg::Int(10)]
        );
    }

    #[test]
    fn test_resolve_command_requires_exact_args() {
        let table = table();
        let mut event = NetworkEvent::ClusterCommand {
            ieee_address: [0; 8],
            endpoint: 1,
            cluster_id: 8,
            command: "step",
            args: vec![0, 43, 10],
        };
        assert_eq!(
            table.resolve(&event),
            Some(&TriggerKey::new(PressKind::ShortPress, DIM_UP))
        );

        if let NetworkEvent::ClusterCommand { args, .. } = &mut event {
            args.push(1);
        }
        assert_eq!(table.resolve(&event), None);
    }

    #[test]
    fn test_resolve_attribute_update() {
        let event = NetworkEvent::AttributeUpdated {
            ieee_address: [0; 8],
            endpoint: 1,
            cluster_id: 5,
            attribute_id: 1,
            attribute_name: Some("current_scene"),
            value: AttributeValue::Uint8(2),
        };
        assert_eq!(table().resolve(&event).unwrap().subtype, "party");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(table()).unwrap();
        assert_eq!(json[0]["type"], "remote_button_short_press");
        assert_eq!(json[0]["subtype"], "dim_up");
        assert_eq!(json[0]["command"], "step");
        assert_eq!(json[1]["args"][0]["attribute_name"], "current_scene");

        let back: TriggerTable = serde_json::from_value(json).unwrap();
        assert_eq!(back, table());
    }
}

//! ZCL (Zigbee Cluster Library) definitions

/// Common ZCL cluster IDs
pub mod id {
    // General Clusters
    pub const BASIC: u16 = 0x0000;
    pub const POWER_CONFIG: u16 = 0x0001;
    pub const DEVICE_TEMP: u16 = 0x0002;
    pub const IDENTIFY: u16 = 0x0003;
    pub const GROUPS: u16 = 0x0004;
    pub const SCENES: u16 = 0x0005;
    pub const ON_OFF: u16 = 0x0006;
    pub const ON_OFF_SWITCH_CONFIG: u16 = 0x0007;
    pub const LEVEL_CONTROL: u16 = 0x0008;
    pub const ALARMS: u16 = 0x0009;
    pub const TIME: u16 = 0x000A;
    pub const OTA: u16 = 0x0019;

    // Lighting Clusters
    pub const COLOR_CONTROL: u16 = 0x0300;
    pub const BALLAST_CONFIG: u16 = 0x0301;

    // Light Link commissioning
    pub const LIGHT_LINK: u16 = 0x1000;
}

/// Profile IDs
pub mod profile {
    pub const ZDO: u16 = 0x0000;
    pub const HOME_AUTOMATION: u16 = 0x0104;
}

/// Home Automation device types
pub mod device_type {
    pub const ON_OFF_SWITCH: u16 = 0x0000;
    pub const LEVEL_CONTROL_SWITCH: u16 = 0x0001;
    pub const REMOTE_CONTROL: u16 = 0x0006;
    pub const SCENE_SELECTOR: u16 = 0x0004;
    pub const COLOR_DIMMER_SWITCH: u16 = 0x0105;
    pub const NON_COLOR_CONTROLLER: u16 = 0x0820;
    pub const COLOR_CONTROLLER: u16 = 0x0800;
}

/// Basic cluster attributes
pub mod basic_attrs {
    pub const ZCL_VERSION: u16 = 0x0000;
    pub const APPLICATION_VERSION: u16 = 0x0001;
    pub const STACK_VERSION: u16 = 0x0002;
    pub const HW_VERSION: u16 = 0x0003;
    pub const MANUFACTURER_NAME: u16 = 0x0004;
    pub const MODEL_IDENTIFIER: u16 = 0x0005;
    pub const DATE_CODE: u16 = 0x0006;
    pub const POWER_SOURCE: u16 = 0x0007;
    pub const SW_BUILD_ID: u16 = 0x4000;
}

/// Power Configuration cluster attributes
pub mod power_attrs {
    pub const BATTERY_VOLTAGE: u16 = 0x0020;
    pub const BATTERY_PERCENTAGE_REMAINING: u16 = 0x0021;
    pub const BATTERY_SIZE: u16 = 0x0031;
    pub const BATTERY_QUANTITY: u16 = 0x0033;
    pub const BATTERY_RATED_VOLTAGE: u16 = 0x0034;
}

/// Scenes cluster attributes
pub mod scenes_attrs {
    pub const COUNT: u16 = 0x0000;
    pub const CURRENT_SCENE: u16 = 0x0001;
    pub const CURRENT_GROUP: u16 = 0x0002;
    pub const SCENE_VALID: u16 = 0x0003;
    pub const NAME_SUPPORT: u16 = 0x0004;
}

/// Human-readable name of a standard attribute
#[must_use] pub fn attribute_name(cluster_id: u16, attribute_id: u16) -> Option<&'static str> {
    let name = match (cluster_id, attribute_id) {
        (id::BASIC, basic_attrs::ZCL_VERSION) => "zcl_version",
        (id::BASIC, basic_attrs::APPLICATION_VERSION) => "app_version",
        (id::BASIC, basic_attrs::STACK_VERSION) => "stack_version",
        (id::BASIC, basic_attrs::HW_VERSION) => "hw_version",
        (id::BASIC, basic_attrs::MANUFACTURER_NAME) => "manufacturer",
        (id::BASIC, basic_attrs::MODEL_IDENTIFIER) => "model",
        (id::BASIC, basic_attrs::DATE_CODE) => "date_code",
        (id::BASIC, basic_attrs::POWER_SOURCE) => "power_source",
        (id::BASIC, basic_attrs::SW_BUILD_ID) => "sw_build_id",
        (id::POWER_CONFIG, power_attrs::BATTERY_VOLTAGE) => "battery_voltage",
        (id::POWER_CONFIG, power_attrs::BATTERY_PERCENTAGE_REMAINING) => {
            "battery_percentage_remaining"
        }
        (id::POWER_CONFIG, power_attrs::BATTERY_SIZE) => "battery_size",
        (id::POWER_CONFIG, power_attrs::BATTERY_QUANTITY) => "battery_quantity",
        (id::POWER_CONFIG, power_attrs::BATTERY_RATED_VOLTAGE) => "battery_rated_voltage",
        (id::SCENES, scenes_attrs::COUNT) => "count",
        (id::SCENES, scenes_attrs::CURRENT_SCENE) => "current_scene",
        (id::SCENES, scenes_attrs::CURRENT_GROUP) => "current_group",
        (id::SCENES, scenes_attrs::SCENE_VALID) => "scene_valid",
        (id::SCENES, scenes_attrs::NAME_SUPPORT) => "name_support",
        _ => return None,
    };
    Some(name)
}

/// Level Control cluster commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelCommand {
    Move {
        mode: u8,
        rate: u8,
    },
    Step {
        mode: u8,
        step_size: u8,
        transition_time: u16,
    },
    Stop,
    MoveWithOnOff {
        mode: u8,
        rate: u8,
    },
    StepWithOnOff {
        mode: u8,
        step_size: u8,
        transition_time: u16,
    },
    StopWithOnOff,
}

impl LevelCommand {
    /// Decode a client-to-server Level Control command
    #[must_use] pub fn parse(command_id: u8, payload: &[u8]) -> Option<Self> {
        let cmd = match (command_id, payload) {
            (0x01, [mode, rate, ..]) => Self::Move {
                mode: *mode,
                rate: *rate,
            },
            (0x02, [mode, step_size, t0, t1, ..]) => Self::Step {
                mode: *mode,
                step_size: *step_size,
                transition_time: u16::from_le_bytes([*t0, *t1]),
            },
            (0x03, _) => Self::Stop,
            (0x05, [mode, rate, ..]) => Self::MoveWithOnOff {
                mode: *mode,
                rate: *rate,
            },
            (0x06, [mode, step_size, t0, t1, ..]) => Self::StepWithOnOff {
                mode: *mode,
                step_size: *step_size,
                transition_time: u16::from_le_bytes([*t0, *t1]),
            },
            (0x07, _) => Self::StopWithOnOff,
            _ => return None,
        };
        Some(cmd)
    }

    /// Command name as reported to automations
    #[must_use] pub fn name(&self) -> &'static str {
        match self {
            Self::Move { .. } => "move",
            Self::Step { .. } => "step",
            Self::Stop => "stop",
            Self::MoveWithOnOff { .. } => "move_with_on_off",
            Self::StepWithOnOff { .. } => "step_with_on_off",
            Self::StopWithOnOff => "stop_with_on_off",
        }
    }

    /// Positional arguments in wire order
    #[must_use] pub fn args(&self) -> Vec<i64> {
        match *self {
            Self::Move { mode, rate } | Self::MoveWithOnOff { mode, rate } => {
                vec![i64::from(mode), i64::from(rate)]
            }
            Self::Step {
                mode,
                step_size,
                transition_time,
            }
            | Self::StepWithOnOff {
                mode,
                step_size,
                transition_time,
            } => vec![
                i64::from(mode),
                i64::from(step_size),
                i64::from(transition_time),
            ],
            Self::Stop | Self::StopWithOnOff => Vec::new(),
        }
    }
}

/// Color Control cluster commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorCommand {
    MoveToColorTemperature {
        color_temp_mireds: u16,
        transition_time: u16,
    },
}

impl ColorCommand {
    /// Decode a client-to-server Color Control command
    #[must_use] pub fn parse(command_id: u8, payload: &[u8]) -> Option<Self> {
        match (command_id, payload) {
            (0x0A, [m0, m1, t0, t1, ..]) => Some(Self::MoveToColorTemperature {
                color_temp_mireds: u16::from_le_bytes([*m0, *m1]),
                transition_time: u16::from_le_bytes([*t0, *t1]),
            }),
            _ => None,
        }
    }

    /// Command name as reported to automations
    #[must_use] pub fn name(&self) -> &'static str {
        match self {
            Self::MoveToColorTemperature { .. } => "move_to_color_temp",
        }
    }

    /// Positional arguments in wire order
    #[must_use] pub fn args(&self) -> Vec<i64> {
        match *self {
            Self::MoveToColorTemperature {
                color_temp_mireds,
                transition_time,
            } => vec![i64::from(color_temp_mireds), i64::from(transition_time)],
        }
    }
}

/// Decode a cluster-specific command into its automation name and arguments
#[must_use] pub fn decode_command(
    cluster_id: u16,
    command_id: u8,
    payload: &[u8],
) -> Option<(&'static str, Vec<i64>)> {
    match cluster_id {
        id::LEVEL_CONTROL => LevelCommand::parse(command_id, payload).map(|c| (c.name(), c.args())),
        id::COLOR_CONTROL => ColorCommand::parse(command_id, payload).map(|c| (c.name(), c.args())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_step_down() {
        let (name, args) = decode_command(id::LEVEL_CONTROL, 0x02, &[1, 43, 10, 0]).unwrap();
        assert_eq!(name, "step");
        assert_eq!(args, vec![1, 43, 10]);
    }

    #[test]
    fn test_decode_short_step_rejected() {
        assert_eq!(LevelCommand::parse(0x02, &[1, 43]), None);
    }

    #[test]
    fn test_decode_color_temp() {
        let payload = [0x72, 0x01, 0x0A, 0x00];
        let (name, args) = decode_command(id::COLOR_CONTROL, 0x0A, &payload).unwrap();
        assert_eq!(name, "move_to_color_temp");
        assert_eq!(args, vec![370, 10]);
    }

    #[test]
    fn test_attribute_names() {
        assert_eq!(
            attribute_name(id::SCENES, scenes_attrs::CURRENT_SCENE),
            Some("current_scene")
        );
        assert_eq!(attribute_name(id::BASIC, 0x4005), None);
    }
}

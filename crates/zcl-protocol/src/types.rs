//! Common types used throughout the protocol

use bytes::{Buf, BufMut, BytesMut};
use thiserror::Error;

/// Protocol errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("Frame too short: {0} bytes")]
    FrameTooShort(usize),

    #[error("Unknown global command ID: {0:#04X}")]
    UnknownCommand(u8),

    #[error("Unknown attribute data type: {0:#04X}")]
    UnknownDataType(u8),
}

/// ZCL frame types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FrameType {
    Global = 0x00,
    ClusterSpecific = 0x01,
}

/// ZCL direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Direction {
    ClientToServer = 0x00,
    ServerToClient = 0x01,
}

/// ZCL global commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GlobalCommand {
    ReadAttributes = 0x00,
    ReadAttributesResponse = 0x01,
    WriteAttributes = 0x02,
    WriteAttributesUndivided = 0x03,
    WriteAttributesResponse = 0x04,
    WriteAttributesNoResponse = 0x05,
    ConfigureReporting = 0x06,
    ConfigureReportingResponse = 0x07,
    ReadReportingConfig = 0x08,
    ReadReportingConfigResponse = 0x09,
    ReportAttributes = 0x0A,
    DefaultResponse = 0x0B,
    DiscoverAttributes = 0x0C,
    DiscoverAttributesResponse = 0x0D,
}

impl TryFrom<u8> for GlobalCommand {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, ProtocolError> {
        match value {
            0x00 => Ok(GlobalCommand::ReadAttributes),
            0x01 => Ok(GlobalCommand::ReadAttributesResponse),
            0x02 => Ok(GlobalCommand::WriteAttributes),
            0x03 => Ok(GlobalCommand::WriteAttributesUndivided),
            0x04 => Ok(GlobalCommand::WriteAttributesResponse),
            0x05 => Ok(GlobalCommand::WriteAttributesNoResponse),
            0x06 => Ok(GlobalCommand::ConfigureReporting),
            0x07 => Ok(GlobalCommand::ConfigureReportingResponse),
            0x08 => Ok(GlobalCommand::ReadReportingConfig),
            0x09 => Ok(GlobalCommand::ReadReportingConfigResponse),
            0x0A => Ok(GlobalCommand::ReportAttributes),
            0x0B => Ok(GlobalCommand::DefaultResponse),
            0x0C => Ok(GlobalCommand::DiscoverAttributes),
            0x0D => Ok(GlobalCommand::DiscoverAttributesResponse),
            v => Err(ProtocolError::UnknownCommand(v)),
        }
    }
}

/// ZCL attribute data types
///
/// Every fixed-width and string type. Collections (array, structure, set,
/// bag) are not decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DataType {
    NoData = 0x00,
    Data8 = 0x08,
    Data16 = 0x09,
    Data24 = 0x0A,
    Data32 = 0x0B,
    Data40 = 0x0C,
    Data48 = 0x0D,
    Data56 = 0x0E,
    Data64 = 0x0F,
    Boolean = 0x10,
    Bitmap8 = 0x18,
    Bitmap16 = 0x19,
    Bitmap24 = 0x1A,
    Bitmap32 = 0x1B,
    Bitmap40 = 0x1C,
    Bitmap48 = 0x1D,
    Bitmap56 = 0x1E,
    Bitmap64 = 0x1F,
    Uint8 = 0x20,
    Uint16 = 0x21,
    Uint24 = 0x22,
    Uint32 = 0x23,
    Uint40 = 0x24,
    Uint48 = 0x25,
    Uint56 = 0x26,
    Uint64 = 0x27,
    Int8 = 0x28,
    Int16 = 0x29,
    Int24 = 0x2A,
    Int32 = 0x2B,
    Int40 = 0x2C,
    Int48 = 0x2D,
    Int56 = 0x2E,
    Int64 = 0x2F,
    Enum8 = 0x30,
    Enum16 = 0x31,
    SemiFloat = 0x38,
    SingleFloat = 0x39,
    DoubleFloat = 0x3A,
    OctetString = 0x41,
    String = 0x42,
    LongOctetString = 0x43,
    LongString = 0x44,
    TimeOfDay = 0xE0,
    Date = 0xE1,
    UtcTime = 0xE2,
    ClusterId = 0xE8,
    AttributeId = 0xE9,
    BacnetOid = 0xEA,
    IeeeAddress = 0xF0,
    SecurityKey = 0xF1,
}

impl DataType {
    pub const ALL: [DataType; 51] = [
        DataType::NoData,
        DataType::Data8,
        DataType::Data16,
        DataType::Data24,
        DataType::Data32,
        DataType::Data40,
        DataType::Data48,
        DataType::Data56,
        DataType::Data64,
        DataType::Boolean,
        DataType::Bitmap8,
        DataType::Bitmap16,
        DataType::Bitmap24,
        DataType::Bitmap32,
        DataType::Bitmap40,
        DataType::Bitmap48,
        DataType::Bitmap56,
        DataType::Bitmap64,
        DataType::Uint8,
        DataType::Uint16,
        DataType::Uint24,
        DataType::Uint32,
        DataType::Uint40,
        DataType::Uint48,
        DataType::Uint56,
        DataType::Uint64,
        DataType::Int8,
        DataType::Int16,
        DataType::Int24,
        DataType::Int32,
        DataType::Int40,
        DataType::Int48,
        DataType::Int56,
        DataType::Int64,
        DataType::Enum8,
        DataType::Enum16,
        DataType::SemiFloat,
        DataType::SingleFloat,
        DataType::DoubleFloat,
        DataType::OctetString,
        DataType::String,
        DataType::LongOctetString,
        DataType::LongString,
        DataType::TimeOfDay,
        DataType::Date,
        DataType::UtcTime,
        DataType::ClusterId,
        DataType::AttributeId,
        DataType::BacnetOid,
        DataType::IeeeAddress,
        DataType::SecurityKey,
    ];

    /// Encoded width in bytes, `None` for length-prefixed types
    #[must_use] pub fn fixed_len(self) -> Option<usize> {
        let code = self as u8;
        match self {
            DataType::NoData => Some(0),
            DataType::Boolean | DataType::Enum8 => Some(1),
            // data, bitmap, uint and int families encode their width in the low bits
            _ if matches!(code, 0x08..=0x0F | 0x18..=0x2F) => Some(usize::from(code & 0x07) + 1),
            DataType::Enum16
            | DataType::SemiFloat
            | DataType::ClusterId
            | DataType::AttributeId => Some(2),
            DataType::SingleFloat
            | DataType::TimeOfDay
            | DataType::Date
            | DataType::UtcTime
            | DataType::BacnetOid => Some(4),
            DataType::DoubleFloat | DataType::IeeeAddress => Some(8),
            DataType::SecurityKey => Some(16),
            // length-prefixed strings
            _ => None,
        }
    }

    /// Width of the length prefix of string types
    fn prefix_len(self) -> usize {
        match self {
            DataType::LongOctetString | DataType::LongString => 2,
            _ => 1,
        }
    }

    fn is_float(self) -> bool {
        matches!(
            self,
            DataType::SemiFloat | DataType::SingleFloat | DataType::DoubleFloat
        )
    }

    fn is_signed(self) -> bool {
        matches!(self as u8, 0x28..=0x2F)
    }
}

impl TryFrom<u8> for DataType {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, ProtocolError> {
        DataType::ALL
            .into_iter()
            .find(|t| *t as u8 == value)
            .ok_or(ProtocolError::UnknownDataType(value))
    }
}

/// A decoded, typed attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    NoData,
    Bool(bool),
    Bitmap8(u8),
    Bitmap16(u16),
    Uint8(u8),
    Uint16(u16),
    Uint24(u32),
    Uint32(u32),
    Int8(i8),
    Int16(i16),
    Int24(i32),
    Int32(i32),
    Enum8(u8),
    Enum16(u16),
    String(String),
    /// Any other fixed-width type up to 8 bytes, as its little-endian bits
    ///
    /// Floats, times and identifiers keep their raw encoding.
    Unsigned { data_type: DataType, value: u64 },
    /// Signed integers wider than 32 bits
    Signed { data_type: DataType, value: i64 },
    Octets(Vec<u8>),
    LongOctets(Vec<u8>),
    LongString(String),
    SecurityKey([u8; 16]),
}

impl AttributeValue {
    /// The wire data type of this value
    #[must_use] pub fn data_type(&self) -> DataType {
        match self {
            AttributeValue::NoData => DataType::NoData,
            AttributeValue::Bool(_) => DataType::Boolean,
            AttributeValue::Bitmap8(_) => DataType::Bitmap8,
            AttributeValue::Bitmap16(_) => DataType::Bitmap16,
            AttributeValue::Uint8(_) => DataType::Uint8,
            AttributeValue::Uint16(_) => DataType::Uint16,
            AttributeValue::Uint24(_) => DataType::Uint24,
            AttributeValue::Uint32(_) => DataType::Uint32,
            AttributeValue::Int8(_) => DataType::Int8,
            AttributeValue::Int16(_) => DataType::Int16,
            AttributeValue::Int24(_) => DataType::Int24,
            AttributeValue::Int32(_) => DataType::Int32,
            AttributeValue::Enum8(_) => DataType::Enum8,
            AttributeValue::Enum16(_) => DataType::Enum16,
            AttributeValue::String(_) => DataType::String,
            AttributeValue::Unsigned { data_type, .. }
            | AttributeValue::Signed { data_type, .. } => *data_type,
            AttributeValue::Octets(_) => DataType::OctetString,
            AttributeValue::LongOctets(_) => DataType::LongOctetString,
            AttributeValue::LongString(_) => DataType::LongString,
            AttributeValue::SecurityKey(_) => DataType::SecurityKey,
        }
    }

    /// Integer view of the value, if it has one
    #[must_use] pub fn as_i64(&self) -> Option<i64> {
        match *self {
            AttributeValue::Bool(b) => Some(i64::from(b)),
            AttributeValue::Bitmap8(v) | AttributeValue::Uint8(v) | AttributeValue::Enum8(v) => {
                Some(i64::from(v))
            }
            AttributeValue::Bitmap16(v) | AttributeValue::Uint16(v) | AttributeValue::Enum16(v) => {
                Some(i64::from(v))
            }
            AttributeValue::Uint24(v) | AttributeValue::Uint32(v) => Some(i64::from(v)),
            AttributeValue::Int8(v) => Some(i64::from(v)),
            AttributeValue::Int16(v) => Some(i64::from(v)),
            AttributeValue::Int24(v) | AttributeValue::Int32(v) => Some(i64::from(v)),
            AttributeValue::Unsigned { data_type, value } if !data_type.is_float() => {
                i64::try_from(value).ok()
            }
            AttributeValue::Signed { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Decode a value of the given type from the front of `buf`
    pub fn decode(data_type: DataType, buf: &mut impl Buf) -> Result<Self, ProtocolError> {
        let needed = data_type
            .fixed_len()
            .unwrap_or_else(|| data_type.prefix_len());
        if buf.remaining() < needed {
            return Err(ProtocolError::FrameTooShort(buf.remaining()));
        }

        let value = match data_type {
            DataType::NoData => AttributeValue::NoData,
            DataType::Boolean => AttributeValue::Bool(buf.get_u8() != 0),
            DataType::Bitmap8 => AttributeValue::Bitmap8(buf.get_u8()),
            DataType::Bitmap16 => AttributeValue::Bitmap16(buf.get_u16_le()),
            DataType::Uint8 => AttributeValue::Uint8(buf.get_u8()),
            DataType::Uint16 => AttributeValue::Uint16(buf.get_u16_le()),
            DataType::Uint24 => AttributeValue::Uint24(buf.get_uint_le(3) as u32),
            DataType::Uint32 => AttributeValue::Uint32(buf.get_u32_le()),
            DataType::Int8 => AttributeValue::Int8(buf.get_i8()),
            DataType::Int16 => AttributeValue::Int16(buf.get_i16_le()),
            DataType::Int24 => AttributeValue::Int24(buf.get_int_le(3) as i32),
            DataType::Int32 => AttributeValue::Int32(buf.get_i32_le()),
            DataType::Enum8 => AttributeValue::Enum8(buf.get_u8()),
            DataType::Enum16 => AttributeValue::Enum16(buf.get_u16_le()),
            DataType::String => {
                AttributeValue::String(lossy(take_prefixed(data_type, buf)?))
            }
            DataType::LongString => {
                AttributeValue::LongString(lossy(take_prefixed(data_type, buf)?))
            }
            DataType::OctetString => AttributeValue::Octets(take_prefixed(data_type, buf)?),
            DataType::LongOctetString => {
                AttributeValue::LongOctets(take_prefixed(data_type, buf)?)
            }
            DataType::SecurityKey => {
                let mut key = [0u8; 16];
                buf.copy_to_slice(&mut key);
                AttributeValue::SecurityKey(key)
            }
            _ if data_type.is_signed() => AttributeValue::Signed {
                data_type,
                value: buf.get_int_le(needed),
            },
            _ => AttributeValue::Unsigned {
                data_type,
                value: buf.get_uint_le(needed),
            },
        };

        Ok(value)
    }

    /// Encode the value (without its type byte)
    pub fn encode(&self, out: &mut BytesMut) {
        match self {
            AttributeValue::NoData => {}
            AttributeValue::Bool(b) => out.put_u8(u8::from(*b)),
            AttributeValue::Bitmap8(v) | AttributeValue::Uint8(v) | AttributeValue::Enum8(v) => {
                out.put_u8(*v);
            }
            AttributeValue::Bitmap16(v) | AttributeValue::Uint16(v) | AttributeValue::Enum16(v) => {
                out.put_u16_le(*v);
            }
            AttributeValue::Uint24(v) => out.put_uint_le(u64::from(*v), 3),
            AttributeValue::Uint32(v) => out.put_u32_le(*v),
            AttributeValue::Int8(v) => out.put_i8(*v),
            AttributeValue::Int16(v) => out.put_i16_le(*v),
            AttributeValue::Int24(v) => out.put_int_le(i64::from(*v), 3),
            AttributeValue::Int32(v) => out.put_i32_le(*v),
            AttributeValue::String(s) => put_prefixed(out, s.as_bytes(), false),
            AttributeValue::LongString(s) => put_prefixed(out, s.as_bytes(), true),
            AttributeValue::Octets(b) => put_prefixed(out, b, false),
            AttributeValue::LongOctets(b) => put_prefixed(out, b, true),
            AttributeValue::SecurityKey(key) => out.put_slice(key),
            AttributeValue::Unsigned { data_type, value } => {
                out.put_uint_le(*value, data_type.fixed_len().unwrap_or(8).min(8));
            }
            AttributeValue::Signed { data_type, value } => {
                out.put_int_le(*value, data_type.fixed_len().unwrap_or(8).min(8));
            }
        }
    }
}

/// Read a length-prefixed byte string; the all-ones length marks an invalid
/// (unset) value and decodes as empty
fn take_prefixed(data_type: DataType, buf: &mut impl Buf) -> Result<Vec<u8>, ProtocolError> {
    let len = if data_type.prefix_len() == 2 {
        match buf.get_u16_le() {
            0xFFFF => return Ok(Vec::new()),
            len => usize::from(len),
        }
    } else {
        match buf.get_u8() {
            0xFF => return Ok(Vec::new()),
            len => usize::from(len),
        }
    };
    if buf.remaining() < len {
        return Err(ProtocolError::FrameTooShort(buf.remaining()));
    }
    Ok(buf.copy_to_bytes(len).to_vec())
}

fn put_prefixed(out: &mut BytesMut, bytes: &[u8], long: bool) {
    if long {
        let len = bytes.len().min(0xFFFE);
        out.put_u16_le(len as u16);
        out.put_slice(&bytes[..len]);
    } else {
        let len = bytes.len().min(0xFE);
        out.put_u8(len as u8);
        out.put_slice(&bytes[..len]);
    }
}

fn lossy(raw: Vec<u8>) -> String {
    String::from_utf8_lossy(&raw).into_owned()
}

/// ZCL frame (Zigbee Cluster Library)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZclFrame {
    frame_control: u8,
    manufacturer_code: Option<u16>,
    transaction_seq: u8,
    command_id: u8,
    payload: Vec<u8>,
}

impl ZclFrame {
    /// Parse a ZCL frame from raw ASDU bytes
    pub fn parse(data: &[u8]) -> Result<Self, ProtocolError> {
        if data.len() < 3 {
            return Err(ProtocolError::FrameTooShort(data.len()));
        }

        let frame_control = data[0];
        let mut idx = 1;

        // Check for manufacturer-specific (bit 2)
        let manufacturer_code = if (frame_control & 0x04) != 0 {
            if data.len() < idx + 2 {
                return Err(ProtocolError::FrameTooShort(data.len()));
            }
            let code = u16::from_le_bytes([data[idx], data[idx + 1]]);
            idx += 2;
            Some(code)
        } else {
            None
        };

        if data.len() < idx + 2 {
            return Err(ProtocolError::FrameTooShort(data.len()));
        }

        let transaction_seq = data[idx];
        idx += 1;
        let command_id = data[idx];
        idx += 1;

        let payload = data[idx..].to_vec();

        Ok(Self {
            frame_control,
            manufacturer_code,
            transaction_seq,
            command_id,
            payload,
        })
    }

    /// Get frame control byte
    #[must_use] pub fn frame_control(&self) -> u8 {
        self.frame_control
    }

    /// Frame type from the two low frame control bits
    #[must_use] pub fn frame_type(&self) -> FrameType {
        if self.is_cluster_specific() {
            FrameType::ClusterSpecific
        } else {
            FrameType::Global
        }
    }

    /// Check if this is a cluster-specific command (vs global)
    #[must_use] pub fn is_cluster_specific(&self) -> bool {
        (self.frame_control & 0x03) == 0x01
    }

    /// Check if this is from server to client (vs client to server)
    #[must_use] pub fn is_from_server(&self) -> bool {
        (self.frame_control & 0x08) != 0
    }

    /// Direction of the frame
    #[must_use] pub fn direction(&self) -> Direction {
        if self.is_from_server() {
            Direction::ServerToClient
        } else {
            Direction::ClientToServer
        }
    }

    /// Manufacturer code, for manufacturer-specific frames
    #[must_use] pub fn manufacturer_code(&self) -> Option<u16> {
        self.manufacturer_code
    }

    /// Get the transaction sequence number
    #[must_use] pub fn transaction_seq(&self) -> u8 {
        self.transaction_seq
    }

    /// Get the command ID
    #[must_use] pub fn command_id(&self) -> u8 {
        self.command_id
    }

    /// Get the payload
    #[must_use] pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Create a global (profile-wide) command frame (client to server)
    #[must_use] pub fn global_command(transaction_seq: u8, command: GlobalCommand) -> Self {
        Self {
            frame_control: 0x00,
            manufacturer_code: None,
            transaction_seq,
            command_id: command as u8,
            payload: Vec::new(),
        }
    }

    /// Create a cluster-specific command frame (client to server)
    #[must_use] pub fn cluster_command(transaction_seq: u8, command_id: u8) -> Self {
        Self {
            frame_control: 0x01, // Cluster-specific, client-to-server
            manufacturer_code: None,
            transaction_seq,
            command_id,
            payload: Vec::new(),
        }
    }

    /// Mark the frame manufacturer-specific
    #[must_use] pub fn with_manufacturer(mut self, code: u16) -> Self {
        self.frame_control |= 0x04;
        self.manufacturer_code = Some(code);
        self
    }

    /// Attach a payload
    #[must_use] pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Serialize to bytes
    #[must_use] pub fn serialize(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(5 + self.payload.len());
        data.push(self.frame_control);
        if let Some(mfr) = self.manufacturer_code {
            data.extend_from_slice(&mfr.to_le_bytes());
        }
        data.push(self.transaction_seq);
        data.push(self.command_id);
        data.extend_from_slice(&self.payload);
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manufacturer_specific_frame() {
        let data = [0x05, 0x7C, 0x11, 0x2A, 0x02, 0xAA];
        let frame = ZclFrame::parse(&data).unwrap();
        assert_eq!(frame.manufacturer_code(), Some(0x117C));
        assert_eq!(frame.transaction_seq(), 0x2A);
        assert_eq!(frame.command_id(), 0x02);
        assert_eq!(frame.payload(), &[0xAA]);
        assert!(frame.is_cluster_specific());
        assert_eq!(frame.serialize(), data);
    }

    #[test]
    fn test_parse_short_frame() {
        assert_eq!(
            ZclFrame::parse(&[0x04, 0x7C, 0x11]),
            Err(ProtocolError::FrameTooShort(3))
        );
        assert_eq!(ZclFrame::parse(&[0x00]), Err(ProtocolError::FrameTooShort(1)));
    }

    #[test]
    fn test_global_frame_direction() {
        let frame = ZclFrame::global_command(7, GlobalCommand::WriteAttributes);
        assert_eq!(frame.frame_type(), FrameType::Global);
        assert_eq!(frame.direction(), Direction::ClientToServer);
        assert_eq!(frame.serialize(), vec![0x00, 7, 0x02]);
    }

    #[test]
    fn test_decode_signed_24() {
        let mut buf: &[u8] = &[0xFE, 0xFF, 0xFF];
        let value = AttributeValue::decode(DataType::Int24, &mut buf).unwrap();
        assert_eq!(value, AttributeValue::Int24(-2));
        assert_eq!(value.as_i64(), Some(-2));
    }

    #[test]
    fn test_decode_invalid_string() {
        let mut buf: &[u8] = &[0xFF];
        let value = AttributeValue::decode(DataType::String, &mut buf).unwrap();
        assert_eq!(value, AttributeValue::String(String::new()));
    }

    #[test]
    fn test_decode_truncated_value() {
        let mut buf: &[u8] = &[0x01];
        assert_eq!(
            AttributeValue::decode(DataType::Uint16, &mut buf),
            Err(ProtocolError::FrameTooShort(1))
        );
    }

    #[test]
    fn test_unknown_data_type() {
        // array
        assert_eq!(
            DataType::try_from(0x48),
            Err(ProtocolError::UnknownDataType(0x48))
        );
        assert_eq!(DataType::try_from(0xE2), Ok(DataType::UtcTime));
    }

    #[test]
    fn test_fixed_widths() {
        assert_eq!(DataType::Data40.fixed_len(), Some(5));
        assert_eq!(DataType::Bitmap24.fixed_len(), Some(3));
        assert_eq!(DataType::Uint64.fixed_len(), Some(8));
        assert_eq!(DataType::Int48.fixed_len(), Some(6));
        assert_eq!(DataType::SingleFloat.fixed_len(), Some(4));
        assert_eq!(DataType::IeeeAddress.fixed_len(), Some(8));
        assert_eq!(DataType::LongString.fixed_len(), None);
    }

    #[test]
    fn test_decode_octet_string() {
        let mut buf: &[u8] = &[0x02, 0xAA, 0xBB, 0x07];
        let value = AttributeValue::decode(DataType::OctetString, &mut buf).unwrap();
        assert_eq!(value, AttributeValue::Octets(vec![0xAA, 0xBB]));
        assert_eq!(buf, &[0x07]);
        assert_eq!(value.as_i64(), None);

        let mut long: &[u8] = &[0x01, 0x00, 0x61];
        assert_eq!(
            AttributeValue::decode(DataType::LongString, &mut long).unwrap(),
            AttributeValue::LongString("a".to_string())
        );
    }

    #[test]
    fn test_decode_wide_integers() {
        let mut buf: &[u8] = &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        let value = AttributeValue::decode(DataType::Int40, &mut buf).unwrap();
        assert_eq!(value.as_i64(), Some(-1));

        let mut buf: &[u8] = &[0x10, 0x00, 0x00, 0x00, 0x00, 0x01];
        let value = AttributeValue::decode(DataType::Uint48, &mut buf).unwrap();
        assert_eq!(value.as_i64(), Some(0x0100_0000_0010));

        let mut out = BytesMut::new();
        value.encode(&mut out);
        assert_eq!(&out[..], &[0x10, 0x00, 0x00, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn test_float_has_no_integer_view() {
        let mut buf: &[u8] = &[0x00, 0x00, 0x80, 0x3F];
        let value = AttributeValue::decode(DataType::SingleFloat, &mut buf).unwrap();
        assert_eq!(value.data_type(), DataType::SingleFloat);
        assert_eq!(value.as_i64(), None);
    }
}

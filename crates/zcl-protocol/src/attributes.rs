//! Decoding of the global (profile-wide) attribute commands

use crate::types::{AttributeValue, DataType, GlobalCommand, ProtocolError};
use bytes::{Buf, BufMut, BytesMut};

/// A single `{attribute id, typed value}` record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRecord {
    pub attribute_id: u16,
    pub value: AttributeValue,
}

impl AttributeRecord {
    #[must_use] pub fn new(attribute_id: u16, value: AttributeValue) -> Self {
        Self {
            attribute_id,
            value,
        }
    }

    fn decode(buf: &mut impl Buf) -> Result<Self, ProtocolError> {
        if buf.remaining() < 3 {
            return Err(ProtocolError::FrameTooShort(buf.remaining()));
        }
        let attribute_id = buf.get_u16_le();
        let data_type = DataType::try_from(buf.get_u8())?;
        let value = AttributeValue::decode(data_type, buf)?;
        Ok(Self {
            attribute_id,
            value,
        })
    }

    fn encode(&self, out: &mut BytesMut) {
        out.put_u16_le(self.attribute_id);
        out.put_u8(self.value.data_type() as u8);
        self.value.encode(out);
    }
}

/// A decoded global command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneralCommand {
    ReadAttributes(Vec<u16>),
    WriteAttributes(Vec<AttributeRecord>),
    WriteAttributesUndivided(Vec<AttributeRecord>),
    WriteAttributesNoResponse(Vec<AttributeRecord>),
    ReportAttributes(Vec<AttributeRecord>),
    /// Any global command this layer does not decode further
    Other { command_id: u8, payload: Vec<u8> },
}

impl GeneralCommand {
    /// Decode the payload of a global command frame
    pub fn parse(command_id: u8, payload: &[u8]) -> Result<Self, ProtocolError> {
        let mut buf = payload;
        let command = match GlobalCommand::try_from(command_id) {
            Ok(GlobalCommand::ReadAttributes) => {
                if buf.remaining() % 2 != 0 {
                    return Err(ProtocolError::InvalidFrame(format!(
                        "odd read attributes payload length {}",
                        payload.len()
                    )));
                }
                let mut ids = Vec::with_capacity(buf.remaining() / 2);
                while buf.has_remaining() {
                    ids.push(buf.get_u16_le());
                }
                GeneralCommand::ReadAttributes(ids)
            }
            Ok(GlobalCommand::WriteAttributes) => {
                GeneralCommand::WriteAttributes(decode_records(&mut buf)?)
            }
            Ok(GlobalCommand::WriteAttributesUndivided) => {
                GeneralCommand::WriteAttributesUndivided(decode_records(&mut buf)?)
            }
            Ok(GlobalCommand::WriteAttributesNoResponse) => {
                GeneralCommand::WriteAttributesNoResponse(decode_records(&mut buf)?)
            }
            Ok(GlobalCommand::ReportAttributes) => {
                GeneralCommand::ReportAttributes(decode_records(&mut buf)?)
            }
            _ => {
                tracing::trace!("Leaving global command {:#04x} undecoded", command_id);
                GeneralCommand::Other {
                    command_id,
                    payload: payload.to_vec(),
                }
            }
        };
        Ok(command)
    }

    /// Command id on the wire
    #[must_use] pub fn command_id(&self) -> u8 {
        match self {
            GeneralCommand::ReadAttributes(_) => GlobalCommand::ReadAttributes as u8,
            GeneralCommand::WriteAttributes(_) => GlobalCommand::WriteAttributes as u8,
            GeneralCommand::WriteAttributesUndivided(_) => {
                GlobalCommand::WriteAttributesUndivided as u8
            }
            GeneralCommand::WriteAttributesNoResponse(_) => {
                GlobalCommand::WriteAttributesNoResponse as u8
            }
            GeneralCommand::ReportAttributes(_) => GlobalCommand::ReportAttributes as u8,
            GeneralCommand::Other { command_id, .. } => *command_id,
        }
    }

    /// Encode the command payload
    #[must_use] pub fn encode(&self) -> Vec<u8> {
        let mut out = BytesMut::new();
        match self {
            GeneralCommand::ReadAttributes(ids) => {
                for id in ids {
                    out.put_u16_le(*id);
                }
            }
            GeneralCommand::WriteAttributes(records)
            | GeneralCommand::WriteAttributesUndivided(records)
            | GeneralCommand::WriteAttributesNoResponse(records)
            | GeneralCommand::ReportAttributes(records) => {
                for record in records {
                    record.encode(&mut out);
                }
            }
            GeneralCommand::Other { payload, .. } => out.put_slice(payload),
        }
        out.to_vec()
    }
}

/// Decode records up to the first one that fails
///
/// A bad leading record fails the whole command. Once a record has decoded,
/// a later failure ends the list there and the tail is dropped.
fn decode_records(buf: &mut &[u8]) -> Result<Vec<AttributeRecord>, ProtocolError> {
    let mut records = Vec::new();
    while buf.has_remaining() {
        match AttributeRecord::decode(buf) {
            Ok(record) => records.push(record),
            Err(e) if records.is_empty() => return Err(e),
            Err(e) => {
                tracing::warn!(
                    "Dropping attribute records after #{}: {}",
                    records.len(),
                    e
                );
                break;
            }
        }
    }
    Ok(records)
}

//! `vchData`: the conventional layout of a transaction payload.
//!
//! ```text
//! uuid[16] ++ time u32 LE ++ fmt_len u8 ++ base64(format description) ++ data
//! ```
//!
//! The format description is free text such as `JSON` or `MsgPack`; an
//! empty one means the data is untyped.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::{VCH_DATA_MIN_LENGTH, VCH_DATA_TIME_LENGTH, VCH_DATA_UUID_LENGTH};
use crate::error::CodecError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VchData {
    uuid: Uuid,
    time: u32,
    format: Vec<u8>,
    data: Vec<u8>,
}

fn invalid(reason: impl Into<String>) -> CodecError {
    CodecError::InvalidVchData {
        reason: reason.into(),
    }
}

impl VchData {
    /// Fresh random uuid, current time.
    pub fn new(format: &str, data: Vec<u8>) -> Result<Self, CodecError> {
        Self::with(Uuid::new_v4(), Utc::now().timestamp(), format, data)
    }

    /// Explicit uuid and unix time.
    pub fn with(uuid: Uuid, unix_time: i64, format: &str, data: Vec<u8>) -> Result<Self, CodecError> {
        let time = u32::try_from(unix_time)
            .map_err(|_| invalid(format!("time {unix_time} does not fit in 32 bits")))?;
        let format = STANDARD.encode(format).into_bytes();
        if format.len() > u8::MAX as usize {
            return Err(invalid(format!(
                "encoded format description is {} bytes, limit is 255",
                format.len()
            )));
        }
        Ok(Self {
            uuid,
            time,
            format,
            data,
        })
    }

    pub fn parse(raw: &[u8]) -> Result<Self, CodecError> {
        if raw.len() < VCH_DATA_MIN_LENGTH {
            return Err(invalid(format!(
                "{} bytes is shorter than the {VCH_DATA_MIN_LENGTH}-byte header",
                raw.len()
            )));
        }
        let (uuid, rest) = raw.split_at(VCH_DATA_UUID_LENGTH);
        let (time, rest) = rest.split_at(VCH_DATA_TIME_LENGTH);
        let (&format_len, rest) = rest
            .split_first()
            .ok_or_else(|| invalid("missing format size"))?;
        let format_len = format_len as usize;
        if rest.len() < format_len {
            return Err(invalid(format!(
                "format description needs {format_len} bytes, {} remain",
                rest.len()
            )));
        }
        let (format, data) = rest.split_at(format_len);

        let mut uuid_bytes = [0u8; VCH_DATA_UUID_LENGTH];
        uuid_bytes.copy_from_slice(uuid);
        Ok(Self {
            uuid: Uuid::from_bytes(uuid_bytes),
            time: u32::from_le_bytes([time[0], time[1], time[2], time[3]]),
            format: format.to_vec(),
            data: data.to_vec(),
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(VCH_DATA_MIN_LENGTH + self.format.len() + self.data.len());
        out.extend_from_slice(self.uuid.as_bytes());
        out.extend_from_slice(&self.time.to_le_bytes());
        // Length bounded by the constructors.
        out.push(self.format.len() as u8);
        out.extend_from_slice(&self.format);
        out.extend_from_slice(&self.data);
        out
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn unix_time(&self) -> u32 {
        self.time
    }

    pub fn time(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(i64::from(self.time), 0).unwrap_or_default()
    }

    /// Format description as written (base64 text).
    pub fn raw_format_description(&self) -> &[u8] {
        &self.format
    }

    pub fn format_description(&self) -> Result<String, CodecError> {
        let decoded = STANDARD
            .decode(&self.format)
            .map_err(|e| invalid(format!("format description: {e}")))?;
        String::from_utf8(decoded).map_err(|e| invalid(format!("format description: {e}")))
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Wraps `data` in an untyped vchData and hex-encodes it.
pub fn encode_data_hex(data: &[u8]) -> Result<String, CodecError> {
    Ok(hex::encode(VchData::new("", data.to_vec())?.to_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untyped_data_layout() {
        let encoded = encode_data_hex(b"hello").unwrap();
        assert_eq!(encoded.len(), 52);
        assert!(encoded.ends_with("0068656c6c6f"));
    }

    #[test]
    fn parse_roundtrip_with_format() {
        let vd = VchData::new("JSON", br#"{"name": "mike"}"#.to_vec()).unwrap();
        let parsed = VchData::parse(&vd.to_bytes()).unwrap();
        assert_eq!(parsed, vd);
        assert_eq!(parsed.format_description().unwrap(), "JSON");
        assert_eq!(parsed.raw_format_description(), b"SlNPTg==");
    }

    #[test]
    fn explicit_uuid_and_time() {
        let uuid = Uuid::parse_str("6ba7b810-9dad-11d1-80b4-00c04fd430c8").unwrap();
        let vd = VchData::with(uuid, 1_590_474_715, "", b"x".to_vec()).unwrap();
        let bytes = vd.to_bytes();
        assert_eq!(&bytes[..16], uuid.as_bytes());
        assert_eq!(&bytes[16..20], &1_590_474_715u32.to_le_bytes());
        assert_eq!(vd.time().timestamp(), 1_590_474_715);
    }

    #[test]
    fn bare_header_parses_to_empty_format_and_data() {
        let uuid = Uuid::parse_str("16190bd3-3d87-42fc-9905-6ca40cb3e3d5").unwrap();
        let mut raw = uuid.as_bytes().to_vec();
        raw.extend_from_slice(&1_590_474_715u32.to_le_bytes());
        raw.push(0);
        assert_eq!(raw.len(), VCH_DATA_MIN_LENGTH);

        let vd = VchData::parse(&raw).unwrap();
        assert_eq!(vd.uuid(), uuid);
        assert_eq!(vd.unix_time(), 1_590_474_715);
        assert!(vd.raw_format_description().is_empty());
        assert!(vd.data().is_empty());
        assert_eq!(vd.to_bytes(), raw);
    }

    #[test]
    fn short_buffers_are_rejected() {
        assert!(matches!(
            VchData::parse(&[0u8; 20]),
            Err(CodecError::InvalidVchData { .. })
        ));
        let mut raw = vec![0u8; 20];
        raw.push(4);
        raw.extend_from_slice(b"ab");
        assert!(matches!(
            VchData::parse(&raw),
            Err(CodecError::InvalidVchData { .. })
        ));
    }

    #[test]
    fn negative_time_is_rejected() {
        assert!(VchData::with(Uuid::nil(), -1, "", vec![]).is_err());
    }
}

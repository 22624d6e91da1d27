use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CodecError, CodecResult};

/// Serializer between typed objects and stored payloads.
///
/// Implementations must round-trip: `unmarshal(marshal(o)) == o` for every
/// value of a type whose `Serialize`/`Deserialize` impls agree.
pub trait Codec: Send + Sync {
    /// Encode `value` into a payload.
    fn marshal<T: Serialize>(&self, value: &T) -> CodecResult<Vec<u8>>;

    /// Decode a payload produced by [`marshal`](Self::marshal).
    fn unmarshal<T: DeserializeOwned>(&self, data: &[u8]) -> CodecResult<T>;
}

/// JSON records via `serde_json`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn marshal<T: Serialize>(&self, value: &T) -> CodecResult<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn unmarshal<T: DeserializeOwned>(&self, data: &[u8]) -> CodecResult<T> {
        serde_json::from_slice(data).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

/// Compact binary records via `bincode`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BincodeCodec;

impl Codec for BincodeCodec {
    fn marshal<T: Serialize>(&self, value: &T) -> CodecResult<Vec<u8>> {
        bincode::serialize(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn unmarshal<T: DeserializeOwned>(&self, data: &[u8]) -> CodecResult<T> {
        bincode::deserialize(data).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kip_types::{LogFile, ObjectReference};
    use proptest::prelude::*;

    fn sample_log() -> LogFile {
        let owner = ObjectReference::new("Pod", "web-0").with_uid("0190-abc");
        let mut log = LogFile::for_owner(&owner, "stdout", "started\nlistening on :80\n");
        log.metadata.labels.insert("tier".into(), "frontend".into());
        log
    }

    #[test]
    fn json_roundtrip_log() {
        let log = sample_log();
        let bytes = JsonCodec.marshal(&log).unwrap();
        let back: LogFile = JsonCodec.unmarshal(&bytes).unwrap();
        assert_eq!(back, log);
    }

    #[test]
    fn json_payload_is_readable() {
        let bytes = JsonCodec.marshal(&sample_log()).unwrap();
        let text = std::str::from_utf8(&bytes).unwrap();
        assert!(text.contains("\"kind\":\"LogFile\""));
        assert!(text.contains("\"parentObject\""));
    }

    #[test]
    fn bincode_roundtrip_log() {
        let log = sample_log();
        let bytes = BincodeCodec.marshal(&log).unwrap();
        let back: LogFile = BincodeCodec.unmarshal(&bytes).unwrap();
        assert_eq!(back, log);
    }

    #[test]
    fn json_rejects_garbage() {
        let err = JsonCodec.unmarshal::<LogFile>(b"{not json").unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }

    #[test]
    fn json_rejects_wrong_shape() {
        let err = JsonCodec.unmarshal::<LogFile>(b"\".\"").unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }

    #[test]
    fn bincode_rejects_truncated_payload() {
        let bytes = BincodeCodec.marshal(&sample_log()).unwrap();
        let err = BincodeCodec
            .unmarshal::<LogFile>(&bytes[..bytes.len() / 2])
            .unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }

    proptest! {
        #[test]
        fn json_roundtrip_any_identity(
            owner in "[a-z0-9-]{0,24}",
            name in "[a-zA-Z0-9._-]{0,24}",
            content in any::<String>(),
        ) {
            let log = LogFile::new(owner, name, content);
            let bytes = JsonCodec.marshal(&log).unwrap();
            let back: LogFile = JsonCodec.unmarshal(&bytes).unwrap();
            prop_assert_eq!(back, log);
        }

        #[test]
        fn bincode_roundtrip_any_content(content in any::<String>()) {
            let log = LogFile::new("owner", "name", content);
            let bytes = BincodeCodec.marshal(&log).unwrap();
            let back: LogFile = BincodeCodec.unmarshal(&bytes).unwrap();
            prop_assert_eq!(back, log);
        }
    }
}

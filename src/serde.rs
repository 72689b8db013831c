//! Serde helpers.

/// (De)serializes a [`Duration`](std::time::Duration) as whole seconds.
pub mod duration {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    /// Serializes a [`Duration`] as seconds.
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    /// Deserializes seconds into a [`Duration`].
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(deserializer)?))
    }
}

/// (De)serializes a [`SystemTime`](std::time::SystemTime) as a UNIX timestamp in seconds.
pub mod timestamp {
    use serde::{Deserialize, Deserializer, Serializer, ser::Error};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    /// Serializes a [`SystemTime`] as a UNIX timestamp.
    pub fn serialize<S: Serializer>(value: &SystemTime, serializer: S) -> Result<S::Ok, S::Error> {
        let secs =
            value.duration_since(UNIX_EPOCH).map_err(|err| S::Error::custom(err.to_string()))?;
        serializer.serialize_u64(secs.as_secs())
    }

    /// Deserializes a UNIX timestamp into a [`SystemTime`].
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SystemTime, D::Error> {
        Ok(UNIX_EPOCH + Duration::from_secs(u64::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "super::duration")]
        interval: Duration,
        #[serde(with = "super::timestamp")]
        at: SystemTime,
    }

    #[test]
    fn roundtrip() {
        let value = Wrapper {
            interval: Duration::from_secs(900),
            at: UNIX_EPOCH + Duration::from_secs(1_755_000_000),
        };
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"interval":900,"at":1755000000}"#);
        assert_eq!(serde_json::from_str::<Wrapper>(&json).unwrap(), value);
    }
}

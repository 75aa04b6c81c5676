//! Storage key codec
//!
//! Maps a `SensorIdentity` to the name of its log file and back. Pure
//! string work, no I/O. The key format is
//! `{kind}_{protocol}_{model}_{id}.csv`, always lowercased on encode so a
//! case-insensitive filesystem cannot split one series across two files.

use crate::storage::error::{StoreError, StoreResult};
use crate::storage::types::{MeasurementKind, SensorIdentity};

/// File extension for reading logs
pub const LOG_EXTENSION: &str = "csv";

/// Encode an identity into its storage key (log file name)
pub fn storage_key(identity: &SensorIdentity) -> String {
    format!(
        "{}_{}_{}_{}.{}",
        identity.kind.token(),
        identity.protocol,
        identity.model,
        identity.id,
        LOG_EXTENSION
    )
    .to_lowercase()
}

/// Decode a storage key back into a sensor identity
///
/// Fails with `MalformedKey` when the name (extension stripped) does not
/// split into exactly four underscore-separated fields or the id field is
/// not an integer. Field casing is preserved as stored; unknown measurement
/// tokens decode as `MeasurementKind::Other`.
pub fn parse_storage_key(key: &str) -> StoreResult<SensorIdentity> {
    let stem = key
        .strip_suffix(&format!(".{}", LOG_EXTENSION))
        .ok_or_else(|| StoreError::MalformedKey(key.to_string()))?;

    let fields: Vec<&str> = stem.split('_').collect();
    let [kind, protocol, model, id] = fields[..] else {
        return Err(StoreError::MalformedKey(key.to_string()));
    };

    let id: u32 = id
        .parse()
        .map_err(|_| StoreError::MalformedKey(key.to_string()))?;

    Ok(SensorIdentity {
        protocol: protocol.to_string(),
        model: model.to_string(),
        id,
        kind: MeasurementKind::from_token(kind),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> SensorIdentity {
        SensorIdentity::new("oregon", "1a2d", 180, MeasurementKind::Temperature)
    }

    #[test]
    fn test_encode() {
        assert_eq!(storage_key(&identity()), "temperature_oregon_1a2d_180.csv");
    }

    #[test]
    fn test_encode_lowercases() {
        let id = SensorIdentity::new("Oregon", "1A2D", 180, MeasurementKind::Temperature);
        assert_eq!(storage_key(&id), "temperature_oregon_1a2d_180.csv");
    }

    #[test]
    fn test_round_trip() {
        for kind in [
            MeasurementKind::Temperature,
            MeasurementKind::Humidity,
            MeasurementKind::RainRate,
            MeasurementKind::RainTotal,
            MeasurementKind::WindDirection,
            MeasurementKind::WindAverage,
            MeasurementKind::WindGust,
            MeasurementKind::Other("pressure".to_string()),
        ] {
            let identity = SensorIdentity::new("fineoffset", "temphygro", 226, kind);
            assert_eq!(parse_storage_key(&storage_key(&identity)).unwrap(), identity);
        }
    }

    #[test]
    fn test_unknown_kind_decodes_as_opaque_token() {
        let identity = parse_storage_key("pressure_oregon_1a2d_135.csv").unwrap();
        assert_eq!(identity.kind, MeasurementKind::Other("pressure".to_string()));
        assert_eq!(identity.id, 135);
    }

    #[test]
    fn test_wrong_field_count_is_malformed() {
        assert!(matches!(
            parse_storage_key("temperature_oregon_180.csv"),
            Err(StoreError::MalformedKey(_))
        ));
        assert!(matches!(
            parse_storage_key("temperature_oregon_1a2d_extra_180.csv"),
            Err(StoreError::MalformedKey(_))
        ));
    }

    #[test]
    fn test_non_integer_id_is_malformed() {
        assert!(matches!(
            parse_storage_key("temperature_oregon_1a2d_abc.csv"),
            Err(StoreError::MalformedKey(_))
        ));
    }

    #[test]
    fn test_wrong_extension_is_malformed() {
        assert!(matches!(
            parse_storage_key("temperature_oregon_1a2d_180.dat"),
            Err(StoreError::MalformedKey(_))
        ));
        assert!(matches!(
            parse_storage_key("locations.json"),
            Err(StoreError::MalformedKey(_))
        ));
    }
}

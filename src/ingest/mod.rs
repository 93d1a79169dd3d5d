/// Ingestion: turning stored records into validated readings.
///
/// Submodules:
/// - `store` — the append-only JSON reading store.
/// - `timestamp` — parsing of the two stored date representations.
///
/// Malformed records are excluded here, with a logged diagnostic, so the
/// analysis and alert modules only ever see finite numbers and resolved
/// timestamps.
pub mod store;
pub mod timestamp;

use crate::logging::{self, Component};
use crate::model::{NumericField, RawReading, Reading, ReadingError};

/// Result of normalizing a batch of stored records.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    /// Valid readings, in store order.
    pub readings: Vec<Reading>,
    /// Store index and reason for each excluded record.
    pub rejected: Vec<(usize, ReadingError)>,
}

/// Coerces a stored numeric field to a finite `f64`.
pub fn parse_numeric(field: &'static str, value: &NumericField) -> Result<f64, ReadingError> {
    let malformed = || ReadingError::MalformedNumber {
        field,
        value: value.to_string(),
    };
    let parsed = match value {
        NumericField::Number(n) => *n,
        // Form input may use a decimal comma ("12,5")
        NumericField::Text(s) => s
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .map_err(|_| malformed())?,
    };
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(malformed())
    }
}

/// Validates a single stored record.
///
/// The region name is kept exactly as stored, since regions are matched by
/// exact name; only a name that is blank once trimmed is rejected.
pub fn parse_reading(raw: &RawReading) -> Result<Reading, ReadingError> {
    if raw.region.trim().is_empty() {
        return Err(ReadingError::MissingRegion);
    }
    Ok(Reading {
        soil_moisture: parse_numeric("soilMoisture", &raw.soil_moisture)?,
        terrain_inclination: parse_numeric("terrainInclination", &raw.terrain_inclination)?,
        region: raw.region.clone(),
        timestamp: timestamp::parse_reading_date(&raw.date)?,
    })
}

/// Validates a batch, excluding and logging every record that fails.
pub fn normalize(raw: &[RawReading]) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();

    for (index, record) in raw.iter().enumerate() {
        match parse_reading(record) {
            Ok(reading) => batch.readings.push(reading),
            Err(e) => {
                let region = Some(record.region.as_str()).filter(|r| !r.trim().is_empty());
                logging::warn(
                    Component::Ingest,
                    region,
                    &format!("Excluding record #{}: {}", index, e),
                );
                batch.rejected.push((index, e));
            }
        }
    }

    logging::log_ingest_summary(raw.len(), batch.readings.len(), batch.rejected.len());
    batch
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::classify;
    use crate::model::RiskVerdict;

    fn raw(soil: NumericField, incl: NumericField, region: &str, date: &str) -> RawReading {
        RawReading {
            soil_moisture: soil,
            terrain_inclination: incl,
            region: region.to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_string_and_number_fields_both_coerce() {
        let r = raw("45".into(), 12.5.into(), "X", "2025-05-01T08:00:00");
        let reading = parse_reading(&r).expect("valid record should parse");
        assert_eq!(reading.soil_moisture, 45.0);
        assert_eq!(reading.terrain_inclination, 12.5);
    }

    #[test]
    fn test_decimal_comma_is_accepted() {
        let value = parse_numeric("soilMoisture", &" 12,5 ".into()).unwrap();
        assert_eq!(value, 12.5);
    }

    #[test]
    fn test_non_numeric_text_is_malformed() {
        let r = raw("wet".into(), "10".into(), "X", "2025-05-01T08:00:00");
        assert_eq!(
            parse_reading(&r),
            Err(ReadingError::MalformedNumber {
                field: "soilMoisture",
                value: "wet".to_string()
            })
        );
    }

    #[test]
    fn test_nan_and_infinity_text_are_malformed() {
        assert!(parse_numeric("terrainInclination", &"NaN".into()).is_err());
        assert!(parse_numeric("terrainInclination", &"inf".into()).is_err());
        assert!(parse_numeric("terrainInclination", &"".into()).is_err());
    }

    #[test]
    fn test_blank_region_is_rejected() {
        let r = raw("40".into(), "10".into(), "  ", "2025-05-01T08:00:00");
        assert_eq!(parse_reading(&r), Err(ReadingError::MissingRegion));
    }

    #[test]
    fn test_region_name_is_kept_exactly_as_stored() {
        let records = vec![
            raw("80".into(), "10".into(), " Serra", "2025-05-01T08:00:00"),
            raw("40".into(), "10".into(), "Serra", "2025-05-01T09:00:00"),
        ];
        let readings = normalize(&records).readings;

        assert_eq!(readings[0].region, " Serra");
        assert_eq!(classify(&readings, " Serra"), RiskVerdict::High);
        assert_eq!(classify(&readings, "Serra"), RiskVerdict::Normal);
    }

    #[test]
    fn test_normalize_excludes_only_bad_records() {
        let records = vec![
            raw("40".into(), "10".into(), "X", "2025-05-01T08:00:00"),
            raw("abc".into(), "10".into(), "X", "2025-05-01T09:00:00"),
            raw("50".into(), "10".into(), "X", "sometime"),
            raw("60".into(), "20".into(), "Y", "02/05/2025 10:00:00"),
        ];
        let batch = normalize(&records);

        assert_eq!(batch.readings.len(), 2);
        assert_eq!(batch.readings[0].region, "X");
        assert_eq!(batch.readings[1].region, "Y");
        let rejected_indexes: Vec<usize> = batch.rejected.iter().map(|(i, _)| *i).collect();
        assert_eq!(rejected_indexes, vec![1, 2]);
        assert!(matches!(batch.rejected[1].1, ReadingError::UnparseableDate(_)));
    }

    #[test]
    fn test_normalize_empty_input() {
        let batch = normalize(&[]);
        assert!(batch.readings.is_empty());
        assert!(batch.rejected.is_empty());
    }
}

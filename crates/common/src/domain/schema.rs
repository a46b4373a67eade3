use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unit of `Metric::timestamp` for a given schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampUnit {
    Seconds,
    Nanoseconds,
}

/// Fields a Metric payload carries under one schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSet {
    pub metric_id: bool,
    pub sku_required: bool,
    pub sold_items: bool,
    pub timestamp_unit: TimestampUnit,
}

/// Known revisions of the Metric payload shape.
///
/// | version | metricID | SKU required | items | timestamp   |
/// |---------|----------|--------------|-------|-------------|
/// | V1      | yes      | no           | yes   | seconds     |
/// | V2      | no       | yes          | no    | nanoseconds |
/// | V3      | yes      | yes          | yes   | seconds     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaVersion {
    #[default]
    V1,
    V2,
    V3,
}

impl SchemaVersion {
    pub fn fields(self) -> FieldSet {
        match self {
            SchemaVersion::V1 => FieldSet {
                metric_id: true,
                sku_required: false,
                sold_items: true,
                timestamp_unit: TimestampUnit::Seconds,
            },
            SchemaVersion::V2 => FieldSet {
                metric_id: false,
                sku_required: true,
                sold_items: false,
                timestamp_unit: TimestampUnit::Nanoseconds,
            },
            SchemaVersion::V3 => FieldSet {
                metric_id: true,
                sku_required: true,
                sold_items: true,
                timestamp_unit: TimestampUnit::Seconds,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SchemaVersion::V1 => "v1",
            SchemaVersion::V2 => "v2",
            SchemaVersion::V3 => "v3",
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown metric schema version: {0}")]
pub struct UnknownSchemaVersion(pub String);

impl FromStr for SchemaVersion {
    type Err = UnknownSchemaVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" => Ok(SchemaVersion::V1),
            "v2" => Ok(SchemaVersion::V2),
            "v3" => Ok(SchemaVersion::V3),
            _ => Err(UnknownSchemaVersion(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("V2".parse::<SchemaVersion>().unwrap(), SchemaVersion::V2);
        assert_eq!(" v3 ".parse::<SchemaVersion>().unwrap(), SchemaVersion::V3);
    }

    #[test]
    fn test_parse_unknown_version() {
        let err = "v9".parse::<SchemaVersion>().unwrap_err();
        assert_eq!(err.to_string(), "unknown metric schema version: v9");
    }

    #[test]
    fn test_only_v1_leaves_sku_optional() {
        assert!(!SchemaVersion::V1.fields().sku_required);
        assert!(SchemaVersion::V2.fields().sku_required);
        assert!(SchemaVersion::V3.fields().sku_required);
    }

    #[test]
    fn test_v2_uses_nanosecond_timestamps_without_items() {
        let fields = SchemaVersion::V2.fields();
        assert_eq!(fields.timestamp_unit, TimestampUnit::Nanoseconds);
        assert!(!fields.sold_items);
        assert!(!fields.metric_id);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for version in [SchemaVersion::V1, SchemaVersion::V2, SchemaVersion::V3] {
            assert_eq!(version.to_string().parse::<SchemaVersion>().unwrap(), version);
        }
    }
}

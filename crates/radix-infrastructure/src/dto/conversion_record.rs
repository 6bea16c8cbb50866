//! ConversionRecord DTOs

use radix_core::conversion::{ConversionOutcome, ConversionRecord};
use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Versioned};

/// Conversion record V1.0.0.
///
/// The outcome is stored flat: exactly one of `result` and `error_message`
/// is present in a well-formed file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct ConversionRecordV1_0_0 {
    pub input_value: String,
    pub source_base: u32,
    pub target_base: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ConversionRecordV1_0_0 {
    /// Checks the result/error exclusivity before conversion to the domain.
    pub fn validate(&self) -> Result<(), String> {
        match (&self.result, &self.error_message) {
            (Some(_), None) | (None, Some(_)) => Ok(()),
            (Some(_), Some(_)) => Err(format!(
                "record '{}' has both a result and an error message",
                self.input_value
            )),
            (None, None) => Err(format!(
                "record '{}' has neither a result nor an error message",
                self.input_value
            )),
        }
    }
}

/// A result wins over an error message; call `validate` first to reject
/// records carrying both.
impl IntoDomain<ConversionRecord> for ConversionRecordV1_0_0 {
    fn into_domain(self) -> ConversionRecord {
        match self.result {
            Some(result) => ConversionRecord::converted(
                self.input_value,
                self.source_base,
                self.target_base,
                result,
            ),
            None => ConversionRecord::failed(
                self.input_value,
                self.source_base,
                self.target_base,
                self.error_message.unwrap_or_default(),
            ),
        }
    }
}

impl FromDomain<ConversionRecord> for ConversionRecordV1_0_0 {
    fn from_domain(record: ConversionRecord) -> Self {
        let (result, error_message) = match record.outcome() {
            ConversionOutcome::Converted { result } => (Some(result.clone()), None),
            ConversionOutcome::Failed { error_message } => (None, Some(error_message.clone())),
        };

        ConversionRecordV1_0_0 {
            input_value: record.input_value().to_string(),
            source_base: record.source_base(),
            target_base: record.target_base(),
            result,
            error_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_record_omits_result_key() {
        let dto = ConversionRecordV1_0_0::from_domain(ConversionRecord::failed("g", 16, 10, "bad"));
        let text = toml::to_string(&dto).unwrap();

        assert!(text.contains("error_message = \"bad\""));
        assert!(!text.contains("result"));
    }

    #[test]
    fn test_validate_exclusivity() {
        let mut dto =
            ConversionRecordV1_0_0::from_domain(ConversionRecord::converted("ff", 16, 10, "255"));
        assert!(dto.validate().is_ok());

        dto.error_message = Some("bad".to_string());
        assert!(dto.validate().unwrap_err().contains("both"));

        dto.result = None;
        dto.error_message = None;
        assert!(dto.validate().unwrap_err().contains("neither"));
    }

    #[test]
    fn test_into_domain_keeps_outcome() {
        let record = ConversionRecord::converted("101", 2, 10, "5");
        let dto = ConversionRecordV1_0_0::from_domain(record.clone());

        let restored: ConversionRecord = dto.into_domain();
        assert_eq!(restored, record);
    }
}

use crate::domain::snapshot::ClinicalSnapshot;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Flat request shape accepted at the boundary. Every field is optional here so a missing
/// required value is reported by name rather than as a generic parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub sodium: Option<f64>,
    pub potassium: Option<f64>,
    pub chloride: Option<f64>,
    pub ph: Option<f64>,
    pub weight: Option<f64>,

    pub glucose: Option<f64>,
    pub creatinine: Option<f64>,
    pub bun: Option<f64>,
    pub hematocrit: Option<f64>,
    pub lactate: Option<f64>,
    pub pco2: Option<f64>,
    pub base_excess: Option<f64>,
    pub hco3: Option<f64>,
    pub urine_output: Option<f64>,
}

struct RequiredField {
    field: &'static str,
    label: &'static str,
    range: RangeInclusive<f64>,
    bounds: &'static str,
}

const SODIUM: RequiredField = RequiredField {
    field: "sodium",
    label: "Sodium",
    range: 120.0..=155.0,
    bounds: "between 120 and 155 mmol/L",
};
const POTASSIUM: RequiredField = RequiredField {
    field: "potassium",
    label: "Potassium",
    range: 2.0..=8.0,
    bounds: "between 2.0 and 8.0 mmol/L",
};
const CHLORIDE: RequiredField = RequiredField {
    field: "chloride",
    label: "Chloride",
    range: 60.0..=120.0,
    bounds: "between 60 and 120 mmol/L",
};
const PH: RequiredField = RequiredField {
    field: "ph",
    label: "pH",
    range: 7.0..=7.7,
    bounds: "between 7.0 and 7.7",
};
const WEIGHT: RequiredField = RequiredField {
    field: "weight",
    label: "Weight",
    range: 1.0..=10.0,
    bounds: "between 1.0 and 10.0 kg",
};

impl RequiredField {
    fn check(&self, value: Option<f64>) -> Result<f64, ValidationError> {
        let Some(value) = value else {
            return Err(ValidationError {
                field: self.field,
                message: format!("{} is required", self.label),
            });
        };

        // NaN fails `contains`, so non-finite input lands here too.
        if !self.range.contains(&value) {
            return Err(ValidationError {
                field: self.field,
                message: format!("{} must be {}", self.label, self.bounds),
            });
        }

        Ok(value)
    }
}

impl PlanRequest {
    /// Checks required fields in a fixed order (sodium, potassium, chloride, pH, weight) and
    /// reports the first violation. Optional labs are passed through as given.
    pub fn validate_and_into_snapshot(self) -> Result<ClinicalSnapshot, ValidationError> {
        let sodium = SODIUM.check(self.sodium)?;
        let potassium = POTASSIUM.check(self.potassium)?;
        let chloride = CHLORIDE.check(self.chloride)?;
        let ph = PH.check(self.ph)?;
        let weight = WEIGHT.check(self.weight)?;

        Ok(ClinicalSnapshot {
            sodium,
            potassium,
            chloride,
            ph,
            weight,
            glucose: self.glucose,
            creatinine: self.creatinine,
            bun: self.bun,
            hematocrit: self.hematocrit,
            lactate: self.lactate,
            pco2: self.pco2,
            base_excess: self.base_excess,
            hco3: self.hco3,
            urine_output: self.urine_output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_request() -> PlanRequest {
        PlanRequest {
            sodium: Some(140.0),
            potassium: Some(4.0),
            chloride: Some(105.0),
            ph: Some(7.4),
            weight: Some(5.0),
            ..PlanRequest::default()
        }
    }

    #[test]
    fn accepts_values_on_range_bounds() {
        let req = PlanRequest {
            sodium: Some(120.0),
            potassium: Some(8.0),
            chloride: Some(60.0),
            ph: Some(7.7),
            weight: Some(1.0),
            ..PlanRequest::default()
        };
        let snapshot = req.validate_and_into_snapshot().unwrap();
        assert_eq!(snapshot.sodium, 120.0);
        assert_eq!(snapshot.weight, 1.0);
    }

    #[test]
    fn rejects_out_of_range_with_field_message() {
        let req = PlanRequest {
            sodium: Some(119.9),
            ..valid_request()
        };
        let err = req.validate_and_into_snapshot().unwrap_err();
        assert_eq!(err.field, "sodium");
        assert_eq!(err.message, "Sodium must be between 120 and 155 mmol/L");

        let req = PlanRequest {
            potassium: Some(8.5),
            ..valid_request()
        };
        let err = req.validate_and_into_snapshot().unwrap_err();
        assert_eq!(err.message, "Potassium must be between 2.0 and 8.0 mmol/L");

        let req = PlanRequest {
            ph: Some(6.9),
            ..valid_request()
        };
        let err = req.validate_and_into_snapshot().unwrap_err();
        assert_eq!(err.message, "pH must be between 7.0 and 7.7");

        let req = PlanRequest {
            weight: Some(12.0),
            ..valid_request()
        };
        let err = req.validate_and_into_snapshot().unwrap_err();
        assert_eq!(err.message, "Weight must be between 1.0 and 10.0 kg");
    }

    #[test]
    fn rejects_missing_required_field() {
        let req = PlanRequest {
            chloride: None,
            ..valid_request()
        };
        let err = req.validate_and_into_snapshot().unwrap_err();
        assert_eq!(err.field, "chloride");
        assert_eq!(err.message, "Chloride is required");
    }

    #[test]
    fn rejects_nan() {
        let req = PlanRequest {
            weight: Some(f64::NAN),
            ..valid_request()
        };
        assert_eq!(req.validate_and_into_snapshot().unwrap_err().field, "weight");
    }

    #[test]
    fn reports_first_violation_in_field_order() {
        let req = PlanRequest {
            chloride: Some(10.0),
            sodium: Some(200.0),
            ..valid_request()
        };
        assert_eq!(req.validate_and_into_snapshot().unwrap_err().field, "sodium");
    }

    #[test]
    fn optional_fields_stay_absent_and_unchecked() {
        let snapshot = valid_request().validate_and_into_snapshot().unwrap();
        assert_eq!(snapshot.glucose, None);
        assert_eq!(snapshot.lactate, None);

        let req = PlanRequest {
            glucose: Some(0.0),
            hematocrit: Some(99.0),
            ..valid_request()
        };
        let snapshot = req.validate_and_into_snapshot().unwrap();
        assert_eq!(snapshot.glucose, Some(0.0));
        assert_eq!(snapshot.hematocrit, Some(99.0));
    }

    #[test]
    fn deserializes_camel_case_body_with_nulls() {
        let req: PlanRequest = serde_json::from_value(json!({
            "sodium": 132,
            "potassium": 3.4,
            "chloride": 88,
            "ph": 7.48,
            "weight": 4.1,
            "glucose": null,
            "baseExcess": 6.0,
            "urineOutput": 1.2,
        }))
        .unwrap();
        assert_eq!(req.glucose, None);
        assert_eq!(req.base_excess, Some(6.0));
        assert_eq!(req.urine_output, Some(1.2));
        assert!(req.validate_and_into_snapshot().is_ok());
    }
}

use std::fmt;

/// A required input field is missing or outside its accepted range.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// A derived quantity could not be expressed as a plan value.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputationError {
    pub stage: &'static str,
    pub detail: String,
}

impl fmt::Display for ComputationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "computation failed (stage={}): {}", self.stage, self.detail)
    }
}

impl std::error::Error for ComputationError {}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanError {
    Validation(ValidationError),
    Computation(ComputationError),
}

impl PlanError {
    /// Message safe to hand back to a caller. Validation messages are returned verbatim;
    /// computation details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            PlanError::Validation(e) => e.message.clone(),
            PlanError::Computation(_) => "Calculation failed".to_string(),
        }
    }
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::Validation(e) => write!(f, "validation failed: {e}"),
            PlanError::Computation(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for PlanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlanError::Validation(e) => Some(e),
            PlanError::Computation(e) => Some(e),
        }
    }
}

impl From<ValidationError> for PlanError {
    fn from(e: ValidationError) -> Self {
        PlanError::Validation(e)
    }
}

impl From<ComputationError> for PlanError {
    fn from(e: ComputationError) -> Self {
        PlanError::Computation(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_message_hides_computation_detail() {
        let err = PlanError::from(ComputationError {
            stage: "total_fluid_volume",
            detail: "value inf is not representable".to_string(),
        });
        assert_eq!(err.public_message(), "Calculation failed");
        assert!(err.to_string().contains("total_fluid_volume"));
    }

    #[test]
    fn public_message_keeps_validation_text() {
        let err = PlanError::from(ValidationError {
            field: "sodium",
            message: "Sodium must be between 120 and 155 mmol/L".to_string(),
        });
        assert_eq!(
            err.public_message(),
            "Sodium must be between 120 and 155 mmol/L"
        );
    }
}

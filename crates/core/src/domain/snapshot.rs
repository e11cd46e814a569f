/// Lab values and weight for one plan calculation.
///
/// Required values are range-checked before the snapshot is built (see
/// [`crate::domain::contract::PlanRequest::validate_and_into_snapshot`]). Optional values are
/// `None` when not measured and only take part in a decision when present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClinicalSnapshot {
    /// mmol/L
    pub sodium: f64,
    /// mmol/L
    pub potassium: f64,
    /// mmol/L
    pub chloride: f64,
    pub ph: f64,
    /// kg
    pub weight: f64,

    /// mmol/L
    pub glucose: Option<f64>,
    /// µmol/L
    pub creatinine: Option<f64>,
    /// mmol/L
    pub bun: Option<f64>,
    /// %
    pub hematocrit: Option<f64>,
    /// mmol/L
    pub lactate: Option<f64>,
    /// mmHg
    pub pco2: Option<f64>,
    /// mmol/L
    pub base_excess: Option<f64>,
    /// mmol/L
    pub hco3: Option<f64>,
    /// mL/kg/hr
    pub urine_output: Option<f64>,
}

impl ClinicalSnapshot {
    /// Snapshot with only the required values; every optional lab is absent.
    pub fn new(sodium: f64, potassium: f64, chloride: f64, ph: f64, weight: f64) -> Self {
        Self {
            sodium,
            potassium,
            chloride,
            ph,
            weight,
            glucose: None,
            creatinine: None,
            bun: None,
            hematocrit: None,
            lactate: None,
            pco2: None,
            base_excess: None,
            hco3: None,
            urine_output: None,
        }
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FluidPlan {
    pub fluid_type: String,
    pub fluid_selection_reason: String,
    /// mL/hr
    pub fluid_rate_per_hour: u32,
    /// mL/hr
    pub maintenance_rate: u32,
    /// hours
    pub correction_time: u32,
    /// mL
    pub total_fluid_volume: u32,
    pub bolus_recommendation: BolusRecommendation,
    pub alerts: Vec<String>,
    pub recheck_interval: String,
    pub next_lab_check: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BolusRecommendation {
    /// mL/kg
    pub volume: u32,
    /// mL
    pub total_volume: u32,
    pub reason: String,
}

use crate::domain::snapshot::ClinicalSnapshot;

pub const SEVERE_ML_KG: u32 = 20;
pub const MODERATE_ML_KG: u32 = 10;
const ESCALATION_FLOOR_ML_KG: u32 = 10;

const HAEMOCONCENTRATION_HCT: f64 = 50.0;
const HYPOPERFUSION_LACTATE: f64 = 2.0;

pub const NO_BOLUS_REASON: &str =
    "No bolus needed: electrolytes and acid-base status below bolus thresholds";

/// Per-kg bolus volume and its justification. Total volume is derived during assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct BolusDecision {
    pub volume_ml_kg: u32,
    pub reason: String,
}

pub fn calculate_bolus(snapshot: &ClinicalSnapshot) -> BolusDecision {
    let ClinicalSnapshot {
        sodium,
        chloride,
        ph,
        ..
    } = *snapshot;

    let (tier_volume, tier_reason) = if sodium < 130.0 || chloride < 70.0 || ph > 7.55 {
        (
            SEVERE_ML_KG,
            "Severe derangement (Na < 130, Cl < 70 or pH > 7.55): 20 mL/kg 0.9% NaCl bolus",
        )
    } else if sodium < 135.0 || chloride < 90.0 || ph > 7.45 {
        (
            MODERATE_ML_KG,
            "Moderate derangement (Na < 135, Cl < 90 or pH > 7.45): 10 mL/kg 0.9% NaCl bolus",
        )
    } else {
        (0, NO_BOLUS_REASON)
    };

    let mut volume_ml_kg = tier_volume;
    let mut fragments = Vec::new();

    if let Some(hct) = snapshot.hematocrit.filter(|v| *v > HAEMOCONCENTRATION_HCT) {
        volume_ml_kg = volume_ml_kg.max(ESCALATION_FLOOR_ML_KG);
        fragments.push(format!(
            "haemoconcentration (haematocrit {hct}% > {HAEMOCONCENTRATION_HCT}%)"
        ));
    }

    if let Some(lactate) = snapshot.lactate.filter(|v| *v > HYPOPERFUSION_LACTATE) {
        volume_ml_kg = volume_ml_kg.max(ESCALATION_FLOOR_ML_KG);
        fragments.push(format!(
            "raised lactate ({lactate} mmol/L > {HYPOPERFUSION_LACTATE})"
        ));
    }

    let mut reason = if tier_volume == 0 && volume_ml_kg > 0 {
        format!("Electrolytes below bolus thresholds; {volume_ml_kg} mL/kg 0.9% NaCl bolus for hypovolaemia")
    } else {
        tier_reason.to_string()
    };
    if !fragments.is_empty() {
        reason.push_str("; ");
        reason.push_str(&fragments.join("; "));
    }

    BolusDecision {
        volume_ml_kg,
        reason,
    }
}

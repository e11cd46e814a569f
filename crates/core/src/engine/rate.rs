//! Hourly maintenance and condition fluid rates.

const BREAKPOINT_KG: f64 = 10.0;

const MAINTENANCE_ML_KG_HR: f64 = 4.0;
const MAINTENANCE_ML_KG_HR_ABOVE: f64 = 2.0;

// 1.5x maintenance, applied to the per-kg constants so both branches meet at the breakpoint.
const CONDITION_ML_KG_HR: f64 = MAINTENANCE_ML_KG_HR * 1.5;
const CONDITION_ML_KG_HR_ABOVE: f64 = MAINTENANCE_ML_KG_HR_ABOVE * 1.5;

/// Unrounded rates in mL/hr.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates {
    pub fluid_rate_per_hour: f64,
    pub maintenance_rate: f64,
}

pub fn calculate_rates(weight_kg: f64) -> Rates {
    Rates {
        fluid_rate_per_hour: piecewise(weight_kg, CONDITION_ML_KG_HR, CONDITION_ML_KG_HR_ABOVE),
        maintenance_rate: piecewise(weight_kg, MAINTENANCE_ML_KG_HR, MAINTENANCE_ML_KG_HR_ABOVE),
    }
}

fn piecewise(weight_kg: f64, per_kg: f64, per_kg_above: f64) -> f64 {
    if weight_kg <= BREAKPOINT_KG {
        weight_kg * per_kg
    } else {
        BREAKPOINT_KG * per_kg + (weight_kg - BREAKPOINT_KG) * per_kg_above
    }
}

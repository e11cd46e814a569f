//! Fluid plan engine: a pure function from a validated snapshot to a plan.

pub mod alerts;
pub mod bolus;
pub mod correction;
pub mod fluid;
pub mod rate;

use crate::domain::plan::{BolusRecommendation, FluidPlan};
use crate::domain::snapshot::ClinicalSnapshot;
use crate::error::ComputationError;

const SHORT_CORRECTION_MAX_HOURS: u32 = 24;

pub fn compute_plan(snapshot: &ClinicalSnapshot) -> Result<FluidPlan, ComputationError> {
    let rates = rate::calculate_rates(snapshot.weight);
    let fluid = fluid::select_fluid(snapshot);
    let bolus = bolus::calculate_bolus(snapshot);
    let correction_time = correction::estimate_correction_time(snapshot);
    let alerts = alerts::generate_alerts(snapshot);

    let fluid_rate_per_hour = round_ml("fluid_rate_per_hour", rates.fluid_rate_per_hour)?;
    let maintenance_rate = round_ml("maintenance_rate", rates.maintenance_rate)?;
    let total_fluid_volume = fluid_rate_per_hour
        .checked_mul(correction_time)
        .ok_or_else(|| ComputationError {
            stage: "total_fluid_volume",
            detail: format!("{fluid_rate_per_hour} mL/hr x {correction_time} h overflows"),
        })?;
    let bolus_total = round_ml(
        "bolus_total_volume",
        f64::from(bolus.volume_ml_kg) * snapshot.weight,
    )?;

    let (recheck_interval, next_lab_check) = monitoring_for(correction_time);

    tracing::debug!(
        fluid_type = %fluid,
        fluid_rate_per_hour,
        correction_time,
        bolus_ml_kg = bolus.volume_ml_kg,
        alerts_len = alerts.len(),
        "fluid plan computed"
    );

    Ok(FluidPlan {
        fluid_type: fluid.label(),
        fluid_selection_reason: fluid.reason,
        fluid_rate_per_hour,
        maintenance_rate,
        correction_time,
        total_fluid_volume,
        bolus_recommendation: BolusRecommendation {
            volume: bolus.volume_ml_kg,
            total_volume: bolus_total,
            reason: bolus.reason,
        },
        alerts,
        recheck_interval: recheck_interval.to_string(),
        next_lab_check: next_lab_check.to_string(),
    })
}

fn monitoring_for(correction_time: u32) -> (&'static str, &'static str) {
    if correction_time <= SHORT_CORRECTION_MAX_HOURS {
        (
            "12 hours",
            "Repeat electrolytes, glucose and blood gas in 12 hours",
        )
    } else {
        (
            "24 hours",
            "Repeat electrolytes, glucose and blood gas in 24 hours, sooner if clinically concerned",
        )
    }
}

fn round_ml(stage: &'static str, value: f64) -> Result<u32, ComputationError> {
    let rounded = value.round();
    if !rounded.is_finite() || rounded < 0.0 || rounded > f64::from(u32::MAX) {
        return Err(ComputationError {
            stage,
            detail: format!("value {value} is not a representable mL quantity"),
        });
    }
    Ok(rounded as u32)
}

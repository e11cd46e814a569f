//! Hours budgeted for correcting the derangement before reassessment.

use crate::domain::snapshot::ClinicalSnapshot;

pub const BASE_HOURS: u32 = 12;
const LOW_WEIGHT_KG: f64 = 3.0;
const LOW_WEIGHT_PENALTY_HOURS: u32 = 6;

pub fn estimate_correction_time(snapshot: &ClinicalSnapshot) -> u32 {
    // Sodium sets the starting value outright; later rules can only raise it.
    let mut hours = if snapshot.sodium < 130.0 {
        36
    } else if snapshot.sodium < 135.0 {
        24
    } else {
        BASE_HOURS
    };

    if snapshot.chloride < 70.0 {
        hours = hours.max(36);
    } else if snapshot.chloride < 90.0 {
        hours = hours.max(24);
    }

    if snapshot.ph > 7.55 {
        hours = hours.max(24);
    } else if snapshot.ph > 7.45 {
        hours = hours.max(18);
    }

    if snapshot.weight < LOW_WEIGHT_KG {
        hours += LOW_WEIGHT_PENALTY_HOURS;
    }

    hours
}

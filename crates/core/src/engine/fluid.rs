//! Base fluid choice plus the potassium chloride overlay.
//!
//! The base solution is picked from glucose and sodium, first match wins. Potassium then
//! adjusts the KCl additive on whatever base was chosen, so every base can appear with any
//! of the three additive levels.

use crate::domain::snapshot::ClinicalSnapshot;
use std::fmt;

const SEVERE_HYPOGLYCAEMIA: f64 = 2.5;
const LOW_GLUCOSE: f64 = 3.0;
const HYPONATRAEMIA: f64 = 135.0;
const KCL_ESCALATE_BELOW: f64 = 3.0;
const KCL_HOLD_ABOVE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseFluid {
    Dextrose10HalfSaline,
    Dextrose10NormalSaline,
    NormalSalineDextrose5,
    Dextrose5HalfSaline,
}

impl BaseFluid {
    pub fn label(self) -> &'static str {
        match self {
            BaseFluid::Dextrose10HalfSaline => "D10 0.45% NaCl",
            BaseFluid::Dextrose10NormalSaline => "D10 0.9% NaCl",
            BaseFluid::NormalSalineDextrose5 => "NS + 5% Dextrose",
            BaseFluid::Dextrose5HalfSaline => "D5 0.45% NaCl",
        }
    }
}

/// KCl added to the base fluid, mEq/L.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KclAdditive {
    Standard,
    Aggressive,
    Held,
}

impl KclAdditive {
    pub fn meq_per_l(self) -> u32 {
        match self {
            KclAdditive::Standard => 20,
            KclAdditive::Aggressive => 40,
            KclAdditive::Held => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FluidSelection {
    pub base: BaseFluid,
    pub kcl: KclAdditive,
    pub reason: String,
}

impl FluidSelection {
    /// Solution label with the KCl dose included, e.g. `D5 0.45% NaCl + 20 mEq/L KCl`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FluidSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kcl {
            KclAdditive::Held => f.write_str(self.base.label()),
            kcl => write!(f, "{} + {} mEq/L KCl", self.base.label(), kcl.meq_per_l()),
        }
    }
}

pub fn select_fluid(snapshot: &ClinicalSnapshot) -> FluidSelection {
    let (base, reason) = select_base(snapshot);
    apply_potassium_overlay(base, reason, snapshot.potassium)
}

fn select_base(snapshot: &ClinicalSnapshot) -> (BaseFluid, String) {
    let sodium = snapshot.sodium;
    let hyponatraemic = sodium < HYPONATRAEMIA;

    match snapshot.glucose {
        Some(glucose) if glucose < SEVERE_HYPOGLYCAEMIA => {
            let mut reason = format!(
                "Severe hypoglycaemia (glucose {glucose} mmol/L < {SEVERE_HYPOGLYCAEMIA}): 10% dextrose required"
            );
            if hyponatraemic {
                reason.push_str(&format!(
                    "; sodium {sodium} mmol/L < {HYPONATRAEMIA}, half-normal saline variant"
                ));
                (BaseFluid::Dextrose10HalfSaline, reason)
            } else {
                reason.push_str(&format!(
                    "; sodium {sodium} mmol/L >= {HYPONATRAEMIA}, normal saline variant"
                ));
                (BaseFluid::Dextrose10NormalSaline, reason)
            }
        }
        Some(glucose) if glucose < LOW_GLUCOSE => {
            if hyponatraemic {
                (
                    BaseFluid::Dextrose10HalfSaline,
                    format!(
                        "Low glucose ({glucose} mmol/L < {LOW_GLUCOSE}) with hyponatraemia (sodium {sodium} mmol/L < {HYPONATRAEMIA}): glucose risk takes priority, 10% dextrose"
                    ),
                )
            } else {
                (
                    BaseFluid::Dextrose5HalfSaline,
                    format!(
                        "Low glucose ({glucose} mmol/L < {LOW_GLUCOSE}) with normal sodium: standard 5% dextrose maintenance, monitor glucose"
                    ),
                )
            }
        }
        _ => {
            if hyponatraemic {
                (
                    BaseFluid::NormalSalineDextrose5,
                    format!(
                        "Hyponatraemia (sodium {sodium} mmol/L < {HYPONATRAEMIA}): normal saline for sodium correction"
                    ),
                )
            } else {
                (
                    BaseFluid::Dextrose5HalfSaline,
                    "Sodium within target range: standard IHPS maintenance fluid".to_string(),
                )
            }
        }
    }
}

fn apply_potassium_overlay(base: BaseFluid, mut reason: String, potassium: f64) -> FluidSelection {
    let kcl = if potassium < KCL_ESCALATE_BELOW {
        reason.push_str(&format!(
            "; aggressive KCl replacement for hypokalaemia (potassium {potassium} mmol/L < {KCL_ESCALATE_BELOW})"
        ));
        KclAdditive::Aggressive
    } else if potassium > KCL_HOLD_ABOVE {
        reason.push_str(&format!(
            "; hold KCl for hyperkalaemia (potassium {potassium} mmol/L > {KCL_HOLD_ABOVE})"
        ));
        KclAdditive::Held
    } else {
        KclAdditive::Standard
    };

    FluidSelection { base, kcl, reason }
}

use crate::domain::snapshot::ClinicalSnapshot;

pub const SEVERE_HYPOKALAEMIA: &str =
    "CRITICAL: Severe hypokalaemia (K < 3.0 mmol/L). Continuous cardiac monitoring required";
pub const HYPERKALAEMIA: &str =
    "CRITICAL: Hyperkalaemia (K > 5.5 mmol/L). Withhold potassium and obtain an ECG";
pub const SEVERE_HYPONATRAEMIA: &str =
    "WARNING: Severe hyponatraemia (Na < 130 mmol/L). Correct slowly";
pub const SEVERE_HYPOCHLORAEMIA: &str =
    "WARNING: Severe hypochloraemia (Cl < 70 mmol/L). Chloride replacement is the priority";
pub const SEVERE_ALKALOSIS: &str =
    "WARNING: Severe metabolic alkalosis (pH > 7.55). Defer surgery until corrected";

/// Independent threshold checks in a fixed order. Several may fire together.
pub fn generate_alerts(snapshot: &ClinicalSnapshot) -> Vec<String> {
    let checks = [
        (snapshot.potassium < 3.0, SEVERE_HYPOKALAEMIA),
        (snapshot.potassium > 5.5, HYPERKALAEMIA),
        (snapshot.sodium < 130.0, SEVERE_HYPONATRAEMIA),
        (snapshot.chloride < 70.0, SEVERE_HYPOCHLORAEMIA),
        (snapshot.ph > 7.55, SEVERE_ALKALOSIS),
    ];

    checks
        .into_iter()
        .filter(|(fired, _)| *fired)
        .map(|(_, message)| message.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_when_nothing_fires() {
        let s = ClinicalSnapshot::new(130.0, 3.0, 70.0, 7.55, 4.0);
        assert!(generate_alerts(&s).is_empty());
    }

    #[test]
    fn keeps_fixed_order_when_all_fire() {
        let s = ClinicalSnapshot::new(125.0, 2.5, 65.0, 7.6, 4.0);
        assert_eq!(
            generate_alerts(&s),
            vec![
                SEVERE_HYPOKALAEMIA,
                SEVERE_HYPONATRAEMIA,
                SEVERE_HYPOCHLORAEMIA,
                SEVERE_ALKALOSIS,
            ]
        );
    }

    #[test]
    fn hyperkalaemia_threshold() {
        let s = ClinicalSnapshot::new(140.0, 5.5, 100.0, 7.4, 4.0);
        assert!(generate_alerts(&s).is_empty());

        let s = ClinicalSnapshot::new(140.0, 5.6, 100.0, 7.6, 4.0);
        assert_eq!(generate_alerts(&s), vec![HYPERKALAEMIA, SEVERE_ALKALOSIS]);
    }
}

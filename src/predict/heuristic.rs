//! Rule-based fertilizer selection
//!
//! Used when the fertilizer model is missing, fails, or is too degenerate to
//! trust. Compares soil N/P/K against a per-crop target and picks the product
//! that covers the nutrients in deficit. Pure and total: every input,
//! including NaN, yields one of the labels below.

pub const UREA: &str = "Urea";
pub const DAP: &str = "DAP";
pub const MOP: &str = "MOP";
pub const NPK_10_26_26: &str = "10-26-26";
pub const NPK_14_35_14: &str = "14-35-14";
pub const NPK_17_17_17: &str = "17-17-17";
pub const NPK_20_20: &str = "20-20";
pub const NPK_28_28: &str = "28-28";

/// Every label the heuristic can return
pub const HEURISTIC_LABELS: [&str; 8] = [
    UREA,
    DAP,
    MOP,
    NPK_10_26_26,
    NPK_14_35_14,
    NPK_17_17_17,
    NPK_20_20,
    NPK_28_28,
];

/// Relative deficit above which a nutrient counts as lacking
const DEFICIT_THRESHOLD: f64 = 0.10;

/// Mean N/P deficit above which the concentrated N-P grade is chosen
const SEVERE_NP_DEFICIT: f64 = 0.40;

/// Below this pH, phosphate is supplied as a complex grade
const ACIDIC_PH: f64 = 6.0;

/// Soil nutrient targets (kg/ha) for one crop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutrientTarget {
    pub n: f64,
    pub p: f64,
    pub k: f64,
    /// Nitrogen-fixing legume: N deficit is ignored
    pub legume: bool,
}

const fn target(n: f64, p: f64, k: f64, legume: bool) -> NutrientTarget {
    NutrientTarget { n, p, k, legume }
}

/// Target used for crops missing from the table
pub const DEFAULT_TARGET: NutrientTarget = target(60.0, 45.0, 40.0, false);

// ============================================================================
// CROP NUTRIENT TARGETS
// Typical soil N-P-K means for well-performing fields of each crop
// ============================================================================

static CROP_TARGETS: &[(&str, NutrientTarget)] = &[
    ("rice", target(80.0, 48.0, 40.0, false)),
    ("maize", target(78.0, 48.0, 20.0, false)),
    ("wheat", target(100.0, 50.0, 40.0, false)),
    ("cotton", target(118.0, 46.0, 20.0, false)),
    ("jute", target(78.0, 47.0, 40.0, false)),
    ("coffee", target(101.0, 29.0, 30.0, false)),
    ("sugarcane", target(120.0, 50.0, 60.0, false)),
    ("banana", target(100.0, 82.0, 50.0, false)),
    ("watermelon", target(99.0, 17.0, 50.0, false)),
    ("muskmelon", target(100.0, 18.0, 50.0, false)),
    ("papaya", target(50.0, 59.0, 50.0, false)),
    ("apple", target(21.0, 134.0, 200.0, false)),
    ("grapes", target(23.0, 133.0, 200.0, false)),
    ("mango", target(20.0, 27.0, 30.0, false)),
    ("orange", target(20.0, 17.0, 10.0, false)),
    ("pomegranate", target(19.0, 19.0, 40.0, false)),
    ("coconut", target(22.0, 17.0, 31.0, false)),
    ("chickpea", target(40.0, 68.0, 80.0, true)),
    ("kidneybeans", target(21.0, 67.0, 20.0, true)),
    ("pigeonpeas", target(21.0, 68.0, 20.0, true)),
    ("mothbeans", target(21.0, 48.0, 20.0, true)),
    ("mungbean", target(21.0, 47.0, 20.0, true)),
    ("blackgram", target(40.0, 67.0, 19.0, true)),
    ("lentil", target(19.0, 68.0, 19.0, true)),
    ("soybean", target(30.0, 60.0, 40.0, true)),
    ("peas", target(25.0, 60.0, 30.0, true)),
    ("groundnut", target(25.0, 50.0, 30.0, true)),
];

/// Nutrient target for a crop (case-insensitive), or [`DEFAULT_TARGET`]
pub fn nutrient_target(crop: &str) -> NutrientTarget {
    let key = crop.trim().to_lowercase();
    CROP_TARGETS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, t)| *t)
        .unwrap_or(DEFAULT_TARGET)
}

/// `(target - observed) / target`, floored at zero; non-finite input counts as no deficit
fn relative_deficit(observed: f64, target: f64) -> f64 {
    let d = (target - observed) / target;
    if d.is_finite() && d > 0.0 {
        d
    } else {
        0.0
    }
}

/// Pick a fertilizer without any trained model
///
/// | Lacking | Label |
/// |---------|-------|
/// | N only  | Urea |
/// | P only  | DAP (14-35-14 on acidic soil) |
/// | K only  | MOP |
/// | N + P   | 28-28 if severe, else 20-20 |
/// | P + K   | 10-26-26 |
/// | other   | 17-17-17 |
pub fn heuristic(n: f64, p: f64, k: f64, ph: f64, crop: &str) -> &'static str {
    let t = nutrient_target(crop);

    let dn = if t.legume { 0.0 } else { relative_deficit(n, t.n) };
    let dp = relative_deficit(p, t.p);
    let dk = relative_deficit(k, t.k);

    let lacks_n = dn > DEFICIT_THRESHOLD;
    let lacks_p = dp > DEFICIT_THRESHOLD;
    let lacks_k = dk > DEFICIT_THRESHOLD;

    match (lacks_n, lacks_p, lacks_k) {
        (true, false, false) => UREA,
        (false, true, false) => {
            if ph < ACIDIC_PH {
                NPK_14_35_14
            } else {
                DAP
            }
        }
        (false, false, true) => MOP,
        (true, true, false) => {
            if (dn + dp) / 2.0 > SEVERE_NP_DEFICIT {
                NPK_28_28
            } else {
                NPK_20_20
            }
        }
        (false, true, true) => NPK_10_26_26,
        // N+K, all three, or nothing lacking: balanced maintenance grade
        _ => NPK_17_17_17,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_nutrient_rules() {
        // rice target 80-48-40
        assert_eq!(heuristic(20.0, 60.0, 60.0, 6.5, "rice"), UREA);
        assert_eq!(heuristic(100.0, 10.0, 60.0, 6.5, "rice"), DAP);
        assert_eq!(heuristic(100.0, 10.0, 60.0, 5.2, "rice"), NPK_14_35_14);
        assert_eq!(heuristic(100.0, 60.0, 5.0, 6.5, "rice"), MOP);
    }

    #[test]
    fn test_combined_rules() {
        assert_eq!(heuristic(10.0, 5.0, 60.0, 6.5, "rice"), NPK_28_28);
        assert_eq!(heuristic(65.0, 40.0, 60.0, 6.5, "rice"), NPK_20_20);
        assert_eq!(heuristic(100.0, 10.0, 5.0, 6.5, "rice"), NPK_10_26_26);
        assert_eq!(heuristic(10.0, 10.0, 5.0, 6.5, "rice"), NPK_17_17_17);
        assert_eq!(heuristic(100.0, 50.0, 150.0, 6.5, "rice"), NPK_17_17_17);
    }

    #[test]
    fn test_legumes_ignore_nitrogen() {
        // chickpea target 40-68-80; N = 0 would be Urea for a cereal
        assert_eq!(heuristic(0.0, 80.0, 90.0, 6.5, "chickpea"), NPK_17_17_17);
        assert_eq!(heuristic(0.0, 80.0, 90.0, 6.5, "maize"), UREA);
    }

    #[test]
    fn test_crop_lookup_is_case_insensitive() {
        assert_eq!(nutrient_target("  Rice "), nutrient_target("rice"));
        assert_eq!(nutrient_target("dragonfruit"), DEFAULT_TARGET);
    }

    #[test]
    fn test_total_over_odd_inputs() {
        let values = [0.0, -5.0, 1e12, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 42.0];
        for &n in &values {
            for &p in &values {
                for &k in &values {
                    for crop in ["rice", "unknown crop", "x"] {
                        let label = heuristic(n, p, k, 6.5, crop);
                        assert!(!label.is_empty());
                        assert!(HEURISTIC_LABELS.contains(&label));
                    }
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let a = heuristic(33.0, 21.0, 17.0, 5.9, "cotton");
        let b = heuristic(33.0, 21.0, 17.0, 5.9, "cotton");
        assert_eq!(a, b);
    }
}

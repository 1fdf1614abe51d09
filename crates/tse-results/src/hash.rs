//! Content-based hashing for scorecard run IDs: the experiment id plus
//! the frozen scorecard itself, so identical boil events always hash
//! to the same run id.

use sha2::{Digest, Sha256};
use tse_engine::Scorecard;

pub fn compute_scorecard_id(experiment_id: &str, scorecard: &Scorecard, solver_version: &str) -> String {
    let mut hasher = Sha256::new();

    hasher.update(experiment_id.as_bytes());

    let scorecard_json = serde_json::to_string(scorecard).unwrap_or_default();
    hasher.update(scorecard_json.as_bytes());

    hasher.update(solver_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tse_engine::{IdealTimeForStep, PotScorecardSummary};

    fn scorecard() -> Scorecard {
        Scorecard {
            experiment_id: "l1e1".to_string(),
            sim_time_s: 167.0,
            pot: PotScorecardSummary {
                substance_id: "water".to_string(),
                temperature_c: 100.0,
                effective_boiling_point_c: 100.0,
                time_to_boil_s: 167.0,
                burner_step: 3,
                altitude_m: 0.0,
                pressure_pa: 101_325.0,
            },
            room: None,
            ideal_times: vec![IdealTimeForStep {
                burner_step: 3,
                watts: 2000.0,
                ideal_time_s: 167.44,
            }],
        }
    }

    #[test]
    fn hash_is_stable_for_identical_inputs() {
        let card = scorecard();
        let h1 = compute_scorecard_id("l1e1", &card, "0.1.0");
        let h2 = compute_scorecard_id("l1e1", &card, "0.1.0");
        assert_eq!(h1, h2);
    }

    #[test]
    fn hash_differs_when_scorecard_differs() {
        let card_a = scorecard();
        let mut card_b = scorecard();
        card_b.pot.time_to_boil_s = 200.0;

        let h1 = compute_scorecard_id("l1e1", &card_a, "0.1.0");
        let h2 = compute_scorecard_id("l1e1", &card_b, "0.1.0");
        assert_ne!(h1, h2);
    }
}

use std::fmt;

use rand::Rng;

use crate::error::{ConfigError, EngineError};
use crate::game::{GameState, MAX_MOVES};

use super::heuristic::HeuristicKind;

/// Column every hard game opens with.
const CENTER_COLUMN: usize = 3;
/// Hard plays the center column while fewer than this many disks are down.
const HARD_OPENING_MOVES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn level(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = EngineError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Difficulty::Easy),
            2 => Ok(Difficulty::Medium),
            3 => Ok(Difficulty::Hard),
            other => Err(EngineError::InvalidDifficulty(other)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tuning knobs for the difficulty policies.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Chance that easy searches two plies instead of three.
    pub easy_shallow_probability: f64,
    /// Chance that medium orders its moves by the constant heuristic.
    pub medium_constant_probability: f64,
    pub medium_heuristic: HeuristicKind,
    pub hard_heuristic: HeuristicKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            easy_shallow_probability: 0.3,
            medium_constant_probability: 0.3,
            medium_heuristic: HeuristicKind::WeightedZone,
            hard_heuristic: HeuristicKind::WeightedZone,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.easy_shallow_probability) {
            return Err(ConfigError::Validation(
                "engine.easy_shallow_probability must be in [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.medium_constant_probability) {
            return Err(ConfigError::Validation(
                "engine.medium_constant_probability must be in [0, 1]".into(),
            ));
        }
        Ok(())
    }
}

/// What a difficulty level decided to do in a given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// Play a fixed opening column without searching.
    Opening(usize),
    /// Search to the absolute horizon `depth` ordering moves by `heuristic`.
    Search {
        depth: usize,
        heuristic: HeuristicKind,
    },
}

fn horizon(state: &GameState, plies: usize) -> usize {
    (state.number_of_moves() + plies).min(MAX_MOVES)
}

/// Pick the search depth and move-ordering heuristic for `difficulty`.
pub fn plan<R: Rng + ?Sized>(
    difficulty: Difficulty,
    state: &GameState,
    config: &EngineConfig,
    rng: &mut R,
) -> Plan {
    match difficulty {
        Difficulty::Easy => {
            let plies = if rng.random_bool(config.easy_shallow_probability) {
                2
            } else {
                3
            };
            Plan::Search {
                depth: horizon(state, plies),
                heuristic: HeuristicKind::Constant,
            }
        }
        Difficulty::Medium => {
            let heuristic = if rng.random_bool(config.medium_constant_probability) {
                HeuristicKind::Constant
            } else {
                config.medium_heuristic
            };
            Plan::Search {
                depth: horizon(state, 4),
                heuristic,
            }
        }
        Difficulty::Hard => {
            if state.number_of_moves() < HARD_OPENING_MOVES {
                return Plan::Opening(CENTER_COLUMN);
            }
            // Fewer open columns means a narrower tree, so look further ahead.
            let plies = match state.open_columns() {
                0..=3 => 20,
                4 => 14,
                5 => 12,
                _ => 6,
            };
            Plan::Search {
                depth: (horizon(state, plies) + 1).min(MAX_MOVES),
                heuristic: config.hard_heuristic,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn play(columns: &[usize]) -> GameState {
        let mut state = GameState::initial();
        for &column in columns {
            state.make_move(column);
        }
        state
    }

    fn depth_of(plan: Plan) -> usize {
        match plan {
            Plan::Search { depth, .. } => depth,
            Plan::Opening(column) => panic!("unexpected opening {column}"),
        }
    }

    #[test]
    fn difficulty_from_level() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::try_from(difficulty.level()), Ok(difficulty));
        }
        assert_eq!(
            Difficulty::try_from(0),
            Err(EngineError::InvalidDifficulty(0))
        );
        assert_eq!(
            Difficulty::try_from(4),
            Err(EngineError::InvalidDifficulty(4))
        );
        assert_eq!(Difficulty::Hard.to_string(), "Hard");
    }

    #[test]
    fn easy_depth_is_two_or_three_plies() {
        let state = play(&[3, 3, 2]);
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(9);
        let mut seen = [false; 2];
        for _ in 0..200 {
            match plan(Difficulty::Easy, &state, &config, &mut rng) {
                Plan::Search { depth, heuristic } => {
                    assert_eq!(heuristic, HeuristicKind::Constant);
                    assert!(depth == 5 || depth == 6, "depth {depth}");
                    seen[depth - 5] = true;
                }
                Plan::Opening(_) => panic!("easy has no opening book"),
            }
        }
        assert!(seen[0] && seen[1]);
    }

    #[test]
    fn easy_probability_extremes() {
        let state = GameState::initial();
        let mut rng = StdRng::seed_from_u64(1);
        let always_shallow = EngineConfig {
            easy_shallow_probability: 1.0,
            ..EngineConfig::default()
        };
        let never_shallow = EngineConfig {
            easy_shallow_probability: 0.0,
            ..EngineConfig::default()
        };
        for _ in 0..20 {
            assert_eq!(depth_of(plan(Difficulty::Easy, &state, &always_shallow, &mut rng)), 2);
            assert_eq!(depth_of(plan(Difficulty::Easy, &state, &never_shallow, &mut rng)), 3);
        }
    }

    #[test]
    fn medium_depth_and_heuristic_mix() {
        let state = play(&[3]);
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(4);
        let mut constant = 0;
        for _ in 0..300 {
            match plan(Difficulty::Medium, &state, &config, &mut rng) {
                Plan::Search { depth, heuristic } => {
                    assert_eq!(depth, 5);
                    if heuristic == HeuristicKind::Constant {
                        constant += 1;
                    } else {
                        assert_eq!(heuristic, HeuristicKind::WeightedZone);
                    }
                }
                Plan::Opening(_) => panic!("medium has no opening book"),
            }
        }
        assert!((30..=150).contains(&constant), "constant chosen {constant} times");
    }

    #[test]
    fn hard_opens_in_the_center() {
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(0);
        for moves in [&[][..], &[0][..], &[0, 6][..]] {
            let state = play(moves);
            assert_eq!(
                plan(Difficulty::Hard, &state, &config, &mut rng),
                Plan::Opening(3)
            );
        }
        let state = play(&[0, 6, 1]);
        assert_eq!(
            plan(Difficulty::Hard, &state, &config, &mut rng),
            Plan::Search {
                depth: 3 + 6 + 1,
                heuristic: HeuristicKind::WeightedZone
            }
        );
    }

    #[test]
    fn hard_depth_grows_as_columns_fill() {
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(0);
        let fill = |columns: &[usize]| {
            let mut order = Vec::new();
            // Alternate two columns per pair so no four ever forms.
            for pair in columns.chunks(2) {
                let (a, b) = (pair[0], pair[1]);
                order.extend([a, b, a, b, a, b, b, a, b, a, b, a]);
            }
            play(&order)
        };

        let state = fill(&[0, 1]);
        assert_eq!(state.open_columns(), 5);
        assert_eq!(depth_of(plan(Difficulty::Hard, &state, &config, &mut rng)), 12 + 12 + 1);

        let state = fill(&[0, 1, 5, 6]);
        assert_eq!(state.open_columns(), 3);
        assert_eq!(depth_of(plan(Difficulty::Hard, &state, &config, &mut rng)), MAX_MOVES);

        let mut state = fill(&[0, 1]);
        for column in [6, 6, 6, 6, 6, 6] {
            state.make_move(column);
        }
        assert_eq!(state.open_columns(), 4);
        assert_eq!(depth_of(plan(Difficulty::Hard, &state, &config, &mut rng)), 18 + 14 + 1);
    }

    #[test]
    fn config_validation() {
        assert!(EngineConfig::default().validate().is_ok());
        let config = EngineConfig {
            medium_constant_probability: 1.5,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
        let config = EngineConfig {
            easy_shallow_probability: -0.1,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

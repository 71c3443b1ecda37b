//! Deterministic quest generation engine.
//!
//! Overview
//! - No real language model: quests are assembled from configured templates
//!   plus a private pseudo-random stream seeded from the goal text
//! - Deterministic: the same goal and the same [`EngineConfig`] always produce
//!   the same quest sequence; different goals almost always diverge
//! - Two modes: [`Mode::Simulated`] (template + stream pipeline) and
//!   [`Mode::Mock`] (shuffled canned catalog, see [`mock`])
//! - Degenerate inputs never fail: an empty goal, a zero count, or missing
//!   templates all degrade to built-in defaults or empty output
//!
//! The random stream is constructed per call and owned by it; there is no
//! process-wide generator, so concurrent callers cannot perturb each other's
//! sequences and tests can assert byte-identical output.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::EngineConfig;
use crate::logutil::escape_log;

mod mock;

/// Errors that can arise while driving the quest engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Returned when a mode string does not name a known generation mode.
    #[error("unsupported generation mode: {0}")]
    UnsupportedMode(String),
}

/// Generation strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Shuffle the built-in canned catalog; no configuration consulted.
    Mock,
    /// Full template + seeded-stream pipeline.
    Simulated,
}

impl FromStr for Mode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(Mode::Mock),
            // "ai_sim" is the legacy spelling kept for older configs
            "sim" | "ai_sim" | "simulated" => Ok(Mode::Simulated),
            other => Err(EngineError::UnsupportedMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Mock => write!(f, "mock"),
            Mode::Simulated => write!(f, "sim"),
        }
    }
}

/// Difficulty rating derived from a quest's normalized position in the
/// configured points range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Rate `points` against the inclusive `[low, high]` range:
    /// normalized position `< 0.33` is easy, `< 0.66` medium, else hard.
    pub fn from_points(points: u32, low: u32, high: u32) -> Self {
        let span = high.saturating_sub(low).max(1);
        let norm = points.saturating_sub(low) as f64 / span as f64;
        if norm < 0.33 {
            Difficulty::Easy
        } else if norm < 0.66 {
            Difficulty::Medium
        } else {
            Difficulty::Hard
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// A quest suggestion produced by the engine.
///
/// Transient: not persisted until adopted into a user's quest list, at which
/// point the difficulty rating is deliberately dropped (see
/// `tracker::Quest::from`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuest {
    pub name: String,
    pub description: String,
    pub points: u32,
    pub difficulty: Difficulty,
}

/// Deterministic quest generator driven by an [`EngineConfig`].
pub struct QuestEngine {
    config: EngineConfig,
}

/// Appended to a simulated description with probability 0.15.
const INTENSIFIER: &str = "Push yourself a little further on this one.";

/// Fallback description used when no description templates are configured.
const DEFAULT_DESCRIPTION: &str = "Take one small, repeatable action toward: {goal}. Keep it achievable today.";

impl QuestEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generate `n` quest suggestions for `goal`.
    ///
    /// Simulated mode returns exactly `n` records; mock mode silently
    /// truncates to the catalog size. Requesting zero quests returns an empty
    /// vector in either mode.
    pub fn generate(&self, goal: &str, n: usize, mode: Mode) -> Vec<GeneratedQuest> {
        debug!(
            "generating {} quest(s) for goal '{}' (mode={})",
            n,
            escape_log(goal),
            mode
        );
        match mode {
            Mode::Mock => self.generate_mock(goal, n),
            Mode::Simulated => self.generate_simulated(goal, n),
        }
    }

    /// Template + stream pipeline. The seed mixes the goal with the configured
    /// model name, so renaming the model regenerates every sequence.
    fn generate_simulated(&self, goal: &str, n: usize) -> Vec<GeneratedQuest> {
        let seed = text_seed(&format!("{}{}", goal, self.config.model_name));
        let mut rng = StdRng::seed_from_u64(seed);

        let (low, high) = ordered_range(self.config.points_range);
        let short = short_goal(goal);
        let short_title = title_case(&short);

        let mut quests = Vec::with_capacity(n);
        for i in 0..n {
            // Names rotate through the template list instead of drawing from
            // the stream: adjacent items cannot collide while templates >= n.
            let name = if self.config.name_templates.is_empty() {
                format!("{} Step {}", short_title, i + 1)
            } else {
                let template = &self.config.name_templates[i % self.config.name_templates.len()];
                template.replace("{goal_short}", &short_title)
            };

            let mut description = if self.config.description_templates.is_empty() {
                DEFAULT_DESCRIPTION.replace("{goal}", goal)
            } else {
                let idx = rng.gen_range(0..self.config.description_templates.len());
                self.config.description_templates[idx].replace("{goal}", goal)
            };
            if rng.gen_bool(0.15) {
                description.push(' ');
                description.push_str(INTENSIFIER);
            }

            let points = rng.gen_range(low..=high);
            quests.push(GeneratedQuest {
                name: collapse_whitespace(&name),
                description: collapse_whitespace(&description),
                points,
                difficulty: Difficulty::from_points(points, low, high),
            });
        }
        quests
    }

    /// Catalog shuffle. Seeded from the goal alone; the model name plays no
    /// part here so mock output survives engine reconfiguration.
    fn generate_mock(&self, goal: &str, n: usize) -> Vec<GeneratedQuest> {
        let mut rng = StdRng::seed_from_u64(text_seed(goal));

        let mut catalog = mock::CATALOG.to_vec();
        catalog.shuffle(&mut rng);

        let mut quests = Vec::with_capacity(n.min(catalog.len()));
        for (name, description, points) in catalog.into_iter().take(n) {
            let mut description = description.to_string();
            if rng.gen_bool(0.6) {
                description.push_str(&format!(" (Goal: {})", goal));
            }
            quests.push(GeneratedQuest {
                name: name.to_string(),
                description,
                points,
                difficulty: Difficulty::from_points(
                    points,
                    mock::CATALOG_POINTS_LOW,
                    mock::CATALOG_POINTS_HIGH,
                ),
            });
        }
        quests
    }
}

/// Sum of character codes; tiny but stable across platforms and runs, which
/// is all the determinism contract needs.
fn text_seed(text: &str) -> u64 {
    text.chars().map(|c| c as u64).sum()
}

/// Inclusive range with the endpoints put back in order if the config
/// inverted them.
fn ordered_range(range: [u32; 2]) -> (u32, u32) {
    let [a, b] = range;
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// First three alphabetic words of the goal joined with spaces; falls back to
/// the first 20 characters when the goal has no alphabetic words at all.
fn short_goal(goal: &str) -> String {
    let words: Vec<&str> = goal
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .take(3)
        .collect();
    if words.is_empty() {
        goal.chars().take(20).collect()
    } else {
        words.join(" ")
    }
}

/// Uppercase the first letter of each whitespace-separated word.
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapse runs of whitespace to single spaces and trim the ends.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

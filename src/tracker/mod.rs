//! # Quest Tracker - Users, Quests, and Persistence
//!
//! In-memory collection of users and their quests with point-accumulation
//! bookkeeping, serialized to a single JSON document.
//!
//! ## Behavior
//!
//! - **Ordering**: each user's quests keep insertion order; users are kept in
//!   a `BTreeMap` so the persisted document has stable key order and diffs
//!   cleanly
//! - **Points invariant**: `user.points` always equals the sum of points over
//!   completed quests; it is maintained incrementally at completion time and
//!   restored to zero by [`QuestTracker::reset_quests`]
//! - **Duplicate names**: permitted by design; completion targets the first
//!   incomplete quest with a matching name
//! - **Persistence**: the store lives at a configurable path as pretty-printed
//!   JSON mapping `username -> { points, streak, quests }`. A missing or
//!   corrupt file loads as an empty tracker, never an error
//!
//! ## Usage
//!
//! ```rust,no_run
//! use questline::tracker::{Quest, QuestTracker};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut tracker = QuestTracker::open("data/users.json");
//!     tracker.add_user("alice")?;
//!     tracker.add_quest("alice", Quest::new("stretch", "Morning stretch", 10))?;
//!     tracker.complete_quest("alice", "stretch");
//!     tracker.save()?;
//!     Ok(())
//! }
//! ```

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::GeneratedQuest;
use crate::validation::{validate_quest_name, validate_username};

mod errors;

pub use errors::TrackerError;

/// A single persisted quest owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub points: u32,
    #[serde(default)]
    pub completed: bool,
}

impl Quest {
    pub fn new(name: impl Into<String>, description: impl Into<String>, points: u32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            points,
            completed: false,
        }
    }
}

/// Adopting a generated quest into a user's list keeps name, description, and
/// points; the difficulty rating is deliberately dropped and is not part of
/// the persisted schema.
impl From<GeneratedQuest> for Quest {
    fn from(generated: GeneratedQuest) -> Self {
        Quest::new(generated.name, generated.description, generated.points)
    }
}

/// A user and their quest list.
///
/// The username doubles as the key in the persisted map, so it is skipped in
/// the record itself and restored from the key on load. `streak` is carried in
/// the schema for forward compatibility but nothing increments it yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(skip)]
    pub username: String,
    pub points: u32,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub quests: Vec<Quest>,
}

impl User {
    fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            ..Self::default()
        }
    }
}

/// Outcome of a completion attempt.
///
/// "Already completed" is an expected, common case and therefore a tagged
/// outcome rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The first incomplete quest with the given name was marked complete and
    /// its points credited.
    Completed { points: u32 },
    /// Every quest with the given name was already complete.
    AlreadyCompleted,
    /// No quest with the given name exists for the user (or the user is
    /// unknown).
    NotFound,
}

/// Manages users and their quests, backed by a JSON document on disk.
pub struct QuestTracker {
    users: BTreeMap<String, User>,
    data_file: PathBuf,
}

impl QuestTracker {
    /// Open a tracker backed by `data_file`, loading any existing store.
    ///
    /// A missing file means "no users yet"; a corrupt file is logged and
    /// likewise treated as empty rather than propagated.
    pub fn open<P: AsRef<Path>>(data_file: P) -> Self {
        let data_file = data_file.as_ref().to_path_buf();
        let users = match fs::read_to_string(&data_file) {
            Ok(contents) => match serde_json::from_str::<BTreeMap<String, User>>(&contents) {
                Ok(mut users) => {
                    // Usernames live in the map keys, not the records
                    for (username, user) in users.iter_mut() {
                        user.username = username.clone();
                    }
                    users
                }
                Err(e) => {
                    warn!(
                        "quest store {} is corrupt ({}); starting empty",
                        data_file.display(),
                        e
                    );
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self { users, data_file }
    }

    /// Add a user, or do nothing if the username already exists.
    ///
    /// Returns `true` when a new user was created, `false` when switching to
    /// an existing one. Rejects empty or whitespace-only usernames.
    pub fn add_user(&mut self, username: &str) -> Result<bool, TrackerError> {
        validate_username(username)?;
        if self.users.contains_key(username) {
            return Ok(false);
        }
        self.users.insert(username.to_string(), User::new(username));
        Ok(true)
    }

    /// Look up a user by name.
    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    /// Iterate over all users in stable (alphabetical) order.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Append a quest to a user's list, creating the user on first reference.
    ///
    /// Duplicate quest names are permitted; completion then targets the first
    /// incomplete occurrence.
    pub fn add_quest(&mut self, username: &str, quest: Quest) -> Result<(), TrackerError> {
        validate_username(username)?;
        validate_quest_name(&quest.name)?;
        self.users
            .entry(username.to_string())
            .or_insert_with(|| User::new(username))
            .quests
            .push(quest);
        Ok(())
    }

    /// Mark the first incomplete quest named `quest_name` complete and credit
    /// its points.
    pub fn complete_quest(&mut self, username: &str, quest_name: &str) -> CompletionOutcome {
        let Some(user) = self.users.get_mut(username) else {
            return CompletionOutcome::NotFound;
        };
        let mut saw_completed = false;
        for quest in &mut user.quests {
            if quest.name != quest_name {
                continue;
            }
            if quest.completed {
                saw_completed = true;
                continue;
            }
            quest.completed = true;
            user.points += quest.points;
            return CompletionOutcome::Completed {
                points: quest.points,
            };
        }
        if saw_completed {
            CompletionOutcome::AlreadyCompleted
        } else {
            CompletionOutcome::NotFound
        }
    }

    /// Read-only view of a user's quests in insertion order.
    pub fn quests(&self, username: &str) -> Option<&[Quest]> {
        self.users.get(username).map(|u| u.quests.as_slice())
    }

    /// Clear all completion flags for a user and zero their accumulated
    /// points, keeping the points invariant intact. Returns `false` for an
    /// unknown user.
    pub fn reset_quests(&mut self, username: &str) -> bool {
        let Some(user) = self.users.get_mut(username) else {
            return false;
        };
        for quest in &mut user.quests {
            quest.completed = false;
        }
        user.points = 0;
        true
    }

    /// Write the full user map to the backing file as pretty-printed JSON.
    ///
    /// Parent directories are created on demand. Key order is stable because
    /// the map is a `BTreeMap`.
    pub fn save(&self) -> Result<(), TrackerError> {
        if let Some(parent) = self.data_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(&self.users)?;
        fs::write(&self.data_file, contents)?;
        Ok(())
    }

    /// Path of the backing store.
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}

//! # Questline - Personal Quest Tracker
//!
//! Questline is a small task-tracking utility: users accrue "quests" (named
//! tasks with point values), mark them complete, and accumulate points. A
//! deterministic templated-text generator can suggest quests for a free-text
//! goal without any real language model behind it.
//!
//! ## Features
//!
//! - **Deterministic Generation**: the same goal and configuration always
//!   produce the same quest suggestions; a private seeded stream per call,
//!   never a process-wide generator.
//! - **Two Generation Modes**: template-driven simulated mode and a canned
//!   catalog mock mode for demos and tests.
//! - **Point Bookkeeping**: completion credits points incrementally and keeps
//!   `points == Σ completed quest points` as an invariant.
//! - **JSON Persistence**: a single pretty-printed document with stable key
//!   order; missing or corrupt stores load as empty.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use questline::config::Config;
//! use questline::engine::{Mode, QuestEngine};
//! use questline::tracker::{Quest, QuestTracker};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml")?;
//!     let engine = QuestEngine::new(config.engine);
//!
//!     let mut tracker = QuestTracker::open(&config.tracker.data_file);
//!     tracker.add_user("alice")?;
//!     for generated in engine.generate("improve sleep", 3, Mode::Simulated) {
//!         tracker.add_quest("alice", Quest::from(generated))?;
//!     }
//!     tracker.save()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`engine`] - Deterministic quest generation (simulated and mock modes)
//! - [`tracker`] - Users, quests, completion bookkeeping, and persistence
//! - [`config`] - Configuration management
//! - [`validation`] - Input validation for usernames and quest names
//! - [`logutil`] - Log sanitization helpers for free-text input
//!
//! The library never reads from or writes to a terminal; all user-facing
//! formatting belongs to the binary in `src/main.rs`.

pub mod config;
pub mod engine;
pub mod logutil;
pub mod tracker;
pub mod validation;

//! # Four in a row
//!
//! A four-in-a-row (Connect Four) engine that plays at three difficulty
//! levels. Positions are searched exactly with negamax, fail-hard alpha-beta
//! pruning and a per-session transposition table; heuristics only order moves
//! and break ties.
//!
//! ## Modules
//!
//! - [`game`] — Board with a sentinel border, players, make/undo game state
//! - [`ai`] — Heuristics, threat detection, negamax search, difficulty policies
//! - [`engine`] — Session facade used by front ends
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;

pub use engine::Engine;

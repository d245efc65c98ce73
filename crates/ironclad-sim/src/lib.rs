//! Match engine for IRONCLAD.
//!
//! `MatchEngine` owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces `MatchSnapshot`s. Completely headless (no frontend
//! dependency), enabling deterministic testing.

pub mod engine;
pub mod scheduler;
pub mod systems;
pub mod world_setup;

pub use engine::MatchEngine;
pub use ironclad_core as core;

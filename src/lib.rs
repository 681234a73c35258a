//! Gesture Snake - Snake on a wrapping grid, steered by hand gestures
//!
//! This library provides:
//! - Core game logic (game module): direction voting, snake movement, food, session state
//! - Signal plumbing (input module): keyboard mapping, simulated classifier, frame handoff
//! - TUI rendering (render module)
//! - Execution modes (interactive play, scripted headless replay)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;

//! Sarcasm Detector
//!
//! Client for an Indonesian sarcasm classification service.
//!
//! # Architecture
//!
//! - **Health monitor**: memoized liveness probe of the backend
//! - **Prediction orchestrator**: validate → health gate → `/predict` → commit
//! - **Session state**: per-session UI state read by the renderer
//! - **REPL / CLI**: terminal rendering collaborator

pub mod errors;

pub use errors::{AppError, PredictionError, Result};

pub mod backend;
pub mod health;
pub mod prediction;
pub mod session;
pub mod view;

pub use prediction::{PredictionOrchestrator, SubmitOutcome};
pub use session::{SessionState, UiState};

// Terminal front-end
pub mod cli;
pub mod repl;
pub mod telemetry;

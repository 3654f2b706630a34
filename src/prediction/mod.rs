//! Prediction module
//!
//! Domain types, the cycle state machine and the orchestrator that drives it.

pub mod orchestrator;
pub mod state;
pub mod types;

pub use orchestrator::{OrchestratorConfig, PredictionOrchestrator, SubmitOutcome};
pub use state::{CycleEvent, CycleState};
pub use types::{
    InputText, PredictionLabel, PredictionRequest, PredictionResult, DEFAULT_PREDICT_TIMEOUT,
    EXAMPLE_INPUT, MAX_INPUT_CHARS,
};

//! Prediction orchestrator
//!
//! Runs one prediction cycle to completion: validate, consult the health
//! monitor, call `/predict`, then commit the result or surface the error in
//! the session. Cycles on one orchestrator never overlap; a submission that
//! arrives while another is in flight is rejected.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};

use crate::backend::{Backend, BackendClient};
use crate::cli::Config;
use crate::errors::PredictionError;
use crate::health::HealthMonitor;
use crate::session::SessionState;

use super::state::{CycleEvent, CycleState};
use super::types::{
    InputText, PredictionRequest, PredictionResult, DEFAULT_PREDICT_TIMEOUT, MAX_INPUT_CHARS,
};

/// Orchestrator settings
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub max_chars: usize,
    pub predict_timeout: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_chars: MAX_INPUT_CHARS,
            predict_timeout: DEFAULT_PREDICT_TIMEOUT,
        }
    }
}

impl From<&Config> for OrchestratorConfig {
    fn from(config: &Config) -> Self {
        Self {
            max_chars: config.input.max_chars,
            predict_timeout: config.predict_timeout(),
        }
    }
}

/// How a submission ended
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Result committed to the session
    Succeeded(PredictionResult),
    /// Error message written to the session
    Failed(PredictionError),
    /// Another submission was in flight; session untouched
    Rejected,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded(_))
    }

    pub fn error(&self) -> Option<&PredictionError> {
        match self {
            SubmitOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Single-session prediction state machine
pub struct PredictionOrchestrator {
    backend: Arc<dyn Backend>,
    health: Arc<HealthMonitor>,
    session: SessionState,
    config: OrchestratorConfig,
    state: Mutex<CycleState>,
    in_flight: AsyncMutex<()>,
}

impl PredictionOrchestrator {
    /// Orchestrator with its own memoizing health monitor
    pub fn new(
        backend: Arc<dyn Backend>,
        session: SessionState,
        config: OrchestratorConfig,
    ) -> Self {
        let health = Arc::new(HealthMonitor::new(backend.clone()));
        Self::with_health(backend, health, session, config)
    }

    /// Orchestrator sharing an existing health monitor
    pub fn with_health(
        backend: Arc<dyn Backend>,
        health: Arc<HealthMonitor>,
        session: SessionState,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            backend,
            health,
            session,
            config,
            state: Mutex::new(CycleState::Idle),
            in_flight: AsyncMutex::new(()),
        }
    }

    /// Wire an HTTP backend, health monitor and fresh session from config
    pub fn from_config(config: &Config) -> crate::errors::Result<Self> {
        let backend: Arc<dyn Backend> = Arc::new(BackendClient::from_url(
            config.base_url()?,
            config.health_timeout(),
        )?);
        let health = Arc::new(HealthMonitor::with_ttl(
            backend.clone(),
            config.health_cache_ttl(),
        ));

        Ok(Self::with_health(
            backend,
            health,
            SessionState::new(),
            OrchestratorConfig::from(config),
        ))
    }

    /// Run one prediction cycle for `raw_text`
    pub async fn submit(&self, raw_text: &str) -> SubmitOutcome {
        let Ok(_guard) = self.in_flight.try_lock() else {
            warn!("submission rejected, another prediction is in flight");
            return SubmitOutcome::Rejected;
        };

        let started = Instant::now();
        self.advance(CycleEvent::Submit);

        let outcome = match self.run_cycle(raw_text).await {
            Ok((text, result)) => {
                let duration_ms = started.elapsed().as_millis() as u64;
                self.session.commit_success(&text, result, duration_ms);
                info!(
                    label = result.label.as_str(),
                    confidence = result.confidence,
                    duration_ms,
                    "prediction committed"
                );
                SubmitOutcome::Succeeded(result)
            }
            Err(err) => {
                info!(error = %err, "prediction failed");
                self.session.record_error(err.user_message());
                SubmitOutcome::Failed(err)
            }
        };

        self.advance(CycleEvent::Finish);
        outcome
    }

    async fn run_cycle(
        &self,
        raw_text: &str,
    ) -> Result<(InputText, PredictionResult), PredictionError> {
        let text = match InputText::parse(raw_text, self.config.max_chars) {
            Ok(text) => {
                self.advance(CycleEvent::InputAccepted);
                text
            }
            Err(err) => {
                self.advance(CycleEvent::InputRejected);
                return Err(err);
            }
        };

        if !self.health.is_available().await {
            self.advance(CycleEvent::BackendUnavailable);
            return Err(PredictionError::BackendUnreachable {
                url: self.backend.location().to_string(),
            });
        }
        self.advance(CycleEvent::BackendAvailable);

        let request = PredictionRequest::with_timeout(text, self.config.predict_timeout);
        debug!(chars = request.text.char_count(), "dispatching prediction");

        match self.backend.predict(&request).await {
            Ok(result) => {
                self.advance(CycleEvent::ResponseAccepted);
                Ok((request.text, result))
            }
            Err(err) => {
                self.advance(CycleEvent::RequestFailed);
                Err(err)
            }
        }
    }

    fn advance(&self, event: CycleEvent) {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        match state.transition(event) {
            Ok(next) => {
                debug!(from = ?*state, to = ?next, "cycle transition");
                *state = next;
            }
            Err(e) => warn!(error = %e, "ignoring invalid cycle transition"),
        }
    }

    /// Reset the session's UI state
    pub fn clear(&self) {
        self.session.clear();
        debug!("session cleared");
    }

    /// Current cycle state
    pub fn state(&self) -> CycleState {
        *self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn health(&self) -> &HealthMonitor {
        &self.health
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }
}

//! Submission Coordinator: un único envío en vuelo por sesión.
//!
//! El flujo es `begin_submission` (bajo lock) -> llamada al sink con timeout
//! (sin lock) -> `complete_submission` (bajo lock). Un segundo `submit`
//! mientras el primero está en vuelo ve el estado `Submitting` y se rechaza
//! sin llegar al sink. No hay reintento automático.
//!
//! Si el future de `submit` se descarta con el envío en vuelo (la UI se va,
//! la tarea se aborta), la sesión pasa a `Failed("submission cancelled")`
//! y queda otra vez editable.

use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use super::{ReferenceId, SinkReceipt, SubmissionPayload, SubmissionSink};
use crate::constants::DEFAULT_SUBMIT_TIMEOUT_MS;
use crate::errors::{SubmissionError, WizardError};
use crate::event::EventStore;
use crate::session::{SessionHandle, WizardSession};

/// Parámetros del motor que no forman parte de la definición del wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub submit_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { submit_timeout: Duration::from_millis(DEFAULT_SUBMIT_TIMEOUT_MS) }
    }
}

impl EngineConfig {
    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }
}

#[derive(Clone)]
pub struct SubmissionCoordinator {
    sink: Arc<dyn SubmissionSink>,
    config: EngineConfig,
}

impl SubmissionCoordinator {
    pub fn new(sink: Arc<dyn SubmissionSink>) -> Self {
        Self::with_config(sink, EngineConfig::default())
    }

    pub fn with_config(sink: Arc<dyn SubmissionSink>, config: EngineConfig) -> Self {
        Self { sink, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Envía una sesión compartida. El lock no se mantiene durante la llamada al sink.
    pub async fn submit<E>(&self, handle: &SessionHandle<E>) -> Result<ReferenceId, WizardError>
        where E: EventStore + Send
    {
        let payload = {
            let mut session = handle.lock();
            session.begin_submission()?
        };
        let in_flight = InFlight::new(Target::Shared(handle));
        let outcome = self.dispatch(&payload).await;
        in_flight.finish(outcome)
    }

    /// Variante para un dueño único de la sesión.
    pub async fn submit_session<E>(&self, session: &mut WizardSession<E>) -> Result<ReferenceId, WizardError>
        where E: EventStore
    {
        let payload = session.begin_submission()?;
        let in_flight = InFlight::new(Target::Owned(session));
        let outcome = self.dispatch(&payload).await;
        in_flight.finish(outcome)
    }

    async fn dispatch(&self, payload: &SubmissionPayload) -> Result<SinkReceipt, SubmissionError> {
        let timeout = self.config.submit_timeout;
        match tokio::time::timeout(timeout, self.sink.create_submission(payload)).await {
            Ok(Ok(receipt)) => Ok(receipt),
            Ok(Err(e)) => Err(SubmissionError::Sink(e.message)),
            Err(_) => {
                let ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
                warn!(session = %payload.session_id(), attempt = payload.attempt(), timeout_ms = ms, "submission sink timed out");
                Err(SubmissionError::Timeout(ms))
            }
        }
    }
}

enum Target<'a, E: EventStore> {
    Shared(&'a SessionHandle<E>),
    Owned(&'a mut WizardSession<E>),
}

/// Envío en vuelo. Se cierra con `finish`; si se descarta antes, el envío
/// queda registrado como cancelado.
struct InFlight<'a, E: EventStore> {
    target: Target<'a, E>,
    settled: bool,
}

impl<'a, E: EventStore> InFlight<'a, E> {
    fn new(target: Target<'a, E>) -> Self {
        Self { target, settled: false }
    }

    fn complete(&mut self, outcome: Result<SinkReceipt, SubmissionError>) -> Result<ReferenceId, WizardError> {
        self.settled = true;
        match &mut self.target {
            Target::Shared(handle) => handle.lock().complete_submission(outcome),
            Target::Owned(session) => session.complete_submission(outcome),
        }
    }

    fn finish(mut self, outcome: Result<SinkReceipt, SubmissionError>) -> Result<ReferenceId, WizardError> {
        self.complete(outcome)
    }
}

impl<E: EventStore> Drop for InFlight<'_, E> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        warn!("in-flight submission dropped before the sink answered");
        // complete_submission deja la sesión en Failed y registra el evento.
        let _cancelled = self.complete(Err(SubmissionError::Cancelled));
    }
}

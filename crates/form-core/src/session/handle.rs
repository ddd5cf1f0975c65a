use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::WizardSession;
use crate::event::{EventStore, InMemoryEventStore};
use crate::submission::SubmissionState;

/// Acceso compartido a una sesión.
///
/// El lock sólo se toma para transiciones cortas y nunca se mantiene
/// durante la llamada al sink, así que la UI puede leer el estado
/// `Submitting` mientras el envío está en vuelo.
pub struct SessionHandle<E: EventStore = InMemoryEventStore> {
    inner: Arc<Mutex<WizardSession<E>>>,
}

impl<E: EventStore> Clone for SessionHandle<E> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<E: EventStore> SessionHandle<E> {
    pub fn new(session: WizardSession<E>) -> Self {
        Self { inner: Arc::new(Mutex::new(session)) }
    }

    /// Recupera el guard aunque el mutex esté envenenado.
    pub fn lock(&self) -> MutexGuard<'_, WizardSession<E>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().state().clone()
    }

    pub fn current_step(&self) -> usize {
        self.lock().current_step()
    }
}

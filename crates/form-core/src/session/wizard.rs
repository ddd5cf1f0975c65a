//! Estado de una sesión de wizard y sus transiciones.
//!
//! Una sesión se crea en el paso 1 con estado `Editing`, avanza de uno en
//! uno validando el paso actual, retrocede sin validar y termina con un
//! envío aceptado (`Submitted`) que la UI confirma con `acknowledge()`.
//! Mientras hay un envío en vuelo toda edición y navegación se rechaza.

use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::{IllegalTransition, SubmissionError, WizardError};
use crate::event::{EventStore, InMemoryEventStore, SessionEvent, SessionEventKind};
use crate::field::{FieldStore, FieldValue};
use crate::prefill::{PrefillMapping, PrefillSource};
use crate::step::{check, check_all, StepDefinition, ValidationReport, WizardDefinition};
use crate::submission::{ReferenceId, SinkReceipt, SubmissionPayload, SubmissionState};

#[derive(Debug)]
pub struct WizardSession<E: EventStore = InMemoryEventStore> {
    id: Uuid,
    definition: Arc<WizardDefinition>,
    fields: FieldStore,
    /// Paso actual, 1-based.
    current_step: usize,
    state: SubmissionState,
    selected_entity_id: Option<String>,
    /// Fijo durante toda la sesión: todos los reintentos lo comparten.
    idempotency_marker: Uuid,
    attempts: u32,
    last_report: Option<ValidationReport>,
    receipt: Option<SinkReceipt>,
    closed: bool,
    event_store: E,
}

impl WizardSession<InMemoryEventStore> {
    /// Abre una sesión con store de eventos en memoria.
    pub fn open(definition: Arc<WizardDefinition>) -> Self {
        Self::open_with_store(definition, InMemoryEventStore::default())
    }
}

impl<E: EventStore> WizardSession<E> {
    pub fn open_with_store(definition: Arc<WizardDefinition>, mut event_store: E) -> Self {
        let id = Uuid::new_v4();
        let fields = FieldStore::seeded(definition.field_names());
        event_store.append_kind(id,
                                SessionEventKind::SessionOpened { wizard: definition.name().to_string(),
                                                                  definition_hash: definition.definition_hash().to_string(),
                                                                  step_count: definition.len() });
        debug!(session = %id, wizard = definition.name(), steps = definition.len(), "wizard session opened");
        Self { id,
               definition,
               fields,
               current_step: 1,
               state: SubmissionState::Editing,
               selected_entity_id: None,
               idempotency_marker: Uuid::new_v4(),
               attempts: 0,
               last_report: None,
               receipt: None,
               closed: false,
               event_store }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn definition(&self) -> &WizardDefinition {
        &self.definition
    }

    pub fn fields(&self) -> &FieldStore {
        &self.fields
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.definition.len()
    }

    pub fn current_step_definition(&self) -> Option<&StepDefinition> {
        self.definition.step(self.current_step)
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step == self.definition.last_index()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn selected_entity_id(&self) -> Option<&str> {
        self.selected_entity_id.as_deref()
    }

    pub fn idempotency_marker(&self) -> Uuid {
        self.idempotency_marker
    }

    /// Envíos aceptados por el coordinador (exitosos o no).
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Último resultado de validación, para pintar errores inline.
    pub fn last_report(&self) -> Option<&ValidationReport> {
        self.last_report.as_ref()
    }

    pub fn receipt(&self) -> Option<&SinkReceipt> {
        self.receipt.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }

    pub fn events(&self) -> Vec<SessionEvent> {
        self.event_store.list(self.id)
    }

    /// Traza compacta de eventos (una letra por evento).
    pub fn event_variants(&self) -> Vec<&'static str> {
        self.events()
            .iter()
            .map(|e| match e.kind {
                SessionEventKind::SessionOpened { .. } => "O",
                SessionEventKind::FieldUpdated { .. } => "U",
                SessionEventKind::AdvanceBlocked { .. } => "B",
                SessionEventKind::StepAdvanced { .. } => "A",
                SessionEventKind::StepRetreated { .. } => "R",
                SessionEventKind::PrefillApplied { .. } => "P",
                SessionEventKind::PrefillCleared { .. } => "Q",
                SessionEventKind::SubmissionStarted { .. } => "S",
                SessionEventKind::SubmissionSucceeded { .. } => "D",
                SessionEventKind::SubmissionFailed { .. } => "X",
                SessionEventKind::SessionClosed => "Z",
            })
            .collect()
    }

    fn record(&mut self, kind: SessionEventKind) {
        self.event_store.append_kind(self.id, kind);
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        if self.closed {
            return Err(IllegalTransition::SessionClosed.into());
        }
        match self.state {
            SubmissionState::Submitting => Err(IllegalTransition::SubmissionInFlight.into()),
            SubmissionState::Submitted(_) => Err(IllegalTransition::AlreadySubmitted.into()),
            SubmissionState::Editing | SubmissionState::Failed(_) => Ok(()),
        }
    }

    /// Tras un envío fallido, cualquier acción del usuario vuelve a `Editing`.
    fn resume_editing(&mut self) {
        if matches!(self.state, SubmissionState::Failed(_)) {
            self.state = SubmissionState::Editing;
        }
    }

    fn ensure_declared<'a, I>(&self, names: I) -> Result<(), WizardError>
        where I: IntoIterator<Item = &'a str>
    {
        match names.into_iter().find(|n| !self.definition.declares(n)) {
            Some(unknown) => Err(WizardError::UnknownField(unknown.to_string())),
            None => Ok(()),
        }
    }

    /// Edición de un campo por el usuario.
    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.ensure_declared([name])?;
        self.fields.set(name, value);
        self.resume_editing();
        self.record(SessionEventKind::FieldUpdated { field: name.to_string() });
        debug!(session = %self.id, field = name, "field updated");
        Ok(())
    }

    /// Vacía un campo (mismo tipo de valor, sin contenido).
    pub fn clear_field(&mut self, name: &str) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.ensure_declared([name])?;
        if !self.fields.clear(name) {
            self.fields.set(name, FieldValue::default());
        }
        self.resume_editing();
        self.record(SessionEventKind::FieldUpdated { field: name.to_string() });
        Ok(())
    }

    /// Valida el paso actual sin moverse.
    pub fn validate_current(&self) -> ValidationReport {
        match self.definition.step(self.current_step) {
            Some(step) => check(step, &self.fields),
            None => check_all(&self.definition, &self.fields),
        }
    }

    /// Avanza al paso siguiente si el actual pasa validación.
    ///
    /// En el último paso devuelve `AtLastStep` (después de validar, para que
    /// la UI pueda mostrar lo que falta): el cierre del wizard es `submit`.
    pub fn advance(&mut self) -> Result<usize, WizardError> {
        self.ensure_editable()?;
        let from = self.current_step;
        let report = self.validate_current();
        self.last_report = Some(report.clone());
        if !report.valid {
            debug!(session = %self.id, step = from, missing = ?report.missing, "advance blocked");
            self.record(SessionEventKind::AdvanceBlocked { step_index: from,
                                                           missing: report.missing.clone() });
            return Err(WizardError::Validation(report));
        }
        if from >= self.definition.last_index() {
            return Err(IllegalTransition::AtLastStep.into());
        }
        let to = from + 1;
        self.current_step = to;
        self.resume_editing();
        self.record(SessionEventKind::StepAdvanced { from, to });
        debug!(session = %self.id, from, to, "step advanced");
        Ok(to)
    }

    /// Retrocede un paso. Nunca valida ni toca los campos.
    pub fn retreat(&mut self) -> Result<usize, WizardError> {
        self.ensure_editable()?;
        let from = self.current_step;
        if from <= 1 {
            return Err(IllegalTransition::AtFirstStep.into());
        }
        let to = from - 1;
        self.current_step = to;
        self.last_report = None;
        self.resume_editing();
        self.record(SessionEventKind::StepRetreated { from, to });
        debug!(session = %self.id, from, to, "step retreated");
        Ok(to)
    }

    /// Copia los atributos mapeados de la entidad, sobrescribiendo los
    /// campos destino, y la marca como seleccionada.
    pub fn apply_prefill<S>(&mut self, mapping: &PrefillMapping, source: &S) -> Result<(), WizardError>
        where S: PrefillSource + ?Sized
    {
        self.ensure_editable()?;
        self.ensure_declared(mapping.targets())?;
        let resolved = mapping.resolve(source)?;
        let written: Vec<String> = resolved.iter().map(|(k, _)| k.clone()).collect();
        for (name, value) in resolved {
            self.fields.set(name, value);
        }
        let entity_id = source.entity_id().to_string();
        self.selected_entity_id = Some(entity_id.clone());
        self.resume_editing();
        debug!(session = %self.id, entity = %entity_id, fields = written.len(), "prefill applied");
        self.record(SessionEventKind::PrefillApplied { entity_id,
                                                       fields: written });
        Ok(())
    }

    /// Quita la selección: los campos mapeados quedan vacíos, no con datos viejos.
    pub fn clear_prefill(&mut self, mapping: &PrefillMapping) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.ensure_declared(mapping.targets())?;
        let cleared: Vec<String> = mapping.targets().into_iter().map(str::to_string).collect();
        for name in &cleared {
            if !self.fields.clear(name) {
                self.fields.set(name.clone(), FieldValue::default());
            }
        }
        self.selected_entity_id = None;
        self.resume_editing();
        self.record(SessionEventKind::PrefillCleared { fields: cleared });
        Ok(())
    }

    /// Primera mitad de un envío: comprueba precondiciones, pasa a
    /// `Submitting` y devuelve el payload a entregar al sink.
    pub fn begin_submission(&mut self) -> Result<SubmissionPayload, WizardError> {
        self.ensure_editable()?;
        if !self.is_last_step() {
            return Err(IllegalTransition::NotOnLastStep.into());
        }
        let report = check_all(&self.definition, &self.fields);
        self.last_report = Some(report.clone());
        if !report.valid {
            debug!(session = %self.id, step = report.step_index, missing = ?report.missing, "submission blocked");
            return Err(WizardError::Validation(report));
        }
        let attempt = self.attempts + 1;
        let payload = SubmissionPayload::snapshot(self.id,
                                                  self.definition.name(),
                                                  self.definition.definition_hash(),
                                                  &self.fields,
                                                  self.selected_entity_id.as_deref(),
                                                  self.idempotency_marker,
                                                  attempt)?;
        self.attempts = attempt;
        self.state = SubmissionState::Submitting;
        self.record(SessionEventKind::SubmissionStarted { attempt,
                                                          idempotency_marker: self.idempotency_marker,
                                                          content_hash: payload.content_hash().to_string() });
        info!(session = %self.id, attempt, "submission started");
        Ok(payload)
    }

    /// Segunda mitad: registra la respuesta del sink.
    pub fn complete_submission(&mut self,
                               outcome: Result<SinkReceipt, SubmissionError>)
                               -> Result<ReferenceId, WizardError> {
        if !self.state.is_submitting() {
            return Err(IllegalTransition::NoSubmissionInFlight.into());
        }
        let attempt = self.attempts;
        match outcome {
            Ok(receipt) => {
                let reference = ReferenceId::new(receipt.id.clone());
                self.state = SubmissionState::Submitted(reference.clone());
                self.record(SessionEventKind::SubmissionSucceeded { attempt,
                                                                    reference_id: receipt.id.clone(),
                                                                    tracking_number: receipt.tracking_number.clone() });
                info!(session = %self.id, attempt, reference = %reference, tracking = %receipt.tracking_number, "submission accepted");
                self.receipt = Some(receipt);
                Ok(reference)
            }
            Err(err) => {
                let message = err.to_string();
                self.state = SubmissionState::Failed(message.clone());
                self.record(SessionEventKind::SubmissionFailed { attempt,
                                                                 error: message.clone() });
                warn!(session = %self.id, attempt, error = %message, "submission failed");
                Err(err.into())
            }
        }
    }

    /// La UI confirma el envío: la sesión se cierra y devuelve la referencia.
    pub fn acknowledge(&mut self) -> Result<ReferenceId, WizardError> {
        if self.closed {
            return Err(IllegalTransition::SessionClosed.into());
        }
        let reference = match &self.state {
            SubmissionState::Submitted(reference) => reference.clone(),
            SubmissionState::Submitting => return Err(IllegalTransition::SubmissionInFlight.into()),
            SubmissionState::Editing | SubmissionState::Failed(_) => {
                return Err(IllegalTransition::NotSubmitted.into())
            }
        };
        self.close()?;
        Ok(reference)
    }

    /// Descarta la sesión (el usuario sale del flujo). No cancela un envío en vuelo.
    pub fn close(&mut self) -> Result<(), WizardError> {
        if self.closed {
            return Ok(());
        }
        if self.state.is_submitting() {
            return Err(IllegalTransition::SubmissionInFlight.into());
        }
        self.closed = true;
        self.record(SessionEventKind::SessionClosed);
        debug!(session = %self.id, "wizard session closed");
        Ok(())
    }
}

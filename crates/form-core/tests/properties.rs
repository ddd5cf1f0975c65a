mod support;

use form_core::{FieldValue, IllegalTransition, LocationPolicy, PrefillMapping, SessionHandle, SubmissionCoordinator,
                SubmissionState, WizardError, WizardSession};
use std::collections::HashMap;
use support::{license_like, receipt, session_at_last_step, Business, GatedSink, ScriptedSink};

#[test]
fn advance_passes_iff_required_fields_are_filled() {
    let def = license_like();
    let step2_required = ["licenseType", "licenseCategory", "licenseDuration"];
    // Todas las combinaciones de campos llenos/vacíos del paso 2.
    for mask in 0u8..8 {
        let mut s = WizardSession::open(def.clone());
        s.set_field("businessId", "B1").unwrap();
        s.advance().unwrap();
        let mut expected_missing = Vec::new();
        for (bit, field) in step2_required.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                s.set_field(field, FieldValue::choice("x")).unwrap();
            } else {
                expected_missing.push(field.to_string());
            }
        }
        let result = s.advance();
        if expected_missing.is_empty() {
            assert_eq!(result.unwrap(), 3);
        } else {
            let report = result.unwrap_err().validation_report().cloned().expect("validation error");
            assert_eq!(report.missing, expected_missing, "mask {mask:03b}");
            assert_eq!(s.current_step(), 2);
        }
    }
}

#[test]
fn later_steps_are_only_reachable_through_advance() {
    let mut s = WizardSession::open(license_like());
    assert!(s.advance().is_err());
    assert_eq!(s.current_step(), 1);
    s.set_field("businessId", "B1").unwrap();
    // Llenar campos de pasos posteriores no permite saltar.
    s.set_field("licenseType", "Trade License").unwrap();
    s.set_field("declaration", "accepted").unwrap();
    assert_eq!(s.advance().unwrap(), 2);
    assert!(s.advance().is_err());
    assert_eq!(s.current_step(), 2);
    let advances = s.events()
                    .iter()
                    .filter(|e| matches!(e.kind, form_core::SessionEventKind::StepAdvanced { .. }))
                    .count();
    assert_eq!(advances, 1);
}

#[test]
fn retreat_is_unconditional_and_keeps_fields() {
    let mut s = session_at_last_step();
    s.clear_field("declaration").unwrap();
    s.clear_field("businessId").unwrap();
    let before = s.fields().clone();
    for expected in [3, 2, 1] {
        assert_eq!(s.retreat().unwrap(), expected);
        assert_eq!(s.fields(), &before);
    }
    assert_eq!(s.retreat().unwrap_err(),
               WizardError::IllegalTransition(IllegalTransition::AtFirstStep));
    assert_eq!(s.current_step(), 1);
}

#[test]
fn prefill_replaces_previous_entity_and_clears_on_deselect() {
    let mapping = PrefillMapping::new().copy("displayName", "businessName")
                                       .split_location("location", "city", "state", LocationPolicy::default())
                                       .copy("postalCode", "pincode");
    let e = Business { id: "B1",
                       attrs: HashMap::from([("displayName", "Sharma Sweets"),
                                             ("location", "Delhi, Delhi"),
                                             ("postalCode", "110001")]) };
    let f = Business { id: "B2",
                       attrs: HashMap::from([("displayName", "Patil Traders"), ("location", "Pune, Maharashtra")]) };

    let mut s = WizardSession::open(license_like());
    s.set_field("city", "typed by user").unwrap();
    s.apply_prefill(&mapping, &e).unwrap();
    s.apply_prefill(&mapping, &f).unwrap();
    assert_eq!(s.selected_entity_id(), Some("B2"));
    assert_eq!(s.fields().text("businessName"), Some("Patil Traders"));
    assert_eq!(s.fields().text("city"), Some("Pune"));
    assert_eq!(s.fields().text("state"), Some("Maharashtra"));
    // B2 no tiene código postal: no queda el de B1.
    assert_eq!(s.fields().text("pincode"), Some(""));

    s.clear_prefill(&mapping).unwrap();
    assert!(s.selected_entity_id().is_none());
    for f in ["businessName", "city", "state", "pincode"] {
        assert!(!s.fields().is_filled(f), "{f} should be empty");
    }
}

#[tokio::test]
async fn submit_while_in_flight_does_not_reach_sink() {
    let sink = GatedSink::new();
    let coordinator = SubmissionCoordinator::new(sink.clone());
    let handle = SessionHandle::new(session_at_last_step());

    let first = {
        let c = coordinator.clone();
        let h = handle.clone();
        tokio::spawn(async move { c.submit(&h).await })
    };
    while sink.calls() == 0 {
        tokio::task::yield_now().await;
    }
    assert_eq!(handle.state(), SubmissionState::Submitting);

    let second = coordinator.submit(&handle).await;
    assert_eq!(second.unwrap_err(),
               WizardError::IllegalTransition(IllegalTransition::SubmissionInFlight));
    // Tampoco se puede editar ni navegar mientras tanto.
    assert!(handle.lock().set_field("businessName", "x").is_err());
    assert!(handle.lock().retreat().is_err());
    assert_eq!(sink.calls(), 1);

    sink.gate.notify_one();
    let reference = first.await.expect("task").expect("submitted");
    assert_eq!(reference.as_str(), "APP-1");
    assert_eq!(sink.calls(), 1);
    assert_eq!(handle.state(), SubmissionState::Submitted(reference));
}

#[tokio::test]
async fn aborted_submit_leaves_session_failed_and_retryable() {
    let sink = GatedSink::new();
    let coordinator = SubmissionCoordinator::new(sink.clone());
    let handle = SessionHandle::new(session_at_last_step());

    let first = {
        let c = coordinator.clone();
        let h = handle.clone();
        tokio::spawn(async move { c.submit(&h).await })
    };
    while sink.calls() == 0 {
        tokio::task::yield_now().await;
    }
    first.abort();
    assert!(first.await.unwrap_err().is_cancelled());

    assert_eq!(handle.state(), SubmissionState::Failed("submission cancelled".into()));
    assert_eq!(handle.lock().event_variants().last(), Some(&"X"));

    // Permiso guardado: la siguiente invocación responde sin esperar.
    sink.gate.notify_one();
    let reference = coordinator.submit(&handle).await.expect("resubmitted");
    assert_eq!(reference.as_str(), "APP-2");
    assert_eq!(handle.lock().attempts(), 2);
}

#[tokio::test]
async fn dropped_owned_submit_can_still_be_closed() {
    let sink = GatedSink::new();
    let coordinator = SubmissionCoordinator::new(sink.clone());
    let mut s = session_at_last_step();

    let pending = tokio::time::timeout(std::time::Duration::from_millis(20), coordinator.submit_session(&mut s)).await;
    assert!(pending.is_err());
    assert_eq!(sink.calls(), 1);
    assert_eq!(s.state(), &SubmissionState::Failed("submission cancelled".into()));
    assert!(s.close().is_ok());
    assert!(s.is_closed());
}

#[tokio::test]
async fn failed_submission_is_editable_and_retry_calls_sink_once() {
    let sink = ScriptedSink::new(vec![Err(form_core::SinkError::new("server error")), Ok(receipt("APP-7"))]);
    let coordinator = SubmissionCoordinator::new(sink.clone());
    let mut s = session_at_last_step();

    let err = coordinator.submit_session(&mut s).await.unwrap_err();
    assert_eq!(err.to_string(), "server error");
    assert_eq!(s.state(), &SubmissionState::Failed("server error".into()));
    assert_eq!(sink.calls(), 1);

    s.set_field("businessName", "Sharma Sweets").unwrap();
    assert_eq!(s.state(), &SubmissionState::Editing);

    let reference = coordinator.submit_session(&mut s).await.unwrap();
    assert_eq!(reference.as_str(), "APP-7");
    assert_eq!(sink.calls(), 2);

    let payloads = sink.payloads.lock().unwrap();
    assert_eq!(payloads[0].attempt(), 1);
    assert_eq!(payloads[1].attempt(), 2);
    assert_eq!(payloads[0].idempotency_marker(), payloads[1].idempotency_marker());
    assert_ne!(payloads[0].content_hash(), payloads[1].content_hash());
}

#[tokio::test]
async fn submit_rechecks_every_step() {
    let sink = ScriptedSink::new(vec![Ok(receipt("APP-1"))]);
    let coordinator = SubmissionCoordinator::new(sink.clone());
    let mut s = session_at_last_step();
    s.clear_field("licenseDuration").unwrap();

    let err = coordinator.submit_session(&mut s).await.unwrap_err();
    let report = err.validation_report().expect("validation");
    assert_eq!(report.step_index, 2);
    assert_eq!(report.missing, vec!["licenseDuration".to_string()]);
    assert_eq!(s.state(), &SubmissionState::Editing);
    assert_eq!(sink.calls(), 0);
}

#[tokio::test]
async fn submit_requires_last_step() {
    let sink = ScriptedSink::new(vec![]);
    let coordinator = SubmissionCoordinator::new(sink.clone());
    let mut s = session_at_last_step();
    s.retreat().unwrap();
    let err = coordinator.submit_session(&mut s).await.unwrap_err();
    assert_eq!(err, WizardError::IllegalTransition(IllegalTransition::NotOnLastStep));
    assert_eq!(sink.calls(), 0);
}

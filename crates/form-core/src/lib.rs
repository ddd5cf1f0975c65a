//! form-core: motor de formularios por pasos con validación de presencia,
//! prefill desde entidades externas y un coordinador de envío con como
//! máximo un envío en vuelo por sesión.
pub mod constants;
pub mod errors;
pub mod event;
pub mod field;
pub mod hashing;
pub mod prefill;
pub mod session;
pub mod step;
pub mod submission;

pub use errors::{IllegalTransition, SubmissionError, WizardError};
pub use event::{EventStore, InMemoryEventStore, SessionEvent, SessionEventKind};
pub use field::{AttachmentRef, FieldStore, FieldValue};
pub use prefill::{LocationPolicy, PrefillMapping, PrefillRule, PrefillSource};
pub use session::{SessionHandle, WizardSession};
pub use step::{StepDefinition, ValidationReport, WizardDefinition};
pub use submission::{EngineConfig, ReferenceId, SinkError, SinkReceipt, SubmissionCoordinator, SubmissionPayload,
                     SubmissionSink, SubmissionState};

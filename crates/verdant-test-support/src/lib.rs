//! Shared test mocks and utilities for the Verdant backend.

mod bus;
mod call_log;
mod clock;
mod repository;

pub use bus::{RecordingEventBus, RecordingIntegrationPublisher};
pub use call_log::CallLog;
pub use clock::FixedClock;
pub use repository::{FailingReadRepository, RecordingWriteRepository};

//! Purchase observers.

mod logging;
mod recording;

pub use logging::LoggingObserver;
pub use recording::{RecordedPurchase, RecordingObserver};

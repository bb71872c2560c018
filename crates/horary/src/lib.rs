//! Horary perfection engine.
//!
//! Finds how (and whether) the significators of a horary question come
//! together: direct aspect, translation or collection of light, and the
//! prohibitions and denials that stand in the way.

pub mod aspects;
pub mod chart;
pub mod config;
pub mod error;
pub mod perfection;
pub mod reception;
pub mod western;

pub use aspects::{Aspect, TimingKernel};
pub use chart::{AngularBody, Chart, ChartSnapshot, Planet};
pub use config::PerfectionConfig;
pub use error::HoraryError;
pub use perfection::{
    EventFamily, PerfectionChooser, PerfectionCoreApi, PerfectionEvent, PerfectionReport,
};
pub use reception::{ReceptionClassifier, ReceptionSummary, TraditionalReception};

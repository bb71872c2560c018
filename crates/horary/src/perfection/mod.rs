pub mod api;
pub mod chooser;
pub mod collection;
pub mod denial;
pub mod detector;
pub mod direct;
pub mod event;
pub mod pipeline;
pub mod prohibition;
pub mod translation;

pub use api::{
    PerfectionCoreApi, PerfectionReport, PerfectionSummary, ReportMetadata, RouteSummary,
    SummaryTag, TimelineEntry,
};
pub use chooser::PerfectionChooser;
pub use detector::EventDetector;
pub use event::{tags, EventFamily, EventKey, PerfectionEvent, EPS};
pub use pipeline::{deconflict, deduplicate, sort_by_priority};

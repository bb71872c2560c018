pub mod cache;
pub mod traditional;
pub mod types;

pub use cache::ReceptionCache;
pub use traditional::TraditionalReception;
pub use types::{
    MutualReception, OneWayReception, ReceptionClassifier, ReceptionDignity, ReceptionKind,
    ReceptionSummary,
};

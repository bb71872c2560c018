pub mod search;
pub mod timing;
pub mod types;

pub use timing::{normalize180, TimingKernel};
pub use types::{Aspect, AspectHit, DirectRoute, ASPECTS};

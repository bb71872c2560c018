pub mod dignities;
pub mod rulers;
pub mod types;

pub use dignities::{DignitiesService, DignityResult, DignityType};
pub use rulers::{domiciles, exaltation_sign, get_exaltation_ruler, get_sign_ruler, opposite};
pub use types::{days_to_sign_exit, Sign, SIGN_ORDER};

pub mod houses;
pub mod types;

pub use houses::{arc_contains, cusps_or_equal, house_at_future_time, house_of_longitude, ordinal};
pub use types::{
    AngularBody, Chart, ChartSnapshot, Planet, PlanetPosition, SignificatorHouses,
    SolarCondition, CLASSICAL_PLANETS,
};

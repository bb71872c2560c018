//! House lookups for current and projected positions.

use crate::chart::types::{Chart, Planet};

/// Equal houses from 0° Aries, used when the chart carries no cusps.
const EQUAL_CUSPS: [f64; 12] = [
    0.0, 30.0, 60.0, 90.0, 120.0, 150.0, 180.0, 210.0, 240.0, 270.0, 300.0, 330.0,
];

/// Cusps of the chart, or equal houses when none were supplied.
pub fn cusps_or_equal(chart: &Chart) -> [f64; 12] {
    chart.cusps().copied().unwrap_or(EQUAL_CUSPS)
}

/// Whether `point` lies on the arc from `start` to `end`, handling the 0°/360° wrap.
pub fn arc_contains(start: f64, end: f64, point: f64) -> bool {
    let start = start.rem_euclid(360.0);
    let end = end.rem_euclid(360.0);
    let point = point.rem_euclid(360.0);

    if start <= end {
        start <= point && point < end
    } else {
        point >= start || point < end
    }
}

/// House (1-12) containing `longitude`.
pub fn house_of_longitude(longitude: f64, cusps: &[f64; 12]) -> u8 {
    let longitude = longitude.rem_euclid(360.0);
    for i in 0..12 {
        if arc_contains(cusps[i], cusps[(i + 1) % 12], longitude) {
            return (i + 1) as u8;
        }
    }
    // Degenerate cusps (all equal)
    1
}

/// House the body will occupy after `future_days`, moving at its current rate.
pub fn house_at_future_time(chart: &Chart, planet: Planet, future_days: f64) -> Option<u8> {
    let body = chart.body(planet)?;
    let future_lon = (body.longitude + body.rate * future_days).rem_euclid(360.0);
    Some(house_of_longitude(future_lon, &cusps_or_equal(chart)))
}

/// English ordinal: 1st, 2nd, 3rd, 11th...
pub fn ordinal(n: u8) -> String {
    if (10..=20).contains(&(n % 100)) {
        return format!("{n}th");
    }
    let suffix = match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

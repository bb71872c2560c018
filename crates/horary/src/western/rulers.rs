//! Sign rulers for traditional astrology.
//!
//! Maps zodiac signs to their domicile and exaltation rulers.

use crate::chart::Planet;
use crate::western::types::Sign;

/// Traditional domicile rulers, Aries first
const TRADITIONAL_RULERS: [Planet; 12] = [
    Planet::Mars,    // Aries
    Planet::Venus,   // Taurus
    Planet::Mercury, // Gemini
    Planet::Moon,    // Cancer
    Planet::Sun,     // Leo
    Planet::Mercury, // Virgo
    Planet::Venus,   // Libra
    Planet::Mars,    // Scorpio
    Planet::Jupiter, // Sagittarius
    Planet::Saturn,  // Capricorn
    Planet::Saturn,  // Aquarius
    Planet::Jupiter, // Pisces
];

/// Exaltation rulers, Aries first. Gemini, Leo, Scorpio, Sagittarius and
/// Aquarius exalt no classical body.
const EXALTATION_RULERS: [Option<Planet>; 12] = [
    Some(Planet::Sun),     // Aries
    Some(Planet::Moon),    // Taurus
    None,                  // Gemini
    Some(Planet::Jupiter), // Cancer
    None,                  // Leo
    Some(Planet::Mercury), // Virgo
    Some(Planet::Saturn),  // Libra
    None,                  // Scorpio
    None,                  // Sagittarius
    Some(Planet::Mars),    // Capricorn
    None,                  // Aquarius
    Some(Planet::Venus),   // Pisces
];

/// Get sign ruler (traditional rulership)
pub fn get_sign_ruler(sign: Sign) -> Planet {
    TRADITIONAL_RULERS[sign.index()]
}

/// Get the body exalted in a sign, if any
pub fn get_exaltation_ruler(sign: Sign) -> Option<Planet> {
    EXALTATION_RULERS[sign.index()]
}

/// Signs a body rules.
pub fn domiciles(planet: Planet) -> Vec<Sign> {
    crate::western::types::SIGN_ORDER
        .iter()
        .copied()
        .filter(|s| get_sign_ruler(*s) == planet)
        .collect()
}

/// Sign of a body's exaltation.
pub fn exaltation_sign(planet: Planet) -> Option<Sign> {
    crate::western::types::SIGN_ORDER
        .iter()
        .copied()
        .find(|s| get_exaltation_ruler(*s) == Some(planet))
}

/// Opposite sign.
pub fn opposite(sign: Sign) -> Sign {
    crate::western::types::SIGN_ORDER[(sign.index() + 6) % 12]
}

//! Reception by domicile and exaltation.

use crate::chart::{Chart, Planet};
use crate::error::HoraryError;
use crate::reception::types::{
    MutualReception, OneWayReception, ReceptionClassifier, ReceptionDignity, ReceptionKind,
    ReceptionSummary,
};
use crate::western::{get_exaltation_ruler, get_sign_ruler, DignitiesService, DignityType, Sign};

/// Default classifier: a body receives another standing in its domicile or exaltation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraditionalReception;

impl TraditionalReception {
    fn receptions(receiver: Planet, received: Planet, sign: Sign) -> Vec<OneWayReception> {
        let mut found = Vec::new();
        if get_sign_ruler(sign) == receiver {
            found.push(OneWayReception { receiver, received, dignity: ReceptionDignity::Rulership });
        }
        if get_exaltation_ruler(sign) == Some(receiver) {
            found.push(OneWayReception { receiver, received, dignity: ReceptionDignity::Exaltation });
        }
        found
    }
}

impl ReceptionClassifier for TraditionalReception {
    fn classify(&self, chart: &Chart, a: Planet, b: Planet) -> Result<ReceptionSummary, HoraryError> {
        if a == b {
            return Ok(ReceptionSummary::identity());
        }
        let missing = |p: Planet| HoraryError::Reception {
            body_a: a.to_string(),
            body_b: b.to_string(),
            message: format!("{p} has no position"),
        };
        let body_a = chart.body(a).ok_or_else(|| missing(a))?;
        let body_b = chart.body(b).ok_or_else(|| missing(b))?;

        // a receives b when b stands in a's dignity, and vice versa
        let a_receives_b = Self::receptions(a, b, body_b.sign);
        let b_receives_a = Self::receptions(b, a, body_a.sign);

        let by = |list: &[OneWayReception], d: ReceptionDignity| list.iter().any(|r| r.dignity == d);
        let mutual = if a_receives_b.is_empty() || b_receives_a.is_empty() {
            MutualReception::None
        } else if by(&a_receives_b, ReceptionDignity::Rulership)
            && by(&b_receives_a, ReceptionDignity::Rulership)
        {
            MutualReception::MutualRulership
        } else if by(&a_receives_b, ReceptionDignity::Exaltation)
            && by(&b_receives_a, ReceptionDignity::Exaltation)
        {
            MutualReception::MutualExaltation
        } else {
            MutualReception::MixedReception
        };

        if mutual != MutualReception::None {
            let kind = match mutual {
                MutualReception::MutualRulership => ReceptionKind::MutualRulership,
                MutualReception::MutualExaltation => ReceptionKind::MutualExaltation,
                _ => ReceptionKind::MixedReception,
            };
            return Ok(ReceptionSummary { kind, mutual, one_way: Vec::new() });
        }

        let one_way: Vec<OneWayReception> = a_receives_b.into_iter().chain(b_receives_a).collect();
        if !one_way.is_empty() {
            return Ok(ReceptionSummary { kind: ReceptionKind::OneWay, mutual, one_way });
        }

        let dignities = DignitiesService;
        let hostile = dignities.has_dignity(b, body_a.sign, DignityType::Detriment)
            || dignities.has_dignity(b, body_a.sign, DignityType::Fall);
        let kind = if hostile {
            ReceptionKind::DetrimentOrFallAgainst
        } else {
            ReceptionKind::None
        };
        Ok(ReceptionSummary { kind, mutual, one_way })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::AngularBody;

    fn chart(a: (Planet, f64), b: (Planet, f64)) -> Chart {
        Chart::new()
            .with_body(AngularBody::new(a.0, a.1, 1.0))
            .with_body(AngularBody::new(b.0, b.1, 1.0))
    }

    #[test]
    fn test_mutual_rulership() {
        // Mars in Taurus, Venus in Aries
        let c = chart((Planet::Mars, 45.0), (Planet::Venus, 15.0));
        let r = TraditionalReception.classify(&c, Planet::Mars, Planet::Venus).unwrap();
        assert_eq!(r.mutual, MutualReception::MutualRulership);
        assert_eq!(r.kind, ReceptionKind::MutualRulership);
        assert!(r.has_reception());
    }

    #[test]
    fn test_one_way() {
        // Venus in Aries (Mars rules), Mars in Gemini (Mercury rules)
        let c = chart((Planet::Mars, 75.0), (Planet::Venus, 15.0));
        let r = TraditionalReception.classify(&c, Planet::Mars, Planet::Venus).unwrap();
        assert_eq!(r.kind, ReceptionKind::OneWay);
        assert!(r.receives(Planet::Mars, Planet::Venus));
        assert!(!r.receives(Planet::Venus, Planet::Mars));
    }

    #[test]
    fn test_detriment_against() {
        // Mars in Aquarius (the Sun's detriment), Sun in Gemini: no reception either way
        let c = chart((Planet::Mars, 305.0), (Planet::Sun, 65.0));
        let r = TraditionalReception.classify(&c, Planet::Mars, Planet::Sun).unwrap();
        assert_eq!(r.kind, ReceptionKind::DetrimentOrFallAgainst);
        assert!(!r.has_reception());
    }

    #[test]
    fn test_missing_body_is_error() {
        let c = Chart::new().with_body(AngularBody::new(Planet::Mars, 10.0, 0.5));
        assert!(TraditionalReception.classify(&c, Planet::Mars, Planet::Saturn).is_err());
    }
}

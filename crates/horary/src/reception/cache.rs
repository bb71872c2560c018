//! Per-call memo of reception classifications, indexed by ordered body pair.

use crate::chart::{Chart, Planet, CLASSICAL_PLANETS};
use crate::reception::types::{ReceptionClassifier, ReceptionSummary};
use log::{trace, warn};

pub struct ReceptionCache<'a> {
    classifier: &'a dyn ReceptionClassifier,
    table: [[Option<ReceptionSummary>; 7]; 7],
}

impl<'a> ReceptionCache<'a> {
    pub fn new(classifier: &'a dyn ReceptionClassifier) -> Self {
        Self {
            classifier,
            table: std::array::from_fn(|_| std::array::from_fn(|_| None)),
        }
    }

    pub fn cached(&self, a: Planet, b: Planet) -> Option<&ReceptionSummary> {
        self.table[a.index()][b.index()].as_ref()
    }

    /// Reception from `a` toward `b`, classified on first use.
    ///
    /// A classification failure yields an empty summary that is not cached,
    /// so the pair is retried on the next lookup.
    pub fn get(&mut self, chart: &Chart, a: Planet, b: Planet) -> ReceptionSummary {
        if let Some(hit) = self.cached(a, b) {
            return hit.clone();
        }
        if a == b {
            let identity = ReceptionSummary::identity();
            self.table[a.index()][b.index()] = Some(identity.clone());
            return identity;
        }
        match self.classifier.classify(chart, a, b) {
            Ok(summary) => {
                trace!("reception {a}->{b}: {:?}", summary.kind);
                self.table[a.index()][b.index()] = Some(summary.clone());
                summary
            }
            Err(e) => {
                warn!("reception {a}->{b} unavailable: {e}");
                ReceptionSummary::none()
            }
        }
    }

    /// Classify every ordered pair of classical bodies up front.
    ///
    /// Best effort: a failing pair is skipped and left for on-demand lookup.
    /// Returns the number of pairs that failed.
    pub fn precompute(&mut self, chart: &Chart) -> usize {
        let mut failures = 0;
        for (i, a) in CLASSICAL_PLANETS.iter().copied().enumerate() {
            for b in CLASSICAL_PLANETS[i..].iter().copied() {
                if a == b {
                    self.table[a.index()][b.index()] = Some(ReceptionSummary::identity());
                    continue;
                }
                let pair = self
                    .classifier
                    .classify(chart, a, b)
                    .and_then(|ab| self.classifier.classify(chart, b, a).map(|ba| (ab, ba)));
                match pair {
                    Ok((ab, ba)) => {
                        self.table[a.index()][b.index()] = Some(ab);
                        self.table[b.index()][a.index()] = Some(ba);
                    }
                    Err(e) => {
                        trace!("reception precompute skipped {a}/{b}: {e}");
                        failures += 1;
                    }
                }
            }
        }
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::AngularBody;
    use crate::error::HoraryError;
    use crate::reception::types::ReceptionKind;
    use std::cell::Cell;

    struct Counting {
        calls: Cell<usize>,
    }

    impl ReceptionClassifier for Counting {
        fn classify(&self, _chart: &Chart, a: Planet, _b: Planet) -> Result<ReceptionSummary, HoraryError> {
            self.calls.set(self.calls.get() + 1);
            if a == Planet::Saturn {
                return Err(HoraryError::Reception {
                    body_a: a.to_string(),
                    body_b: "any".to_string(),
                    message: "unavailable".to_string(),
                });
            }
            Ok(ReceptionSummary::none())
        }
    }

    #[test]
    fn test_memoizes_ordered_pairs() {
        let classifier = Counting { calls: Cell::new(0) };
        let mut cache = ReceptionCache::new(&classifier);
        let chart = Chart::new().with_body(AngularBody::new(Planet::Mars, 10.0, 0.5));
        cache.get(&chart, Planet::Mars, Planet::Venus);
        cache.get(&chart, Planet::Mars, Planet::Venus);
        assert_eq!(classifier.calls.get(), 1);
        cache.get(&chart, Planet::Venus, Planet::Mars);
        assert_eq!(classifier.calls.get(), 2);
    }

    #[test]
    fn test_identity_skips_classifier() {
        let classifier = Counting { calls: Cell::new(0) };
        let mut cache = ReceptionCache::new(&classifier);
        let r = cache.get(&Chart::new(), Planet::Moon, Planet::Moon);
        assert_eq!(r.kind, ReceptionKind::Identity);
        assert_eq!(classifier.calls.get(), 0);
    }

    #[test]
    fn test_precompute_swallows_failures() {
        let classifier = Counting { calls: Cell::new(0) };
        let mut cache = ReceptionCache::new(&classifier);
        let failures = cache.precompute(&Chart::new());
        // every pair involving Saturn fails in one direction
        assert_eq!(failures, 6);
        assert!(cache.cached(Planet::Sun, Planet::Moon).is_some());
        assert!(cache.cached(Planet::Mars, Planet::Saturn).is_none());
        // on-demand lookup still answers, without caching the failure
        let r = cache.get(&Chart::new(), Planet::Saturn, Planet::Mars);
        assert_eq!(r.kind, ReceptionKind::None);
        assert!(cache.cached(Planet::Saturn, Planet::Mars).is_none());
        assert!(cache.get(&Chart::new(), Planet::Mars, Planet::Saturn).kind == ReceptionKind::None);
        assert!(cache.cached(Planet::Mars, Planet::Saturn).is_some());
    }
}

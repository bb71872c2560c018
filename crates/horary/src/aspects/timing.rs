//! Analytic timing of aspect perfection.
//!
//! Positions advance linearly at their current daily motion; the kernel
//! solves for the next forward time the signed separation reaches an exact
//! aspect and checks that neither body leaves its sign first.

use crate::aspects::types::{Aspect, DirectRoute, ASPECTS};
use crate::chart::{AngularBody, Chart, Planet};
use crate::config::TimingConfig;
use crate::western::days_to_sign_exit;
use log::trace;

/// Relative motion below this is treated as none (degrees per day)
const MIN_RELATIVE_RATE: f64 = 1e-6;

/// Distance from exact that counts as already perfected (degrees)
const EXACT_TOLERANCE: f64 = 1e-3;

/// Wrap an angle to [-180, 180).
pub fn normalize180(x: f64) -> f64 {
    (x + 180.0).rem_euclid(360.0) - 180.0
}

/// Relative daily motion of `b` with respect to `a`.
pub fn relative_rate(a: &AngularBody, b: &AngularBody) -> f64 {
    b.rate - a.rate
}

#[derive(Debug, Clone, Copy)]
pub struct TimingKernel {
    enforce_sign_guard: bool,
}

impl Default for TimingKernel {
    fn default() -> Self {
        Self::new(&TimingConfig::default())
    }
}

impl TimingKernel {
    pub fn new(config: &TimingConfig) -> Self {
        Self {
            enforce_sign_guard: !config.allow_out_of_sign,
        }
    }

    /// Days until the next forward exact hit of `aspect` between `a` and `b`.
    ///
    /// `None` when either body is untracked, there is no relative motion and
    /// the aspect is not already exact, or (with the sign guard on) either
    /// body changes sign before the hit.
    pub fn when_exact_in_days(
        &self,
        a: Planet,
        b: Planet,
        aspect: Aspect,
        chart: &Chart,
    ) -> Option<f64> {
        let pos_a = chart.body(a)?;
        let pos_b = chart.body(b)?;

        let sep_now = normalize180(pos_b.longitude - pos_a.longitude);
        let delta = aspect
            .target_separations()
            .iter()
            .map(|target| normalize180(sep_now - target))
            .min_by(|x, y| x.abs().total_cmp(&y.abs()))?;

        let v_rel = relative_rate(pos_a, pos_b);
        trace!(
            "timing {a}({:.2}) vs {b}({:.2}) {aspect}: sep {sep_now:.2}, delta {delta:.2}, v_rel {v_rel:.4}",
            pos_a.longitude,
            pos_b.longitude
        );

        if v_rel.abs() < MIN_RELATIVE_RATE {
            if delta.abs() < EXACT_TOLERANCE {
                trace!("timing {a}/{b} {aspect}: already exact, no relative motion");
                return Some(0.0);
            }
            trace!("timing {a}/{b} {aspect}: no relative motion");
            return None;
        }

        let mut t = -delta / v_rel;
        if t <= 0.0 {
            let period = 360.0 / v_rel.abs();
            let cycles = ((-t) / period).floor() + 1.0;
            t += cycles * period;
            trace!("timing {a}/{b} {aspect}: advanced {cycles} synodic periods to {t:.2}d");
        }

        if self.enforce_sign_guard {
            let exit_a = days_to_sign_exit(pos_a.longitude, pos_a.rate);
            let exit_b = days_to_sign_exit(pos_b.longitude, pos_b.rate);
            let blocked = exit_a.map_or(false, |d| t > d) || exit_b.map_or(false, |d| t > d);
            if blocked {
                trace!(
                    "timing {a}/{b} {aspect}: {t:.2}d blocked by sign exit ({exit_a:?}, {exit_b:?})"
                );
                return None;
            }
        }

        trace!("timing {a}/{b} {aspect}: exact in {t:.2}d");
        Some(t)
    }

    /// Earliest direct perfection between the significators inside `window_days`.
    ///
    /// The faster body (by absolute rate) is the applier; ties go to the querent.
    pub fn current_direct_route(
        &self,
        chart: &Chart,
        querent: Planet,
        quesited: Planet,
        window_days: f64,
    ) -> Option<DirectRoute> {
        let (applier, receiver) = if chart.speed_of(querent) >= chart.speed_of(quesited) {
            (querent, quesited)
        } else {
            (quesited, querent)
        };

        let mut best: Option<DirectRoute> = None;
        for aspect in ASPECTS {
            let Some(t) = self.when_exact_in_days(querent, quesited, aspect, chart) else {
                continue;
            };
            if t > window_days {
                continue;
            }
            if best.map_or(true, |b| t < b.timing) {
                best = Some(DirectRoute {
                    aspect,
                    timing: t,
                    applier,
                    receiver,
                });
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(a: (f64, f64), b: (f64, f64)) -> Chart {
        Chart::new()
            .with_body(AngularBody::new(Planet::Mercury, a.0, a.1))
            .with_body(AngularBody::new(Planet::Mars, b.0, b.1))
    }

    #[test]
    fn test_normalize180() {
        assert_eq!(normalize180(190.0), -170.0);
        assert_eq!(normalize180(-190.0), 170.0);
        assert_eq!(normalize180(180.0), -180.0);
        assert_eq!(normalize180(45.0), 45.0);
    }

    #[test]
    fn test_conjunction_closing() {
        // Mercury at 10 moving 1.5, Mars at 14 moving 0.5: gap of 4 closes at 1/day
        let c = chart((10.0, 1.5), (14.0, 0.5));
        let t = TimingKernel::default()
            .when_exact_in_days(Planet::Mercury, Planet::Mars, Aspect::Conjunction, &c)
            .unwrap();
        assert!((t - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric_sextile_behind() {
        // Mars 56 degrees behind Mercury, closing to -60 separation
        let c = chart((70.0, 0.5), (14.0, 1.5));
        let t = TimingKernel::default()
            .when_exact_in_days(Planet::Mercury, Planet::Mars, Aspect::Sextile, &c);
        assert!(t.is_none(), "Mars moves away from -60, next hit is a full cycle away");
        let t = TimingKernel::default()
            .when_exact_in_days(Planet::Mars, Planet::Mercury, Aspect::Sextile, &c);
        assert!(t.is_none());
    }

    #[test]
    fn test_no_relative_motion() {
        let c = chart((10.0, 1.0), (40.0, 1.0));
        let k = TimingKernel::default();
        assert_eq!(k.when_exact_in_days(Planet::Mercury, Planet::Mars, Aspect::Trine, &c), None);
        let c = chart((10.0, 1.0), (70.0, 1.0));
        assert_eq!(
            k.when_exact_in_days(Planet::Mercury, Planet::Mars, Aspect::Sextile, &c),
            Some(0.0)
        );
    }

    #[test]
    fn test_sign_exit_guard() {
        // Mercury at 28 Aries moving 1.5/day leaves Aries in 1.33 days; conjunction needs 4
        let c = chart((28.0, 1.5), (32.0, 0.5));
        let guarded = TimingKernel::default();
        assert_eq!(guarded.when_exact_in_days(Planet::Mercury, Planet::Mars, Aspect::Conjunction, &c), None);

        let open = TimingKernel::new(&TimingConfig { allow_out_of_sign: true, ..Default::default() });
        let t = open
            .when_exact_in_days(Planet::Mercury, Planet::Mars, Aspect::Conjunction, &c)
            .unwrap();
        assert!((t - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_forward_only() {
        let k = TimingKernel::new(&TimingConfig { allow_out_of_sign: true, ..Default::default() });
        for i in 0..36 {
            let c = chart((i as f64 * 10.0, 1.3), (17.0, -0.4));
            for aspect in ASPECTS {
                if let Some(t) = k.when_exact_in_days(Planet::Mercury, Planet::Mars, aspect, &c) {
                    assert!(t >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_untracked_body() {
        let c = Chart::new().with_body(AngularBody::new(Planet::Mercury, 10.0, 1.0));
        assert_eq!(
            TimingKernel::default().when_exact_in_days(Planet::Mercury, Planet::Mars, Aspect::Square, &c),
            None
        );
    }

    #[test]
    fn test_direct_route_applier_is_faster() {
        let c = chart((10.0, 0.5), (5.0, 1.5));
        let route = TimingKernel::default()
            .current_direct_route(&c, Planet::Mercury, Planet::Mars, 30.0)
            .unwrap();
        assert_eq!(route.aspect, Aspect::Conjunction);
        assert!((route.timing - 5.0).abs() < 1e-9);
        assert_eq!(route.applier, Planet::Mars);
        assert_eq!(route.receiver, Planet::Mercury);
    }
}

//! Applying/separating leg searches built on the timing kernel.

use crate::aspects::timing::{relative_rate, TimingKernel};
use crate::aspects::types::{AspectHit, ASPECTS};
use crate::chart::{Chart, Planet, CLASSICAL_PLANETS};

impl TimingKernel {
    /// Earliest aspect `from` completes with `to` in `(0, window_days]`.
    ///
    /// With `max_degree`, hits further than that many degrees of relative
    /// motion from exact are ignored (boundary inclusive).
    pub fn find_applying_aspect(
        &self,
        chart: &Chart,
        from: Planet,
        to: Planet,
        window_days: f64,
        max_degree: Option<f64>,
    ) -> Option<AspectHit> {
        let v_rel = relative_rate(chart.body(from)?, chart.body(to)?).abs();

        let mut best: Option<AspectHit> = None;
        for aspect in ASPECTS {
            let Some(t) = self.when_exact_in_days(from, to, aspect, chart) else {
                continue;
            };
            if !(t > 0.0 && t <= window_days) {
                continue;
            }
            let degrees = t * v_rel;
            if max_degree.map_or(false, |max| degrees > max) {
                continue;
            }
            if best.map_or(true, |b| t < b.timing) {
                best = Some(AspectHit {
                    aspect,
                    timing: t,
                    target: to,
                    degrees,
                });
            }
        }
        best
    }

    /// Most recent aspect `from` perfected with `to` within the past `window_days`.
    ///
    /// The returned timing is negative (days ago). No sign guard applies to
    /// past hits.
    pub fn find_separating_aspect(
        &self,
        chart: &Chart,
        from: Planet,
        to: Planet,
        window_days: f64,
        max_degree: Option<f64>,
    ) -> Option<AspectHit> {
        let pos_from = chart.body(from)?;
        let pos_to = chart.body(to)?;

        let delta = (pos_to.longitude - pos_from.longitude).rem_euclid(360.0);
        let v_rel = relative_rate(pos_from, pos_to);
        if v_rel.abs() < 1e-6 {
            return None;
        }

        let mut best: Option<AspectHit> = None;
        for aspect in ASPECTS {
            for target in aspect.target_separations() {
                let dt = if v_rel > 0.0 {
                    (delta - target).rem_euclid(360.0) / v_rel
                } else {
                    (target - delta).rem_euclid(360.0) / -v_rel
                };
                if !(dt > 0.0 && dt <= window_days) {
                    continue;
                }
                let degrees = dt * v_rel.abs();
                if max_degree.map_or(false, |max| degrees > max) {
                    continue;
                }
                if best.map_or(true, |b| dt < -b.timing) {
                    best = Some(AspectHit {
                        aspect,
                        timing: -dt,
                        target: to,
                        degrees,
                    });
                }
            }
        }
        best
    }

    /// The very next application `planet` makes to any classical body.
    pub fn find_earliest_application(
        &self,
        chart: &Chart,
        planet: Planet,
        window_days: f64,
        exclude: &[Planet],
    ) -> Option<AspectHit> {
        let mut best: Option<AspectHit> = None;
        for other in CLASSICAL_PLANETS {
            if other == planet || exclude.contains(&other) {
                continue;
            }
            if let Some(hit) = self.find_applying_aspect(chart, planet, other, window_days, None) {
                if best.map_or(true, |b| hit.timing < b.timing) {
                    best = Some(hit);
                }
            }
        }
        best
    }
}

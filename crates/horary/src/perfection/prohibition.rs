//! Prohibition: a faster third body reaches the receiving significator first.

use crate::aspects::Aspect;
use crate::chart::{house_at_future_time, ordinal, Chart, Planet};
use crate::perfection::detector::EventDetector;
use crate::perfection::event::{EventFamily, PerfectionEvent, EPS};
use crate::reception::ReceptionKind;
use log::{debug, trace};

impl<'a> EventDetector<'a> {
    /// `earliest_positive` is the earliest positive event found so far; a
    /// prohibition must land before it as well as before the direct route.
    pub(crate) fn detect_prohibition(
        &mut self,
        chart: &Chart,
        querent: Planet,
        quesited: Planet,
        window_days: f64,
        earliest_positive: Option<f64>,
    ) -> Vec<PerfectionEvent> {
        let q_to_e = self.kernel.find_applying_aspect(chart, querent, quesited, window_days, None);
        let e_to_q = self.kernel.find_applying_aspect(chart, quesited, querent, window_days, None);
        let (applier, receiver, t_direct) = match (q_to_e, e_to_q) {
            (None, None) => {
                trace!("Prohibition: no applying route between {querent} and {quesited}");
                return Vec::new();
            }
            (Some(a), None) => (querent, quesited, a.timing),
            (None, Some(b)) => (quesited, querent, b.timing),
            (Some(a), Some(b)) if (a.timing - b.timing).abs() <= EPS => {
                if chart.speed_of(querent) >= chart.speed_of(quesited) {
                    (querent, quesited, a.timing)
                } else {
                    (quesited, querent, b.timing)
                }
            }
            (Some(a), Some(b)) if a.timing < b.timing => (querent, quesited, a.timing),
            (Some(_), Some(b)) => (quesited, querent, b.timing),
        };

        let threshold = earliest_positive.map_or(t_direct, |t| t.min(t_direct));
        let receiver_speed = chart.speed_of(receiver);
        let mut events = Vec::new();

        for p in Self::third_bodies(&[querent, quesited]) {
            let Some(app) = self.kernel.find_applying_aspect(chart, p, receiver, window_days, None) else {
                continue;
            };
            if !(app.timing > 0.0 && app.timing < threshold - EPS) {
                continue;
            }
            if chart.speed_of(p) <= receiver_speed {
                trace!("Prohibition: {p} not faster than {receiver}");
                continue;
            }
            let next = self
                .kernel
                .find_earliest_application(chart, p, window_days, &[receiver]);
            if let Some(next) = next {
                if next.target == applier && (next.timing - app.timing).abs() <= EPS {
                    trace!("Prohibition: {p} hands off to {applier}, translating instead");
                    continue;
                }
            }

            debug!("Prohibition: {p} reaches {receiver} in {:.2}d (threshold {threshold:.2}d)", app.timing);
            let reason = self.prohibition_reason(chart, p, receiver, app.aspect, app.timing, Some(t_direct));
            events.push(
                PerfectionEvent::new(EventFamily::Prohibition, querent, quesited, reason)
                    .mediator(p)
                    .aspect(app.aspect)
                    .at(app.timing)
                    .favorable(false)
                    .meta("target", receiver)
                    .meta("preempts_in_days", threshold),
            );
        }
        events
    }

    /// Reason text naming the prohibitor's nature, both houses at the moment
    /// of the aspect, and any reception between the two.
    pub(crate) fn prohibition_reason(
        &mut self,
        chart: &Chart,
        prohibitor: Planet,
        target: Planet,
        aspect: Aspect,
        timing_days: f64,
        direct_days: Option<f64>,
    ) -> String {
        let role = if prohibitor.is_malefic() {
            "malefic"
        } else if prohibitor.is_benefic() {
            "benefic"
        } else {
            "neutral"
        };

        let target_house = house_at_future_time(chart, target, timing_days);
        let prohibitor_house = house_at_future_time(chart, prohibitor, timing_days);
        let qualifier = if target_house.is_some() || prohibitor_house.is_some() {
            " (at aspect time)"
        } else {
            ""
        };
        let loc_target = target_house
            .map(|h| format!(" in the {} house{qualifier}", ordinal(h)))
            .unwrap_or_default();
        let loc_prohibitor = prohibitor_house
            .map(|h| format!(" from the {} house{qualifier}", ordinal(h)))
            .unwrap_or_default();

        let preempt = direct_days
            .map(|d| format!(", pre-empting the significators' perfection (~{d:.1}d)"))
            .unwrap_or_default();
        let kind = self.reception(chart, prohibitor, target).kind;
        let reception = if kind == ReceptionKind::None {
            String::new()
        } else {
            format!(" with reception ({})", kind.as_str())
        };

        format!(
            "Prohibition: {prohibitor} ({role}) applies {} to {target}{loc_target}{loc_prohibitor} in {timing_days:.1} days{preempt}{reception}.",
            aspect.as_str()
        )
    }
}

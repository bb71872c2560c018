//! Selection of the primary and secondary outcome from sorted events.

use crate::perfection::event::{EventFamily, PerfectionEvent, EPS};
use log::debug;
use std::cmp::Ordering;
use std::ptr;

/// Timing gap (days) past which a same-family event still counts as secondary
const SECONDARY_MIN_GAP_DAYS: f64 = 3.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct PerfectionChooser;

/// Earliest first; indeterminate timing after every timed event.
fn by_timing(a: &PerfectionEvent, b: &PerfectionEvent) -> Ordering {
    a.exact_in_days
        .is_none()
        .cmp(&b.exact_in_days.is_none())
        .then_with(|| a.sort_timing().total_cmp(&b.sort_timing()))
}

fn earliest<'e>(
    events: &'e [PerfectionEvent],
    keep: impl Fn(EventFamily) -> bool,
) -> Option<&'e PerfectionEvent> {
    events.iter().filter(|e| keep(e.family)).min_by(|a, b| by_timing(a, b))
}

impl PerfectionChooser {
    /// Primary outcome honoring chronology.
    ///
    /// A prohibition wins only when strictly earlier than every positive
    /// event; otherwise the earliest positive, then the earliest denial,
    /// then the earliest event of any family.
    pub fn select_primary<'e>(&self, events: &'e [PerfectionEvent]) -> Option<&'e PerfectionEvent> {
        if events.is_empty() {
            return None;
        }

        let positive = earliest(events, EventFamily::is_positive);
        let prohibition = earliest(events, |f| f == EventFamily::Prohibition);
        let denial = earliest(events, EventFamily::is_denial);

        if let Some(p) = prohibition {
            let preempts = positive.map_or(true, |pos| p.sort_timing() < pos.sort_timing());
            if preempts {
                debug!("Primary: prohibition by {:?} pre-empts", p.mediator);
                return Some(p);
            }
        }
        positive
            .or(denial)
            .or_else(|| events.iter().min_by(|a, b| by_timing(a, b)))
    }

    /// First later event that differs meaningfully from `primary`: not
    /// simultaneous, and either another family or more than three days apart.
    pub fn select_secondary<'e>(
        &self,
        events: &'e [PerfectionEvent],
        primary: &PerfectionEvent,
    ) -> Option<&'e PerfectionEvent> {
        let primary_t = primary.exact_in_days.unwrap_or(0.0);
        events
            .iter()
            .filter(|e| !ptr::eq(*e, primary))
            .find(|e| {
                let gap = (e.exact_in_days.unwrap_or(0.0) - primary_t).abs();
                gap > EPS && (e.family != primary.family || gap > SECONDARY_MIN_GAP_DAYS)
            })
    }
}

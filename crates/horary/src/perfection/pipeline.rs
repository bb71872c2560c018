//! De-duplication, same-time deconfliction and priority ordering of events.

use crate::perfection::event::{EventKey, PerfectionEvent, EPS};
use log::trace;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Collapse events sharing an [`EventKey`], keeping first-seen order.
///
/// On collision the event with strictly more metadata entries wins.
pub fn deduplicate(events: Vec<PerfectionEvent>) -> Vec<PerfectionEvent> {
    let mut slots: HashMap<EventKey, usize> = HashMap::with_capacity(events.len());
    let mut unique: Vec<PerfectionEvent> = Vec::with_capacity(events.len());

    for event in events {
        match slots.entry(event.key()) {
            Entry::Occupied(slot) => {
                let existing = &mut unique[*slot.get()];
                if event.metadata.len() > existing.metadata.len() {
                    trace!("Dedup: replacing {} with richer duplicate", existing.family);
                    *existing = event;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(unique.len());
                unique.push(event);
            }
        }
    }
    unique
}

/// Drop prohibitions and denials that coincide (within [`EPS`]) with a
/// positive event.
pub fn deconflict(events: Vec<PerfectionEvent>) -> Vec<PerfectionEvent> {
    let positives: Vec<f64> = events
        .iter()
        .filter(|e| e.family.is_positive())
        .filter_map(|e| e.exact_in_days)
        .collect();

    events
        .into_iter()
        .filter(|e| {
            if !e.family.yields_to_positive() {
                return true;
            }
            let Some(t) = e.exact_in_days else {
                return true;
            };
            let clash = positives.iter().any(|p| (p - t).abs() <= EPS);
            if clash {
                trace!("Deconflict: dropping {} at {t:.4}d", e.family);
            }
            !clash
        })
        .collect()
}

/// Stable sort by timing (indeterminate last), family priority, then
/// fewest challenges.
pub fn sort_by_priority(mut events: Vec<PerfectionEvent>) -> Vec<PerfectionEvent> {
    events.sort_by(|a, b| {
        a.sort_timing()
            .total_cmp(&b.sort_timing())
            .then_with(|| a.family.priority().cmp(&b.family.priority()))
            .then_with(|| a.challenges.len().cmp(&b.challenges.len()))
    });
    events
}

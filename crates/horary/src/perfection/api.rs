//! End-to-end perfection analysis for a significator pair.

use crate::aspects::Aspect;
use crate::chart::{Chart, Planet};
use crate::config::PerfectionConfig;
use crate::perfection::chooser::PerfectionChooser;
use crate::perfection::detector::EventDetector;
use crate::perfection::event::{EventFamily, PerfectionEvent};
use crate::reception::{ReceptionClassifier, ReceptionSummary, TraditionalReception};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Confidence reported for an event that carries none
const DEFAULT_CONFIDENCE: i32 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTag {
    pub family: String,
    pub kind: EventFamily,
}

/// Consumer-facing projection of a selected event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfectionSummary {
    pub perfects: bool,
    #[serde(rename = "type")]
    pub family: EventFamily,
    pub favorable: bool,
    pub confidence: i32,
    pub reason: String,
    pub aspect: Option<Aspect>,
    pub reception: Option<ReceptionSummary>,
    pub exact_in_days: Option<f64>,
    pub challenges: Vec<String>,
    pub quality_tags: Vec<String>,
    pub mediator: Option<Planet>,
    pub metadata: BTreeMap<String, Value>,
    pub tags: Vec<SummaryTag>,
}

impl From<&PerfectionEvent> for PerfectionSummary {
    fn from(event: &PerfectionEvent) -> Self {
        Self {
            perfects: true,
            family: event.family,
            favorable: event.favorable,
            confidence: event.confidence.unwrap_or(DEFAULT_CONFIDENCE),
            reason: event.reason.clone(),
            aspect: event.aspect,
            reception: event.reception.clone(),
            exact_in_days: event.exact_in_days,
            challenges: event.challenges.clone(),
            quality_tags: event.quality_tags.clone(),
            mediator: event.mediator,
            metadata: event.metadata.clone(),
            tags: vec![SummaryTag {
                family: "perfection".to_string(),
                kind: event.family,
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub timing: Option<f64>,
    #[serde(rename = "event_type")]
    pub family: EventFamily,
    pub description: String,
    pub favorable: bool,
    pub mediator: Option<Planet>,
}

/// Short description of the primary route for narrative consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    #[serde(rename = "type")]
    pub family: EventFamily,
    pub mediator: Option<Planet>,
    pub timing_days: Option<f64>,
    pub favorable: bool,
    pub confidence: Option<i32>,
    pub challenges: Vec<String>,
    pub quality_tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub total_events: usize,
    pub window_days: f64,
    pub detection_method: String,
    pub route_summary: Option<RouteSummary>,
}

/// Result of one [`PerfectionCoreApi::find_perfections`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfectionReport {
    /// Every surviving event in priority order
    pub events: Vec<PerfectionEvent>,
    pub primary: Option<PerfectionSummary>,
    pub secondary: Option<PerfectionSummary>,
    pub timeline: Vec<TimelineEntry>,
    pub metadata: ReportMetadata,
}

impl PerfectionReport {
    /// Whether any outcome was selected.
    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Perfection engine entry point.
///
/// Holds configuration and the reception capability; every call builds its
/// own detector and reception cache, so one instance can serve many pairs.
pub struct PerfectionCoreApi {
    config: PerfectionConfig,
    classifier: Box<dyn ReceptionClassifier + Send + Sync>,
    chooser: PerfectionChooser,
}

impl Default for PerfectionCoreApi {
    fn default() -> Self {
        Self::new(PerfectionConfig::default())
    }
}

impl PerfectionCoreApi {
    pub fn new(config: PerfectionConfig) -> Self {
        Self::with_classifier(config, Box::new(TraditionalReception))
    }

    pub fn with_classifier(
        config: PerfectionConfig,
        classifier: Box<dyn ReceptionClassifier + Send + Sync>,
    ) -> Self {
        Self {
            config,
            classifier,
            chooser: PerfectionChooser,
        }
    }

    /// Detect, rank and select perfection events for `querent`/`quesited`
    /// within `window_days`.
    ///
    /// Never fails: missing data only thins the event list, and "no
    /// perfection" is an absent primary.
    pub fn find_perfections(
        &self,
        chart: &Chart,
        querent: Planet,
        quesited: Planet,
        window_days: f64,
    ) -> PerfectionReport {
        debug!(
            "Perfection analysis: querent {querent}, quesited {quesited}, window {window_days}d"
        );
        let mut detector = EventDetector::new(&self.config, self.classifier.as_ref());
        detector.precompute_receptions(chart);
        let events = detector.detect_all_events(chart, querent, quesited, window_days);

        for (i, event) in events.iter().enumerate() {
            debug!(
                "  {}. {} at {:?}d: {} (favorable={}, confidence={:?})",
                i + 1,
                event.family,
                event.exact_in_days,
                event.reason,
                event.favorable,
                event.confidence
            );
        }

        let primary = self.chooser.select_primary(&events);
        let secondary = primary.and_then(|p| self.chooser.select_secondary(&events, p));
        match primary {
            Some(p) => info!("Primary perfection: {} ({})", p.family, p.reason),
            None => info!("No perfection for {querent}/{quesited} within {window_days}d"),
        }

        let route_summary = primary.map(|p| RouteSummary {
            family: p.family,
            mediator: p.mediator,
            timing_days: p.exact_in_days,
            favorable: p.favorable,
            confidence: p.confidence,
            challenges: p.challenges.clone(),
            quality_tags: p.quality_tags.clone(),
        });
        let timeline = events
            .iter()
            .map(|e| TimelineEntry {
                timing: e.exact_in_days,
                family: e.family,
                description: e.reason.clone(),
                favorable: e.favorable,
                mediator: e.mediator,
            })
            .collect();

        PerfectionReport {
            primary: primary.map(PerfectionSummary::from),
            secondary: secondary.map(PerfectionSummary::from),
            timeline,
            metadata: ReportMetadata {
                total_events: events.len(),
                window_days,
                detection_method: "unified_core".to_string(),
                route_summary,
            },
            events,
        }
    }
}

//! Translation of light: a faster body separates from one significator and
//! carries the light on to the other.

use crate::aspects::AspectHit;
use crate::chart::{Chart, Planet};
use crate::perfection::detector::EventDetector;
use crate::perfection::event::{tags, EventFamily, PerfectionEvent, EPS};
use crate::reception::ReceptionKind;
use log::{debug, trace};

impl<'a> EventDetector<'a> {
    pub(crate) fn detect_translation(
        &mut self,
        chart: &Chart,
        querent: Planet,
        quesited: Planet,
        window_days: f64,
    ) -> Vec<PerfectionEvent> {
        let mut events = Vec::new();
        for translator in Self::third_bodies(&[querent, quesited]) {
            if let Some(event) = self.try_translation(chart, translator, querent, quesited, window_days) {
                events.push(event);
            }
        }
        events
    }

    /// Separating leg then applying leg, trying both orderings of the pair.
    fn translation_legs(
        &self,
        chart: &Chart,
        translator: Planet,
        querent: Planet,
        quesited: Planet,
        window_days: f64,
    ) -> Option<(AspectHit, AspectHit)> {
        let limits = &self.config.translation;
        let legs = |from: Planet, to: Planet| {
            let sep = self.kernel.find_separating_aspect(
                chart,
                translator,
                from,
                window_days,
                limits.max_separation_deg,
            )?;
            let app = self.kernel.find_applying_aspect(
                chart,
                translator,
                to,
                window_days,
                limits.max_application_deg,
            )?;
            Some((sep, app))
        };
        legs(querent, quesited).or_else(|| legs(quesited, querent))
    }

    fn try_translation(
        &mut self,
        chart: &Chart,
        translator: Planet,
        querent: Planet,
        quesited: Planet,
        window_days: f64,
    ) -> Option<PerfectionEvent> {
        let rules = self.config.translation.clone();

        let Some((sep, app)) = self.translation_legs(chart, translator, querent, quesited, window_days) else {
            trace!("Translation by {translator}: missing separating or applying leg");
            return None;
        };

        if rules.require_proper_sequence && sep.timing >= app.timing {
            trace!("Translation by {translator}: separation does not precede application");
            return None;
        }

        if rules.require_speed_advantage {
            let speed = chart.speed_of(translator);
            if !(speed > chart.speed_of(querent) && speed > chart.speed_of(quesited)) {
                trace!("Translation by {translator}: not faster than both significators");
                return None;
            }
        }

        if -sep.timing > rules.max_lookback_days {
            trace!(
                "Translation by {translator}: separation {:.2}d ago exceeds lookback of {}d",
                -sep.timing,
                rules.max_lookback_days
            );
            return None;
        }

        let receiver = app.target;
        let next = self
            .kernel
            .find_earliest_application(chart, translator, window_days, &[sep.target]);
        match next {
            Some(next) if next.target == receiver && (next.timing - app.timing).abs() <= EPS => {}
            other => {
                trace!(
                    "Translation by {translator}: next application is {:?}, not {receiver}",
                    other.map(|n| n.target)
                );
                return None;
            }
        }

        let t_complete = app.timing;
        for other in Self::third_bodies(&[translator, querent, quesited]) {
            let Some(cut) = self.kernel.find_applying_aspect(chart, other, receiver, window_days, None) else {
                continue;
            };
            if cut.timing > 0.0 && cut.timing < t_complete {
                debug!(
                    "Translation by {translator} abscised: {other} reaches {receiver} in {:.2}d",
                    cut.timing
                );
                return Some(
                    PerfectionEvent::new(
                        EventFamily::Abscission,
                        querent,
                        quesited,
                        format!(
                            "Abscission: {other} perfects with {receiver} before translation by {translator} completes"
                        ),
                    )
                    .mediator(other)
                    .aspect(cut.aspect)
                    .at(cut.timing)
                    .favorable(false)
                    .confidence(self.config.confidence.abscission)
                    .meta("receiver", receiver)
                    .meta("interceptor", other)
                    .meta("abscises_translator", translator),
                );
            }
        }

        let recept_app = self.reception(chart, translator, app.target);
        if rules.require_reception && !recept_app.has_reception() {
            trace!("Translation by {translator}: no reception on the second leg");
            return None;
        }
        let recept_sep = self.reception(chart, translator, sep.target);

        let mut favorable = true;
        let mut challenges = Vec::new();
        let mut quality_tags = vec![tags::TRANSLATION.to_string()];
        if app.aspect.is_hard() && !recept_app.has_reception() {
            favorable = false;
            challenges.push(tags::HARD_SECOND_LEG_NO_RECEPTION.to_string());
            quality_tags.push(tags::HOSTILE.to_string());
        }
        if recept_sep.kind == ReceptionKind::DetrimentOrFallAgainst {
            challenges.push(tags::ANTI_RECEPTION_FIRST_LEG.to_string());
        }

        let base = self.config.confidence.translation_of_light;
        let confidence = if favorable { base } else { (base - 20).max(20) };
        debug!(
            "Translation by {translator}: {} -> {} in {:.2}d, favorable={favorable}",
            sep.target, app.target, app.timing
        );

        let reception = self.reception(chart, querent, quesited);
        Some(
            PerfectionEvent::new(
                EventFamily::Translation,
                querent,
                quesited,
                format!("Translation by {translator}"),
            )
            .mediator(translator)
            .reception(reception)
            .at(app.timing)
            .favorable(favorable)
            .confidence(confidence)
            .challenges(challenges)
            .quality_tags(quality_tags)
            .meta("separation", sep)
            .meta("application", app),
        )
    }
}

//! Shooting statistics aggregation.
//!
//! A pure fold over the final event list. The summary is rebuilt from
//! scratch on every call, so it can never drift from the events.

use courtvision_model::shot::{ShotEvent, ShotOutcome, ZoneName};
use courtvision_model::stats::{percentage, AnalysisSummary, AnalysisWarning, ZoneStats};

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    attempts: u32,
    makes: u32,
    misses: u32,
}

impl Tally {
    fn add(&mut self, outcome: ShotOutcome) {
        self.attempts += 1;
        match outcome {
            ShotOutcome::Make => self.makes += 1,
            ShotOutcome::Miss => self.misses += 1,
            ShotOutcome::Unknown => {}
        }
    }

    /// Percentage over classified attempts only.
    fn classified_percentage(&self) -> f64 {
        percentage(self.makes, self.makes + self.misses)
    }
}

/// Folds shot events into an [`AnalysisSummary`].
#[derive(Debug, Clone)]
pub struct StatisticsAggregator {
    hot_zone_min_attempts: u32,
}

impl StatisticsAggregator {
    pub fn new(hot_zone_min_attempts: usize) -> Self {
        Self {
            hot_zone_min_attempts: u32::try_from(hot_zone_min_attempts).unwrap_or(u32::MAX),
        }
    }

    pub fn summarize(&self, events: &[ShotEvent]) -> AnalysisSummary {
        self.summarize_with_warnings(events, Vec::new())
    }

    pub fn summarize_with_warnings(
        &self,
        events: &[ShotEvent],
        warnings: Vec<AnalysisWarning>,
    ) -> AnalysisSummary {
        let mut overall = Tally::default();
        let mut threes = Tally::default();
        // Indexed by declaration order, which is also `ZoneName::ALL` order.
        let mut by_zone = [Tally::default(); ZoneName::ALL.len()];

        for event in events {
            overall.add(event.outcome);
            if event.zone.is_three_point() {
                threes.add(event.outcome);
            }
            by_zone[event.zone as usize].add(event.outcome);
        }

        let zones: Vec<ZoneStats> = ZoneName::ALL
            .iter()
            .zip(by_zone.iter())
            .map(|(zone, tally)| ZoneStats {
                zone: *zone,
                name: zone.label().to_string(),
                attempts: tally.attempts,
                makes: tally.makes,
                percentage: percentage(tally.makes, tally.attempts),
            })
            .collect();

        let hot_zone = self.hot_zone(&zones);

        AnalysisSummary {
            total_shots: overall.attempts,
            makes: overall.makes,
            misses: overall.misses,
            unknown: overall.attempts - overall.makes - overall.misses,
            field_goal_percentage: overall.classified_percentage(),
            three_point_attempts: threes.attempts,
            three_point_makes: threes.makes,
            three_point_percentage: threes.classified_percentage(),
            hot_zone,
            zones,
            warnings,
        }
    }

    /// Best percentage among zones with enough attempts; earlier zones win
    /// ties. Out-of-bounds shots are never hot.
    fn hot_zone(&self, zones: &[ZoneStats]) -> Option<ZoneName> {
        zones
            .iter()
            .filter(|z| z.zone != ZoneName::OutOfBounds)
            .filter(|z| z.attempts > 0 && z.attempts >= self.hot_zone_min_attempts)
            .fold(None, |best: Option<&ZoneStats>, z| match best {
                Some(b) if b.percentage >= z.percentage => Some(b),
                _ => Some(z),
            })
            .map(|z| z.zone)
    }
}

//! Explicit widget state.
//!
//! Holds the confirmed configuration, the session counter and the latest
//! snapshot. The owner of a `Widget` drives it: `confirm` on setup, `tick`
//! once per second, `reset` to go back to setup.

use chrono::NaiveDateTime;
use log::{debug, info};
use std::time::Instant;

use crate::config::Configuration;
use crate::error::Result;
use crate::i18n::{labels, Labels, Language};
use crate::pay_cycle::{compute_earnings, EarningsSnapshot};
use crate::session::SessionCounter;

#[derive(Debug, Clone)]
struct Tracking {
    config: Configuration,
    session: SessionCounter,
    snapshot: EarningsSnapshot,
    session_earned: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Widget {
    language: Language,
    tracking: Option<Tracking>,
}

/// Borrowed view of a tracking widget for rendering.
#[derive(Debug, Clone, Copy)]
pub struct WidgetView<'a> {
    pub config: &'a Configuration,
    pub snapshot: &'a EarningsSnapshot,
    pub session_earned: f64,
    pub session: SessionCounter,
    pub language: Language,
    pub labels: &'static Labels,
}

impl Widget {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            tracking: None,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn toggle_language(&mut self) -> Language {
        self.language = self.language.toggled();
        debug!("Language switched to {}", self.language);
        self.language
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    /// Starts tracking `config`. The session clock starts at `now`.
    ///
    /// # Arguments
    /// * `wall` - Local wall-clock time used for the pay cycle
    /// * `now` - Monotonic instant used for the session counter
    pub fn confirm(
        &mut self,
        config: Configuration,
        wall: NaiveDateTime,
        now: Instant,
    ) -> Result<&EarningsSnapshot> {
        let snapshot = compute_earnings(config.monthly_amount(), config.pay_day, wall)?;
        info!(
            "Tracking {} ({}), pay day {}, cycle {} -> {}",
            config.caption(),
            config.currency,
            config.pay_day,
            snapshot.cycle_start,
            snapshot.cycle_end
        );

        let tracking = self.tracking.insert(Tracking {
            config,
            session: SessionCounter::start(now),
            snapshot,
            session_earned: 0.0,
        });
        Ok(&tracking.snapshot)
    }

    /// Drops the configuration and session. Returns the discarded configuration.
    pub fn reset(&mut self) -> Option<Configuration> {
        let discarded = self.tracking.take().map(|tracking| tracking.config);
        if discarded.is_some() {
            info!("Widget reset, returning to setup");
        }
        discarded
    }

    /// Recomputes the snapshot and session counter from scratch.
    ///
    /// Returns `Ok(false)` when there is nothing to track.
    pub fn tick(&mut self, wall: NaiveDateTime, now: Instant) -> Result<bool> {
        let Some(tracking) = self.tracking.as_mut() else {
            return Ok(false);
        };

        let snapshot = compute_earnings(
            tracking.config.monthly_amount(),
            tracking.config.pay_day,
            wall,
        )?;
        tracking.session_earned = tracking.session.earned(now, snapshot.rates.per_second);
        tracking.snapshot = snapshot;
        Ok(true)
    }

    pub fn view(&self) -> Option<WidgetView<'_>> {
        self.tracking.as_ref().map(|tracking| WidgetView {
            config: &tracking.config,
            snapshot: &tracking.snapshot,
            session_earned: tracking.session_earned,
            session: tracking.session,
            language: self.language,
            labels: labels(self.language),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PayDay, SalaryAmount, SalaryKind};
    use crate::money::Currency;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn config(amount: f64) -> Configuration {
        Configuration::new(
            SalaryAmount::new(amount).unwrap(),
            SalaryKind::Net,
            Currency::TL,
            PayDay::new(1),
        )
    }

    fn wall(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_idle_widget_does_not_tick() {
        let mut widget = Widget::new(Language::En);
        assert!(!widget.tick(wall(2, 0), Instant::now()).unwrap());
        assert!(widget.view().is_none());
    }

    #[test]
    fn test_confirm_tick_and_reset() {
        let start = Instant::now();
        let mut widget = Widget::new(Language::Tr);

        let snapshot = widget.confirm(config(2592000.0), wall(16, 0), start).unwrap();
        assert_eq!(snapshot.percent(), 50);
        assert_eq!(widget.view().unwrap().session_earned, 0.0);

        // 2,592,000 / (30 * 86400) = 1 per second
        assert!(widget.tick(wall(16, 0), start + Duration::from_secs(10)).unwrap());
        let view = widget.view().unwrap();
        assert!((view.session_earned - 10.0).abs() < 1e-9);
        assert_eq!(view.labels.live, "CANLI");

        let discarded = widget.reset().unwrap();
        assert_eq!(discarded.monthly_amount(), 2592000.0);
        assert!(!widget.is_tracking());
        assert!(widget.reset().is_none());
    }

    #[test]
    fn test_session_restarts_after_reset() {
        let start = Instant::now();
        let mut widget = Widget::new(Language::En);
        widget.confirm(config(1000.0), wall(2, 0), start).unwrap();
        widget.reset();

        let later = start + Duration::from_secs(60);
        widget.confirm(config(1000.0), wall(2, 0), later).unwrap();
        widget.tick(wall(2, 0), later).unwrap();
        assert_eq!(widget.view().unwrap().session_earned, 0.0);
    }

    #[test]
    fn test_language_toggle_leaves_numbers_alone() {
        let start = Instant::now();
        let mut widget = Widget::new(Language::Tr);
        widget.confirm(config(1000.0), wall(10, 12), start).unwrap();
        let before = widget.view().unwrap().snapshot.clone();

        assert_eq!(widget.toggle_language(), Language::En);
        let view = widget.view().unwrap();
        assert_eq!(view.snapshot, &before);
        assert_eq!(view.labels.live, "LIVE");
    }
}

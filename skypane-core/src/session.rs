//! The one live snapshot, the unit flag and the applied background, plus the
//! request tickets that keep an older response from replacing a newer one.

use chrono::NaiveTime;

use crate::{
    background::select_background,
    model::WeatherSnapshot,
    present::{PageRegions, render},
};

/// Issued when a load starts; only the most recent ticket may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// Class swap for the page body: drop `remove` (if any), add `add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundChange {
    pub remove: Option<String>,
    pub add: String,
}

#[derive(Debug, Default)]
pub struct Session {
    snapshot: Option<WeatherSnapshot>,
    metric: bool,
    background: Option<String>,
    issued: u64,
}

impl Session {
    pub fn new(metric: bool) -> Self {
        Self { metric, ..Self::default() }
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn metric(&self) -> bool {
        self.metric
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub fn begin_request(&mut self) -> RequestTicket {
        self.issued += 1;
        RequestTicket(self.issued)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Installs `snapshot` as the live one if `ticket` is still the latest
    /// request, and returns the background swap to apply. A stale ticket
    /// changes nothing and returns `None`.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        snapshot: WeatherSnapshot,
        now: NaiveTime,
    ) -> Option<BackgroundChange> {
        if !self.is_current(ticket) {
            tracing::debug!(ticket = ticket.0, latest = self.issued, "discarding stale response");
            return None;
        }

        let add = select_background(&snapshot, now).class_name();
        let remove = self.background.replace(add.clone());
        self.snapshot = Some(snapshot);

        Some(BackgroundChange { remove, add })
    }

    /// Flips between Fahrenheit and Celsius and returns the new setting.
    pub fn toggle_units(&mut self) -> bool {
        self.metric = !self.metric;
        self.metric
    }

    /// Renders the live snapshot in the current units, `None` before the first load.
    pub fn regions(&self) -> Option<PageRegions> {
        render(self.snapshot.as_ref(), self.metric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{snapshot_from_channel, tests::philadelphia};

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    fn snapshot(city: &str) -> WeatherSnapshot {
        let mut s = snapshot_from_channel(philadelphia()).unwrap();
        s.location.city = city.into();
        s
    }

    #[test]
    fn nothing_to_display_before_first_load() {
        let session = Session::new(false);
        assert!(session.regions().is_none());
        assert!(session.snapshot().is_none());
    }

    #[test]
    fn latest_ticket_wins_even_if_it_lands_first() {
        let mut session = Session::new(false);
        let older = session.begin_request();
        let newer = session.begin_request();

        assert!(session.complete(newer, snapshot("Pittsburgh"), noon()).is_some());
        assert!(session.complete(older, snapshot("Philadelphia"), noon()).is_none());

        assert_eq!(session.snapshot().unwrap().location.city, "Pittsburgh");
    }

    #[test]
    fn background_change_removes_previous_class() {
        let mut session = Session::new(false);

        let t = session.begin_request();
        let first = session.complete(t, snapshot("Philadelphia"), noon()).unwrap();
        assert_eq!(first, BackgroundChange { remove: None, add: "dayClouds".into() });

        let mut rainy = snapshot("Philadelphia");
        rainy.currently.code = "11".into();
        let t = session.begin_request();
        let second = session.complete(t, rainy, noon()).unwrap();
        assert_eq!(second.remove.as_deref(), Some("dayClouds"));
        assert_eq!(second.add, "dayRain");
        assert_eq!(session.background(), Some("dayRain"));
    }

    #[test]
    fn toggling_units_rerenders_same_snapshot() {
        let mut session = Session::new(false);
        let t = session.begin_request();
        session.complete(t, snapshot("Philadelphia"), noon());

        let imperial = session.regions().unwrap();
        assert!(session.toggle_units());
        let metric = session.regions().unwrap();

        assert!(imperial.current_temp.contains(">89<"));
        assert!(metric.current_temp.contains(">32<"));
        assert!(!session.toggle_units());
        assert_eq!(session.regions().unwrap(), imperial);
    }
}

//! Reading analytics: the event payloads posted to the collector and the dwell
//! timer that produces `dwell_time` samples.

use serde::{Deserialize, Serialize};

use crate::navigation::Direction;

pub const EVENT_CATEGORY: &str = "book";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PageViewEvent {
    pub page_id: String,
    pub page_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DwellTimeEvent {
    pub page_id: String,
    pub page_number: u32,
    /// Whole seconds.
    pub dwell_time: u64,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationEvent {
    pub from_page_id: String,
    pub to_page_id: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
}

const MISSING_FIELDS: &str = "Missing required fields";

fn check_page(page_id: &str, page_number: u32, timestamp: &str) -> Result<(), &'static str> {
    if page_id.is_empty() || page_number == 0 || timestamp.is_empty() {
        return Err(MISSING_FIELDS);
    }
    Ok(())
}

impl PageViewEvent {
    pub fn validate(&self) -> Result<(), &'static str> {
        check_page(&self.page_id, self.page_number, &self.timestamp)
    }

    pub fn label(&self) -> String {
        format!(
            "Page {}: {}",
            self.page_number,
            self.page_title.as_deref().unwrap_or("")
        )
    }
}

impl DwellTimeEvent {
    pub fn validate(&self) -> Result<(), &'static str> {
        check_page(&self.page_id, self.page_number, &self.timestamp)
    }

    pub fn label(&self) -> String {
        format!("Page {}", self.page_number)
    }
}

impl NavigationEvent {
    pub fn label(&self) -> String {
        format!(
            "{}: {} -> {}",
            self.direction.as_str(),
            self.from_page_id,
            self.to_page_id
        )
    }
}

/// Rounds a millisecond duration to whole seconds, half up.
pub fn to_seconds(elapsed_ms: u64) -> u64 {
    (elapsed_ms + 500) / 1000
}

/// Tracks how long a page has been visible. The clock is injected in
/// milliseconds so the browser and tests drive it the same way.
///
/// Every `hidden` and `finish` call while visible yields an independent sample;
/// a visit can therefore report several.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DwellTimer {
    visible_since: Option<u64>,
}

impl DwellTimer {
    /// A page mounted in a background tab starts hidden and only begins
    /// counting on its first `visible` call.
    pub fn start(now_ms: u64, visible: bool) -> Self {
        Self {
            visible_since: visible.then_some(now_ms),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible_since.is_some()
    }

    /// Page was hidden. Returns the sample in seconds if it had been visible.
    pub fn hidden(&mut self, now_ms: u64) -> Option<u64> {
        let since = self.visible_since.take()?;
        Some(to_seconds(now_ms.saturating_sub(since)))
    }

    pub fn visible(&mut self, now_ms: u64) {
        if self.visible_since.is_none() {
            self.visible_since = Some(now_ms);
        }
    }

    /// Page is being left. Same sampling rule as `hidden`.
    pub fn finish(&mut self, now_ms: u64) -> Option<u64> {
        self.hidden(now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_to_seconds() {
        assert_eq!(to_seconds(0), 0);
        assert_eq!(to_seconds(499), 0);
        assert_eq!(to_seconds(500), 1);
        assert_eq!(to_seconds(12_340), 12);
    }

    #[test]
    fn hide_then_leave_reports_once() {
        let mut timer = DwellTimer::start(1_000, true);
        assert_eq!(timer.hidden(6_000), Some(5));
        assert!(!timer.is_visible());
        assert_eq!(timer.finish(9_000), None);
    }

    #[test]
    fn becoming_visible_again_starts_a_new_sample() {
        let mut timer = DwellTimer::start(0, true);
        assert_eq!(timer.hidden(2_000), Some(2));
        timer.visible(10_000);
        assert_eq!(timer.finish(13_400), Some(3));
    }

    #[test]
    fn repeated_visible_does_not_reset() {
        let mut timer = DwellTimer::start(0, true);
        timer.visible(5_000);
        assert_eq!(timer.finish(8_000), Some(8));
    }

    #[test]
    fn mounted_hidden_counts_from_first_visible() {
        let mut timer = DwellTimer::start(0, false);
        assert!(!timer.is_visible());
        timer.visible(60_000);
        assert_eq!(timer.finish(65_000), Some(5));
    }

    #[test]
    fn mounted_hidden_and_never_shown_reports_nothing() {
        let mut timer = DwellTimer::start(0, false);
        assert_eq!(timer.hidden(4_000), None);
        assert_eq!(timer.finish(9_000), None);
    }

    #[test]
    fn page_view_validation() {
        let mut event = PageViewEvent {
            page_id: "page-1".into(),
            page_number: 1,
            page_title: None,
            timestamp: "2026-01-01T00:00:00Z".into(),
        };
        assert!(event.validate().is_ok());
        assert_eq!(event.label(), "Page 1: ");
        event.page_number = 0;
        assert_eq!(event.validate(), Err("Missing required fields"));
    }

    #[test]
    fn dwell_event_requires_all_fields_on_the_wire() {
        let raw = r#"{"pageId":"page-1","pageNumber":1,"timestamp":"t"}"#;
        assert!(serde_json::from_str::<DwellTimeEvent>(raw).is_err());
        let raw = r#"{"pageId":"page-1","pageNumber":1,"dwellTime":4,"timestamp":"t"}"#;
        let event: DwellTimeEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.dwell_time, 4);
        assert_eq!(event.label(), "Page 1");
    }

    #[test]
    fn navigation_label() {
        let event = NavigationEvent {
            from_page_id: "page-1".into(),
            to_page_id: "page-2".into(),
            direction: Direction::Next,
        };
        assert_eq!(event.label(), "next: page-1 -> page-2");
    }
}

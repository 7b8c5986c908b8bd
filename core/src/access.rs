//! Client-held access flag and the gate that every protected view consults.
//!
//! Nothing here touches browser APIs directly. Persistence goes through
//! [`FlagStore`] so the same decisions run in the browser (local storage) and
//! in tests (an in-memory map).

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{DateTime, Utc};

pub const SIGNED_UP_KEY: &str = "brand-attention-strategy-signed-up";
pub const SIGNUP_DATE_KEY: &str = "brand-attention-strategy-signup-date";
pub const COOKIE_CONSENT_KEY: &str = "cookie-consent";

/// Route visitors are sent to when they have not qualified yet.
pub const ENTRY_POINT: &str = "/";

/// String key/value persistence owned by the visitor's browser.
pub trait FlagStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessFlag {
    pub signed_up: bool,
    pub signed_up_at: Option<DateTime<Utc>>,
}

impl AccessFlag {
    pub fn read(store: &dyn FlagStore) -> Self {
        let signed_up = store.get(SIGNED_UP_KEY).as_deref() == Some("true");
        let signed_up_at = store
            .get(SIGNUP_DATE_KEY)
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|at| at.with_timezone(&Utc));
        Self {
            signed_up,
            signed_up_at,
        }
    }

    fn write(&self, store: &dyn FlagStore) {
        store.set(SIGNED_UP_KEY, if self.signed_up { "true" } else { "false" });
        if let Some(at) = self.signed_up_at {
            store.set(SIGNUP_DATE_KEY, &at.to_rfc3339());
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CookieConsent {
    #[default]
    Unset,
    Accepted,
    Rejected,
}

impl CookieConsent {
    pub fn read(store: &dyn FlagStore) -> Self {
        match store.get(COOKIE_CONSENT_KEY).as_deref() {
            Some("accepted") => CookieConsent::Accepted,
            Some("rejected") => CookieConsent::Rejected,
            _ => CookieConsent::Unset,
        }
    }

    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            CookieConsent::Unset => None,
            CookieConsent::Accepted => Some("accepted"),
            CookieConsent::Rejected => Some("rejected"),
        }
    }
}

/// Everything the visitor's browser remembers about them, read once and passed
/// explicitly to gates, links and the navigation resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    pub access: AccessFlag,
    pub consent: CookieConsent,
}

impl Session {
    pub fn read(store: &dyn FlagStore) -> Self {
        Self {
            access: AccessFlag::read(store),
            consent: CookieConsent::read(store),
        }
    }

    pub fn has_access(&self) -> bool {
        self.access.signed_up
    }

    /// Records a completed qualification. The flag is never cleared afterwards.
    pub fn grant(&mut self, store: &dyn FlagStore, now: DateTime<Utc>) {
        self.access = AccessFlag {
            signed_up: true,
            signed_up_at: Some(now),
        };
        self.access.write(store);
    }

    pub fn set_consent(&mut self, store: &dyn FlagStore, consent: CookieConsent) {
        if let Some(value) = consent.as_str() {
            store.set(COOKIE_CONSENT_KEY, value);
        }
        self.consent = consent;
    }

    pub fn analytics_allowed(&self) -> bool {
        self.consent == CookieConsent::Accepted
    }

    pub fn show_cookie_banner(&self) -> bool {
        self.consent == CookieConsent::Unset
    }

    /// Where a protected link to `target` should actually go.
    pub fn guard(&self, target: &str) -> LinkOutcome {
        if self.has_access() {
            LinkOutcome::Proceed(target.to_string())
        } else {
            LinkOutcome::Redirect(ENTRY_POINT.to_string())
        }
    }

    /// Start-reading entry point: straight in, or through the qualification form.
    pub fn start_reading(&self, first_page_href: &str) -> StartReading {
        if self.has_access() {
            StartReading::Navigate(first_page_href.to_string())
        } else {
            StartReading::Qualify {
                redirect_to: first_page_href.to_string(),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Unknown,
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Nothing is rendered yet.
    Pending,
    Render,
    /// Render nothing and send the visitor to the given route.
    Redirect(String),
}

/// Per-view gate. Starts `Unknown` and settles once the session is read on mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    state: GateState,
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

impl Gate {
    pub fn new() -> Self {
        Self {
            state: GateState::Unknown,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn evaluate(&mut self, session: &Session) -> GateDecision {
        self.state = if session.has_access() {
            GateState::Granted
        } else {
            GateState::Denied
        };
        self.decision()
    }

    pub fn decision(&self) -> GateDecision {
        match self.state {
            GateState::Unknown => GateDecision::Pending,
            GateState::Granted => GateDecision::Render,
            GateState::Denied => GateDecision::Redirect(ENTRY_POINT.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    Proceed(String),
    Redirect(String),
}

impl LinkOutcome {
    pub fn href(&self) -> &str {
        match self {
            LinkOutcome::Proceed(href) | LinkOutcome::Redirect(href) => href,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartReading {
    Navigate(String),
    Qualify { redirect_to: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn empty_store_denies() {
        let store = MemoryStore::new();
        let session = Session::read(&store);
        let mut gate = Gate::new();
        assert_eq!(gate.decision(), GateDecision::Pending);
        assert_eq!(gate.evaluate(&session), GateDecision::Redirect("/".into()));
        assert_eq!(gate.state(), GateState::Denied);
    }

    #[test]
    fn only_literal_true_grants() {
        let store = MemoryStore::new();
        store.set(SIGNED_UP_KEY, "yes");
        assert!(!Session::read(&store).has_access());
        store.set(SIGNED_UP_KEY, "true");
        assert!(Session::read(&store).has_access());
    }

    #[test]
    fn grant_persists_flag_and_timestamp() {
        let store = MemoryStore::new();
        let mut session = Session::read(&store);
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        session.grant(&store, now);

        assert_eq!(store.get(SIGNED_UP_KEY).as_deref(), Some("true"));
        let reread = Session::read(&store);
        assert!(reread.has_access());
        assert_eq!(reread.access.signed_up_at, Some(now));

        let mut gate = Gate::new();
        assert_eq!(gate.evaluate(&reread), GateDecision::Render);
    }

    #[test]
    fn protected_links_redirect_until_granted() {
        let store = MemoryStore::new();
        let mut session = Session::read(&store);
        assert_eq!(
            session.guard("/book/page-2"),
            LinkOutcome::Redirect("/".into())
        );
        session.grant(&store, Utc::now());
        assert_eq!(
            session.guard("/book/page-2"),
            LinkOutcome::Proceed("/book/page-2".into())
        );
    }

    #[test]
    fn start_reading_opens_qualification_first() {
        let store = MemoryStore::new();
        let mut session = Session::read(&store);
        assert_eq!(
            session.start_reading("/book/page-1"),
            StartReading::Qualify {
                redirect_to: "/book/page-1".into()
            }
        );
        session.grant(&store, Utc::now());
        assert_eq!(
            session.start_reading("/book/page-1"),
            StartReading::Navigate("/book/page-1".into())
        );
    }

    #[test]
    fn consent_round_trips_through_store() {
        let store = MemoryStore::new();
        let mut session = Session::read(&store);
        assert!(session.show_cookie_banner());
        assert!(!session.analytics_allowed());

        session.set_consent(&store, CookieConsent::Accepted);
        let reread = Session::read(&store);
        assert!(reread.analytics_allowed());
        assert!(!reread.show_cookie_banner());

        let mut session = reread;
        session.set_consent(&store, CookieConsent::Rejected);
        assert_eq!(Session::read(&store).consent, CookieConsent::Rejected);
    }

    #[test]
    fn consent_changed_mid_visit_applies_to_later_events() {
        let store = MemoryStore::new();
        let mut session = Session::read(&store);
        session.set_consent(&store, CookieConsent::Accepted);
        let at_mount = session;
        assert!(at_mount.analytics_allowed());

        // the visitor withdraws consent before leaving the page
        session.set_consent(&store, CookieConsent::Rejected);
        assert!(!session.analytics_allowed());
        assert!(at_mount.analytics_allowed());
        assert!(!Session::read(&store).analytics_allowed());
    }
}

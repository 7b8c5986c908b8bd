//! Three-step qualification form: email, then name, then profile questions.
//!
//! Steps only move forward through a validated submit; `back` keeps every
//! value already entered. A filled honeypot drops the submit without a trace.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::access::{FlagStore, Session};
use crate::subscription::SubscribeRequest;

/// How long the success message stays up before the visitor is sent on.
pub const REDIRECT_DELAY_MS: u32 = 1_500;

pub const SUCCESS_MESSAGE: &str = "Thank you for subscribing! Redirecting to the book...";

static STEP_EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$")
        .case_insensitive(true)
        .build()
        .expect("email pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

const fn choice(value: &'static str, label: &'static str) -> Choice {
    Choice { value, label }
}

pub const ROLES: &[Choice] = &[
    choice("founder-ceo", "Founder / CEO"),
    choice("scientific-founder-cso", "Scientific Founder / CSO"),
    choice("operations-commercial", "Operations / Commercial Lead"),
    choice("investor-board", "Investor / Board Member"),
    choice("aspiring-founder", "Aspiring Founder / Researcher"),
];

pub const COMPANY_FOCUS: &[Choice] = &[
    choice("rd-discovery", "R&D / Early-Stage Discovery"),
    choice("pre-seed-seed", "Pre-Seed / Seed Fundraising"),
    choice("series-a-scaling", "Series A+ Scaling"),
    choice("commercial-validation", "Commercial Validation & Partnerships"),
    choice("clinical-regulatory", "Clinical Trials / Regulatory Approval"),
];

pub const BIGGEST_CHALLENGES: &[Choice] = &[
    choice(
        "attention",
        "Attention: Building a brand to attract top-tier talent or investors.",
    ),
    choice(
        "trajectory",
        "Trajectory: Deciding whether to pivot, persevere, or raise capital.",
    ),
    choice(
        "culture",
        "Culture: Bridging the gap between our technical and business teams.",
    ),
    choice(
        "gains",
        "Gains: Securing our first revenue-generating partners or customers.",
    ),
];

pub const TEAM_SIZES: &[Choice] = &[
    choice("solo-duo", "Solo Founder / Duo"),
    choice("3-10", "3–10 (The Core Team)"),
    choice("11-50", "11–50 (The Scaling Phase)"),
    choice("51-plus", "51+ (The Principles-Led Organization)"),
];

pub const REFERRAL_SOURCES: &[Choice] = &[
    choice("linkedin", "LinkedIn / Founder Brand"),
    choice("podcast", "Podcast Episode"),
    choice("referral", "Personal Referral"),
    choice("event", "Speaking Event / Webinar"),
    choice("search", "Search Engine"),
    choice("other", "Other"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Email,
    Name,
    Profile,
}

impl Step {
    pub fn number(&self) -> u8 {
        match self {
            Step::Email => 1,
            Step::Name => 2,
            Step::Profile => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::Email => "Get Started",
            Step::Name => "Tell Us About Yourself",
            Step::Profile => "Almost There",
        }
    }

    pub fn shows_progress(&self) -> bool {
        *self != Step::Email
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    FirstName,
    Role,
    CompanyFocus,
    BiggestChallenge,
    TeamSize,
    ReferralSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Values accumulated across the steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub company_focus: Option<String>,
    pub biggest_challenge: Option<String>,
    pub team_size: Option<String>,
    pub referral_source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailInput {
    pub email: String,
    pub honeypot: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameInput {
    pub first_name: String,
    pub last_name: String,
    pub honeypot: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileInput {
    pub role: String,
    pub company_focus: String,
    pub biggest_challenge: String,
    pub team_size: String,
    pub referral_source: String,
    pub honeypot: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced(Step),
    Invalid,
    /// Dropped without a state change (honeypot, wrong step, busy).
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalOutcome {
    /// Send this to `/api/subscribe`, then report back with
    /// `submission_succeeded` or `submission_failed`.
    Submit(SubscribeRequest),
    Invalid,
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: String,
    pub delay_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualificationFlow {
    step: Step,
    draft: Draft,
    errors: Vec<FieldError>,
    status: Status,
    redirect_to: String,
}

fn is_choice(options: &[Choice], value: &str) -> bool {
    options.iter().any(|option| option.value == value)
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Message for a non-success reply from `/api/subscribe`.
pub fn response_error(status: u16, body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => json
            .get("error")
            .and_then(|v| v.as_str())
            .or_else(|| json.get("message").and_then(|v| v.as_str()))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Server error: {}", status)),
        Err(_) => format!("Server error: {}", status),
    }
}

pub fn failure_message(reason: &str) -> String {
    format!(
        "Sorry, there was an error subscribing: {}. Please try again.",
        reason
    )
}

impl QualificationFlow {
    /// Opens the flow; `redirect_to` is the gated page the visitor asked for.
    pub fn new(redirect_to: impl Into<String>) -> Self {
        Self {
            step: Step::Email,
            draft: Draft::default(),
            errors: Vec::new(),
            status: Status::Idle,
            redirect_to: redirect_to.into(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn error_for(&self, field: Field) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == Status::Submitting
    }

    pub fn redirect_to(&self) -> &str {
        &self.redirect_to
    }

    pub fn submit_email(&mut self, input: EmailInput) -> StepOutcome {
        if !input.honeypot.is_empty() || self.step != Step::Email {
            return StepOutcome::Ignored;
        }

        self.errors.clear();
        if input.email.is_empty() {
            self.reject(Field::Email, "Email is required");
            return StepOutcome::Invalid;
        }
        if !STEP_EMAIL_RE.is_match(&input.email) {
            self.reject(Field::Email, "Invalid email address");
            return StepOutcome::Invalid;
        }

        self.draft.email = Some(input.email);
        self.step = Step::Name;
        StepOutcome::Advanced(self.step)
    }

    pub fn submit_name(&mut self, input: NameInput) -> StepOutcome {
        if !input.honeypot.is_empty() || self.step != Step::Name {
            return StepOutcome::Ignored;
        }

        self.errors.clear();
        if input.first_name.is_empty() {
            self.reject(Field::FirstName, "First name is required");
            return StepOutcome::Invalid;
        }
        if input.first_name.chars().count() < 2 {
            self.reject(Field::FirstName, "First name must be at least 2 characters");
            return StepOutcome::Invalid;
        }

        self.draft.first_name = Some(input.first_name);
        self.draft.last_name = optional(&input.last_name);
        self.step = Step::Profile;
        StepOutcome::Advanced(self.step)
    }

    pub fn submit_profile(&mut self, input: ProfileInput) -> FinalOutcome {
        if !input.honeypot.is_empty() || self.step != Step::Profile {
            return FinalOutcome::Ignored;
        }
        if matches!(self.status, Status::Submitting | Status::Succeeded(_)) {
            return FinalOutcome::Ignored;
        }

        self.errors.clear();
        let checks: [(Field, &[Choice], &str, &'static str); 5] = [
            (Field::Role, ROLES, input.role.as_str(), "Please select your role"),
            (
                Field::CompanyFocus,
                COMPANY_FOCUS,
                input.company_focus.as_str(),
                "Please select company focus",
            ),
            (
                Field::BiggestChallenge,
                BIGGEST_CHALLENGES,
                input.biggest_challenge.as_str(),
                "Please select your biggest challenge",
            ),
            (Field::TeamSize, TEAM_SIZES, input.team_size.as_str(), "Please select team size"),
            (
                Field::ReferralSource,
                REFERRAL_SOURCES,
                input.referral_source.as_str(),
                "Please select how you heard about us",
            ),
        ];
        for (field, options, value, message) in checks {
            if !is_choice(options, value) {
                self.errors.push(FieldError { field, message });
            }
        }

        // Answers are kept even when some are missing so the form can re-fill.
        self.draft.role = optional(&input.role);
        self.draft.company_focus = optional(&input.company_focus);
        self.draft.biggest_challenge = optional(&input.biggest_challenge);
        self.draft.team_size = optional(&input.team_size);
        self.draft.referral_source = optional(&input.referral_source);

        if !self.errors.is_empty() {
            return FinalOutcome::Invalid;
        }

        self.status = Status::Submitting;
        FinalOutcome::Submit(self.request())
    }

    /// The request body built from the draft.
    pub fn request(&self) -> SubscribeRequest {
        let draft = &self.draft;
        SubscribeRequest {
            email: draft.email.clone().unwrap_or_default(),
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            role: draft.role.clone(),
            company_focus: draft.company_focus.clone(),
            biggest_challenge: draft.biggest_challenge.clone(),
            team_size: draft.team_size.clone(),
            referral_source: draft.referral_source.clone(),
        }
    }

    /// Grants access and tells the caller where to go once the delay elapses.
    pub fn submission_succeeded(
        &mut self,
        session: &mut Session,
        store: &dyn FlagStore,
        now: DateTime<Utc>,
    ) -> Redirect {
        session.grant(store, now);
        self.status = Status::Succeeded(SUCCESS_MESSAGE.to_string());
        Redirect {
            to: self.redirect_to.clone(),
            delay_ms: REDIRECT_DELAY_MS,
        }
    }

    /// Stays on the profile step so the visitor can retry by hand.
    pub fn submission_failed(&mut self, reason: &str) {
        self.status = Status::Failed(failure_message(reason));
    }

    /// Steps back one form, keeping the draft. Disabled while a submission is
    /// in flight and after it succeeded.
    pub fn back(&mut self) {
        match self.status {
            Status::Submitting | Status::Succeeded(_) => return,
            Status::Failed(_) => self.status = Status::Idle,
            Status::Idle => {}
        }
        self.errors.clear();
        self.step = match self.step {
            Step::Email | Step::Name => Step::Email,
            Step::Profile => Step::Name,
        };
    }

    fn reject(&mut self, field: Field, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }
}

use bookgate_core::qualification::{
    response_error, Choice, EmailInput, Field, FinalOutcome, NameInput, ProfileInput, Status,
    Step, StepOutcome, BIGGEST_CHALLENGES, COMPANY_FOCUS, REFERRAL_SOURCES, ROLES, TEAM_SIZES,
};
use bookgate_core::subscription::SubscribeRequest;
use bookgate_core::QualificationFlow;
use chrono::Utc;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use log::{error, info};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::config;
use crate::session::use_session;
use crate::storage::BrowserStore;
use crate::route_for;

async fn send_subscription(request: &SubscribeRequest) -> Result<(), String> {
    let url = format!("{}/api/subscribe", config::get_backend_url());
    let response = Request::post(&url)
        .json(request)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.ok() {
        return Ok(());
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(response_error(status, &body))
}

fn bind_input(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

fn bind_select(state: &UseStateHandle<String>) -> Callback<Event> {
    let state = state.clone();
    Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        state.set(select.value());
    })
}

fn field_error(flow: &QualificationFlow, field: Field) -> Html {
    match flow.error_for(field) {
        Some(message) => html! { <p class="field-error" role="alert">{message}</p> },
        None => html! {},
    }
}

fn honeypot_field(state: &UseStateHandle<String>) -> Html {
    html! {
        <input
            type="text"
            name="website"
            class="honeypot"
            tabindex="-1"
            autocomplete="off"
            value={(**state).clone()}
            oninput={bind_input(state)}
        />
    }
}

struct Question {
    id: &'static str,
    label: &'static str,
    prompt: &'static str,
    options: &'static [Choice],
    field: Field,
}

const QUESTIONS: [Question; 5] = [
    Question {
        id: "role",
        label: "1. Which of these best describes your current role?",
        prompt: "Select your role",
        options: ROLES,
        field: Field::Role,
    },
    Question {
        id: "companyFocus",
        label: "2. What is your company's current primary focus?",
        prompt: "Select company focus",
        options: COMPANY_FOCUS,
        field: Field::CompanyFocus,
    },
    Question {
        id: "biggestChallenge",
        label: "3. What is your biggest challenge right now?",
        prompt: "Select your challenge",
        options: BIGGEST_CHALLENGES,
        field: Field::BiggestChallenge,
    },
    Question {
        id: "teamSize",
        label: "4. What is your current team size?",
        prompt: "Select team size",
        options: TEAM_SIZES,
        field: Field::TeamSize,
    },
    Question {
        id: "referralSource",
        label: "5. How did you first hear about The Brand Attention Strategy?",
        prompt: "Select referral source",
        options: REFERRAL_SOURCES,
        field: Field::ReferralSource,
    },
];

fn question(flow: &QualificationFlow, q: &Question, state: &UseStateHandle<String>) -> Html {
    let selected = (**state).clone();
    html! {
        <div class="form-field">
            <label for={q.id}>{q.label}{" "}<span class="required">{"*"}</span></label>
            <select id={q.id} onchange={bind_select(state)}>
                <option value="" selected={selected.is_empty()}>{q.prompt}</option>
                { for q.options.iter().map(|option| html! {
                    <option value={option.value} selected={selected == option.value}>
                        {option.label}
                    </option>
                }) }
            </select>
            { field_error(flow, q.field) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct QualificationModalProps {
    /// Gated page to open once the visitor has qualified.
    pub redirect_to: String,
    pub on_close: Callback<()>,
}

/// Mounted only while open, so closing it throws the draft away.
#[function_component(QualificationModal)]
pub fn qualification_modal(props: &QualificationModalProps) -> Html {
    let session = use_session();
    let navigator = use_navigator().unwrap();
    let flow = {
        let redirect_to = props.redirect_to.clone();
        use_state(move || QualificationFlow::new(redirect_to))
    };

    let email = use_state(String::new);
    let first_name = use_state(String::new);
    let last_name = use_state(String::new);
    let role = use_state(String::new);
    let company_focus = use_state(String::new);
    let biggest_challenge = use_state(String::new);
    let team_size = use_state(String::new);
    let referral_source = use_state(String::new);
    let honeypot = use_state(String::new);

    let on_email = {
        let flow = flow.clone();
        let email = email.clone();
        let honeypot = honeypot.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut next = (*flow).clone();
            let outcome = next.submit_email(EmailInput {
                email: email.trim().to_string(),
                honeypot: (*honeypot).clone(),
            });
            if outcome != StepOutcome::Ignored {
                flow.set(next);
            }
        })
    };

    let on_name = {
        let flow = flow.clone();
        let first_name = first_name.clone();
        let last_name = last_name.clone();
        let honeypot = honeypot.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut next = (*flow).clone();
            let outcome = next.submit_name(NameInput {
                first_name: first_name.trim().to_string(),
                last_name: last_name.trim().to_string(),
                honeypot: (*honeypot).clone(),
            });
            if outcome != StepOutcome::Ignored {
                flow.set(next);
            }
        })
    };

    let on_profile = {
        let flow = flow.clone();
        let session = session.clone();
        let navigator = navigator.clone();
        let on_close = props.on_close.clone();
        let answers = [
            role.clone(),
            company_focus.clone(),
            biggest_challenge.clone(),
            team_size.clone(),
            referral_source.clone(),
        ];
        let honeypot = honeypot.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut next = (*flow).clone();
            let input = ProfileInput {
                role: (*answers[0]).clone(),
                company_focus: (*answers[1]).clone(),
                biggest_challenge: (*answers[2]).clone(),
                team_size: (*answers[3]).clone(),
                referral_source: (*answers[4]).clone(),
                honeypot: (*honeypot).clone(),
            };
            match next.submit_profile(input) {
                FinalOutcome::Submit(request) => {
                    flow.set(next.clone());
                    let flow = flow.clone();
                    let session = session.clone();
                    let navigator = navigator.clone();
                    let on_close = on_close.clone();
                    spawn_local(async move {
                        let mut done = next;
                        match send_subscription(&request).await {
                            Ok(()) => {
                                let mut updated = session.session;
                                let redirect =
                                    done.submission_succeeded(&mut updated, &BrowserStore, Utc::now());
                                info!("Subscription succeeded, opening {}", redirect.to);
                                session.update.emit(updated);
                                flow.set(done);
                                TimeoutFuture::new(redirect.delay_ms).await;
                                navigator.push(&route_for(&redirect.to));
                                on_close.emit(());
                            }
                            Err(reason) => {
                                error!("Subscription error: {}", reason);
                                done.submission_failed(&reason);
                                flow.set(done);
                            }
                        }
                    });
                }
                FinalOutcome::Invalid => flow.set(next),
                FinalOutcome::Ignored => {}
            }
        })
    };

    let on_back = {
        let flow = flow.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*flow).clone();
            next.back();
            flow.set(next);
        })
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let step = flow.step();
    let progress = if step.shows_progress() {
        html! {
            <div class="step-progress">
                { for [Step::Email, Step::Name, Step::Profile].iter().map(|s| html! {
                    <span class={classes!("step-dot", (s.number() <= step.number()).then(|| "active"))}>
                        {s.number()}
                    </span>
                }) }
            </div>
        }
    } else {
        html! {}
    };

    let body = match step {
        Step::Email => html! {
            <form onsubmit={on_email}>
                { honeypot_field(&honeypot) }
                <div class="form-field">
                    <label for="qualification-email">
                        {"Email Address "}<span class="required">{"*"}</span>
                    </label>
                    <input
                        type="email"
                        id="qualification-email"
                        placeholder="Enter your email address"
                        value={(*email).clone()}
                        oninput={bind_input(&email)}
                    />
                    { field_error(&flow, Field::Email) }
                </div>
                <button type="submit" class="primary-button">{"Continue"}</button>
            </form>
        },
        Step::Name => html! {
            <form onsubmit={on_name}>
                { honeypot_field(&honeypot) }
                <div class="form-field">
                    <label for="qualification-first-name">
                        {"First Name "}<span class="required">{"*"}</span>
                    </label>
                    <input
                        type="text"
                        id="qualification-first-name"
                        placeholder="First name"
                        value={(*first_name).clone()}
                        oninput={bind_input(&first_name)}
                    />
                    { field_error(&flow, Field::FirstName) }
                </div>
                <div class="form-field">
                    <label for="qualification-last-name">{"Last Name"}</label>
                    <input
                        type="text"
                        id="qualification-last-name"
                        placeholder="Last name"
                        value={(*last_name).clone()}
                        oninput={bind_input(&last_name)}
                    />
                </div>
                <div class="form-actions">
                    <button type="button" class="secondary-button" onclick={on_back.clone()}>{"Back"}</button>
                    <button type="submit" class="primary-button">{"Continue"}</button>
                </div>
            </form>
        },
        Step::Profile => html! {
            <form onsubmit={on_profile}>
                { honeypot_field(&honeypot) }
                { question(&flow, &QUESTIONS[0], &role) }
                { question(&flow, &QUESTIONS[1], &company_focus) }
                { question(&flow, &QUESTIONS[2], &biggest_challenge) }
                { question(&flow, &QUESTIONS[3], &team_size) }
                { question(&flow, &QUESTIONS[4], &referral_source) }
                <div class="form-actions">
                    <button
                        type="button"
                        class="secondary-button"
                        onclick={on_back}
                        disabled={flow.is_submitting()}
                    >
                        {"Back"}
                    </button>
                    <button type="submit" class="primary-button" disabled={flow.is_submitting()}>
                        { if flow.is_submitting() { "Subscribing..." } else { "Start Reading" } }
                    </button>
                </div>
            </form>
        },
    };

    let status = match flow.status() {
        Status::Succeeded(message) => html! {
            <div class="status-message success" role="alert">{message}</div>
        },
        Status::Failed(message) => html! {
            <div class="status-message failure" role="alert">{message}</div>
        },
        Status::Idle | Status::Submitting => html! {},
    };

    html! {
        <div class="modal-backdrop">
            <style>
            {r#".modal-backdrop {
                position: fixed;
                inset: 0;
                background: rgba(0, 0, 0, 0.5);
                display: flex;
                align-items: center;
                justify-content: center;
                padding: 1rem;
                z-index: 100;
            }
            .modal {
                position: relative;
                background: #fff;
                border-radius: 12px;
                padding: 2.5rem 2rem;
                width: 100%;
                max-width: 520px;
                max-height: 90vh;
                overflow-y: auto;
                font-family: system-ui, sans-serif;
            }
            .modal h2 { text-align: center; margin: 0 0 1.5rem; }
            .modal-close {
                position: absolute;
                top: 1rem;
                right: 1rem;
                border: none;
                background: none;
                font-size: 1.5rem;
                cursor: pointer;
            }
            .step-progress { display: flex; justify-content: center; gap: 1.5rem; margin-bottom: 1.5rem; }
            .step-dot {
                width: 2rem;
                height: 2rem;
                border-radius: 50%;
                display: inline-flex;
                align-items: center;
                justify-content: center;
                background: rgba(0, 0, 0, 0.08);
            }
            .step-dot.active { background: #1f6f5c; color: #fff; }
            .form-field { margin-bottom: 1rem; }
            .form-field label { display: block; font-weight: 600; margin-bottom: 0.4rem; }
            .form-field input, .form-field select {
                width: 100%;
                box-sizing: border-box;
                padding: 0.75rem 1rem;
                border: 1px solid rgba(0, 0, 0, 0.2);
                border-radius: 8px;
                font-size: 1rem;
            }
            .required, .field-error { color: #c0262d; }
            .field-error { font-size: 0.875rem; margin: 0.25rem 0 0; }
            .honeypot { display: none; }
            .form-actions { display: flex; gap: 0.75rem; }
            .primary-button, .secondary-button {
                padding: 0.75rem 1.5rem;
                border-radius: 8px;
                font-weight: 600;
                cursor: pointer;
            }
            .primary-button { flex: 1; width: 100%; border: none; background: #1f6f5c; color: #fff; }
            .secondary-button { border: 1px solid rgba(0, 0, 0, 0.2); background: #fff; }
            button:disabled { opacity: 0.5; cursor: not-allowed; }
            .status-message { margin-top: 1rem; padding: 1rem; border-radius: 8px; }
            .status-message.success { background: #ecfdf3; color: #05603a; }
            .status-message.failure { background: #fef3f2; color: #912018; }"#}
            </style>
            <div class="modal" role="dialog" aria-modal="true">
                <button class="modal-close" aria-label="Close modal" onclick={on_close}>{"×"}</button>
                { progress }
                <h2>{step.title()}</h2>
                { body }
                { status }
            </div>
        </div>
    }
}

use std::cell::RefCell;
use std::rc::Rc;

use bookgate_core::analytics::DwellTimer;
use bookgate_core::content::BlockKind;
use bookgate_core::navigation::CONTENTS_HREF;
use bookgate_core::{book, resolve, Navigation};
use chrono::Utc;
use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, EventTarget, VisibilityState};
use yew::prelude::*;

use crate::analytics::{track_dwell_time, track_page_view};
use crate::components::gate::AccessGate;
use crate::components::markup::inline_markup;
use crate::components::protected_link::ProtectedLink;
use crate::components::reading::{BookNavigation, ReadingProgress};
use crate::pages::not_found::NotFound;
use crate::session::use_session;

fn now_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

fn listen(target: &EventTarget, event: &str, handler: &Closure<dyn FnMut()>) {
    if let Err(e) = target.add_event_listener_with_callback(event, handler.as_ref().unchecked_ref()) {
        log::error!("Failed to listen for {}, dwell time will not be tracked: {:?}", event, e);
    }
}

fn unlisten(target: &EventTarget, event: &str, handler: &Closure<dyn FnMut()>) {
    if let Err(e) = target.remove_event_listener_with_callback(event, handler.as_ref().unchecked_ref()) {
        log::error!("Failed to remove {} listener: {:?}", event, e);
    }
}

#[derive(Properties, PartialEq)]
pub struct BookPageRouteProps {
    pub page_id: String,
}

#[function_component(BookPageRoute)]
pub fn book_page_route(props: &BookPageRouteProps) -> Html {
    match resolve(book(), &props.page_id) {
        Some(navigation) => html! {
            <AccessGate>
                <BookPage key={props.page_id.clone()} {navigation} />
            </AccessGate>
        },
        None => html! { <NotFound /> },
    }
}

#[derive(Properties, PartialEq)]
pub struct BookPageProps {
    pub navigation: Navigation<'static>,
}

#[function_component(BookPage)]
pub fn book_page(props: &BookPageProps) -> Html {
    let session = use_session();
    let page = props.navigation.current;
    let faded_in = use_state(|| false);

    // fresh page: back to the top, then fade in on the next frame
    {
        let faded_in = faded_in.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(window) = window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                let timeout = Timeout::new(16, move || faded_in.set(true));
                move || drop(timeout)
            },
            page.id.clone(),
        );
    }

    // consent can change mid-visit through the cookie banner; senders read it late
    let current_session = use_mut_ref(|| session.session);
    {
        let current_session = current_session.clone();
        use_effect_with_deps(
            move |session| {
                *current_session.borrow_mut() = *session;
                || ()
            },
            session.session,
        );
    }

    {
        let current_session = current_session.clone();
        use_effect_with_deps(
            move |_| {
                track_page_view(&current_session.borrow(), page);

                let document = window().and_then(|w| w.document());
                let visible = document
                    .as_ref()
                    .map(|d| d.visibility_state() == VisibilityState::Visible)
                    .unwrap_or(true);
                let timer = Rc::new(RefCell::new(DwellTimer::start(now_ms(), visible)));

                let on_visibility = {
                    let timer = timer.clone();
                    let document = document.clone();
                    let current_session = current_session.clone();
                    Closure::wrap(Box::new(move || {
                        let hidden = document
                            .as_ref()
                            .map(|d| d.visibility_state() == VisibilityState::Hidden)
                            .unwrap_or(false);
                        if hidden {
                            if let Some(seconds) = timer.borrow_mut().hidden(now_ms()) {
                                track_dwell_time(&current_session.borrow(), page, seconds);
                            }
                        } else {
                            timer.borrow_mut().visible(now_ms());
                        }
                    }) as Box<dyn FnMut()>)
                };

                let on_unload = {
                    let timer = timer.clone();
                    let current_session = current_session.clone();
                    Closure::wrap(Box::new(move || {
                        if let Some(seconds) = timer.borrow_mut().finish(now_ms()) {
                            track_dwell_time(&current_session.borrow(), page, seconds);
                        }
                    }) as Box<dyn FnMut()>)
                };

                if let Some(document) = &document {
                    listen(document, "visibilitychange", &on_visibility);
                }
                if let Some(window) = window() {
                    listen(&window, "beforeunload", &on_unload);
                }

                move || {
                    if let Some(document) = &document {
                        unlisten(document, "visibilitychange", &on_visibility);
                    }
                    if let Some(window) = window() {
                        unlisten(&window, "beforeunload", &on_unload);
                    }
                    if let Some(seconds) = timer.borrow_mut().finish(now_ms()) {
                        track_dwell_time(&current_session.borrow(), page, seconds);
                    }
                }
            },
            page.id.clone(),
        );
    }

    let blocks = page.blocks().into_iter().map(|block| match block.kind {
        BlockKind::Quote => inline_markup("blockquote", "quote", block.text),
        BlockKind::Framework => inline_markup("p", "paragraph framework", block.text),
        BlockKind::Action { number } => html! {
            <p class="paragraph action">
                <strong>{format!("{}. ", number)}</strong>
                { inline_markup("span", "", block.text) }
            </p>
        },
        BlockKind::Plain => inline_markup("p", "paragraph", block.text),
    });

    html! {
        <div class="book-page">
            <style>
            {r#".book-page { min-height: 100vh; }
            .book-page-header {
                position: sticky;
                top: 0;
                z-index: 30;
                background: #FAF8F3;
                padding: 1.5rem 2rem 1rem;
                border-bottom: 1px solid rgba(0, 0, 0, 0.06);
                text-align: center;
            }
            .chapter-label, .book-page-header a {
                font-family: system-ui, sans-serif;
                font-size: 0.75rem;
                letter-spacing: 0.1em;
                text-transform: uppercase;
                color: #6b7280;
                text-decoration: none;
            }
            .book-page-header h1 { font-size: 2.25rem; font-weight: 400; margin: 0.5rem 0; }
            .book-page article { max-width: 42rem; margin: 0 auto; padding: 3rem 2rem 5rem; font-size: 1.125rem; line-height: 1.75; }
            .fade { opacity: 0; transition: opacity 0.7s ease-out; }
            .fade.visible { opacity: 1; }
            .paragraph { margin: 0 0 2rem; }
            .framework { font-weight: 600; }
            .quote {
                margin: 0 0 2rem;
                border-left: 4px solid #1f6f5c;
                padding: 0.5rem 1rem 0.5rem 1.5rem;
                background: rgba(31, 111, 92, 0.05);
                font-style: italic;
                font-size: 1rem;
            }
            .reading-progress { margin-bottom: 2.5rem; font-family: system-ui, sans-serif; font-size: 0.875rem; color: #6b7280; }
            .reading-progress-labels { display: flex; justify-content: space-between; margin-bottom: 0.5rem; }
            .reading-progress-track { background: #ebe7dc; border-radius: 999px; height: 0.5rem; overflow: hidden; }
            .reading-progress-bar { background: #1f6f5c; height: 100%; transition: width 0.5s ease-out; }
            .book-navigation {
                display: flex;
                align-items: center;
                margin-top: 5rem;
                padding-top: 2rem;
                border-top: 1px solid #e5e7eb;
                font-family: system-ui, sans-serif;
                font-size: 0.875rem;
            }
            .book-navigation > div { flex: 1; }
            .nav-contents { text-align: center; }
            .nav-next { text-align: right; }
            .book-navigation a { text-decoration: none; color: #1f6f5c; }
            .nav-edge { color: #9ca3af; }"#}
            </style>
            <header class="book-page-header">
                <div class="chapter-label">{&page.chapter}</div>
                <h1>{&page.title}</h1>
                <ProtectedLink href={CONTENTS_HREF}>{"Contents"}</ProtectedLink>
            </header>
            <div class={classes!("fade", (*faded_in).then(|| "visible"))}>
                <article>
                    <ReadingProgress progress={props.navigation.progress} />
                    { for blocks }
                    <BookNavigation navigation={props.navigation.clone()} />
                </article>
            </div>
        </div>
    }
}

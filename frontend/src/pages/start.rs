use bookgate_core::book;
use yew::prelude::*;

use crate::components::gate::AccessGate;
use crate::components::protected_link::ProtectedLink;

#[function_component(Start)]
pub fn start() -> Html {
    let book = book();
    let first_href = book
        .first_page()
        .map(|page| page.href())
        .unwrap_or_else(|| "/book".to_string());

    html! {
        <AccessGate>
            <div class="start">
                <style>
                {r#".start { min-height: 70vh; display: flex; flex-direction: column; align-items: center; justify-content: center; text-align: center; padding: 2rem; }
                .start h1 { font-size: clamp(2.5rem, 6vw, 4.5rem); font-weight: 400; margin: 0 0 1.5rem; }
                .start .byline { color: #4b5563; margin-bottom: 3rem; }
                .start a { color: #6b7280; text-decoration: none; font-family: system-ui, sans-serif; font-size: 0.875rem; }
                .start a:hover { opacity: 0.6; }"#}
                </style>
                <h1>{&book.title}</h1>
                <p class="byline">{format!("by {}", book.author)}</p>
                <ProtectedLink href={first_href}>{"start reading →"}</ProtectedLink>
            </div>
        </AccessGate>
    }
}

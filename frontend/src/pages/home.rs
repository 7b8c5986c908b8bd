use bookgate_core::book;
use yew::prelude::*;

use crate::components::start_reading::StartReadingButton;

#[function_component(Home)]
pub fn home() -> Html {
    let book = book();

    html! {
        <div class="home">
            <style>
            {r#".home { min-height: 70vh; padding: 8rem 1.5rem 4rem; text-align: center; }
            .home h1 { font-size: clamp(2.5rem, 6vw, 4.5rem); font-weight: 400; margin: 0 0 1.5rem; }
            .home .byline { color: #4b5563; margin-bottom: 3rem; }
            .home-chapters { list-style: none; padding: 0; margin: 3rem auto 0; max-width: 32rem; color: #4b5563; }
            .home-chapters li { padding: 0.4rem 0; }
            .start-reading-button {
                padding: 1rem 2rem;
                border: none;
                border-radius: 8px;
                background: #1f6f5c;
                color: #fff;
                font-size: 1rem;
                font-weight: 600;
                cursor: pointer;
            }
            .start-reading-button:hover { background: #2a8a73; }"#}
            </style>
            <h1>{&book.title}</h1>
            <p class="byline">{format!("by {}", book.author)}</p>
            <StartReadingButton />
            <ul class="home-chapters">
                { for book.chapters().iter().map(|chapter| html! {
                    <li key={chapter.id.clone()}>{&chapter.title}</li>
                }) }
            </ul>
        </div>
    }
}

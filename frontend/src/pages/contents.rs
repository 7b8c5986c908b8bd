use bookgate_core::book;
use yew::prelude::*;

use crate::components::gate::AccessGate;
use crate::components::toc::TableOfContents;

#[function_component(Contents)]
pub fn contents() -> Html {
    let book = book();

    html! {
        <AccessGate>
            <div class="contents-page">
                <style>
                {r#".contents-page { max-width: 48rem; margin: 0 auto; padding: 4rem 1.5rem; }
                .contents-page header { text-align: center; margin-bottom: 3rem; }
                .contents-page header h1 { font-weight: 400; font-size: 2.5rem; margin: 0 0 0.75rem; }
                .contents-page header p { color: #4b5563; }
                .toc-chapter { border-bottom: 1px solid #e5e7eb; padding-bottom: 1.5rem; margin-bottom: 2rem; }
                .toc-chapter:last-child { border-bottom: none; }
                .toc-chapter ul { list-style: none; padding: 0; }
                .toc-chapter li { padding: 0.35rem 0; }
                .toc-entry { display: flex; text-decoration: none; }
                .toc-entry:hover .toc-title { text-decoration: underline; }
                .toc-number { color: #9ca3af; min-width: 3rem; }"#}
                </style>
                <header>
                    <h1>{&book.title}</h1>
                    <p>{format!("by {}", book.author)}</p>
                </header>
                <TableOfContents />
            </div>
        </AccessGate>
    }
}

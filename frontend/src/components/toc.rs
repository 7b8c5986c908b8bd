use bookgate_core::book;
use yew::prelude::*;

use crate::components::protected_link::ProtectedLink;

#[function_component(TableOfContents)]
pub fn table_of_contents() -> Html {
    let listings = book().table_of_contents();

    html! {
        <div class="table-of-contents">
            <h2>{"Table of Contents"}</h2>
            { for listings.into_iter().map(|listing| html! {
                <section class="toc-chapter" key={listing.chapter.id.clone()}>
                    <h3>{&listing.chapter.title}</h3>
                    <ul>
                        { for listing.pages.into_iter().map(|page| html! {
                            <li key={page.id.clone()}>
                                <ProtectedLink href={page.href()} classes="toc-entry">
                                    <span class="toc-number">{format!("{}.", page.page_number)}</span>
                                    <span class="toc-title">{&page.title}</span>
                                </ProtectedLink>
                            </li>
                        }) }
                    </ul>
                </section>
            }) }
        </div>
    }
}

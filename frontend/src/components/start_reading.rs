use bookgate_core::access::StartReading;
use bookgate_core::book;
use log::{info, warn};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::qualification::QualificationModal;
use crate::route_for;
use crate::session::use_session;

/// Entry point into the book: straight to the first page for qualified
/// visitors, otherwise through the qualification form.
#[function_component(StartReadingButton)]
pub fn start_reading_button() -> Html {
    let session = use_session();
    let navigator = use_navigator().unwrap();
    let qualify_for = use_state(|| None::<String>);

    let Some(first_page) = book().first_page() else {
        warn!("Book has no pages, hiding start button");
        return html! {};
    };
    let first_href = first_page.href();

    let onclick = {
        let qualify_for = qualify_for.clone();
        let session = session.session;
        Callback::from(move |_: MouseEvent| match session.start_reading(&first_href) {
            StartReading::Navigate(href) => {
                info!("Visitor already qualified, opening {}", href);
                navigator.push(&route_for(&href));
            }
            StartReading::Qualify { redirect_to } => qualify_for.set(Some(redirect_to)),
        })
    };

    let on_close = {
        let qualify_for = qualify_for.clone();
        Callback::from(move |_: ()| qualify_for.set(None))
    };

    html! {
        <>
            <button class="start-reading-button" {onclick}>{"Start Reading"}</button>
            if let Some(redirect_to) = (*qualify_for).clone() {
                <QualificationModal {redirect_to} {on_close} />
            }
        </>
    }
}

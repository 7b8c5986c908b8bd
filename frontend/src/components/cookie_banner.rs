use bookgate_core::access::CookieConsent;
use log::info;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::analytics::install_gtag;
use crate::session::use_session;
use crate::storage::BrowserStore;
use crate::Route;

#[function_component(CookieBanner)]
pub fn cookie_banner() -> Html {
    let session = use_session();

    if !session.session.show_cookie_banner() {
        return html! {};
    }

    let choose = |consent: CookieConsent| {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            let mut updated = session.session;
            updated.set_consent(&BrowserStore, consent);
            info!("Cookie consent: {:?}", consent);
            install_gtag(&updated);
            session.update.emit(updated);
        })
    };

    html! {
        <div class="cookie-banner">
            <style>
            {r#".cookie-banner {
                position: fixed;
                bottom: 0;
                left: 0;
                right: 0;
                z-index: 50;
                background: #fff;
                border-top: 1px solid #e5e7eb;
                box-shadow: 0 -4px 12px rgba(0, 0, 0, 0.06);
                font-family: system-ui, sans-serif;
            }
            .cookie-banner-content {
                max-width: 72rem;
                margin: 0 auto;
                padding: 1rem 1.5rem;
                display: flex;
                flex-wrap: wrap;
                align-items: center;
                justify-content: space-between;
                gap: 1rem;
            }
            .cookie-banner p { margin: 0; flex: 1; font-size: 0.875rem; color: #374151; }
            .cookie-banner-actions { display: flex; gap: 0.75rem; }
            .cookie-banner button {
                padding: 0.5rem 1rem;
                border-radius: 8px;
                font-size: 0.875rem;
                cursor: pointer;
                border: 1px solid #d1d5db;
                background: #fff;
            }
            .cookie-banner button.accept { background: #1f6f5c; border-color: #1f6f5c; color: #fff; }"#}
            </style>
            <div class="cookie-banner-content">
                <p>
                    {"We use cookies to analyze site usage and improve your experience. By clicking \"Accept\", you consent to our use of cookies. "}
                    <Link<Route> to={Route::Privacy}>{"Learn more"}</Link<Route>>
                </p>
                <div class="cookie-banner-actions">
                    <button onclick={choose(CookieConsent::Rejected)}>{"Reject"}</button>
                    <button class="accept" onclick={choose(CookieConsent::Accepted)}>{"Accept"}</button>
                </div>
            </div>
        </div>
    }
}

use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, Level};

mod analytics;
mod config;
mod session;
mod storage;
mod components {
    pub mod cookie_banner;
    pub mod gate;
    pub mod layout;
    pub mod markup;
    pub mod protected_link;
    pub mod qualification;
    pub mod reading;
    pub mod start_reading;
    pub mod toc;
}
mod pages {
    pub mod home;
    pub mod start;
    pub mod contents;
    pub mod book_page;
    pub mod privacy;
    pub mod not_found;
}

use components::{
    cookie_banner::CookieBanner,
    layout::{SiteFooter, SiteHeader},
};
use pages::{
    home::Home,
    start::Start,
    contents::Contents,
    book_page::BookPageRoute,
    privacy::PrivacyPolicy,
    not_found::NotFound,
};
use session::{use_session, SessionProvider};


#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/book")]
    Contents,
    #[at("/book/start")]
    Start,
    #[at("/book/:page_id")]
    Page { page_id: String },
    #[at("/privacy")]
    Privacy,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Maps an href produced by `bookgate_core` back onto a route.
pub fn route_for(href: &str) -> Route {
    Route::recognize(href).unwrap_or(Route::NotFound)
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::Contents => {
            info!("Rendering Contents page");
            html! { <Contents /> }
        },
        Route::Start => {
            info!("Rendering Start page");
            html! { <Start /> }
        },
        Route::Page { page_id } => {
            info!("Rendering book page {}", page_id);
            html! { <BookPageRoute {page_id} /> }
        },
        Route::Privacy => {
            info!("Rendering Privacy page");
            html! { <PrivacyPolicy /> }
        },
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! { <NotFound /> }
        },
    }
}


/// Loads Google Analytics on start for visitors who consented earlier.
#[function_component(AnalyticsLoader)]
fn analytics_loader() -> Html {
    let session = use_session();
    use_effect_with_deps(
        move |session| {
            analytics::install_gtag(session);
            || ()
        },
        session.session,
    );
    html! {}
}


#[function_component]
fn App() -> Html {
    html! {
        <SessionProvider>
            <BrowserRouter>
                <AnalyticsLoader />
                <SiteHeader />
                <main>
                    <Switch<Route> render={switch} />
                </main>
                <SiteFooter />
                <CookieBanner />
            </BrowserRouter>
        </SessionProvider>
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}

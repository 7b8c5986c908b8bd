use bookgate_core::book;
use bookgate_core::navigation::CONTENTS_HREF;
use web_sys::MouseEvent;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::protected_link::ProtectedLink;
use crate::Route;

#[function_component(SiteHeader)]
pub fn site_header() -> Html {
    let menu_open = use_state(|| false);

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: ()| menu_open.set(false))
    };

    html! {
        <header class="site-header">
            <style>
            {r#".site-header {
                position: sticky;
                top: 0;
                z-index: 40;
                background: rgba(250, 248, 243, 0.95);
                backdrop-filter: blur(4px);
            }
            .site-header nav {
                display: flex;
                align-items: center;
                justify-content: center;
                height: 4.5rem;
                font-family: system-ui, sans-serif;
                font-size: 0.875rem;
                letter-spacing: 0.05em;
            }
            .site-header a { text-decoration: none; }
            .site-header a:hover { opacity: 0.6; }
            .burger-menu { display: none; background: none; border: none; font-size: 1.5rem; cursor: pointer; }
            .mobile-menu { display: none; }
            @media (max-width: 768px) {
                .desktop-links { display: none; }
                .burger-menu { display: block; }
                .mobile-menu { display: block; padding: 0 1.5rem 1rem; text-align: center; }
            }"#}
            </style>
            <nav>
                <div class="desktop-links">
                    <ProtectedLink href={CONTENTS_HREF}>{"Contents"}</ProtectedLink>
                </div>
                <button class="burger-menu" aria-label="Toggle menu" onclick={toggle_menu}>{"☰"}</button>
            </nav>
            if *menu_open {
                <div class="mobile-menu">
                    <ProtectedLink href={CONTENTS_HREF} on_follow={close_menu}>
                        {"Table of Contents"}
                    </ProtectedLink>
                </div>
            }
        </header>
    }
}

#[function_component(SiteFooter)]
pub fn site_footer() -> Html {
    let book = book();
    html! {
        <footer class="site-footer">
            <style>
            {r#".site-footer {
                border-top: 1px solid #e5e7eb;
                padding: 3rem 1.5rem 2rem;
                font-family: system-ui, sans-serif;
                font-size: 0.875rem;
                color: #4b5563;
            }
            .footer-columns {
                max-width: 72rem;
                margin: 0 auto;
                display: grid;
                grid-template-columns: repeat(auto-fit, minmax(14rem, 1fr));
                gap: 2rem;
            }
            .site-footer h3 { font-size: 0.75rem; letter-spacing: 0.1em; text-transform: uppercase; color: #000; }
            .site-footer ul { list-style: none; padding: 0; }
            .site-footer a { text-decoration: none; }
            .copyright { text-align: center; font-size: 0.75rem; margin-top: 2rem; padding-top: 1.5rem; border-top: 1px solid #e5e7eb; }"#}
            </style>
            <div class="footer-columns">
                <div>
                    <h3>{"About"}</h3>
                    <p>
                        {format!("{} is a comprehensive guide to building brand attention and engagement in today's competitive market.", book.title)}
                    </p>
                </div>
                <div>
                    <h3>{"Navigation"}</h3>
                    <ul>
                        <li><Link<Route> to={Route::Home}>{"Home"}</Link<Route>></li>
                        <li><ProtectedLink href={CONTENTS_HREF}>{"Contents"}</ProtectedLink></li>
                        <li><Link<Route> to={Route::Privacy}>{"Privacy"}</Link<Route>></li>
                    </ul>
                </div>
                <div>
                    <h3>{"Author"}</h3>
                    <p>{&book.author}</p>
                </div>
            </div>
            <p class="copyright">{"© The Synthesis Ltd"}</p>
        </footer>
    }
}

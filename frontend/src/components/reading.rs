use bookgate_core::analytics::NavigationEvent;
use bookgate_core::navigation::Direction;
use bookgate_core::Navigation;
use yew::prelude::*;

use crate::analytics::track_navigation;
use crate::components::protected_link::ProtectedLink;
use crate::session::use_session;

#[derive(Properties, PartialEq)]
pub struct ReadingProgressProps {
    pub progress: u8,
}

#[function_component(ReadingProgress)]
pub fn reading_progress(props: &ReadingProgressProps) -> Html {
    html! {
        <div class="reading-progress">
            <div class="reading-progress-labels">
                <span>{"Reading Progress"}</span>
                <span>{format!("{}%", props.progress)}</span>
            </div>
            <div class="reading-progress-track">
                <div class="reading-progress-bar" style={format!("width: {}%;", props.progress)}></div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct BookNavigationProps {
    pub navigation: Navigation<'static>,
}

/// Previous / contents / next links for a page, each reported as a
/// navigation event when followed.
#[function_component(BookNavigation)]
pub fn book_navigation(props: &BookNavigationProps) -> Html {
    let session = use_session();
    let navigation = &props.navigation;
    let links = navigation.links(&session.session);

    let follow = |direction: Direction| -> Option<Callback<()>> {
        let to_page_id = navigation.target(direction)?.to_string();
        let event = NavigationEvent {
            from_page_id: navigation.current.id.clone(),
            to_page_id,
            direction,
        };
        let session = session.session;
        Some(Callback::from(move |_| track_navigation(&session, &event)))
    };

    html! {
        <nav class="book-navigation">
            <div class="nav-previous">
                {
                    match links.previous {
                        Some(link) => html! {
                            <ProtectedLink href={link.href().to_string()} on_follow={follow(Direction::Previous)}>
                                {"← Previous"}
                            </ProtectedLink>
                        },
                        None => html! { <span class="nav-edge">{"Start of Book"}</span> },
                    }
                }
            </div>
            <div class="nav-contents">
                <ProtectedLink href={links.contents.href().to_string()} on_follow={follow(Direction::Toc)}>
                    {"Table of Contents"}
                </ProtectedLink>
            </div>
            <div class="nav-next">
                {
                    match links.next {
                        Some(link) => html! {
                            <ProtectedLink href={link.href().to_string()} on_follow={follow(Direction::Next)}>
                                {"Next →"}
                            </ProtectedLink>
                        },
                        None => html! { <span class="nav-edge">{"End of Book"}</span> },
                    }
                }
            </div>
        </nav>
    }
}

use yew::prelude::*;
use yew_router::prelude::*;

use crate::session::use_session;
use crate::{route_for, Route};

#[derive(Properties, PartialEq)]
pub struct ProtectedLinkProps {
    pub href: String,
    #[prop_or_default]
    pub classes: Classes,
    /// Fired when the link is followed, whichever way the gate sends it.
    #[prop_or_default]
    pub on_follow: Option<Callback<()>>,
    pub children: Children,
}

/// Link to gated content. Visitors without access are sent to the entry point
/// instead of the target.
#[function_component(ProtectedLink)]
pub fn protected_link(props: &ProtectedLinkProps) -> Html {
    let session = use_session();
    let outcome = session.session.guard(&props.href);

    let onclick = props.on_follow.clone().map(|on_follow| {
        Callback::from(move |_: MouseEvent| on_follow.emit(()))
    });

    html! {
        <span class="protected-link" {onclick}>
            <Link<Route> to={route_for(outcome.href())} classes={props.classes.clone()}>
                { for props.children.iter() }
            </Link<Route>>
        </span>
    }
}

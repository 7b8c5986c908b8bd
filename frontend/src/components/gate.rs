use bookgate_core::{Gate, GateDecision, Session};
use log::info;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::route_for;
use crate::session::use_session;

#[derive(Properties, PartialEq)]
pub struct AccessGateProps {
    pub children: Children,
}

/// Renders its children only for visitors holding the access flag. Nothing is
/// shown until the session has been checked, so gated content never flashes.
#[function_component(AccessGate)]
pub fn access_gate(props: &AccessGateProps) -> Html {
    let session = use_session();
    let navigator = use_navigator().unwrap();
    let gate = use_state(Gate::new);

    {
        let gate = gate.clone();
        use_effect_with_deps(
            move |session: &Session| {
                let mut next = *gate;
                if let GateDecision::Redirect(to) = next.evaluate(session) {
                    info!("No access flag, sending visitor to {}", to);
                    navigator.push(&route_for(&to));
                }
                gate.set(next);
                || ()
            },
            session.session,
        );
    }

    match gate.decision() {
        GateDecision::Render => html! { <>{ for props.children.iter() }</> },
        GateDecision::Pending | GateDecision::Redirect(_) => html! {},
    }
}

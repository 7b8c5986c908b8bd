use bookgate_core::Session;
use yew::prelude::*;

use crate::storage::BrowserStore;

/// The visitor's session, provided once at the root. Components mutate a copy
/// through the `bookgate_core` methods (which persist) and hand it to `update`.
#[derive(Clone, PartialEq)]
pub struct SessionContext {
    pub session: Session,
    pub update: Callback<Session>,
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let session = use_state(|| Session::read(&BrowserStore));

    let context = SessionContext {
        session: *session,
        update: {
            let session = session.clone();
            Callback::from(move |next: Session| session.set(next))
        },
    };

    html! {
        <ContextProvider<SessionContext> context={context}>
            { for props.children.iter() }
        </ContextProvider<SessionContext>>
    }
}

/// Panics outside `SessionProvider`, which wraps the whole app.
#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionProvider is mounted at the root")
}

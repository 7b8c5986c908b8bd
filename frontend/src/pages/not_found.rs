use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="not-found">
            <style>
            {r#".not-found { min-height: 60vh; display: flex; flex-direction: column; align-items: center; justify-content: center; text-align: center; }
            .not-found h1 { font-size: 4rem; font-weight: 400; margin: 0; }
            .not-found a { color: #1f6f5c; }"#}
            </style>
            <h1>{"404"}</h1>
            <h2>{"Page Not Found"}</h2>
            <p>{"The page you are looking for does not exist."}</p>
            <Link<Route> to={Route::Home}>{"Back to the book"}</Link<Route>>
        </div>
    }
}

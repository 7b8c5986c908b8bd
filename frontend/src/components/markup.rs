use web_sys::window;
use yew::prelude::*;

/// Element whose body is trusted inline markup from the book data.
pub fn inline_markup(tag: &str, class: &str, markup: &str) -> Html {
    let element = window()
        .and_then(|w| w.document())
        .and_then(|d| d.create_element(tag).ok());
    match element {
        Some(element) => {
            element.set_class_name(class);
            element.set_inner_html(markup);
            Html::VRef(element.into())
        }
        None => html! {},
    }
}

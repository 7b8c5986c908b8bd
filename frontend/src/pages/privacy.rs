use chrono::Local;
use yew::prelude::*;

#[function_component(PrivacyPolicy)]
pub fn privacy_policy() -> Html {
    let today = Local::now().format("%-d %B %Y").to_string();

    html! {
        <div class="privacy">
            <style>
            {r#".privacy { max-width: 48rem; margin: 0 auto; padding: 4rem 1.5rem; line-height: 1.7; }
            .privacy h1 { font-weight: 400; font-size: 2.5rem; }
            .privacy h2 { font-size: 1.25rem; margin-top: 2.5rem; }
            .privacy .updated { color: #6b7280; font-size: 0.875rem; margin-top: 3rem; }"#}
            </style>
            <h1>{"Privacy & Cookie Policy"}</h1>
            <section>
                <h2>{"Cookies"}</h2>
                <p>{"We use cookies to analyze site usage and improve your experience. Cookies are small text files that are stored on your device when you visit our website."}</p>
            </section>
            <section>
                <h2>{"How We Use Cookies"}</h2>
                <p>{"We use Google Analytics to understand how visitors interact with our website. This helps us improve the user experience and understand which content is most valuable."}</p>
                <p>{"Google Analytics uses cookies to:"}</p>
                <ul>
                    <li>{"Track page views and user interactions"}</li>
                    <li>{"Analyze website traffic and usage patterns"}</li>
                    <li>{"Provide insights to help improve the website"}</li>
                </ul>
            </section>
            <section>
                <h2>{"Your Choices"}</h2>
                <p>{"You can choose to accept or reject cookies when you first visit our website. You can also change your cookie preferences at any time by clearing your browser cookies and revisiting the site."}</p>
                <p>{"If you reject cookies, Google Analytics will not be loaded and we will not track your visit."}</p>
            </section>
            <section>
                <h2>{"Data Collection"}</h2>
                <p>{"When you subscribe to our newsletter, we collect your email address and the information you provide in the qualification form. This data is stored securely and used only for the purposes of sending you newsletter content and understanding our audience."}</p>
            </section>
            <section>
                <h2>{"Contact"}</h2>
                <p>{"If you have any questions about this privacy policy or our use of cookies, please contact us."}</p>
            </section>
            <p class="updated">{format!("Last updated: {}", today)}</p>
        </div>
    }
}

//! Fire-and-forget reading analytics. Every event goes to our own collector and,
//! when the visitor accepted cookies, to Google Analytics. Nothing here ever
//! reports a failure to the visitor.

use bookgate_core::analytics::{DwellTimeEvent, NavigationEvent, PageViewEvent, EVENT_CATEGORY};
use bookgate_core::{Page, Session};
use chrono::Utc;
use gloo_net::http::Request;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::config;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = window, js_name = gtag, catch)]
    fn gtag(command: &str, action: &str, params: JsValue) -> Result<(), JsValue>;
}

#[derive(Serialize)]
struct GtagEvent {
    event_category: &'static str,
    event_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<u64>,
}

/// Injects the gtag loader once consent is given. Safe to call repeatedly.
pub fn install_gtag(session: &Session) {
    let Some(id) = config::ga_measurement_id() else {
        return;
    };
    if !session.analytics_allowed() {
        return;
    }
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.get_element_by_id("gtag-loader").is_some() {
        return;
    }
    let Some(head) = document.head() else {
        return;
    };

    let result = (|| -> Result<(), JsValue> {
        let loader = document.create_element("script")?;
        loader.set_id("gtag-loader");
        loader.set_attribute("async", "")?;
        loader.set_attribute(
            "src",
            &format!("https://www.googletagmanager.com/gtag/js?id={}", id),
        )?;
        head.append_child(&loader)?;

        let init = document.create_element("script")?;
        init.set_text_content(Some(&format!(
            "window.dataLayer = window.dataLayer || [];\n\
             function gtag(){{dataLayer.push(arguments);}}\n\
             gtag('js', new Date());\n\
             gtag('config', '{}');",
            id
        )));
        head.append_child(&init)?;
        Ok(())
    })();

    match result {
        Ok(()) => log::info!("Google Analytics enabled"),
        Err(e) => log::error!("Failed to install Google Analytics: {:?}", e),
    }
}

fn send_gtag(session: &Session, action: &str, label: String, value: Option<u64>) {
    if !session.analytics_allowed() || config::ga_measurement_id().is_none() {
        return;
    }
    let params = GtagEvent {
        event_category: EVENT_CATEGORY,
        event_label: label,
        value,
    };
    match serde_wasm_bindgen::to_value(&params) {
        Ok(params) => {
            if let Err(e) = gtag("event", action, params) {
                // the loader may not have run yet
                log::debug!("gtag unavailable: {:?}", e);
            }
        }
        Err(e) => log::error!("Failed to encode gtag params: {}", e),
    }
}

fn post<T: Serialize + 'static>(path: &'static str, body: T) {
    spawn_local(async move {
        let url = format!("{}{}", config::get_backend_url(), path);
        let request = match Request::post(&url).json(&body) {
            Ok(request) => request,
            Err(e) => {
                log::error!("Error encoding {} event: {}", path, e);
                return;
            }
        };
        match request.send().await {
            Ok(response) if !response.ok() => {
                log::error!("Analytics endpoint {} answered {}", path, response.status());
            }
            Ok(_) => {}
            Err(e) => log::error!("Error tracking {}: {}", path, e),
        }
    });
}

pub fn track_page_view(session: &Session, page: &Page) {
    let event = PageViewEvent {
        page_id: page.id.clone(),
        page_number: page.page_number,
        page_title: Some(page.title.clone()),
        timestamp: Utc::now().to_rfc3339(),
    };
    send_gtag(session, "page_view", event.label(), Some(u64::from(page.page_number)));
    post("/api/analytics/pageview", event);
}

pub fn track_dwell_time(session: &Session, page: &Page, seconds: u64) {
    let event = DwellTimeEvent {
        page_id: page.id.clone(),
        page_number: page.page_number,
        dwell_time: seconds,
        timestamp: Utc::now().to_rfc3339(),
    };
    send_gtag(session, "dwell_time", event.label(), Some(seconds));
    post("/api/analytics/dwelltime", event);
}

/// Navigation has no collector endpoint; it only reaches Google Analytics.
pub fn track_navigation(session: &Session, event: &NavigationEvent) {
    send_gtag(session, "navigation", event.label(), None);
}

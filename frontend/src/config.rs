
#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:3000"  // trunk serve runs on its own port
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // served by the backend itself
}

/// GA4 measurement id baked in at build time. Without one no third-party
/// analytics is loaded, whatever the visitor consented to.
pub fn ga_measurement_id() -> Option<&'static str> {
    option_env!("GA4_ID").filter(|id| !id.trim().is_empty())
}

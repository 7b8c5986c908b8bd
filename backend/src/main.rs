use dotenvy::dotenv;
use axum::{
    handler::Handler,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{CorsLayer, Any};
use tower_http::services::ServeDir;
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnResponse};
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod config;
mod handlers {
    pub mod api_json;
    pub mod subscribe_handlers;
    pub mod analytics_handlers;
    pub mod page_handlers;
}
mod api {
    pub mod beehiiv;
}

use api::beehiiv::BeehiivClient;
use config::Config;
use handlers::analytics_handlers;
use handlers::page_handlers::{self, PageShell};
use handlers::subscribe_handlers;

async fn health_check() -> &'static str {
    "OK"
}

pub struct AppState {
    newsletter: BeehiivClient,
    shell: PageShell,
}

pub fn app(state: Arc<AppState>, dist: &Path) -> Router {
    let static_files = ServeDir::new(dist)
        .not_found_service(page_handlers::not_found.with_state(state.clone()));

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/subscribe", post(subscribe_handlers::subscribe))
        .route("/api/analytics/pageview", post(analytics_handlers::page_view))
        .route("/api/analytics/dwelltime", post(analytics_handlers::dwell_time))
        // client routes get the shell; everything else is a static asset
        .route("/", get(page_handlers::home))
        .route("/book", get(page_handlers::table_of_contents))
        .route("/book/start", get(page_handlers::start))
        .route("/book/{page_id}", get(page_handlers::book_page))
        .route("/privacy", get(page_handlers::privacy))
        .fallback_service(static_files)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        )
        .layer(
            CorsLayer::new()
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_origin(Any)
                .allow_headers([axum::http::header::CONTENT_TYPE])
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = Config::from_env()?;

    let _guard = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((dsn, sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        }))
    });

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // refuse to start without readable content
    let book = bookgate_core::content::load()?;
    tracing::info!(
        title = %book.title,
        pages = book.total_pages(),
        chapters = book.chapters().len(),
        "Book content loaded"
    );

    config.beehiiv.log_summary();

    let state = Arc::new(AppState {
        newsletter: BeehiivClient::new(config.beehiiv.clone()),
        shell: PageShell::load(&config.frontend_dist),
    });
    let app = app(state, &config.frontend_dist);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

#[cfg(test)]
mod test_support {
    use super::*;
    use axum::{
        body::Body,
        extract::{Path as RoutePath, State},
        http::{header, HeaderMap, Request, StatusCode},
        Json,
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    use crate::config::BeehiivConfig;

    #[derive(Debug, Clone)]
    pub struct Call {
        pub publication_id: String,
        pub authorization: Option<String>,
        pub body: Value,
    }

    pub struct StubProvider {
        pub url: String,
        pub calls: Arc<Mutex<Vec<Call>>>,
    }

    #[derive(Clone)]
    struct StubState {
        status: StatusCode,
        response: Value,
        calls: Arc<Mutex<Vec<Call>>>,
    }

    async fn record_subscription(
        State(stub): State<StubState>,
        RoutePath(publication_id): RoutePath<String>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        stub.calls.lock().await.push(Call {
            publication_id,
            authorization: headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body,
        });
        (stub.status, Json(stub.response.clone()))
    }

    /// Newsletter provider stand-in that answers every subscription with
    /// `status` and `response`, recording what it was sent.
    pub async fn spawn_provider(status: StatusCode, response: Value) -> StubProvider {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let router = Router::new()
            .route(
                "/publications/{publication_id}/subscriptions",
                post(record_subscription),
            )
            .with_state(StubState {
                status,
                response,
                calls: calls.clone(),
            });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        StubProvider {
            url: format!("http://{}", addr),
            calls,
        }
    }

    pub fn provider_config(url: &str) -> BeehiivConfig {
        BeehiivConfig {
            api_key: "sk_test_key".into(),
            publication_id: "pub_test".into(),
            api_url: url.into(),
        }
    }

    pub fn test_app(provider_url: &str) -> Router {
        let state = Arc::new(AppState {
            newsletter: BeehiivClient::new(provider_config(provider_url)),
            shell: PageShell::fallback(),
        });
        app(state, Path::new("target/no-frontend-dist"))
    }

    pub async fn post_json(app: Router, path: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    pub async fn get(app: Router, path: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn health_check_answers_ok() {
        let provider = spawn_provider(StatusCode::OK, serde_json::json!({})).await;
        let (status, body) = get(test_app(&provider.url), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }
}

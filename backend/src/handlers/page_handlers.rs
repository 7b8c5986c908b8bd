//! Server-rendered shell for the browser application.
//!
//! Every client route is answered with the same `index.html`, with the
//! document title and description filled in so links unfurl sensibly. The
//! status code still reflects whether the route exists.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Path as RoutePath, State},
    http::StatusCode,
    response::Html,
};
use bookgate_core::book;

use crate::AppState;

const DESCRIPTION_CHARS: usize = 160;

const FALLBACK_SHELL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title></title>
</head>
<body>
<noscript>This book needs JavaScript to display.</noscript>
</body>
</html>
"#;

#[derive(Clone, Debug)]
pub struct PageShell {
    template: String,
}

impl PageShell {
    /// Uses the built frontend's `index.html`, or a bare document when the
    /// frontend has not been built.
    pub fn load(dist: &Path) -> Self {
        let index = dist.join("index.html");
        match std::fs::read_to_string(&index) {
            Ok(template) => {
                tracing::info!("Serving page shell from {}", index.display());
                Self { template }
            }
            Err(e) => {
                tracing::warn!(
                    "Could not read {} ({}); serving the built-in shell",
                    index.display(),
                    e
                );
                Self::fallback()
            }
        }
    }

    pub fn fallback() -> Self {
        Self {
            template: FALLBACK_SHELL.to_string(),
        }
    }

    pub fn render(&self, title: &str, description: &str) -> String {
        let title = html_escape::encode_text(title);
        let meta = format!(
            "<meta name=\"description\" content=\"{}\">\n",
            html_escape::encode_double_quoted_attribute(description)
        );

        let mut html = match (self.template.find("<title>"), self.template.find("</title>")) {
            (Some(open), Some(close)) if open < close => format!(
                "{}<title>{}{}",
                &self.template[..open],
                title,
                &self.template[close..]
            ),
            _ => self.template.clone(),
        };
        match html.find("</head>") {
            Some(at) => html.insert_str(at, &meta),
            None => html.insert_str(0, &meta),
        }
        html
    }
}

fn book_description() -> String {
    let book = book();
    format!("{} by {}", book.title, book.author)
}

fn book_shell(state: &AppState, title: Option<&str>) -> Html<String> {
    let book = book();
    let title = match title {
        Some(title) => format!("{} | {}", title, book.title),
        None => book.title.clone(),
    };
    Html(state.shell.render(&title, &book_description()))
}

pub async fn home(State(state): State<Arc<AppState>>) -> Html<String> {
    book_shell(&state, None)
}

pub async fn table_of_contents(State(state): State<Arc<AppState>>) -> Html<String> {
    book_shell(&state, Some("Table of Contents"))
}

pub async fn start(State(state): State<Arc<AppState>>) -> Html<String> {
    book_shell(&state, Some("Start Reading"))
}

pub async fn privacy(State(state): State<Arc<AppState>>) -> Html<String> {
    book_shell(&state, Some("Privacy & Cookie Policy"))
}

pub async fn book_page(
    State(state): State<Arc<AppState>>,
    RoutePath(page_id): RoutePath<String>,
) -> (StatusCode, Html<String>) {
    let book = book();
    match book.page_by_id(&page_id) {
        Some(page) => (
            StatusCode::OK,
            Html(
                state
                    .shell
                    .render(&page.document_title(&book.title), &page.excerpt(DESCRIPTION_CHARS)),
            ),
        ),
        None => {
            tracing::debug!("Unknown page requested: {}", page_id);
            not_found(State(state)).await
        }
    }
}

pub async fn not_found(State(state): State<Arc<AppState>>) -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        Html(state.shell.render(
            &format!("Page Not Found | {}", book().title),
            &book_description(),
        )),
    )
}

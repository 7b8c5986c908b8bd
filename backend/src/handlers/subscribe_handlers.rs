use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use bookgate_core::subscription::SubscribeRequest;
use chrono::Utc;
use serde_json::json;

use crate::api::beehiiv::SubscribeOutcome;
use crate::handlers::api_json::ApiJson;
use crate::AppState;

pub async fn subscribe(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SubscribeRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    if let Err(message) = req.validate() {
        return Err((StatusCode::BAD_REQUEST, Json(json!({"error": message}))));
    }

    tracing::info!(
        email = %req.email,
        first_name = ?req.first_name,
        last_name = ?req.last_name,
        role = ?req.role,
        company_focus = ?req.company_focus,
        biggest_challenge = ?req.biggest_challenge,
        team_size = ?req.team_size,
        referral_source = ?req.referral_source,
        "Subscription data received"
    );

    let custom_fields = req.custom_fields();
    match state.newsletter.subscribe(&req.email, true, &custom_fields).await {
        Ok(SubscribeOutcome::Subscribed(data)) => {
            tracing::debug!("Beehiiv subscription created: {}", data);
        }
        Ok(SubscribeOutcome::AlreadySubscribed(message)) => {
            tracing::warn!(email = %req.email, "Treating duplicate subscription as success: {}", message);
        }
        Err(e) => {
            tracing::error!(email = %req.email, "Subscription failed: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            ));
        }
    }

    tracing::info!(
        email = %req.email,
        role = ?req.role,
        team_size = ?req.team_size,
        referral_source = ?req.referral_source,
        timestamp = %Utc::now().to_rfc3339(),
        "Subscription completed successfully"
    );

    Ok(Json(json!({"message": "Subscription successful"})))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{post_json, spawn_provider, test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn missing_email_is_a_bad_request() {
        let provider = spawn_provider(StatusCode::OK, json!({})).await;
        let app = test_app(&provider.url);

        let (status, body) = post_json(app, "/api/subscribe", json!({"firstName": "Ada"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Email is required"}));
        assert!(provider.calls.lock().await.is_empty());
    }

    #[tokio::test]
    async fn malformed_email_is_a_bad_request() {
        let provider = spawn_provider(StatusCode::OK, json!({})).await;
        let app = test_app(&provider.url);

        let (status, body) = post_json(app, "/api/subscribe", json!({"email": "not-an-email"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid email address"}));
        assert!(provider.calls.lock().await.is_empty());
    }

    #[tokio::test]
    async fn unknown_fields_are_rejected() {
        let provider = spawn_provider(StatusCode::OK, json!({})).await;
        let app = test_app(&provider.url);

        let (status, body) = post_json(
            app,
            "/api/subscribe",
            json!({"email": "a@b.co", "password": "hunter2"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn success_forwards_profile_as_custom_fields() {
        let provider = spawn_provider(StatusCode::CREATED, json!({"data": {}})).await;
        let app = test_app(&provider.url);

        let (status, body) = post_json(
            app,
            "/api/subscribe",
            json!({
                "email": "a@b.co",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "role": "founder-ceo",
                "teamSize": "3-10",
                "referralSource": ""
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Subscription successful"}));

        let calls = provider.calls.lock().await;
        assert_eq!(
            calls[0].body["custom_fields"],
            json!([
                {"name": "name", "value": "Ada Lovelace"},
                {"name": "role", "value": "founder-ceo"},
                {"name": "team_size", "value": "3-10"}
            ])
        );
        assert_eq!(calls[0].body["reactivate_existing"], json!(true));
    }

    #[tokio::test]
    async fn duplicate_subscription_still_succeeds() {
        let provider = spawn_provider(
            StatusCode::BAD_REQUEST,
            json!({"message": "Email already exists for this publication"}),
        )
        .await;
        let app = test_app(&provider.url);

        let (status, body) = post_json(app, "/api/subscribe", json!({"email": "a@b.co"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Subscription successful"}));
    }

    #[tokio::test]
    async fn provider_failure_is_reported() {
        let provider = spawn_provider(
            StatusCode::BAD_REQUEST,
            json!({"errors": [{"message": "Publication is archived"}]}),
        )
        .await;
        let app = test_app(&provider.url);

        let (status, body) = post_json(app, "/api/subscribe", json!({"email": "a@b.co"})).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Publication is archived"}));
    }
}

//! Beehiiv v2 subscription client.

use bookgate_core::subscription::{is_duplicate_subscription, CustomField};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::BeehiivConfig;

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("Failed to reach newsletter provider: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Provider { status: u16, message: String },
    #[error(
        "API key authentication failed. Please verify:\n\
         1. BEEHIIV_API_KEY is correct\n\
         2. The API key has no leading/trailing spaces\n\
         3. The API key has permission to create subscriptions\n\
         4. The server was restarted after the key was changed\n\
         Original error: {message}"
    )]
    Unauthorized { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubscribeOutcome {
    Subscribed(Value),
    /// The provider refused because the address is already on the list.
    AlreadySubscribed(String),
}

#[derive(Serialize)]
struct CreateSubscription<'a> {
    email: &'a str,
    reactivate_existing: bool,
    #[serde(skip_serializing_if = "no_fields")]
    custom_fields: &'a [CustomField],
}

fn no_fields(fields: &&[CustomField]) -> bool {
    fields.is_empty()
}

#[derive(Clone)]
pub struct BeehiivClient {
    http: Client,
    config: BeehiivConfig,
}

/// Picks the most specific message the provider gave us.
pub fn provider_error_message(status: StatusCode, body: &Value) -> String {
    body.pointer("/errors/0/message")
        .and_then(Value::as_str)
        .or_else(|| body.get("message").and_then(Value::as_str))
        .or_else(|| body.get("error").and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| {
            format!(
                "Beehiiv API error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            )
            .trim_end()
            .to_string()
        })
}

fn is_auth_failure(status: StatusCode, message: &str) -> bool {
    let lowered = message.to_lowercase();
    status == StatusCode::UNAUTHORIZED
        || lowered.contains("api key")
        || lowered.contains("not valid")
        || lowered.contains("unauthorized")
}

impl BeehiivClient {
    pub fn new(config: BeehiivConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    fn subscriptions_url(&self) -> String {
        format!(
            "{}/publications/{}/subscriptions",
            self.config.api_url, self.config.publication_id
        )
    }

    async fn create_subscription(
        &self,
        email: &str,
        reactivate_existing: bool,
        custom_fields: &[CustomField],
    ) -> Result<Value, SubscriptionError> {
        let url = self.subscriptions_url();
        tracing::debug!(url = %url, email = %email, fields = custom_fields.len(), "Calling Beehiiv");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&CreateSubscription {
                email,
                reactivate_existing,
                custom_fields,
            })
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let body = serde_json::from_str::<Value>(&text).unwrap_or_else(|_| {
            tracing::warn!("Beehiiv returned a non-JSON body: {}", text);
            json!({ "rawResponse": text })
        });

        if status.is_success() {
            return Ok(body);
        }

        let message = provider_error_message(status, &body);
        tracing::error!(
            status = status.as_u16(),
            error = %message,
            response = %body,
            publication_id = %self.config.publication_id,
            "Beehiiv API error"
        );
        if is_auth_failure(status, &message) {
            return Err(SubscriptionError::Unauthorized { message });
        }
        Err(SubscriptionError::Provider {
            status: status.as_u16(),
            message,
        })
    }

    /// Creates (or reactivates) a subscription. A duplicate refusal comes back
    /// as `AlreadySubscribed` rather than an error.
    pub async fn subscribe(
        &self,
        email: &str,
        reactivate_existing: bool,
        custom_fields: &[CustomField],
    ) -> Result<SubscribeOutcome, SubscriptionError> {
        match self
            .create_subscription(email, reactivate_existing, custom_fields)
            .await
        {
            Ok(body) => Ok(SubscribeOutcome::Subscribed(body)),
            Err(e) => {
                let message = e.to_string();
                if is_duplicate_subscription(&message) {
                    tracing::info!("Email already subscribed or duplicate, continuing: {}", message);
                    Ok(SubscribeOutcome::AlreadySubscribed(message))
                } else {
                    Err(e)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{provider_config, spawn_provider};
    use axum::http::StatusCode as AxumStatus;

    fn fields() -> Vec<CustomField> {
        vec![CustomField {
            name: "role".into(),
            value: "founder-ceo".into(),
        }]
    }

    #[test]
    fn error_message_precedence() {
        let status = StatusCode::BAD_REQUEST;
        let body = json!({"errors": [{"message": "first"}], "message": "second"});
        assert_eq!(provider_error_message(status, &body), "first");
        let body = json!({"message": "second", "error": "third"});
        assert_eq!(provider_error_message(status, &body), "second");
        let body = json!({"error": "third"});
        assert_eq!(provider_error_message(status, &body), "third");
        assert_eq!(
            provider_error_message(status, &json!({})),
            "Beehiiv API error: 400 Bad Request"
        );
    }

    #[tokio::test]
    async fn sends_bearer_token_and_custom_fields() {
        let provider = spawn_provider(AxumStatus::CREATED, json!({"data": {"id": "sub_1"}})).await;
        let client = BeehiivClient::new(provider_config(&provider.url));

        let outcome = client.subscribe("a@b.co", true, &fields()).await.unwrap();
        assert_eq!(outcome, SubscribeOutcome::Subscribed(json!({"data": {"id": "sub_1"}})));

        let calls = provider.calls.lock().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].publication_id, "pub_test");
        assert_eq!(calls[0].authorization.as_deref(), Some("Bearer sk_test_key"));
        assert_eq!(
            calls[0].body,
            json!({
                "email": "a@b.co",
                "reactivate_existing": true,
                "custom_fields": [{"name": "role", "value": "founder-ceo"}]
            })
        );
    }

    #[tokio::test]
    async fn empty_custom_fields_are_omitted() {
        let provider = spawn_provider(AxumStatus::OK, json!({})).await;
        let client = BeehiivClient::new(provider_config(&provider.url));
        client.subscribe("a@b.co", false, &[]).await.unwrap();

        let calls = provider.calls.lock().await;
        assert_eq!(
            calls[0].body,
            json!({"email": "a@b.co", "reactivate_existing": false})
        );
    }

    #[tokio::test]
    async fn duplicate_refusal_is_not_an_error() {
        let provider = spawn_provider(
            AxumStatus::BAD_REQUEST,
            json!({"errors": [{"message": "Subscription already exists"}]}),
        )
        .await;
        let client = BeehiivClient::new(provider_config(&provider.url));
        let outcome = client.subscribe("a@b.co", true, &[]).await.unwrap();
        assert_eq!(
            outcome,
            SubscribeOutcome::AlreadySubscribed("Subscription already exists".into())
        );
    }

    #[tokio::test]
    async fn other_refusals_carry_provider_message() {
        let provider = spawn_provider(
            AxumStatus::UNPROCESSABLE_ENTITY,
            json!({"message": "Invalid email domain"}),
        )
        .await;
        let client = BeehiivClient::new(provider_config(&provider.url));
        let err = client.subscribe("a@b.co", true, &[]).await.unwrap_err();
        assert!(matches!(err, SubscriptionError::Provider { status: 422, .. }));
        assert_eq!(err.to_string(), "Invalid email domain");
    }

    #[tokio::test]
    async fn unauthorized_explains_the_fix() {
        let provider = spawn_provider(AxumStatus::UNAUTHORIZED, json!({"error": "Nope"})).await;
        let client = BeehiivClient::new(provider_config(&provider.url));
        let err = client.subscribe("a@b.co", true, &[]).await.unwrap_err();
        assert!(matches!(err, SubscriptionError::Unauthorized { .. }));
        let message = err.to_string();
        assert!(message.starts_with("API key authentication failed"));
        assert!(message.ends_with("Original error: Nope"));
    }

    #[tokio::test]
    async fn unreachable_provider_is_a_transport_error() {
        let client = BeehiivClient::new(provider_config("http://127.0.0.1:1"));
        let err = client.subscribe("a@b.co", true, &[]).await.unwrap_err();
        assert!(matches!(err, SubscriptionError::Transport(_)));
    }
}

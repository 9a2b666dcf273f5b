use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{ConnectInfo, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use relay::protocol::{ContactReply, ContactRequest, SendMessage, SendMessageReply,
    send_message_url};
use relay::submission::Submission;

mod rate_limit;
use rate_limit::RateLimiter;

#[derive(Clone)]
struct AppState {
    config: Arc<RelayConfig>,
    http: reqwest::Client,
    limiter: Arc<RateLimiter>,
}

#[derive(Clone, Debug)]
struct RelayConfig {
    bot_token: String,
    chat_id: String,
    api_base: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let addr: SocketAddr = env::var("RELAY_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:9200".to_string())
        .parse()
        .expect("invalid RELAY_ADDR");

    // The bot credential lives here, server-side, and nowhere else. The
    // browser only ever talks to /api/contact.
    let config = RelayConfig {
        bot_token: env::var("RELAY_BOT_TOKEN").unwrap_or_default(),
        chat_id: env::var("RELAY_CHAT_ID").unwrap_or_default(),
        api_base: env::var("RELAY_API_BASE")
            .unwrap_or_else(|_| "https://api.telegram.org".to_string()),
    };
    if config.bot_token.is_empty() || config.chat_id.is_empty() {
        warn!("RELAY_BOT_TOKEN / RELAY_CHAT_ID unset; submissions will be rejected");
    }

    let rate_per_minute = env_var_f64("RELAY_RATE_PER_MINUTE", 6.0);

    let state = AppState {
        config: Arc::new(config),
        http: reqwest::Client::new(),
        limiter: Arc::new(RateLimiter::new(rate_per_minute)),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/api/contact", post(post_contact))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    info!("contact relay listening on http://{addr}");
    axum::serve(
        tokio::net::TcpListener::bind(addr).await.unwrap(),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn post_contact(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Json(request): Json<ContactRequest>,
) -> Response {
    let submission = Submission::from(request);
    if let Err(err) = submission.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ContactReply::failure(err.to_string())),
        )
            .into_response();
    }

    let source = peer.ip().to_string();
    if !state.limiter.check(&source) {
        warn!("rate limited contact submission from {source}");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ContactReply::failure("too many submissions, try again later")),
        )
            .into_response();
    }
    state.limiter.prune(Instant::now());

    let cfg = &state.config;
    if cfg.bot_token.is_empty() || cfg.chat_id.is_empty() {
        return (
            StatusCode::BAD_GATEWAY,
            Json(ContactReply::failure("relay is not configured")),
        )
            .into_response();
    }

    let result = forward_message(&state, &submission).await;
    let (status, reply) = reply_for_upstream(result);
    if !reply.ok {
        warn!(
            "contact forward failed: {}",
            reply.description.as_deref().unwrap_or("unknown")
        );
    }
    (status, Json(reply)).into_response()
}

/// Exactly one outbound POST per submission; no retries.
async fn forward_message(
    state: &AppState,
    submission: &Submission,
) -> Result<SendMessageReply, String> {
    let cfg = &state.config;
    let payload = SendMessage {
        chat_id: cfg.chat_id.clone(),
        text: submission.format_message(),
    };

    let resp = state
        .http
        .post(send_message_url(&cfg.api_base, &cfg.bot_token))
        .json(&payload)
        .send()
        .await
        .map_err(|e| format!("upstream request failed: {e}"))?;

    resp.json::<SendMessageReply>()
        .await
        .map_err(|e| format!("upstream reply unreadable: {e}"))
}

/// Map the upstream outcome onto the client-facing reply: transport failures
/// and API-level rejections both land on the single failure path.
fn reply_for_upstream(result: Result<SendMessageReply, String>) -> (StatusCode, ContactReply) {
    match result {
        Ok(SendMessageReply { ok: true, .. }) => (StatusCode::OK, ContactReply::success()),
        Ok(SendMessageReply {
            ok: false,
            description,
        }) => (
            StatusCode::BAD_GATEWAY,
            ContactReply::failure(
                description.unwrap_or_else(|| "failed to send message".to_string()),
            ),
        ),
        Err(err) => (StatusCode::BAD_GATEWAY, ContactReply::failure(err)),
    }
}

fn env_var_f64(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::reply_for_upstream;
    use axum::http::StatusCode;
    use relay::protocol::SendMessageReply;

    #[test]
    fn upstream_ok_maps_to_200_success() {
        let (status, reply) = reply_for_upstream(Ok(SendMessageReply {
            ok: true,
            description: None,
        }));
        assert_eq!(status, StatusCode::OK);
        assert!(reply.ok);
    }

    #[test]
    fn upstream_rejection_maps_to_502_with_description() {
        let (status, reply) = reply_for_upstream(Ok(SendMessageReply {
            ok: false,
            description: Some("chat not found".to_string()),
        }));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(reply.description.as_deref(), Some("chat not found"));
    }

    #[test]
    fn transport_failure_maps_to_502() {
        let (status, reply) = reply_for_upstream(Err("connect timeout".to_string()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(!reply.ok);
        assert_eq!(reply.description.as_deref(), Some("connect timeout"));
    }

    #[test]
    fn missing_description_gets_a_fallback() {
        let (_, reply) = reply_for_upstream(Ok(SendMessageReply {
            ok: false,
            description: None,
        }));
        assert_eq!(reply.description.as_deref(), Some("failed to send message"));
    }
}

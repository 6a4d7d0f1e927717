// ABOUTME: Mock identity provider and AI gateway servers for integration tests
// ABOUTME: Spawns real HTTP listeners on ephemeral ports with scripted behavior

use axum::{
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Handle to a spawned mock identity provider
pub struct MockIdentity {
    /// Base URL to point `IdentityConfig` at
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl MockIdentity {
    /// Number of token verification requests received
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Spawn a mock identity provider accepting exactly one bearer token
///
/// `GET /auth/v1/user` returns the user record for `valid_token` and 401
/// for anything else, mirroring the real provider's contract.
pub async fn spawn_identity(valid_token: &'static str, user_id: Uuid) -> MockIdentity {
    let hits = Arc::new(AtomicUsize::new(0));
    let handler_hits = hits.clone();

    let app = Router::new().route(
        "/auth/v1/user",
        get(move |headers: HeaderMap| {
            let hits = handler_hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);

                let authorized = headers
                    .get("authorization")
                    .and_then(|h| h.to_str().ok())
                    .is_some_and(|h| h == format!("Bearer {valid_token}"));

                if authorized {
                    (
                        StatusCode::OK,
                        Json(json!({"id": user_id.to_string(), "email": "user@example.com"})),
                    )
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"message": "invalid JWT"})),
                    )
                }
            }
        }),
    );

    let base_url = serve(app).await;
    MockIdentity { base_url, hits }
}

/// Scripted response for the mock gateway
#[derive(Clone)]
pub enum GatewayBehavior {
    /// Return 200 with a single choice containing this content
    Success(&'static str),
    /// Return the given status with a raw body
    Status(u16, &'static str),
}

/// Handle to a spawned mock AI gateway
pub struct MockGateway {
    /// Base URL to point `GatewayConfig` at
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    last_body: Arc<Mutex<Option<Value>>>,
}

impl MockGateway {
    /// Number of chat completion requests received
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// The most recent request body, if any request arrived
    pub fn last_body(&self) -> Option<Value> {
        self.last_body.lock().unwrap().clone()
    }
}

/// Spawn a mock OpenAI-compatible gateway with scripted behavior
///
/// `POST /chat/completions` records the request body and replies per
/// `behavior`; the handle exposes hit counts for call-counting asserts.
pub async fn spawn_gateway(behavior: GatewayBehavior) -> MockGateway {
    let hits = Arc::new(AtomicUsize::new(0));
    let last_body = Arc::new(Mutex::new(None));
    let handler_hits = hits.clone();
    let handler_body = last_body.clone();

    let app = Router::new().route(
        "/chat/completions",
        post(move |Json(body): Json<Value>| {
            let hits = handler_hits.clone();
            let last_body = handler_body.clone();
            let behavior = behavior.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                *last_body.lock().unwrap() = Some(body);

                match behavior {
                    GatewayBehavior::Success(content) => (
                        StatusCode::OK,
                        json!({
                            "model": "google/gemini-2.5-flash",
                            "choices": [{
                                "message": {"role": "assistant", "content": content},
                                "finish_reason": "stop"
                            }],
                            "usage": {
                                "prompt_tokens": 42,
                                "completion_tokens": 7,
                                "total_tokens": 49
                            }
                        })
                        .to_string(),
                    ),
                    GatewayBehavior::Status(code, body) => (
                        StatusCode::from_u16(code).expect("valid status code"),
                        body.to_owned(),
                    ),
                }
            }
        }),
    );

    let base_url = serve(app).await;
    MockGateway {
        base_url,
        hits,
        last_body,
    }
}

/// Bind an ephemeral port, serve the router in the background, return the base URL
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock listener");
    let addr = listener.local_addr().expect("Mock listener has no addr");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Mock server failed");
    });

    format!("http://{addr}")
}

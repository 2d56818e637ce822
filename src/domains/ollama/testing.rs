//! Fake upstream Ollama server for tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
};
use serde_json::{Value, json};

/// An axum router served on an ephemeral localhost port.
pub(crate) struct FakeUpstream {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl FakeUpstream {
    pub async fn spawn(router: Router) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = router.layer(middleware::from_fn_with_state(hits.clone(), count_hits));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            hits,
        }
    }

    /// Number of requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn count_hits(State(hits): State<Arc<AtomicUsize>>, request: Request, next: Next) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    next.run(request).await
}

/// A base URL on which nothing is listening.
pub(crate) fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub(crate) fn model_json(name: &str, family: &str) -> Value {
    json!({
        "name": name,
        "model": name,
        "modified_at": "2024-01-01T00:00:00Z",
        "size": 4000000000u64,
        "digest": "sha256:abc123",
        "details": {
            "parent_model": "",
            "format": "gguf",
            "family": family,
            "families": [family],
            "parameter_size": "7B",
            "quantization_level": "Q4_0"
        }
    })
}

pub(crate) fn generate_json(model: &str) -> Value {
    json!({
        "model": model,
        "created_at": "2024-01-01T00:00:00Z",
        "response": "Hello! How can I help you today?",
        "done": true,
        "context": [1, 2, 3],
        "total_duration": 1000000000u64,
        "load_duration": 100000000u64,
        "prompt_eval_count": 5,
        "prompt_eval_duration": 200000000u64,
        "eval_count": 10,
        "eval_duration": 700000000u64
    })
}

pub(crate) fn chat_json(model: &str) -> Value {
    json!({
        "model": model,
        "created_at": "2024-01-01T00:00:00Z",
        "message": {
            "role": "assistant",
            "content": "I'm doing well, thank you for asking!"
        },
        "done": true,
        "eval_count": 12,
        "eval_duration": 800000000u64
    })
}

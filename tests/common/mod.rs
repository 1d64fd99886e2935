use std::{collections::BTreeMap, net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
};
use serde_json::{Value, json};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone)]
pub struct Line {
    pub price: f64,
    pub quantity: i64,
}

#[derive(Debug, Default)]
pub struct ServerState {
    pub cart: BTreeMap<String, Line>,
    /// Method, path and `x-request-id` of every request seen.
    pub requests: Vec<(String, String, Option<String>)>,
    /// In-band status `GET /api/pay` answers with.
    pub pay_status: u16,
    /// HTTP status of the `GET /api/pay` response.
    pub pay_http_status: StatusCode,
    /// Replaces the `GET /api/pay` body when set.
    pub pay_body: Option<Value>,
    /// When set, cart mutations answer with this HTTP status instead of a summary.
    pub fail_with: Option<StatusCode>,
}

pub type Shared = Arc<Mutex<ServerState>>;

pub struct TestServer {
    pub addr: SocketAddr,
    pub state: Shared,
}

impl TestServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn requests(&self) -> Vec<(String, String, Option<String>)> {
        self.state.lock().await.requests.clone()
    }
}

pub async fn spawn() -> anyhow::Result<TestServer> {
    let state: Shared = Arc::new(Mutex::new(ServerState {
        pay_status: 200,
        ..ServerState::default()
    }));

    let app = Router::new()
        .route("/api/cart", post(add_to_cart))
        .route("/api/cart/{product_id}", put(update_cart).delete(delete_cart))
        .route("/api/pay", get(pay))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    Ok(TestServer { addr, state })
}

fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn summary(state: &ServerState) -> Value {
    let total_quantity: i64 = state.cart.values().map(|l| l.quantity).sum();
    let total_amount: f64 = state
        .cart
        .values()
        .map(|l| l.price * l.quantity as f64)
        .sum();
    json!({ "total_quantity": total_quantity, "total_amount": total_amount })
}

async fn add_to_cart(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut state = state.lock().await;
    state
        .requests
        .push(("POST".into(), "/api/cart".into(), request_id(&headers)));
    if let Some(status) = state.fail_with {
        return Err(status);
    }

    let id = body["id"].as_str().unwrap_or_default().to_string();
    let price = body["price"].as_f64().unwrap_or_default();
    state
        .cart
        .entry(id)
        .and_modify(|line| line.quantity += 1)
        .or_insert(Line {
            price,
            quantity: 1,
        });

    Ok(Json(json!({ "total_quantity": summary(&state)["total_quantity"] })))
}

async fn update_cart(
    State(state): State<Shared>,
    Path(product_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut state = state.lock().await;
    state.requests.push((
        "PUT".into(),
        format!("/api/cart/{product_id}"),
        request_id(&headers),
    ));
    if let Some(status) = state.fail_with {
        return Err(status);
    }

    let quantity = body["quantity"].as_i64().ok_or(StatusCode::BAD_REQUEST)?;
    if let Some(line) = state.cart.get_mut(&product_id) {
        line.quantity = quantity;
    }
    Ok(Json(summary(&state)))
}

async fn delete_cart(
    State(state): State<Shared>,
    Path(product_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    let mut state = state.lock().await;
    state.requests.push((
        "DELETE".into(),
        format!("/api/cart/{product_id}"),
        request_id(&headers),
    ));
    if let Some(status) = state.fail_with {
        return Err(status);
    }

    state.cart.remove(&product_id);
    Ok(Json(summary(&state)))
}

async fn pay(State(state): State<Shared>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().await;
    state
        .requests
        .push(("GET".into(), "/api/pay".into(), request_id(&headers)));
    if let Some(body) = state.pay_body.clone() {
        return (state.pay_http_status, Json(body));
    }
    let status = state.pay_status;
    if status == 200 {
        state.cart.clear();
    }
    (state.pay_http_status, Json(json!({ "status": status })))
}

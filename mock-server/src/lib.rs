use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

/// Fields every registration must carry as non-blank strings.
pub const REQUIRED_FIELDS: &[&str] = &["first_name", "last_name", "phone"];

/// A stored submission: the posted object as received, plus the id assigned to it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Registration {
    pub id: Uuid,
    pub fields: Map<String, Value>,
}

pub type Db = Arc<RwLock<Vec<Registration>>>;

type Reply = (StatusCode, Json<Value>);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/submit", post(submit))
        .route("/submissions", get(list_submissions))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn reply(status: StatusCode, message: impl Into<String>) -> Reply {
    (status, Json(json!({ "message": message.into() })))
}

async fn submit(State(db): State<Db>, body: Result<Json<Value>, JsonRejection>) -> Reply {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return reply(StatusCode::BAD_REQUEST, rejection.body_text()),
    };
    let Value::Object(fields) = body else {
        return reply(StatusCode::BAD_REQUEST, "expected a JSON object");
    };
    if let Some(missing) = first_blank(&fields) {
        return reply(StatusCode::UNPROCESSABLE_ENTITY, format!("{missing} is required"));
    }

    let registration = Registration {
        id: Uuid::new_v4(),
        fields,
    };
    info!(id = %registration.id, "registration stored");
    let id = registration.id;
    db.write().await.push(registration);
    (
        StatusCode::OK,
        Json(json!({ "message": "User registered successfully", "id": id })),
    )
}

async fn list_submissions(State(db): State<Db>) -> Json<Vec<Registration>> {
    Json(db.read().await.clone())
}

fn first_blank(fields: &Map<String, Value>) -> Option<&'static str> {
    REQUIRED_FIELDS.iter().copied().find(|name| {
        fields
            .get(*name)
            .and_then(Value::as_str)
            .map_or(true, |s| s.trim().is_empty())
    })
}

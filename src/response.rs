//! Response bodies shared by the handlers.

use crate::store::InsertOutcome;
use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;

/// Insert acknowledgement: the assigned identifier plus a success flag.
#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl From<InsertOutcome> for InsertAck {
    fn from(outcome: InsertOutcome) -> Self {
        InsertAck {
            acknowledged: true,
            inserted_id: outcome.inserted_id.to_hex(),
        }
    }
}

#[derive(Serialize)]
pub struct Message {
    pub msg: &'static str,
}

pub fn records(data: Vec<Value>) -> (StatusCode, Json<Vec<Value>>) {
    (StatusCode::OK, Json(data))
}

pub fn record(data: Value) -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(data))
}

pub fn inserted(outcome: InsertOutcome) -> (StatusCode, Json<InsertAck>) {
    (StatusCode::OK, Json(outcome.into()))
}

pub fn success() -> (StatusCode, Json<Message>) {
    (StatusCode::OK, Json(Message { msg: "success" }))
}

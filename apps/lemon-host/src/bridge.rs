//! # Command Bridge
//!
//! JSON-lines protocol between the presentation adapter and the host.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Adapter ──stdin──►  {"command":"set_field","field":"email","value":..} │
//! │                                    │                                    │
//! │                              decode Request                             │
//! │                                    │                                    │
//! │                        dispatch ──► commands::*                         │
//! │                                    │                                    │
//! │  Adapter ◄─stdout──  {"ok": <snapshot>}  |  {"error": {code, message}}  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One request line produces exactly one response line. A line that isn't
//! a valid request gets a `BAD_REQUEST` response and the loop keeps going.

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::commands;
use crate::error::{ApiError, ErrorCode, HostResult};
use crate::state::{HostConfig, ReservationState};

/// A decoded request line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Request {
    GetReservation,
    SetField { field: String, value: String },
    Submit,
    Reset,
    GetConfig,
}

/// One response line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    Ok(serde_json::Value),
    Error(ApiError),
}

impl Response {
    fn from_result<T: Serialize>(result: Result<T, ApiError>) -> Self {
        match result.and_then(|payload| {
            serde_json::to_value(payload).map_err(|e| ApiError::new(ErrorCode::Internal, e.to_string()))
        }) {
            Ok(value) => Response::Ok(value),
            Err(err) => Response::Error(err),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok(_))
    }
}

/// Runs one request against the host state.
pub fn dispatch(request: Request, state: &ReservationState, config: &HostConfig) -> Response {
    match request {
        Request::GetReservation => Response::from_result(Ok(commands::reservation::get_reservation(state))),
        Request::SetField { field, value } => {
            Response::from_result(commands::reservation::set_field(state, &field, &value))
        }
        Request::Submit => Response::from_result(commands::reservation::submit(state)),
        Request::Reset => Response::from_result(Ok(commands::reservation::reset(state))),
        Request::GetConfig => {
            Response::from_result(Ok(commands::config::get_config(config, state)))
        }
    }
}

/// Decodes and dispatches a single line.
pub fn handle_line(line: &str, state: &ReservationState, config: &HostConfig) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => dispatch(request, state, config),
        Err(e) => {
            warn!(error = %e, "Malformed request line");
            Response::Error(ApiError::bad_request(format!("Malformed request: {}", e)))
        }
    }
}

/// Serves requests until the reader hits EOF.
///
/// Blank lines are skipped. Returns the number of requests answered.
///
/// ## Errors
/// Only I/O failures on the streams end the loop early.
pub async fn serve<R, W>(
    reader: R,
    writer: &mut W,
    state: &ReservationState,
    config: &HostConfig,
) -> HostResult<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut answered = 0;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!(request = %line, "Bridge request");

        let response = handle_line(line, state, config);
        let mut encoded = serde_json::to_string(&response)?;
        encoded.push('\n');

        writer.write_all(encoded.as_bytes()).await?;
        writer.flush().await?;
        answered += 1;
    }

    info!(answered, "Bridge input closed");
    Ok(answered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lemon_core::{FixedClock, ReservationMachine};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::{json, Value};

    use crate::notifier::TracingNotifier;

    fn state() -> ReservationState {
        let machine = ReservationMachine::new(
            StdRng::seed_from_u64(11),
            Box::new(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())),
            Box::new(TracingNotifier),
        );
        ReservationState::from_machine(machine)
    }

    async fn run(input: &str) -> Vec<Value> {
        let state = state();
        let config = HostConfig::default();
        let mut out: Vec<u8> = Vec::new();

        serve(input.as_bytes(), &mut out, &state, &config).await.unwrap();

        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_request_decoding() {
        let req: Request =
            serde_json::from_str(r#"{"command":"set_field","field":"email","value":"a@b.co"}"#)
                .unwrap();
        assert_eq!(
            req,
            Request::SetField {
                field: "email".into(),
                value: "a@b.co".into()
            }
        );

        let req: Request = serde_json::from_str(r#"{"command":"reset"}"#).unwrap();
        assert_eq!(req, Request::Reset);
    }

    #[test]
    fn test_malformed_line_is_bad_request() {
        let response = handle_line("{not json", &state(), &HostConfig::default());
        match response {
            Response::Error(err) => assert_eq!(err.code, ErrorCode::BadRequest),
            Response::Ok(_) => panic!("expected error"),
        }

        let response = handle_line(r#"{"command":"launch"}"#, &state(), &HostConfig::default());
        assert!(!response.is_ok());
    }

    #[tokio::test]
    async fn test_one_response_per_line() {
        let responses = run(concat!(
            "{\"command\":\"get_config\"}\n",
            "\n",
            "garbage\n",
            "{\"command\":\"get_reservation\"}\n",
        ))
        .await;

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["ok"]["restaurantName"], "Little Lemon");
        assert_eq!(responses[1]["error"]["code"], "BAD_REQUEST");
        assert_eq!(responses[2]["ok"]["lifecycle"], "editing");
        assert_eq!(responses[2]["ok"]["draft"]["partySize"], 2);
    }

    #[tokio::test]
    async fn test_booking_over_the_bridge() {
        let mut input = String::new();
        for (field, value) in [
            ("date", "2026-10-19"),
            ("time", "19:30"),
            ("firstName", "Anna"),
            ("lastName", "K"),
            ("email", "a@b.com"),
            ("phone", "+7 999 123-45-67"),
        ] {
            input.push_str(
                &json!({"command": "set_field", "field": field, "value": value}).to_string(),
            );
            input.push('\n');
        }
        input.push_str("{\"command\":\"submit\"}\n");
        input.push_str("{\"command\":\"submit\"}\n");

        let responses = run(&input).await;

        assert_eq!(responses.len(), 8);
        assert!(responses[..6].iter().all(|r| r.get("ok").is_some()));

        let confirmed = &responses[6]["ok"];
        assert_eq!(confirmed["confirmed"], true);
        assert!(confirmed["reference"].is_string());
        assert_eq!(confirmed["snapshot"]["lifecycle"], "submitted");

        assert_eq!(responses[7]["error"]["code"], "INVALID_STATE");
    }

    #[tokio::test]
    async fn test_validation_errors_come_back_as_messages() {
        let responses = run(concat!(
            "{\"command\":\"set_field\",\"field\":\"email\",\"value\":\"nope\"}\n",
            "{\"command\":\"submit\"}\n",
        ))
        .await;

        let rejected = &responses[1]["ok"];
        assert_eq!(rejected["confirmed"], false);
        assert_eq!(rejected["snapshot"]["errors"]["email"], "invalid_format");
        assert!(rejected["snapshot"]["errorMessages"]["date"].is_string());
    }

    #[tokio::test]
    async fn test_unavailable_time_is_rejected() {
        let responses = run(concat!(
            "{\"command\":\"set_field\",\"field\":\"time\",\"value\":\"19:30\"}\n",
            "{\"command\":\"set_field\",\"field\":\"partySize\",\"value\":\"11\"}\n",
        ))
        .await;

        assert_eq!(responses[0]["error"]["code"], "SLOT_UNAVAILABLE");
        assert_eq!(responses[1]["error"]["code"], "INVALID_VALUE");
    }
}

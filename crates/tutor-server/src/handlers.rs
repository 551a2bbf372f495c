//! HTTP Handlers

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use tutor_core::{DEFAULT_GRADE_BAND, TutorError, TutorMode, build_prompt};
use tutor_quiz::{AnswerRecord, Question, QuizError, daily};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub gateway_connected: bool,
}

/// Study-helper request body.
///
/// The SPA sends either `topic` or `input`, and either `gradeLevel` or
/// `grade`; all fields are optional at the serde layer so validation can
/// produce the contract's error messages instead of a decode failure.
#[derive(Debug, Default, Deserialize)]
pub struct TutorRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default, rename = "gradeLevel", alias = "grade")]
    pub grade_level: Option<String>,
    #[serde(default)]
    pub stream: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TutorResponse {
    pub result: String,
    pub mode: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyResponse {
    pub date: String,
    pub question: Question,
    pub record: Option<AnswerRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAnswerRequest {
    pub answer_index: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAnswerResponse {
    pub correct: bool,
    pub correct_index: usize,
    pub fun_fact: String,
    pub record: AnswerRecord,
}

#[derive(Serialize)]
pub struct PracticeResponse {
    pub question: Question,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Map a gateway failure to the client-facing status and body.
///
/// 429 and 402 pass through with their upstream meaning; everything else
/// is a 500 whose body comes from `user_message` (configuration problems
/// stay generic for the client, detailed in the log).
fn gateway_error(err: &TutorError) -> ApiError {
    let status = match err {
        TutorError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        TutorError::QuotaExhausted(_) => StatusCode::PAYMENT_REQUIRED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::error!("Gateway error: {}", err);
    (
        status,
        Json(ErrorResponse {
            error: err.user_message(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let gateway_connected = state.gateway.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        gateway_connected,
    })
}

/// AI study helper proxy.
///
/// Validates the request, maps the mode to its prompt pair, makes exactly
/// one downstream call, and relays the result. With `stream` (the
/// default) the downstream event-stream body is piped through unbuffered;
/// with `stream:false` the first completion's content comes back as
/// `{result, mode}`.
pub async fn tutor_handler(
    State(state): State<AppState>,
    Json(payload): Json<TutorRequest>,
) -> Result<Response, ApiError> {
    let topic = payload
        .topic
        .or(payload.input)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    let mode_raw = payload.mode.filter(|m| !m.trim().is_empty());

    let (Some(topic), Some(mode_raw)) = (topic, mode_raw) else {
        return Err(bad_request("Topic/input and mode are required"));
    };

    let mode: TutorMode = mode_raw
        .parse()
        .map_err(|e: TutorError| bad_request(e.user_message()))?;

    let grade_band = payload
        .grade_level
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .unwrap_or_else(|| DEFAULT_GRADE_BAND.to_string());

    let stream = payload.stream.unwrap_or(true);

    let messages = build_prompt(mode, &topic, &grade_band).to_messages();

    if stream {
        let relayed = state
            .gateway
            .complete_stream(&messages)
            .await
            .map_err(|e| gateway_error(&e))?;

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/event-stream")
            .header(header::CACHE_CONTROL, "no-cache")
            .body(Body::from_stream(relayed))
            .map_err(|e| {
                tracing::error!("Failed to build relay response: {}", e);
                gateway_error(&TutorError::Other(e.to_string()))
            })
    } else {
        let content = state
            .gateway
            .complete(&messages)
            .await
            .map_err(|e| gateway_error(&e))?;

        Ok(Json(TutorResponse {
            result: content,
            mode: mode.to_string(),
        })
        .into_response())
    }
}

/// Question of the day, plus the answer record if it survived the date gate
pub async fn daily_question(State(state): State<AppState>) -> Json<DailyResponse> {
    let today = daily::today();
    let question = daily::question_for_date(today);
    let day = daily::day_key(today);
    let record = state.progress.restore(&day, &question);

    Json(DailyResponse {
        date: day,
        question,
        record,
    })
}

/// Grade an answer to today's question and persist the record wholesale
pub async fn answer_daily(
    State(state): State<AppState>,
    Json(payload): Json<DailyAnswerRequest>,
) -> Result<Json<DailyAnswerResponse>, ApiError> {
    let today = daily::today();
    let question = daily::question_for_date(today);
    let day = daily::day_key(today);

    let record = state
        .progress
        .record_answer(&day, &question, payload.answer_index)
        .map_err(|e| match e {
            QuizError::AnswerOutOfRange(_) => bad_request(e.to_string()),
            other => {
                tracing::error!("Failed to save answer record: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Could not save your answer".into(),
                    }),
                )
            }
        })?;

    Ok(Json(DailyAnswerResponse {
        correct: record.is_correct,
        correct_index: question.correct_index,
        fun_fact: question.fun_fact,
        record,
    }))
}

/// Explicit "try again": drop today's record
pub async fn reset_daily(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.progress.reset().map_err(|e| {
        tracing::error!("Failed to clear answer record: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Could not reset today's question".into(),
            }),
        )
    })?;

    Ok(StatusCode::NO_CONTENT)
}

/// A fresh, non-persisted practice question
pub async fn practice_question(State(_state): State<AppState>) -> Json<PracticeResponse> {
    Json(PracticeResponse {
        question: daily::practice_question(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tutor_gateway::{MockFailure, MockGateway};
    use tutor_quiz::{DailyProgress, MemoryStore};

    fn test_state(gateway: MockGateway) -> AppState {
        AppState {
            gateway: Arc::new(gateway),
            progress: Arc::new(DailyProgress::new(MemoryStore::new())),
        }
    }

    fn request(topic: Option<&str>, mode: Option<&str>) -> TutorRequest {
        TutorRequest {
            topic: topic.map(String::from),
            mode: mode.map(String::from),
            ..TutorRequest::default()
        }
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_empty_body_is_rejected() {
        let state = test_state(MockGateway::default());
        let (status, Json(body)) = tutor_handler(State(state), Json(TutorRequest::default()))
            .await
            .unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Topic/input and mode are required");
    }

    #[tokio::test]
    async fn test_blank_topic_is_rejected() {
        let state = test_state(MockGateway::default());
        let (status, _) = tutor_handler(State(state), Json(request(Some("   "), Some("explain"))))
            .await
            .unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_input_is_accepted_as_topic_alias() {
        let state = test_state(MockGateway::replying("ok"));
        let payload = TutorRequest {
            input: Some("fractions".into()),
            mode: Some("explain".into()),
            stream: Some(false),
            ..TutorRequest::default()
        };

        let response = tutor_handler(State(state), Json(payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_mode_names_allowed_values() {
        let state = test_state(MockGateway::default());
        let (status, Json(body)) =
            tutor_handler(State(state), Json(request(Some("x"), Some("not-a-mode"))))
                .await
                .unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        for name in TutorMode::ALL {
            assert!(body.error.contains(name), "error should name {name}: {}", body.error);
        }
    }

    #[tokio::test]
    async fn test_buffered_roundtrip() {
        let reply = "A fraction is a part of a whole.";
        let state = test_state(MockGateway::replying(reply));
        let payload = TutorRequest {
            topic: Some("fractions".into()),
            mode: Some("explain".into()),
            stream: Some(false),
            ..TutorRequest::default()
        };

        let response = tutor_handler(State(state), Json(payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: TutorResponse = body_json(response).await;
        assert_eq!(body.result, reply);
        assert_eq!(body.mode, "explain");
    }

    #[tokio::test]
    async fn test_stream_is_the_default() {
        let state = test_state(MockGateway::replying("streamed content"));
        let response = tutor_handler(State(state), Json(request(Some("fractions"), Some("explain"))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("text/event-stream")
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("streamed content"));
        assert!(text.starts_with("data: "), "relayed body should be untouched");
    }

    #[tokio::test]
    async fn test_upstream_rate_limit_maps_to_429() {
        let state = test_state(MockGateway::failing(MockFailure::RateLimited));
        let (status, Json(body)) =
            tutor_handler(State(state), Json(request(Some("x"), Some("quiz"))))
                .await
                .unwrap_err();

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert!(body.error.to_lowercase().contains("too many requests"));
    }

    #[tokio::test]
    async fn test_upstream_quota_maps_to_402() {
        let state = test_state(MockGateway::failing(MockFailure::QuotaExhausted));
        let (status, Json(body)) =
            tutor_handler(State(state), Json(request(Some("x"), Some("quiz"))))
                .await
                .unwrap_err();

        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert!(body.error.to_lowercase().contains("limit"));
    }

    #[tokio::test]
    async fn test_upstream_failure_collapses_to_500() {
        let state = test_state(MockGateway::failing(MockFailure::Unavailable));
        let (status, Json(body)) =
            tutor_handler(State(state), Json(request(Some("x"), Some("practice"))))
                .await
                .unwrap_err();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.error.contains("unavailable"));
    }

    #[tokio::test]
    async fn test_missing_credential_stays_generic() {
        let state = test_state(MockGateway::failing(MockFailure::MissingCredential));
        let (status, Json(body)) =
            tutor_handler(State(state), Json(request(Some("x"), Some("explain"))))
                .await
                .unwrap_err();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.error.contains("AI_GATEWAY_API_KEY"), "no config details leak");
    }

    #[tokio::test]
    async fn test_empty_completion_maps_to_500_no_response() {
        let state = test_state(MockGateway::failing(MockFailure::EmptyCompletion));
        let payload = TutorRequest {
            topic: Some("x".into()),
            mode: Some("explain".into()),
            stream: Some(false),
            ..TutorRequest::default()
        };

        let (status, Json(body)) = tutor_handler(State(state), Json(payload)).await.unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.error.contains("No response"));
    }

    #[tokio::test]
    async fn test_daily_answer_flow() {
        let state = test_state(MockGateway::default());
        let question = daily::question_for_date(daily::today());

        // First visit: no record.
        let Json(before) = daily_question(State(state.clone())).await;
        assert!(before.record.is_none());
        assert_eq!(before.question.id, question.id);

        // Answer correctly; the grade and the persisted record agree.
        let Json(graded) = answer_daily(
            State(state.clone()),
            Json(DailyAnswerRequest {
                answer_index: question.correct_index,
            }),
        )
        .await
        .unwrap();
        assert!(graded.correct);
        assert_eq!(graded.correct_index, question.correct_index);

        // The record survives within the same day.
        let Json(after) = daily_question(State(state.clone())).await;
        assert_eq!(after.record, Some(graded.record));

        // "Try again" clears it.
        assert_eq!(
            reset_daily(State(state.clone())).await.unwrap(),
            StatusCode::NO_CONTENT
        );
        let Json(reset) = daily_question(State(state)).await;
        assert!(reset.record.is_none());
    }

    #[tokio::test]
    async fn test_daily_answer_out_of_range() {
        let state = test_state(MockGateway::default());
        let (status, _) = answer_daily(State(state), Json(DailyAnswerRequest { answer_index: 4 }))
            .await
            .unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_practice_question_is_well_formed() {
        let state = test_state(MockGateway::default());
        let Json(body) = practice_question(State(state)).await;
        assert!(body.question.correct_index < 4);
    }

    #[tokio::test]
    async fn test_health_reports_gateway() {
        let Json(healthy) = health_check(State(test_state(MockGateway::default()))).await;
        assert!(healthy.gateway_connected);

        let Json(degraded) =
            health_check(State(test_state(MockGateway::failing(MockFailure::Unavailable)))).await;
        assert!(!degraded.gateway_connected);
        assert_eq!(degraded.status, "healthy");
    }
}

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::UploadedDocument;
use crate::scoring::ScoreBreakdown;
use crate::screening::pipeline::{DocumentFailure, FailurePolicy, ResultRecord};
use crate::screening::sample::SAMPLE_JOB_DESCRIPTION;
use crate::state::AppState;

const JOB_DESCRIPTION_FIELD: &str = "job_description";
const RESUMES_FIELD: &str = "resumes";

#[derive(Debug, Default, Deserialize)]
pub struct ScreeningQuery {
    #[serde(default)]
    pub on_error: FailurePolicy,
}

#[derive(Debug, Serialize)]
pub struct ScreeningResponse {
    pub run_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub results: Vec<ResultRecord>,
    pub failures: Vec<DocumentFailure>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub job_description: String,
    pub resume_text: String,
}

/// POST /api/v1/screenings
///
/// Multipart form: a `job_description` text field plus one or more
/// `resumes` file fields. Unknown fields are ignored.
pub async fn handle_screen(
    State(state): State<AppState>,
    Query(query): Query<ScreeningQuery>,
    mut multipart: Multipart,
) -> Result<Json<ScreeningResponse>, AppError> {
    let mut job_description = String::new();
    let mut documents = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(JOB_DESCRIPTION_FIELD) => {
                job_description = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid job description: {e}")))?;
            }
            Some(RESUMES_FIELD) => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .filter(|name| !name.trim().is_empty())
                    .ok_or_else(|| {
                        AppError::Validation("Every resume upload needs a filename".to_string())
                    })?;
                let bytes: Bytes = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read '{filename}': {e}"))
                })?;
                documents.push(UploadedDocument::new(filename, bytes));
            }
            _ => {}
        }
    }

    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description must not be empty".to_string(),
        ));
    }
    if documents.is_empty() {
        return Err(AppError::Validation(
            "At least one resume must be uploaded".to_string(),
        ));
    }

    let run_id = Uuid::new_v4();
    info!(
        %run_id,
        resumes = documents.len(),
        policy = ?query.on_error,
        "Screening run started"
    );

    let screener = state.screener.clone();
    let policy = query.on_error;
    let report = tokio::task::spawn_blocking(move || {
        screener.screen(&job_description, &documents, policy)
    })
    .await
    .map_err(|e| anyhow::anyhow!("Screening task failed: {e}"))??;

    Ok(Json(ScreeningResponse {
        run_id,
        analyzed_at: Utc::now(),
        results: report.results,
        failures: report.failures,
    }))
}

/// POST /api/v1/screenings/score
/// Scores already-extracted resume text against a job description.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(req): Json<ScoreRequest>,
) -> Result<Json<ScoreBreakdown>, AppError> {
    let scores = state
        .screener
        .scorer()
        .score_text(&req.job_description, &req.resume_text);
    Ok(Json(scores))
}

/// GET /api/v1/screenings/sample-job-description
pub async fn handle_sample_job_description() -> Json<Value> {
    Json(json!({ "job_description": SAMPLE_JOB_DESCRIPTION }))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::extraction::docx::tests::build_docx;
    use crate::routes::build_router;

    const BOUNDARY: &str = "screener-test-boundary";

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, Vec<u8>),
    }

    fn multipart_body(parts: &[Part]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File(name, filename, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn app() -> Router {
        build_router(AppState::for_tests())
    }

    async fn post_screening(uri: &str, parts: &[Part<'_>]) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        send(request).await
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_screening_ranks_and_reports_failures() {
        let (status, body) = post_screening(
            "/api/v1/screenings",
            &[
                Part::Text("job_description", SAMPLE_JOB_DESCRIPTION),
                Part::File(
                    "resumes",
                    "weak.docx",
                    build_docx(&["Retail associate, customer service"]),
                ),
                Part::File(
                    "resumes",
                    "strong.docx",
                    build_docx(&[
                        "Python developer with 6 years of experience",
                        "Django, Flask, AWS, machine learning",
                        "Bachelor of Science in Computer Science",
                    ]),
                ),
                Part::File("resumes", "broken.pdf", b"%PDF-garbage".to_vec()),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::OK, "body: {body}");
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["filename"], "strong.docx");
        assert!(
            results[0]["scores"]["overall_score"].as_f64().unwrap()
                > results[1]["scores"]["overall_score"].as_f64().unwrap()
        );
        assert!(results[0]["entities"].get("PERSON").is_some());
        assert_eq!(body["failures"][0]["filename"], "broken.pdf");
        assert!(body["run_id"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_abort_policy_maps_to_error_status() {
        let (status, body) = post_screening(
            "/api/v1/screenings?on_error=abort",
            &[
                Part::Text("job_description", "Python developer"),
                Part::File("resumes", "resume.txt", b"plain text".to_vec()),
            ],
        )
        .await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FORMAT");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("resume.txt"));
    }

    #[tokio::test]
    async fn test_abort_policy_on_corrupt_pdf_is_unprocessable() {
        let (status, body) = post_screening(
            "/api/v1/screenings?on_error=abort",
            &[
                Part::Text("job_description", "Python developer"),
                Part::File("resumes", "cv.pdf", b"not a pdf".to_vec()),
            ],
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "EXTRACTION_FAILED");
    }

    #[tokio::test]
    async fn test_missing_job_description_is_rejected() {
        let (status, body) = post_screening(
            "/api/v1/screenings",
            &[
                Part::Text("job_description", "   "),
                Part::File("resumes", "a.docx", build_docx(&["Python"])),
            ],
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_resumes_is_rejected() {
        let (status, _) = post_screening(
            "/api/v1/screenings",
            &[Part::Text("job_description", "Python developer")],
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_score_endpoint() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/screenings/score")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "job_description": "Senior Software Engineer requiring Python and AWS experience, 5+ years, Bachelor's degree required",
                    "resume_text": "Experienced Python developer, 6 years, AWS certified, Bachelor of Science in Computer Science"
                })
                .to_string(),
            ))
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["overall_score"].as_f64().unwrap() > 50.0);
        assert_eq!(body["matched_skills"], json!(["aws", "python"]));
        assert_eq!(body["missing_skills"], json!([]));
    }

    #[tokio::test]
    async fn test_sample_job_description() {
        let request = Request::builder()
            .uri("/api/v1/screenings/sample-job-description")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["job_description"]
            .as_str()
            .unwrap()
            .starts_with("Senior Software Engineer"));
    }
}

//! File upload handler.
//!
//! ```text
//! POST /api/files/upload   (multipart/form-data, field "file")
//! ```
//!
//! The body is buffered up to the configured limit, then forwarded to the
//! file store. Parts other than `file` are drained and ignored, but their
//! combined size counts against the same limit.

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{HttpResponse, post, web};
use futures_util::TryStreamExt as _;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, UploadedFile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    #[schema(example = "https://res.cloudinary.com/demo/raw/upload/v1/learners/essay.pdf")]
    pub url: String,
}

/// Multipart form accepted by the upload endpoint.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

fn malformed(error: MultipartError) -> Error {
    Error::invalid_request(format!("malformed multipart body: {error}"))
}

fn too_large(limit: usize) -> Error {
    Error::invalid_request(format!("file exceeds the {limit} byte limit"))
        .with_details(json!({"field": FILE_FIELD, "code": "too_long"}))
}

/// Buffer one part, failing as soon as it grows past `limit`.
async fn read_limited(field: &mut Field, limit: usize) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        if bytes.len() + chunk.len() > limit {
            return Err(too_large(limit));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// Drain a part other than the upload, charging its bytes to `budget`.
async fn skip_part(field: &mut Field, budget: &mut usize, limit: usize) -> Result<(), Error> {
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        *budget = budget.checked_sub(chunk.len()).ok_or_else(|| {
            Error::invalid_request(format!("form fields exceed the {limit} byte limit"))
                .with_details(json!({"code": "too_long"}))
        })?;
    }
    Ok(())
}

async fn read_upload(mut payload: Multipart, limit: usize) -> Result<UploadedFile, Error> {
    let mut extra_budget = limit;
    while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
        if field.name() != Some(FILE_FIELD) {
            skip_part(&mut field, &mut extra_budget, limit).await?;
            continue;
        }
        let file_name = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .map(str::to_owned);
        let content_type = field.content_type().map(ToString::to_string);
        let bytes = read_limited(&mut field, limit).await?;
        return Ok(UploadedFile::new(
            file_name.as_deref(),
            content_type,
            bytes,
            limit,
        )?);
    }
    Err(missing_field_error(FieldName::new(FILE_FIELD)))
}

/// Upload a file to the external store and return its public URL.
#[utoipa::path(
    post,
    path = "/api/files/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Stored", body = UploadResponse),
        (status = 400, description = "Missing, empty or oversized file", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "File store unavailable", body = ErrorSchema)
    ),
    tags = ["files"],
    operation_id = "uploadFile"
)]
#[post("/files/upload")]
pub async fn upload_file(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Multipart,
) -> ApiResult<HttpResponse> {
    session.require_caller()?;
    let file = read_upload(payload, state.upload_limit).await?;
    let stored = state.uploads.upload(file).await?;
    Ok(HttpResponse::Created().json(UploadResponse { url: stored.url }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::StoredFile;
    use crate::domain::ports::MockFileUploadCommand;
    use crate::inbound::http::test_utils::{login_cookie, mock_ports, teacher, test_app};
    use actix_web::http::{StatusCode, header};
    use actix_web::test as actix_test;
    use serde_json::Value;

    const BOUNDARY: &str = "learners-boundary";

    fn multipart_body(field: &str, file_name: &str, contents: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; \
             filename=\"{file_name}\"\r\nContent-Type: text/plain\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(contents);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(body: Vec<u8>) -> actix_test::TestRequest {
        actix_test::TestRequest::post()
            .uri("/api/files/upload")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
    }

    fn state_with(uploads: MockFileUploadCommand, limit: usize) -> HttpState {
        let mut ports = mock_ports();
        ports.uploads = Arc::new(uploads);
        HttpState::new(ports).with_upload_limit(limit)
    }

    #[actix_web::test]
    async fn uploads_the_file_part() {
        let mut uploads = MockFileUploadCommand::new();
        uploads
            .expect_upload()
            .withf(|file| file.file_name == "notes.txt" && file.bytes == b"hello")
            .return_once(|_| {
                Ok(StoredFile {
                    url: "https://cdn.example/notes.txt".to_owned(),
                })
            });
        let app = actix_test::init_service(test_app(state_with(uploads, 1024), teacher())).await;
        let cookie = login_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            upload_request(multipart_body("file", "notes.txt", b"hello"))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["url"], "https://cdn.example/notes.txt");
    }

    #[actix_web::test]
    async fn oversized_files_are_rejected() {
        let mut uploads = MockFileUploadCommand::new();
        uploads.expect_upload().never();
        let app = actix_test::init_service(test_app(state_with(uploads, 4), teacher())).await;
        let cookie = login_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            upload_request(multipart_body("file", "notes.txt", b"too many bytes"))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn oversized_extra_parts_are_rejected() {
        let mut uploads = MockFileUploadCommand::new();
        uploads.expect_upload().never();
        let app = actix_test::init_service(test_app(state_with(uploads, 8), teacher())).await;
        let cookie = login_cookie(&app).await;

        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"comment\"\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(&[b'x'; 64]);
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&multipart_body("file", "notes.txt", b"ok"));

        let res = actix_test::call_service(
            &app,
            upload_request(body).cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], "too_long");
    }

    #[actix_web::test]
    async fn missing_file_part_is_rejected() {
        let mut uploads = MockFileUploadCommand::new();
        uploads.expect_upload().never();
        let app = actix_test::init_service(test_app(state_with(uploads, 1024), teacher())).await;
        let cookie = login_cookie(&app).await;

        let res = actix_test::call_service(
            &app,
            upload_request(multipart_body("attachment", "notes.txt", b"hello"))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "file");
    }
}

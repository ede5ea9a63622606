use crate::domain::model::validate_title;
use crate::domain::upload::{parse, ParseError, UploadFormat};
use crate::transport::http::auth::AuthUser;
use crate::transport::http::error::{file_too_large, ApiError};
use crate::transport::http::types::{ApiResponse, AppState, UploadedMenu};
use axum::body::Bytes;
use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;

struct UploadedFile {
    format: Option<UploadFormat>,
    bytes: Bytes,
}

#[derive(Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    title: Option<String>,
    description: Option<String>,
}

fn multipart_error(err: MultipartError, max_file_bytes: usize) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::bad_request(file_too_large(max_file_bytes));
    }
    ApiError::BadRequest {
        message: "File upload error".to_string(),
        detail: Some(err.body_text()),
    }
}

async fn read_text(field: Field<'_>, max_file_bytes: usize) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| multipart_error(e, max_file_bytes))
}

async fn read_form(
    mut multipart: Multipart,
    max_file_bytes: usize,
) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_file_bytes))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "menuFile" | "file" => {
                let format = UploadFormat::detect(field.content_type(), field.file_name());
                if format.is_none() {
                    return Err(ParseError::UnsupportedFormat.into());
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, max_file_bytes))?;
                if bytes.len() > max_file_bytes {
                    return Err(ApiError::bad_request(file_too_large(max_file_bytes)));
                }
                form.file = Some(UploadedFile { format, bytes });
            }
            "title" => form.title = Some(read_text(field, max_file_bytes).await?),
            "description" => form.description = Some(read_text(field, max_file_bytes).await?),
            _ => {}
        }
    }

    Ok(form)
}

#[utoipa::path(
    post,
    path = "/api/menu/upload",
    request_body(content = UploadMenuForm, content_type = "multipart/form-data"),
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Menu uploaded successfully", body = ApiResponse),
        (status = 400, description = "Malformed file, bad form fields or invalid rows", body = ApiResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ApiResponse),
        (status = 500, description = "Persistence failure", body = ApiResponse)
    )
)]
pub async fn upload_menu_handler(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse>), ApiError> {
    let form = read_form(multipart, state.limits.max_file_bytes).await?;

    let title = validate_title(form.title.as_deref().unwrap_or_default())
        .map_err(|problem| ApiError::field("Validation failed", "title", problem))?;

    let file = form
        .file
        .ok_or_else(|| ApiError::bad_request("No file uploaded"))?;
    let format = file.format.ok_or(ParseError::UnsupportedFormat)?;
    let records = parse(&file.bytes, format)?;

    let report = state
        .ingestion
        .ingest(user.id, &title, form.description.as_deref(), &records)
        .await?;

    let data = UploadedMenu {
        menu_id: report.menu_id,
        items_processed: report.items_processed,
        title,
    };
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            "Menu uploaded successfully",
            serde_json::to_value(data).ok(),
        )),
    ))
}

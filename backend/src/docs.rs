#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::{
    error::ErrorResponse,
    handlers::{attendance::HistoryQuery, health::HealthResponse},
    models::attendance::{AttendanceResponse, AttendanceStatusResponse, HistoryResponse},
};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Ledger API",
        description = "Check-in/check-out sessions and paginated attendance history."
    ),
    paths(
        check_in_doc,
        check_out_doc,
        attendance_status_doc,
        attendance_history_doc,
        health_doc
    ),
    components(
        schemas(
            AttendanceResponse,
            AttendanceStatusResponse,
            HistoryResponse,
            HealthResponse,
            ErrorResponse
        )
    ),
    modifiers(&UserHeader),
    tags(
        (name = "Attendance", description = "Check-in, check-out and history"),
        (name = "System", description = "Service health")
    )
)]
pub struct ApiDoc;

struct UserHeader;

impl Modify for UserHeader {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "UserHeader",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("x-user-id"))),
        );
    }
}

#[utoipa::path(
    post,
    path = "/attendance/check-in",
    responses(
        (status = 201, description = "Session opened", body = AttendanceResponse),
        (status = 409, description = "User already has an open session", body = ErrorResponse)
    ),
    tag = "Attendance",
    security((), ("UserHeader" = []))
)]
fn check_in_doc() {}

#[utoipa::path(
    patch,
    path = "/attendance/check-out",
    responses(
        (status = 200, description = "Session closed", body = AttendanceResponse),
        (status = 400, description = "No active session", body = ErrorResponse)
    ),
    tag = "Attendance",
    security((), ("UserHeader" = []))
)]
fn check_out_doc() {}

#[utoipa::path(
    get,
    path = "/attendance/status",
    responses((status = 200, description = "Whether the user is checked in", body = AttendanceStatusResponse)),
    tag = "Attendance",
    security((), ("UserHeader" = []))
)]
fn attendance_status_doc() {}

#[utoipa::path(
    get,
    path = "/attendance",
    params(HistoryQuery),
    responses(
        (status = 200, description = "History page, most recent first", body = HistoryResponse),
        (status = 400, description = "Invalid page or limit", body = ErrorResponse)
    ),
    tag = "Attendance",
    security((), ("UserHeader" = []))
)]
fn attendance_history_doc() {}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, body = HealthResponse)),
    tag = "System",
    security(())
)]
fn health_doc() {}

use actix_files::Files;
use actix_web::http::StatusCode;
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer, ResponseError};
use chrono::Local;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::display::format_pub;
use crate::error::SchedulingError;
use crate::form::{validate_comment_submission, validate_pub_submission, CommentSubmission, PubSubmission};
use crate::schedule::{format_date_short, Direction};
use crate::service::PubService;
use crate::store::JsonFileStore;

pub const ADMIN_PASSWORD_HEADER: &str = "X-Admin-Password";
pub const SUBMITTER_HEADER: &str = "X-Nomad-Id";

pub struct AppState {
    pub service: PubService,
    pub admin_password: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Scheduling(#[from] SchedulingError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Scheduling(SchedulingError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Scheduling(SchedulingError::InvalidState(_)) => StatusCode::CONFLICT,
            ApiError::Scheduling(SchedulingError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            warn!(error = %self, "request failed");
        }
        HttpResponse::build(self.status_code()).json(serde_json::json!({"success": false, "error": self.to_string()}))
    }
}

type ApiResult = Result<HttpResponse, ApiError>;

#[derive(Deserialize)]
pub struct MoveRequest {
    id: String,
    #[serde(default)]
    direction: Direction,
}

#[derive(Deserialize)]
pub struct DeleteRequest {
    id: String,
}

#[derive(Serialize)]
pub struct PosterEntry {
    date: String,
    name: String,
    line: String,
}

fn submitter(req: &HttpRequest) -> Option<&str> {
    req.headers().get(SUBMITTER_HEADER).and_then(|v| v.to_str().ok())
}

fn require_moderator(req: &HttpRequest, state: &AppState) -> Result<(), ApiError> {
    let password = req
        .headers()
        .get(ADMIN_PASSWORD_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if password != state.admin_password {
        warn!(path = %req.path(), "rejected moderator request");
        return Err(ApiError::Unauthorized);
    }
    Ok(())
}

// Front page data
async fn overview(state: web::Data<AppState>) -> ApiResult {
    Ok(HttpResponse::Ok().json(state.service.overview()?))
}

async fn archive(state: web::Data<AppState>) -> ApiResult {
    Ok(HttpResponse::Ok().json(state.service.archive()?))
}

async fn poster(state: web::Data<AppState>) -> ApiResult {
    let pubs: Vec<PosterEntry> = state
        .service
        .poster()?
        .iter()
        .filter_map(|a| {
            a.scheduled_date.map(|d| PosterEntry {
                date: format_date_short(d),
                name: a.name.clone(),
                line: format_pub(a),
            })
        })
        .collect();
    Ok(HttpResponse::Ok().json(serde_json::json!({ "pubs": pubs })))
}

async fn enter_pub(req: HttpRequest, form: web::Json<PubSubmission>, state: web::Data<AppState>) -> ApiResult {
    validate_pub_submission(&form).map_err(ApiError::Validation)?;

    let appointment = state.service.enter_pub(&form, submitter(&req), Local::now().naive_local())?;
    Ok(HttpResponse::Created().json(serde_json::json!({"success": true, "id": appointment.id})))
}

async fn comment(req: HttpRequest, form: web::Json<CommentSubmission>, state: web::Data<AppState>) -> ApiResult {
    validate_comment_submission(&form).map_err(ApiError::Validation)?;

    state.service.comment(&form, submitter(&req), Local::now().naive_local())?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
}

async fn move_pub(body: web::Json<MoveRequest>, state: web::Data<AppState>) -> ApiResult {
    state.service.move_entry(&body.id, body.direction)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
}

// Moderator only
async fn delete_pub(req: HttpRequest, body: web::Json<DeleteRequest>, state: web::Data<AppState>) -> ApiResult {
    require_moderator(&req, &state)?;

    state.service.delete(&body.id, submitter(&req), Local::now().naive_local())?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
}

// Weekly job, triggered by cron or a moderator
async fn schedule_pubs(req: HttpRequest, state: web::Data<AppState>) -> ApiResult {
    require_moderator(&req, &state)?;

    let report = state.service.run_weekly(Local::now().date_naive())?;
    Ok(HttpResponse::Ok().json(report))
}

/// Headers sent with every response
pub fn security_headers() -> middleware::DefaultHeaders {
    middleware::DefaultHeaders::new()
        .add(("Content-Security-Policy", "default-src 'self'; img-src 'self'; frame-ancestors 'none'"))
        .add(("Strict-Transport-Security", "max-age=31536000"))
        .add(("X-Frame-Options", "DENY"))
        .add(("X-XSS-Protection", "1; mode=block"))
        .add(("X-Content-Type-Options", "nosniff"))
}

/// JSON API routes
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/overview", web::get().to(overview))
            .route("/archive", web::get().to(archive))
            .route("/poster", web::get().to(poster))
            .route("/pubs", web::post().to(enter_pub))
            .route("/comments", web::post().to(comment))
            .route("/move", web::post().to(move_pub))
            .route("/delete", web::post().to(delete_pub))
            .route("/schedule", web::post().to(schedule_pubs)),
    );
}

pub async fn start_server(config: Config) -> std::io::Result<()> {
    let store = JsonFileStore::new(&config.data_file);
    info!(port = config.port, data = %store.path().display(), lock = %store.lock_path().display(), "starting web server");

    let app_state = web::Data::new(AppState {
        service: PubService::new(Box::new(store)),
        admin_password: config.admin_password.clone(),
    });
    let static_dir = config.static_dir.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(security_headers())
            .wrap(middleware::Logger::default())
            .configure(api_routes)
            .service(Files::new("/", static_dir.clone()).index_file("index.html"))
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}

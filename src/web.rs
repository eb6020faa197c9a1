use std::collections::BTreeMap;

use actix_files::Files;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use serde::Serialize;

use crate::config::ServerConfig;
use crate::error::{RosterError, RosterResult};
use crate::form::{build_daily_roster, daily_roster_csv_bytes, roster_file_name, GenerateRequest, GenerationInputs};
use crate::schedule::{generate_schedule, Employee, GeneratedSchedule, TimelineEntry};

#[derive(Serialize)]
pub struct AssignmentView {
    pub day: u32,
    pub shift: String,
    pub assigned: String,
}

#[derive(Serialize)]
pub struct EmployeeTotal {
    pub name: String,
    pub hours_worked: f64,
    pub target_monthly_hours: u32,
}

#[derive(Serialize)]
pub struct PreviewResponse {
    pub year: i32,
    pub month: u32,
    pub assignments: Vec<AssignmentView>,
    pub timelines: BTreeMap<String, Vec<TimelineEntry>>,
    pub totals: Vec<EmployeeTotal>,
}

impl PreviewResponse {
    fn new(schedule: GeneratedSchedule, employees: &[Employee]) -> Self {
        Self {
            year: schedule.year,
            month: schedule.month,
            assignments: schedule
                .assignments
                .into_iter()
                .map(|(key, assigned)| AssignmentView {
                    day: key.day,
                    shift: key.shift,
                    assigned,
                })
                .collect(),
            timelines: schedule.timelines,
            totals: employees
                .iter()
                .map(|e| EmployeeTotal {
                    name: e.name.clone(),
                    hours_worked: e.hours_worked,
                    target_monthly_hours: e.target_monthly_hours,
                })
                .collect(),
        }
    }
}

/// Parses the request and runs one generation on its own copy of the inputs
fn run_generation(req: GenerateRequest) -> RosterResult<(GeneratedSchedule, Vec<Employee>)> {
    let GenerationInputs {
        mut employees,
        plan,
        overrides,
        year,
        month,
    } = req.into_inputs()?;

    let schedule = generate_schedule(&mut employees, &plan, &overrides, year, month)?;
    Ok((schedule, employees))
}

fn error_response(err: RosterError) -> HttpResponse {
    match err {
        RosterError::Validation(msg) => {
            HttpResponse::BadRequest().json(serde_json::json!({"success": false, "error": msg}))
        }
        RosterError::InvalidMonth { .. } => HttpResponse::BadRequest()
            .json(serde_json::json!({"success": false, "error": err.to_string()})),
        other => {
            log::error!("Generation failed: {}", other);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({"success": false, "error": "Failed to generate roster"}))
        }
    }
}

// Roster download endpoint
async fn generate(req: web::Json<GenerateRequest>) -> Result<HttpResponse> {
    log::info!("Received generation request for {}/{}", req.month, req.year);

    let (schedule, employees) = match run_generation(req.into_inner()) {
        Ok(result) => result,
        Err(e) => return Ok(error_response(e)),
    };

    let bytes = match build_daily_roster(&schedule, &employees).and_then(|r| daily_roster_csv_bytes(&r)) {
        Ok(bytes) => bytes,
        Err(e) => return Ok(error_response(e)),
    };

    let file_name = roster_file_name(schedule.year, schedule.month);
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", file_name),
        ))
        .body(bytes))
}

// JSON preview endpoint
async fn preview(req: web::Json<GenerateRequest>) -> Result<HttpResponse> {
    match run_generation(req.into_inner()) {
        Ok((schedule, employees)) => Ok(HttpResponse::Ok().json(PreviewResponse::new(schedule, &employees))),
        Err(e) => Ok(error_response(e)),
    }
}

async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "ok"})))
}

async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Registers the page and API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/health", web::get().to(health))
        .route("/api/generate", web::post().to(generate))
        .route("/api/preview", web::post().to(preview));
}

pub async fn start_server(config: ServerConfig) -> std::io::Result<()> {
    let static_dir = config.static_dir.clone();
    let serve_static = static_dir.is_dir();
    if !serve_static {
        log::info!("Static directory {} not found, not serving /static", static_dir.display());
    }

    HttpServer::new(move || {
        let app = App::new()
            .wrap(middleware::Logger::default())
            .configure(configure);
        if serve_static {
            app.service(Files::new("/static", static_dir.clone()))
        } else {
            app
        }
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}

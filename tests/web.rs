//! HTTP handlers, exercised in-process.

use actix_web::{http::StatusCode, test, App};
use serde_json::{json, Value};

use smart_roster::web::configure;

fn request_body() -> Value {
    json!({
        "employees_input": "Anna,160\nMarco,160",
        "month": 11,
        "year": 2025,
        "shifts": [
            {"day": "Monday", "start_time": "09:00", "end_time": "17:00", "staff_count": 2},
            {"day": "Tuesday", "start_time": "09:00", "end_time": "17:00", "staff_count": 2}
        ],
        "holidays": [
            {"date": "2025-11-15", "holiday_type": "CLOSED"},
            {"date": "2025-11-20", "holiday_type": "SPECIAL", "start": "10:00", "end": "14:00", "staff": 1}
        ]
    })
}

#[actix_web::test]
async fn generate_returns_csv_attachment() {
    let app = test::init_service(App::new().configure(configure)).await;
    let req = test::TestRequest::post()
        .uri("/api/generate")
        .set_json(request_body())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get("Content-Disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("roster_november_2025.csv"));
    assert!(resp
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .starts_with("text/csv"));

    let body = test::read_body(resp).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.starts_with("Date,Day,Anna,Marco"));
    assert!(text.contains("20 Nov,Thu,10:00 - 14:00,OFF"));
}

#[actix_web::test]
async fn preview_returns_index_and_totals() {
    let app = test::init_service(App::new().configure(configure)).await;
    let req = test::TestRequest::post()
        .uri("/api/preview")
        .set_json(request_body())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let assignments = body["assignments"].as_array().unwrap();
    assert!(assignments
        .iter()
        .any(|a| a["day"] == 15 && a["shift"] == "CLOSED" && a["assigned"] == "CLOSED"));
    assert!(assignments
        .iter()
        .any(|a| a["day"] == 3 && a["shift"] == "09:00 - 17:00" && a["assigned"] == "Anna, Marco"));

    let totals = body["totals"].as_array().unwrap();
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0]["name"], "Anna");
    assert_eq!(body["timelines"]["Anna"][0]["day"], 3);
}

#[actix_web::test]
async fn invalid_request_is_bad_request() {
    let app = test::init_service(App::new().configure(configure)).await;
    let mut body = request_body();
    body["month"] = json!(13);
    let req = test::TestRequest::post()
        .uri("/api/generate")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json["success"], false);
}

#[actix_web::test]
async fn index_and_health() {
    let app = test::init_service(App::new().configure(configure)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
}

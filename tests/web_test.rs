use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use nomaden::web::{api_routes, security_headers, AppState, ADMIN_PASSWORD_HEADER, SUBMITTER_HEADER};
use nomaden::{MemoryStore, PubService};
use serde_json::{json, Value};

const PASSWORD: &str = "geheim";

fn state() -> web::Data<AppState> {
    web::Data::new(AppState {
        service: PubService::new(Box::new(MemoryStore::default())),
        admin_password: PASSWORD.to_string(),
    })
}

fn pub_body(name: &str) -> Value {
    json!({
        "name": name,
        "street": "Hafenweg 1",
        "city": "Hamburg",
        "public_transport": "S3",
        "magic": "4"
    })
}

#[actix_web::test]
async fn test_enter_and_list_pubs() {
    let app = test::init_service(App::new().app_data(state()).wrap(security_headers()).configure(api_routes)).await;

    for name in ["Zum Anker", "Blaue Blume"] {
        let req = test::TestRequest::post().uri("/api/pubs").set_json(pub_body(name)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(resp.headers().get("X-Frame-Options").unwrap(), "DENY");
    }

    let req = test::TestRequest::get().uri("/api/overview").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let waiting = body["waiting"].as_array().unwrap();
    assert_eq!(waiting.len(), 2);
    assert_eq!(waiting[0]["name"], "Zum Anker");
    assert_eq!(waiting[1]["sort_order"], 2);
    assert!(body["fixed"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_spam_answer_is_rejected() {
    let app = test::init_service(App::new().app_data(state()).configure(api_routes)).await;

    let mut body = pub_body("Spam");
    body["magic"] = json!("5");
    let req = test::TestRequest::post().uri("/api/pubs").set_json(body).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_move_errors_map_to_status() {
    let app = test::init_service(App::new().app_data(state()).configure(api_routes)).await;

    let req = test::TestRequest::post().uri("/api/pubs").set_json(pub_body("Solo")).to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/move")
        .set_json(json!({"id": id, "direction": "backward"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post().uri("/api/move").set_json(json!({"id": "missing"})).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_moderator_routes_need_password() {
    let app = test::init_service(App::new().app_data(state()).configure(api_routes)).await;

    let req = test::TestRequest::post().uri("/api/pubs").set_json(pub_body("Doomed")).to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post().uri("/api/delete").set_json(json!({"id": id})).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/delete")
        .insert_header((ADMIN_PASSWORD_HEADER, PASSWORD))
        .set_json(json!({"id": id}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/overview").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["waiting"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_schedule_route_returns_report() {
    let app = test::init_service(App::new().app_data(state()).configure(api_routes)).await;

    for name in ["A", "B", "C", "D", "E"] {
        let req = test::TestRequest::post().uri("/api/pubs").set_json(pub_body(name)).to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::post()
        .uri("/api/schedule")
        .insert_header((ADMIN_PASSWORD_HEADER, PASSWORD))
        .to_request();
    let report: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(report["scheduled"].as_array().unwrap().len(), 4);
    assert_eq!(report["still_waiting"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::get().uri("/api/poster").to_request();
    let poster: Value = test::call_and_read_body_json(&app, req).await;
    let pubs = poster["pubs"].as_array().unwrap();
    assert_eq!(pubs.len(), 4);
    assert_eq!(pubs[0]["name"], "A");
}

#[actix_web::test]
async fn test_comment_on_missing_pub() {
    let app = test::init_service(App::new().app_data(state()).configure(api_routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/comments")
        .set_json(json!({"id": "missing", "author": "jo", "text": "hi", "magic": "4"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_overview_omits_submitter_id() {
    let app = test::init_service(App::new().app_data(state()).configure(api_routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/pubs")
        .insert_header((SUBMITTER_HEADER, "user-4711"))
        .set_json(pub_body("Zur Linde"))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/comments")
        .insert_header((SUBMITTER_HEADER, "user-4711"))
        .set_json(json!({"id": id, "author": "jo", "text": "nice", "magic": "4"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/overview").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert!(!String::from_utf8_lossy(&body).contains("user-4711"));

    let overview: Value = serde_json::from_slice(&body).unwrap();
    assert!(overview["waiting"][0]["source"].is_null());
    assert!(overview["waiting"][0]["comments"][0]["source"].is_null());
}

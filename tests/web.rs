//! Integration tests for the HTTP surface, driven through an in-process test service.

use actix_web::{
    cookie::{Cookie, Key},
    test,
    web::{self, Data, Form},
    App, HttpResponse, HttpServer,
};
use chrono::{Duration, Utc};
use cpl_registration_web::{
    web::{configure, countdown_events, session_middleware, AppState, SESSION_COOKIE},
    Countdown, Deadline, DeliveryOutcome, Draft, HttpTransport, Transport,
};
use futures::{FutureExt, StreamExt};
use std::collections::HashMap;
use std::sync::Mutex;

type Received = Data<Mutex<Vec<HashMap<String, String>>>>;

/// Stand-in for the spreadsheet endpoint: remembers every posted form.
async fn record_submission(received: Received, form: Form<HashMap<String, String>>) -> HttpResponse {
    received.lock().unwrap().push(form.into_inner());
    HttpResponse::Ok().body("ok")
}

/// Nothing listens on the discard port, so every delivery fails fast.
const UNREACHABLE_SHEET: &str = "http://127.0.0.1:9/exec";

fn state() -> Data<AppState> {
    Data::new(AppState::new(UNREACHABLE_SHEET).unwrap())
}

fn body_text(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec()).unwrap()
}

const VALID_FORM: [(&str, &str); 4] = [
    ("name", "Arjun K"),
    ("phoneNumber", "9876543210"),
    ("position", "GK"),
    ("age", "19"),
];

#[actix_web::test]
async fn health_and_favicon() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], true);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/favicon.ico").to_request()).await;
    assert_eq!(resp.status().as_u16(), 204);
}

#[actix_web::test]
async fn landing_page_counts_down_five_days() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert!(resp.status().is_success());
    let html = body_text(&test::read_body(resp).await);
    assert!(html.contains("PREMIER LEAGUE"));
    assert!(html.contains(r#"id="days">5<"#));
    assert!(html.contains(r#"href="/register""#));
    assert!(html.contains("/api/countdown/stream?deadline="));
}

#[actix_web::test]
async fn countdown_snapshot_for_deadline() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let past = Deadline::new(Utc::now() - Duration::hours(1));
    let uri = format!("/api/countdown?deadline={}", past.unix_millis());
    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    let countdown: Countdown = test::read_body_json(resp).await;
    assert_eq!(countdown, Countdown::ZERO);

    let future = Deadline::new(Utc::now() + Duration::days(2) + Duration::minutes(30));
    let uri = format!("/api/countdown?deadline={}", future.unix_millis());
    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    let countdown: Countdown = test::read_body_json(resp).await;
    assert_eq!(countdown.days, 2);
    assert_eq!(countdown.hours, 0);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/countdown?deadline=soon").to_request(),
    )
    .await;
    assert!(resp.status().is_client_error());
}

#[actix_web::test]
async fn countdown_stream_emits_tick_events() {
    let deadline = Deadline::new(Utc::now() + Duration::hours(3));
    let events = countdown_events(deadline, std::time::Duration::from_millis(10));
    futures::pin_mut!(events);

    let first = events.next().await.unwrap().unwrap();
    let frame = body_text(&first);
    assert!(frame.starts_with("event: tick\ndata: "));
    assert!(frame.ends_with("\n\n"));
    let data = frame
        .trim_end()
        .trim_start_matches("event: tick\ndata: ");
    let countdown: Countdown = serde_json::from_str(data).unwrap();
    assert_eq!(countdown.days, 0);
    assert!(countdown.hours == 2 || countdown.hours == 3);

    assert!(events.next().await.is_some());
}

#[actix_web::test]
async fn countdown_stream_keeps_only_latest_tick() {
    let deadline = Deadline::new(Utc::now() + Duration::hours(3));
    let events = countdown_events(deadline, std::time::Duration::from_millis(10));
    futures::pin_mut!(events);
    assert!(events.next().await.is_some());

    // Several ticks pass unread: one frame is waiting, not a backlog.
    actix_web::rt::time::sleep(std::time::Duration::from_millis(80)).await;
    assert!(events.next().now_or_never().flatten().is_some());
    assert!(events.next().now_or_never().is_none());
}

#[actix_web::test]
async fn delivery_posts_form_fields_to_endpoint() {
    let received: Received = Data::new(Mutex::new(Vec::new()));
    let sink = received.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(sink.clone())
            .route("/exec", web::post().to(record_submission))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    let url = format!("http://{addr}/exec");

    let draft = Draft {
        name: "Arjun K".to_string(),
        phone_number: "9876543210".to_string(),
        position: "CAM".to_string(),
        age: "27".to_string(),
    };
    let transport = HttpTransport::new(&url).unwrap();
    assert_eq!(transport.deliver(&draft).await, DeliveryOutcome::Sent);

    // Through the site as well.
    let app = test::init_service(
        App::new()
            .wrap(session_middleware(Key::generate(), false))
            .app_data(Data::new(AppState::new(&url).unwrap()))
            .configure(configure),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/register")
        .set_form(VALID_FORM)
        .to_request();
    let html = body_text(&test::read_body(test::call_service(&app, req).await).await);
    assert!(html.contains("Registration Successful!"));

    let forms = received.lock().unwrap().clone();
    handle.stop(false).await;

    assert_eq!(forms.len(), 2);
    let expected: HashMap<String, String> = [
        ("name", "Arjun K"),
        ("phoneNumber", "9876543210"),
        ("position", "CAM"),
        ("age", "27"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    assert_eq!(forms[0], expected);
    let site: HashMap<String, String> = VALID_FORM
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(forms[1], site);
}

#[actix_web::test]
async fn register_flow_end_to_end() {
    let app = test::init_service(
        App::new()
            .wrap(session_middleware(Key::generate(), false))
            .app_data(state())
            .configure(configure),
    )
    .await;

    // Fresh client sees the form with every position.
    let resp = test::call_service(&app, test::TestRequest::get().uri("/register").to_request()).await;
    let html = body_text(&test::read_body(resp).await);
    assert!(html.contains("<form"));
    assert!(html.contains("Player Registration"));
    assert!(html.contains("Central Defensive Midfielder (CDM)"));

    // Invalid attempt: errors shown, values kept, nothing remembered.
    let req = test::TestRequest::post()
        .uri("/register")
        .set_form([
            ("name", "Arjun K"),
            ("phoneNumber", "12345"),
            ("position", ""),
            ("age", "51"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let html = body_text(&test::read_body(resp).await);
    assert!(html.contains("Enter a valid 10-digit phone number"));
    assert!(html.contains("Position is required"));
    assert!(html.contains("Age must be between 15 and 50"));
    assert!(!html.contains("Name is required"));
    assert!(html.contains(r#"value="Arjun K""#));

    // Valid attempt: delivery fails (no endpoint) but the client is still registered.
    let req = test::TestRequest::post()
        .uri("/register")
        .set_form(VALID_FORM)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let cookie: Cookie<'static> = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
        .expect("session cookie set after registering");
    let html = body_text(&test::read_body(resp).await);
    assert!(html.contains("Registration Successful!"));
    assert!(html.contains(r#"data-dismiss-ms=""#));
    assert!(html.contains("Already Registered!"));
    assert!(!html.contains("<form"));

    // Returning client: bypass, no form, no overlay.
    let req = test::TestRequest::get()
        .uri("/register")
        .cookie(cookie.clone())
        .to_request();
    let html = body_text(&test::read_body(test::call_service(&app, req).await).await);
    assert!(html.contains("Already Registered!"));
    assert!(!html.contains("<form"));
    assert!(!html.contains("Registration Successful!"));

    // Posting again from the same client changes nothing.
    let req = test::TestRequest::post()
        .uri("/register")
        .cookie(cookie)
        .set_form(VALID_FORM)
        .to_request();
    let html = body_text(&test::read_body(test::call_service(&app, req).await).await);
    assert!(html.contains("Already Registered!"));
    assert!(!html.contains("Registration Successful!"));
}

#[actix_web::test]
async fn user_input_is_escaped() {
    let app = test::init_service(
        App::new()
            .wrap(session_middleware(Key::generate(), false))
            .app_data(state())
            .configure(configure),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/register")
        .set_form([
            ("name", "<script>alert(1)</script>"),
            ("phoneNumber", ""),
            ("position", "GK"),
            ("age", "20"),
        ])
        .to_request();
    let html = body_text(&test::read_body(test::call_service(&app, req).await).await);
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("Phone number is required"));
}

#[actix_web::test]
async fn overlong_name_is_rejected_before_delivery() {
    let app = test::init_service(
        App::new()
            .wrap(session_middleware(Key::generate(), false))
            .app_data(state())
            .configure(configure),
    )
    .await;
    let name = "A".repeat(5000);
    let req = test::TestRequest::post()
        .uri("/register")
        .set_form([
            ("name", name.as_str()),
            ("phoneNumber", "9876543210"),
            ("position", "GK"),
            ("age", "19"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    assert!(resp.response().cookies().all(|c| c.name() != SESSION_COOKIE));
    let html = body_text(&test::read_body(resp).await);
    assert!(html.contains("Name must be at most 100 characters"));
    assert!(html.contains("<form"));
}

#[actix_web::test]
async fn oversized_snapshot_still_marks_client() {
    let app = test::init_service(
        App::new()
            .wrap(session_middleware(Key::generate(), false))
            .app_data(state())
            .configure(configure),
    )
    .await;
    // Valid once trimmed, but far too large to keep in the cookie.
    let age = format!("{}19", " ".repeat(5000));
    let req = test::TestRequest::post()
        .uri("/register")
        .set_form([
            ("name", "Arjun K"),
            ("phoneNumber", "9876543210"),
            ("position", "GK"),
            ("age", age.as_str()),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let cookie: Cookie<'static> = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
        .expect("session cookie set after registering");
    let html = body_text(&test::read_body(resp).await);
    assert!(html.contains("Registration Successful!"));

    let req = test::TestRequest::get()
        .uri("/register")
        .cookie(cookie)
        .to_request();
    let html = body_text(&test::read_body(test::call_service(&app, req).await).await);
    assert!(html.contains("Already Registered!"));
    assert!(!html.contains("<form"));
}

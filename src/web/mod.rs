//! HTTP surface: landing page, live countdown, registration form, health.
//! The binary only wires these into an `HttpServer`; tests mount them on a test service.

mod pages;

pub use pages::Pages;

use crate::error::Result;
use crate::logic::{
    remaining, CountdownTimer, HttpTransport, RegistrationFlow, SessionMarkerStore, TICK_PERIOD,
};
use crate::models::{Countdown, Deadline, Draft, Field};
use actix_session::{
    config::PersistentSession, storage::CookieSessionStore, Session, SessionMiddleware,
};
use actix_web::{
    cookie::{time, Key},
    get,
    http::header::{CacheControl, CacheDirective, ContentType},
    post,
    web::{self, Bytes, Data, Form, Query},
    HttpResponse, Responder,
};
use chrono::Utc;
use futures::Stream;
use serde::Deserialize;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::watch;

/// Name of the cookie holding the registration marker.
pub const SESSION_COOKIE: &str = "cpl_session";

/// Lifetime of the session cookie. Browsers cap persistent cookies at 400 days.
pub const SESSION_TTL_DAYS: i64 = 400;

/// Shared, read-only state for all workers.
pub struct AppState {
    pub transport: HttpTransport,
    pub pages: Pages,
}

impl AppState {
    pub fn new(submission_url: &str) -> Result<Self> {
        Ok(Self {
            transport: HttpTransport::new(submission_url)?,
            pages: Pages::new()?,
        })
    }
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Query carrying the deadline a page was loaded with.
#[derive(Deserialize)]
struct DeadlineQuery {
    /// Unix milliseconds.
    deadline: i64,
}

/// Cookie-backed session standing in for the browser's local storage.
pub fn session_middleware(key: Key, secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE.to_string())
        .cookie_secure(secure)
        .session_lifecycle(
            PersistentSession::default().session_ttl(time::Duration::days(SESSION_TTL_DAYS)),
        )
        .build()
}

/// Register all routes (static files are mounted by the caller).
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(landing)
        .service(api_health)
        .service(favicon)
        .service(api_countdown)
        .service(api_countdown_stream)
        .service(register_page)
        .service(register_submit);
}

/// Server-sent `tick` events for one open page, one per `period`. Only the latest countdown is
/// kept for a slow reader. The timer behind the stream stops as soon as the stream is dropped
/// (client gone).
pub fn countdown_events(
    deadline: Deadline,
    period: Duration,
) -> impl Stream<Item = std::result::Result<Bytes, Infallible>> {
    let (tx, rx) = watch::channel(remaining(deadline, Utc::now()));
    let timer = CountdownTimer::start(period, move || {
        tx.send_replace(remaining(deadline, Utc::now()));
    });
    futures::stream::unfold((rx, timer), |(mut rx, timer)| async move {
        rx.changed().await.ok()?;
        let countdown: Countdown = *rx.borrow_and_update();
        let data = match serde_json::to_string(&countdown) {
            Ok(data) => data,
            Err(e) => {
                log::error!("Failed to encode countdown: {e}");
                return None;
            }
        };
        let frame = Bytes::from(format!("event: tick\ndata: {data}\n\n"));
        Some((Ok::<_, Infallible>(frame), (rx, timer)))
    })
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

/// Landing page. Each load gets its own deadline, five days out.
#[get("/")]
async fn landing(state: Data<AppState>) -> Result<HttpResponse> {
    let now = Utc::now();
    let deadline = Deadline::from_load(now);
    Ok(html(state.pages.landing(deadline, remaining(deadline, now))?))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "cpl-registration-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for site logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Countdown snapshot for a page's deadline.
#[get("/api/countdown")]
async fn api_countdown(query: Query<DeadlineQuery>) -> HttpResponse {
    match Deadline::from_unix_millis(query.deadline) {
        Some(deadline) => HttpResponse::Ok().json(remaining(deadline, Utc::now())),
        None => HttpResponse::BadRequest().json(serde_json::json!({ "error": "Invalid deadline" })),
    }
}

/// Live countdown as server-sent events.
#[get("/api/countdown/stream")]
async fn api_countdown_stream(query: Query<DeadlineQuery>) -> HttpResponse {
    let Some(deadline) = Deadline::from_unix_millis(query.deadline) else {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": "Invalid deadline" }));
    };
    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(CacheControl(vec![CacheDirective::NoCache]))
        .streaming(countdown_events(deadline, TICK_PERIOD))
}

/// Registration view: the form, or the already-registered message when the marker is set.
#[get("/register")]
async fn register_page(state: Data<AppState>, session: Session) -> Result<HttpResponse> {
    let store = SessionMarkerStore::new(session);
    let flow = RegistrationFlow::load(&store)?;
    Ok(html(state.pages.registration(&flow, Utc::now())?))
}

/// Submit attempt. Invalid drafts come back with their errors; valid ones are delivered and the
/// session is marked whether or not delivery succeeded.
#[post("/register")]
async fn register_submit(
    state: Data<AppState>,
    session: Session,
    form: Form<Draft>,
) -> Result<HttpResponse> {
    let mut store = SessionMarkerStore::new(session);
    let mut flow = RegistrationFlow::load(&store)?;
    let posted = form.into_inner();
    for field in Field::ALL {
        flow.update_field(field, posted.get(field));
    }
    let now = Utc::now();
    flow.submit(&state.transport, &mut store, now).await?;
    Ok(html(state.pages.registration(&flow, now)?))
}

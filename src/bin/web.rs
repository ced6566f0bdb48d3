//! Single binary web server: landing page, registration form, static files from /static.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the site is reachable via DNS on a VPS.
//! Configuration comes from env: HOST, PORT, SUBMISSION_URL, SESSION_KEY, COOKIE_SECURE, STATIC_DIR.

use actix_files::Files;
use actix_web::{middleware::Logger, web::Data, App, HttpServer};
use cpl_registration_web::{
    web::{configure, session_middleware, AppState},
    Config,
};
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| io::Error::other(e.to_string()))?;
    let session_key = config
        .session_key()
        .map_err(|e| io::Error::other(e.to_string()))?;
    let state = Data::new(
        AppState::new(&config.submission_url).map_err(|e| io::Error::other(e.to_string()))?,
    );

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    log::info!("Registrations are posted to {}", state.transport.url());

    let cookie_secure = config.cookie_secure;
    let static_dir = config.static_dir.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(session_middleware(session_key.clone(), cookie_secure))
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure)
            .service(Files::new("/static", &static_dir))
    })
    .bind(bind)?
    .run()
    .await
}

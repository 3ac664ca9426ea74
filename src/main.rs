#[macro_use]
extern crate rocket;

use std::sync::Arc;
use std::time::SystemTime;

use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};

use crate::config::{CorsConfig, TAG_MANAGER_CONFIG};
use crate::handler::api_handler::{bad_request, health_check, preflight, unprocessable_entity};
use crate::handler::cors::Cors;
use crate::tags::gateway::TagGateway;
use crate::tags::handler::{create_tag, delete_tag, get_tag, list_tags, update_tag};
use crate::tags::store::TagStore;

mod config;
mod handler;
mod model;
mod tags;
#[cfg(test)]
mod test;
mod util;

#[launch]
fn rocket() -> Rocket<Build> {
    init_logger(TAG_MANAGER_CONFIG.logging.level_filter());
    build_rocket(
        TagGateway::new(
            Arc::new(TagStore::new()),
            TAG_MANAGER_CONFIG.latency.clone(),
        ),
        TAG_MANAGER_CONFIG.cors.clone(),
    )
}

/// mounts the tag routes on top of the passed gateway. Each call gets its own store, which is
/// what lets every test run against a fresh one
pub fn build_rocket(gateway: TagGateway, cors: CorsConfig) -> Rocket<Build> {
    rocket::build()
        .manage(gateway)
        .attach(Cors::new(cors))
        .attach(AdHoc::on_shutdown("Cancel pending tag operations", |rocket| {
            Box::pin(async move {
                if let Some(gateway) = rocket.state::<TagGateway>() {
                    gateway.shutdown();
                }
            })
        }))
        .mount(
            "/tags",
            routes![list_tags, get_tag, create_tag, update_tag, delete_tag],
        )
        .mount("/", routes![health_check, preflight])
        .register("/", catchers![bad_request, unprocessable_entity])
}

/// sends log output to stdout with a timestamp. Does nothing if a logger was already installed
fn init_logger(level: log::LevelFilter) {
    let result = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // launch banner and per-request lines
        .level_for("rocket", log::LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply();
    if result.is_err() {
        log::debug!("A logger was already installed, keeping it");
    }
}

#![allow(unreachable_code)]
#[macro_use]
extern crate rouille;

use std::sync::Mutex;
use std::time::Instant;

use clap::Parser;
use log::info;
use log::warn;
use serde::Serialize;

use light_controller::args::ControllerArgs;
use light_controller::config::LightConfig;
use light_controller::marker::Fanout;
use light_controller::marker::LatestMarker;
use light_controller::marker::LogPublisher;
use light_controller::marker::MarkerPublisher;
use light_controller::Color;
use light_controller::Handle;
use light_controller::LightController;
use light_controller::ModeRequest;

#[derive(Serialize, Debug)]
struct AboutResponse {
    version: String,
}

fn main() -> anyhow::Result<()> {
    light_controller::setup_logging();
    let version: &str = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown");
    let args = ControllerArgs::parse();
    let config = LightConfig::from_args(&args.link)?;

    let link = config.link.open_or_simulate();
    let controller = LightController::new(link, config.marker.clone(), Instant::now());
    let latest = LatestMarker::new();
    let publishers: Vec<Box<dyn MarkerPublisher>> =
        vec![Box::new(LogPublisher), Box::new(latest.clone())];
    let publisher = Fanout::new(publishers);
    let handle = Mutex::new(Handle::spawn(controller, Box::new(publisher)));

    info!("starting server listening on {}", args.bind);
    rouille::start_server(args.bind, move |request| {
        router!(request,
            (GET) (/) => {
                rouille::Response::redirect_302("/status")
            },

            (GET) (/status) => {
                let handle = try_or_400!(handle.lock());
                match handle.status() {
                    Ok(status) => rouille::Response::json(&status),
                    Err(err) => rouille::Response::text(err.to_string()).with_status_code(500),
                }
            },

            (GET) (/about) => {
                rouille::Response::json(&AboutResponse { version: version.to_string() })
            },

            (GET) (/marker) => {
                match latest.get() {
                    Some(marker) => rouille::Response::json(&marker),
                    None => rouille::Response::empty_404(),
                }
            },

            (POST) (/command) => {
                let color: Color = try_or_400!(rouille::input::json_input(request));
                let handle = try_or_400!(handle.lock());
                handle.color(color);
                rouille::Response::text("success")
            },

            (POST) (/mode) => {
                let mode_request: ModeRequest = try_or_400!(rouille::input::json_input(request));
                let handle = try_or_400!(handle.lock());
                match handle.mode(mode_request) {
                    Ok(response) => rouille::Response::json(&response),
                    Err(err) => {
                        warn!("mode request failed: {}", err);
                        rouille::Response::text(err.to_string()).with_status_code(500)
                    }
                }
            },

            _ => rouille::Response::empty_404()
        )
    });
    return Ok(());
}

//! Checks the warnings the controller leaves in the log

mod common;

use std::sync::Mutex;
use std::sync::Once;
use std::time::Instant;

use common::Wire;
use light_controller::marker::MarkerConfig;
use light_controller::Color;
use light_controller::LightController;
use light_controller::ModeRequest;
use log::Level;
use log::Metadata;
use log::Record;

static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());
static INIT: Once = Once::new();

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            RECORDS
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

fn capture() {
    INIT.call_once(|| {
        log::set_logger(&CaptureLogger).unwrap();
        log::set_max_level(log::LevelFilter::Warn);
    });
}

fn warnings_mentioning(needle: &str) -> usize {
    RECORDS
        .lock()
        .unwrap()
        .iter()
        .filter(|(level, msg)| *level == Level::Warn && msg.contains(needle))
        .count()
}

fn connected() -> (LightController, Wire) {
    let wire = Wire::new();
    let controller = LightController::new(
        Some(Box::new(wire.clone())),
        MarkerConfig::default(),
        Instant::now(),
    );
    (controller, wire)
}

#[test]
fn out_of_range_color_is_warned_about() {
    capture();
    let (mut controller, wire) = connected();
    // Values unique to this test, other tests log concurrently.
    controller.on_color(Color::new(1.25, 0.125, 0.0625, 1.0));
    assert_eq!(wire.contents(), "");
    assert_eq!(warnings_mentioning("rgb = [1.25, 0.125, 0.0625]"), 1);
}

#[test]
fn out_of_range_mode_request_is_warned_about() {
    capture();
    let (mut controller, wire) = connected();
    let color = Color::new(0.375, 4.5, 0.0, 1.0);
    let response = controller.on_mode(ModeRequest { color, mode: 0 }, Instant::now());
    assert!(response.is_success());
    assert_eq!(wire.contents(), "");
    assert_eq!(warnings_mentioning("rgb = [0.375, 4.5, 0]"), 1);
}

#[test]
fn valid_color_is_not_warned_about() {
    capture();
    let (mut controller, wire) = connected();
    controller.on_color(Color::new(0.875, 0.0, 0.0, 1.0));
    assert_eq!(wire.lines(), vec!["124 999 999"]);
    assert_eq!(warnings_mentioning("0.875"), 0);
}

#[test]
fn unsupported_mode_is_warned_about() {
    capture();
    let (mut controller, _wire) = connected();
    let response = controller.on_mode(
        ModeRequest {
            color: Color::default(),
            mode: 42,
        },
        Instant::now(),
    );
    assert_eq!(response.error_type, -1);
    assert_eq!(warnings_mentioning("unsupported led mode: 42"), 1);
}

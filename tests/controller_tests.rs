//! Integration tests for the light controller state machine

mod common;

use std::time::Duration;
use std::time::Instant;

use common::Wire;
use light_controller::breath::STEPS_PER_PERIOD;
use light_controller::controller::WriteOutcome;
use light_controller::marker::MarkerConfig;
use light_controller::marker::Stamp;
use light_controller::Color;
use light_controller::LedMode;
use light_controller::LightController;
use light_controller::ModeRequest;

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
fn pure_red_static() {
    let (mut controller, wire) = connected();
    let response = controller.on_mode(
        ModeRequest {
            color: Color::new(1.0, 0.0, 0.0, 1.0),
            mode: 0,
        },
        Instant::now(),
    );
    assert_eq!(response.error_type, 0);
    assert_eq!(response.error_msg, "");
    assert_eq!(wire.contents(), "0 999 999\n\r");
    assert!(!controller.is_breathing());
    assert_eq!(controller.mode(), LedMode::Static);
}

#[test]
fn scaling_covers_the_full_range() {
    let (mut controller, wire) = connected();
    controller.on_color(Color::new(0.0, 1.0, 0.25, 1.0));
    assert_eq!(wire.lines(), vec!["999 0 749"]);
}

#[test]
fn any_channel_above_one_skips_the_write() {
    let (mut controller, wire) = connected();
    for color in [
        Color::new(1.1, 0.0, 0.0, 1.0),
        Color::new(0.0, 3.0, 0.0, 1.0),
        Color::new(0.0, 0.0, 1.0001, 1.0),
    ] {
        assert!(matches!(controller.on_color(color), WriteOutcome::Rejected(_)));
    }
    assert_eq!(wire.contents(), "");
}

#[test]
fn negative_channel_is_sent_unclamped() {
    let (mut controller, wire) = connected();
    controller.on_color(Color::new(-1.0, 0.0, 0.0, 1.0));
    assert_eq!(wire.lines(), vec!["1998 999 999"]);
}

#[test]
fn flash_behaves_like_static() {
    let (mut controller, wire) = connected();
    let color = Color::new(0.0, 0.0, 1.0, 1.0);
    let response = controller.on_mode(ModeRequest { color, mode: 2 }, Instant::now());
    assert!(response.is_success());
    assert_eq!(controller.mode(), LedMode::Flash);
    assert!(!controller.is_breathing());
    assert_eq!(wire.lines(), vec!["999 999 0"]);
}

#[test]
fn breathing_sequence_repeats_every_period() {
    let (mut controller, wire) = connected();
    let color = Color::new(0.2, 0.5, 1.0, 1.0);
    controller.on_mode(ModeRequest { color, mode: 1 }, Instant::now());
    wire.clear();

    for _ in 0..2 * STEPS_PER_PERIOD {
        controller.breath_tick();
    }
    let lines = wire.lines();
    assert_eq!(lines.len(), 2 * STEPS_PER_PERIOD as usize);
    let (first, second) = lines.split_at(STEPS_PER_PERIOD as usize);
    assert_eq!(first, second);
    assert_eq!(controller.phase(), 0.0);
}

#[test]
fn breathing_picks_up_new_color() {
    let (mut controller, wire) = connected();
    controller.on_mode(
        ModeRequest {
            color: Color::new(0.0, 0.0, 0.0, 1.0),
            mode: 1,
        },
        Instant::now(),
    );
    controller.breath_tick();
    controller.on_color(Color::new(1.0, 1.0, 1.0, 1.0));
    wire.clear();
    controller.breath_tick();
    let lines = wire.lines();
    assert_ne!(lines[0], "999 999 999");
}

#[test]
fn unsupported_mode_still_updates_color() {
    let (mut controller, _wire) = connected();
    let color = Color::new(0.3, 0.3, 0.3, 0.3);
    let response = controller.on_mode(ModeRequest { color, mode: 5 }, Instant::now());
    assert_eq!(response.error_type, -1);
    assert!(!response.error_msg.is_empty());
    assert_eq!(controller.color(), color);
}

#[test]
fn marker_reflects_current_color() {
    let (mut controller, _wire) = connected();
    let color = Color::new(0.1, 0.2, 0.3, 0.4);
    controller.on_color(color);
    let marker = controller.marker(Stamp::now());
    assert_eq!(marker.color, color);
    assert_eq!(marker.ns, "color");
    assert_eq!(marker.id, 0);
}

#[test]
fn breath_deadline_is_fifty_milliseconds() {
    let now = Instant::now();
    let (mut controller, _wire) = connected();
    controller.on_mode(
        ModeRequest {
            color: Color::default(),
            mode: 1,
        },
        now,
    );
    assert_eq!(controller.next_deadline(), now + Duration::from_millis(50));
}

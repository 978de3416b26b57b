// High-level overview:
//
// Protocol:                    ascii lines              mpsc                  Handle             HTTP/json
// Library Concept:   driver <-------------> link <--------> controller <------------> client <-----------> user
//
// Implementing Binary:                          light_controller (lib)          light-controller     curl, homeassistant
//                                                                               light-shell          actual human

pub mod args;
pub mod breath;
pub mod color;
pub mod config;
pub mod controller;
pub mod handle;
pub mod marker;
pub mod mode;
pub mod serial_link;

pub use color::Color;
pub use controller::LightController;
pub use handle::Handle;
pub use mode::LedMode;
pub use mode::ModeRequest;
pub use mode::ModeResponse;

/// Initializes `env_logger` with `light_controller=info` unless `RUST_LOG`
/// says otherwise.
pub fn setup_logging() {
    let env = env_logger::Env::default().default_filter_or("light_controller=info");
    let _ = env_logger::Builder::from_env(env).try_init();
}

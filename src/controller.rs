use std::io::Write;
use std::time::Duration;
use std::time::Instant;

use log::debug;
use log::info;
use log::warn;
use serde::Serialize;

use crate::breath::BreathWaveform;
use crate::color::Color;
use crate::color::ColorError;
use crate::color::HardwareFrame;
use crate::marker::Marker;
use crate::marker::MarkerConfig;
use crate::marker::MarkerPublisher;
use crate::marker::Stamp;
use crate::mode::LedMode;
use crate::mode::ModeRequest;
use crate::mode::ModeResponse;
use crate::serial_link::Link;

pub const BREATH_PERIOD: Duration = Duration::from_millis(50);

/// What happened to a frame on its way to the hardware.
#[derive(Debug, PartialEq)]
pub enum WriteOutcome {
    Written(HardwareFrame),
    /// No serial link, the frame was only logged.
    Simulated(HardwareFrame),
    /// No serial link and nothing was computed.
    Skipped,
    Rejected(ColorError),
    /// The write itself failed. Nothing is retried.
    Failed(HardwareFrame),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Status {
    pub color: Color,
    pub mode: LedMode,
    pub simulated: bool,
    pub breathing: bool,
}

#[derive(Clone, Debug)]
struct Timer {
    period: Duration,
    next_due: Instant,
}

impl Timer {
    fn starting_at(now: Instant, period: Duration) -> Timer {
        return Timer {
            period,
            next_due: now + period,
        };
    }

    fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    // Keeps a fixed rate, but drops ticks instead of bursting after a stall.
    fn advance(&mut self, now: Instant) {
        self.next_due += self.period;
        if self.next_due <= now {
            self.next_due = now + self.period;
        }
    }
}

/// All state of the light controller.
///
/// Every method expects to be called from one thread of control; see
/// `Handle` for the thread that owns an instance.
pub struct LightController {
    color: Color,
    mode: LedMode,
    link: Option<Link>,
    waveform: BreathWaveform,
    // Present exactly while breathing.
    breath_timer: Option<Timer>,
    marker_config: MarkerConfig,
    marker_timer: Timer,
}

impl LightController {
    /// `link == None` puts the controller into simulated mode for good.
    pub fn new(link: Option<Link>, marker_config: MarkerConfig, now: Instant) -> LightController {
        let marker_timer = Timer::starting_at(now, marker_config.period());
        return LightController {
            color: Color::default(),
            mode: LedMode::Static,
            link,
            waveform: BreathWaveform::new(),
            breath_timer: None,
            marker_config,
            marker_timer,
        };
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn mode(&self) -> LedMode {
        self.mode
    }

    pub fn is_simulated(&self) -> bool {
        self.link.is_none()
    }

    pub fn is_breathing(&self) -> bool {
        self.breath_timer.is_some()
    }

    pub fn phase(&self) -> f64 {
        self.waveform.phase()
    }

    pub fn status(&self) -> Status {
        return Status {
            color: self.color,
            mode: self.mode,
            simulated: self.is_simulated(),
            breathing: self.is_breathing(),
        };
    }

    /// Stores a new color and pushes it to the hardware right away.
    ///
    /// An active breathing effect keeps running and picks the new color up
    /// on its next tick.
    pub fn on_color(&mut self, color: Color) -> WriteOutcome {
        info!(
            "received new color: rgb = [{}, {}, {}] a = [{}]",
            color.r, color.g, color.b, color.a
        );
        self.color = color;
        if self.is_simulated() {
            return WriteOutcome::Skipped;
        }
        return self.write_static();
    }

    /// Stores the requested color, writes it, and switches the mode.
    pub fn on_mode(&mut self, request: ModeRequest, now: Instant) -> ModeResponse {
        self.color = request.color;
        self.write_static();
        self.cancel_breath();

        match LedMode::try_from(request.mode) {
            Ok(LedMode::Breath) => {
                info!("set mode to breath");
                self.waveform.reset();
                self.breath_timer = Some(Timer::starting_at(now, BREATH_PERIOD));
                self.mode = LedMode::Breath;
            }
            Ok(mode) => {
                info!("set mode to {}", mode);
                self.mode = mode;
            }
            Err(unsupported) => {
                warn!("unsupported led mode: {}", unsupported);
                return ModeResponse::failure("Unsupported Led Mode requested");
            }
        }
        return ModeResponse::success();
    }

    /// One step of the breathing effect. Runs in simulated mode too, the
    /// frame is logged instead of written.
    pub fn breath_tick(&mut self) -> WriteOutcome {
        let frame = self.waveform.next_frame(&self.color);
        match self.link.as_mut() {
            Some(link) => write_frame(link, frame),
            None => {
                debug!("setting color to: rgb {}", frame);
                WriteOutcome::Simulated(frame)
            }
        }
    }

    pub fn marker(&self, stamp: Stamp) -> Marker {
        return self.marker_config.build(self.color, stamp);
    }

    /// The next instant at which `run_due` has work to do.
    pub fn next_deadline(&self) -> Instant {
        match &self.breath_timer {
            Some(timer) => timer.next_due.min(self.marker_timer.next_due),
            None => self.marker_timer.next_due,
        }
    }

    /// Fires every timer that is due at `now`.
    pub fn run_due(&mut self, now: Instant, publisher: &mut dyn MarkerPublisher) {
        let breath_due = match &self.breath_timer {
            Some(timer) => timer.is_due(now),
            None => false,
        };
        if breath_due {
            self.breath_tick();
            if let Some(timer) = self.breath_timer.as_mut() {
                timer.advance(now);
            }
        }
        if self.marker_timer.is_due(now) {
            publisher.publish(&self.marker(Stamp::now()));
            self.marker_timer.advance(now);
        }
    }

    fn cancel_breath(&mut self) {
        if self.breath_timer.take().is_some() {
            debug!("stopped breathing timer");
            self.mode = LedMode::Static;
        }
    }

    fn write_static(&mut self) -> WriteOutcome {
        let frame = match self.color.to_hardware() {
            Ok(frame) => frame,
            Err(err) => {
                warn!("{}", err);
                return WriteOutcome::Rejected(err);
            }
        };
        match self.link.as_mut() {
            Some(link) => {
                info!("send color to microcontroller: rgb = {}", frame);
                write_frame(link, frame)
            }
            None => {
                info!("simulated: would send rgb = {}", frame);
                WriteOutcome::Simulated(frame)
            }
        }
    }
}

fn write_frame(link: &mut Link, frame: HardwareFrame) -> WriteOutcome {
    // No flush: that would wait for the bytes to drain out of the port.
    match link.write_all(frame.to_wire().as_bytes()) {
        Ok(()) => WriteOutcome::Written(frame),
        Err(err) => {
            warn!("failed to write {} to serial link: {}", frame, err);
            WriteOutcome::Failed(frame)
        }
    }
}

use std::sync::mpsc;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Instant;

use anyhow::anyhow;
use log::error;
use log::info;

use crate::color::Color;
use crate::controller::LightController;
use crate::controller::Status;
use crate::marker::MarkerPublisher;
use crate::mode::ModeRequest;
use crate::mode::ModeResponse;

pub(crate) enum ControlMsg {
    Shutdown,
    Color(Color),
    Mode(ModeRequest, mpsc::Sender<ModeResponse>),
    Status(mpsc::Sender<Status>),
}

/// Owns the control thread.
///
/// Commands, mode requests and both timers are all handled on that one
/// thread, so a breathing tick can never interleave with a mode change.
pub struct Handle {
    thread: Option<std::thread::JoinHandle<()>>,
    tx: mpsc::Sender<ControlMsg>,
}

impl Handle {
    pub fn spawn(controller: LightController, publisher: Box<dyn MarkerPublisher>) -> Handle {
        let (tx, rx) = mpsc::channel();
        let join_handle = std::thread::spawn(move || {
            control_thread(controller, rx, publisher);
        });
        return Handle {
            thread: Some(join_handle),
            tx,
        };
    }

    /// Set a new color, fire and forget.
    pub fn color(&self, color: Color) {
        let _ = self.tx.send(ControlMsg::Color(color));
    }

    /// Change the mode and wait for the controller's answer.
    pub fn mode(&self, request: ModeRequest) -> anyhow::Result<ModeResponse> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(ControlMsg::Mode(request, reply_tx))
            .map_err(|_| anyhow!("control thread is gone"))?;
        return reply_rx
            .recv()
            .map_err(|_| anyhow!("control thread dropped the mode request"));
    }

    pub fn status(&self) -> anyhow::Result<Status> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(ControlMsg::Status(reply_tx))
            .map_err(|_| anyhow!("control thread is gone"))?;
        return reply_rx
            .recv()
            .map_err(|_| anyhow!("control thread dropped the status request"));
    }

    /// Stops the control thread and waits for it. Called by `drop`.
    pub fn shutdown(&mut self) {
        let _ = self.tx.send(ControlMsg::Shutdown);
        if let Some(handle) = self.thread.take() {
            if let Err(err) = handle.join() {
                error!("error while joining control thread: {:?}", err);
            }
        }
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn control_thread(
    mut controller: LightController,
    rx: mpsc::Receiver<ControlMsg>,
    mut publisher: Box<dyn MarkerPublisher>,
) {
    if controller.is_simulated() {
        info!("light controller running in simulated mode");
    } else {
        info!("light controller running");
    }
    loop {
        controller.run_due(Instant::now(), publisher.as_mut());

        let timeout = controller
            .next_deadline()
            .saturating_duration_since(Instant::now());
        match rx.recv_timeout(timeout) {
            Ok(ControlMsg::Shutdown) => break,
            Ok(ControlMsg::Color(color)) => {
                controller.on_color(color);
            }
            Ok(ControlMsg::Mode(request, reply)) => {
                let _ = reply.send(controller.on_mode(request, Instant::now()));
            }
            Ok(ControlMsg::Status(reply)) => {
                let _ = reply.send(controller.status());
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    info!("light controller stopped");
}

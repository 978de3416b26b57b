use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use log::debug;
use serde::Deserialize;
use serde::Serialize;

use crate::color::Color;

pub const MARKER_TYPE_SPHERE: i32 = 2;
pub const MARKER_ACTION_ADD: i32 = 0;
/// Longest accepted publishing period, keeps timer deadlines representable.
pub const MAX_MARKER_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vector3,
    pub orientation: Quaternion,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stamp {
    pub secs: u64,
    pub nsecs: u32,
}

impl Stamp {
    pub fn now() -> Stamp {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        return Stamp {
            secs: since_epoch.as_secs(),
            nsecs: since_epoch.subsec_nanos(),
        };
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub frame_id: String,
    pub stamp: Stamp,
}

/// Visualization of the current light color.
///
/// Every marker carries the same `(ns, id)` pair, so a viewer replaces
/// the previous sphere instead of adding a new one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub header: Header,
    pub ns: String,
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: i32,
    pub action: i32,
    pub pose: Pose,
    pub scale: Vector3,
    pub color: Color,
}

/// Where and how often the marker is published.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub rate_hz: f64,
    pub frame_id: String,
    pub ns: String,
    pub id: i32,
    pub position: Vector3,
    pub scale: f64,
}

impl Default for MarkerConfig {
    fn default() -> MarkerConfig {
        return MarkerConfig {
            rate_hz: 10.0,
            frame_id: "/base_link".to_string(),
            ns: "color".to_string(),
            id: 0,
            position: Vector3 { x: 0.0, y: 0.0, z: 1.5 },
            scale: 0.1,
        };
    }
}

impl MarkerConfig {
    /// Publishing period. Rates that do not give a period between zero
    /// and `MAX_MARKER_PERIOD` fall back to 10 Hz.
    pub fn period(&self) -> Duration {
        let fallback = Duration::from_millis(100);
        if !(self.rate_hz > 0.0) {
            return fallback;
        }
        return match Duration::try_from_secs_f64(1.0 / self.rate_hz) {
            Ok(period) if !period.is_zero() && period <= MAX_MARKER_PERIOD => period,
            _ => fallback,
        };
    }

    pub fn build(&self, color: Color, stamp: Stamp) -> Marker {
        return Marker {
            header: Header {
                frame_id: self.frame_id.clone(),
                stamp,
            },
            ns: self.ns.clone(),
            id: self.id,
            kind: MARKER_TYPE_SPHERE,
            action: MARKER_ACTION_ADD,
            pose: Pose {
                position: self.position,
                orientation: Quaternion { x: 0.0, y: 0.0, z: 0.0, w: 1.0 },
            },
            scale: Vector3 {
                x: self.scale,
                y: self.scale,
                z: self.scale,
            },
            color,
        };
    }
}

pub trait MarkerPublisher: Send {
    fn publish(&mut self, marker: &Marker);
}

/// Writes every marker to the log at debug level.
pub struct LogPublisher;

impl MarkerPublisher for LogPublisher {
    fn publish(&mut self, marker: &Marker) {
        match serde_json::to_string(marker) {
            Ok(json) => debug!("marker {}", json),
            Err(err) => debug!("could not serialize marker: {}", err),
        }
    }
}

/// Keeps the most recent marker around for readers on other threads.
#[derive(Clone, Default)]
pub struct LatestMarker {
    slot: Arc<Mutex<Option<Marker>>>,
}

impl LatestMarker {
    pub fn new() -> LatestMarker {
        return LatestMarker::default();
    }

    pub fn get(&self) -> Option<Marker> {
        match self.slot.lock() {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        }
    }
}

impl MarkerPublisher for LatestMarker {
    fn publish(&mut self, marker: &Marker) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(marker.clone());
        }
    }
}

/// Forwards each marker to several publishers.
pub struct Fanout {
    publishers: Vec<Box<dyn MarkerPublisher>>,
}

impl Fanout {
    pub fn new(publishers: Vec<Box<dyn MarkerPublisher>>) -> Fanout {
        return Fanout { publishers };
    }
}

impl MarkerPublisher for Fanout {
    fn publish(&mut self, marker: &Marker) {
        for publisher in self.publishers.iter_mut() {
            publisher.publish(marker);
        }
    }
}

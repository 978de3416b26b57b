use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::color::Color;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedMode {
    Static,
    Breath,
    // Accepted, but currently rendered exactly like `Static`.
    Flash,
}

impl TryFrom<i32> for LedMode {
    type Error = i32;

    fn try_from(value: i32) -> Result<LedMode, i32> {
        return match value {
            0 => Ok(LedMode::Static),
            1 => Ok(LedMode::Breath),
            2 => Ok(LedMode::Flash),
            other => Err(other),
        };
    }
}

impl fmt::Display for LedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LedMode::Static => "static",
            LedMode::Breath => "breath",
            LedMode::Flash => "flash",
        };
        write!(f, "{}", name)
    }
}

/// Sent by clients to switch the display mode.
///
/// `mode` stays a raw integer so that unsupported values can be reported
/// back to the caller instead of failing deserialization.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct ModeRequest {
    pub color: Color,
    pub mode: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModeResponse {
    /// 0 on success, -1 on failure.
    pub error_type: i32,
    pub error_msg: String,
}

impl ModeResponse {
    pub fn success() -> ModeResponse {
        return ModeResponse {
            error_type: 0,
            error_msg: String::new(),
        };
    }

    pub fn failure(msg: &str) -> ModeResponse {
        return ModeResponse {
            error_type: -1,
            error_msg: msg.to_string(),
        };
    }

    pub fn is_success(&self) -> bool {
        self.error_type == 0
    }
}

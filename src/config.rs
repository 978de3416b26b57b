use std::fs;
use std::path::Path;

use anyhow::anyhow;
use serde::Deserialize;
use serde::Serialize;

use crate::args::LinkArgs;
use crate::marker::MarkerConfig;
use crate::serial_link::LinkConfig;

/// Everything read once at startup.
///
/// ```json
/// {
///     "devicestring": "/dev/ttyUSB0",
///     "baudrate": 230400,
///     "marker": { "rate_hz": 10.0, "frame_id": "/base_link" }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    #[serde(flatten)]
    pub link: LinkConfig,
    pub marker: MarkerConfig,
}

impl LightConfig {
    pub fn load(path: &Path) -> anyhow::Result<LightConfig> {
        let json = fs::read_to_string(path)
            .map_err(|e| anyhow!("unable to read config file {}: {}", path.display(), e))?;
        return LightConfig::parse(&json);
    }

    pub fn parse(json: &str) -> anyhow::Result<LightConfig> {
        let config = serde_json::from_str(json).map_err(|e| anyhow!("invalid config: {}", e))?;
        return Ok(config);
    }

    /// Reads the config file named in `args`, if any, and applies the
    /// command line overrides on top.
    pub fn from_args(args: &LinkArgs) -> anyhow::Result<LightConfig> {
        let mut config = match &args.config {
            Some(path) => LightConfig::load(Path::new(path))?,
            None => LightConfig::default(),
        };
        if let Some(device) = &args.device {
            config.link.devicestring = Some(device.clone());
        }
        if let Some(baudrate) = args.baudrate {
            config.link.baudrate = Some(baudrate);
        }
        if let Some(rate) = args.marker_rate {
            config.marker.rate_hz = rate;
        }
        return Ok(config);
    }
}

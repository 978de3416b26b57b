use std::io::Write;
use std::time::Instant;

use anyhow::bail;
use clap::Parser;

use light_controller::args::ShellArgs;
use light_controller::config::LightConfig;
use light_controller::marker::LogPublisher;
use light_controller::Color;
use light_controller::Handle;
use light_controller::LightController;
use light_controller::ModeRequest;

macro_rules! skip_fail {
    ($res:expr) => {
        match $res {
            Ok(val) => val,
            Err(e) => {
                println!("Invalid value: {}", e);
                continue;
            }
        }
    };
}

fn parse_floats(value: &str) -> anyhow::Result<Vec<f64>> {
    let mut out = Vec::new();
    for part in value.split(',') {
        out.push(part.trim().parse::<f64>()?);
    }
    return Ok(out);
}

fn parse_rgba(value: &str) -> anyhow::Result<Color> {
    let v = parse_floats(value)?;
    return match v.len() {
        3 => Ok(Color::new(v[0], v[1], v[2], 1.0)),
        4 => Ok(Color::new(v[0], v[1], v[2], v[3])),
        _ => bail!("expected R,G,B or R,G,B,A"),
    };
}

fn parse_hs(value: &str) -> anyhow::Result<Color> {
    let v = parse_floats(value)?;
    if v.len() != 2 {
        bail!("expected H,S with h in [0.0,360.0], s in [0.0,1.0]");
    }
    return Ok(Color::from_hue_saturation(v[0], v[1], 1.0));
}

/// A shell for interactive debugging.
fn main() -> anyhow::Result<()> {
    light_controller::setup_logging();
    let args = ShellArgs::parse();
    let config = LightConfig::from_args(&args.link)?;
    let link = config.link.open_or_simulate();
    let controller = LightController::new(link, config.marker.clone(), Instant::now());
    let device = Handle::spawn(controller, Box::new(LogPublisher));
    let mut input = String::new();
    loop {
        print!("light> ");
        std::io::stdout().flush()?;
        input.clear();
        if std::io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim();
        match line {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("Valid commands are: rgb=R,G,B[,A], hs=H,S, mode=NUM (0 static, 1 breath, 2 flash), status, quit");
                continue;
            }
            "status" => {
                println!("{:?}", skip_fail!(device.status()));
                continue;
            }
            _ => {}
        }
        let (key, value) = match line.split_once('=') {
            Some(kv) => kv,
            None => {
                println!("expected input in the form of key=value");
                continue;
            }
        };
        match key {
            "rgb" => device.color(skip_fail!(parse_rgba(value))),
            "hs" => device.color(skip_fail!(parse_hs(value))),
            "mode" => {
                let mode = skip_fail!(value.trim().parse::<i32>());
                let color = skip_fail!(device.status()).color;
                let response = skip_fail!(device.mode(ModeRequest { color, mode }));
                println!("{:?}", response);
            }
            _ => {
                println!("unknown key {}", key);
                continue;
            }
        }
    }
    return Ok(());
}

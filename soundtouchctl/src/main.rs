//! soundtouchctl - power and volume control for Bose SoundTouch speakers
//!
//! One-shot CLI: each invocation discovers the speakers on the local network,
//! picks one, runs a single command against it, and exits. Failures are not
//! retried anywhere; they propagate here and terminate the process with a
//! message and a non-zero status.

mod select;
mod speaker;
mod transition;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use tracing::{debug, info};

use select::{format_device_list, select, Selection};
use speaker::{SoundTouchSpeaker, Speaker};
use transition::TransitionPlan;

#[derive(Parser, Debug)]
#[command(name = "soundtouchctl")]
#[command(about = "Power and volume control for Bose SoundTouch speakers")]
#[command(version)]
struct Cli {
    /// Target the device with this name instead of the first one discovered
    #[arg(long, conflicts_with = "index")]
    device: Option<String>,

    /// Target the device at this position in discovery order
    #[arg(long)]
    index: Option<usize>,

    /// Discovery timeout in seconds
    #[arg(long, default_value_t = 3)]
    timeout: u64,

    /// Log filter used when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "snake_case")]
enum Action {
    /// Power on the target speaker
    On,
    /// Power off the target speaker
    Off,
    /// Set the volume directly
    VolumeSet {
        #[arg(allow_negative_numbers = true)]
        level: i32,
    },
    /// Ramp the volume between two levels over a duration in minutes
    VolumeTransition {
        #[arg(allow_negative_numbers = true)]
        from_level: i32,
        #[arg(allow_negative_numbers = true)]
        to_level: i32,
        duration_minutes: f64,
    },
    /// Power on and ramp up to a target level over a duration in minutes
    SmoothOn {
        #[arg(allow_negative_numbers = true)]
        to_level: i32,
        duration_minutes: f64,
    },
    /// List discovered speakers and exit
    List,
    /// Show name, power state and volume of the target speaker
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let Some(action) = cli.action else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let timeout = Duration::from_secs(cli.timeout);
    println!("Looking up devices...");
    let devices =
        soundtouch_discovery::discover_with_timeout(timeout).context("device discovery failed")?;
    println!("Found {} devices", devices.len());

    if matches!(action, Action::List) {
        println!("{}", format_device_list(&devices));
        return Ok(());
    }

    let selection = match (&cli.device, cli.index) {
        (Some(name), _) => Selection::Name(name.clone()),
        (None, Some(index)) => Selection::Index(index),
        (None, None) => Selection::First,
    };
    debug!(?selection, "selecting target device");
    let device = select(&selection, devices)?;
    println!("Device name: {}", device.name);

    let speaker = SoundTouchSpeaker::new(device);
    debug!(speaker = speaker.name(), ?action, "dispatching command");
    match action {
        Action::On => speaker.power_on()?,
        Action::Off => speaker.power_off()?,
        Action::VolumeSet { level } => speaker.set_volume(level)?,
        Action::VolumeTransition {
            from_level,
            to_level,
            duration_minutes,
        } => {
            let plan = TransitionPlan::new(from_level, to_level, duration_minutes)?;
            transition::run(&plan, &speaker)?;
        }
        Action::SmoothOn {
            to_level,
            duration_minutes,
        } => {
            transition::smooth_power_on(&speaker, to_level, duration_minutes)?;
        }
        Action::Status => print_status(&speaker)?,
        Action::List => unreachable!("handled before device selection"),
    }

    info!("command completed");
    Ok(())
}

fn print_status(speaker: &SoundTouchSpeaker) -> Result<()> {
    let client = speaker.client();
    let info = client.info().context("failed to read device info")?;
    let now_playing = client.now_playing().context("failed to read playback state")?;
    let volume = client.volume().context("failed to read volume")?;

    println!("Device: {} ({})", info.name, info.device_type);
    println!(
        "Power: {}",
        if now_playing.is_standby() { "standby" } else { "on" }
    );
    let muted = if volume.mute_enabled { " (muted)" } else { "" };
    println!("Volume: {}{}", volume.actual_volume, muted);
    Ok(())
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();
}

//! `slotcast` CLI: replay a recorded detection stream and emit OSC.

use std::io::BufReader;
use std::path::Path;

use anyhow::Result;
use clap::Parser;
use slotcast_rs::{
    ClassVocabulary, DetectionGuard, FilterConfig, OscConfig, OscSink, ReplaySource, SlotPipeline,
    SlotRouter,
};

#[derive(Parser)]
#[command(
    name = "slotcast",
    about = "Route tracked detections into stable slots and emit them over OSC"
)]
struct Cli {
    /// Detection stream as JSON Lines; '-' reads stdin
    #[arg(long, default_value = "-")]
    input: String,

    /// Comma-separated class names to track, e.g. "sports ball,cup,banana"
    #[arg(long, default_value = "sports ball")]
    classes: String,

    /// Print available class names and exit
    #[arg(long)]
    list_classes: bool,

    /// Maximum concurrent objects to output (slots 1..N)
    #[arg(long, default_value_t = 3)]
    max_slots: usize,

    /// EMA smoothing factor per slot (0..1). 0 disables.
    #[arg(long, default_value_t = 0.25)]
    ema: f32,

    /// Frames to hold last value on brief misses before sending the sentinel
    #[arg(long, default_value_t = 12)]
    hold: u32,

    /// Minimum normalized bbox area to accept
    #[arg(long, default_value_t = 0.0008)]
    min_area: f32,

    /// Minimum detection confidence
    #[arg(long, default_value_t = 0.25)]
    conf: f32,

    /// OSC destination host
    #[arg(long, default_value = "127.0.0.1")]
    osc_host: String,

    /// OSC destination port
    #[arg(long, default_value_t = 9000)]
    osc_port: u16,

    /// Base OSC path for per-slot data (e.g. /ball/1)
    #[arg(long, default_value = "/ball")]
    base_path: String,

    /// OSC path for the active-slot count
    #[arg(long, default_value = "/balls/count")]
    count_path: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let vocab = ClassVocabulary::coco();

    if cli.list_classes {
        println!("Available classes:");
        for (i, name) in vocab.names().iter().enumerate() {
            println!("{i:2}: {name}");
        }
        return Ok(());
    }

    let target_classes = vocab.resolve(&cli.classes)?;
    let router = SlotRouter::new(
        cli.max_slots,
        FilterConfig {
            ema_factor: cli.ema,
            hold_frames: cli.hold,
            min_area_fraction: cli.min_area,
        },
    );
    let guard = DetectionGuard::new(cli.conf, target_classes);
    let sink = OscSink::connect(OscConfig {
        host: cli.osc_host,
        port: cli.osc_port,
        base_path: cli.base_path,
        count_path: cli.count_path,
    })?;

    if cli.input == "-" {
        let source = ReplaySource::new(BufReader::new(std::io::stdin().lock()));
        SlotPipeline::new(source, sink, router, guard).run()?;
    } else {
        let source = ReplaySource::open(Path::new(&cli.input))?;
        SlotPipeline::new(source, sink, router, guard).run()?;
    }
    Ok(())
}

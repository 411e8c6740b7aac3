use anyhow::Result;
use clap::Parser;
use log::{error, info, warn};
use pi_stats::{
    default_registry, OutputFlavor, RecordAssembler, SamplingLoop, Settings, SystemHost, Vcgencmd,
};
use pi_stats_core::DEFAULT_MEASUREMENT;
use std::path::PathBuf;

/// pi-stats - Raspberry Pi firmware telemetry in line protocol
#[derive(Parser, Debug, Clone)]
#[command(name = "pi-stats")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seconds to wait after each record
    #[arg(short = 's', long = "step", value_name = "SECONDS", default_value_t = 1)]
    step: u64,

    /// Output flavor: "tagged" (measurement, host tag, timestamp) or "bare" (fields only)
    #[arg(short = 'f', long = "flavor", value_name = "FLAVOR", default_value_t = OutputFlavor::Tagged)]
    flavor: OutputFlavor,

    /// Measurement name for tagged output
    #[arg(short = 'm', long = "measurement", value_name = "NAME", default_value = DEFAULT_MEASUREMENT)]
    measurement: String,

    /// Path to the vcgencmd utility
    #[arg(long = "vcgencmd", value_name = "PATH", default_value = "vcgencmd")]
    vcgencmd: PathBuf,

    /// List registered metrics as JSON and exit
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            measurement: self.measurement.clone(),
            vcgencmd: self.vcgencmd.clone(),
            ..Settings::default()
        }
        .with_step_secs(self.step)
        .with_flavor(self.flavor)
    }
}

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug (one line per record)
    // Level 3+: trace (one line per device query)
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(&cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    warn!("Starting pi-stats v{}", env!("CARGO_PKG_VERSION"));

    let registry = default_registry()?;

    if cli.list {
        println!("{}", serde_json::to_string_pretty(&registry.info())?);
        return Ok(());
    }

    let settings = cli.settings();
    let assembler = RecordAssembler::new(registry, &SystemHost, &settings)?;
    info!(
        "Sampling {} metrics from host '{}' every {:?} ({} output)",
        assembler.registry().len(),
        assembler.host(),
        settings.interval,
        settings.flavor
    );

    let device = Vcgencmd::new(settings.vcgencmd.clone());
    info!("Querying firmware through {}", device.program().display());
    let stdout = std::io::stdout().lock();
    let mut sampling_loop = SamplingLoop::new(assembler, device, stdout, settings.interval);
    match sampling_loop.run()? {}
}

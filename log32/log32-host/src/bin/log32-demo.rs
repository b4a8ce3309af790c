//! log32 demo
//!
//! Runs the firmware logging loop on the host: a root logger writing to stdout
//! and, optionally, to a syslog server, plus a module logger whose level
//! changes every iteration.

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use log32_core::bootstrap::{self, device_id_from_mac};
use log32_core::{LogLevel, Logger, LoggingConfig, SerialConfig, SyslogConfig};
use log32_host::{StdoutConsole, SystemClock, UdpDatagram, load_config};

#[derive(Parser, Debug)]
#[command(name = "log32-demo")]
#[command(about = "Exercise hierarchical logging to stdout and syslog", long_about = None)]
struct Args {
    /// JSON logging config; the options below are ignored when given
    #[arg(long)]
    config: Option<PathBuf>,

    /// Syslog server to send to in addition to stdout
    #[arg(long)]
    syslog_host: Option<String>,

    /// Syslog server UDP port
    #[arg(long, default_value = "514")]
    syslog_port: u16,

    /// Level of the root logger (name or number)
    #[arg(long, default_value = "DEBUG")]
    level: LogLevel,

    /// Disable ANSI colors on stdout
    #[arg(long)]
    no_color: bool,

    /// Number of loop iterations
    #[arg(long, default_value = "6")]
    count: u32,

    /// Pause between iterations in milliseconds
    #[arg(long, default_value = "1000")]
    interval_ms: u64,
}

/// Module owning a child logger of the root
struct AnotherModule<'t> {
    logger: Logger<'t>,
}

impl<'t> AnotherModule<'t> {
    fn new(parent: Logger<'t>) -> Self {
        Self {
            logger: parent.child("anotherModule"),
        }
    }

    fn do_something(&self, count: u32) {
        let level = LogLevel::from_raw((10 * (count % 6)) as u8);
        log32_core::critical!(self.logger, "Changing AnotherModule log level to {}", level.raw());
        self.logger.set_level(level);

        log32_core::debug!(self.logger, "Debug message from AnotherModule (#{count})");
        log32_core::info!(self.logger, "Info message from AnotherModule (#{count})");
        log32_core::warn!(self.logger, "Warning message from AnotherModule (#{count})");
        log32_core::error!(self.logger, "Error message from AnotherModule (#{count})");
        log32_core::critical!(self.logger, "Critical message from AnotherModule (#{count})");
    }
}

fn config_from_args(args: &Args) -> LoggingConfig {
    LoggingConfig {
        level: args.level,
        device_id: Some(device_id_from_mac(u64::from(std::process::id()))),
        serial: Some(SerialConfig {
            color: !args.no_color,
            baud_rate: 115_200,
        }),
        syslog: args.syslog_host.as_ref().map(|host| SyslogConfig {
            host: host.clone(),
            port: args.syslog_port,
            ..SyslogConfig::default()
        }),
        ..LoggingConfig::default()
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => config_from_args(&args),
    };
    log::info!("Starting with root logger '{}' at level {}", config.tag, config.level);

    let setup = bootstrap::from_config(
        &config,
        Some(StdoutConsole::new()),
        Some(UdpDatagram::new()),
        SystemClock::new(),
    )
    .context("Failed to set up logging")?;
    let root = setup.root;
    let another_module = AnotherModule::new(root);

    for counter in 0..args.count {
        let start = Instant::now();
        log32_core::debug!(root, "This is debug message {counter} from the root logger");
        log32_core::info!(root, "This is info message {counter}");
        log32_core::warn!(root, "This is warn message {counter}");
        log32_core::error!(root, "This is error message {counter}");
        log32_core::critical!(root, "This is critical message {counter}");
        let per_call_ms = start.elapsed().as_secs_f64() * 1000.0 / 5.0;
        log32_core::debug!(root, "Duration per call for 5 calls: {per_call_ms:.3} ms");

        another_module.do_something(counter);

        if counter + 1 < args.count {
            log32_core::info!(root, "Sleeping a while...");
            thread::sleep(Duration::from_millis(args.interval_ms));
        }
    }

    Ok(())
}

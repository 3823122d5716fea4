mod config;
mod error;
mod frame;
mod game;
mod link;
mod logging;
mod pulse;
mod sim;
mod vitals;
mod zones;

use clap::Parser;
use log::{LevelFilter, error, info, warn};
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Serial port the motor controller is attached to.
    #[arg(long, default_value = "/dev/ttyACM0")]
    port: String,

    /// Baud rate for the serial link.
    #[arg(long, default_value_t = config::DEFAULT_BAUD)]
    baud: u32,

    /// Run the pipeline without opening the serial link (frames are dropped).
    #[arg(long)]
    no_link: bool,

    /// Stop after this many ticks (runs until interrupted by default).
    #[arg(long)]
    ticks: Option<u64>,

    /// Debug filter to specify log topics (e.g., "zone,pulse,frame,link,sim")
    /// Available topics: zone, pulse, frame, link, sim
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize the logger
    let log_level = match args.log_level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    // Setup logger with debug filters if provided
    if let Err(e) = logging::init_logger(log_level, args.debug_filter) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    info!("Initializing haptic bridge...");

    // Open the serial link, or run headless when asked to
    let link = if args.no_link {
        warn!("Running without a controller link; frames will be dropped");
        link::LinkTransport::absent()
    } else {
        match link::LinkTransport::open(&args.port, args.baud) {
            Ok(link) => {
                info!("Controller link open on {} at {} baud", args.port, args.baud);
                link
            }
            Err(e) => {
                error!("{}", e);
                error!("Pass --no-link to run without the controller");
                process::exit(1);
            }
        }
    };

    // Cancellation token, flipped by the interrupt handler and observed
    // cooperatively at the top of each tick
    let cancel = Arc::new(AtomicBool::new(false));
    let token = cancel.clone();
    ctrlc::set_handler(move || {
        info!("Interrupt received, shutting down...");
        token.store(true, Ordering::SeqCst);
    })
    .expect("Failed to set interrupt handler");

    let sim = sim::ScriptedSim::new();
    let mut game = game::Game::new(sim, link, cancel, args.ticks);

    if let Err(e) = game.run() {
        error!("Run aborted: {}", e);
        process::exit(1);
    }
    info!("Exiting.");
}

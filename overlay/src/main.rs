use clap::Parser;
use coarsetime::Instant;
use crossbeam_channel::bounded;
use log::{LevelFilter, warn};
#[cfg(debug_assertions)]
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::{
    append::rolling_file::{
        RollingFileAppender,
        policy::compound::{
            CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
        },
    },
    config::{Appender, Config as LogConfig, Logger, Root},
    encode::pattern::PatternEncoder,
};
use macroquad::prelude::*;
use scoreboard_common::game_snapshot::ScoreboardSnapshot;
use std::{net::IpAddr, path::PathBuf, str::FromStr};

mod board;
mod network;
mod pages;

use board::{BoardLayout, ScoreBoard};
use pages::PageRenderer;

const APP_NAME: &str = "overlay";

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct AppConfig {
    server_ip: IpAddr,
    server_port: u16,
    layout: BoardLayout,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_ip: IpAddr::from_str("127.0.0.1").unwrap(),
            server_port: 3000,
            layout: BoardLayout::default(),
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(long, default_value = "HOME")]
    /// Home team label, shown verbatim and never updated by the feed
    home: String,

    #[clap(long, default_value = "AWAY")]
    /// Away team label, shown verbatim and never updated by the feed
    away: String,

    #[clap(long, short, action(clap::ArgAction::Count))]
    /// Increase the log verbosity
    verbose: u8,

    #[clap(long)]
    /// Directory within which log files will be placed, default is platform dependent
    log_location: Option<PathBuf>,

    #[clap(long, default_value = "5000000")]
    /// Max size in bytes that a log file is allowed to reach before being rolled over
    log_max_file_size: u64,

    #[clap(long, default_value = "3")]
    /// Number of archived logs to keep
    num_old_logs: u32,
}

#[macroquad::main(window_conf())]
async fn main() {
    let args = Cli::parse();
    init_logging(&args);

    let config: AppConfig = match confy::load(APP_NAME, None) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to read config file, overwriting with default. Error: {e}");
            let config = AppConfig::default();
            confy::store(APP_NAME, None, &config).unwrap();
            config
        }
    };

    let (tx, rx) = bounded::<ScoreboardSnapshot>(3);
    let layout = config.layout.clone();

    let net_worker = std::thread::spawn(move || {
        network::networking_thread(tx, config);
    });

    let mut board = ScoreBoard::new(&layout, &args.home, &args.away);
    let renderer = PageRenderer::default();

    loop {
        assert!(!net_worker.is_finished(), "Networking thread panicked!");
        clear_background(BLACK);

        // Snapshots apply strictly in arrival order
        while let Ok(snapshot) = rx.try_recv() {
            board.apply_snapshot(snapshot, Instant::now());
        }

        renderer.scoreboard_display(&board, Instant::now());
        next_frame().await;
    }
}

fn init_logging(args: &Cli) {
    let log_level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let log_base_path = args.log_location.clone().unwrap_or_else(|| {
        let mut path = directories::BaseDirs::new()
            .expect("Could not find a directory to store logs")
            .data_local_dir()
            .to_path_buf();
        path.push("basketball-overlay-logs");
        path
    });
    let mut log_path = log_base_path.clone();
    let mut archived_log_path = log_base_path.clone();
    log_path.push(format!("{APP_NAME}-log.txt"));
    archived_log_path.push(format!("{APP_NAME}-log-{{}}.txt.gz"));

    #[cfg(debug_assertions)]
    println!("Log path: {}", log_path.display());

    // Only log to the console in debug mode
    #[cfg(all(debug_assertions, not(target_os = "windows")))]
    let console_target = Target::Stderr;
    #[cfg(all(debug_assertions, target_os = "windows"))]
    let console_target = Target::Stdout; // Windows apps don't get a stderr handle
    #[cfg(debug_assertions)]
    let console = ConsoleAppender::builder()
        .target(console_target)
        .encoder(Box::new(PatternEncoder::new("[{d} {h({l:5})} {M}] {m}{n}")))
        .build();

    // Setup the file log roller
    let roller = FixedWindowRoller::builder()
        .build(
            archived_log_path.as_os_str().to_str().unwrap(),
            args.num_old_logs,
        )
        .unwrap();
    let file_policy = CompoundPolicy::new(
        Box::new(SizeTrigger::new(args.log_max_file_size)),
        Box::new(roller),
    );
    let file_appender = RollingFileAppender::builder()
        .append(true)
        .encoder(Box::new(PatternEncoder::new("[{d} {l:5} {M}] {m}{n}")))
        .build(log_path, Box::new(file_policy))
        .unwrap();

    // Setup the logging from all locations to use `LevelFilter::Error`
    let root = Root::builder().appender("file_appender");
    #[cfg(debug_assertions)]
    let root = root.appender("console");
    let root = root.build(LevelFilter::Error);

    // Setup the top level logging config
    let log_config = LogConfig::builder()
        .appender(Appender::builder().build("file_appender", Box::new(file_appender)));

    #[cfg(debug_assertions)]
    let log_config = log_config.appender(Appender::builder().build("console", Box::new(console)));

    let log_config = log_config
        .logger(Logger::builder().build("overlay", log_level)) // Setup the logging from the overlay app to use `log_level`
        .build(root)
        .unwrap();

    log4rs::init_config(log_config).unwrap();
    log_panics::init();
}

fn window_conf() -> Conf {
    Conf {
        window_title: String::from("Basketball Overlay"),
        window_width: 1920,
        window_height: 1080,
        window_resizable: false,
        ..Default::default()
    }
}

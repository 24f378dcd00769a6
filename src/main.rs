/* 3rd party libraries */
use clap::Parser;
use crossbeam_channel as cbc;
use log::{error, info, warn};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::thread::Builder;

/* Custom libraries */
use lift_sim::config::{self, Config};
use lift_sim::shared::BuildingSnapshot;
use lift_sim::unwrap_or_exit;
use lift_sim::{ButtonId, Controller, Direction, Notification};

/// Single elevator dispatch simulator.
///
/// Reads commands from stdin: `hall <floor> up|down`, `cab <floor>`,
/// `status` and `quit`.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to the TOML configuration file
    #[clap(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the number of floors
    #[clap(short, long)]
    floors: Option<u8>,
}

#[derive(Debug, PartialEq)]
enum Command {
    Press(ButtonId),
    Status,
    Quit,
}

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // Load the configuration
    let mut config = if args.config.exists() {
        unwrap_or_exit!(config::load_config(&args.config))
    } else {
        warn!("{} not found, using defaults", args.config.display());
        Config::default()
    };
    if let Some(n_floors) = args.floors {
        config.building.n_floors = n_floors;
    }
    unwrap_or_exit!(config::validate(&config));

    // Initialize channels
    let (button_tx, button_rx) = cbc::unbounded::<ButtonId>();
    let (notification_tx, notification_rx) = cbc::unbounded::<Notification>();
    let (state_tx, state_rx) = cbc::unbounded::<BuildingSnapshot>();
    let (status_tx, status_rx) = cbc::unbounded::<()>();
    let (terminate_tx, terminate_rx) = cbc::unbounded::<()>();

    // Start the controller
    let controller = unwrap_or_exit!(Controller::new(
        &config,
        button_rx,
        notification_tx,
        state_tx,
        terminate_rx,
    ));
    let controller_thread = unwrap_or_exit!(Builder::new()
        .name("controller".into())
        .spawn(move || controller.run()));

    // Start the monitor
    unwrap_or_exit!(Builder::new()
        .name("monitor".into())
        .spawn(move || monitor(notification_rx, state_rx, status_rx)));

    info!(
        "Simulating {} floors, commands: hall <floor> up|down, cab <floor>, status, quit",
        config.building.n_floors
    );

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(Command::Press(button)) => {
                let _ = button_tx.send(button);
            }
            Ok(Command::Status) => {
                let _ = status_tx.send(());
            }
            Ok(Command::Quit) => break,
            Err(e) => warn!("{}", e),
        }
    }

    let _ = terminate_tx.send(());
    if controller_thread.join().is_err() {
        error!("Controller thread panicked");
    }
}

/// Logs notifications as they happen and the latest snapshot on request.
fn monitor(
    notification_rx: cbc::Receiver<Notification>,
    state_rx: cbc::Receiver<BuildingSnapshot>,
    status_rx: cbc::Receiver<()>,
) {
    let mut latest: Option<BuildingSnapshot> = None;
    loop {
        cbc::select! {
            recv(notification_rx) -> notification => match notification {
                Ok(notification) => info!("{:?}", notification),
                Err(_) => return,
            },
            recv(state_rx) -> state => match state {
                Ok(state) => latest = Some(state),
                Err(_) => return,
            },
            recv(status_rx) -> _ => match latest.as_ref().map(serde_json::to_string_pretty) {
                Some(Ok(json)) => info!("Status:\n{}", json),
                Some(Err(e)) => error!("Failed to serialize status: {}", e),
                None => info!("No status published yet"),
            },
        }
    }
}

fn parse_command(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let floor = |word: &str| {
        word.parse::<u8>()
            .map_err(|_| format!("invalid floor number: {}", word))
    };

    match words.as_slice() {
        ["status"] => Ok(Command::Status),
        ["quit"] | ["exit"] => Ok(Command::Quit),
        ["cab", n] => Ok(Command::Press(ButtonId::Cab { floor: floor(*n)? })),
        ["hall", n, dir] => {
            let direction = match *dir {
                "up" => Direction::Up,
                "down" => Direction::Down,
                other => return Err(format!("invalid direction: {}", other)),
            };
            Ok(Command::Press(ButtonId::Hall {
                floor: floor(*n)?,
                direction,
            }))
        }
        _ => Err(format!("unknown command: {}", line.trim())),
    }
}

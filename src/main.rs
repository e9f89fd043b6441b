use std::path::{Path, PathBuf};
use std::thread::sleep;
use std::time::Duration;

use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};
use colored::Colorize;
use hotwatch::notify::Event;
use hotwatch::{
    blocking::{Flow, Hotwatch},
    EventKind,
};
use miette::{bail, IntoDiagnostic, Result};

use intcode::output::Output;
use intcode::{image, search, FeedbackNetwork, Phases, Topology};

/// IntCode interpreter for chaining amplifiers and searching their phase settings.
#[derive(Parser)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Quickly provide a program file to search
    path: Option<PathBuf>,

    /// Report every output and halt of each amplifier
    #[arg(
        short,
        long,
        global = true,
        env = "INTCODE_TRACE",
        value_parser = BoolishValueParser::new()
    )]
    trace: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate one phase permutation and output the resulting signal
    Run {
        /// Program file to run
        name: PathBuf,
        /// Comma-separated phase settings, one per amplifier
        #[arg(short, long)]
        phases: Option<Phases>,
        /// Run amplifiers once in a chain instead of a feedback loop
        #[arg(short, long)]
        serial: bool,
        /// Produce minimal output, suited for blackbox tests
        #[arg(short, long)]
        minimal: bool,
    },
    /// Try every permutation of the phase settings and output the strongest signal
    Search {
        /// Program file to search
        name: PathBuf,
        /// Comma-separated phase settings to permute
        #[arg(short, long)]
        phases: Option<Phases>,
        /// Run amplifiers once in a chain instead of a feedback loop
        #[arg(short, long)]
        serial: bool,
        /// Produce minimal output, suited for blackbox tests
        #[arg(short, long)]
        minimal: bool,
    },
    /// Check that a program file can be loaded
    Check {
        /// File to check
        name: PathBuf,
    },
    /// Place a watch on a program file and search again whenever it changes
    Watch {
        /// Program file to watch
        name: PathBuf,
        /// Run amplifiers once in a chain instead of a feedback loop
        #[arg(short, long)]
        serial: bool,
    },
}

fn main() -> miette::Result<()> {
    use MsgColor::*;
    let args = Args::parse();
    Output::set_tracing(args.trace);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new() //
                .context_lines(intcode::DIAGNOSTIC_CONTEXT_LINES)
                .build(),
        )
    }))?;

    if let Some(command) = args.command {
        match command {
            Command::Run {
                name,
                phases,
                serial,
                minimal,
            } => {
                Output::set_minimal(minimal);
                run(&name, phases, topology(serial))
            }
            Command::Search {
                name,
                phases,
                serial,
                minimal,
            } => {
                Output::set_minimal(minimal);
                search_phases(&name, phases, topology(serial))
            }
            Command::Check { name } => {
                file_message(Green, "Checking", &name);
                let image = image::load(&name)?;
                message(
                    Green,
                    "Success",
                    &format!("loaded {} integers, no errors found!", image.len()),
                );
                Ok(())
            }
            Command::Watch { name, serial } => {
                if !name.exists() {
                    bail!("File does not exist. Exiting...")
                }
                // Vim breaks if watching a single file
                let folder_path = match name.parent() {
                    Some(pth) if pth.is_dir() => pth.to_path_buf(),
                    _ => Path::new(".").to_path_buf(),
                };

                // Clear screen and move cursor to top left
                print!("\x1B[2J\x1B[2;1H");
                file_message(Green, "Watching", &name);
                message(Cyan, "Help", "press CTRL+C to exit");

                let mut watcher = Hotwatch::new_with_custom_delay(Duration::from_millis(500))
                    .into_diagnostic()?;

                watcher
                    .watch(folder_path, move |event: Event| match event.kind {
                        // Watch remove for vim changes
                        EventKind::Modify(_) | EventKind::Remove(_) => {
                            // Clear screen
                            print!("\x1B[2J\x1B[2;1H");
                            file_message(Green, "Watching", &name);
                            message(Green, "Re-running", "file change detected");
                            message(Cyan, "Help", "press CTRL+C to exit");

                            // Give the editor time to finish writing
                            sleep(Duration::from_millis(50));

                            if let Err(e) = search_phases(&name, None, topology(serial)) {
                                println!("\n{:?}", e);
                            }
                            Flow::Continue
                        }
                        _ => Flow::Continue,
                    })
                    .into_diagnostic()?;
                watcher.run();
                Ok(())
            }
        }
    } else if let Some(path) = args.path {
        search_phases(&path, None, Topology::Feedback)
    } else {
        println!("\n~ intcode v{VERSION} ~");
        println!("{SHORT_INFO}");
        std::process::exit(0);
    }
}

fn topology(serial: bool) -> Topology {
    if serial {
        Topology::Serial
    } else {
        Topology::Feedback
    }
}

enum MsgColor {
    Green,
    Cyan,
}

fn file_message(color: MsgColor, left: &str, right: &Path) {
    let right = format!("target {}", right.display());
    message(color, left, &right);
}

/// Status line, skipped if `--minimal`.
fn message(color: MsgColor, left: &str, right: &str) {
    if Output::is_minimal() {
        return;
    }
    let left = match color {
        MsgColor::Green => left.green(),
        MsgColor::Cyan => left.cyan(),
    };
    println!("{left:>12} {right}");
}

/// Result line, printed bare if `--minimal`.
fn report(left: &str, right: &str) {
    if Output::is_minimal() {
        Output::Normal.print_str(&format!("{right}\n"));
    } else {
        message(MsgColor::Cyan, left, right);
    }
}

fn run(name: &Path, phases: Option<Phases>, topology: Topology) -> Result<()> {
    file_message(MsgColor::Green, "Loading", name);
    let image = image::load(name)?;
    let phases = phases.unwrap_or_else(|| Phases::default_for(topology));

    message(MsgColor::Green, "Evaluating", &format!("phases {phases}"));
    let signal = FeedbackNetwork::new(&image, phases.as_slice(), topology)
        .run()
        .into_diagnostic()?;

    report("Signal", &signal.to_string());
    Ok(())
}

fn search_phases(name: &Path, phases: Option<Phases>, topology: Topology) -> Result<()> {
    file_message(MsgColor::Green, "Loading", name);
    let image = image::load(name)?;
    let phases = phases.unwrap_or_else(|| Phases::default_for(topology));

    message(MsgColor::Green, "Searching", &format!("permutations of {phases}"));
    let best = search::best(&image, phases.as_slice(), topology).into_diagnostic()?;

    report("Signal", &best.signal.to_string());
    report("Phases", &Phases::from(best.phases).to_string());
    Ok(())
}

const SHORT_INFO: &str = r"
An IntCode interpreter for amplifier chains and feedback loops.
Please use `-h` or `--help` to access the usage instructions and documentation.
";

const VERSION: &str = env!("CARGO_PKG_VERSION");

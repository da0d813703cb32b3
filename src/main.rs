#![recursion_limit = "1024"]
#[macro_use]
extern crate scan_fmt;

use clap::Parser;
use error_chain::{error_chain, ChainedError, ExitCode};
use log::{error, info};
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};

mod describe;
mod generate;
mod solve;

error_chain! {
    foreign_links {
        Io(std::io::Error);
        Json(serde_json::Error);
    }

    links {
        RouteGraph(routegraph::error::Error, routegraph::error::ErrorKind);
        RouteInspection(route_inspection::error::Error, route_inspection::error::ErrorKind);
    }

    errors {
        Parameter {
            description("a parameter was missing, superfluous or had an illegal value, see the log for more details")
            display("a parameter was missing, superfluous or had an illegal value, see the log for more details")
        }
    }
}

#[derive(Parser)]
#[clap(name = "Postman", version = env!("CARGO_PKG_VERSION"), author = "Sebastian Schmidt <sebastian.schmidt@helsinki.fi>")]
struct CliOptions {
    #[clap(subcommand)]
    pub subcommand: Command,

    #[clap(
        long,
        default_value = "Info",
        help = "The log level to use, one of Error, Warn, Info, Debug, Trace"
    )]
    pub log_level: LevelFilter,
}

#[derive(Parser)]
enum Command {
    #[clap(
        about = "Computes a minimum weight closed walk that uses every edge of the input graph at least once."
    )]
    Solve(solve::SolveCommand),
    #[clap(about = "Prints the nodes of the input graph with their incoming and outgoing edges.")]
    Describe(describe::DescribeCommand),
    /// Generates a random connected graph and writes it as edge list.
    Generate(generate::GenerateCommand),
}

// The main is unpacked from an error-chain macro.
// Using just the macro makes IntelliJ complain that there would be no main.
// The real main (programmed manually) is run(), below this method.
fn main() {
    ::std::process::exit(match run() {
        Ok(()) => ExitCode::code(()),
        Err(ref e) => {
            error!("{}", ChainedError::display_chain(e));
            1
        }
    });
}

fn initialise_logging(level_filter: LevelFilter) {
    CombinedLogger::init(vec![TermLogger::new(
        level_filter,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])
    .unwrap();

    info!("Logging initialised successfully");
}

fn run() -> Result<()> {
    let options = &CliOptions::parse();
    initialise_logging(options.log_level);

    match &options.subcommand {
        Command::Solve(subcommand) => solve::solve(options, subcommand),
        Command::Describe(subcommand) => describe::describe(options, subcommand),
        Command::Generate(subcommand) => generate::generate(options, subcommand),
    }?;

    info!("Goodbye");
    Ok(())
}

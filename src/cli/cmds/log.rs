use std::io::Write;

use super::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use gitwrap::LogOptions;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("log")
        .about("Show commit history")
        .arg(
            Arg::with_name("format")
                .long("format")
                .takes_value(true)
                .help("Pretty-print each commit with this git format string"),
        )
        .arg(
            Arg::with_name("count")
                .short("n")
                .takes_value(true)
                .help("Show at most this many commits"),
        )
}

pub(crate) fn run(app: &mut App, log_matches: &ArgMatches) -> Result<()> {
    let limit = match log_matches.value_of("count") {
        Some(count) => count
            .parse::<usize>()
            .map_err(|e| format!("invalid count {:?}: {}", count, e))?,
        None => 0,
    };

    let options = LogOptions {
        format: log_matches.value_of("format").map(String::from),
        limit,
        ..LogOptions::default()
    };

    let log = app.repo()?.log(&options)?;
    if !log.is_empty() {
        writeln!(app, "{}", log.trim_end_matches('\n'))?;
    }

    Ok(())
}

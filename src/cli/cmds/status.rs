use std::io::Write;

use super::{App, Result};

use clap::{ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("status").about("Show the working tree status")
}

pub(crate) fn run(app: &mut App, _matches: &ArgMatches) -> Result<()> {
    let status = app.repo()?.status()?;
    write!(app, "{}", status)?;
    Ok(())
}

use std::io::Write;

use super::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("description")
        .about("Print the repository description, or replace it")
        .arg(
            Arg::with_name("text")
                .help("New description, written verbatim followed by a newline"),
        )
}

pub(crate) fn run(app: &mut App, description_matches: &ArgMatches) -> Result<()> {
    let repo = app.repo()?;

    match description_matches.value_of("text") {
        Some(text) => repo.set_description(format!("{}\n", text))?,
        None => {
            let description = repo.description()?;
            write!(app, "{}", description)?;
        }
    }

    Ok(())
}

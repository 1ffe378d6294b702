use std::io::Write;

use super::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("branch")
        .about("List branches, marking the current one with '*'")
        .arg(
            Arg::with_name("remote")
                .short("r")
                .long("remote")
                .help("List remote-tracking branches instead"),
        )
}

pub(crate) fn run(app: &mut App, branch_matches: &ArgMatches) -> Result<()> {
    let repo = app.repo()?;

    let branches = if branch_matches.is_present("remote") {
        repo.list_remote_branches()?
    } else {
        repo.list_branches(true)?
    };

    for branch in branches {
        writeln!(app, "{}", branch)?;
    }

    Ok(())
}

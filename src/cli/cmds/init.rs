use std::io::Write;

use super::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("init")
        .about("Create an empty git repository")
        .arg(
            Arg::with_name("directory")
                .required(true)
                .help("The directory to create"),
        )
}

pub(crate) fn run(app: &mut App, init_matches: &ArgMatches) -> Result<()> {
    let dir = init_matches.value_of_os("directory").unwrap_or_default();
    let path = app.work_dir().join(dir);

    let repo = app.locator().create(&path)?;

    writeln!(
        app,
        "Initialized empty Git repository in {}",
        repo.git_dir()?.display()
    )?;

    Ok(())
}

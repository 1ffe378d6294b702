use crate::{App, Result};

mod branch;
mod description;
mod init;
mod log;
mod status;

#[cfg(test)]
mod test_support;

pub(crate) fn add_subcommands<'a, 'b>(app: clap::App<'a, 'b>) -> clap::App<'a, 'b> {
    app.subcommand(branch::subcommand())
        .subcommand(description::subcommand())
        .subcommand(init::subcommand())
        .subcommand(log::subcommand())
        .subcommand(status::subcommand())
}

pub(crate) fn dispatch(app: &mut App) -> Result<()> {
    let matches = app.arg_matches.clone();
    // ^^ The subcommand matches borrow from this copy, leaving `app` free
    // to be passed on mutably.

    match matches.subcommand() {
        ("branch", Some(m)) => branch::run(app, &m),
        ("description", Some(m)) => description::run(app, &m),
        ("init", Some(m)) => init::run(app, &m),
        ("log", Some(m)) => log::run(app, &m),
        ("status", Some(m)) => status::run(app, &m),
        _ => unreachable!(),
        // unreachable: clap exits with help or an error message when no
        // subcommand is given.
    }
}

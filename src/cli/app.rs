#![deny(warnings)]

use std::{io::Write, path::Path};

#[cfg(test)]
use std::ffi::OsString;

use crate::{cmds, Result};

use clap::{crate_version, AppSettings, Arg, ArgMatches};
use gitwrap::{Config, Repository, RepositoryLocator};

pub(crate) fn clap_app<'a, 'b>() -> clap::App<'a, 'b> {
    let app = clap::App::new("gitwrap")
        .version(crate_version!())
        .about("Runs common git operations through the installed git")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::VersionlessSubcommands)
        .arg(
            Arg::with_name("dir")
                .short("C")
                .takes_value(true)
                .value_name("path")
                .default_value(".")
                .help("Run as if started in <path>"),
        )
        .arg(
            Arg::with_name("git")
                .long("git")
                .takes_value(true)
                .value_name("path")
                .help("git executable to run (default: $GITWRAP_GIT_BIN, then /usr/bin/git or git)"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Log more (repeat for more detail)"),
        );

    cmds::add_subcommands(app)
}

// Logs go to stderr so they never mix with command output.
pub(crate) fn init_tracing(verbosity: u64) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub(crate) struct App<'a> {
    pub arg_matches: ArgMatches<'a>,
    pub stdout: &'a mut dyn Write,
}

impl<'a> App<'a> {
    pub fn run(&mut self) -> Result<()> {
        cmds::dispatch(self)
    }

    // The `-C` directory; relative paths on the command line resolve
    // against it.
    pub fn work_dir(&self) -> &Path {
        Path::new(self.arg_matches.value_of("dir").unwrap_or("."))
    }

    pub fn locator(&self) -> RepositoryLocator {
        let config = Config::from_env();
        let config = match self.arg_matches.value_of_os("git") {
            Some(git) => config.with_git_bin(git),
            None => config,
        };
        RepositoryLocator::new(config)
    }

    pub fn repo(&self) -> Result<Repository> {
        Ok(self.locator().open(self.work_dir())?)
    }

    #[cfg(test)]
    pub fn run_with_args<I, T>(args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut args: Vec<OsString> = args.into_iter().map(|x| x.into()).collect();
        args.insert(0, OsString::from("gitwrap"));

        let mut stdout = Vec::new();

        App {
            arg_matches: clap_app().get_matches_from_safe(args)?,
            stdout: &mut stdout,
        }
        .run()?;

        Ok(stdout)
    }
}

impl<'a> Write for App<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.stdout.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()
    }
}

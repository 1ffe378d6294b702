#![deny(warnings)]

use std::{
    error::Error,
    io::{self, Write},
};

mod app;
pub(crate) use app::App;

mod cmds;

pub(crate) type Result<T> = std::result::Result<T, Box<dyn Error>>;

#[allow(unused_must_use)]
fn main() {
    // Keep this thin. Everything below `App` is reachable from the tests.

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let arg_matches = app::clap_app().get_matches();
    app::init_tracing(arg_matches.occurrences_of("verbose"));

    let mut app = App {
        arg_matches,
        stdout: &mut stdout,
    };

    let r = app.run();

    // A failed flush has nowhere useful to be reported.
    app.flush();

    std::process::exit(match r {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            1
        }
    });
}

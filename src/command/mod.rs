//! Building git command lines.
//!
//! Every command this crate runs is assembled with [`Args`]. Flags must be
//! `&'static str`, so only literals written into this crate can become
//! options. Anything supplied at runtime always ends up as exactly one argv
//! element, in one of three places:
//!
//! * [`Args::value`], [`Args::option`], [`Args::attached`]: the argument of
//!   an option, e.g. the message after `-m`.
//! * [`Args::operand`]: a branch, revision, remote, URL, or pattern. The
//!   first operand is preceded by `--end-of-options`, so git never reads an
//!   operand as an option, even one starting with `-`.
//! * [`Args::path`]: a path, after `--`.
//!
//! Options always come before operands and operands before paths, whatever
//! order the builder methods are called in. The process is spawned directly,
//! without a shell, so quotes, `$`, backticks, and `;` inside a value are
//! plain characters.
//!
//! [`quote`] is the one escaping routine. It renders an argument the way a
//! POSIX shell would need to see it, and it is what `Args` uses for its
//! `Display` output in logs and error messages.

use std::{
    ffi::{OsStr, OsString},
    fmt,
};

mod quote;
pub use quote::quote;

/// Ends git's option parsing (git 2.24 and later).
pub const END_OF_OPTIONS: &str = "--end-of-options";

/// Separates revisions from paths.
pub const PATH_SEPARATOR: &str = "--";

/// An ordered argument list for one external command, not including the
/// program itself.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Args {
    args: Vec<OsString>,

    // Index of `--end-of-options`, once there is an operand.
    operands_at: Option<usize>,

    // Index of `--`, once there is a path.
    paths_at: Option<usize>,
}

impl Args {
    /// Start a git command line with `subcommand` (e.g. `"status"`).
    pub fn new(subcommand: &'static str) -> Self {
        Args::empty().flag(subcommand)
    }

    /// An argument list with nothing in it yet.
    pub fn empty() -> Self {
        Args::default()
    }

    /// Append a fixed flag or keyword.
    pub fn flag(self, flag: &'static str) -> Self {
        self.push_option(OsString::from(flag))
    }

    /// Append `flag` only when `enabled`.
    pub fn flag_if(self, enabled: bool, flag: &'static str) -> Self {
        if enabled {
            self.flag(flag)
        } else {
            self
        }
    }

    /// Append a caller-supplied value as a single argument among the
    /// options, typically right after the flag that takes it. Programs other
    /// than git also receive their arguments this way.
    pub fn value<S: AsRef<OsStr>>(self, value: S) -> Self {
        self.push_option(value.as_ref().to_os_string())
    }

    /// Append `value` when present.
    pub fn value_opt<S: AsRef<OsStr>>(self, value: Option<S>) -> Self {
        match value {
            Some(value) => self.value(value),
            None => self,
        }
    }

    /// Append each item of `values` as its own argument among the options.
    pub fn values<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        values.into_iter().fold(self, |args, v| args.value(v))
    }

    /// Append `name=value` as a single argument (e.g. `--author=...`).
    pub fn option<S: AsRef<OsStr>>(self, name: &'static str, value: S) -> Self {
        let mut arg = OsString::from(name);
        arg.push("=");
        arg.push(value);
        self.push_option(arg)
    }

    /// Append `name` immediately followed by `value` as a single argument
    /// (e.g. `-S<string>`).
    pub fn attached<S: AsRef<OsStr>>(self, name: &'static str, value: S) -> Self {
        let mut arg = OsString::from(name);
        arg.push(value);
        self.push_option(arg)
    }

    /// Append a branch, revision, remote, or other operand. It is never
    /// taken as an option.
    pub fn operand<S: AsRef<OsStr>>(mut self, operand: S) -> Self {
        if self.operands_at.is_none() {
            let at = self.paths_at.unwrap_or_else(|| self.args.len());
            self.insert(at, OsString::from(END_OF_OPTIONS));
            self.operands_at = Some(at);
        }

        let at = self.paths_at.unwrap_or_else(|| self.args.len());
        self.insert(at, operand.as_ref().to_os_string());
        self
    }

    /// Append `operand` when present.
    pub fn operand_opt<S: AsRef<OsStr>>(self, operand: Option<S>) -> Self {
        match operand {
            Some(operand) => self.operand(operand),
            None => self,
        }
    }

    /// Append each item of `operands` as its own operand.
    pub fn operands<I, S>(self, operands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        operands.into_iter().fold(self, |args, o| args.operand(o))
    }

    /// Append a path after `--`.
    pub fn path<S: AsRef<OsStr>>(mut self, path: S) -> Self {
        if self.paths_at.is_none() {
            self.paths_at = Some(self.args.len());
            self.args.push(OsString::from(PATH_SEPARATOR));
        }

        self.args.push(path.as_ref().to_os_string());
        self
    }

    /// Append each item of `paths` after `--`.
    pub fn paths<I, S>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        paths.into_iter().fold(self, |args, p| args.path(p))
    }

    /// Return `true` if at least one path has been added.
    pub fn has_paths(&self) -> bool {
        self.paths_at.is_some()
    }

    /// Return the arguments in order.
    pub fn as_slice(&self) -> &[OsString] {
        &self.args
    }

    /// Return the number of arguments.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Return `true` if no arguments have been added.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    fn push_option(mut self, arg: OsString) -> Self {
        let at = self
            .operands_at
            .or(self.paths_at)
            .unwrap_or_else(|| self.args.len());
        self.insert(at, arg);
        self
    }

    fn insert(&mut self, at: usize, arg: OsString) {
        self.args.insert(at, arg);

        for index in [&mut self.operands_at, &mut self.paths_at].iter_mut() {
            if let Some(i) = index {
                if *i >= at {
                    *i += 1;
                }
            }
        }
    }
}

impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&quote(arg))?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Args {
    type Item = &'a OsString;
    type IntoIter = std::slice::Iter<'a, OsString>;

    fn into_iter(self) -> Self::IntoIter {
        self.args.iter()
    }
}

/// Render `program` followed by `args` as one shell-safe line.
pub(crate) fn render<S: AsRef<OsStr> + ?Sized>(program: &S, args: &Args) -> String {
    if args.is_empty() {
        quote(program).into_owned()
    } else {
        format!("{} {}", quote(program), args)
    }
}

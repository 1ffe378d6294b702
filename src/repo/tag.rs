use super::{lines, Repository, Result};
use crate::command::Args;

impl Repository {
    /// Create an annotated tag at `commit` (default `HEAD`). The message
    /// defaults to the tag name.
    pub fn add_tag(&self, tag: &str, message: Option<&str>, commit: Option<&str>) -> Result<String> {
        let message = message.unwrap_or(tag);

        self.git(
            Args::new("tag")
                .flag("-a")
                .operand(tag)
                .flag("-m")
                .value(message)
                .operand_opt(commit.filter(|c| !c.is_empty())),
        )
    }

    /// Return the tag names, optionally limited to those matching the shell
    /// wildcard `pattern`.
    pub fn list_tags(&self, pattern: Option<&str>) -> Result<Vec<String>> {
        let output = self.git(Args::new("tag").flag("-l").operand_opt(pattern))?;
        Ok(lines(&output))
    }
}

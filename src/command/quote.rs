use std::{borrow::Cow, ffi::OsStr};

/// Render `arg` so a POSIX shell reads it back as exactly one word.
///
/// Words made only of characters no shell treats specially are returned
/// unchanged. Anything else is wrapped in single quotes, with each embedded
/// `'` written as `'\''`. Non-UTF-8 bytes are replaced lossily, so the result
/// is meant for display and logs. Commands are never executed through a
/// shell.
pub fn quote<S: AsRef<OsStr> + ?Sized>(arg: &S) -> Cow<'_, str> {
    let arg = arg.as_ref().to_string_lossy();

    if !arg.is_empty() && arg.bytes().all(is_plain) {
        return arg;
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('\'');
    for c in arg.chars() {
        if c == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(c);
        }
    }
    quoted.push('\'');

    Cow::Owned(quoted)
}

fn is_plain(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"-_./:=@%+,".contains(&b)
}

#[cfg(test)]
mod tests {
    use super::quote;

    #[test]
    fn plain_words_pass_through() {
        assert_eq!(quote("status"), "status");
        assert_eq!(quote("--pretty=format:%H"), "--pretty=format:%H");
        assert_eq!(quote("refs/heads/main"), "refs/heads/main");
    }

    #[test]
    fn empty_word() {
        assert_eq!(quote(""), "''");
    }

    #[test]
    fn metacharacters() {
        assert_eq!(quote("a b"), "'a b'");
        assert_eq!(quote("$HOME"), "'$HOME'");
        assert_eq!(quote("`id`; rm -rf /"), "'`id`; rm -rf /'");
        assert_eq!(quote("say \"hi\""), "'say \"hi\"'");
    }

    #[test]
    fn single_quotes() {
        assert_eq!(quote("it's"), "'it'\\''s'");
        assert_eq!(quote("'"), "''\\'''");
    }
}

//! POSIX shell quoting
//!
//! Every string is wrapped in single quotes; an embedded `'` closes the
//! quoted run, emits an escaped quote and reopens it (`'\''`). The result is
//! read back by any POSIX shell as exactly one word equal to the input.

/// Program used to interpret built command lines.
pub const SHELL: &str = "/bin/sh";

/// Quote a string so a POSIX shell reads it back as a single literal word.
pub fn shell_quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('\'');

    for c in s.chars() {
        if c == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(c);
        }
    }

    quoted.push('\'');
    quoted
}

/// Wrap a command so it is always run through `/bin/sh -c`.
///
/// The command itself is quoted as one argument, so it is never taken as a
/// program name directly.
pub fn shell_command(command: &str) -> String {
    format!("{} -c {}", SHELL, shell_quote(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reparse(quoted: &str) -> Vec<String> {
        shlex::split(quoted).expect("quoted output must be valid shell syntax")
    }

    #[test]
    fn test_quote_plain() {
        assert_eq!(shell_quote("/home/user"), "'/home/user'");
    }

    #[test]
    fn test_quote_empty() {
        assert_eq!(shell_quote(""), "''");
        assert_eq!(reparse(&shell_quote("")), vec![String::new()]);
    }

    #[test]
    fn test_quote_embedded_single_quote() {
        assert_eq!(shell_quote("it's"), "'it'\\''s'");
    }

    #[test]
    fn test_quote_reads_back_as_one_word() {
        let nasty = [
            "/home/user/My Docs",
            "/tmp/it's here",
            "/tmp/$(rm -rf ~)",
            "/tmp/`id`; echo pwned",
            "/tmp/a|b&c>d<e",
            "/tmp/\"double\" and 'single'",
            "/tmp/back\\slash",
            "/tmp/new\nline",
            "''''",
            "/tmp/*?[glob]",
        ];

        for original in nasty {
            assert_eq!(reparse(&shell_quote(original)), vec![original.to_string()]);
        }
    }

    #[test]
    fn test_shell_command_wraps_whole_command() {
        let cmd = shell_command("atom '/home/user/My Docs'");
        assert_eq!(cmd, "/bin/sh -c 'atom '\\''/home/user/My Docs'\\'''");

        let words = reparse(&cmd);
        assert_eq!(words, vec!["/bin/sh", "-c", "atom '/home/user/My Docs'"]);
        assert_eq!(reparse(&words[2]), vec!["atom", "/home/user/My Docs"]);
    }
}

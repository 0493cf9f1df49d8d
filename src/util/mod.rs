#![allow(clippy::module_name_repetitions)]
//! Small utilities: subprocess execution and argv rendering for diagnostics.

pub mod exec;

use std::ffi::OsString;

pub fn shell_join(args: &[String]) -> String {
    args.iter()
        .map(|a| shell_escape(a))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn shell_escape(s: &str) -> String {
    if s.is_empty() {
        "''".to_string()
    } else if s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_=./:@".contains(c))
    {
        s.to_string()
    } else {
        let escaped = s.replace('\'', "'\"'\"'");
        format!("'{}'", escaped)
    }
}

/// Render an OsString argv as a shell-like preview line (lossy; diagnostics only).
pub fn argv_preview(program: &str, args: &[OsString]) -> String {
    let mut words = vec![program.to_string()];
    words.extend(args.iter().map(|a| a.to_string_lossy().into_owned()));
    shell_join(&words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_plain_and_quoted() {
        assert_eq!(shell_escape("reference=quay.io/app"), "reference=quay.io/app");
        assert_eq!(shell_escape("{{.Tag}}"), "'{{.Tag}}'");
        assert_eq!(shell_escape(""), "''");
        assert_eq!(shell_escape("it's"), "'it'\"'\"'s'");
    }

    #[test]
    fn preview_joins_program_and_args() {
        let args: Vec<OsString> = ["push", "quay.io/app:1.0"]
            .iter()
            .map(OsString::from)
            .collect();
        assert_eq!(argv_preview("podman", &args), "podman push quay.io/app:1.0");
    }
}

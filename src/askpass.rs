//! Credentials handed to `git fetch` through `GIT_ASKPASS`.
//!
//! Git runs the askpass program once per prompt. The program is this binary,
//! started with [`ASKPASS_ENV`] set; it prints the answer and exits.

use std::{fmt, path::Path};

use tokio::process::Command;

/// Set when the binary runs as git's askpass helper.
pub const ASKPASS_ENV: &str = "REPO_TUI_ASKPASS";
pub const USERNAME_ENV: &str = "REPO_TUI_USERNAME";
pub const PASSWORD_ENV: &str = "REPO_TUI_PASSWORD";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// True when git started this process to answer a prompt.
pub fn is_askpass_invocation() -> bool {
    std::env::var_os(ASKPASS_ENV).is_some()
}

/// Answer to one git prompt: the username when asked for it, the password
/// otherwise.
pub fn respond<'a>(prompt: &str, username: &'a str, password: &'a str) -> &'a str {
    if prompt.contains("Username") {
        username
    } else {
        password
    }
}

/// [`respond`] with the credentials passed in the environment.
pub fn answer_from_env(prompt: &str) -> String {
    let username = std::env::var(USERNAME_ENV).unwrap_or_default();
    let password = std::env::var(PASSWORD_ENV).unwrap_or_default();
    respond(prompt, &username, &password).to_string()
}

/// Make `cmd` ask `exe` for credentials instead of the terminal.
pub fn configure(cmd: &mut Command, exe: &Path, credentials: &Credentials) {
    cmd.env("GIT_ASKPASS", exe)
        .env(ASKPASS_ENV, "1")
        .env(USERNAME_ENV, &credentials.username)
        .env(PASSWORD_ENV, &credentials.password);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn prompts_are_answered_by_kind() {
        assert_eq!(
            respond("Username for 'https://example.com': ", "ann", "pw"),
            "ann"
        );
        assert_eq!(
            respond("Password for 'https://ann@example.com': ", "ann", "pw"),
            "pw"
        );
        assert_eq!(respond("Enter passphrase for key: ", "ann", "pw"), "pw");
    }

    #[test]
    fn configure_sets_the_helper_environment() {
        let mut cmd = Command::new("git");
        let credentials = Credentials {
            username: "ann".into(),
            password: "pw".into(),
        };
        configure(&mut cmd, Path::new("/usr/bin/repo_tui"), &credentials);
        let envs: Vec<_> = cmd.as_std().get_envs().collect();
        assert!(envs.contains(&(OsStr::new("GIT_ASKPASS"), Some(OsStr::new("/usr/bin/repo_tui")))));
        assert!(envs.contains(&(OsStr::new(ASKPASS_ENV), Some(OsStr::new("1")))));
        assert!(envs.contains(&(OsStr::new(USERNAME_ENV), Some(OsStr::new("ann")))));
    }

    #[test]
    fn debug_output_hides_the_password() {
        let credentials = Credentials {
            username: "ann".into(),
            password: "hunter2".into(),
        };
        let shown = format!("{credentials:?}");
        assert!(shown.contains("ann"));
        assert!(!shown.contains("hunter2"));
    }
}

use std::ffi::{OsStr, OsString};
use std::io::Write;

use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result};
use crate::parse::parse_key_listing;
use crate::types::KeyInfo;

/// Interface to the `gpg` executable.
///
/// Each operation spawns one `gpg` process, waits for it to exit, and
/// returns either its standard output or a typed error carrying the exit
/// status and standard error text.
///
/// # Example
///
/// ```no_run
/// use gpg_bridge::Gpg;
///
/// # async fn example() -> gpg_bridge::Result<()> {
/// let gpg = Gpg::new();
/// for key in gpg.list_keys().await? {
///     println!("{}: {}", key.trust_level(), key.name());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Gpg {
    program: String,
    homedir: Option<String>,
}

impl Default for Gpg {
    fn default() -> Self {
        Self::new()
    }
}

impl Gpg {
    /// Creates a handle that invokes `gpg` from the search path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: "gpg".to_string(),
            homedir: None,
        }
    }

    /// Creates a handle that invokes the given executable instead of `gpg`.
    ///
    /// Useful for alternative installations and for substituting a stub
    /// binary in tests.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            homedir: None,
        }
    }

    /// Targets a custom GPG home directory (passed as `--homedir`) instead
    /// of the user's default keyring.
    #[must_use]
    pub fn homedir(mut self, dir: impl Into<String>) -> Self {
        self.homedir = Some(dir.into());
        self
    }

    /// Imports an ASCII-armored public key into the keyring.
    ///
    /// Returns gpg's standard output, which is empty on most installations
    /// (the import summary goes to standard error).
    pub async fn add_key(&self, key: &str) -> Result<String> {
        let key_file = stage_input("publicKey", key)?;
        self.run([OsStr::new("--import"), key_file.path().as_os_str()])
            .await
    }

    /// Decrypts an ASCII-armored message with whatever secret key the
    /// keyring holds for it.
    pub async fn decrypt(&self, input: &str) -> Result<String> {
        let cipher_file = stage_input("encrypted", input)?;
        self.run([OsStr::new("-d"), cipher_file.path().as_os_str()])
            .await
    }

    /// Encrypts `input` from `sender` to `recipient`, returning the
    /// ASCII-armored ciphertext.
    ///
    /// The sender is named as a second recipient so the message stays
    /// readable on their own keyring. Recipient keys are trusted
    /// unconditionally (`--trust-model always`).
    pub async fn encrypt(
        &self,
        sender: &KeyInfo,
        recipient: &KeyInfo,
        input: &str,
    ) -> Result<String> {
        let plain_file = stage_input("decrypted", input)?;
        self.run([
            OsStr::new("-e"),
            OsStr::new("-u"),
            OsStr::new(sender.name()),
            OsStr::new("-r"),
            OsStr::new(recipient.name()),
            OsStr::new("-r"),
            OsStr::new(sender.name()),
            OsStr::new("--trust-model"),
            OsStr::new("always"),
            OsStr::new("--armor"),
            OsStr::new("--output"),
            OsStr::new("-"),
            plain_file.path().as_os_str(),
        ])
        .await
    }

    /// Clear-signs `input` with the default secret key.
    pub async fn sign(&self, input: &str) -> Result<String> {
        let message_file = stage_input("signed", input)?;
        self.run([
            OsStr::new("--clearsign"),
            OsStr::new("-o"),
            OsStr::new("-"),
            message_file.path().as_os_str(),
        ])
        .await
    }

    /// Lists the public keys in the keyring, in the order gpg emits them.
    pub async fn list_keys(&self) -> Result<Vec<KeyInfo>> {
        let output = self.run([OsStr::new("--list-public-keys")]).await?;
        parse_key_listing(&output)
    }

    async fn run<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        debug!(program = %self.program, args = %render_args(&args), "invoking gpg");

        let mut cmd = Command::new(&self.program);
        cmd.env("LC_ALL", "C");
        if let Some(dir) = &self.homedir {
            cmd.arg(format!("--homedir={dir}"));
        }

        let output = cmd.args(&args).output().await?;

        if !output.status.success() {
            return Err(Error::Gpg {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(join_lines(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Writes caller-supplied text to a uniquely named temp file so its path
/// can be handed to gpg. The file is removed when the handle drops, on
/// every exit path.
fn stage_input(prefix: &str, contents: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(".txt")
        .tempfile()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

fn join_lines(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join("\n")
}

fn render_args(args: &[OsString]) -> String {
    args.iter()
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_lines_drops_trailing_newline() {
        assert_eq!(join_lines("a\nb\n"), "a\nb");
        assert_eq!(join_lines("a\nb"), "a\nb");
    }

    #[test]
    fn test_join_lines_normalizes_crlf() {
        assert_eq!(join_lines("a\r\nb\r\n"), "a\nb");
    }

    #[test]
    fn test_join_lines_empty() {
        assert_eq!(join_lines(""), "");
        assert_eq!(join_lines("\n"), "");
    }

    #[test]
    fn test_stage_input_removes_file_on_drop() {
        let path = {
            let file = stage_input("stage", "contents").unwrap();
            let path = file.path().to_path_buf();
            assert!(path.exists());
            assert_eq!(std::fs::read_to_string(&path).unwrap(), "contents");
            path
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_render_args() {
        let args = vec![OsString::from("-d"), OsString::from("/tmp/in.txt")];
        assert_eq!(render_args(&args), "-d /tmp/in.txt");
    }
}

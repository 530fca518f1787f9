use std::io;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("command execution failed: {0}")]
    Command(#[from] io::Error),

    #[error("gpg exited with status {status}: {stderr}")]
    Gpg { status: i32, stderr: String },

    #[error("key listing ends with a partial entry ({trailing} trailing lines, expected groups of 4)")]
    TruncatedListing { trailing: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

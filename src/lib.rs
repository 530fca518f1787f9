//! Typed Rust interface to the `gpg` command line.
//!
//! This crate shells out to GnuPG for key import, encryption, decryption,
//! clear-signing, and key listing, and parses the listing output into
//! structured [`KeyInfo`] records. No cryptography happens in-process;
//! everything is delegated to the external tool and its keyring.
//!
//! # Example
//!
//! ```no_run
//! use gpg_bridge::Gpg;
//!
//! #[tokio::main]
//! async fn main() -> gpg_bridge::Result<()> {
//!     let gpg = Gpg::new();
//!
//!     let keys = gpg.list_keys().await?;
//!     for key in &keys {
//!         println!("[{}] {} <{}>", key.trust_level(), key.name(), key.email());
//!     }
//!
//!     if let [sender, recipient, ..] = keys.as_slice() {
//!         let armored = gpg.encrypt(sender, recipient, "hello").await?;
//!         println!("{armored}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Requirements
//!
//! - A `gpg` executable on the search path (or named via
//!   [`Gpg::with_program`])
//! - A keyring readable by the current user; decrypt and sign additionally
//!   need a usable secret key

mod error;
mod gpg;
mod parse;
mod types;

pub use error::{Error, Result};
pub use gpg::Gpg;
pub use types::KeyInfo;

//! Example: List all public keys in the user's GPG keyring
//!
//! Run with: cargo run --example list_keys

use gpg_bridge::{Gpg, KeyInfo};

#[tokio::main]
async fn main() -> gpg_bridge::Result<()> {
    let gpg = Gpg::new();
    let keys = gpg.list_keys().await?;

    println!("Found {} keys in keyring\n", keys.len());

    for key in &keys {
        println!("{}", format_key_output(key));
    }

    Ok(())
}

fn format_key_output(key: &KeyInfo) -> String {
    let marker = if key.is_valid() { "" } else { " [Invalid]" };
    let email = if key.email().is_empty() {
        String::new()
    } else {
        format!(" <{}>", key.email())
    };

    format!(
        "[{}] {}{}{}\n    {}",
        key.trust_level(),
        key.name(),
        email,
        marker,
        key.pub_hash()
    )
}

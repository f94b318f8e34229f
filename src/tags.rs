//! Container tags partition memories in the remote service.
//!
//! Raw identities (user names, project paths) are hashed so they never leave
//! the machine verbatim.

use sha2::{Digest, Sha256};

const HASH_HEX_CHARS: usize = 16;

fn short_hash(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    let mut encoded = hex::encode(digest);
    encoded.truncate(HASH_HEX_CHARS);
    encoded
}

/// `<prefix>_user_<hash>` for a user identity such as an email or login.
pub fn user_container_tag(prefix: &str, identity: &str) -> String {
    format!("{prefix}_user_{}", short_hash(identity.trim()))
}

/// `<prefix>_project_<hash>` for a project directory.
pub fn project_container_tag(prefix: &str, directory: &str) -> String {
    let normalized = directory.trim().trim_end_matches(['/', '\\']);
    format!("{prefix}_project_{}", short_hash(normalized))
}

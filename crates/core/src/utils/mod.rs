//! Standalone helpers: random strings, digests and hex, local hostname.
//! None of them depend on the properties store.

pub mod hashing;
pub mod host;
pub mod random;

pub use hashing::{bytes_to_hex, digest_hex, sha_hash, HashAlgorithm};
pub use host::{hostname_or_unknown, system_hostname, HostnameResolver, UNKNOWN_HOSTNAME};
pub use random::{
    generate_random_string, generate_random_string_with, RandomStringSpec, DEFAULT_ALPHABET,
};

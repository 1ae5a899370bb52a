pub mod config;
pub mod errors;
pub mod mail;
pub mod utils;

pub use config::{keys, PropertiesLoader, PropertyMap, ProjectProperties};
pub use errors::*;
pub use mail::{DeliveryStatus, EmailMessage, MailDispatcher, MailSession, MailTransport};
pub use utils::{
    bytes_to_hex, digest_hex, generate_random_string, sha_hash, HashAlgorithm, RandomStringSpec,
};

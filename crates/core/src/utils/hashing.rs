use std::fmt;
use std::str::FromStr;

use sha1::{Digest, Sha1};
use sha2::Sha256;
use tracing::error;

use crate::ProjectError;

/// [`digest_hex`] 支持的摘要算法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
}

impl HashAlgorithm {
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
            HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = ProjectError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_uppercase().as_str() {
            "SHA1" | "SHA-1" => Ok(HashAlgorithm::Sha1),
            "SHA256" | "SHA-256" => Ok(HashAlgorithm::Sha256),
            _ => Err(ProjectError::config_error(format!("No such algorithm {name}!"))),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HashAlgorithm::Sha1 => "SHA1",
            HashAlgorithm::Sha256 => "SHA256",
        };
        write!(f, "{name}")
    }
}

/// `input` UTF-8 字节的 SHA-1，大写十六进制
pub fn sha_hash(input: &str) -> String {
    digest_hex("SHA1", input)
}

/// 按算法名计算 `input` 的摘要，大写十六进制
///
/// 未知算法以 fatal 级别记录日志，并返回空字符串。
pub fn digest_hex(algorithm: &str, input: &str) -> String {
    match algorithm.parse::<HashAlgorithm>() {
        Ok(algorithm) => {
            let digest = algorithm.digest(input.as_bytes());
            bytes_to_hex(Some(digest.as_slice())).unwrap_or_default()
        }
        Err(e) => {
            error!(fatal = true, algorithm, error = %e, "Digest algorithm unavailable");
            String::new()
        }
    }
}

/// 每个字节两个大写十六进制字符，保持输入顺序；`None` 仍为 `None`
pub fn bytes_to_hex(bytes: Option<&[u8]>) -> Option<String> {
    bytes.map(hex::encode_upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha1_known_vector() {
        assert_eq!(sha_hash("hello"), "AAF4C61DDCC5E8A2DABEDE0F3B482CD9AEA9434D");
        assert_eq!(sha_hash(""), "DA39A3EE5E6B4B0D3255BFEF95601890AFD80709");
    }

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            digest_hex("sha-256", "hello"),
            "2CF24DBA5FB0A30E26E83B2AC5B9E29E1B161E5C1FA7425E73043362938B9824"
        );
    }

    #[test]
    fn test_unknown_algorithm_is_fail_soft() {
        assert_eq!(digest_hex("MD4", "hello"), "");
        assert!("whirlpool".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn test_bytes_to_hex() {
        assert_eq!(bytes_to_hex(None), None);
        assert_eq!(bytes_to_hex(Some(&[])), Some(String::new()));
        assert_eq!(
            bytes_to_hex(Some(&[0x00, 0x0f, 0xa5, 0xff])),
            Some("000FA5FF".to_string())
        );
    }

    #[test]
    fn test_algorithm_display_round_trips() {
        for algorithm in [HashAlgorithm::Sha1, HashAlgorithm::Sha256] {
            assert_eq!(algorithm.to_string().parse::<HashAlgorithm>().unwrap(), algorithm);
        }
    }
}

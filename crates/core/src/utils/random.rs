use rand::Rng;
use tracing::error;

/// 52 个 ASCII 字母和 10 个数字
pub const DEFAULT_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// [`generate_random_string`] 的参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomStringSpec {
    pub alphabet: Option<String>,
    pub min_chars: i32,
    pub max_chars: i32,
}

impl RandomStringSpec {
    pub fn new(min_chars: i32, max_chars: i32) -> Self {
        Self {
            alphabet: None,
            min_chars,
            max_chars,
        }
    }

    pub fn with_alphabet<S: Into<String>>(mut self, alphabet: S) -> Self {
        self.alphabet = Some(alphabet.into());
        self
    }

    pub fn generate(&self) -> String {
        generate_random_string(self.alphabet.as_deref(), self.min_chars, self.max_chars)
    }
}

/// 用于盐值或默认密码的随机字符串，不具备密码学安全性
///
/// 长度在 `[min_chars, max_chars]` 内均匀分布，每个字符从 `alphabet`
/// 中有放回地均匀抽取（`None` 或空时使用 [`DEFAULT_ALPHABET`]）。
/// 参数非法时记录错误日志，长度固定为 1。
pub fn generate_random_string(alphabet: Option<&str>, min_chars: i32, max_chars: i32) -> String {
    generate_random_string_with(&mut rand::rng(), alphabet, min_chars, max_chars)
}

/// 使用调用方提供的随机数生成器的 [`generate_random_string`]
pub fn generate_random_string_with<R: Rng + ?Sized>(
    rng: &mut R,
    alphabet: Option<&str>,
    min_chars: i32,
    max_chars: i32,
) -> String {
    let (min, max) = match (usize::try_from(min_chars), usize::try_from(max_chars)) {
        (Ok(min), Ok(max)) if min > 0 && min <= max => (min, max),
        _ => {
            error!(min_chars, max_chars, "Invalid parameters to generate_random_string!");
            (1, 1)
        }
    };

    let alphabet: Vec<char> = match alphabet {
        Some(chars) if !chars.is_empty() => chars.chars().collect(),
        _ => DEFAULT_ALPHABET.chars().collect(),
    };

    let length = rng.random_range(min..=max);
    (0..length)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())])
        .collect()
}

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::{ProjectError, ProjectResult};

use super::core::PropertyMap;
use super::validation::PropertiesValidator;

/// 未配置路径时查找的文件名
pub const DEFAULT_PROPERTIES_FILE: &str = "project.properties";

/// 覆盖属性文件路径的环境变量
pub const PROPERTIES_PATH_ENV: &str = "BASEPROJECT_PROPERTIES";

/// 读取属性文件并依次执行已注册的验证器
pub struct PropertiesLoader {
    validators: Vec<Box<dyn PropertiesValidator>>,
}

impl PropertiesLoader {
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    pub fn with_validator(mut self, validator: Box<dyn PropertiesValidator>) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn validator_names(&self) -> Vec<&str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// 优先 `$BASEPROJECT_PROPERTIES`，否则 `project.properties`
    pub fn default_path() -> PathBuf {
        std::env::var_os(PROPERTIES_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROPERTIES_FILE))
    }

    pub fn load_from_file(&self, path: &Path) -> ProjectResult<PropertyMap> {
        let origin = path.display().to_string();
        let bytes = fs::read(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                error!(path = %origin, "Cannot find properties resource");
                ProjectError::ResourceNotFound { path: origin.clone() }
            } else {
                error!(path = %origin, error = %source, "Cannot open properties resource");
                ProjectError::Io {
                    path: origin.clone(),
                    source,
                }
            }
        })?;

        let content = decode_properties(bytes, &origin);
        self.load_from_str(&content, &origin)
    }

    /// 解析并验证 `content`；`origin` 只用于错误信息
    pub fn load_from_str(&self, content: &str, origin: &str) -> ProjectResult<PropertyMap> {
        let properties = parse_properties(content)?;

        for validator in &self.validators {
            validator.validate(&properties).map_err(|e| {
                error!(
                    path = %origin,
                    validator = validator.name(),
                    error = %e,
                    "Properties resource is not valid"
                );
                ProjectError::invalid_properties(origin, e.to_string())
            })?;
        }

        debug!(path = %origin, keys = properties.len(), "Properties loaded");
        Ok(properties)
    }
}

impl Default for PropertiesLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// 解析 `java.util.Properties` 格式的文本
///
/// 支持 `#`/`!` 注释、`=`/`:`/空白分隔符、行尾反斜杠续行，
/// 以及包括 `\uXXXX` 在内的常见转义。重复的键以后出现的为准。
pub fn parse_properties(content: &str) -> ProjectResult<PropertyMap> {
    let mut properties = PropertyMap::new();
    let mut lines = content.lines().enumerate();

    while let Some((index, raw)) = lines.next() {
        let line = raw.trim_start_matches(WHITESPACE);
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let mut logical = line.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(WHITESPACE)),
                None => break,
            }
        }

        let line_number = index + 1;
        let (key, value) = split_entry(&logical);
        properties.insert(unescape(key, line_number)?, unescape(value, line_number)?);
    }

    Ok(properties)
}

/// UTF-8 当内容合法时直接使用，否则按 ISO-8859-1 逐字节解码
fn decode_properties(bytes: Vec<u8>, origin: &str) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            debug!(path = %origin, "Properties resource is not UTF-8, decoding as ISO-8859-1");
            e.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

const WHITESPACE: [char; 3] = [' ', '\t', '\u{c}'];

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    let mut separator = None;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\u{c}' => {
                key_end = i;
                separator = Some(c);
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = match separator {
        Some(c) => &line[key_end + c.len_utf8()..],
        None => "",
    };
    if matches!(separator, Some(' ' | '\t' | '\u{c}')) {
        rest = rest.trim_start_matches(WHITESPACE);
        if let Some(stripped) = rest.strip_prefix(['=', ':']) {
            rest = stripped;
        }
    }

    (key, rest.trim_start_matches(WHITESPACE))
}

fn unescape(raw: &str, line: usize) -> ProjectResult<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let code: String = chars.by_ref().take(4).collect();
                let decoded = if code.len() == 4 {
                    u32::from_str_radix(&code, 16).ok().and_then(char::from_u32)
                } else {
                    None
                };
                match decoded {
                    Some(ch) => out.push(ch),
                    None => {
                        return Err(ProjectError::Parse {
                            line,
                            message: format!("malformed \\uXXXX escape: \\u{code}"),
                        })
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

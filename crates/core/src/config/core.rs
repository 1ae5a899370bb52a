//! 属性表核心抽象
//!
//! `PropertyMap` 是从属性文件读取出来的不可变键值表。
//! 所有类型化视图（字符串、整数、布尔）都在读取时计算，不做缓存。

use std::collections::HashMap;

use crate::{ProjectError, ProjectResult};

/// 从属性文件读取的不可变键值表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    values: HashMap<String, String>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: String, value: String) {
        self.values.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// `key` 的原始值（若存在）
    pub fn get_optional(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// `key` 的原始值
    ///
    /// # Errors
    /// 键不存在时返回 `ProjectError::KeyNotFound`
    pub fn get_string(&self, key: &str) -> ProjectResult<&str> {
        self.get_optional(key).ok_or_else(|| ProjectError::key_not_found(key))
    }

    /// 按十进制整数解析 `key` 的值
    ///
    /// # Errors
    /// 不存在时返回 `KeyNotFound`，不是数字时返回 `InvalidInteger`
    pub fn get_int(&self, key: &str) -> ProjectResult<i32> {
        let value = self.get_string(key)?;
        value
            .parse::<i32>()
            .map_err(|source| ProjectError::InvalidInteger {
                key: key.to_string(),
                value: value.to_string(),
                source,
            })
    }

    /// 值忽略 ASCII 大小写等于 `"true"` 时为 `true`，其余值均为 `false`
    ///
    /// # Errors
    /// 不存在时返回 `KeyNotFound`
    pub fn get_boolean(&self, key: &str) -> ProjectResult<bool> {
        Ok(self.get_string(key)?.eq_ignore_ascii_case("true"))
    }
}

impl<K, V> FromIterator<(K, V)> for PropertyMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PropertyMap {
        PropertyMap::from_iter([
            ("pool_size", "15"),
            ("negative", "-7"),
            ("word", "abc"),
            ("flag_lower", "true"),
            ("flag_upper", "TRUE"),
            ("flag_false", "false"),
            ("flag_other", "yes"),
            ("empty", ""),
        ])
    }

    #[test]
    fn test_get_string() {
        let map = sample();
        assert_eq!(map.get_string("word").unwrap(), "abc");
        assert_eq!(map.get_string("empty").unwrap(), "");
        assert!(matches!(
            map.get_string("missing"),
            Err(ProjectError::KeyNotFound { key }) if key == "missing"
        ));
    }

    #[test]
    fn test_get_int() {
        let map = sample();
        assert_eq!(map.get_int("pool_size").unwrap(), 15);
        assert_eq!(map.get_int("negative").unwrap(), -7);

        let err = map.get_int("word").unwrap_err();
        assert!(matches!(err, ProjectError::InvalidInteger { ref value, .. } if value == "abc"));

        assert!(matches!(
            map.get_int("missing"),
            Err(ProjectError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn test_get_boolean() {
        let map = sample();
        assert!(map.get_boolean("flag_lower").unwrap());
        assert!(map.get_boolean("flag_upper").unwrap());
        assert!(!map.get_boolean("flag_false").unwrap());
        assert!(!map.get_boolean("flag_other").unwrap());
        assert!(!map.get_boolean("empty").unwrap());
        assert!(matches!(
            map.get_boolean("missing"),
            Err(ProjectError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn test_get_optional() {
        let map = sample();
        assert_eq!(map.get_optional("word"), Some("abc"));
        assert_eq!(map.get_optional("missing"), None);
        assert!(map.contains_key("empty"));
        assert_eq!(map.len(), 8);
    }
}

use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::{ProjectError, ProjectResult};

use super::core::PropertyMap;
use super::loader::PropertiesLoader;
use super::validation::ProjectPropertiesValidator;

/// [`ProjectProperties`] 识别的键
pub mod keys {
    pub const DATABASE_URL_SCHEME: &str = "database_url_scheme";
    pub const DATABASE_URL_HOSTNAME: &str = "database_url_hostname";
    pub const WEB_DATABASE_USERNAME: &str = "web_database_username";
    pub const WEB_DATABASE_PASSWORD: &str = "web_database_password";
    pub const ADMIN_DATABASE_USERNAME: &str = "admin_database_username";
    pub const ADMIN_DATABASE_PASSWORD: &str = "admin_database_password";
    pub const BATCH_DATABASE_USERNAME: &str = "batch_database_username";
    pub const BATCH_DATABASE_PASSWORD: &str = "batch_database_password";
    pub const LOGGER_IDENTIFIER: &str = "logger_identifier";
    pub const PRODUCTION: &str = "production";
    pub const NONPRODUCTION_PREFIX: &str = "nonproduction_prefix";
    pub const SMTP_HOST: &str = "smtp_host";
    pub const EMAIL_FROM_FIELD: &str = "email_from_field";
    pub const LOGGER_EMAIL_DESTINATION: &str = "logger_email_destination";
    pub const SQL_TRACE_ENABLED: &str = "sql_trace_enabled";
    pub const LOG_LEVEL: &str = "log_level";
}

static GLOBAL_PROPERTIES: OnceLock<ProjectResult<Arc<ProjectProperties>>> = OnceLock::new();

/// 已验证的项目属性
///
/// 只构建一次，之后不再修改。任意键可通过类型化读取方法访问，
/// 已知键另有命名访问器。
#[derive(Debug, Clone)]
pub struct ProjectProperties {
    source: String,
    values: PropertyMap,
}

impl ProjectProperties {
    fn loader() -> PropertiesLoader {
        PropertiesLoader::new().with_validator(Box::new(ProjectPropertiesValidator))
    }

    /// 加载并验证 `path` 处的属性文件
    pub fn load(path: impl AsRef<Path>) -> ProjectResult<Self> {
        let path = path.as_ref();
        let values = Self::loader().load_from_file(path)?;
        Ok(Self {
            source: path.display().to_string(),
            values,
        })
    }

    /// 解析并验证不来自文件的属性文本
    pub fn parse(content: &str) -> ProjectResult<Self> {
        let source = "<memory>";
        let values = Self::loader().load_from_str(content, source)?;
        Ok(Self {
            source: source.to_string(),
            values,
        })
    }

    /// 进程级共享实例，首次访问时从 [`PropertiesLoader::default_path`] 加载
    ///
    /// 加载失败的结果同样被保留：之后每次调用都返回同一个错误。
    pub fn global() -> Result<Arc<ProjectProperties>, &'static ProjectError> {
        GLOBAL_PROPERTIES
            .get_or_init(|| Self::load(PropertiesLoader::default_path()).map(Arc::new))
            .as_ref()
            .map(Arc::clone)
    }

    /// 属性的来源
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn values(&self) -> &PropertyMap {
        &self.values
    }

    pub fn get_optional(&self, key: &str) -> Option<&str> {
        self.values.get_optional(key)
    }

    pub fn get_string(&self, key: &str) -> ProjectResult<&str> {
        self.values.get_string(key)
    }

    pub fn get_int(&self, key: &str) -> ProjectResult<i32> {
        self.values.get_int(key)
    }

    pub fn get_boolean(&self, key: &str) -> ProjectResult<bool> {
        self.values.get_boolean(key)
    }

    pub fn database_url_scheme(&self) -> ProjectResult<&str> {
        self.get_string(keys::DATABASE_URL_SCHEME)
    }

    pub fn database_url_hostname(&self) -> ProjectResult<&str> {
        self.get_string(keys::DATABASE_URL_HOSTNAME)
    }

    pub fn web_database_username(&self) -> ProjectResult<&str> {
        self.get_string(keys::WEB_DATABASE_USERNAME)
    }

    pub fn web_database_password(&self) -> ProjectResult<&str> {
        self.get_string(keys::WEB_DATABASE_PASSWORD)
    }

    pub fn admin_database_username(&self) -> ProjectResult<&str> {
        self.get_string(keys::ADMIN_DATABASE_USERNAME)
    }

    pub fn admin_database_password(&self) -> ProjectResult<&str> {
        self.get_string(keys::ADMIN_DATABASE_PASSWORD)
    }

    pub fn batch_database_username(&self) -> ProjectResult<&str> {
        self.get_string(keys::BATCH_DATABASE_USERNAME)
    }

    pub fn batch_database_password(&self) -> ProjectResult<&str> {
        self.get_string(keys::BATCH_DATABASE_PASSWORD)
    }

    /// 本应用日志输出的标记，多个应用共用一个日志文件时用于区分
    pub fn logger_identifier(&self) -> ProjectResult<&str> {
        self.get_string(keys::LOGGER_IDENTIFIER)
    }

    pub fn production(&self) -> ProjectResult<bool> {
        self.get_boolean(keys::PRODUCTION)
    }

    /// 非生产环境下区分本应用实例的标签
    pub fn nonproduction_prefix(&self) -> ProjectResult<&str> {
        self.get_string(keys::NONPRODUCTION_PREFIX)
    }

    pub fn smtp_host(&self) -> ProjectResult<&str> {
        self.get_string(keys::SMTP_HOST)
    }

    pub fn email_from_field(&self) -> ProjectResult<&str> {
        self.get_string(keys::EMAIL_FROM_FIELD)
    }

    pub fn logger_email_destination(&self) -> ProjectResult<&str> {
        self.get_string(keys::LOGGER_EMAIL_DESTINATION)
    }

    /// 注意：跟踪输出可能非常大
    pub fn sql_trace_enabled(&self) -> ProjectResult<bool> {
        self.get_boolean(keys::SQL_TRACE_ENABLED)
    }

    /// 日志后端的可选阈值（`trace`、`debug` 等）
    pub fn log_level(&self) -> Option<&str> {
        self.get_optional(keys::LOG_LEVEL)
    }
}

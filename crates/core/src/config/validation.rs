use crate::{ProjectError, ProjectResult};

use super::core::PropertyMap;
use super::properties::keys;

/// 属性读取后执行一次的一致性检查
pub trait PropertiesValidator: Send + Sync {
    fn validate(&self, properties: &PropertyMap) -> ProjectResult<()>;
    fn name(&self) -> &str;
}

/// 每个项目属性文件都必须满足的跨字段规则：
///
/// - `logger_identifier` 非空
/// - 生产环境不能开启 `sql_trace_enabled`
/// - 非生产环境必须有非空的 `nonproduction_prefix`
///
/// 规则用到的键缺失同样视为检查失败。
pub struct ProjectPropertiesValidator;

impl PropertiesValidator for ProjectPropertiesValidator {
    fn validate(&self, properties: &PropertyMap) -> ProjectResult<()> {
        if properties.get_string(keys::LOGGER_IDENTIFIER)?.is_empty() {
            return Err(ProjectError::config_error("logger_identifier must not be empty"));
        }

        if properties.get_boolean(keys::PRODUCTION)? {
            if properties.get_boolean(keys::SQL_TRACE_ENABLED)? {
                return Err(ProjectError::config_error(
                    "sql_trace_enabled must be false on a production system",
                ));
            }
        } else if properties.get_string(keys::NONPRODUCTION_PREFIX)?.is_empty() {
            return Err(ProjectError::config_error(
                "nonproduction_prefix is required on a non-production system",
            ));
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "project_properties"
    }
}

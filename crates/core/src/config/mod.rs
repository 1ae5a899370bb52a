//! 项目属性配置
//!
//! 从扁平的 `key=value` 属性文件读取项目配置，只在启动时读取一次。
//!
//! - **core**: `PropertyMap`，不可变键值表及其类型化读取
//! - **loader**: 属性文件解析与加载
//! - **validation**: 加载后执行的一次性一致性检查
//! - **properties**: `ProjectProperties`，带命名访问器的已验证配置
//!
//! # 使用示例
//!
//! ```rust,no_run
//! use baseproject_core::config::ProjectProperties;
//!
//! let props = ProjectProperties::load("project.properties")?;
//! println!("smtp host: {}", props.smtp_host()?);
//! let retries = props.get_int("mail_retries")?;
//! # let _ = retries;
//! # Ok::<(), baseproject_core::ProjectError>(())
//! ```

pub mod core;
pub mod loader;
pub mod properties;
pub mod validation;

pub use self::core::PropertyMap;
pub use loader::{parse_properties, PropertiesLoader, DEFAULT_PROPERTIES_FILE, PROPERTIES_PATH_ENV};
pub use properties::{keys, ProjectProperties};
pub use validation::{ProjectPropertiesValidator, PropertiesValidator};

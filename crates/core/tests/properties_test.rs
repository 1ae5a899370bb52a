use baseproject_core::config::{PROPERTIES_PATH_ENV, PropertiesLoader};
use baseproject_core::*;
use std::env;
use std::fs;
use std::sync::Arc;
use tempfile::{NamedTempFile, TempDir};

const PROPERTIES: &str = r#"
# 数据库
database_url_scheme = postgresql
database_url_hostname = db.internal:5432
web_database_username = web
web_database_password = w3b\=secret
admin_database_username = admin
admin_database_password = adm1n
batch_database_username = batch
batch_database_password = b4tch

! 日志与邮件
logger_identifier: baseproject
production false
nonproduction_prefix = qa2
smtp_host = mail.internal
email_from_field = noreply@example.com
logger_email_destination = ops@example.com, \
    oncall@example.com
sql_trace_enabled = TRUE
"#;

#[test]
fn test_load_from_file_and_read_every_key() {
    let file = NamedTempFile::new().unwrap();
    fs::write(file.path(), PROPERTIES).unwrap();

    let props = ProjectProperties::load(file.path()).unwrap();

    assert_eq!(props.source(), file.path().display().to_string());
    assert_eq!(props.database_url_scheme().unwrap(), "postgresql");
    assert_eq!(props.database_url_hostname().unwrap(), "db.internal:5432");
    assert_eq!(props.web_database_username().unwrap(), "web");
    assert_eq!(props.web_database_password().unwrap(), "w3b=secret");
    assert_eq!(props.admin_database_username().unwrap(), "admin");
    assert_eq!(props.admin_database_password().unwrap(), "adm1n");
    assert_eq!(props.batch_database_username().unwrap(), "batch");
    assert_eq!(props.batch_database_password().unwrap(), "b4tch");
    assert_eq!(props.logger_identifier().unwrap(), "baseproject");
    assert!(!props.production().unwrap());
    assert_eq!(props.nonproduction_prefix().unwrap(), "qa2");
    assert_eq!(props.smtp_host().unwrap(), "mail.internal");
    assert_eq!(props.email_from_field().unwrap(), "noreply@example.com");
    assert_eq!(
        props.logger_email_destination().unwrap(),
        "ops@example.com, oncall@example.com"
    );
    assert!(props.sql_trace_enabled().unwrap());
    assert_eq!(props.log_level(), None);
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = ProjectProperties::load(dir.path().join("absent.properties")).unwrap_err();

    assert!(matches!(err, ProjectError::ResourceNotFound { .. }));
    assert!(err.is_fatal());
}

#[test]
fn test_invalid_file_is_fatal() {
    let file = NamedTempFile::new().unwrap();
    fs::write(
        file.path(),
        "logger_identifier=web\nproduction=true\nsql_trace_enabled=true\n",
    )
    .unwrap();

    let err = ProjectProperties::load(file.path()).unwrap_err();
    assert!(matches!(err, ProjectError::InvalidProperties { .. }));
    assert!(err.to_string().contains("sql_trace_enabled"));
}

#[test]
fn test_loader_without_validators_accepts_anything() {
    let map = PropertiesLoader::new()
        .load_from_str("only_key=1\n", "inline")
        .unwrap();
    assert_eq!(map.get_int("only_key").unwrap(), 1);
    assert!(PropertiesLoader::new().validator_names().is_empty());
}

#[test]
fn test_global_instance_is_loaded_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("project.properties");
    fs::write(
        &path,
        "logger_identifier=global\nproduction=true\nsql_trace_enabled=false\n",
    )
    .unwrap();
    env::set_var(PROPERTIES_PATH_ENV, &path);

    let first = ProjectProperties::global().unwrap();
    assert_eq!(first.logger_identifier().unwrap(), "global");

    // 之后修改文件不会被重新读取
    fs::write(&path, "logger_identifier=changed\n").unwrap();
    let second = ProjectProperties::global().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.logger_identifier().unwrap(), "global");

    // 全局实例可以直接交给邮件发送器共享
    let dispatcher = MailDispatcher::new(second, Arc::new(NoopTransport));
    assert!(Arc::ptr_eq(&first, &ProjectProperties::global().unwrap()));
    assert_eq!(dispatcher.properties().logger_identifier().unwrap(), "global");
    assert_eq!(dispatcher.subject_prefix().unwrap(), "");
}

struct NoopTransport;

impl MailTransport for NoopTransport {
    fn deliver(&self, _session: &MailSession, _message: &EmailMessage) -> anyhow::Result<()> {
        Ok(())
    }
}

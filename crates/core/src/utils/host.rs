use tracing::debug;

/// 无法解析本机主机名时使用的占位值
pub const UNKNOWN_HOSTNAME: &str = "null";

/// 本机名称的来源；测试中可替换
pub type HostnameResolver = fn() -> std::io::Result<String>;

/// 操作系统报告的本机名称
pub fn system_hostname() -> std::io::Result<String> {
    hostname::get().map(|name| name.to_string_lossy().into_owned())
}

/// 解析到的主机名，失败时为 [`UNKNOWN_HOSTNAME`]
pub fn hostname_or_unknown(resolver: HostnameResolver) -> String {
    match resolver() {
        Ok(name) => name,
        Err(e) => {
            debug!(error = %e, "Failed to resolve local hostname");
            UNKNOWN_HOSTNAME.to_string()
        }
    }
}

use std::error::Error;

/// 写入日志后端时使用的换行符
pub const LOG_LINE_SEPARATOR: &str = "\n";

/// 转发邮件 HTML 正文使用的换行符
pub const EMAIL_LINE_SEPARATOR: &str = "<br/>";

/// 渲染错误及其 `source()` 链，每个错误占一行
pub fn render_failure(failure: &(dyn Error + 'static), line_separator: &str) -> String {
    let mut rendered = format!("EXCEPTION (message: {failure}) -- details:");
    rendered.push_str(line_separator);
    rendered.push_str(&format!("[EXCEPTION] {failure}"));

    let mut cause = failure.source();
    while let Some(error) = cause {
        rendered.push_str(line_separator);
        rendered.push_str(&format!("[EXCEPTION]    caused by: {error}"));
        cause = error.source();
    }
    rendered
}

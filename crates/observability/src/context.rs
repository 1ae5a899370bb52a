//! 日志上下文
//!
//! 每个线程（或 [`scope`] 内的每个 tokio 任务）各自持有一个
//! [`LogContext`]，记录会话标识和最近一次日志调用的位置。

use std::cell::RefCell;
use std::future::Future;

/// 调用 `set_session_id` 之前使用的会话标识
pub const NO_SESSION: &str = "null";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContext {
    session_id: String,
    call_site: Option<String>,
}

impl Default for LogContext {
    fn default() -> Self {
        Self {
            session_id: NO_SESSION.to_string(),
            call_site: None,
        }
    }
}

impl LogContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            call_site: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// 此上下文中最近一次日志调用的 `file:line`
    pub fn call_site(&self) -> Option<&str> {
        self.call_site.as_deref()
    }

    /// 见 [`scope`]
    pub async fn scope<F: Future>(self, future: F) -> F::Output {
        scope(self, future).await
    }
}

thread_local! {
    static THREAD_CONTEXT: RefCell<LogContext> = RefCell::new(LogContext::default());
}

tokio::task_local! {
    static TASK_CONTEXT: RefCell<LogContext>;
}

fn with_current<R>(f: impl FnOnce(&mut LogContext) -> R) -> R {
    if TASK_CONTEXT.try_with(|_| ()).is_ok() {
        TASK_CONTEXT.with(|cell| f(&mut cell.borrow_mut()))
    } else {
        THREAD_CONTEXT.with(|cell| f(&mut cell.borrow_mut()))
    }
}

/// 以独立的上下文运行 `future`，与工作线程的上下文隔离
pub async fn scope<F: Future>(context: LogContext, future: F) -> F::Output {
    TASK_CONTEXT.scope(RefCell::new(context), future).await
}

pub fn current() -> LogContext {
    with_current(|context| context.clone())
}

pub fn current_session_id() -> String {
    with_current(|context| context.session_id.clone())
}

pub fn set_session_id(session_id: impl Into<String>) {
    let session_id = session_id.into();
    with_current(|context| context.session_id = session_id);
}

/// 记录调用位置，并返回与之一起输出的会话标识
pub(crate) fn record_call_site(call_site: &str) -> String {
    with_current(|context| {
        context.call_site = Some(call_site.to_string());
        context.session_id.clone()
    })
}

/// 恢复为 [`LogContext::default`]
pub fn reset() {
    with_current(|context| *context = LogContext::default());
}

//! 日志初始化
//!
//! 库内部只使用 `tracing` 宏；二进制程序调用 `init()` 安装输出到 stderr 的订阅者。
//! 过滤规则读取 `EGGACHE_LOG`，默认 `eggache=info`。

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "EGGACHE_LOG";

/// 安装全局订阅者，已经安装过时返回 false
pub fn init() -> bool {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("eggache=info"));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true),
    );

    if subscriber.try_init().is_err() {
        return false;
    }

    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!(panic = %panic_info, "panic");
    }));

    true
}

use tracing::Subscriber;
use tracing_subscriber::fmt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 未設定 RUST_LOG 時的預設層級
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "desk_build=debug,info"
    } else {
        "desk_build=info"
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

// 步驟名稱已在訊息中，不需要 target 與原始碼位置
fn base_layer<S>() -> fmt::Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(base_layer().compact())
        .init();
}

/// CI 環境使用 JSON 格式輸出
pub fn init_ci_logger() {
    tracing_subscriber::registry()
        .with(env_filter(false))
        .with(base_layer().json())
        .init();
}

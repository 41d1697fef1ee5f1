use clap::Parser;
use desk_build::utils::{logger, validation::Validate};
use desk_build::{standard_tasks, BuildConfig, BuildError, CliConfig, ShellRunner, TaskRunner};
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_ci_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting desk-build");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ Build failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(config: CliConfig) -> Result<(), BuildError> {
    let build_config = BuildConfig::load(&config.root, config.config.as_deref())?;

    // 驗證配置
    build_config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");

    let layout = build_config.layout(&config.root);
    let registry = standard_tasks(&layout)?;
    let runner = TaskRunner::new(registry, Arc::new(ShellRunner::new()));

    let Some(task) = config.command.task_name() else {
        display_task_list(&runner)?;
        return Ok(());
    };

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        println!("{}", runner.plan(task)?);
        return Ok(());
    }

    let summary = runner.run(task).await?;
    tracing::info!(
        "✅ Task '{}' completed in {:?} ({} steps)",
        summary.task,
        summary.duration,
        summary.steps.len()
    );
    tracing::debug!("📊 Summary: {}", summary.to_json());
    println!("✅ {} finished", summary.task);

    Ok(())
}

fn display_task_list(runner: &TaskRunner) -> Result<(), BuildError> {
    println!("📋 Tasks:");
    for name in runner.registry().names() {
        println!();
        println!("{}", runner.plan(name)?);
    }
    Ok(())
}

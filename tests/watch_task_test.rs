mod common;

use async_trait::async_trait;
use common::{default_layout, task_runner, write_file, ScriptedRunner};
use desk_build::app::steps::{CopyStep, WatchStep};
use desk_build::core::compose::run_step;
use desk_build::core::{Step, StepKind, TaskContext};
use desk_build::utils::fileset::FileSet;
use desk_build::{standard_tasks, BuildError};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// 只計算被觸發次數的目標步驟
#[derive(Default)]
struct CountingStep {
    runs: AtomicUsize,
}

impl CountingStep {
    fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Step for CountingStep {
    fn name(&self) -> &str {
        "count"
    }

    fn kind(&self) -> StepKind {
        StepKind::Copy
    }

    async fn run(&self, _ctx: &TaskContext) -> desk_build::Result<()> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// 取出 watch 任務平行群組中的監看步驟
fn watcher(root: &Path, name: &str) -> Arc<dyn Step> {
    let registry = standard_tasks(&default_layout(root)).unwrap();
    let watch = registry.get("watch").unwrap();
    let group = watch
        .children()
        .iter()
        .find(|step| step.name() == "watchers")
        .cloned()
        .unwrap();
    group
        .children()
        .iter()
        .find(|step| step.name() == name)
        .cloned()
        .unwrap()
}

fn spawn_watch(
    step: Arc<dyn Step>,
    ctx: &TaskContext,
) -> tokio::task::JoinHandle<desk_build::Result<()>> {
    let ctx = ctx.clone();
    tokio::spawn(async move { run_step(step.as_ref(), &ctx).await })
}

async fn wait_for(path: &Path, timeout: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if path.exists() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    path.exists()
}

#[tokio::test]
async fn test_watch_resyncs_changed_runtime_files() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "static/js/existing.js", "already here");
    write_file(root, "static/index.html", "<html></html>");

    let runtime_files = FileSet::new(root.join("static"))
        .include("js/**")
        .unwrap()
        .include("css/**")
        .unwrap();
    let sync: Arc<dyn Step> = Arc::new(CopyStep::new(
        "sync-js-css-in-runtime",
        vec![runtime_files.clone()],
        root.join("public/static"),
    ));
    let watch = Arc::new(WatchStep::new(
        "keep-sync-static-in-runtime",
        runtime_files,
        sync,
        Duration::from_millis(50),
    ));

    let ctx = TaskContext::new(Arc::new(ScriptedRunner::new()));
    let handle = {
        let ctx = ctx.clone();
        let watch = Arc::clone(&watch);
        tokio::spawn(async move { run_step(watch.as_ref(), &ctx).await })
    };

    // 初始檔案不會觸發同步
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(!root.join("public/static/js/existing.js").exists());

    write_file(root, "static/css/style.css", "body{}");

    let copied = wait_for(&root.join("public/static/css/style.css"), Duration::from_secs(10)).await;
    assert!(copied, "change was not synced");
    // 同步時以輸出目錄為基準，只帶上 js 與 css
    assert!(root.join("public/static/js/existing.js").exists());
    assert!(!root.join("public/static/index.html").exists());
    // 重新同步不會寫入步驟紀錄
    assert_eq!(ctx.trace().snapshot(), vec!["keep-sync-static-in-runtime"]);

    handle.abort();
}

#[tokio::test]
async fn test_watch_on_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let files = FileSet::new(temp_dir.path().join("absent"))
        .include("**")
        .unwrap();
    let target: Arc<dyn Step> = Arc::new(CopyStep::new(
        "noop",
        vec![],
        temp_dir.path().join("out"),
    ));
    let watch = WatchStep::new("keep-sync", files, target, Duration::from_millis(10));

    let ctx = TaskContext::new(Arc::new(ScriptedRunner::new()));
    assert!(run_step(&watch, &ctx).await.is_err());
}

#[tokio::test]
async fn test_watch_ignores_files_outside_includes() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "static/node_modules/electron/index.js", "dep");
    write_file(root, "static/index.html", "<html></html>");

    let files = FileSet::new(root.join("static"))
        .include("js/**")
        .unwrap()
        .include("css/**")
        .unwrap();
    assert_eq!(
        files.watch_roots(),
        vec![root.join("static/css"), root.join("static/js")]
    );

    let target = Arc::new(CountingStep::default());
    let watch: Arc<dyn Step> = Arc::new(WatchStep::new(
        "keep-sync-static-in-runtime",
        files,
        Arc::clone(&target) as Arc<dyn Step>,
        Duration::from_millis(50),
    ));
    let ctx = TaskContext::new(Arc::new(ScriptedRunner::new()));
    let handle = spawn_watch(watch, &ctx);
    tokio::time::sleep(Duration::from_millis(500)).await;

    write_file(root, "static/node_modules/electron/package.json", "{}");
    write_file(root, "static/index.html", "<html>changed</html>");
    tokio::time::sleep(Duration::from_millis(800)).await;
    assert_eq!(target.runs(), 0);

    // 監看前尚不存在的 css 目錄也會被監看
    write_file(root, "static/css/style.css", "body{}");
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    while target.runs() == 0 && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(target.runs() >= 1, "css change did not trigger the target");

    handle.abort();
}

#[tokio::test]
async fn test_keep_sync_resource_file_copies_new_resources() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "resources/index.html", "<html></html>");

    let ctx = TaskContext::new(Arc::new(ScriptedRunner::new()));
    let handle = spawn_watch(watcher(root, "keep-sync-resource-file"), &ctx);

    // 啟動時已存在的檔案不會被同步
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(!root.join("static/index.html").exists());

    write_file(root, "resources/img/new.svg", "<svg/>");

    let copied = wait_for(&root.join("static/img/new.svg"), Duration::from_secs(10)).await;
    assert!(copied, "new resource was not synced");
    assert_eq!(
        std::fs::read_to_string(root.join("static/img/new.svg")).unwrap(),
        "<svg/>"
    );

    handle.abort();
}

#[tokio::test]
async fn test_failing_css_watch_aborts_watch_task() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "resources/index.html", "<html></html>");

    let runner = Arc::new(ScriptedRunner::new().failing_on("yarn css:watch"));
    let tasks = task_runner(root, Arc::clone(&runner));

    let result = tokio::time::timeout(Duration::from_secs(10), tasks.run("watch"))
        .await
        .expect("watch task kept running after css:watch failed");

    match result {
        Err(BuildError::CommandFailedError { command, .. }) => {
            assert_eq!(command, "yarn css:watch");
        }
        other => panic!("expected command failure, got {:?}", other.map(|s| s.steps)),
    }
    assert_eq!(runner.commands(), vec!["yarn css:watch"]);

    let trace = tasks.context().trace().snapshot();
    assert_eq!(
        trace[..3],
        ["sync-resource-file", "sync-asset-files", "sync-all-static"]
    );
    assert!(trace.iter().any(|step| step == "watch-css"));
    assert!(root.join("public/static/index.html").exists());
}

use crate::app::steps::{
    CleanStep, CommandStep, CopyStep, EnsureDependenciesStep, OptimizeCssStep, StampVersionStep,
    WatchStep,
};
use crate::config::ProjectLayout;
use crate::core::compose::{Parallel, Series};
use crate::core::registry::TaskRegistry;
use crate::core::{CommandSpec, Step};
use crate::utils::error::Result;
use crate::utils::fileset::FileSet;
use std::sync::Arc;

/// 建立 clean / build / watch / electron / electron-maker 任務
pub fn standard_tasks(layout: &ProjectLayout) -> Result<TaskRegistry> {
    let steps = StandardSteps::new(layout)?;
    let mut registry = TaskRegistry::new();

    registry.register("clean", Arc::clone(&steps.clean));

    registry.register(
        "build",
        Arc::new(Series::new(
            "build",
            vec![
                Arc::clone(&steps.clean),
                Arc::clone(&steps.sync_resource_file),
                Arc::clone(&steps.sync_asset_files),
                Arc::clone(&steps.build_css),
            ],
        )),
    );

    registry.register(
        "watch",
        Arc::new(Series::new(
            "watch",
            vec![
                Arc::clone(&steps.sync_resource_file),
                Arc::clone(&steps.sync_asset_files),
                Arc::clone(&steps.sync_all_static),
                Arc::new(Parallel::new(
                    "watchers",
                    vec![
                        Arc::clone(&steps.keep_sync_resource_file),
                        Arc::clone(&steps.watch_css),
                        Arc::clone(&steps.keep_sync_static_in_runtime),
                    ],
                )),
            ],
        )),
    );

    registry.register(
        "electron",
        Arc::new(Series::new(
            "electron",
            vec![
                Arc::clone(&steps.ensure_dependencies),
                Arc::clone(&steps.electron_dev),
            ],
        )),
    );

    registry.register(
        "electron-maker",
        Arc::new(Series::new(
            "electron-maker",
            vec![
                Arc::clone(&steps.release_build),
                Arc::clone(&steps.stamp_version),
                Arc::clone(&steps.ensure_dependencies),
                Arc::clone(&steps.electron_make),
            ],
        )),
    );
    registry.alias("electronMaker", "electron-maker");

    Ok(registry)
}

struct StandardSteps {
    clean: Arc<dyn Step>,
    sync_resource_file: Arc<dyn Step>,
    sync_asset_files: Arc<dyn Step>,
    sync_all_static: Arc<dyn Step>,
    keep_sync_resource_file: Arc<dyn Step>,
    keep_sync_static_in_runtime: Arc<dyn Step>,
    build_css: Arc<dyn Step>,
    watch_css: Arc<dyn Step>,
    ensure_dependencies: Arc<dyn Step>,
    electron_dev: Arc<dyn Step>,
    release_build: Arc<dyn Step>,
    stamp_version: Arc<dyn Step>,
    electron_make: Arc<dyn Step>,
}

impl StandardSteps {
    fn new(layout: &ProjectLayout) -> Result<Self> {
        let commands = &layout.commands;

        let resource_files = FileSet::new(&layout.resources).include("**")?;
        let sync_resource_file: Arc<dyn Step> = Arc::new(CopyStep::new(
            "sync-resource-file",
            vec![resource_files.clone()],
            &layout.output,
        ));

        let mut asset_files = FileSet::new(&layout.assets).include("**")?;
        for pattern in &layout.asset_excludes {
            asset_files = asset_files.exclude(pattern)?;
        }
        let sync_asset_files: Arc<dyn Step> = Arc::new(CopyStep::new(
            "sync-asset-files",
            vec![asset_files],
            &layout.assets_output,
        ));

        let all_static = FileSet::new(&layout.output)
            .include("**")?
            .exclude("node_modules")?
            .exclude("node_modules/**")?;
        let sync_all_static: Arc<dyn Step> = Arc::new(CopyStep::new(
            "sync-all-static",
            vec![all_static],
            &layout.public_static,
        ));

        let runtime_files = FileSet::new(&layout.output)
            .include("js/**")?
            .include("css/**")?;
        let sync_js_css_in_runtime: Arc<dyn Step> = Arc::new(CopyStep::new(
            "sync-js-css-in-runtime",
            vec![runtime_files.clone()],
            &layout.public_static,
        ));

        let keep_sync_resource_file: Arc<dyn Step> = Arc::new(WatchStep::new(
            "keep-sync-resource-file",
            resource_files,
            Arc::clone(&sync_resource_file),
            layout.watch_debounce,
        ));
        let keep_sync_static_in_runtime: Arc<dyn Step> = Arc::new(WatchStep::new(
            "keep-sync-static-in-runtime",
            runtime_files,
            sync_js_css_in_runtime,
            layout.watch_debounce,
        ));

        let build_css: Arc<dyn Step> = Arc::new(Series::new(
            "build-css",
            vec![
                Arc::new(CommandStep::new(
                    "compile-css",
                    CommandSpec::new(&commands.css_build).in_dir(&layout.root),
                )),
                Arc::new(OptimizeCssStep::new("optimize-css", &layout.stylesheet)),
            ],
        ));
        let watch_css: Arc<dyn Step> = Arc::new(CommandStep::new(
            "watch-css",
            CommandSpec::new(&commands.css_watch).in_dir(&layout.root),
        ));

        Ok(Self {
            clean: Arc::new(CleanStep::new("clean", &layout.output, &layout.clean_keep)),
            sync_resource_file,
            sync_asset_files,
            sync_all_static,
            keep_sync_resource_file,
            keep_sync_static_in_runtime,
            build_css,
            watch_css,
            ensure_dependencies: Arc::new(EnsureDependenciesStep::new(
                "ensure-dependencies",
                &layout.dependencies,
                CommandSpec::new(&commands.install).in_dir(&layout.output),
            )),
            electron_dev: Arc::new(CommandStep::new(
                "electron-dev",
                CommandSpec::new(&commands.electron_dev).in_dir(&layout.output),
            )),
            release_build: Arc::new(CommandStep::new(
                "release-build",
                CommandSpec::new(&commands.release_build).in_dir(&layout.root),
            )),
            stamp_version: Arc::new(StampVersionStep::new(
                "stamp-version",
                &layout.manifest,
                &layout.version_source,
            )),
            electron_make: Arc::new(CommandStep::new(
                "electron-make",
                CommandSpec::new(&commands.electron_make).in_dir(&layout.output),
            )),
        })
    }
}

use bevy::asset::AssetPlugin;
use bevy::prelude::*;

pub mod args;
pub mod config;
pub mod scene;
pub mod trail;

pub use args::Args;
pub use config::{load_config, ViewerConfig};
use scene::ScenePlugin;
use trail::TrailPlugin;

#[derive(Clone, Copy)]
struct ViewerAppConfig {
    include_rendering: bool,
    include_scene: bool,
}

impl ViewerAppConfig {
    fn full(args: &Args) -> Self {
        Self {
            include_rendering: !args.headless,
            include_scene: true,
        }
    }

    const MINIMAL: Self = Self {
        include_rendering: false,
        include_scene: false,
    };
}

pub fn build_viewer_app(args: Args, config: ViewerConfig) -> App {
    let app_config = ViewerAppConfig::full(&args);
    build_viewer_app_with_config(Some(args), config, app_config)
}

/// Headless app with trail systems but no scene, window, or renderer. Tests
/// drive it with manually advanced time and spawn their own trails.
pub fn build_minimal_viewer_app(config: ViewerConfig) -> App {
    build_viewer_app_with_config(None, config, ViewerAppConfig::MINIMAL)
}

fn build_viewer_app_with_config(
    args: Option<Args>,
    config: ViewerConfig,
    app_config: ViewerAppConfig,
) -> App {
    let mut app = App::new();

    if app_config.include_rendering {
        app.add_plugins(DefaultPlugins.set(AssetPlugin {
            file_path: "assets".into(),
            ..Default::default()
        }));
    } else {
        app.add_plugins((MinimalPlugins, TransformPlugin, AssetPlugin::default()));
        // No render plugin to register these in headless mode.
        app.init_asset::<Mesh>();
        app.init_asset::<StandardMaterial>();
    }

    if let Some(args) = args {
        app.insert_resource(args);
    }
    app.insert_resource(config);

    app.add_plugins(TrailPlugin);
    if app_config.include_scene {
        app.add_plugins(ScenePlugin);
    }

    app
}

use bevy::prelude::Resource;
use clap::Parser;

#[derive(Parser, Debug, Resource, Clone)]
#[command(name = "trail-viewer")]
#[command(about = "Saber trail ribbon preview", long_about = None)]
pub struct Args {
    /// Path to the trail config file (TOML)
    #[arg(long, default_value = "trail.toml")]
    pub config: String,
    /// Run without window/rendering
    #[arg(long, default_value_t = false)]
    pub headless: bool,
}

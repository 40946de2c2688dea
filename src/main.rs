mod app;
mod kg;
mod util;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Exported knowledge-graph snapshot ({nodes, edges} JSON)
    #[arg(long, default_value = "graph.json")]
    snapshot: PathBuf,

    /// Hide entities below this extraction confidence at startup
    #[arg(long, default_value_t = 0)]
    min_confidence: u8,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "entity-atlas",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::EntityAtlasApp::new(
                cc,
                args.snapshot.clone(),
                args.min_confidence,
            )))
        }),
    )
}

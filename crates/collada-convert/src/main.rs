//! `collada-convert`: resolve the materials of a scene description and print
//! the resulting bindings as JSON.

mod scene;

use clap::Parser;
use collada_config::{CliArgs, Config};
use collada_materials::{DiagnosticLog, MaterialRegistry, MaterialResolver, SamplerTextureCreator};

use crate::scene::Scene;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone() {
        Some(dir) => dir,
        None => Config::default_dir()?,
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    collada_log::init_logging(Some(&config_dir.join("logs")), Some(&config));

    let scene = Scene::from_ron(&args.scene)?;
    log::info!(
        "Loaded {} with {} elements and {} geometries",
        args.scene.display(),
        scene.document.len(),
        scene.geometries.len()
    );

    let diagnostics = DiagnosticLog::new();
    let registry = MaterialRegistry::new();
    let resolver = MaterialResolver::new(
        &scene.document,
        &SamplerTextureCreator,
        &diagnostics,
        &registry,
    )
    .with_config(&config.materials);

    let report = scene::convert(&scene, &resolver, &diagnostics);
    log::info!(
        "Converted {} materials ({} warnings, {} errors)",
        report.materials.len(),
        report.warnings,
        report.errors
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

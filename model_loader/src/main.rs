use clap::Parser;
use log::{error, info};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use model_assets::{Asset, AssetArchive, Mesh};
use model_loader::{GltfImporter, ImageTextureLoader, LoaderSettings, ModelLoader, Result};

use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(version, about)]
struct Args {
  /// name of the model resource, without extension
  #[arg(id = "NAME")]
  name: String,
  /// resource type (file extension) of the model
  #[arg(short = 't', long = "type", default_value = "gltf")]
  ty: String,
  /// load animations as well
  #[arg(short, long)]
  animated: bool,
  /// bundle directory to search, may be repeated
  #[arg(short, long = "bundle-dir")]
  bundle_dirs: Vec<PathBuf>,
  /// yaml loader settings
  #[arg(short, long)]
  config: Option<PathBuf>,
  /// build full mip chains for textures
  #[arg(short, long)]
  mipmaps: bool,
  /// asset archive to write the loaded model into
  #[arg(short, long)]
  output: Option<PathBuf>,
}

fn main() -> ExitCode {
  initialize_logging();
  let args = Args::parse();

  match run(args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      error!("Failed to load model: {}", e);
      ExitCode::FAILURE
    }
  }
}

fn run(args: Args) -> Result<()> {
  let mut settings = match &args.config {
    Some(path) => LoaderSettings::load_from_file(path)?,
    None => LoaderSettings::default(),
  };
  if !args.bundle_dirs.is_empty() {
    settings.bundle_dirs = args.bundle_dirs.clone();
  }
  settings.generate_mipmaps |= args.mipmaps;

  let loader = ModelLoader::new(settings.resolver(), GltfImporter, ImageTextureLoader).with_texture_options(settings.texture_options());

  if args.animated {
    let loaded = loader.load_animated_model(&args.name, &args.ty)?;
    info!("{} texture warning(s)", loaded.warnings.len());

    let model = loaded.model;
    log_meshes(model.meshes());
    let channels: usize = model.animations().iter().map(|animation| animation.channels().len()).sum();
    info!("{} animation(s), {} channel(s)", model.animations().len(), channels);

    if let Some(output) = &args.output {
      write_archive(output, &args.name, model)?;
    }
  } else {
    let loaded = loader.load_static_model(&args.name, &args.ty)?;
    info!("{} texture warning(s)", loaded.warnings.len());

    let model = loaded.model;
    log_meshes(model.meshes());

    if let Some(output) = &args.output {
      write_archive(output, &args.name, model)?;
    }
  }

  Ok(())
}

fn log_meshes(meshes: &[Mesh]) {
  let vertices: usize = meshes.iter().map(|mesh| mesh.vertices().len()).sum();
  let indices: usize = meshes.iter().map(|mesh| mesh.indices().len()).sum();
  let textured = meshes.iter().filter(|mesh| mesh.material().is_textured()).count();
  info!("{} mesh(es), {} vertices, {} indices, {} textured material(s)", meshes.len(), vertices, indices, textured);
}

fn write_archive(output: &Path, name: &str, model: impl Asset) -> Result<()> {
  let asset = model.convert_to_asset()?;
  let mut archive = AssetArchive::new(output)?;
  archive.add_asset_file(&asset, &format!("{name}.ast"))?;
  archive.finish()?;
  info!("Wrote {} to {}", name, output.display());
  Ok(())
}

fn initialize_logging() {
  let Ok(mut config_file) = std::env::current_exe() else {
    initialize_default_logger();
    return;
  };
  config_file.pop();
  config_file.push("config/model_loader_log4rs.yaml");

  if !config_file.is_file() {
    println!("Couldn't find a log config file, initializing default console logger.");
    initialize_default_logger();
  } else if log4rs::init_file(config_file, Default::default()).is_err() {
    println!("Failed to initialize logger from config file, defaulting to console logger.");
    initialize_default_logger();
  }
}

fn initialize_default_logger() {
  let stdout = ConsoleAppender::builder().build();
  let config = Config::builder()
    .appender(Appender::builder().build("stdout", Box::new(stdout)))
    .build(Root::builder().appender("stdout").build(log::LevelFilter::Info));

  match config {
    Ok(config) => {
      if let Err(e) = log4rs::init_config(config) {
        println!("Failed to initialize console logger: {}", e);
      }
    }
    Err(e) => println!("Invalid console logger config: {}", e),
  }
}

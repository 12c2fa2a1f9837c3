//! Subcommand handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::args::{ConfigAction, PaletteArgs, RenderArgs};
use crate::ascii::{
    calibrate, ArtError, GridAxis, GridRequest, GridSize, LuminanceField, PaletteCache, SymbolSet,
};
use crate::config::{default_path, Config, ConfigError, DEFAULT_CONFIG_TOML};
use crate::generator::{render_request, ArtRequest};
use crate::raster::{expand_home, FontRasterizer, RasterError, MONOSPACE_FONT_PATHS};
use crate::source::{self, SourceError};

/// Errors surfaced to the user by the CLI.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Art(#[from] ArtError),

    #[error("Config file already exists: {}\nUse 'glyph-art config show' to view current settings.", .0.display())]
    ConfigExists(PathBuf),

    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Palette settings after merging CLI flags over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteSettings {
    pub symbols: String,
    pub font: Option<PathBuf>,
    pub font_size: f32,
}

impl PaletteSettings {
    pub fn resolve(config: &Config, args: &PaletteArgs) -> Result<Self, ConfigError> {
        let symbols = match (&args.symbols, args.charset) {
            (Some(symbols), _) => symbols.clone(),
            (None, Some(charset)) => SymbolSet::from(charset).symbols().to_string(),
            (None, None) => config.symbols()?,
        };
        Ok(Self {
            symbols,
            font: args.font.clone().or_else(|| config.font.path.clone()),
            font_size: args.font_size.unwrap_or(config.font.size),
        })
    }

    fn rasterizer(&self) -> Result<FontRasterizer, RasterError> {
        FontRasterizer::discover(self.font.as_deref(), self.font_size)
    }
}

/// Build the art request for `render`, merging CLI flags over the config.
///
/// `auto_size` is the grid used for dimensions the user did not fix.
pub fn build_request(
    config: &Config,
    args: &RenderArgs,
    image: Arc<LuminanceField>,
    symbols: String,
    auto_size: GridSize,
) -> ArtRequest {
    ArtRequest {
        image,
        symbols,
        grid: GridRequest::new(
            GridAxis::from_option(args.cols.or(config.grid.cols)),
            GridAxis::from_option(args.rows.or(config.grid.rows)),
        ),
        auto_size,
        preserve_aspect: config.grid.preserve_aspect && !args.no_preserve_aspect,
        char_aspect: args.char_aspect.unwrap_or(config.grid.char_aspect),
        invert: args.invert || config.output.invert,
    }
}

/// Render an image and print the art.
pub fn render(config: &Config, args: &RenderArgs) -> Result<(), CliError> {
    let settings = PaletteSettings::resolve(config, &args.palette)?;
    let rasterizer = settings.rasterizer()?;
    let image = Arc::new(source::load_field(&args.image)?);

    let request = build_request(config, args, image, settings.symbols, GridSize::from_terminal());
    let rendered = render_request(&mut PaletteCache::new(), &rasterizer, &request)?;
    log::info!(
        "Rendered {} at {}x{}",
        args.image.display(),
        rendered.size.cols,
        rendered.size.rows
    );
    println!("{}", rendered.art);
    Ok(())
}

/// Print the calibrated palette, one `symbol brightness` pair per line.
pub fn show_palette(config: &Config, args: &PaletteArgs) -> Result<(), CliError> {
    let settings = PaletteSettings::resolve(config, args)?;
    let rasterizer = settings.rasterizer()?;
    let palette = calibrate(&settings.symbols, &rasterizer)?;

    if let Some(path) = rasterizer.source() {
        println!("Font: {} ({}px)", path.display(), rasterizer.size());
    }
    for entry in palette.entries() {
        println!("  {:?}  {:.3}", entry.symbol, entry.brightness);
    }
    Ok(())
}

/// List the font search locations and whether each exists.
pub fn list_fonts() {
    println!("Monospace font locations (first existing one is used):");
    for path in MONOSPACE_FONT_PATHS {
        let expanded = expand_home(path);
        let mark = if expanded.is_file() { "found" } else { "-" };
        println!("  [{:>5}] {}", mark, expanded.display());
    }
    println!();
    println!("Use --font <path> or [font] path in the config file to pick another font.");
}

/// Handle config subcommand actions.
pub fn handle_config_action(
    action: ConfigAction,
    config: &Config,
    path: Option<&Path>,
) -> Result<(), CliError> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(default_path);
    match action {
        ConfigAction::Show => {
            println!("Current configuration:");
            println!();
            print!("{}", config.to_toml()?);
            println!();
            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
            Ok(())
        }
        ConfigAction::Init => {
            write_default_config(&config_path)?;
            println!("Created config file: {}", config_path.display());
            Ok(())
        }
    }
}

/// Write the commented default config to `path`, creating parent
/// directories. Refuses to overwrite an existing file.
pub fn write_default_config(path: &Path) -> Result<(), CliError> {
    if path.exists() {
        return Err(CliError::ConfigExists(path.to_path_buf()));
    }

    let write_err = |source| CliError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, DEFAULT_CONFIG_TOML).map_err(write_err)
}

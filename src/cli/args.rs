//! CLI argument parsing with clap.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use super::enums::CharacterSet;

/// Parse and validate a grid dimension (1-10000 characters)
fn parse_grid_dim(s: &str) -> Result<u32, String> {
    let n: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number of characters", s))?;
    if !(1..=10_000).contains(&n) {
        return Err(format!("Grid size must be between 1 and 10000, got {}", n));
    }
    Ok(n)
}

/// Parse and validate a font size in pixels (1.0-512.0)
fn parse_font_size(s: &str) -> Result<f32, String> {
    let size: f32 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(1.0..=512.0).contains(&size) {
        return Err(format!("Font size must be between 1 and 512 pixels, got {}", size));
    }
    Ok(size)
}

/// Parse and validate a character cell aspect ratio (0.1-10.0)
fn parse_char_aspect(s: &str) -> Result<f32, String> {
    let aspect: f32 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(0.1..=10.0).contains(&aspect) {
        return Err(format!("Character aspect must be between 0.1 and 10.0, got {}", aspect));
    }
    Ok(aspect)
}

/// Render images as ASCII art with a palette calibrated against a real font
#[derive(Parser, Debug)]
#[command(name = "glyph-art")]
#[command(version, about = "Render images as calibrated ASCII art", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Render to fit the terminal
    glyph-art render photo.png

    # Fixed width, rows derived from the aspect ratio
    glyph-art render photo.jpg --cols 120

    # Light text on a dark terminal, custom symbols
    glyph-art render logo.png --invert --symbols ' .oO@'

    # Inspect the calibrated palette for a font
    glyph-art palette --font ~/fonts/Iosevka.ttf --font-size 16")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(long, short, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render an image as ASCII art to stdout
    Render(RenderArgs),
    /// Show the calibrated palette, darkest first
    Palette(PaletteArgs),
    /// List the monospace font locations searched when no font is given
    Fonts,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Options shared by every command that calibrates a palette.
#[derive(clap::Args, Debug, Clone, Default, PartialEq)]
pub struct PaletteArgs {
    /// Symbols to calibrate (overrides --charset)
    #[arg(long)]
    pub symbols: Option<String>,

    /// Named symbol set
    #[arg(long)]
    pub charset: Option<CharacterSet>,

    /// Font file used for calibration
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Font size in pixels
    #[arg(long, value_parser = parse_font_size)]
    pub font_size: Option<f32>,
}

#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct RenderArgs {
    /// Image to render (PNG, JPEG, GIF, BMP, ...)
    pub image: PathBuf,

    /// Fixed number of columns (default: terminal width)
    #[arg(long, value_parser = parse_grid_dim)]
    pub cols: Option<u32>,

    /// Fixed number of rows (default: terminal height)
    #[arg(long, value_parser = parse_grid_dim)]
    pub rows: Option<u32>,

    /// Do not adjust the grid to the image aspect ratio
    #[arg(long)]
    pub no_preserve_aspect: bool,

    /// Character cell height / width
    #[arg(long, value_parser = parse_char_aspect)]
    pub char_aspect: Option<f32>,

    /// Invert brightness (for light text on dark terminals)
    #[arg(long)]
    pub invert: bool,

    #[command(flatten)]
    pub palette: PaletteArgs,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults() {
        let args = Args::parse_from(["glyph-art", "render", "photo.png"]);
        assert!(args.config.is_none());
        assert_eq!(args.verbose, 0);
        match args.command {
            Command::Render(render) => {
                assert_eq!(render.image, PathBuf::from("photo.png"));
                assert!(render.cols.is_none());
                assert!(render.rows.is_none());
                assert!(!render.no_preserve_aspect);
                assert!(render.char_aspect.is_none());
                assert!(!render.invert);
                assert_eq!(render.palette, PaletteArgs::default());
            }
            _ => panic!("Expected Render subcommand"),
        }
    }

    #[test]
    fn test_render_all_options() {
        let args = Args::parse_from([
            "glyph-art",
            "-vv",
            "render",
            "photo.png",
            "--cols", "120",
            "--rows", "30",
            "--no-preserve-aspect",
            "--char-aspect", "1.8",
            "--invert",
            "--symbols", " .#",
            "--charset", "blocks",
            "--font", "/tmp/mono.ttf",
            "--font-size", "16",
            "--config", "/tmp/glyph.toml",
        ]);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/glyph.toml")));
        let Command::Render(render) = args.command else {
            panic!("Expected Render subcommand");
        };
        assert_eq!(render.cols, Some(120));
        assert_eq!(render.rows, Some(30));
        assert!(render.no_preserve_aspect);
        assert_eq!(render.char_aspect, Some(1.8));
        assert!(render.invert);
        assert_eq!(render.palette.symbols.as_deref(), Some(" .#"));
        assert_eq!(render.palette.charset, Some(CharacterSet::Blocks));
        assert_eq!(render.palette.font, Some(PathBuf::from("/tmp/mono.ttf")));
        assert_eq!(render.palette.font_size, Some(16.0));
    }

    #[test]
    fn test_render_requires_image() {
        assert!(Args::try_parse_from(["glyph-art", "render"]).is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Args::try_parse_from(["glyph-art", "render", "a.png", "--cols", "0"]).is_err());
        assert!(Args::try_parse_from(["glyph-art", "render", "a.png", "--rows", "x"]).is_err());
        assert!(Args::try_parse_from(["glyph-art", "palette", "--font-size", "0"]).is_err());
        assert!(
            Args::try_parse_from(["glyph-art", "render", "a.png", "--char-aspect", "50"]).is_err()
        );
        assert!(Args::try_parse_from(["glyph-art", "palette", "--charset", "braille"]).is_err());
    }

    #[test]
    fn test_palette_subcommand() {
        let args = Args::parse_from(["glyph-art", "palette", "--symbols", "ab"]);
        match args.command {
            Command::Palette(p) => assert_eq!(p.symbols.as_deref(), Some("ab")),
            _ => panic!("Expected Palette subcommand"),
        }
    }

    #[test]
    fn test_fonts_subcommand() {
        let args = Args::parse_from(["glyph-art", "fonts"]);
        assert!(matches!(args.command, Command::Fonts));
    }

    #[test]
    fn test_config_subcommands() {
        let args = Args::parse_from(["glyph-art", "config", "show"]);
        assert!(matches!(
            args.command,
            Command::Config {
                action: ConfigAction::Show
            }
        ));
        let args = Args::parse_from(["glyph-art", "config", "init"]);
        assert!(matches!(
            args.command,
            Command::Config {
                action: ConfigAction::Init
            }
        ));
    }

    #[test]
    fn test_parse_validators() {
        assert_eq!(parse_grid_dim("80"), Ok(80));
        assert!(parse_grid_dim("10001").is_err());
        assert_eq!(parse_font_size("8"), Ok(8.0));
        assert!(parse_font_size("-1").is_err());
        assert_eq!(parse_char_aspect("2.0"), Ok(2.0));
        assert!(parse_char_aspect("0").is_err());
    }
}

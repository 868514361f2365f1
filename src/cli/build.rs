//! Build command implementation.
//!
//! Reads the image list and writes the proxy sheet PDF.

use std::path::PathBuf;

use clap::Args;

use crate::config::SheetConfig;
use crate::error::{ProxyError, Result};
use crate::output::{display_path, plural, Printer};
use crate::parser::load_image_list;
use crate::render::{PdfWriter, RunSummary, SheetBuilder};
use crate::types::Colour;

/// Lay out images from a list onto printable PDF pages
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Image list with one `<path> <count>` entry per line
    #[arg(long, short, default_value = "images.txt")]
    pub input: PathBuf,

    /// Output PDF file
    #[arg(long, short, default_value = "output.pdf")]
    pub output: PathBuf,

    /// Background colour behind each image as #RRGGBB [default: #FFFFFF]
    #[arg(long, short)]
    pub background: Option<String>,

    /// Leave cell backgrounds unfilled
    #[arg(long, conflicts_with = "background")]
    pub no_background: bool,

    /// YAML file overriding page, cell and DPI settings
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Print a JSON run summary to stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let summary = build_sheet(&args, printer)?;

    if args.json {
        let summary = summary.unwrap_or_default();
        let json = serde_json::to_string_pretty(&summary).map_err(|e| ProxyError::Io {
            path: PathBuf::from("<stdout>"),
            message: format!("Failed to serialize run summary: {}", e),
        })?;
        println!("{}", json);
    }

    Ok(())
}

/// Build the sheet described by `args`.
///
/// Returns `None` when the image list is empty. Nothing is written unless at
/// least one image was placed.
pub fn build_sheet(args: &BuildArgs, printer: &Printer) -> Result<Option<RunSummary>> {
    let config = match &args.config {
        Some(path) => SheetConfig::load(path)?,
        None => SheetConfig::default(),
    };
    let background = resolve_background(args, &config)?;
    let builder = SheetBuilder::new(&config, background)?;

    let images = load_image_list(&args.input)?;
    if images.is_empty() {
        printer.warning("Skipping", "no images to process");
        return Ok(None);
    }

    let mut writer = PdfWriter::new(builder.grid());
    let summary = builder.build(&images, &mut writer, printer)?;

    if summary.placed == 0 {
        printer.warning(
            "Skipping",
            &format!(
                "none of {} could be placed, {} not written",
                plural(images.len(), "image", "images"),
                display_path(&args.output)
            ),
        );
        return Ok(Some(summary));
    }

    writer.save(&args.output)?;

    let mut details = vec![
        plural(summary.pages as usize, "page", "pages"),
        plural(summary.placed, "image", "images"),
    ];
    if summary.skipped > 0 {
        details.push(format!("{} missing", summary.skipped));
    }
    if summary.failed > 0 {
        details.push(format!("{} failed", summary.failed));
    }
    printer.success(
        "Finished",
        &format!("{} ({})", display_path(&args.output), details.join(", ")),
    );

    Ok(Some(summary))
}

/// Pick the background fill: `--no-background`, then `--background`, then the
/// config file, then white.
fn resolve_background(args: &BuildArgs, config: &SheetConfig) -> Result<Option<Colour>> {
    if args.no_background {
        return Ok(None);
    }

    match args.background.as_deref().or(config.background.as_deref()) {
        Some(hex) => Colour::from_hex(hex).map(Some),
        None => Ok(Some(Colour::WHITE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::fs;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    fn args(dir: &TempDir) -> BuildArgs {
        // Low DPI keeps resampling cheap
        let config = dir.path().join("sheet.yaml");
        fs::write(&config, "dpi: 20\n").unwrap();

        BuildArgs {
            input: dir.path().join("images.txt"),
            output: dir.path().join("output.pdf"),
            background: None,
            no_background: false,
            config: Some(config),
            json: false,
        }
    }

    fn write_card(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        RgbaImage::from_pixel(10, 14, Rgba([120, 40, 200, 255]))
            .save(&path)
            .unwrap();
        path
    }

    fn write_list(path: &Path, entries: &[(PathBuf, u32)]) {
        let body: String = entries
            .iter()
            .map(|(p, n)| format!("{} {}\n", p.display(), n))
            .collect();
        fs::write(path, body).unwrap();
    }

    fn page_count(path: &Path) -> usize {
        lopdf::Document::load(path).unwrap().get_pages().len()
    }

    #[test]
    fn test_build_writes_pdf() {
        let dir = tempdir().unwrap();
        let args = args(&dir);
        let card = write_card(&dir, "card.png");
        let other = write_card(&dir, "other.png");
        write_list(&args.input, &[(card.clone(), 9), (other.clone(), 1)]);

        let summary = build_sheet(&args, &Printer::new()).unwrap().unwrap();

        assert_eq!(summary.placed, 10);
        assert_eq!(summary.pages, 2);
        assert!(args.output.exists());
        assert_eq!(page_count(&args.output), 2);
    }

    #[test]
    fn test_build_single_page() {
        let dir = tempdir().unwrap();
        let args = BuildArgs {
            no_background: true,
            ..args(&dir)
        };
        let card = write_card(&dir, "card.png");
        write_list(&args.input, &[(card.clone(), 3)]);

        run(args.clone(), &Printer::new()).unwrap();

        assert_eq!(page_count(&args.output), 1);
    }

    #[test]
    fn test_invalid_colour_writes_nothing() {
        let dir = tempdir().unwrap();
        let args = BuildArgs {
            background: Some("#ZZZZZZ".to_string()),
            ..args(&dir)
        };
        let card = write_card(&dir, "card.png");
        write_list(&args.input, &[(card.clone(), 1)]);

        let err = build_sheet(&args, &Printer::new()).unwrap_err();
        assert!(matches!(err, ProxyError::InvalidColour { .. }));
        assert!(!args.output.exists());
    }

    #[test]
    fn test_short_colour_rejected() {
        let dir = tempdir().unwrap();
        let args = BuildArgs {
            background: Some("#FFF".to_string()),
            ..args(&dir)
        };
        let card = write_card(&dir, "card.png");
        write_list(&args.input, &[(card.clone(), 1)]);

        assert!(build_sheet(&args, &Printer::new()).is_err());
        assert!(!args.output.exists());
    }

    #[test]
    fn test_empty_list_writes_nothing() {
        let dir = tempdir().unwrap();
        let args = args(&dir);
        fs::write(&args.input, "\n\n").unwrap();

        let summary = build_sheet(&args, &Printer::new()).unwrap();
        assert!(summary.is_none());
        assert!(!args.output.exists());

        // the command itself still succeeds
        run(args.clone(), &Printer::new()).unwrap();
        assert!(!args.output.exists());
    }

    #[test]
    fn test_missing_list() {
        let dir = tempdir().unwrap();
        let args = args(&dir);

        let err = build_sheet(&args, &Printer::new()).unwrap_err();
        assert!(matches!(err, ProxyError::ManifestNotFound { .. }));
        assert!(!args.output.exists());
    }

    #[test]
    fn test_malformed_list_writes_nothing() {
        let dir = tempdir().unwrap();
        let args = args(&dir);
        fs::write(&args.input, "card.png two\n").unwrap();

        let err = build_sheet(&args, &Printer::new()).unwrap_err();
        assert!(matches!(err, ProxyError::ManifestFormat { line: 1, .. }));
        assert!(!args.output.exists());
    }

    #[test]
    fn test_all_images_missing_writes_nothing() {
        let dir = tempdir().unwrap();
        let args = args(&dir);
        let missing = dir.path().join("gone.png");
        write_list(&args.input, &[(missing.clone(), 2)]);

        let summary = build_sheet(&args, &Printer::new()).unwrap().unwrap();
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.placed, 0);
        assert!(!args.output.exists());
    }

    #[test]
    fn test_missing_images_are_skipped() {
        let dir = tempdir().unwrap();
        let args = args(&dir);
        let card = write_card(&dir, "card.png");
        let missing = dir.path().join("gone.png");
        write_list(&args.input, &[(missing.clone(), 1), (card.clone(), 9)]);

        let summary = build_sheet(&args, &Printer::new()).unwrap().unwrap();
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.placed, 9);
        // the skipped image does not push the last card onto a second page
        assert_eq!(page_count(&args.output), 1);
    }

    #[test]
    fn test_degenerate_config_rejected() {
        let dir = tempdir().unwrap();
        let args = args(&dir);
        fs::write(args.config.as_ref().unwrap(), "cell_width_mm: 500\n").unwrap();
        let card = write_card(&dir, "card.png");
        write_list(&args.input, &[(card.clone(), 1)]);

        let err = build_sheet(&args, &Printer::new()).unwrap_err();
        assert!(matches!(err, ProxyError::Config { .. }));
        assert!(!args.output.exists());
    }

    #[test]
    fn test_resolve_background_precedence() {
        let dir = tempdir().unwrap();
        let base = args(&dir);
        let config = SheetConfig {
            background: Some("#112233".to_string()),
            ..SheetConfig::default()
        };

        // default is white
        assert_eq!(
            resolve_background(&base, &SheetConfig::default()).unwrap(),
            Some(Colour::WHITE)
        );

        // config file value
        assert_eq!(
            resolve_background(&base, &config).unwrap(),
            Some(Colour::rgb(0x11, 0x22, 0x33))
        );

        // CLI overrides config
        let explicit = BuildArgs {
            background: Some("#000000".to_string()),
            ..base.clone()
        };
        assert_eq!(
            resolve_background(&explicit, &config).unwrap(),
            Some(Colour::BLACK)
        );

        // disabled entirely
        let disabled = BuildArgs {
            no_background: true,
            ..base
        };
        assert_eq!(resolve_background(&disabled, &config).unwrap(), None);
    }
}

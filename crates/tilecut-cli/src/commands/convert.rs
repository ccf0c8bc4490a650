use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tilecut_core::io::image_io::image_dimensions;
use tilecut_core::labels::{encode_outlines, label_path_for};
use tilecut_core::navigation::scan_folder;

#[derive(Args)]
pub struct ConvertArgs {
    /// Folder of images the outlines belong to
    pub images: PathBuf,

    /// Folder of pixel outline files (`<image stem><suffix>.txt`)
    pub outlines: PathBuf,

    /// Where label files are written
    #[arg(short, long)]
    pub output: PathBuf,

    /// Class id written on every line
    #[arg(long, default_value_t = 0)]
    pub class: u32,

    /// Suffix between the image stem and `.txt` in outline file names
    #[arg(long, default_value = "_cp_outlines")]
    pub suffix: String,
}

/// Per-image tallies for the summary line.
#[derive(Default)]
struct Totals {
    written: usize,
    instances: usize,
    dropped: usize,
    missing: usize,
}

/// Turn pixel outlines into normalized polygon label files.
pub fn run(args: &ConvertArgs) -> Result<()> {
    let images = scan_folder(&args.images)
        .with_context(|| format!("Failed to scan {}", args.images.display()))?;
    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let pb = ProgressBar::new(images.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Converting [{bar:40}] {pos}/{len}")
            .unwrap()
            .progress_chars("=> "),
    );

    let mut totals = Totals::default();
    for image in &images {
        convert_one(image, args, &mut totals, &pb)?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!(
        "{} label files, {} instances, {} dropped by filters, {} images without outlines",
        style(totals.written).green(),
        totals.instances,
        totals.dropped,
        totals.missing
    );
    Ok(())
}

fn convert_one(image: &Path, args: &ConvertArgs, totals: &mut Totals, pb: &ProgressBar) -> Result<()> {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let outline_path = args.outlines.join(format!("{stem}{}.txt", args.suffix));
    if !outline_path.exists() {
        totals.missing += 1;
        tracing::debug!("No outlines for {}", image.display());
        return Ok(());
    }

    let (w, h) = match image_dimensions(image) {
        Ok(dims) => dims,
        Err(e) => {
            pb.println(format!("{} {}: {e}", style("ERROR").red(), image.display()));
            return Ok(());
        }
    };
    let content = std::fs::read_to_string(&outline_path)
        .with_context(|| format!("Failed to read {}", outline_path.display()))?;
    let encoded = encode_outlines(&content, args.class, w, h);
    for (line, reason) in &encoded.invalid {
        pb.println(format!(
            "{} {}:{line}: {reason}",
            style("ERROR").red(),
            outline_path.display()
        ));
    }

    let label_path = label_path_for(image, &args.output);
    let mut text = encoded.lines.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    std::fs::write(&label_path, text)
        .with_context(|| format!("Failed to write {}", label_path.display()))?;

    totals.written += 1;
    totals.instances += encoded.lines.len();
    totals.dropped += encoded.dropped;
    Ok(())
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tilecut_core::io::image_io::image_dimensions;
use tilecut_core::labels::{label_path_for, read_label_file, GeometryIssue, LabelLayout};
use tilecut_core::navigation::scan_folder;

#[derive(Args)]
pub struct CheckArgs {
    /// Folder of images
    pub images: PathBuf,

    /// Folder of label files (`<image stem>.txt`)
    pub labels: PathBuf,

    /// How the numbers after the class id are read
    #[arg(long, value_enum, default_value_t = Layout::Box)]
    pub layout: Layout,

    /// Also list images that passed
    #[arg(long)]
    pub all: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Layout {
    /// `cx cy bw bh` box, then polygon pairs
    Box,
    /// Polygon pairs only, as written by `convert`
    Polygon,
}

impl From<Layout> for LabelLayout {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Box => LabelLayout::BoxPolygon,
            Layout::Polygon => LabelLayout::Polygon,
        }
    }
}

/// Findings for one image.
#[derive(Default)]
struct ImageReport {
    name: String,
    instances: usize,
    invalid: Vec<(usize, String)>,
    out_of_range: usize,
    /// `(line number, issue)` per geometry problem.
    geometry: Vec<(usize, GeometryIssue)>,
    missing_label: bool,
    unreadable: Option<String>,
}

impl ImageReport {
    fn is_clean(&self) -> bool {
        !self.missing_label
            && self.unreadable.is_none()
            && self.invalid.is_empty()
            && self.out_of_range == 0
            && self.geometry.is_empty()
    }
}

pub fn run(args: &CheckArgs) -> Result<()> {
    let files = scan_folder(&args.images)
        .with_context(|| format!("Failed to scan {}", args.images.display()))?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Checking [{bar:40}] {pos}/{len}")
            .unwrap()
            .progress_chars("=> "),
    );

    let mut reports = Vec::with_capacity(files.len());
    for path in &files {
        reports.push(check_image(path, &args.labels, args.layout.into()));
        pb.inc(1);
    }
    pb.finish_and_clear();

    let mut total_instances = 0;
    let mut problems = 0;
    for report in &reports {
        total_instances += report.instances;
        if report.is_clean() {
            if args.all {
                println!("{} {} ({} instances)", style("ok").green(), report.name, report.instances);
            }
            continue;
        }
        problems += 1;
        print_problems(report);
    }

    println!();
    println!(
        "{} images, {} instances, {} with problems",
        reports.len(),
        total_instances,
        if problems == 0 {
            style(problems.to_string()).green()
        } else {
            style(problems.to_string()).red()
        }
    );
    Ok(())
}

fn check_image(path: &Path, label_dir: &Path, layout: LabelLayout) -> ImageReport {
    let mut report = ImageReport {
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        ..Default::default()
    };

    let label_path = label_path_for(path, label_dir);
    if !label_path.exists() {
        report.missing_label = true;
        return report;
    }

    let (w, h) = match image_dimensions(path) {
        Ok(dims) => dims,
        Err(e) => {
            report.unreadable = Some(e.to_string());
            return report;
        }
    };

    match read_label_file(&label_path) {
        Ok(file) => {
            report.instances = file.labels.len();
            report.out_of_range = file.labels.iter().filter(|l| !l.is_normalized()).count();
            report.invalid = file.invalid;
            for (line, label) in file.lines.iter().zip(&file.labels) {
                for issue in label.geometry_issues(layout, w, h) {
                    report.geometry.push((*line, issue));
                }
            }
        }
        Err(e) => report.unreadable = Some(e.to_string()),
    }
    report
}

fn print_problems(report: &ImageReport) {
    let name = style(&report.name).bold();
    if report.missing_label {
        println!("{} {name}: no label file", style("WARN").yellow());
        return;
    }
    if let Some(ref e) = report.unreadable {
        println!("{} {name}: {e}", style("ERROR").red());
        return;
    }
    for (line, reason) in &report.invalid {
        println!("{} {name}:{line}: {reason}", style("ERROR").red());
    }
    for (line, issue) in &report.geometry {
        println!("{} {name}:{line}: {issue}", style("WARN").yellow());
    }
    if report.out_of_range > 0 {
        println!(
            "{} {name}: {} instance(s) with coordinates outside [0, 1]",
            style("WARN").yellow(),
            report.out_of_range
        );
    }
}

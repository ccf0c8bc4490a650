//! Polygon segmentation labels: one instance per line,
//! `class_id x1 y1 x2 y2 ... xn yn`, coordinates normalized to `[0, 1]`.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::error::{Result, TilecutError};
use crate::geometry::PixelRect;

/// Polygons with fewer vertices are dropped by the exporter.
pub const MIN_POLYGON_VERTICES: usize = 6;
/// Instances whose mask covers fewer pixels are dropped by the exporter.
pub const MIN_MASK_AREA: usize = 10;
/// Class id plus at least five numbers; shorter lines are rejected by the checker.
pub const MIN_CHECK_FIELDS: usize = 11;

/// One parsed label line.
#[derive(Clone, Debug, PartialEq)]
pub struct SegLabel {
    pub class_id: u32,
    /// Flat list of normalized coordinates as they appear on the line.
    pub coords: Vec<f64>,
}

/// Format one instance for the label file, or `None` if the exporter's filters
/// reject it. `vertices` are pixel positions in contour order.
pub fn encode_polygon(
    class_id: u32,
    vertices: &[(f64, f64)],
    mask_area: usize,
    width: u32,
    height: u32,
) -> Option<String> {
    if mask_area < MIN_MASK_AREA || vertices.len() < MIN_POLYGON_VERTICES {
        return None;
    }
    if width == 0 || height == 0 {
        return None;
    }
    let (w, h) = (f64::from(width), f64::from(height));
    let mut line = class_id.to_string();
    for &(x, y) in vertices {
        let _ = write!(line, " {:.6} {:.6}", x / w, y / h);
    }
    Some(line)
}

/// Shoelace area of a closed polygon, in square pixels.
pub fn polygon_area(vertices: &[(f64, f64)]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let (x1, y1) = vertices[i];
            let (x2, y2) = vertices[(i + 1) % n];
            x1 * y2 - x2 * y1
        })
        .sum();
    twice.abs() / 2.0
}

/// Parse one line of a pixel outline file: `x1,y1,x2,y2,...` with commas or
/// whitespace between values. Blank lines yield an empty outline.
pub fn parse_outline(line: &str, line_no: usize) -> Result<Vec<(f64, f64)>> {
    let values = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .map(str::parse::<f64>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| TilecutError::InvalidLabel {
            line: line_no,
            reason: e.to_string(),
        })?;
    if values.len() % 2 != 0 {
        return Err(TilecutError::InvalidLabel {
            line: line_no,
            reason: format!("{} values, expected x,y pairs", values.len()),
        });
    }
    Ok(values.chunks_exact(2).map(|p| (p[0], p[1])).collect())
}

/// Label lines produced from one outline file.
#[derive(Clone, Debug, Default)]
pub struct EncodedLabels {
    pub lines: Vec<String>,
    /// Outlines rejected by the vertex or area filter.
    pub dropped: usize,
    pub invalid: Vec<(usize, String)>,
}

/// Convert every outline in `content` to a label line for a `width x height`
/// image. The mask area filter uses the polygon area.
pub fn encode_outlines(content: &str, class_id: u32, width: u32, height: u32) -> EncodedLabels {
    let mut out = EncodedLabels::default();
    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let vertices = match parse_outline(line, i + 1) {
            Ok(v) => v,
            Err(e) => {
                out.invalid.push((i + 1, e.to_string()));
                continue;
            }
        };
        let area = polygon_area(&vertices).round() as usize;
        match encode_polygon(class_id, &vertices, area, width, height) {
            Some(label) => out.lines.push(label),
            None => out.dropped += 1,
        }
    }
    out
}

/// Parse a line in the checker's layout. `line_no` is only used for errors.
pub fn parse_line(line: &str, line_no: usize) -> Result<SegLabel> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < MIN_CHECK_FIELDS {
        return Err(TilecutError::InvalidLabel {
            line: line_no,
            reason: format!("{} fields, need at least {MIN_CHECK_FIELDS}", fields.len()),
        });
    }

    let numbers = fields
        .iter()
        .map(|f| f.parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| TilecutError::InvalidLabel {
            line: line_no,
            reason: e.to_string(),
        })?;

    let class = numbers[0];
    if class < 0.0 || class.fract() != 0.0 {
        return Err(TilecutError::InvalidLabel {
            line: line_no,
            reason: format!("class id {class} is not a non-negative integer"),
        });
    }

    Ok(SegLabel {
        class_id: class as u32,
        coords: numbers[1..].to_vec(),
    })
}

/// How the numbers after the class id are read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabelLayout {
    /// `cx cy bw bh` box followed by polygon pairs, as the checker draws it.
    #[default]
    BoxPolygon,
    /// Polygon pairs only, as `encode_polygon` writes them.
    Polygon,
}

/// Geometry problem found on a parsed line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryIssue {
    /// Box with zero or negative width or height.
    DegenerateBox,
    BoxOutside,
    /// Fewer than three polygon vertices.
    ShortPolygon,
    PolygonOutside,
}

impl std::fmt::Display for GeometryIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DegenerateBox => write!(f, "degenerate box"),
            Self::BoxOutside => write!(f, "box outside image"),
            Self::ShortPolygon => write!(f, "polygon with fewer than 3 vertices"),
            Self::PolygonOutside => write!(f, "polygon outside image"),
        }
    }
}

impl SegLabel {
    /// Box the checker draws: the first four coordinates read as
    /// `cx, cy, bw, bh`, scaled to pixels and truncated.
    pub fn checker_bbox(&self, width: u32, height: u32) -> Option<PixelRect> {
        let (w, h) = (f64::from(width), f64::from(height));
        let &[cx, cy, bw, bh] = self.coords.get(..4)? else {
            return None;
        };
        Some(PixelRect::new(
            ((cx - bw / 2.0) * w) as i64,
            ((cy - bh / 2.0) * h) as i64,
            ((cx + bw / 2.0) * w) as i64,
            ((cy + bh / 2.0) * h) as i64,
        ))
    }

    /// Polygon the checker outlines: pairs after the first four coordinates,
    /// scaled to pixels. A trailing unpaired value is ignored.
    pub fn polygon_pixels(&self, width: u32, height: u32) -> Vec<(i64, i64)> {
        let (w, h) = (f64::from(width), f64::from(height));
        self.coords
            .get(4..)
            .unwrap_or_default()
            .chunks_exact(2)
            .map(|p| ((p[0] * w) as i64, (p[1] * h) as i64))
            .collect()
    }

    /// Tight bounds of every coordinate pair on the line, in pixels.
    pub fn polygon_bounds(&self, width: u32, height: u32) -> Option<PixelRect> {
        let (w, h) = (f64::from(width), f64::from(height));
        let mut pairs = self.coords.chunks_exact(2);
        let first = pairs.next()?;
        let (mut x1, mut y1) = (first[0], first[1]);
        let (mut x2, mut y2) = (x1, y1);
        for p in pairs {
            x1 = x1.min(p[0]);
            y1 = y1.min(p[1]);
            x2 = x2.max(p[0]);
            y2 = y2.max(p[1]);
        }
        Some(PixelRect::new(
            (x1 * w).floor() as i64,
            (y1 * h).floor() as i64,
            (x2 * w).ceil() as i64,
            (y2 * h).ceil() as i64,
        ))
    }

    /// True when every coordinate lies in `[0, 1]`.
    pub fn is_normalized(&self) -> bool {
        self.coords.iter().all(|c| (0.0..=1.0).contains(c))
    }

    /// Everything wrong with this line's geometry on a `width x height` image.
    pub fn geometry_issues(&self, layout: LabelLayout, width: u32, height: u32) -> Vec<GeometryIssue> {
        let mut issues = Vec::new();
        match layout {
            LabelLayout::BoxPolygon => {
                match self.checker_bbox(width, height) {
                    Some(b) if b.width() <= 0 || b.height() <= 0 => {
                        issues.push(GeometryIssue::DegenerateBox)
                    }
                    Some(b) if !b.is_within(width, height) => issues.push(GeometryIssue::BoxOutside),
                    Some(_) => {}
                    None => issues.push(GeometryIssue::DegenerateBox),
                }
                let poly = self.polygon_pixels(width, height);
                if poly.len() < 3 {
                    issues.push(GeometryIssue::ShortPolygon);
                }
                let (w, h) = (i64::from(width), i64::from(height));
                if poly
                    .iter()
                    .any(|&(x, y)| x < 0 || y < 0 || x > w || y > h)
                {
                    issues.push(GeometryIssue::PolygonOutside);
                }
            }
            LabelLayout::Polygon => {
                if self.coords.len() / 2 < 3 {
                    issues.push(GeometryIssue::ShortPolygon);
                }
                if self
                    .polygon_bounds(width, height)
                    .is_some_and(|b| !b.is_within(width, height))
                {
                    issues.push(GeometryIssue::PolygonOutside);
                }
            }
        }
        issues
    }
}

/// Parsed contents of one label file.
#[derive(Clone, Debug, Default)]
pub struct LabelFile {
    pub labels: Vec<SegLabel>,
    /// Line number of each entry in `labels`.
    pub lines: Vec<usize>,
    /// `(line number, reason)` for every line that failed to parse.
    pub invalid: Vec<(usize, String)>,
}

/// Read a label file, collecting bad lines instead of failing on them.
pub fn read_label_file(path: &Path) -> Result<LabelFile> {
    let content = std::fs::read_to_string(path)?;
    let mut file = LabelFile::default();
    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line, i + 1) {
            Ok(label) => {
                file.labels.push(label);
                file.lines.push(i + 1);
            }
            Err(e) => file.invalid.push((i + 1, e.to_string())),
        }
    }
    Ok(file)
}

/// `<label_dir>/<image stem>.txt`
pub fn label_path_for(image: &Path, label_dir: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    label_dir.join(format!("{stem}.txt"))
}

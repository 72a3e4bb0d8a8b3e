//! Table extraction from ruling lines (lattice mode algorithm).
//!
//! Inspired by pdfplumber's lattice strategy: factsheet tables are drawn
//! with explicit cell borders, so the grid is recovered from horizontal
//! and vertical line segments in the page's vector graphics, and the cell
//! text is filled in from the positioned spans.

use lopdf::{Document as LopdfDocument, Object};

use crate::error::{Error, Result};

use super::spans::{get_page_content, SpanExtractor, TextSpan};

/// One axis-aligned ruling segment in device space.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Ruling {
    Horizontal { y: f32, x0: f32, x1: f32 },
    Vertical { x: f32, y0: f32, y1: f32 },
}

/// Table extractor configuration.
#[derive(Debug, Clone)]
pub struct TableExtractorConfig {
    /// Boundary positions closer than this (points) snap to one grid line
    pub snap_tolerance: f32,
    /// Extra reach (points) when testing whether two rulings touch
    pub join_tolerance: f32,
    /// Segments shorter than this (points) are decoration, not rulings
    pub min_line_length: f32,
    /// Maximum axis deviation (points) for a segment to count as a ruling
    pub max_skew: f32,
    /// Minimum cell rows for a grid to count as a table
    pub min_rows: usize,
    /// Minimum cell columns for a grid to count as a table
    pub min_columns: usize,
}

impl Default for TableExtractorConfig {
    fn default() -> Self {
        Self {
            snap_tolerance: 3.0,
            join_tolerance: 3.0,
            min_line_length: 4.0,
            max_skew: 1.0,
            min_rows: 2,
            min_columns: 2,
        }
    }
}

/// Extracts ruled tables from document pages as 2-D cell grids.
pub(crate) struct TableExtractor<'a> {
    doc: &'a LopdfDocument,
    config: TableExtractorConfig,
}

impl<'a> TableExtractor<'a> {
    /// Create a new table extractor with default configuration.
    pub fn new(doc: &'a LopdfDocument) -> Self {
        Self {
            doc,
            config: TableExtractorConfig::default(),
        }
    }

    /// Create a new table extractor with custom configuration.
    pub fn with_config(doc: &'a LopdfDocument, config: TableExtractorConfig) -> Self {
        Self { doc, config }
    }

    /// Extract every ruled table on a page, top to bottom. Each table is a
    /// row-major grid of cell strings; cells without text are empty.
    pub fn extract_page_tables(&self, page_num: u32) -> Result<Vec<Vec<Vec<String>>>> {
        let pages = self.doc.get_pages();
        let page_id = pages
            .get(&page_num)
            .copied()
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))?;

        let content = get_page_content(self.doc, page_id).map_err(|e| Error::TableExtract {
            page: page_num,
            reason: e.to_string(),
        })?;

        let rulings = self.collect_rulings(page_num, &content)?;
        log::debug!("Page {}: {} ruling segments", page_num, rulings.len());
        if rulings.is_empty() {
            return Ok(Vec::new());
        }

        let groups = group_connected(&rulings, self.config.join_tolerance);
        let mut grids: Vec<Grid> = groups
            .iter()
            .filter_map(|group| self.build_grid(group))
            .collect();
        grids.sort_by(|a, b| {
            b.top()
                .partial_cmp(&a.top())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        log::debug!(
            "Page {}: {} table grids from {} ruling groups",
            page_num,
            grids.len(),
            groups.len()
        );
        if grids.is_empty() {
            return Ok(Vec::new());
        }

        let spans = SpanExtractor::new(self.doc).extract_page_spans(page_num)?;
        Ok(grids
            .iter()
            .map(|grid| self.fill_cells(grid, &spans))
            .collect())
    }

    /// Walk the graphics operators of one content stream, collecting the
    /// painted axis-aligned segments.
    fn collect_rulings(&self, page_num: u32, content: &[u8]) -> Result<Vec<Ruling>> {
        let content = lopdf::content::Content::decode(content).map_err(|e| Error::TableExtract {
            page: page_num,
            reason: e.to_string(),
        })?;

        let mut rulings = Vec::new();
        // Device-space segments of the path under construction
        let mut pending: Vec<(f32, f32, f32, f32)> = Vec::new();
        let mut ctm = TransformMatrix::default();
        let mut ctm_stack: Vec<TransformMatrix> = Vec::new();
        let mut current: Option<(f32, f32)> = None;
        let mut subpath_start: Option<(f32, f32)> = None;

        for op in content.operations {
            match op.operator.as_str() {
                "q" => {
                    ctm_stack.push(ctm);
                }
                "Q" => {
                    if let Some(prev) = ctm_stack.pop() {
                        ctm = prev;
                    }
                }
                "cm" => {
                    if op.operands.len() >= 6 {
                        ctm.concat([
                            get_number(&op.operands[0]).unwrap_or(1.0),
                            get_number(&op.operands[1]).unwrap_or(0.0),
                            get_number(&op.operands[2]).unwrap_or(0.0),
                            get_number(&op.operands[3]).unwrap_or(1.0),
                            get_number(&op.operands[4]).unwrap_or(0.0),
                            get_number(&op.operands[5]).unwrap_or(0.0),
                        ]);
                    }
                }
                "m" => {
                    if op.operands.len() >= 2 {
                        let p = ctm.apply(
                            get_number(&op.operands[0]).unwrap_or(0.0),
                            get_number(&op.operands[1]).unwrap_or(0.0),
                        );
                        current = Some(p);
                        subpath_start = Some(p);
                    }
                }
                "l" => {
                    if op.operands.len() >= 2 {
                        let p = ctm.apply(
                            get_number(&op.operands[0]).unwrap_or(0.0),
                            get_number(&op.operands[1]).unwrap_or(0.0),
                        );
                        if let Some(from) = current {
                            pending.push((from.0, from.1, p.0, p.1));
                        }
                        current = Some(p);
                    }
                }
                // Curves are never rulings, but they move the current point
                "c" => {
                    if op.operands.len() >= 6 {
                        current = Some(ctm.apply(
                            get_number(&op.operands[4]).unwrap_or(0.0),
                            get_number(&op.operands[5]).unwrap_or(0.0),
                        ));
                    }
                }
                "v" | "y" => {
                    if op.operands.len() >= 4 {
                        current = Some(ctm.apply(
                            get_number(&op.operands[2]).unwrap_or(0.0),
                            get_number(&op.operands[3]).unwrap_or(0.0),
                        ));
                    }
                }
                "h" => {
                    if let (Some(from), Some(start)) = (current, subpath_start) {
                        pending.push((from.0, from.1, start.0, start.1));
                        current = Some(start);
                    }
                }
                "re" => {
                    if op.operands.len() >= 4 {
                        let x = get_number(&op.operands[0]).unwrap_or(0.0);
                        let y = get_number(&op.operands[1]).unwrap_or(0.0);
                        let w = get_number(&op.operands[2]).unwrap_or(0.0);
                        let h = get_number(&op.operands[3]).unwrap_or(0.0);

                        let p0 = ctm.apply(x, y);
                        let p1 = ctm.apply(x + w, y);
                        let p2 = ctm.apply(x + w, y + h);
                        let p3 = ctm.apply(x, y + h);
                        pending.push((p0.0, p0.1, p1.0, p1.1));
                        pending.push((p1.0, p1.1, p2.0, p2.1));
                        pending.push((p2.0, p2.1, p3.0, p3.1));
                        pending.push((p3.0, p3.1, p0.0, p0.1));

                        current = Some(p0);
                        subpath_start = Some(p0);
                    }
                }
                "S" | "s" | "f" | "F" | "f*" | "B" | "B*" | "b" | "b*" => {
                    if matches!(op.operator.as_str(), "s" | "b" | "b*") {
                        if let (Some(from), Some(start)) = (current, subpath_start) {
                            pending.push((from.0, from.1, start.0, start.1));
                        }
                    }
                    for segment in pending.drain(..) {
                        if let Some(ruling) = self.classify_segment(segment) {
                            rulings.push(ruling);
                        }
                    }
                    current = None;
                    subpath_start = None;
                }
                // End path without painting (clipping boundaries and the like)
                "n" => {
                    pending.clear();
                    current = None;
                    subpath_start = None;
                }
                _ => {}
            }
        }

        Ok(rulings)
    }

    /// Classify a device-space segment as a horizontal or vertical ruling,
    /// dropping diagonals and segments too short to be cell borders.
    fn classify_segment(&self, (x0, y0, x1, y1): (f32, f32, f32, f32)) -> Option<Ruling> {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();

        if dy <= self.config.max_skew && dx >= self.config.min_line_length {
            Some(Ruling::Horizontal {
                y: (y0 + y1) / 2.0,
                x0: x0.min(x1),
                x1: x0.max(x1),
            })
        } else if dx <= self.config.max_skew && dy >= self.config.min_line_length {
            Some(Ruling::Vertical {
                x: (x0 + x1) / 2.0,
                y0: y0.min(y1),
                y1: y0.max(y1),
            })
        } else {
            None
        }
    }

    /// Build cell boundaries from one connected ruling group. Returns None
    /// when the grid is smaller than the configured minimum.
    fn build_grid(&self, group: &[Ruling]) -> Option<Grid> {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for ruling in group {
            match ruling {
                Ruling::Horizontal { y, .. } => ys.push(*y),
                Ruling::Vertical { x, .. } => xs.push(*x),
            }
        }

        let xs = cluster_positions(xs, self.config.snap_tolerance);
        let mut ys = cluster_positions(ys, self.config.snap_tolerance);
        // Top row first
        ys.reverse();

        let rows = ys.len().saturating_sub(1);
        let cols = xs.len().saturating_sub(1);
        if rows < self.config.min_rows || cols < self.config.min_columns {
            return None;
        }
        Some(Grid { xs, ys })
    }

    /// Fill a grid's cells from the page spans. Spans arrive in reading
    /// order; lines stacked within one cell are separated by newlines.
    fn fill_cells(&self, grid: &Grid, spans: &[TextSpan]) -> Vec<Vec<String>> {
        let mut cells = vec![vec![String::new(); grid.cols()]; grid.rows()];
        let mut last_y = vec![vec![None::<f32>; grid.cols()]; grid.rows()];

        for span in spans {
            if let Some((row, col)) = grid.locate(span.x, span.y) {
                let text = span.text.trim();
                if text.is_empty() {
                    continue;
                }
                let cell = &mut cells[row][col];
                match last_y[row][col] {
                    Some(y) => {
                        if (span.y - y).abs() > span.font_size * 0.3 {
                            cell.push('\n');
                        } else {
                            cell.push(' ');
                        }
                    }
                    None => {}
                }
                cell.push_str(text);
                last_y[row][col] = Some(span.y);
            }
        }

        cells
    }
}

/// Cell boundaries of one recovered table: column edges ascending, row
/// edges top to bottom.
#[derive(Debug, Clone)]
struct Grid {
    xs: Vec<f32>,
    ys: Vec<f32>,
}

impl Grid {
    fn rows(&self) -> usize {
        self.ys.len().saturating_sub(1)
    }

    fn cols(&self) -> usize {
        self.xs.len().saturating_sub(1)
    }

    fn top(&self) -> f32 {
        self.ys.first().copied().unwrap_or(0.0)
    }

    /// Locate the cell containing a point, if any.
    fn locate(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let col = self.xs.windows(2).position(|w| x >= w[0] && x <= w[1])?;
        let row = self.ys.windows(2).position(|w| y <= w[0] && y >= w[1])?;
        Some((row, col))
    }
}

/// 2-D affine transform tracked through the cm/q/Q operators.
#[derive(Debug, Clone, Copy)]
struct TransformMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TransformMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TransformMatrix {
    /// Premultiply by the cm operand matrix.
    fn concat(&mut self, [a, b, c, d, e, f]: [f32; 6]) {
        *self = Self {
            a: a * self.a + b * self.c,
            b: a * self.b + b * self.d,
            c: c * self.a + d * self.c,
            d: c * self.b + d * self.d,
            e: e * self.a + f * self.c + self.e,
            f: e * self.b + f * self.d + self.f,
        };
    }

    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.a + y * self.c + self.e,
            x * self.b + y * self.d + self.f,
        )
    }
}

/// Group rulings into connected components. Rulings that cross, or that
/// continue each other across a hairline gap, frame the same table.
fn group_connected(rulings: &[Ruling], tolerance: f32) -> Vec<Vec<Ruling>> {
    let mut assigned = vec![false; rulings.len()];
    let mut groups = Vec::new();

    for start in 0..rulings.len() {
        if assigned[start] {
            continue;
        }
        assigned[start] = true;
        let mut stack = vec![start];
        let mut group = Vec::new();

        while let Some(i) = stack.pop() {
            group.push(rulings[i]);
            for j in 0..rulings.len() {
                if !assigned[j] && rulings_touch(rulings[i], rulings[j], tolerance) {
                    assigned[j] = true;
                    stack.push(j);
                }
            }
        }
        groups.push(group);
    }

    groups
}

fn rulings_touch(a: Ruling, b: Ruling, tolerance: f32) -> bool {
    match (a, b) {
        (Ruling::Horizontal { y, x0, x1 }, Ruling::Vertical { x, y0, y1 })
        | (Ruling::Vertical { x, y0, y1 }, Ruling::Horizontal { y, x0, x1 }) => {
            x >= x0 - tolerance && x <= x1 + tolerance && y >= y0 - tolerance && y <= y1 + tolerance
        }
        (
            Ruling::Horizontal { y: ya, x0: a0, x1: a1 },
            Ruling::Horizontal { y: yb, x0: b0, x1: b1 },
        ) => (ya - yb).abs() <= tolerance && a0 - tolerance <= b1 && b0 <= a1 + tolerance,
        (
            Ruling::Vertical { x: xa, y0: a0, y1: a1 },
            Ruling::Vertical { x: xb, y0: b0, y1: b1 },
        ) => (xa - xb).abs() <= tolerance && a0 - tolerance <= b1 && b0 <= a1 + tolerance,
    }
}

/// Collapse positions within `tolerance` of each other into their mean,
/// returning cluster centers in ascending order.
fn cluster_positions(mut values: Vec<f32>, tolerance: f32) -> Vec<f32> {
    if values.is_empty() {
        return values;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut centers = Vec::new();
    let mut cluster: Vec<f32> = Vec::new();
    for value in values {
        if let Some(&last) = cluster.last() {
            if value - last > tolerance {
                centers.push(mean(&cluster));
                cluster.clear();
            }
        }
        cluster.push(value);
    }
    centers.push(mean(&cluster));

    centers
}

fn mean(values: &[f32]) -> f32 {
    values.iter().sum::<f32>() / values.len() as f32
}

/// Helper to extract a number from a PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};

    fn make_span(text: &str, x: f32, y: f32) -> TextSpan {
        TextSpan {
            text: text.to_string(),
            x,
            y,
            font_size: 10.0,
        }
    }

    fn collect(operations: Vec<Operation>) -> Vec<Ruling> {
        let doc = LopdfDocument::with_version("1.5");
        let extractor = TableExtractor::new(&doc);
        let content = Content { operations }.encode().unwrap();
        extractor.collect_rulings(1, &content).unwrap()
    }

    fn horizontal_count(rulings: &[Ruling]) -> usize {
        rulings
            .iter()
            .filter(|r| matches!(r, Ruling::Horizontal { .. }))
            .count()
    }

    fn vertical_count(rulings: &[Ruling]) -> usize {
        rulings
            .iter()
            .filter(|r| matches!(r, Ruling::Vertical { .. }))
            .count()
    }

    #[test]
    fn test_cluster_positions_snaps_jitter() {
        let centers = cluster_positions(vec![100.8, 100.0, 201.2, 200.0, 300.0], 3.0);
        assert_eq!(centers.len(), 3);
        assert!((centers[0] - 100.4).abs() < 0.01);
        assert!((centers[1] - 200.6).abs() < 0.01);
        assert!((centers[2] - 300.0).abs() < 0.01);
    }

    #[test]
    fn test_cluster_positions_empty() {
        assert!(cluster_positions(Vec::new(), 3.0).is_empty());
    }

    #[test]
    fn test_rulings_touch_crossing() {
        let h = Ruling::Horizontal {
            y: 100.0,
            x0: 0.0,
            x1: 200.0,
        };
        let v = Ruling::Vertical {
            x: 50.0,
            y0: 50.0,
            y1: 150.0,
        };
        assert!(rulings_touch(h, v, 3.0));
        assert!(rulings_touch(v, h, 3.0));

        let far = Ruling::Vertical {
            x: 300.0,
            y0: 50.0,
            y1: 150.0,
        };
        assert!(!rulings_touch(h, far, 3.0));
    }

    #[test]
    fn test_rulings_touch_collinear_gap() {
        let left = Ruling::Horizontal {
            y: 100.0,
            x0: 0.0,
            x1: 100.0,
        };
        let right = Ruling::Horizontal {
            y: 100.5,
            x0: 102.0,
            x1: 200.0,
        };
        assert!(rulings_touch(left, right, 3.0));

        let detached = Ruling::Horizontal {
            y: 100.0,
            x0: 110.0,
            x1: 200.0,
        };
        assert!(!rulings_touch(left, detached, 3.0));
    }

    #[test]
    fn test_collect_rulings_from_rect() {
        let rulings = collect(vec![
            Operation::new(
                "re",
                vec![50.into(), 500.into(), 200.into(), 100.into()],
            ),
            Operation::new("S", vec![]),
        ]);

        assert_eq!(rulings.len(), 4);
        assert_eq!(horizontal_count(&rulings), 2);
        assert_eq!(vertical_count(&rulings), 2);
    }

    #[test]
    fn test_collect_rulings_thin_filled_rect_is_one_direction() {
        // A 1pt-high filled bar reads as a horizontal rule; its short
        // vertical edges fall below the minimum length
        let rulings = collect(vec![
            Operation::new("re", vec![50.into(), 500.into(), 200.into(), 1.into()]),
            Operation::new("f", vec![]),
        ]);

        assert_eq!(horizontal_count(&rulings), 2);
        assert_eq!(vertical_count(&rulings), 0);
    }

    #[test]
    fn test_collect_rulings_applies_ctm() {
        let rulings = collect(vec![
            Operation::new(
                "cm",
                vec![2.into(), 0.into(), 0.into(), 2.into(), 0.into(), 0.into()],
            ),
            Operation::new("m", vec![0.into(), 0.into()]),
            Operation::new("l", vec![100.into(), 0.into()]),
            Operation::new("S", vec![]),
        ]);

        assert_eq!(
            rulings,
            vec![Ruling::Horizontal {
                y: 0.0,
                x0: 0.0,
                x1: 200.0
            }]
        );
    }

    #[test]
    fn test_collect_rulings_q_restores_ctm() {
        let rulings = collect(vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![2.into(), 0.into(), 0.into(), 2.into(), 0.into(), 0.into()],
            ),
            Operation::new("Q", vec![]),
            Operation::new("m", vec![0.into(), 0.into()]),
            Operation::new("l", vec![100.into(), 0.into()]),
            Operation::new("S", vec![]),
        ]);

        assert_eq!(
            rulings,
            vec![Ruling::Horizontal {
                y: 0.0,
                x0: 0.0,
                x1: 100.0
            }]
        );
    }

    #[test]
    fn test_collect_rulings_discards_unpainted_paths() {
        // `W n` clip boundaries never paint, so they are not rulings
        let rulings = collect(vec![
            Operation::new("re", vec![0.into(), 0.into(), 400.into(), 400.into()]),
            Operation::new("W", vec![]),
            Operation::new("n", vec![]),
        ]);
        assert!(rulings.is_empty());
    }

    #[test]
    fn test_collect_rulings_close_path_drops_diagonal() {
        let rulings = collect(vec![
            Operation::new("m", vec![0.into(), 0.into()]),
            Operation::new("l", vec![100.into(), 0.into()]),
            Operation::new("l", vec![100.into(), 50.into()]),
            Operation::new("h", vec![]),
            Operation::new("S", vec![]),
        ]);

        // The closing edge runs diagonally back to the origin
        assert_eq!(rulings.len(), 2);
        assert_eq!(horizontal_count(&rulings), 1);
        assert_eq!(vertical_count(&rulings), 1);
    }

    #[test]
    fn test_build_grid_requires_min_cells() {
        let doc = LopdfDocument::with_version("1.5");
        let extractor = TableExtractor::new(&doc);

        let full = vec![
            Ruling::Horizontal { y: 600.0, x0: 50.0, x1: 250.0 },
            Ruling::Horizontal { y: 550.0, x0: 50.0, x1: 250.0 },
            Ruling::Horizontal { y: 500.0, x0: 50.0, x1: 250.0 },
            Ruling::Vertical { x: 50.0, y0: 500.0, y1: 600.0 },
            Ruling::Vertical { x: 150.0, y0: 500.0, y1: 600.0 },
            Ruling::Vertical { x: 250.0, y0: 500.0, y1: 600.0 },
        ];
        let grid = extractor.build_grid(&full).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.ys, vec![600.0, 550.0, 500.0]);

        // One row of cells is below the minimum
        let short = &full[1..];
        assert!(extractor.build_grid(short).is_none());
    }

    #[test]
    fn test_grid_locate() {
        let grid = Grid {
            xs: vec![50.0, 150.0, 250.0],
            ys: vec![600.0, 550.0, 500.0],
        };

        assert_eq!(grid.locate(100.0, 575.0), Some((0, 0)));
        assert_eq!(grid.locate(200.0, 525.0), Some((1, 1)));
        assert_eq!(grid.locate(300.0, 575.0), None);
        assert_eq!(grid.locate(100.0, 450.0), None);
    }

    #[test]
    fn test_fill_cells_assigns_by_position() {
        let doc = LopdfDocument::with_version("1.5");
        let extractor = TableExtractor::new(&doc);
        let grid = Grid {
            xs: vec![50.0, 150.0, 250.0],
            ys: vec![600.0, 550.0, 500.0],
        };

        let spans = vec![
            make_span("Fund", 60.0, 580.0),
            make_span("Size", 160.0, 580.0),
            make_span("ABC Fund", 60.0, 520.0),
            make_span("1,234", 160.0, 520.0),
            make_span("outside", 300.0, 580.0),
        ];

        let cells = extractor.fill_cells(&grid, &spans);
        assert_eq!(
            cells,
            vec![
                vec!["Fund".to_string(), "Size".to_string()],
                vec!["ABC Fund".to_string(), "1,234".to_string()],
            ]
        );
    }

    #[test]
    fn test_fill_cells_joins_lines_within_cell() {
        let doc = LopdfDocument::with_version("1.5");
        let extractor = TableExtractor::new(&doc);
        let grid = Grid {
            xs: vec![50.0, 150.0],
            ys: vec![600.0, 500.0, 400.0],
        };

        // Two lines in the top cell, two pieces of one line in the bottom
        let spans = vec![
            make_span("Net asset", 60.0, 580.0),
            make_span("value", 60.0, 560.0),
            make_span("12.5", 60.0, 450.0),
            make_span("crore", 90.0, 450.0),
        ];

        let cells = extractor.fill_cells(&grid, &spans);
        assert_eq!(cells[0][0], "Net asset\nvalue");
        assert_eq!(cells[1][0], "12.5 crore");
    }

    #[test]
    fn test_empty_cells_stay_empty() {
        let doc = LopdfDocument::with_version("1.5");
        let extractor = TableExtractor::new(&doc);
        let grid = Grid {
            xs: vec![50.0, 150.0, 250.0],
            ys: vec![600.0, 550.0, 500.0],
        };

        let spans = vec![make_span("only", 60.0, 580.0)];
        let cells = extractor.fill_cells(&grid, &spans);
        assert_eq!(cells[0][1], "");
        assert_eq!(cells[1][0], "");
        assert_eq!(cells[1][1], "");
    }

    #[test]
    fn test_grids_recovered_from_stroked_frame() {
        // A 2x2 ruled box drawn as individual line strokes
        let mut operations = Vec::new();
        for y in [500, 550, 600] {
            operations.push(Operation::new("m", vec![50.into(), y.into()]));
            operations.push(Operation::new("l", vec![250.into(), y.into()]));
        }
        for x in [50, 150, 250] {
            operations.push(Operation::new("m", vec![x.into(), 500.into()]));
            operations.push(Operation::new("l", vec![x.into(), 600.into()]));
        }
        operations.push(Operation::new("S", vec![]));

        let rulings = collect(operations);
        assert_eq!(rulings.len(), 6);

        let doc = LopdfDocument::with_version("1.5");
        let extractor = TableExtractor::new(&doc);
        let groups = group_connected(&rulings, 3.0);
        assert_eq!(groups.len(), 1);

        let grid = extractor.build_grid(&groups[0]).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 2);
    }

    #[test]
    fn test_separate_frames_form_separate_groups() {
        let mut operations = Vec::new();
        // Upper frame
        operations.push(Operation::new(
            "re",
            vec![50.into(), 600.into(), 200.into(), 100.into()],
        ));
        // Lower frame, well clear of the first
        operations.push(Operation::new(
            "re",
            vec![50.into(), 100.into(), 200.into(), 100.into()],
        ));
        operations.push(Operation::new("S", vec![]));

        let rulings = collect(operations);
        let groups = group_connected(&rulings, 3.0);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_custom_config_accepts_single_row() {
        let doc = LopdfDocument::with_version("1.5");
        let config = TableExtractorConfig {
            min_rows: 1,
            ..Default::default()
        };
        let extractor = TableExtractor::with_config(&doc, config);

        let rulings = vec![
            Ruling::Horizontal { y: 600.0, x0: 50.0, x1: 250.0 },
            Ruling::Horizontal { y: 550.0, x0: 50.0, x1: 250.0 },
            Ruling::Vertical { x: 50.0, y0: 550.0, y1: 600.0 },
            Ruling::Vertical { x: 150.0, y0: 550.0, y1: 600.0 },
            Ruling::Vertical { x: 250.0, y0: 550.0, y1: 600.0 },
        ];
        let grid = extractor.build_grid(&rulings).unwrap();
        assert_eq!(grid.rows(), 1);
        assert_eq!(grid.cols(), 2);
    }
}

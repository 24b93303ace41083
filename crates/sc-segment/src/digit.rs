use sc_core::frame::DigitGrid;
use sc_core::geometry::FrameGeometry;

use crate::segments::{SEGMENT_PATTERNS, Segment, SegmentPattern};

/// Glyphe des barres horizontales (top, middle, bottom).
pub const HORIZONTAL_GLYPH: char = '_';
/// Glyphe des barres verticales.
pub const VERTICAL_GLYPH: char = '|';

/// Dessine un chiffre en 7 segments.
///
/// La grille fait `2 * seg_size + 1` lignes × `2 * seg_size + 2` colonnes.
/// Les passes horizontale et verticale écrivent des cellules disjointes et
/// tournent en fork-join sur le pool rayon ; la grille n'est rendue qu'une
/// fois les deux passes terminées.
///
/// # Panics
/// Panics if `value > 9` or `seg_size == 0`. Both are always derived from the
/// clock and the validated config, so a bad value is a bug in the caller.
///
/// # Example
/// ```
/// use sc_segment::digit::render_digit;
/// let grid = render_digit(0, 1);
/// assert_eq!(grid.lines(), vec![" __ ", "|  |", "|__|"]);
/// ```
#[must_use]
pub fn render_digit(value: u8, seg_size: usize) -> DigitGrid {
    render(value, seg_size, true)
}

/// Same output as [`render_digit`], both passes on the calling thread.
///
/// # Panics
/// Panics if `value > 9` or `seg_size == 0`.
#[must_use]
pub fn render_digit_sequential(value: u8, seg_size: usize) -> DigitGrid {
    render(value, seg_size, false)
}

fn render(value: u8, seg_size: usize, parallel: bool) -> DigitGrid {
    assert!(value <= 9, "digit out of range: {value}");
    assert!(seg_size >= 1, "segment size must be at least 1");

    let pattern = SEGMENT_PATTERNS[usize::from(value)];
    let geometry = FrameGeometry::new(seg_size);
    let mut grid = DigitGrid::new(geometry.cols, geometry.rows);

    {
        let (mut bars, mut edges) = split_regions(&mut grid.cells, geometry.cols);
        if parallel {
            rayon::join(
                || paint_horizontal(&mut bars, pattern, seg_size),
                || paint_vertical(&mut edges, pattern, seg_size),
            );
        } else {
            paint_horizontal(&mut bars, pattern, seg_size);
            paint_vertical(&mut edges, pattern, seg_size);
        }
    }

    grid
}

type Edges<'a> = Vec<(&'a mut char, &'a mut char)>;

/// Découpe chaque ligne en intérieur (colonnes `1..cols-1`) et bords (colonnes 0 et `cols-1`).
fn split_regions(cells: &mut [char], cols: usize) -> (Vec<&mut [char]>, Edges<'_>) {
    let rows = cells.len() / cols;
    let mut interiors = Vec::with_capacity(rows);
    let mut edges = Vec::with_capacity(rows);
    for row in cells.chunks_exact_mut(cols) {
        if let Some((left, rest)) = row.split_first_mut()
            && let Some((right, interior)) = rest.split_last_mut()
        {
            interiors.push(interior);
            edges.push((left, right));
        }
    }
    (interiors, edges)
}

/// Barres horizontales sur les lignes `0`, `seg_size` et `2 * seg_size`.
fn paint_horizontal(interiors: &mut [&mut [char]], pattern: SegmentPattern, seg_size: usize) {
    for (i, segment) in Segment::HORIZONTAL.into_iter().enumerate() {
        if !pattern.is_lit(segment) {
            continue;
        }
        if let Some(row) = interiors.get_mut(i * seg_size) {
            row.fill(HORIZONTAL_GLYPH);
        }
    }
}

/// Barres verticales : `seg_size` lignes à partir de 1 (moitié haute) ou `1 + seg_size` (moitié basse).
fn paint_vertical(edges: &mut [(&mut char, &mut char)], pattern: SegmentPattern, seg_size: usize) {
    for segment in Segment::VERTICAL {
        if !pattern.is_lit(segment) {
            continue;
        }
        let first_row = match segment {
            Segment::UpperLeft | Segment::UpperRight => 1,
            _ => 1 + seg_size,
        };
        let left = matches!(segment, Segment::UpperLeft | Segment::LowerLeft);
        for (l, r) in edges.iter_mut().skip(first_row).take(seg_size) {
            if left {
                **l = VERTICAL_GLYPH;
            } else {
                **r = VERTICAL_GLYPH;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Glyphe attendu en `(x, y)`, calculé directement depuis la table.
    fn expected_cell(value: u8, seg_size: usize, x: usize, y: usize) -> char {
        let p = SEGMENT_PATTERNS[usize::from(value)];
        let cols = 2 * seg_size + 2;
        let upper = (1..=seg_size).contains(&y);
        let lower = (seg_size + 1..=2 * seg_size).contains(&y);
        if x > 0 && x < cols - 1 {
            let lit = (y == 0 && p.is_lit(Segment::Top))
                || (y == seg_size && p.is_lit(Segment::Middle))
                || (y == 2 * seg_size && p.is_lit(Segment::Bottom));
            return if lit { '_' } else { ' ' };
        }
        let (up, down) = if x == 0 {
            (Segment::UpperLeft, Segment::LowerLeft)
        } else {
            (Segment::UpperRight, Segment::LowerRight)
        };
        if (upper && p.is_lit(up)) || (lower && p.is_lit(down)) {
            '|'
        } else {
            ' '
        }
    }

    #[test]
    fn every_digit_every_size_matches_table() {
        for seg_size in 1..=5 {
            for value in 0..=9 {
                let grid = render_digit(value, seg_size);
                assert_eq!(grid.height, 2 * seg_size + 1);
                assert_eq!(grid.width, 2 * seg_size + 2);
                for y in 0..grid.height {
                    for x in 0..grid.width {
                        assert_eq!(
                            grid.get(x, y),
                            expected_cell(value, seg_size, x, y),
                            "digit {value}, size {seg_size}, cell ({x}, {y})"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn zero_at_size_one() {
        assert_eq!(render_digit(0, 1).lines(), vec![" __ ", "|  |", "|__|"]);
    }

    #[test]
    fn eight_is_fully_boxed() {
        assert_eq!(
            render_digit(8, 2).lines(),
            vec![" ____ ", "|    |", "|____|", "|    |", "|____|"]
        );
    }

    #[test]
    fn one_has_no_horizontal_bars() {
        for seg_size in 1..=5 {
            let grid = render_digit(1, seg_size);
            assert_eq!(grid.count(HORIZONTAL_GLYPH), 0);
            assert_eq!(grid.count(VERTICAL_GLYPH), 2 * seg_size);
            for y in 0..grid.height {
                assert_eq!(grid.get(0, y), ' ');
            }
        }
    }

    #[test]
    fn glyph_counts_follow_lit_segments() {
        for seg_size in 1..=5 {
            for value in 0..=9u8 {
                let p = SEGMENT_PATTERNS[usize::from(value)];
                let bars = Segment::HORIZONTAL.iter().filter(|&&s| p.is_lit(s)).count();
                let posts = Segment::VERTICAL.iter().filter(|&&s| p.is_lit(s)).count();
                let grid = render_digit(value, seg_size);
                assert_eq!(grid.count('_'), bars * 2 * seg_size);
                assert_eq!(grid.count('|'), posts * seg_size);
            }
        }
    }

    #[test]
    fn parallel_and_sequential_agree() {
        for seg_size in 1..=5 {
            for value in 0..=9 {
                assert_eq!(
                    render_digit(value, seg_size),
                    render_digit_sequential(value, seg_size)
                );
            }
        }
    }

    #[test]
    fn rendering_is_idempotent() {
        assert_eq!(render_digit(7, 3), render_digit(7, 3));
    }

    #[test]
    #[should_panic(expected = "digit out of range")]
    fn rejects_digit_above_nine() {
        let _ = render_digit(10, 2);
    }

    #[test]
    #[should_panic(expected = "segment size")]
    fn rejects_zero_segment_size() {
        let _ = render_digit(3, 0);
    }
}

/// Les 7 segments d'un afficheur, dans l'ordre de la table de motifs.
///
/// ```text
///     __T__
/// UL |     | UR
///    |__M__|
/// LL |     | LR
///    |__B__|
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    Top,
    UpperLeft,
    UpperRight,
    Middle,
    LowerLeft,
    LowerRight,
    Bottom,
}

impl Segment {
    /// Every segment, in table order.
    pub const ALL: [Self; 7] = [
        Self::Top,
        Self::UpperLeft,
        Self::UpperRight,
        Self::Middle,
        Self::LowerLeft,
        Self::LowerRight,
        Self::Bottom,
    ];

    /// Horizontal bars, top to bottom.
    pub const HORIZONTAL: [Self; 3] = [Self::Top, Self::Middle, Self::Bottom];

    /// Vertical bars: upper half first, left before right.
    pub const VERTICAL: [Self; 4] = [
        Self::UpperLeft,
        Self::UpperRight,
        Self::LowerLeft,
        Self::LowerRight,
    ];

    /// Position in a [`SegmentPattern`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Segments allumés pour un chiffre.
///
/// # Example
/// ```
/// use sc_segment::segments::{Segment, SEGMENT_PATTERNS};
/// assert!(SEGMENT_PATTERNS[0].is_lit(Segment::Top));
/// assert!(!SEGMENT_PATTERNS[0].is_lit(Segment::Middle));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentPattern(pub [bool; 7]);

impl SegmentPattern {
    #[inline]
    #[must_use]
    pub const fn is_lit(&self, segment: Segment) -> bool {
        self.0[segment.index()]
    }

    /// Number of lit segments.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.0.iter().filter(|&&on| on).count()
    }
}

const X: bool = true;
const O: bool = false;

/// Table des motifs, indexée par chiffre 0-9.
/// Ordre : top, upper-left, upper-right, middle, lower-left, lower-right, bottom.
pub const SEGMENT_PATTERNS: [SegmentPattern; 10] = [
    SegmentPattern([X, X, X, O, X, X, X]), // 0
    SegmentPattern([O, O, X, O, O, X, O]), // 1
    SegmentPattern([X, O, X, X, X, O, X]), // 2
    SegmentPattern([X, O, X, X, O, X, X]), // 3
    SegmentPattern([O, X, X, X, O, X, O]), // 4
    SegmentPattern([X, X, O, X, O, X, X]), // 5
    SegmentPattern([X, X, O, X, X, X, X]), // 6
    SegmentPattern([X, O, X, O, O, X, O]), // 7
    SegmentPattern([X, X, X, X, X, X, X]), // 8
    SegmentPattern([X, X, X, X, O, X, X]), // 9
];

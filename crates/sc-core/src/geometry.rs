/// Number of digits per time unit (tens, units).
pub const DIGITS_PER_UNIT: usize = 2;

/// Number of time units on the clock face (hours, minutes, seconds).
pub const UNITS: usize = 3;

/// Dimensions d'un chiffre 7 segments, dérivées de la taille de segment.
///
/// # Example
/// ```
/// use sc_core::geometry::FrameGeometry;
/// let g = FrameGeometry::new(2);
/// assert_eq!((g.rows, g.cols), (5, 6));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameGeometry {
    /// Taille d'un segment en cellules.
    pub seg_size: usize,
    /// Hauteur d'un chiffre : `2 * seg_size + 1`.
    pub rows: usize,
    /// Largeur d'un chiffre : `2 * seg_size + 2`.
    pub cols: usize,
}

impl FrameGeometry {
    /// Derive digit dimensions from a segment size.
    #[must_use]
    pub const fn new(seg_size: usize) -> Self {
        Self {
            seg_size,
            rows: 2 * seg_size + 1,
            cols: 2 * seg_size + 2,
        }
    }
}

/// Placement complet de l'horloge : géométrie + marge + colonne d'origine.
///
/// Deux layouts égaux produisent exactement les mêmes positions à l'écran ;
/// tout changement de layout impose un reset complet de la frame.
///
/// # Example
/// ```
/// use sc_core::geometry::ClockLayout;
/// let layout = ClockLayout::new(2, 4, 0);
/// assert_eq!(layout.unit_stride(), 22);
/// assert_eq!(layout.digit_column(1, 1), 29);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockLayout {
    /// Dimensions d'un chiffre.
    pub geometry: FrameGeometry,
    /// Espace horizontal ajouté entre deux unités de temps.
    pub margin: usize,
    /// Colonne écran du bord gauche de la frame.
    pub origin_column: usize,
}

impl ClockLayout {
    /// Build a layout from raw configuration values.
    #[must_use]
    pub const fn new(seg_size: usize, margin: usize, origin_column: usize) -> Self {
        Self {
            geometry: FrameGeometry::new(seg_size),
            margin,
            origin_column,
        }
    }

    /// Distance between the first digits of two consecutive units: `3 * cols + margin`.
    #[must_use]
    pub const fn unit_stride(&self) -> usize {
        3 * self.geometry.cols + self.margin
    }

    /// Width of one unit block (two digits and the one-cell gap between them).
    #[must_use]
    pub const fn unit_width(&self) -> usize {
        2 * self.geometry.cols + 1
    }

    /// Column of digit `digit` in unit `unit`, relative to the origin column.
    #[must_use]
    pub const fn digit_column(&self, unit: usize, digit: usize) -> usize {
        unit * self.unit_stride() + digit * (self.geometry.cols + 1)
    }

    /// Absolute screen column of digit `digit` in unit `unit`.
    #[must_use]
    pub const fn absolute_digit_column(&self, unit: usize, digit: usize) -> usize {
        self.origin_column + self.digit_column(unit, digit)
    }

    /// Column of the separator following unit `unit` (0 or 1), relative to the origin.
    ///
    /// Centered in the gap between the two unit blocks.
    #[must_use]
    pub const fn separator_column(&self, unit: usize) -> usize {
        let gap_start = unit * self.unit_stride() + self.unit_width();
        let gap_width = self.unit_stride() - self.unit_width();
        gap_start + gap_width.saturating_sub(1) / 2
    }

    /// Rows of the two stacked separator dots, from the frame top.
    #[must_use]
    pub const fn separator_rows(&self) -> [usize; 2] {
        let upper = self.geometry.rows / 2;
        [upper, upper + 1]
    }

    /// Width of the digit area, excluding the origin column offset.
    #[must_use]
    pub const fn frame_width(&self) -> usize {
        (UNITS - 1) * self.unit_stride() + self.unit_width()
    }

    /// Lines occupied on screen: the digit rows plus the status line.
    #[must_use]
    pub const fn frame_height(&self) -> usize {
        self.geometry.rows + 1
    }
}

/// Grille de caractères row-major.
///
/// Sert à la fois de grille de chiffre (produite par le renderer) et de
/// canevas de frame (assemblé par le compositor).
///
/// # Example
/// ```
/// use sc_core::frame::CharGrid;
/// let mut grid = CharGrid::new(4, 3);
/// grid.set(1, 0, '_');
/// assert_eq!(grid.get(1, 0), '_');
/// assert_eq!(grid.line(0), " _  ");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharGrid {
    /// Flat array of cells, row-major.
    pub cells: Vec<char>,
    /// Width in characters.
    pub width: usize,
    /// Height in characters.
    pub height: usize,
}

/// Grille d'un chiffre 7 segments : `2s+1` lignes × `2s+2` colonnes.
pub type DigitGrid = CharGrid;

/// Canevas d'une frame complète (lignes de chiffres uniquement).
pub type FrameCanvas = CharGrid;

impl CharGrid {
    /// Create a blank grid filled with spaces.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![' '; width * height],
            width,
            height,
        }
    }

    /// Resize and blank the grid. Reuses the allocation when it is large enough.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(width * height, ' ');
    }

    /// Reset every cell to a space.
    pub fn clear(&mut self) {
        self.cells.fill(' ');
    }

    /// Cell at `(x, y)`. Out-of-bounds reads return a space.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> char {
        if x >= self.width {
            return ' ';
        }
        self.cells.get(y * self.width + x).copied().unwrap_or(' ')
    }

    /// Write a cell. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, ch: char) {
        if x >= self.width {
            return;
        }
        if let Some(cell) = self.cells.get_mut(y * self.width + x) {
            *cell = ch;
        }
    }

    /// Row `y` as a slice of cells.
    #[must_use]
    pub fn row(&self, y: usize) -> &[char] {
        let start = (y * self.width).min(self.cells.len());
        let end = (start + self.width).min(self.cells.len());
        &self.cells[start..end]
    }

    /// Row `y` as a string.
    #[must_use]
    pub fn line(&self, y: usize) -> String {
        self.row(y).iter().collect()
    }

    /// All rows as strings, top to bottom.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        (0..self.height).map(|y| self.line(y)).collect()
    }

    /// Copy `src` into this grid with its top-left corner at `(x, y)`, clipping at the edges.
    ///
    /// # Example
    /// ```
    /// use sc_core::frame::CharGrid;
    /// let mut canvas = CharGrid::new(6, 2);
    /// let mut digit = CharGrid::new(2, 2);
    /// digit.set(0, 0, '|');
    /// canvas.blit(&digit, 3, 0);
    /// assert_eq!(canvas.line(0), "   |  ");
    /// ```
    pub fn blit(&mut self, src: &Self, x: usize, y: usize) {
        for sy in 0..src.height {
            for sx in 0..src.width {
                self.set(x + sx, y + sy, src.get(sx, sy));
            }
        }
    }

    /// Number of cells holding `ch`.
    #[must_use]
    pub fn count(&self, ch: char) -> usize {
        self.cells.iter().filter(|&&c| c == ch).count()
    }
}

use std::fmt;
use std::str::FromStr;

/// A4 at 300 DPI.
pub const PAGE_WIDTH: f64 = 2480.;
pub const PAGE_HEIGHT: f64 = 3508.;

const DPI: f64 = 300.;
const MM_PER_INCH: f64 = 25.4;

/// 0.5 cm between the page edge and the cells, and between neighbouring cells.
pub const PADDING: f64 = 5. / MM_PER_INCH * DPI;
pub const BORDER_WIDTH: u32 = 3;

// 63 mm x 88 mm trading card
const CARD_WIDTH: f64 = 63. / MM_PER_INCH * DPI;
const CARD_HEIGHT: f64 = 88. / MM_PER_INCH * DPI;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Four,
    Nine,
}

impl Mode {
    pub fn geometry(self) -> Geometry {
        Geometry::new(self)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Four => write!(f, "four (2×2)"),
            Self::Nine => write!(f, "nine (3×3)"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseModeError;

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected one of: four, 4, 2x2, nine, 9, 3x3")
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "four" | "4" | "2x2" => Ok(Self::Four),
            "nine" | "9" | "3x3" => Ok(Self::Nine),
            _ => Err(ParseModeError),
        }
    }
}

/// Cell bounds snapped to whole pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Print layout of one page, in device pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub page_width: f64,
    pub page_height: f64,
    pub cell_width: f64,
    pub cell_height: f64,
    pub padding: f64,
    pub margin: f64,
    pub border_width: u32,
    pub images_per_page: usize,
    pub columns: usize,
}

impl Geometry {
    pub fn new(mode: Mode) -> Self {
        // four-up cells share whatever the padding leaves; nine-up cells are fixed cards
        let (columns, cell_width, cell_height) = match mode {
            Mode::Four => {
                (2, (PAGE_WIDTH - PADDING * 3.) / 2., (PAGE_HEIGHT - PADDING * 3.) / 2.)
            }
            Mode::Nine => (3, CARD_WIDTH, CARD_HEIGHT),
        };

        Self {
            page_width: PAGE_WIDTH,
            page_height: PAGE_HEIGHT,
            cell_width,
            cell_height,
            padding: PADDING,
            margin: PADDING,
            border_width: BORDER_WIDTH,
            images_per_page: columns * columns,
            columns,
        }
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn page_size(&self) -> (u32, u32) {
        (self.page_width as u32, self.page_height as u32)
    }

    #[expect(clippy::cast_precision_loss)]
    pub fn cell_origin(&self, index: usize) -> (f64, f64) {
        let column = (index % self.columns) as f64;
        let row = (index / self.columns) as f64;

        (
            column.mul_add(self.cell_width + self.margin, self.padding),
            row.mul_add(self.cell_height + self.margin, self.padding),
        )
    }

    pub fn cell_rect(&self, index: usize) -> CellRect {
        let (x, y) = self.cell_origin(index);
        let (left, right) = (to_pixel(x), to_pixel(x + self.cell_width));
        let (top, bottom) = (to_pixel(y), to_pixel(y + self.cell_height));

        CellRect { x: left, y: top, width: right - left, height: bottom - top }
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_pixel(value: f64) -> u32 {
    value.round() as u32
}

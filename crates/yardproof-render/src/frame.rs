/// Fixed drawing canvas: a square with a uniform margin around the footprint box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasFrame {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

pub const CANVAS_SIZE: f64 = 900.0;
pub const CANVAS_MARGIN: f64 = 120.0;

impl Default for CanvasFrame {
    fn default() -> Self {
        Self {
            width: CANVAS_SIZE,
            height: CANVAS_SIZE,
            margin: CANVAS_MARGIN,
        }
    }
}

impl CanvasFrame {
    pub fn box_x(&self) -> f64 {
        self.margin
    }

    pub fn box_y(&self) -> f64 {
        self.margin
    }

    pub fn box_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    pub fn box_height(&self) -> f64 {
        self.height - 2.0 * self.margin
    }

    pub fn box_bottom(&self) -> f64 {
        self.box_y() + self.box_height()
    }

    pub fn box_right(&self) -> f64 {
        self.box_x() + self.box_width()
    }

    pub fn center_x(&self) -> f64 {
        self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.height / 2.0
    }

    /// Maps a footprint-relative coordinate in `[0,1]²` onto the canvas.
    pub fn px(&self, x_pct: f64, y_pct: f64) -> (f64, f64) {
        (
            self.box_x() + x_pct * self.box_width(),
            self.box_y() + y_pct * self.box_height(),
        )
    }
}

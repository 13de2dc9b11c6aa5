use crate::error::ViewportError;

/// Which way a zoom step goes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Snapshot of the user-controlled view, readable by overlays.
/// Offsets are in unscaled grid-pixel units (before `zoom` applies).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub cell_size: f64,
}

/// Screen-space square covering one cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// Half-open cell index bounds, always inside the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRange {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl CellRange {
    pub fn is_empty(&self) -> bool {
        self.row_start >= self.row_end || self.col_start >= self.col_end
    }

    pub fn len(&self) -> usize {
        (self.row_end - self.row_start) * (self.col_end - self.col_start)
    }
}

/// Viewport maps between grid cells and screen pixels and owns zoom and pan.
/// Neither zoom nor offset is bounded: panning away from the grid only
/// empties the visible range.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    zoom: f64,
    offset_x: f64,
    offset_y: f64,
    cell_size: f64,
    rows: usize,
    cols: usize,
}

fn check_factor(factor: f64) -> Result<(), ViewportError> {
    if factor.is_finite() && factor > 1.0 {
        Ok(())
    } else {
        Err(ViewportError::InvalidZoomFactor(factor))
    }
}

fn check_cell_size(cell_size: f64) -> Result<(), ViewportError> {
    if cell_size.is_finite() && cell_size > 0.0 {
        Ok(())
    } else {
        Err(ViewportError::InvalidCellSize(cell_size))
    }
}

impl Viewport {
    /// Unzoomed, unpanned view of a rows x cols grid with the given base cell size
    pub fn new(rows: usize, cols: usize, cell_size: f64) -> Result<Self, ViewportError> {
        check_cell_size(cell_size)?;
        Ok(Self {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            cell_size,
            rows,
            cols,
        })
    }

    /// View whose grid spans `surface_width` logical pixels at zoom 1
    pub fn for_surface(rows: usize, cols: usize, surface_width: f64) -> Result<Self, ViewportError> {
        Self::new(rows, cols, surface_width / cols as f64)
    }

    pub fn state(&self) -> ViewportState {
        ViewportState {
            zoom: self.zoom,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
            cell_size: self.cell_size,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Grid dimensions as (rows, cols)
    pub fn grid_dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Jump to an absolute offset in grid-pixel units
    pub fn set_offset(&mut self, offset_x: f64, offset_y: f64) {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
    }

    /// Screen square for a cell
    pub fn grid_to_screen(&self, row: usize, col: usize) -> ScreenRect {
        ScreenRect {
            x: (col as f64 * self.cell_size - self.offset_x) * self.zoom,
            y: (row as f64 * self.cell_size - self.offset_y) * self.zoom,
            size: self.cell_size * self.zoom,
        }
    }

    /// Grid-pixel coordinate under a screen point
    pub fn screen_to_grid(&self, screen_x: f64, screen_y: f64) -> (f64, f64) {
        (
            screen_x / self.zoom + self.offset_x,
            screen_y / self.zoom + self.offset_y,
        )
    }

    /// Cell under a screen point, if any
    pub fn screen_to_cell(&self, screen_x: f64, screen_y: f64) -> Option<(usize, usize)> {
        let (gx, gy) = self.screen_to_grid(screen_x, screen_y);
        let row = (gy / self.cell_size).floor();
        let col = (gx / self.cell_size).floor();
        let in_range = |v: f64, dim: usize| v >= 0.0 && v < dim as f64;
        (in_range(row, self.rows) && in_range(col, self.cols)).then(|| (row as usize, col as usize))
    }

    /// Cells touched by a screen of the given size, clamped to the grid
    pub fn visible_cell_range(&self, screen_width: f64, screen_height: f64) -> CellRange {
        let clamp = |v: f64, dim: usize| v.clamp(0.0, dim as f64) as usize;

        let row_start = clamp((self.offset_y / self.cell_size).floor(), self.rows);
        let row_end = clamp(
            ((self.offset_y + screen_height / self.zoom) / self.cell_size).ceil(),
            self.rows,
        );
        let col_start = clamp((self.offset_x / self.cell_size).floor(), self.cols);
        let col_end = clamp(
            ((self.offset_x + screen_width / self.zoom) / self.cell_size).ceil(),
            self.cols,
        );

        CellRange {
            row_start,
            row_end: row_end.max(row_start),
            col_start,
            col_end: col_end.max(col_start),
        }
    }

    /// Zoom by `factor` keeping the grid point under the anchor fixed on screen
    pub fn zoom_at(
        &mut self,
        anchor_x: f64,
        anchor_y: f64,
        direction: ZoomDirection,
        factor: f64,
    ) -> Result<(), ViewportError> {
        check_factor(factor)?;

        let zoom = match direction {
            ZoomDirection::In => self.zoom * factor,
            ZoomDirection::Out => self.zoom / factor,
        };
        if !(zoom.is_normal() && zoom > 0.0) {
            log::warn!("refusing zoom {:?} to {}", direction, zoom);
            return Err(ViewportError::ZoomOutOfRange(zoom));
        }

        let (grid_x, grid_y) = self.screen_to_grid(anchor_x, anchor_y);
        self.zoom = zoom;
        self.offset_x = grid_x - anchor_x / zoom;
        self.offset_y = grid_y - anchor_y / zoom;
        log::debug!("zoom {:?} to {:.3} at ({:.1}, {:.1})", direction, zoom, anchor_x, anchor_y);
        Ok(())
    }

    /// Pan by a screen-space delta; the caller decides the sign
    pub fn pan_by(&mut self, delta_x: f64, delta_y: f64) {
        self.offset_x += delta_x / self.zoom;
        self.offset_y += delta_y / self.zoom;
    }

    /// Zoom anchored at the pinch midpoint, inward when the fingers spread
    pub fn pinch_update(
        &mut self,
        current_distance: f64,
        previous_distance: f64,
        midpoint_x: f64,
        midpoint_y: f64,
        factor: f64,
    ) -> Result<(), ViewportError> {
        let direction = if current_distance > previous_distance {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        };
        self.zoom_at(midpoint_x, midpoint_y, direction, factor)
    }

    /// New base cell size; zoom and offset stay as the user left them
    pub fn on_resize(&mut self, cell_size: f64) -> Result<(), ViewportError> {
        check_cell_size(cell_size)?;
        self.cell_size = cell_size;
        Ok(())
    }

    /// Recompute the base cell size from the surface's logical width
    pub fn resize_surface(&mut self, surface_width: f64) -> Result<(), ViewportError> {
        self.on_resize(surface_width / self.cols as f64)?;
        log::info!("surface width {:.0}, cell size {:.3}", surface_width, self.cell_size);
        Ok(())
    }

    /// Reset zoom and pan to defaults
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.offset_x = 0.0;
        self.offset_y = 0.0;
    }
}

use macroquad::prelude::*;

use crate::application::{FrameView, Renderer, Viewport};
use crate::domain::{Cell, Grid};

/// One filled square for the rendering surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub cell: Cell,
}

/// Squares for every cell the screen can see, row by row.
/// Off-screen cells are culled through `visible_cell_range`.
pub fn draw_commands(grid: &Grid, viewport: &Viewport, screen_width: f64, screen_height: f64) -> Vec<DrawCommand> {
    let range = viewport.visible_cell_range(screen_width, screen_height);
    let mut commands = Vec::with_capacity(range.len());

    for row in range.row_start..range.row_end {
        for col in range.col_start..range.col_end {
            let Some(cell) = grid.get(row, col) else { continue };
            let rect = viewport.grid_to_screen(row, col);
            commands.push(DrawCommand { x: rect.x, y: rect.y, size: rect.size, cell });
        }
    }
    commands
}

/// Format large numbers with K/M suffixes
fn format_number(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

/// Draws frames into the macroquad window
pub struct MacroquadRenderer {
    alive_color: Color,
    dead_color: Color,
    show_overlay: bool,
}

impl MacroquadRenderer {
    pub fn new() -> Self {
        Self {
            alive_color: WHITE,
            dead_color: BLACK,
            show_overlay: true,
        }
    }

    pub fn toggle_overlay(&mut self) {
        self.show_overlay = !self.show_overlay;
    }

    fn draw_overlay(&self, frame: &FrameView<'_>) {
        let state = frame.viewport.state();
        let lines = [
            format!(
                "Gen {} | Pop {}{}",
                frame.generation,
                format_number(frame.grid.population()),
                if frame.paused { " | Paused" } else { "" }
            ),
            format!("Zoom {:.2}x | Offset ({:.0}, {:.0})", state.zoom, state.offset_x, state.offset_y),
            format!("FPS {}", get_fps()),
        ];

        let panel_color = Color::from_rgba(30, 30, 30, 200);
        draw_rectangle(0.0, 0.0, 260.0, 18.0 * lines.len() as f32 + 8.0, panel_color);
        lines.iter().enumerate().for_each(|(i, text)| {
            draw_text(text, 6.0, 18.0 * (i as f32 + 1.0), 18.0, Color::from_rgba(0, 255, 150, 255));
        });
    }
}

impl Default for MacroquadRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for MacroquadRenderer {
    fn render(&mut self, frame: &FrameView<'_>) {
        clear_background(BLACK);

        let commands = draw_commands(frame.grid, frame.viewport, screen_width() as f64, screen_height() as f64);
        for cmd in &commands {
            let color = if cmd.cell.is_alive() { self.alive_color } else { self.dead_color };
            draw_rectangle(cmd.x as f32, cmd.y as f32, cmd.size as f32, cmd.size as f32, color);
        }

        if self.show_overlay {
            self.draw_overlay(frame);
        }
    }
}

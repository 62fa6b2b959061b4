//! Pulse demo: A bordered panel with a spinner and a color-cycling bar.
//!
//! Runs for five seconds, then restores the terminal. Set
//! `TERMFRAME_MODE=native` to force the 16-color cell-array backend.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use termframe::{
    Alignment, Attributes, BorderStyle, Color, Coord, Cycle, Grid, Renderable, Renderer,
    RendererConfig,
};

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];
const BAR_COLORS: [Color; 4] = [Color::RED, Color::GREEN, Color::BLUE, Color::INK];

/// Bordered panel anchored at the top-left corner.
struct Panel {
    pos: Coord,
    size: Coord,
}

impl Renderable for Panel {
    fn render(&mut self, grid: &mut Grid) {
        grid.fill_rect(self.pos, self.size, Color::rgb(20, 20, 30), ' ');
        grid.draw_border(self.pos, self.size, Color::INK, BorderStyle::Rounded);
        grid.print(
            self.pos.x + self.size.x / 2,
            self.pos.y,
            " termframe ",
            Color::WHITE,
            Color::rgb(20, 20, 30),
            Alignment::Center,
            Attributes::BOLD,
        );
    }

    fn clear(&mut self, grid: &mut Grid) {
        grid.clear_rect(self.pos, self.size);
    }
}

/// Spinner and pulsing bar drawn over the panel.
struct Pulse {
    pos: Coord,
    spinner: Cycle,
    bar: Cycle,
}

impl Renderable for Pulse {
    fn render(&mut self, grid: &mut Grid) {
        self.spinner.advance();
        self.bar.advance();

        let glyph = self.spinner.pick(&SPINNER).copied().unwrap_or(' ');
        grid.draw(self.pos.x, self.pos.y, glyph, Color::WHITE, Color::Unset, Attributes::empty());

        let color = self.bar.pick(&BAR_COLORS).copied().unwrap_or(Color::INK);
        grid.draw_rect(self.pos + Coord::new(2, 0), Coord::new(20, 1), color);
    }

    fn clear(&mut self, grid: &mut Grid) {
        grid.clear_rect(self.pos, Coord::new(22, 1));
    }

    fn layer(&self) -> i32 {
        1
    }
}

fn main() -> termframe::Result<()> {
    let renderer = Renderer::new(RendererConfig::default())?;

    renderer.register(Arc::new(Mutex::new(Panel {
        pos: Coord::new(2, 1),
        size: Coord::new(28, 5),
    })));
    renderer.register(Arc::new(Mutex::new(Pulse {
        pos: Coord::new(4, 3),
        spinner: Cycle::new(SPINNER.len(), 2),
        bar: Cycle::new(BAR_COLORS.len(), 10),
    })));

    std::thread::sleep(Duration::from_secs(5));
    let stats = renderer.stats();
    drop(renderer);

    println!(
        "{} ticks, {} frames written, {} failed flushes",
        stats.ticks, stats.frames, stats.flush_failures
    );
    Ok(())
}

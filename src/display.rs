use std::error::Error;
use std::io;
use std::time::Duration;

use ndarray::{ArrayView3, Axis};

use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use tui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    text::Spans,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use log::warn;

use crate::dataloader::ImageBatch;

/// Images shown at once, two rows of five
pub const MAX_SHOWN: usize = 10;
const GRID_ROWS: usize = 2;
const GRID_COLS: usize = 5;

/// Dark to bright
const SHADES: &[u8] = b" .:-=+*#%@";

/// Presents a batch of images with one title per image
pub trait BatchDisplay {
    fn show(&mut self, batch: &ImageBatch, titles: &[String]) -> Result<(), Box<dyn Error>>;
}

/// ASCII rendering of `img` in `width` x `height` characters, nearest pixel sampling
pub fn ascii_thumbnail(img: ArrayView3<f32>, width: usize, height: usize) -> Vec<String> {
    let (h, w, c) = img.dim();

    if h == 0 || w == 0 || c == 0 {
        return vec![];
    }

    (0..height)
        .map(|row| {
            let y = row * h / height;

            (0..width)
                .map(|col| {
                    let x = col * w / width;
                    let lum = img.slice(ndarray::s![y, x, ..]).sum() / c as f32;
                    let lum = lum.clamp(0.0, 1.0);

                    SHADES[(lum * (SHADES.len() - 1) as f32).round() as usize] as char
                })
                .collect()
        })
        .collect()
}

fn grid(area: Rect) -> Vec<Rect> {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);

    let col_constraints = vec![Constraint::Ratio(1, GRID_COLS as u32); GRID_COLS];

    rows.into_iter()
        .take(GRID_ROWS)
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints(col_constraints.clone())
                .split(row)
        })
        .collect()
}

/// Draws up to ten images of `batch` titled with `titles`
pub fn render_batch<B: Backend>(f: &mut Frame<B>, batch: &ImageBatch, titles: &[String]) {
    let cells = grid(f.size());

    for (idx, cell) in cells.into_iter().enumerate().take(batch.len().min(MAX_SHOWN)) {
        let title = titles.get(idx).cloned().unwrap_or_default();
        let block = Block::default().borders(Borders::ALL).title(title);

        let inner = block.inner(cell);
        let img = batch.images.index_axis(Axis(0), idx);

        let lines: Vec<Spans> = ascii_thumbnail(img, inner.width as usize, inner.height as usize)
            .into_iter()
            .map(Spans::from)
            .collect();

        f.render_widget(Paragraph::new(lines).block(block), cell);
    }
}

pub fn draw_batch<B: Backend>(
    terminal: &mut Terminal<B>,
    batch: &ImageBatch,
    titles: &[String],
) -> io::Result<()> {
    terminal.draw(|f| render_batch(f, batch, titles))?;
    Ok(())
}

type BackendTerm = Terminal<CrosstermBackend<io::Stdout>>;

/// Full-screen terminal view, `q` closes it
pub struct TuiDisplay {
    terminal: BackendTerm,
    tickrate: Duration,
}

impl TuiDisplay {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            tickrate: Duration::from_millis(50),
        })
    }
}

impl BatchDisplay for TuiDisplay {
    fn show(&mut self, batch: &ImageBatch, titles: &[String]) -> Result<(), Box<dyn Error>> {
        loop {
            draw_batch(&mut self.terminal, batch, titles)?;

            if event::poll(self.tickrate)? {
                if let Event::Key(key) = event::read()? {
                    if key.code == KeyCode::Char('q') {
                        return Ok(());
                    }
                }
            }
        }
    }
}

impl Drop for TuiDisplay {
    fn drop(&mut self) {
        let restored = disable_raw_mode()
            .and_then(|_| execute!(self.terminal.backend_mut(), LeaveAlternateScreen))
            .and_then(|_| self.terminal.show_cursor());

        if let Err(err) = restored {
            warn!("Failed to restore terminal : {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImageShape;
    use tui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol.clone())
            .collect()
    }

    #[test]
    fn thumbnail_shades() {
        let img = ndarray::Array3::from_shape_fn((2, 2, 1), |(r, _, _)| r as f32);
        let thumb = ascii_thumbnail(img.view(), 2, 2);

        assert_eq!(thumb, vec!["  ".to_owned(), "@@".to_owned()]);
    }

    #[test]
    fn titles_are_rendered() {
        let mut batch = ImageBatch::zeros(3, ImageShape::new(4, 4, 3));
        batch.images.fill(1.0);

        let titles: Vec<String> = ["airplane", "frog", "truck"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        draw_batch(&mut terminal, &batch, &titles).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("airplane"));
        assert!(text.contains("truck"));
        assert!(text.contains("@@@@"));
    }

    #[test]
    fn at_most_ten_cells() {
        let batch = ImageBatch::zeros(12, ImageShape::new(2, 2, 1));
        let titles: Vec<String> = (0..12).map(|i| format!("img{}", i)).collect();

        let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
        draw_batch(&mut terminal, &batch, &titles).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("img9"));
        assert!(!text.contains("img10"));
    }
}

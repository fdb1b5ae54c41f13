//! Maze and solution rendering.
//!
//! This module draws a [`Board`] and a solved path either as plain text or as a one-shot ratatui
//! canvas on an inline viewport below the cursor. Both forms expand the vertex path along its
//! straight corridor segments first, so every square the solution passes over is marked.

use std::collections::HashSet;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders,
    },
    Frame, TerminalOptions, Viewport,
};

use crate::{board::Board, types::Position};

/// Character of a square on the solution in the text depiction.
const TRAIL: char = 'o';

/// Character of an open square off the solution in the text depiction.
const BLANK: char = ' ';

/// Height of the caption block under the canvas, in terminal rows.
const CAPTION_HEIGHT: u16 = 2;

/// Expands a vertex path into every board square it passes over.
///
/// Consecutive vertices must share a row or a column; a pair that does not is kept as its two
/// endpoints.
pub fn trail(path: &[Position]) -> Vec<Position> {
    let mut squares: Vec<Position> = path.first().copied().into_iter().collect();

    for pair in path.windows(2) {
        let [from, to] = pair else {
            continue;
        };
        match from.line_to(*to) {
            Some(line) => squares.extend(line.into_iter().skip(1)),
            None => squares.push(*to),
        }
    }

    squares
}

/// Renders the board as text with the solution marked.
///
/// Walls are `#`, open squares are blank, squares on the solution are `o` and the anchors keep
/// their `S` and `E` letters. Every row ends with a newline.
pub fn ascii(board: &Board, path: &[Position]) -> String {
    let marked: HashSet<Position> = trail(path).into_iter().collect();
    let mut text = String::with_capacity((board.columns() + 1) * board.rows());

    for y in 0..board.rows() {
        for x in 0..board.columns() {
            let position = Position::new(x, y);
            let symbol = if position == board.start() || position == board.exit() {
                board.symbol(position)
            } else if marked.contains(&position) {
                TRAIL
            } else if board.is_open(position) {
                BLANK
            } else {
                board.symbol(position)
            };
            text.push(symbol);
        }
        text.push('\n');
    }

    text
}

/// Draws the board and the solution on an inline viewport and leaves them in the scrollback.
///
/// # Errors
///
/// This function returns an error if the board does not fit the terminal coordinate range or if the
/// terminal cannot be drawn to.
pub fn show(board: &Board, path: &[Position], caption: &str) -> Result<()> {
    let height = u16::try_from(board.rows())?.saturating_add(CAPTION_HEIGHT);
    let mut terminal = ratatui::init_with_options(TerminalOptions {
        viewport: Viewport::Inline(height),
    });

    let mut outcome = Ok(());
    let drawn = terminal.draw(|frame| outcome = draw_maze(frame, board, path, caption));
    ratatui::restore();

    let _ = drawn?;
    outcome
}

/// Renders the maze canvas at the top of the frame, centred horizontally, with the caption block
/// under it.
///
/// # Errors
///
/// This function returns an error if the board or the path does not fit the terminal coordinate
/// range.
pub(crate) fn draw_maze(
    frame: &mut Frame,
    board: &Board,
    path: &[Position],
    caption: &str,
) -> Result<()> {
    let columns = u16::try_from(board.columns())?;
    let rows = u16::try_from(board.rows())?;

    let layout = Layout::vertical([
        Constraint::Length(rows),
        Constraint::Length(CAPTION_HEIGHT),
        Constraint::Min(0),
    ])
    .split(frame.area());
    let maze_area = centred(
        *layout
            .first()
            .ok_or_eyre("failed to get maze area from layout")?,
        columns,
    )?;
    let caption_area = centred(
        *layout
            .get(1)
            .ok_or_eyre("failed to get caption area from layout")?,
        columns,
    )?;

    let walls: Vec<Position> = board.walls().collect();
    let wall_coords = transform_to_screen_coords(&walls, board)?;
    let trail_coords = transform_to_screen_coords(&trail(path), board)?;

    let maze = Canvas::default()
        .x_bounds([
            (-rounded_div::i32(maze_area.width.into(), 2)).into(),
            (rounded_div::i32(maze_area.width.into(), 2)).into(),
        ])
        .y_bounds([
            (-rounded_div::i32(maze_area.height.into(), 2)).into(),
            (rounded_div::i32(maze_area.height.into(), 2)).into(),
        ])
        .marker(Marker::Dot)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &wall_coords,
                color: Color::Green,
            });
            ctx.draw(&Points {
                coords: &trail_coords,
                color: Color::Red,
            });
        });
    frame.render_widget(maze, maze_area);

    let caption_block = Block::bordered()
        .title(caption)
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    frame.render_widget(caption_block, caption_area);

    Ok(())
}

/// Returns the horizontally centred slice of `area` that is `width` columns wide.
fn centred(area: Rect, width: u16) -> Result<Rect> {
    Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(width),
        Constraint::Min(1),
    ])
    .split(area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get centred area from horizontal layout")
}

/// Transforms board positions to canvas coordinates centred on the board.
///
/// Columns map to `x = column - (columns - 1) / 2` and rows map to `y = (rows - 1) / 2 - row`, so
/// the board's centre lands on the origin and rows grow upwards on screen.
///
/// # Errors
///
/// This function returns an error if a coordinate does not fit in a `u16`.
pub(crate) fn transform_to_screen_coords(
    positions: &[Position],
    board: &Board,
) -> Result<Vec<(f64, f64)>> {
    let rows_n = f64::from(u16::try_from(board.rows())?);
    let cols_n = f64::from(u16::try_from(board.columns())?);

    positions
        .iter()
        .map(|position| {
            let screen_x = f64::from(u16::try_from(position.x)?) - (cols_n - 1.) / 2.;
            let screen_y = (rows_n - 1.) / 2. - f64::from(u16::try_from(position.y)?);

            Ok((screen_x, screen_y))
        })
        .collect()
}

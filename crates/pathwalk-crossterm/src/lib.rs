//! Crossterm rendering for pathwalk.
//!
//! [`TerminalSink`] implements [`pathwalk_core::Sink`] and draws every
//! generation notification as it happens, so a run driven tick by tick shows
//! the walkers carving the map. [`print_grid`] writes a finished grid in one
//! go, and [`Terminal`] owns the alternate screen while an animation runs.
//!
//! Grid row `y = 0` is the bottom of the map, so rows are flipped on screen.

use std::collections::HashMap;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use pathwalk_core::{Collectible, Grid, Point, Sink, Tile, TileKind, Vec2, WalkerId};

const WALKER: char = '@';
const PLAYER: char = 'P';

/// Foreground colour of a glyph.
fn color_of(ch: char) -> Color {
    match ch {
        '#' => Color::Grey,
        '.' => Color::DarkGrey,
        'w' => Color::Yellow,
        'a' => Color::Cyan,
        WALKER => Color::Green,
        PLAYER => Color::Magenta,
        _ => Color::Reset,
    }
}

fn glyph_of(kind: Collectible) -> char {
    Tile {
        kind: TileKind::Floor,
        collectible: Some(kind),
    }
    .glyph()
}

/// Screen cell of a grid point on a map `height` rows tall.
fn to_screen(p: Point, height: i32) -> (u16, u16) {
    let row = (height - 1 - p.y).max(0);
    (p.x.max(0) as u16, row as u16)
}

fn draw(out: &mut impl Write, p: Point, height: i32, ch: char) -> io::Result<()> {
    let (col, row) = to_screen(p, height);
    queue!(
        out,
        cursor::MoveTo(col, row),
        SetForegroundColor(color_of(ch)),
        Print(ch),
        ResetColor
    )
}

/// Write a whole grid, highest row first, one line per row.
pub fn print_grid(out: &mut impl Write, grid: &Grid) -> io::Result<()> {
    for y in (0..grid.height()).rev() {
        for x in 0..grid.width() {
            let ch = grid.at(Point::new(x, y)).map_or(' ', Tile::glyph);
            queue!(out, SetForegroundColor(color_of(ch)), Print(ch))?;
        }
        queue!(out, ResetColor, Print('\n'))?;
    }
    out.flush()
}

/// A [`Sink`] that draws the map incrementally on a terminal.
///
/// Notifications cannot fail, so the first write error is kept and every
/// later notification is ignored. Check it with
/// [`take_error`](TerminalSink::take_error).
pub struct TerminalSink<W: Write> {
    out: W,
    height: i32,
    scale: f64,
    tiles: HashMap<Point, char>,
    walkers: HashMap<WalkerId, Point>,
    error: Option<io::Error>,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            height: 0,
            scale: 1.0,
            tiles: HashMap::new(),
            walkers: HashMap::new(),
            error: None,
        }
    }

    fn emit(&mut self, f: impl FnOnce(&mut W, i32) -> io::Result<()>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = f(&mut self.out, self.height) {
            log::warn!("terminal output failed: {err}");
            self.error = Some(err);
        }
    }

    fn set_tile(&mut self, p: Point, ch: char) {
        self.tiles.insert(p, ch);
        if self.walkers.values().any(|&w| w == p) {
            return;
        }
        self.emit(|out, h| draw(out, p, h, ch));
    }

    fn restore(&mut self, p: Point) {
        let ch = self.tiles.get(&p).copied().unwrap_or(' ');
        self.emit(|out, h| draw(out, p, h, ch));
    }

    /// Write a line of text below the map.
    pub fn status(&mut self, text: &str) {
        self.emit(|out, h| {
            queue!(
                out,
                cursor::MoveTo(0, h.max(0) as u16 + 1),
                terminal::Clear(ClearType::CurrentLine),
                Print(text)
            )
        });
    }

    /// Push queued drawing to the terminal.
    pub fn flush(&mut self) {
        self.emit(|out, _| out.flush());
    }

    /// The first write error, if any, clearing it.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Sink for TerminalSink<W> {
    fn on_generation_started(&mut self, size: Point, scale: f64, _origin: Vec2) {
        self.height = size.y;
        self.scale = scale;
        self.tiles.clear();
        self.walkers.clear();
        self.emit(|out, _| queue!(out, terminal::Clear(ClearType::All)));
    }

    fn on_floor_carved(&mut self, pos: Point) {
        self.set_tile(pos, '.');
    }

    fn on_wall_placed(&mut self, pos: Point) {
        self.set_tile(pos, '#');
    }

    fn on_collectible_placed(&mut self, pos: Point, kind: Collectible) {
        self.set_tile(pos, glyph_of(kind));
    }

    fn on_collectible_removed(&mut self, pos: Point, kind: Collectible) {
        if self.tiles.get(&pos) == Some(&glyph_of(kind)) {
            self.set_tile(pos, '.');
        }
    }

    fn on_walker_spawned(&mut self, id: WalkerId, pos: Point) {
        self.walkers.insert(id, pos);
        self.emit(|out, h| draw(out, pos, h, WALKER));
    }

    fn on_walker_moved(&mut self, id: WalkerId, pos: Point) {
        if let Some(old) = self.walkers.insert(id, pos) {
            if old != pos && !self.walkers.values().any(|&w| w == old) {
                self.restore(old);
            }
        }
        self.emit(|out, h| draw(out, pos, h, WALKER));
    }

    fn on_walker_destroyed(&mut self, id: WalkerId) {
        if let Some(old) = self.walkers.remove(&id) {
            if !self.walkers.values().any(|&w| w == old) {
                self.restore(old);
            }
        }
    }

    fn on_player_placed(&mut self, pos: Vec2) {
        let cell = Point::new((pos.x / self.scale) as i32, (pos.y / self.scale) as i32);
        self.emit(|out, h| draw(out, cell, h, PLAYER));
    }

    fn on_generation_complete(&mut self) {
        self.flush();
    }
}

/// Keys that stop an animation.
fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Raw-mode alternate screen, restored on drop.
pub struct Terminal {
    active: bool,
}

impl Terminal {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self { active: true })
    }

    /// Wait up to `timeout` for input and report whether a quit key was hit.
    pub fn poll_quit(&self, timeout: Duration) -> io::Result<bool> {
        if !event::poll(timeout)? {
            return Ok(false);
        }
        while event::poll(Duration::ZERO)? {
            if let Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            {
                if is_quit(code, modifiers) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Block until any key is pressed.
    pub fn wait_key(&self) -> io::Result<()> {
        loop {
            if let Event::Key(KeyEvent {
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            {
                return Ok(());
            }
        }
    }

    pub fn leave(mut self) {
        self.restore();
    }

    fn restore(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        self.restore();
    }
}

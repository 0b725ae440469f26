//! Terminal frontend (crossterm)
//!
//! The court is scaled onto the terminal's cell grid. Terminals that
//! support keyboard enhancement report key releases; elsewhere a held key
//! is inferred from key-repeat presses arriving within a short window.

use std::collections::HashMap;
use std::io::{Write, stdout};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{cursor, execute, queue, style, terminal};
use log::{info, warn};

use super::{Key, Keyboard, Renderer};
use crate::audio::{AudioSink, SoundCue};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::{InitError, PlatformError};
use crate::renderer::{Frame, RectKind, TextAlign};

/// Smallest grid the court still reads on
pub const MIN_COLS: u16 = 48;
pub const MIN_ROWS: u16 = 16;

/// Hold after the first press; covers the usual key-repeat delay
const INITIAL_HOLD: Duration = Duration::from_millis(500);
/// Hold refreshed by each repeat press
const REPEAT_HOLD: Duration = Duration::from_millis(100);

/// Raw mode + alternate screen for the lifetime of the value
pub struct TerminalSession {
    enhanced: bool,
}

impl TerminalSession {
    pub fn start() -> Result<Self, InitError> {
        let (cols, rows) = terminal::size().map_err(InitError::Size)?;
        if cols < MIN_COLS || rows < MIN_ROWS {
            return Err(InitError::TooSmall {
                cols,
                rows,
                min_cols: MIN_COLS,
                min_rows: MIN_ROWS,
            });
        }

        terminal::enable_raw_mode().map_err(InitError::RawMode)?;
        let mut out = stdout();
        if let Err(e) = execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        ) {
            let _ = terminal::disable_raw_mode();
            return Err(InitError::Screen(e));
        }

        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
            && execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .is_ok();
        if !enhanced {
            warn!("Terminal does not report key releases; using key-repeat hold window");
        }

        info!("Terminal ready: {cols}x{rows}");
        Ok(Self { enhanced })
    }

    pub fn keyboard(&self) -> TerminalKeyboard {
        TerminalKeyboard::new(self.enhanced)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.enhanced {
            let _ = execute!(out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let _ = terminal::disable_raw_mode();
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Key::R),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Key::M),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Key::Q),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

/// Keyboard backed by crossterm events
#[derive(Debug)]
pub struct TerminalKeyboard {
    /// Release events are reported
    enhanced: bool,
    /// Held directional keys and when the hold lapses without a release
    held: HashMap<Key, Instant>,
}

impl TerminalKeyboard {
    pub fn new(enhanced: bool) -> Self {
        Self {
            enhanced,
            held: HashMap::new(),
        }
    }

    /// Fold one key event in; commands go to `pressed`
    pub fn handle(&mut self, event: KeyEvent, now: Instant, pressed: &mut Vec<Key>) {
        // Raw mode swallows SIGINT
        if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
            pressed.push(Key::Escape);
            return;
        }
        let Some(key) = map_key(event.code) else {
            return;
        };

        match (key, event.kind) {
            (Key::Up | Key::Down, KeyEventKind::Release) => {
                self.held.remove(&key);
            }
            (Key::Up | Key::Down, _) => self.hold(key, now),
            (_, KeyEventKind::Press) => pressed.push(key),
            _ => {}
        }
    }

    fn hold(&mut self, key: Key, now: Instant) {
        if !self.enhanced {
            // Without releases, a new direction replaces the old one
            let opposite = if key == Key::Up { Key::Down } else { Key::Up };
            self.held.remove(&opposite);
        }
        let window = if self.is_held_at(key, now) {
            REPEAT_HOLD
        } else {
            INITIAL_HOLD
        };
        let until = now + window;
        self.held
            .entry(key)
            .and_modify(|lapse| *lapse = (*lapse).max(until))
            .or_insert(until);
    }

    pub fn is_held_at(&self, key: Key, now: Instant) -> bool {
        self.held
            .get(&key)
            .is_some_and(|&lapse| self.enhanced || now < lapse)
    }
}

impl Keyboard for TerminalKeyboard {
    fn poll_pressed(&mut self) -> Result<Vec<Key>, PlatformError> {
        let mut pressed = Vec::new();
        while event::poll(Duration::ZERO).map_err(PlatformError::Input)? {
            if let Event::Key(key_event) = event::read().map_err(PlatformError::Input)? {
                self.handle(key_event, Instant::now(), &mut pressed);
            }
        }
        Ok(pressed)
    }

    fn is_held(&self, key: Key) -> bool {
        self.is_held_at(key, Instant::now())
    }
}

fn glyph(kind: RectKind) -> char {
    match kind {
        RectKind::Paddle => '█',
        RectKind::Ball => '■',
        RectKind::Boundary => '─',
        RectKind::Net => '│',
    }
}

/// Cells `[start, end)` covered by `[lo, hi]` at `scale`; at least one
/// cell for anything on screen
fn span(lo: f64, hi: f64, scale: f64, limit: usize) -> (usize, usize) {
    let start = ((lo * scale).floor().max(0.0) as usize).min(limit);
    let end = ((hi * scale).ceil().max(0.0) as usize)
        .max(start + 1)
        .min(limit);
    (start, end)
}

/// Scale a frame onto a `cols` x `rows` character grid
pub fn rasterize(frame: &Frame, cols: u16, rows: u16) -> Vec<String> {
    let (cols, rows) = (cols as usize, rows as usize);
    if cols == 0 || rows == 0 {
        return Vec::new();
    }
    let sx = cols as f64 / SCREEN_WIDTH;
    let sy = rows as f64 / SCREEN_HEIGHT;
    let mut grid = vec![' '; cols * rows];

    for item in &frame.rects {
        let (c0, c1) = span(item.rect.left(), item.rect.right(), sx, cols);
        let (r0, r1) = span(item.rect.top(), item.rect.bottom(), sy, rows);
        let ch = glyph(item.kind);
        for row in r0..r1 {
            grid[row * cols + c0..row * cols + c1].fill(ch);
        }
    }

    for item in &frame.texts {
        let row = ((item.y * sy).max(0.0) as usize).min(rows - 1);
        let len = item.text.chars().count();
        let anchor = (item.x * sx).max(0.0) as usize;
        let start = match item.align {
            TextAlign::Left => anchor,
            TextAlign::Center => anchor.saturating_sub(len / 2),
        };
        for (col, ch) in (start..cols).zip(item.text.chars()) {
            grid[row * cols + col] = ch;
        }
    }

    grid.chunks(cols).map(|row| row.iter().collect()).collect()
}

/// Draws frames onto stdout
#[derive(Debug, Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for TerminalRenderer {
    fn draw(&mut self, frame: &Frame) -> Result<(), PlatformError> {
        let (cols, rows) = terminal::size().map_err(PlatformError::Render)?;
        let mut out = stdout().lock();
        for (row, line) in rasterize(frame, cols, rows).iter().enumerate() {
            queue!(out, cursor::MoveTo(0, row as u16), style::Print(line))
                .map_err(PlatformError::Render)?;
        }
        out.flush().map_err(PlatformError::Render)
    }
}

/// Rings the terminal bell for each cue
#[derive(Debug, Default)]
pub struct TerminalBell;

impl AudioSink for TerminalBell {
    fn play(&mut self, _cue: SoundCue, _volume: f32) {
        let mut out = stdout().lock();
        let _ = out.write_all(b"\x07").and_then(|_| out.flush());
    }
}

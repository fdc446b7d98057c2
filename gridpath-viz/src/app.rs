//! Application state: grid editing, search triggering, and the animation
//! driver that replays recorded search events with pacing delays.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use gridpath_core::{Grid, Pos};
use gridpath_search::{Context, EventLog, Outcome, SearchEvent, Searcher, Strategy};

use crate::terminal::Terminal;

pub const ROWS: i32 = 20;
pub const COLS: i32 = 20;

/// An input message delivered by the terminal driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    Key(Key),
    /// Primary button pressed on a grid cell.
    MouseDown(Pos),
    /// Pointer moved to a grid cell (any button state).
    MouseMove(Pos),
    /// Primary button released.
    MouseUp,
    /// Terminal resized; repaint everything.
    Resize,
    /// Hard quit (Ctrl+C).
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
}

/// What a cell should look like, in increasing paint priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellVisual {
    Empty,
    Wall,
    Visited,
    Path,
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drag {
    None,
    Start,
    End,
}

/// An in-flight replay of a recorded search.
struct Animation {
    pending: VecDeque<SearchEvent>,
    next_at: Instant,
    outcome: Outcome,
}

pub struct App {
    grid: Grid,
    searcher: Searcher,
    strategy: Option<Strategy>,
    visit_delay: Duration,
    path_delay: Duration,
    /// Overlay flags by flat index, painted as the animation advances.
    visited: Vec<bool>,
    path: Vec<bool>,
    anim: Option<Animation>,
    drag: Drag,
    status: String,
    dirty: bool,
    quit: bool,
}

impl App {
    pub fn new(strategy: Option<Strategy>, visit_delay: Duration, path_delay: Duration) -> Self {
        let status = match strategy {
            Some(_) => String::from("draw walls with the mouse, then press enter"),
            None => String::from("no algorithm selected; press d or a"),
        };
        Self {
            grid: Grid::new(ROWS, COLS),
            searcher: Searcher::new(ROWS, COLS),
            strategy,
            visit_delay,
            path_delay,
            visited: vec![false; (ROWS * COLS) as usize],
            path: vec![false; (ROWS * COLS) as usize],
            anim: None,
            drag: Drag::None,
            status,
            dirty: true,
            quit: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn strategy_label(&self) -> &'static str {
        match self.strategy {
            Some(s) => s.name(),
            None => "none",
        }
    }

    pub fn quit(&self) -> bool {
        self.quit
    }

    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// How long the event loop may sleep before the animation needs a step.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        const IDLE: Duration = Duration::from_millis(100);
        match &self.anim {
            Some(anim) => anim.next_at.saturating_duration_since(now).min(IDLE),
            None => IDLE,
        }
    }

    pub fn cell_visual(&self, p: Pos) -> CellVisual {
        if p == self.grid.start() {
            return CellVisual::Start;
        }
        if p == self.grid.end() {
            return CellVisual::End;
        }
        let i = (p.row * COLS + p.col) as usize;
        if self.path[i] {
            CellVisual::Path
        } else if self.visited[i] {
            CellVisual::Visited
        } else if self.grid.is_wall(p) {
            CellVisual::Wall
        } else {
            CellVisual::Empty
        }
    }

    // -----------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------

    pub fn update(&mut self, msg: Msg) {
        match msg {
            Msg::Quit => self.quit = true,
            Msg::Resize => self.dirty = true,
            Msg::Key(key) => self.handle_key(key),
            Msg::MouseDown(p) => self.handle_mouse_down(p),
            Msg::MouseMove(p) => self.handle_mouse_move(p),
            Msg::MouseUp => self.drag = Drag::None,
        }
    }

    fn handle_key(&mut self, key: Key) {
        match key {
            Key::Char('q') => self.quit = true,
            Key::Char('d') => self.select_strategy(Strategy::Dijkstra),
            Key::Char('a') => self.select_strategy(Strategy::AStar),
            Key::Char('c') => self.clear(),
            Key::Char(' ') | Key::Enter => self.start_search(),
            Key::Escape => self.cancel_animation(),
            Key::Char(_) => {}
        }
    }

    fn select_strategy(&mut self, strategy: Strategy) {
        self.strategy = Some(strategy);
        self.set_status(format!("algorithm: {strategy}"));
    }

    /// Reset to a fresh grid, dropping walls, overlays, and any replay.
    fn clear(&mut self) {
        self.anim = None;
        self.grid = Grid::new(ROWS, COLS);
        self.visited.fill(false);
        self.path.fill(false);
        self.drag = Drag::None;
        self.set_status("cleared".into());
    }

    fn cancel_animation(&mut self) {
        if self.anim.take().is_some() {
            self.set_status("animation cancelled".into());
        }
    }

    fn handle_mouse_down(&mut self, p: Pos) {
        if self.anim.is_some() {
            // The grid is a single snapshot per search; no edits while the
            // replay is running.
            log::debug!("ignoring edit at {p} during replay");
            return;
        }
        if p == self.grid.start() {
            self.drag = Drag::Start;
        } else if p == self.grid.end() {
            self.drag = Drag::End;
        } else if self.grid.toggle_wall(p) {
            self.dirty = true;
        }
    }

    fn handle_mouse_move(&mut self, p: Pos) {
        if self.anim.is_some() {
            return;
        }
        let moved = match self.drag {
            Drag::Start => self.grid.set_start(p),
            Drag::End => self.grid.set_end(p),
            Drag::None => false,
        };
        if moved {
            self.dirty = true;
        }
    }

    // -----------------------------------------------------------------
    // Search + animation driver
    // -----------------------------------------------------------------

    fn start_search(&mut self) {
        if self.anim.is_some() {
            // Host-side Busy: one search at a time.
            log::warn!("search requested while a replay is in flight");
            self.set_status("a search is already running (esc to cancel)".into());
            return;
        }
        let Some(strategy) = self.strategy else {
            // Unrecognized / unselected strategy: a no-op by contract.
            log::debug!("search requested with no strategy selected");
            self.set_status("no algorithm selected; press d or a".into());
            return;
        };

        self.visited.fill(false);
        self.path.fill(false);

        let mut recording = EventLog::new();
        match self
            .searcher
            .run(&self.grid, strategy, &mut recording, &Context::new())
        {
            Ok(outcome) => {
                log::info!(
                    "{strategy} finished: {outcome:?}, {} events",
                    recording.len()
                );
                self.anim = Some(Animation {
                    pending: recording.events().iter().copied().collect(),
                    next_at: Instant::now(),
                    outcome,
                });
                self.set_status(format!("running {strategy}..."));
            }
            Err(err) => {
                log::warn!("search rejected: {err}");
                self.set_status(format!("search rejected: {err}"));
            }
        }
    }

    /// Apply every animation step that has come due.
    pub fn advance(&mut self, now: Instant) {
        while let Some(anim) = &mut self.anim {
            if now < anim.next_at {
                break;
            }
            match anim.pending.pop_front() {
                Some(event) => {
                    let delay = match event {
                        SearchEvent::Visited(p) => {
                            self.visited[(p.row * COLS + p.col) as usize] = true;
                            self.visit_delay
                        }
                        SearchEvent::Path(p) => {
                            self.path[(p.row * COLS + p.col) as usize] = true;
                            self.path_delay
                        }
                    };
                    anim.next_at = now + delay;
                    self.dirty = true;
                }
                None => {
                    let outcome = anim.outcome;
                    self.anim = None;
                    self.set_status(match outcome {
                        Outcome::PathFound { length } => {
                            format!("path found, length {length}")
                        }
                        Outcome::NoPath => "no path: end is sealed off".into(),
                        Outcome::Cancelled => "search cancelled".into(),
                    });
                }
            }
        }
    }

    fn set_status(&mut self, status: String) {
        self.status = status;
        self.dirty = true;
    }
}

/// Run the visualizer until the user quits.
pub fn run(
    strategy: Option<Strategy>,
    visit_delay: Duration,
    path_delay: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut term = Terminal::new()?;
    let mut app = App::new(strategy, visit_delay, path_delay);

    while !app.quit() {
        if app.take_dirty() {
            term.draw(&app)?;
        }
        let timeout = app.poll_timeout(Instant::now());
        if let Some(msg) = term.poll(timeout)? {
            app.update(msg);
            // Drain whatever else queued up while we slept.
            while let Some(msg) = term.poll(Duration::ZERO)? {
                app.update(msg);
            }
        }
        app.advance(Instant::now());
    }
    Ok(())
}

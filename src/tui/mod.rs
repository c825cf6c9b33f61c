//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the feed,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Input
//!
//! ```text
//! TuiEvent ──interpret()──▶ Vec<Action> ──update()──▶ Effect ──EffectRunner
//!                                                                  │
//!           mpsc::Receiver ◀── tokio::spawn (timers, share) ◀──────┘
//! ```
//!
//! Share targets that need raw terminal output (OSC 52) queue it on a
//! second channel; the loop writes it out between frames, never mid-draw.
//!
//! Mouse presses, drags and releases go through a `DragTracker`; a release
//! that moved becomes `Action::Gesture`, one that didn't is a tap and is
//! hit-tested against the rects recorded by the last frame.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (refresh spinner, swipe hint, toast, active drag): polls
//!   every ~80ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events or background
//!   actions.

mod component;
mod components;
mod drag;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::{Write, stdout};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::bookmarks::BookmarkStore;
use crate::core::config::ResolvedConfig;
use crate::core::feed::{Category, NewsItem};
use crate::core::gesture::{Debounce, Tap, TapTracker};
use crate::core::navigation::NavEvent;
use crate::core::share::Sharer;
use crate::core::state::App;
use crate::core::store::{FileStore, KeyValueStore};
use crate::tui::component::EventHandler;
use crate::tui::components::{MarketsPanelState, PanelEvent, SearchBar, SearchEvent};
use crate::tui::drag::{DragTracker, PointerRelease};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::ui::ScreenLayout;

/// How long a toast stays up.
pub const TOAST_DURATION: Duration = Duration::from_secs(2);

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys navigate the feed.
    Feed,
    /// Keys edit the search query.
    Search,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub input_mode: InputMode,
    pub search: SearchBar,
    pub markets: MarketsPanelState,
    /// Hit areas from the last frame.
    pub layout: ScreenLayout,
    pub drag: DragTracker,
    pub taps: TapTracker,
    /// Wheel notches arrive in bursts; one story per burst.
    pub wheel: Debounce,
    /// Toast text and when it was first seen.
    pub toast_seen: Option<(String, Instant)>,
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(cell_width_px: f64, cell_height_px: f64, wheel_debounce: Duration) -> Self {
        Self {
            input_mode: InputMode::Feed,
            search: SearchBar::new(),
            markets: MarketsPanelState::new(),
            layout: ScreenLayout::default(),
            drag: DragTracker::new(cell_width_px, cell_height_px),
            taps: TapTracker::default(),
            wheel: Debounce::new(wheel_debounce),
            toast_seen: None,
            spinner_frame: 0,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse capture)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Performs the I/O an `Effect` asks for. Timers and shares run on tokio
/// tasks and report back through the channel.
struct EffectRunner<S: KeyValueStore> {
    tx: mpsc::Sender<Action>,
    bookmarks: BookmarkStore<S>,
    sharer: Arc<Sharer>,
    swipe_reset: Duration,
    refresh_delay: Duration,
}

impl<S: KeyValueStore> EffectRunner<S> {
    /// Apply `action` and run its effect. Returns true when the app should quit.
    fn dispatch(&mut self, app: &mut App, action: Action) -> bool {
        let effect = update(app, action);
        self.run(effect)
    }

    fn run(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::ScheduleSwipeReset(generation) => {
                self.send_after(self.swipe_reset, Action::SwipeSettled(generation));
            }
            Effect::ScheduleRefresh => {
                self.send_after(self.refresh_delay, Action::RefreshDone);
            }
            Effect::SaveBookmark { id, headline } => {
                self.bookmarks.add(&id, &headline);
            }
            Effect::RemoveBookmark(id) => {
                self.bookmarks.remove(&id);
            }
            Effect::Share(data) => {
                let sharer = Arc::clone(&self.sharer);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let outcome = sharer.share(&data).await;
                    debug!("Share finished: {:?}", outcome);
                    if tx.send(Action::ShareFinished(outcome)).is_err() {
                        warn!("Share finished after the event loop exited");
                    }
                });
            }
        }
        false
    }

    fn send_after(&self, delay: Duration, action: Action) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(action).is_err() {
                debug!("Timer fired after the event loop exited");
            }
        });
    }
}

/// Turn one terminal event into zero or more actions. Presentation-only
/// changes (search buffer, panel scroll, drag tracking) happen on `tui`.
fn interpret(app: &App, tui: &mut TuiState, event: &TuiEvent, now: Instant) -> Vec<Action> {
    match event {
        TuiEvent::ForceQuit => return vec![Action::Quit],
        TuiEvent::Resize => {
            // Cell geometry changed under the press.
            tui.drag.cancel();
            return vec![];
        }
        TuiEvent::MouseDown(col, row) => {
            let origin = ui::gesture_origin(tui, *col, *row);
            tui.drag.press(*col, *row, now, origin);
            return vec![];
        }
        TuiEvent::MouseDrag(col, row) => {
            tui.drag.moved(*col, *row, now);
            return vec![];
        }
        TuiEvent::MouseUp(col, row) => {
            return match tui.drag.release(*col, *row, now) {
                Some(PointerRelease::Drag { sample, origin }) => {
                    vec![Action::Gesture {
                        sample,
                        origin,
                        at: now,
                    }]
                }
                Some(PointerRelease::Tap { col, row }) => tap(app, tui, col, row, now),
                None => vec![],
            };
        }
        TuiEvent::ScrollUp(col, row) | TuiEvent::ScrollDown(col, row) => {
            if app.markets_open && tui.markets.in_sheet(*col, *row) {
                return vec![];
            }
            if !tui.wheel.accept(now) {
                return vec![];
            }
            let nav = if matches!(event, TuiEvent::ScrollDown(..)) {
                NavEvent::Advance
            } else {
                NavEvent::Retreat
            };
            return vec![Action::Navigate(nav)];
        }
        TuiEvent::ScrollLeft(..) | TuiEvent::ScrollRight(..) => {
            if app.markets_open {
                tui.markets.handle_event(event);
            }
            return vec![];
        }
        _ => {}
    }

    match tui.input_mode {
        InputMode::Search => match tui.search.handle_event(event) {
            Some(SearchEvent::Changed(query)) => {
                vec![Action::Navigate(NavEvent::ChangeSearch(query))]
            }
            Some(SearchEvent::Submit) => {
                tui.input_mode = InputMode::Feed;
                vec![]
            }
            Some(SearchEvent::Cancel) => {
                tui.input_mode = InputMode::Feed;
                vec![Action::Navigate(NavEvent::ChangeSearch(String::new()))]
            }
            None => vec![],
        },
        InputMode::Feed => {
            if app.markets_open {
                if tui.markets.handle_event(event) == Some(PanelEvent::Dismiss) {
                    return vec![Action::CloseMarkets];
                }
                // Horizontal keys belong to the card scroller while it is open.
                if matches!(
                    event,
                    TuiEvent::CursorLeft
                        | TuiEvent::CursorRight
                        | TuiEvent::InputChar('h')
                        | TuiEvent::InputChar('l')
                ) {
                    return vec![];
                }
            }
            feed_key(app, tui, event)
        }
    }
}

fn feed_key(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Vec<Action> {
    let action = match event {
        TuiEvent::InputChar('q') => Action::Quit,
        TuiEvent::Escape if !app.nav.query.is_empty() => {
            tui.search.buffer.clear();
            Action::Navigate(NavEvent::ChangeSearch(String::new()))
        }
        TuiEvent::CursorDown | TuiEvent::InputChar('j' | ' ') => {
            Action::Navigate(NavEvent::Advance)
        }
        TuiEvent::CursorUp | TuiEvent::InputChar('k') => Action::Navigate(NavEvent::Retreat),
        TuiEvent::CursorRight | TuiEvent::Tab | TuiEvent::InputChar('l') => {
            Action::Navigate(NavEvent::NextCategory)
        }
        TuiEvent::CursorLeft | TuiEvent::BackTab | TuiEvent::InputChar('h') => {
            Action::Navigate(NavEvent::PrevCategory)
        }
        TuiEvent::Submit | TuiEvent::InputChar('m') => Action::OpenMarkets,
        TuiEvent::InputChar('b') => Action::ToggleBookmark,
        TuiEvent::InputChar('s') => Action::Share,
        TuiEvent::InputChar('r') => Action::Refresh,
        TuiEvent::InputChar('/') => {
            tui.search.open(&app.nav.query);
            tui.input_mode = InputMode::Search;
            return vec![];
        }
        TuiEvent::InputChar(c @ '1'..='8') => {
            let position = (*c as usize) - ('1' as usize);
            Action::Navigate(NavEvent::ChangeCategory(Category::ORDERED[position]))
        }
        _ => return vec![],
    };
    vec![action]
}

/// A press and release at the same cell.
fn tap(app: &App, tui: &mut TuiState, col: u16, row: u16, now: Instant) -> Vec<Action> {
    if app.markets_open {
        return if tui.markets.in_sheet(col, row) {
            vec![]
        } else {
            vec![Action::CloseMarkets]
        };
    }
    if let Some(category) = tui.layout.tab_at(col, row) {
        return vec![Action::Navigate(NavEvent::ChangeCategory(category))];
    }
    if tui.layout.on_markets_button(col, row) {
        return vec![Action::OpenMarkets];
    }
    if tui.layout.on_card(col, row) && tui.taps.tap(now, (col, row)) == Tap::Double {
        return vec![Action::ToggleBookmark];
    }
    vec![]
}

/// Track how long the current toast has been up; dismiss it once expired.
fn expire_toast(app: &App, tui: &mut TuiState, now: Instant) -> Option<Action> {
    let Some(text) = &app.toast else {
        tui.toast_seen = None;
        return None;
    };
    match &tui.toast_seen {
        Some((seen, since)) if seen == text => {
            (now.saturating_duration_since(*since) >= TOAST_DURATION).then_some(Action::DismissToast)
        }
        _ => {
            tui.toast_seen = Some((text.clone(), now));
            None
        }
    }
}

/// Write every queued escape sequence to `out`. Returns whether anything was written.
fn write_pending(rx: &mpsc::Receiver<String>, out: &mut impl Write) -> std::io::Result<bool> {
    let mut wrote = false;
    while let Ok(sequence) = rx.try_recv() {
        out.write_all(sequence.as_bytes())?;
        wrote = true;
    }
    if wrote {
        out.flush()?;
    }
    Ok(wrote)
}

pub fn run(config: ResolvedConfig, items: Vec<NewsItem>) -> std::io::Result<()> {
    let bookmarks = BookmarkStore::new(FileStore::new(&config.store_path));
    let mut app = App::from_config(items, &config, bookmarks.ids());
    let mut tui = TuiState::new(config.cell_width_px, config.cell_height_px, config.debounce);
    info!(
        "Feed ready: {} stories, {} bookmarked, boundary {}",
        app.items.len(),
        app.bookmarked.len(),
        app.boundary.label()
    );

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    // Raw escape sequences to emit between frames
    let (terminal_tx, terminal_rx) = mpsc::channel();
    let mut effects = EffectRunner {
        tx,
        bookmarks,
        sharer: Arc::new(Sharer::new(config.share_command.as_deref(), terminal_tx)),
        swipe_reset: config.swipe_reset,
        refresh_delay: config.refresh_delay,
    };

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.is_refreshing
            || app.swipe_direction.is_some()
            || app.toast.is_some()
            || tui.drag.is_dragging();

        if app.is_refreshing {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            for action in interpret(&app, &mut tui, &event, Instant::now()) {
                should_quit |= effects.dispatch(&mut app, action);
            }
        }

        if let Some(action) = expire_toast(&app, &mut tui, Instant::now()) {
            effects.dispatch(&mut app, action);
            needs_redraw = true;
        }

        if let Err(e) = write_pending(&terminal_rx, &mut stdout()) {
            warn!("Failed to write terminal sequence: {}", e);
        }

        // Actions from timers and share tasks
        while let Ok(action) = rx.try_recv() {
            should_quit |= effects.dispatch(&mut app, action);
            needs_redraw = true;
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    info!("oddsfeed shutting down");
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_tui_state() -> TuiState {
    use crate::core::config::{DEFAULT_CELL_HEIGHT_PX, DEFAULT_CELL_WIDTH_PX};
    use crate::core::gesture::DEFAULT_DEBOUNCE;
    TuiState::new(DEFAULT_CELL_WIDTH_PX, DEFAULT_CELL_HEIGHT_PX, DEFAULT_DEBOUNCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::share::{Osc52Share, ShareData, ShareError, ShareOutcome, ShareTarget};
    use crate::core::store::MemoryStore;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    /// A clipboard that never exists, forcing the terminal fallback.
    struct Unavailable;

    #[async_trait::async_trait]
    impl ShareTarget for Unavailable {
        fn name(&self) -> &str {
            "none"
        }

        async fn share(&self, _data: &ShareData) -> Result<(), ShareError> {
            Err(ShareError::Unavailable("headless".into()))
        }
    }

    fn press(app: &App, tui: &mut TuiState, event: TuiEvent) -> Vec<Action> {
        interpret(app, tui, &event, Instant::now())
    }

    fn draw(app: &App, tui: &mut TuiState) {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui::draw_ui(f, app, tui)).unwrap();
    }

    fn runner(
        swipe_reset: Duration,
        refresh_delay: Duration,
    ) -> (EffectRunner<MemoryStore>, mpsc::Receiver<Action>) {
        let (tx, rx) = mpsc::channel();
        let runner = EffectRunner {
            tx,
            bookmarks: BookmarkStore::new(MemoryStore::new()),
            sharer: Arc::new(Sharer::new(None, mpsc::channel().0)),
            swipe_reset,
            refresh_delay,
        };
        (runner, rx)
    }

    #[test]
    fn test_arrow_keys_map_to_navigation() {
        let app = test_app();
        let mut tui = test_tui_state();
        assert_eq!(
            press(&app, &mut tui, TuiEvent::CursorDown),
            vec![Action::Navigate(NavEvent::Advance)]
        );
        assert_eq!(
            press(&app, &mut tui, TuiEvent::InputChar('k')),
            vec![Action::Navigate(NavEvent::Retreat)]
        );
        assert_eq!(
            press(&app, &mut tui, TuiEvent::Tab),
            vec![Action::Navigate(NavEvent::NextCategory)]
        );
        assert_eq!(
            press(&app, &mut tui, TuiEvent::CursorLeft),
            vec![Action::Navigate(NavEvent::PrevCategory)]
        );
    }

    #[test]
    fn test_digit_picks_category() {
        let app = test_app();
        let mut tui = test_tui_state();
        assert_eq!(
            press(&app, &mut tui, TuiEvent::InputChar('1')),
            vec![Action::Navigate(NavEvent::ChangeCategory(Category::All))]
        );
        assert_eq!(
            press(&app, &mut tui, TuiEvent::InputChar('8')),
            vec![Action::Navigate(NavEvent::ChangeCategory(
                Category::ORDERED[7]
            ))]
        );
        assert!(press(&app, &mut tui, TuiEvent::InputChar('9')).is_empty());
    }

    #[test]
    fn test_search_mode_emits_live_query() {
        let app = test_app();
        let mut tui = test_tui_state();
        assert!(press(&app, &mut tui, TuiEvent::InputChar('/')).is_empty());
        assert_eq!(tui.input_mode, InputMode::Search);

        // 'q' is text here, not quit
        assert_eq!(
            press(&app, &mut tui, TuiEvent::InputChar('q')),
            vec![Action::Navigate(NavEvent::ChangeSearch("q".into()))]
        );
        assert_eq!(
            press(&app, &mut tui, TuiEvent::Escape),
            vec![Action::Navigate(NavEvent::ChangeSearch(String::new()))]
        );
        assert_eq!(tui.input_mode, InputMode::Feed);
    }

    #[test]
    fn test_escape_in_feed_clears_active_query() {
        let mut app = test_app();
        update(
            &mut app,
            Action::Navigate(NavEvent::ChangeSearch("chip".into())),
        );
        let mut tui = test_tui_state();
        assert_eq!(
            press(&app, &mut tui, TuiEvent::Escape),
            vec![Action::Navigate(NavEvent::ChangeSearch(String::new()))]
        );

        let app = test_app();
        assert!(press(&app, &mut tui, TuiEvent::Escape).is_empty());
    }

    #[test]
    fn test_open_panel_takes_horizontal_keys() {
        let mut app = test_app();
        update(&mut app, Action::OpenMarkets);
        let mut tui = test_tui_state();
        draw(&app, &mut tui);

        assert!(press(&app, &mut tui, TuiEvent::CursorRight).is_empty());
        assert_eq!(
            press(&app, &mut tui, TuiEvent::CursorDown),
            vec![Action::Navigate(NavEvent::Advance)]
        );
        assert_eq!(
            press(&app, &mut tui, TuiEvent::Escape),
            vec![Action::CloseMarkets]
        );
    }

    #[test]
    fn test_drag_release_becomes_gesture() {
        let app = test_app();
        let mut tui = test_tui_state();
        let t0 = Instant::now();
        interpret(&app, &mut tui, &TuiEvent::MouseDown(40, 20), t0);
        interpret(
            &app,
            &mut tui,
            &TuiEvent::MouseDrag(40, 15),
            t0 + Duration::from_millis(50),
        );
        let actions = interpret(
            &app,
            &mut tui,
            &TuiEvent::MouseUp(40, 14),
            t0 + Duration::from_millis(80),
        );
        match actions.as_slice() {
            [Action::Gesture { sample, .. }] => assert!(sample.offset_y < -50.0),
            other => panic!("expected one gesture, got {:?}", other),
        }
    }

    #[test]
    fn test_tap_on_tab_changes_category() {
        let app = test_app();
        let mut tui = test_tui_state();
        draw(&app, &mut tui);
        let (category, rect) = tui.layout.tabs[2];
        interpret(&app, &mut tui, &TuiEvent::MouseDown(rect.x, rect.y), Instant::now());
        assert_eq!(
            press(&app, &mut tui, TuiEvent::MouseUp(rect.x, rect.y)),
            vec![Action::Navigate(NavEvent::ChangeCategory(category))]
        );
    }

    #[test]
    fn test_double_tap_on_card_toggles_bookmark() {
        let app = test_app();
        let mut tui = test_tui_state();
        draw(&app, &mut tui);
        let card = tui.layout.card.unwrap();
        let (col, row) = (card.x + 2, card.y + 2);
        let t0 = Instant::now();

        interpret(&app, &mut tui, &TuiEvent::MouseDown(col, row), t0);
        assert!(interpret(&app, &mut tui, &TuiEvent::MouseUp(col, row), t0).is_empty());

        let t1 = t0 + Duration::from_millis(120);
        interpret(&app, &mut tui, &TuiEvent::MouseDown(col, row), t1);
        assert_eq!(
            interpret(&app, &mut tui, &TuiEvent::MouseUp(col, row), t1),
            vec![Action::ToggleBookmark]
        );
    }

    #[test]
    fn test_tap_outside_sheet_closes_markets() {
        let mut app = test_app();
        update(&mut app, Action::OpenMarkets);
        let mut tui = test_tui_state();
        draw(&app, &mut tui);
        interpret(&app, &mut tui, &TuiEvent::MouseDown(1, 0), Instant::now());
        assert_eq!(
            press(&app, &mut tui, TuiEvent::MouseUp(1, 0)),
            vec![Action::CloseMarkets]
        );
    }

    #[test]
    fn test_wheel_bursts_are_debounced() {
        let app = test_app();
        let mut tui = test_tui_state();
        let t0 = Instant::now();
        assert_eq!(
            interpret(&app, &mut tui, &TuiEvent::ScrollDown(10, 10), t0),
            vec![Action::Navigate(NavEvent::Advance)]
        );
        assert!(
            interpret(
                &app,
                &mut tui,
                &TuiEvent::ScrollDown(10, 10),
                t0 + Duration::from_millis(20)
            )
            .is_empty()
        );
    }

    #[test]
    fn test_toast_expires_after_duration() {
        let mut app = test_app();
        let mut tui = test_tui_state();
        app.toast = Some("Copied to clipboard".into());
        let t0 = Instant::now();
        assert_eq!(expire_toast(&app, &mut tui, t0), None);
        assert_eq!(
            expire_toast(&app, &mut tui, t0 + Duration::from_millis(500)),
            None
        );
        assert_eq!(
            expire_toast(&app, &mut tui, t0 + TOAST_DURATION),
            Some(Action::DismissToast)
        );

        // A new message restarts the clock
        app.toast = Some("Shared".into());
        assert_eq!(expire_toast(&app, &mut tui, t0 + TOAST_DURATION), None);
    }

    #[tokio::test]
    async fn test_refresh_effect_reports_back() {
        let (mut runner, rx) = runner(Duration::from_millis(5), Duration::from_millis(10));
        let mut app = test_app();
        assert!(!runner.dispatch(&mut app, Action::Refresh));
        assert!(app.is_refreshing);

        tokio::time::sleep(Duration::from_millis(60)).await;
        let action = rx.try_recv().unwrap();
        assert_eq!(action, Action::RefreshDone);
        runner.dispatch(&mut app, action);
        assert!(!app.is_refreshing);
    }

    #[tokio::test]
    async fn test_bookmark_effects_persist() {
        let (mut runner, _rx) = runner(Duration::from_millis(5), Duration::from_millis(5));
        let mut app = test_app();
        let id = app.current().unwrap().id.clone();

        runner.dispatch(&mut app, Action::ToggleBookmark);
        assert!(runner.bookmarks.contains(&id));

        runner.dispatch(&mut app, Action::ToggleBookmark);
        assert!(!runner.bookmarks.contains(&id));
    }

    #[test]
    fn test_queued_sequences_are_written_in_order() {
        let (tx, rx) = mpsc::channel();
        let mut out = Vec::new();
        assert!(!write_pending(&rx, &mut out).unwrap());

        tx.send("\x1b]52;c;YQ==\x07".to_string()).unwrap();
        tx.send("\x1b]52;c;Yg==\x07".to_string()).unwrap();
        assert!(write_pending(&rx, &mut out).unwrap());
        assert_eq!(out, b"\x1b]52;c;YQ==\x07\x1b]52;c;Yg==\x07");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_terminal_share_reaches_loop_writer() {
        let (terminal_tx, terminal_rx) = mpsc::channel();
        let (tx, rx) = mpsc::channel();
        let mut runner = EffectRunner {
            tx,
            bookmarks: BookmarkStore::new(MemoryStore::new()),
            sharer: Arc::new(Sharer::with_targets(
                None,
                Box::new(Unavailable),
                Box::new(Osc52Share::new(terminal_tx)),
            )),
            swipe_reset: Duration::ZERO,
            refresh_delay: Duration::ZERO,
        };
        let mut app = test_app();
        runner.dispatch(&mut app, Action::Share);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(
            rx.try_recv().unwrap(),
            Action::ShareFinished(ShareOutcome::Copied)
        );
        let mut out = Vec::new();
        assert!(write_pending(&terminal_rx, &mut out).unwrap());
        assert!(out.starts_with(b"\x1b]52;c;"));
    }

    #[test]
    fn test_quit_stops_loop() {
        let (tx, _rx) = mpsc::channel();
        let mut runner = EffectRunner {
            tx,
            bookmarks: BookmarkStore::new(MemoryStore::new()),
            sharer: Arc::new(Sharer::new(None, mpsc::channel().0)),
            swipe_reset: Duration::ZERO,
            refresh_delay: Duration::ZERO,
        };
        let mut app = test_app();
        assert!(runner.dispatch(&mut app, Action::Quit));
    }
}

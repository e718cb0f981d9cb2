//! Application controller: the navigation container plus the mounted screen

use crate::animation::EntryAnimator;
use crate::api::ResourceFetcher;
use crate::cli::AppConfig;
use crate::domain::navigation::{NavParams, Navigator, Route};
use crate::domain::screen::{DetailScreen, ListScreen, Selection};
use crate::domain::EntityKind;
use crate::error::Result;
use crate::gesture::{PointerEvent, SwipeTracker, SWIPE_THRESHOLD};
use crate::loader::{FetchOutcome, FetchRequest, SyncFetchManager};
use crate::tui::{self, KeyAction};
use ratatui::layout::Rect;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, warn};

/// Lines scrolled per page on detail screens
const PAGE_SCROLL: i32 = 10;

/// The screen instance for the route on top of the stack
#[derive(Debug)]
pub enum Screen {
    List(ListScreen),
    Detail(DetailScreen),
}

impl Screen {
    fn mount(route: &Route) -> Self {
        match route {
            Route::List(kind) => Screen::List(ListScreen::new(*kind)),
            Route::Detail { kind, url } => Screen::Detail(DetailScreen::new(*kind, url.clone())),
        }
    }

    fn request(&self) -> FetchRequest {
        match self {
            Screen::List(screen) => FetchRequest::Collection(screen.kind()),
            Screen::Detail(screen) => FetchRequest::Detail(screen.url().to_string()),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Screen::List(screen) => screen.kind(),
            Screen::Detail(screen) => screen.kind(),
        }
    }
}

/// Whether the main loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppFlow {
    Continue,
    Quit,
}

pub struct App {
    navigator: Navigator,
    screen: Screen,
    fetches: SyncFetchManager,
    animator: EntryAnimator,
    swipe: SwipeTracker,
    show_help: bool,
}

impl App {
    /// Mounts the start route and issues its fetch
    pub fn new(config: &AppConfig, fetcher: Arc<dyn ResourceFetcher>) -> Result<Self> {
        let start = config.start.config().list_route;
        let navigator = Navigator::new(start, NavParams::none())?;
        let screen = Screen::mount(navigator.current());
        let mut app = Self {
            navigator,
            screen,
            fetches: SyncFetchManager::new(fetcher)?,
            animator: EntryAnimator::new(config.animations),
            swipe: SwipeTracker::default(),
            show_help: config.show_help,
        };
        app.begin_fetch();
        Ok(app)
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn animator(&self) -> &EntryAnimator {
        &self.animator
    }

    pub fn swipe(&self) -> &SwipeTracker {
        &self.swipe
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    /// Whether the screen is still waiting on its fetch
    pub fn is_loading(&self) -> bool {
        self.fetches.is_pending()
    }

    /// Whether the next frame will differ without any input
    pub fn is_animating(&self, now: Instant) -> bool {
        self.is_loading() || self.animator.is_animating(now)
    }

    /// Applies any arrived fetch result and advances row animations
    pub fn tick(&mut self, now: Instant) {
        if let Some(outcome) = self.fetches.poll() {
            match (&mut self.screen, outcome) {
                (Screen::List(screen), FetchOutcome::Collection(result)) => {
                    screen.apply_collection(result)
                }
                (Screen::Detail(screen), FetchOutcome::Detail(result)) => {
                    screen.apply_detail(result)
                }
                _ => warn!("Fetch outcome does not match the mounted screen"),
            }
        }
        self.sync_rows(now);
    }

    pub fn handle_action(&mut self, action: KeyAction, now: Instant) -> AppFlow {
        if self.show_help {
            if action == KeyAction::Quit {
                return AppFlow::Quit;
            }
            // Any other key closes help
            self.show_help = false;
            return AppFlow::Continue;
        }

        match action {
            KeyAction::Quit => return AppFlow::Quit,
            KeyAction::Help => self.show_help = true,
            KeyAction::Back => {
                if !self.navigator.go_back() {
                    return AppFlow::Quit;
                }
                self.remount();
            }
            KeyAction::NextEntity => {
                let next = self.screen.kind().next();
                self.navigator.reset_to(next);
                self.remount();
            }
            KeyAction::PreviousEntity => {
                let previous = self.screen.kind().previous();
                self.navigator.reset_to(previous);
                self.remount();
            }
            KeyAction::Up => self.move_by(-1),
            KeyAction::Down => self.move_by(1),
            KeyAction::PageUp => self.move_by(-PAGE_SCROLL),
            KeyAction::PageDown => self.move_by(PAGE_SCROLL),
            KeyAction::Input(c) => {
                if let Screen::List(screen) = &mut self.screen {
                    screen.push_char(c);
                }
            }
            KeyAction::DeleteChar => {
                if let Screen::List(screen) = &mut self.screen {
                    screen.pop_char();
                }
            }
            KeyAction::ClearQuery => {
                if let Screen::List(screen) = &mut self.screen {
                    screen.clear_query();
                }
            }
            KeyAction::Select => {
                let selection = match &self.screen {
                    Screen::List(screen) => screen.select_highlighted(),
                    Screen::Detail(_) => None,
                };
                if let Some(selection) = selection {
                    self.open(selection);
                }
            }
            KeyAction::Swipe => {
                if let Screen::List(screen) = &self.screen {
                    self.swipe.nudge(screen.highlighted(), SWIPE_THRESHOLD);
                }
                self.finish_swipe();
            }
            KeyAction::None => {}
        }

        self.sync_rows(now);
        AppFlow::Continue
    }

    /// Feeds pointer input to the swipe tracker.
    ///
    /// A press starts a swipe on the list row under it, laid out within
    /// `viewport`; presses anywhere else cancel any swipe in progress.
    pub fn handle_pointer(&mut self, event: PointerEvent, viewport: Rect, now: Instant) {
        let Screen::List(screen) = &self.screen else {
            return;
        };
        match event {
            PointerEvent::Down { column, row } => {
                let rows_area = tui::list_layout(viewport)[2];
                match tui::row_at(rows_area, screen, column, row) {
                    Some(index) => self.swipe.begin(index, column),
                    None => self.swipe.cancel(),
                }
            }
            PointerEvent::Drag { column } => self.swipe.drag(column),
            PointerEvent::Up => self.finish_swipe(),
        }
        self.sync_rows(now);
    }

    fn finish_swipe(&mut self) {
        let Some(row) = self.swipe.release() else {
            return;
        };
        let selection = match &self.screen {
            Screen::List(screen) => screen.select(row),
            Screen::Detail(_) => None,
        };
        if let Some(selection) = selection {
            self.open(selection);
        }
    }

    fn move_by(&mut self, delta: i32) {
        match &mut self.screen {
            Screen::List(screen) => {
                for _ in 0..delta.unsigned_abs() {
                    if delta < 0 {
                        screen.move_up();
                    } else {
                        screen.move_down();
                    }
                }
            }
            Screen::Detail(screen) => {
                let line_count = screen
                    .page()
                    .map(|page| tui::detail_lines(&page).len())
                    .unwrap_or(0);
                screen.scroll_by(delta, line_count);
            }
        }
    }

    /// Navigates to the detail route for a selected row
    fn open(&mut self, selection: Selection) {
        let route = self.screen.kind().config().detail_route;
        match self.navigator.navigate(route, NavParams::with_url(selection.url)) {
            Ok(_) => self.remount(),
            Err(e) => error!(route, error = %e, "Navigation failed"),
        }
    }

    /// Replaces the mounted screen with a fresh instance for the current route
    fn remount(&mut self) {
        self.fetches.abandon();
        self.swipe.cancel();
        self.animator.reset();
        self.screen = Screen::mount(self.navigator.current());
        self.begin_fetch();
    }

    fn begin_fetch(&mut self) {
        let request = self.screen.request();
        let ticket = self.fetches.begin(request);
        debug!(?ticket, route = self.navigator.current().name(), "Screen mounted");
    }

    fn sync_rows(&mut self, now: Instant) {
        if let Screen::List(screen) = &self.screen {
            let config = screen.config();
            let keys: Vec<String> = screen
                .visible()
                .iter()
                .map(|s| s.row_key(config))
                .collect();
            self.animator.sync(keys, now);
        }
    }
}

use std::time::{Duration, Instant};

use oddsfeed::core::action::{Action, Effect, update};
use oddsfeed::core::catalog;
use oddsfeed::core::feed::Category;
use oddsfeed::core::gesture::{DragSample, GestureOrigin};
use oddsfeed::core::navigation::{BoundaryPolicy, NavEvent};
use oddsfeed::core::state::App;

// ============================================================================
// Helper Functions
// ============================================================================

fn app() -> App {
    App::new(catalog::builtin().to_vec())
}

fn nav(app: &mut App, event: NavEvent) {
    update(app, Action::Navigate(event));
}

fn drag(app: &mut App, dx: f64, dy: f64, at: Instant) -> Effect {
    update(
        app,
        Action::Gesture {
            sample: DragSample::new(dx, dy, 0.0, 0.0),
            origin: GestureOrigin::Feed,
            at,
        },
    )
}

// ============================================================================
// Browsing
// ============================================================================

#[test]
fn test_builtin_feed_opens_on_first_story() {
    let app = app();
    assert_eq!(app.nav.category, Category::All);
    assert_eq!(app.filtered().len(), catalog::builtin().len());
    assert_eq!(app.current().map(|i| i.id.as_str()), Some(catalog::builtin()[0].id.as_str()));
}

#[test]
fn test_advance_clamps_at_end_of_category() {
    let mut app = app();
    nav(&mut app, NavEvent::ChangeCategory(Category::Politics));
    let len = app.filtered().len();
    assert!(len >= 2);
    for _ in 0..len + 3 {
        nav(&mut app, NavEvent::Advance);
    }
    assert_eq!(app.nav.index, len - 1);
    assert!(app.upcoming().is_none());
}

#[test]
fn test_wrap_policy_cycles_stories_and_categories() {
    let mut app = app();
    app.boundary = BoundaryPolicy::Wrap;
    nav(&mut app, NavEvent::Retreat);
    assert_eq!(app.nav.index, app.filtered().len() - 1);

    nav(&mut app, NavEvent::PrevCategory);
    assert_eq!(app.nav.category, *Category::ORDERED.last().unwrap());
    nav(&mut app, NavEvent::NextCategory);
    assert_eq!(app.nav.category, Category::All);
}

#[test]
fn test_category_without_stories_shows_nothing() {
    let mut app = app();
    nav(&mut app, NavEvent::ChangeCategory(Category::Sports));
    assert!(app.current().is_none());
    update(&mut app, Action::OpenMarkets);
    assert!(!app.markets_open);
}

#[test]
fn test_search_narrows_and_resets_index() {
    let mut app = app();
    nav(&mut app, NavEvent::Advance);
    nav(&mut app, NavEvent::ChangeSearch("WILLOW".into()));
    assert_eq!(app.nav.index, 0);
    let matches = app.filtered();
    assert_eq!(matches.len(), 1);
    assert!(matches[0].headline.contains("Willow"));

    nav(&mut app, NavEvent::ChangeSearch(String::new()));
    assert_eq!(app.filtered().len(), catalog::builtin().len());
}

#[test]
fn test_category_change_keeps_query() {
    let mut app = app();
    nav(&mut app, NavEvent::ChangeSearch("willow".into()));
    nav(&mut app, NavEvent::ChangeCategory(Category::Technology));
    assert_eq!(app.nav.query, "willow");
    assert_eq!(app.filtered().len(), 1);

    nav(&mut app, NavEvent::ChangeCategory(Category::Business));
    assert!(app.current().is_none());
}

// ============================================================================
// Gestures
// ============================================================================

#[test]
fn test_swipe_up_advances_and_settles() {
    let mut app = app();
    let effect = drag(&mut app, 0.0, -120.0, Instant::now());
    assert_eq!(app.nav.index, 1);
    let Effect::ScheduleSwipeReset(generation) = effect else {
        panic!("expected a reset timer, got {:?}", effect);
    };
    assert!(app.swipe_direction.is_some());

    update(&mut app, Action::SwipeSettled(generation));
    assert!(app.swipe_direction.is_none());
}

#[test]
fn test_stale_swipe_reset_is_ignored() {
    let mut app = app();
    let t0 = Instant::now();
    let Effect::ScheduleSwipeReset(first) = drag(&mut app, 0.0, -120.0, t0) else {
        panic!("first swipe rejected");
    };
    let Effect::ScheduleSwipeReset(_) = drag(&mut app, 0.0, 120.0, t0 + Duration::from_millis(350))
    else {
        panic!("second swipe rejected");
    };

    update(&mut app, Action::SwipeSettled(first));
    assert!(app.swipe_direction.is_some());
}

#[test]
fn test_swipe_right_goes_to_previous_category() {
    let mut app = app();
    nav(&mut app, NavEvent::ChangeCategory(Category::Business));
    drag(&mut app, 90.0, 10.0, Instant::now());
    assert_eq!(app.nav.category, Category::Technology);
    assert_eq!(app.nav.index, 0);
}

// ============================================================================
// Refresh
// ============================================================================

#[test]
fn test_refresh_rewinds_to_first_story() {
    let mut app = app();
    nav(&mut app, NavEvent::ChangeCategory(Category::Technology));
    nav(&mut app, NavEvent::Advance);
    nav(&mut app, NavEvent::Advance);

    assert_eq!(update(&mut app, Action::Refresh), Effect::ScheduleRefresh);
    assert_eq!(update(&mut app, Action::Refresh), Effect::None);
    update(&mut app, Action::RefreshDone);

    assert!(!app.is_refreshing);
    assert_eq!(app.nav.index, 0);
    assert_eq!(app.nav.category, Category::Technology);
}

//! Debounced global search through the controller.

use crate::helpers::{TrackBuilder, controller_with, result_indices, t0};
use std::time::Duration;
use tracktable::{Intent, IntentOutcome};

fn catalogue() -> Vec<tracktable::Record> {
    vec![
        TrackBuilder::new("Yellow").artist("Coldplay").build(),
        TrackBuilder::new("Clocks").artist("Coldplay").build(),
        TrackBuilder::new("Yesterday").artist("The Beatles").build(),
        TrackBuilder::new("Blue").artist("Joni Mitchell").genre("folk").build(),
    ]
}

const QUIET: Duration = Duration::from_millis(300);

#[test]
fn test_search_applies_after_quiet_period() {
    let mut controller = controller_with(catalogue());
    let start = t0();

    controller.set_search_input("cold", start);
    assert_eq!(controller.search_input(), "cold");
    assert!(controller.summary().search_pending);
    assert!(!controller.tick(start + Duration::from_millis(299)));
    assert_eq!(result_indices(&controller).len(), 4);

    assert!(controller.tick(start + QUIET));
    assert_eq!(result_indices(&controller), vec![0, 1]);
    assert!(controller.summary().search_active);
    assert!(!controller.summary().search_pending);
}

#[test]
fn test_each_keystroke_restarts_the_timer() {
    let mut controller = controller_with(catalogue());
    let start = t0();

    controller.set_search_input("y", start);
    controller.set_search_input("ye", start + Duration::from_millis(200));
    controller.set_search_input("yes", start + Duration::from_millis(400));

    // 300ms after the first keystroke, but not after the last
    assert!(!controller.tick(start + Duration::from_millis(500)));
    assert_eq!(
        controller.search_deadline(),
        Some(start + Duration::from_millis(700))
    );

    assert!(controller.tick(start + Duration::from_millis(700)));
    assert_eq!(result_indices(&controller), vec![2]);
}

#[test]
fn test_submit_applies_immediately() {
    let mut controller = controller_with(catalogue());
    let now = t0();

    controller.dispatch(Intent::SearchInput("folk".into()), now).unwrap();
    let outcome = controller.dispatch(Intent::SubmitSearch, now).unwrap();
    assert_eq!(outcome, IntentOutcome::Applied);
    assert_eq!(result_indices(&controller), vec![3]);

    // Nothing pending: submitting again is a no-op
    let outcome = controller.dispatch(Intent::SubmitSearch, now).unwrap();
    assert_eq!(outcome, IntentOutcome::Ignored);
}

#[test]
fn test_search_resets_to_first_page() {
    let records: Vec<_> = (0..120)
        .map(|i| TrackBuilder::new(format!("Song {}", i)).build())
        .collect();
    let mut controller = controller_with(records);
    controller.last_page();
    assert_eq!(controller.pagination().page_index(), 2);

    controller.set_search_input("song 1", t0());
    controller.flush_search();
    assert_eq!(controller.pagination().page_index(), 0);
    // "Song 1", "Song 10".."Song 19", "Song 100".."Song 119"
    assert_eq!(controller.result_ids().len(), 31);
}

#[test]
fn test_clear_filters_cancels_pending_search() {
    let mut controller = controller_with(catalogue());
    let start = t0();
    controller.set_search_input("blue", start);
    controller.flush_search();
    assert_eq!(result_indices(&controller), vec![3]);

    controller.set_search_input("yellow", start);
    controller.clear_filters();
    assert_eq!(controller.search_input(), "");
    assert!(!controller.tick(start + QUIET));
    assert_eq!(result_indices(&controller).len(), 4);
}

#[test]
fn test_retyping_the_applied_term_changes_nothing() {
    let mut controller = controller_with(catalogue());
    let start = t0();
    controller.set_search_input("clocks", start);
    assert!(controller.tick(start + QUIET));

    controller.set_search_input("clocks", start + QUIET);
    assert!(!controller.tick(start + QUIET * 2));
    assert_eq!(result_indices(&controller), vec![1]);
}

use scrape_core::{update, AppState, Msg};

#[test]
fn completion_without_pending_job_leaves_state_untouched() {
    let state = AppState::new();
    let (next, effects) = update(
        state.clone(),
        Msg::ScrapeFinished {
            job_id: 42,
            records: Vec::new(),
            pages_ok: 1,
            pages_failed: 0,
        },
    );

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

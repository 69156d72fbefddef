use crate::{Effect, ListState, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update<T>(mut state: ListState<T>, msg: Msg<T>) -> (ListState<T>, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => {
            // The first load always starts over from page 1.
            state.reset_page();
            vec![state.begin_fetch(1)]
        }
        Msg::QueryChanged(query) => {
            // Only a changed value triggers a reload.
            if query == state.query() {
                return (state, Vec::new());
            }
            state.set_query(query);
            state.reset_page();
            vec![state.begin_fetch(1)]
        }
        Msg::LoadMoreRequested => {
            if state.is_loading() || !state.has_more() {
                return (state, Vec::new());
            }
            let next = state.advance_page();
            vec![state.begin_fetch(next)]
        }
        Msg::RefreshRequested => {
            state.reset_page();
            vec![state.begin_fetch(1)]
        }
        Msg::PageFetched {
            request_id,
            page,
            result,
        } => {
            let accepted = state.accepts(request_id);
            state.settle();
            if accepted {
                match result {
                    Ok(result) => state.apply_page(page, result),
                    Err(_detail) => state.apply_failure(),
                }
                state.finish_loading();
            }
            Vec::new()
        }
    };

    (state, effects)
}

use crate::{visit_key, CrawlState, Effect, Msg, StopReason};

/// Pure update function: applies a message to the crawl state and returns the
/// next effect. Messages received after `Done` are ignored.
pub fn update(mut state: CrawlState, msg: Msg) -> (CrawlState, Vec<Effect>) {
    if state.is_done() {
        return (state, Vec::new());
    }

    let next = match msg {
        Msg::PageExtracted {
            url,
            final_url,
            records,
            next_page,
        } => {
            let final_url = final_url.filter(|landed| visit_key(landed) != visit_key(&url));
            match final_url {
                // Redirected onto a page that was already extracted: its
                // records are in the result set once, so drop this copy.
                Some(landed) if state.has_visited(&landed) => {
                    state.record_page(&url, None, Vec::new());
                    Err(StopReason::CycleDetected { url: landed })
                }
                final_url => {
                    state.record_page(&url, final_url.as_deref(), records);
                    match next_page {
                        None => Err(StopReason::LastPage),
                        Some(next) if state.has_visited(&next) => {
                            Err(StopReason::CycleDetected { url: next })
                        }
                        Some(next) => match state.page_limit_reached() {
                            Some(limit) => Err(StopReason::PageLimitReached { limit }),
                            None => Ok(next),
                        },
                    }
                }
            }
        }
        Msg::FetchFailed { url, reason } => Err(StopReason::FetchFailed { url, reason }),
        Msg::CancelRequested => Err(StopReason::Cancelled),
    };

    let effect = match next {
        Ok(url) => {
            state.continue_with(url.clone());
            Effect::FetchPage { url }
        }
        Err(reason) => {
            state.finish(reason.clone());
            Effect::Finish { reason }
        }
    };

    (state, vec![effect])
}

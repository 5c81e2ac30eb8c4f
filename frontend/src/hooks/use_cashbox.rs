use shared::config::LoaderConfig;
use shared::{CashboxRow, LoadOutcome, PaginatedLoader};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::{ApiClient, CashboxPages};
use crate::services::logging::Logger;
use crate::services::scroll::{current_metrics, ThrottledScroll};

#[derive(Clone, PartialEq)]
pub struct CashboxState {
    pub rows: Vec<CashboxRow>,
    /// No response has been folded in yet
    pub initial_loading: bool,
    /// A later page is being fetched
    pub loading_more: bool,
    pub end: bool,
    pub error: Option<String>,
}

pub struct UseCashboxResult {
    pub state: CashboxState,
    pub actions: UseCashboxActions,
}

#[derive(Clone)]
pub struct UseCashboxActions {
    pub retry: Callback<()>,
}

type CashboxLoader = PaginatedLoader<CashboxPages>;

fn run_fetch(loader: CashboxLoader, error: UseStateHandle<Option<String>>, first: bool) {
    spawn_local(async move {
        let result = if first {
            loader.request_next_page().await
        } else {
            let config = LoaderConfig::default();
            match current_metrics() {
                Some(metrics) => loader.load_more_if_needed(metrics, config.threshold_ratio).await,
                None => Ok(LoadOutcome::Skipped),
            }
        };

        match result {
            Ok(LoadOutcome::Replaced { rows }) | Ok(LoadOutcome::Appended { rows }) => {
                Logger::debug_with_component("cashbox", &format!("Loaded {} rows", rows));
                error.set(None);
            }
            Ok(_) => {}
            Err(e) => {
                Logger::error_with_component("cashbox", &format!("Failed to load page: {}", e));
                error.set(Some(e.message()));
            }
        }
    });
}

/// Cashbox ledger with infinite scroll.
///
/// The first page loads on mount. Scrolling near the bottom of the window
/// fetches the next page, throttled; nothing happens once the server reports
/// the end. Unmounting resets the loader so late responses are dropped.
#[hook]
pub fn use_cashbox(api_client: &ApiClient) -> UseCashboxResult {
    let loader = {
        let api_client = api_client.clone();
        use_memo((), move |_| PaginatedLoader::new(CashboxPages::new(api_client)))
    };
    let error = use_state(|| Option::<String>::None);
    let update = use_force_update();

    {
        let loader = (*loader).clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            loader.set_on_change(move || update.force_update());
            run_fetch(loader.clone(), error.clone(), true);

            let config = LoaderConfig::default();
            let scroll_loader = loader.clone();
            let scroll = ThrottledScroll::attach(config.throttle_ms, move |metrics| {
                let wanted = scroll_loader
                    .state()
                    .should_load_more(&metrics, config.threshold_ratio);
                if wanted {
                    run_fetch(scroll_loader.clone(), error.clone(), false);
                }
            });
            if scroll.is_none() {
                Logger::warn_with_component("cashbox", "No window to listen for scroll on");
            }

            move || {
                drop(scroll);
                loader.clear_on_change();
                loader.reset();
            }
        });
    }

    let retry = {
        let loader = (*loader).clone();
        let error = error.clone();
        Callback::from(move |_: ()| {
            run_fetch(loader.clone(), error.clone(), true);
        })
    };

    let state = {
        let loader_state = loader.state();
        let loaded = loader_state.has_loaded();
        CashboxState {
            rows: loader_state.rows().to_vec(),
            initial_loading: !loaded,
            loading_more: loaded && loader_state.is_loading(),
            end: loader_state.is_end(),
            error: (*error).clone(),
        }
    };

    UseCashboxResult {
        state,
        actions: UseCashboxActions { retry },
    }
}

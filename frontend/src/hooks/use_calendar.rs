use shared::config::DEFAULT_WEEK_START;
use shared::{CalendarStatsResponse, MonthGrid, YearMonth};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct CalendarState {
    pub month: YearMonth,
    pub grid: Rc<MonthGrid>,
    pub stats: Option<CalendarStatsResponse>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UseCalendarResult {
    pub state: CalendarState,
    pub actions: UseCalendarActions,
}

#[derive(Clone)]
pub struct UseCalendarActions {
    pub prev_month: Callback<MouseEvent>,
    pub next_month: Callback<MouseEvent>,
    pub refresh_calendar: Callback<()>,
}

#[hook]
pub fn use_calendar(api_client: &ApiClient) -> UseCalendarResult {
    let grid = use_state(|| Rc::new(MonthGrid::for_current_month(DEFAULT_WEEK_START)));
    let month = grid.month();
    let stats = use_state(|| Option::<CalendarStatsResponse>::None);
    let loading = use_state(|| true);
    let error = use_state(|| Option::<String>::None);
    let refresh_token = use_state(|| 0u32);

    // Reload stats when the month changes; a response for a month we have
    // already left is ignored
    {
        let api_client = api_client.clone();
        let stats = stats.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with((month, *refresh_token), move |(month, _)| {
            let cancelled = Rc::new(Cell::new(false));
            let month = *month;

            loading.set(true);
            {
                let cancelled = cancelled.clone();
                spawn_local(async move {
                    let result = api_client.cashbox_calendar(Some(month)).await;
                    if cancelled.get() {
                        return;
                    }
                    match result {
                        Ok(data) => {
                            stats.set(Some(data));
                            error.set(None);
                        }
                        Err(e) => {
                            Logger::error_with_component(
                                "calendar",
                                &format!("Failed to fetch stats for {}: {}", month, e),
                            );
                            stats.set(None);
                            error.set(Some(e.message()));
                        }
                    }
                    loading.set(false);
                });
            }

            move || cancelled.set(true)
        });
    }

    let refresh_calendar = {
        let refresh_token = refresh_token.clone();
        Callback::from(move |_: ()| refresh_token.set(refresh_token.wrapping_add(1)))
    };

    let prev_month = {
        let grid = grid.clone();
        Callback::from(move |_: MouseEvent| {
            grid.set(Rc::new(MonthGrid::build(grid.month().previous(), DEFAULT_WEEK_START)));
        })
    };

    let next_month = {
        let grid = grid.clone();
        Callback::from(move |_: MouseEvent| {
            grid.set(Rc::new(MonthGrid::build(grid.month().next(), DEFAULT_WEEK_START)));
        })
    };

    let state = CalendarState {
        month,
        grid: (*grid).clone(),
        stats: (*stats).clone(),
        loading: *loading,
        error: (*error).clone(),
    };

    let actions = UseCalendarActions {
        prev_month,
        next_month,
        refresh_calendar,
    };

    UseCalendarResult { state, actions }
}

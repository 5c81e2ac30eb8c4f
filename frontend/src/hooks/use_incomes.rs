use shared::forms::merge_saved_parking;
use shared::{IncomeSource, IncomesRequest, ParkingSaveResponse};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncomeRows {
    pub rows: Vec<IncomeSource>,
}

pub enum IncomeRowsAction {
    Replace(Vec<IncomeSource>),
    /// A parking place was saved; `bool` is whether pays were requested
    MergeParking(ParkingSaveResponse, bool),
}

impl Reducible for IncomeRows {
    type Action = IncomeRowsAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            IncomeRowsAction::Replace(rows) => Rc::new(IncomeRows { rows }),
            IncomeRowsAction::MergeParking(response, to_pays) => {
                let mut next = (*self).clone();
                if merge_saved_parking(&mut next.rows, response, to_pays) {
                    Rc::new(next)
                } else {
                    self
                }
            }
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct IncomesState {
    pub rows: Vec<IncomeSource>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UseIncomesResult {
    pub state: IncomesState,
    pub actions: UseIncomesActions,
}

#[derive(Clone)]
pub struct UseIncomesActions {
    pub parking_saved: Callback<(ParkingSaveResponse, bool)>,
}

/// Income sources for the income page `id`, reloaded whenever `id` changes
#[hook]
pub fn use_incomes(api_client: &ApiClient, id: &str) -> UseIncomesResult {
    let rows = use_reducer(IncomeRows::default);
    let loading = use_state(|| true);
    let error = use_state(|| Option::<String>::None);

    {
        let api_client = api_client.clone();
        let rows = rows.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with(id.to_string(), move |id| {
            let id = id.clone();
            loading.set(true);
            spawn_local(async move {
                let request = IncomesRequest { id: id.clone() };
                match api_client.incomes(&request).await {
                    Ok(response) => {
                        Logger::debug_with_component(
                            "incomes",
                            &format!("Loaded {} sources for {}", response.rows.len(), id),
                        );
                        rows.dispatch(IncomeRowsAction::Replace(response.rows));
                        error.set(None);
                    }
                    Err(e) => {
                        Logger::error_with_component("incomes", &format!("Failed to load {}: {}", id, e));
                        error.set(Some(e.message()));
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    let parking_saved = {
        let rows = rows.clone();
        Callback::from(move |(response, to_pays): (ParkingSaveResponse, bool)| {
            rows.dispatch(IncomeRowsAction::MergeParking(response, to_pays));
        })
    };

    let state = IncomesState {
        rows: rows.rows.clone(),
        loading: *loading,
        error: (*error).clone(),
    };

    UseIncomesResult {
        state,
        actions: UseIncomesActions { parking_saved },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ParkingPlace;

    fn source(id: i64) -> IncomeSource {
        IncomeSource {
            id,
            name: Some(format!("Source {}", id)),
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_adds_place_to_its_source() {
        let state = Rc::new(IncomeRows {
            rows: vec![source(1), source(2)],
        });
        let response = ParkingSaveResponse {
            row: ParkingPlace {
                id: Some(10),
                parking_place: Some("B-4".to_string()),
                ..Default::default()
            },
            source_id: 2,
            pays: None,
        };

        let next = state.reduce(IncomeRowsAction::MergeParking(response, false));
        assert!(next.rows[0].parking.is_empty());
        assert_eq!(next.rows[1].parking[0].id, Some(10));
    }

    #[test]
    fn test_merge_for_unknown_source_keeps_state() {
        let state = Rc::new(IncomeRows {
            rows: vec![source(1)],
        });
        let response = ParkingSaveResponse {
            row: ParkingPlace::default(),
            source_id: 99,
            pays: None,
        };

        let next = state.clone().reduce(IncomeRowsAction::MergeParking(response, false));
        assert!(Rc::ptr_eq(&state, &next));
    }
}

use shared::{Employee, YearMonth};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct SalaryState {
    pub employees: Vec<Employee>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UseSalaryResult {
    pub state: SalaryState,
    pub actions: UseSalaryActions,
}

#[derive(Clone)]
pub struct UseSalaryActions {
    pub refresh: Callback<()>,
}

#[hook]
pub fn use_salary(api_client: &ApiClient, month: YearMonth) -> UseSalaryResult {
    let employees = use_state(Vec::<Employee>::new);
    let loading = use_state(|| true);
    let error = use_state(|| Option::<String>::None);
    let refresh_token = use_state(|| 0u32);

    {
        let api_client = api_client.clone();
        let employees = employees.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with((month, *refresh_token), move |(month, _)| {
            let month = *month;
            loading.set(true);
            spawn_local(async move {
                match api_client.employees(Some(month)).await {
                    Ok(response) => {
                        employees.set(response.rows);
                        error.set(None);
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "salary",
                            &format!("Failed to load employees for {}: {}", month, e),
                        );
                        error.set(Some(e.message()));
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    let refresh = {
        let refresh_token = refresh_token.clone();
        Callback::from(move |_: ()| refresh_token.set(refresh_token.wrapping_add(1)))
    };

    let state = SalaryState {
        employees: (*employees).clone(),
        loading: *loading,
        error: (*error).clone(),
    };

    UseSalaryResult {
        state,
        actions: UseSalaryActions { refresh },
    }
}

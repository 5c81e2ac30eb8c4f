use yew::prelude::*;
use super::income_table::IncomeTable;
use crate::components::parking::Parking;
use crate::hooks::use_incomes::use_incomes;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct IncomeProps {
    pub api_client: ApiClient,
    /// Income page id; `parking` switches to the parking view
    pub id: AttrValue,
}

#[function_component(Income)]
pub fn income(props: &IncomeProps) -> Html {
    let incomes = use_incomes(&props.api_client, &props.id);
    let state = &incomes.state;

    let body = if let Some(error) = &state.error {
        html! { <div class="error-message">{error}</div> }
    } else if state.loading {
        html! { <div class="loading">{"Загрузка..."}</div> }
    } else if state.rows.is_empty() {
        html! { <div class="empty">{"Данных ещё нет"}</div> }
    } else if props.id.as_str() == "parking" {
        html! {
            <Parking
                api_client={props.api_client.clone()}
                sources={state.rows.clone()}
                on_saved={incomes.actions.parking_saved.clone()}
            />
        }
    } else {
        html! { <IncomeTable sources={state.rows.clone()} /> }
    };

    html! {
        <section class="incomes-section">
            <h2>{if props.id.as_str() == "parking" { "Парковка" } else { "Доходы" }}</h2>
            {body}
        </section>
    }
}

use yew::prelude::*;
use super::cashbox_table::CashboxTable;
use crate::hooks::use_cashbox::use_cashbox;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct CashboxProps {
    pub api_client: ApiClient,
}

/// Cashbox ledger screen with infinite scroll
#[function_component(Cashbox)]
pub fn cashbox(props: &CashboxProps) -> Html {
    let cashbox = use_cashbox(&props.api_client);
    let state = &cashbox.state;

    // Errors replace the list entirely
    if let Some(error) = &state.error {
        let on_retry = {
            let retry = cashbox.actions.retry.clone();
            Callback::from(move |_: MouseEvent| retry.emit(()))
        };
        return html! {
            <section class="cashbox-section">
                <div class="error-message">
                    <p>{error}</p>
                    <button class="retry-button" onclick={on_retry}>{"Повторить"}</button>
                </div>
            </section>
        };
    }

    html! {
        <section class="cashbox-section">
            <h2>{"Касса"}</h2>
            if state.initial_loading {
                <div class="loading">{"Загрузка..."}</div>
            } else {
                <CashboxTable rows={state.rows.clone()} />
                if state.loading_more {
                    <div class="loading loading-more">{"Загрузка..."}</div>
                }
                if state.end && !state.rows.is_empty() {
                    <div class="end-of-data">{"Больше записей нет"}</div>
                }
                if state.rows.is_empty() && !state.loading_more {
                    <div class="empty">{"Данных ещё нет"}</div>
                }
            }
        </section>
    }
}

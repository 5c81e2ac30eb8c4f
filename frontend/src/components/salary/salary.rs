use yew::prelude::*;
use shared::{UiAction, YearMonth};
use super::salary_add::SalaryAdd;
use crate::hooks::use_salary::use_salary;
use crate::services::api::ApiClient;
use crate::services::date_utils::{self, format_amount};
use crate::store::use_ui_store;

#[derive(Properties, PartialEq)]
pub struct SalaryProps {
    pub api_client: ApiClient,
}

#[function_component(Salary)]
pub fn salary(props: &SalaryProps) -> Html {
    let store = use_ui_store();
    let month = use_state(|| YearMonth::from_date(date_utils::today()));
    let salary = use_salary(&props.api_client, *month);
    let state = &salary.state;

    let prev_month = {
        let month = month.clone();
        Callback::from(move |_: MouseEvent| month.set(month.previous()))
    };
    let next_month = {
        let month = month.clone();
        Callback::from(move |_: MouseEvent| month.set(month.next()))
    };

    let body = if let Some(error) = &state.error {
        html! { <div class="error-message">{error}</div> }
    } else if state.loading {
        html! { <div class="loading">{"Загрузка..."}</div> }
    } else if state.employees.is_empty() {
        html! { <div class="empty">{"Данных ещё нет"}</div> }
    } else {
        html! {
            <table class="salary-table">
                <thead>
                    <tr>
                        <th>{"Сотрудник"}</th>
                        <th>{"Выплачено"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {for state.employees.iter().map(|employee| {
                        let on_add = {
                            let store = store.clone();
                            let employee = employee.clone();
                            Callback::from(move |_: MouseEvent| {
                                store.dispatch(UiAction::ShowAddSalary(Some(employee.clone())));
                            })
                        };
                        html! {
                            <tr key={employee.id}>
                                <td class="name">{&employee.fullname}</td>
                                <td class="amount">{employee.paid.map(format_amount).unwrap_or_default()}</td>
                                <td><button class="add-button" onclick={on_add}>{"Добавить выплату"}</button></td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        }
    };

    html! {
        <section class="salary-section">
            <div class="calendar-header">
                <button class="nav-button" onclick={prev_month}>{"‹"}</button>
                <h2>{month.title()}</h2>
                <button class="nav-button" onclick={next_month}>{"›"}</button>
            </div>
            {body}
            <SalaryAdd
                api_client={props.api_client.clone()}
                month={Some(*month)}
                on_saved={salary.actions.refresh.clone()}
            />
        </section>
    }
}

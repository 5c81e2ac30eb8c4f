use yew::prelude::*;
use web_sys::HtmlInputElement;
use shared::forms::{FormErrors, SalaryField, SalaryForm};
use shared::{UiAction, YearMonth};
use wasm_bindgen_futures::spawn_local;
use crate::services::api::ApiClient;
use crate::services::date_utils;
use crate::services::logging::Logger;
use crate::store::use_ui_store;

#[derive(Properties, PartialEq)]
pub struct SalaryAddProps {
    pub api_client: ApiClient,
    /// Month selected on the salary screen; the form defaults follow it
    pub month: Option<YearMonth>,
    pub on_saved: Callback<()>,
}

const FIELDS: [(SalaryField, &str, &str); 4] = [
    (SalaryField::Sum, "Сумма", "number"),
    (SalaryField::Date, "Дата выплаты", "date"),
    (SalaryField::PeriodStart, "Период с", "date"),
    (SalaryField::PeriodStop, "Период по", "date"),
];

#[function_component(SalaryAdd)]
pub fn salary_add(props: &SalaryAddProps) -> Html {
    let store = use_ui_store();
    let employee = store.0.show_add_salary.clone();

    let form = use_state(|| Option::<SalaryForm>::None);
    let saving = use_state(|| false);
    let error = use_state(|| Option::<String>::None);
    let field_errors = use_state(FormErrors::default);

    // Fresh defaults whenever the modal opens
    {
        let form = form.clone();
        let error = error.clone();
        let field_errors = field_errors.clone();
        use_effect_with((employee.clone(), props.month), move |(employee, month)| {
            form.set(
                employee
                    .as_ref()
                    .map(|employee| SalaryForm::for_employee(employee, *month, date_utils::today())),
            );
            error.set(None);
            field_errors.set(FormErrors::default());
            || ()
        });
    }

    let (Some(employee), Some(current)) = (employee, (*form).clone()) else {
        return html! {};
    };

    let on_close = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| store.dispatch(UiAction::ShowAddSalary(None)))
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_submit = {
        let api_client = props.api_client.clone();
        let on_saved = props.on_saved.clone();
        let store = store.clone();
        let saving = saving.clone();
        let error = error.clone();
        let field_errors = field_errors.clone();
        let request = current.to_request();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }

            let api_client = api_client.clone();
            let on_saved = on_saved.clone();
            let store = store.clone();
            let saving = saving.clone();
            let error = error.clone();
            let field_errors = field_errors.clone();
            let request = request.clone();

            saving.set(true);
            spawn_local(async move {
                match api_client.salary_save(request).await {
                    Ok(()) => {
                        Logger::info_with_component("salary", "Salary payment saved");
                        on_saved.emit(());
                        store.dispatch(UiAction::ShowAddSalary(None));
                    }
                    Err(e) => {
                        error.set(Some(e.message()));
                        field_errors.set(FormErrors::from_api(&e));
                    }
                }
                saving.set(false);
            });
        })
    };

    html! {
        <div class="modal-backdrop" onclick={on_close.clone()}>
            <div class="modal salary-modal" onclick={on_modal_click}>
                <div class="modal-content">
                    <h3 class="modal-title">{format!("Выплата: {}", employee.fullname)}</h3>

                    if let Some(message) = &*error {
                        <div class="form-message error">{message}</div>
                    }

                    <form class="salary-form" onsubmit={on_submit}>
                        {for FIELDS.iter().map(|(field, label, kind)| {
                            let field = *field;
                            let oninput = {
                                let form = form.clone();
                                let field_errors = field_errors.clone();
                                let current = current.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    let mut next = current.clone();
                                    next.set(field, input.value());
                                    form.set(Some(next));

                                    if field_errors.has(field.name()) {
                                        let mut errors = (*field_errors).clone();
                                        errors.clear(field.name());
                                        field_errors.set(errors);
                                    }
                                })
                            };
                            let class = classes!("form-field", field_errors.has(field.name()).then_some("has-error"));

                            html! {
                                <div {class}>
                                    <label>{*label}</label>
                                    <input
                                        type={*kind}
                                        name={field.name()}
                                        value={current.value(field).to_string()}
                                        {oninput}
                                    />
                                    if let Some(message) = field_errors.get(field.name()) {
                                        <div class="field-error">{message.to_string()}</div>
                                    }
                                </div>
                            }
                        })}

                        <div class="modal-actions">
                            <button type="button" class="cancel-button" onclick={on_close}>{"Отмена"}</button>
                            <button type="submit" class="save-button" disabled={*saving}>
                                {if *saving { "Сохранение..." } else { "Сохранить" }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}

use yew::prelude::*;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use shared::forms::{parking_form_for, FormErrors, ParkingField};
use shared::{IncomeSource, ParkingGetRequest, ParkingPlace, ParkingSaveRequest, ParkingSaveResponse, UiAction};
use wasm_bindgen_futures::spawn_local;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::store::use_ui_store;

#[derive(Properties, PartialEq)]
pub struct ParkingPlaceAddProps {
    pub api_client: ApiClient,
    /// Called with the saved place and whether its pays were requested
    pub on_saved: Callback<(ParkingSaveResponse, bool)>,
}

fn label(field: ParkingField) -> &'static str {
    match field {
        ParkingField::ParkingPlace => "Место",
        ParkingField::Price => "Цена",
        ParkingField::DateFrom => "Дата начала",
        ParkingField::DateTo => "Дата окончания",
        ParkingField::Car => "Автомобиль",
        ParkingField::CarNumber => "Госномер",
        ParkingField::OwnerName => "Владелец",
        ParkingField::OwnerPhone => "Телефон",
        ParkingField::Comment => "Комментарий",
    }
}

fn input_type(field: ParkingField) -> &'static str {
    match field {
        ParkingField::DateFrom | ParkingField::DateTo => "date",
        ParkingField::OwnerPhone => "tel",
        _ => "text",
    }
}

/// Add/edit modal for a parking place, opened through the UI store
#[function_component(ParkingPlaceAdd)]
pub fn parking_place_add(props: &ParkingPlaceAddProps) -> Html {
    let store = use_ui_store();
    let target = store.0.show_parking_place_add.clone();

    let form = use_state(ParkingPlace::default);
    let sources = use_state(Vec::<IncomeSource>::new);
    let loading = use_state(|| false);
    let saving = use_state(|| false);
    let error = use_state(|| Option::<String>::None);
    let field_errors = use_state(FormErrors::default);

    // Load the record each time the modal opens for a new target
    {
        let api_client = props.api_client.clone();
        let form = form.clone();
        let sources = sources.clone();
        let loading = loading.clone();
        let error = error.clone();
        let field_errors = field_errors.clone();
        use_effect_with(target.clone(), move |target| {
            if let Some(target) = target.clone() {
                error.set(None);
                field_errors.set(FormErrors::default());
                form.set(parking_form_for(&target, None));
                loading.set(true);

                spawn_local(async move {
                    let request = ParkingGetRequest {
                        id: target.id,
                        source_id: target.source_id,
                    };
                    match api_client.parking_get(request).await {
                        Ok(response) => {
                            form.set(parking_form_for(&target, response.row));
                            sources.set(response.sources.unwrap_or_default());
                        }
                        Err(e) => {
                            Logger::error_with_component("parking", &format!("Failed to load place: {}", e));
                            error.set(Some(e.message()));
                        }
                    }
                    loading.set(false);
                });
            }
            || ()
        });
    }

    let Some(target) = target else {
        return html! {};
    };

    let on_close = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| store.dispatch(UiAction::ShowParkingPlaceAdd(None)))
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_field = |field: ParkingField| {
        let form = form.clone();
        let field_errors = field_errors.clone();
        move |value: String| {
            let mut next = (*form).clone();
            field.set(&mut next, value);
            form.set(next);

            if field_errors.has(field.name()) {
                let mut errors = (*field_errors).clone();
                errors.clear(field.name());
                field_errors.set(errors);
            }
        }
    };

    let on_source_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.source_id = select.value().parse().ok();
            form.set(next);
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let on_saved = props.on_saved.clone();
        let store = store.clone();
        let form = form.clone();
        let saving = saving.clone();
        let error = error.clone();
        let field_errors = field_errors.clone();
        let to_pays = target.to_pays;
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
            let request = ParkingSaveRequest {
                place: (*form).clone(),
                to_pays,
            };

            saving.set(true);
            spawn_local(async move {
                match api_client.parking_save(request).await {
                    Ok(response) => {
                        Logger::info_with_component(
                            "parking",
                            &format!("Saved place {:?} for source {}", response.row.id, response.source_id),
                        );
                        on_saved.emit((response, to_pays));
                        store.dispatch(UiAction::ShowParkingPlaceAdd(None));
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

    let title = if target.id.is_some() { "Редактировать место" } else { "Новое место" };

    html! {
        <div class="modal-backdrop" onclick={on_close.clone()}>
            <div class="modal parking-modal" onclick={on_modal_click}>
                <div class="modal-content">
                    <h3 class="modal-title">{title}</h3>

                    if let Some(message) = &*error {
                        <div class="form-message error">{message}</div>
                    }

                    if *loading {
                        <div class="loading">{"Загрузка..."}</div>
                    } else {
                        <form class="parking-form" onsubmit={on_submit}>
                            if !sources.is_empty() {
                                <div class="form-field">
                                    <label>{"Объект"}</label>
                                    <select onchange={on_source_change}>
                                        {for sources.iter().map(|source| html! {
                                            <option
                                                value={source.id.to_string()}
                                                selected={form.source_id == Some(source.id)}
                                            >
                                                {source.name.clone().unwrap_or_default()}
                                            </option>
                                        })}
                                    </select>
                                </div>
                            }

                            {for ParkingField::ALL.iter().map(|field| {
                                let field = *field;
                                let set = on_field(field);
                                let value = field.get(&form).to_string();
                                let class = classes!("form-field", field_errors.has(field.name()).then_some("has-error"));

                                let input = if field == ParkingField::Comment {
                                    let oninput = Callback::from(move |e: InputEvent| {
                                        let input: HtmlTextAreaElement = e.target_unchecked_into();
                                        set(input.value());
                                    });
                                    html! { <textarea name={field.name()} {value} {oninput} /> }
                                } else {
                                    let oninput = Callback::from(move |e: InputEvent| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        set(input.value());
                                    });
                                    html! {
                                        <input
                                            type={input_type(field)}
                                            name={field.name()}
                                            required={field.is_required()}
                                            {value}
                                            {oninput}
                                        />
                                    }
                                };

                                html! {
                                    <div {class}>
                                        <label>
                                            {label(field)}
                                            if field.is_required() { <span class="required">{"*"}</span> }
                                        </label>
                                        {input}
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
                    }
                </div>
            </div>
        </div>
    }
}

use yew::prelude::*;
use shared::store::ParkingTarget;
use shared::{IncomeSource, ParkingSaveResponse, UiAction};
use super::parking_place_add::ParkingPlaceAdd;
use crate::services::api::ApiClient;
use crate::services::date_utils::format_date_for_display;
use crate::store::use_ui_store;

#[derive(Properties, PartialEq)]
pub struct ParkingProps {
    pub api_client: ApiClient,
    pub sources: Vec<IncomeSource>,
    pub on_saved: Callback<(ParkingSaveResponse, bool)>,
}

/// Parking lots with their rented places
#[function_component(Parking)]
pub fn parking(props: &ParkingProps) -> Html {
    let store = use_ui_store();

    let open = {
        let store = store.clone();
        move |target: ParkingTarget| {
            let store = store.clone();
            Callback::from(move |_: MouseEvent| {
                store.dispatch(UiAction::ShowParkingPlaceAdd(Some(target.clone())));
            })
        }
    };

    html! {
        <div class="parking">
            {for props.sources.iter().map(|source| {
                let on_add = open(ParkingTarget {
                    id: None,
                    source_id: Some(source.id),
                    to_pays: false,
                });

                html! {
                    <div class="parking-source" key={source.id}>
                        <div class="parking-source-header">
                            <h3>{source.name.clone().unwrap_or_default()}</h3>
                            <button class="add-button" onclick={on_add}>{"Добавить место"}</button>
                        </div>
                        if source.parking.is_empty() {
                            <div class="empty">{"Мест ещё нет"}</div>
                        } else {
                            <table class="parking-table">
                                <thead>
                                    <tr>
                                        <th>{"Место"}</th>
                                        <th>{"Цена"}</th>
                                        <th>{"Период"}</th>
                                        <th>{"Автомобиль"}</th>
                                        <th>{"Владелец"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {for source.parking.iter().map(|place| {
                                        let on_edit = open(ParkingTarget {
                                            id: place.id,
                                            source_id: Some(source.id),
                                            to_pays: true,
                                        });
                                        let period = format!(
                                            "{} – {}",
                                            place.date_from.as_deref().map(format_date_for_display).unwrap_or_default(),
                                            place.date_to.as_deref().map(format_date_for_display).unwrap_or_default(),
                                        );
                                        let car = [place.car.as_deref(), place.car_number.as_deref()]
                                            .into_iter()
                                            .flatten()
                                            .collect::<Vec<_>>()
                                            .join(" ");

                                        html! {
                                            <tr class="clickable" onclick={on_edit}>
                                                <td>{place.parking_place.clone().unwrap_or_default()}</td>
                                                <td>{place.price.clone().unwrap_or_default()}</td>
                                                <td>{period}</td>
                                                <td>{car}</td>
                                                <td>
                                                    {place.owner_name.clone().unwrap_or_default()}
                                                    if let Some(phone) = &place.owner_phone {
                                                        <div class="phone">{phone}</div>
                                                    }
                                                </td>
                                            </tr>
                                        }
                                    })}
                                </tbody>
                            </table>
                        }
                    </div>
                }
            })}
            <ParkingPlaceAdd api_client={props.api_client.clone()} on_saved={props.on_saved.clone()} />
        </div>
    }
}

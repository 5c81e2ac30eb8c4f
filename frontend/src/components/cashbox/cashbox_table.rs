use yew::prelude::*;
use shared::{CashboxRow, PayKind, UiState};
use crate::services::date_utils::{format_amount, format_date_for_display};
use crate::store::use_ui_store;

/// Label and optional icon classes for a row's pay type
fn pay_type_cell(state: &UiState, kind: Option<PayKind>) -> (String, Option<String>) {
    let Some(kind) = kind else {
        return (String::new(), None);
    };
    match state.pay_type(kind) {
        Some(pay_type) => (
            pay_type.text.clone(),
            pay_type
                .icon
                .as_ref()
                .map(|icon| format!("icon {} {}", icon.name, icon.color)),
        ),
        None => (kind.label().to_string(), None),
    }
}

#[derive(Properties, PartialEq)]
pub struct CashboxTableProps {
    pub rows: Vec<CashboxRow>,
}

#[function_component(CashboxTable)]
pub fn cashbox_table(props: &CashboxTableProps) -> Html {
    let store = use_ui_store();

    html! {
        <div class="table-container">
            <table class="cashbox-table">
                <thead>
                    <tr>
                        <th>{"Дата"}</th>
                        <th>{"Сумма"}</th>
                        <th>{"Тип оплаты"}</th>
                        <th>{"Назначение"}</th>
                        <th>{"Комментарий"}</th>
                    </tr>
                </thead>
                <tbody>
                    {for props.rows.iter().map(|row| {
                        let amount_class = if row.is_expense { "amount negative" } else { "amount positive" };
                        let sign = if row.is_expense { "-" } else { "+" };
                        let (pay_label, pay_icon) = pay_type_cell(&store.0, row.type_pay);

                        html! {
                            <tr key={row.id}>
                                <td class="date">
                                    {row.date.as_deref().map(format_date_for_display).unwrap_or_default()}
                                </td>
                                <td class={amount_class}>{format!("{}{}", sign, format_amount(row.sum))}</td>
                                <td class="pay-type">
                                    if let Some(icon) = pay_icon {
                                        <i class={icon}></i>
                                    }
                                    {pay_label}
                                </td>
                                <td class="purpose">{row.purpose.clone().unwrap_or_default()}</td>
                                <td class="comment">{row.comment.clone().unwrap_or_default()}</td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        </div>
    }
}

use yew::prelude::*;
use shared::IncomeSource;

#[derive(Properties, PartialEq)]
pub struct IncomeTableProps {
    pub sources: Vec<IncomeSource>,
}

/// Income sources that are not parking lots: name plus whatever summary the server sent
#[function_component(IncomeTable)]
pub fn income_table(props: &IncomeTableProps) -> Html {
    html! {
        <div class="table-container">
            <table class="incomes-table">
                <thead>
                    <tr>
                        <th>{"Объект"}</th>
                        <th>{"Мест"}</th>
                    </tr>
                </thead>
                <tbody>
                    {for props.sources.iter().map(|source| html! {
                        <tr key={source.id}>
                            <td class="name">{source.name.clone().unwrap_or_else(|| format!("#{}", source.id))}</td>
                            <td class="count">{source.parking.len()}</td>
                        </tr>
                    })}
                </tbody>
            </table>
        </div>
    }
}

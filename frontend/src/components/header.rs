use yew::prelude::*;
use crate::store::use_ui_store;

/// Top-level screens reachable from the header
#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    Cashbox,
    Calendar,
    /// Income page for the given source kind, e.g. `parking`
    Incomes(String),
    Salary,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Cashbox => "Касса",
            Screen::Calendar => "Календарь",
            Screen::Incomes(id) if id == "parking" => "Парковка",
            Screen::Incomes(_) => "Доходы",
            Screen::Salary => "Зарплата",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub current: Screen,
    pub on_navigate: Callback<Screen>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let store = use_ui_store();

    let screens = [
        Screen::Cashbox,
        Screen::Calendar,
        Screen::Incomes("buildings".to_string()),
        Screen::Incomes("parking".to_string()),
        Screen::Salary,
    ];

    html! {
        <header class="header">
            <div class="container">
                <nav class="header-nav">
                    {for screens.into_iter().map(|screen| {
                        let class = if screen == props.current { "nav-item active" } else { "nav-item" };
                        let title = screen.title();
                        let onclick = {
                            let on_navigate = props.on_navigate.clone();
                            Callback::from(move |_: MouseEvent| on_navigate.emit(screen.clone()))
                        };
                        html! { <button {class} {onclick}>{title}</button> }
                    })}
                </nav>
                <div class="header-right">
                    if let Some(name) = store.0.display_name() {
                        <span class="user-name">{name.to_string()}</span>
                    }
                </div>
            </div>
        </header>
    }
}

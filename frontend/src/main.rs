use yew::prelude::*;

mod components;
mod hooks;
mod services;
mod store;

use components::cashbox::{Cashbox, CashboxCalendar};
use components::header::{Header, Screen};
use components::incomes::Income;
use components::salary::Salary;
use services::api::ApiClient;
use services::logging::Logger;
use store::StoreProvider;

#[function_component(App)]
fn app() -> Html {
    let api_client = use_memo((), |_| {
        let client = ApiClient::new();
        log::info!("Using API at {}", client.base_url());
        client
    });
    let screen = use_state(|| Screen::Cashbox);

    let on_navigate = {
        let screen = screen.clone();
        Callback::from(move |next: Screen| {
            Logger::debug_with_component("app", &format!("Navigate to {}", next.title()));
            screen.set(next);
        })
    };

    let api_client = (*api_client).clone();
    let content = {
        let api_client = api_client.clone();
        match &*screen {
            Screen::Cashbox => html! { <Cashbox {api_client} /> },
            Screen::Calendar => html! { <CashboxCalendar {api_client} /> },
            Screen::Incomes(id) => html! { <Income key={id.clone()} {api_client} id={id.clone()} /> },
            Screen::Salary => html! { <Salary {api_client} /> },
        }
    };

    html! {
        <StoreProvider {api_client}>
            <div class="app">
                <Header current={(*screen).clone()} {on_navigate} />
                <main class="main">
                    <div class="container">
                        {content}
                    </div>
                </main>
            </div>
        </StoreProvider>
    }
}

fn main() {
    Logger::init(log::LevelFilter::Debug);
    log::info!("Back-office frontend starting");
    yew::Renderer::<App>::new().render();
}

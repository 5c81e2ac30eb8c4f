use shared::{session_actions, UiAction, UiState};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

/// `UiState` wired into Yew's reducer machinery
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiStore(pub UiState);

impl Reducible for UiStore {
    type Action = UiAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let state = Rc::unwrap_or_clone(self).0;
        Rc::new(UiStore(state.reduce(action)))
    }
}

pub type UiStoreHandle = UseReducerHandle<UiStore>;

#[derive(Properties, PartialEq)]
pub struct StoreProviderProps {
    pub api_client: ApiClient,
    pub children: Children,
}

/// Makes the UI flag store available to every screen below it.
///
/// The logged-in user is looked up once on mount.
#[function_component(StoreProvider)]
pub fn store_provider(props: &StoreProviderProps) -> Html {
    let store = use_reducer(UiStore::default);

    {
        let store = store.clone();
        let api_client = props.api_client.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let result = api_client.current_user().await;
                if let Ok(user) = &result {
                    log::info!("Session for {:?}", user.login);
                }
                for action in session_actions(result) {
                    store.dispatch(action);
                }
            });
            || ()
        });
    }

    html! {
        <ContextProvider<UiStoreHandle> context={store}>
            { props.children.clone() }
        </ContextProvider<UiStoreHandle>>
    }
}

/// The shared store, or a component-local one when rendered outside `StoreProvider`
#[hook]
pub fn use_ui_store() -> UiStoreHandle {
    let fallback = use_reducer(UiStore::default);
    use_context::<UiStoreHandle>().unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::User;

    #[test]
    fn test_store_applies_session_actions() {
        let user = User {
            id: Some(1),
            name: Some("Анна".to_string()),
            login: Some("anna".to_string()),
        };
        let store = session_actions(Ok(user))
            .into_iter()
            .fold(Rc::new(UiStore::default()), |store, action| store.reduce(action));

        assert!(store.0.login);
        assert_eq!(store.0.display_name(), Some("Анна"));
    }
}

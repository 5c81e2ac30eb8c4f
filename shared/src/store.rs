//! Application-wide UI flags.
//!
//! Holds the few pieces of state several screens need at once: who is logged
//! in, the pay type options, and which modal is open for which record. Every
//! change goes through a named `UiAction` and the pure `UiState::reduce`.

use crate::error::ApiError;
use crate::{default_pay_types, Employee, PayKind, PayType, User};
use serde::{Deserialize, Serialize};

/// Which parking place the add/edit modal is showing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingTarget {
    /// `None` creates a new place
    pub id: Option<i64>,
    pub source_id: Option<i64>,
    /// Ask the server to return payment rows with the saved place
    #[serde(default)]
    pub to_pays: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiState {
    pub login: bool,
    pub user: User,
    pub pay_types: Vec<PayType>,
    /// Employee the "add payment" modal is open for
    pub show_add_salary: Option<Employee>,
    pub show_parking_place_add: Option<ParkingTarget>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            login: false,
            user: User::default(),
            pay_types: default_pay_types(),
            show_add_salary: None,
            show_parking_place_add: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    SetLogin(bool),
    SetUser(User),
    ShowAddSalary(Option<Employee>),
    ShowParkingPlaceAdd(Option<ParkingTarget>),
}

impl UiAction {
    pub fn name(&self) -> &'static str {
        match self {
            UiAction::SetLogin(_) => "IS_LOGIN",
            UiAction::SetUser(_) => "USER_DATA",
            UiAction::ShowAddSalary(_) => "SHOW_ADD_SALARY",
            UiAction::ShowParkingPlaceAdd(_) => "SHOW_PARKING_PLACE_ADD",
        }
    }
}

/// Actions to dispatch once the session lookup has answered.
///
/// A rejected session logs the user out; a transport or server hiccup leaves
/// the current flags alone.
pub fn session_actions(result: Result<User, ApiError>) -> Vec<UiAction> {
    match result {
        Ok(user) => vec![UiAction::SetUser(user), UiAction::SetLogin(true)],
        Err(ApiError::Server { status: 401 | 403, .. }) => vec![UiAction::SetLogin(false)],
        Err(e) => {
            log::warn!("Session lookup failed: {}", e);
            Vec::new()
        }
    }
}

impl UiState {
    /// Pay type option for a row's pay kind
    pub fn pay_type(&self, kind: PayKind) -> Option<&PayType> {
        self.pay_types.iter().find(|pay_type| pay_type.value == kind)
    }

    /// Name shown in the header, if someone is logged in
    pub fn display_name(&self) -> Option<&str> {
        if !self.login {
            return None;
        }
        self.user.name.as_deref().or(self.user.login.as_deref())
    }

    pub fn reduce(self, action: UiAction) -> Self {
        log::debug!("UI action {}", action.name());

        match action {
            UiAction::SetLogin(login) => Self { login, ..self },
            UiAction::SetUser(user) => Self { user, ..self },
            UiAction::ShowAddSalary(employee) => Self {
                show_add_salary: employee,
                ..self
            },
            UiAction::ShowParkingPlaceAdd(target) => Self {
                show_parking_place_add: target,
                ..self
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee() -> Employee {
        Employee {
            id: 7,
            fullname: "Ivan Petrov".to_string(),
            paid: None,
        }
    }

    #[test]
    fn test_default_state() {
        let state = UiState::default();
        assert!(!state.login);
        assert_eq!(state.pay_types.len(), 3);
        assert!(state.show_add_salary.is_none());
        assert!(state.show_parking_place_add.is_none());
    }

    #[test]
    fn test_login_and_user() {
        let user = User {
            id: Some(1),
            name: Some("Admin".to_string()),
            login: Some("admin".to_string()),
        };
        let state = UiState::default()
            .reduce(UiAction::SetLogin(true))
            .reduce(UiAction::SetUser(user.clone()));

        assert!(state.login);
        assert_eq!(state.user, user);
    }

    #[test]
    fn test_session_found_logs_in() {
        let user = User {
            id: Some(3),
            name: None,
            login: Some("cashier".to_string()),
        };
        let state = session_actions(Ok(user))
            .into_iter()
            .fold(UiState::default(), UiState::reduce);

        assert!(state.login);
        assert_eq!(state.display_name(), Some("cashier"));
    }

    #[test]
    fn test_session_rejected_logs_out() {
        let logged_in = UiState::default().reduce(UiAction::SetLogin(true));
        let rejected = ApiError::Server {
            status: 401,
            message: "Unauthenticated".to_string(),
        };

        let actions = session_actions(Err(rejected));
        assert_eq!(actions, vec![UiAction::SetLogin(false)]);
        let state = actions.into_iter().fold(logged_in, UiState::reduce);
        assert!(!state.login);
        assert_eq!(state.display_name(), None);
    }

    #[test]
    fn test_session_network_error_changes_nothing() {
        let actions = session_actions(Err(ApiError::Network("offline".to_string())));
        assert!(actions.is_empty());
    }

    #[test]
    fn test_pay_type_lookup() {
        let state = UiState::default();
        let card = state.pay_type(PayKind::Card).unwrap();
        assert_eq!(card.text, "б/н");
        assert_eq!(card.icon.as_ref().map(|i| i.name.as_str()), Some("credit card"));
        assert!(state.pay_type(PayKind::Cash).unwrap().icon.is_none());
    }

    #[test]
    fn test_salary_modal_open_and_close() {
        let state = UiState::default().reduce(UiAction::ShowAddSalary(Some(employee())));
        assert_eq!(state.show_add_salary.as_ref().map(|e| e.id), Some(7));

        let state = state.reduce(UiAction::ShowAddSalary(None));
        assert!(state.show_add_salary.is_none());
    }

    #[test]
    fn test_actions_only_touch_their_flag() {
        let target = ParkingTarget {
            id: None,
            source_id: Some(3),
            to_pays: false,
        };
        let state = UiState::default()
            .reduce(UiAction::ShowAddSalary(Some(employee())))
            .reduce(UiAction::ShowParkingPlaceAdd(Some(target.clone())));

        assert_eq!(state.show_parking_place_add, Some(target));
        assert!(state.show_add_salary.is_some());
        assert_eq!(state.pay_types, default_pay_types());
    }
}

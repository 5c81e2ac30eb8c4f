use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod calendar;
pub mod config;
pub mod error;
pub mod forms;
mod lenient;
pub mod pagination;
pub mod store;
pub mod throttle;

pub use calendar::{DayCell, MonthGrid, WeekRow, WeekStart, YearMonth};
pub use error::ApiError;
pub use pagination::{LoadOutcome, LoaderState, PageFetcher, PaginatedLoader, ScrollMetrics};
pub use store::{session_actions, UiAction, UiState};
pub use throttle::Throttle;

/// How a cashbox operation was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PayKind {
    Cash,
    Card,
    CheckingAccount,
}

impl PayKind {
    /// Short label used in tables and calendar cells
    pub fn label(&self) -> &'static str {
        match self {
            PayKind::Cash => "Наличные",
            PayKind::Card => "б/н",
            PayKind::CheckingAccount => "р/с",
        }
    }
}

impl TryFrom<u8> for PayKind {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PayKind::Cash),
            2 => Ok(PayKind::Card),
            3 => Ok(PayKind::CheckingAccount),
            other => Err(format!("Unknown pay type: {}", other)),
        }
    }
}

impl From<PayKind> for u8 {
    fn from(value: PayKind) -> Self {
        match value {
            PayKind::Cash => 1,
            PayKind::Card => 2,
            PayKind::CheckingAccount => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayTypeIcon {
    pub name: String,
    pub color: String,
}

/// Pay type option as shown in select inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayType {
    pub key: u32,
    pub text: String,
    pub value: PayKind,
    pub icon: Option<PayTypeIcon>,
}

/// The pay types every installation starts with
pub fn default_pay_types() -> Vec<PayType> {
    vec![
        PayType {
            key: 0,
            text: PayKind::Cash.label().to_string(),
            value: PayKind::Cash,
            icon: None,
        },
        PayType {
            key: 1,
            text: PayKind::Card.label().to_string(),
            value: PayKind::Card,
            icon: Some(PayTypeIcon {
                name: "credit card".to_string(),
                color: "green".to_string(),
            }),
        },
        PayType {
            key: 3,
            text: PayKind::CheckingAccount.label().to_string(),
            value: PayKind::CheckingAccount,
            icon: Some(PayTypeIcon {
                name: "file text".to_string(),
                color: "orange".to_string(),
            }),
        },
    ]
}

/// Logged-in user as reported by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
}

/// Request body for `POST cashbox`; an absent page means the first page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// One page of rows from a paginated endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse<R> {
    pub rows: Vec<R>,
    /// Page number just fetched; null when the server does not paginate further
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub end: bool,
}

/// One cashbox ledger line.
///
/// Fields the table renders are named; everything else the backend sends is
/// kept in `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashboxRow {
    pub id: i64,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub sum: f64,
    #[serde(default, deserialize_with = "lenient::pay_kind")]
    pub type_pay: Option<PayKind>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_expense: bool,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Request body for `POST cashbox/calendar`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarStatsRequest {
    /// `None` asks for the current month
    pub month: Option<YearMonth>,
}

/// Incoming and expense totals for one day, split by pay type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DayStats {
    pub incoming: f64,
    pub incoming_cash: f64,
    pub incoming_card: f64,
    pub incoming_checking_account: f64,
    pub expense: f64,
    pub expense_cash: f64,
    pub expense_card: f64,
    pub expense_checking_account: f64,
}

impl DayStats {
    pub fn incoming_by(&self, kind: PayKind) -> f64 {
        match kind {
            PayKind::Cash => self.incoming_cash,
            PayKind::Card => self.incoming_card,
            PayKind::CheckingAccount => self.incoming_checking_account,
        }
    }

    pub fn expense_by(&self, kind: PayKind) -> f64 {
        match kind {
            PayKind::Cash => self.expense_cash,
            PayKind::Card => self.expense_card,
            PayKind::CheckingAccount => self.expense_checking_account,
        }
    }

    /// True when the day has no movement at all
    pub fn is_empty(&self) -> bool {
        self.incoming + self.expense == 0.0
    }
}

/// Response of `POST cashbox/calendar`, keyed by `YYYYMMDD`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarStatsResponse {
    #[serde(default)]
    pub calendar: HashMap<String, DayStats>,
}

impl CalendarStatsResponse {
    pub fn day(&self, date: chrono::NaiveDate) -> DayStats {
        self.calendar
            .get(&calendar::date_key(date))
            .cloned()
            .unwrap_or_default()
    }
}

/// One rented parking place
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParkingPlace {
    pub id: Option<i64>,
    pub source_id: Option<i64>,
    pub parking_place: Option<String>,
    pub price: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub car: Option<String>,
    pub car_number: Option<String>,
    pub owner_name: Option<String>,
    pub owner_phone: Option<String>,
    pub comment: Option<String>,
    /// Payment rows, present when the save asked for them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pays: Option<Vec<serde_json::Value>>,
}

impl ParkingPlace {
    /// Overlay the fields `newer` carries; fields it leaves out keep their current value
    pub fn merge_from(&mut self, newer: ParkingPlace) {
        fn keep_or<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        keep_or(&mut self.id, newer.id);
        keep_or(&mut self.source_id, newer.source_id);
        keep_or(&mut self.parking_place, newer.parking_place);
        keep_or(&mut self.price, newer.price);
        keep_or(&mut self.date_from, newer.date_from);
        keep_or(&mut self.date_to, newer.date_to);
        keep_or(&mut self.car, newer.car);
        keep_or(&mut self.car_number, newer.car_number);
        keep_or(&mut self.owner_name, newer.owner_name);
        keep_or(&mut self.owner_phone, newer.owner_phone);
        keep_or(&mut self.comment, newer.comment);
        keep_or(&mut self.pays, newer.pays);
    }
}

/// An income source (a building, the parking lot, ...) with its parking places
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeSource {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parking: Vec<ParkingPlace>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Query for `GET incomes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomesRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomesResponse {
    #[serde(default)]
    pub rows: Vec<IncomeSource>,
}

/// Request body for `POST parking/get`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParkingGetRequest {
    pub id: Option<i64>,
    pub source_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParkingGetResponse {
    #[serde(default)]
    pub row: Option<ParkingPlace>,
    #[serde(default)]
    pub sources: Option<Vec<IncomeSource>>,
}

/// Request body for `PUT parking/save`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingSaveRequest {
    #[serde(flatten)]
    pub place: ParkingPlace,
    /// Ask the server to return the place's payment rows as well
    #[serde(rename = "toPays")]
    pub to_pays: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingSaveResponse {
    pub row: ParkingPlace,
    pub source_id: i64,
    #[serde(default)]
    pub pays: Option<Vec<serde_json::Value>>,
}

/// Employee row on the salary screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub fullname: String,
    #[serde(default)]
    pub paid: Option<f64>,
}

/// Request body for `POST employees/salary`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeesRequest {
    pub month: Option<YearMonth>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeesResponse {
    #[serde(default)]
    pub rows: Vec<Employee>,
}

/// Request body for `POST employees/salary/save`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalarySaveRequest {
    pub expense_type_id: i64,
    pub expense_subtype_id: i64,
    pub sum: String,
    pub date: String,
    pub period_start: String,
    pub period_stop: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_omits_missing_page() {
        assert_eq!(serde_json::to_string(&PageRequest::default()).unwrap(), "{}");
        assert_eq!(
            serde_json::to_string(&PageRequest { page: Some(3) }).unwrap(),
            r#"{"page":3}"#
        );
    }

    #[test]
    fn test_page_response_with_null_page() {
        let json = r#"{"rows":[{"id":1,"sum":100.5,"type_pay":2,"is_expense":true,"cashier":"Anna"}],"page":null,"end":true}"#;
        let page: PageResponse<CashboxRow> = serde_json::from_str(json).unwrap();

        assert_eq!(page.page, None);
        assert!(page.end);
        let row = &page.rows[0];
        assert_eq!(row.type_pay, Some(PayKind::Card));
        assert!(row.is_expense);
        assert_eq!(row.extra.get("cashier"), Some(&serde_json::json!("Anna")));
    }

    #[test]
    fn test_cashbox_row_accepts_string_sum() {
        let row: CashboxRow =
            serde_json::from_str(r#"{"id":5,"sum":"100.50","type_pay":"1","is_expense":"0"}"#).unwrap();
        assert_eq!(row.sum, 100.5);
        assert_eq!(row.type_pay, Some(PayKind::Cash));
        assert!(!row.is_expense);
    }

    #[test]
    fn test_cashbox_row_accepts_numeric_flag() {
        let json = r#"{"rows":[{"id":1,"sum":10,"is_expense":1},{"id":2,"sum":20,"is_expense":0}],"page":1,"end":false}"#;
        let page: PageResponse<CashboxRow> = serde_json::from_str(json).unwrap();
        assert!(page.rows[0].is_expense);
        assert!(!page.rows[1].is_expense);
    }

    #[test]
    fn test_unknown_pay_type_does_not_fail_the_page() {
        let json = r#"{"rows":[{"id":1,"sum":"5","type_pay":4},{"id":2,"sum":7.5,"type_pay":3}],"page":1,"end":true}"#;
        let page: PageResponse<CashboxRow> = serde_json::from_str(json).unwrap();
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.rows[0].type_pay, None);
        assert_eq!(page.rows[0].sum, 5.0);
        assert_eq!(page.rows[1].type_pay, Some(PayKind::CheckingAccount));
    }

    #[test]
    fn test_cashbox_row_null_and_missing_fields_default() {
        let row: CashboxRow =
            serde_json::from_str(r#"{"id":9,"sum":null,"type_pay":null,"is_expense":null}"#).unwrap();
        assert_eq!(row.sum, 0.0);
        assert_eq!(row.type_pay, None);
        assert!(!row.is_expense);

        let row: CashboxRow = serde_json::from_str(r#"{"id":10}"#).unwrap();
        assert_eq!(row.sum, 0.0);
        assert!(row.extra.is_empty());
    }

    #[test]
    fn test_pay_kind_round_trip_through_number() {
        assert_eq!(serde_json::to_string(&PayKind::CheckingAccount).unwrap(), "3");
        assert!(serde_json::from_str::<PayKind>("7").is_err());
    }

    #[test]
    fn test_default_pay_types() {
        let types = default_pay_types();
        let values: Vec<u8> = types.iter().map(|t| u8::from(t.value)).collect();
        assert_eq!(values, vec![1, 2, 3]);
        assert!(types[0].icon.is_none());
        assert_eq!(types[2].icon.as_ref().map(|i| i.color.as_str()), Some("orange"));
    }

    #[test]
    fn test_calendar_stats_lookup() {
        let json = r#"{"calendar":{"20240205":{"incoming":150,"incomingCash":100,"incomingCard":50}}}"#;
        let stats: CalendarStatsResponse = serde_json::from_str(json).unwrap();

        let day = stats.day(chrono::NaiveDate::from_ymd_opt(2024, 2, 5).unwrap());
        assert_eq!(day.incoming, 150.0);
        assert_eq!(day.incoming_by(PayKind::Card), 50.0);
        assert_eq!(day.expense_by(PayKind::Cash), 0.0);
        assert!(!day.is_empty());

        let missing = stats.day(chrono::NaiveDate::from_ymd_opt(2024, 2, 6).unwrap());
        assert!(missing.is_empty());
    }

    #[test]
    fn test_parking_save_request_shape() {
        let request = ParkingSaveRequest {
            place: ParkingPlace {
                source_id: Some(4),
                parking_place: Some("A-12".to_string()),
                ..Default::default()
            },
            to_pays: true,
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["toPays"], serde_json::json!(true));
        assert_eq!(value["parking_place"], serde_json::json!("A-12"));
        assert_eq!(value["source_id"], serde_json::json!(4));
    }

    #[test]
    fn test_calendar_stats_request_month_format() {
        let request = CalendarStatsRequest {
            month: YearMonth::new(2024, 2),
        };
        assert_eq!(serde_json::to_string(&request).unwrap(), r#"{"month":"2024-02"}"#);
        assert_eq!(
            serde_json::to_string(&CalendarStatsRequest::default()).unwrap(),
            r#"{"month":null}"#
        );
    }
}

use async_trait::async_trait;
use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::config::DEFAULT_API_BASE_URL;
use shared::{
    ApiError, CalendarStatsRequest, CalendarStatsResponse, CashboxRow, EmployeesRequest,
    EmployeesResponse, IncomesRequest, IncomesResponse, PageFetcher, PageRequest, PageResponse,
    ParkingGetRequest, ParkingGetResponse, ParkingSaveRequest, ParkingSaveResponse,
    SalarySaveRequest, User, YearMonth,
};

use crate::services::logging::Logger;

/// API client for communicating with the backend server
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client; `BACKOFFICE_API_URL` at build time overrides the default base URL
    pub fn new() -> Self {
        let base_url = option_env!("BACKOFFICE_API_URL").unwrap_or(DEFAULT_API_BASE_URL);
        Self::with_base_url(base_url.to_string())
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// One page of the cashbox ledger
    pub async fn cashbox_page(&self, request: PageRequest) -> Result<PageResponse<CashboxRow>, ApiError> {
        self.post_json("cashbox", &request).await
    }

    /// Per-day incoming/expense totals for a month; `None` asks for the current month
    pub async fn cashbox_calendar(&self, month: Option<YearMonth>) -> Result<CalendarStatsResponse, ApiError> {
        self.post_json("cashbox/calendar", &CalendarStatsRequest { month }).await
    }

    /// Income sources for an income page
    pub async fn incomes(&self, request: &IncomesRequest) -> Result<IncomesResponse, ApiError> {
        self.get_json("incomes", request).await
    }

    /// The logged-in user; fails with a 401 server error when there is no session
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get_json("user", &()).await
    }

    /// Parking place to edit, plus the income sources it may belong to
    pub async fn parking_get(&self, request: ParkingGetRequest) -> Result<ParkingGetResponse, ApiError> {
        self.post_json("parking/get", &request).await
    }

    pub async fn parking_save(&self, request: ParkingSaveRequest) -> Result<ParkingSaveResponse, ApiError> {
        let builder = Request::put(&self.url("parking/save"));
        let response = builder
            .json(&request)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::read_json(response).await
    }

    /// Employees with their salary status for a month
    pub async fn employees(&self, month: Option<YearMonth>) -> Result<EmployeesResponse, ApiError> {
        self.post_json("employees/salary", &EmployeesRequest { month }).await
    }

    /// Record a salary payment; the response body is not used
    pub async fn salary_save(&self, request: SalarySaveRequest) -> Result<(), ApiError> {
        let response = self.post("employees/salary/save", &request).await?;
        if response.ok() {
            Ok(())
        } else {
            Err(Self::read_error(response).await)
        }
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, ApiError> {
        Logger::debug_with_component("api", &format!("POST {}", path));

        Request::post(&self.url(path))
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    async fn get_json<Q: Serialize, T: DeserializeOwned>(&self, path: &str, query: &Q) -> Result<T, ApiError> {
        let pairs = query_pairs(query)?;
        Logger::debug_with_component("api", &format!("GET {}", path));

        let response = Request::get(&self.url(path))
            .query(pairs.iter().map(|(key, value)| (key.as_str(), value.as_str())))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::read_json(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let response = self.post(path, body).await?;
        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if response.ok() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        } else {
            Err(Self::read_error(response).await)
        }
    }

    async fn read_error(response: Response) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_response(status, &body);
        Logger::warn_with_component("api", &format!("{} {}: {}", status, response.url(), error));
        error
    }
}

/// Flatten a serializable struct into query-string pairs; nulls are left out
fn query_pairs<Q: Serialize>(query: &Q) -> Result<Vec<(String, String)>, ApiError> {
    let value = serde_json::to_value(query).map_err(|e| ApiError::Encode(e.to_string()))?;
    let object = match value {
        serde_json::Value::Object(object) => object,
        serde_json::Value::Null => return Ok(Vec::new()),
        other => return Err(ApiError::Encode(format!("query must be an object, got {}", other))),
    };

    Ok(object
        .into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) => Some((key, text)),
            other => Some((key, other.to_string())),
        })
        .collect())
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// The cashbox ledger as a page source for the infinite-scroll loader
#[derive(Clone)]
pub struct CashboxPages {
    client: ApiClient,
}

impl CashboxPages {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl PageFetcher for CashboxPages {
    type Row = CashboxRow;

    async fn fetch_page(&self, request: PageRequest) -> Result<PageResponse<CashboxRow>, ApiError> {
        self.client.cashbox_page(request).await
    }
}

//! Form models for the salary and parking modals.
//!
//! The modals themselves live in the frontend; what sits here is the part
//! that does not need a browser: default values, field updates, per-field
//! error bookkeeping, and folding a saved record back into the list it came
//! from.

use crate::calendar::YearMonth;
use crate::error::ApiError;
use crate::store::ParkingTarget;
use crate::{Employee, IncomeSource, ParkingPlace, ParkingSaveResponse, SalarySaveRequest};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Expense type the backend files salary payments under
pub const SALARY_EXPENSE_TYPE_ID: i64 = 1;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Per-field validation messages returned by a failed save
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    fields: HashMap<String, String>,
}

impl FormErrors {
    pub fn from_api(error: &ApiError) -> Self {
        Self {
            fields: error.field_errors(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Editing a field clears its error
    pub fn clear(&mut self, field: &str) {
        self.fields.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryField {
    Sum,
    Date,
    PeriodStart,
    PeriodStop,
}

impl SalaryField {
    pub fn name(&self) -> &'static str {
        match self {
            SalaryField::Sum => "sum",
            SalaryField::Date => "date",
            SalaryField::PeriodStart => "period_start",
            SalaryField::PeriodStop => "period_stop",
        }
    }
}

/// Salary payment being entered for one employee
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryForm {
    pub employee_id: i64,
    pub sum: String,
    pub date: String,
    pub period_start: String,
    pub period_stop: String,
}

impl SalaryForm {
    /// Pre-fill for `employee`: the payment date is the first of the selected
    /// month (today when none is selected) and the period covers that month.
    pub fn for_employee(employee: &Employee, month: Option<YearMonth>, today: NaiveDate) -> Self {
        let date = month.map(|m| m.first_day()).unwrap_or(today);
        let period = month.unwrap_or_else(|| YearMonth::from_date(today));

        Self {
            employee_id: employee.id,
            sum: String::new(),
            date: date.format(DATE_FORMAT).to_string(),
            period_start: period.first_day().format(DATE_FORMAT).to_string(),
            period_stop: period.last_day().format(DATE_FORMAT).to_string(),
        }
    }

    pub fn value(&self, field: SalaryField) -> &str {
        match field {
            SalaryField::Sum => &self.sum,
            SalaryField::Date => &self.date,
            SalaryField::PeriodStart => &self.period_start,
            SalaryField::PeriodStop => &self.period_stop,
        }
    }

    pub fn set(&mut self, field: SalaryField, value: String) {
        match field {
            SalaryField::Sum => self.sum = value,
            SalaryField::Date => self.date = value,
            SalaryField::PeriodStart => self.period_start = value,
            SalaryField::PeriodStop => self.period_stop = value,
        }
    }

    pub fn to_request(&self) -> SalarySaveRequest {
        SalarySaveRequest {
            expense_type_id: SALARY_EXPENSE_TYPE_ID,
            expense_subtype_id: self.employee_id,
            sum: self.sum.trim().to_string(),
            date: self.date.clone(),
            period_start: self.period_start.clone(),
            period_stop: self.period_stop.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParkingField {
    ParkingPlace,
    Price,
    DateFrom,
    DateTo,
    Car,
    CarNumber,
    OwnerName,
    OwnerPhone,
    Comment,
}

impl ParkingField {
    pub const ALL: [ParkingField; 9] = [
        ParkingField::ParkingPlace,
        ParkingField::Price,
        ParkingField::DateFrom,
        ParkingField::DateTo,
        ParkingField::Car,
        ParkingField::CarNumber,
        ParkingField::OwnerName,
        ParkingField::OwnerPhone,
        ParkingField::Comment,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ParkingField::ParkingPlace => "parking_place",
            ParkingField::Price => "price",
            ParkingField::DateFrom => "date_from",
            ParkingField::DateTo => "date_to",
            ParkingField::Car => "car",
            ParkingField::CarNumber => "car_number",
            ParkingField::OwnerName => "owner_name",
            ParkingField::OwnerPhone => "owner_phone",
            ParkingField::Comment => "comment",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            ParkingField::ParkingPlace | ParkingField::Price | ParkingField::DateFrom
        )
    }

    fn slot<'a>(&self, place: &'a mut ParkingPlace) -> &'a mut Option<String> {
        match self {
            ParkingField::ParkingPlace => &mut place.parking_place,
            ParkingField::Price => &mut place.price,
            ParkingField::DateFrom => &mut place.date_from,
            ParkingField::DateTo => &mut place.date_to,
            ParkingField::Car => &mut place.car,
            ParkingField::CarNumber => &mut place.car_number,
            ParkingField::OwnerName => &mut place.owner_name,
            ParkingField::OwnerPhone => &mut place.owner_phone,
            ParkingField::Comment => &mut place.comment,
        }
    }

    pub fn get<'a>(&self, place: &'a ParkingPlace) -> &'a str {
        let value = match self {
            ParkingField::ParkingPlace => &place.parking_place,
            ParkingField::Price => &place.price,
            ParkingField::DateFrom => &place.date_from,
            ParkingField::DateTo => &place.date_to,
            ParkingField::Car => &place.car,
            ParkingField::CarNumber => &place.car_number,
            ParkingField::OwnerName => &place.owner_name,
            ParkingField::OwnerPhone => &place.owner_phone,
            ParkingField::Comment => &place.comment,
        };
        value.as_deref().unwrap_or("")
    }

    /// Store `value`; an empty string clears the field
    pub fn set(&self, place: &mut ParkingPlace, value: String) {
        *self.slot(place) = if value.is_empty() { None } else { Some(value) };
    }
}

/// Form contents after `parking/get` returned for `target`
pub fn parking_form_for(target: &ParkingTarget, loaded: Option<ParkingPlace>) -> ParkingPlace {
    let mut place = loaded.unwrap_or_default();
    if place.source_id.is_none() {
        place.source_id = target.source_id;
    }
    place
}

/// Fold a saved parking place into the income source it belongs to.
///
/// An existing place with the same id is updated field by field, keeping
/// whatever the response leaves out; otherwise the place is put first in the
/// source's list. Returns false when no source with the response's
/// `source_id` is loaded.
pub fn merge_saved_parking(
    sources: &mut [IncomeSource],
    response: ParkingSaveResponse,
    to_pays: bool,
) -> bool {
    let mut saved = response.row;
    if to_pays {
        saved.pays = response.pays;
    }

    let Some(source) = sources.iter_mut().find(|s| s.id == response.source_id) else {
        log::warn!("Saved parking place for unknown source {}", response.source_id);
        return false;
    };

    let existing = saved
        .id
        .and_then(|id| source.parking.iter_mut().find(|p| p.id == Some(id)));

    match existing {
        Some(place) => place.merge_from(saved),
        None => source.parking.insert(0, saved),
    }
    true
}

use yew::prelude::*;
use shared::calendar::date_key;
use shared::{DayCell, DayStats, PayKind};
use crate::hooks::use_calendar::use_calendar;
use crate::services::api::ApiClient;
use crate::services::date_utils::{day_label, format_amount};

#[derive(Properties, PartialEq)]
pub struct CashboxCalendarProps {
    pub api_client: ApiClient,
}

/// Month of cash flow, one cell per day
#[function_component(CashboxCalendar)]
pub fn cashbox_calendar(props: &CashboxCalendarProps) -> Html {
    let calendar = use_calendar(&props.api_client);
    let state = &calendar.state;

    let weekday_labels = state.grid.week_start().weekday_labels();

    html! {
        <section class="calendar-section">
            <div class="calendar-header">
                <button class="nav-button" onclick={calendar.actions.prev_month.clone()}>{"‹"}</button>
                <h2>{state.month.title()}</h2>
                <button class="nav-button" onclick={calendar.actions.next_month.clone()}>{"›"}</button>
            </div>

            {if let Some(error) = &state.error {
                let on_retry = {
                    let refresh = calendar.actions.refresh_calendar.clone();
                    Callback::from(move |_: MouseEvent| refresh.emit(()))
                };
                html! {
                    <div class="error-message">
                        <p>{error}</p>
                        <button class="retry-button" onclick={on_retry}>{"Повторить"}</button>
                    </div>
                }
            } else {
                html! {
                    <div class={classes!("calendar-grid", state.loading.then_some("loading"))}>
                        <div class="calendar-row weekdays">
                            {for weekday_labels.iter().map(|label| html! {
                                <div class="weekday">{*label}</div>
                            })}
                        </div>
                        {for state.grid.weeks().iter().map(|week| html! {
                            <div class="calendar-row">
                                {for week.iter().map(|cell| {
                                    let stats = state.stats.as_ref().map(|s| s.day(cell.date)).unwrap_or_default();
                                    html! { <CalendarDay key={date_key(cell.date)} cell={*cell} {stats} /> }
                                })}
                            </div>
                        })}
                    </div>
                }
            }}
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct CalendarDayProps {
    pub cell: DayCell,
    pub stats: DayStats,
}

/// Padding days from the neighbouring months keep their stats and are only dimmed
fn day_classes(cell: &DayCell, stats: &DayStats) -> Classes {
    classes!(
        "calendar-day",
        (!cell.in_current_month).then_some("other-month"),
        stats.is_empty().then_some("empty"),
    )
}

#[function_component(CalendarDay)]
pub fn calendar_day(props: &CalendarDayProps) -> Html {
    let cell = &props.cell;
    let class = day_classes(cell, &props.stats);

    html! {
        <div {class}>
            <div class="day-number">{day_label(cell.date)}</div>
            if !props.stats.is_empty() {
                <StatDayCell stats={props.stats.clone()} />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatDayCellProps {
    pub stats: DayStats,
}

/// Incoming and expense totals of one day, each split by pay type
#[function_component(StatDayCell)]
pub fn stat_day_cell(props: &StatDayCellProps) -> Html {
    let stats = &props.stats;
    let kinds = [PayKind::Cash, PayKind::Card, PayKind::CheckingAccount];

    let breakdown = |amount: f64, kind: PayKind| {
        if amount == 0.0 {
            html! {}
        } else {
            html! {
                <div class="stat-line">
                    <span class="stat-kind">{kind.label()}</span>
                    <span class="stat-amount">{format_amount(amount)}</span>
                </div>
            }
        }
    };

    html! {
        <div class="day-stats">
            if stats.incoming != 0.0 {
                <div class="stat incoming">
                    <div class="stat-total amount positive">{format!("+{}", format_amount(stats.incoming))}</div>
                    {for kinds.iter().map(|kind| breakdown(stats.incoming_by(*kind), *kind))}
                </div>
            }
            if stats.expense != 0.0 {
                <div class="stat expense">
                    <div class="stat-total amount negative">{format!("-{}", format_amount(stats.expense))}</div>
                    {for kinds.iter().map(|kind| breakdown(stats.expense_by(*kind), *kind))}
                </div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::config::DEFAULT_WEEK_START;
    use shared::{CalendarStatsResponse, MonthGrid, YearMonth};

    #[test]
    fn test_padding_day_is_dimmed_but_keeps_stats() {
        let grid = MonthGrid::build(YearMonth::new(2024, 2).unwrap(), DEFAULT_WEEK_START);
        let padding = *grid.weeks()[0].first();
        assert!(!padding.in_current_month);

        let json = r#"{"calendar":{"20240129":{"incoming":300,"incomingCash":300}}}"#;
        let response: CalendarStatsResponse = serde_json::from_str(json).unwrap();
        let stats = response.day(padding.date);

        let class = day_classes(&padding, &stats);
        assert!(class.contains("other-month"));
        assert!(!class.contains("empty"));
        assert!(!stats.is_empty());
    }

    #[test]
    fn test_quiet_day_in_month_is_marked_empty() {
        let grid = MonthGrid::build(YearMonth::new(2024, 2).unwrap(), DEFAULT_WEEK_START);
        let cell = grid.cells().find(|c| c.in_current_month).copied().unwrap();

        let class = day_classes(&cell, &DayStats::default());
        assert!(class.contains("empty"));
        assert!(!class.contains("other-month"));
    }
}

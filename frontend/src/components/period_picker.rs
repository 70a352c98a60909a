use chrono::{Datelike, Local};
use shared::filters::{year_options, Period, MONTH_NAMES};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PeriodPickerProps {
    pub period: Period,
    pub on_change: Callback<Period>,
}

/// Month and year selects shared by every page
#[function_component(PeriodPicker)]
pub fn period_picker(props: &PeriodPickerProps) -> Html {
    let on_month_change = {
        let period = props.period;
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(month) = select.value().parse::<u32>() {
                on_change.emit(period.with_month(month));
            }
        })
    };

    let on_year_change = {
        let period = props.period;
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(year) = select.value().parse::<i32>() {
                on_change.emit(period.with_year(year));
            }
        })
    };

    let this_year = Local::now().year();

    html! {
        <div class="period-picker">
            <select class="period-select" onchange={on_month_change} aria-label="Month">
                {for MONTH_NAMES.iter().enumerate().map(|(i, name)| {
                    let month = i as u32 + 1;
                    html! {
                        <option value={month.to_string()} selected={month == props.period.month}>{*name}</option>
                    }
                })}
            </select>
            <select class="period-select" onchange={on_year_change} aria-label="Year">
                {for year_options(this_year.max(props.period.year)).into_iter().map(|year| html! {
                    <option value={year.to_string()} selected={year == props.period.year}>{year}</option>
                })}
            </select>
        </div>
    }
}

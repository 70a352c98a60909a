use shared::currency::ExchangeRate;
use shared::pages::dashboard::CategoryBar;
use shared::Currency;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CategoryChartProps {
    pub bars: Vec<CategoryBar>,
    pub rate: ExchangeRate,
    pub currency: Currency,
    pub loading: bool,
}

#[function_component(CategoryChart)]
pub fn category_chart(props: &CategoryChartProps) -> Html {
    html! {
        <div class="chart-card category-chart">
            <h3 class="chart-title">{"Spending by category"}</h3>
            {if props.bars.is_empty() {
                html! {
                    <p class="chart-empty">
                        {if props.loading { "Loading..." } else { "No spending this month" }}
                    </p>
                }
            } else {
                html! {
                    <ul class="category-bars">
                        {for props.bars.iter().map(|bar| html! {
                            <li class="category-bar-row" key={bar.category.as_str()}>
                                <span class="category-bar-label">{bar.category.badge()}</span>
                                <div class="category-bar-track">
                                    <div class="category-bar-fill" style={format!("width: {:.1}%", bar.width)}></div>
                                </div>
                                <span class="category-bar-value">
                                    {props.rate.format_chart(bar.total, props.currency)}
                                </span>
                            </li>
                        })}
                    </ul>
                }
            }}
        </div>
    }
}

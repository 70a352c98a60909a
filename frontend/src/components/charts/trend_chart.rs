use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use shared::currency::ExchangeRate;
use shared::filters::SHORT_MONTH_NAMES;
use shared::{Currency, MonthlyTrendPoint};
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use crate::services::logging::Logger;

const CANVAS_WIDTH: u32 = 640;
const CANVAS_HEIGHT: u32 = 220;
const LINE_COLOR: RGBColor = RGBColor(6, 182, 212);

#[derive(Properties, PartialEq)]
pub struct TrendChartProps {
    pub points: Vec<MonthlyTrendPoint>,
    pub rate: ExchangeRate,
    pub currency: Currency,
    pub year: i32,
    pub loading: bool,
}

/// Monthly expenses for the year, drawn on a canvas in the display currency
pub struct TrendChart {
    canvas_ref: NodeRef,
}

impl Component for TrendChart {
    type Message = ();
    type Properties = TrendChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn changed(&mut self, _ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        true
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        let props = ctx.props();
        let series = chart_series(&props.points, props.rate, props.currency);
        if series.is_empty() {
            return;
        }
        if let Err(e) = self.draw_chart(&series, props.currency) {
            Logger::warn_with_component("trend_chart", &format!("drawing failed: {}", e));
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();

        html! {
            <div class="chart-card trend-chart">
                <h3 class="chart-title">{format!("Monthly spending · {}", props.year)}</h3>
                {if props.points.is_empty() && props.loading {
                    html! {
                        <div class="chart-loading">
                            <div class="loading-spinner"></div>
                            <p>{"Loading chart data..."}</p>
                        </div>
                    }
                } else if props.points.is_empty() {
                    html! { <p class="chart-empty">{"No trend data for this year"}</p> }
                } else {
                    html! {
                        <div class="chart-content">
                            <canvas
                                ref={self.canvas_ref.clone()}
                                class="trend-chart-canvas"
                                width={CANVAS_WIDTH.to_string()}
                                height={CANVAS_HEIGHT.to_string()}
                            ></canvas>
                        </div>
                    }
                }}
            </div>
        }
    }
}

impl TrendChart {
    fn draw_chart(&self, series: &[(u32, f64)], currency: Currency) -> Result<(), String> {
        let canvas = self
            .canvas_ref
            .cast::<HtmlCanvasElement>()
            .ok_or("canvas not mounted")?;
        canvas.set_width(CANVAS_WIDTH);
        canvas.set_height(CANVAS_HEIGHT);

        let backend = CanvasBackend::with_canvas_object(canvas).ok_or("no 2d context")?;
        let root = backend.into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let (y_min, y_max) = y_bounds(series);
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .x_label_area_size(28)
            .y_label_area_size(56)
            .build_cartesian_2d(0.5f64..12.5f64, y_min..y_max)
            .map_err(|e| e.to_string())?;

        let symbol = currency.symbol();
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(12)
            .x_label_formatter(&|x| month_label(*x))
            .y_labels(5)
            .y_label_formatter(&|y| format!("{}{:.0}", symbol, y))
            .label_style(("sans-serif", 11, &RGBColor(100, 116, 139)))
            .axis_style(RGBColor(230, 230, 230))
            .bold_line_style(RGBColor(241, 245, 249))
            .draw()
            .map_err(|e| e.to_string())?;

        chart
            .draw_series(AreaSeries::new(
                series.iter().map(|(month, value)| (*month as f64, *value)),
                0.0,
                LINE_COLOR.mix(0.15),
            ))
            .map_err(|e| e.to_string())?;

        chart
            .draw_series(LineSeries::new(
                series.iter().map(|(month, value)| (*month as f64, *value)),
                LINE_COLOR.stroke_width(2),
            ))
            .map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())
    }
}

/// Month number and expense converted to the display currency, in month order
pub fn chart_series(points: &[MonthlyTrendPoint], rate: ExchangeRate, currency: Currency) -> Vec<(u32, f64)> {
    let mut series: Vec<(u32, f64)> = points
        .iter()
        .filter(|point| (1..=12).contains(&point.month_num))
        .map(|point| (point.month_num, rate.from_usd(point.expenses, currency)))
        .collect();
    series.sort_by_key(|(month, _)| *month);
    series
}

/// Y axis from zero to a little above the largest value
pub fn y_bounds(series: &[(u32, f64)]) -> (f64, f64) {
    let max = series.iter().map(|(_, value)| *value).fold(0.0, f64::max);
    (0.0, (max * 1.1).max(1.0))
}

fn month_label(x: f64) -> String {
    let index = x.round() as i64 - 1;
    if (0..12).contains(&index) && (x - x.round()).abs() < f64::EPSILON {
        SHORT_MONTH_NAMES[index as usize].to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(month_num: u32, expenses: f64) -> MonthlyTrendPoint {
        MonthlyTrendPoint {
            month: SHORT_MONTH_NAMES[(month_num - 1) as usize].to_string(),
            month_num,
            expenses,
        }
    }

    #[test]
    fn test_chart_series_sorts_and_converts() {
        let points = vec![point(3, 100.0), point(1, 50.0)];
        let rate = ExchangeRate::new(0.25);
        assert_eq!(chart_series(&points, rate, Currency::Usd), vec![(1, 50.0), (3, 100.0)]);
        assert_eq!(chart_series(&points, rate, Currency::Pen), vec![(1, 200.0), (3, 400.0)]);
    }

    #[test]
    fn test_chart_series_skips_out_of_range_months() {
        let mut bad = point(1, 10.0);
        bad.month_num = 13;
        assert!(chart_series(&[bad], ExchangeRate::default(), Currency::Usd).is_empty());
    }

    #[test]
    fn test_y_bounds_has_headroom_and_floor() {
        assert_eq!(y_bounds(&[]), (0.0, 1.0));
        let (min, max) = y_bounds(&[(1, 100.0)]);
        assert_eq!(min, 0.0);
        assert!((max - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_month_labels_only_on_whole_months() {
        assert_eq!(month_label(1.0), "Jan");
        assert_eq!(month_label(12.0), "Dec");
        assert_eq!(month_label(0.5), "");
        assert_eq!(month_label(13.0), "");
    }
}

use shared::category::CategoryFilter;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CategoryChipsProps {
    pub selected: CategoryFilter,
    pub on_select: Callback<CategoryFilter>,
}

#[function_component(CategoryChips)]
pub fn category_chips(props: &CategoryChipsProps) -> Html {
    html! {
        <div class="category-chips">
            {for CategoryFilter::options().into_iter().map(|option| {
                let onclick = {
                    let on_select = props.on_select.clone();
                    Callback::from(move |_: MouseEvent| on_select.emit(option))
                };
                let label = match option.category() {
                    None => "All".to_string(),
                    Some(category) => category.badge(),
                };
                html! {
                    <button
                        class={classes!("chip", (option == props.selected).then_some("active"))}
                        {onclick}
                    >
                        {label}
                    </button>
                }
            })}
        </div>
    }
}

use crate::util::format::{fmt_percent, to_pct};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PercentBarProps {
    pub value: Option<f64>,
    /// Extra class selecting the bar colour.
    #[prop_or_default]
    pub tone: Classes,
}

#[function_component(PercentBar)]
pub fn percent_bar(PercentBarProps { value, tone }: &PercentBarProps) -> Html {
    let pct = to_pct(*value);
    html! {
        <div class="percent-bar" role="progressbar"
            aria-valuemin="0" aria-valuemax="100" aria-valuenow={format!("{}", pct.round())}>
            <div class="percent-bar-track">
                <div class={classes!("percent-bar-fill", tone.clone())} style={format!("width: {pct}%")} />
            </div>
            <span class="percent-bar-label">{ fmt_percent(pct) }</span>
        </div>
    }
}

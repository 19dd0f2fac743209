//! Pure Yew view components for the rating board UI.
//!
//! Everything here renders from the projected [`Screen`] model and a
//! handful of callbacks; no component owns query or selection state.

use rating_board::view::{DetailBody, DetailState, LeaderboardRow, ListState, SeriesView};
use rating_board::RatingPoint;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

/// Labeled `<select>` over a closed set of options.
#[derive(Properties, PartialEq)]
pub struct OptionSelectProps {
    pub label: AttrValue,
    pub options: Vec<AttrValue>,
    pub value: AttrValue,
    pub onselect: Callback<String>,
}

#[function_component(OptionSelect)]
pub fn option_select(props: &OptionSelectProps) -> Html {
    let onchange = {
        let onselect = props.onselect.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            onselect.emit(select.value());
        })
    };

    html! {
        <label>
            <span>{ format!("{}:", props.label) }</span>
            <select {onchange}>
                { props.options.iter().map(|opt| html! {
                    <option
                        key={opt.to_string()}
                        value={opt.clone()}
                        selected={*opt == props.value}
                    >
                        { opt.to_string() }
                    </option>
                }).collect::<Html>() }
            </select>
        </label>
    }
}

/// Renders the list screen body: placeholder, error, or player rows.
pub fn render_list(state: &ListState, on_pick: &Callback<String>) -> Html {
    match state {
        ListState::Loading => html! { <div>{ "Loading..." }</div> },
        ListState::Failed(msg) => html! {
            <div class="error">{ format!("Error: {}", msg) }</div>
        },
        ListState::Empty => html! { <div>{ "Nothing found..." }</div> },
        ListState::Rows(rows) => html! {
            <>
                <div class="table-row table-header">
                    <div>{ "Username" }</div>
                    <div>{ "Online" }</div>
                    <div>{ "Rating" }</div>
                    <div>{ "Progress" }</div>
                </div>
                { rows.iter().map(|row| render_player_row(row, on_pick)).collect::<Html>() }
            </>
        },
    }
}

fn render_player_row(row: &LeaderboardRow, on_pick: &Callback<String>) -> Html {
    let onclick = {
        let on_pick = on_pick.clone();
        let username = row.username.clone();
        Callback::from(move |_| on_pick.emit(username.clone()))
    };
    let title = row
        .title
        .as_ref()
        .map(|t| format!(" (title - {})", t))
        .unwrap_or_default();

    html! {
        <div key={row.id.clone()} class="table-row clickable" {onclick}>
            <div>{ format!("{}. {}{}", row.rank, row.username, title) }</div>
            <div class={if row.online { "online" } else { "offline" }}>
                { if row.online { "Online" } else { "Offline" } }
            </div>
            <div>{ row.rating }</div>
            <div>{ row.progress }</div>
        </div>
    }
}

/// Renders the detail screen body for the active username.
pub fn render_detail(state: &DetailState) -> Html {
    match &state.body {
        DetailBody::Loading => html! {
            <div>{ format!("Loading {} Rating History...", state.username) }</div>
        },
        DetailBody::Failed(msg) => html! {
            <div class="error">
                { format!("Error loading {} Rating History: {}", state.username, msg) }
            </div>
        },
        DetailBody::Empty => html! {
            <div>{ format!("No rating history found for {}", state.username) }</div>
        },
        DetailBody::Series(series) => html! {
            <>
                <h2>{ format!("{} Rating History", state.username) }</h2>
                { series.iter().map(render_series).collect::<Html>() }
            </>
        },
    }
}

fn render_series(series: &SeriesView) -> Html {
    html! {
        <>
            <h3>{ format!("GAME TYPE - {}", series.name) }</h3>
            <div class="table-row table-header">
                <div>{ "Rating" }</div>
                <div>{ "Date" }</div>
                <div></div>
                <div></div>
            </div>
            { series.points.iter().map(|p| render_point(&series.name, p)).collect::<Html>() }
        </>
    }
}

fn render_point(series_name: &str, p: &RatingPoint) -> Html {
    let key = format!(
        "{}-{}-{}-{}-{}",
        series_name,
        p.year(),
        p.month(),
        p.day(),
        p.rating()
    );
    html! {
        <div key={key} class="table-row">
            <div>{ p.rating() }</div>
            // Dates render exactly as received, month first.
            <div>{ format!("{}/{}/{}", p.month(), p.day(), p.year()) }</div>
            <div></div>
            <div></div>
        </div>
    }
}

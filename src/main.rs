//! Main module for the rating board application using Yew.
//! Wires selection state, the query cache, and the projected screen.

use rating_board::selection::Selection;
use rating_board::view::{project, Screen};
use yew::prelude::*;

mod components;
mod config;
mod hooks;

use components::{render_detail, render_list, OptionSelect};
use config::{HISTORY_WINDOW_OPTIONS, LEADERBOARD_SIZE_OPTIONS, VARIANTS};
use hooks::use_query_cache;

fn attr_options<T: ToString>(options: &[T]) -> Vec<AttrValue> {
    options
        .iter()
        .map(|o| AttrValue::from(o.to_string()))
        .collect()
}

/// Primary application component.
///
/// Selection changes mutate the `Selection` value; the two `observe_*`
/// calls below re-derive the cache keys from it on every render, so a
/// changed key starts exactly one fetch while an unchanged key reuses
/// the cached entry.
#[function_component(App)]
fn app() -> Html {
    let selection = use_state(|| {
        Selection::new(
            VARIANTS[0],
            LEADERBOARD_SIZE_OPTIONS[0],
            HISTORY_WINDOW_OPTIONS[0],
        )
    });
    let cache = use_query_cache();

    let leaderboard = cache.observe_leaderboard(&selection.variant, selection.leaderboard_size);
    let history = cache.observe_history(selection.active_username.as_deref());

    let screen = project(&selection, &leaderboard, &history);

    let on_variant = {
        let selection = selection.clone();
        Callback::from(move |v: String| selection.set(selection.with_variant(&v)))
    };
    let on_size = {
        let selection = selection.clone();
        Callback::from(move |v: String| {
            if let Ok(n) = v.parse::<u32>() {
                selection.set(selection.with_leaderboard_size(n));
            }
        })
    };
    let on_pick = {
        let selection = selection.clone();
        Callback::from(move |username: String| {
            selection.set(selection.with_active_username(Some(&username)))
        })
    };
    let on_back = {
        let selection = selection.clone();
        Callback::from(move |_: MouseEvent| selection.set(selection.with_active_username(None)))
    };
    let on_window = {
        let selection = selection.clone();
        Callback::from(move |v: String| {
            if let Ok(days) = v.parse::<usize>() {
                selection.set(selection.with_history_window_days(days));
            }
        })
    };

    html! {
        <div class="app">
            <h1>{ "Top Players" }</h1>
            {
                match &screen {
                    Screen::Detail(detail) => html! {
                        <>
                            <button onclick={on_back}>{ "Back" }</button>
                            <OptionSelect
                                label="History max last days shown"
                                options={attr_options(HISTORY_WINDOW_OPTIONS)}
                                value={selection.history_window_days.to_string()}
                                onselect={on_window}
                            />
                            { render_detail(detail) }
                        </>
                    },
                    Screen::List(list) => html! {
                        <>
                            <OptionSelect
                                label="Chess Type"
                                options={attr_options(VARIANTS)}
                                value={selection.variant.clone()}
                                onselect={on_variant}
                            />
                            <OptionSelect
                                label="Top N"
                                options={attr_options(LEADERBOARD_SIZE_OPTIONS)}
                                value={selection.leaderboard_size.to_string()}
                                onselect={on_size}
                            />
                            <div class="table">{ render_list(list, &on_pick) }</div>
                        </>
                    },
                }
            }
        </div>
    }
}

/// Entry point: initializes the Yew renderer for the App component.
fn main() {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}

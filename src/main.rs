//! Main module for the Spin & Win application using Yew.
//! Wires UI components, the wheel session and its browser side effects.

use log::{debug, info, warn};
use spin_and_win::config::{TOAST_MS, WINNER_TOAST_MS};
use spin_and_win::{BrowserSession, BulkImport, Point, SpinTicket};
use web_sys::Element;
use yew::prelude::*;

mod components;
mod hooks;

use components::{
    MuteToggle, OptionInput, ResultBanner, SpeedControl, SpinButton, ToastStack, WheelView,
    WinnerDisplay,
};
use hooks::use_toasts;

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

/// Centre of the element behind `anchor`, falling back to the viewport centre.
fn anchor_center(anchor: &NodeRef) -> Point {
    if let Some(el) = anchor.cast::<Element>() {
        let rect = el.get_bounding_client_rect();
        return Point::new(rect.left() + rect.width() / 2.0, rect.top() + rect.height() / 2.0);
    }
    let Some(window) = web_sys::window() else {
        return Point::default();
    };
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Point::new(width / 2.0, height / 2.0)
}

fn describe_import(report: &BulkImport) -> String {
    let mut message = match report.added.len() {
        1 => "Added 1 option".to_string(),
        n => format!("Added {} options", n),
    };
    let skipped = report.duplicates + report.empty;
    if skipped > 0 {
        message.push_str(&format!(" ({} skipped)", skipped));
    }
    message
}

#[function_component(Main)]
fn main_component() -> Html {
    // Session state lives outside Yew's state; `refresh` re-renders after a mutation.
    let session = use_mut_ref(BrowserSession::browser);
    let refresh = use_force_update();
    let toasts = use_toasts();
    let banner_ref = use_node_ref();

    // Bind the spin timer and load sounds on mount; release both on unmount
    {
        let session = session.clone();
        let refresh = refresh.clone();
        let banner_ref = banner_ref.clone();
        let push_toast = toasts.push.clone();
        use_effect_with((), move |_| {
            let on_fire = {
                let session = session.clone();
                Callback::from(move |ticket: SpinTicket| {
                    let origin = anchor_center(&banner_ref);
                    let winner = session.borrow_mut().settle(ticket, origin);
                    if let Some(winner) = winner {
                        push_toast.emit((format!("Winner: {}! 🎉", winner), WINNER_TOAST_MS));
                    }
                    refresh.force_update();
                })
            };
            {
                let mut s = session.borrow_mut();
                s.timer_mut().bind(on_fire);
                s.init();
            }
            move || session.borrow_mut().dispose()
        });
    }

    let on_add = {
        let session = session.clone();
        let refresh = refresh.clone();
        let push_toast = toasts.push.clone();
        Callback::from(move |text: String| {
            let added = session.borrow_mut().add_option(&text);
            match added {
                Ok(option) => push_toast.emit((format!("Added: {}", option), TOAST_MS)),
                Err(e) => warn!("Rejected option {:?}: {}", text, e),
            }
            refresh.force_update();
        })
    };

    let on_bulk_add = {
        let session = session.clone();
        let refresh = refresh.clone();
        let push_toast = toasts.push.clone();
        Callback::from(move |text: String| {
            let report = session.borrow_mut().add_options_from_text(&text);
            push_toast.emit((describe_import(&report), TOAST_MS));
            refresh.force_update();
        })
    };

    let on_remove_option = {
        let session = session.clone();
        let refresh = refresh.clone();
        let push_toast = toasts.push.clone();
        Callback::from(move |idx: usize| {
            let removed = session.borrow_mut().remove_option(idx);
            match removed {
                Ok(option) => push_toast.emit((format!("Removed: {}", option), TOAST_MS)),
                Err(e) => warn!("Could not remove option: {}", e),
            }
            refresh.force_update();
        })
    };

    let on_clear_options = {
        let session = session.clone();
        let refresh = refresh.clone();
        let push_toast = toasts.push.clone();
        Callback::from(move |_: ()| {
            let cleared = session.borrow_mut().clear_options();
            if cleared > 0 {
                push_toast.emit(("All options cleared".to_string(), TOAST_MS));
            }
            refresh.force_update();
        })
    };

    let on_remove_winner = {
        let session = session.clone();
        let refresh = refresh.clone();
        Callback::from(move |idx: usize| {
            let removed = session.borrow_mut().remove_winner(idx);
            match removed {
                Ok(winner) => debug!("Removed {:?} from history", winner),
                Err(e) => warn!("Could not remove winner: {}", e),
            }
            refresh.force_update();
        })
    };

    let on_clear_history = {
        let session = session.clone();
        let refresh = refresh.clone();
        let push_toast = toasts.push.clone();
        Callback::from(move |_: ()| {
            let cleared = session.borrow_mut().clear_history();
            if cleared > 0 {
                push_toast.emit(("Winners history cleared".to_string(), TOAST_MS));
            }
            refresh.force_update();
        })
    };

    let on_duration = {
        let session = session.clone();
        let refresh = refresh.clone();
        Callback::from(move |secs: f64| {
            let set = session.borrow_mut().set_spin_duration(secs);
            if let Err(e) = set {
                warn!("Ignoring spin duration: {}", e);
            }
            refresh.force_update();
        })
    };

    let on_spin = {
        let session = session.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: ()| {
            let started = session.borrow_mut().spin();
            match started {
                Some(start) => info!(
                    "Spin {} started: {} degrees over {} ms",
                    start.ticket.id(),
                    start.angle,
                    start.duration.as_millis()
                ),
                None => debug!("Spin request ignored"),
            }
            refresh.force_update();
        })
    };

    let on_toggle_mute = {
        let session = session.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: ()| {
            let muted = session.borrow_mut().toggle_mute();
            debug!("Sound {}", if muted { "muted" } else { "unmuted" });
            refresh.force_update();
        })
    };

    // Snapshot for this render
    let (options, wheel_options, winners, duration, spinning, winner, rotation, can_spin, muted) = {
        let s = session.borrow();
        (
            s.options().to_vec(),
            s.wheel_options().to_vec(),
            s.winners().to_vec(),
            s.spin_duration(),
            s.machine().is_spinning(),
            s.machine().winner().map(str::to_string),
            s.machine().rotation(),
            s.can_spin(),
            s.is_muted(),
        )
    };
    let option_count = options.len();
    let year = js_sys::Date::new_0().get_full_year();

    html! {
        <div class="container">
            <header class="app-header">
                <h1>{ "Spin & Win" }</h1>
                <MuteToggle muted={muted} on_toggle={on_toggle_mute} />
            </header>

            <main class="layout">
                <section class="controls-column">
                    <OptionInput
                        options={options}
                        on_add={on_add}
                        on_remove={on_remove_option}
                        on_clear={on_clear_options}
                        on_bulk_add={on_bulk_add}
                    />
                    <SpeedControl duration={duration} disabled={spinning} on_change={on_duration} />
                    <WinnerDisplay
                        winners={winners}
                        on_remove={on_remove_winner}
                        on_clear={on_clear_history}
                    />
                </section>

                <section class="wheel-column">
                    <ResultBanner winner={winner} spinning={spinning} anchor={banner_ref} />
                    <WheelView
                        options={wheel_options}
                        rotation={rotation}
                        duration={duration}
                        spinning={spinning}
                    />
                    <SpinButton
                        enabled={can_spin}
                        spinning={spinning}
                        option_count={option_count}
                        on_spin={on_spin}
                    />
                </section>
            </main>

            <ToastStack toasts={toasts.items.clone()} on_dismiss={toasts.dismiss.clone()} />

            <footer class="app-footer">{ format!("© {} Spin & Win", year) }</footer>
        </div>
    }
}

#[function_component]
pub fn App() -> Html {
    html! { <Main /> }
}

/// Entry point: installs the panic hook and console logger, then starts the Yew renderer.
fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    yew::Renderer::<App>::new().render();
}

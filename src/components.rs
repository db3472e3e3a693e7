//! Yew view components for the Spin & Win UI.
//!
//! Components render from props and report user intent through callbacks;
//! the wheel session itself lives in `main.rs`.

use crate::hooks::{use_validated_input, Toast};
use log::debug;
use spin_and_win::config::{
    LABEL_MAX_CHARS, MAX_SPIN_SECS, MIN_OPTIONS_TO_SPIN, MIN_SPIN_SECS, SPIN_STEP_SECS,
    WHEEL_RADIUS,
};
use spin_and_win::utils::{
    format_secs, parse_duration_secs, truncate_label, validate_new_option,
};
use spin_and_win::wheel::{label_anchor, sector_class, sector_path};
use spin_and_win::SpinDuration;
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

/// Text entry for new options, the option list and the bulk paste area.
#[derive(Properties, PartialEq)]
pub struct OptionInputProps {
    pub options: Vec<String>,
    pub on_add: Callback<String>,
    pub on_remove: Callback<usize>,
    pub on_clear: Callback<()>,
    pub on_bulk_add: Callback<String>,
}

#[function_component(OptionInput)]
pub fn option_input(props: &OptionInputProps) -> Html {
    let text = use_state(String::new);
    let error = use_state(|| None::<String>);
    let bulk_text = use_state(String::new);
    let input_ref = use_node_ref();

    // Focus the entry field on mount
    {
        let input_ref = input_ref.clone();
        use_effect_with((), move |_| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                if let Err(err) = input.focus() {
                    debug!("Could not focus option input: {:?}", err);
                }
            }
        });
    }

    let on_text_input = {
        let text = text.clone();
        let error = error.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text.set(input.value());
            error.set(None);
        })
    };

    let submit = {
        let text = text.clone();
        let error = error.clone();
        let options = props.options.clone();
        let on_add = props.on_add.clone();
        Callback::from(move |_: ()| match validate_new_option(&text, &options) {
            Ok(option) => {
                on_add.emit(option);
                text.set(String::new());
                error.set(None);
            }
            Err(err) => error.set(Some(err.to_string())),
        })
    };

    let onkeydown = {
        let submit = submit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                submit.emit(());
            }
        })
    };

    let on_bulk_input = {
        let bulk_text = bulk_text.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            bulk_text.set(area.value());
        })
    };

    let on_bulk_submit = {
        let bulk_text = bulk_text.clone();
        let on_bulk_add = props.on_bulk_add.clone();
        Callback::from(move |_: MouseEvent| {
            if bulk_text.trim().is_empty() {
                return;
            }
            on_bulk_add.emit((*bulk_text).clone());
            bulk_text.set(String::new());
        })
    };

    html! {
        <div class="option-input card">
            <h2>{ format!("Options ({})", props.options.len()) }</h2>
            <div class="form-group">
                <div class="input-row">
                    <input
                        type="text"
                        ref={input_ref}
                        placeholder="Enter an option"
                        value={(*text).clone()}
                        class={if error.is_some() { "invalid" } else { "" }}
                        oninput={on_text_input}
                        onkeydown={onkeydown}
                    />
                    <button class="btn-primary" onclick={submit.reform(|_: MouseEvent| ())}>
                        { "Add" }
                    </button>
                </div>
                if let Some(ref err) = *error {
                    <div class="input-error">{ err }</div>
                }
            </div>

            if props.options.is_empty() {
                <p class="empty-list">{ "No options yet" }</p>
            } else {
                <ul class="option-list">
                    { props.options.iter().enumerate().map(|(idx, option)| {
                        let on_remove = props.on_remove.clone();
                        html! {
                            <li key={option.clone()}>
                                <span class="option-label">{ option }</span>
                                <button class="btn-icon"
                                    title={format!("Remove {}", option)}
                                    onclick={Callback::from(move |_| on_remove.emit(idx))}
                                >
                                    { "✕" }
                                </button>
                            </li>
                        }
                    }).collect::<Html>() }
                </ul>
            }

            <button class="btn-secondary small"
                disabled={props.options.is_empty()}
                onclick={props.on_clear.reform(|_: MouseEvent| ())}
            >
                { "Clear All" }
            </button>

            <details class="bulk-import">
                <summary>{ "Paste a list" }</summary>
                <textarea
                    rows="4"
                    placeholder="Pizza, Sushi, Tacos (commas or one per line)"
                    value={(*bulk_text).clone()}
                    oninput={on_bulk_input}
                />
                <button class="btn-secondary small" onclick={on_bulk_submit}>
                    { "Add all" }
                </button>
            </details>
        </div>
    }
}

/// Spin duration slider with a free-text entry beside it.
#[derive(Properties, PartialEq)]
pub struct SpeedControlProps {
    pub duration: SpinDuration,
    pub disabled: bool,
    pub on_change: Callback<f64>,
}

#[function_component(SpeedControl)]
pub fn speed_control(props: &SpeedControlProps) -> Html {
    let parse: Rc<dyn Fn(&str) -> Result<f64, String>> = Rc::new(|text: &str| {
        parse_duration_secs(text)
            .and_then(SpinDuration::try_from_secs)
            .map(|d| d.secs())
            .map_err(|e| e.to_string())
    });
    let entry = use_validated_input(props.duration.secs(), parse, props.on_change.clone());

    let on_slider = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(val) = input.value().parse::<f64>() {
                on_change.emit(val);
            }
        })
    };

    let onkeydown = {
        let commit = entry.on_commit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                commit.emit(());
            }
        })
    };

    html! {
        <div class="speed-control card">
            <label for="spin_duration_text_input">{ "Spin Duration:" }</label>
            <div class="slider-with-value">
                <input type="range"
                    min={MIN_SPIN_SECS.to_string()}
                    max={MAX_SPIN_SECS.to_string()}
                    step={SPIN_STEP_SECS.to_string()}
                    value={props.duration.secs().to_string()}
                    disabled={props.disabled}
                    oninput={on_slider}
                />
                <input
                    type="text"
                    id="spin_duration_text_input"
                    size="6"
                    value={entry.text.clone()}
                    disabled={props.disabled}
                    class={if entry.error.is_some() { "invalid" } else { "" }}
                    oninput={entry.on_text_input.clone()}
                    onchange={entry.on_commit.reform(|_: Event| ())}
                    onkeydown={onkeydown}
                />
                <span class="slider-value">
                    { format!("{} ({})", format_secs(props.duration.secs()), props.duration.speed_label()) }
                </span>
            </div>
            if let Some(ref err) = entry.error {
                <div class="input-error">{ err }</div>
            }
        </div>
    }
}

/// Winners history, newest first. Renders nothing while empty.
#[derive(Properties, PartialEq)]
pub struct WinnerDisplayProps {
    pub winners: Vec<String>,
    pub on_remove: Callback<usize>,
    pub on_clear: Callback<()>,
}

#[function_component(WinnerDisplay)]
pub fn winner_display(props: &WinnerDisplayProps) -> Html {
    if props.winners.is_empty() {
        return html! {};
    }

    html! {
        <div class="winner-display card">
            <div class="card-header">
                <h2>{ "Winners" }</h2>
                <button class="btn-secondary small" onclick={props.on_clear.reform(|_: MouseEvent| ())}>
                    { "Clear History" }
                </button>
            </div>
            <ol class="winner-list">
                { props.winners.iter().enumerate().map(|(idx, winner)| {
                    let on_remove = props.on_remove.clone();
                    html! {
                        <li class={if idx == 0 { "latest" } else { "" }}>
                            if idx == 0 {
                                <span class="crown">{ "👑" }</span>
                            }
                            <span class="winner-label">{ winner }</span>
                            <button class="btn-icon"
                                title="Remove from history"
                                onclick={Callback::from(move |_| on_remove.emit(idx))}
                            >
                                { "✕" }
                            </button>
                        </li>
                    }
                }).collect::<Html>() }
            </ol>
        </div>
    }
}

/// The wheel itself: an SVG disc rotated by CSS under a fixed pointer.
#[derive(Properties, PartialEq)]
pub struct WheelViewProps {
    pub options: Vec<String>,
    /// Cumulative clockwise rotation in degrees.
    pub rotation: u64,
    pub duration: SpinDuration,
    pub spinning: bool,
}

#[function_component(WheelView)]
pub fn wheel_view(props: &WheelViewProps) -> Html {
    let count = props.options.len();
    let disc_style = format!(
        "transform: rotate({}deg); transition: transform {}ms cubic-bezier(0.17, 0.67, 0.21, 1);",
        props.rotation,
        props.duration.as_millis()
    );
    let view_box = format!(
        "{0} {0} {1} {1}",
        -WHEEL_RADIUS - 4.0,
        2.0 * WHEEL_RADIUS + 8.0
    );

    let body = if count == 0 {
        html! {
            <>
                <circle class="sector sector-empty" r={WHEEL_RADIUS.to_string()} />
                <text class="wheel-placeholder" text-anchor="middle" dominant-baseline="middle">
                    { "Add options to get started" }
                </text>
            </>
        }
    } else {
        props.options.iter().enumerate().map(|(idx, option)| {
            let (x, y, angle) = label_anchor(idx, count, WHEEL_RADIUS);
            let shape = match sector_path(idx, count, WHEEL_RADIUS) {
                Some(d) => html! { <path class={sector_class(idx)} d={d} /> },
                None => html! { <circle class={sector_class(idx)} r={WHEEL_RADIUS.to_string()} /> },
            };
            html! {
                <g key={option.clone()}>
                    { shape }
                    <text class="sector-label"
                        x={format!("{:.3}", x)}
                        y={format!("{:.3}", y)}
                        transform={format!("rotate({:.3} {:.3} {:.3})", angle, x, y)}
                        text-anchor="middle"
                        dominant-baseline="middle"
                    >
                        { truncate_label(option, LABEL_MAX_CHARS) }
                    </text>
                </g>
            }
        }).collect::<Html>()
    };

    html! {
        <div class={classes!("wheel", props.spinning.then_some("spinning"))}>
            <div class="wheel-pointer" />
            <div class="wheel-disc" style={disc_style}>
                <svg viewBox={view_box} xmlns="http://www.w3.org/2000/svg">
                    { body }
                    <circle class="wheel-hub" r={(WHEEL_RADIUS * 0.08).to_string()} />
                </svg>
            </div>
        </div>
    }
}

/// Big spin button. Disabled while spinning or with too few options.
#[derive(Properties, PartialEq)]
pub struct SpinButtonProps {
    pub enabled: bool,
    pub spinning: bool,
    pub option_count: usize,
    pub on_spin: Callback<()>,
}

#[function_component(SpinButton)]
pub fn spin_button(props: &SpinButtonProps) -> Html {
    let label = if props.spinning { "Spinning..." } else { "SPIN" };
    html! {
        <div class="spin-control">
            <button class="btn-spin"
                disabled={!props.enabled}
                onclick={props.on_spin.reform(|_: MouseEvent| ())}
            >
                { label }
            </button>
            if props.option_count < MIN_OPTIONS_TO_SPIN {
                <p class="hint">{ format!("Add at least {} options to spin", MIN_OPTIONS_TO_SPIN) }</p>
            }
        </div>
    }
}

/// Current spin status. Its box is the origin of the confetti burst.
#[derive(Properties, PartialEq)]
pub struct ResultBannerProps {
    pub winner: Option<String>,
    pub spinning: bool,
    pub anchor: NodeRef,
}

#[function_component(ResultBanner)]
pub fn result_banner(props: &ResultBannerProps) -> Html {
    let body = match (&props.winner, props.spinning) {
        (_, true) => html! { <p class="status">{ "Spinning..." }</p> },
        (Some(winner), false) => html! {
            <>
                <p class="status">{ "The winner is" }</p>
                <p class="winner-name">{ winner }</p>
            </>
        },
        (None, false) => html! { <p class="status">{ "Spin the wheel to find a winner" }</p> },
    };

    html! {
        <div class={classes!("result-banner", props.winner.is_some().then_some("has-winner"))}
            ref={props.anchor.clone()}
        >
            { body }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct MuteToggleProps {
    pub muted: bool,
    pub on_toggle: Callback<()>,
}

#[function_component(MuteToggle)]
pub fn mute_toggle(props: &MuteToggleProps) -> Html {
    let (icon, title) = if props.muted {
        ("🔇", "Unmute sounds")
    } else {
        ("🔊", "Mute sounds")
    };
    html! {
        <button class="btn-icon mute-toggle" title={title}
            aria-pressed={props.muted.to_string()}
            onclick={props.on_toggle.reform(|_: MouseEvent| ())}
        >
            { icon }
        </button>
    }
}

/// Stacked toasts; clicking one dismisses it early.
#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
    pub toasts: Vec<Toast>,
    pub on_dismiss: Callback<u64>,
}

#[function_component(ToastStack)]
pub fn toast_stack(props: &ToastStackProps) -> Html {
    html! {
        <div class="toast-stack" role="status" aria-live="polite">
            { props.toasts.iter().map(|toast| {
                let id = toast.id;
                let on_dismiss = props.on_dismiss.clone();
                html! {
                    <div class="toast" key={id.to_string()} onclick={Callback::from(move |_| on_dismiss.emit(id))}>
                        { &toast.message }
                    </div>
                }
            }).collect::<Html>() }
        </div>
    }
}

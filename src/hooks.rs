use gloo_timers::callback::Timeout;
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Holds the state and callbacks for a validated input field.
#[derive(Clone)]
pub struct ValidatedInput {
    /// The current text content of the input field.
    pub text: String,
    /// An optional error message if validation failed.
    pub error: Option<String>,
    /// Callback for the text input's `oninput` event. Updates the text and clears the error.
    pub on_text_input: Callback<InputEvent>,
    /// Parse the current text and hand the value to `on_valid`.
    /// Used with `onchange` or after an Enter key press on the text input.
    pub on_commit: Callback<()>,
}

/// Custom hook for a text field that mirrors a value owned by the parent.
///
/// The text follows `current` whenever the parent changes it. On commit the
/// text is parsed; a valid value goes to `on_valid`, otherwise the error is
/// kept until the user types again.
#[hook]
pub fn use_validated_input<T: Clone + PartialEq + std::fmt::Display + 'static>(
    current: T,
    parse_and_validate: Rc<dyn Fn(&str) -> Result<T, String>>,
    on_valid: Callback<T>,
) -> ValidatedInput {
    let text_state_handle: UseStateHandle<String> = use_state(|| current.to_string());
    let error_state_handle: UseStateHandle<Option<String>> = use_state(|| None::<String>);

    let on_text_input = {
        let text_setter = text_state_handle.clone();
        let error_setter = error_state_handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text_setter.set(input.value());
            error_setter.set(None);
        })
    };

    let on_commit = {
        let current_text_handle = text_state_handle.clone();
        let error_setter = error_state_handle.clone();
        let parse_fn = parse_and_validate.clone();

        Callback::from(move |_: ()| match parse_fn(current_text_handle.as_str()) {
            Ok(parsed_val) => {
                current_text_handle.set(parsed_val.to_string());
                error_setter.set(None);
                on_valid.emit(parsed_val);
            }
            Err(err_msg) => error_setter.set(Some(err_msg)),
        })
    };

    // Keep the text in step with the parent's value
    {
        let text_setter = text_state_handle.clone();
        let error_setter = error_state_handle.clone();
        use_effect_with(current, move |value| {
            let formatted = value.to_string();
            if *text_setter != formatted {
                text_setter.set(formatted);
            }
            error_setter.set(None);
            || ()
        });
    }

    ValidatedInput {
        text: (*text_state_handle).clone(),
        error: (*error_state_handle).clone(),
        on_text_input,
        on_commit,
    }
}

/// A transient notification.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastList {
    pub items: Vec<Toast>,
}

pub enum ToastAction {
    Push(Toast),
    Dismiss(u64),
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut items = self.items.clone();
        match action {
            ToastAction::Push(toast) => items.push(toast),
            ToastAction::Dismiss(id) => items.retain(|t| t.id != id),
        }
        Rc::new(Self { items })
    }
}

#[derive(Clone)]
pub struct Toasts {
    pub items: Vec<Toast>,
    /// Show `(message, milliseconds)`.
    pub push: Callback<(String, u32)>,
    pub dismiss: Callback<u64>,
}

/// Toast queue with timed auto-dismiss.
#[hook]
pub fn use_toasts() -> Toasts {
    let list = use_reducer(ToastList::default);
    let next_id = use_mut_ref(|| 0u64);

    let push = {
        let dispatcher = list.dispatcher();
        Callback::from(move |(message, ms): (String, u32)| {
            let id = {
                let mut next = next_id.borrow_mut();
                *next += 1;
                *next
            };
            dispatcher.dispatch(ToastAction::Push(Toast { id, message }));
            let dispatcher = dispatcher.clone();
            // A dismissed toast makes the late Dismiss a no-op
            Timeout::new(ms, move || dispatcher.dispatch(ToastAction::Dismiss(id))).forget();
        })
    };

    let dismiss = {
        let dispatcher = list.dispatcher();
        Callback::from(move |id: u64| dispatcher.dispatch(ToastAction::Dismiss(id)))
    };

    Toasts {
        items: list.items.clone(),
        push,
        dismiss,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(id: u64, message: &str) -> Toast {
        Toast {
            id,
            message: message.to_string(),
        }
    }

    #[test]
    fn toasts_queue_in_order_and_dismiss_by_id() {
        let list = Rc::new(ToastList::default());
        let list = list.reduce(ToastAction::Push(toast(1, "Added: Pizza")));
        let list = list.reduce(ToastAction::Push(toast(2, "Added: Sushi")));
        let list = list.reduce(ToastAction::Dismiss(1));
        assert_eq!(list.items, vec![toast(2, "Added: Sushi")]);
        let list = list.reduce(ToastAction::Dismiss(1));
        assert_eq!(list.items.len(), 1);
    }
}

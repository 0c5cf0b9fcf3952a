use crate::components::ui::DialogPanel;
use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;

/// Overlay around `children`. Escape, the backdrop and the close button all
/// call `on_close`; the caller decides whether the modal is mounted.
#[component]
pub fn Modal(
    children: Children,
    #[prop(into)] on_close: Callback<()>,
    #[prop(optional, into)] labelled_by: String,
) -> impl IntoView {
    let handle = window_event_listener(ev::keydown, move |e: web_sys::KeyboardEvent| {
        if e.key() == "Escape" {
            e.prevent_default();
            on_close.run(());
        }
    });
    on_cleanup(move || handle.remove());

    view! {
        <DialogPanel on_dismiss=on_close labelled_by=labelled_by>
            {children()}
        </DialogPanel>
    }
}

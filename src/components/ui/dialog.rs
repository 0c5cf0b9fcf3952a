use icons::X;
use leptos::prelude::*;
use leptos_ui::clx;
use tw_merge::*;

mod components {
    use super::*;
    clx! {DialogBody, div, "flex flex-col gap-4"}
    clx! {DialogHeader, div, "flex flex-col gap-2 text-center sm:text-left"}
    clx! {DialogTitle, h3, "text-lg leading-none font-semibold"}
    clx! {DialogFooter, footer, "flex flex-col-reverse gap-2 sm:flex-row sm:justify-end"}
}

pub use components::*;

/// Backdrop plus centered panel. Visibility is owned by the caller; this only
/// reports dismiss requests.
#[component]
pub fn DialogPanel(
    children: Children,
    #[prop(into)] on_dismiss: Callback<()>,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] labelled_by: String,
    #[prop(default = true)] close_on_backdrop_click: bool,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "relative bg-background border rounded-2xl shadow-lg p-6 w-full max-w-[calc(100%-2rem)] sm:max-w-lg max-h-[85vh] overflow-y-auto fixed top-[50%] left-[50%] translate-x-[-50%] translate-y-[-50%] z-100",
        class
    );

    view! {
        <div
            data-name="DialogBackdrop"
            class="fixed inset-0 z-60 bg-black/50"
            on:click=move |_| {
                if close_on_backdrop_click {
                    on_dismiss.run(());
                }
            }
        />

        <div
            data-name="DialogContent"
            class=merged_class
            role="dialog"
            aria-modal="true"
            aria-labelledby=labelled_by
        >
            <button
                type="button"
                class="absolute top-4 right-4 p-1 rounded-sm focus:ring-2 focus:ring-offset-2 focus:outline-none [&_svg:not([class*='size-'])]:size-4 focus:ring-ring"
                aria-label="Close dialog"
                on:click=move |_| on_dismiss.run(())
            >
                <X />
            </button>

            {children()}
        </div>
    }
}

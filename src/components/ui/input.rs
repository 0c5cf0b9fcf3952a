use leptos::html;
use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

pub(crate) const FIELD_CLASS: &str = "placeholder:text-muted-foreground selection:bg-primary selection:text-primary-foreground dark:bg-input/30 border-input w-full min-w-0 rounded-md border bg-transparent px-3 py-1 text-base shadow-xs transition-[color,box-shadow] outline-none disabled:pointer-events-none disabled:cursor-not-allowed disabled:opacity-50 md:text-sm focus-visible:border-ring focus-visible:ring-ring/50 focus-visible:ring-2 aria-invalid:ring-destructive/20 dark:aria-invalid:ring-destructive/40 aria-invalid:border-destructive";

/// Controlled text input: shows `value`, reports every edit through `on_change`.
//
// NOTE: `bind:value=...` is avoided on purpose; the binding macros have moved
// between Leptos versions and this manual wiring is stable.
#[component]
pub fn Input(
    #[prop(into, optional)] class: String,
    #[prop(into, default = "text")] r#type: &'static str,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] id: String,
    #[prop(optional)] required: bool,
    #[prop(optional)] autofocus: bool,
    #[prop(into, default = false.into())] invalid: Signal<bool>,

    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,

    #[prop(optional)] node_ref: NodeRef<html::Input>,
) -> impl IntoView {
    let merged_class = tw_merge!(FIELD_CLASS, "flex h-9", class);

    let on_input = move |ev: web_sys::Event| {
        if let Some(target) = ev.target() {
            if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
                on_change.run(input.value());
            }
        }
    };

    view! {
        <input
            data-name="Input"
            type=r#type
            class=merged_class
            placeholder=placeholder
            name=name
            id=id
            required=required
            autofocus=autofocus
            aria-invalid=move || if invalid.get() { "true" } else { "false" }
            prop:value=move || value.get()
            on:input=on_input
            node_ref=node_ref
        />
    }
    .into_any()
}

#[component]
pub fn Textarea(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] id: String,
    #[prop(default = 6)] rows: u32,
    #[prop(into, default = false.into())] invalid: Signal<bool>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    let merged_class = tw_merge!(FIELD_CLASS, "min-h-24 py-2 resize-y", class);

    let on_input = move |ev: web_sys::Event| {
        if let Some(target) = ev.target() {
            if let Some(area) = target.dyn_ref::<web_sys::HtmlTextAreaElement>() {
                on_change.run(area.value());
            }
        }
    };

    view! {
        <textarea
            data-name="Textarea"
            class=merged_class
            name=name
            id=id
            rows=rows
            aria-invalid=move || if invalid.get() { "true" } else { "false" }
            prop:value=move || value.get()
            on:input=on_input
        />
    }
}

/// Native `<select>` over a fixed list of `(value, label)` options.
#[component]
pub fn NativeSelect(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] id: String,
    options: Vec<(String, String)>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    let merged_class = tw_merge!(FIELD_CLASS, "flex h-9", class);

    let on_select = move |ev: web_sys::Event| {
        if let Some(target) = ev.target() {
            if let Some(select) = target.dyn_ref::<web_sys::HtmlSelectElement>() {
                on_change.run(select.value());
            }
        }
    };

    view! {
        <select
            data-name="NativeSelect"
            class=merged_class
            name=name
            id=id
            prop:value=move || value.get()
            on:change=on_select
        >
            {options
                .into_iter()
                .map(|(v, label)| {
                    let v2 = v.clone();
                    view! {
                        <option value=v selected=move || value.get() == v2>
                            {label}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}

use crate::components::ui::Input;
use icons::Search;
use leptos::prelude::*;

#[component]
pub fn SearchBox(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="relative w-full max-w-xs">
            <Search class="pointer-events-none absolute left-3 top-1/2 size-4 -translate-y-1/2 text-muted-foreground" />
            <Input
                class="pl-9"
                r#type="search"
                name="search"
                placeholder="Search notes"
                value=value
                on_change=on_change
            />
        </div>
    }
}

use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use icons::{ChevronLeft, ChevronRight};
use leptos::prelude::*;

/// Pages always shown around the current one.
const WINDOW: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PageItem {
    Page(u32),
    Gap,
}

/// Buttons to render for `current` out of `count` pages: first and last page,
/// a window around `current`, and gaps where pages are skipped.
pub(crate) fn page_items(current: u32, count: u32) -> Vec<PageItem> {
    if count == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, count);

    // Window plus both ends plus two gaps fits without skipping anything.
    if count <= WINDOW + 2 {
        return (1..=count).map(PageItem::Page).collect();
    }

    let mut start = current.saturating_sub(WINDOW / 2).max(2);
    let end = (start + WINDOW - 1).min(count - 1);
    start = start.min(end + 1 - WINDOW);

    let mut items = vec![PageItem::Page(1)];
    if start > 2 {
        items.push(PageItem::Gap);
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < count - 1 {
        items.push(PageItem::Gap);
    }
    items.push(PageItem::Page(count));
    items
}

#[component]
pub fn Pagination(
    #[prop(into)] page_count: Signal<u32>,
    #[prop(into)] current_page: Signal<u32>,
    #[prop(into)] on_page_change: Callback<u32>,
) -> impl IntoView {
    let go = move |page: u32| {
        let count = page_count.get_untracked();
        if count == 0 || page == current_page.get_untracked() {
            return;
        }
        on_page_change.run(page.clamp(1, count));
    };

    view! {
        <nav aria-label="Pagination" class="flex items-center gap-1">
            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Icon
                attr:aria-label="Previous page"
                attr:disabled=move || current_page.get() <= 1
                on:click=move |_| go(current_page.get_untracked().saturating_sub(1))
            >
                <ChevronLeft />
            </Button>

            {move || {
                let current = current_page.get();
                page_items(current, page_count.get())
                    .into_iter()
                    .map(|item| match item {
                        PageItem::Page(n) => {
                            let is_current = n == current;
                            view! {
                                <Button
                                    variant=if is_current { ButtonVariant::Default } else { ButtonVariant::Ghost }
                                    size=ButtonSize::Sm
                                    attr:aria-current=if is_current { Some("page") } else { None }
                                    on:click=move |_| go(n)
                                >
                                    {n}
                                </Button>
                            }
                            .into_any()
                        }
                        PageItem::Gap => {
                            view! { <span class="px-2 text-muted-foreground">"…"</span> }.into_any()
                        }
                    })
                    .collect_view()
            }}

            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Icon
                attr:aria-label="Next page"
                attr:disabled=move || current_page.get() >= page_count.get()
                on:click=move |_| go(current_page.get_untracked() + 1)
            >
                <ChevronRight />
            </Button>
        </nav>
    }
}

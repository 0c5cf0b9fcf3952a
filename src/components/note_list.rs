use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardFooter, CardList, CardTitle,
    Spinner, TagBadge,
};
use crate::models::Note;
use leptos::prelude::*;

/// Note cards with a delete control each. `is_deleting` disables the control
/// of a row whose delete is in flight.
#[component]
pub fn NoteList(
    #[prop(into)] notes: Signal<Vec<Note>>,
    #[prop(into)] is_deleting: Callback<String, bool>,
    #[prop(into)] on_delete: Callback<String>,
) -> impl IntoView {
    view! {
        <CardList>
            <For
                each=move || notes.get()
                key=|note: &Note| (note.id.clone(), note.title.clone(), note.content.clone(), note.tag.clone())
                children=move |note: Note| {
                    let id = note.id.clone();
                    let id_for_click = note.id.clone();
                    let pending = Signal::derive(move || is_deleting.run(id.clone()));

                    view! {
                        <Card>
                            <CardTitle>{note.title}</CardTitle>
                            <CardContent>{note.content}</CardContent>
                            <CardFooter>
                                <TagBadge>{note.tag}</TagBadge>
                                <Button
                                    variant=ButtonVariant::Destructive
                                    size=ButtonSize::Sm
                                    attr:disabled=move || pending.get()
                                    on:click=move |_| on_delete.run(id_for_click.clone())
                                >
                                    <Show when=move || pending.get() fallback=|| ().into_view()>
                                        <Spinner label="Deleting" />
                                    </Show>
                                    "Delete"
                                </Button>
                            </CardFooter>
                        </Card>
                    }
                }
            />
        </CardList>
    }
}

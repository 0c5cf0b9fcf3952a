use crate::api::{ApiClient, EnvConfig};
use crate::components::hooks::{use_debounce, use_random_id_for};
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Spinner,
};
use crate::components::{Modal, NoteForm, NoteList, Pagination, SearchBox};
use crate::models::CreateNotePayload;
use crate::state::{AppContext, AppState, NotesSession, SEARCH_DEBOUNCE_MS};
use icons::{Plus, X};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn App() -> impl IntoView {
    let config = EnvConfig::new();
    web_sys::console::log_1(&format!("[App] Notes API at {}", config.api_url).into());

    let state = AppState::new(ApiClient::from_config(&config));
    provide_context(AppContext(state));

    view! { <NotesScreen /> }
}

#[component]
fn NotesScreen() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let session = app_state.0.session;
    let api_client = app_state.0.api_client;

    let query_key = Memo::new(move |_| session.with(|s| s.query_key()));
    let cache_epoch = Memo::new(move |_| session.with(|s| s.cache_epoch()));
    let notes_view = Memo::new(move |_| session.with(|s| s.view()));

    // Fetch whenever the key changes or the cache is invalidated. The session
    // decides whether a request is actually due.
    Effect::new(move |_| {
        query_key.track();
        cache_epoch.track();

        let Some(ticket) = session.try_update(|s| s.begin_fetch()).flatten() else {
            return;
        };

        let params = NotesSession::fetch_params(&ticket.key);
        let client = api_client.get_untracked();
        spawn_local(async move {
            let result = client.fetch_notes(&params).await;
            if let Err(e) = &result {
                web_sys::console::error_1(
                    &format!("[Notes] Loading page {} failed: {}", params.page, e).into(),
                );
            }

            let applied = session
                .try_update(|s| s.finish_fetch(&ticket, result))
                .unwrap_or(false);
            if !applied {
                web_sys::console::log_1(
                    &format!("[Notes] Dropped superseded result for {:?}", ticket.key).into(),
                );
            }
        });
    });

    let commit_search = use_debounce(
        SEARCH_DEBOUNCE_MS,
        Callback::new(move |text: String| session.update(|s| s.search_committed(text))),
    );
    let on_search_change = Callback::new(move |text: String| {
        session.update(|s| s.search_input(text.clone()));
        commit_search.run(text);
    });

    let on_create = Callback::new(move |payload: CreateNotePayload| {
        if !session.try_update(|s| s.begin_create()).unwrap_or(false) {
            return;
        }

        let client = api_client.get_untracked();
        spawn_local(async move {
            let result = client.create_note(&payload).await;
            match &result {
                Ok(note) => {
                    web_sys::console::log_1(&format!("[Notes] Created {}", note.id).into())
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[Notes] Create failed: {}", e).into())
                }
            }
            session.update(|s| s.finish_create(result));
        });
    });

    let on_delete = Callback::new(move |id: String| {
        if !session.try_update(|s| s.begin_delete(&id)).unwrap_or(false) {
            return;
        }

        let client = api_client.get_untracked();
        spawn_local(async move {
            let result = client.delete_note(&id).await;
            match &result {
                Ok(_) => web_sys::console::log_1(&format!("[Notes] Deleted {}", id).into()),
                Err(e) => web_sys::console::error_1(
                    &format!("[Notes] Delete of {} failed: {}", id, e).into(),
                ),
            }
            session.update(|s| s.finish_delete(&id, result));
        });
    });

    let is_deleting = Callback::new(move |id: String| session.with(|s| s.is_deleting(&id)));
    let close_modal = Callback::new(move |_: ()| session.update(|s| s.close_modal()));

    let search_text = Signal::derive(move || session.with(|s| s.search_text().to_string()));
    let current_page = Signal::derive(move || session.with(|s| s.page()));
    let total_pages = Signal::derive(move || notes_view.with(|v| v.total_pages));
    let notes = Signal::derive(move || notes_view.with(|v| v.notes.clone()));
    let creating = Signal::derive(move || session.with(|s| s.creating()));
    let create_error =
        Signal::derive(move || session.with(|s| s.create_error().map(|e| e.to_string())));
    let mutation_error =
        Signal::derive(move || session.with(|s| s.mutation_error().map(|e| e.to_string())));

    let form_title_id = StoredValue::new(use_random_id_for("note_form_title"));

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex w-full max-w-6xl flex-col gap-6 px-4 py-6">
                <header class="flex flex-wrap items-center justify-between gap-3">
                    <SearchBox value=search_text on_change=on_search_change />

                    <Show
                        when=move || notes_view.with(|v| v.show_pagination())
                        fallback=|| ().into_view()
                    >
                        <Pagination
                            page_count=total_pages
                            current_page=current_page
                            on_page_change=move |page: u32| session.update(|s| s.set_page(page))
                        />
                    </Show>

                    <Button on:click=move |_| session.update(|s| s.open_modal())>
                        <Plus />
                        "Create note"
                    </Button>
                </header>

                {move || {
                    mutation_error.get().map(|e| view! {
                        <Alert class="border-destructive/30">
                            <AlertDescription class="text-destructive">{e}</AlertDescription>
                            <Button
                                variant=ButtonVariant::Ghost
                                size=ButtonSize::Icon
                                attr:aria-label="Dismiss"
                                on:click=move |_| session.update(|s| s.dismiss_mutation_error())
                            >
                                <X />
                            </Button>
                        </Alert>
                    })
                }}

                <Show when=move || notes_view.with(|v| v.loading) fallback=|| ().into_view()>
                    <div class="flex items-center gap-2 text-sm text-muted-foreground">
                        <Spinner />
                        "Loading..."
                    </div>
                </Show>

                <Show when=move || notes_view.with(|v| v.error) fallback=|| ().into_view()>
                    <p class="text-sm text-destructive">"Error loading notes"</p>
                </Show>

                <Show when=move || notes_view.with(|v| v.empty) fallback=|| ().into_view()>
                    <p class="text-sm text-muted-foreground">"No notes found"</p>
                </Show>

                <Show
                    when=move || notes_view.with(|v| !v.notes.is_empty())
                    fallback=|| ().into_view()
                >
                    <NoteList notes=notes is_deleting=is_deleting on_delete=on_delete />
                </Show>
            </div>

            <Show when=move || session.with(|s| s.modal_open()) fallback=|| ().into_view()>
                <Modal on_close=close_modal labelled_by=form_title_id.get_value()>
                    <NoteForm
                        on_submit=on_create
                        on_cancel=close_modal
                        submitting=creating
                        server_error=create_error
                        title_id=form_title_id.get_value()
                    />
                </Modal>
            </Show>
        </div>
    }
}

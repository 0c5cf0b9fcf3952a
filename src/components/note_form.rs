use crate::components::hooks::use_random_id_for;
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonVariant, DialogBody, DialogFooter, DialogHeader,
    DialogTitle, FieldMessage, Input, Label, NativeSelect, Spinner, Textarea,
};
use crate::models::{CreateNotePayload, FieldError, NoteField, NoteTag};
use leptos::prelude::*;
use std::str::FromStr;
use strum::IntoEnumIterator;

fn field_message(errors: &[FieldError], field: NoteField) -> Option<String> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.clone())
}

#[component]
pub fn NoteForm(
    #[prop(into)] on_submit: Callback<CreateNotePayload>,
    #[prop(into)] on_cancel: Callback<()>,
    #[prop(into)] submitting: Signal<bool>,
    #[prop(into)] server_error: Signal<Option<String>>,
    #[prop(optional, into)] title_id: String,
) -> impl IntoView {
    let title = RwSignal::new(String::new());
    let content = RwSignal::new(String::new());
    let tag = RwSignal::new(NoteTag::default());
    let errors: RwSignal<Vec<FieldError>> = RwSignal::new(vec![]);

    let title_input_id = use_random_id_for("title");
    let content_input_id = use_random_id_for("content");
    let tag_input_id = use_random_id_for("tag");

    let payload = move || CreateNotePayload {
        title: title.get_untracked(),
        content: content.get_untracked(),
        tag: tag.get_untracked(),
    };

    // Re-check on edit once a submit attempt has shown errors.
    let revalidate = move || {
        if !errors.get_untracked().is_empty() {
            errors.set(payload().validate().err().unwrap_or_default());
        }
    };

    let on_form_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        let p = payload().normalized();
        match p.validate() {
            Ok(()) => {
                errors.set(vec![]);
                on_submit.run(p);
            }
            Err(errs) => errors.set(errs),
        }
    };

    let title_error = Signal::derive(move || field_message(&errors.get(), NoteField::Title));
    let content_error = Signal::derive(move || field_message(&errors.get(), NoteField::Content));

    let tag_options: Vec<(String, String)> = NoteTag::iter()
        .map(|t| (t.to_string(), t.to_string()))
        .collect();

    view! {
        <DialogBody>
            <DialogHeader>
                <DialogTitle attr:id=title_id>"New note"</DialogTitle>
            </DialogHeader>

            <form class="flex flex-col gap-4" on:submit=on_form_submit novalidate=true>
                <div class="flex flex-col gap-2">
                    <Label html_for=title_input_id.clone()>"Title"</Label>
                    <Input
                        id=title_input_id
                        name="title"
                        autofocus=true
                        invalid=Signal::derive(move || title_error.get().is_some())
                        value=title
                        on_change=move |v: String| {
                            title.set(v);
                            revalidate();
                        }
                    />
                    <FieldMessage message=title_error />
                </div>

                <div class="flex flex-col gap-2">
                    <Label html_for=content_input_id.clone()>"Content"</Label>
                    <Textarea
                        id=content_input_id
                        name="content"
                        invalid=Signal::derive(move || content_error.get().is_some())
                        value=content
                        on_change=move |v: String| {
                            content.set(v);
                            revalidate();
                        }
                    />
                    <FieldMessage message=content_error />
                </div>

                <div class="flex flex-col gap-2">
                    <Label html_for=tag_input_id.clone()>"Tag"</Label>
                    <NativeSelect
                        id=tag_input_id
                        name="tag"
                        options=tag_options
                        value=Signal::derive(move || tag.get().to_string())
                        on_change=move |v: String| {
                            if let Ok(t) = NoteTag::from_str(&v) {
                                tag.set(t);
                            }
                        }
                    />
                </div>

                {move || {
                    server_error.get().map(|e| view! {
                        <Alert class="border-destructive/30">
                            <AlertDescription class="text-destructive">{e}</AlertDescription>
                        </Alert>
                    })
                }}

                <DialogFooter>
                    <Button
                        variant=ButtonVariant::Outline
                        attr:disabled=move || submitting.get()
                        on:click=move |ev: web_sys::MouseEvent| {
                            // Plain button inside a form; keep it from submitting.
                            ev.prevent_default();
                            on_cancel.run(());
                        }
                    >
                        "Cancel"
                    </Button>
                    <Button attr:disabled=move || submitting.get()>
                        <Show when=move || submitting.get() fallback=|| ().into_view()>
                            <Spinner />
                        </Show>
                        {move || if submitting.get() { "Creating..." } else { "Create note" }}
                    </Button>
                </DialogFooter>
            </form>
        </DialogBody>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_message_picks_matching_field() {
        let errors = vec![
            FieldError {
                field: NoteField::Content,
                message: "too long".to_string(),
            },
            FieldError {
                field: NoteField::Title,
                message: "required".to_string(),
            },
        ];
        assert_eq!(field_message(&errors, NoteField::Title).as_deref(), Some("required"));
        assert_eq!(field_message(&errors, NoteField::Content).as_deref(), Some("too long"));
        assert!(field_message(&[], NoteField::Title).is_none());
    }
}

pub(crate) mod hooks;
pub(crate) mod modal;
pub(crate) mod note_form;
pub(crate) mod note_list;
pub(crate) mod pagination;
pub(crate) mod search_box;
pub(crate) mod ui;

pub(crate) use modal::Modal;
pub(crate) use note_form::NoteForm;
pub(crate) use note_list::NoteList;
pub(crate) use pagination::Pagination;
pub(crate) use search_box::SearchBox;

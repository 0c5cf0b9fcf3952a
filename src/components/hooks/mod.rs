pub(crate) mod use_debounce;
pub(crate) mod use_random;

pub(crate) use use_debounce::use_debounce;
pub(crate) use use_random::use_random_id_for;

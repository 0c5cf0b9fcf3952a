pub(crate) mod query_cache;

pub(crate) use query_cache::{FetchTicket, QueryCache, QueryKey};

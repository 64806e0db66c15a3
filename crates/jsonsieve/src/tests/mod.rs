mod arbitrary;
mod snapshot_events;
pub(crate) mod utils;

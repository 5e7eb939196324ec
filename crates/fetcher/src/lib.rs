pub mod client;
pub mod fetch;
pub mod query;

pub use self::client::MturkClient;
pub use self::fetch::{batch_fetch_hits, fetch_queue};
pub use self::query::{generate_query_string, parse_query_string, QUEUE_PATH};

pub mod list;
pub mod normalize;

pub use list::{filter_search_results, Blocklist};
pub use normalize::{
    block_confirmation, blocked_after, blocked_hit_from_search_result, blocked_within,
    create_blocked_requester,
};

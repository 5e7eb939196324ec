pub mod extract;
pub mod markup;
pub mod tabulate;

#[cfg(test)]
pub(crate) mod testing;

pub use extract::{
    create_queue_item, create_search_item, find_hit_form, parse_batch_size, parse_group_id,
    parse_hit_id_queue, parse_hit_reward, parse_hit_title, parse_requester_id,
    parse_requester_name,
};
pub use tabulate::{
    parse_queue_page, parse_search_page, select_hit_containers, tabulate_queue_data,
    tabulate_search_data,
};

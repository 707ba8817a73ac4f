pub mod dedup;
pub mod fields;
pub mod url_reduce;

pub use dedup::OrderedSet;
pub use fields::extract_values;
pub use url_reduce::reduce_url;

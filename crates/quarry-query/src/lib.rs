mod grouping;
mod mlt;
mod params;
mod query;
mod sort;

pub use grouping::{GroupFormat, GroupingParameters};
pub use mlt::MoreLikeThisOptions;
pub use params::Params;
pub use query::QueryOptions;
pub use sort::{Sort, SortDirection};

pub mod median;
pub mod tvl;

pub use median::{drop_known_bad, smooth};
pub use tvl::{compose, latest_section_values};

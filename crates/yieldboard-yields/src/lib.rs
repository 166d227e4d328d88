pub mod dto;
pub mod enrich;
pub mod service;

pub use dto::{LendBorrowPage, ProjectInfo, ProjectYieldSummary, YieldPage};
pub use service::{ReferenceTables, YieldAggregator, project_yield_summary};

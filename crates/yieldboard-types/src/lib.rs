pub mod config;
pub mod median;
pub mod pool;
pub mod prices;
pub mod tables;
pub mod tvl;

pub use config::{ProtocolConfig, YieldConfig};
pub use median::{MedianApyPoint, SmoothedMedianPoint};
pub use pool::{LendBorrowEntry, LendBorrowPool, Pool};
pub use prices::{CoinPrice, PriceMap};
pub use tables::{
    ChainAliases, ExtraTvlOption, ExtraTvlRegistry, ExtraTvlSettings, SymbolUnwraps,
    TokenNameMapping,
};
pub use tvl::{ChainTvl, ChainTvlHistory, ChainTvlPoint, ExtraTvlRow, ProtocolTvl};

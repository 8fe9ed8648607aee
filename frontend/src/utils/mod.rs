pub mod dates;
pub mod query;
pub mod stale;
pub mod storage;

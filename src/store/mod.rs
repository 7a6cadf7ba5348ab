pub mod daily;

pub use daily::DailyCache;

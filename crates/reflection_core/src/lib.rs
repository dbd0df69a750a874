pub mod analysis;
pub mod domain;
pub mod journal;
pub mod ports;
pub mod report;
pub mod sharing;

#[cfg(test)]
pub(crate) mod test_support;

pub use analysis::TextSignalAnalyzer;
pub use domain::{
    Category, CategoryShare, EmailNotification, EmotionAnalysis, Entry, FrequencyCount,
    MonthlyAverage, MonthlyReflection, Overview, Priority, ShareRecord, ShareSettings, Trend,
    WeeklyReflection,
};
pub use journal::Journal;
pub use ports::{
    Clock, EmailService, EntryStore, PortError, PortResult, RandomSource, ShareStore, SystemClock,
    ThreadRandom,
};
pub use sharing::ShareService;

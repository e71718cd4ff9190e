pub mod driver;
pub mod process;
pub mod result;
pub mod stats;
pub mod workload;

pub use driver::Sim;
pub use process::{ProcessRecord, ScheduleRequest};
pub use result::{ScheduleResponse, ScheduleResult};
pub use stats::{ProcessStats, Summary, process_stats, summarize};
pub use workload::WorkloadSpec;

pub mod driver;
pub mod dsq;
pub mod event;
pub mod observer;
pub mod ready;
pub mod state;

pub use driver::SchedCore;
pub use dsq::{Dsq, SelectKey};
pub use event::{DispatchEvent, SchedCoreEvent};
pub use ready::ReadyQueueManager;
pub use state::{Pid, Priority, ProcKey, ProcState, RunCtx, RuntimeState, Ticks};

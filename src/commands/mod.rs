mod collect;
mod outline;
mod read;
mod watch;

pub use collect::*;
pub use outline::*;
pub use read::*;
pub use watch::*;

pub mod observation;
pub mod period;
pub mod schedule;
pub mod trend;

pub use observation::*;
pub use period::*;
pub use schedule::*;
pub use trend::*;

mod event;
mod fixture;
mod metrics;
mod series;

pub use event::*;
pub use fixture::*;
pub use metrics::*;
pub use series::*;

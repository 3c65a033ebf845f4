//! Operators.
//!
//! Each operator is an inherent method on [`Observable`] returning a new cold
//! observable. Subscribing to the result subscribes to the source with an
//! operator observer that forwards into the downstream subscriber, so
//! disposing downstream disposes upstream as well.
//!
//! [`Observable`]: crate::observable::Observable

pub mod filter;
pub mod map;
pub mod scan;
pub mod take;

pub use filter::FilterObserver;
pub use map::MapObserver;
pub use scan::ScanObserver;
pub use take::TakeObserver;

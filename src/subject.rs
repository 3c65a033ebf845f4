//! Hot multicasting subjects.
//!
//! A [`Subject`] is an observer and an observable at once: values pushed into
//! it are delivered to every current subscriber. The three variants differ
//! only in what a late subscriber is handed first:
//!
//! | Variant | On subscribe | After termination |
//! |---------|--------------|-------------------|
//! | [`PublishSubject`] | nothing | terminal event |
//! | [`BehaviorSubject`] | the current value | terminal event |
//! | [`ReplaySubject`] | the last `n` values | last `n` values, then terminal event |
//!
//! ```rust
//! use std::convert::Infallible;
//!
//! use rxlite::prelude::*;
//!
//! let subject = BehaviorSubject::<i32, Infallible>::new(0);
//! subject.subscribe(|v| println!("A: {}", v)); // A: 0
//! subject.next(1); // A: 1
//! subject.subscribe(|v| println!("B: {}", v)); // B: 1
//! subject.complete();
//! subject.next(2); // ignored
//! ```

mod behavior_subject;
mod publish_subject;
mod replay;
mod replay_subject;
mod subject_core;
mod subscribers;

pub use behavior_subject::BehaviorSubject;
pub use publish_subject::PublishSubject;
pub use replay::{Bounded, Latest, NoReplay, ReplayBuffer};
pub use replay_subject::ReplaySubject;
pub use subject_core::{Subject, SubjectObserver};

//! Prelude module for convenient imports
//!
//! `use rxlite::prelude::*;` brings in everything needed to create, transform
//! and subscribe to observables.

pub use crate::{
  observable::Observable,
  observer::{AllObserver, Event, EventObserver, FnMutObserver, Observer},
  relay::{BehaviorRelay, PublishRelay, Relay, ReplayRelay},
  subject::{BehaviorSubject, PublishSubject, ReplaySubject, Subject},
  subscriber::Subscriber,
  subscription::{ClosureSubscription, Disposable, DisposeBag, Subscription},
};

//! A guided tour of the core: constructors, disposal, subjects and relays.
//!
//! Run with `cargo run --example walkthrough`; set `RUST_LOG=rxlite=trace` to
//! watch ignored events and disposals.

use std::{
  convert::Infallible,
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
  },
};

use rxlite::prelude::*;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Error)]
enum SampleError {
  #[error("an error")]
  AnError,
}

fn example(description: &str, action: impl FnOnce()) {
  println!("\n--- Example of: {} ---", description);
  action();
}

fn main() {
  tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

  example("just", || {
    Observable::<_, Infallible>::just("Just Test").subscribe(|s| println!("{}", s));
  });

  example("of", || {
    Observable::<_, Infallible>::of(["1", "2"]).subscribe(|s| println!("{}", s));
  });

  example("from_iter", || {
    Observable::<_, Infallible>::from_iter(vec!["1", "2"]).subscribe(|s| println!("{}", s));
  });

  example("create", || {
    let observable = Observable::<&str, Infallible>::create(|subscriber| {
      subscriber.next("1");
      subscriber.complete();
      // Dropped: the subscription already completed.
      subscriber.next("2");
    });
    observable.subscribe(|s| println!("{}", s));
  });

  example("empty", || {
    Observable::<(), Infallible>::empty().subscribe_all(
      |v| println!("{:?}", v),
      |_| {},
      || println!("Completed"),
    );
  });

  example("never", || {
    Observable::<(), Infallible>::never().subscribe_all(
      |v| println!("{:?}", v),
      |_| {},
      || println!("Completed"),
    );
  });

  example("range", || {
    Observable::<i64, Infallible>::range(1, 3).subscribe(|i| println!("{}", i));
  });

  example("dispose", || {
    let subscription = Observable::<_, Infallible>::of(["1", "2", "3"])
      .subscribe_event(|event| println!("{:?}", event));
    subscription.dispose();
  });

  example("dispose bag", || {
    let bag = DisposeBag::new();
    Observable::<_, Infallible>::of(["1", "2", "3"])
      .subscribe_event(|event| println!("{:?}", event))
      .disposed_by(&bag);
    println!("{:?}", bag);
  });

  example("defer", || {
    let bag = DisposeBag::new();
    let flip = Arc::new(AtomicBool::new(false));
    let factory = Observable::<i32, Infallible>::defer(move || {
      if !flip.fetch_xor(true, Ordering::SeqCst) {
        Observable::of([1, 2, 3])
      } else {
        Observable::of([4, 5, 6])
      }
    });
    for _ in 0..4 {
      factory.subscribe(|v| print!("{}", v)).disposed_by(&bag);
      println!();
    }
  });

  example("PublishSubject", || {
    let subject = PublishSubject::<&str, SampleError>::new();
    // Nobody listens yet.
    subject.next("first");

    let one = subject.subscribe(|s| println!("{}", s));
    subject.next("1");
    subject.next("2");
    one.dispose();

    let two = subject.subscribe_event(|event| match event {
      Event::Next(s) => println!("2) {}", s),
      other => println!("2) {:?}", other),
    });
    subject.next("3");
    subject.next("4");
    subject.complete();
    subject.next("5");
    two.dispose();

    let bag = DisposeBag::new();
    subject.subscribe_event(|event| println!("3) {:?}", event)).disposed_by(&bag);
    subject.next("?");
  });

  example("BehaviorSubject", || {
    let subject = BehaviorSubject::<&str, SampleError>::new("Initial value");
    let bag = DisposeBag::new();
    subject.next("X");
    subject.subscribe_event(|event| println!("1) {:?}", event)).disposed_by(&bag);
    subject.error(SampleError::AnError);
    subject.subscribe_event(|event| println!("2) {:?}", event)).disposed_by(&bag);
  });

  example("ReplaySubject", || {
    let subject = ReplaySubject::<&str, SampleError>::new(2);
    let bag = DisposeBag::new();
    subject.next("1");
    subject.next("2");
    subject.next("3");
    subject.subscribe_event(|event| println!("1) {:?}", event)).disposed_by(&bag);
    subject.subscribe_event(|event| println!("2) {:?}", event)).disposed_by(&bag);
    subject.next("4");
    subject.error(SampleError::AnError);
    subject.subscribe_event(|event| println!("3) {:?}", event)).disposed_by(&bag);
  });

  example("PublishRelay", || {
    let relay = PublishRelay::<&str>::new();
    let bag = DisposeBag::new();
    relay.accept("first");
    relay.subscribe(|s| println!("{}", s)).disposed_by(&bag);
    relay.accept("1");
  });
}

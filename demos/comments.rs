//! The comments screen without a screen: every "tap" bumps a counter that is
//! bound to the view model's trigger, and the outputs are printed.
//!
//! Run with `cargo run --example comments -- [taps]`. Requires network access
//! to jsonplaceholder.typicode.com.

use std::{convert::Infallible, time::Duration};

use rxlite::{
  network::{CommentService, HttpTransport},
  prelude::*,
  view_model::{State, ViewModel},
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

  let taps: usize = std::env::args().nth(1).map(|arg| arg.parse()).transpose()?.unwrap_or(3);

  let runtime = tokio::runtime::Runtime::new()?;
  let service = CommentService::new(HttpTransport::new()?, runtime.handle().clone());
  let view_model = ViewModel::new(service);
  let bag = DisposeBag::new();

  view_model
    .output
    .state
    .subscribe(|state| match state {
      State::Loading => println!("loading"),
      State::Done => println!("done"),
      State::Error(message) => println!("{}", message),
    })
    .disposed_by(&bag);

  view_model
    .output
    .posts
    .subscribe(|posts| {
      let post_ids: Vec<i64> = posts.iter().map(|p| p.post_id).collect();
      println!("{:?}", post_ids);
    })
    .disposed_by(&bag);

  let button = PublishSubject::<(), Infallible>::new();
  button
    .as_observable()
    .scan(0i64, |count, _| count + 1)
    .bind_to(&view_model.input.trigger)
    .disposed_by(&bag);

  for _ in 0..taps {
    button.next(());
    std::thread::sleep(Duration::from_secs(1));
  }
  Ok(())
}

//! View model of the comments screen.
//!
//! Every value pushed into [`Input::trigger`] starts a fetch of that post's
//! comments. Progress is published on [`Output::state`] and the result on
//! [`Output::posts`]. Both outputs are behavior relays, so a view binding late
//! still sees the current state.

use std::sync::{Arc, Weak};

use tracing::{debug, trace};

use crate::{
  network::{CommentService, NetworkError, Post, Transport},
  observable::Observable,
  observer::Event,
  relay::BehaviorRelay,
  subscription::{Disposable, DisposeBag},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
  Loading,
  Done,
  Error(String),
}

/// Anything that can fetch the comments of a post.
pub trait CommentSource: Send + Sync + 'static {
  fn fetch_comments(&self, post_id: i64) -> Observable<Vec<Post>, NetworkError>;
}

impl<T: Transport> CommentSource for CommentService<T> {
  fn fetch_comments(&self, post_id: i64) -> Observable<Vec<Post>, NetworkError> {
    CommentService::fetch_comments(self, post_id)
  }
}

#[derive(Clone)]
pub struct Input {
  pub trigger: BehaviorRelay<i64>,
}

impl Default for Input {
  fn default() -> Self { Self { trigger: BehaviorRelay::new(0) } }
}

#[derive(Clone)]
pub struct Output {
  pub state: BehaviorRelay<State>,
  pub posts: BehaviorRelay<Vec<Post>>,
}

impl Default for Output {
  fn default() -> Self {
    Self { state: BehaviorRelay::new(State::Done), posts: BehaviorRelay::new(vec![]) }
  }
}

/// Turns trigger values into fetches.
///
/// The view model owns the dispose bag holding its trigger binding and every
/// fetch; dropping the view model cancels them all. The binding only holds a
/// weak reference to that bag.
pub struct ViewModel {
  pub input: Input,
  pub output: Output,
  dispose_bag: Arc<DisposeBag>,
}

impl ViewModel {
  /// Bind fresh relays to `source`.
  ///
  /// The trigger starts at `0`, so a first fetch runs right away.
  pub fn new(source: impl CommentSource) -> Self {
    Self::with_relays(source, Input::default(), Output::default())
  }

  pub fn with_relays(source: impl CommentSource, input: Input, output: Output) -> Self {
    let dispose_bag = Arc::new(DisposeBag::new());
    let bag = Arc::downgrade(&dispose_bag);
    Self::bind_trigger(Arc::new(source), &input, &output, bag).disposed_by(&dispose_bag);
    Self { input, output, dispose_bag }
  }

  pub fn dispose_bag(&self) -> &DisposeBag { &self.dispose_bag }

  fn bind_trigger<S: CommentSource>(
    source: Arc<S>,
    input: &Input,
    output: &Output,
    bag: Weak<DisposeBag>,
  ) -> Disposable {
    let output = output.clone();
    input.trigger.subscribe(move |post_id| {
      let Some(bag) = bag.upgrade() else {
        trace!(post_id, "trigger after view model dropped");
        return;
      };
      fetch(&*source, &output, post_id).disposed_by(&bag);
    })
  }
}

fn fetch(source: &impl CommentSource, output: &Output, post_id: i64) -> Disposable {
  debug!(post_id, "fetching comments");
  output.state.accept(State::Loading);
  let output = output.clone();
  source.fetch_comments(post_id).subscribe_event(move |event| match event {
    Event::Next(posts) => output.posts.accept(posts),
    Event::Error(err) => output.state.accept(State::Error(err.to_string())),
    Event::Completed => output.state.accept(State::Done),
  })
}

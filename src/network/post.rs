use serde::{Deserialize, Serialize};

/// One comment as served by the comments endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
  pub post_id: i64,
  pub id: i64,
  pub name: String,
  pub email: String,
  pub body: String,
}

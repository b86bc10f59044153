//! Read-side view over posts: optional title sort and `user_id` redaction

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Post;

/// Sort order applied to post titles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleOrder {
    /// Keep the input order
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl TitleOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unsorted => "",
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }

    fn compare(self, left: &Post, right: &Post) -> Ordering {
        match self {
            Self::Unsorted => Ordering::Equal,
            Self::Ascending => left.title.cmp(&right.title),
            Self::Descending => right.title.cmp(&left.title),
        }
    }
}

impl FromStr for TitleOrder {
    type Err = std::convert::Infallible;

    /// `"ascending"` and `"descending"` select a sort; any other value keeps input order.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "ascending" => Self::Ascending,
            "descending" => Self::Descending,
            _ => Self::Unsorted,
        })
    }
}

impl fmt::Display for TitleOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the output view of `posts`.
///
/// Redaction zeroes `user_id` before sorting. The sort is stable, so posts
/// with equal titles keep their relative input order. The input is left untouched.
pub fn view(posts: &[Post], order: TitleOrder, redact_user_id: bool) -> Vec<Post> {
    let mut out: Vec<Post> = if redact_user_id {
        posts.iter().map(Post::without_user_id).collect()
    } else {
        posts.to_vec()
    };

    if order != TitleOrder::Unsorted {
        out.sort_by(|left, right| order.compare(left, right));
    }
    out
}

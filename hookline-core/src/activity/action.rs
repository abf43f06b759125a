use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ActivityError;

/// What an activity record describes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Push,
    PullRequest,
    Merge,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] =
        [ActionKind::Push, ActionKind::PullRequest, ActionKind::Merge];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Push => "PUSH",
            ActionKind::PullRequest => "PULL_REQUEST",
            ActionKind::Merge => "MERGE",
        }
    }

    /// Render the feed sentence for this kind of action.
    ///
    /// Pushes have no source branch, so `from_branch` is ignored for them.
    pub fn render_message(
        self,
        author: &str,
        from_branch: &str,
        to_branch: &str,
        formatted_timestamp: &str,
    ) -> String {
        match self {
            ActionKind::Push => format!(
                r#""{author}" pushed to "{to_branch}" on {formatted_timestamp}"#
            ),
            ActionKind::PullRequest => format!(
                "\"{author}\" submitted a pull request \
                 from \"{from_branch}\" to \"{to_branch}\" \
                 on {formatted_timestamp}"
            ),
            ActionKind::Merge => format!(
                "\"{author}\" merged branch \"{from_branch}\" \
                 to \"{to_branch}\" on {formatted_timestamp}"
            ),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                ActivityError::InvalidRecord(format!(
                    "unknown action kind: {s}"
                ))
            })
    }
}

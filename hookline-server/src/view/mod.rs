//! Server-rendered recent-activity page.

use hookline_core::{ActionKind, StoredActivity};

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Hookline - Recent Activity</title>
  <style>
    body {
      font-family: system-ui, sans-serif;
      margin: 2rem auto;
      max-width: 48rem;
      color: #1f2328;
    }
    h1 { font-size: 1.5rem; }
    .error {
      background: #ffebe9;
      border: 1px solid #ff8182;
      padding: 0.75rem 1rem;
      border-radius: 6px;
    }
    .empty { color: #656d76; }
    ul.activities { list-style: none; padding: 0; }
    ul.activities li { border-bottom: 1px solid #d0d7de; padding: 0.75rem 0; }
    .badge {
      font-size: 0.75rem;
      font-weight: 600;
      padding: 0.1rem 0.4rem;
      border-radius: 4px;
      margin-right: 0.5rem;
    }
    .badge-push { background: #ddf4ff; }
    .badge-pull-request { background: #fff8c5; }
    .badge-merge { background: #fbefff; }
    .repository, time { color: #656d76; font-size: 0.85rem; }
    time { display: block; }
  </style>
</head>
<body>
  <h1>Recent Activity</h1>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// Render the activity page. `error` adds a banner above the list.
pub fn render_activity_page(
    activities: &[StoredActivity],
    error: Option<&str>,
) -> String {
    let mut page = String::from(PAGE_HEAD);

    if let Some(error) = error {
        page.push_str(&format!(
            "  <p class=\"error\" role=\"alert\">{}</p>\n",
            escape_html(error)
        ));
    }

    if activities.is_empty() {
        page.push_str("  <p class=\"empty\">No activity yet.</p>\n");
    } else {
        page.push_str("  <ul class=\"activities\">\n");
        for activity in activities {
            page.push_str(&render_item(activity));
        }
        page.push_str("  </ul>\n");
    }

    page.push_str(PAGE_TAIL);
    page
}

fn render_item(activity: &StoredActivity) -> String {
    let record = &activity.record;
    let repository = record
        .repository
        .as_deref()
        .map(|name| {
            format!(
                " <span class=\"repository\">{}</span>",
                escape_html(name)
            )
        })
        .unwrap_or_default();

    let badge = format!(
        "<span class=\"badge {class}\">{label}</span>",
        class = badge_class(record.action),
        label = record.action,
    );
    let time = format!(
        "<time datetime=\"{datetime}\">{formatted}</time>",
        datetime = record.timestamp.to_rfc3339(),
        formatted = escape_html(&record.formatted_timestamp()),
    );

    format!(
        "    <li data-id=\"{id}\">{badge}{message}{repository} {time}</li>\n",
        id = activity.id,
        message = escape_html(&record.message),
    )
}

fn badge_class(action: ActionKind) -> &'static str {
    match action {
        ActionKind::Push => "badge-push",
        ActionKind::PullRequest => "badge-pull-request",
        ActionKind::Merge => "badge-merge",
    }
}

/// Escape text for use in element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hookline_core::ActivityRecord;
    use uuid::Uuid;

    fn stored(
        author: &str,
        action: ActionKind,
        repository: Option<&str>,
    ) -> StoredActivity {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 21, 10, 30, 0).unwrap();
        StoredActivity {
            id: Uuid::now_v7(),
            record: ActivityRecord {
                request_id: "abc123".into(),
                author: author.into(),
                action,
                from_branch: String::new(),
                to_branch: "main".into(),
                timestamp,
                message: format!(
                    "{author} pushed to main on 21st March 2024 - 10:30 AM UTC"
                ),
                repository: repository.map(str::to_string),
            },
            received_at: timestamp,
        }
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn renders_one_item_per_activity_in_order() {
        let first = stored("alice", ActionKind::Merge, Some("octo/hookline"));
        let second = stored("bob", ActionKind::Push, None);
        let page = render_activity_page(&[first.clone(), second.clone()], None);

        assert_eq!(page.matches("<li ").count(), 2);
        let alice = page.find("alice pushed").unwrap();
        let bob = page.find("bob pushed").unwrap();
        assert!(alice < bob);
        assert!(page.contains("badge-merge\">MERGE</span>"));
        assert!(page.contains("octo/hookline"));
        assert!(page.contains(&first.id.to_string()));
        assert!(page.contains(concat!(
            "<time datetime=\"2024-03-21T10:30:00+00:00\">",
            "21st March 2024 - 10:30 AM UTC</time>"
        )));
        assert!(!page.contains("class=\"error\""));
    }

    #[test]
    fn author_names_are_escaped() {
        let activity =
            stored("<script>alert(1)</script>", ActionKind::Push, None);
        let page = render_activity_page(&[activity], None);

        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn error_banner_with_empty_list() {
        let page = render_activity_page(&[], Some("store <down>"));

        assert!(page.contains("role=\"alert\">store &lt;down&gt;</p>"));
        assert!(page.contains("No activity yet."));
        assert!(page.ends_with("</html>\n"));
    }
}

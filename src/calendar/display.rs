use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use log::info;

use crate::post::{DateKey, Post, PostIndex};

use super::{is_same_month, weekday_labels, ViewMode, WeekStart};

/// Posts listed in a month cell before the overflow line.
const MONTH_CELL_POSTS: usize = 3;
const MONTH_CELL_WIDTH: usize = 20;

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "post"
    } else {
        "posts"
    }
}

pub fn post_badge(count: usize) -> String {
    format!("{} {}", count, plural(count))
}

/// `+N more posts` for a month cell holding more than it can show.
pub fn overflow_label(count: usize) -> Option<String> {
    let hidden = count.checked_sub(MONTH_CELL_POSTS).filter(|&n| n > 0)?;
    Some(format!("+{} more {}", hidden, plural(hidden)))
}

fn image_marker(post: &Post) -> &'static str {
    if post.image.is_some() {
        " [image]"
    } else {
        ""
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
        short.push('~');
        short
    }
}

pub struct CalendarView<'a> {
    pub view: ViewMode,
    pub anchor: NaiveDate,
    pub selected: Option<NaiveDate>,
    pub week_start: WeekStart,
    pub dates: &'a [NaiveDate],
    pub index: &'a PostIndex,
}

impl CalendarView<'_> {
    pub fn lines(&self) -> Vec<String> {
        match self.view {
            ViewMode::Week => self.week_lines(),
            ViewMode::Month => self.month_lines(),
        }
    }

    fn day_label(&self, date: NaiveDate) -> String {
        let day = date.day();
        if self.selected == Some(date) {
            format!("[{day}]")
        } else if !is_same_month(date, self.anchor) {
            format!("({day})")
        } else {
            day.to_string()
        }
    }

    fn week_lines(&self) -> Vec<String> {
        let tz = self.index.timezone();
        let labels = weekday_labels(self.week_start);
        let mut lines = vec![];

        for (label, date) in labels.iter().zip(self.dates) {
            let posts = self.index.posts(&DateKey::from(*date));
            lines.push(format!(
                "+- {} {} {:-<24} {}",
                label,
                self.day_label(*date),
                "",
                post_badge(posts.len())
            ));
            for post in posts {
                lines.extend(post_card(post, tz));
            }
        }
        lines
    }

    fn month_lines(&self) -> Vec<String> {
        let tz = self.index.timezone();
        let width = MONTH_CELL_WIDTH;
        let separator = format!("+{}", format!("{:-<width$}+", "").repeat(7));
        let mut lines = vec![self.anchor.format("%B %Y").to_string(), separator.clone()];

        let header: String = weekday_labels(self.week_start)
            .iter()
            .map(|label| format!(" {:width$}|", label, width = width - 1))
            .collect();
        lines.push(format!("|{header}"));
        lines.push(separator.clone());

        for week in self.dates.chunks(7) {
            let cells: Vec<&[Post]> = week
                .iter()
                .map(|date| self.index.posts(&DateKey::from(*date)))
                .collect();

            let row: String = week
                .iter()
                .zip(&cells)
                .map(|(date, posts)| {
                    let badge = if posts.is_empty() {
                        String::new()
                    } else {
                        posts.len().to_string()
                    };
                    let day = self.day_label(*date);
                    format!(" {day:<5}{badge:>w$} |", w = width - 7)
                })
                .collect();
            lines.push(format!("|{row}"));

            for slot in 0..=MONTH_CELL_POSTS {
                if cells.iter().all(|posts| posts.len() <= slot) {
                    break;
                }
                // A listed post takes a title row and a time row.
                let rows: Vec<Vec<String>> = if slot < MONTH_CELL_POSTS {
                    let entry = |text: fn(&Post, &Tz) -> String| -> Vec<String> {
                        cells
                            .iter()
                            .map(|posts| posts.get(slot).map(|post| text(post, tz)).unwrap_or_default())
                            .collect()
                    };
                    vec![
                        entry(|post, _| format!("{}{}", post.title, image_marker(post))),
                        entry(|post, tz| format!("  {}", post.display_time(tz))),
                    ]
                } else {
                    vec![cells
                        .iter()
                        .map(|posts| overflow_label(posts.len()).unwrap_or_default())
                        .collect()]
                };

                for texts in rows {
                    let row: String = texts
                        .iter()
                        .map(|text| format!(" {:w$}|", truncate(text, width - 2), w = width - 1))
                        .collect();
                    lines.push(format!("|{row}"));
                }
            }
            lines.push(separator.clone());
        }
        lines
    }
}

pub fn post_card(post: &Post, tz: &Tz) -> Vec<String> {
    let image = image_marker(post);
    let tags: Vec<String> = post.tags.iter().map(|tag| format!("#{tag}")).collect();
    vec![
        format!("|  {:>8}  {}{}", post.display_time(tz), post.title, image),
        format!("|            {}", truncate(&post.content, 60)),
        format!("|            {}", tags.join(" ")),
    ]
}

pub fn post_detail(post: &Post, tz: &Tz) -> Vec<String> {
    let scheduled = post.scheduled_time.with_timezone(tz);
    vec![
        format!("+- {} ({})", post.title, post.id),
        format!("| Scheduled: {}", scheduled.format("%A, %B %-d, %Y %-I:%M %p %Z")),
        format!("| Image:     {}", post.image.as_deref().unwrap_or("none")),
        format!("| Tags:      {}", post.tags.join(", ")),
        "|".to_string(),
        format!("| {}", post.content),
        "+------------ - -".to_string(),
    ]
}

/// Post count and how many of the visible days have posts.
fn summary(index: &PostIndex) -> String {
    let busy = index.iter().filter(|(_, posts)| !posts.is_empty()).count();
    format!("{} on {} of {} days", post_badge(index.total_posts()), busy, index.day_count())
}

pub fn display_calendar(calendar: &CalendarView) {
    if log::log_enabled!(log::Level::Info) {
        for line in calendar.lines() {
            info!("{}", line);
        }
        info!("{}", summary(calendar.index));
        info!("");
    }
}

pub fn display_post(post: &Post, tz: &Tz) {
    for line in post_detail(post, tz) {
        info!("{}", line);
    }
    info!("");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::generate_range;
    use crate::post::PostSource;
    use chrono::DateTime;
    use chrono_tz::UTC;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn post(id: &str, title: &str, scheduled: &str) -> Post {
        Post {
            id: id.to_string(),
            title: title.to_string(),
            content: "Hello".to_string(),
            image: Some("https://example.com/a.png".to_string()),
            scheduled_time: DateTime::parse_from_rfc3339(scheduled).unwrap().to_utc(),
            tags: vec!["tips".to_string(), "team".to_string()],
        }
    }

    struct Busy;

    impl PostSource for Busy {
        fn posts_for(&self, day: NaiveDate, _tz: &Tz) -> Vec<Post> {
            if day != date(2024, 3, 15) {
                return vec![];
            }
            (1..=5)
                .map(|n| post(&format!("p{n}"), &format!("Title {n}"), &format!("2024-03-15T0{n}:00:00Z")))
                .collect()
        }
    }

    #[test]
    fn badge_pluralizes() {
        assert_eq!(post_badge(0), "0 posts");
        assert_eq!(post_badge(1), "1 post");
        assert_eq!(post_badge(4), "4 posts");
    }

    #[test]
    fn overflow_only_past_three() {
        assert_eq!(overflow_label(0), None);
        assert_eq!(overflow_label(3), None);
        assert_eq!(overflow_label(4).as_deref(), Some("+1 more post"));
        assert_eq!(overflow_label(7).as_deref(), Some("+4 more posts"));
    }

    #[test]
    fn month_view_caps_cell_posts() {
        let anchor = date(2024, 3, 15);
        let dates = generate_range(ViewMode::Month, anchor, WeekStart::Sunday).unwrap();
        let index = PostIndex::build(&dates, &Busy, UTC);
        let lines = CalendarView {
            view: ViewMode::Month,
            anchor,
            selected: Some(anchor),
            week_start: WeekStart::Sunday,
            dates: &dates,
            index: &index,
        }
        .lines();

        let text = lines.join("\n");
        assert!(text.starts_with("March 2024"));
        assert!(text.contains("Title 3"));
        assert!(!text.contains("Title 4"));
        assert!(text.contains("+2 more posts"));
        assert!(text.contains("[15]"));
        assert!(text.contains("(25)"));
    }

    #[test]
    fn month_cells_show_time_and_image() {
        let anchor = date(2024, 3, 15);
        let dates = generate_range(ViewMode::Month, anchor, WeekStart::Sunday).unwrap();
        let index = PostIndex::build(&dates, &Busy, UTC);
        let view = CalendarView {
            view: ViewMode::Month,
            anchor,
            selected: None,
            week_start: WeekStart::Sunday,
            dates: &dates,
            index: &index,
        };

        let text = view.lines().join("\n");
        assert!(text.contains("Title 1 [image]"));
        assert!(text.contains("1:00 AM"));
        assert!(text.contains("3:00 AM"));
        assert!(!text.contains("4:00 AM"));

        let mut plain = post("q", "Quiet", "2024-03-15T09:15:00Z");
        plain.image = None;
        let index = ["p1", "p2", "p3"]
            .into_iter()
            .fold(PostIndex::build(&dates, &Busy, UTC), PostIndex::apply_delete)
            .apply_update(plain);
        let text = CalendarView { index: &index, ..view }.lines().join("\n");
        assert!(text.contains("9:15 AM"));
        assert!(!text.contains("Quiet [image]"));
    }

    #[test]
    fn summary_counts_busy_days() {
        let dates = generate_range(ViewMode::Week, date(2024, 3, 15), WeekStart::Sunday).unwrap();
        let index = PostIndex::build(&dates, &Busy, UTC);
        assert_eq!(summary(&index), "5 posts on 1 of 7 days");
    }

    #[test]
    fn week_view_lists_every_post() {
        let anchor = date(2024, 3, 15);
        let dates = generate_range(ViewMode::Week, anchor, WeekStart::Sunday).unwrap();
        let index = PostIndex::build(&dates, &Busy, UTC);
        let lines = CalendarView {
            view: ViewMode::Week,
            anchor,
            selected: None,
            week_start: WeekStart::Sunday,
            dates: &dates,
            index: &index,
        }
        .lines();

        let text = lines.join("\n");
        assert!(text.contains("Title 5"));
        assert!(text.contains("5 posts"));
        assert!(text.contains("0 posts"));
        assert!(text.contains("5:00 AM"));
        assert!(text.contains("#tips #team"));
    }

    #[test]
    fn detail_shows_all_fields() {
        let lines = post_detail(&post("x", "Launch", "2024-03-15T14:30:00Z"), &UTC).join("\n");
        assert!(lines.contains("Launch (x)"));
        assert!(lines.contains("Friday, March 15, 2024 2:30 PM UTC"));
        assert!(lines.contains("https://example.com/a.png"));
        assert!(lines.contains("tips, team"));
    }
}

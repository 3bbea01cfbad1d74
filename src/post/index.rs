use std::collections::BTreeMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use log::{debug, trace};

use super::{DateKey, Post, PostSource};

/// Posts of the visible date range, bucketed by calendar day.
///
/// Keys are exactly the dates the index was built from. Each list keeps the
/// order the source produced it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostIndex {
    tz: Tz,
    days: BTreeMap<DateKey, Vec<Post>>,
}

impl PostIndex {
    pub fn build(dates: &[NaiveDate], source: &impl PostSource, tz: Tz) -> Self {
        let mut days = BTreeMap::new();
        for &date in dates {
            let posts = source.posts_for(date, &tz);
            trace!("{}: {} posts", DateKey::from(date), posts.len());
            days.insert(DateKey::from(date), posts);
        }
        debug!("Indexed {} days", days.len());

        Self { tz, days }
    }

    /// Reschedule or edit `post`, moving it to the day of its scheduled time.
    ///
    /// A post that stays on the same day keeps its position. A post moved to
    /// another visible day is appended there. A post moved outside the
    /// visible range is dropped from the index.
    pub fn apply_update(mut self, post: Post) -> Self {
        let target = post.date_key(&self.tz);

        let mut position = None;
        for (key, posts) in self.days.iter_mut() {
            if let Some(found) = posts.iter().position(|p| p.id == post.id) {
                posts.remove(found);
                if *key == target {
                    position = Some(found);
                }
            }
        }

        match self.days.get_mut(&target) {
            Some(posts) => match position {
                Some(position) => posts.insert(position, post),
                None => posts.push(post),
            },
            None => debug!("{} moved outside the visible range ({})", post.id, target),
        }

        self
    }

    pub fn apply_delete(mut self, post_id: &str) -> Self {
        for posts in self.days.values_mut() {
            posts.retain(|post| post.id != post_id);
        }
        self
    }

    pub fn posts(&self, key: &DateKey) -> &[Post] {
        self.days.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn find(&self, post_id: &str) -> Option<&Post> {
        self.days.values().flatten().find(|post| post.id == post_id)
    }

    #[cfg(test)]
    pub fn contains_key(&self, key: &DateKey) -> bool {
        self.days.contains_key(key)
    }

    #[cfg(test)]
    pub fn keys(&self) -> impl Iterator<Item = &DateKey> {
        self.days.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &[Post])> {
        self.days.iter().map(|(key, posts)| (key, posts.as_slice()))
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn total_posts(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub const fn timezone(&self) -> &Tz {
        &self.tz
    }
}

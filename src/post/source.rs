use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use super::{DateKey, Post};

/// Where the posts of a calendar day come from.
pub trait PostSource {
    fn posts_for(&self, date: NaiveDate, tz: &Tz) -> Vec<Post>;
}

const TITLES: &[&str] = &[
    "Product Launch",
    "Behind the Scenes",
    "Customer Spotlight",
    "Weekly Tips",
    "Team Update",
    "Flash Sale",
    "Throwback",
    "Q&A Session",
];

const CONTENTS: &[&str] = &[
    "Something new is coming. Stay tuned for the big reveal!",
    "A quick look at how our team gets things done every day.",
    "Meet one of the people who make this community great.",
    "Three small habits that will make your week easier.",
    "Here is what we have been working on lately.",
    "Only today: everything in the shop is 20% off.",
];

const TAGS: &[&str] = &[
    "marketing",
    "product",
    "community",
    "tips",
    "sale",
    "team",
    "announcement",
];

/// Synthesized posts, stable for a given seed and date.
#[derive(Debug, Clone, Copy, Default)]
pub struct DummySource {
    seed: u64,
}

impl DummySource {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn rng(&self, date: NaiveDate) -> StdRng {
        let day = u64::from(date.num_days_from_ce().unsigned_abs());
        StdRng::seed_from_u64(self.seed ^ day.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

impl PostSource for DummySource {
    fn posts_for(&self, date: NaiveDate, tz: &Tz) -> Vec<Post> {
        let mut rng = self.rng(date);
        let count = rng.gen_range(0..=4);

        // quarter-hour slots between 08:00 and 21:45
        let mut slots: Vec<u32> = (0..count).map(|_| rng.gen_range(32..88)).collect();
        slots.sort_unstable();
        slots.dedup();

        let key = DateKey::from(date);
        slots
            .into_iter()
            .filter_map(|slot| {
                let time = NaiveTime::from_hms_opt(slot / 4, (slot % 4) * 15, 0)?;
                let scheduled = tz.from_local_datetime(&date.and_time(time)).earliest()?;
                Some(scheduled.to_utc())
            })
            .enumerate()
            .map(|(n, scheduled_time)| {
                let id = format!("{}-{}", key, n + 1);
                let image = rng
                    .gen_bool(0.5)
                    .then(|| format!("https://picsum.photos/seed/{}/800/450", id));
                let tag_count = rng.gen_range(1..=3);
                let tags = TAGS
                    .choose_multiple(&mut rng, tag_count)
                    .map(|tag| tag.to_string())
                    .collect();

                Post {
                    title: TITLES.choose(&mut rng).copied().unwrap_or_default().to_string(),
                    content: CONTENTS.choose(&mut rng).copied().unwrap_or_default().to_string(),
                    image,
                    scheduled_time,
                    tags,
                    id,
                }
            })
            .collect()
    }
}

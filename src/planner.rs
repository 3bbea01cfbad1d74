use chrono::NaiveDate;
use log::{info, warn};

use crate::{
    calendar::{generate_range, shift_anchor, ViewMode},
    config::{CalendarArgs, Reschedule},
    context::AppContext,
    error::ConfigError,
    post::{DateKey, PostIndex, PostSource},
};

/// The visible calendar: its range and the posts on it.
#[derive(Debug, Clone)]
pub struct Plan {
    pub view: ViewMode,
    pub anchor: NaiveDate,
    pub dates: Vec<NaiveDate>,
    pub index: PostIndex,
}

impl Plan {
    pub fn load(
        ctx: &AppContext,
        view: ViewMode,
        anchor: NaiveDate,
        source: &impl PostSource,
    ) -> Result<Self, ConfigError> {
        let dates = generate_range(view, anchor, ctx.week_start).ok_or(ConfigError::DateOutOfRange)?;
        let index = PostIndex::build(&dates, source, ctx.timezone);
        Ok(Self {
            view,
            anchor,
            dates,
            index,
        })
    }

    /// Reschedule a post of the visible range. Posts that are not shown are
    /// left alone.
    pub fn reschedule(mut self, Reschedule { id, time }: &Reschedule) -> Self {
        let Some(post) = self.index.find(id).cloned() else {
            warn!("Post {} is not in the visible range", id);
            return self;
        };

        let key = DateKey::from_timestamp(time, self.index.timezone());
        info!("Rescheduling {} to {}", id, key);
        self.index = self.index.apply_update(post.reschedule(*time));
        self
    }

    pub fn delete(mut self, post_id: &str) -> Self {
        info!("Deleting {}", post_id);
        self.index = self.index.apply_delete(post_id);
        self
    }
}

/// Build the calendar asked for on the command line and apply its edits.
pub fn plan(ctx: &AppContext, args: &CalendarArgs, source: &impl PostSource) -> Result<Plan, ConfigError> {
    let anchor = args.date.unwrap_or_else(|| ctx.today());
    let anchor = shift_anchor(args.view, anchor, args.shift).ok_or(ConfigError::DateOutOfRange)?;

    info!("Loading {} of {}", args.view, anchor);
    let mut plan = Plan::load(ctx, args.view, anchor, source)?;
    info!("{} posts planned", plan.index.total_posts());

    for reschedule in &args.reschedule {
        plan = plan.reschedule(reschedule);
    }
    for id in &args.delete {
        plan = plan.delete(id);
    }

    Ok(plan)
}

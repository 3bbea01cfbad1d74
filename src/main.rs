mod api;
mod calendar;
mod config;
mod context;
mod error;
mod planner;
mod post;
mod redirect;

use std::error::Error;

use calendar::display::{display_calendar, display_post, CalendarView};
use config::{CalendarArgs, Command, Config};
use context::AppContext;
use log::{debug, info, warn};
use post::DummySource;
use redirect::handle_redirect;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::parse();
    config.init_logger();
    info!("# Post Planner #");
    info!("");

    let ctx = AppContext::new(&config)?;

    match config.command() {
        Command::Calendar(args) => show_calendar(&ctx, args)?,
        Command::Connect { redirect } => {
            let outcome = handle_redirect(&ctx, redirect).await;
            outcome.notification.show();
            if let Ok(response) = &outcome.result {
                debug!("Exchange response: {}", response.0);
            }
            info!("Redirecting to {}", outcome.route);
            if !outcome.connected() {
                warn!("Instagram is not connected");
            }
        }
    }

    Ok(())
}

fn show_calendar(ctx: &AppContext, args: &CalendarArgs) -> Result<(), Box<dyn Error>> {
    let plan = planner::plan(ctx, args, &DummySource::new(args.seed))?;
    info!("");

    display_calendar(&CalendarView {
        view: plan.view,
        anchor: plan.anchor,
        selected: args.select,
        week_start: ctx.week_start,
        dates: &plan.dates,
        index: &plan.index,
    });

    if let Some(id) = &args.show {
        match plan.index.find(id) {
            Some(post) => display_post(post, &ctx.timezone),
            None => warn!("Post {} is not in the visible range", id),
        }
    }

    info!("All done!");
    Ok(())
}

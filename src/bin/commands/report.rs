use super::utils::parse_date_or_today;
use watchlog::report::weekly_window;
use watchlog::{AppContext, ReportGenerator};

pub fn handle_daily(ctx: &AppContext, date: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let date = parse_date_or_today(date)?;
    let total = ReportGenerator::new(&ctx.store).daily_total(date)?;
    println!("Total watch time on {date}: {total}");
    Ok(())
}

pub fn handle_weekly(
    ctx: &AppContext,
    date: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (start, end) = weekly_window(parse_date_or_today(date)?);
    let total = ReportGenerator::new(&ctx.store).weekly_total(end)?;
    println!("Total watch time from {start} to {end}: {total}");
    Ok(())
}

pub fn handle_genre(ctx: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
    let top = ReportGenerator::new(&ctx.store).top_genre()?;
    println!("Most watched genre: {top}");
    Ok(())
}

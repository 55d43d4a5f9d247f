use super::{read_json, records_from_json};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use colored::Colorize;
use opsdesk_forms::{aggregate_field, entry_duration_hours, Aggregation, RetainerUsage};
use std::path::Path;

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid date `{}`, expected YYYY-MM-DD", value))
}

pub fn duration(start: &str, end: &str) -> Result<()> {
    let hours = entry_duration_hours(start, end)?;
    println!("{:.2}", hours);
    Ok(())
}

pub fn burn(allotted: f64, used: f64, start: &str, end: &str, as_of: Option<&str>) -> Result<()> {
    let usage = RetainerUsage {
        allotted_hours: allotted,
        used_hours: used,
        period_start: parse_date(start)?,
        period_end: parse_date(end)?,
    };
    let as_of = match as_of {
        Some(date) => parse_date(date)?,
        None => Local::now().date_naive(),
    };

    let projection = usage.project(as_of)?;

    println!("Day {} of {}", projection.elapsed_days, projection.period_days);
    println!("Daily burn:      {:.2} h", projection.daily_burn);
    println!("Projected total: {:.2} h", projection.projected_hours);
    println!("Remaining:       {:.2} h", projection.remaining_hours);

    let utilization = format!("{:.1}%", projection.projected_utilization);
    if projection.over_budget {
        println!("Utilization:     {} {}", utilization.red().bold(), "(over budget)".red());
    } else {
        println!("Utilization:     {}", utilization.green());
    }

    Ok(())
}

pub fn aggregate(field: &str, aggregation: Aggregation, input: Option<&Path>) -> Result<()> {
    let records = records_from_json(read_json(input)?)?;

    match aggregate_field(&records, field, aggregation) {
        Some(value) => println!("{}", value),
        None => println!("{}", "no numeric values".dimmed()),
    }

    Ok(())
}

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use driptime::timer::DEFAULT_SAMPLE_INTERVAL;
use driptime::{
    Instant, SystemClock, Timer, TimerOptions, Zone, add_days, add_hours, add_minutes,
    add_seconds, datetime_format_in, parse_datetime,
};

#[derive(Parser)]
#[command(name = "driptime", version, about = "Date helpers and a polling countdown timer")]
struct Cli {
    /// IANA time zone to render in (defaults to the host zone)
    #[arg(long = "tz", global = true)]
    tz: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print an instant as YYYY-MM-DDTHH:mm, optionally shifted
    Format {
        /// Starting point as YYYY-MM-DDTHH:mm in the zone (defaults to now)
        #[arg(long)]
        at: Option<String>,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        days: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        hours: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        minutes: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        seconds: f64,
    },
    /// Print the resolved time zone identifier
    Tz,
    /// Block until a timer of the given duration is done
    Wait {
        /// Timer duration in milliseconds
        #[arg(allow_negative_numbers = true)]
        duration_ms: i64,
        /// Sampler interval in milliseconds
        #[arg(long, default_value_t = DEFAULT_SAMPLE_INTERVAL.as_millis() as u64)]
        sample_ms: u64,
        /// How often to poll the timer in milliseconds
        #[arg(long, default_value_t = 50)]
        poll_ms: u64,
    },
}

fn resolve_zone(tz: Option<&str>) -> driptime::Result<Zone> {
    match tz {
        Some(name) => Zone::from_name(name),
        None => Ok(Zone::Local),
    }
}

fn run_format(
    zone: &Zone,
    at: Option<&str>,
    (days, hours, minutes, seconds): (f64, f64, f64, f64),
) -> driptime::Result<()> {
    let mut t = match at {
        Some(value) => parse_datetime(value, zone)?,
        None => Instant::now(),
    };
    t = add_days(t, days);
    t = add_hours(t, hours);
    t = add_minutes(t, minutes);
    t = add_seconds(t, seconds);
    println!("{}", datetime_format_in(t, zone));
    Ok(())
}

fn run_wait(zone: &Zone, duration_ms: i64, sample_ms: u64, poll_ms: u64) -> driptime::Result<()> {
    let options = TimerOptions {
        sample_interval: Duration::from_millis(sample_ms.max(1)),
    };
    let mut timer = Timer::with_options(duration_ms, SystemClock, options);
    log::info!(
        "waiting {duration_ms} ms from {}",
        datetime_format_in(timer.start(), zone)
    );
    timer.init()?;
    while !timer.done() {
        thread::sleep(Duration::from_millis(poll_ms));
    }
    timer.close();
    println!("{}", datetime_format_in(timer.time(), zone));
    Ok(())
}

fn run(cli: Cli) -> driptime::Result<()> {
    let zone = resolve_zone(cli.tz.as_deref())?;
    match cli.command {
        None => run_format(&zone, None, (0.0, 0.0, 0.0, 0.0)),
        Some(Command::Format {
            at,
            days,
            hours,
            minutes,
            seconds,
        }) => run_format(&zone, at.as_deref(), (days, hours, minutes, seconds)),
        Some(Command::Tz) => {
            println!("{}", zone.name());
            Ok(())
        }
        Some(Command::Wait {
            duration_ms,
            sample_ms,
            poll_ms,
        }) => run_wait(&zone, duration_ms, sample_ms, poll_ms),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_accepts_negative_duration() {
        let cli = Cli::try_parse_from(["driptime", "wait", "-5"]).unwrap();
        match cli.command {
            Some(Command::Wait { duration_ms, .. }) => assert_eq!(duration_ms, -5),
            _ => panic!("expected the wait command"),
        }
    }

    #[test]
    fn format_accepts_negative_offsets() {
        let args = ["driptime", "--tz", "UTC", "format", "--days", "-2"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.tz.as_deref(), Some("UTC"));
        match cli.command {
            Some(Command::Format { days, .. }) => assert_eq!(days, -2.0),
            _ => panic!("expected the format command"),
        }
    }
}

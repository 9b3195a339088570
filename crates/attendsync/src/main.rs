use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use attendsync::{Config, FakeAttendeeWebApi, ReconcilingStore};
use attendsync_core::attendee::Attendee;
use attendsync_core::storage::StoreError;

const ROSTER: &[(&str, &str)] = &[
    ("Ada", "Lovelace"),
    ("Grace", "Hopper"),
    ("Alan", "Turing"),
    ("Barbara", "Liskov"),
    ("Edsger", "Dijkstra"),
];

/// attendsync - Register attendees optimistically against the attendee web API
#[derive(Parser, Debug)]
#[command(name = "attendsync")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Number of attendees to register
    #[arg(long, short = 'n', default_value = "3", env = "ATTENDSYNC_ATTENDEES")]
    attendees: usize,

    /// Zero-based index of a registration the web API should reject (repeatable)
    #[arg(long = "fail", value_name = "INDEX")]
    fail: Vec<usize>,

    /// Print listings as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Listing<'a> {
    stage: &'a str,
    attendees: &'a [Attendee],
}

// Cooperative scheduling on one thread, the way the web API's callers run.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "attendsync=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    let api = Arc::new(FakeAttendeeWebApi::from_config(&config));
    let store = ReconcilingStore::with_event_capacity(Arc::clone(&api), config.event_capacity);

    tracing::info!(
        attendees = cli.attendees,
        failures = cli.fail.len(),
        post_delay_ms = config.post_delay_ms,
        get_all_delay_ms = config.get_all_delay_ms,
        "Starting registration run"
    );

    spawn_event_logger(&store);

    let attendees = roster(cli.attendees);
    for index in &cli.fail {
        if let Some(attendee) = attendees.get(*index) {
            api.fail_post_for(
                attendee.full_name(),
                StoreError::WriteFailed(format!("registration {index} rejected")),
            )
            .await;
        } else {
            tracing::warn!(index, "Ignoring --fail index outside the roster");
        }
    }

    let writes: Vec<_> = attendees.iter().map(|a| store.post(a)).collect();
    print_listing("submitted", &store.get_all().await?, cli.json)?;

    let mut confirmed = 0;
    for write in writes {
        match write.await {
            Ok(_) => confirmed += 1,
            Err(err) => tracing::warn!(error = %err, "Registration failed"),
        }
    }
    print_listing("settled", &store.get_all().await?, cli.json)?;

    tracing::info!(
        confirmed,
        failed = attendees.len() - confirmed,
        "Registration run finished"
    );
    Ok(())
}

/// Builds `count` attendees, cycling through the roster with a numeric suffix.
fn roster(count: usize) -> Vec<Attendee> {
    (0..count)
        .map(|i| {
            let (first, last) = ROSTER[i % ROSTER.len()];
            match i / ROSTER.len() {
                0 => Attendee::new(first, last),
                round => Attendee::new(first, format!("{last} {}", round + 1)),
            }
        })
        .collect()
}

/// Logs reconciliation events until the store goes away.
fn spawn_event_logger(store: &ReconcilingStore<FakeAttendeeWebApi>) {
    let mut events = store.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => tracing::debug!(
                    event = event.event_type(),
                    slot = %event.handle(),
                    "Reconcile event"
                ),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event logger fell behind")
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}

fn print_listing(stage: &str, attendees: &[Attendee], json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&Listing { stage, attendees })?
        );
        return Ok(());
    }

    println!("{stage} ({}):", attendees.len());
    for attendee in attendees {
        match attendee.attendee_id {
            Some(id) => println!("  #{id:<4} {}", attendee.full_name()),
            None => println!("  pending {}", attendee.full_name()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_cycles_with_suffix() {
        let attendees = roster(ROSTER.len() + 1);

        assert_eq!(attendees.len(), ROSTER.len() + 1);
        assert_eq!(attendees[0].full_name(), "Ada Lovelace");
        assert_eq!(attendees[ROSTER.len()].full_name(), "Ada Lovelace 2");
        assert!(attendees.iter().all(|a| a.attendee_id.is_none()));
    }

    #[test]
    fn test_cli_parses_repeated_failures() {
        let cli = Cli::parse_from(["attendsync", "-n", "4", "--fail", "1", "--fail", "3"]);

        assert_eq!(cli.attendees, 4);
        assert_eq!(cli.fail, vec![1, 3]);
        assert!(!cli.json);
    }
}

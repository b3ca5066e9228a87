//! The viewer event loop.
//!
//! Two periodic activities share one current-thread runtime: the phase
//! scheduler tick (every second) and the backend poll (every few seconds).
//! Polls and command posts are spawned fire-and-forget onto the local task
//! set with completions delivered over a channel, so the tick never awaits
//! IO and a hung request degrades to "state stops updating" rather than a
//! frozen loop. Dropping the loop tears both timers and any in-flight
//! tasks down with it.
//!
//! Stdin stands in for the map UI: each line is a command submission,
//! except `select <id>` / `deselect`, which drive the live-countdown
//! selection the way marker hover does on the real map, and
//! `travels <id>`, which fetches an entity's recent movement.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use shardmap_core::coords::WorldGrid;
use shardmap_core::entity::EntitySnapshot;
use shardmap_core::scheduler::PhaseScheduler;
use shardmap_core::settlement::{tribe_color, SettlementSnapshot};

use crate::client::MapClient;
use crate::config::ViewerConfig;
use crate::console::CommandConsole;
use crate::error::{Result, ViewerError};
use crate::view::LogView;

/// Completion of a background request.
enum Event {
    Settlements(SettlementSnapshot),
    Entities(EntitySnapshot),
    PollFailed(ViewerError),
    CommandSent(String),
    CommandFailed(ViewerError),
}

/// Run the viewer loop until ctrl-c or stdin closes with no work left.
///
/// Must be called from within a [`tokio::task::LocalSet`].
pub async fn run(config: ViewerConfig) -> Result<()> {
    let grid = WorldGrid::new(config.shards_x, config.shards_y)?;
    let mut view = LogView::new(grid);
    let mut scheduler = PhaseScheduler::new(config.phases);
    let mut console = CommandConsole::new(config.suggestions.clone());
    let client = MapClient::new(config.base_url.clone());

    // Session-wide command availability probe; a failed probe means the
    // console stays dark until restart, same as an explicit 405.
    match client.commands_enabled().await {
        Ok(enabled) => console.set_enabled(enabled),
        Err(err) => {
            tracing::warn!(%err, "command probe failed, console disabled");
            console.set_enabled(false);
        }
    }
    tracing::info!(enabled = console.is_enabled(), "command console");

    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut tick = tokio::time::interval(Duration::from_secs(config.tick_interval_secs.max(1)));
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut poll = tokio::time::interval(Duration::from_secs(config.poll_interval_secs.max(1)));
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut stdin = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = tick.tick() => {
                scheduler.tick(unix_now(), &mut view);
            }

            _ = poll.tick() => {
                spawn_poll(&client, &tx);
            }

            Some(event) = rx.recv() => {
                handle_event(event, &mut scheduler, &mut console, &mut view);
            }

            line = stdin.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) => {
                        handle_line(line.trim(), &mut scheduler, &mut console, &mut view, &client, &tx);
                    }
                    Ok(None) | Err(_) => stdin_open = false,
                }
            }

            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}

/// Seconds since the UNIX epoch; a pre-epoch clock reads as zero.
fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// Kick off one backend poll without blocking the loop.
fn spawn_poll(client: &MapClient, tx: &mpsc::UnboundedSender<Event>) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::task::spawn_local(async move {
        match client.settlements().await {
            Ok(snapshot) => {
                let _ = tx.send(Event::Settlements(snapshot));
            }
            Err(err) => {
                let _ = tx.send(Event::PollFailed(err));
            }
        }
        match client.entities().await {
            Ok(snapshot) => {
                let _ = tx.send(Event::Entities(snapshot));
            }
            Err(err) => {
                let _ = tx.send(Event::PollFailed(err));
            }
        }
    });
}

fn handle_event(
    event: Event,
    scheduler: &mut PhaseScheduler,
    console: &mut CommandConsole,
    view: &mut LogView,
) {
    match event {
        Event::Settlements(snapshot) => {
            for tribe in &snapshot.tribes {
                tracing::trace!(
                    id = tribe.id,
                    name = %tribe.name,
                    color = tribe_color(Some(tribe.id)),
                    "legend entry"
                );
            }
            scheduler.apply_snapshot(snapshot.settlements, unix_now(), view);
        }
        Event::Entities(snapshot) => {
            view.render_entities(&snapshot);
        }
        Event::PollFailed(err) => {
            // One transient notification; the next scheduled poll retries.
            tracing::warn!(%err, "failed to get latest data from server");
        }
        Event::CommandSent(command) => {
            console.push_history(command);
            tracing::info!("command accepted");
        }
        Event::CommandFailed(ViewerError::CommandsDisabled) => {
            console.set_enabled(false);
            tracing::warn!("backend disabled commands for this session");
        }
        Event::CommandFailed(err) => {
            tracing::warn!(%err, "failed to execute command");
        }
    }
}

/// Interpret one stdin line: selection control or a command submission.
fn handle_line(
    line: &str,
    scheduler: &mut PhaseScheduler,
    console: &mut CommandConsole,
    view: &mut LogView,
    client: &MapClient,
    tx: &mpsc::UnboundedSender<Event>,
) {
    if line.is_empty() {
        return;
    }

    if let Some(id) = line.strip_prefix("select ") {
        match id.trim().parse() {
            Ok(id) => scheduler.select(id),
            Err(_) => tracing::warn!(id, "not a settlement id"),
        }
        return;
    }
    if line == "deselect" {
        scheduler.clear_selection();
        return;
    }
    if let Some(id) = line.strip_prefix("travels ") {
        match id.trim().parse() {
            Ok(id) => {
                let client = client.clone();
                tokio::task::spawn_local(async move {
                    match client.travel_path(id).await {
                        Ok(path) => tracing::info!(id, points = path.len(), "travel path"),
                        Err(err) => tracing::warn!(%err, "failed to fetch travel path"),
                    }
                });
            }
            Err(_) => tracing::warn!(id, "not an entity id"),
        }
        return;
    }

    if !console.is_enabled() {
        tracing::warn!("command console is disabled, ignoring input");
        return;
    }

    // Show what the suggestion pane would have offered for this input,
    // then submit it off-loop.
    console.edit(line, view);
    let command = line.to_string();
    let client = client.clone();
    let tx = tx.clone();
    tokio::task::spawn_local(async move {
        let result = client.send_command(&command).await;
        let _ = tx.send(match result {
            Ok(()) => Event::CommandSent(command),
            Err(err) => Event::CommandFailed(err),
        });
    });
}

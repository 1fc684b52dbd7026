use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    sync::Arc,
    time::Duration,
};

use orb_maze_core::{
    CellCoord, Command, Direction, Event, Intent, LevelNumber, Outcome, PlayerSnapshot, TimerState,
};
use orb_maze_level::{DirectorySource, LevelCache};
use orb_maze_world::{self as world, query, World};

const LEVEL: LevelNumber = LevelNumber::new(3);

#[test]
fn deterministic_replay_produces_expected_snapshot() {
    let first = replay(scripted_commands());
    let second = replay(scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());

    assert_eq!(first.outcome, Outcome::Completed);
    assert_eq!(first.player.position, CellCoord::new(5, 5));
    assert_eq!(first.remaining_hits, 0);
    assert_eq!(
        first
            .events
            .iter()
            .filter(|record| matches!(record, EventRecord::CratesBroken { .. }))
            .count(),
        2
    );
    assert_eq!(
        first.events.last(),
        Some(&EventRecord::LevelCompleted { level: LEVEL })
    );
}

#[test]
fn replay_diverges_when_timestamps_change() {
    let baseline = replay(scripted_commands());
    let delayed = replay(
        scripted_commands()
            .into_iter()
            .map(|command| match command {
                Command::Step { intent, now } => Command::Step {
                    intent,
                    now: now * 3,
                },
                other => other,
            })
            .collect(),
    );

    assert_ne!(baseline.fingerprint(), delayed.fingerprint());
}

fn replay(commands: Vec<Command>) -> ReplayOutcome {
    let mut cache = LevelCache::new(DirectorySource::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../levels"
    )));
    let data = cache.load(LEVEL).expect("bundled level loads");
    let mut world = World::new(LEVEL, Arc::clone(&data));
    let mut log = Vec::new();

    for command in commands {
        let mut events = Vec::new();
        world::apply(&mut world, command, &mut events);
        log.extend(events.iter().map(EventRecord::from));
    }

    ReplayOutcome {
        outcome: query::outcome(&world),
        player: query::player(&world),
        remaining_hits: query::remaining_hits(&world),
        timer: query::timer(&world),
        events: log,
    }
}

/// Route through the crate maze at the default cooldown, one input per frame.
fn scripted_commands() -> Vec<Command> {
    let route = [
        Intent::Move(Direction::Right),
        Intent::Move(Direction::Right),
        Intent::Move(Direction::Right),
        Intent::Use,
        Intent::Move(Direction::Down),
        Intent::Move(Direction::Down),
        Intent::Move(Direction::Left),
        Intent::Move(Direction::Left),
        Intent::Move(Direction::Left),
        Intent::Move(Direction::Down),
        Intent::Move(Direction::Down),
        Intent::Move(Direction::Right),
        Intent::Move(Direction::Right),
        Intent::Use,
        Intent::Move(Direction::Right),
        Intent::Move(Direction::Right),
    ];

    let mut commands = vec![Command::ConfigureMoveCooldown { ticks: 5 }];
    let mut frame = 0u32;
    for intent in route {
        commands.push(Command::Step {
            intent,
            now: Duration::from_millis(u64::from(frame) * 50),
        });
        frame += 1;
        for _ in 0..5 {
            commands.push(Command::Step {
                intent: Intent::None,
                now: Duration::from_millis(u64::from(frame) * 50),
            });
            frame += 1;
        }
    }
    commands
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    outcome: Outcome,
    player: PlayerSnapshot,
    remaining_hits: u32,
    timer: TimerState,
    events: Vec<EventRecord>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum EventRecord {
    Timer { remaining_seconds: u32 },
    Moved { from: CellCoord, to: CellCoord },
    Rejected { direction: Direction },
    CratesBroken { cells: Vec<CellCoord> },
    LevelCompleted { level: LevelNumber },
    LevelFailed,
    LevelReset,
}

impl From<&Event> for EventRecord {
    fn from(event: &Event) -> Self {
        match event {
            Event::TimerStarted { remaining_seconds }
            | Event::TimerAdvanced { remaining_seconds } => Self::Timer {
                remaining_seconds: *remaining_seconds,
            },
            Event::TimerExpired => Self::Timer {
                remaining_seconds: 0,
            },
            Event::PlayerMoved { from, to, .. } => Self::Moved {
                from: *from,
                to: *to,
            },
            Event::MoveRejected { direction, .. } => Self::Rejected {
                direction: *direction,
            },
            Event::CratesBroken { cells, .. } => Self::CratesBroken {
                cells: cells.clone(),
            },
            Event::LevelCompleted { level } => Self::LevelCompleted { level: *level },
            Event::LevelFailed { .. } => Self::LevelFailed,
            Event::LevelReset { .. } => Self::LevelReset,
        }
    }
}

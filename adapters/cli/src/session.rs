//! Play session that owns the level cache, the world and progression.

use anyhow::{bail, Context, Result};
use log::info;
use orb_maze_core::{Command, Event, Intent, LevelNumber, Outcome};
use orb_maze_level::{LevelCache, LevelDirectory, LevelSource};
use orb_maze_rendering::{RenderingBackend, Scene};
use orb_maze_system_progression::Progression;
use orb_maze_world::{self as world, query, World};

use crate::clock::Clock;

/// Whether the session expects more input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SessionStatus {
    /// A level is in progress.
    Playing,
    /// The last level in the directory was completed.
    Finished,
}

/// Host loop state driving one world at a time through the level directory.
#[derive(Debug)]
pub(crate) struct Session<S, C> {
    cache: LevelCache<S>,
    directory: LevelDirectory,
    progression: Progression,
    move_cooldown_ticks: u32,
    clock: C,
    world: World,
}

impl<S: LevelSource, C: Clock> Session<S, C> {
    /// Loads the starting level and prepares its world.
    pub(crate) fn start(
        mut cache: LevelCache<S>,
        directory: LevelDirectory,
        level: LevelNumber,
        move_cooldown_ticks: u32,
        clock: C,
    ) -> Result<Self> {
        if !directory.contains(level) {
            bail!(
                "level {level} is not available; {} level(s) found",
                directory.len()
            );
        }

        let world = load_world(&mut cache, level, move_cooldown_ticks)?;
        Ok(Self {
            cache,
            directory,
            progression: Progression::new(),
            move_cooldown_ticks,
            clock,
            world,
        })
    }

    /// World of the level currently in play.
    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Levels completed so far.
    pub(crate) fn progression(&self) -> &Progression {
        &self.progression
    }

    /// Reports whether every level in the directory has been completed.
    pub(crate) fn all_levels_completed(&self) -> bool {
        self.progression.is_finished(&self.directory)
    }

    /// Feeds intents one by one until they run out or the run is finished.
    pub(crate) fn run<I, B>(&mut self, intents: I, backend: &mut B) -> Result<SessionStatus>
    where
        I: IntoIterator<Item = Intent>,
        B: RenderingBackend,
    {
        for intent in intents {
            if self.feed(intent, backend)? == SessionStatus::Finished {
                return Ok(SessionStatus::Finished);
            }
        }
        Ok(SessionStatus::Playing)
    }

    /// Applies one input, waits out the move cooldown and presents the frame.
    ///
    /// Failed attempts restart the level; completed ones load the next level.
    pub(crate) fn feed<B: RenderingBackend>(
        &mut self,
        intent: Intent,
        backend: &mut B,
    ) -> Result<SessionStatus> {
        let mut events = Vec::new();
        self.tick(intent, &mut events);
        if intent != Intent::None {
            while query::outcome(&self.world) == Outcome::Playing
                && query::player(&self.world).move_cooldown_ticks > 0
            {
                self.tick(Intent::None, &mut events);
            }
        }

        backend.present(&Scene::capture(&self.world))?;
        self.advance(&events)
    }

    fn tick(&mut self, intent: Intent, events: &mut Vec<Event>) {
        let now = self.clock.now();
        let _ = world::step(&mut self.world, intent, now, events);
    }

    fn advance(&mut self, events: &[Event]) -> Result<SessionStatus> {
        let next = self.progression.handle(events, &self.directory);
        match query::outcome(&self.world) {
            Outcome::Playing => Ok(SessionStatus::Playing),
            Outcome::Failed => {
                info!("retrying level {}", query::level_number(&self.world));
                world::apply(&mut self.world, Command::ResetLevel, &mut Vec::new());
                Ok(SessionStatus::Playing)
            }
            Outcome::Completed => match next {
                Some(level) => {
                    self.world = load_world(&mut self.cache, level, self.move_cooldown_ticks)?;
                    Ok(SessionStatus::Playing)
                }
                None => Ok(SessionStatus::Finished),
            },
        }
    }
}

fn load_world<S: LevelSource>(
    cache: &mut LevelCache<S>,
    level: LevelNumber,
    move_cooldown_ticks: u32,
) -> Result<World> {
    let data = cache
        .load(level)
        .with_context(|| format!("failed to load level {level}"))?;
    let mut world = World::new(level, data);
    world::apply(
        &mut world,
        Command::ConfigureMoveCooldown {
            ticks: move_cooldown_ticks,
        },
        &mut Vec::new(),
    );
    Ok(world)
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc, time::Duration};

    use super::*;
    use crate::{clock::FixedStep, input::parse_script};
    use orb_maze_core::{CellCoord, Direction};
    use orb_maze_level::InMemorySource;
    use orb_maze_rendering::TextBackend;

    /// Clock whose reading is moved by the test through a shared handle.
    #[derive(Clone, Debug, Default)]
    struct HandClock(Rc<Cell<Duration>>);

    impl Clock for HandClock {
        fn now(&mut self) -> Duration {
            self.0.get()
        }
    }

    fn session<C: Clock>(source: InMemorySource, clock: C) -> Session<InMemorySource, C> {
        let directory = LevelDirectory::probe(&source);
        Session::start(
            LevelCache::new(source),
            directory,
            LevelNumber::new(1),
            3,
            clock,
        )
        .expect("session starts")
    }

    #[test]
    fn completing_levels_walks_the_directory() {
        let mut session = session(
            InMemorySource::new()
                .with_level(LevelNumber::new(1), r#"{ "layout": ["P.O"] }"#)
                .with_level(LevelNumber::new(2), r#"{ "layout": ["O.P"] }"#),
            FixedStep::new(Duration::from_millis(100)),
        );
        let mut backend = TextBackend::new(Vec::new());

        let status = session
            .run(parse_script("RR"), &mut backend)
            .expect("script runs");
        assert_eq!(status, SessionStatus::Playing);
        assert_eq!(query::level_number(session.world()), LevelNumber::new(2));
        assert!(!session.all_levels_completed());

        let status = session
            .run(parse_script("LLLL"), &mut backend)
            .expect("script runs");
        assert_eq!(status, SessionStatus::Finished);
        assert_eq!(backend.frames(), 4);
        assert!(session.all_levels_completed());
        assert_eq!(
            session.progression().completed().collect::<Vec<_>>(),
            vec![LevelNumber::new(1), LevelNumber::new(2)]
        );
    }

    #[test]
    fn failed_attempt_restarts_the_level() {
        let mut session = session(
            InMemorySource::new().with_level(
                LevelNumber::new(1),
                r#"{ "layout": ["P..O"], "timeLimit": 1 }"#,
            ),
            FixedStep::new(Duration::from_millis(100)),
        );
        let mut backend = TextBackend::new(Vec::new());

        let status = session
            .run(parse_script("R.........."), &mut backend)
            .expect("script runs");

        assert_eq!(status, SessionStatus::Playing);
        assert_eq!(query::outcome(session.world()), Outcome::Playing);
        assert!(!query::has_moved(session.world()));
        let frames = String::from_utf8(backend.into_inner()).expect("utf-8 frames");
        assert!(frames.contains("Time's up!"));
    }

    #[test]
    fn waiting_between_inputs_runs_the_countdown() {
        let clock = HandClock::default();
        let mut session = session(
            InMemorySource::new().with_level(
                LevelNumber::new(1),
                r#"{ "layout": ["P...O"], "timeLimit": 15 }"#,
            ),
            clock.clone(),
        );
        let mut backend = TextBackend::new(Vec::new());

        let _ = session
            .feed(Intent::Move(Direction::Right), &mut backend)
            .expect("input applies");
        assert_eq!(query::player(session.world()).position, CellCoord::new(1, 0));

        clock.0.set(Duration::from_secs(17));
        let status = session
            .feed(Intent::Move(Direction::Right), &mut backend)
            .expect("input applies");

        assert_eq!(status, SessionStatus::Playing);
        assert!(!query::has_moved(session.world()));
        assert_eq!(query::player(session.world()).position, CellCoord::new(0, 0));
        let frames = String::from_utf8(backend.into_inner()).expect("utf-8 frames");
        let (first, second) = frames.split_once("\n\n").expect("two frames");
        assert!(first.contains("Time: 15s"));
        assert!(second.contains("Time: 0s !!"));
        assert!(second.contains("Time's up!"));
    }

    #[test]
    fn starting_outside_the_directory_is_rejected() {
        let source =
            InMemorySource::new().with_level(LevelNumber::new(1), r#"{ "layout": ["PO"] }"#);
        let directory = LevelDirectory::probe(&source);

        let error = Session::start(
            LevelCache::new(source),
            directory,
            LevelNumber::new(5),
            0,
            FixedStep::new(Duration::from_millis(16)),
        )
        .unwrap_err();

        assert!(error.to_string().contains("level 5 is not available"));
    }

    #[test]
    fn malformed_level_fails_with_context() {
        let source =
            InMemorySource::new().with_level(LevelNumber::new(1), r#"{ "layout": ["P"] }"#);
        let directory = LevelDirectory::probe(&source);

        let error = Session::start(
            LevelCache::new(source),
            directory,
            LevelNumber::new(1),
            0,
            FixedStep::new(Duration::from_millis(16)),
        )
        .unwrap_err();

        assert_eq!(error.to_string(), "failed to load level 1");
    }
}

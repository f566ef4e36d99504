//! Fixed timestep simulation tick
//!
//! One call moves the snake exactly one cell. The caller decides how often
//! that happens (see `Game::update`); nothing in here looks at frame time.

use super::state::{DeathCause, Session};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Ordinary move
    Moved,
    /// Ate a food item and grew by one segment
    Ate,
    /// The session ended (also returned for every tick after that)
    Died(DeathCause),
}

/// Advance the session by one move at wall time `now`
pub fn tick(session: &mut Session, now: f64) -> TickOutcome {
    if let Some(cause) = session.death {
        return TickOutcome::Died(cause);
    }

    let arena = session.arena;
    let cell = arena.cell_size;
    let candidate = session.snake.next_head(&arena);
    let food_hit = session.items.food_at(candidate, cell);

    // The tail only stays put when this move eats
    if session.snake.hits_body(candidate, food_hit.is_none()) {
        return die(session, DeathCause::SelfCollision);
    }

    if session.items.hazard_at(candidate, cell) {
        return die(session, DeathCause::Hazard);
    }

    session.ticks += 1;
    session.snake.advance(candidate, food_hit.is_some());

    let outcome = match food_hit {
        Some(index) => {
            session.items.food.remove(index);
            session.score.record_point();
            TickOutcome::Ate
        }
        None => TickOutcome::Moved,
    };

    if session.items.food.is_empty() {
        let elapsed = session.score.active_at(now);
        session.respawn_items(elapsed);
    }

    session.score.tick(now);
    outcome
}

fn die(session: &mut Session, cause: DeathCause) -> TickOutcome {
    log::info!(
        "Session over after {} ticks: {:?} (score {})",
        session.ticks,
        cause,
        session.score.points()
    );
    session.death = Some(cause);
    TickOutcome::Died(cause)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::grid::{Heading, cells_overlap};
    use crate::sim::snake::Snake;
    use crate::sim::state::{Item, Items};
    use glam::IVec2;

    fn empty_session() -> Session {
        let mut session = Session::new(&GameConfig::default(), 12345, 0.0);
        session.items = Items::default();
        session
    }

    fn segments(session: &Session) -> Vec<IVec2> {
        session.snake.segments().collect()
    }

    #[test]
    fn test_tick_moves_one_cell() {
        let mut session = empty_session();
        session.items.food.push(Item::food(IVec2::new(0, 0)));
        assert_eq!(tick(&mut session, 0.1), TickOutcome::Moved);
        assert_eq!(segments(&session), vec![IVec2::new(420, 225), IVec2::new(400, 225)]);
        assert_eq!(session.ticks, 1);
    }

    #[test]
    fn test_tick_wraps_at_right_edge() {
        let mut session = empty_session();
        session.items.food.push(Item::food(IVec2::new(0, 0)));
        session.snake = Snake::from_segments(
            [IVec2::new(780, 225), IVec2::new(760, 225)],
            Heading::Right,
        )
        .unwrap();
        tick(&mut session, 0.1);
        assert_eq!(session.snake.head(), IVec2::new(0, 225));
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut session = empty_session();
        session.items.food.push(Item::food(IVec2::new(420, 220)));
        session.items.food.push(Item::food(IVec2::new(0, 0)));

        assert_eq!(tick(&mut session, 0.1), TickOutcome::Ate);
        assert_eq!(session.score.points(), 1);
        assert_eq!(session.snake.len(), 3);
        assert_eq!(session.items.food.len(), 1);
        assert_eq!(
            segments(&session),
            vec![IVec2::new(420, 225), IVec2::new(400, 225), IVec2::new(380, 225)]
        );
    }

    #[test]
    fn test_last_food_triggers_respawn() {
        let mut session = empty_session();
        session.items.food.push(Item::food(IVec2::new(420, 220)));
        assert_eq!(tick(&mut session, 25.0), TickOutcome::Ate);
        // 25s of play -> 3 food, 1 hazard
        assert_eq!(session.items.food.len(), 3);
        assert_eq!(session.items.hazards.len(), 1);
        for item in session.items.iter() {
            assert!(session.snake.segments().all(|s| !cells_overlap(s, item.pos, 20)));
        }
    }

    #[test]
    fn test_self_collision_ends_session() {
        let mut session = empty_session();
        session.items.food.push(Item::food(IVec2::new(0, 0)));
        // Head at (40,40) moving down into (40,60), which the body holds
        session.snake = Snake::from_segments(
            [
                IVec2::new(40, 40),
                IVec2::new(60, 40),
                IVec2::new(60, 60),
                IVec2::new(40, 60),
                IVec2::new(20, 60),
            ],
            Heading::Left,
        )
        .unwrap();
        assert!(session.snake.steer(Heading::Down));
        assert_eq!(
            tick(&mut session, 1.0),
            TickOutcome::Died(DeathCause::SelfCollision)
        );
        assert!(session.is_over());
        // Dead sessions stay put
        let before = segments(&session);
        assert_eq!(
            tick(&mut session, 2.0),
            TickOutcome::Died(DeathCause::SelfCollision)
        );
        assert_eq!(segments(&session), before);
    }

    #[test]
    fn test_chasing_tail_is_safe() {
        let mut session = empty_session();
        session.items.food.push(Item::food(IVec2::new(0, 0)));
        // A 2x2 loop: the head moves into the cell the tail is leaving
        session.snake = Snake::from_segments(
            [
                IVec2::new(40, 40),
                IVec2::new(40, 60),
                IVec2::new(60, 60),
                IVec2::new(60, 40),
            ],
            Heading::Up,
        )
        .unwrap();
        assert!(session.snake.steer(Heading::Right));
        assert_eq!(tick(&mut session, 1.0), TickOutcome::Moved);
        assert_eq!(session.snake.head(), IVec2::new(60, 40));
        assert_eq!(session.snake.len(), 4);
    }

    #[test]
    fn test_tail_blocks_when_eating() {
        let mut session = empty_session();
        session.snake = Snake::from_segments(
            [
                IVec2::new(40, 40),
                IVec2::new(40, 60),
                IVec2::new(60, 60),
                IVec2::new(60, 40),
            ],
            Heading::Up,
        )
        .unwrap();
        // Food sitting under the tail means the tail will not move
        session.items.food.push(Item::food(IVec2::new(60, 40)));
        session.snake.steer(Heading::Right);
        assert_eq!(
            tick(&mut session, 1.0),
            TickOutcome::Died(DeathCause::SelfCollision)
        );
    }

    #[test]
    fn test_hazard_is_fatal() {
        let mut session = empty_session();
        session.items.food.push(Item::food(IVec2::new(0, 0)));
        session.items.hazards.push(Item::hazard(IVec2::new(420, 220)));
        assert_eq!(tick(&mut session, 1.0), TickOutcome::Died(DeathCause::Hazard));
        assert_eq!(session.snake.head(), IVec2::new(400, 225));
    }

    #[test]
    fn test_determinism() {
        let config = GameConfig::default();
        let mut a = Session::new(&config, 99999, 0.0);
        let mut b = Session::new(&config, 99999, 0.0);
        let turns = [Heading::Up, Heading::Left, Heading::Down, Heading::Right];

        for i in 0..200u32 {
            let now = f64::from(i) / 15.0;
            let turn = turns[(i / 7) as usize % turns.len()];
            a.snake.steer(turn);
            b.snake.steer(turn);
            assert_eq!(tick(&mut a, now), tick(&mut b, now));
        }
        assert_eq!(segments(&a), segments(&b));
        assert_eq!(a.items.food, b.items.food);
        assert_eq!(a.items.hazards, b.items.hazards);
    }
}

//! Attract-mode steering
//!
//! Heads for the nearest food by wrapped Manhattan distance and refuses
//! moves that would end the session on the next tick. Good enough for a demo
//! loop, not meant to play well.

use super::grid::Heading;
use super::state::Session;

/// Pick the heading for the next tick, or None if the snake is boxed in
pub fn choose_heading(session: &Session) -> Option<Heading> {
    let arena = &session.arena;
    let cell = arena.cell_size;
    let snake = &session.snake;
    let current = snake.heading();

    Heading::ALL
        .into_iter()
        .filter(|h| !h.reverses(current))
        .filter_map(|h| {
            let next = arena.step(snake.head(), h);
            let eats = session.items.food_at(next, cell).is_some();
            if snake.hits_body(next, !eats) || session.items.hazard_at(next, cell) {
                return None;
            }
            let distance = session
                .items
                .food
                .iter()
                .map(|f| arena.wrapped_distance(next, f.pos))
                .min()
                .unwrap_or(0);
            // Prefer going straight on ties
            Some((distance, h != current, h))
        })
        .min_by_key(|&(distance, turns, _)| (distance, turns))
        .map(|(_, _, h)| h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::snake::Snake;
    use crate::sim::state::{Item, Items};
    use crate::sim::tick::{TickOutcome, tick};
    use glam::IVec2;

    fn session_with_food(food: IVec2) -> Session {
        let mut session = Session::new(&GameConfig::default(), 5, 0.0);
        session.items = Items {
            food: vec![Item::food(food)],
            hazards: Vec::new(),
        };
        session
    }

    #[test]
    fn test_turns_toward_food() {
        let session = session_with_food(IVec2::new(400, 100));
        assert_eq!(choose_heading(&session), Some(Heading::Up));
    }

    #[test]
    fn test_keeps_straight_when_aligned() {
        let session = session_with_food(IVec2::new(600, 220));
        assert_eq!(choose_heading(&session), Some(Heading::Right));
    }

    #[test]
    fn test_avoids_hazard() {
        let mut session = session_with_food(IVec2::new(600, 220));
        session.items.hazards.push(Item::hazard(IVec2::new(420, 220)));
        let heading = choose_heading(&session).unwrap();
        assert_ne!(heading, Heading::Right);
    }

    #[test]
    fn test_boxed_in_returns_none() {
        let mut session = session_with_food(IVec2::new(0, 0));
        session.snake =
            Snake::from_segments([IVec2::new(100, 100), IVec2::new(80, 100)], Heading::Right)
                .unwrap();
        session.items.hazards = vec![
            Item::hazard(IVec2::new(120, 100)),
            Item::hazard(IVec2::new(100, 80)),
            Item::hazard(IVec2::new(100, 120)),
        ];
        assert_eq!(choose_heading(&session), None);
    }

    #[test]
    fn test_autopilot_eats() {
        let mut session = Session::new(&GameConfig::default(), 77, 0.0);
        let mut eaten = 0;
        for i in 0..600u32 {
            if let Some(h) = choose_heading(&session) {
                session.snake.steer(h);
            }
            match tick(&mut session, f64::from(i) / 15.0) {
                TickOutcome::Ate => eaten += 1,
                TickOutcome::Died(_) => break,
                TickOutcome::Moved => {}
            }
        }
        assert!(eaten > 0);
        assert_eq!(session.snake.len(), 2 + eaten);
    }
}

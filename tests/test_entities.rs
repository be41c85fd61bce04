use bubble_pop::entities::*;

use glam::Vec2;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(Pace::Classic, Pace::Classic);
    assert_ne!(Pace::Relaxed, Pace::Frantic);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_eq!(BubbleKind::Regular, BubbleKind::Regular);
    assert_ne!(BubbleKind::Regular, BubbleKind::Flashing { flash_timer: 0 });

    // Clone must produce an equal value
    let kind = BubbleKind::Flashing { flash_timer: 7 };
    assert_eq!(kind.clone(), BubbleKind::Flashing { flash_timer: 7 });
}

#[test]
fn flashing_kind_compares_by_timer() {
    assert_eq!(
        BubbleKind::Flashing { flash_timer: 3 },
        BubbleKind::Flashing { flash_timer: 3 }
    );
    assert_ne!(
        BubbleKind::Flashing { flash_timer: 3 },
        BubbleKind::Flashing { flash_timer: 4 }
    );
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        bubbles: Vec::new(),
        fragments: Vec::new(),
        popups: Vec::new(),
        score: 0,
        high_score: 0,
        bubble_timer: 0,
        flash_spawn_timer: 0,
        remaining_time: 900,
        final_score: 0,
        status: GameStatus::Playing,
        pace: Pace::Classic,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.score = 999;
    cloned.remaining_time = 1;
    cloned.bubbles.push(Bubble {
        pos: Vec2::new(128.0, 85.0),
        start_pos: Vec2::new(128.0, 85.0),
        target_pos: Vec2::new(40.0, 200.0),
        radius: 1.0,
        target_radius: 20.0,
        color: 11,
        kind: BubbleKind::Regular,
        popped: false,
        grown: false,
    });
    cloned.fragments.push(Fragment {
        pos: Vec2::new(10.0, 10.0),
        vel: Vec2::new(1.0, -1.0),
        color: 3,
        life: 45,
    });
    cloned.popups.push(ScorePopup {
        pos: Vec2::new(128.0, 128.0),
        value: 50,
        life: 45,
    });

    assert_eq!(original.score, 0);
    assert_eq!(original.remaining_time, 900);
    assert!(original.bubbles.is_empty());
    assert!(original.fragments.is_empty());
    assert!(original.popups.is_empty());
}

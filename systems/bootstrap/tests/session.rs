use miam_core::{BoardError, BoardSize, CellCoord};
use miam_system_bootstrap::{pattern, random_cells, FrameInput, FrameOutcome, Registry, Session};

fn life_session() -> Session {
    let strategy = Registry::default().create("life").expect("registered");
    Session::new(strategy).expect("preferred size is valid")
}

fn occupied(session: &Session) -> Vec<CellCoord> {
    let board = session.board();
    board
        .iterate_cells()
        .filter(|coord| board.is_empty(*coord) == Ok(false))
        .collect()
}

#[test]
fn session_board_uses_strategy_preference() {
    let session = life_session();
    assert_eq!(session.board().get_size(), BoardSize::new(16, 16));
    assert_eq!(session.strategy_name(), "life");
    assert_eq!(session.generation(), 0);
}

#[test]
fn explicit_size_overrides_preference() {
    let strategy = Registry::default().create("default").expect("registered");
    let session = Session::with_size(strategy, BoardSize::new(7, 3)).expect("valid size");
    assert_eq!(session.board().get_size(), BoardSize::new(7, 3));
}

#[test]
fn zero_size_session_is_rejected() {
    let strategy = Registry::default().create("default").expect("registered");
    let size = BoardSize::new(0, 3);
    assert!(matches!(
        Session::with_size(strategy, size),
        Err(BoardError::InvalidSize { .. })
    ));
}

#[test]
fn seeding_skips_occupied_and_outside_cells() {
    let mut session = life_session();
    let seeded = session
        .seed([
            CellCoord::new(1, 1),
            CellCoord::new(1, 1),
            CellCoord::new(16, 0),
            CellCoord::new(2, 2),
        ])
        .expect("seeding never fails in bounds");
    assert_eq!(seeded, 2);
    assert_eq!(occupied(&session), vec![CellCoord::new(1, 1), CellCoord::new(2, 2)]);
}

#[test]
fn blinker_pattern_returns_after_two_steps() {
    let mut session = life_session();
    let blinker = pattern("blinker").expect("built in");
    assert_eq!(session.seed_pattern(blinker), Ok(3));
    let initial = occupied(&session);

    let step = FrameInput {
        step_requested: true,
        ..FrameInput::default()
    };
    assert!(session.frame(step).expect("valid frame").advanced);
    assert_ne!(occupied(&session), initial);
    assert!(session.frame(step).expect("valid frame").advanced);
    assert_eq!(occupied(&session), initial);
    assert_eq!(session.generation(), 2);
}

#[test]
fn action_and_selection_follow_hovered_cell() {
    let mut session = life_session();
    let cell = CellCoord::new(4, 4);

    let outcome = session
        .frame(FrameInput {
            hovered_cell: Some(cell),
            action_release: true,
            select_release: true,
            ..FrameInput::default()
        })
        .expect("valid frame");
    // selection is processed before the action, so the empty cell is refused
    assert_eq!(
        outcome,
        FrameOutcome {
            selection: Some(false),
            action: Some(true),
            advanced: false,
        }
    );

    let outcome = session
        .frame(FrameInput {
            hovered_cell: Some(cell),
            select_release: true,
            ..FrameInput::default()
        })
        .expect("valid frame");
    assert_eq!(outcome.selection, Some(true));
    assert_eq!(session.board().get_selection(), Some(cell));
}

#[test]
fn selecting_off_board_or_cancelling_clears_selection() {
    let mut session = life_session();
    let cell = CellCoord::new(0, 0);
    assert_eq!(session.apply_action(cell), Ok(true));
    assert_eq!(session.select(cell), Ok(true));

    let outcome = session
        .frame(FrameInput {
            hovered_cell: None,
            select_release: true,
            ..FrameInput::default()
        })
        .expect("valid frame");
    assert_eq!(outcome.selection, Some(true));
    assert_eq!(session.board().get_selection(), None);

    assert_eq!(session.select(cell), Ok(true));
    let _ = session
        .frame(FrameInput {
            cancel: true,
            ..FrameInput::default()
        })
        .expect("valid frame");
    assert_eq!(session.board().get_selection(), None);
}

#[test]
fn clicks_over_controls_are_ignored() {
    let mut session = life_session();
    let outcome = session
        .frame(FrameInput {
            hovered_cell: Some(CellCoord::new(3, 3)),
            action_release: true,
            over_controls: true,
            ..FrameInput::default()
        })
        .expect("valid frame");
    assert_eq!(outcome, FrameOutcome::default());
    assert!(occupied(&session).is_empty());
}

#[test]
fn out_of_bounds_click_is_reported() {
    let mut session = life_session();
    let result = session.frame(FrameInput {
        hovered_cell: Some(CellCoord::new(20, 0)),
        action_release: true,
        ..FrameInput::default()
    });
    assert!(matches!(result, Err(BoardError::OutOfBounds { .. })));
}

#[test]
fn out_of_bounds_selection_is_reported_and_keeps_selection() {
    let mut session = life_session();
    let cell = CellCoord::new(5, 5);
    assert_eq!(session.apply_action(cell), Ok(true));
    assert_eq!(session.select(cell), Ok(true));

    let result = session.frame(FrameInput {
        hovered_cell: Some(CellCoord::new(0, 16)),
        select_release: true,
        ..FrameInput::default()
    });
    assert!(matches!(
        result,
        Err(BoardError::OutOfBounds { coord, .. }) if coord == CellCoord::new(0, 16)
    ));
    assert_eq!(session.board().get_selection(), Some(cell));
}

#[test]
fn placing_off_board_cell_fails_without_touching_board() {
    let mut session = life_session();
    let result = session.place(&[CellCoord::new(1, 1), CellCoord::new(99, 99)]);
    assert_eq!(
        result,
        Err(BoardError::OutOfBounds {
            coord: CellCoord::new(99, 99),
            size: BoardSize::new(16, 16),
        })
    );
    assert!(occupied(&session).is_empty());
}

#[test]
fn placing_listed_cells_skips_occupied_ones() {
    let mut session = life_session();
    let cells = [CellCoord::new(3, 1), CellCoord::new(3, 1), CellCoord::new(0, 2)];
    assert_eq!(session.place(&cells), Ok(2));
    assert_eq!(occupied(&session), vec![CellCoord::new(0, 2), CellCoord::new(3, 1)]);
}

#[test]
fn continuous_play_advances_on_cadence_and_ignores_step_requests() {
    let mut session = life_session();
    session.clock_mut().set_rate(4);
    let _ = session
        .frame(FrameInput {
            toggle_play: true,
            ..FrameInput::default()
        })
        .expect("valid frame");
    assert_eq!(session.generation(), 1, "first playing frame advances");

    for _ in 0..7 {
        let _ = session
            .frame(FrameInput {
                step_requested: true,
                ..FrameInput::default()
            })
            .expect("valid frame");
    }
    assert_eq!(session.generation(), 2);
}

#[test]
fn random_seed_populates_same_cells_for_same_seed() {
    let mut first = life_session();
    let mut second = life_session();
    let size = first.board().get_size();
    let _ = first.seed(random_cells(size, 42, 0.3)).expect("in bounds");
    let _ = second.seed(random_cells(size, 42, 0.3)).expect("in bounds");
    assert_eq!(first.board(), second.board());
}

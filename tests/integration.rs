// Integration tests (native) for the `kanji-spot` crate.
// These drive whole sessions through the public engine API with a seeded RNG
// and a hand-driven ticker, so they run under `cargo test` on the host.

use std::collections::HashSet;

use kanji_spot::{
    Advance, GameConfig, GameError, Level, ManualTicker, Phase, QuestionDetail, QuestionPool,
    RANKS, RngSource, RoundEngine, SelectionOutcome, Session, rank_for,
};

fn detail(c: &str) -> QuestionDetail {
    QuestionDetail {
        character: c.into(),
        on: "オン".into(),
        kun: "くん".into(),
        meaning: "意味".into(),
        category: "象形文字".into(),
    }
}

fn engine(questions: usize) -> RoundEngine<ManualTicker> {
    let config = GameConfig {
        questions,
        ..GameConfig::default()
    };
    RoundEngine::new(config, ManualTicker::default()).unwrap()
}

fn answer_of(engine: &RoundEngine<ManualTicker>) -> (usize, usize) {
    let pos = engine.session().unwrap().answer().unwrap();
    (pos.row, pos.column)
}

#[test]
fn single_pair_session_runs_to_completion() {
    let group = vec![detail("木"), detail("林")];
    let pool = QuestionPool {
        easy: vec![group.clone()],
        normal: vec![group.clone()],
        hard: vec![group],
    };
    let mut rng = RngSource::seeded(11);
    let mut eng = engine(1);
    eng.start_session(Level::Easy, &pool, &mut rng).unwrap();

    let content = eng.session().unwrap().contents()[0].clone();
    let mut chars: Vec<_> = [content.major.character.as_str(), content.minor.character.as_str()].to_vec();
    chars.sort_unstable();
    assert_eq!(chars, vec!["木", "林"]);

    let grid = eng.begin_round(&mut rng).unwrap();
    assert_eq!(grid.cells.len(), 100);
    let minors = grid.cells.iter().filter(|c| **c == content.minor.character).count();
    assert_eq!(minors, 1);

    let (row, column) = answer_of(&eng);
    assert_eq!(grid.cell(row, column), Some(content.minor.character.as_str()));
    assert_eq!(eng.select_cell(row, column), SelectionOutcome::Correct(content));
    match eng.advance_or_finish(&mut rng).unwrap() {
        Advance::Complete { level, elapsed_ms } => {
            assert_eq!(level, Level::Easy);
            assert_eq!(elapsed_ms, 0);
        }
        other => panic!("expected completion, got {other:?}"),
    }
    assert_eq!(eng.phase(), Phase::Complete);
}

#[test]
fn sessions_draw_distinct_groups_with_distinct_pairs() {
    let pool = QuestionPool::builtin().unwrap();
    for seed in 0..20 {
        let mut rng = RngSource::seeded(seed);
        for level in Level::ALL {
            let groups = pool.groups(level);
            let n = groups.len();
            let session = Session::start(level, &pool, n, &mut rng).unwrap();
            assert_eq!(session.total_questions(), n);

            let mut used_groups = HashSet::new();
            for content in session.contents() {
                assert_ne!(content.major, content.minor);
                let idx = groups
                    .iter()
                    .position(|g| g.contains(&content.major) && g.contains(&content.minor))
                    .expect("major and minor come from one group");
                assert!(used_groups.insert(idx), "group {idx} drawn twice");
            }
        }
    }
}

#[test]
fn too_many_questions_is_a_configuration_error() {
    let pool = QuestionPool::builtin().unwrap();
    let mut rng = RngSource::seeded(1);
    for level in Level::ALL {
        let too_many = pool.groups(level).len() + 1;
        let err = Session::start(level, &pool, too_many, &mut rng).unwrap_err();
        assert!(matches!(err, GameError::Configuration(_)));

        let mut eng = engine(too_many);
        assert!(matches!(
            eng.start_session(level, &pool, &mut rng),
            Err(GameError::Configuration(_))
        ));
        assert!(eng.session().is_none());
    }
}

#[test]
fn full_session_accumulates_time_and_ranks() {
    let pool = QuestionPool::builtin().unwrap();
    let mut rng = RngSource::seeded(2024);
    let mut eng = engine(3);
    eng.start_session(Level::Normal, &pool, &mut rng).unwrap();
    assert_eq!(eng.question_number(), 0);

    eng.begin_round(&mut rng).unwrap();
    let mut completed = None;
    for round in 1..=3 {
        assert_eq!(eng.question_number(), round);
        assert_eq!(eng.phase(), Phase::InRound);
        for _ in 0..25 {
            assert!(eng.tick());
        }
        let (row, column) = answer_of(&eng);
        // A miss first: no penalty, timer keeps running.
        let miss = ((row + 1) % 10, column);
        assert_eq!(eng.select_cell(miss.0, miss.1), SelectionOutcome::Incorrect);
        assert!(eng.is_ticking());
        assert!(matches!(eng.select_cell(row, column), SelectionOutcome::Correct(_)));
        // Detail screen is up; time is frozen.
        assert!(!eng.tick());
        assert_eq!(eng.question_number(), round);

        match eng.advance_or_finish(&mut rng).unwrap() {
            Advance::NextRound(grid) => {
                assert!(round < 3);
                assert_eq!(eng.grid(), Some(&grid));
            }
            Advance::Complete { level, elapsed_ms } => {
                assert_eq!(round, 3);
                completed = Some((level, elapsed_ms));
            }
        }
    }

    let (level, elapsed_ms) = completed.expect("session completes after the last round");
    assert_eq!(level, Level::Normal);
    assert_eq!(elapsed_ms, 3 * 25 * 100);
    assert_eq!(rank_for(elapsed_ms, &RANKS).unwrap().name, "二級");

    eng.reset();
    assert_eq!(eng.phase(), Phase::NotStarted);
    assert_eq!(eng.elapsed_ms(), 0);
}

#[test]
fn at_most_one_timer_runs_per_session() {
    let pool = QuestionPool::builtin().unwrap();
    let mut rng = RngSource::seeded(8);
    let mut eng = engine(3);
    eng.start_session(Level::Hard, &pool, &mut rng).unwrap();
    eng.begin_round(&mut rng).unwrap();
    for _ in 0..3 {
        let (row, column) = answer_of(&eng);
        eng.select_cell(row, column);
        assert!(!eng.ticker().running);
        if let Advance::Complete { .. } = eng.advance_or_finish(&mut rng).unwrap() {
            break;
        }
        assert!(eng.ticker().running);
    }
    let ticker = eng.ticker();
    assert!(!ticker.overlapped);
    assert_eq!(ticker.starts, 3);
    assert_eq!(ticker.stops, 3);
}

#[test]
fn restarting_mid_round_stops_the_running_timer() {
    let pool = QuestionPool::builtin().unwrap();
    let mut rng = RngSource::seeded(31);
    let mut eng = engine(3);
    eng.start_session(Level::Easy, &pool, &mut rng).unwrap();
    eng.begin_round(&mut rng).unwrap();
    assert!(eng.tick());
    assert!(eng.ticker().running);

    eng.start_session(Level::Hard, &pool, &mut rng).unwrap();
    assert!(!eng.ticker().running);
    assert!(!eng.is_ticking());
    assert!(!eng.ticker().overlapped);
    assert_eq!(eng.elapsed_ms(), 0);
    assert_eq!(eng.question_number(), 0);
    assert!(!eng.tick());

    eng.begin_round(&mut rng).unwrap();
    assert!(!eng.ticker().overlapped);
    assert_eq!(eng.ticker().starts, 2);
}

#[test]
fn answer_positions_are_rolled_each_round() {
    let pool = QuestionPool::builtin().unwrap();
    let mut rng = RngSource::seeded(99);
    let mut positions = HashSet::new();
    for _ in 0..30 {
        let mut eng = engine(3);
        eng.start_session(Level::Easy, &pool, &mut rng).unwrap();
        eng.begin_round(&mut rng).unwrap();
        loop {
            let pos = answer_of(&eng);
            assert!(pos.0 < 10 && pos.1 < 10);
            positions.insert(pos);
            eng.select_cell(pos.0, pos.1);
            if let Advance::Complete { .. } = eng.advance_or_finish(&mut rng).unwrap() {
                break;
            }
        }
    }
    // 90 independent draws over 100 cells land on many distinct cells.
    assert!(positions.len() > 30, "only {} distinct positions", positions.len());
}

#[test]
fn clicks_outside_a_round_are_ignored() {
    let pool = QuestionPool::builtin().unwrap();
    let mut rng = RngSource::seeded(4);
    let mut eng = engine(3);
    assert_eq!(eng.select_cell(0, 0), SelectionOutcome::Inactive);
    eng.start_session(Level::Easy, &pool, &mut rng).unwrap();
    assert_eq!(eng.select_cell(0, 0), SelectionOutcome::Inactive);
    assert!(!eng.tick());
}

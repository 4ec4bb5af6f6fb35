//! Training should, on average, rank each exemplar's own class highest.
//! Individual runs may not, so this checks a rate over many seeded runs.

use glyph_panel::{GlyphSet, PanelConfig, Session, Variant};

const RUNS: u64 = 8;

#[test]
fn exemplars_score_highest_for_their_own_class() {
    let glyphs = GlyphSet::builtin().unwrap();
    let exemplars = glyphs.exemplars();

    let mut hits = 0;
    let mut trials = 0;
    for seed in 0..RUNS {
        let mut config = PanelConfig::default();
        config.variant = Variant::ThreeClass;
        config.seed = Some(1000 + seed);
        config.training.negative_count = 200;
        config.training.max_iterations = Some(400);
        config.training.error_threshold = 0.0;

        let session = Session::with_glyphs(&config, glyphs.clone()).unwrap();
        session.start_training().unwrap();
        session.wait_for_training().unwrap();

        for exemplar in &exemplars {
            let scores = session.classifier().activate(&exemplar.input).unwrap();
            let own = scores[exemplar.class_index];
            let best_other = scores
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != exemplar.class_index)
                .map(|(_, s)| *s)
                .fold(f64::MIN, f64::max);
            if own > best_other {
                hits += 1;
            }
            trials += 1;
        }
    }

    let rate = hits as f64 / trials as f64;
    assert!(rate >= 0.75, "own class ranked first in {hits}/{trials} trials");
}

#[test]
fn binary_detector_prefers_its_exemplar_over_blank_grid() {
    let glyphs = GlyphSet::builtin().unwrap();
    let exemplar = glyphs.get(0).unwrap().encode();
    let blank = vec![0.0; exemplar.len()];

    let mut wins = 0;
    for seed in 0..RUNS {
        let mut config = PanelConfig::default();
        config.variant = Variant::Binary;
        config.seed = Some(2000 + seed);
        config.training.negative_count = 200;
        config.training.max_iterations = Some(400);
        config.training.error_threshold = 0.0;

        let session = Session::with_glyphs(&config, glyphs.clone()).unwrap();
        session.start_training().unwrap();
        session.wait_for_training().unwrap();

        let on = session.classifier().activate(&exemplar).unwrap()[0];
        let off = session.classifier().activate(&blank).unwrap()[0];
        if on > off {
            wins += 1;
        }
    }
    assert!(wins * 4 >= RUNS * 3, "exemplar beat blank grid in {wins}/{RUNS} runs");
}

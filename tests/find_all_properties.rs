use nccmatch::{find_all, ImageView, Match, MatchConfig, Matcher, OverlapPolicy};
use rand::{Rng, SeedableRng};

fn smooth_noise(width: usize, height: usize, seed: u64) -> Vec<u8> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut field: Vec<f32> = (0..width * height)
        .map(|_| f32::from(rng.random::<u8>()))
        .collect();
    for _ in 0..4 {
        field = box_blur5(&field, width, height);
    }
    field
        .into_iter()
        .map(|v| v.round().clamp(0.0, 255.0) as u8)
        .collect()
}

fn box_blur5(src: &[f32], width: usize, height: usize) -> Vec<f32> {
    let mut tmp = vec![0.0f32; src.len()];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0;
            for dx in -2i64..=2 {
                let xi = (x as i64 + dx).clamp(0, width as i64 - 1) as usize;
                acc += src[y * width + xi];
            }
            tmp[y * width + x] = acc / 5.0;
        }
    }
    let mut out = vec![0.0f32; src.len()];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0;
            for dy in -2i64..=2 {
                let yi = (y as i64 + dy).clamp(0, height as i64 - 1) as usize;
                acc += tmp[yi * width + x];
            }
            out[y * width + x] = acc / 5.0;
        }
    }
    out
}

const TPL_SIDE: usize = 32;
const STAMPS: [(usize, usize); 3] = [(20, 30), (160, 40), (300, 80)];

/// Source with the same template bitmap stamped at three separated spots.
fn stamped_scene() -> (Vec<u8>, Vec<u8>, usize, usize) {
    let width = 400;
    let height = 150;
    let mut image = smooth_noise(width, height, 7);
    let tpl = smooth_noise(TPL_SIDE, TPL_SIDE, 99);
    for &(x0, y0) in &STAMPS {
        for y in 0..TPL_SIDE {
            for x in 0..TPL_SIDE {
                image[(y0 + y) * width + x0 + x] = tpl[y * TPL_SIDE + x];
            }
        }
    }
    (image, tpl, width, height)
}

fn boxes_overlap(a: &Match, b: &Match, side: u32) -> bool {
    a.x.abs_diff(b.x) < side && a.y.abs_diff(b.y) < side
}

#[test]
fn find_all_returns_every_instance_ranked() {
    let (image, tpl, width, height) = stamped_scene();
    let source = ImageView::from_slice(&image, width, height).unwrap();
    let template = ImageView::from_slice(&tpl, TPL_SIDE, TPL_SIDE).unwrap();

    let matches = find_all(source, template, 0.8, 10).unwrap();
    assert_eq!(matches.len(), STAMPS.len());

    // Ranked by confidence, non-increasing.
    for pair in matches.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }

    // Every stamp is recovered at its exact position.
    let mut positions: Vec<_> = matches
        .iter()
        .map(|m| (m.x as usize, m.y as usize))
        .collect();
    positions.sort_unstable();
    assert_eq!(positions, STAMPS.to_vec());

    for m in &matches {
        assert!(m.confidence >= 0.99);
    }
}

#[test]
fn max_count_bounds_the_result_set() {
    let (image, tpl, width, height) = stamped_scene();
    let source = ImageView::from_slice(&image, width, height).unwrap();
    let template = ImageView::from_slice(&tpl, TPL_SIDE, TPL_SIDE).unwrap();

    let matches = find_all(source, template, 0.8, 2).unwrap();
    assert_eq!(matches.len(), 2);
    assert!(find_all(source, template, 0.8, 0).unwrap().is_empty());
}

#[test]
fn results_never_overlap() {
    let (image, tpl, width, height) = stamped_scene();
    let source = ImageView::from_slice(&image, width, height).unwrap();
    let template = ImageView::from_slice(&tpl, TPL_SIDE, TPL_SIDE).unwrap();

    let matches = find_all(source, template, 0.5, 20).unwrap();
    for (i, a) in matches.iter().enumerate() {
        for b in &matches[i + 1..] {
            assert!(
                !boxes_overlap(a, b, TPL_SIDE as u32),
                "overlapping results {a:?} and {b:?}"
            );
        }
    }
}

#[test]
fn lower_threshold_returns_a_superset() {
    let (image, tpl, width, height) = stamped_scene();
    let source = ImageView::from_slice(&image, width, height).unwrap();
    let template = ImageView::from_slice(&tpl, TPL_SIDE, TPL_SIDE).unwrap();

    let strict = find_all(source, template, 0.9, 20).unwrap();
    let loose = find_all(source, template, 0.6, 20).unwrap();
    assert!(loose.len() >= strict.len());
    for m in &strict {
        assert!(
            loose.iter().any(|l| l.x == m.x && l.y == m.y),
            "match {m:?} missing at the looser threshold"
        );
    }
}

#[test]
fn iou_policy_is_selectable() {
    let (image, tpl, width, height) = stamped_scene();
    let source = ImageView::from_slice(&image, width, height).unwrap();
    let template = ImageView::from_slice(&tpl, TPL_SIDE, TPL_SIDE).unwrap();

    let matcher = Matcher::with_config(MatchConfig {
        overlap: OverlapPolicy::Iou(0.3),
        ..MatchConfig::default()
    });
    let matches = matcher.find_all(source, template, 0.8, 10).unwrap();
    assert_eq!(matches.len(), STAMPS.len());
}

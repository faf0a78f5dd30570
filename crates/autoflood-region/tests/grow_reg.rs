//! Region growing regression test
//!
//! Covers the ring and two-blob scenarios, agreement with an unrestricted
//! flood fill on random images, and the monotonicity, idempotence and
//! connectivity properties of the result.
//!
//! Run with:
//! ```
//! cargo test -p autoflood-region --test grow_reg
//! ```

use autoflood_core::{Box, GrayImage, Mask, PixelDepth};
use autoflood_region::{
    ConnectivityType, GrowOptions, RegionError, RegionGrower, find_connected_components,
    grow_from_seed, grow_step, label_connected_components,
};
use autoflood_test::RegParams;
use autoflood_test::reference::reference_flood;
use autoflood_test::synthetic::{Blob, blobs_image, random_image, rings_image};
use std::ops::ControlFlow;

fn mask_where(image: &GrayImage, f: impl Fn(u16) -> bool) -> Mask {
    Mask::from_fn(image.width(), image.height(), |x, y| {
        image.get_pixel(x, y).is_some_and(&f)
    })
}

#[test]
fn grow_rings_reg() {
    let mut rp = RegParams::new("grow_rings");

    let img = rings_image(41, &[200, 120, 90, 60], 3).unwrap();

    // 0: down to 50 admits every ring, nothing of the background
    let mask = RegionGrower::new(150, 50).grow(&img).unwrap();
    rp.compare_masks(&mask_where(&img, |v| v >= 60), &mask);

    // 1: down to 100 admits only the 120 ring
    let mask = RegionGrower::new(150, 100).grow(&img).unwrap();
    rp.compare_masks(&mask_where(&img, |v| v >= 120), &mask);

    // 2: seed is exactly I > start
    let mask = RegionGrower::new(150, 150).grow(&img).unwrap();
    rp.compare_masks(&mask_where(&img, |v| v > 150), &mask);

    // 3: the mask grows ring by ring; only the ring levels do any work
    let mut reports = Vec::new();
    RegionGrower::new(150, 50)
        .grow_with_observer(&img, |r| {
            reports.push(*r);
            ControlFlow::Continue(())
        })
        .unwrap();
    let thresholds: Vec<u16> = reports.iter().map(|r| r.threshold).collect();
    rp.check(thresholds == [120, 90, 60], "one level per ring");
    // Rings of Chebyshev width 3 around a 5x5 core: 11x11, 17x17, 23x23
    let admitted: Vec<usize> = reports.iter().map(|r| r.admitted).collect();
    rp.check(admitted == [96, 168, 240], "each level admits one ring");
    let areas: Vec<usize> = reports.iter().map(|r| r.area).collect();
    rp.check(areas == [121, 289, 529], "area steps up ring by ring");
    rp.check(reports.iter().all(|r| r.regions == 1), "a single region");

    // 4: strict range rejects the same call
    let strict = RegionGrower::new(150, 150)
        .with_options(GrowOptions::new().with_strict_range(true))
        .grow(&img);
    rp.check(
        matches!(strict, Err(RegionError::InvalidRange { .. })),
        "strict range rejects stop == start",
    );

    assert!(rp.cleanup());
}

#[test]
fn grow_blobs_reg() {
    let mut rp = RegParams::new("grow_blobs");

    let a = Blob::new((50, 50), &[220, 150, 90], 4);
    let b = Blob::new((230, 140), &[210, 130, 70, 40], 5);
    // Never seeded: its peak is below the start threshold
    let c = Blob::new((150, 40), &[150, 120], 6);
    let img = blobs_image(300, 200, PixelDepth::Bit8, 10, &[a.clone(), b.clone(), c]).unwrap();

    let (start, stop) = (200, 80);
    let grower = RegionGrower::new(start, stop);
    let whole = grower.grow(&img).unwrap();

    // Grow each blob on its own sub-frame and paste the results together
    let mut combined = Mask::new(300, 200);
    for frame in [
        Box::new(20, 20, 60, 60).unwrap(),
        Box::new(200, 110, 60, 60).unwrap(),
    ] {
        let sub = img.crop(&frame).unwrap();
        let grown = grower.grow(&sub).unwrap();
        combined
            .paste_or(&grown, frame.x as u32, frame.y as u32)
            .unwrap();
    }
    rp.compare_masks(&combined, &whole);

    // Expected from the ring levels: all of a, the first two rings of b
    let expected = Mask::from_fn(300, 200, |x, y| {
        a.ring_at(x, y).is_some() || b.ring_at(x, y).is_some_and(|r| r < 2)
    });
    rp.compare_masks(&expected, &whole);

    let comps = find_connected_components(&whole, ConnectivityType::FourWay).unwrap();
    rp.compare_values(2.0, comps.len() as f64, 0.0);

    assert!(rp.cleanup());
}

#[test]
fn grow_reference_reg() {
    let mut rp = RegParams::new("grow_reference");

    let cases = [
        (PixelDepth::Bit8, 40u16, 35i64, 15i64),
        (PixelDepth::Bit8, 120, 110, 70),
        (PixelDepth::Bit16, 90, 80, 50),
    ];
    for (seed, &(depth, max, start, stop)) in (1u64..).zip(cases.iter()) {
        let img = random_image(64, 48, depth, max, seed).unwrap();
        let mask = RegionGrower::new(start, stop).grow(&img).unwrap();
        let expected = reference_flood(&img, start, stop).unwrap();
        eprintln!(
            "seed {}: {} seeded, {} grown",
            seed,
            img.threshold_above(start).count(),
            mask.count()
        );
        rp.compare_masks(&expected, &mask);
    }

    assert!(rp.cleanup());
}

#[test]
fn grow_properties_reg() {
    let mut rp = RegParams::new("grow_properties");

    let img = random_image(50, 40, PixelDepth::Bit8, 60, 99).unwrap();
    let (start, stop) = (52, 20);
    let seed = img.threshold_above(start);
    let grower = RegionGrower::new(start, stop);
    let result = grower.grow(&img).unwrap();

    // Monotonicity along the descent, folding grow_step by hand
    let mut mask = seed.clone();
    for threshold in (stop as u16 + 1..=60).rev() {
        let next = grow_step(&mask, &img, threshold).unwrap();
        if !mask.is_subset_of(&next) {
            rp.check(false, &format!("step at {} removed pixels", threshold));
        }
        mask = next;
    }
    rp.compare_masks(&result, &mask);

    // Observer areas never decrease
    let mut areas = Vec::new();
    grower
        .grow_with_observer(&img, |r| {
            areas.push(r.area);
            ControlFlow::Continue(())
        })
        .unwrap();
    rp.check(
        areas.windows(2).all(|w| w[0] <= w[1]),
        "areas are non-decreasing",
    );
    let last_area = areas.last().copied().unwrap_or(0);
    rp.compare_values(result.count() as f64, last_area as f64, 0.0);

    // Lowering the stop threshold never shrinks the result
    let mut previous = seed.clone();
    for stop in [45, 35, 25, 20, 10] {
        let m = RegionGrower::new(start, stop).grow(&img).unwrap();
        rp.check(previous.is_subset_of(&m), "lower stop gives a superset");
        previous = m;
    }

    // Re-running on the result is a fixed point
    let again = grow_from_seed(&img, result.clone(), stop).unwrap();
    rp.compare_masks(&result, &again);
    let again = grower.grow_from_seed(&img, result.clone()).unwrap();
    rp.compare_masks(&result, &again);

    // Every grown component holds a seed pixel
    let map = label_connected_components(&result, ConnectivityType::FourWay).unwrap();
    for label in 1..=map.num_labels() as u32 {
        let component = map.component_mask(label);
        rp.check(
            component.and(&seed).unwrap().any(),
            &format!("component {} reaches the seed", label),
        );
    }

    // Admitted pixels are seed pixels or at least stop + 1
    let outside_seed_low = result
        .iter_set()
        .filter(|&(x, y)| !seed.is_set(x, y))
        .any(|(x, y)| img.get_pixel(x, y).is_some_and(|v| i64::from(v) <= stop));
    rp.check(!outside_seed_low, "no admitted pixel at or below stop");

    assert!(rp.cleanup());
}

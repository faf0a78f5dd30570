//! Connected component regression test
//!
//! Labels thresholded noise and checks every component against a
//! breadth-first flood fill started from its first pixel.
//!
//! Run with:
//! ```
//! cargo test -p autoflood-region --test conncomp_reg
//! ```

use autoflood_core::{GrayImage, Mask, PixelDepth};
use autoflood_region::{ConnectivityType, find_connected_components, label_connected_components};
use autoflood_test::RegParams;
use autoflood_test::reference::flood_from;
use autoflood_test::synthetic::random_image;

fn mask_as_image(mask: &Mask) -> GrayImage {
    GrayImage::from_fn(mask.width(), mask.height(), PixelDepth::Bit8, |x, y| {
        u16::from(mask.is_set(x, y))
    })
    .unwrap()
}

#[test]
fn conncomp_reg() {
    let mut rp = RegParams::new("conncomp");

    for seed in [3u64, 17, 42] {
        let noise = random_image(80, 60, PixelDepth::Bit8, 99, seed).unwrap();
        let mask = noise.threshold_above(55);
        let as_image = mask_as_image(&mask);

        let map = label_connected_components(&mask, ConnectivityType::FourWay).unwrap();
        let comps = find_connected_components(&mask, ConnectivityType::FourWay).unwrap();
        eprintln!("seed {}: {} 4-connected components", seed, comps.len());

        rp.compare_values(map.num_labels() as f64, comps.len() as f64, 0.0);
        let total: u32 = comps.iter().map(|c| c.pixel_count).sum();
        rp.compare_values(mask.count() as f64, total as f64, 0.0);

        for cc in &comps {
            let component = map.component_mask(cc.label);
            let bounds = component.bounding_box();
            rp.check(bounds == Some(cc.bounds), "bounds match component pixels");

            // First pixel in raster order
            let Some((x, y)) = component.iter_set().next() else {
                rp.check(false, "component has pixels");
                continue;
            };
            let mut start = Mask::new(mask.width(), mask.height());
            start.set(x, y, true).unwrap();
            let filled = flood_from(&as_image, &start, 1).unwrap();
            rp.compare_masks(&filled, &component);
        }

        // Labels appear in raster order
        let mut next = 1u32;
        for &l in map.labels() {
            if l == next {
                next += 1;
            } else {
                rp.check(l < next, "labels first appear in increasing order");
            }
        }

        // 8-connectivity can only merge components
        let eight = find_connected_components(&mask, ConnectivityType::EightWay).unwrap();
        eprintln!("seed {}: {} 8-connected components", seed, eight.len());
        rp.check(eight.len() <= comps.len(), "8-cc count <= 4-cc count");
    }

    assert!(rp.cleanup());
}

//! Image source and mask sink regression test
//!
//! Run with:
//! ```
//! cargo test -p autoflood-io --test io_reg
//! ```

use autoflood_core::{Mask, PixelDepth};
use autoflood_io::tiff::{TiffCompression, tiff_page_count, write_tiff_multipage};
use autoflood_io::{ImageFormat, IoError, detect_format, read_channel, write_mask};
use autoflood_test::synthetic::{random_image, rings_image};
use autoflood_test::{RegParams, regout_dir};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};

#[test]
fn io_reg() {
    let mut rp = RegParams::new("io");
    let dir = regout_dir();
    fs::create_dir_all(&dir).unwrap();

    // Three channels with different depths
    let c0 = random_image(33, 21, PixelDepth::Bit16, 65535, 11).unwrap();
    let c1 = rings_image(21, &[250, 180, 90], 2).unwrap();
    let c2 = random_image(33, 21, PixelDepth::Bit8, 255, 12).unwrap();
    let path = format!("{}/io_channels.tif", dir);
    for compression in [TiffCompression::None, TiffCompression::Zip] {
        let file = BufWriter::new(File::create(&path).unwrap());
        write_tiff_multipage(&[&c0, &c1, &c2], file, compression).unwrap();

        rp.check(
            detect_format(&path).ok() == Some(ImageFormat::Tiff),
            "detected as TIFF",
        );
        let pages = tiff_page_count(BufReader::new(File::open(&path).unwrap())).unwrap();
        rp.compare_values(3.0, pages as f64, 0.0);

        for (index, expected) in [&c0, &c1, &c2].into_iter().enumerate() {
            let got = read_channel(&path, index).unwrap();
            rp.check(
                got.dimensions() == expected.dimensions(),
                "channel dimensions",
            );
            rp.check(got.depth() == expected.depth(), "channel depth");
            rp.check(got.data() == expected.data(), "channel samples");
        }

        let err = read_channel(&path, 3).unwrap_err();
        rp.check(
            matches!(err, IoError::ChannelOutOfRange { index: 3, available: 3 }),
            "channel 3 out of range",
        );
    }

    // Masks: 0 / 1 in both sinks, format from the extension
    let mask = Mask::from_fn(17, 9, |x, y| (x * y) % 5 == 1);
    for name in ["io_mask.tif", "io_mask.TIFF", "io_mask.png"] {
        let out = format!("{}/{}", dir, name);
        write_mask(&mask, &out).unwrap();
        let back = read_channel(&out, 0).unwrap();
        rp.compare_values(8.0, f64::from(back.depth().bits()), 0.0);
        let values_ok = back
            .data()
            .iter()
            .zip(mask.data())
            .all(|(&v, &m)| v == u16::from(m));
        rp.check(values_ok, "mask written as 0 / 1");
    }

    // PNG has a single channel
    let png = format!("{}/io_mask.png", dir);
    let err = read_channel(&png, 1).unwrap_err();
    rp.check(
        matches!(err, IoError::ChannelOutOfRange { index: 1, available: 1 }),
        "PNG channel 1 out of range",
    );

    // Unknown output extension
    let err = write_mask(&mask, format!("{}/io_mask.bmp", dir)).unwrap_err();
    rp.check(
        matches!(err, IoError::UnsupportedFormat(_)),
        "bmp sink rejected",
    );

    assert!(rp.cleanup());
}

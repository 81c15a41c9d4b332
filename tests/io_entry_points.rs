//! The file-path, encoded-bytes, and raw-buffer entry points must agree.
#![cfg(feature = "image-io")]

use nccmatch::{find_best, io, ImageView};
use rand::{Rng, SeedableRng};
use std::io::Cursor;

fn smooth_noise(width: usize, height: usize, seed: u64) -> Vec<u8> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut field: Vec<f32> = (0..width * height)
        .map(|_| f32::from(rng.random::<u8>()))
        .collect();
    for _ in 0..4 {
        let mut next = vec![0.0f32; field.len()];
        for y in 0..height {
            for x in 0..width {
                let mut acc = 0.0;
                for dy in -2i64..=2 {
                    for dx in -2i64..=2 {
                        let yi = (y as i64 + dy).clamp(0, height as i64 - 1) as usize;
                        let xi = (x as i64 + dx).clamp(0, width as i64 - 1) as usize;
                        acc += field[yi * width + xi];
                    }
                }
                next[y * width + x] = acc / 25.0;
            }
        }
        field = next;
    }
    field
        .into_iter()
        .map(|v| v.round().clamp(0.0, 255.0) as u8)
        .collect()
}

fn encode_png(data: &[u8], width: usize, height: usize) -> Vec<u8> {
    let img = image::GrayImage::from_raw(width as u32, height as u32, data.to_vec())
        .expect("buffer matches dimensions");
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("png encoding succeeds");
    bytes
}

#[test]
fn path_bytes_and_raw_buffers_agree() {
    let img_width = 200;
    let img_height = 120;
    let image_data = smooth_noise(img_width, img_height, 21);

    let (x0, y0) = (77, 41);
    let tpl_side = 24;
    let mut tpl_data = Vec::with_capacity(tpl_side * tpl_side);
    for y in 0..tpl_side {
        let row = (y0 + y) * img_width;
        tpl_data.extend_from_slice(&image_data[row + x0..row + x0 + tpl_side]);
    }

    // Raw buffers.
    let raw_src = ImageView::from_slice(&image_data, img_width, img_height).unwrap();
    let raw_tpl = ImageView::from_slice(&tpl_data, tpl_side, tpl_side).unwrap();
    let from_raw = find_best(raw_src, raw_tpl, 0.8).unwrap().unwrap();

    // Encoded bytes, decoded in memory.
    let src_png = encode_png(&image_data, img_width, img_height);
    let tpl_png = encode_png(&tpl_data, tpl_side, tpl_side);
    let src_decoded = io::decode_gray_image(&src_png).unwrap();
    let tpl_decoded = io::decode_gray_image(&tpl_png).unwrap();
    let from_bytes = find_best(src_decoded.view(), tpl_decoded.view(), 0.8)
        .unwrap()
        .unwrap();

    // Files on disk.
    let dir = tempfile::tempdir().unwrap();
    let src_path = dir.path().join("source.png");
    let tpl_path = dir.path().join("template.png");
    std::fs::write(&src_path, &src_png).unwrap();
    std::fs::write(&tpl_path, &tpl_png).unwrap();
    let src_loaded = io::load_gray_image(&src_path).unwrap();
    let tpl_loaded = io::load_gray_image(&tpl_path).unwrap();
    let from_path = find_best(src_loaded.view(), tpl_loaded.view(), 0.8)
        .unwrap()
        .unwrap();

    for found in [&from_bytes, &from_path] {
        assert_eq!((found.x, found.y), (from_raw.x, from_raw.y));
        assert!((found.confidence - from_raw.confidence).abs() < 1e-3);
    }
    assert_eq!((from_raw.x, from_raw.y), (x0 as u32, y0 as u32));
}

#[test]
fn image_size_reports_decoder_dimensions() {
    let data = smooth_noise(33, 17, 5);
    let png = encode_png(&data, 33, 17);
    assert_eq!(io::image_size_bytes(&png).unwrap(), (33, 17));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("size.png");
    std::fs::write(&path, &png).unwrap();
    assert_eq!(io::image_size(&path).unwrap(), (33, 17));
}

#[test]
fn undecodable_bytes_and_missing_files_fail() {
    assert!(io::decode_gray_image(b"not an image").is_err());
    assert!(io::load_gray_image("/nonexistent/missing.png").is_err());
    assert!(io::image_size("/nonexistent/missing.png").is_err());
}

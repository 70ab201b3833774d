use std::io::Cursor;

use super::*;

#[test]
fn decode_png_dimensions() {
    let img = image::RgbaImage::from_raw(2, 1, vec![100, 50, 200, 255, 0, 0, 0, 128]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let decoded = decode_image(&buf).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (2, 1));
}

#[test]
fn corrupt_image_is_an_asset_error() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, SocialError::Asset(_)));
}

#[test]
fn premultiply_scales_color_by_alpha() {
    let mut px = vec![100u8, 50, 200, 128, 9, 9, 9, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(
        px,
        vec![
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128,
            0,
            0,
            0,
            0
        ]
    );
}

#[test]
fn unpremultiply_inverts_premultiply_approximately() {
    let mut px = vec![200u8, 100, 40, 180];
    premultiply_rgba8_in_place(&mut px);
    let rgb = unpremultiply_rgb([px[0], px[1], px[2], px[3]]);
    for (got, want) in rgb.iter().zip([200u8, 100, 40]) {
        assert!(got.abs_diff(want) <= 1, "{rgb:?}");
    }
    assert_eq!(unpremultiply_rgb([1, 2, 3, 255]), [1, 2, 3]);
    assert_eq!(unpremultiply_rgb([0, 0, 0, 0]), [0, 0, 0]);
}

#[test]
fn decode_svg_parse_ok_and_err() {
    let ok = br#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"></svg>"#;
    parse_svg(ok).unwrap();

    let bad = br#"<svg"#;
    assert!(parse_svg(bad).is_err());
}

use super::*;

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> Surface {
    Surface::from_rgba(image::RgbaImage::from_pixel(w, h, image::Rgba(rgba)))
}

#[test]
fn over_half_alpha_blends() {
    // 50% white over opaque black.
    let dst = [0, 0, 0, 255];
    let src = [128, 128, 128, 128];
    assert_eq!(over(dst, src), [128, 128, 128, 255]);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn gradient_alpha_endpoints_and_midpoint() {
    assert_eq!(gradient_alpha(160, 0, 101), 160);
    assert_eq!(gradient_alpha(160, 100, 101), 0);
    assert_eq!(gradient_alpha(160, 50, 101), 80);
    assert_eq!(gradient_alpha(160, 0, 1), 160);
}

#[test]
fn gradient_darkens_top_and_leaves_bottom() {
    let mut s = solid(4, 11, [255, 255, 255, 255]);
    s.apply_vertical_gradient(160);
    let top = s.pixel(0, 0);
    let bottom = s.pixel(0, 10);
    assert_eq!(top, [95, 95, 95, 255]);
    assert_eq!(bottom, [255, 255, 255, 255]);
    for y in 1..11 {
        assert!(s.pixel(2, y)[0] >= s.pixel(2, y - 1)[0]);
    }
}

#[test]
fn patch_is_clipped_to_surface() {
    let mut s = solid(4, 4, [0, 0, 0, 255]);
    let patch = PremulPatch {
        width: 2,
        height: 2,
        data: vec![255; 16],
    };
    s.over_patch(&patch, 3, -1);
    assert_eq!(s.pixel(3, 0), [255, 255, 255, 255]);
    assert_eq!(s.pixel(2, 0), [0, 0, 0, 255]);
    assert_eq!(s.pixel(3, 1), [0, 0, 0, 255]);
}

#[test]
fn layer_size_mismatch_is_rejected() {
    let mut s = solid(2, 2, [0, 0, 0, 255]);
    assert!(s.over_layer(&[0; 4]).is_err());
    s.over_layer(&[0; 16]).unwrap();
    assert_eq!(s.pixel(1, 1), [0, 0, 0, 255]);
}

#[test]
fn into_rgb_keeps_dimensions() {
    let rgb = solid(3, 2, [10, 20, 30, 255]).into_rgb().unwrap();
    assert_eq!(rgb.dimensions(), (3, 2));
    assert_eq!(rgb.get_pixel(2, 1).0, [10, 20, 30]);
}

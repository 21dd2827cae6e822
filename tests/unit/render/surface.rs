use super::*;

fn checker(w: u32, h: u32) -> image::RgbaImage {
    image::RgbaImage::from_fn(w, h, |x, y| {
        if (x + y) % 2 == 0 {
            image::Rgba([200, 40, 90, 255])
        } else {
            image::Rgba([10, 220, 30, 255])
        }
    })
}

#[test]
fn opaque_images_roundtrip_exactly() {
    let src = checker(7, 5);
    let surface = OverlaySurface::from_image(&src).unwrap();
    assert_eq!(surface.size(), ImageSize::new(7, 5).unwrap());
    assert_eq!(surface.into_image().unwrap(), src);
}

#[test]
fn transparent_layer_is_a_no_op() {
    let src = checker(4, 4);
    let mut surface = OverlaySurface::from_image(&src).unwrap();
    let layer = layer_pixmap(surface.size()).unwrap();
    surface.composite(&layer).unwrap();
    assert_eq!(surface.into_image().unwrap(), src);
}

#[test]
fn mismatched_layer_is_rejected() {
    let mut surface = OverlaySurface::from_image(&checker(4, 4)).unwrap();
    let layer = layer_pixmap(ImageSize::new(5, 4).unwrap()).unwrap();
    let err = surface.composite(&layer).unwrap_err();
    assert!(err.to_string().contains("render error"));
}

#[test]
fn empty_image_is_rejected() {
    let empty = image::RgbaImage::new(0, 3);
    assert!(OverlaySurface::from_image(&empty).is_err());
}

#[test]
fn over_blends_half_alpha() {
    let mut dst = image::RgbaImage::from_raw(1, 1, vec![0u8, 0, 255, 255]).unwrap();
    straight_over_in_place(&mut dst, &[128, 0, 0, 128]).unwrap();
    assert_eq!(dst.get_pixel(0, 0).0, [128, 0, 127, 255]);
}

#[test]
fn over_rejects_mismatched_layer() {
    let mut dst = image::RgbaImage::new(2, 1);
    assert!(straight_over_in_place(&mut dst, &[0u8; 4]).is_err());
}

#[test]
fn translucent_pixels_outside_the_layer_keep_their_bytes() {
    let src = image::RgbaImage::from_pixel(6, 4, image::Rgba([3, 100, 201, 1]));
    let mut surface = OverlaySurface::from_image(&src).unwrap();
    let mut layer = layer_pixmap(surface.size()).unwrap();
    layer.data_as_u8_slice_mut()[..4].copy_from_slice(&[200, 0, 0, 200]);
    surface.composite(&layer).unwrap();

    let out = surface.into_image().unwrap();
    assert_ne!(out.get_pixel(0, 0), src.get_pixel(0, 0));
    for (x, y, px) in out.enumerate_pixels() {
        if (x, y) != (0, 0) {
            assert_eq!(px.0, [3, 100, 201, 1], "({x}, {y})");
        }
    }
}

#[test]
fn premultiply_then_unpremultiply_keeps_zero_alpha_black() {
    let mut px = vec![50u8, 60, 70, 0, 255, 255, 255, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[0, 0, 0, 0]);
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![0, 0, 0, 0, 255, 255, 255, 255]);
}

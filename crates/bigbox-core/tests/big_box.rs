//! End-to-end CPU path: face set -> atlas -> mesh -> interaction -> shadow

use bigbox_core::{
    AtlasBitmap, CuboidMesh, Face, FaceImage, FaceSet, GestureRecognizer, InteractionController,
    PointerEvent, ShadingParameters, project_shadow,
};
use glam::{Mat4, Vec2, Vec3};

fn encoded_png(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn decode(w: u32, h: u32, rgba: [u8; 4]) -> FaceImage {
    FaceImage::decode(&encoded_png(w, h, rgba)).unwrap()
}

#[test]
fn equatorial_box_renders_with_limited_pitch() {
    let set = FaceSet::Equatorial {
        front: decode(70, 90, [255, 0, 0, 255]),
        back: decode(70, 90, [0, 255, 0, 255]),
        left: decode(20, 90, [0, 0, 255, 255]),
        right: decode(20, 90, [255, 255, 0, 255]),
    };
    let atlas = AtlasBitmap::from_face_set(set, false).unwrap();
    assert!(!atlas.supports_full_x_rotation());

    let extents = atlas.extents();
    let mesh = CuboidMesh::new(&extents, atlas.layout());
    assert_eq!(mesh.vertices.len(), 24);

    // Front texels sampled at the region center are red
    let r = atlas.region(Face::Front);
    let cx = ((r.u0 + r.u1) * 0.5 * atlas.width() as f32) as u32;
    let cy = ((r.v0 + r.v1) * 0.5 * atlas.height() as f32) as u32;
    assert_eq!(atlas.image().get_pixel(cx, cy).0, [255, 0, 0, 255]);

    let mut controller = InteractionController::new(atlas.supports_full_x_rotation());
    let mut recognizer = GestureRecognizer::new();
    let sender = controller.sender();
    for event in [
        PointerEvent::Down { x: 0.0, y: 0.0 },
        PointerEvent::Move { x: 0.0, y: 500.0 },
        PointerEvent::Up,
    ] {
        for gesture in recognizer.feed(event).gestures {
            sender.send(gesture);
        }
    }
    assert_eq!(controller.apply_pending(), 2);
    assert_eq!(controller.state().angle_x, 7.0);
    assert!(!controller.gesture_active());
}

#[test]
fn shadow_follows_rotated_box() {
    let set = FaceSet::Full {
        front: decode(8, 8, [1, 1, 1, 255]),
        back: decode(8, 8, [1, 1, 1, 255]),
        top: decode(8, 8, [1, 1, 1, 255]),
        bottom: decode(8, 8, [1, 1, 1, 255]),
        left: decode(8, 8, [1, 1, 1, 255]),
        right: decode(8, 8, [1, 1, 1, 255]),
    };
    let atlas = AtlasBitmap::from_face_set(set, true).unwrap();
    let params = ShadingParameters::default().with_shadow_offset(0.0, -0.1);

    let proj = Mat4::perspective_rh(35f32.to_radians(), 1.0, 0.1, 100.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 8.0), Vec3::ZERO, Vec3::Y);
    let ellipse = project_shadow(
        proj * view,
        20.0,
        30.0,
        &atlas.extents(),
        Vec2::new(params.shadow_offset_x, params.shadow_offset_y),
    )
    .unwrap();

    assert!(ellipse.center.y < 0.0);
    assert!(ellipse.scale.x > 0.0 && ellipse.scale.y > 0.0);
    // Rotated cube shows more than one face, so its footprint is wider
    // than the head-on square
    let head_on = project_shadow(proj * view, 0.0, 0.0, &atlas.extents(), Vec2::ZERO).unwrap();
    assert!(ellipse.scale.x > head_on.scale.x);
}

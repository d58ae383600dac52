use super::*;
use crate::capture::recorder::SharedCapture;
use crate::render::sprite::SpriteTinter;
use std::sync::{Arc, Mutex};

fn renderer_with(max_dim: u32) -> FrameRenderer {
    FrameRenderer::new(SpriteTinter::radial(5, 30), RenderOpts { max_canvas_dim: max_dim })
}

fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let idx = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[idx],
        frame.data[idx + 1],
        frame.data[idx + 2],
        frame.data[idx + 3],
    ]
}

struct TagObserver {
    tag: &'static str,
    log: Arc<Mutex<Vec<&'static str>>>,
}

impl FrameObserver for TagObserver {
    fn on_frame(&mut self, _frame: &FrameRGBA, _now_ms: u64) {
        self.log.lock().unwrap().push(self.tag);
    }
}

#[test]
fn tick_is_a_noop_without_layout_or_colors() {
    let capture = SharedCapture::new();
    capture.arm();

    let mut renderer = renderer_with(100);
    renderer.add_observer(Box::new(capture.clone()));
    renderer.render_tick(0).unwrap();
    assert_eq!(capture.frame_count(), 0);

    renderer.set_colors(vec![Rgb8::black()]);
    renderer.render_tick(1).unwrap();
    assert_eq!(capture.frame_count(), 0);
}

#[test]
fn empty_layout_disables_rendering() {
    let capture = SharedCapture::new();
    capture.arm();

    let mut renderer = renderer_with(100);
    renderer
        .set_layout(vec![Point::new(0.0, 0.0), Point::new(4.0, 4.0)])
        .unwrap();
    renderer.set_colors(vec![Rgb8::black(), Rgb8::black()]);
    renderer.add_observer(Box::new(capture.clone()));

    renderer.set_layout(Vec::new()).unwrap();
    assert!(renderer.viewport().is_none());
    renderer.render_tick(0).unwrap();
    assert_eq!(capture.frame_count(), 0);
}

#[test]
fn background_is_refilled_every_tick() {
    let capture = SharedCapture::new();
    capture.arm();

    let mut renderer = renderer_with(105);
    renderer
        .set_layout(vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)])
        .unwrap();
    renderer.add_observer(Box::new(capture.clone()));

    renderer.set_colors(vec![Rgb8::new(255, 255, 255), Rgb8::new(255, 255, 255)]);
    renderer.render_tick(0).unwrap();

    // Dimmer colors on the next tick must fully replace the bright frame.
    renderer.set_colors(vec![Rgb8::black(), Rgb8::black()]);
    renderer.render_tick(1).unwrap();

    let frames = capture.take_frames();
    let bright = pixel(&frames[0].image, 2, 102);
    let dim = pixel(&frames[1].image, 2, 102);
    assert_eq!(bright, [255, 255, 255, 255]);
    assert_eq!(dim, [30, 30, 30, 255]);
}

#[test]
fn overlapping_sprites_combine_additively() {
    let capture = SharedCapture::new();
    capture.arm();

    // Two coincident lights, one red and one green, plus a far point for span.
    let mut renderer = renderer_with(105);
    renderer
        .set_layout(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
        ])
        .unwrap();
    renderer.set_colors(vec![
        Rgb8::new(255, 0, 0),
        Rgb8::new(0, 255, 0),
        Rgb8::black(),
    ]);
    renderer.add_observer(Box::new(capture.clone()));
    renderer.render_tick(0).unwrap();

    let frames = capture.take_frames();
    // Sprite top-left lands at (0, 100); its center is 2 pixels in.
    let px = pixel(&frames[0].image, 2, 102);
    assert_eq!(px, [255, 255, 30, 255]);
}

#[test]
fn light_count_clamps_to_the_shorter_sequence() {
    let capture = SharedCapture::new();
    capture.arm();

    let mut renderer = renderer_with(105);
    renderer
        .set_layout(vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)])
        .unwrap();
    renderer.add_observer(Box::new(capture.clone()));

    // More colors than lights, then fewer: neither panics.
    renderer.set_colors(vec![Rgb8::black(); 9]);
    renderer.render_tick(0).unwrap();
    renderer.set_colors(vec![Rgb8::new(255, 255, 255)]);
    renderer.render_tick(1).unwrap();

    let frames = capture.take_frames();
    assert_eq!(frames.len(), 2);
    // The second light had no color on the short frame: background stays black.
    let unlit = pixel(&frames[1].image, 102, 2);
    assert_eq!(unlit, [0, 0, 0, 255]);
}

#[test]
fn observers_run_in_registration_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut renderer = renderer_with(105);
    renderer
        .set_layout(vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)])
        .unwrap();
    renderer.set_colors(vec![Rgb8::black(), Rgb8::black()]);
    renderer.add_observer(Box::new(TagObserver {
        tag: "first",
        log: log.clone(),
    }));
    renderer.add_observer(Box::new(TagObserver {
        tag: "second",
        log: log.clone(),
    }));

    renderer.render_tick(0).unwrap();
    renderer.render_tick(1).unwrap();
    assert_eq!(
        *log.lock().unwrap(),
        vec!["first", "second", "first", "second"]
    );
}

#[test]
fn layout_replacement_refits_the_viewport() {
    let mut renderer = renderer_with(105);
    renderer
        .set_layout(vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)])
        .unwrap();
    let before = *renderer.viewport().unwrap();

    renderer
        .set_layout(vec![Point::new(0.0, 0.0), Point::new(20.0, 20.0)])
        .unwrap();
    let after = *renderer.viewport().unwrap();
    assert_ne!(before.scale, after.scale);
}

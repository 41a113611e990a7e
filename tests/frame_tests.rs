//! Integration tests for FrameBuffer driven by the scheduler

mod common;
use common::*;

use pov_display::{ColumnScheduler, DisplayConfig, FrameBuffer, RotationSync, draw_line};

fn config() -> DisplayConfig {
    DisplayConfig::builder().columns(4).build().unwrap()
}

#[test]
fn presented_frame_appears_at_the_next_revolution() {
    let log = new_log();
    let sync = RotationSync::new();
    let timer = MockTimeSource::new();
    let mut scheduler = ColumnScheduler::new(config(), MockChain::new(&log), &sync, &timer);

    let mut frame = FrameBuffer::<4, 1>::new();
    let (mut canvas, mut reader) = frame.split();

    draw_line(canvas.draw().unwrap(), 0, 0, 3, 0);
    canvas.present();

    scheduler.service(&mut reader);
    scheduler.service(&mut reader);

    draw_line(canvas.draw().unwrap(), 0, 1, 3, 1);
    canvas.present();

    scheduler.service(&mut reader);
    scheduler.service(&mut reader);
    assert!(canvas.is_presenting());

    scheduler.service(&mut reader);
    assert!(!canvas.is_presenting());

    assert_eq!(
        bytes_per_cycle(&log),
        vec![vec![0x01], vec![0x01], vec![0x01], vec![0x01], vec![0x02]]
    );
}

#[test]
fn resync_swaps_in_presented_frame() {
    let log = new_log();
    let sync = RotationSync::new();
    let timer = MockTimeSource::new();
    let mut scheduler = ColumnScheduler::new(config(), MockChain::new(&log), &sync, &timer);

    let mut frame = FrameBuffer::<4, 1>::new();
    let (mut canvas, mut reader) = frame.split();

    scheduler.service(&mut reader);

    canvas.draw().unwrap().fill();
    canvas.present();

    scheduler.service(&mut reader);
    sync.trigger();
    scheduler.service(&mut reader);
    scheduler.service(&mut reader);

    assert_eq!(
        bytes_per_cycle(&log),
        vec![vec![0x00], vec![0x00], vec![0xFF], vec![0xFF]]
    );
}

#[test]
fn canvas_alternates_between_buffers() {
    let mut frame = FrameBuffer::<4, 1>::new();
    let (mut canvas, mut reader) = frame.split();

    let first = canvas.draw().unwrap();
    first.clear();
    first.set_pixel(0, 0);
    canvas.present();
    reader.flip();

    // The other buffer is handed out next, untouched by the first frame.
    let second = canvas.draw().unwrap();
    assert!(!second.pixel(0, 0));
    second.set_pixel(1, 1);

    // Not presented yet: the reader keeps showing the first frame.
    assert!(!reader.flip());
    assert_eq!(set_pixels(reader.front()), vec![(0, 0)]);
}

//! Integration tests for RasterBuffer

mod common;
use common::*;

use pov_display::{ColumnSource, RasterBuffer};

#[test]
fn set_pixel_sets_exactly_one_bit_of_its_column() {
    for x in 0..6i16 {
        for y in 0..24i16 {
            let mut buffer = RasterBuffer::<6, 3>::new();
            buffer.set_pixel(x, y);

            for col in 0..6u16 {
                let bytes = buffer.column(col).unwrap();
                for (index, &byte) in bytes.iter().enumerate() {
                    let expected = if col == x as u16 && index == y as usize / 8 {
                        1u8 << (y % 8)
                    } else {
                        0
                    };
                    assert_eq!(byte, expected, "pixel ({}, {})", x, y);
                }
            }
        }
    }
}

#[test]
fn set_pixel_leaves_other_bits_alone() {
    let mut buffer = RasterBuffer::<4, 2>::new();
    buffer.set_pixel(2, 0);
    buffer.set_pixel(2, 9);
    buffer.set_pixel(2, 9);

    assert_eq!(buffer.column(2), Some(&[0b0000_0001, 0b0000_0010]));
    assert_eq!(set_pixels(&buffer), vec![(2, 0), (2, 9)]);
}

#[test]
fn clear_zeroes_every_column() {
    let mut buffer = RasterBuffer::<80, 8>::new();
    buffer.fill();
    buffer.clear();

    for x in 0..80 {
        assert_eq!(buffer.column(x), Some(&[0u8; 8]));
    }
}

#[test]
fn out_of_range_writes_do_not_touch_neighbours() {
    let mut buffer = RasterBuffer::<4, 1>::new();
    buffer.set_pixel(-1, 0);
    buffer.set_pixel(4, 0);
    buffer.set_pixel(0, -1);
    buffer.set_pixel(0, 8);
    buffer.set_pixel(i16::MIN, i16::MAX);

    assert!(set_pixels(&buffer).is_empty());
    assert_eq!(buffer.column(4), None);
}

#[test]
fn render_shifts_column_bytes_in_order() {
    let log = new_log();
    let mut chain = MockChain::new(&log);
    let mut buffer = RasterBuffer::<4, 2>::new();
    buffer.set_pixel(1, 0);
    buffer.set_pixel(1, 15);

    buffer.render(1, &mut chain);

    assert_eq!(
        log.borrow().as_slice(),
        &[Event::Byte(0x01), Event::Byte(0x80)]
    );
}

#[test]
fn render_of_missing_column_still_shifts_a_full_column() {
    let log = new_log();
    let mut chain = MockChain::new(&log);
    let mut buffer = RasterBuffer::<4, 3>::new();
    buffer.fill();

    buffer.render(7, &mut chain);

    assert_eq!(
        log.borrow().as_slice(),
        &[Event::Byte(0), Event::Byte(0), Event::Byte(0)]
    );
}

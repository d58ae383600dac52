pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Remap a channel onto `[floor, 255]` so an all-zero input stays visible.
pub(crate) fn remap_channel(c: u8, floor: u8) -> u8 {
    let span = u16::from(255 - floor);
    floor + mul_div255_u8(span, u16::from(c))
}

/// Additive "lighten" blend: per-channel maximum of source and destination.
pub(crate) fn lighten(dst: u8, src: u8) -> u8 {
    dst.max(src)
}

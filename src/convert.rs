// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Software pixel format conversions.
//!
//! Camera frames arrive as 4:2:0 semi-planar YUV and are expanded to packed
//! 3-channel colour with the ITU-R BT.601 video range matrix. Colour frames
//! reduce to luma with BT.601 weights in 14-bit fixed point, matching what
//! mobile vision stacks produce for the same input.

use crate::{
    error::{Error, Result},
    image::{is_yuv420, FrameView, FourCC, PixelBuffer, BGR3, GREY, NV21, RGB3},
};
use image::{GrayImage, RgbImage};

const ITUR_BT_601_CY: i32 = 1_220_542;
const ITUR_BT_601_CUB: i32 = 2_116_026;
const ITUR_BT_601_CUG: i32 = -409_993;
const ITUR_BT_601_CVG: i32 = -852_492;
const ITUR_BT_601_CVR: i32 = 1_673_527;
const ITUR_BT_601_SHIFT: i32 = 20;

const LUMA_SHIFT: u32 = 14;
const R2Y: u32 = 4899;
const G2Y: u32 = 9617;
const B2Y: u32 = 1868;

#[inline]
fn yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let y = (i32::from(y) - 16).max(0) * ITUR_BT_601_CY;
    let u = i32::from(u) - 128;
    let v = i32::from(v) - 128;
    let round = 1 << (ITUR_BT_601_SHIFT - 1);

    let r = (y + ITUR_BT_601_CVR * v + round) >> ITUR_BT_601_SHIFT;
    let g = (y + ITUR_BT_601_CVG * v + ITUR_BT_601_CUG * u + round) >> ITUR_BT_601_SHIFT;
    let b = (y + ITUR_BT_601_CUB * u + round) >> ITUR_BT_601_SHIFT;
    [saturate(r), saturate(g), saturate(b)]
}

#[inline]
fn saturate(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let sum = u32::from(r) * R2Y + u32::from(g) * G2Y + u32::from(b) * B2Y;
    ((sum + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

/// Red and blue byte offsets within a packed 3-channel pixel.
fn rb_offsets(format: FourCC) -> Result<(usize, usize)> {
    match format {
        BGR3 => Ok((2, 0)),
        RGB3 => Ok((0, 2)),
        _ => Err(Error::ConversionFailed(format!(
            "{format} is not a 3-channel colour format"
        ))),
    }
}

/// Expands a 4:2:0 semi-planar frame (NV21 or NV12) into packed colour.
///
/// `dst` selects the channel order of the output, `BGR3` or `RGB3`.
///
/// # Errors
///
/// Returns `ConversionFailed` if the source is not 4:2:0, has an odd width
/// or height, or `dst` is not a 3-channel colour format.
pub fn yuv420_to_color(src: &FrameView, dst: FourCC) -> Result<PixelBuffer> {
    if !is_yuv420(src.format()) {
        return Err(Error::ConversionFailed(format!(
            "expected a 4:2:0 source, got {}",
            src.format()
        )));
    }
    let (r_idx, b_idx) = rb_offsets(dst)?;
    let mut out = PixelBuffer::new(src.width(), src.height(), dst)?;
    if src.is_empty() {
        return Ok(out);
    }
    if src.width() % 2 != 0 || src.height() % 2 != 0 {
        return Err(Error::ConversionFailed(format!(
            "odd dimensions {}x{} for {}",
            src.width(),
            src.height(),
            src.format()
        )));
    }

    let w = src.width() as usize;
    let h = src.height() as usize;
    let (u_off, v_off) = if src.format() == NV21 { (1, 0) } else { (0, 1) };
    let (luma_plane, chroma_plane) = src.as_slice().split_at(w * h);

    for (y, out_row) in out.as_slice_mut().chunks_exact_mut(w * 3).enumerate() {
        let luma_row = &luma_plane[y * w..(y + 1) * w];
        let chroma_row = &chroma_plane[(y / 2) * w..(y / 2 + 1) * w];
        for (x, (px, &l)) in out_row.chunks_exact_mut(3).zip(luma_row).enumerate() {
            let c = (x / 2) * 2;
            let [r, g, b] = yuv_to_rgb(l, chroma_row[c + u_off], chroma_row[c + v_off]);
            px[r_idx] = r;
            px[1] = g;
            px[b_idx] = b;
        }
    }

    Ok(out)
}

/// Reduces a frame to single-channel luma.
///
/// Colour frames are weighted per BT.601, `GREY` is copied and the 4:2:0
/// formats contribute their luma plane unchanged.
pub fn to_luma(src: &FrameView) -> Result<GrayImage> {
    let w = src.width() as usize;
    let h = src.height() as usize;
    let data = match src.format() {
        GREY => src.as_slice().to_vec(),
        f if is_yuv420(f) => src.as_slice()[..w * h].to_vec(),
        f => {
            let (r_idx, b_idx) = rb_offsets(f)?;
            src.as_slice()
                .chunks_exact(3)
                .map(|px| luma(px[r_idx], px[1], px[b_idx]))
                .collect()
        }
    };
    GrayImage::from_raw(src.width(), src.height(), data).ok_or_else(|| {
        Error::ConversionFailed(format!(
            "luma plane does not fit {}x{}",
            src.width(),
            src.height()
        ))
    })
}

/// Replicates a luma image into every channel of a 3-channel frame.
pub fn luma_to_color(gray: &GrayImage, dst: FourCC) -> Result<PixelBuffer> {
    rb_offsets(dst)?;
    let data = gray.as_raw().iter().flat_map(|&v| [v, v, v]).collect();
    PixelBuffer::from_vec(gray.width(), gray.height(), dst, data)
}

/// Converts any supported frame into an `RgbImage` for encoding to disk.
pub fn to_rgb_image(src: &FrameView) -> Result<RgbImage> {
    let rgb = match src.format() {
        RGB3 => src.to_buffer(),
        BGR3 => {
            let mut buf = src.to_buffer();
            buf.as_slice_mut().chunks_exact_mut(3).for_each(|px| px.swap(0, 2));
            buf
        }
        GREY => luma_to_color(&to_luma(src)?, RGB3)?,
        f if is_yuv420(f) => yuv420_to_color(src, RGB3)?,
        f => {
            return Err(Error::ConversionFailed(format!(
                "unsupported pixel format {f}"
            )))
        }
    };
    let (width, height) = (rgb.width(), rgb.height());
    RgbImage::from_raw(width, height, rgb.into_vec())
        .ok_or_else(|| Error::ConversionFailed(format!("cannot build {width}x{height} image")))
}

/// Wraps a decoded RGB image as an `RGB3` frame.
pub fn from_rgb_image(img: RgbImage) -> Result<PixelBuffer> {
    let (width, height) = img.dimensions();
    PixelBuffer::from_vec(width, height, RGB3, img.into_raw())
}

use std::io;

use crate::error::Error;
use crate::pixel::PixelDiff;
use crate::stream::Input;

// An enumeration of each possible QOI encoding "chunk", or Op. Field values
// are exactly what is stored on the wire (biases applied), except `Run`
// which holds the actual run length.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Op {
  // `QOI_OP_INDEX`, index into the color cache.
  //
  // | 7 6   5  4  3  2  1  0 |
  // |------------------------|
  // | 0 0 |      index       |
  //
  Index(u8),

  // `QOI_OP_DIFF`, contains the red, green, and blue color difference from the
  // previous pixel with a bias of +2.
  //
  // | 7 6   5  4  3  2  1  0 |
  // |------------------------|
  // | 0 1 |  dr |  dg |  db  |
  //
  Diff(u8, u8, u8),

  // `QOI_OP_LUMA`, the green difference from the previous pixel with a bias
  // of +32, and the red and blue differences relative to it with a bias of +8.
  //
  // | 7 6   5  4  3  2  1  0 | 7  6  5  4   3  2  1  0 |
  // |------------------------|-------------------------|
  // | 1 0 |       dg         |   dr - dg  |   db - dg  |
  //
  Luma(u8, u8, u8),

  // `QOI_OP_RUN`, repeats the previous pixel 1 to 62 times. Stored with a
  // bias of -1; lengths 63 and 64 would collide with the RGB and RGBA tags.
  //
  // | 7 6   5  4  3  2  1  0 |
  // |------------------------|
  // | 1 1 |      run         |
  //
  Run(u8),

  // `QOI_OP_RGB`, contains the red, green, and blue values of a pixel.
  //
  // | 7  6  5  4  3  2  1  0 | 7..0 | 7..0 | 7..0 |
  // |------------------------|------|------|------|
  // | 1  1  1  1  1  1  1  0 |   r  |   g  |   b  |
  //
  Rgb(u8, u8, u8),

  // `QOI_OP_RGBA`, contains the red, green, blue, and alpha values of a pixel.
  //
  // | 7  6  5  4  3  2  1  0 | 7..0 | 7..0 | 7..0 | 7..0 |
  // |------------------------|------|------|------|------|
  // | 1  1  1  1  1  1  1  1 |   r  |   g  |   b  |   a  |
  //
  Rgba(u8, u8, u8, u8),
}

impl From<PixelDiff> for Op {
  fn from(diff: PixelDiff) -> Self {
    match diff {
      PixelDiff::Small(diff_r, diff_g, diff_b) => Op::Diff(diff_r, diff_g, diff_b),
      PixelDiff::Luma(luma_g, luma_rg, luma_bg) => Op::Luma(luma_g, luma_rg, luma_bg),
    }
  }
}

impl Op {
  const MASK_2: u8 = 0x03;
  const MASK_4: u8 = 0x0f;
  const MASK_6: u8 = 0x3f;
  const MASK_TAG: u8 = 0xc0;

  const TAG_INDEX: u8 = 0x00;
  const TAG_DIFF: u8 = 0x40;
  const TAG_LUMA: u8 = 0x80;
  const TAG_RUN: u8 = 0xc0;
  const TAG_RGB: u8 = 0xfe;
  const TAG_RGBA: u8 = 0xff;

  // Encodes the `Op` and writes it as bytes into the given writer.
  #[inline]
  pub fn write_to<W: io::Write>(self, writer: &mut W) -> Result<(), io::Error> {
    match self {
      Op::Index(index) => writer.write_all(&[Op::TAG_INDEX | index]),
      Op::Diff(diff_r, diff_g, diff_b) => {
        writer.write_all(&[Op::TAG_DIFF | diff_r << 4 | diff_g << 2 | diff_b])
      }
      Op::Luma(luma_g, luma_rg, luma_bg) => {
        writer.write_all(&[Op::TAG_LUMA | luma_g, luma_rg << 4 | luma_bg])
      }
      Op::Run(run_length) => writer.write_all(&[Op::TAG_RUN | (run_length - 1)]),
      Op::Rgb(r, g, b) => writer.write_all(&[Op::TAG_RGB, r, g, b]),
      Op::Rgba(r, g, b, a) => writer.write_all(&[Op::TAG_RGBA, r, g, b, a]),
    }
  }

  // Reads one `Op` from the input. The two literal tags are checked before
  // the 2-bit tags, since they are also valid run bit patterns.
  #[inline]
  pub fn read_from<R: io::Read>(input: &mut Input<R>) -> Result<Self, Error> {
    let byte = input.read_u8()?;

    if byte == Op::TAG_RGB {
      let [r, g, b] = input.read_array()?;
      return Ok(Op::Rgb(r, g, b));
    }

    if byte == Op::TAG_RGBA {
      let [r, g, b, a] = input.read_array()?;
      return Ok(Op::Rgba(r, g, b, a));
    }

    let op = match byte & Op::MASK_TAG {
      Op::TAG_INDEX => Op::Index(byte & Op::MASK_6),
      Op::TAG_DIFF => Op::Diff(
        byte >> 4 & Op::MASK_2,
        byte >> 2 & Op::MASK_2,
        byte & Op::MASK_2,
      ),
      Op::TAG_LUMA => {
        let next_byte = input.read_u8()?;
        Op::Luma(byte & Op::MASK_6, next_byte >> 4, next_byte & Op::MASK_4)
      }
      _ => Op::Run((byte & Op::MASK_6) + 1),
    };

    Ok(op)
  }
}

// The two delta encodings a pixel may have relative to its predecessor, with
// biases already applied so each field is the unsigned value that goes on the
// wire.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PixelDiff {
  // `QOI_OP_DIFF` fields, each `delta + 2` in `0..=3`.
  Small(u8, u8, u8),
  // `QOI_OP_LUMA` fields: `dg + 32` in `0..=63`, `dr - dg + 8` and
  // `db - dg + 8` in `0..=15`.
  Luma(u8, u8, u8),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pixel {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}

impl Default for Pixel {
  // The implicit predecessor of the first pixel in every image.
  fn default() -> Self {
    Self { r: 0, g: 0, b: 0, a: 255 }
  }
}

impl Pixel {
  // Value of every cache slot before anything is written to it.
  pub const ZERO: Pixel = Pixel { r: 0, g: 0, b: 0, a: 0 };

  pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }

  // Reads one pixel from an `N` channel slice. Three channel pixels are
  // opaque.
  #[inline]
  pub fn read<const N: usize>(bytes: &[u8]) -> Self {
    Self {
      r: bytes[0],
      g: bytes[1],
      b: bytes[2],
      a: if N == 4 { bytes[3] } else { 255 },
    }
  }

  // Appends the first `N` channels of this pixel to `out`.
  #[inline]
  pub fn write<const N: usize>(&self, out: &mut Vec<u8>) {
    let rgba = [self.r, self.g, self.b, self.a];
    out.extend_from_slice(&rgba[..N]);
  }

  // Classifies this pixel against `prev`. Returns `None` if the alpha differs
  // or the color deltas fit neither delta encoding. The small encoding is
  // preferred whenever both fit.
  pub fn diff(&self, prev: &Pixel) -> Option<PixelDiff> {
    if self.a != prev.a {
      return None;
    }

    let diff_r = self.r.wrapping_sub(prev.r);
    let diff_g = self.g.wrapping_sub(prev.g);
    let diff_b = self.b.wrapping_sub(prev.b);

    let small_r = diff_r.wrapping_add(2);
    let small_g = diff_g.wrapping_add(2);
    let small_b = diff_b.wrapping_add(2);

    if small_r <= 3 && small_g <= 3 && small_b <= 3 {
      return Some(PixelDiff::Small(small_r, small_g, small_b));
    }

    let luma_g = diff_g.wrapping_add(32);
    if luma_g > 63 {
      return None;
    }

    let luma_rg = diff_r.wrapping_sub(diff_g).wrapping_add(8);
    let luma_bg = diff_b.wrapping_sub(diff_g).wrapping_add(8);

    if luma_rg <= 15 && luma_bg <= 15 {
      return Some(PixelDiff::Luma(luma_g, luma_rg, luma_bg));
    }

    None
  }

  // Applies `diff` to `prev`. Channel arithmetic wraps modulo 256.
  pub fn from_diff(diff: PixelDiff, prev: &Pixel) -> Self {
    match diff {
      PixelDiff::Small(diff_r, diff_g, diff_b) => Self {
        r: prev.r.wrapping_add(diff_r).wrapping_sub(2),
        g: prev.g.wrapping_add(diff_g).wrapping_sub(2),
        b: prev.b.wrapping_add(diff_b).wrapping_sub(2),
        a: prev.a,
      },
      PixelDiff::Luma(luma_g, luma_rg, luma_bg) => {
        let diff_g = luma_g.wrapping_sub(32);
        let diff_r = luma_rg.wrapping_sub(8).wrapping_add(diff_g);
        let diff_b = luma_bg.wrapping_sub(8).wrapping_add(diff_g);

        Self {
          r: prev.r.wrapping_add(diff_r),
          g: prev.g.wrapping_add(diff_g),
          b: prev.b.wrapping_add(diff_b),
          a: prev.a,
        }
      }
    }
  }
}

use std::io::{self, Write};

use log::{debug, trace};

use crate::cache::ColorCache;
use crate::error::Error;
use crate::image::Image;
use crate::meta::{QOI_BYTES_END, QOI_HEADER_LEN, QOI_MAX_RUN};
use crate::op::Op;
use crate::pixel::Pixel;
use crate::stream;

/// Encodes `image` as QOI and writes it to `writer`.
///
/// Output is buffered internally and flushed once the end marker has been
/// written, so `writer` does not need to be buffered. Encoding is
/// deterministic: the same image always produces the same bytes.
pub fn encode_image<W: io::Write>(image: &Image, writer: W) -> Result<(), Error> {
  debug!(
    "encoding {}x{} image, {} channels, {:?}",
    image.width(),
    image.height(),
    image.channels(),
    image.colorspace()
  );

  let mut writer = stream::output(writer);
  writer.write_all(&image.meta().to_bytes())?;

  match image.channels() {
    3 => encode_pixels::<_, 3>(image.pixels(), &mut writer)?,
    _ => encode_pixels::<_, 4>(image.pixels(), &mut writer)?,
  }

  writer.write_all(&QOI_BYTES_END)?;
  writer.flush()?;
  trace!("end marker written");

  Ok(())
}

/// Encodes `image` into a newly allocated `Vec`.
pub fn encode_to_vec(image: &Image) -> Result<Vec<u8>, Error> {
  let capacity = QOI_HEADER_LEN + image.pixels().len() / 2 + QOI_BYTES_END.len();
  let mut dest = Vec::with_capacity(capacity);
  encode_image(image, &mut dest)?;
  Ok(dest)
}

// Tracks the previous pixel, the pending run and the color cache across one
// image's pixels.
struct State {
  cache: ColorCache,
  prev: Pixel,
  run_length: u8,
}

impl State {
  fn new() -> Self {
    Self { cache: ColorCache::new(), prev: Pixel::default(), run_length: 0 }
  }

  // Chooses and writes the op for `pixel`, then makes it the previous pixel.
  #[inline]
  fn encode_pixel<W: io::Write>(&mut self, pixel: Pixel, writer: &mut W) -> Result<(), io::Error> {
    if pixel == self.prev {
      self.run_length += 1;

      if self.run_length == QOI_MAX_RUN {
        self.flush_run(writer)?;
      }

      return Ok(());
    }

    self.flush_run(writer)?;

    let op = match self.cache.match_or_replace(pixel) {
      Some(index) => Op::Index(index),
      None => match pixel.diff(&self.prev) {
        Some(diff) => Op::from(diff),
        None if pixel.a == self.prev.a => Op::Rgb(pixel.r, pixel.g, pixel.b),
        None => Op::Rgba(pixel.r, pixel.g, pixel.b, pixel.a),
      },
    };

    self.prev = pixel;
    op.write_to(writer)
  }

  #[inline]
  fn flush_run<W: io::Write>(&mut self, writer: &mut W) -> Result<(), io::Error> {
    if self.run_length > 0 {
      Op::Run(self.run_length).write_to(writer)?;
      self.run_length = 0;
    }

    Ok(())
  }
}

fn encode_pixels<W: io::Write, const N: usize>(
  pixels: &[u8],
  writer: &mut W,
) -> Result<(), io::Error> {
  let mut state = State::new();

  for chunk in pixels.chunks_exact(N) {
    state.encode_pixel(Pixel::read::<N>(chunk), writer)?;
  }

  state.flush_run(writer)
}

use crate::error::Error;

pub const QOI_BYTES_END: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];
pub const QOI_BYTES_MAGIC: &[u8; 4] = b"qoif";
pub const QOI_MAX_RUN: u8 = 62;
pub const QOI_HEADER_LEN: usize = 14;

/// Metadata describing an image, laid out the way a QOI header stores it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ImageMeta {
  /// The number of color channels the image's pixels contain. For example,
  /// RGBA pixels have four channels, and RGB have three. Color channels are
  /// assumed to not be pre-multiplied with the alpha channel
  /// ("un-premultiplied alpha").
  pub channels: u8,
  /// The image's colorspace, see [Colorspace].
  pub colorspace: Colorspace,
  /// The image's height.
  pub height: u32,
  /// The image's width.
  pub width: u32,
}

impl ImageMeta {
  /// Returns the total number of pixels that make up the image, or `None`
  /// when that number does not fit in a `usize`.
  pub fn num_pixels(&self) -> Option<usize> {
    (self.width as usize).checked_mul(self.height as usize)
  }

  /// Returns the length in bytes of the raw pixel buffer for `channels`
  /// channels per pixel, or `None` on overflow.
  pub fn buffer_len(&self, channels: u8) -> Option<usize> {
    self.num_pixels()?.checked_mul(channels as usize)
  }

  /// Serializes the metadata into a QOI header.
  pub fn to_bytes(&self) -> [u8; QOI_HEADER_LEN] {
    let mut header = [0; QOI_HEADER_LEN];
    header[..4].copy_from_slice(QOI_BYTES_MAGIC);
    header[4..8].copy_from_slice(&self.width.to_be_bytes());
    header[8..12].copy_from_slice(&self.height.to_be_bytes());
    header[12] = self.channels;
    header[13] = self.colorspace as u8;
    header
  }

  /// Parses and validates a QOI header. Checks run in header order and the
  /// first failing field is reported.
  pub fn from_bytes(header: &[u8; QOI_HEADER_LEN]) -> Result<Self, Error> {
    let mut magic = [0; 4];
    magic.copy_from_slice(&header[..4]);

    if &magic != QOI_BYTES_MAGIC {
      return Err(Error::InvalidMagic(magic));
    }

    let width = u32::from_be_bytes([header[4], header[5], header[6], header[7]]);
    if width == 0 {
      return Err(Error::InvalidWidth);
    }

    let height = u32::from_be_bytes([header[8], header[9], header[10], header[11]]);
    if height == 0 {
      return Err(Error::InvalidHeight);
    }

    let channels = header[12];
    if channels != 3 && channels != 4 {
      return Err(Error::InvalidStoredChannels(channels));
    }

    Ok(ImageMeta {
      width,
      height,
      channels,
      colorspace: Colorspace::try_from(header[13])?,
    })
  }
}

/// The colorspace tag stored in a QOI header. It is informative only and
/// does not change how pixels are encoded.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Colorspace {
  /// sRGB color channels with linear alpha.
  #[default]
  Srgb = 0,
  /// All channels are linear.
  Linear = 1,
}

/// A `TryFrom` implemenation for converting any `u8` into a `Colorspace`.
/// `1` maps to `Colorspace::Linear`, and `0` maps to `Colorspace::Srgb`. All
/// other `u8` values are invalid.
impl TryFrom<u8> for Colorspace {
  type Error = Error;

  fn try_from(byte: u8) -> Result<Self, Self::Error> {
    match byte {
      0 => Ok(Colorspace::Srgb),
      1 => Ok(Colorspace::Linear),
      _ => Err(Error::InvalidColorspace(byte)),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn header(width: u32, height: u32, channels: u8, colorspace: u8) -> [u8; QOI_HEADER_LEN] {
    let mut header = [0; QOI_HEADER_LEN];
    header[..4].copy_from_slice(QOI_BYTES_MAGIC);
    header[4..8].copy_from_slice(&width.to_be_bytes());
    header[8..12].copy_from_slice(&height.to_be_bytes());
    header[12] = channels;
    header[13] = colorspace;
    header
  }

  #[test]
  fn test_parsing_header() {
    assert_eq!(
      ImageMeta::from_bytes(&header(800, 600, 4, 1)),
      Ok(ImageMeta { width: 800, height: 600, channels: 4, colorspace: Colorspace::Linear })
    );
  }

  #[test]
  fn test_header_round_trips_through_bytes() {
    let meta = ImageMeta { width: 3, height: 70000, channels: 3, colorspace: Colorspace::Srgb };
    assert_eq!(meta.to_bytes(), header(3, 70000, 3, 0));
  }

  #[test]
  fn test_header_checks_fields_in_order() {
    let mut bad = header(0, 0, 2, 5);
    bad[0] = b'Q';
    assert_eq!(ImageMeta::from_bytes(&bad), Err(Error::InvalidMagic(*b"Qoif")));
    assert_eq!(ImageMeta::from_bytes(&header(0, 0, 2, 5)), Err(Error::InvalidWidth));
    assert_eq!(ImageMeta::from_bytes(&header(1, 0, 2, 5)), Err(Error::InvalidHeight));
    assert_eq!(
      ImageMeta::from_bytes(&header(1, 1, 2, 5)),
      Err(Error::InvalidStoredChannels(2))
    );
    assert_eq!(
      ImageMeta::from_bytes(&header(1, 1, 3, 5)),
      Err(Error::InvalidColorspace(5))
    );
  }

  #[test]
  fn test_buffer_len() {
    let meta = ImageMeta { width: 2, height: 3, channels: 4, colorspace: Colorspace::Srgb };
    assert_eq!(meta.num_pixels(), Some(6));
    assert_eq!(meta.buffer_len(3), Some(18));
  }
}

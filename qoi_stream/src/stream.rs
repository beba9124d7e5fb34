use std::io;

use crate::error::Error;

/// Size of the read buffer used by the decoder's default mode and of the
/// write buffer used by the encoder.
pub const BUFFER_SIZE: usize = 8192;

// Byte source for the decoder.
//
// In buffered mode the source is read in `BUFFER_SIZE` chunks, so bytes past
// the end of the image may be consumed. In strict mode every byte is read
// individually and the source is never read past the last byte requested.
pub struct Input<R> {
  reader: R,
  // Empty in strict mode.
  buffer: Vec<u8>,
  pos: usize,
  filled: usize,
}

impl<R: io::Read> Input<R> {
  pub fn new(reader: R, strict: bool) -> Self {
    let buffer = if strict { Vec::new() } else { vec![0; BUFFER_SIZE] };
    Self { reader, buffer, pos: 0, filled: 0 }
  }

  #[inline]
  pub fn read_u8(&mut self) -> Result<u8, Error> {
    if self.pos < self.filled {
      let byte = self.buffer[self.pos];
      self.pos += 1;
      return Ok(byte);
    }

    if self.buffer.is_empty() {
      return self.read_direct();
    }

    self.fill()?;
    self.read_u8()
  }

  // Serves bytes that are already buffered, but never fetches a new chunk.
  // Used for the end marker so a buffered decode does not pull another chunk
  // from the source just to read the last few bytes of an image.
  pub fn read_u8_no_refill(&mut self) -> Result<u8, Error> {
    if self.pos < self.filled {
      let byte = self.buffer[self.pos];
      self.pos += 1;
      return Ok(byte);
    }

    self.read_direct()
  }

  pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
    let mut bytes = [0; N];
    for byte in bytes.iter_mut() {
      *byte = self.read_u8()?;
    }
    Ok(bytes)
  }

  fn read_direct(&mut self) -> Result<u8, Error> {
    let mut byte = [0];
    self.reader.read_exact(&mut byte)?;
    Ok(byte[0])
  }

  fn fill(&mut self) -> Result<(), Error> {
    loop {
      match self.reader.read(&mut self.buffer) {
        Ok(0) => return Err(Error::UnexpectedEof),
        Ok(read) => {
          self.pos = 0;
          self.filled = read;
          return Ok(());
        }
        Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
        Err(err) => return Err(err.into()),
      }
    }
  }
}

/// Wraps the encoder's destination in a `BUFFER_SIZE` write buffer.
pub fn output<W: io::Write>(writer: W) -> io::BufWriter<W> {
  io::BufWriter::with_capacity(BUFFER_SIZE, writer)
}

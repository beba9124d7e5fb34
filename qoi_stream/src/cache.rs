use crate::pixel::Pixel;

pub const CACHE_SIZE: usize = 64;

// A direct-mapped table of previously seen pixels, indexed by the QOI color
// hash modulo 64. Encoder and decoder both address it through `slot`, so their
// tables evolve identically as long as they see the same pixel sequence.
pub struct ColorCache {
  slots: [Pixel; CACHE_SIZE],
}

impl ColorCache {
  pub fn new() -> Self {
    Self { slots: [Pixel::ZERO; CACHE_SIZE] }
  }

  // The cache slot for `pixel`: `(r * 3 + g * 5 + b * 7 + a * 11) % 64`.
  #[inline]
  pub fn slot(pixel: &Pixel) -> usize {
    let r = pixel.r as usize;
    let g = pixel.g as usize;
    let b = pixel.b as usize;
    let a = pixel.a as usize;

    (r * 3 + g * 5 + b * 7 + a * 11) % CACHE_SIZE
  }

  // Returns whatever pixel currently occupies `index`, regardless of which
  // color was hashed there. `index` is masked to the table size.
  #[inline]
  pub fn get(&self, index: u8) -> Pixel {
    self.slots[index as usize % CACHE_SIZE]
  }

  // Stores `pixel` in its slot, overwriting the previous occupant.
  #[inline]
  pub fn insert(&mut self, pixel: Pixel) {
    self.slots[Self::slot(&pixel)] = pixel;
  }

  // Returns the slot index if `pixel` is already cached. Otherwise the pixel
  // replaces the slot's previous occupant and `None` is returned.
  #[inline]
  pub fn match_or_replace(&mut self, pixel: Pixel) -> Option<u8> {
    let index = Self::slot(&pixel);

    if self.slots[index] == pixel {
      return Some(index as u8);
    }

    self.slots[index] = pixel;
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_slot_hash() {
    assert_eq!(ColorCache::slot(&Pixel::new(101, 102, 103, 104)), 54);
    assert_eq!(ColorCache::slot(&Pixel::default()), 53);
    assert_eq!(ColorCache::slot(&Pixel::ZERO), 0);
  }

  #[test]
  fn test_new_cache_is_zeroed() {
    let cache = ColorCache::new();
    assert!((0..64).all(|index| cache.get(index) == Pixel::ZERO));
  }

  #[test]
  fn test_insert_overwrites_colliding_slot() {
    let mut cache = ColorCache::new();
    // Both hash to slot 3.
    let first = Pixel::new(1, 0, 0, 0);
    let second = Pixel::new(65, 0, 0, 0);

    assert_eq!(ColorCache::slot(&first), ColorCache::slot(&second));

    cache.insert(first);
    cache.insert(second);
    assert_eq!(cache.get(3), second);
  }

  #[test]
  fn test_match_or_replace() {
    let mut cache = ColorCache::new();
    let pixel = Pixel::new(101, 102, 103, 104);

    assert_eq!(cache.match_or_replace(pixel), None);
    assert_eq!(cache.match_or_replace(pixel), Some(54));
    assert_eq!(cache.get(54), pixel);
  }
}

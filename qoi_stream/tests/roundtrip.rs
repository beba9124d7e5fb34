use proptest::prelude::*;
use qoi_stream::{decode_image, encode_to_vec, Colorspace, Image};

// Random images with a mix of noise and repeated pixels, so runs, index hits
// and small deltas all show up alongside literals.
fn image_strategy() -> impl Strategy<Value = Image> {
  (1u32..40, 1u32..40, prop_oneof![Just(3u8), Just(4u8)], any::<bool>()).prop_flat_map(
    |(width, height, channels, linear)| {
      let len = (width * height) as usize;
      let pixel = proptest::collection::vec(any::<u8>(), channels as usize);
      let palette = proptest::collection::vec(pixel, 1..6);

      (palette, proptest::collection::vec((any::<prop::sample::Index>(), 0u8..4), len)).prop_map(
        move |(palette, picks)| {
          let mut pixels = Vec::with_capacity(len * channels as usize);
          for (pick, nudge) in picks {
            let mut pixel = pick.get(&palette).clone();
            pixel[0] = pixel[0].wrapping_add(nudge);
            pixels.extend_from_slice(&pixel);
          }

          let colorspace = if linear { Colorspace::Linear } else { Colorspace::Srgb };
          Image::new(width, height, channels, colorspace, pixels).expect("valid image")
        },
      )
    },
  )
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(64))]

  #[test]
  fn prop_round_trip(image in image_strategy()) {
    let encoded = encode_to_vec(&image).unwrap();
    let decoded = decode_image(encoded.as_slice(), 0, false).unwrap();
    prop_assert_eq!(decoded, image);
  }

  #[test]
  fn prop_round_trip_strict(image in image_strategy()) {
    let mut encoded = encode_to_vec(&image).unwrap();
    encoded.extend_from_slice(&[1, 2, 3, 4]);

    let mut reader = encoded.as_slice();
    let decoded = decode_image(&mut reader, 0, true).unwrap();
    prop_assert_eq!(decoded, image);
    prop_assert_eq!(reader, &[1u8, 2, 3, 4][..]);
  }

  #[test]
  fn prop_random_noise_round_trip(
    (width, height, channels, pixels) in (1u32..24, 1u32..24, prop_oneof![Just(3u8), Just(4u8)])
      .prop_flat_map(|(width, height, channels)| {
        let len = (width * height * channels as u32) as usize;
        (Just(width), Just(height), Just(channels), proptest::collection::vec(any::<u8>(), len))
      })
  ) {
    let image = Image::new(width, height, channels, Colorspace::Srgb, pixels).unwrap();
    let decoded = decode_image(encode_to_vec(&image).unwrap().as_slice(), 0, false).unwrap();
    prop_assert_eq!(decoded, image);
  }

  #[test]
  fn prop_channel_coercion(image in image_strategy()) {
    let encoded = encode_to_vec(&image).unwrap();
    let other = if image.channels() == 3 { 4 } else { 3 };
    let decoded = decode_image(encoded.as_slice(), other, false).unwrap();

    prop_assert_eq!(decoded.channels(), other);
    prop_assert_eq!(decoded.width(), image.width());
    prop_assert_eq!(decoded.height(), image.height());

    let source = image.pixels().chunks_exact(image.channels() as usize);
    let converted = decoded.pixels().chunks_exact(other as usize);
    for (original, pixel) in source.zip(converted) {
      prop_assert_eq!(&original[..3], &pixel[..3]);
      if other == 4 {
        prop_assert_eq!(pixel[3], 255);
      }
    }
  }

  #[test]
  fn prop_deterministic(image in image_strategy()) {
    prop_assert_eq!(encode_to_vec(&image).unwrap(), encode_to_vec(&image).unwrap());
  }
}

use dpcm::{
    calibrate, clamp_channel, encode_channel, pack_uniform, unpack, BoundaryBlock, Channel,
    Color, DifferentialCoder, Image, Quantizer, UniformQuantizer, BOUNDARY_BYTES,
};
use proptest::prelude::*;

/// Bit depth and an ordered boundary pair within the serializable range.
fn quantizer_params() -> impl Strategy<Value = (u8, i32, i32)> {
    (1u8..=7, -255i32..=255, -255i32..=255).prop_map(|(bits, a, b)| (bits, a.min(b), a.max(b)))
}

/// Small image with arbitrary colours.
fn small_image() -> impl Strategy<Value = Image> {
    (1u16..8, 1u16..8).prop_flat_map(|(width, height)| {
        prop::collection::vec(any::<(u8, u8, u8)>(), usize::from(width) * usize::from(height))
            .prop_map(move |rgb| {
                let colors = rgb.into_iter().map(|(r, g, b)| Color::new(r, g, b)).collect();
                Image::from_colors(width, height, colors).unwrap()
            })
    })
}

// Property 1: level table shape
proptest! {
    #[test]
    fn prop_level_table_invariants((bits, min, max) in quantizer_params()) {
        let q = UniformQuantizer::new(bits, min, max).unwrap();
        let levels = q.levels();

        prop_assert_eq!(levels.len(), 1usize << bits);
        prop_assert_eq!(q.level_count(), levels.len());
        prop_assert!(levels.windows(2).all(|w| w[0] <= w[1]), "not sorted: {:?}", levels);
        prop_assert_eq!(levels[0], min);
        prop_assert_eq!(levels[levels.len() - 1], max);
        prop_assert_eq!(q.min_value(), min);
        prop_assert_eq!(q.max_value(), max);
    }
}

// Property 2: quantize inverts quantized_value
proptest! {
    #[test]
    fn prop_quantize_dequantize_agree((bits, min, max) in quantizer_params()) {
        let q = UniformQuantizer::new(bits, min, max).unwrap();
        let n = q.levels().len();

        for i in 0..n {
            let level = q.quantized_value(i);
            prop_assert_eq!(q.quantized_value(q.quantize(level)), level);
        }

        // Levels at least 2 apart are all distinct, so indices round-trip too
        if i64::from(max) - i64::from(min) >= 2 * (n as i64 - 1) {
            for i in 0..n {
                prop_assert_eq!(q.quantize(q.quantized_value(i)), i);
            }
        }
    }
}

// Property 3: nearest level, ties to the lower index
proptest! {
    #[test]
    fn prop_quantize_picks_nearest(
        (bits, min, max) in quantizer_params(),
        value in -600i32..600
    ) {
        let q = UniformQuantizer::new(bits, min, max).unwrap();
        let chosen = q.quantize(value);
        let best = q.levels().iter().map(|l| l.abs_diff(value)).min().unwrap();

        prop_assert_eq!(q.quantized_value(chosen).abs_diff(value), best);
    }

    #[test]
    fn prop_midpoint_goes_left(
        (bits, min, max) in quantizer_params(),
        pick in any::<prop::sample::Index>()
    ) {
        let q = UniformQuantizer::new(bits, min, max).unwrap();
        let levels = q.levels();
        let i = pick.index(levels.len() - 1);
        let (lo, hi) = (levels[i], levels[i + 1]);

        // only a true midpoint between two distinct neighbours is a tie
        if lo < hi && (hi - lo) % 2 == 0 && hi - lo >= 2 {
            let mid = lo + (hi - lo) / 2;
            let chosen = q.quantize(mid);
            prop_assert_eq!(q.quantized_value(chosen), lo);
        }
    }
}

// Property 4: packing round trip
proptest! {
    #[test]
    fn prop_pack_unpack_round_trip(
        width in 1usize..=16,
        raw in prop::collection::vec(any::<u32>(), 0..200)
    ) {
        let values: Vec<u32> = raw.iter().map(|v| v & ((1u32 << width) - 1)).collect();
        let packed = pack_uniform(&values, width).unwrap();

        prop_assert_eq!(packed.len(), (values.len() * width + 7) / 8);
        prop_assert_eq!(unpack(&packed, width, values.len()).unwrap(), values);
    }
}

// Property 5: boundary block is always 7 bytes
proptest! {
    #[test]
    fn prop_boundary_block_size(values in prop::array::uniform6(-255i32..=255)) {
        let block = BoundaryBlock { values };
        let bytes = block.to_bytes().unwrap();

        prop_assert_eq!(bytes.len(), BOUNDARY_BYTES);
        // 54 data bits, the last 2 are padding
        prop_assert_eq!(bytes[6] & 0b11, 0);
        prop_assert_eq!(BoundaryBlock::from_bytes(&bytes).unwrap(), block);
    }
}

// Property 6: decode is a pure function of (stream, k) and mirrors the encoder
proptest! {
    #[test]
    fn prop_decode_mirrors_encoder(image in small_image(), bits in 1u8..=7) {
        let [r, g, b] = calibrate(&image, bits).unwrap();
        let coder = DifferentialCoder::new(bits).unwrap();
        let encoded = coder.encode_to_vec(&image, [&r, &g, &b]).unwrap();

        let first = coder.decode_from_slice(&encoded).unwrap();
        let second = coder.decode_from_slice(&encoded).unwrap();
        prop_assert_eq!(&first, &second);

        let quantizers: [&dyn Quantizer; 3] = [&r, &g, &b];
        for (channel, quantizer) in Channel::ALL.into_iter().zip(quantizers) {
            let code = encode_channel(&image.channel_values(channel), quantizer);
            let expected: Vec<u8> = code.reconstruction.iter().map(|&v| clamp_channel(v)).collect();
            prop_assert_eq!(first.channel_values(channel), expected);
        }
    }
}

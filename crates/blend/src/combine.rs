//! The four combiners: reduce an ordered slice of colors to one color.
//!
//! `mix`, `lowest` and `highest` work channel by channel on RGBA and are
//! order-independent; a single input is returned as-is. `mix_saturate`
//! treats the last color specially and works in HSL.

use colormix_core::{Color, ColorError};

fn require(colors: &[Color], needed: usize) -> Result<(), ColorError> {
    if colors.len() < needed {
        return Err(ColorError::InsufficientInput {
            needed,
            got: colors.len(),
        });
    }
    Ok(())
}

/// Applies `reduce` to each RGBA channel across all colors independently.
fn reduce_channels(colors: &[Color], reduce: impl Fn(&[u8]) -> u8) -> Color {
    let mut rgba = [0u8; 4];
    for (i, slot) in rgba.iter_mut().enumerate() {
        let channel: Vec<u8> = colors.iter().map(|c| c.rgba()[i]).collect();
        *slot = reduce(&channel);
    }
    let [r, g, b, a] = rgba;
    Color::from_rgba(r, g, b, a)
}

/// Per-channel arithmetic mean, rounded to nearest with ties to even.
pub fn mix(colors: &[Color]) -> Result<Color, ColorError> {
    require(colors, 1)?;
    if let [only] = colors {
        return Ok(*only);
    }
    Ok(reduce_channels(colors, |channel| {
        let sum: u32 = channel.iter().map(|&v| u32::from(v)).sum();
        (f64::from(sum) / channel.len() as f64).round_ties_even() as u8
    }))
}

/// Per-channel minimum. The result need not equal any input.
pub fn lowest(colors: &[Color]) -> Result<Color, ColorError> {
    require(colors, 1)?;
    if let [only] = colors {
        return Ok(*only);
    }
    Ok(reduce_channels(colors, |channel| {
        channel.iter().copied().fold(u8::MAX, u8::min)
    }))
}

/// Per-channel maximum. The result need not equal any input.
pub fn highest(colors: &[Color]) -> Result<Color, ColorError> {
    require(colors, 1)?;
    if let [only] = colors {
        return Ok(*only);
    }
    Ok(reduce_channels(colors, |channel| {
        channel.iter().copied().fold(u8::MIN, u8::max)
    }))
}

/// Mean saturation of every color but the last, applied to the last color.
///
/// Hue, lightness and alpha come from the last color. Requires at least two
/// colors; returns `ColorError::InsufficientInput` otherwise.
pub fn mix_saturate(colors: &[Color]) -> Result<Color, ColorError> {
    require(colors, 2)?;
    let Some((last, rest)) = colors.split_last() else {
        return Err(ColorError::InsufficientInput { needed: 2, got: 0 });
    };
    let saturation = rest.iter().map(Color::saturation).sum::<f64>() / rest.len() as f64;
    Color::from_hsla(
        last.hue(),
        saturation.clamp(0.0, 1.0),
        last.lightness(),
        last.alpha(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors(tokens: &[&str]) -> Vec<Color> {
        tokens.iter().map(|t| Color::parse(t).unwrap()).collect()
    }

    fn sample() -> Vec<Color> {
        colors(&["ff00ff00", "00ff00ff", "80808080"])
    }

    // -- mix --

    #[test]
    fn mix_averages_each_channel() {
        let result = mix(&sample()).unwrap();
        assert_eq!(result.hex(), "80808080");
    }

    #[test]
    fn mix_rounds_to_nearest() {
        // Ties go to the even neighbour: 10.5 -> 10, 11.5 -> 12.
        let result = mix(&colors(&["0a000000", "0b000000"])).unwrap();
        assert_eq!(result.red(), 10);
        let result = mix(&colors(&["0b000000", "0c000000"])).unwrap();
        assert_eq!(result.red(), 12);
        // (0 + 0 + 1) / 3 rounds down.
        let result = mix(&colors(&["000000ff", "000000ff", "010000ff"])).unwrap();
        assert_eq!(result.red(), 0);
    }

    #[test]
    fn mix_derives_hsl_from_averaged_rgba() {
        let result = mix(&colors(&["ff0000", "0000ff"])).unwrap();
        assert_eq!(result.rgba(), [128, 0, 128, 255]);
        assert!((result.hue() - 300.0).abs() < 1e-9, "hue {}", result.hue());
    }

    #[test]
    fn mix_single_input_is_returned_unchanged() {
        let only = Color::from_hsl(123.456, 0.321, 0.5).unwrap();
        let result = mix(&[only]).unwrap();
        // Identical floats, not a recomputation through RGB.
        assert_eq!(result, only);
        assert_eq!(result.hue(), 123.456);
    }

    // -- lowest / highest --

    #[test]
    fn lowest_takes_minimum_per_channel() {
        let result = lowest(&sample()).unwrap();
        assert_eq!(result, Color::parse("00000000").unwrap());
    }

    #[test]
    fn highest_takes_maximum_per_channel() {
        let result = highest(&sample()).unwrap();
        assert_eq!(result, Color::parse("ffffffff").unwrap());
    }

    #[test]
    fn lowest_and_highest_mix_channels_from_different_inputs() {
        let input = colors(&["ff000080", "00ff0040"]);
        assert_eq!(lowest(&input).unwrap().hex(), "00000040");
        assert_eq!(highest(&input).unwrap().hex(), "ffff0080");
    }

    #[test]
    fn single_input_passes_through_lowest_and_highest() {
        let only = Color::parse("123456").unwrap();
        assert_eq!(lowest(&[only]).unwrap(), only);
        assert_eq!(highest(&[only]).unwrap(), only);
    }

    #[test]
    fn empty_input_is_insufficient() {
        let combiners: [fn(&[Color]) -> Result<Color, ColorError>; 3] = [mix, lowest, highest];
        for combine in combiners {
            assert_eq!(
                combine(&[]),
                Err(ColorError::InsufficientInput { needed: 1, got: 0 })
            );
        }
    }

    // -- mix-saturate --

    #[test]
    fn mix_saturate_known_result() {
        let result = mix_saturate(&colors(&["ff0000ff", "808080ff", "cc3333ff"])).unwrap();
        assert_eq!(result.hex(), "bf4040ff");
        assert!((result.saturation() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn mix_saturate_takes_hue_lightness_alpha_from_last() {
        let input = colors(&["ff0000ff", "0000ff40"]);
        let last = input[1];
        let result = mix_saturate(&input).unwrap();
        assert_eq!(result.hue(), last.hue());
        assert_eq!(result.lightness(), last.lightness());
        assert_eq!(result.alpha(), 0x40);
    }

    #[test]
    fn mix_saturate_ignores_last_saturation() {
        // Gray first: mean saturation is 0 whatever the last color is.
        let result = mix_saturate(&colors(&["808080", "ff0000"])).unwrap();
        assert_eq!(result.saturation(), 0.0);
        assert_eq!(result.red(), result.green());
        assert_eq!(result.green(), result.blue());
    }

    #[test]
    fn mix_saturate_is_order_sensitive() {
        let a = mix_saturate(&colors(&["ff0000", "808080"])).unwrap();
        let b = mix_saturate(&colors(&["808080", "ff0000"])).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn mix_saturate_single_input_is_insufficient() {
        let result = mix_saturate(&colors(&["ff0000"]));
        assert_eq!(
            result,
            Err(ColorError::InsufficientInput { needed: 2, got: 1 })
        );
        assert!(mix_saturate(&[]).is_err());
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn color() -> impl Strategy<Value = Color> {
            any::<[u8; 4]>().prop_map(|[r, g, b, a]| Color::from_rgba(r, g, b, a))
        }

        proptest! {
            #[test]
            fn channelwise_modes_ignore_order(input in prop::collection::vec(color(), 1..8)) {
                let mut reversed = input.clone();
                reversed.reverse();
                prop_assert_eq!(mix(&input).unwrap().rgba(), mix(&reversed).unwrap().rgba());
                prop_assert_eq!(lowest(&input).unwrap(), lowest(&reversed).unwrap());
                prop_assert_eq!(highest(&input).unwrap(), highest(&reversed).unwrap());
            }

            #[test]
            fn mix_lies_between_lowest_and_highest(input in prop::collection::vec(color(), 1..8)) {
                let lo = lowest(&input).unwrap().rgba();
                let hi = highest(&input).unwrap().rgba();
                let mid = mix(&input).unwrap().rgba();
                for i in 0..4 {
                    prop_assert!(lo[i] <= mid[i] && mid[i] <= hi[i], "channel {i}: {lo:?} {mid:?} {hi:?}");
                }
            }

            #[test]
            fn mix_saturate_always_succeeds_with_two_or_more(input in prop::collection::vec(color(), 2..8)) {
                let result = mix_saturate(&input);
                prop_assert!(result.is_ok(), "{result:?}");
            }
        }
    }
}

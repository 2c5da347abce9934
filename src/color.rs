use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

/// Cells with an undefined correlation.
pub const UNDEFINED: RGBColor = RGBColor(190, 190, 190);

fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> RGBColor {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    RGBColor(
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<RGBColor> {
    (0..n)
        .map(|i| hsl_to_rgb((i as f32 / n as f32) * 360.0, 0.75, 0.55))
        .collect()
}

// ---------------------------------------------------------------------------
// Diverging map: correlation → colour
// ---------------------------------------------------------------------------

/// Blue for −1, white for 0, red for +1; saturation follows |r|.
/// NaN maps to [`UNDEFINED`].
pub fn diverging(r: f64) -> RGBColor {
    if r.is_nan() {
        return UNDEFINED;
    }
    let r = r.clamp(-1.0, 1.0) as f32;
    let hue = if r < 0.0 { 220.0 } else { 0.0 };
    hsl_to_rgb(hue, 0.75, 1.0 - 0.5 * r.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_length() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn palette_colours_are_distinct() {
        let colours = generate_palette(4);
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!((a.0, a.1, a.2), (b.0, b.1, b.2));
            }
        }
    }

    #[test]
    fn diverging_is_white_at_zero() {
        let c = diverging(0.0);
        assert_eq!((c.0, c.1, c.2), (255, 255, 255));
    }

    #[test]
    fn diverging_sign_picks_hue() {
        let pos = diverging(0.9);
        let neg = diverging(-0.9);
        assert!(pos.0 > pos.2, "positive correlations lean red");
        assert!(neg.2 > neg.0, "negative correlations lean blue");
    }

    #[test]
    fn diverging_nan_is_grey() {
        let c = diverging(f64::NAN);
        assert_eq!((c.0, c.1, c.2), (UNDEFINED.0, UNDEFINED.1, UNDEFINED.2));
    }
}

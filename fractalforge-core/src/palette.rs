//! Palette mapping from escape-iteration counts to RGB.

/// A named deterministic gradient over the normalized escape fraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Palette {
    /// Blueish gradient.
    Default,
    /// Deep purple -> orange -> yellow.
    Sunset,
    /// Neon cyan/magenta mix.
    Neon,
}

impl Palette {
    /// Look up a palette by name. Unrecognized names fall back to `Default`.
    pub fn parse(name: &str) -> Self {
        match name {
            "sunset" => Palette::Sunset,
            "neon" => Palette::Neon,
            _ => Palette::Default,
        }
    }

    fn gradient(self, t: f32) -> (u8, u8, u8) {
        match self {
            Palette::Default => {
                let rg = (20.0 + 235.0 * t) as u8;
                (rg, rg, (80.0 + 175.0 * t) as u8)
            }
            Palette::Sunset => (
                (255.0 * t) as u8,
                (80.0 + 150.0 * t) as u8,
                (40.0 + 60.0 * (1.0 - t)) as u8,
            ),
            Palette::Neon => (
                (255.0 * t) as u8,
                (255.0 * (0.5 + 0.5 * t)) as u8,
                (255.0 * (0.2 + 0.8 * (1.0 - t))) as u8,
            ),
        }
    }
}

/// Map one escape-iteration count to an RGB color.
///
/// A count at or above `max_iter` means the point never escaped and is
/// rendered black. Everything else is colored by the palette over
/// `t = iter / max_iter` in [0, 1).
pub fn iteration_to_rgb(iter: i32, max_iter: u32, palette: Palette) -> (u8, u8, u8) {
    let max_iter = max_iter.max(1);
    if iter >= max_iter as i32 {
        return (0, 0, 0);
    }
    let t = iter as f32 / max_iter as f32;
    palette.gradient(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inside_the_set_is_black_for_every_palette() {
        for palette in [Palette::Default, Palette::Sunset, Palette::Neon] {
            assert_eq!(iteration_to_rgb(1000, 1000, palette), (0, 0, 0));
            assert_eq!(iteration_to_rgb(1500, 1000, palette), (0, 0, 0));
        }
    }

    #[test]
    fn unrecognized_name_matches_default() {
        assert_eq!(Palette::parse("no-such-palette"), Palette::Default);
        for iter in [0, 100, 500, 999] {
            assert_eq!(
                iteration_to_rgb(iter, 1000, Palette::parse("no-such-palette")),
                iteration_to_rgb(iter, 1000, Palette::Default),
            );
        }
    }

    #[test]
    fn known_names_parse() {
        assert_eq!(Palette::parse("default"), Palette::Default);
        assert_eq!(Palette::parse("sunset"), Palette::Sunset);
        assert_eq!(Palette::parse("neon"), Palette::Neon);
    }

    #[test]
    fn default_gradient_endpoints() {
        // t = 0 at iteration zero.
        assert_eq!(iteration_to_rgb(0, 1000, Palette::Default), (20, 20, 80));
        // t just below 1 at the last escaping iteration.
        let (r, g, b) = iteration_to_rgb(999, 1000, Palette::Default);
        assert_eq!((r, g), (254, 254));
        assert_eq!(b, 254);
    }

    #[test]
    fn sunset_differs_from_default() {
        assert_ne!(
            iteration_to_rgb(500, 1000, Palette::Sunset),
            iteration_to_rgb(500, 1000, Palette::Default),
        );
    }
}

// THEORY:
// The `compositor` is the engine of the layer stack. It takes an ordered list of
// transparent feature layers and folds them, bottom first, onto an opaque
// background, then flattens the result into the RGB image callers receive.
//
// Key architectural principles & algorithm steps:
// 1.  **Opaque Base**: The accumulator starts fully opaque at the background
//     color. Because source-over can never lower alpha, it stays opaque through
//     every step, which is what makes dropping the alpha channel at the end exact
//     rather than an approximation.
// 2.  **Source-Over, Per Pixel**: Each layer pixel is blended onto the pixel
//     beneath it in proportion to its alpha. Zero alpha leaves the accumulator
//     untouched; full alpha replaces it outright. Both are fast paths, and they
//     cover almost every pixel of a line drawing.
// 3.  **Order Is Precedence**: The caller hands layers in category order. A later
//     layer wins wherever both draw. The compositor never reorders.
// 4.  **Stateless Utility**: Like every other core module, `composite` is a pure
//     function over its inputs. It consumes the layers and keeps nothing.

use crate::core_modules::layer::Layer;
use image::{Rgb, RgbImage, Rgba, RgbaImage};

pub mod compositor {
    use super::*;

    /// Folds `layers` onto an opaque `background` canvas and flattens to RGB.
    ///
    /// Layers that do not match the canvas size are composited over their
    /// overlapping area only.
    pub fn composite(
        width: u32,
        height: u32,
        background: [u8; 3],
        layers: impl IntoIterator<Item = Layer>,
    ) -> RgbImage {
        let [r, g, b] = background;
        let mut accumulator = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]));

        for layer in layers {
            apply_layer(&mut accumulator, &layer);
        }

        flatten(&accumulator)
    }

    /// Source-over of one layer onto the accumulator, in place.
    pub fn apply_layer(accumulator: &mut RgbaImage, layer: &Layer) {
        let source = layer.as_image();
        let width = accumulator.width().min(source.width());
        let height = accumulator.height().min(source.height());

        for y in 0..height {
            for x in 0..width {
                let top = *source.get_pixel(x, y);
                if top[3] == 0 {
                    continue;
                }
                let base = *accumulator.get_pixel(x, y);
                accumulator.put_pixel(x, y, blend_over(base, top));
            }
        }
    }

    /// Porter-Duff source-over of `top` onto `base`.
    pub fn blend_over(base: Rgba<u8>, top: Rgba<u8>) -> Rgba<u8> {
        // Fast path: fully transparent top pixel, nothing to blend
        if top[3] == 0 {
            return base;
        }

        // Fast path: fully opaque top pixel, overwrite
        if top[3] == 255 {
            return top;
        }

        let top_a = top[3] as f32 / 255.0;
        let base_a = base[3] as f32 / 255.0;
        let out_a = top_a + base_a * (1.0 - top_a);
        if out_a <= 0.0 {
            return Rgba([0, 0, 0, 0]);
        }

        let channel = |i: usize| {
            let top_c = top[i] as f32 / 255.0;
            let base_c = base[i] as f32 / 255.0;
            let c = (top_c * top_a + base_c * base_a * (1.0 - top_a)) / out_a;
            (c * 255.0).round().clamp(0.0, 255.0) as u8
        };

        Rgba([
            channel(0),
            channel(1),
            channel(2),
            (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        ])
    }

    /// Drops the alpha channel of an opaque accumulator.
    pub fn flatten(accumulator: &RgbaImage) -> RgbImage {
        RgbImage::from_fn(accumulator.width(), accumulator.height(), |x, y| {
            let p = accumulator.get_pixel(x, y);
            Rgb([p[0], p[1], p[2]])
        })
    }
}

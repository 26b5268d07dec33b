//! The software rasterizer.
//!
//! Every entry point blits one decoded frame into a [`Canvas`], honouring
//! the depth, height and shadow planes:
//!
//! - [`Compositor::draw`]: depth-tested palette blit with optional
//!   quantized translucency.
//! - [`Compositor::draw_shadow`]: darkens under the shadow half of the frame
//!   table, at most once per pixel.
//! - [`Compositor::draw_alpha`]: multiplicative light/fog mask, no depth test.
//! - [`Compositor::bounds`]: where [`Compositor::draw`] would land.
//!
//! Bad frames, missing pixel data and out-of-canvas pixels are skipped; none
//! of this returns an error.

mod building_z;

pub use building_z::{sample_position, BuildingZ, BUILDING_Z_FILES};

use std::sync::Arc;

use isomap_shared::{Point, Rect, Rgb, Size};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::assets::{ShpFile, ShpImage, TmpFile};
use crate::canvas::Canvas;
use crate::config::RenderConfig;
use crate::frame::{resolve_frame, DecidedFrame};
use crate::object::{GameObject, ObjectState};
use crate::props::DrawProperties;

/// Geometry flags of the drawable being blitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpriteShape {
    /// Lies on the ground; depth grows row by row.
    pub flat: bool,
    /// Upright building sprite; depth comes from the Building-Z map.
    pub building_part: bool,
    /// Foundation width in cells.
    pub foundation_width: i32,
    /// Extra elevation, in levels, the shadow is cast from.
    pub tile_elevation: i32,
}

/// Translucency percentage, quantized down to a multiple of 25.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Translucency(u8);

impl Translucency {
    /// Fully opaque.
    pub const OPAQUE: Self = Self(0);

    /// Quantizes `percent`: 0..=24 is opaque, 25..=49 is 25 and so on up to
    /// 100 (destination kept).
    #[must_use]
    pub const fn quantize(percent: u8) -> Self {
        let clamped = if percent > 100 { 100 } else { percent };
        Self(clamped / 25 * 25)
    }

    /// The quantized percentage.
    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// `dst * a + src * (1 - a)`, or `src` when opaque.
    #[inline]
    #[must_use]
    pub fn blend(self, dst: Rgb, src: Rgb) -> Rgb {
        if self.0 == 0 {
            return src;
        }
        let a = f32::from(self.0) / 100.0;
        let b = 1.0 - a;
        dst.zip(src, |d, s| (a * f32::from(d) + b * f32::from(s)) as u8)
    }
}

/// Rasterizer state for one render pass.
///
/// Owns the random source of `Random` frame deciders so a pass is
/// reproducible from the configured seed.
#[derive(Debug)]
pub struct Compositor {
    tile_width: i32,
    tile_height: i32,
    building_z: Arc<BuildingZ>,
    rng: ChaCha8Rng,
    visualize_building_z: bool,
}

impl Compositor {
    /// Creates a compositor for `config`, sharing `building_z`.
    #[must_use]
    pub fn new(config: &RenderConfig, building_z: Arc<BuildingZ>) -> Self {
        Self {
            tile_width: config.tile_width(),
            tile_height: config.tile_height(),
            building_z,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            visualize_building_z: config.visualize_building_z,
        }
    }

    /// Cell width in pixels.
    #[must_use]
    pub const fn tile_width(&self) -> i32 {
        self.tile_width
    }

    /// Cell height in pixels.
    #[must_use]
    pub const fn tile_height(&self) -> i32 {
        self.tile_height
    }

    /// The pass's random source.
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Picks the frame `props` wants for `obj`.
    ///
    /// `Random` draws from the visible half of the table when the sprite
    /// carries shadow frames.
    pub fn decide_frame(&mut self, obj: &GameObject, shp: &ShpFile, props: &DrawProperties) -> Option<usize> {
        decide_with(&mut self.rng, obj, shp, props)
    }

    /// The frame the next [`Compositor::decide_frame`] call would pick,
    /// without consuming randomness.
    #[must_use]
    pub fn peek_frame(&self, obj: &GameObject, shp: &ShpFile, props: &DrawProperties) -> Option<usize> {
        decide_with(&mut self.rng.clone(), obj, shp, props)
    }

    /// Top-left canvas position of `img` for an object, before any pixel
    /// offset inside the frame.
    #[inline]
    fn frame_origin(&self, obj: &GameObject, shp: &ShpFile, img: &ShpImage, offset: Point) -> Point {
        obj.tile.project(self.tile_width, self.tile_height)
            + offset
            + Point::new(-shp.width / 2 + img.x, -shp.height / 2 + img.y)
    }

    /// Decides a frame and blits it. See [`Compositor::draw_frame`].
    pub fn draw(
        &mut self,
        obj: &GameObject,
        shp: &ShpFile,
        shape: SpriteShape,
        props: &DrawProperties,
        canvas: &mut Canvas,
        translucency: u8,
    ) {
        if let Some(frame) = self.decide_frame(obj, shp, props) {
            self.draw_frame(obj, shp, frame, shape, props, canvas, translucency);
        }
    }

    /// Depth-tested blit of frame `frame`.
    ///
    /// A pixel is written when its depth is at least the stored one; ties go
    /// to the later write. Written pixels also take the object's height.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_frame(
        &self,
        obj: &GameObject,
        shp: &ShpFile,
        frame: usize,
        shape: SpriteShape,
        props: &DrawProperties,
        canvas: &mut Canvas,
        translucency: u8,
    ) {
        let Some(img) = shp.image(frame) else {
            return;
        };
        let Some(data) = img.pixel_data() else {
            trace!("Skipping {} frame {}: malformed pixel data", shp.name, frame);
            return;
        };
        let th = self.tile_height;
        let origin = self.frame_origin(obj, shp, img, props.primary_offset(th));
        trace!("Drawing SHP file {} (frame {}) at ({},{})", shp.name, frame, origin.x, origin.y);

        let palette = props.palette(obj);
        let blend = Translucency::quantize(translucency);
        let mut height = obj.tile.z * th / 2;
        if !shape.flat {
            height += shp.height;
        }
        let height = clamp_i16(height);
        let z_offset = obj.bottom_tile.depth(th) + props.z_adjust;
        let zmap = shape.building_part && !shape.flat;

        for (y, row) in data.chunks_exact(img.width as usize).enumerate() {
            let y = y as i32;
            for (x, &index) in row.iter().enumerate() {
                if index == 0 {
                    continue;
                }
                let x = x as i32;
                let correction = if zmap {
                    self.building_z
                        .sample(x, y, shp.height, shape.foundation_width, th)
                } else {
                    None
                };
                let depth = clamp_i16(if shape.flat {
                    z_offset + y - img.height
                } else if let Some(c) = correction {
                    z_offset + i32::from(c)
                } else {
                    z_offset + img.height
                });

                let Some(cell) = canvas.cell_mut(origin.offset(x, y)) else {
                    continue;
                };
                if depth < *cell.z {
                    continue;
                }
                *cell.pixel = match correction {
                    Some(c) if self.visualize_building_z => Rgb::grey(c),
                    _ => blend.blend(*cell.pixel, palette.color(index)),
                };
                *cell.z = depth;
                *cell.height = height;
            }
        }
    }

    /// Decides a frame and casts its shadow. See [`Compositor::draw_shadow_frame`].
    pub fn draw_shadow(
        &mut self,
        obj: &GameObject,
        shp: &ShpFile,
        shape: SpriteShape,
        props: &DrawProperties,
        canvas: &mut Canvas,
    ) {
        if let Some(frame) = self.decide_frame(obj, shp, props) {
            self.draw_shadow_frame(obj, shp, frame, shape, props, canvas);
        }
    }

    /// Casts the shadow of frame `frame`, stored at `frame + images / 2`.
    /// Tables of fewer than two images carry no shadow.
    ///
    /// Each pixel is halved at most once per pass, and only where the
    /// caster stands at least as high as what was drawn there.
    pub fn draw_shadow_frame(
        &self,
        obj: &GameObject,
        shp: &ShpFile,
        frame: usize,
        shape: SpriteShape,
        props: &DrawProperties,
        canvas: &mut Canvas,
    ) {
        let half = shp.num_images() / 2;
        if half == 0 {
            return;
        }
        let frame = frame + half;
        let Some(img) = shp.image(frame) else {
            return;
        };
        let Some(data) = img.pixel_data() else {
            return;
        };
        let th = self.tile_height;
        let origin = self.frame_origin(obj, shp, img, props.shadow_offset(th));
        trace!("Drawing SHP shadow {} (frame {}) at ({},{})", shp.name, frame, origin.x, origin.y);

        let z_offset = obj.tile.depth(th) - shp.height / 2 + img.y + props.z_adjust;
        let mut cast_height = obj.tile.z * th / 2;
        if !shape.flat {
            cast_height += shp.height + shape.tile_elevation * th / 2;
        }

        for (y, row) in data.chunks_exact(img.width as usize).enumerate() {
            let y = y as i32;
            let depth = if shape.flat {
                z_offset + y
            } else {
                z_offset + img.height
            };
            let depth = clamp_i16(depth);
            for (x, &index) in row.iter().enumerate() {
                if index == 0 {
                    continue;
                }
                let Some(cell) = canvas.cell_mut(origin.offset(x as i32, y)) else {
                    continue;
                };
                if *cell.shadow || depth < *cell.z || cast_height < i32::from(*cell.height) {
                    continue;
                }
                *cell.pixel = cell.pixel.map(|c| c / 2);
                *cell.shadow = true;
            }
        }
    }

    /// Multiplies the canvas by an alpha mask frame.
    ///
    /// Mask bytes are intensities, 127 being neutral; no palette and no depth
    /// test are involved.
    pub fn draw_alpha(&mut self, obj: &GameObject, shp: &ShpFile, props: &DrawProperties, canvas: &mut Canvas) {
        let decided = props.frame_decider.decide(obj, &mut self.rng);
        let Some(frame) = resolve_frame(decided, shp.num_images(), &mut self.rng) else {
            return;
        };
        let Some(img) = shp.image(frame) else {
            return;
        };
        let Some(data) = img.pixel_data() else {
            return;
        };
        let origin = self.alpha_origin(obj, shp, img, props);
        trace!("Drawing AlphaImage SHP file {} (frame {}) at ({},{})", shp.name, frame, origin.x, origin.y);

        for (y, row) in data.chunks_exact(img.width as usize).enumerate() {
            for (x, &value) in row.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                let Some(cell) = canvas.cell_mut(origin.offset(x as i32, y as i32)) else {
                    continue;
                };
                let mult = f32::from(value) / 127.0;
                *cell.pixel = cell
                    .pixel
                    .map(|c| (mult * f32::from(c)).clamp(0.0, 255.0) as u8);
            }
        }
    }

    /// Alpha masks are anchored half a cell right of sprites.
    #[inline]
    fn alpha_origin(&self, obj: &GameObject, shp: &ShpFile, img: &ShpImage, props: &DrawProperties) -> Point {
        self.frame_origin(obj, shp, img, props.primary_offset(self.tile_height))
            .offset(self.tile_width / 2, 0)
    }

    /// Canvas rectangle [`Compositor::draw_alpha`] would cover with frame
    /// `frame`.
    #[must_use]
    pub fn alpha_bounds(&self, obj: &GameObject, shp: &ShpFile, frame: usize, props: &DrawProperties) -> Rect {
        shp.image(frame).map_or(Rect::EMPTY, |img| {
            Rect::new(self.alpha_origin(obj, shp, img, props), Size::new(img.width, img.height))
        })
    }

    /// Canvas rectangle the next [`Compositor::draw`] would cover, or
    /// [`Rect::EMPTY`]. Leaves the random source untouched.
    #[must_use]
    pub fn bounds(&self, obj: &GameObject, shp: &ShpFile, props: &DrawProperties) -> Rect {
        self.peek_frame(obj, shp, props)
            .map_or(Rect::EMPTY, |frame| self.frame_bounds(obj, shp, frame, props))
    }

    /// Canvas rectangle of frame `frame`.
    #[must_use]
    pub fn frame_bounds(&self, obj: &GameObject, shp: &ShpFile, frame: usize, props: &DrawProperties) -> Rect {
        shp.image(frame).map_or(Rect::EMPTY, |img| {
            let origin = self.frame_origin(obj, shp, img, props.primary_offset(self.tile_height));
            Rect::new(origin, Size::new(img.width, img.height))
        })
    }

    /// Blits a terrain tile. Tiles are flat: depth grows towards the bottom
    /// row of the cell diamond.
    pub fn draw_tile(&self, obj: &GameObject, tmp: &TmpFile, canvas: &mut Canvas) {
        let sub_tile = match obj.state {
            ObjectState::Tile { sub_tile } => sub_tile,
            _ => 0,
        };
        let Some(img) = tmp.image(sub_tile) else {
            return;
        };
        let Some(data) = img.pixel_data() else {
            return;
        };
        let th = self.tile_height;
        let origin = obj.tile.project(self.tile_width, th) + Point::new(img.x, img.y);
        trace!("Drawing TMP file {} (subtile {}) at ({},{})", tmp.name, sub_tile, origin.x, origin.y);

        let z_offset = obj.tile.depth(th);
        let height = clamp_i16(obj.tile.z * th / 2);
        let palette = obj.palette.as_ref();
        for (y, row) in data.chunks_exact(img.width as usize).enumerate() {
            let y = y as i32;
            let depth = clamp_i16(z_offset + y - img.height);
            for (x, &index) in row.iter().enumerate() {
                if index == 0 {
                    continue;
                }
                let Some(cell) = canvas.cell_mut(origin.offset(x as i32, y)) else {
                    continue;
                };
                if depth < *cell.z {
                    continue;
                }
                *cell.pixel = palette.color(index);
                *cell.z = depth;
                *cell.height = height;
            }
        }
    }

    /// Canvas rectangle of the tile image [`Compositor::draw_tile`] would use.
    #[must_use]
    pub fn tile_bounds(&self, obj: &GameObject, tmp: &TmpFile) -> Rect {
        let sub_tile = match obj.state {
            ObjectState::Tile { sub_tile } => sub_tile,
            _ => 0,
        };
        tmp.image(sub_tile).map_or(Rect::EMPTY, |img| {
            let origin = obj.tile.project(self.tile_width, self.tile_height) + Point::new(img.x, img.y);
            Rect::new(origin, Size::new(img.width, img.height))
        })
    }
}

/// Decides a frame from `rng`. `Random` draws from the visible half of the
/// table when the sprite carries shadow frames.
fn decide_with(rng: &mut ChaCha8Rng, obj: &GameObject, shp: &ShpFile, props: &DrawProperties) -> Option<usize> {
    let decided = props.frame_decider.decide(obj, rng);
    let total = shp.num_images();
    let pool = if matches!(decided, DecidedFrame::Random) && props.has_shadow {
        (total / 2).max(1).min(total)
    } else {
        total
    };
    resolve_frame(decided, pool, rng)
}

#[inline]
fn clamp_i16(value: i32) -> i16 {
    value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TileImage;
    use crate::canvas::{HEIGHT_EMPTY, Z_EMPTY};
    use crate::frame::FrameDecider;
    use crate::object::{DrawableId, TileCoord};
    use isomap_shared::{CollectionType, EngineType, Palette, TheaterType};

    const RED: Rgb = Rgb::new(200, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 200);

    fn palette() -> Arc<Palette> {
        let mut colors = [Rgb::BLACK; 256];
        colors[1] = RED;
        colors[2] = BLUE;
        colors[3] = Rgb::new(100, 100, 100);
        Arc::new(Palette::new("unittem.pal", colors))
    }

    fn compositor(building_z: BuildingZ) -> Compositor {
        let config = RenderConfig::new(EngineType::RedAlert2, TheaterType::Temperate);
        Compositor::new(&config, Arc::new(building_z))
    }

    fn object() -> GameObject {
        GameObject::new(
            TileCoord::default(),
            palette(),
            DrawableId::Object {
                collection: CollectionType::Vehicle,
                index: 0,
            },
        )
    }

    /// A 2x2 sprite whose single frame lands at canvas (0, 0) with `props`.
    fn sprite(pixels: Vec<u8>) -> ShpFile {
        ShpFile::new("test.shp", 2, 2, vec![ShpImage::new(0, 0, 2, 2, pixels)])
    }

    fn at_origin() -> DrawProperties {
        DrawProperties {
            offset: Point::new(1, 1),
            ..DrawProperties::default()
        }
    }

    fn upright() -> SpriteShape {
        SpriteShape::default()
    }

    #[test]
    fn test_opaque_frame_scenario() {
        let mut comp = compositor(BuildingZ::missing());
        let mut canvas = Canvas::new(4, 4);
        let obj = object();
        comp.draw(&obj, &sprite(vec![1; 4]), upright(), &at_origin(), &mut canvas, 0);

        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert_eq!(canvas.pixel(x, y), Some(RED));
            assert_eq!(canvas.z_at(x, y), Some(2));
            assert_eq!(canvas.height_at(x, y), Some(2));
        }
        assert_eq!(canvas.pixel(2, 2), Some(Rgb::BLACK));
        assert_eq!(canvas.z_at(2, 2), Some(Z_EMPTY));

        // a second frame behind the first one changes nothing
        let behind = DrawProperties {
            z_adjust: -1,
            ..at_origin()
        };
        comp.draw(&obj, &sprite(vec![2; 4]), upright(), &behind, &mut canvas, 0);
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert_eq!(canvas.pixel(x, y), Some(RED));
            assert_eq!(canvas.z_at(x, y), Some(2));
            assert_eq!(canvas.height_at(x, y), Some(2));
        }
    }

    #[test]
    fn test_equal_depth_later_wins() {
        let mut comp = compositor(BuildingZ::missing());
        let mut canvas = Canvas::new(2, 2);
        let obj = object();
        comp.draw(&obj, &sprite(vec![1; 4]), upright(), &at_origin(), &mut canvas, 0);
        comp.draw(&obj, &sprite(vec![2; 4]), upright(), &at_origin(), &mut canvas, 0);
        assert_eq!(canvas.pixel(1, 1), Some(BLUE));
    }

    #[test]
    fn test_transparent_pixels_untouched() {
        let mut comp = compositor(BuildingZ::missing());
        let mut canvas = Canvas::new(2, 2);
        comp.draw(&object(), &sprite(vec![0, 1, 0, 0]), upright(), &at_origin(), &mut canvas, 0);
        assert_eq!(canvas.pixel(0, 0), Some(Rgb::BLACK));
        assert_eq!(canvas.z_at(0, 0), Some(Z_EMPTY));
        assert_eq!(canvas.height_at(0, 0), Some(HEIGHT_EMPTY));
        assert_eq!(canvas.pixel(1, 0), Some(RED));
    }

    #[test]
    fn test_flat_depth_by_row() {
        let mut comp = compositor(BuildingZ::missing());
        let mut canvas = Canvas::new(2, 2);
        let flat = SpriteShape {
            flat: true,
            ..SpriteShape::default()
        };
        comp.draw(&object(), &sprite(vec![1; 4]), flat, &at_origin(), &mut canvas, 0);
        assert_eq!(canvas.z_at(0, 0), Some(-2));
        assert_eq!(canvas.z_at(0, 1), Some(-1));
        assert_eq!(canvas.height_at(0, 1), Some(0));
    }

    #[test]
    fn test_translucency_quantization() {
        for (requested, quantized) in [(0, 0), (24, 0), (25, 25), (49, 25), (74, 50), (99, 75), (100, 100), (124, 100), (255, 100)] {
            assert_eq!(Translucency::quantize(requested).percent(), quantized, "{requested}");
        }

        let dst = Rgb::new(100, 100, 100);
        let src = Rgb::new(200, 200, 200);
        assert_eq!(Translucency::quantize(24).blend(dst, src), src);
        assert_eq!(Translucency::quantize(30).blend(dst, src), Rgb::new(175, 175, 175));
        assert_eq!(Translucency::quantize(110).blend(dst, src), dst);
    }

    #[test]
    fn test_fully_translucent_keeps_colors() {
        let mut comp = compositor(BuildingZ::missing());
        let mut canvas = Canvas::new(2, 2);
        canvas.set_pixel(0, 0, Rgb::new(10, 20, 30));
        comp.draw(&object(), &sprite(vec![1; 4]), upright(), &at_origin(), &mut canvas, 100);
        assert_eq!(canvas.pixel(0, 0), Some(Rgb::new(10, 20, 30)));
        // the write still counts for depth
        assert_eq!(canvas.z_at(0, 0), Some(2));
    }

    #[test]
    fn test_out_of_canvas_pixels_skipped() {
        let mut comp = compositor(BuildingZ::missing());
        let mut canvas = Canvas::new(2, 2);
        let props = DrawProperties {
            offset: Point::new(0, 0),
            ..DrawProperties::default()
        };
        // lands at (-1, -1): only the bottom-right pixel is on the canvas
        comp.draw(&object(), &sprite(vec![1, 2, 2, 3]), upright(), &props, &mut canvas, 0);
        assert_eq!(canvas.pixel(0, 0), Some(Rgb::new(100, 100, 100)));
        assert_eq!(canvas.pixel(1, 1), Some(Rgb::BLACK));
    }

    #[test]
    fn test_out_of_range_frame_is_noop() {
        let mut comp = compositor(BuildingZ::missing());
        let mut canvas = Canvas::new(2, 2);
        let props = DrawProperties {
            frame_decider: FrameDecider::Fixed(5),
            ..at_origin()
        };
        comp.draw(&object(), &sprite(vec![1; 4]), upright(), &props, &mut canvas, 0);
        assert_eq!(canvas.pixel(0, 0), Some(Rgb::BLACK));
        assert_eq!(comp.bounds(&object(), &sprite(vec![1; 4]), &props), Rect::EMPTY);
    }

    #[test]
    fn test_malformed_frame_is_noop() {
        let mut comp = compositor(BuildingZ::missing());
        let mut canvas = Canvas::new(2, 2);
        comp.draw(&object(), &sprite(vec![1; 3]), upright(), &at_origin(), &mut canvas, 0);
        assert_eq!(canvas.z_at(0, 0), Some(Z_EMPTY));
    }

    #[test]
    fn test_bounds_match_draw() {
        let mut comp = compositor(BuildingZ::missing());
        let mut obj = object();
        obj.tile = TileCoord::from_map(3, 2, 1, 10);
        let shp = ShpFile::new("test.shp", 8, 6, vec![ShpImage::new(2, 1, 3, 2, vec![1; 6])]);
        let props = DrawProperties {
            offset: Point::new(30, 150),
            ..DrawProperties::default()
        };
        let bounds = comp.bounds(&obj, &shp, &props);
        assert_eq!(bounds.size, Size::new(3, 2));

        let mut canvas = Canvas::new(800, 400);
        comp.draw(&obj, &shp, upright(), &props, &mut canvas, 0);
        let o = bounds.origin;
        assert_eq!(canvas.pixel(o.x, o.y), Some(RED));
        assert_eq!(canvas.pixel(o.x + 2, o.y + 1), Some(RED));
        assert_eq!(canvas.pixel(o.x - 1, o.y), Some(Rgb::BLACK));
        assert_eq!(canvas.pixel(o.x + 3, o.y + 1), Some(Rgb::BLACK));
    }

    fn with_shadow(main: Vec<u8>, shadow: Vec<u8>) -> ShpFile {
        ShpFile::new(
            "test.shp",
            2,
            2,
            vec![ShpImage::new(0, 0, 2, 2, main), ShpImage::new(0, 0, 2, 2, shadow)],
        )
    }

    #[test]
    fn test_shadow_halves_once() {
        let mut comp = compositor(BuildingZ::missing());
        let mut canvas = Canvas::new(2, 2);
        for y in 0..2 {
            for x in 0..2 {
                canvas.set_pixel(x, y, Rgb::new(200, 100, 51));
            }
        }
        let shp = with_shadow(vec![1; 4], vec![1, 1, 0, 1]);
        let obj = object();
        comp.draw_shadow(&obj, &shp, upright(), &at_origin(), &mut canvas);
        assert_eq!(canvas.pixel(0, 0), Some(Rgb::new(100, 50, 25)));
        assert_eq!(canvas.is_shadowed(0, 0), Some(true));
        assert_eq!(canvas.pixel(0, 1), Some(Rgb::new(200, 100, 51)));
        assert_eq!(canvas.is_shadowed(0, 1), Some(false));

        comp.draw_shadow(&obj, &shp, upright(), &at_origin(), &mut canvas);
        assert_eq!(canvas.pixel(0, 0), Some(Rgb::new(100, 50, 25)));
    }

    #[test]
    fn test_shadow_blocked_by_taller_pixels() {
        let mut comp = compositor(BuildingZ::missing());
        let mut canvas = Canvas::new(2, 2);
        let obj = object();
        // something tall stands there already
        let mut tall = obj.clone();
        tall.tile.z = 4;
        comp.draw(&tall, &sprite(vec![1; 4]), upright(), &DrawProperties { offset: Point::new(1, 61), ..at_origin() }, &mut canvas, 0);
        assert_eq!(canvas.height_at(0, 0), Some(62));

        let shp = with_shadow(vec![1; 4], vec![1; 4]);
        comp.draw_shadow(&obj, &shp, upright(), &at_origin(), &mut canvas);
        assert_eq!(canvas.pixel(0, 0), Some(RED));
        assert_eq!(canvas.is_shadowed(0, 0), Some(false));
    }

    #[test]
    fn test_shadow_without_shadow_frames_is_noop() {
        let mut comp = compositor(BuildingZ::missing());
        let mut canvas = Canvas::new(2, 2);
        canvas.set_pixel(0, 0, Rgb::new(8, 8, 8));
        comp.draw_shadow(&object(), &sprite(vec![1; 4]), upright(), &at_origin(), &mut canvas);
        assert_eq!(canvas.pixel(0, 0), Some(Rgb::new(8, 8, 8)));
    }

    #[test]
    fn test_shadow_half_of_odd_table() {
        let comp = compositor(BuildingZ::missing());
        let shp = ShpFile::new(
            "test.shp",
            2,
            2,
            vec![
                ShpImage::new(0, 0, 2, 2, vec![1; 4]),
                ShpImage::new(0, 0, 2, 2, vec![1, 0, 0, 0]),
                ShpImage::new(0, 0, 2, 2, vec![0, 0, 0, 1]),
            ],
        );
        let obj = object();

        // frame 1 casts image 2
        let mut canvas = Canvas::new(2, 2);
        comp.draw_shadow_frame(&obj, &shp, 1, upright(), &at_origin(), &mut canvas);
        assert_eq!(canvas.is_shadowed(1, 1), Some(true));
        assert_eq!(canvas.is_shadowed(0, 0), Some(false));

        // frame 0 casts image 1
        let mut canvas = Canvas::new(2, 2);
        comp.draw_shadow_frame(&obj, &shp, 0, upright(), &at_origin(), &mut canvas);
        assert_eq!(canvas.is_shadowed(0, 0), Some(true));
        assert_eq!(canvas.is_shadowed(1, 1), Some(false));

        // frame 2 has no shadow image
        let mut canvas = Canvas::new(2, 2);
        comp.draw_shadow_frame(&obj, &shp, 2, upright(), &at_origin(), &mut canvas);
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert_eq!(canvas.is_shadowed(x, y), Some(false));
        }
    }

    #[test]
    fn test_tile_elevation_raises_cast_height() {
        let mut comp = compositor(BuildingZ::missing());
        let mut canvas = Canvas::new(2, 2);
        let obj = object();
        let mut tall = obj.clone();
        tall.tile.z = 4;
        comp.draw(&tall, &sprite(vec![1; 4]), upright(), &DrawProperties { offset: Point::new(1, 61), ..at_origin() }, &mut canvas, 0);
        assert_eq!(canvas.z_at(0, 0), Some(2));
        assert_eq!(canvas.height_at(0, 0), Some(62));

        // level with the stored depth, so only the height decides
        let shp = with_shadow(vec![1; 4], vec![1; 4]);
        let props = DrawProperties {
            z_adjust: 1,
            ..at_origin()
        };
        comp.draw_shadow(&obj, &shp, upright(), &props, &mut canvas);
        assert_eq!(canvas.is_shadowed(0, 0), Some(false));

        let bridge = SpriteShape {
            tile_elevation: 4,
            ..upright()
        };
        comp.draw_shadow(&obj, &shp, bridge, &props, &mut canvas);
        assert_eq!(canvas.is_shadowed(0, 0), Some(true));
        assert_eq!(canvas.pixel(0, 0), Some(Rgb::new(100, 0, 0)));
    }

    #[test]
    fn test_bounds_leave_random_frames_alone() {
        let images = (1..=4).map(|n| ShpImage::new(0, 0, n, n, vec![1; (n * n) as usize])).collect();
        let shp = ShpFile::new("test.shp", 8, 8, images);
        let props = DrawProperties {
            frame_decider: FrameDecider::Random,
            ..at_origin()
        };
        let obj = object();

        let mut queried = compositor(BuildingZ::missing());
        let mut fresh = compositor(BuildingZ::missing());
        for _ in 0..8 {
            let bounds = queried.bounds(&obj, &shp, &props);
            assert_eq!(queried.bounds(&obj, &shp, &props), bounds);

            let frame = queried.decide_frame(&obj, &shp, &props).expect("non-empty table");
            assert_eq!(fresh.decide_frame(&obj, &shp, &props), Some(frame));
            assert_eq!(queried.frame_bounds(&obj, &shp, frame, &props), bounds);
        }
    }

    #[test]
    fn test_random_frame_avoids_shadow_half() {
        let mut comp = compositor(BuildingZ::missing());
        let shp = with_shadow(vec![1; 4], vec![1; 4]);
        let props = DrawProperties {
            frame_decider: FrameDecider::Random,
            has_shadow: true,
            ..at_origin()
        };
        for _ in 0..32 {
            assert_eq!(comp.decide_frame(&object(), &shp, &props), Some(0));
        }
    }

    #[test]
    fn test_alpha_multiplies() {
        let mut comp = compositor(BuildingZ::missing());
        let mut canvas = Canvas::new(60, 30);
        // the alpha origin sits half a cell to the right of the sprite origin
        let x0 = 30;
        canvas.set_pixel(x0, 0, Rgb::new(100, 100, 100));
        canvas.set_pixel(x0 + 1, 0, Rgb::new(100, 100, 100));
        canvas.set_pixel(x0, 1, Rgb::new(200, 200, 200));
        let shp = ShpFile::new("alpha.shp", 2, 2, vec![ShpImage::new(0, 0, 2, 2, vec![127, 0, 254, 0])]);
        comp.draw_alpha(&object(), &shp, &at_origin(), &mut canvas);

        assert_eq!(canvas.pixel(x0, 0), Some(Rgb::new(100, 100, 100)));
        assert_eq!(canvas.pixel(x0 + 1, 0), Some(Rgb::new(100, 100, 100)));
        assert_eq!(canvas.pixel(x0, 1), Some(Rgb::new(255, 255, 255)));
        // no depth involved
        assert_eq!(canvas.z_at(x0, 0), Some(Z_EMPTY));
    }

    #[test]
    fn test_building_z_depth() {
        // 4x4 map, every pixel 7
        let zmap = BuildingZ::from_image(ShpImage::new(0, 0, 4, 4, vec![7; 16]));
        let mut comp = compositor(zmap);
        let mut canvas = Canvas::new(2, 2);
        let shape = SpriteShape {
            building_part: true,
            foundation_width: 0,
            ..SpriteShape::default()
        };
        comp.draw(&object(), &sprite(vec![1; 4]), shape, &at_origin(), &mut canvas, 0);
        assert_eq!(canvas.z_at(0, 0), Some(7));
        assert_eq!(canvas.pixel(0, 0), Some(RED));
    }

    #[test]
    fn test_building_z_visualization() {
        let zmap = BuildingZ::from_image(ShpImage::new(0, 0, 4, 4, vec![7; 16]));
        let mut config = RenderConfig::new(EngineType::RedAlert2, TheaterType::Temperate);
        config.visualize_building_z = true;
        let mut comp = Compositor::new(&config, Arc::new(zmap));
        let mut canvas = Canvas::new(2, 2);
        let shape = SpriteShape {
            building_part: true,
            ..SpriteShape::default()
        };
        comp.draw(&object(), &sprite(vec![1; 4]), shape, &at_origin(), &mut canvas, 0);
        assert_eq!(canvas.pixel(1, 1), Some(Rgb::grey(7)));
    }

    #[test]
    fn test_building_without_map_uses_height() {
        let mut comp = compositor(BuildingZ::missing());
        let mut canvas = Canvas::new(2, 2);
        let shape = SpriteShape {
            building_part: true,
            ..SpriteShape::default()
        };
        comp.draw(&object(), &sprite(vec![1; 4]), shape, &at_origin(), &mut canvas, 0);
        assert_eq!(canvas.z_at(0, 0), Some(2));
    }

    #[test]
    fn test_tile_draw() {
        let comp = compositor(BuildingZ::missing());
        let mut canvas = Canvas::new(4, 4);
        let tmp = TmpFile {
            name: "clear01.tem".to_string(),
            images: vec![TileImage {
                x: 1,
                y: 1,
                width: 2,
                height: 2,
                pixels: vec![1, 0, 2, 2],
            }],
        };
        let obj = object().with_state(ObjectState::Tile { sub_tile: 3 });
        comp.draw_tile(&obj, &tmp, &mut canvas);
        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(2, 1), Some(Rgb::BLACK));
        assert_eq!(canvas.pixel(2, 2), Some(BLUE));
        assert_eq!(canvas.z_at(1, 1), Some(-2));
        assert_eq!(comp.tile_bounds(&obj, &tmp), Rect::new(Point::new(1, 1), Size::new(2, 2)));
    }
}

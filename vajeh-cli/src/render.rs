//! Word-frequency glyph renderer.
//!
//! Counts whitespace-separated words of the final (already reshaped) text,
//! scales font sizes linearly with frequency, packs words greedily onto the
//! canvas (optionally constrained by a mask image), and fills glyph
//! outlines straight from the font tables. The renderer lays glyphs out
//! strictly left to right; shaping and reordering happened upstream.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};
use ttf_parser::{Face, OutlineBuilder};

use vajeh_core::ports::Renderer;
use vajeh_core::{PipelineError, RenderConfig, Result};

/// Smallest size a word is drawn at.
const MIN_FONT_SIZE: f32 = 12.0;

/// Most words placed on one canvas.
const MAX_WORDS: usize = 200;

/// Gap kept around each placed word.
const WORD_MARGIN: f32 = 4.0;

/// Grid step of the placement search.
const PLACEMENT_STEP: f32 = 6.0;

/// Mask luma below which a pixel accepts words (white = excluded).
const MASK_THRESHOLD: u8 = 250;

/// Word colors for light backgrounds.
const DARK_PALETTE: [[u8; 3]; 6] = [
    [31, 58, 95],
    [122, 37, 48],
    [30, 96, 74],
    [96, 60, 120],
    [150, 88, 22],
    [52, 52, 60],
];

/// Word colors for dark backgrounds.
const LIGHT_PALETTE: [[u8; 3]; 6] = [
    [225, 231, 238],
    [244, 187, 159],
    [166, 222, 199],
    [203, 184, 235],
    [240, 215, 140],
    [180, 198, 214],
];

/// Frequency-scaled word renderer over raw glyph outlines.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlyphCloudRenderer;

impl Renderer for GlyphCloudRenderer {
    fn render(&self, text: &str, config: &RenderConfig) -> Result<Vec<u8>> {
        let font_data = std::fs::read(&config.font_path).map_err(|err| {
            PipelineError::Config(format!(
                "cannot read font {}: {err}",
                config.font_path.display()
            ))
        })?;
        let face = Face::parse(&font_data, 0).map_err(|err| {
            PipelineError::Render(format!(
                "cannot parse font {}: {err}",
                config.font_path.display()
            ))
        })?;

        let (background, dark_background) = parse_background(&config.background)?;
        let palette = if dark_background {
            &LIGHT_PALETTE
        } else {
            &DARK_PALETTE
        };

        let ranked = frequencies(text);
        if ranked.is_empty() {
            return Err(PipelineError::Encoding(
                "no renderable words in final text".into(),
            ));
        }
        let max_count = ranked[0].1;

        let mask = match &config.mask_path {
            Some(path) => Some(PlacementMask::load(path, config.width, config.height)?),
            None => None,
        };

        let mut pixmap = Pixmap::new(config.width, config.height)
            .ok_or_else(|| PipelineError::Render("cannot allocate canvas".into()))?;
        pixmap.fill(background);

        let metrics = FontScale::new(&face);
        let mut placed: Vec<Rect> = Vec::new();
        let mut drawn = 0usize;

        for (rank, (word, count)) in ranked.iter().take(MAX_WORDS).enumerate() {
            let size = font_size_for(*count, max_count, config.max_font_size as f32);
            let width = metrics.text_width(&face, word, size);
            if width <= 0.0 {
                // The font covers nothing in this word.
                continue;
            }

            let rect_w = width + WORD_MARGIN;
            let rect_h = metrics.line_height(size) + WORD_MARGIN;
            let slot = find_slot(
                config.width as f32,
                config.height as f32,
                &placed,
                mask.as_ref(),
                rect_w,
                rect_h,
            );
            let Some((x, y)) = slot else {
                // Canvas (or mask region) is full at this size; smaller
                // words may still fit, so keep going.
                continue;
            };

            let [r, g, b] = palette[rank % palette.len()];
            let baseline = y + metrics.ascent(size);
            draw_word(&mut pixmap, &face, &metrics, word, size, x, baseline, [r, g, b]);
            placed.push(Rect {
                x,
                y,
                w: rect_w,
                h: rect_h,
            });
            drawn += 1;
        }

        if drawn == 0 {
            return Err(PipelineError::Encoding(
                "configured font covers none of the text".into(),
            ));
        }

        encode_png(&pixmap, config.width, config.height)
    }
}

/// Resolve the configured background name to a fill color and a
/// dark-background flag for palette selection.
fn parse_background(name: &str) -> Result<(tiny_skia::Color, bool)> {
    match name {
        "white" => Ok((tiny_skia::Color::from_rgba8(255, 255, 255, 255), false)),
        "black" => Ok((tiny_skia::Color::from_rgba8(0, 0, 0, 255), true)),
        other => Err(PipelineError::Config(format!(
            "unsupported background '{other}' (use \"white\" or \"black\")"
        ))),
    }
}

/// Word frequencies, most common first; ties keep first-seen order.
fn frequencies(text: &str) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (index, word) in text.split_whitespace().enumerate() {
        let entry = counts.entry(word).or_insert((index, 0));
        entry.1 += 1;
    }

    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| (b.1).1.cmp(&(a.1).1).then((a.1).0.cmp(&(b.1).0)));
    ranked
        .into_iter()
        .map(|(word, (_, count))| (word.to_string(), count))
        .collect()
}

/// Linear size scale between [`MIN_FONT_SIZE`] and `max_size` by relative
/// frequency.
fn font_size_for(count: usize, max_count: usize, max_size: f32) -> f32 {
    let max_size = max_size.max(MIN_FONT_SIZE);
    let ratio = count as f32 / max_count.max(1) as f32;
    MIN_FONT_SIZE + (max_size - MIN_FONT_SIZE) * ratio
}

/// Axis-aligned occupied region.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Rect {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

impl Rect {
    fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// Scanline search for the first free slot of `w` x `h` pixels.
fn find_slot(
    canvas_w: f32,
    canvas_h: f32,
    placed: &[Rect],
    mask: Option<&PlacementMask>,
    w: f32,
    h: f32,
) -> Option<(f32, f32)> {
    if w > canvas_w || h > canvas_h {
        return None;
    }
    let mut y = 0.0f32;
    while y + h <= canvas_h {
        let mut x = 0.0f32;
        while x + w <= canvas_w {
            let candidate = Rect { x, y, w, h };
            let clear = placed.iter().all(|rect| !rect.intersects(&candidate));
            if clear && mask.map_or(true, |m| m.allows(&candidate)) {
                return Some((x, y));
            }
            x += PLACEMENT_STEP;
        }
        y += PLACEMENT_STEP;
    }
    None
}

/// Mask image resampled to the canvas; white pixels exclude placement.
struct PlacementMask {
    width: u32,
    height: u32,
    allowed: Vec<bool>,
}

impl PlacementMask {
    fn load(path: &Path, width: u32, height: u32) -> Result<Self> {
        let img = image::open(path).map_err(|err| {
            PipelineError::Config(format!("cannot read mask {}: {err}", path.display()))
        })?;
        let gray = image::imageops::resize(
            &img.to_luma8(),
            width,
            height,
            image::imageops::FilterType::Nearest,
        );
        let allowed = gray.pixels().map(|p| p.0[0] < MASK_THRESHOLD).collect();
        Ok(Self {
            width,
            height,
            allowed,
        })
    }

    fn pixel_allowed(&self, x: f32, y: f32) -> bool {
        if x < 0.0 || y < 0.0 {
            return false;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width || y >= self.height {
            return false;
        }
        self.allowed[(y * self.width + x) as usize]
    }

    /// A rect is placeable when its corners and center all land on allowed
    /// pixels. Coarse, but cheap and stable.
    fn allows(&self, rect: &Rect) -> bool {
        let x1 = rect.x + rect.w - 1.0;
        let y1 = rect.y + rect.h - 1.0;
        [
            (rect.x, rect.y),
            (x1, rect.y),
            (rect.x, y1),
            (x1, y1),
            (rect.x + rect.w / 2.0, rect.y + rect.h / 2.0),
        ]
        .iter()
        .all(|&(x, y)| self.pixel_allowed(x, y))
    }
}

/// Font-units-to-pixels bookkeeping shared by measuring and drawing.
struct FontScale {
    units_per_em: f32,
    ascender: f32,
    descender: f32,
    space_advance: u16,
}

impl FontScale {
    fn new(face: &Face) -> Self {
        let units_per_em = face.units_per_em().max(1);
        let space_advance = face
            .glyph_index(' ')
            .and_then(|id| face.glyph_hor_advance(id))
            .unwrap_or(units_per_em / 2);
        Self {
            units_per_em: units_per_em as f32,
            ascender: face.ascender() as f32,
            descender: face.descender() as f32,
            space_advance,
        }
    }

    fn scale(&self, size: f32) -> f32 {
        size / self.units_per_em
    }

    fn ascent(&self, size: f32) -> f32 {
        self.ascender * self.scale(size)
    }

    fn line_height(&self, size: f32) -> f32 {
        (self.ascender - self.descender) * self.scale(size)
    }

    /// Advance-sum width; characters the font does not cover contribute
    /// nothing, in both measuring and drawing.
    fn text_width(&self, face: &Face, text: &str, size: f32) -> f32 {
        let mut advance = 0u32;
        for ch in text.chars() {
            if let Some(glyph) = face.glyph_index(ch) {
                advance += face.glyph_hor_advance(glyph).unwrap_or(self.space_advance) as u32;
            }
        }
        advance as f32 * self.scale(size)
    }
}

/// Appends one glyph outline into a path, scaled and flipped into canvas
/// coordinates (font outlines are y-up).
struct GlyphOutline<'a> {
    builder: &'a mut PathBuilder,
    scale: f32,
    dx: f32,
    dy: f32,
}

impl OutlineBuilder for GlyphOutline<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder
            .move_to(self.dx + x * self.scale, self.dy - y * self.scale);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder
            .line_to(self.dx + x * self.scale, self.dy - y * self.scale);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(
            self.dx + x1 * self.scale,
            self.dy - y1 * self.scale,
            self.dx + x * self.scale,
            self.dy - y * self.scale,
        );
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            self.dx + x1 * self.scale,
            self.dy - y1 * self.scale,
            self.dx + x2 * self.scale,
            self.dy - y2 * self.scale,
            self.dx + x * self.scale,
            self.dy - y * self.scale,
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_word(
    pixmap: &mut Pixmap,
    face: &Face,
    metrics: &FontScale,
    word: &str,
    size: f32,
    x: f32,
    baseline: f32,
    rgb: [u8; 3],
) {
    let scale = metrics.scale(size);
    let mut pen_x = x;
    let mut builder = PathBuilder::new();

    for ch in word.chars() {
        let Some(glyph) = face.glyph_index(ch) else {
            continue;
        };
        let mut outline = GlyphOutline {
            builder: &mut builder,
            scale,
            dx: pen_x,
            dy: baseline,
        };
        let _ = face.outline_glyph(glyph, &mut outline);
        pen_x += face.glyph_hor_advance(glyph).unwrap_or(metrics.space_advance) as f32 * scale;
    }

    // Whitespace-only or fully blank glyph runs produce no path.
    let Some(path) = builder.finish() else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color_rgba8(rgb[0], rgb[1], rgb[2], 255);
    paint.anti_alias = true;
    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
}

fn encode_png(pixmap: &Pixmap, width: u32, height: u32) -> Result<Vec<u8>> {
    let image = image::RgbaImage::from_raw(width, height, pixmap.data().to_vec())
        .ok_or_else(|| PipelineError::Render("failed to build image buffer".into()))?;
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|err| PipelineError::Render(format!("failed to encode PNG: {err}")))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequencies_rank_by_count_then_first_seen() {
        let ranked = frequencies("دل جان دل یار جان دل");
        assert_eq!(ranked[0], ("دل".to_string(), 3));
        assert_eq!(ranked[1], ("جان".to_string(), 2));
        assert_eq!(ranked[2], ("یار".to_string(), 1));
    }

    #[test]
    fn frequencies_of_empty_text_are_empty() {
        assert!(frequencies("   ").is_empty());
    }

    #[test]
    fn font_size_scales_monotonically() {
        let low = font_size_for(1, 10, 100.0);
        let mid = font_size_for(5, 10, 100.0);
        let high = font_size_for(10, 10, 100.0);
        assert!(low < mid && mid < high);
        assert!(low >= MIN_FONT_SIZE);
        assert_eq!(high, 100.0);
    }

    #[test]
    fn rect_intersection() {
        let a = Rect { x: 0.0, y: 0.0, w: 10.0, h: 10.0 };
        let b = Rect { x: 5.0, y: 5.0, w: 10.0, h: 10.0 };
        let c = Rect { x: 20.0, y: 0.0, w: 5.0, h: 5.0 };
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(!c.intersects(&a));
    }

    #[test]
    fn find_slot_prefers_the_origin() {
        assert_eq!(
            find_slot(100.0, 100.0, &[], None, 20.0, 10.0),
            Some((0.0, 0.0))
        );
    }

    #[test]
    fn find_slot_skips_occupied_space() {
        let placed = [Rect { x: 0.0, y: 0.0, w: 100.0, h: 10.0 }];
        let slot = find_slot(100.0, 100.0, &placed, None, 20.0, 10.0).unwrap();
        assert!(slot.1 >= 10.0, "slot {slot:?} overlaps the occupied row");
    }

    #[test]
    fn find_slot_rejects_oversized_words() {
        assert_eq!(find_slot(100.0, 100.0, &[], None, 200.0, 10.0), None);
    }

    #[test]
    fn mask_gates_placement() {
        // Left half allowed, right half excluded.
        let mask = PlacementMask {
            width: 100,
            height: 10,
            allowed: (0..100 * 10).map(|i| (i % 100) < 50).collect(),
        };
        let left = Rect { x: 0.0, y: 0.0, w: 40.0, h: 10.0 };
        let right = Rect { x: 60.0, y: 0.0, w: 30.0, h: 10.0 };
        assert!(mask.allows(&left));
        assert!(!mask.allows(&right));

        let slot = find_slot(100.0, 10.0, &[], Some(&mask), 30.0, 10.0);
        assert_eq!(slot, Some((0.0, 0.0)));
    }

    #[test]
    fn out_of_bounds_pixels_are_excluded() {
        let mask = PlacementMask {
            width: 10,
            height: 10,
            allowed: vec![true; 100],
        };
        assert!(!mask.pixel_allowed(-1.0, 0.0));
        assert!(!mask.pixel_allowed(10.0, 0.0));
        assert!(mask.pixel_allowed(9.0, 9.0));
    }

    #[test]
    fn unknown_background_is_a_config_error() {
        assert!(parse_background("magenta").is_err());
        assert!(parse_background("white").is_ok());
        assert!(parse_background("black").unwrap().1);
    }
}

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::colormap::{Colormap, Rgb};
use super::frequencies::WeightedWord;

/// How prominently a word is drawn; terminals have one font size, so size
/// is expressed through case and letter spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    Large,
    Medium,
    Small,
}

impl SizeTier {
    pub fn for_weight(weight: f64) -> Self {
        if weight >= 0.66 {
            SizeTier::Large
        } else if weight >= 0.33 {
            SizeTier::Medium
        } else {
            SizeTier::Small
        }
    }

    pub fn render(&self, word: &str) -> String {
        match self {
            SizeTier::Large => word
                .to_uppercase()
                .chars()
                .map(String::from)
                .collect::<Vec<_>>()
                .join(" "),
            SizeTier::Medium => word.to_uppercase(),
            SizeTier::Small => word.to_string(),
        }
    }

    pub fn is_bold(&self) -> bool {
        !matches!(self, SizeTier::Small)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub text: String,
    pub x: u16,
    pub y: u16,
    pub vertical: bool,
    pub weight: f64,
    pub tier: SizeTier,
    pub color: Rgb,
}

impl PlacedWord {
    /// Cells covered by the word, as (x, y, char); wide chars cover two
    /// columns and are reported once at their first column.
    pub fn cells(&self) -> Vec<(u16, u16, char)> {
        let mut cells = Vec::new();
        let mut offset = 0u16;
        for ch in self.text.chars() {
            if self.vertical {
                cells.push((self.x, self.y + offset, ch));
                offset += 1;
            } else {
                cells.push((self.x + offset, self.y, ch));
                offset += ch.width().unwrap_or(0) as u16;
            }
        }
        cells
    }

    fn size(&self) -> (u16, u16) {
        text_size(&self.text, self.vertical)
    }
}

/// One cell of a rendered cloud
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CloudCell {
    Empty,
    Glyph { ch: char, word: usize },
    /// Second column of a wide glyph
    Continuation,
}

#[derive(Debug, Clone)]
pub struct CloudLayout {
    pub width: u16,
    pub height: u16,
    pub background: Rgb,
    pub words: Vec<PlacedWord>,
}

impl CloudLayout {
    /// Row-major cell grid for renderers
    pub fn grid(&self) -> Vec<Vec<CloudCell>> {
        let mut grid = vec![vec![CloudCell::Empty; self.width as usize]; self.height as usize];
        for (index, word) in self.words.iter().enumerate() {
            for (x, y, ch) in word.cells() {
                let (x, y) = (x as usize, y as usize);
                if y >= grid.len() || x >= grid[y].len() {
                    continue;
                }
                grid[y][x] = CloudCell::Glyph { ch, word: index };
                if ch.width() == Some(2) && x + 1 < grid[y].len() {
                    grid[y][x + 1] = CloudCell::Continuation;
                }
            }
        }
        grid
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn text_size(text: &str, vertical: bool) -> (u16, u16) {
    if vertical {
        (1, text.chars().count() as u16)
    } else {
        (text.width() as u16, 1)
    }
}

struct Occupancy {
    width: u16,
    height: u16,
    cells: Vec<bool>,
}

impl Occupancy {
    fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    /// Box must be inside the canvas; one column of padding either side is
    /// checked where it exists so words never touch horizontally
    fn fits(&self, x: i32, y: i32, w: u16, h: u16) -> bool {
        if x < 0 || y < 0 || x + w as i32 > self.width as i32 || y + h as i32 > self.height as i32 {
            return false;
        }
        for cy in y..y + h as i32 {
            for cx in (x - 1)..(x + w as i32 + 1) {
                if cx < 0 || cx >= self.width as i32 {
                    continue;
                }
                if self.cells[cy as usize * self.width as usize + cx as usize] {
                    return false;
                }
            }
        }
        true
    }

    fn mark(&mut self, x: u16, y: u16, w: u16, h: u16) {
        for cy in y..y + h {
            for cx in x..x + w {
                self.cells[cy as usize * self.width as usize + cx as usize] = true;
            }
        }
    }
}

/// Positions visited spiralling out from the canvas centre. Cells are about
/// twice as tall as wide, so the x axis is stretched.
fn spiral(width: u16, height: u16, box_w: u16, box_h: u16) -> impl Iterator<Item = (i32, i32)> {
    let origin_x = (width as f64 - box_w as f64) / 2.0;
    let origin_y = (height as f64 - box_h as f64) / 2.0;
    let max_radius = width.max(height) as f64 * 1.2;

    (0..)
        .map(move |step: u32| {
            let angle = step as f64 * 0.15;
            let radius = 0.35 * angle;
            (
                radius,
                (origin_x + radius * angle.cos() * 2.0).round() as i32,
                (origin_y + radius * angle.sin()).round() as i32,
            )
        })
        .take_while(move |(radius, _, _)| *radius <= max_radius)
        .map(|(_, x, y)| (x, y))
}

pub struct LayoutParams {
    pub width: u16,
    pub height: u16,
    pub background: Rgb,
    pub colormap: Colormap,
    pub prefer_horizontal: f64,
    pub seed: u64,
}

/// Place words largest first; words that find no free spot are dropped
pub fn layout(words: &[WeightedWord], params: &LayoutParams) -> CloudLayout {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut occupancy = Occupancy::new(params.width, params.height);
    let mut placed = Vec::new();
    let prefer_horizontal = params.prefer_horizontal.clamp(0.0, 1.0);

    for entry in words {
        if params.width == 0 || params.height == 0 {
            break;
        }

        let tier = SizeTier::for_weight(entry.weight);
        let text = tier.render(&entry.word);
        let narrow = text.chars().all(|c| c.width() == Some(1));
        let wants_vertical = !rng.gen_bool(prefer_horizontal) && narrow;
        let color = params.colormap.sample(rng.gen::<f64>());

        let orientations = if wants_vertical { [true, false] } else { [false, true] };
        let mut position = None;
        for vertical in orientations {
            if vertical && !narrow {
                continue;
            }
            let (w, h) = text_size(&text, vertical);
            if w == 0 || w > params.width || h > params.height {
                continue;
            }
            if let Some((x, y)) = spiral(params.width, params.height, w, h)
                .find(|(x, y)| occupancy.fits(*x, *y, w, h))
            {
                position = Some((x as u16, y as u16, vertical));
                break;
            }
        }

        let Some((x, y, vertical)) = position else {
            continue;
        };

        let word = PlacedWord {
            word: entry.word.clone(),
            text,
            x,
            y,
            vertical,
            weight: entry.weight,
            tier,
            color,
        };
        let (w, h) = word.size();
        occupancy.mark(x, y, w, h);
        placed.push(word);
    }

    CloudLayout {
        width: params.width,
        height: params.height,
        background: params.background,
        words: placed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weighted(words: &[(&str, f64)]) -> Vec<WeightedWord> {
        words
            .iter()
            .map(|(w, weight)| WeightedWord {
                word: w.to_string(),
                count: (weight * 10.0) as usize,
                weight: *weight,
            })
            .collect()
    }

    fn params(width: u16, height: u16, prefer_horizontal: f64) -> LayoutParams {
        LayoutParams {
            width,
            height,
            background: Rgb::WHITE,
            colormap: Colormap::Inferno,
            prefer_horizontal,
            seed: 42,
        }
    }

    #[test]
    fn test_tiers() {
        assert_eq!(SizeTier::for_weight(1.0).render("love"), "L O V E");
        assert_eq!(SizeTier::for_weight(0.5).render("love"), "LOVE");
        assert_eq!(SizeTier::for_weight(0.1).render("love"), "love");
    }

    #[test]
    fn test_no_overlap_and_in_bounds() {
        let words = weighted(&[
            ("love", 1.0), ("story", 0.8), ("romeo", 0.6), ("baby", 0.5), ("princess", 0.4),
            ("scarlet", 0.3), ("letter", 0.3), ("balcony", 0.2), ("summer", 0.2), ("air", 0.1),
            ("father", 0.1), ("stay", 0.1), ("away", 0.1), ("juliet", 0.1), ("yes", 0.1),
        ]);
        let cloud = layout(&words, &params(60, 16, 0.8));

        assert!(!cloud.is_empty());
        let mut seen = std::collections::HashSet::new();
        for word in &cloud.words {
            for (x, y, _) in word.cells() {
                assert!(x < 60 && y < 16, "{} out of bounds", word.word);
                assert!(seen.insert((x, y)), "overlap at {},{}", x, y);
            }
        }
    }

    #[test]
    fn test_largest_word_is_centred() {
        let cloud = layout(&weighted(&[("love", 1.0)]), &params(41, 11, 1.0));
        let word = &cloud.words[0];
        assert!(!word.vertical);
        assert_eq!(word.text, "L O V E");
        assert_eq!((word.x, word.y), (17, 5));
    }

    #[test]
    fn test_horizontal_only_when_preferred() {
        let words = weighted(&[("alpha", 1.0), ("bravo", 0.5), ("charlie", 0.2), ("delta", 0.2)]);
        let cloud = layout(&words, &params(60, 12, 1.0));
        assert!(cloud.words.iter().all(|w| !w.vertical));
    }

    #[test]
    fn test_deterministic_for_seed() {
        let words = weighted(&[("alpha", 1.0), ("bravo", 0.5), ("charlie", 0.2), ("delta", 0.2)]);
        let a = layout(&words, &params(50, 12, 0.5));
        let b = layout(&words, &params(50, 12, 0.5));
        assert_eq!(a.words, b.words);
    }

    #[test]
    fn test_words_that_do_not_fit_are_skipped() {
        let words = weighted(&[("supercalifragilistic", 1.0), ("ok", 0.1)]);
        let cloud = layout(&words, &params(8, 1, 1.0));
        assert_eq!(cloud.words.len(), 1);
        assert_eq!(cloud.words[0].word, "ok");
    }

    #[test]
    fn test_grid_marks_glyphs() {
        let cloud = layout(&weighted(&[("hey", 0.1)]), &params(5, 1, 1.0));
        let grid = cloud.grid();
        assert_eq!(grid[0][1], CloudCell::Glyph { ch: 'h', word: 0 });
        assert_eq!(grid[0][0], CloudCell::Empty);
    }

    #[test]
    fn test_empty_canvas() {
        let cloud = layout(&weighted(&[("love", 1.0)]), &params(0, 0, 0.8));
        assert!(cloud.is_empty());
    }
}

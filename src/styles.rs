//! Art styles — the visual theme catalog and the jackpot randomizer.
//!
//! The catalog is read-only presentation data; only the jackpot state
//! machine carries behavior. A spin animates through the catalog with a
//! decaying step interval and lands on a uniformly random entry, reported
//! to the caller exactly once. `spin()` while a spin is running is a no-op;
//! a started spin always runs to completion.

use std::time::{Duration, Instant};

use rand::Rng;
use ratatui::style::Color;

use crate::constants::{SPIN_EXTRA_STEPS, SPIN_MIN_STEPS, SPIN_START_INTERVAL_MS};

/// Color palette of one art style, as `#RRGGBB` hex strings.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub text: &'static str,
    /// Descriptive only; terminals cannot switch fonts.
    pub font_family: &'static str,
}

/// A named visual theme.
#[derive(Clone, Copy, Debug)]
pub struct ArtStyle {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub palette: Palette,
}

/// Parse a `#RRGGBB` hex color into a terminal RGB color.
pub fn rgb(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    let parse = |range| u8::from_str_radix(hex.get(range).unwrap_or("0"), 16).unwrap_or(0);
    Color::Rgb(parse(0..2), parse(2..4), parse(4..6))
}

/// The fixed style catalog; presentation data only.
pub const ART_STYLES: &[ArtStyle] = &[
    ArtStyle { id: "minimalist", name: "Bauhaus Modern", description: "Clean, geometric, functional", palette: Palette { primary: "#005596", secondary: "#F0F0F0", accent: "#D93025", background: "#FFFFFF", text: "#1F2937", font_family: "sans-serif" } },
    ArtStyle { id: "vangogh", name: "Starry Night", description: "Swirling blues and yellows", palette: Palette { primary: "#1D4E89", secondary: "#E8D44D", accent: "#D79227", background: "#0B1D3F", text: "#FFFFFF", font_family: "serif" } },
    ArtStyle { id: "davinci", name: "Renaissance Sketch", description: "Sepia tones, parchment", palette: Palette { primary: "#5C4033", secondary: "#D2B48C", accent: "#8B4513", background: "#F5DEB3", text: "#2F1B0C", font_family: "serif" } },
    ArtStyle { id: "cyberpunk", name: "Neon Future", description: "Dark mode with neon glow", palette: Palette { primary: "#00FF9D", secondary: "#FF00FF", accent: "#00FFFF", background: "#0F0F1A", text: "#E0E0E0", font_family: "monospace" } },
    ArtStyle { id: "monet", name: "Water Lilies", description: "Soft pastels, impressionism", palette: Palette { primary: "#6B8E23", secondary: "#ADD8E6", accent: "#D8BFD8", background: "#F0F8FF", text: "#2F4F4F", font_family: "serif" } },
    ArtStyle { id: "popart", name: "Pop Art", description: "Bold, comic book style", palette: Palette { primary: "#FF0000", secondary: "#FFFF00", accent: "#0000FF", background: "#FFFFFF", text: "#000000", font_family: "sans-serif" } },
    ArtStyle { id: "ukiyo", name: "Great Wave", description: "Japanese woodblock", palette: Palette { primary: "#2B3A42", secondary: "#A5C4D4", accent: "#D96C6C", background: "#F2E9E1", text: "#1A1A1A", font_family: "serif" } },
    ArtStyle { id: "dali", name: "Surrealist", description: "Dreamlike, melting forms", palette: Palette { primary: "#C19A6B", secondary: "#87CEEB", accent: "#FF4500", background: "#FDF5E6", text: "#4B0082", font_family: "serif" } },
    ArtStyle { id: "mondrian", name: "De Stijl", description: "Grids and primary colors", palette: Palette { primary: "#FF0000", secondary: "#FFFF00", accent: "#0000FF", background: "#FFFFFF", text: "#000000", font_family: "sans-serif" } },
    ArtStyle { id: "matrix", name: "The Code", description: "Digital rain", palette: Palette { primary: "#00FF00", secondary: "#003300", accent: "#FFFFFF", background: "#000000", text: "#00FF00", font_family: "monospace" } },
    ArtStyle { id: "vaporwave", name: "Vaporwave", description: "Retro aesthetics", palette: Palette { primary: "#FF71CE", secondary: "#01CDFE", accent: "#05FFA1", background: "#2B1B48", text: "#FFFFFF", font_family: "sans-serif" } },
    ArtStyle { id: "artdeco", name: "Art Deco", description: "Gold and black, luxury", palette: Palette { primary: "#D4AF37", secondary: "#000000", accent: "#C0C0C0", background: "#1A1A1A", text: "#D4AF37", font_family: "serif" } },
    ArtStyle { id: "watercolor", name: "Watercolor", description: "Bleeding colors, soft", palette: Palette { primary: "#FF6F61", secondary: "#6B5B95", accent: "#88B04B", background: "#FFFFFF", text: "#333333", font_family: "sans-serif" } },
    ArtStyle { id: "noir", name: "Film Noir", description: "High contrast black & white", palette: Palette { primary: "#000000", secondary: "#808080", accent: "#FFFFFF", background: "#121212", text: "#D3D3D3", font_family: "serif" } },
    ArtStyle { id: "blueprint", name: "Engineering", description: "Technical blueprint", palette: Palette { primary: "#FFFFFF", secondary: "#0044CC", accent: "#FFFF00", background: "#003399", text: "#FFFFFF", font_family: "monospace" } },
    ArtStyle { id: "klimt", name: "The Kiss", description: "Gold leaf and patterns", palette: Palette { primary: "#DAA520", secondary: "#B8860B", accent: "#CD853F", background: "#2F2F2F", text: "#FFF8DC", font_family: "serif" } },
    ArtStyle { id: "chalkboard", name: "Classroom", description: "Chalk on slate", palette: Palette { primary: "#FFFFFF", secondary: "#E0E0E0", accent: "#FFD700", background: "#3B3B3B", text: "#FFFFFF", font_family: "sans-serif" } },
    ArtStyle { id: "pastel", name: "Pastel Goth", description: "Soft but edgy", palette: Palette { primary: "#FFD1DC", secondary: "#B39EB5", accent: "#77DD77", background: "#363636", text: "#FFFFFF", font_family: "sans-serif" } },
    ArtStyle { id: "retro", name: "80s Arcade", description: "Pixel art vibe", palette: Palette { primary: "#FF0055", secondary: "#22EEAA", accent: "#FFDD00", background: "#110022", text: "#FFFFFF", font_family: "monospace" } },
    ArtStyle { id: "nature", name: "Botanical", description: "Organic greens", palette: Palette { primary: "#228B22", secondary: "#8FBC8F", accent: "#556B2F", background: "#F5F5DC", text: "#006400", font_family: "serif" } },
];

// ── Jackpot state machine ────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpinState {
    Idle,
    Spinning,
}

/// The randomized style picker.
///
/// Drive it from the event loop: `spin()` to start, `tick(now)` every
/// iteration. `tick` returns the landed style exactly once per spin.
#[derive(Debug)]
pub struct Jackpot {
    state: SpinState,
    display_index: usize,
    steps_remaining: u32,
    final_index: usize,
    interval: Duration,
    next_step_at: Instant,
}

impl Jackpot {
    pub fn new() -> Self {
        Self {
            state: SpinState::Idle,
            display_index: 0,
            steps_remaining: 0,
            final_index: 0,
            interval: Duration::from_millis(SPIN_START_INTERVAL_MS),
            next_step_at: Instant::now(),
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.state == SpinState::Spinning
    }

    /// The catalog index currently shown in the jackpot window.
    pub fn display_index(&self) -> usize {
        self.display_index
    }

    /// Start a spin. A no-op while a spin is already running; the running
    /// spin is neither restarted nor queued.
    pub fn spin(&mut self, now: Instant) {
        self.spin_with(now, &mut rand::thread_rng());
    }

    /// `spin` with an explicit RNG so tests can drive it deterministically.
    pub fn spin_with<R: Rng>(&mut self, now: Instant, rng: &mut R) {
        if self.state == SpinState::Spinning {
            return;
        }
        self.state = SpinState::Spinning;
        self.steps_remaining = SPIN_MIN_STEPS + rng.gen_range(0..SPIN_EXTRA_STEPS);
        // Drawn up front, uniform over the catalog and independent of
        // wherever the animation happens to stop.
        self.final_index = rng.gen_range(0..ART_STYLES.len());
        self.interval = Duration::from_millis(SPIN_START_INTERVAL_MS);
        self.next_step_at = now + self.interval;
    }

    /// Advance the animation to `now`. Returns the chosen style on the
    /// Spinning → Idle transition and `None` at every other time.
    pub fn tick(&mut self, now: Instant) -> Option<&'static ArtStyle> {
        if self.state != SpinState::Spinning {
            return None;
        }
        while now >= self.next_step_at {
            self.display_index = (self.display_index + 1) % ART_STYLES.len();
            self.steps_remaining -= 1;

            if self.steps_remaining == 0 {
                self.display_index = self.final_index;
                self.state = SpinState::Idle;
                return Some(&ART_STYLES[self.final_index]);
            }

            // Decaying speed: the reel slows over the last ten steps and
            // slows harder over the last five.
            if self.steps_remaining <= 5 {
                self.interval += Duration::from_millis(60);
            } else if self.steps_remaining <= 10 {
                self.interval += Duration::from_millis(30);
            }
            self.next_step_at += self.interval;
        }
        None
    }
}

impl Default for Jackpot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Run a spin to completion, returning the emitted styles and the
    /// number of ticks it took.
    fn run_spin(jackpot: &mut Jackpot, start: Instant) -> (Vec<&'static ArtStyle>, u32) {
        let mut emitted = Vec::new();
        let mut ticks = 0;
        let mut now = start;
        while jackpot.is_spinning() {
            now += Duration::from_millis(25);
            ticks += 1;
            if let Some(style) = jackpot.tick(now) {
                emitted.push(style);
            }
            assert!(ticks < 100_000, "spin never completed");
        }
        (emitted, ticks)
    }

    #[test]
    fn spin_while_spinning_is_a_no_op() {
        let mut jackpot = Jackpot::new();
        let mut rng = StdRng::seed_from_u64(7);
        let now = Instant::now();

        jackpot.spin_with(now, &mut rng);
        let steps = jackpot.steps_remaining;
        let shown = jackpot.display_index();

        jackpot.spin_with(now, &mut rng);
        assert!(jackpot.is_spinning());
        assert_eq!(jackpot.steps_remaining, steps);
        assert_eq!(jackpot.display_index(), shown);
    }

    #[test]
    fn completed_spin_emits_exactly_once_and_returns_to_idle() {
        let mut jackpot = Jackpot::new();
        let mut rng = StdRng::seed_from_u64(42);
        let start = Instant::now();

        jackpot.spin_with(start, &mut rng);
        let (emitted, _) = run_spin(&mut jackpot, start);

        assert_eq!(emitted.len(), 1);
        assert!(!jackpot.is_spinning());
        assert_eq!(jackpot.display_index(), jackpot.final_index);

        // Further ticks emit nothing.
        assert!(jackpot.tick(start + Duration::from_secs(60)).is_none());
    }

    #[test]
    fn step_count_stays_within_the_configured_range() {
        for seed in 0..32 {
            let mut jackpot = Jackpot::new();
            let mut rng = StdRng::seed_from_u64(seed);
            jackpot.spin_with(Instant::now(), &mut rng);
            assert!(jackpot.steps_remaining >= SPIN_MIN_STEPS);
            assert!(jackpot.steps_remaining < SPIN_MIN_STEPS + SPIN_EXTRA_STEPS);
            assert!(jackpot.final_index < ART_STYLES.len());
        }
    }

    #[test]
    fn idle_tick_is_inert() {
        let mut jackpot = Jackpot::new();
        assert!(jackpot.tick(Instant::now() + Duration::from_secs(5)).is_none());
        assert_eq!(jackpot.display_index(), 0);
    }

    #[test]
    fn hex_palette_maps_to_terminal_rgb() {
        assert_eq!(rgb("#005596"), Color::Rgb(0, 85, 150));
        assert_eq!(rgb("#FFFFFF"), Color::Rgb(255, 255, 255));
        // Malformed input degrades to black rather than panicking.
        assert_eq!(rgb("#xyz"), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn catalog_ids_are_unique() {
        for style in ART_STYLES {
            let hits = ART_STYLES.iter().filter(|s| s.id == style.id).count();
            assert_eq!(hits, 1, "duplicate id {}", style.id);
        }
        assert_eq!(ART_STYLES.len(), 20);
    }
}

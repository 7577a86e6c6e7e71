//! Falling-petal backdrop: randomized particle descriptors and the CSS text
//! that animates them. Each petal owns a uniquely named `@keyframes` rule so
//! sway paths stay out of phase.

use crate::config::PetalConfig;

/// Source of uniformly distributed values in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

impl<F: FnMut() -> f64> RandomSource for F {
    fn next_f64(&mut self) -> f64 {
        self()
    }
}

/// Randomized parameters of one petal.
#[derive(Clone, Debug, PartialEq)]
pub struct PetalDescriptor {
    pub index: usize,
    /// Width in px; height is 1.5x.
    pub size: f64,
    /// Horizontal start position in percent of the container.
    pub left: f64,
    /// Seconds per fall.
    pub duration: f64,
    /// Seconds, never positive: petals start mid-flight.
    pub delay: f64,
    pub opacity: f64,
    pub color: String,
    /// Degrees.
    pub rotation: i32,
    pub sway_a: i32,
    pub sway_b: i32,
}

fn round_to(v: f64, places: i32) -> f64 {
    let k = 10f64.powi(places);
    (v * k).round() / k
}

/// Petal count for the given viewport width.
pub fn petal_count(cfg: &PetalConfig, viewport_width: f64) -> usize {
    if viewport_width <= cfg.narrow_breakpoint {
        cfg.narrow_count
    } else {
        cfg.count
    }
}

pub fn generate_petals<R: RandomSource + ?Sized>(
    cfg: &PetalConfig,
    viewport_width: f64,
    rng: &mut R,
) -> Vec<PetalDescriptor> {
    let n = petal_count(cfg, viewport_width);
    (0..n).map(|i| PetalDescriptor::sample(i, &cfg.palette, rng)).collect()
}

impl PetalDescriptor {
    /// Draws every attribute from `rng`, in declaration order.
    pub fn sample<R: RandomSource + ?Sized>(
        index: usize,
        palette: &[String],
        rng: &mut R,
    ) -> Self {
        let size = rng.next_f64() * 10.0 + 8.0;
        let left = rng.next_f64() * 110.0 - 5.0;
        let duration = round_to(rng.next_f64() * 8.0 + 7.0, 1);
        let delay = -round_to(rng.next_f64() * 14.0, 1);
        // keep "-0.0" out of the CSS text
        let delay = if delay == 0.0 { 0.0 } else { delay };
        let opacity = round_to(rng.next_f64() * 0.35 + 0.28, 2);
        let pick = (rng.next_f64() * palette.len() as f64).floor() as usize;
        let color = palette
            .get(pick.min(palette.len().saturating_sub(1)))
            .cloned()
            .unwrap_or_default();
        let rotation = (rng.next_f64() * 360.0).round() as i32;
        let sway_a = ((rng.next_f64() - 0.5) * 90.0).round() as i32;
        let sway_b = ((rng.next_f64() - 0.5) * 90.0).round() as i32;
        PetalDescriptor {
            index,
            size,
            left,
            duration,
            delay,
            opacity,
            color,
            rotation,
            sway_a,
            sway_b,
        }
    }

    pub fn animation_name(&self) -> String {
        format!("fall-{}", self.index)
    }

    /// Five-stop path: above the viewport, fade in, two sway waypoints,
    /// fade out, exit below while still rotating.
    pub fn keyframes_css(&self) -> String {
        let r0 = self.rotation;
        let exit_x = (self.sway_a as f64 * 0.4).round() as i32;
        format!(
            "@keyframes {name} {{\n\
             \x20 0%   {{ transform: translate(0, -30px) rotate({r0}deg); opacity: 0; }}\n\
             \x20 8%   {{ opacity: {peak:.2}; }}\n\
             \x20 35%  {{ transform: translate({sa}px, 30vh) rotate({r1}deg); }}\n\
             \x20 65%  {{ transform: translate({sb}px, 68vh) rotate({r2}deg); }}\n\
             \x20 92%  {{ opacity: {fade:.2}; }}\n\
             \x20 100% {{ transform: translate({exit_x}px, 112vh) rotate({r3}deg); opacity: 0; }}\n\
             }}",
            name = self.animation_name(),
            peak = self.opacity,
            sa = self.sway_a,
            sb = self.sway_b,
            r1 = r0 + 200,
            r2 = r0 + 460,
            fade = self.opacity * 0.5,
            r3 = r0 + 720,
        )
    }

    /// Inline `style` text for the petal element.
    pub fn inline_style(&self) -> String {
        [
            format!("left: {:.1}%", self.left),
            format!("width: {:.1}px", self.size),
            format!("height: {:.1}px", self.size * 1.5),
            format!("background: {}", self.color),
            format!(
                "animation: {} {:.1}s {:.1}s linear infinite",
                self.animation_name(),
                self.duration,
                self.delay
            ),
        ]
        .join("; ")
    }
}

/// All keyframe rules in one block, inserted once into the page.
pub fn stylesheet(petals: &[PetalDescriptor]) -> String {
    petals
        .iter()
        .map(PetalDescriptor::keyframes_css)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Small deterministic LCG for reproducible sampling.
    struct Lcg(u64);

    impl RandomSource for Lcg {
        fn next_f64(&mut self) -> f64 {
            self.0 = self
                .0
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (self.0 >> 11) as f64 / (1u64 << 53) as f64
        }
    }

    #[test]
    fn narrow_viewport_gets_fewer_petals() {
        let cfg = PetalConfig::default();
        let mut rng = Lcg(7);
        let wide = generate_petals(&cfg, 1280.0, &mut rng);
        let narrow = generate_petals(&cfg, 390.0, &mut rng);
        assert_eq!(wide.len(), 26);
        assert_eq!(narrow.len(), 15);
        assert_eq!(petal_count(&cfg, 600.0), 15);
        assert_eq!(petal_count(&cfg, 601.0), 26);
    }

    #[test]
    fn animation_names_are_distinct() {
        let petals = generate_petals(&PetalConfig::default(), 1024.0, &mut Lcg(42));
        let names: HashSet<_> = petals.iter().map(|p| p.animation_name()).collect();
        assert_eq!(names.len(), petals.len());
        let css = stylesheet(&petals);
        for p in &petals {
            let rule = format!("@keyframes {} {{", p.animation_name());
            assert_eq!(css.matches(&rule).count(), 1);
        }
    }

    #[test]
    fn sampled_values_stay_in_range() {
        let cfg = PetalConfig::default();
        for p in generate_petals(&cfg, 1440.0, &mut Lcg(3)) {
            assert!((8.0..18.0).contains(&p.size));
            assert!((-5.0..105.0).contains(&p.left));
            assert!((7.0..=15.0).contains(&p.duration));
            assert!((-14.0..=0.0).contains(&p.delay));
            assert!((0.28..=0.63).contains(&p.opacity));
            assert!((0..=360).contains(&p.rotation));
            assert!((-45..=45).contains(&p.sway_a));
            assert!((-45..=45).contains(&p.sway_b));
            assert!(cfg.palette.contains(&p.color));
        }
    }

    #[test]
    fn extremes_of_the_random_source() {
        let palette: Vec<String> = vec!["#111".into(), "#222".into()];
        let low = PetalDescriptor::sample(0, &palette, &mut || 0.0);
        assert_eq!(low.size, 8.0);
        assert_eq!(low.left, -5.0);
        assert_eq!(low.delay, 0.0);
        assert!(low.delay.is_sign_positive());
        assert_eq!(low.color, "#111");
        assert_eq!(low.sway_a, -45);

        let high = PetalDescriptor::sample(1, &palette, &mut || 0.999_999);
        assert_eq!(high.color, "#222");
        assert_eq!(high.duration, 15.0);
        assert_eq!(high.delay, -14.0);
        assert_eq!(high.rotation, 360);
    }

    #[test]
    fn css_text_for_a_fixed_petal() {
        let p = PetalDescriptor {
            index: 3,
            size: 10.0,
            left: 12.34,
            duration: 9.5,
            delay: -2.0,
            opacity: 0.4,
            color: "#E8A0B0".into(),
            rotation: 90,
            sway_a: 20,
            sway_b: -10,
        };
        assert_eq!(
            p.inline_style(),
            "left: 12.3%; width: 10.0px; height: 15.0px; background: #E8A0B0; \
             animation: fall-3 9.5s -2.0s linear infinite"
        );
        let css = p.keyframes_css();
        assert!(css.starts_with("@keyframes fall-3 {"));
        assert!(css.contains("0%   { transform: translate(0, -30px) rotate(90deg); opacity: 0; }"));
        assert!(css.contains("8%   { opacity: 0.40; }"));
        assert!(css.contains("translate(20px, 30vh) rotate(290deg)"));
        assert!(css.contains("translate(-10px, 68vh) rotate(550deg)"));
        assert!(css.contains("92%  { opacity: 0.20; }"));
        assert!(css.contains("translate(8px, 112vh) rotate(810deg); opacity: 0;"));
    }
}

//! Two-set Venn diagram regions and their SVG geometry.

use std::fmt::Write as _;

/// The four regions of a two-set diagram inside the universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    /// Outside both sets: (A ∪ B)'.
    Outside,
    /// A minus B.
    OnlyA,
    /// B minus A.
    OnlyB,
    /// A ∩ B.
    Intersection,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::OnlyA,
        Region::Intersection,
        Region::OnlyB,
        Region::Outside,
    ];

    /// Region id used in responses and answer keys.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Region::Outside => "(AuB)'",
            Region::OnlyA => "AdB",
            Region::OnlyB => "BdA",
            Region::Intersection => "AiB",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|region| region.id() == id)
    }

    /// TeX label shown next to the region.
    #[must_use]
    pub const fn tex(self) -> &'static str {
        match self {
            Region::Outside => "(A \\cup B)'",
            Region::OnlyA => "A \\setminus B",
            Region::OnlyB => "B \\setminus A",
            Region::Intersection => "A \\cap B",
        }
    }
}

pub const UNIVERSE: [Region; 4] = [
    Region::OnlyA,
    Region::OnlyB,
    Region::Intersection,
    Region::Outside,
];
pub const UNION: [Region; 3] = [Region::OnlyA, Region::OnlyB, Region::Intersection];
pub const COMPLEMENT_A: [Region; 2] = [Region::Outside, Region::OnlyB];

/// Canvas and circle dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VennConfig {
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    /// Horizontal offset of each circle centre from the canvas centre.
    pub overlap: f64,
}

impl VennConfig {
    pub const DEFAULT: VennConfig = VennConfig {
        width: 500.0,
        height: 300.0,
        radius: 100.0,
        overlap: 60.0,
    };
    pub const SMALL: VennConfig = VennConfig {
        width: 400.0,
        height: 300.0,
        radius: 100.0,
        overlap: 60.0,
    };
    pub const EXTRA_SMALL: VennConfig = VennConfig {
        width: 300.0,
        height: 300.0,
        radius: 80.0,
        overlap: 50.0,
    };

    #[must_use]
    pub fn circle_a(&self) -> (f64, f64) {
        (self.width / 2.0 - self.overlap, self.height / 2.0)
    }

    #[must_use]
    pub fn circle_b(&self) -> (f64, f64) {
        (self.width / 2.0 + self.overlap, self.height / 2.0)
    }
}

impl Default for VennConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Drawable outline of one region.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionShape {
    Rect { width: f64, height: f64 },
    Path { d: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionOutline {
    pub region: Region,
    pub shape: RegionShape,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LensPaths {
    pub lens: String,
    pub left: String,
    pub right: String,
}

/// Paths for the lens and the two crescents of two equal circles on one
/// horizontal line. Disjoint circles yield empty paths.
#[must_use]
pub fn lens_paths(cx_a: f64, cx_b: f64, cy: f64, r: f64) -> LensPaths {
    let dx = cx_b - cx_a;
    if dx >= 2.0 * r {
        return LensPaths::default();
    }
    let a = dx / 2.0;
    let h = (r * r - a * a).sqrt();
    let px = (cx_a + cx_b) / 2.0;
    let (x1, y1) = (px, cy + h);
    let (x2, y2) = (px, cy - h);

    let mut lens = String::new();
    let mut left = String::new();
    let mut right = String::new();
    // Writing to a String cannot fail.
    let _ = write!(
        lens,
        "M {x1} {y1} A {r} {r} 0 0 1 {x2} {y2} A {r} {r} 0 0 1 {x1} {y1} Z"
    );
    let _ = write!(
        left,
        "M {x2} {y2} A {r} {r} 0 1 0 {x1} {y1} A {r} {r} 0 0 1 {x2} {y2} Z"
    );
    let _ = write!(
        right,
        "M {x1} {y1} A {r} {r} 0 1 0 {x2} {y2} A {r} {r} 0 0 1 {x1} {y1} Z"
    );
    LensPaths { lens, left, right }
}

/// All four region outlines, drawn back to front.
#[must_use]
pub fn construct(config: &VennConfig) -> Vec<RegionOutline> {
    let (cx_a, cy) = config.circle_a();
    let (cx_b, _) = config.circle_b();
    let paths = lens_paths(cx_a, cx_b, cy, config.radius);
    vec![
        RegionOutline {
            region: Region::Outside,
            shape: RegionShape::Rect {
                width: config.width,
                height: config.height,
            },
        },
        RegionOutline {
            region: Region::OnlyA,
            shape: RegionShape::Path { d: paths.left },
        },
        RegionOutline {
            region: Region::OnlyB,
            shape: RegionShape::Path { d: paths.right },
        },
        RegionOutline {
            region: Region::Intersection,
            shape: RegionShape::Path { d: paths.lens },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_ids_round_trip() {
        for region in Region::ALL {
            assert_eq!(Region::from_id(region.id()), Some(region));
        }
        assert_eq!(Region::from_id("AuB"), None);
    }

    #[test]
    fn overlapping_circles_produce_closed_paths() {
        let paths = lens_paths(190.0, 310.0, 150.0, 100.0);
        // a = 60, h = 80
        assert!(paths.lens.starts_with("M 250 230 A 100 100 0 0 1 250 70"));
        assert!(paths.left.ends_with('Z'));
        assert!(paths.right.contains("0 1 0"));
    }

    #[test]
    fn disjoint_circles_have_no_lens() {
        assert_eq!(lens_paths(0.0, 200.0, 0.0, 100.0), LensPaths::default());
    }

    #[test]
    fn construct_lists_universe_first() {
        let outlines = construct(&VennConfig::DEFAULT);
        assert_eq!(outlines.len(), 4);
        assert_eq!(outlines[0].region, Region::Outside);
        assert!(matches!(
            outlines[0].shape,
            RegionShape::Rect { width, height } if width == 500.0 && height == 300.0
        ));
    }

    #[test]
    fn presets_are_subsets_of_universe() {
        for region in UNION.iter().chain(COMPLEMENT_A.iter()) {
            assert!(UNIVERSE.contains(region));
        }
    }
}

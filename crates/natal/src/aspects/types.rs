use crate::western::Body;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Trine,
    Sextile,
    Square,
    Opposition,
}

impl AspectKind {
    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "Conjunction",
            AspectKind::Trine => "Trine",
            AspectKind::Sextile => "Sextile",
            AspectKind::Square => "Square",
            AspectKind::Opposition => "Opposition",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One aspect: exact angle and allowed orb
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectDefinition {
    pub kind: AspectKind,
    pub angle: f64,
    pub orb: f64,
}

impl AspectDefinition {
    /// Tolerance range covered on the [0, 180] separation scale.
    pub fn range(&self) -> (f64, f64) {
        ((self.angle - self.orb).max(0.0), (self.angle + self.orb).min(180.0))
    }
}

/// Aspect definitions in priority order; the position in the list is the rank.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectTable {
    definitions: Vec<AspectDefinition>,
}

impl Default for AspectTable {
    fn default() -> Self {
        Self::new(vec![
            AspectDefinition { kind: AspectKind::Conjunction, angle: 0.0, orb: 8.0 },
            AspectDefinition { kind: AspectKind::Trine, angle: 120.0, orb: 7.0 },
            AspectDefinition { kind: AspectKind::Sextile, angle: 60.0, orb: 4.0 },
            AspectDefinition { kind: AspectKind::Square, angle: 90.0, orb: 6.0 },
            AspectDefinition { kind: AspectKind::Opposition, angle: 180.0, orb: 8.0 },
        ])
    }
}

impl AspectTable {
    pub fn new(definitions: Vec<AspectDefinition>) -> Self {
        Self { definitions }
    }

    pub fn definitions(&self) -> &[AspectDefinition] {
        &self.definitions
    }

    /// Priority rank of `kind`, 0 being highest.
    pub fn rank(&self, kind: AspectKind) -> Option<usize> {
        self.definitions.iter().position(|d| d.kind == kind)
    }

    /// Replace one orb in place; the priority order is left untouched.
    pub fn with_orb(mut self, kind: AspectKind, orb: f64) -> Self {
        if let Some(def) = self.definitions.iter_mut().find(|d| d.kind == kind) {
            def.orb = orb;
        }
        self
    }

    /// Pairs of definitions whose tolerance ranges intersect. Separations in
    /// an overlap are claimed by the higher-priority definition.
    pub fn overlaps(&self) -> Vec<(AspectKind, AspectKind)> {
        let mut out = Vec::new();
        for (i, a) in self.definitions.iter().enumerate() {
            for b in &self.definitions[i + 1..] {
                let (a_lo, a_hi) = a.range();
                let (b_lo, b_hi) = b.range();
                if a_lo <= b_hi && b_lo <= a_hi {
                    out.push((a.kind, b.kind));
                }
            }
        }
        out
    }
}

/// One row of the natal aspect table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectRow {
    pub first: Body,
    pub second: Body,
    pub kind: AspectKind,
    /// Priority rank of `kind` within the aspect table
    pub rank: usize,
    /// Angular separation, 0..=180
    pub separation: f64,
    /// Deviation from the exact angle, rounded to 0.01°
    pub deviation: f64,
}

impl AspectRow {
    pub fn pair_label(&self) -> String {
        format!("{}-{}", self.first, self.second)
    }
}

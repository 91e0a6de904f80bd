use crate::aspects::types::{AspectDefinition, AspectRow, AspectTable};
use crate::chart::ChartRecord;
use crate::util::{round2, separation};
use crate::western::Body;

/// Aspect calculator
pub struct AspectCalculator<'a> {
    table: &'a AspectTable,
}

impl<'a> AspectCalculator<'a> {
    /// Create a new aspect calculator
    pub fn new(table: &'a AspectTable) -> Self {
        Self { table }
    }

    /// First definition, in priority order, whose orb admits the separation
    /// between two longitudes. Returns the definition, its rank and the
    /// unrounded deviation from exact.
    pub fn calculate_aspect(&self, lon1: f64, lon2: f64) -> Option<(usize, &'a AspectDefinition, f64)> {
        let angle_diff = separation(lon1, lon2);

        self.table
            .definitions()
            .iter()
            .enumerate()
            .find_map(|(rank, def)| {
                let deviation = (angle_diff - def.angle).abs();
                (deviation <= def.orb).then_some((rank, def, deviation))
            })
    }

    /// Aspects among the ten bodies of a chart: each unordered pair once,
    /// sorted by priority rank then deviation.
    pub fn compute_natal_aspects(&self, record: &ChartRecord) -> Vec<AspectRow> {
        let bodies = Body::ALL;
        let mut rows = Vec::new();

        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let first = bodies[i];
                let second = bodies[j];
                let lon1 = record.body(first).lon;
                let lon2 = record.body(second).lon;

                if let Some((rank, def, deviation)) = self.calculate_aspect(lon1, lon2) {
                    rows.push(AspectRow {
                        first,
                        second,
                        kind: def.kind,
                        rank,
                        separation: separation(lon1, lon2),
                        deviation: round2(deviation),
                    });
                }
            }
        }

        // stable: equal keys keep pair order
        rows.sort_by(|a, b| a.rank.cmp(&b.rank).then(a.deviation.total_cmp(&b.deviation)));
        rows
    }
}

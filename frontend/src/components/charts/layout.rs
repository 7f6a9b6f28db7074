//! Geometry and data preparation for the canvas charts, kept free of any
//! browser type so it can be checked natively.

use plotters::style::RGBColor;
use shared::presentation::{ChartSpec, Rgb};

pub fn to_rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

/// One pie slice, ready for `plotters::element::Pie`
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: RGBColor,
}

/// Slices for a pie chart. Colours follow the category index so that they
/// stay stable across redraws; slices without a positive value are skipped.
pub fn pie_slices(spec: &ChartSpec) -> Vec<PieSlice> {
    spec.series
        .points()
        .enumerate()
        .filter(|(_, (_, value))| value.is_finite() && *value > 0.0)
        .map(|(index, (label, value))| PieSlice {
            label: label.to_string(),
            value,
            color: to_rgb(spec.style.color_for(index)),
        })
        .collect()
}

/// Vertical range of a line chart with a tenth of padding on each side
pub fn value_bounds(values: &[f64], begin_at_zero: bool) -> (f64, f64) {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (mut min, mut max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if min > max {
        return (0.0, 1.0);
    }
    if begin_at_zero {
        min = min.min(0.0);
        max = max.max(0.0);
    }

    let padding = ((max - min) * 0.1).max(1.0);
    (min - padding, max + padding)
}

/// Axis label for an x position; only whole indices get a month label
pub fn label_at(labels: &[String], x: f64) -> String {
    let index = x.round();
    if (x - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

/// Horizontal range covering every index with half a step of margin
pub fn index_range(len: usize) -> (f64, f64) {
    (-0.5, len.max(1) as f64 - 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::presentation::{ChartSeries, PIE_PALETTE};
    use shared::{CategoryTotals, MonthKey, MonthlyBalance};

    #[test]
    fn test_pie_slices_skip_empty_categories() {
        let mut totals = CategoryTotals::new();
        totals.insert("Food".to_string(), 80.0);
        totals.insert("Gifts".to_string(), 0.0);
        totals.insert("Transport".to_string(), 20.0);

        let slices = pie_slices(&ChartSpec::expense_breakdown(&totals));

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].label, "Food");
        assert_eq!(slices[0].color, to_rgb(PIE_PALETTE[0]));
        // Transport keeps the colour of its category index
        assert_eq!(slices[1].label, "Transport");
        assert_eq!(slices[1].color, to_rgb(PIE_PALETTE[2]));
    }

    #[test]
    fn test_value_bounds() {
        assert_eq!(value_bounds(&[], false), (0.0, 1.0));

        let (low, high) = value_bounds(&[700.0, -100.0], false);
        assert_eq!(low, -180.0);
        assert_eq!(high, 780.0);

        let (low, high) = value_bounds(&[50.0], false);
        assert_eq!((low, high), (49.0, 51.0));

        let (low, _) = value_bounds(&[50.0, 60.0], true);
        assert!(low < 0.0);
    }

    #[test]
    fn test_label_at_whole_indices_only() {
        let series = ChartSeries::from_monthly_balance(&[
            MonthlyBalance {
                month: MonthKey::new(2024, 1).unwrap(),
                net: 700.0,
            },
            MonthlyBalance {
                month: MonthKey::new(2024, 2).unwrap(),
                net: -100.0,
            },
        ]);

        assert_eq!(label_at(&series.labels, 0.0), "2024-01");
        assert_eq!(label_at(&series.labels, 1.0), "2024-02");
        assert_eq!(label_at(&series.labels, 0.5), "");
        assert_eq!(label_at(&series.labels, 2.0), "");
        assert_eq!(label_at(&series.labels, -1.0), "");
    }

    #[test]
    fn test_index_range() {
        assert_eq!(index_range(0), (-0.5, 0.5));
        assert_eq!(index_range(3), (-0.5, 2.5));
    }
}

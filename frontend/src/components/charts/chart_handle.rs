use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use shared::presentation::{ChartKind, ChartSpec, CURRENCY_SYMBOL};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::layout::{index_range, label_at, pie_slices, to_rgb, value_bounds};

pub const CANVAS_WIDTH: u32 = 600;
pub const CANVAS_HEIGHT: u32 = 320;

type Area = DrawingArea<CanvasBackend, Shift>;

/// A chart drawn onto a canvas. The drawing stays until `destroy` clears it,
/// so the owner must destroy the previous handle before drawing a new one.
#[derive(Debug)]
pub struct ChartHandle {
    canvas: HtmlCanvasElement,
}

impl ChartHandle {
    /// Returns `None` when the spec has no data or plotters failed
    pub fn draw(canvas: HtmlCanvasElement, spec: &ChartSpec) -> Option<Self> {
        if !spec.has_data() {
            return None;
        }

        canvas.set_width(CANVAS_WIDTH);
        canvas.set_height(CANVAS_HEIGHT);

        let backend = CanvasBackend::with_canvas_object(canvas.clone())?;
        let root = backend.into_drawing_area();
        root.fill(&WHITE).ok()?;

        match spec.kind {
            ChartKind::Pie => draw_pie(&root, spec)?,
            ChartKind::Line => draw_line(&root, spec)?,
        }

        root.present().ok()?;

        Some(Self { canvas })
    }

    /// Clear the canvas and release the handle
    pub fn destroy(self) {
        let context = self
            .canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|context| context.dyn_into::<CanvasRenderingContext2d>().ok());

        if let Some(context) = context {
            context.clear_rect(
                0.0,
                0.0,
                f64::from(self.canvas.width()),
                f64::from(self.canvas.height()),
            );
        }
    }
}

fn draw_pie(root: &Area, spec: &ChartSpec) -> Option<()> {
    let slices = pie_slices(spec);
    // Every category summed to zero: leave the canvas blank
    if slices.is_empty() {
        return Some(());
    }

    let (width, _) = root.dim_in_pixel();
    let (chart_area, legend_area) = root.split_horizontally((width * 2 / 3) as i32);

    let (chart_width, chart_height) = chart_area.dim_in_pixel();
    let center = ((chart_width / 2) as i32, (chart_height / 2) as i32);
    let radius = f64::from(chart_width.min(chart_height)) * 0.38;

    let sizes: Vec<f64> = slices.iter().map(|slice| slice.value).collect();
    let colors: Vec<RGBColor> = slices.iter().map(|slice| slice.color).collect();
    // Names go in the legend, not around the pie
    let labels = vec![String::new(); slices.len()];

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-90.0);
    pie.percentages(("sans-serif", 13).into_font().color(&WHITE));
    chart_area.draw(&pie).ok()?;

    for (index, slice) in slices.iter().enumerate() {
        let y = 20 + index as i32 * 22;
        legend_area
            .draw(&Rectangle::new([(10, y), (24, y + 14)], slice.color.filled()))
            .ok()?;
        legend_area
            .draw(&Text::new(slice.label.clone(), (32, y), ("sans-serif", 14).into_font()))
            .ok()?;
    }

    Some(())
}

fn draw_line(root: &Area, spec: &ChartSpec) -> Option<()> {
    let labels = &spec.series.labels;
    let points: Vec<(f64, f64)> = spec
        .series
        .points()
        .enumerate()
        .map(|(index, (_, value))| (index as f64, value))
        .collect();
    let values: Vec<f64> = points.iter().map(|(_, value)| *value).collect();

    let (x_min, x_max) = index_range(points.len());
    let (y_min, y_max) = value_bounds(&values, spec.style.begin_at_zero);
    let color = to_rgb(spec.style.line_color);

    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .ok()?;

    let x_formatter = |x: &f64| label_at(labels, *x);
    let y_formatter = |v: &f64| format!("{:.2} {}", v, CURRENCY_SYMBOL);

    let mut mesh = chart.configure_mesh();
    mesh.x_labels(points.len().max(2))
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .disable_x_mesh()
        .label_style(("sans-serif", 12).into_font())
        .bold_line_style(RGBColor(235, 235, 235))
        .light_line_style(RGBColor(248, 248, 248));
    if let Some(label) = &spec.style.dataset_label {
        mesh.y_desc(label.as_str());
    }
    mesh.draw().ok()?;

    if spec.style.fill_opacity > 0.0 {
        let baseline = 0.0_f64.clamp(y_min, y_max);
        chart
            .draw_series(AreaSeries::new(
                points.iter().copied(),
                baseline,
                color.mix(spec.style.fill_opacity),
            ))
            .ok()?;
    }

    chart
        .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
        .ok()?;
    chart
        .draw_series(points.iter().map(|&point| Circle::new(point, 3, color.filled())))
        .ok()?;

    Some(())
}

//! Shared canvas painter for the statistics charts.
//!
//! Translates a [`ChartConfig`] into 2D-context calls and returns the hit
//! regions used for hover tooltips.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use crate::theme::ChartTheme;

use super::config::{
	BarChart, ChartConfig, ChartKind, PieChart, ScatterChart, bar_tooltip, pie_tooltip,
	scatter_tooltip, symbol_size,
};

/// Pointer-testable area of one datum.
#[derive(Clone, Debug)]
pub enum HitShape {
	/// Axis-aligned rectangle (bars).
	Rect {
		/// Left edge.
		x: f64,
		/// Top edge.
		y: f64,
		/// Width.
		w: f64,
		/// Height.
		h: f64,
	},
	/// Filled circle (scatter points).
	Circle {
		/// Center x.
		x: f64,
		/// Center y.
		y: f64,
		/// Radius.
		r: f64,
	},
	/// Donut segment (pie slices). Angles start at twelve o'clock.
	Ring {
		/// Center x.
		cx: f64,
		/// Center y.
		cy: f64,
		/// Inner radius.
		inner: f64,
		/// Outer radius.
		outer: f64,
		/// Start angle.
		start: f64,
		/// End angle.
		end: f64,
	},
}

/// A datum's hover area plus its formatted tooltip text.
#[derive(Clone, Debug)]
pub struct HitRegion {
	/// Pointer-testable shape in canvas coordinates.
	pub shape: HitShape,
	/// Formatted tooltip lines.
	pub tooltip: String,
}

impl HitRegion {
	/// Whether a canvas-space point falls inside the region.
	pub fn contains(&self, px: f64, py: f64) -> bool {
		match self.shape {
			HitShape::Rect { x, y, w, h } => px >= x && px <= x + w && py >= y && py <= y + h,
			HitShape::Circle { x, y, r } => {
				let (dx, dy) = (px - x, py - y);
				(dx * dx + dy * dy).sqrt() <= r
			}
			HitShape::Ring {
				cx,
				cy,
				inner,
				outer,
				start,
				end,
			} => {
				let (dx, dy) = (px - cx, py - cy);
				let dist = (dx * dx + dy * dy).sqrt();
				if dist < inner || dist > outer {
					return false;
				}
				let mut angle = dy.atan2(dx);
				if angle < -PI / 2.0 {
					angle += 2.0 * PI;
				}
				angle >= start && angle < end
			}
		}
	}
}

const TITLE_Y: f64 = 24.0;
const PLOT_TOP: f64 = 50.0;
const PLOT_LEFT: f64 = 60.0;
const PLOT_RIGHT_PAD: f64 = 30.0;
const PLOT_BOTTOM_PAD: f64 = 80.0;

/// Paint a full chart frame and return the hover hit regions.
pub fn render(
	config: &ChartConfig,
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
	theme: &ChartTheme,
) -> Vec<HitRegion> {
	ctx.set_fill_style_str(theme.background);
	ctx.fill_rect(0.0, 0.0, width, height);

	ctx.set_fill_style_str(if config.error {
		theme.error_color
	} else {
		theme.text_color
	});
	ctx.set_font("bold 16px sans-serif");
	ctx.set_text_align("center");
	let _ = ctx.fill_text(&config.title, width / 2.0, TITLE_Y);
	ctx.set_text_align("start");

	match config.kind.as_ref() {
		Some(ChartKind::Bar(bar)) => render_bar(bar, ctx, width, height, theme),
		Some(ChartKind::Pie(pie)) => render_pie(pie, ctx, width, height, theme),
		Some(ChartKind::Scatter(scatter)) => render_scatter(scatter, ctx, width, height, theme),
		None => Vec::new(),
	}
}

/// Draw the hover tooltip box near the pointer.
pub fn draw_tooltip(
	ctx: &CanvasRenderingContext2d,
	region: &HitRegion,
	px: f64,
	py: f64,
	theme: &ChartTheme,
) {
	let lines: Vec<&str> = region.tooltip.lines().collect();
	let line_height = 16.0;
	let box_height = line_height * lines.len() as f64 + 10.0;
	let box_width = lines
		.iter()
		.map(|line| {
			ctx.measure_text(line)
				.map(|metrics| metrics.width())
				.unwrap_or(120.0)
		})
		.fold(60.0_f64, f64::max)
		+ 16.0;

	ctx.set_global_alpha(0.9);
	ctx.set_fill_style_str("#303133");
	ctx.fill_rect(px + 12.0, py - box_height - 8.0, box_width, box_height);
	ctx.set_global_alpha(1.0);

	ctx.set_fill_style_str(theme.background);
	ctx.set_font("12px sans-serif");
	for (i, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text(
			line,
			px + 20.0,
			py - box_height - 8.0 + line_height * (i as f64 + 1.0),
		);
	}
}

// Smallest 1/2/5-scaled step covering `max` in five intervals.
fn nice_step(max: f64) -> f64 {
	let raw = (max / 5.0).max(f64::EPSILON);
	let magnitude = 10.0_f64.powf(raw.log10().floor());
	let normalized = raw / magnitude;
	let factor = if normalized <= 1.0 {
		1.0
	} else if normalized <= 2.0 {
		2.0
	} else if normalized <= 5.0 {
		5.0
	} else {
		10.0
	};
	factor * magnitude
}

fn fmt_tick(value: f64) -> String {
	if value.fract() == 0.0 {
		format!("{}", value as i64)
	} else {
		format!("{value:.1}")
	}
}

fn render_bar(
	bar: &BarChart,
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
	theme: &ChartTheme,
) -> Vec<HitRegion> {
	let mut regions = Vec::with_capacity(bar.values.len());
	if bar.values.is_empty() {
		return regions;
	}

	let (left, right) = (PLOT_LEFT, width - PLOT_RIGHT_PAD);
	let (top, bottom) = (PLOT_TOP, height - PLOT_BOTTOM_PAD);
	let max = bar.values.iter().cloned().fold(0.0_f64, f64::max);
	let step = nice_step(max);
	let axis_max = step * 5.0;

	// Value axis with split lines.
	ctx.set_font("11px sans-serif");
	ctx.set_text_align("right");
	for i in 0..=5 {
		let value = step * i as f64;
		let y = bottom - (value / axis_max) * (bottom - top);
		ctx.set_stroke_style_str(theme.split_line_color);
		ctx.set_line_width(1.0);
		ctx.begin_path();
		ctx.move_to(left, y);
		ctx.line_to(right, y);
		ctx.stroke();
		ctx.set_fill_style_str(theme.axis_color);
		let _ = ctx.fill_text(&fmt_tick(value), left - 6.0, y + 4.0);
	}
	ctx.set_text_align("left");
	ctx.set_fill_style_str(theme.subtext_color);
	let _ = ctx.fill_text(bar.axis_name, left - 40.0, top - 10.0);

	ctx.set_stroke_style_str(theme.axis_color);
	ctx.begin_path();
	ctx.move_to(left, top);
	ctx.line_to(left, bottom);
	ctx.line_to(right, bottom);
	ctx.stroke();

	let slot = (right - left) / bar.values.len() as f64;
	let bar_width = slot * 0.6;
	for (i, (category, value)) in bar.categories.iter().zip(&bar.values).enumerate() {
		let x = left + slot * i as f64 + (slot - bar_width) / 2.0;
		let y = bottom - (value / axis_max) * (bottom - top);

		let gradient = ctx.create_linear_gradient(0.0, y, 0.0, bottom);
		let _ = gradient.add_color_stop(0.0, bar.gradient.top);
		let _ = gradient.add_color_stop(0.5, bar.gradient.bottom);
		let _ = gradient.add_color_stop(1.0, bar.gradient.bottom);
		ctx.set_fill_style_canvas_gradient(&gradient);
		ctx.fill_rect(x, y, bar_width, bottom - y);

		// Category labels, rotated to stay legible at any count.
		ctx.save();
		let _ = ctx.translate(x + bar_width / 2.0, bottom + 8.0);
		let _ = ctx.rotate(-PI / 4.0);
		ctx.set_fill_style_str(theme.axis_color);
		ctx.set_text_align("right");
		let _ = ctx.fill_text(category, 0.0, 8.0);
		ctx.restore();

		regions.push(HitRegion {
			shape: HitShape::Rect {
				x,
				y,
				w: bar_width,
				h: bottom - y,
			},
			tooltip: bar_tooltip(category, *value),
		});
	}

	if let Some(label) = bar.legend {
		let y = height - 16.0;
		let text_width = ctx
			.measure_text(label)
			.map(|metrics| metrics.width())
			.unwrap_or(80.0);
		let x = width / 2.0 - text_width / 2.0;
		ctx.set_fill_style_str(bar.gradient.bottom);
		ctx.fill_rect(x - 20.0, y - 9.0, 14.0, 10.0);
		ctx.set_fill_style_str(theme.text_color);
		let _ = ctx.fill_text(label, x, y);
	}
	regions
}

fn render_pie(
	pie: &PieChart,
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
	theme: &ChartTheme,
) -> Vec<HitRegion> {
	let mut regions = Vec::with_capacity(pie.slices.len());
	let total: f64 = pie.slices.iter().map(|slice| slice.value).sum();
	if total <= 0.0 {
		return regions;
	}

	let palette = pie.palette.unwrap_or(theme.palette);
	let (cx, cy) = (width / 2.0, height / 2.0 + 10.0);
	let available = width.min(height) / 2.0;
	let (inner, outer) = (available * pie.inner_ratio, available * pie.outer_ratio);

	let mut start = -PI / 2.0;
	for (i, slice) in pie.slices.iter().enumerate() {
		let sweep = slice.value / total * 2.0 * PI;
		let end = start + sweep;
		let color = palette[i % palette.len()];

		ctx.begin_path();
		let _ = ctx.arc(cx, cy, outer, start, end);
		let _ = ctx.arc_with_anticlockwise(cx, cy, inner, end, start, true);
		ctx.close_path();
		ctx.set_fill_style_str(color);
		ctx.fill();
		ctx.set_stroke_style_str("#fff");
		ctx.set_line_width(2.0);
		ctx.stroke();

		regions.push(HitRegion {
			shape: HitShape::Ring {
				cx,
				cy,
				inner,
				outer,
				start,
				end,
			},
			tooltip: pie_tooltip(pie.series_name, &slice.name, slice.value, total),
		});
		start = end;
	}

	// Vertical legend, left-middle.
	ctx.set_font("12px sans-serif");
	let legend_height = pie.slices.len() as f64 * 20.0;
	let mut y = cy - legend_height / 2.0;
	for (i, slice) in pie.slices.iter().enumerate() {
		ctx.set_fill_style_str(palette[i % palette.len()]);
		ctx.fill_rect(10.0, y - 9.0, 12.0, 12.0);
		ctx.set_fill_style_str(theme.text_color);
		let _ = ctx.fill_text(&slice.name, 28.0, y + 1.0);
		y += 20.0;
	}
	regions
}

fn render_scatter(
	scatter: &ScatterChart,
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
	theme: &ChartTheme,
) -> Vec<HitRegion> {
	let mut regions = Vec::new();
	let points: Vec<(f64, f64)> = scatter
		.series
		.iter()
		.flat_map(|series| series.points.iter().map(|p| (p.x, p.y)))
		.collect();
	if points.is_empty() {
		return regions;
	}

	let (left, right) = (PLOT_LEFT, width - PLOT_RIGHT_PAD);
	let (top, bottom) = (PLOT_TOP, height - PLOT_BOTTOM_PAD);

	let (mut min_x, mut max_x, mut min_y, mut max_y) =
		(f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);
	for &(x, y) in &points {
		min_x = min_x.min(x);
		max_x = max_x.max(x);
		min_y = min_y.min(y);
		max_y = max_y.max(y);
	}
	let pad_x = ((max_x - min_x) * 0.1).max(0.5);
	let pad_y = ((max_y - min_y) * 0.1).max(0.5);
	min_x -= pad_x;
	max_x += pad_x;
	min_y -= pad_y;
	max_y += pad_y;

	let to_px = |x: f64| left + (x - min_x) / (max_x - min_x) * (right - left);
	let to_py = |y: f64| bottom - (y - min_y) / (max_y - min_y) * (bottom - top);

	// Axes with split lines on both dimensions.
	ctx.set_font("11px sans-serif");
	for i in 0..=5 {
		let t = i as f64 / 5.0;
		let (gx, gy) = (min_x + t * (max_x - min_x), min_y + t * (max_y - min_y));
		ctx.set_stroke_style_str(theme.split_line_color);
		ctx.set_line_width(1.0);
		ctx.begin_path();
		ctx.move_to(to_px(gx), top);
		ctx.line_to(to_px(gx), bottom);
		ctx.stroke();
		ctx.begin_path();
		ctx.move_to(left, to_py(gy));
		ctx.line_to(right, to_py(gy));
		ctx.stroke();

		ctx.set_fill_style_str(theme.axis_color);
		ctx.set_text_align("center");
		let _ = ctx.fill_text(&fmt_tick(gx), to_px(gx), bottom + 16.0);
		ctx.set_text_align("right");
		let _ = ctx.fill_text(&fmt_tick(gy), left - 6.0, to_py(gy) + 4.0);
		ctx.set_text_align("start");
	}
	ctx.set_stroke_style_str(theme.axis_color);
	ctx.begin_path();
	ctx.move_to(left, top);
	ctx.line_to(left, bottom);
	ctx.line_to(right, bottom);
	ctx.stroke();
	ctx.set_fill_style_str(theme.subtext_color);
	let _ = ctx.fill_text(scatter.x_name, right - 80.0, bottom + 32.0);
	let _ = ctx.fill_text(scatter.y_name, left - 40.0, top - 10.0);

	for (i, series) in scatter.series.iter().enumerate() {
		let color = theme.palette[i % theme.palette.len()];
		ctx.set_fill_style_str(color);
		for point in &series.points {
			let (px, py) = (to_px(point.x), to_py(point.y));
			let radius = symbol_size(point.usage_frequency);
			ctx.set_global_alpha(0.8);
			ctx.begin_path();
			let _ = ctx.arc(px, py, radius, 0.0, 2.0 * PI);
			ctx.fill();
			ctx.set_global_alpha(1.0);

			regions.push(HitRegion {
				shape: HitShape::Circle {
					x: px,
					y: py,
					r: radius,
				},
				tooltip: scatter_tooltip(point, &series.name),
			});
		}
	}

	// Horizontal legend along the bottom edge.
	ctx.set_font("12px sans-serif");
	let mut x = left;
	let y = height - 12.0;
	for (i, series) in scatter.series.iter().enumerate() {
		ctx.set_fill_style_str(theme.palette[i % theme.palette.len()]);
		ctx.begin_path();
		let _ = ctx.arc(x + 5.0, y - 4.0, 5.0, 0.0, 2.0 * PI);
		ctx.fill();
		ctx.set_fill_style_str(theme.text_color);
		let _ = ctx.fill_text(&series.name, x + 14.0, y);
		let text_width = ctx
			.measure_text(&series.name)
			.map(|metrics| metrics.width())
			.unwrap_or(90.0);
		x += text_width + 30.0;
	}
	regions
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rect_region_contains_inner_points_only() {
		let region = HitRegion {
			shape: HitShape::Rect {
				x: 10.0,
				y: 10.0,
				w: 20.0,
				h: 40.0,
			},
			tooltip: String::new(),
		};
		assert!(region.contains(15.0, 30.0));
		assert!(!region.contains(31.0, 30.0));
		assert!(!region.contains(15.0, 9.0));
	}

	#[test]
	fn circle_region_respects_radius() {
		let region = HitRegion {
			shape: HitShape::Circle {
				x: 0.0,
				y: 0.0,
				r: 10.0,
			},
			tooltip: String::new(),
		};
		assert!(region.contains(6.0, 6.0));
		assert!(!region.contains(8.0, 8.0));
	}

	#[test]
	fn ring_region_checks_radius_and_angle() {
		// Quarter slice from twelve to three o'clock.
		let region = HitRegion {
			shape: HitShape::Ring {
				cx: 0.0,
				cy: 0.0,
				inner: 5.0,
				outer: 10.0,
				start: -PI / 2.0,
				end: 0.0,
			},
			tooltip: String::new(),
		};
		assert!(region.contains(5.0, -5.0));
		assert!(!region.contains(-5.0, -5.0));
		assert!(!region.contains(1.0, -1.0));
		assert!(!region.contains(9.0, 9.0));
	}

	#[test]
	fn nice_step_covers_the_maximum_in_five_intervals() {
		for max in [1.0, 7.0, 42.0, 99.0, 100.0, 463.0] {
			let step = nice_step(max);
			assert!(step * 5.0 >= max, "step {step} too small for {max}");
		}
		assert_eq!(nice_step(100.0), 20.0);
		assert_eq!(nice_step(463.0), 100.0);
	}
}

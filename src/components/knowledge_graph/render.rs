//! Canvas drawing for the knowledge graph.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use crate::theme::ChartTheme;

use super::state::GraphState;
use super::types::{LinkKind, NodeKind};

/// Draw one frame: background, transformed edges and nodes, then the legend
/// and any hover tooltip in screen space.
pub fn render(state: &GraphState, ctx: &CanvasRenderingContext2d, theme: &ChartTheme) {
	ctx.set_fill_style_str(theme.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();

	draw_legend(ctx, theme);
	if let Some(idx) = state.hover {
		draw_tooltip(state, idx, ctx, theme);
	}
}

/// Centered status line used for the loading, no-data, and error states.
pub fn draw_status(
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
	text: &str,
	color: &str,
	theme: &ChartTheme,
) {
	ctx.set_fill_style_str(theme.background);
	ctx.fill_rect(0.0, 0.0, width, height);
	ctx.set_fill_style_str(color);
	ctx.set_font("14px sans-serif");
	ctx.set_text_align("center");
	let _ = ctx.fill_text(text, width / 2.0, height / 2.0);
	ctx.set_text_align("start");
}

fn draw_links(state: &GraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_line_width(1.5 / state.transform.k);
	ctx.set_global_alpha(0.6);
	for &(src, tgt, kind) in &state.links {
		let (a, b) = (&state.sim.nodes()[src], &state.sim.nodes()[tgt]);
		ctx.set_stroke_style_str(kind.color());
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &GraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	for (idx, node) in state.sim.nodes().iter().enumerate() {
		let sprite = &state.sprites[idx];
		let radius = sprite.kind.radius();

		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(sprite.kind.color());
		ctx.fill();
		ctx.set_stroke_style_str("#fff");
		ctx.set_line_width(1.5 / k);
		ctx.stroke();

		ctx.set_fill_style_str("#fff");
		ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
		ctx.set_text_align("center");
		let _ = ctx.fill_text(&sprite.name, node.x, node.y + 4.0 / k.max(0.5));
	}
	ctx.set_text_align("start");
}

fn draw_legend(ctx: &CanvasRenderingContext2d, theme: &ChartTheme) {
	let entries_nodes = [
		(NodeKind::Material, "Medicinal Material"),
		(NodeKind::Prescription, "Prescription"),
	];
	let entries_links = [
		(LinkKind::Contains, "Contains"),
		(LinkKind::Synergistic, "Interaction"),
	];

	ctx.set_font("12px sans-serif");
	let mut y = 30.0;
	for (kind, label) in entries_nodes {
		ctx.begin_path();
		let _ = ctx.arc(30.0, y, 8.0, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(kind.color());
		ctx.fill();
		ctx.set_fill_style_str(theme.subtext_color);
		let _ = ctx.fill_text(label, 45.0, y + 5.0);
		y += 30.0;
	}
	for (kind, label) in entries_links {
		ctx.set_stroke_style_str(kind.color());
		ctx.set_line_width(1.5);
		ctx.begin_path();
		ctx.move_to(20.0, y);
		ctx.line_to(40.0, y);
		ctx.stroke();
		ctx.set_fill_style_str(theme.subtext_color);
		let _ = ctx.fill_text(label, 45.0, y + 5.0);
		y += 30.0;
	}
}

fn draw_tooltip(state: &GraphState, idx: usize, ctx: &CanvasRenderingContext2d, theme: &ChartTheme) {
	let node = &state.sim.nodes()[idx];
	let sx = node.x * state.transform.k + state.transform.x;
	let sy = node.y * state.transform.k + state.transform.y;
	let lines: Vec<&str> = state.sprites[idx].tooltip.lines().collect();

	let line_height = 16.0;
	let box_height = line_height * lines.len() as f64 + 10.0;
	let box_width = 180.0;
	let (bx, by) = (sx + 12.0, sy - box_height - 8.0);

	ctx.set_global_alpha(0.9);
	ctx.set_fill_style_str("#303133");
	ctx.fill_rect(bx, by, box_width, box_height);
	ctx.set_global_alpha(1.0);

	ctx.set_fill_style_str(theme.background);
	ctx.set_font("12px sans-serif");
	for (i, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text(line, bx + 8.0, by + line_height * (i as f64 + 1.0));
	}
}

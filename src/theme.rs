//! Light visual theme shared by every chart surface.

/// Default series palette, applied in order when a chart does not carry its
/// own colors.
pub const LIGHT_PALETTE: &[&str] = &[
	"#5470c6", "#91cc75", "#fac858", "#ee6666", "#73c0de", "#3ba272", "#fc8452", "#9a60b4",
	"#ea7ccc",
];

/// Typed chart styling, translated to canvas state at the rendering boundary.
#[derive(Clone, Debug)]
pub struct ChartTheme {
	/// Series colors applied in order.
	pub palette: &'static [&'static str],
	/// Title and axis label color.
	pub text_color: &'static str,
	/// Secondary text (legends, axis names).
	pub subtext_color: &'static str,
	/// Axis line color.
	pub axis_color: &'static str,
	/// Grid split line color.
	pub split_line_color: &'static str,
	/// Chart background fill.
	pub background: &'static str,
	/// Color for error titles and failed-load placeholders.
	pub error_color: &'static str,
}

impl ChartTheme {
	/// The light theme every view uses.
	pub fn light() -> Self {
		Self {
			palette: LIGHT_PALETTE,
			text_color: "#333",
			subtext_color: "#666",
			axis_color: "#333",
			split_line_color: "rgba(204, 204, 204, 0.5)",
			background: "#ffffff",
			error_color: "#f56c6c",
		}
	}
}

impl Default for ChartTheme {
	fn default() -> Self {
		Self::light()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn palette_cycles_without_panicking() {
		let theme = ChartTheme::light();
		for i in 0..30 {
			let _ = theme.palette[i % theme.palette.len()];
		}
	}
}

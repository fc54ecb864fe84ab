//! Categorical color scale.

/// The twenty-color categorical palette, paired dark/light.
pub const CATEGORY20: [&str; 20] = [
	"#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
	"#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
	"#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

/// Color for the `i`-th item, cycling through the palette.
pub fn category20(i: usize) -> &'static str {
	CATEGORY20[i % CATEGORY20.len()]
}

pub mod entry;
pub mod heatmap;

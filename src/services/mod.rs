pub mod entries;
pub mod heatmap;

pub use entries::EntryService;

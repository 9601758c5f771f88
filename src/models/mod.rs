pub mod config;
pub mod palette;
pub mod report;

pub use config::{AppConfig, WeightOverrides, Weights};
pub use palette::{ColorInput, Palette, PaletteColor, PaletteError};
pub use report::{ColorReport, MinScores, NormalizedScores, PairScores, PaletteReport};

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

pub mod config;
pub mod error;
pub mod gpx_store;
pub mod logs;
pub mod metrics;
pub mod noise;
pub mod resample;
pub mod speed_editor;
pub mod thinning;
pub mod time_range;
pub mod track;

pub use error::TrackError;
pub use speed_editor::{set_by_speed, SpeedEditReport};
pub use track::{TimePrecision, Track, TrackPoint};

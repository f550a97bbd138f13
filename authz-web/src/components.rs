pub mod payload;
pub mod styles;

pub use payload::PayloadView;

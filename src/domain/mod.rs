// Domain layer - Transfer shapes and display rules
pub mod asset;
pub mod chart;
pub mod locale;

// Application layer - controllers and the ports they drive
pub mod chart_renderer;
pub mod detail_controller;
pub mod maintenance_api;
pub mod page;

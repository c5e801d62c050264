mod change_detector;
mod config;
mod lifecycle;
mod sources;
